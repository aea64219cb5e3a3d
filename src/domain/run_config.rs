// Run-time parameters of one planning run

use serde::Deserialize;

use super::units::UnitKind;

/// Thirty days
pub const DEFAULT_BUILD_TIME_LIMIT_SECONDS: u64 = 2_592_000;

fn default_build_time_limit() -> u64 {
    DEFAULT_BUILD_TIME_LIMIT_SECONDS
}

/// Strength weights for the weighted units plus the per-facility build-time ceiling.
///
/// Field names double as the column names of `params.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfiguration {
    pub axe_strength: f64,
    pub lc_strength: f64,
    pub ma_strength: f64,
    #[serde(default = "default_build_time_limit", deserialize_with = "limit_or_default")]
    pub build_time_limit_seconds: u64,
}

// An empty cell in params.csv means "use the default"
fn limit_or_default<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(DEFAULT_BUILD_TIME_LIMIT_SECONDS))
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            axe_strength: 1.0,
            lc_strength: 1.0,
            ma_strength: 1.0,
            build_time_limit_seconds: DEFAULT_BUILD_TIME_LIMIT_SECONDS,
        }
    }
}

/// Target fraction of total attack strength for each weighted unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthShares {
    pub axe: f64,
    pub lc: f64,
    pub ma: f64,
}

impl StrengthShares {
    pub fn of(&self, kind: UnitKind) -> Option<f64> {
        match kind {
            UnitKind::Axe => Some(self.axe),
            UnitKind::LightCavalry => Some(self.lc),
            UnitKind::MountedArcher => Some(self.ma),
            UnitKind::Berserker | UnitKind::Ram => None,
        }
    }

    pub fn total(&self) -> f64 {
        self.axe + self.lc + self.ma
    }
}

impl RunConfiguration {
    pub fn new(axe_strength: f64, lc_strength: f64, ma_strength: f64) -> Self {
        Self {
            axe_strength,
            lc_strength,
            ma_strength,
            ..Self::default()
        }
    }

    pub fn with_build_time_limit(mut self, seconds: u64) -> Self {
        self.build_time_limit_seconds = seconds;
        self
    }

    pub fn weights(&self) -> [(UnitKind, f64); 3] {
        [
            (UnitKind::Axe, self.axe_strength),
            (UnitKind::LightCavalry, self.lc_strength),
            (UnitKind::MountedArcher, self.ma_strength),
        ]
    }

    /// Check the configuration, returning a description of every problem found
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        for (kind, weight) in self.weights() {
            if !weight.is_finite() {
                errors.push(format!("{} strength must be a finite number, got {}", kind, weight));
            } else if weight < 0.0 {
                errors.push(format!("{} strength must not be negative, got {}", kind, weight));
            }
        }

        if errors.is_empty() {
            let sum: f64 = self.weights().iter().map(|(_, w)| w).sum();
            if sum <= 0.0 {
                errors.push(format!("strength weights must sum to a positive value, got {}", sum));
            }
        }

        if self.build_time_limit_seconds == 0 {
            errors.push("build_time_limit_seconds must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }

    /// Normalised weights; fails on a configuration that does not validate
    pub fn shares(&self) -> Result<StrengthShares, String> {
        self.validate()?;
        // scaled by the largest weight first; the raw sum of finite weights can overflow
        let largest = self.weights().iter().map(|&(_, w)| w).fold(0.0, f64::max);
        let [axe, lc, ma] = self.weights().map(|(_, w)| w / largest);
        let sum = axe + lc + ma;
        Ok(StrengthShares {
            axe: axe / sum,
            lc: lc / sum,
            ma: ma / sum,
        })
    }
}
