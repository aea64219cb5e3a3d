// Turns one solved ordering into a flat output row

use serde::Serialize;

use super::error::Result;
use super::model_builder::ArmyModel;
use super::objectives::ObjectiveSet;
use crate::domain::{
    solver_service::SolverError,
    units::{Facility, Unit, UnitCatalog, UnitKind},
    value_objects::ObjectiveKind,
};

/// Largest distance from an integer accepted for a unit count
pub const INTEGRALITY_TOLERANCE: f64 = 1e-5;

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// One army composition, as produced under one objective priority ordering.
///
/// Serialises to the columns
/// `axe, lc, ma, serk, ram, food, time_in_seconds, time_in_days, total_attack_strength`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionRecord {
    #[serde(skip)]
    pub priority: Vec<ObjectiveKind>,
    pub axe: u64,
    pub lc: u64,
    pub ma: u64,
    pub serk: u64,
    pub ram: u64,
    pub food: u64,
    pub time_in_seconds: u64,
    pub time_in_days: f64,
    pub total_attack_strength: u64,
}

impl SolutionRecord {
    pub fn count(&self, kind: UnitKind) -> u64 {
        match kind {
            UnitKind::Axe => self.axe,
            UnitKind::LightCavalry => self.lc,
            UnitKind::MountedArcher => self.ma,
            UnitKind::Berserker => self.serk,
            UnitKind::Ram => self.ram,
        }
    }

    pub fn attack_of(&self, kind: UnitKind) -> u64 {
        self.count(kind) * u64::from(UnitCatalog::unit(kind).attack_strength)
    }

    pub fn build_time_in(&self, facility: Facility) -> u64 {
        UnitCatalog::units_in(facility)
            .map(|u| self.count(u.kind) * u64::from(u.recruit_time_seconds))
            .sum()
    }

    pub fn barracks_build_time(&self) -> u64 {
        self.build_time_in(Facility::Barracks)
    }

    pub fn hall_of_order_build_time(&self) -> u64 {
        self.build_time_in(Facility::HallOfOrder)
    }

    /// Display names of the priority ordering, highest priority first
    pub fn priority_names(&self) -> Vec<&'static str> {
        self.priority.iter().map(|k| k.display_name()).collect()
    }
}

/// Reads unit counts out of an engine assignment; never touches the model
pub struct SolutionCollector<'a> {
    model: &'a ArmyModel,
    objectives: &'a ObjectiveSet,
}

impl<'a> SolutionCollector<'a> {
    pub fn new(model: &'a ArmyModel, objectives: &'a ObjectiveSet) -> Self {
        Self { model, objectives }
    }

    pub fn collect(&self, priority: &[ObjectiveKind], values: &[f64]) -> Result<SolutionRecord> {
        if values.len() != self.model.problem.variables.len() {
            return Err(SolverError::ExecutionFailed(format!(
                "engine returned {} values for {} variables",
                values.len(),
                self.model.problem.variables.len()
            ))
            .into());
        }

        let mut counts = [0u64; 5];
        for kind in UnitKind::ALL {
            counts[kind.index()] = to_count(kind, values[self.model.column(kind)])?;
        }

        let food = sum_over(&counts, |u| u.food_cost);
        let time_in_seconds = sum_over(&counts, |u| u.recruit_time_seconds);
        let total_attack_strength = sum_over(&counts, |u| u.attack_strength);

        self.check_attack_identity(values, total_attack_strength)?;

        Ok(SolutionRecord {
            priority: priority.to_vec(),
            axe: counts[UnitKind::Axe.index()],
            lc: counts[UnitKind::LightCavalry.index()],
            ma: counts[UnitKind::MountedArcher.index()],
            serk: counts[UnitKind::Berserker.index()],
            ram: counts[UnitKind::Ram.index()],
            food,
            time_in_seconds,
            time_in_days: round_to_hundredths(time_in_seconds as f64 / SECONDS_PER_DAY),
            total_attack_strength,
        })
    }

    // recomputed attack must equal -neg_attack as the engine saw it
    fn check_attack_identity(&self, values: &[f64], total_attack_strength: u64) -> Result<()> {
        let Some(neg_attack) = self.objectives.get(ObjectiveKind::NegAttack) else {
            return Ok(());
        };
        let reported = -neg_attack.evaluate(values);
        if (reported - total_attack_strength as f64).abs() > INTEGRALITY_TOLERANCE * reported.abs().max(1.0) {
            return Err(SolverError::ExecutionFailed(format!(
                "attack strength mismatch: model reports {}, unit counts give {}",
                reported, total_attack_strength
            ))
            .into());
        }
        Ok(())
    }
}

fn sum_over(counts: &[u64; 5], attribute: fn(&Unit) -> u32) -> u64 {
    UnitCatalog::units()
        .iter()
        .map(|u| counts[u.kind.index()] * u64::from(attribute(u)))
        .sum()
}

fn to_count(kind: UnitKind, value: f64) -> Result<u64> {
    let rounded = value.round();
    if !value.is_finite() || rounded < 0.0 || (value - rounded).abs() > INTEGRALITY_TOLERANCE {
        return Err(SolverError::ExecutionFailed(format!(
            "non-integral count {} for unit {}",
            value, kind
        ))
        .into());
    }
    Ok(rounded as u64)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
