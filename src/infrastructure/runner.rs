// Infrastructure: wires the input table, the solving engine and the output table

use log::{info, warn};
use std::path::PathBuf;

use super::params::{read_params_csv, PARAMS_FILE_NAME};
use super::report::{write_solutions_csv, SOLUTION_FILE_NAME};
use crate::application::{
    collector::SolutionRecord,
    error::{PlannerError, Result},
    planner,
};
use crate::domain::{models::SolverConfig, run_config::RunConfiguration};
use crate::solver::SolverFactory;

/// Weight and limit overrides taken from outside `params.csv`
#[derive(Debug, Clone, Default)]
pub struct ParamOverrides {
    pub axe_strength: Option<f64>,
    pub lc_strength: Option<f64>,
    pub ma_strength: Option<f64>,
    pub build_time_limit_seconds: Option<u64>,
}

impl ParamOverrides {
    pub fn is_complete(&self) -> bool {
        self.axe_strength.is_some() && self.lc_strength.is_some() && self.ma_strength.is_some()
    }

    pub fn apply(&self, mut config: RunConfiguration) -> RunConfiguration {
        if let Some(v) = self.axe_strength {
            config.axe_strength = v;
        }
        if let Some(v) = self.lc_strength {
            config.lc_strength = v;
        }
        if let Some(v) = self.ma_strength {
            config.ma_strength = v;
        }
        if let Some(v) = self.build_time_limit_seconds {
            config.build_time_limit_seconds = v;
        }
        config
    }
}

pub struct RunnerConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub overrides: ParamOverrides,
    pub solver: SolverConfig,
}

impl RunnerConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            overrides: ParamOverrides::default(),
            solver: SolverConfig::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: ParamOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// `params.csv` merged with the overrides; the file may be skipped when
    /// every weight is overridden
    pub fn load_run_configuration(&self) -> Result<RunConfiguration> {
        let params_path = self.input_dir.join(PARAMS_FILE_NAME);
        let base = if params_path.exists() || !self.overrides.is_complete() {
            read_params_csv(&params_path)?
        } else {
            RunConfiguration::default()
        };
        Ok(self.overrides.apply(base))
    }
}

/// Read the parameters, solve every ordering and write `solution.csv`.
///
/// The output file is only created once every ordering has been solved.
pub fn run(config: &RunnerConfig) -> Result<(PathBuf, Vec<SolutionRecord>)> {
    let run_config = config.load_run_configuration()?;
    run_config
        .validate()
        .map_err(PlannerError::InvalidConfiguration)?;
    let solver = SolverFactory::create_from_backend(config.solver.backend)?;
    info!("Using solver: {}", solver.name());

    let records =
        planner::optimize_offensive_army_with(&run_config, config.solver.clone(), solver.as_ref())?;
    if records.is_empty() {
        warn!("No solutions to write");
    }

    std::fs::create_dir_all(&config.output_dir)?;
    let output_path = config.output_dir.join(SOLUTION_FILE_NAME);
    write_solutions_csv(&output_path, &records)?;
    info!("Wrote {} rows to {}", records.len(), output_path.display());

    Ok((output_path, records))
}
