use log::info;

use super::collector::SolutionRecord;
use super::error::Result;
use super::model_builder::ModelBuilder;
use super::objectives::ObjectiveSet;
use super::scheduler::LexicographicScheduler;
use crate::domain::{
    models::SolverConfig, run_config::RunConfiguration, solver_service::SolverService,
};

/// Compute the army compositions for every objective priority ordering.
///
/// Builds one model from `config`, then re-optimizes it with `solver` once per
/// ordering. Records come back in enumeration order. A degenerate
/// configuration is rejected before `solver` is called at all.
pub fn optimize_offensive_army(
    config: &RunConfiguration,
    solver: &dyn SolverService,
) -> Result<Vec<SolutionRecord>> {
    optimize_offensive_army_with(config, SolverConfig::default(), solver)
}

/// Same as [`optimize_offensive_army`], forwarding `solver_config` to the engine
pub fn optimize_offensive_army_with(
    config: &RunConfiguration,
    solver_config: SolverConfig,
    solver: &dyn SolverService,
) -> Result<Vec<SolutionRecord>> {
    let model = ModelBuilder::new(config.clone())
        .with_solver_config(solver_config)
        .build()?;
    let objectives = ObjectiveSet::from_model(&model);

    info!("Planning army: {}", model.problem.description);
    let records = LexicographicScheduler::new(solver).run(&model, &objectives)?;
    info!("Collected {} solutions", records.len());

    Ok(records)
}
