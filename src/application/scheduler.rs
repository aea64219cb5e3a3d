// Lexicographic scheduler: solves the fixed army model once per objective
// priority ordering

use itertools::Itertools;
use log::{debug, info};

use super::collector::{SolutionCollector, SolutionRecord};
use super::error::{PlannerError, Result};
use super::model_builder::ArmyModel;
use super::objectives::{Objective, ObjectiveSet};
use crate::domain::{
    models::ObjectiveFunction,
    solver_service::{SolverError, SolverService},
    value_objects::{ObjectiveKind, SolutionStatus},
};

/// Largest objective count the scheduler accepts.
///
/// The number of orderings is `n!`: 6 for the three army objectives, 720 at
/// this limit. Raising it multiplies the number of full MIP solves.
pub const MAX_OBJECTIVES: usize = 6;

/// Every strict priority ordering of `kinds`, in lexicographic order of position
pub fn priority_orders(kinds: &[ObjectiveKind]) -> Result<Vec<Vec<ObjectiveKind>>> {
    if kinds.is_empty() || kinds.len() > MAX_OBJECTIVES {
        return Err(PlannerError::InvalidConfiguration(format!(
            "between 1 and {} objectives can be ordered, got {}",
            MAX_OBJECTIVES,
            kinds.len()
        )));
    }
    if !kinds.iter().all_unique() {
        return Err(PlannerError::InvalidConfiguration(
            "objective kinds must be distinct".to_string(),
        ));
    }

    Ok(kinds.iter().copied().permutations(kinds.len()).collect())
}

fn describe(ordering: &[ObjectiveKind]) -> String {
    ordering.iter().map(|k| k.id()).join(" > ")
}

pub struct LexicographicScheduler<'a> {
    solver: &'a dyn SolverService,
}

impl<'a> LexicographicScheduler<'a> {
    pub fn new(solver: &'a dyn SolverService) -> Self {
        Self { solver }
    }

    /// Solve `model` under every ordering of `objectives`, one after another.
    ///
    /// Any failure discards the records gathered so far.
    pub fn run(&self, model: &ArmyModel, objectives: &ObjectiveSet) -> Result<Vec<SolutionRecord>> {
        let orderings = priority_orders(&objectives.kinds())?;
        let collector = SolutionCollector::new(model, objectives);

        info!(
            "Solving {} priority orderings with {}",
            orderings.len(),
            self.solver.name()
        );

        let mut records = Vec::with_capacity(orderings.len());
        for ordering in &orderings {
            let functions = ordering
                .iter()
                .map(|&kind| {
                    objectives
                        .get(kind)
                        .map(Objective::to_function)
                        .ok_or_else(|| {
                            PlannerError::InvalidConfiguration(format!("objective {} is not defined", kind))
                        })
                })
                .collect::<Result<Vec<ObjectiveFunction>>>()?;

            let solution = self.solver.solve_lexicographic(&model.problem, &functions)?;
            let stats = &solution.statistics;
            debug!(
                "[{}] {} in {:.1} ms over {} variables ({} integer) and {} constraints: {}",
                describe(ordering),
                solution.status,
                stats.solve_time_ms,
                stats.num_variables,
                stats.num_integer_vars,
                stats.num_constraints,
                solution.message
            );

            match solution.status {
                SolutionStatus::Optimal => {}
                SolutionStatus::Infeasible => {
                    return Err(PlannerError::ModelInfeasible {
                        ordering: describe(ordering),
                        diagnostics: solution.message,
                    });
                }
                status => {
                    return Err(SolverError::ExecutionFailed(format!(
                        "ordering [{}] ended with status {}: {}",
                        describe(ordering),
                        status,
                        solution.message
                    ))
                    .into());
                }
            }

            let record = collector.collect(ordering, &solution.variable_values)?;
            info!(
                "{:?} - strength: {}, food: {}",
                record.priority_names(),
                record.total_attack_strength,
                record.food
            );
            debug!(
                "axe: {}, lc: {}, ma: {}, serk: {}, ram: {}, food: {}, time: {} days",
                record.axe,
                record.lc,
                record.ma,
                record.serk,
                record.ram,
                record.food,
                record.time_in_days
            );
            records.push(record);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::model_builder::ModelBuilder;
    use crate::domain::{
        models::{OptimizationProblem, Solution},
        run_config::RunConfiguration,
        solver_service,
    };
    use std::sync::Mutex;

    /// Answers every solve with the same assignment, or with a fixed status
    struct FixedSolver {
        answer: Solution,
        calls: Mutex<Vec<Vec<f64>>>,
    }

    impl FixedSolver {
        fn returning(values: Vec<f64>) -> Self {
            Self {
                answer: Solution::optimal(0.0, values),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_with(status: SolutionStatus) -> Self {
            Self {
                answer: Solution::new(status, "conflict on total_food_max"),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl SolverService for FixedSolver {
        fn solve(&self, problem: &OptimizationProblem) -> solver_service::Result<Solution> {
            self.calls
                .lock()
                .unwrap()
                .push(problem.objective.coefficients.clone());
            let mut answer = self.answer.clone();
            if answer.is_optimal() {
                answer.optimal_value = Some(problem.objective.evaluate(&answer.variable_values));
            }
            Ok(answer)
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn supports_mip(&self) -> bool {
            true
        }
    }

    struct BrokenSolver;

    impl SolverService for BrokenSolver {
        fn solve(&self, _problem: &OptimizationProblem) -> solver_service::Result<Solution> {
            Err(SolverError::ExecutionFailed("out of memory".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }

        fn supports_mip(&self) -> bool {
            true
        }
    }

    fn model() -> (ArmyModel, ObjectiveSet) {
        let model = ModelBuilder::new(RunConfiguration::default()).build().unwrap();
        let objectives = ObjectiveSet::from_model(&model);
        (model, objectives)
    }

    #[test]
    fn test_six_distinct_orderings() {
        let orders = priority_orders(&ObjectiveKind::ALL).unwrap();
        assert_eq!(orders.len(), 6);
        assert!(orders.iter().all_unique());
        assert!(orders.iter().all(|o| o.len() == 3 && o.iter().all_unique()));

        // same sequence as permuting [neg_attack, hoo_time, barracks_time] by position
        use ObjectiveKind::*;
        assert_eq!(orders[0], vec![NegAttack, HallOfOrderTime, BarracksTime]);
        assert_eq!(orders[1], vec![NegAttack, BarracksTime, HallOfOrderTime]);
        assert_eq!(orders[2], vec![HallOfOrderTime, NegAttack, BarracksTime]);
        assert_eq!(orders[5], vec![BarracksTime, HallOfOrderTime, NegAttack]);
    }

    #[test]
    fn test_ordering_limits() {
        assert!(priority_orders(&[]).is_err());
        assert!(priority_orders(&[ObjectiveKind::NegAttack, ObjectiveKind::NegAttack]).is_err());
        assert_eq!(priority_orders(&[ObjectiveKind::BarracksTime]).unwrap().len(), 1);
    }

    #[test]
    fn test_one_record_per_ordering() {
        let (model, objectives) = model();
        let solver = FixedSolver::returning(vec![1000.0, 300.0, 250.0, 10.0, 250.0]);

        let records = LexicographicScheduler::new(&solver).run(&model, &objectives).unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(records[0].priority, vec![
            ObjectiveKind::NegAttack,
            ObjectiveKind::HallOfOrderTime,
            ObjectiveKind::BarracksTime
        ]);
        assert!(records.iter().all(|r| r.axe == 1000 && r.ram == 250));
        // three lexicographic stages per ordering
        assert_eq!(solver.calls.lock().unwrap().len(), 18);
    }

    #[test]
    fn test_stage_objectives_follow_ordering() {
        let (model, objectives) = model();
        let solver = FixedSolver::returning(vec![0.0, 0.0, 0.0, 1.0, 250.0]);
        LexicographicScheduler::new(&solver).run(&model, &objectives).unwrap();

        let calls = solver.calls.lock().unwrap();
        let neg_attack = &objectives.get(ObjectiveKind::NegAttack).unwrap().expression.coefficients;
        let hall = &objectives.get(ObjectiveKind::HallOfOrderTime).unwrap().expression.coefficients;
        assert_eq!(&calls[0], neg_attack);
        assert_eq!(&calls[1], hall);
        // third ordering starts with the hall of order
        assert_eq!(&calls[6], hall);
    }

    #[test]
    fn test_shared_model_is_not_mutated() {
        let (model, objectives) = model();
        let before = model.problem.constraints.len();
        let solver = FixedSolver::returning(vec![0.0, 0.0, 0.0, 1.0, 250.0]);
        LexicographicScheduler::new(&solver).run(&model, &objectives).unwrap();
        assert_eq!(model.problem.constraints.len(), before);
    }

    #[test]
    fn test_infeasible_model_aborts_run() {
        let (model, objectives) = model();
        let solver = FixedSolver::failing_with(SolutionStatus::Infeasible);

        let err = LexicographicScheduler::new(&solver)
            .run(&model, &objectives)
            .unwrap_err();

        match err {
            PlannerError::ModelInfeasible { ordering, diagnostics } => {
                assert_eq!(ordering, "neg_attack > hoo_time > barracks_time");
                assert!(diagnostics.contains("total_food_max"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // aborted on the first stage of the first ordering
        assert_eq!(solver.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_other_statuses_are_engine_failures() {
        let (model, objectives) = model();
        let solver = FixedSolver::failing_with(SolutionStatus::TimeLimit);
        let err = LexicographicScheduler::new(&solver)
            .run(&model, &objectives)
            .unwrap_err();
        assert!(matches!(err, PlannerError::EngineFailure(_)));
    }

    #[test]
    fn test_engine_errors_propagate() {
        let (model, objectives) = model();
        let err = LexicographicScheduler::new(&BrokenSolver)
            .run(&model, &objectives)
            .unwrap_err();
        assert!(err.to_string().contains("out of memory"));
    }
}
