// microlp adapter: pure Rust branch-and-bound through good_lp, no native library needed

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverService},
};
use good_lp::{solvers::microlp::microlp, SolverModel};
use log::{debug, warn};
use std::time::Instant;

use super::good_lp_model::{into_domain_solution, translate, TranslatedProblem};

pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicroLpSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        if problem.solver_config.time_limit.is_some() || problem.solver_config.gap_tolerance.is_some() {
            warn!("{} ignores time limit and gap tolerance settings", self.name());
        }

        let start_time = Instant::now();
        let TranslatedProblem {
            vars,
            columns,
            objective,
            constraints,
        } = translate(problem);

        let mut lp_model = vars.minimise(objective).using(microlp);
        for constraint in constraints {
            lp_model = lp_model.with(constraint);
        }

        let solution_result = lp_model.solve();
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        debug!("{} solved '{}' in {:.1} ms", self.name(), problem.name, solve_time);

        into_domain_solution(
            solution_result,
            problem,
            &columns,
            SolverStatistics::for_problem(problem, solve_time),
        )
    }

    fn name(&self) -> &str {
        "microlp"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::{Constraint, ObjectiveFunction, Variable},
        value_objects::{ConstraintType, OptimizationType, SolutionStatus},
    };

    fn knapsack() -> OptimizationProblem {
        // maximise 3a + 2b  s.t.  2a + b <= 7,  a + 3b <= 9
        OptimizationProblem::new(ObjectiveFunction::new(OptimizationType::Maximize, vec![3.0, 2.0]))
            .with_name("knapsack")
            .with_variables(vec![Variable::integer("a"), Variable::integer("b")])
            .add_constraint(Constraint::new(ConstraintType::LessThanOrEqual, vec![2.0, 1.0], 7.0))
            .add_constraint(Constraint::new(ConstraintType::LessThanOrEqual, vec![1.0, 3.0], 9.0))
    }

    #[test]
    fn test_integer_optimum() {
        let solution = MicroLpSolver::new().solve(&knapsack()).unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!((solution.optimal_value.unwrap() - 11.0).abs() < 1e-6);
        assert!((solution.variable_values[0] - 3.0).abs() < 1e-6);
        assert!((solution.variable_values[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_infeasible_status() {
        let problem = knapsack().add_constraint(Constraint::new(
            ConstraintType::GreaterThanOrEqual,
            vec![1.0, 1.0],
            100.0,
        ));
        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
    }

    #[test]
    fn test_lexicographic_tie_break() {
        // a + b peaks at 4 for (3, 1) and (2, 2); prefer fewer b
        let objectives = [
            ObjectiveFunction::new(OptimizationType::Maximize, vec![1.0, 1.0]),
            ObjectiveFunction::new(OptimizationType::Minimize, vec![0.0, 1.0]),
        ];
        let solution = MicroLpSolver::new()
            .solve_lexicographic(&knapsack(), &objectives)
            .unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!((solution.variable_values[0] - 3.0).abs() < 1e-6);
        assert!((solution.variable_values[1] - 1.0).abs() < 1e-6);

        // last stage carries the first stage's bound on top of the two rows
        assert_eq!(solution.statistics.num_constraints, 3);
        assert_eq!(solution.statistics.num_variables, 2);
        assert_eq!(solution.statistics.num_integer_vars, 2);
    }
}
