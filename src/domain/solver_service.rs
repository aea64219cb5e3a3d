// Domain service interface for solving optimization problems
// Defines the contract that any solver implementation must follow

use super::models::{ObjectiveFunction, OptimizationProblem, Solution};

/// Relative slack allowed on a stage bound when the objective is not integral
pub const LEX_RELATIVE_TOLERANCE: f64 = 1e-6;

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for optimization solvers
///
/// Implementations only need to solve a single objective; the lexicographic
/// solve is layered on top of that.
pub trait SolverService: Send + Sync {
    /// Solve an optimization problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Solve `objectives` in strict priority order.
    ///
    /// Each stage is solved on a private copy of `problem` that carries the
    /// bounds of all earlier stages, so `problem` itself is left untouched.
    /// The first stage that does not reach optimality ends the solve and its
    /// solution is returned as-is.
    fn solve_lexicographic(
        &self,
        problem: &OptimizationProblem,
        objectives: &[ObjectiveFunction],
    ) -> Result<Solution> {
        let Some((last, earlier)) = objectives.split_last() else {
            return Err(SolverError::InvalidProblem(
                "Lexicographic solve needs at least one objective".to_string(),
            ));
        };

        let mut staged = problem.clone();
        for (stage, objective) in earlier.iter().enumerate() {
            staged.objective = objective.clone();
            let solution = self.solve(&staged)?;
            if !solution.is_optimal() {
                return Ok(solution);
            }

            let value = solution
                .optimal_value
                .unwrap_or_else(|| objective.evaluate(&solution.variable_values));
            let bound = if objective.is_integral(&staged.variables) {
                objective.bound_at(value.round(), 0.0)
            } else {
                objective.bound_at(value, LEX_RELATIVE_TOLERANCE * value.abs().max(1.0))
            };
            staged
                .constraints
                .push(bound.with_name(format!("lex_stage_{}", stage)));
        }

        staged.objective = last.clone();
        self.solve(&staged)
    }

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<Vec<String>> {
        let mut errors = Vec::new();

        // Check objective has coefficients
        if problem.objective.coefficients.is_empty() {
            errors.push("Objective must have at least one coefficient".to_string());
        }

        let num_vars = problem.num_variables();

        // Check variables match objective
        if !problem.variables.is_empty() && problem.variables.len() != num_vars {
            errors.push(format!(
                "Number of variables ({}) doesn't match objective coefficients ({})",
                problem.variables.len(),
                num_vars
            ));
        }

        // Check constraints
        for (i, constraint) in problem.constraints.iter().enumerate() {
            if constraint.num_variables() != num_vars {
                errors.push(format!(
                    "Constraint {} '{}' has {} coefficients but problem has {} variables",
                    i,
                    constraint.name,
                    constraint.num_variables(),
                    num_vars
                ));
            }
        }

        // Check variable bounds
        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(Vec::new())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, Variable};
    use crate::domain::value_objects::{ConstraintType, OptimizationType, SolutionStatus};
    use std::sync::Mutex;

    /// Returns queued solutions and remembers every problem it was handed
    struct ScriptedSolver {
        replies: Mutex<Vec<Solution>>,
        seen: Mutex<Vec<OptimizationProblem>>,
    }

    impl ScriptedSolver {
        fn new(mut replies: Vec<Solution>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl SolverService for ScriptedSolver {
        fn solve(&self, problem: &OptimizationProblem) -> Result<Solution> {
            self.seen.lock().unwrap().push(problem.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| SolverError::ExecutionFailed("no reply queued".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn supports_mip(&self) -> bool {
            true
        }
    }

    fn two_var_problem() -> OptimizationProblem {
        OptimizationProblem::new(ObjectiveFunction::new(OptimizationType::Minimize, vec![0.0, 0.0]))
            .with_variables(vec![Variable::integer("a"), Variable::continuous("b")])
            .add_constraint(Constraint::new(ConstraintType::LessThanOrEqual, vec![1.0, 1.0], 10.0))
    }

    #[test]
    fn test_lexicographic_stages_carry_bounds() {
        let solver = ScriptedSolver::new(vec![
            Solution::optimal(-4.0, vec![4.0, 6.0]),
            Solution::optimal(0.25, vec![4.0, 0.25]),
            Solution::optimal(4.25, vec![4.0, 0.25]),
        ]);
        let problem = two_var_problem();
        let objectives = [
            ObjectiveFunction::new(OptimizationType::Minimize, vec![-1.0, 0.0]),
            ObjectiveFunction::new(OptimizationType::Minimize, vec![0.0, 1.0]),
            ObjectiveFunction::new(OptimizationType::Minimize, vec![1.0, 1.0]),
        ];

        let solution = solver.solve_lexicographic(&problem, &objectives).unwrap();
        assert_eq!(solution.optimal_value, Some(4.25));

        let seen = solver.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].constraints.len(), 1);
        assert_eq!(seen[1].constraints.len(), 2);
        assert_eq!(seen[2].constraints.len(), 3);

        // integral stage is bound exactly
        let first = &seen[1].constraints[1];
        assert_eq!(first.name, "lex_stage_0");
        assert_eq!(first.bound, -4.0);

        // continuous stage gets a little slack
        let second = &seen[2].constraints[2];
        assert!(second.bound > 0.25 && second.bound < 0.25 + 1e-5);

        // caller's problem untouched
        assert_eq!(problem.constraints.len(), 1);
    }

    #[test]
    fn test_lexicographic_stops_on_infeasible_stage() {
        let solver = ScriptedSolver::new(vec![Solution::new(
            SolutionStatus::Infeasible,
            "no feasible point",
        )]);
        let objectives = [
            ObjectiveFunction::new(OptimizationType::Minimize, vec![1.0, 0.0]),
            ObjectiveFunction::new(OptimizationType::Minimize, vec![0.0, 1.0]),
        ];

        let solution = solver
            .solve_lexicographic(&two_var_problem(), &objectives)
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert_eq!(solver.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_lexicographic_never_bounds_on_time_limited_stage() {
        let mut stopped = Solution::new(SolutionStatus::TimeLimit, "stopped on time");
        stopped.variable_values = vec![2.0, 1.0];
        let solver = ScriptedSolver::new(vec![Solution::optimal(-4.0, vec![4.0, 6.0]), stopped]);
        let objectives = [
            ObjectiveFunction::new(OptimizationType::Minimize, vec![-1.0, 0.0]),
            ObjectiveFunction::new(OptimizationType::Minimize, vec![0.0, 1.0]),
            ObjectiveFunction::new(OptimizationType::Minimize, vec![1.0, 1.0]),
        ];

        let solution = solver
            .solve_lexicographic(&two_var_problem(), &objectives)
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::TimeLimit);

        // third stage never issued, so the incumbent was never turned into a bound
        let seen = solver.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].constraints.len(), 2);
    }

    #[test]
    fn test_lexicographic_requires_objectives() {
        let solver = ScriptedSolver::new(Vec::new());
        let err = solver
            .solve_lexicographic(&two_var_problem(), &[])
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidProblem(_)));
    }

    #[test]
    fn test_validate_rejects_mismatched_widths() {
        let solver = ScriptedSolver::new(Vec::new());
        let problem = two_var_problem().add_constraint(
            Constraint::new(ConstraintType::Equal, vec![1.0], 1.0).with_name("short"),
        );

        let err = solver.validate(&problem).unwrap_err();
        assert!(err.to_string().contains("'short'"));
    }
}
