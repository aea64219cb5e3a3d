// HiGHS Solver Adapter
// Implements the SolverService interface for HiGHS
// This is an adapter pattern - translates our domain models to HiGHS API

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{
        ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus, VariableType,
    },
};
use highs::{HighsModelStatus, RowProblem, Sense};
use log::debug;
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();

        // Use HiGHS RowProblem (add variables first, then constraints)
        let mut pb = RowProblem::default();
        let mut vars = Vec::with_capacity(problem.variables.len());

        for (i, var_def) in problem.variables.iter().enumerate() {
            let lower = var_def.lower_bound;
            let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);
            let obj_coeff = problem.objective.coefficients.get(i).copied().unwrap_or(0.0);

            let col = match var_def.variable_type {
                VariableType::Integer => pb.add_integer_column(obj_coeff, lower..=upper),
                VariableType::Continuous => pb.add_column(obj_coeff, lower..=upper),
            };
            vars.push(col);
        }

        for constraint in &problem.constraints {
            let terms: Vec<_> = constraint
                .coefficients
                .iter()
                .enumerate()
                .filter(|&(i, &coeff)| coeff != 0.0 && i < vars.len())
                .map(|(i, &coeff)| (vars[i], coeff))
                .collect();

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => pb.add_row(..=constraint.bound, &terms),
                ConstraintType::Equal => pb.add_row(constraint.bound..=constraint.bound, &terms),
                ConstraintType::GreaterThanOrEqual => pb.add_row(constraint.bound.., &terms),
            };
        }

        let sense = if problem.objective.optimization_type == OptimizationType::Maximize {
            Sense::Maximise
        } else {
            Sense::Minimise
        };

        let mut model = pb.optimise(sense);
        let config = &problem.solver_config;
        model.set_option("output_flag", config.verbose);
        if let Some(seconds) = config.time_limit {
            model.set_option("time_limit", seconds);
        }
        if let Some(gap) = config.gap_tolerance {
            model.set_option("mip_rel_gap", gap);
        }

        let solved = model.solve();
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        debug!("{} solved '{}' in {:.1} ms", self.name(), problem.name, solve_time);
        let statistics = SolverStatistics::for_problem(problem, solve_time);

        let (status, message) = match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                let actual_obj = problem.objective.evaluate(&variable_values);

                let mut solution = DomainSolution::optimal(actual_obj, variable_values);
                solution.statistics = statistics;
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                return Ok(solution);
            }
            HighsModelStatus::Infeasible => (
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            ),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => (
                DomainSolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            ),
            HighsModelStatus::ReachedTimeLimit => (
                DomainSolutionStatus::TimeLimit,
                "Time limit reached before optimality was proven",
            ),
            HighsModelStatus::ReachedIterationLimit => (
                DomainSolutionStatus::IterationLimit,
                "Iteration limit reached before optimality was proven",
            ),
            status => {
                return Err(SolverError::ExecutionFailed(format!(
                    "HiGHS solver returned status: {:?}",
                    status
                )))
            }
        };

        Ok(DomainSolution::new(status, message).with_statistics(statistics))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
