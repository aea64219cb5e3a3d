// Translation shared by the good_lp based adapters

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError},
    value_objects::{
        ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus, VariableType,
    },
};
use good_lp::{
    solvers::SolutionStatus as GoodLpStatus, variable, Constraint as GoodLpConstraint, Expression,
    ProblemVariables, ResolutionError, Solution as GoodLpSolutionTrait, Variable as GoodLpVariable,
};

/// A domain problem expressed in good_lp terms, objective already in minimisation form
pub struct TranslatedProblem {
    pub vars: ProblemVariables,
    pub columns: Vec<GoodLpVariable>,
    pub objective: Expression,
    pub constraints: Vec<GoodLpConstraint>,
}

pub fn translate(problem: &OptimizationProblem) -> TranslatedProblem {
    let mut vars = ProblemVariables::new();
    let mut columns: Vec<GoodLpVariable> = Vec::with_capacity(problem.variables.len());

    for var_def in &problem.variables {
        let lower = var_def.lower_bound;
        let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);

        let var = match var_def.variable_type {
            VariableType::Integer => vars.add(variable().integer().min(lower).max(upper)),
            VariableType::Continuous => vars.add(variable().min(lower).max(upper)),
        };
        columns.push(var);
    }

    // good_lp minimises, so negate for maximization
    let is_maximize = problem.objective.optimization_type == OptimizationType::Maximize;
    let mut objective: Expression = 0.into();
    for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
        if coeff != 0.0 {
            let c = if is_maximize { -coeff } else { coeff };
            objective += c * columns[i];
        }
    }

    let constraints = problem
        .constraints
        .iter()
        .map(|constraint| {
            let mut lhs: Expression = 0.into();
            for (i, &coeff) in constraint.coefficients.iter().enumerate() {
                if coeff != 0.0 {
                    lhs += coeff * columns[i];
                }
            }

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => lhs.leq(constraint.bound),
                ConstraintType::Equal => lhs.eq(constraint.bound),
                ConstraintType::GreaterThanOrEqual => lhs.geq(constraint.bound),
            }
        })
        .collect();

    TranslatedProblem {
        vars,
        columns,
        objective,
        constraints,
    }
}

/// Map a good_lp outcome onto a domain solution
pub fn into_domain_solution<S: GoodLpSolutionTrait>(
    result: std::result::Result<S, ResolutionError>,
    problem: &OptimizationProblem,
    columns: &[GoodLpVariable],
    statistics: SolverStatistics,
) -> Result<DomainSolution> {
    match result {
        Ok(sol) => {
            let variable_values: Vec<f64> = columns.iter().map(|&var| sol.value(var)).collect();

            match solved_status(sol.status()) {
                DomainSolutionStatus::Optimal => {
                    let actual_obj = problem.objective.evaluate(&variable_values);
                    let mut solution = DomainSolution::optimal(actual_obj, variable_values);
                    solution.statistics = statistics;
                    solution.message = format!("Optimal solution found for '{}'", problem.name);
                    Ok(solution)
                }
                status => {
                    let mut solution = DomainSolution::new(
                        status,
                        "Time limit reached before optimality was proven",
                    )
                    .with_statistics(statistics);
                    solution.variable_values = variable_values;
                    Ok(solution)
                }
            }
        }
        Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
            DomainSolutionStatus::Infeasible,
            "Problem is infeasible: no solution satisfies all constraints",
        )
        .with_statistics(statistics)),
        Err(ResolutionError::Unbounded) => Ok(DomainSolution::new(
            DomainSolutionStatus::Unbounded,
            "Problem is unbounded: objective can be improved infinitely",
        )
        .with_statistics(statistics)),
        Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
    }
}

/// Domain status of a solve good_lp returned as a solution.
///
/// An incumbent the engine stopped on for time is not optimal. Stopping at the
/// relative gap the caller configured counts as solved.
pub fn solved_status(status: GoodLpStatus) -> DomainSolutionStatus {
    match status {
        GoodLpStatus::Optimal | GoodLpStatus::GapLimit => DomainSolutionStatus::Optimal,
        GoodLpStatus::TimeLimit => DomainSolutionStatus::TimeLimit,
    }
}
