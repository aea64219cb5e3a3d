use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverService},
};
use good_lp::{solvers::coin_cbc, SolverModel};
use log::debug;
use std::time::Instant;

use super::good_lp_model::{into_domain_solution, translate, TranslatedProblem};

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();
        let TranslatedProblem {
            vars,
            columns,
            objective,
            constraints,
        } = translate(problem);

        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);

        let config = &problem.solver_config;
        lp_model.set_parameter("log", if config.verbose { "1" } else { "0" });
        if let Some(seconds) = config.time_limit {
            lp_model.set_parameter("sec", &seconds.to_string());
        }
        if let Some(gap) = config.gap_tolerance {
            lp_model.set_parameter("ratioGap", &gap.to_string());
        }

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
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
