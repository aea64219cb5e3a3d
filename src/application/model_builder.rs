// Builds the constrained army model from the unit catalog and a run configuration

use log::debug;

use super::error::{PlannerError, Result};
use crate::domain::{
    models::{LinearExpression, ObjectiveFunction, OptimizationProblem, SolverConfig, Variable},
    run_config::RunConfiguration,
    units::{Facility, Unit, UnitCatalog, UnitKind},
};

pub const MIN_TOTAL_FOOD: f64 = 20_580.0;
pub const MAX_TOTAL_FOOD: f64 = 20_596.0;
pub const MIN_RAMS: f64 = 250.0;
/// Lower edge of a weighted unit's attack band, as a fraction of its target
pub const SHARE_LOWER_BOUND_CAP: f64 = 0.95;

/// Linear expressions derived from the unit counts
#[derive(Debug, Clone)]
pub struct DerivedExpressions {
    pub barracks_build_time: LinearExpression,
    pub hall_of_order_build_time: LinearExpression,
    pub total_attack_strength: LinearExpression,
    pub total_food: LinearExpression,
}

/// The army model: one integer count per unit, its derived expressions and
/// the fixed constraint set. Objectives are attached per solve.
#[derive(Debug, Clone)]
pub struct ArmyModel {
    pub problem: OptimizationProblem,
    pub expressions: DerivedExpressions,
}

impl ArmyModel {
    pub fn variable_names(&self) -> Vec<String> {
        self.problem.variables.iter().map(|v| v.name.clone()).collect()
    }

    /// Column of `kind`'s count in the model
    pub fn column(&self, kind: UnitKind) -> usize {
        kind.index()
    }
}

pub struct ModelBuilder {
    config: RunConfiguration,
    solver_config: SolverConfig,
}

impl ModelBuilder {
    pub fn new(config: RunConfiguration) -> Self {
        Self {
            config,
            solver_config: SolverConfig::default(),
        }
    }

    pub fn with_solver_config(mut self, solver_config: SolverConfig) -> Self {
        self.solver_config = solver_config;
        self
    }

    pub fn build(self) -> Result<ArmyModel> {
        // must fail before any constraint exists
        let shares = self
            .config
            .shares()
            .map_err(PlannerError::InvalidConfiguration)?;

        let variables: Vec<Variable> = UnitCatalog::units()
            .iter()
            .map(|u| Variable::integer(u.kind.name()))
            .collect();
        let expressions = derive_expressions(variables.len());
        let limit = self.config.build_time_limit_seconds as f64;

        let mut problem = OptimizationProblem::new(
            ObjectiveFunction::minimize(&expressions.total_attack_strength.negated()),
        )
        .with_name("Max strength unit time")
        .with_description(format!(
            "weights axe={} lc={} ma={}, build time limit {}s",
            self.config.axe_strength,
            self.config.lc_strength,
            self.config.ma_strength,
            self.config.build_time_limit_seconds
        ))
        .with_variables(variables)
        .with_config(self.solver_config)
        .add_constraints(expressions.total_food.between(MIN_TOTAL_FOOD, MAX_TOTAL_FOOD));

        let rams = LinearExpression::term("ram", problem.variables.len(), UnitKind::Ram.index(), 1.0);
        problem = problem
            .add_constraint(rams.geq(MIN_RAMS).with_name("must_have_rams"))
            .add_constraints(expressions.barracks_build_time.between(1.0, limit))
            .add_constraints(expressions.hall_of_order_build_time.between(1.0, limit));

        for kind in UnitKind::WEIGHTED {
            let share = shares.of(kind).unwrap_or_default();
            let contribution = LinearExpression::term(
                format!("{}_attack", kind),
                problem.variables.len(),
                kind.index(),
                f64::from(UnitCatalog::unit(kind).attack_strength),
            );
            let target = expressions.total_attack_strength.scaled(share);

            problem = problem
                .add_constraint(
                    contribution
                        .minus(&target)
                        .leq(0.0)
                        .with_name(format!("{}_share_max", kind)),
                )
                .add_constraint(
                    contribution
                        .minus(&target.scaled(SHARE_LOWER_BOUND_CAP))
                        .geq(0.0)
                        .with_name(format!("{}_share_min", kind)),
                );
        }

        let model = ArmyModel {
            problem,
            expressions,
        };
        debug!(
            "Built model '{}' over [{}] with {} constraints (shares axe={:.4} lc={:.4} ma={:.4})",
            model.problem.name,
            model.variable_names().join(", "),
            model.problem.constraints.len(),
            shares.axe,
            shares.lc,
            shares.ma
        );

        Ok(model)
    }
}

fn derive_expressions(num_variables: usize) -> DerivedExpressions {
    let barracks = Some(Facility::Barracks);
    let hall = Some(Facility::HallOfOrder);

    DerivedExpressions {
        barracks_build_time: weighted_sum("barracks_build_time", num_variables, barracks, |u| {
            u.recruit_time_seconds
        }),
        hall_of_order_build_time: weighted_sum("hall_of_order_build_time", num_variables, hall, |u| {
            u.recruit_time_seconds
        }),
        total_attack_strength: weighted_sum("total_attack_strength", num_variables, None, |u| {
            u.attack_strength
        }),
        total_food: weighted_sum("total_food", num_variables, None, |u| u.food_cost),
    }
}

/// Sum of `attribute * count` over the units of `facility` (all units when `None`)
fn weighted_sum(
    name: &str,
    num_variables: usize,
    facility: Option<Facility>,
    attribute: fn(&Unit) -> u32,
) -> LinearExpression {
    let mut coefficients = vec![0.0; num_variables];
    for unit in UnitCatalog::units() {
        if facility.map_or(true, |f| unit.facility == f) {
            coefficients[unit.kind.index()] = f64::from(attribute(unit));
        }
    }
    LinearExpression::new(name, coefficients)
}
