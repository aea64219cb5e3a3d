// Application module: the army model and the lexicographic solve loop

pub mod collector;
pub mod error;
pub mod model_builder;
pub mod objectives;
pub mod planner;
pub mod scheduler;

pub use collector::{SolutionCollector, SolutionRecord};
pub use error::PlannerError;
pub use model_builder::{ArmyModel, ModelBuilder};
pub use objectives::{Objective, ObjectiveSet};
pub use planner::{optimize_offensive_army, optimize_offensive_army_with};
pub use scheduler::{priority_orders, LexicographicScheduler, MAX_OBJECTIVES};
