// Domain module: Business logic and models

pub mod models;
pub mod run_config;
pub mod solver_service;
pub mod units;
pub mod value_objects;

pub use models::*;
pub use run_config::*;
pub use solver_service::*;
pub use units::*;
pub use value_objects::*;
