// Domain layer: LP/MIP models, the engine contract, units and run parameters
pub mod domain;

// Application layer: the army model and the lexicographic solve loop
pub mod application;

// Infrastructure layer: params.csv in, solution.csv out
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, ObjectiveFunction, ObjectiveKind, OptimizationProblem,
    OptimizationType, RunConfiguration, Solution, SolutionStatus, SolverBackend, SolverConfig,
    SolverError, SolverService, UnitCatalog, UnitKind, Variable, VariableType,
};

pub use application::{optimize_offensive_army, PlannerError, SolutionRecord};

pub use infrastructure::{run, ParamOverrides, RunnerConfig};

pub use solver::SolverFactory;
#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
#[cfg(feature = "highs")]
pub use solver::HighsSolver;
#[cfg(feature = "microlp")]
pub use solver::MicroLpSolver;
