// Solver adapters module

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_solver;
pub mod factory;
#[cfg(any(feature = "coin_cbc", feature = "microlp"))]
mod good_lp_model;
#[cfg(feature = "highs")]
pub mod highs_solver;
#[cfg(feature = "microlp")]
pub mod microlp_solver;

#[cfg(feature = "coin_cbc")]
pub use coin_cbc_solver::CoinCbcSolver;
pub use factory::SolverFactory;
#[cfg(feature = "highs")]
pub use highs_solver::HighsSolver;
#[cfg(feature = "microlp")]
pub use microlp_solver::MicroLpSolver;
