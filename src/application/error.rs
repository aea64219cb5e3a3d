use crate::domain::solver_service::SolverError;

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors that abort a planning run. No partial results survive any of them.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Model infeasible under ordering [{ordering}]: {diagnostics}")]
    ModelInfeasible { ordering: String, diagnostics: String },

    #[error("Engine failure: {0}")]
    EngineFailure(#[from] SolverError),

    #[error("Missing parameters: {0}")]
    MissingParameters(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
