use crate::domain::{
    solver_service::{Result, SolverError, SolverService},
    value_objects::SolverBackend,
};
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend
    pub fn create_from_backend(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Auto => Self::default_solver(),
            SolverBackend::CoinCbc => Self::coin_cbc(),
            SolverBackend::Highs => Self::highs(),
            SolverBackend::MicroLp => Self::microlp(),
        }
    }

    /// HiGHS, then CBC, then microlp, whichever this build carries first
    pub fn default_solver() -> Result<Arc<dyn SolverService>> {
        Self::highs()
            .or_else(|_| Self::coin_cbc())
            .or_else(|_| Self::microlp())
            .map_err(|_| {
                SolverError::SolverNotAvailable(
                    "no solver backend compiled in; enable one of the features highs, coin_cbc, microlp"
                        .to_string(),
                )
            })
    }

    /// Backends compiled into this build
    pub fn available_backends() -> Vec<SolverBackend> {
        [SolverBackend::Highs, SolverBackend::CoinCbc, SolverBackend::MicroLp]
            .into_iter()
            .filter(|&b| Self::create_from_backend(b).is_ok())
            .collect()
    }

    fn highs() -> Result<Arc<dyn SolverService>> {
        #[cfg(feature = "highs")]
        {
            Ok(Arc::new(super::HighsSolver::new()))
        }
        #[cfg(not(feature = "highs"))]
        {
            Err(not_compiled(SolverBackend::Highs, "highs"))
        }
    }

    fn coin_cbc() -> Result<Arc<dyn SolverService>> {
        #[cfg(feature = "coin_cbc")]
        {
            Ok(Arc::new(super::CoinCbcSolver::new()))
        }
        #[cfg(not(feature = "coin_cbc"))]
        {
            Err(not_compiled(SolverBackend::CoinCbc, "coin_cbc"))
        }
    }

    fn microlp() -> Result<Arc<dyn SolverService>> {
        #[cfg(feature = "microlp")]
        {
            Ok(Arc::new(super::MicroLpSolver::new()))
        }
        #[cfg(not(feature = "microlp"))]
        {
            Err(not_compiled(SolverBackend::MicroLp, "microlp"))
        }
    }
}

#[allow(dead_code)]
fn not_compiled(backend: SolverBackend, feature: &str) -> SolverError {
    SolverError::SolverNotAvailable(format!(
        "{} support is not compiled in (enable the '{}' feature)",
        backend, feature
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_picks_a_compiled_backend() {
        let available = SolverFactory::available_backends();
        match SolverFactory::create_from_backend(SolverBackend::Auto) {
            Ok(solver) => {
                assert!(!available.is_empty());
                assert!(solver.supports_mip());
            }
            Err(err) => {
                assert!(available.is_empty());
                assert!(matches!(err, SolverError::SolverNotAvailable(_)));
            }
        }
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_microlp_by_name() {
        let solver = SolverFactory::create_from_backend(SolverBackend::MicroLp).unwrap();
        assert_eq!(solver.name(), "microlp");
    }

    #[cfg(not(feature = "coin_cbc"))]
    #[test]
    fn test_missing_backend_is_reported() {
        let err = SolverFactory::create_from_backend(SolverBackend::CoinCbc)
            .err()
            .unwrap();
        assert!(err.to_string().contains("coin_cbc"));
    }
}
