// Domain value objects representing core business concepts

use std::fmt;
use std::str::FromStr;

/// Type of decision variable in the optimization problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous real number (x ∈ ℝ)
    Continuous,
    /// Integer number (x ∈ ℤ)
    Integer,
}

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Status of the optimization solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Time limit reached
    TimeLimit,
    /// Iteration limit reached
    IterationLimit,
    /// Solver error occurred
    Error,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::TimeLimit => write!(f, "Time Limit Reached"),
            SolutionStatus::IterationLimit => write!(f, "Iteration Limit Reached"),
            SolutionStatus::Error => write!(f, "Error"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// Best backend compiled into this build
    #[default]
    Auto,
    /// COIN-OR CBC solver
    CoinCbc,
    /// HiGHS solver
    Highs,
    /// Pure Rust microlp solver
    MicroLp,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::MicroLp => write!(f, "microlp"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "cbc" | "coin_cbc" | "coin-cbc" => Ok(SolverBackend::CoinCbc),
            "highs" => Ok(SolverBackend::Highs),
            "microlp" => Ok(SolverBackend::MicroLp),
            other => Err(format!(
                "unknown solver backend '{}', expected one of: auto, cbc, highs, microlp",
                other
            )),
        }
    }
}

/// One of the competing goals of the army composition.
///
/// Every kind is minimised; attack strength enters negated so that minimising
/// it maximises the army's attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectiveKind {
    /// Negated total attack strength
    NegAttack,
    /// Cumulative recruit time of the Hall of Order
    HallOfOrderTime,
    /// Cumulative recruit time of the barracks
    BarracksTime,
}

impl ObjectiveKind {
    /// All objective kinds, in the order their priority permutations are enumerated.
    pub const ALL: [ObjectiveKind; 3] = [
        ObjectiveKind::NegAttack,
        ObjectiveKind::HallOfOrderTime,
        ObjectiveKind::BarracksTime,
    ];

    /// Stable identifier, used in logs and in names of stage constraints.
    pub fn id(self) -> &'static str {
        match self {
            ObjectiveKind::NegAttack => "neg_attack",
            ObjectiveKind::HallOfOrderTime => "hoo_time",
            ObjectiveKind::BarracksTime => "barracks_time",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ObjectiveKind::NegAttack => "Total negative attack strength",
            ObjectiveKind::HallOfOrderTime => "Hall of Order build time",
            ObjectiveKind::BarracksTime => "Barracks build time",
        }
    }
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
