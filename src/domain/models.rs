use super::value_objects::{
    ConstraintType, OptimizationType, SolutionStatus, SolverBackend, VariableType,
};

/// Decision variable in an optimization problem
#[derive(Debug, Clone)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub name: String,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Continuous,
            lower_bound: 0.0,
            upper_bound: None,
            name: name.into(),
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Integer,
            lower_bound: 0.0,
            upper_bound: None,
            name: name.into(),
        }
    }

    pub fn is_integer(&self) -> bool {
        self.variable_type == VariableType::Integer
    }
}

/// Named linear combination of the problem's variables.
///
/// Coefficients are dense and indexed by variable position, like every other
/// row of an [`OptimizationProblem`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinearExpression {
    pub name: String,
    pub coefficients: Vec<f64>,
}

impl LinearExpression {
    pub fn new(name: impl Into<String>, coefficients: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            coefficients,
        }
    }

    /// Single-variable term `coefficient * x[index]` over `num_variables` columns
    pub fn term(name: impl Into<String>, num_variables: usize, index: usize, coefficient: f64) -> Self {
        let mut coefficients = vec![0.0; num_variables];
        coefficients[index] = coefficient;
        Self::new(name, coefficients)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            name: self.name.clone(),
            coefficients: self.coefficients.iter().map(|c| c * factor).collect(),
        }
    }

    pub fn negated(&self) -> Self {
        self.scaled(-1.0)
    }

    /// `self - other`, keeping this expression's name
    pub fn minus(&self, other: &LinearExpression) -> Self {
        let width = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..width)
            .map(|i| {
                self.coefficients.get(i).copied().unwrap_or(0.0)
                    - other.coefficients.get(i).copied().unwrap_or(0.0)
            })
            .collect();
        Self {
            name: self.name.clone(),
            coefficients,
        }
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }

    pub fn leq(&self, bound: f64) -> Constraint {
        Constraint::new(ConstraintType::LessThanOrEqual, self.coefficients.clone(), bound)
    }

    pub fn geq(&self, bound: f64) -> Constraint {
        Constraint::new(ConstraintType::GreaterThanOrEqual, self.coefficients.clone(), bound)
    }

    /// Closed interval `lower ≤ expr ≤ upper` as a pair of constraints
    pub fn between(&self, lower: f64, upper: f64) -> [Constraint; 2] {
        [
            self.geq(lower).with_name(format!("{}_min", self.name)),
            self.leq(upper).with_name(format!("{}_max", self.name)),
        ]
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }
}

/// Objective function to minimize or maximize
#[derive(Debug, Clone)]
pub struct ObjectiveFunction {
    pub optimization_type: OptimizationType,
    pub coefficients: Vec<f64>,
}

impl ObjectiveFunction {
    pub fn new(optimization_type: OptimizationType, coefficients: Vec<f64>) -> Self {
        Self {
            optimization_type,
            coefficients,
        }
    }

    pub fn minimize(expression: &LinearExpression) -> Self {
        Self::new(OptimizationType::Minimize, expression.coefficients.clone())
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }

    /// Whether the objective can only take integral values on `variables`
    pub fn is_integral(&self, variables: &[Variable]) -> bool {
        self.coefficients.iter().enumerate().all(|(i, &c)| {
            c == 0.0 || (c.fract() == 0.0 && variables.get(i).is_some_and(Variable::is_integer))
        })
    }

    /// Constraint that keeps this objective at least as good as `value`.
    ///
    /// `tolerance` widens the bound away from `value`.
    pub fn bound_at(&self, value: f64, tolerance: f64) -> Constraint {
        match self.optimization_type {
            OptimizationType::Minimize => Constraint::new(
                ConstraintType::LessThanOrEqual,
                self.coefficients.clone(),
                value + tolerance,
            ),
            OptimizationType::Maximize => Constraint::new(
                ConstraintType::GreaterThanOrEqual,
                self.coefficients.clone(),
                value - tolerance,
            ),
        }
    }
}

/// Linear constraint on variables
#[derive(Debug, Clone)]
pub struct Constraint {
    pub constraint_type: ConstraintType,
    pub coefficients: Vec<f64>,
    pub bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn new(constraint_type: ConstraintType, coefficients: Vec<f64>, bound: f64) -> Self {
        Self {
            constraint_type,
            coefficients,
            bound,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    /// Whether `values` satisfy this constraint within `tolerance`
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs: f64 = self
            .coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum();
        match self.constraint_type {
            ConstraintType::LessThanOrEqual => lhs <= self.bound + tolerance,
            ConstraintType::Equal => (lhs - self.bound).abs() <= tolerance,
            ConstraintType::GreaterThanOrEqual => lhs >= self.bound - tolerance,
        }
    }
}

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Wall-clock limit per solve, in seconds
    pub time_limit: Option<f64>,
    pub gap_tolerance: Option<f64>,
    pub verbose: bool,
}

/// Complete optimization problem
#[derive(Debug, Clone)]
pub struct OptimizationProblem {
    pub name: String,
    pub description: String,
    pub objective: ObjectiveFunction,
    pub constraints: Vec<Constraint>,
    pub variables: Vec<Variable>,
    pub solver_config: SolverConfig,
}

impl OptimizationProblem {
    pub fn new(objective: ObjectiveFunction) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            objective,
            constraints: Vec::new(),
            variables: Vec::new(),
            solver_config: SolverConfig::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn add_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn add_constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective.num_variables()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
    pub num_integer_vars: u32,
}

impl SolverStatistics {
    pub fn for_problem(problem: &OptimizationProblem, solve_time_ms: f64) -> Self {
        Self {
            solve_time_ms,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.constraints.len() as u32,
            num_integer_vars: problem.num_integer_variables() as u32,
        }
    }
}

/// Solution to an optimization problem
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub optimal_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            optimal_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            optimal_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}
