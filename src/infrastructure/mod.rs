// Infrastructure module: the file boundary around the planner

pub mod params;
pub mod report;
pub mod runner;

pub use params::{read_params_csv, read_params_from_reader};
pub use report::{write_solutions, write_solutions_csv};
pub use runner::{run, ParamOverrides, RunnerConfig};
