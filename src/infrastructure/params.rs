// Input boundary: params.csv → RunConfiguration

use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

use crate::application::error::{PlannerError, Result};
use crate::domain::run_config::RunConfiguration;

pub const PARAMS_FILE_NAME: &str = "params.csv";

/// Reads the run configuration from a `params.csv` file
///
/// # Errors
/// Returns error if the file cannot be opened, is malformed or has no data row
pub fn read_params_csv<P: AsRef<Path>>(path: P) -> Result<RunConfiguration> {
    let file = std::fs::File::open(path)?;
    read_params_from_reader(file)
}

/// Reads the first data row of a `params` table.
///
/// Columns are matched by header name; `build_time_limit_seconds` may be
/// missing or empty and then falls back to its default.
pub fn read_params_from_reader<R: Read>(reader: R) -> Result<RunConfiguration> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    match rdr.deserialize::<RunConfiguration>().next() {
        Some(row) => Ok(row?),
        None => Err(PlannerError::MissingParameters(
            "params table has no data row".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::run_config::DEFAULT_BUILD_TIME_LIMIT_SECONDS;
    use std::io::Write;

    #[test]
    fn test_full_row() {
        let input = "axe_strength,lc_strength,ma_strength,build_time_limit_seconds\n2,1,1,86400\n";
        let config = read_params_from_reader(input.as_bytes()).unwrap();
        assert_eq!(config, RunConfiguration::new(2.0, 1.0, 1.0).with_build_time_limit(86_400));
    }

    #[test]
    fn test_limit_defaults_when_absent_or_empty() {
        let missing = "axe_strength,lc_strength,ma_strength\n1,1,1\n";
        let config = read_params_from_reader(missing.as_bytes()).unwrap();
        assert_eq!(config.build_time_limit_seconds, DEFAULT_BUILD_TIME_LIMIT_SECONDS);

        let empty = "axe_strength,lc_strength,ma_strength,build_time_limit_seconds\n1,1,1,\n";
        let config = read_params_from_reader(empty.as_bytes()).unwrap();
        assert_eq!(config.build_time_limit_seconds, DEFAULT_BUILD_TIME_LIMIT_SECONDS);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let input = "ma_strength, axe_strength, lc_strength\n3, 1.5, 0.5\n";
        let config = read_params_from_reader(input.as_bytes()).unwrap();
        assert_eq!(config.axe_strength, 1.5);
        assert_eq!(config.lc_strength, 0.5);
        assert_eq!(config.ma_strength, 3.0);
    }

    #[test]
    fn test_only_first_row_is_used() {
        let input = "axe_strength,lc_strength,ma_strength\n1,2,3\n9,9,9\n";
        let config = read_params_from_reader(input.as_bytes()).unwrap();
        assert_eq!(config.lc_strength, 2.0);
    }

    #[test]
    fn test_header_only_is_missing_parameters() {
        let input = "axe_strength,lc_strength,ma_strength\n";
        let err = read_params_from_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::MissingParameters(_)));
    }

    #[test]
    fn test_malformed_value_is_csv_error() {
        let input = "axe_strength,lc_strength,ma_strength\nstrong,1,1\n";
        let err = read_params_from_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::Csv(_)));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "axe_strength,lc_strength,ma_strength,build_time_limit_seconds").unwrap();
        writeln!(file, "1,1,1,1").unwrap();

        let config = read_params_csv(file.path()).unwrap();
        assert_eq!(config.build_time_limit_seconds, 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_params_csv("definitely/not/here/params.csv").unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
