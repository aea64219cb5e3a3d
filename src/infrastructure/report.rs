// Output boundary: SolutionRecord rows → solution.csv

use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::application::collector::SolutionRecord;
use crate::application::error::Result;

pub const SOLUTION_FILE_NAME: &str = "solution.csv";

/// Writes one row per record, in the order given
pub fn write_solutions<W: Write>(writer: W, records: &[SolutionRecord]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_solutions_csv<P: AsRef<Path>>(path: P, records: &[SolutionRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_solutions(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ObjectiveKind;

    fn record(axe: u64) -> SolutionRecord {
        SolutionRecord {
            priority: ObjectiveKind::ALL.to_vec(),
            axe,
            lc: 2,
            ma: 3,
            serk: 4,
            ram: 250,
            food: 20_590,
            time_in_seconds: 172_800,
            time_in_days: 2.0,
            total_attack_strength: 12_345,
        }
    }

    #[test]
    fn test_rows_follow_record_order() {
        let mut out = Vec::new();
        write_solutions(&mut out, &[record(1), record(7)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "axe,lc,ma,serk,ram,food,time_in_seconds,time_in_days,total_attack_strength",
                "1,2,3,4,250,20590,172800,2.0,12345",
                "7,2,3,4,250,20590,172800,2.0,12345",
            ]
        );
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SOLUTION_FILE_NAME);
        write_solutions_csv(&path, &[record(5)]).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
