//! Excel parsing for workout logs.

use calamine::{Data, DataType, Range, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use log::warn;
use std::path::Path;
use std::str::FromStr;

use crate::domain::{BodyPart, ExerciseKey, LiftSession, LoggedSet, sessions_from_log};
use crate::error::ParseError;

/// Expected column names (case-insensitive).
const COL_DATE: &str = "date";
const COL_EXERCISE: &str = "exercise";
const COL_PART: &str = "part";
const COL_WEIGHT: &str = "weight";
const COL_REPS: &str = "repetitions";

/// Column positions found in the header row.
struct ColumnIndices {
    date: usize,
    exercise: usize,
    part: Option<usize>,
    weight: usize,
    reps: usize,
}

impl ColumnIndices {
    fn from_header(header: &[Data]) -> Result<Self, ParseError> {
        let position = |name: &str| -> Option<usize> {
            header.iter().position(|cell| {
                cell.get_string()
                    .is_some_and(|s| s.trim().eq_ignore_ascii_case(name))
            })
        };
        let find_column = |name: &str| -> Result<usize, ParseError> {
            position(name).ok_or_else(|| ParseError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: find_column(COL_DATE)?,
            exercise: find_column(COL_EXERCISE)?,
            part: position(COL_PART),
            weight: find_column(COL_WEIGHT)?,
            reps: find_column(COL_REPS)?,
        })
    }
}

/// Opens the workbook and returns its first worksheet.
fn open_first_sheet(path: &Path) -> Result<Range<Data>, ParseError> {
    if !path.exists() {
        return Err(ParseError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| ParseError::CannotRead(format!("{}: {}", path.display(), e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ParseError::InvalidFormat("workbook has no sheets".to_string()))?;

    workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ParseError::CannotRead(format!("cannot read sheet '{}': {}", sheet_name, e)))
}

/// Loads every valid row of a workout log.
///
/// Rows with unparseable cells are skipped with a warning; empty rows are
/// ignored silently.
///
/// # Errors
/// Returns ParseError if the file cannot be read or the header is incomplete.
pub fn load_workout_log<P: AsRef<Path>>(path: P) -> Result<Vec<LoggedSet>, ParseError> {
    let range = open_first_sheet(path.as_ref())?;
    let mut rows = range.rows();

    let header = rows
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("empty worksheet".to_string()))?;
    let indices = ColumnIndices::from_header(header)?;

    let mut logged = Vec::new();

    for (row_idx, row) in rows.enumerate() {
        let row_num = row_idx + 2; // +1 for 0-index, +1 for header row

        if row[indices.date] == Data::Empty {
            continue;
        }

        match parse_row(row, &indices, row_num) {
            Ok(set) => logged.push(set),
            Err(e) => warn!("{}", e),
        }
    }

    Ok(logged)
}

/// Loads a workout log and groups it into pending sessions.
pub fn load_sessions<P: AsRef<Path>>(path: P) -> Result<Vec<LiftSession>, ParseError> {
    Ok(sessions_from_log(load_workout_log(path)?))
}

fn parse_row(row: &[Data], indices: &ColumnIndices, row_num: usize) -> Result<LoggedSet, ParseError> {
    let date = parse_date(&row[indices.date], row_num)?;
    let name = parse_exercise(&row[indices.exercise], row_num)?;
    let part = match indices.part {
        Some(col) => parse_part(&row[col], row_num)?,
        None => None,
    };
    let weight = parse_weight(&row[indices.weight], row_num)?;
    let reps = parse_reps(&row[indices.reps], row_num)?;

    Ok(LoggedSet::new(date, ExerciseKey::new(name, part), weight, reps))
}

/// Parses a date from a cell.
fn parse_date(cell: &Data, row: usize) -> Result<NaiveDate, ParseError> {
    match cell {
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ndt| ndt.date())
            .ok_or_else(|| ParseError::InvalidDate {
                row,
                value: format!("{:?}", dt),
            }),
        Data::DateTimeIso(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ParseError::InvalidDate {
                row,
                value: s.clone(),
            })
        }
        Data::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
            .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
            .map_err(|_| ParseError::InvalidDate {
                row,
                value: s.clone(),
            }),
        other => Err(ParseError::InvalidDate {
            row,
            value: format!("{:?}", other),
        }),
    }
}

/// Parses an exercise name. Blank names are rejected.
fn parse_exercise(cell: &Data, row: usize) -> Result<String, ParseError> {
    match cell {
        Data::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ParseError::MissingExercise { row }),
    }
}

/// Parses the optional body part column. Empty cells mean no part.
fn parse_part(cell: &Data, row: usize) -> Result<Option<BodyPart>, ParseError> {
    match cell {
        Data::Empty => Ok(None),
        Data::String(s) if s.trim().is_empty() => Ok(None),
        Data::String(s) => BodyPart::from_str(s)
            .map(Some)
            .map_err(|_| ParseError::UnknownPart {
                row,
                value: s.clone(),
            }),
        other => Err(ParseError::UnknownPart {
            row,
            value: format!("{:?}", other),
        }),
    }
}

/// Parses a weight value. Zero is allowed for bodyweight work.
fn parse_weight(cell: &Data, row: usize) -> Result<f64, ParseError> {
    let invalid = |value: String| ParseError::InvalidWeight { row, value };

    let weight = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse::<f64>().map_err(|_| invalid(s.clone()))?,
        Data::Empty => return Err(invalid("(empty)".to_string())),
        other => return Err(invalid(format!("{:?}", other))),
    };

    if weight >= 0.0 && weight.is_finite() {
        Ok(weight)
    } else {
        Err(invalid(weight.to_string()))
    }
}

/// Parses repetitions performed. Zero is a valid (failed) set.
fn parse_reps(cell: &Data, row: usize) -> Result<u32, ParseError> {
    let invalid = |value: String| ParseError::InvalidReps { row, value };

    match cell {
        Data::Float(f) if *f >= 0.0 && f.fract() == 0.0 => Ok(*f as u32),
        Data::Int(i) => u32::try_from(*i).map_err(|_| invalid(i.to_string())),
        Data::String(s) => s.trim().parse::<u32>().map_err(|_| invalid(s.clone())),
        Data::Empty => Err(invalid("(empty)".to_string())),
        other => Err(invalid(format!("{:?}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<Data> {
        names.iter().map(|n| Data::String(n.to_string())).collect()
    }

    #[test]
    fn test_column_indices_from_header() {
        let indices =
            ColumnIndices::from_header(&header(&["Date", "Exercise", "Part", "Weight", "Repetitions"]))
                .unwrap();
        assert_eq!(indices.date, 0);
        assert_eq!(indices.exercise, 1);
        assert_eq!(indices.part, Some(2));
        assert_eq!(indices.weight, 3);
        assert_eq!(indices.reps, 4);
    }

    #[test]
    fn test_column_indices_part_optional() {
        let indices =
            ColumnIndices::from_header(&header(&["REPETITIONS", "WEIGHT", "EXERCISE", "DATE"]))
                .unwrap();
        assert_eq!(indices.part, None);
        assert_eq!(indices.date, 3);
    }

    #[test]
    fn test_column_indices_missing_column() {
        assert!(ColumnIndices::from_header(&header(&["Date", "Weight"])).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            parse_date(&Data::String("2024-03-15".to_string()), 2).unwrap(),
            expected
        );
        assert_eq!(
            parse_date(&Data::String("15/03/2024".to_string()), 2).unwrap(),
            expected
        );
        assert!(parse_date(&Data::String("yesterday".to_string()), 2).is_err());
        assert!(parse_date(&Data::Empty, 2).is_err());
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight(&Data::Float(82.5), 1).unwrap(), 82.5);
        assert_eq!(parse_weight(&Data::Int(100), 1).unwrap(), 100.0);
        assert_eq!(parse_weight(&Data::Float(0.0), 1).unwrap(), 0.0);
        assert_eq!(parse_weight(&Data::String(" 60 ".to_string()), 1).unwrap(), 60.0);
        assert!(parse_weight(&Data::Float(-10.0), 1).is_err());
        assert!(parse_weight(&Data::Empty, 1).is_err());
    }

    #[test]
    fn test_parse_reps() {
        assert_eq!(parse_reps(&Data::Float(10.0), 1).unwrap(), 10);
        assert_eq!(parse_reps(&Data::Int(0), 1).unwrap(), 0);
        assert_eq!(parse_reps(&Data::String("8".to_string()), 1).unwrap(), 8);
        assert!(parse_reps(&Data::Float(7.5), 1).is_err());
        assert!(parse_reps(&Data::Int(-3), 1).is_err());
        assert!(parse_reps(&Data::Empty, 1).is_err());
    }

    #[test]
    fn test_parse_exercise_and_part() {
        assert_eq!(
            parse_exercise(&Data::String(" Squat ".to_string()), 1).unwrap(),
            "Squat"
        );
        assert!(parse_exercise(&Data::String("  ".to_string()), 1).is_err());
        assert!(parse_exercise(&Data::Empty, 1).is_err());

        assert_eq!(parse_part(&Data::Empty, 1).unwrap(), None);
        assert_eq!(
            parse_part(&Data::String("Leg".to_string()), 1).unwrap(),
            Some(BodyPart::Leg)
        );
        assert!(parse_part(&Data::String("tail".to_string()), 1).is_err());
    }

    #[test]
    fn test_parse_row() {
        let indices =
            ColumnIndices::from_header(&header(&["Date", "Exercise", "Weight", "Repetitions"]))
                .unwrap();
        let row = vec![
            Data::String("2024-03-15".to_string()),
            Data::String("Bench Press".to_string()),
            Data::Float(60.0),
            Data::Int(10),
        ];
        let set = parse_row(&row, &indices, 2).unwrap();
        assert_eq!(set.key, ExerciseKey::new("Bench Press", None));
        assert_eq!(set.weight, 60.0);
        assert_eq!(set.reps, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_workout_log("/nonexistent/log.xlsx");
        assert!(matches!(result, Err(ParseError::FileNotFound(_))));
    }
}
