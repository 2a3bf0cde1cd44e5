//! Executes parsed commands against a [`Session`].

use tracing::debug;

use super::parser::{Command, parse_command};
use super::range::{validate_indices, validate_range};
use crate::PublishResult;
use crate::core::schema::{CollectionRecord, Summary};
use crate::storage::Session;
use crate::summary::SummaryComputer;

/// Result of one successfully executed line, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// End the session
    Quit,
    /// Clear the terminal
    Clear,
    /// Show the help menu
    Help,
    /// Freshly reloaded records, most recent first
    Listing(Vec<CollectionRecord>),
    /// Inclusive slice of the loaded records; `start` is the index of the first one
    Range {
        start: usize,
        records: Vec<CollectionRecord>,
    },
    /// One summary per requested index, in request order
    Summaries(Vec<Summary>),
    /// Unrecognised input
    Ignored,
}

/// Parse and execute one input line.
pub fn execute(session: &mut Session, line: &str) -> PublishResult<Outcome> {
    let command = parse_command(line)?;
    dispatch(session, command)
}

/// Execute an already parsed command.
///
/// `ls` reloads the session; every other command reads the records loaded last.
pub fn dispatch(session: &mut Session, command: Command) -> PublishResult<Outcome> {
    debug!(?command, "dispatching");
    match command {
        Command::Quit => Ok(Outcome::Quit),
        Command::Clear => Ok(Outcome::Clear),
        Command::Help => Ok(Outcome::Help),
        Command::List => {
            let records = session.reload()?;
            Ok(Outcome::Listing(records.to_vec()))
        }
        Command::Range { start, end } => {
            let records = session.records();
            validate_range(start, end, records.len())?;
            let (start, end) = (start as usize, end as usize);
            Ok(Outcome::Range {
                start,
                records: records[start..=end].to_vec(),
            })
        }
        Command::PublishTimes(indices) => {
            let records = session.records();
            let indices = validate_indices(&indices, records.len())?;
            let computer = SummaryComputer::new(session.store().publish_log_dir());
            let summaries = indices
                .into_iter()
                .map(|index| computer.summarize(index, &records[index]))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Outcome::Summaries(summaries))
        }
        Command::Unrecognized => Ok(Outcome::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CollectionStore;
    use crate::{InputErrorKind, PublishError};
    use filetime::FileTime;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_publish(dir: &Path, stem: &str, mtime: i64, seconds: u32) {
        let json = dir.join(format!("{stem}.json"));
        fs::write(
            &json,
            format!(
                r#"{{"publishStartDate":"2021-06-01T10:00:00.000Z","publishEndDate":"2021-06-01T10:00:{seconds:02}.000Z"}}"#
            ),
        )
        .unwrap();
        fs::create_dir_all(dir.join(stem)).unwrap();
        fs::write(dir.join(stem).join("data.csv"), "a,b\n").unwrap();
        filetime::set_file_mtime(&json, FileTime::from_unix_time(mtime, 0)).unwrap();
    }

    fn session(temp: &TempDir) -> Session {
        Session::open(CollectionStore::new(temp.path(), 15)).unwrap()
    }

    #[test]
    fn test_simple_commands() {
        let temp = TempDir::new().unwrap();
        let mut s = session(&temp);
        assert_eq!(execute(&mut s, "q").unwrap(), Outcome::Quit);
        assert_eq!(execute(&mut s, "clear").unwrap(), Outcome::Clear);
        assert_eq!(execute(&mut s, "h").unwrap(), Outcome::Help);
        assert_eq!(execute(&mut s, "what").unwrap(), Outcome::Ignored);
    }

    #[test]
    fn test_range_slices_loaded_records() {
        let temp = TempDir::new().unwrap();
        write_publish(temp.path(), "old", 100, 1);
        write_publish(temp.path(), "mid", 200, 2);
        write_publish(temp.path(), "new", 300, 3);
        let mut s = session(&temp);

        match execute(&mut s, "range(1, 2)").unwrap() {
            Outcome::Range { start, records } => {
                assert_eq!(start, 1);
                let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, ["mid.json", "old.json"]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_range_uses_session_list_until_ls() {
        let temp = TempDir::new().unwrap();
        write_publish(temp.path(), "a", 100, 1);
        let mut s = session(&temp);
        write_publish(temp.path(), "b", 200, 1);

        assert!(execute(&mut s, "range(0,1)").is_err());
        assert!(matches!(execute(&mut s, "ls").unwrap(), Outcome::Listing(r) if r.len() == 2));
        assert!(execute(&mut s, "range(0,1)").is_ok());
    }

    #[test]
    fn test_publish_times_in_request_order() {
        let temp = TempDir::new().unwrap();
        write_publish(temp.path(), "old", 100, 7);
        write_publish(temp.path(), "new", 300, 3);
        let mut s = session(&temp);

        match execute(&mut s, "pt 1, 0, 1").unwrap() {
            Outcome::Summaries(summaries) => {
                let got: Vec<_> = summaries
                    .iter()
                    .map(|s| (s.index, s.name.as_str(), s.duration_seconds))
                    .collect();
                assert_eq!(
                    got,
                    [(1, "old.json", 7.0), (0, "new.json", 3.0), (1, "old.json", 7.0)]
                );
                assert!(summaries.iter().all(|s| s.file_count == 1));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_index_aborts_before_computing() {
        let temp = TempDir::new().unwrap();
        write_publish(temp.path(), "a", 100, 1);
        // broken record at index 0 would fail summarization if it were reached
        fs::write(temp.path().join("broken.json"), "{").unwrap();
        filetime::set_file_mtime(
            temp.path().join("broken.json"),
            FileTime::from_unix_time(500, 0),
        )
        .unwrap();
        let mut s = session(&temp);

        match execute(&mut s, "pt 0,7").unwrap_err() {
            PublishError::Input(e) => assert_eq!(e.kind, InputErrorKind::IndexOutOfRange),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_system_error_yields_no_summaries() {
        let temp = TempDir::new().unwrap();
        write_publish(temp.path(), "a", 100, 1);
        fs::write(temp.path().join("broken.json"), "{").unwrap();
        filetime::set_file_mtime(
            temp.path().join("broken.json"),
            FileTime::from_unix_time(500, 0),
        )
        .unwrap();
        let mut s = session(&temp);

        assert!(matches!(
            execute(&mut s, "pt 1,0").unwrap_err(),
            PublishError::System(_)
        ));
    }
}
