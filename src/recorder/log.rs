use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Band, Combination, CombinationResult};

/// Column names of the Results Log.
pub const HEADER: [&str; 10] = [
    "Band_1", "Band_2", "Band_3", "Fold_1", "Fold_2", "Fold_3", "Fold_4", "Fold_5", "Avg_MAE",
    "Status",
];

/// Band columns of a logged row; the remaining columns are ignored.
#[derive(Debug, Deserialize)]
struct LoggedBands {
    #[serde(rename = "Band_1")]
    band_1: Band,
    #[serde(rename = "Band_2")]
    band_2: Band,
    #[serde(rename = "Band_3")]
    band_3: Band,
}

/// Append-only CSV log with one row per processed combination.
///
/// The file is opened and closed for every row, so a crash loses at most the
/// combination in flight. Existing rows are never rewritten.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with its header row if it does not exist yet.
    ///
    /// Returns `true` when the file was created. An existing file is left untouched.
    pub fn ensure_header(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(HEADER)?;
        wtr.flush()?;

        info!(path = %self.path.display(), "created results log");
        Ok(true)
    }

    /// Append one result row and sync it to disk.
    pub fn append(&self, result: &CombinationResult) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record(result.to_record())?;
        wtr.flush()?;

        let file = wtr.into_inner().map_err(|e| e.into_error())?;
        file.sync_data()?;
        Ok(())
    }

    /// Combinations recorded by earlier runs, in file order.
    ///
    /// A missing file yields an empty list. Rows whose bands do not parse are skipped.
    pub fn tried_combinations(&self) -> Result<Vec<Combination>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;

        let mut tried = Vec::new();
        for (i, row) in rdr.deserialize::<LoggedBands>().enumerate() {
            let parsed = row
                .ok()
                .and_then(|r| Combination::new(r.band_1, r.band_2, r.band_3));
            match parsed {
                Some(combo) => tried.push(combo),
                None => warn!(row = i + 1, path = %self.path.display(), "skipping malformed log row"),
            }
        }
        Ok(tried)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_created_once() {
        let dir = tempdir().unwrap();
        let log = ResultsLog::new(dir.path().join("nested/results.csv"));

        assert!(log.ensure_header().unwrap());
        assert!(!log.ensure_header().unwrap());

        let lines = read_lines(log.path());
        assert_eq!(
            lines,
            vec!["Band_1,Band_2,Band_3,Fold_1,Fold_2,Fold_3,Fold_4,Fold_5,Avg_MAE,Status"]
        );
    }

    #[test]
    fn test_existing_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "custom header\n1,2,3\n").unwrap();

        let log = ResultsLog::new(&path);
        assert!(!log.ensure_header().unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom header\n1,2,3\n");
    }

    #[test]
    fn test_append_adds_rows() {
        let dir = tempdir().unwrap();
        let log = ResultsLog::new(dir.path().join("results.csv"));
        log.ensure_header().unwrap();

        let a = Combination::new(1, 2, 3).unwrap();
        let b = Combination::new(4, 9, 12).unwrap();
        log.append(&CombinationResult::from_scores(a, [Some(1.0); 5])).unwrap();
        log.append(&CombinationResult::failed(b)).unwrap();

        let lines = read_lines(log.path());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,2,3,1.0,1.0,1.0,1.0,1.0,1.0,Success");
        assert_eq!(lines[2], "4,9,12,N/A,N/A,N/A,N/A,N/A,Error,Failed");
    }

    #[test]
    fn test_partial_failure_status_written_verbatim() {
        let dir = tempdir().unwrap();
        let log = ResultsLog::new(dir.path().join("results.csv"));
        log.ensure_header().unwrap();

        let combo = Combination::new(5, 6, 7).unwrap();
        let result =
            CombinationResult::from_scores(combo, [Some(2.0), None, Some(2.0), Some(2.0), Some(2.0)]);
        log.append(&result).unwrap();

        let lines = read_lines(log.path());
        assert_eq!(lines[1], "5,6,7,2.0,Error,2.0,2.0,2.0,Error,Partial Failure");
    }

    #[test]
    fn test_tried_combinations_reads_back() {
        let dir = tempdir().unwrap();
        let log = ResultsLog::new(dir.path().join("results.csv"));
        assert!(log.tried_combinations().unwrap().is_empty());

        log.ensure_header().unwrap();
        let a = Combination::new(8, 1, 3).unwrap();
        let b = Combination::new(2, 11, 13).unwrap();
        log.append(&CombinationResult::failed(a)).unwrap();
        log.append(&CombinationResult::from_scores(b, [Some(0.5); 5])).unwrap();

        assert_eq!(log.tried_combinations().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(
            &path,
            "Band_1,Band_2,Band_3,Fold_1,Fold_2,Fold_3,Fold_4,Fold_5,Avg_MAE,Status\n\
             x,2,3,N/A,N/A,N/A,N/A,N/A,Error,Failed\n\
             4,4,5,N/A,N/A,N/A,N/A,N/A,Error,Failed\n\
             6,5,7,1.0,1.0,1.0,1.0,1.0,1.0,Success\n",
        )
        .unwrap();

        let log = ResultsLog::new(&path);
        assert_eq!(
            log.tried_combinations().unwrap(),
            vec![Combination::new(5, 6, 7).unwrap()]
        );
    }
}
