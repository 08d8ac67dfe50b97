//! Concurrent multi-file CSV loading.
//!
//! Reads every `*.csv` file under a directory into raw rows on a bounded
//! worker pool and merges the results into one unordered collection. The
//! core imposes no ordering requirement on loader output; the time index
//! sorts internally.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use tickforge_core::config::LoaderConfig;
use tickforge_core::{Error, RawRow, Result};

/// Loads raw tick rows from a directory of CSV source files.
pub struct TickLoader {
    dir: PathBuf,
    max_concurrent_files: usize,
}

impl TickLoader {
    /// Create a loader for a source directory.
    pub fn new(dir: impl Into<PathBuf>, config: &LoaderConfig) -> Self {
        Self {
            dir: dir.into(),
            max_concurrent_files: config.max_concurrent_files.max(1),
        }
    }

    /// List the CSV files in the source directory.
    ///
    /// An unreadable directory is fatal; individual file problems are
    /// handled during the load.
    pub fn csv_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if is_csv {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Read all source files into one merged, unordered row collection.
    ///
    /// At most `max_concurrent_files` reads are in flight at once. Files
    /// that cannot be read are logged and skipped; they do not abort the
    /// load.
    pub async fn load(&self) -> Result<Vec<RawRow>> {
        let mut pending = self.csv_files()?.into_iter();
        let mut tasks = JoinSet::new();
        let mut rows = Vec::new();

        loop {
            while tasks.len() < self.max_concurrent_files {
                let Some(path) = pending.next() else { break };
                tasks.spawn_blocking(move || {
                    let result = read_rows(&path);
                    (path, result)
                });
            }

            let Some(joined) = tasks.join_next().await else { break };
            let (path, result) =
                joined.map_err(|e| Error::data(format!("loader task failed: {e}")))?;
            match result {
                Ok(mut file_rows) => {
                    debug!(file = %path.display(), rows = file_rows.len(), "loaded source file");
                    rows.append(&mut file_rows);
                }
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "skipping unreadable source file");
                }
            }
        }

        Ok(rows)
    }
}

/// Read one CSV file into raw rows.
///
/// No header is assumed; records are read as-is. Short records surface as
/// rows with empty fields so the validator can count them; fields beyond the
/// third are ignored.
fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawRow {
            timestamp: record.get(0).unwrap_or("").trim().to_string(),
            price: record.get(1).unwrap_or("").trim().to_string(),
            size: record.get(2).unwrap_or("").trim().to_string(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "tickforge-loader-{}-{}",
                std::process::id(),
                name
            ));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, contents: &str) {
            fs::write(self.0.join(name), contents).unwrap();
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn test_merges_rows_across_files() {
        let dir = TempDir::new("merge");
        dir.write("a.csv", "2024-09-19 09:30:00.000,450.0,10\n2024-09-19 09:30:01.000,450.5,5\n");
        dir.write("b.csv", "2024-09-19 09:30:02.000,451.0,7\n");
        dir.write("notes.txt", "ignored");

        let loader = TickLoader::new(&dir.0, &LoaderConfig::default());
        let rows = loader.load().await.unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().any(|r| r.price == "451.0"));
    }

    #[tokio::test]
    async fn test_short_records_become_rows_with_empty_fields() {
        let dir = TempDir::new("short");
        dir.write("a.csv", "2024-09-19 09:30:00.000,450.0\n");

        let loader = TickLoader::new(&dir.0, &LoaderConfig::default());
        let rows = loader.load().await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, "450.0");
        assert!(rows[0].size.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_fatal() {
        let loader = TickLoader::new("/nonexistent/tickforge-test", &LoaderConfig::default());
        assert!(loader.load().await.is_err());
    }

    #[tokio::test]
    async fn test_bounded_pool_reads_all_files() {
        let dir = TempDir::new("bounded");
        for i in 0..20 {
            dir.write(
                &format!("f{i:02}.csv"),
                &format!("2024-09-19 09:30:{:02}.000,450.0,1\n", i),
            );
        }

        let config = LoaderConfig { max_concurrent_files: 2 };
        let loader = TickLoader::new(&dir.0, &config);
        let rows = loader.load().await.unwrap();

        assert_eq!(rows.len(), 20);
    }

    #[test]
    fn test_csv_files_filters_by_extension() {
        let dir = TempDir::new("ext");
        dir.write("a.csv", "");
        dir.write("b.CSV", "");
        dir.write("c.json", "{}");

        let loader = TickLoader::new(&dir.0, &LoaderConfig::default());
        let files = loader.csv_files().unwrap();
        assert_eq!(files.len(), 2);
    }
}
