use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{CanonicalTimestamp, Reading};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS blood_sugar (
        date_time TEXT PRIMARY KEY,
        level REAL NOT NULL
    );";

// `date_time` is MM-DD-YYYY HH:MM, so sort on its components rather than the raw text.
const SELECT_ORDERED: &str = "SELECT date_time, level FROM blood_sugar
     ORDER BY substr(date_time, 7, 4),
              substr(date_time, 1, 2),
              substr(date_time, 4, 2),
              substr(date_time, 12, 5)";

/// File-backed reading store. Every call opens its own connection and drops it on return.
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open (creating if needed) the database at `path`. Existing readings are kept.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = Database {
            path: path.to_path_buf(),
        };
        db.connect()?
            .execute_batch(CREATE_TABLE)
            .map_err(StorageError::query("create table"))?;
        debug!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Connection::open(&self.path).map_err(|source| StorageError::Open {
            path: self.path.clone(),
            source,
        })
    }

    /// Drop the readings table and recreate it empty. Destroys all stored data.
    pub fn initialize(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute_batch(&format!("DROP TABLE IF EXISTS blood_sugar; {CREATE_TABLE}"))
            .map_err(StorageError::query("initialize"))?;
        info!(path = %self.path.display(), "readings table recreated");
        Ok(())
    }

    /// Insert a reading, replacing the level of any reading with the same timestamp.
    pub fn upsert(
        &self,
        timestamp: CanonicalTimestamp,
        level: f64,
    ) -> Result<Reading, StorageError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO blood_sugar (date_time, level) VALUES (?1, ?2)
             ON CONFLICT(date_time) DO UPDATE SET level = excluded.level",
            params![timestamp.to_string(), level],
        )
        .map_err(StorageError::query("upsert"))?;
        debug!(%timestamp, level, "reading stored");
        Ok(Reading { timestamp, level })
    }

    /// All readings, oldest first. Empty when nothing has been recorded.
    pub fn fetch_all_ordered(&self) -> Result<Vec<Reading>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(SELECT_ORDERED)
            .map_err(StorageError::query("fetch readings"))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))
            .map_err(StorageError::query("fetch readings"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::query("fetch readings"))?;

        let readings = rows
            .into_iter()
            .map(|(key, level)| Self::reading_from_row(key, level))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = readings.len(), "readings fetched");
        Ok(readings)
    }

    fn reading_from_row(key: String, level: f64) -> Result<Reading, StorageError> {
        match key.parse::<CanonicalTimestamp>() {
            Ok(timestamp) => Ok(Reading { timestamp, level }),
            Err(_) => Err(StorageError::Corrupt { key }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("sugarlog.db")).unwrap();
        (dir, db)
    }

    fn ts(s: &str) -> CanonicalTimestamp {
        s.parse().unwrap()
    }

    fn keys(readings: &[Reading]) -> Vec<String> {
        readings.iter().map(|r| r.timestamp.to_string()).collect()
    }

    #[test]
    fn test_fetch_empty() {
        let (_dir, db) = temp_db();
        assert!(db.fetch_all_ordered().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_and_fetch() {
        let (_dir, db) = temp_db();
        let stored = db.upsert(ts("03-01-2024 08:00"), 95.0).unwrap();
        assert_eq!(stored.level, 95.0);

        let all = db.fetch_all_ordered().unwrap();
        assert_eq!(all, vec![stored]);
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let (_dir, db) = temp_db();
        db.upsert(ts("03-01-2024 08:00"), 95.0).unwrap();
        db.upsert(ts("03-01-2024 08:00"), 110.0).unwrap();

        let all = db.fetch_all_ordered().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].level, 110.0);
    }

    #[test]
    fn test_upsert_identical_is_idempotent() {
        let (_dir, db) = temp_db();
        for _ in 0..3 {
            db.upsert(ts("03-01-2024 08:00"), 95.0).unwrap();
        }
        assert_eq!(db.fetch_all_ordered().unwrap().len(), 1);
    }

    #[test]
    fn test_fetch_orders_chronologically() {
        let (_dir, db) = temp_db();
        for (key, level) in [
            ("01-05-2025 07:00", 101.0),
            ("12-31-2024 23:59", 140.0),
            ("03-02-2024 07:30", 88.0),
            ("03-01-2024 18:00", 120.0),
            ("03-01-2024 08:00", 95.0),
            ("11-15-2023 09:00", 99.0),
        ] {
            db.upsert(ts(key), level).unwrap();
        }

        let all = db.fetch_all_ordered().unwrap();
        assert_eq!(
            keys(&all),
            vec![
                "11-15-2023 09:00",
                "03-01-2024 08:00",
                "03-01-2024 18:00",
                "03-02-2024 07:30",
                "12-31-2024 23:59",
                "01-05-2025 07:00",
            ]
        );
        assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_reopen_keeps_readings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sugarlog.db");
        Database::open(&path)
            .unwrap()
            .upsert(ts("03-01-2024 08:00"), 95.0)
            .unwrap();

        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.fetch_all_ordered().unwrap().len(), 1);
    }

    #[test]
    fn test_initialize_discards_readings() {
        let (_dir, db) = temp_db();
        db.upsert(ts("03-01-2024 08:00"), 95.0).unwrap();
        db.initialize().unwrap();
        assert!(db.fetch_all_ordered().unwrap().is_empty());

        // Table is usable again afterwards.
        db.upsert(ts("03-02-2024 07:30"), 88.0).unwrap();
        assert_eq!(db.fetch_all_ordered().unwrap().len(), 1);
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = Database::open(dir.path()).err().unwrap();
        assert!(matches!(
            err,
            StorageError::Open { .. } | StorageError::Query { .. }
        ));
    }

    #[test]
    fn test_corrupt_key_is_reported() {
        let (_dir, db) = temp_db();
        Connection::open(db.path())
            .unwrap()
            .execute(
                "INSERT INTO blood_sugar (date_time, level) VALUES ('yesterday', 1.0)",
                [],
            )
            .unwrap();

        let err = db.fetch_all_ordered().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key } if key == "yesterday"));
    }
}
