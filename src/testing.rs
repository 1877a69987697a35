//! Test utilities for database setup.
//!
//! Reuses the authoritative schema initialization so tests never carry
//! their own copy of the schema.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use tempfile::TempDir;

use crate::domain::{StudentCreate, StudentSettings};

/// Test environment with a migrated pacer.db in a temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub conn: Connection,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = Connection::open(temp.path().join("pacer.db"))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        crate::db::schema::run_migrations(&conn)?;

        Ok(Self { temp, conn })
    }

    /// Create a test environment with one student already registered.
    pub fn with_student(student_id: &str) -> rusqlite::Result<Self> {
        let env = Self::new()?;
        crate::db::insert_student(
            &env.conn,
            &StudentCreate {
                student_id: student_id.to_string(),
                name: format!("Student {}", student_id),
                settings: StudentSettings::default(),
            },
            at(2024, 1, 1, 9),
        )?;
        Ok(env)
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn at(y: i32, m: u32, d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, hour, 0, 0)
        .single()
        .expect("valid test timestamp")
}
