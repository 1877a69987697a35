use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS students (
      student_id TEXT PRIMARY KEY,
      name TEXT NOT NULL,
      settings TEXT NOT NULL DEFAULT '{}',
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS decision_logs (
      log_id INTEGER PRIMARY KEY AUTOINCREMENT,
      student_id TEXT NOT NULL,
      submission_id INTEGER NOT NULL,
      decision TEXT NOT NULL,
      reason TEXT,
      -- Coach review of the decision
      coach_id TEXT,
      coach_feedback TEXT,
      reason_code TEXT,
      memo TEXT,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS anki_cards (
      card_id INTEGER PRIMARY KEY AUTOINCREMENT,
      student_id TEXT NOT NULL,
      decision_log_id INTEGER,
      question TEXT NOT NULL,
      answer TEXT NOT NULL,
      -- SM-2 schedule
      repetitions INTEGER NOT NULL DEFAULT 0,
      interval_days INTEGER NOT NULL DEFAULT 1,
      ease_factor REAL NOT NULL DEFAULT 2.5,
      next_review_date TEXT NOT NULL,
      last_reviewed_at TEXT,
      created_at TEXT NOT NULL,
      FOREIGN KEY (student_id) REFERENCES students(student_id),
      FOREIGN KEY (decision_log_id) REFERENCES decision_logs(log_id)
    );

    CREATE TABLE IF NOT EXISTS coach_memos (
      memo_id INTEGER PRIMARY KEY AUTOINCREMENT,
      student_id TEXT NOT NULL,
      coach_id TEXT NOT NULL,
      content TEXT NOT NULL,
      created_at TEXT NOT NULL
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_anki_cards_due ON anki_cards(student_id, next_review_date);
    CREATE INDEX IF NOT EXISTS idx_decision_logs_created_at ON decision_logs(created_at);
    CREATE INDEX IF NOT EXISTS idx_decision_logs_student ON decision_logs(student_id);
    CREATE INDEX IF NOT EXISTS idx_coach_memos_student ON coach_memos(student_id);
    "#,
  )?;

  Ok(())
}
