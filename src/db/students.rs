//! Student CRUD

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result, Row};

use crate::domain::{Student, StudentCreate, StudentSettings};

fn row_to_student(row: &Row) -> Result<Student> {
    let settings: String = row.get(2)?;
    Ok(Student {
        student_id: row.get(0)?,
        name: row.get(1)?,
        settings: StudentSettings::from_json(&settings),
        created_at: row.get(3)?,
    })
}

pub fn insert_student(conn: &Connection, student: &StudentCreate, now: DateTime<Utc>) -> Result<Student> {
    conn.execute(
        "INSERT INTO students (student_id, name, settings, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![student.student_id, student.name, student.settings.to_json(), now],
    )?;

    Ok(Student {
        student_id: student.student_id.clone(),
        name: student.name.clone(),
        settings: student.settings.clone(),
        created_at: now,
    })
}

pub fn get_student(conn: &Connection, student_id: &str) -> Result<Option<Student>> {
    let mut stmt = conn.prepare(
        "SELECT student_id, name, settings, created_at FROM students WHERE student_id = ?1",
    )?;

    let mut rows = stmt.query(params![student_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_student(row)?))
    } else {
        Ok(None)
    }
}

pub fn list_students(conn: &Connection, skip: i64, limit: i64) -> Result<Vec<Student>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT student_id, name, settings, created_at
    FROM students
    ORDER BY created_at ASC, student_id ASC
    LIMIT ?1 OFFSET ?2
    "#,
    )?;

    let students = stmt
        .query_map(params![limit, skip], row_to_student)?
        .collect::<Result<Vec<_>>>()?;
    Ok(students)
}

/// Replace a student's settings, returning the updated student if it exists
pub fn update_student_settings(
    conn: &Connection,
    student_id: &str,
    settings: &StudentSettings,
) -> Result<Option<Student>> {
    let updated = conn.execute(
        "UPDATE students SET settings = ?1 WHERE student_id = ?2",
        params![settings.to_json(), student_id],
    )?;

    if updated == 0 {
        return Ok(None);
    }
    get_student(conn, student_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, TestEnv};
    use serde_json::json;

    fn create(id: &str, settings: serde_json::Value) -> StudentCreate {
        StudentCreate {
            student_id: id.to_string(),
            name: format!("Name {}", id),
            settings: serde_json::from_value(settings).unwrap(),
        }
    }

    #[test]
    fn test_insert_and_get_student() {
        let env = TestEnv::new().unwrap();
        let now = at(2024, 2, 1, 10);
        insert_student(&env.conn, &create("s1", json!({"anki_budget_per_day": 3})), now).unwrap();

        let student = get_student(&env.conn, "s1").unwrap().unwrap();
        assert_eq!(student.name, "Name s1");
        assert_eq!(student.settings.budget_per_day(), 3);
        assert_eq!(student.created_at, now);
    }

    #[test]
    fn test_get_missing_student() {
        let env = TestEnv::new().unwrap();
        assert!(get_student(&env.conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_student_fails() {
        let env = TestEnv::new().unwrap();
        let now = at(2024, 2, 1, 10);
        insert_student(&env.conn, &create("s1", json!({})), now).unwrap();
        assert!(insert_student(&env.conn, &create("s1", json!({})), now).is_err());
    }

    #[test]
    fn test_list_students_paginates() {
        let env = TestEnv::new().unwrap();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            insert_student(&env.conn, &create(id, json!({})), at(2024, 2, 1, 8 + i as u32)).unwrap();
        }

        let page: Vec<_> = list_students(&env.conn, 1, 5)
            .unwrap()
            .into_iter()
            .map(|s| s.student_id)
            .collect();
        assert_eq!(page, vec!["b", "c"]);
    }

    #[test]
    fn test_update_settings() {
        let env = TestEnv::new().unwrap();
        insert_student(&env.conn, &create("s1", json!({})), at(2024, 2, 1, 10)).unwrap();

        let settings: StudentSettings = serde_json::from_value(json!({"anki_budget_per_day": 9})).unwrap();
        let updated = update_student_settings(&env.conn, "s1", &settings).unwrap().unwrap();
        assert_eq!(updated.settings.budget_per_day(), 9);

        assert!(update_student_settings(&env.conn, "missing", &settings).unwrap().is_none());
    }
}
