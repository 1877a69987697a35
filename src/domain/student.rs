use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::DEFAULT_BUDGET_PER_DAY;

/// Settings key holding the number of review cards per day
pub const BUDGET_SETTING_KEY: &str = "anki_budget_per_day";

/// Free-form per-student settings, stored as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentSettings(pub Map<String, Value>);

impl StudentSettings {
  /// Daily review budget. Falls back to the default when the key is
  /// missing or is not a non-negative integer.
  pub fn budget_per_day(&self) -> usize {
    self
      .0
      .get(BUDGET_SETTING_KEY)
      .and_then(Value::as_u64)
      .and_then(|v| usize::try_from(v).ok())
      .unwrap_or(DEFAULT_BUDGET_PER_DAY)
  }

  pub fn to_json(&self) -> String {
    Value::Object(self.0.clone()).to_string()
  }

  /// Parse stored settings; anything that is not a JSON object becomes empty.
  pub fn from_json(s: &str) -> Self {
    match serde_json::from_str::<Value>(s) {
      Ok(Value::Object(map)) => Self(map),
      _ => Self::default(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
  pub student_id: String,
  pub name: String,
  pub settings: StudentSettings,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentCreate {
  pub student_id: String,
  pub name: String,
  #[serde(default)]
  pub settings: StudentSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentSettingsUpdate {
  pub settings: StudentSettings,
}
