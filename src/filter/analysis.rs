//! Rule-based grading of raw submissions into mistake contexts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ErrorContext;

const DEFAULT_QUESTION_TYPE: &str = "GENERAL";

/// One answered question; only entries with `expected` are graded
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerEntry {
  pub answer: String,
  pub expected: Option<String>,
  pub question_type: Option<String>,
  pub concept: Option<String>,
  pub prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
  pub submission_id: i64,
  /// Keyed by question id; BTreeMap keeps grading order deterministic
  pub raw_answers: BTreeMap<String, AnswerEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
  pub score: f64,
  pub error_contexts: Vec<ErrorContext>,
}

fn normalize(s: &str) -> String {
  s.trim().to_lowercase()
}

pub fn analyze_submission(request: &AnalyzeRequest) -> AnalysisReport {
  let mut graded = 0usize;
  let mut correct = 0usize;
  let mut error_contexts = Vec::new();

  for (question_id, entry) in &request.raw_answers {
    let Some(expected) = entry.expected.as_deref() else {
      continue;
    };
    graded += 1;

    if normalize(&entry.answer) == normalize(expected) {
      correct += 1;
      continue;
    }

    let subject = entry.prompt.as_deref().unwrap_or(question_id);
    error_contexts.push(ErrorContext {
      question_type: entry
        .question_type
        .clone()
        .unwrap_or_else(|| DEFAULT_QUESTION_TYPE.to_string()),
      concept_name: entry.concept.clone().unwrap_or_else(|| question_id.clone()),
      student_mistake_summary: format!(
        "Answered '{}' to {}, expected '{}'.",
        entry.answer.trim(),
        subject,
        expected.trim()
      ),
    });
  }

  let score = if graded == 0 {
    100.0
  } else {
    correct as f64 * 100.0 / graded as f64
  };

  AnalysisReport {
    score,
    error_contexts,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn request(value: serde_json::Value) -> AnalyzeRequest {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn test_wrong_answer_produces_context() {
    let report = analyze_submission(&request(json!({
      "submission_id": 1,
      "raw_answers": {
        "q1": {
          "answer": "3",
          "expected": "2",
          "question_type": "BASIC_ARITHMETIC",
          "concept": "Addition",
          "prompt": "1+1"
        }
      }
    })));

    assert_eq!(report.score, 0.0);
    assert_eq!(report.error_contexts.len(), 1);
    let ctx = &report.error_contexts[0];
    assert_eq!(ctx.question_type, "BASIC_ARITHMETIC");
    assert_eq!(ctx.concept_name, "Addition");
    assert_eq!(ctx.student_mistake_summary, "Answered '3' to 1+1, expected '2'.");
  }

  #[test]
  fn test_comparison_ignores_case_and_whitespace() {
    let report = analyze_submission(&request(json!({
      "submission_id": 1,
      "raw_answers": {
        "q1": {"answer": "  Photosynthesis ", "expected": "photosynthesis"}
      }
    })));
    assert_eq!(report.score, 100.0);
    assert!(report.error_contexts.is_empty());
  }

  #[test]
  fn test_ungraded_entries_are_skipped() {
    let report = analyze_submission(&request(json!({
      "submission_id": 1,
      "raw_answers": {
        "essay": {"answer": "free text"},
        "q1": {"answer": "4", "expected": "4"},
        "q2": {"answer": "5", "expected": "6"}
      }
    })));
    assert_eq!(report.score, 50.0);
    assert_eq!(report.error_contexts.len(), 1);
    // Defaults when metadata is missing
    assert_eq!(report.error_contexts[0].question_type, "GENERAL");
    assert_eq!(report.error_contexts[0].concept_name, "q2");
  }

  #[test]
  fn test_nothing_graded_scores_full() {
    let report = analyze_submission(&request(json!({
      "submission_id": 1,
      "raw_answers": {}
    })));
    assert_eq!(report.score, 100.0);
    assert!(report.error_contexts.is_empty());
  }

  #[test]
  fn test_contexts_follow_question_id_order() {
    let report = analyze_submission(&request(json!({
      "submission_id": 1,
      "raw_answers": {
        "q3": {"answer": "x", "expected": "y", "concept": "third"},
        "q1": {"answer": "x", "expected": "y", "concept": "first"}
      }
    })));
    let concepts: Vec<_> = report.error_contexts.iter().map(|c| c.concept_name.as_str()).collect();
    assert_eq!(concepts, vec!["first", "third"]);
  }
}
