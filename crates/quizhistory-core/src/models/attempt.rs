use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A single quiz attempt. `date` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
}

impl AttemptRecord {
    pub fn new(date: DateTime<Utc>, score: u32, total_questions: u32) -> Self {
        Self {
            date,
            score,
            total_questions,
        }
    }

    /// `total_questions` must be positive.
    pub fn is_valid(&self) -> bool {
        self.total_questions > 0
    }

    pub fn display_date(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%b %d, %Y %I:%M %p")
            .to_string()
    }

    pub fn display_score(&self) -> String {
        format!("{} / {}", self.score, self.total_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browser_iso_date() {
        let json = r#"{"date":"2024-01-01T00:00:00.000Z","score":8,"totalQuestions":10}"#;
        let attempt: AttemptRecord = serde_json::from_str(json).expect("parse attempt");
        assert_eq!(attempt.date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(attempt.score, 8);
        assert_eq!(attempt.total_questions, 10);
        assert_eq!(attempt.display_score(), "8 / 10");
    }

    #[test]
    fn test_serializes_camel_case() {
        let attempt = AttemptRecord::new(Utc::now(), 3, 5);
        let value = serde_json::to_value(&attempt).expect("serialize");
        assert!(value.get("totalQuestions").is_some());
        assert!(value.get("total_questions").is_none());
    }

    #[test]
    fn test_negative_score_rejected() {
        let json = r#"{"date":"2024-01-01T00:00:00Z","score":-1,"totalQuestions":10}"#;
        assert!(serde_json::from_str::<AttemptRecord>(json).is_err());
    }

    #[test]
    fn test_zero_total_is_invalid() {
        let attempt = AttemptRecord::new(Utc::now(), 0, 0);
        assert!(!attempt.is_valid());
    }
}
