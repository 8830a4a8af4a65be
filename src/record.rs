//! Record shape produced by every test method

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FixtureError;

/// Thresholds are strict: a value equal to a threshold falls into the lower bucket.
const HIGH_THRESHOLD: f64 = 10.0;
const MEDIUM_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    High,
    Medium,
    Low,
}

impl Category {
    /// Bucket a value; NaN fails both comparisons and lands in `Low`.
    pub fn classify(value: f64) -> Self {
        if value > HIGH_THRESHOLD {
            Category::High
        } else if value > MEDIUM_THRESHOLD {
            Category::Medium
        } else {
            Category::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::High => "high",
            Category::Medium => "medium",
            Category::Low => "low",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Category::High),
            "medium" => Ok(Category::Medium),
            "low" => Ok(Category::Low),
            other => Err(FixtureError::Validation {
                message: format!("unknown category '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: u32,
    pub name: String,
    pub value: f64,
    /// ISO-8601 UTC, millisecond precision
    pub timestamp: String,
    pub description: String,
    pub category: Category,
}

impl TestRecord {
    pub fn build(id: u32, param1: &str, param2: f64) -> Self {
        Self {
            id,
            name: format!("Test {}", id),
            value: param2 * f64::from(id),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            description: format!("This is test method {} that processes {}", id, param1),
            category: Category::classify(param2),
        }
    }
}
