//! The numbered test methods.
//!
//! Every method shares one template and differs only by its ordinal, so they are
//! expressed as a single operation keyed by a validated [`MethodId`].

use std::io::Write;

use tracing::info;

use crate::error::{FixtureError, Result};
use crate::record::TestRecord;

/// Number of test methods in the fixture
pub const METHOD_COUNT: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodId(u32);

impl MethodId {
    pub fn new(n: u32) -> Result<Self> {
        if (1..=METHOD_COUNT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(FixtureError::Validation {
                message: format!("test method {} does not exist (valid: 1..={})", n, METHOD_COUNT),
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// All method ids in ascending order
    pub fn all() -> impl Iterator<Item = MethodId> {
        (1..=METHOD_COUNT).map(MethodId)
    }

    pub fn invoke(self, param1: &str, param2: f64) -> TestRecord {
        info!("Executing test method {}", self.0);
        TestRecord::build(self.0, param1, param2)
    }
}

/// Run test method `n`. Fails only when `n` is outside `1..=METHOD_COUNT`.
pub fn test_method(n: u32, param1: &str, param2: f64) -> Result<TestRecord> {
    Ok(MethodId::new(n)?.invoke(param1, param2))
}

/// Invoke every method in order with the same parameters
pub fn generate_all(param1: &str, param2: f64) -> Vec<TestRecord> {
    MethodId::all().map(|id| id.invoke(param1, param2)).collect()
}

/// Write records as compact JSON, one per line
pub fn write_json_lines<W: Write>(records: &[TestRecord], mut writer: W) -> Result<usize> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;

    #[test]
    fn method_seven_matches_reference_example() {
        let record = test_method(7, "x", 12.0).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, "Test 7");
        assert_eq!(record.value, 84.0);
        assert_eq!(record.category, Category::High);
        assert_eq!(record.description, "This is test method 7 that processes x");
    }

    #[test]
    fn out_of_range_methods_are_rejected() {
        assert!(test_method(0, "x", 1.0).is_err());
        assert!(test_method(METHOD_COUNT + 1, "x", 1.0).is_err());
        assert!(test_method(METHOD_COUNT, "x", 1.0).is_ok());
    }

    #[test]
    fn all_ids_are_contiguous() {
        let ids: Vec<u32> = MethodId::all().map(MethodId::get).collect();
        assert_eq!(ids.len(), METHOD_COUNT as usize);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&METHOD_COUNT));
    }

    #[test]
    fn json_lines_has_one_line_per_record() {
        let records = vec![
            test_method(1, "a", 1.0).unwrap(),
            test_method(2, "b", 7.0).unwrap(),
        ];
        let mut buf = Vec::new();
        let written = write_json_lines(&records, &mut buf).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: TestRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.category, Category::Medium);
        assert_eq!(second.value, 14.0);
    }
}
