use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::error::RecordError;

/// Position of the support count within the numeric tail of a record line.
pub const SUPPORT_COUNT_FIELD: usize = 0;
/// Position of the confidence within the numeric tail.
pub const CONFIDENCE_FIELD: usize = 1;
/// Position of the commits count within the numeric tail. Field 2 is never read.
pub const COMMITS_COUNT_FIELD: usize = 3;

/// One co-change relationship: the entities in `from` changed together with `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub from: Vec<String>,
    pub to: String,
    pub support_count: u64,
    pub confidence: f64,
    pub commits_count: u64,
}

impl DependencyRecord {
    /// Parse a single record line.
    ///
    /// Fields are tab separated; a line that yields fewer than two tab fields is
    /// re-split on single spaces (legacy format). Trailing fields that parse as
    /// floats form the numeric tail, everything before them is an entity.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let mut fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < 2 {
            fields = line.split(' ').collect();
        }
        if fields.len() < 2 {
            return Err(RecordError::TooFewFields {
                line: line.to_string(),
            });
        }

        let split = fields
            .iter()
            .rposition(|field| !is_numeric(field))
            .map_or(0, |i| i + 1);
        let (entities, numbers) = fields.split_at(split);

        let Some((to, from)) = entities.split_last() else {
            return Err(RecordError::NoEntities {
                line: line.to_string(),
            });
        };
        let metrics = RecordMetrics::from_fields(numbers);

        Ok(Self {
            from: from.iter().map(|s| s.to_string()).collect(),
            to: to.to_string(),
            support_count: metrics.support_count,
            confidence: metrics.confidence,
            commits_count: metrics.commits_count,
        })
    }

    pub fn metrics(&self) -> RecordMetrics {
        RecordMetrics {
            support_count: self.support_count,
            confidence: self.confidence,
            commits_count: self.commits_count,
        }
    }
}

/// The statistical tail of a record line, read by fixed position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordMetrics {
    pub support_count: u64,
    pub confidence: f64,
    pub commits_count: u64,
}

impl RecordMetrics {
    /// Missing or unparsable fields become zero; nothing here ever fails.
    pub fn from_fields(numbers: &[&str]) -> Self {
        Self {
            support_count: count_at(numbers, SUPPORT_COUNT_FIELD),
            confidence: numbers
                .get(CONFIDENCE_FIELD)
                .and_then(|raw| match raw.parse::<f64>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        trace!(field = CONFIDENCE_FIELD, raw, "confidence defaulted to 0.0");
                        None
                    }
                })
                .unwrap_or(0.0),
            commits_count: count_at(numbers, COMMITS_COUNT_FIELD),
        }
    }
}

fn count_at(numbers: &[&str], index: usize) -> u64 {
    let Some(raw) = numbers.get(index) else {
        return 0;
    };
    raw.parse::<u64>().unwrap_or_else(|_| {
        trace!(field = index, raw, "count defaulted to 0");
        0
    })
}

fn is_numeric(field: &str) -> bool {
    field.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_separated_line() {
        let record =
            DependencyRecord::parse("a/Foo.java/[CN]/Foo/\tb/Bar.java/[CN]/Bar/\t5\t0.8\t0\t12")
                .unwrap();
        assert_eq!(record.from, vec!["a/Foo.java/[CN]/Foo/"]);
        assert_eq!(record.to, "b/Bar.java/[CN]/Bar/");
        assert_eq!(record.support_count, 5);
        assert_eq!(record.confidence, 0.8);
        assert_eq!(record.commits_count, 12);
    }

    #[test]
    fn test_third_number_is_skipped() {
        let record = DependencyRecord::parse("x\ty\t1\t0.5\t999\t7").unwrap();
        assert_eq!(record.support_count, 1);
        assert_eq!(record.confidence, 0.5);
        assert_eq!(record.commits_count, 7);
    }

    #[test]
    fn test_space_fallback_when_no_tabs() {
        let record = DependencyRecord::parse("a b c 3 0.25 0 4").unwrap();
        assert_eq!(record.from, vec!["a", "b"]);
        assert_eq!(record.to, "c");
        assert_eq!(record.support_count, 3);
        assert_eq!(record.confidence, 0.25);
        assert_eq!(record.commits_count, 4);
    }

    #[test]
    fn test_space_fallback_uses_untrimmed_line() {
        let record = DependencyRecord::parse(" a b").unwrap();
        assert_eq!(record.from, vec!["", "a"]);
        assert_eq!(record.to, "b");
    }

    #[test]
    fn test_missing_numbers_default_to_zero() {
        let record = DependencyRecord::parse("a\tb\t9").unwrap();
        assert_eq!(record.support_count, 9);
        assert_eq!(record.confidence, 0.0);
        assert_eq!(record.commits_count, 0);

        let record = DependencyRecord::parse("a\tb").unwrap();
        assert_eq!(record.metrics(), RecordMetrics::default());
    }

    #[test]
    fn test_fractional_counts_degrade_to_zero() {
        let record = DependencyRecord::parse("a\tb\t2.5\t0.1\t0\t-3").unwrap();
        assert_eq!(record.support_count, 0);
        assert_eq!(record.confidence, 0.1);
        assert_eq!(record.commits_count, 0);
    }

    #[test]
    fn test_numeric_entity_inside_entities_is_kept() {
        // Only the trailing run of numbers is the numeric tail.
        let record = DependencyRecord::parse("a\t42\tb\t1\t0.5").unwrap();
        assert_eq!(record.from, vec!["a", "42"]);
        assert_eq!(record.to, "b");
    }

    #[test]
    fn test_single_entity_has_empty_from() {
        let record = DependencyRecord::parse("only\t3\t0.5").unwrap();
        assert!(record.from.is_empty());
        assert_eq!(record.to, "only");
    }

    #[test]
    fn test_all_numeric_line_is_rejected() {
        assert!(matches!(
            DependencyRecord::parse("1\t2\t3"),
            Err(RecordError::NoEntities { .. })
        ));
    }

    #[test]
    fn test_single_field_is_rejected() {
        assert!(matches!(
            DependencyRecord::parse("lonely"),
            Err(RecordError::TooFewFields { .. })
        ));
    }
}
