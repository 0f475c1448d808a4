use serde::{Deserialize, Serialize};

use crate::domain::record::DependencyRecord;

/// Filters applied to scanned records before they are emitted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub min_confidence: Option<f64>,
    #[serde(default)]
    pub min_support: Option<u64>,
}

impl RecordFilter {
    pub fn accepts(&self, record: &DependencyRecord) -> bool {
        self.min_confidence.is_none_or(|min| record.confidence >= min)
            && self.min_support.is_none_or(|min| record.support_count >= min)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanOptions {
    pub filter: RecordFilter,
    /// Attach the query string of every entity to the output.
    pub normalize: bool,
    /// Log and drop lines that cannot be parsed instead of failing.
    pub skip_invalid: bool,
}

/// One emitted record, tagged with its source line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordView {
    pub line: usize,
    #[serde(flatten)]
    pub record: DependencyRecord,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub from_queries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to_query: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub records_emitted: usize,
    pub records_filtered: usize,
    pub lines_rejected: usize,
}
