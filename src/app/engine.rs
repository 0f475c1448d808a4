use crate::adapters::scanner::RecordScanner;
use crate::app::dto::{RecordView, ScanOptions, ScanSummary};
use crate::domain::descriptor::{DescriptorParser, DescriptorSummary, EntityDescriptor};
use crate::domain::record::DependencyRecord;
use anyhow::{Context as _, Result};
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates record scanning and descriptor inspection for the front ends.
#[derive(Clone, Debug)]
pub struct MdgEngine {
    parser: Arc<DescriptorParser>,
}

impl MdgEngine {
    pub fn new(parser: DescriptorParser) -> Self {
        Self {
            parser: Arc::new(parser),
        }
    }

    /// Scan every record from `reader`, handing accepted ones to `emit`.
    ///
    /// A rejected line aborts the scan unless `options.skip_invalid` is set. A
    /// read failure always aborts, after the records before it were emitted.
    pub fn scan_records<R, F>(
        &self,
        reader: R,
        options: &ScanOptions,
        mut emit: F,
    ) -> Result<ScanSummary>
    where
        R: BufRead,
        F: FnMut(RecordView) -> Result<()>,
    {
        let mut scanner = RecordScanner::new(reader);
        let mut summary = ScanSummary::default();

        while scanner.scan() {
            let line = scanner.line_number();
            let record = match scanner.record() {
                Ok(record) => record,
                Err(e) if options.skip_invalid => {
                    warn!(line, error = %e, "skipping invalid record");
                    summary.lines_rejected += 1;
                    continue;
                }
                Err(e) => return Err(e).with_context(|| format!("Invalid record at line {line}")),
            };

            if !options.filter.accepts(&record) {
                summary.records_filtered += 1;
                continue;
            }

            emit(self.view(line, record, options.normalize))?;
            summary.records_emitted += 1;
        }

        let last_line = scanner.line_number();
        if let Some(e) = scanner.into_err() {
            return Err(e)
                .with_context(|| format!("Failed to read dependency input after line {last_line}"));
        }

        info!(
            emitted = summary.records_emitted,
            filtered = summary.records_filtered,
            rejected = summary.lines_rejected,
            "scan finished"
        );
        Ok(summary)
    }

    pub fn describe(&self, raw: &str) -> DescriptorSummary {
        let descriptor = EntityDescriptor::from(raw);
        let summary = self.parser.summarize(&descriptor);
        if summary.query_string.is_empty() {
            debug!(descriptor = raw, "descriptor has no .java/ marker");
        }
        summary
    }

    fn view(&self, line: usize, record: DependencyRecord, normalize: bool) -> RecordView {
        let (from_queries, to_query) = if normalize {
            let query = |raw: &str| self.parser.query_string(&EntityDescriptor::from(raw));
            (
                Some(record.from.iter().map(|e| query(e.as_str())).collect()),
                Some(query(record.to.as_str())),
            )
        } else {
            (None, None)
        };
        RecordView {
            line,
            record,
            from_queries,
            to_query,
        }
    }
}

impl Default for MdgEngine {
    fn default() -> Self {
        Self::new(DescriptorParser::new())
    }
}
