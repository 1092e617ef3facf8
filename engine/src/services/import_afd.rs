// Handler for AFD imports
use serde::Serialize;
use shared::models::PunchRecord;
use std::collections::BTreeMap;
use std::path::Path;

use crate::data::afd_parser::{AfdParser, ParseStats};
use crate::data::punch_log::PunchLog;
use crate::error::EngineError;

pub const NO_PUNCH_RECORDS_MESSAGE: &str = "no punch records found";

/// Result of reading one AFD export. A file without punches is a soft failure:
/// `success` is false and `message` says so, but no error is raised.
#[derive(Debug, Clone)]
pub struct AfdImportOutcome {
    pub success: bool,
    pub message: String,
    pub records: Vec<PunchRecord>,
    pub log: PunchLog,
    pub stats: ParseStats,
    // Punches kept as read but whose date or time is not on the calendar.
    pub invalid_timestamps: usize,
}

#[derive(Serialize)]
struct AfdImportReport<'a> {
    success: bool,
    message: &'a str,
    lines_read: usize,
    skipped_lines: usize,
    invalid_timestamps: usize,
    records: &'a [PunchRecord],
    days: BTreeMap<String, Vec<String>>,
}

impl AfdImportOutcome {
    fn from_parse(records: Vec<PunchRecord>, stats: ParseStats) -> Self {
        let log = PunchLog::group_by_employee_and_day(&records);
        let invalid_timestamps = records.iter().filter(|r| r.timestamp().is_none()).count();
        if records.is_empty() {
            tracing::warn!(lines_read = stats.lines_read, "AFD import produced no punch records");
            return AfdImportOutcome {
                success: false,
                message: NO_PUNCH_RECORDS_MESSAGE.to_string(),
                records,
                log,
                stats,
                invalid_timestamps,
            };
        }

        let mut message = format!(
            "Imported {} punch records for {} employees over {} employee-days",
            records.len(),
            log.employee_count(),
            log.day_count()
        );
        if let Some((first, last)) = log.date_range() {
            message.push_str(&format!(" ({} to {})", first, last));
        }
        if invalid_timestamps > 0 {
            tracing::warn!(invalid_timestamps, "AFD import kept punches with impossible dates or times");
        }
        tracing::info!(
            punch_records = records.len(),
            employees = log.employee_count(),
            days = log.day_count(),
            skipped_lines = stats.skipped_lines,
            "AFD import finished"
        );
        AfdImportOutcome {
            success: true,
            message,
            records,
            log,
            stats,
            invalid_timestamps,
        }
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        let report = AfdImportReport {
            success: self.success,
            message: &self.message,
            lines_read: self.stats.lines_read,
            skipped_lines: self.stats.skipped_lines,
            invalid_timestamps: self.invalid_timestamps,
            records: &self.records,
            days: self.log.to_keyed_map(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

pub fn handle_import_afd_text(text: &str) -> AfdImportOutcome {
    let (records, stats) = AfdParser::parse_with_stats(text);
    AfdImportOutcome::from_parse(records, stats)
}

pub fn handle_import_afd_file(file_path: &Path) -> Result<AfdImportOutcome, EngineError> {
    let (records, stats) = AfdParser::load_from_file(file_path).map_err(|e| {
        tracing::error!(path = %file_path.display(), error_detail = %e, "Failed to read AFD file");
        e
    })?;
    Ok(AfdImportOutcome::from_parse(records, stats))
}
