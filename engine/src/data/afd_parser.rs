use shared::models::PunchRecord;
use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::error::EngineError;

// Fixed-width layout of a punch line (record type 3). Offsets count characters.
const RECORD_TYPE_OFFSET: usize = 9;
const PUNCH_RECORD_TYPE: char = '3';
const EMPLOYEE_ID: Range<usize> = 10..22;
const DATE: Range<usize> = 22..30;
const TIME: Range<usize> = 30..34;
const MIN_PUNCH_LINE_LEN: usize = 34;
const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines_read: usize,
    pub punch_records: usize,
    pub skipped_lines: usize,
}

/// Reader for AFD time-clock exports.
///
/// Only punch lines are extracted. Header, trailer and every other record kind, as well
/// as lines too short to hold a punch, are skipped without error. Trailer counts and
/// checksums are not verified.
pub struct AfdParser;

impl AfdParser {
    pub fn parse_records(text: &str) -> Vec<PunchRecord> {
        Self::parse_with_stats(text).0
    }

    pub fn parse_with_stats(text: &str) -> (Vec<PunchRecord>, ParseStats) {
        let mut stats = ParseStats::default();
        let mut records = Vec::new();
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

        // lines() splits on both "\n" and "\r\n"
        for line in text.lines() {
            stats.lines_read += 1;
            match Self::parse_line(line) {
                Some(record) => records.push(record),
                None => stats.skipped_lines += 1,
            }
        }
        stats.punch_records = records.len();

        tracing::debug!(
            lines_read = stats.lines_read,
            punch_records = stats.punch_records,
            skipped_lines = stats.skipped_lines,
            "Parsed AFD text"
        );
        (records, stats)
    }

    /// Extracts a punch from one line, or `None` when the line is not a well-formed punch.
    pub fn parse_line(line: &str) -> Option<PunchRecord> {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() < MIN_PUNCH_LINE_LEN || chars[RECORD_TYPE_OFFSET] != PUNCH_RECORD_TYPE {
            return None;
        }
        let text = |range: Range<usize>| chars[range].iter().collect::<String>();

        let employee_id = text(EMPLOYEE_ID);
        let date = chars[DATE].to_vec(); // ddmmyyyy
        let time = chars[TIME].to_vec(); // hhmm

        Some(PunchRecord {
            employee_id: employee_id.trim().to_string(),
            date: format!(
                "{}-{}-{}",
                date[4..8].iter().collect::<String>(),
                date[2..4].iter().collect::<String>(),
                date[0..2].iter().collect::<String>()
            ),
            time: format!(
                "{}:{}",
                time[0..2].iter().collect::<String>(),
                time[2..4].iter().collect::<String>()
            ),
        })
    }

    /// Reads an AFD file from disk. The file must be UTF-8 (plain ASCII exports are);
    /// a leading byte order mark is ignored.
    pub fn load_from_file(file_path: impl AsRef<Path>) -> Result<(Vec<PunchRecord>, ParseStats), EngineError> {
        let file_path = file_path.as_ref();
        let bytes = fs::read(file_path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            EngineError::AfdReadError(format!(
                "File '{}' is not valid UTF-8 text: {}",
                file_path.display(),
                e
            ))
        })?;
        Ok(Self::parse_with_stats(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn punch_line(nsr: u32, pis: &str, ddmmyyyy: &str, hhmm: &str) -> String {
        format!("{:09}3{:>12}{}{}", nsr, pis, ddmmyyyy, hhmm)
    }

    #[test]
    fn test_parse_single_punch() {
        let line = punch_line(1, "012345678901", "15032024", "0805");
        assert_eq!(line.len(), 34);
        let records = AfdParser::parse_records(&line);
        assert_eq!(
            records,
            vec![PunchRecord {
                employee_id: "012345678901".to_string(),
                date: "2024-03-15".to_string(),
                time: "08:05".to_string(),
            }]
        );
    }

    #[test]
    fn test_employee_id_is_trimmed() {
        let line = punch_line(7, "98765", "01012024", "1730");
        let record = AfdParser::parse_line(&line).unwrap();
        assert_eq!(record.employee_id, "98765");
    }

    #[test]
    fn test_extracted_fields_rebuild_the_line() {
        let line = punch_line(42, "111222333444", "28022023", "2359");
        let record = AfdParser::parse_line(&line).unwrap();
        let date: Vec<&str> = record.date.split('-').collect();
        let rebuilt = format!(
            "{}3{:>12}{}{}{}{}",
            &line[0..9],
            record.employee_id,
            date[2],
            date[1],
            date[0],
            record.time.replace(':', "")
        );
        assert_eq!(rebuilt, line);
    }

    #[test]
    fn test_mixed_line_endings_and_other_record_types() {
        let header = "0000000001012345678000190000000000000EMPRESA LTDA";
        let other_kind = "0000000024012345678901150320240805";
        let text = format!(
            "{}\r\n{}\n{}\r\n{}\n",
            header,
            punch_line(2, "012345678901", "15032024", "0805"),
            other_kind,
            punch_line(3, "012345678901", "15032024", "1200"),
        );
        let (records, stats) = AfdParser::parse_with_stats(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time, "08:05");
        assert_eq!(records[1].time, "12:00");
        assert_eq!(stats, ParseStats { lines_read: 4, punch_records: 2, skipped_lines: 2 });
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let line = punch_line(1, "012345678901", "15032024", "0805");
        assert!(AfdParser::parse_line(&line[..33]).is_none());
        assert!(AfdParser::parse_line("").is_none());
        assert!(AfdParser::parse_line("0000000003").is_none());

        // 33 characters, 34 bytes
        let accented = "00000000130123456789011503202408é";
        assert_eq!(accented.chars().count(), 33);
        assert_eq!(accented.len(), 34);
        assert!(AfdParser::parse_line(accented).is_none());
    }

    #[test]
    fn test_wrong_type_marker_is_skipped() {
        let line = punch_line(1, "012345678901", "15032024", "0805").replacen("3", "5", 1);
        assert_eq!(line.chars().nth(9), Some('5'));
        assert!(AfdParser::parse_line(&line).is_none());
    }

    #[test]
    fn test_offsets_count_characters_not_bytes() {
        let line = "0000000013JOÃOSILVA123150320240805";
        assert_eq!(line.chars().count(), 34);
        let record = AfdParser::parse_line(line).unwrap();
        assert_eq!(record.employee_id, "JOÃOSILVA123");
        assert_eq!(record.date, "2024-03-15");
        assert_eq!(record.time, "08:05");
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let text = "\u{FEFF}0000000013012345678901150320240805\n";
        let records = AfdParser::parse_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, "012345678901");
    }

    #[test]
    fn test_impossible_date_is_kept() {
        let line = punch_line(1, "012345678901", "31022024", "0800");
        let record = AfdParser::parse_line(&line).unwrap();
        assert_eq!(record.date, "2024-02-31");
        assert!(record.timestamp().is_none());
    }

    #[test]
    fn test_file_order_is_preserved() {
        let text = [
            punch_line(1, "2", "02012024", "0900"),
            punch_line(2, "1", "01012024", "0800"),
        ]
        .join("\n");
        let records = AfdParser::parse_records(&text);
        assert_eq!(records[0].employee_id, "2");
        assert_eq!(records[1].employee_id, "1");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", punch_line(1, "012345678901", "15032024", "0805")).unwrap();
        let (records, stats) = AfdParser::load_from_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(stats.lines_read, 1);
    }

    #[test]
    fn test_load_from_file_with_byte_order_mark() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        writeln!(file, "{}", punch_line(1, "012345678901", "15032024", "0805")).unwrap();
        let (records, stats) = AfdParser::load_from_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(stats.skipped_lines, 0);
    }

    #[test]
    fn test_load_from_file_rejects_non_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x30, 0xC3, 0x28, 0xFF]).unwrap();
        let err = AfdParser::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::AfdReadError(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = AfdParser::load_from_file("non_existent.afd").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }
}
