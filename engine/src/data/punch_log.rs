// Punches grouped per employee and day
use chrono::NaiveDate;
use shared::models::{DayKey, PunchRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Times punched by each employee on each day, in file order.
///
/// Times are neither sorted nor deduplicated. Comparing the counts against an expected
/// shift pattern is left to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PunchLog {
    days: BTreeMap<DayKey, Vec<String>>,
}

impl PunchLog {
    pub fn group_by_employee_and_day(records: &[PunchRecord]) -> Self {
        let mut days: BTreeMap<DayKey, Vec<String>> = BTreeMap::new();
        for record in records {
            days.entry(record.day_key())
                .or_insert_with(Vec::new)
                .push(record.time.clone());
        }
        PunchLog { days }
    }

    pub fn punches_for(&self, key: &DayKey) -> Option<&[String]> {
        self.days.get(key).map(Vec::as_slice)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn employee_count(&self) -> usize {
        self.days
            .keys()
            .map(|key| key.employee_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// First and last calendar day in the log. Days that do not exist are ignored.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.days.keys().filter_map(DayKey::calendar_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &Vec<String>)> {
        self.days.iter()
    }

    /// Same grouping keyed by `employeeId-date` strings, for JSON output.
    pub fn to_keyed_map(&self) -> BTreeMap<String, Vec<String>> {
        self.days
            .iter()
            .map(|(key, times)| (key.to_string(), times.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(employee_id: &str, date: &str, time: &str) -> PunchRecord {
        PunchRecord {
            employee_id: employee_id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    fn key(employee_id: &str, date: &str) -> DayKey {
        DayKey {
            employee_id: employee_id.to_string(),
            date: date.to_string(),
        }
    }

    fn sample() -> Vec<PunchRecord> {
        vec![
            record("111", "2024-03-15", "12:00"),
            record("111", "2024-03-15", "08:00"),
            record("222", "2024-03-15", "08:10"),
            record("111", "2024-03-16", "08:00"),
            record("111", "2024-03-15", "12:00"),
        ]
    }

    #[test]
    fn test_grouping_keeps_encounter_order_and_duplicates() {
        let log = PunchLog::group_by_employee_and_day(&sample());
        assert_eq!(
            log.punches_for(&key("111", "2024-03-15")).unwrap(),
            &["12:00".to_string(), "08:00".to_string(), "12:00".to_string()]
        );
        assert_eq!(log.punches_for(&key("222", "2024-03-15")).unwrap().len(), 1);
        assert!(log.punches_for(&key("222", "2024-03-16")).is_none());
    }

    #[test]
    fn test_counts() {
        let log = PunchLog::group_by_employee_and_day(&sample());
        assert_eq!(log.day_count(), 3);
        assert_eq!(log.employee_count(), 2);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_grouping_twice_is_identical() {
        let records = sample();
        assert_eq!(
            PunchLog::group_by_employee_and_day(&records),
            PunchLog::group_by_employee_and_day(&records)
        );
    }

    #[test]
    fn test_keyed_map_uses_composite_string_key() {
        let map = PunchLog::group_by_employee_and_day(&sample()).to_keyed_map();
        assert_eq!(map["111-2024-03-16"], vec!["08:00".to_string()]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_date_range_skips_impossible_days() {
        let mut records = sample();
        records.push(record("333", "2024-02-31", "08:00"));
        let log = PunchLog::group_by_employee_and_day(&records);
        let (first, last) = log.date_range().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn test_empty_input() {
        let log = PunchLog::group_by_employee_and_day(&[]);
        assert!(log.is_empty());
        assert_eq!(log.employee_count(), 0);
        assert!(log.date_range().is_none());
    }
}
