use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One clock-in/clock-out mark read from an AFD file.
///
/// `date` is kept as `yyyy-mm-dd` and `time` as `hh:mm`, exactly as sliced from the
/// fixed-width line. Nothing is validated here, so a file can carry a day that does
/// not exist on the calendar; use [`PunchRecord::timestamp`] to find out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    pub employee_id: String,
    pub date: String,
    pub time: String,
}

impl PunchRecord {
    /// `None` when the date or time does not exist (e.g. 31/02 or 25:00).
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = parse_calendar_date(&self.date)?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }

    pub fn day_key(&self) -> DayKey {
        DayKey {
            employee_id: self.employee_id.clone(),
            date: self.date.clone(),
        }
    }
}

/// Composite key for an employee's working day. Displays as `employeeId-date`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    pub employee_id: String,
    pub date: String,
}

impl DayKey {
    /// `None` when the day does not exist on the calendar.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

fn parse_calendar_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.employee_id, self.date)
    }
}

/// Monthly variable inputs for a pay slip estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollInputs {
    pub base_salary: f64,
    pub overtime_hours: f64,
    pub night_shift_hours: f64,
    pub absence_hours: f64,
    pub dependent_count: u32,
    pub commissions: f64,
    pub other_deductions: f64,
    pub deducts_transport_voucher: bool,
}

impl PayrollInputs {
    pub fn with_base_salary(base_salary: f64) -> Self {
        Self {
            base_salary,
            ..Self::default()
        }
    }

    /// Replaces NaN and infinite amounts with zero, the same way an empty form field is read.
    pub fn sanitized(mut self) -> Self {
        for value in [
            &mut self.base_salary,
            &mut self.overtime_hours,
            &mut self.night_shift_hours,
            &mut self.absence_hours,
            &mut self.commissions,
            &mut self.other_deductions,
        ] {
            if !value.is_finite() {
                *value = 0.0;
            }
        }
        self
    }
}

/// Gross-to-net breakdown (holerite) for one pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub hourly_rate: f64,
    pub overtime_pay: f64,
    pub night_shift_pay: f64,
    pub commissions: f64,
    pub gross_pay: f64,
    pub social_security_deduction: f64,
    pub income_tax_base: f64,
    pub income_tax_deduction: f64,
    pub transport_voucher_deduction: f64,
    pub absence_deduction: f64,
    pub other_deductions: f64,
    pub total_deductions: f64,
    // Not floored at zero.
    pub net_pay: f64,
}
