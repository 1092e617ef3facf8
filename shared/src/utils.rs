// Brazilian number formats, shared by the payroll form reader and payslip output.
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use std::str::FromStr;

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    /// Reads a form field the forgiving way: a plain decimal ("1234.56") first, then the
    /// Brazilian notation ("1.234,56"). Blank, garbage or non-finite input is zero.
    pub fn coerce_number(s: &str) -> f64 {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        let parsed = f64::from_str(trimmed)
            .ok()
            .filter(|v| v.is_finite())
            .or_else(|| parse_decimal(trimmed).ok().filter(|v| v.is_finite()));
        parsed.unwrap_or(0.0)
    }

    // Checkbox-style flags: anything not recognised is false.
    pub fn parse_flag(s: &str) -> bool {
        matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "on" | "sim" | "s" | "yes"
        )
    }

    /// Renders an amount as "R$ 1.234,56", rounded to cents.
    pub fn format_currency(value: f64) -> String {
        let cents = (value.abs() * 100.0).round() as u64;
        let integer = (cents / 100).to_string();
        let fraction = cents % 100;

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
        format!("{}R$ {},{:02}", sign, grouped, fraction)
    }

}
