// Social security (INSS-style) withholding
use super::brackets::BracketTable;
use super::WithholdingCalculator;
use serde_json::Value;

pub struct SocialSecurity {
    name: String,
    table: BracketTable,
}

impl SocialSecurity {
    pub fn new(table: BracketTable) -> Self {
        Self {
            name: "INSS".to_string(),
            table,
        }
    }
}

impl WithholdingCalculator for SocialSecurity {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "table": self.table })
    }

    /// `base` is the gross pay. Above the last limit the table's ceiling is charged.
    fn calculate(&self, base: f64) -> f64 {
        self.table.resolve(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollConfig;

    fn calculator() -> SocialSecurity {
        SocialSecurity::new(PayrollConfig::default().social_security)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "{} != {}", actual, expected);
    }

    #[test]
    fn test_first_bracket() {
        assert_close(calculator().calculate(1000.0), 75.0);
    }

    #[test]
    fn test_bracket_limit_is_inclusive() {
        let inss = calculator();
        assert_close(inss.calculate(1556.94), 1556.94 * 0.075);
        assert_close(inss.calculate(2826.65), 2826.65 * 0.09 - 23.35);
        assert_close(inss.calculate(7507.49), 7507.49 * 0.14 - 194.06);
    }

    #[test]
    fn test_just_above_a_limit_moves_to_next_bracket() {
        assert_close(calculator().calculate(1556.95), 1556.95 * 0.09 - 23.35);
    }

    #[test]
    fn test_above_all_limits_is_capped() {
        let inss = calculator();
        assert_close(inss.calculate(7507.50), 908.85);
        assert_close(inss.calculate(50_000.0), 908.85);
    }

    #[test]
    fn test_parameters_expose_table() {
        let params = calculator().parameters();
        assert_eq!(params["table"]["brackets"].as_array().unwrap().len(), 4);
        assert_eq!(params["table"]["ceiling"], 908.85);
    }
}
