// Income tax (IRRF-style) withholding
use super::brackets::BracketTable;
use super::WithholdingCalculator;
use serde_json::Value;

pub struct IncomeTax {
    name: String,
    table: BracketTable,
    dependent_exemption: f64,
}

impl IncomeTax {
    pub fn new(table: BracketTable, dependent_exemption: f64) -> Self {
        Self {
            name: "IRRF".to_string(),
            table,
            dependent_exemption,
        }
    }

    /// Gross pay less the social security withholding and a fixed amount per dependent.
    pub fn taxable_base(&self, gross_pay: f64, social_security: f64, dependent_count: u32) -> f64 {
        gross_pay - social_security - f64::from(dependent_count) * self.dependent_exemption
    }
}

impl WithholdingCalculator for IncomeTax {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "table": self.table,
            "dependent_exemption": self.dependent_exemption,
        })
    }

    fn calculate(&self, base: f64) -> f64 {
        self.table.resolve(base)
    }
}
