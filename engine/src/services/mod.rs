// Entry points used by callers (the command line driver, or an embedding application).
// Each operation logs the request and dispatches to its handler module.
use shared::models::{PayrollBreakdown, PayrollInputs};
use std::collections::HashMap;
use std::path::Path;

use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::payroll::PayrollEstimator;

pub mod estimate_payroll;
pub mod import_afd;

pub use import_afd::AfdImportOutcome;

pub struct HrEngine {
    estimator: PayrollEstimator,
}

impl HrEngine {
    pub fn new(settings: &EngineSettings) -> Self {
        HrEngine {
            estimator: PayrollEstimator::new(settings.payroll.clone()),
        }
    }

    pub fn import_afd_file(&self, file_path: &Path) -> Result<AfdImportOutcome, EngineError> {
        tracing::info!(path = %file_path.display(), "Received AFD file import, dispatching to handler.");
        import_afd::handle_import_afd_file(file_path)
    }

    pub fn import_afd_text(&self, text: &str) -> AfdImportOutcome {
        tracing::info!(bytes = text.len(), "Received AFD text import, dispatching to handler.");
        import_afd::handle_import_afd_text(text)
    }

    pub fn estimate_payroll(&self, inputs: &PayrollInputs) -> PayrollBreakdown {
        tracing::info!(
            base_salary = inputs.base_salary,
            overtime_hours = inputs.overtime_hours,
            dependent_count = inputs.dependent_count,
            "Received payroll estimate, dispatching to handler."
        );
        estimate_payroll::handle_estimate(&self.estimator, inputs)
    }

    pub fn estimate_payroll_from_form(&self, fields: &HashMap<String, String>) -> PayrollBreakdown {
        let inputs = estimate_payroll::inputs_from_form(fields);
        self.estimate_payroll(&inputs)
    }

    pub fn render_payslip(&self, breakdown: &PayrollBreakdown) -> String {
        estimate_payroll::render_payslip(&self.estimator, breakdown)
    }

    pub fn payroll_report_json(&self, breakdown: &PayrollBreakdown) -> Result<String, EngineError> {
        estimate_payroll::payroll_report_json(&self.estimator, breakdown)
    }
}

impl Default for HrEngine {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}
