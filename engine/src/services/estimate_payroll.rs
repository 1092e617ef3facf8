// Handler for pay slip estimates
use serde::Serialize;
use serde_json::Value;
use shared::models::{PayrollBreakdown, PayrollInputs};
use shared::utils::brazilian_format::{coerce_number, format_currency, parse_flag};
use std::collections::{BTreeMap, HashMap};

use crate::error::EngineError;
use crate::payroll::PayrollEstimator;

#[derive(Serialize)]
struct PayrollReport<'a> {
    #[serde(flatten)]
    breakdown: &'a PayrollBreakdown,
    // Tables behind each withholding, keyed by name
    withholdings: BTreeMap<&'a str, Value>,
}

/// Builds inputs from raw form fields (camelCase names). Missing or unreadable
/// numbers become 0 and the transport voucher flag defaults to false.
pub fn inputs_from_form(fields: &HashMap<String, String>) -> PayrollInputs {
    let number = |name: &str| fields.get(name).map_or(0.0, |v| coerce_number(v));

    PayrollInputs {
        base_salary: number("baseSalary"),
        overtime_hours: number("overtimeHours"),
        night_shift_hours: number("nightShiftHours"),
        absence_hours: number("absenceHours"),
        dependent_count: number("dependentCount").max(0.0).trunc() as u32,
        commissions: number("commissions"),
        other_deductions: number("otherDeductions"),
        deducts_transport_voucher: fields
            .get("deductsTransportVoucher")
            .map_or(false, |v| parse_flag(v)),
    }
}

pub fn handle_estimate(estimator: &PayrollEstimator, inputs: &PayrollInputs) -> PayrollBreakdown {
    let breakdown = estimator.compute_net_pay(inputs);
    if breakdown.net_pay < 0.0 {
        tracing::warn!(
            gross_pay = breakdown.gross_pay,
            total_deductions = breakdown.total_deductions,
            "Deductions exceed gross pay; net pay is negative"
        );
    }
    breakdown
}

/// Breakdown plus the parameters of every withholding that produced it.
pub fn payroll_report_json(estimator: &PayrollEstimator, breakdown: &PayrollBreakdown) -> Result<String, EngineError> {
    let report = PayrollReport {
        breakdown,
        withholdings: estimator
            .withholdings()
            .into_iter()
            .map(|w| (w.name(), w.parameters()))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Plain-text holerite with amounts in R$.
pub fn render_payslip(estimator: &PayrollEstimator, breakdown: &PayrollBreakdown) -> String {
    let [social_security, income_tax] = estimator.withholdings();
    let earnings = [
        ("Salário base", breakdown.gross_pay - breakdown.overtime_pay - breakdown.night_shift_pay - breakdown.commissions),
        ("Horas extras", breakdown.overtime_pay),
        ("Adicional noturno", breakdown.night_shift_pay),
        ("Comissões", breakdown.commissions),
    ];
    let deductions = [
        (social_security.name(), breakdown.social_security_deduction),
        (income_tax.name(), breakdown.income_tax_deduction),
        ("Vale-transporte", breakdown.transport_voucher_deduction),
        ("Faltas", breakdown.absence_deduction),
        ("Outros descontos", breakdown.other_deductions),
    ];

    let mut lines = Vec::new();
    lines.push("PROVENTOS".to_string());
    for (label, value) in earnings {
        lines.push(format!("  {:<20}{:>16}", label, format_currency(value)));
    }
    lines.push(format!("  {:<20}{:>16}", "Total bruto", format_currency(breakdown.gross_pay)));
    lines.push("DESCONTOS".to_string());
    for (label, value) in deductions {
        lines.push(format!("  {:<20}{:>16}", label, format_currency(value)));
    }
    lines.push(format!("  {:<20}{:>16}", "Total descontos", format_currency(breakdown.total_deductions)));
    lines.push(format!("{:<22}{:>16}", "LÍQUIDO", format_currency(breakdown.net_pay)));
    lines.join("\n")
}
