// Gross-to-net pay slip estimate for a single period.
use shared::models::{PayrollBreakdown, PayrollInputs};

use super::{IncomeTax, SocialSecurity, WithholdingCalculator};
use crate::config::PayrollConfig;

pub struct PayrollEstimator {
    config: PayrollConfig,
    social_security: SocialSecurity,
    income_tax: IncomeTax,
}

impl PayrollEstimator {
    pub fn new(config: PayrollConfig) -> Self {
        let social_security = SocialSecurity::new(config.social_security.clone());
        let income_tax = IncomeTax::new(config.income_tax.clone(), config.dependent_exemption);
        Self {
            config,
            social_security,
            income_tax,
        }
    }

    /// Withholdings in pay slip order: social security first, then income tax.
    pub fn withholdings(&self) -> [&dyn WithholdingCalculator; 2] {
        [&self.social_security, &self.income_tax]
    }

    pub fn hourly_rate(&self, base_salary: f64) -> f64 {
        base_salary / self.config.monthly_hours_divisor
    }

    fn overtime_pay(&self, inputs: &PayrollInputs) -> f64 {
        inputs.overtime_hours * self.hourly_rate(inputs.base_salary) * self.config.overtime_multiplier
    }

    // Differential on top of hours already paid by the salary.
    fn night_shift_pay(&self, inputs: &PayrollInputs) -> f64 {
        inputs.night_shift_hours * self.hourly_rate(inputs.base_salary) * self.config.night_shift_premium
    }

    pub fn compute_gross_pay(&self, inputs: &PayrollInputs) -> f64 {
        inputs.base_salary + self.overtime_pay(inputs) + self.night_shift_pay(inputs) + inputs.commissions
    }

    pub fn compute_social_security_deduction(&self, gross_pay: f64) -> f64 {
        self.social_security.calculate(gross_pay)
    }

    pub fn compute_income_tax_deduction(&self, taxable_base: f64) -> f64 {
        self.income_tax.calculate(taxable_base)
    }

    fn transport_voucher_deduction(&self, inputs: &PayrollInputs) -> f64 {
        if !inputs.deducts_transport_voucher {
            return 0.0;
        }
        let deduction = inputs.base_salary * self.config.transport_voucher_rate;
        match self.config.transport_voucher_cap {
            Some(cap) => deduction.min(cap),
            None => deduction,
        }
    }

    /// Full breakdown. Non-finite inputs count as zero; the net pay is not floored.
    pub fn compute_net_pay(&self, inputs: &PayrollInputs) -> PayrollBreakdown {
        let inputs = inputs.clone().sanitized();

        let hourly_rate = self.hourly_rate(inputs.base_salary);
        let overtime_pay = self.overtime_pay(&inputs);
        let night_shift_pay = self.night_shift_pay(&inputs);
        let gross_pay = self.compute_gross_pay(&inputs);

        let social_security_deduction = self.compute_social_security_deduction(gross_pay);
        let income_tax_base =
            self.income_tax
                .taxable_base(gross_pay, social_security_deduction, inputs.dependent_count);
        let income_tax_deduction = self.compute_income_tax_deduction(income_tax_base);
        let transport_voucher_deduction = self.transport_voucher_deduction(&inputs);
        let absence_deduction = inputs.absence_hours * hourly_rate;

        let total_deductions = social_security_deduction
            + income_tax_deduction
            + transport_voucher_deduction
            + absence_deduction
            + inputs.other_deductions;

        PayrollBreakdown {
            hourly_rate,
            overtime_pay,
            night_shift_pay,
            commissions: inputs.commissions,
            gross_pay,
            social_security_deduction,
            income_tax_base,
            income_tax_deduction,
            transport_voucher_deduction,
            absence_deduction,
            other_deductions: inputs.other_deductions,
            total_deductions,
            net_pay: gross_pay - total_deductions,
        }
    }
}

impl Default for PayrollEstimator {
    fn default() -> Self {
        Self::new(PayrollConfig::default())
    }
}
