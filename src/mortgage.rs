// Mortgage Engine
// Pure payment math: one set of loan parameters in, one result out

use serde::{Deserialize, Serialize};

// ============================================================================
// LOAN PARAMETERS
// ============================================================================

/// Inputs for one mortgage calculation.
///
/// Immutable per calculation; results are recomputed from scratch on every
/// change, never updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Purchase price of the home
    pub home_price: f64,

    /// Cash paid up front (expected <= home_price, not enforced)
    pub down_payment: f64,

    /// Annual interest rate as a percentage (5.0 = 5%)
    pub annual_interest_rate_pct: f64,

    /// Amortization period in years
    pub amortization_years: f64,

    /// Annual property tax
    pub annual_property_tax: f64,

    /// Annual home insurance
    pub annual_insurance: f64,
}

impl Default for LoanParameters {
    fn default() -> Self {
        LoanParameters {
            home_price: 0.0,
            down_payment: 0.0,
            annual_interest_rate_pct: 0.0,
            amortization_years: 25.0,
            annual_property_tax: 0.0,
            annual_insurance: 0.0,
        }
    }
}

// ============================================================================
// MORTGAGE RESULT
// ============================================================================

/// Derived payment figures. No identity of its own - fully determined by the
/// parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    /// Principal borrowed (home_price - down_payment)
    pub loan_amount: f64,

    /// Monthly principal & interest payment
    pub monthly_principal_interest: f64,

    /// Monthly P&I plus prorated tax and insurance
    pub total_monthly_payment: f64,

    /// Interest paid over the full amortization period
    pub total_interest: f64,

    /// Home price + total interest + tax and insurance over the term
    pub total_cost: f64,

    /// Down payment as a percentage of home price.
    /// Non-finite when home_price is 0; formatters render that as zero.
    pub down_payment_percent: f64,
}

/// Compute the full payment breakdown for one set of loan parameters.
///
/// Pure and deterministic: identical inputs always yield identical outputs.
pub fn calculate(params: &LoanParameters) -> MortgageResult {
    let loan_amount = params.home_price - params.down_payment;
    let down_payment_percent = params.down_payment / params.home_price * 100.0;

    let monthly_rate = params.annual_interest_rate_pct / 100.0 / 12.0;
    let payments = params.amortization_years * 12.0;

    let monthly_pi = if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powf(payments);
        loan_amount * (monthly_rate * growth) / (growth - 1.0)
    } else {
        // Zero-rate loans amortize straight-line; the annuity formula would
        // divide by zero here
        loan_amount / payments
    };

    let monthly_tax = params.annual_property_tax / 12.0;
    let monthly_insurance = params.annual_insurance / 12.0;

    let total_interest = monthly_pi * payments - loan_amount;
    let total_cost = params.home_price
        + total_interest
        + params.annual_property_tax * params.amortization_years
        + params.annual_insurance * params.amortization_years;

    MortgageResult {
        loan_amount,
        monthly_principal_interest: monthly_pi,
        total_monthly_payment: monthly_pi + monthly_tax + monthly_insurance,
        total_interest,
        total_cost,
        down_payment_percent,
    }
}

// ============================================================================
// DISPLAY FORMATTING
// ============================================================================

/// Format an amount as whole-dollar currency: "$2,453".
///
/// Display policy is zero decimal places with thousands separators.
/// Non-finite amounts render as "$0" rather than propagating NaN to the UI.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    let rounded = amount.round();
    let grouped = group_thousands(rounded.abs() as u64);

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Insert thousands separators: 1200 -> "1,200"
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a percentage with one decimal place: "20.0%".
/// Non-finite values (down payment on a $0 home) render as "0.0%".
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value)
}

impl MortgageResult {
    /// Formatted loan amount for display
    pub fn loan_amount_display(&self) -> String {
        format_currency(self.loan_amount)
    }

    /// Formatted monthly P&I for display
    pub fn monthly_pi_display(&self) -> String {
        format_currency(self.monthly_principal_interest)
    }

    /// Formatted total monthly payment for display
    pub fn total_monthly_display(&self) -> String {
        format_currency(self.total_monthly_payment)
    }

    /// Formatted total interest for display
    pub fn total_interest_display(&self) -> String {
        format_currency(self.total_interest)
    }

    /// Formatted total cost for display
    pub fn total_cost_display(&self) -> String {
        format_currency(self.total_cost)
    }

    /// Formatted down payment percentage for display
    pub fn down_payment_percent_display(&self) -> String {
        format_percent(self.down_payment_percent)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn reference_params() -> LoanParameters {
        LoanParameters {
            home_price: 450_000.0,
            down_payment: 90_000.0,
            annual_interest_rate_pct: 5.0,
            amortization_years: 25.0,
            annual_property_tax: 3_000.0,
            annual_insurance: 1_200.0,
        }
    }

    #[test]
    fn test_reference_loan() {
        let result = calculate(&reference_params());

        assert!(close(result.loan_amount, 360_000.0, 0.001));
        assert!(close(result.down_payment_percent, 20.0, 0.001));
        assert!(close(result.monthly_principal_interest, 2_104.52, 0.01));
        // P&I + 250/mo tax + 100/mo insurance
        assert!(close(result.total_monthly_payment, 2_454.52, 0.01));
        assert_eq!(result.monthly_pi_display(), "$2,105");
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let params = LoanParameters {
            home_price: 300_000.0,
            down_payment: 60_000.0,
            annual_interest_rate_pct: 0.0,
            amortization_years: 20.0,
            ..Default::default()
        };

        let result = calculate(&params);
        let payments = params.amortization_years * 12.0;

        // At 0% the payments must sum back to exactly the principal
        assert!(close(
            result.monthly_principal_interest * payments,
            result.loan_amount,
            0.000001
        ));
        assert!(close(result.total_interest, 0.0, 0.000001));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let params = reference_params();
        assert_eq!(calculate(&params), calculate(&params));
    }

    #[test]
    fn test_total_cost_includes_tax_and_insurance() {
        let result = calculate(&reference_params());
        let expected = 450_000.0 + result.total_interest + 3_000.0 * 25.0 + 1_200.0 * 25.0;
        assert!(close(result.total_cost, expected, 0.001));
    }

    #[test]
    fn test_zero_home_price_percent_does_not_leak() {
        let params = LoanParameters {
            home_price: 0.0,
            down_payment: 0.0,
            annual_interest_rate_pct: 5.0,
            amortization_years: 25.0,
            ..Default::default()
        };

        let result = calculate(&params);

        // Percent is non-finite but stays contained in its own field
        assert!(!result.down_payment_percent.is_finite());
        assert!(result.loan_amount.is_finite());
        assert!(result.monthly_principal_interest.is_finite());
        assert!(result.total_monthly_payment.is_finite());
        assert_eq!(result.down_payment_percent_display(), "0.0%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(450_000.0), "$450,000");
        assert_eq!(format_currency(2_453.08), "$2,453");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-1_500.0), "-$1,500");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(20.0), "20.0%");
        assert_eq!(format_percent(12.34), "12.3%");
        assert_eq!(format_percent(f64::INFINITY), "0.0%");
    }
}
