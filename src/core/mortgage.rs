/// Fixed monthly payment that amortizes `principal` over `term_years` at an
/// annual rate given as a whole-number percent.
///
/// A zero or vanishingly small rate falls back to straight-line repayment,
/// `principal / n`.
/// Negative principal or rate is clamped to zero and a zero term is treated
/// as a single payment period.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let principal = principal.max(0.0);
    let annual_rate_percent = annual_rate_percent.max(0.0);
    let payments = (term_years.saturating_mul(12)).max(1) as f64;

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate * payments < 1e-9 {
        return principal / payments;
    }

    // (1 + r)^n - 1 without cancellation for small r.
    let growth_minus_one = (payments * monthly_rate.ln_1p()).exp_m1();
    if growth_minus_one <= f64::EPSILON {
        return principal / payments;
    }
    principal * monthly_rate * (growth_minus_one + 1.0) / growth_minus_one
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn baseline_thirty_year_loan_matches_published_payment() {
        assert_approx_tol(monthly_payment(320_000.0, 3.5, 30), 1_436.94, 0.01);
    }

    #[test]
    fn six_percent_fifteen_year_loan() {
        // 200k @ 6% / 15y is a standard table value.
        assert_approx_tol(monthly_payment(200_000.0, 6.0, 15), 1_687.71, 0.01);
    }

    #[test]
    fn zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(360_000.0, 0.0, 30), 1_000.0);
        assert_eq!(monthly_payment(120_000.0, 0.0, 10), 1_000.0);
    }

    #[test]
    fn zero_principal_pays_nothing() {
        assert_eq!(monthly_payment(0.0, 5.0, 30), 0.0);
        assert_eq!(monthly_payment(0.0, 0.0, 30), 0.0);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        assert_eq!(monthly_payment(-10_000.0, 5.0, 30), 0.0);
        assert_eq!(monthly_payment(12_000.0, -3.0, 1), 1_000.0);
    }

    #[test]
    fn zero_term_does_not_divide_by_zero() {
        let payment = monthly_payment(10_000.0, 0.0, 0);
        assert_eq!(payment, 10_000.0);
        assert!(monthly_payment(10_000.0, 5.0, 0).is_finite());
    }

    #[test]
    fn tiny_rates_stay_finite_and_approach_straight_line() {
        for rate in [1e-300, 1e-15, 1e-13, 1e-9, 1e-7] {
            let payment = monthly_payment(320_000.0, rate, 30);
            assert!(payment.is_finite(), "rate {rate} gave {payment}");
            assert_approx_tol(payment, 320_000.0 / 360.0, 1e-3);
        }
    }

    #[test]
    fn small_rate_agrees_with_closed_form() {
        // 0.01% over 30 years: r = 1e-4 / 12, n = 360.
        let r: f64 = 1e-4 / 12.0;
        let growth = (1.0 + r).powi(360);
        let expected = 320_000.0 * r * growth / (growth - 1.0);
        assert_approx_tol(monthly_payment(320_000.0, 0.01, 30), expected, 1e-6);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_payment_is_finite_and_covers_first_month_interest(
            principal in 0u32..2_000_000,
            rate_bp in 0u32..2_000,
            term in 1u32..41
        ) {
            let principal = principal as f64;
            let rate = rate_bp as f64 / 100.0;
            let payment = monthly_payment(principal, rate, term);
            prop_assert!(payment.is_finite());
            prop_assert!(payment >= 0.0);
            prop_assert!(payment + 1e-9 >= principal * rate / 100.0 / 12.0);
            prop_assert!(payment * (term * 12) as f64 + 1e-6 >= principal);
        }
    }
}
