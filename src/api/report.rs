use crate::core::{MonthlyCostBreakdown, ProjectionResult, Scenario, Verdict};

/// Whole-dollar amount with thousands separators, e.g. `-$1,437`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn render_table(
    scenario: &Scenario,
    costs: &MonthlyCostBreakdown,
    result: &ProjectionResult,
) -> String {
    let verdict = Verdict::from_break_even(result.break_even_year);
    let mut lines = vec![
        format!(
            "Scenario: {} ({} years)",
            scenario.name, scenario.time_horizon
        ),
        String::new(),
        "Monthly costs".to_string(),
        format!(
            "  Renting  {:>10}  (rent {}, utilities {}, insurance {})",
            format_currency(costs.rent.total),
            format_currency(costs.rent.monthly_rent),
            format_currency(costs.rent.utilities),
            format_currency(costs.rent.renters_insurance),
        ),
        format!(
            "  Buying   {:>10}  (mortgage {}, property tax {}, insurance {}, maintenance {}, utilities {})",
            format_currency(costs.buy.total),
            format_currency(costs.buy.mortgage_payment),
            format_currency(costs.buy.property_tax),
            format_currency(costs.buy.home_insurance),
            format_currency(costs.buy.maintenance),
            format_currency(costs.buy.utilities),
        ),
        String::new(),
        verdict.summary(),
        String::new(),
        format!(
            "{:>4}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}  {:>8}  {:>8}",
            "Year", "Renter NW", "Buyer NW", "Home value", "Mortgage", "Cost diff", "Rent %", "Buy %"
        ),
    ];
    lines.extend(result.years.iter().map(|point| {
        format!(
            "{:>4}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}  {:>8}  {:>8}",
            point.year,
            format_currency(point.renter_net_worth),
            format_currency(point.buyer_net_worth),
            format_currency(point.property_value),
            format_currency(point.remaining_mortgage),
            format_currency(point.cost_difference()),
            format_percent(point.yearly_wealth_change_rent),
            format_percent(point.yearly_wealth_change_buy),
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{monthly_costs, project};

    #[test]
    fn currency_groups_thousands_and_rounds() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_436.94), "$1,437");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(-2_283.3), "-$2,283");
        assert_eq!(format_currency(f64::NAN), "n/a");
    }

    #[test]
    fn percent_uses_one_decimal() {
        assert_eq!(format_percent(22.44), "22.4%");
        assert_eq!(format_percent(-3.0), "-3.0%");
    }

    #[test]
    fn table_lists_costs_verdict_and_every_year() {
        let scenario = Scenario::default();
        let costs = monthly_costs(&scenario);
        let result = project(&scenario);

        let table = render_table(&scenario, &costs, &result);
        assert!(table.contains("Scenario: Default (30 years)"));
        assert!(table.contains("mortgage $1,437"));
        assert!(table.contains("$2,230"));
        assert!(table.contains("Buying comes out ahead from the first year."));
        // Header, 30 rows and the preamble.
        let rows = table
            .lines()
            .filter(|line| line.trim_start().chars().next().is_some_and(|c| c.is_ascii_digit()))
            .count();
        assert_eq!(rows, 30);
    }

    #[test]
    fn table_layout_separates_sections_with_blank_lines() {
        let mut scenario = Scenario::default();
        scenario.time_horizon = 2;
        let costs = monthly_costs(&scenario);
        let result = project(&scenario);

        let table = render_table(&scenario, &costs, &result);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Scenario: Default (2 years)");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Monthly costs");
        assert_eq!(lines[5], "");
        assert_eq!(lines[7], "");
        assert!(lines[8].trim_start().starts_with("Year"));
        assert!(lines[10].trim_start().starts_with('2'));
        assert!(table.ends_with('\n'));
    }
}
