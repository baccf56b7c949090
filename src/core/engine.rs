use super::mortgage::monthly_payment;
use super::types::{
    BuyMonthlyCosts, MonthlyCostBreakdown, ProjectionResult, RentMonthlyCosts, Scenario,
    YearlyDataPoint,
};

/// Per-run constants derived once from the scenario.
#[derive(Debug, Clone, Copy)]
struct ProjectionPlan {
    monthly_mortgage: f64,
    loan_term: u32,
    interest_rate: f64,
    down_payment: f64,
    utilities: f64,
    renters_insurance: f64,
    rent_growth: f64,
    home_appreciation: f64,
    investment_growth: f64,
    maintenance_growth: f64,
    insurance_growth: f64,
    property_tax_growth: f64,
}

impl ProjectionPlan {
    fn from_scenario(scenario: &Scenario) -> Self {
        let buy = &scenario.buy;
        let assumptions = &scenario.assumptions;
        Self {
            monthly_mortgage: monthly_payment(buy.principal(), buy.interest_rate, buy.loan_term),
            loan_term: buy.loan_term,
            interest_rate: buy.interest_rate,
            down_payment: buy.down_payment,
            utilities: scenario.rent.utilities,
            renters_insurance: scenario.rent.renters_insurance,
            rent_growth: growth_factor(assumptions.annual_rent_increase),
            home_appreciation: growth_factor(assumptions.annual_home_appreciation),
            investment_growth: growth_factor(assumptions.annual_investment_return),
            maintenance_growth: growth_factor(assumptions.annual_maintenance_increase),
            insurance_growth: growth_factor(assumptions.annual_insurance_increase),
            property_tax_growth: growth_factor(assumptions.annual_property_tax_increase),
        }
    }

    fn mortgage_active(&self, year: u32) -> bool {
        year <= self.loan_term
    }
}

/// Running totals carried from one simulated year into the next.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ProjectionState {
    remaining_principal: f64,
    home_value: f64,
    investment_portfolio: f64,
    current_rent: f64,
    current_maintenance: f64,
    current_insurance: f64,
    current_monthly_property_tax: f64,
    rent_cumulative: f64,
    buy_cumulative: f64,
    last_renter_net_worth: Option<f64>,
    last_buyer_net_worth: Option<f64>,
}

impl ProjectionState {
    fn opening(scenario: &Scenario) -> Self {
        let buy = &scenario.buy;
        Self {
            remaining_principal: buy.principal(),
            home_value: buy.purchase_price,
            investment_portfolio: buy.down_payment,
            current_rent: scenario.rent.monthly_rent,
            current_maintenance: buy.maintenance,
            current_insurance: buy.home_insurance,
            current_monthly_property_tax: buy.property_tax / 12.0,
            rent_cumulative: 0.0,
            buy_cumulative: 0.0,
            last_renter_net_worth: None,
            last_buyer_net_worth: None,
        }
    }
}

pub fn project(scenario: &Scenario) -> ProjectionResult {
    let plan = ProjectionPlan::from_scenario(scenario);
    let mut state = ProjectionState::opening(scenario);
    let mut years = Vec::with_capacity(scenario.time_horizon as usize);
    let mut break_even_year = None;

    for year in 1..=scenario.time_horizon {
        let (next_state, point) = advance_year(&plan, state, year);
        if break_even_year.is_none() && point.buyer_net_worth > point.renter_net_worth {
            break_even_year = Some(year);
        }
        years.push(point);
        state = next_state;
    }

    // An early crossing that the renter wins back by the end does not count.
    if let Some(last) = years.last() {
        if last.renter_net_worth > last.buyer_net_worth {
            break_even_year = None;
        }
    }

    log::debug!(
        "projected '{}' over {} years, break-even {:?}",
        scenario.name,
        years.len(),
        break_even_year
    );

    ProjectionResult {
        break_even_year,
        years,
    }
}

/// Monthly cost tables for both paths at today's prices.
pub fn monthly_costs(scenario: &Scenario) -> MonthlyCostBreakdown {
    let rent = &scenario.rent;
    let buy = &scenario.buy;
    let mortgage_payment = monthly_payment(buy.principal(), buy.interest_rate, buy.loan_term);
    let property_tax = buy.property_tax / 12.0;

    MonthlyCostBreakdown {
        rent: RentMonthlyCosts {
            monthly_rent: rent.monthly_rent,
            utilities: rent.utilities,
            renters_insurance: rent.renters_insurance,
            total: rent.monthly_total(),
        },
        buy: BuyMonthlyCosts {
            mortgage_payment,
            property_tax,
            home_insurance: buy.home_insurance,
            maintenance: buy.maintenance,
            utilities: rent.utilities,
            total: mortgage_payment
                + property_tax
                + buy.home_insurance
                + buy.maintenance
                + rent.utilities,
        },
    }
}

fn advance_year(
    plan: &ProjectionPlan,
    state: ProjectionState,
    year: u32,
) -> (ProjectionState, YearlyDataPoint) {
    let mortgage_active = plan.mortgage_active(year);

    let rent_cumulative = state.rent_cumulative + state.current_rent * 12.0;
    let next_rent = state.current_rent * plan.rent_growth;

    let monthly_mortgage = if mortgage_active {
        plan.monthly_mortgage
    } else {
        0.0
    };
    let yearly_mortgage = monthly_mortgage * 12.0;

    // Flat annual interest on the opening balance, not a monthly split.
    let yearly_interest = state.remaining_principal * plan.interest_rate / 100.0;
    let yearly_principal = (yearly_mortgage - yearly_interest)
        .max(0.0)
        .min(state.remaining_principal);
    // Whatever the flat split leaves open at maturity is paid off as a balloon.
    let balance_after_payments = state.remaining_principal - yearly_principal;
    let (balloon_payment, remaining_principal) = if year == plan.loan_term {
        (balance_after_payments, 0.0)
    } else {
        (0.0, balance_after_payments)
    };

    let home_value = state.home_value * plan.home_appreciation;
    let next_maintenance = state.current_maintenance * plan.maintenance_growth;
    let next_insurance = state.current_insurance * plan.insurance_growth;
    let next_property_tax = state.current_monthly_property_tax * plan.property_tax_growth;

    let monthly_buy_cost = monthly_mortgage
        + balloon_payment / 12.0
        + state.current_monthly_property_tax
        + state.current_maintenance
        + state.current_insurance
        + plan.utilities;
    let monthly_rent_cost = state.current_rent + plan.utilities + plan.renters_insurance;
    let monthly_savings = monthly_buy_cost - monthly_rent_cost;
    let investment_portfolio =
        state.investment_portfolio * plan.investment_growth + monthly_savings * 12.0;

    let buy_cumulative = state.buy_cumulative
        + (state.current_maintenance
            + state.current_insurance
            + state.current_monthly_property_tax)
            * 12.0;

    let buyer_net_worth = home_value - remaining_principal;
    let renter_net_worth = investment_portfolio;

    let point = YearlyDataPoint {
        year,
        rent_cumulative,
        buy_cumulative,
        buyer_net_worth,
        renter_net_worth,
        property_value: home_value,
        remaining_mortgage: remaining_principal,
        investment_portfolio,
        equity_buildup: buyer_net_worth - plan.down_payment,
        yearly_wealth_change_rent: percent_change(state.last_renter_net_worth, renter_net_worth),
        yearly_wealth_change_buy: percent_change(state.last_buyer_net_worth, buyer_net_worth),
    };

    let next_state = ProjectionState {
        remaining_principal,
        home_value,
        investment_portfolio,
        current_rent: next_rent,
        current_maintenance: next_maintenance,
        current_insurance: next_insurance,
        current_monthly_property_tax: next_property_tax,
        rent_cumulative,
        buy_cumulative,
        last_renter_net_worth: Some(renter_net_worth),
        last_buyer_net_worth: Some(buyer_net_worth),
    };

    (next_state, point)
}

fn growth_factor(annual_percent: f64) -> f64 {
    1.0 + annual_percent / 100.0
}

fn percent_change(prior: Option<f64>, current: f64) -> f64 {
    match prior {
        Some(prior) if prior != 0.0 => (current - prior) / prior.abs() * 100.0,
        _ => 0.0,
    }
}
