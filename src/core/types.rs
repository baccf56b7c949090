use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentScenario {
    pub monthly_rent: f64,
    pub utilities: f64,
    pub renters_insurance: f64,
}

impl RentScenario {
    pub fn monthly_total(&self) -> f64 {
        self.monthly_rent + self.utilities + self.renters_insurance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyScenario {
    pub purchase_price: f64,
    pub down_payment: f64,
    /// Annual rate as a whole-number percent, `6.0` is 6%.
    pub interest_rate: f64,
    pub loan_term: u32,
    /// Annual amount.
    pub property_tax: f64,
    pub maintenance: f64,
    pub home_insurance: f64,
}

impl BuyScenario {
    pub fn principal(&self) -> f64 {
        (self.purchase_price - self.down_payment).max(0.0)
    }

    pub fn down_payment_percent(&self) -> f64 {
        if self.purchase_price == 0.0 {
            return 0.0;
        }
        self.down_payment / self.purchase_price * 100.0
    }

    pub fn set_down_payment_percent(&mut self, percent: f64) {
        self.down_payment = self.purchase_price * percent / 100.0;
    }
}

/// Annual growth rates, all whole-number percentages. Negative means decline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAssumptions {
    pub annual_rent_increase: f64,
    pub annual_home_appreciation: f64,
    pub annual_investment_return: f64,
    pub annual_maintenance_increase: f64,
    pub annual_insurance_increase: f64,
    pub annual_property_tax_increase: f64,
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            annual_rent_increase: 3.0,
            annual_home_appreciation: 4.0,
            annual_investment_return: 7.0,
            annual_maintenance_increase: 2.0,
            annual_insurance_increase: 3.0,
            annual_property_tax_increase: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub time_horizon: u32,
    pub rent: RentScenario,
    pub buy: BuyScenario,
    pub assumptions: MarketAssumptions,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            time_horizon: 30,
            rent: RentScenario {
                monthly_rent: 2_000.0,
                utilities: 200.0,
                renters_insurance: 30.0,
            },
            buy: BuyScenario {
                purchase_price: 400_000.0,
                down_payment: 80_000.0,
                interest_rate: 3.5,
                loan_term: 30,
                property_tax: 4_000.0,
                maintenance: 300.0,
                home_insurance: 150.0,
            },
            assumptions: MarketAssumptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyDataPoint {
    pub year: u32,
    pub rent_cumulative: f64,
    pub buy_cumulative: f64,
    pub buyer_net_worth: f64,
    pub renter_net_worth: f64,
    pub property_value: f64,
    pub remaining_mortgage: f64,
    pub investment_portfolio: f64,
    pub equity_buildup: f64,
    pub yearly_wealth_change_rent: f64,
    pub yearly_wealth_change_buy: f64,
}

impl YearlyDataPoint {
    /// Cumulative non-mortgage buying cost minus cumulative rent.
    pub fn cost_difference(&self) -> f64 {
        self.buy_cumulative - self.rent_cumulative
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub break_even_year: Option<u32>,
    pub years: Vec<YearlyDataPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentMonthlyCosts {
    pub monthly_rent: f64,
    pub utilities: f64,
    pub renters_insurance: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyMonthlyCosts {
    pub mortgage_payment: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub maintenance: f64,
    pub utilities: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCostBreakdown {
    pub rent: RentMonthlyCosts,
    pub buy: BuyMonthlyCosts,
}

impl MonthlyCostBreakdown {
    /// Positive when buying costs more per month than renting.
    pub fn monthly_difference(&self) -> f64 {
        self.buy.total - self.rent.total
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Verdict {
    BuyingWinsOutright,
    BreakEven { year: u32 },
    RentingWins,
}

impl Verdict {
    pub fn from_break_even(break_even_year: Option<u32>) -> Self {
        match break_even_year {
            Some(year) if year <= 1 => Verdict::BuyingWinsOutright,
            Some(year) => Verdict::BreakEven { year },
            None => Verdict::RentingWins,
        }
    }

    pub fn summary(self) -> String {
        match self {
            Verdict::BuyingWinsOutright => {
                "Buying comes out ahead from the first year.".to_string()
            }
            Verdict::BreakEven { year } => {
                format!("Buying will break even with renting in approximately {year} years.")
            }
            Verdict::RentingWins => {
                "Renting and investing the difference stays ahead over this horizon.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_payment_percent_round_trips_through_price() {
        let mut buy = Scenario::default().buy;
        assert_eq!(buy.down_payment_percent(), 20.0);
        assert_eq!(buy.principal(), 320_000.0);

        buy.set_down_payment_percent(25.0);
        assert_eq!(buy.down_payment, 100_000.0);
    }

    #[test]
    fn down_payment_percent_of_free_home_is_zero() {
        let mut buy = Scenario::default().buy;
        buy.purchase_price = 0.0;
        buy.down_payment = 0.0;
        assert_eq!(buy.down_payment_percent(), 0.0);
    }

    #[test]
    fn verdict_follows_break_even_year() {
        assert_eq!(Verdict::from_break_even(None), Verdict::RentingWins);
        assert_eq!(
            Verdict::from_break_even(Some(1)),
            Verdict::BuyingWinsOutright
        );
        assert_eq!(
            Verdict::from_break_even(Some(7)),
            Verdict::BreakEven { year: 7 }
        );
        assert!(Verdict::BreakEven { year: 7 }.summary().contains("7 years"));
    }

    #[test]
    fn cost_difference_is_buy_minus_rent() {
        let point = YearlyDataPoint {
            year: 1,
            rent_cumulative: 24_000.0,
            buy_cumulative: 9_400.0,
            buyer_net_worth: 0.0,
            renter_net_worth: 0.0,
            property_value: 0.0,
            remaining_mortgage: 0.0,
            investment_portfolio: 0.0,
            equity_buildup: 0.0,
            yearly_wealth_change_rent: 0.0,
            yearly_wealth_change_buy: 0.0,
        };
        assert_eq!(point.cost_difference(), -14_600.0);
    }
}
