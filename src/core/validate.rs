use super::error::ScenarioError;
use super::types::Scenario;

pub const MIN_TIME_HORIZON: u32 = 1;
pub const MAX_TIME_HORIZON: u32 = 50;

const MAX_INTEREST_RATE: f64 = 100.0;
const MIN_GROWTH_RATE: f64 = -100.0;
const MAX_GROWTH_RATE: f64 = 100.0;

impl Scenario {
    /// Checks the data-model preconditions the engine relies on and returns
    /// the first violation found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let rent = &self.rent;
        let buy = &self.buy;
        let assumptions = &self.assumptions;

        for (field, value) in [
            ("monthlyRent", rent.monthly_rent),
            ("utilities", rent.utilities),
            ("rentersInsurance", rent.renters_insurance),
            ("purchasePrice", buy.purchase_price),
            ("downPayment", buy.down_payment),
            ("interestRate", buy.interest_rate),
            ("propertyTax", buy.property_tax),
            ("maintenance", buy.maintenance),
            ("homeInsurance", buy.home_insurance),
            ("annualRentIncrease", assumptions.annual_rent_increase),
            ("annualHomeAppreciation", assumptions.annual_home_appreciation),
            ("annualInvestmentReturn", assumptions.annual_investment_return),
            (
                "annualMaintenanceIncrease",
                assumptions.annual_maintenance_increase,
            ),
            ("annualInsuranceIncrease", assumptions.annual_insurance_increase),
            (
                "annualPropertyTaxIncrease",
                assumptions.annual_property_tax_increase,
            ),
        ] {
            if !value.is_finite() {
                return Err(ScenarioError::NotFinite { field });
            }
        }

        for (field, value) in [
            ("monthlyRent", rent.monthly_rent),
            ("utilities", rent.utilities),
            ("rentersInsurance", rent.renters_insurance),
            ("purchasePrice", buy.purchase_price),
            ("downPayment", buy.down_payment),
            ("propertyTax", buy.property_tax),
            ("maintenance", buy.maintenance),
            ("homeInsurance", buy.home_insurance),
        ] {
            if value < 0.0 {
                return Err(ScenarioError::Negative { field });
            }
        }

        if buy.down_payment > buy.purchase_price {
            return Err(ScenarioError::DownPaymentExceedsPrice {
                down_payment: buy.down_payment,
                purchase_price: buy.purchase_price,
            });
        }

        if buy.loan_term == 0 {
            return Err(ScenarioError::ZeroLoanTerm);
        }

        if !(MIN_TIME_HORIZON..=MAX_TIME_HORIZON).contains(&self.time_horizon) {
            return Err(ScenarioError::HorizonOutOfRange {
                value: self.time_horizon,
                min: MIN_TIME_HORIZON,
                max: MAX_TIME_HORIZON,
            });
        }

        if !(0.0..=MAX_INTEREST_RATE).contains(&buy.interest_rate) {
            return Err(ScenarioError::PercentOutOfRange {
                field: "interestRate",
                min: 0.0,
                max: MAX_INTEREST_RATE,
            });
        }

        for (field, rate) in [
            ("annualRentIncrease", assumptions.annual_rent_increase),
            ("annualHomeAppreciation", assumptions.annual_home_appreciation),
            ("annualInvestmentReturn", assumptions.annual_investment_return),
            (
                "annualMaintenanceIncrease",
                assumptions.annual_maintenance_increase,
            ),
            ("annualInsuranceIncrease", assumptions.annual_insurance_increase),
            (
                "annualPropertyTaxIncrease",
                assumptions.annual_property_tax_increase,
            ),
        ] {
            // -100% would zero the stream out permanently.
            if rate <= MIN_GROWTH_RATE || rate > MAX_GROWTH_RATE {
                return Err(ScenarioError::PercentOutOfRange {
                    field,
                    min: MIN_GROWTH_RATE,
                    max: MAX_GROWTH_RATE,
                });
            }
        }

        Ok(())
    }
}
