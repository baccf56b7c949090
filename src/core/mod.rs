mod engine;
mod error;
mod mortgage;
mod types;
mod validate;

pub use engine::{monthly_costs, project};
pub use error::ScenarioError;
pub use mortgage::monthly_payment;
pub use types::{
    BuyMonthlyCosts, BuyScenario, MarketAssumptions, MonthlyCostBreakdown, ProjectionResult,
    RentMonthlyCosts, RentScenario, Scenario, Verdict, YearlyDataPoint,
};
pub use validate::{MAX_TIME_HORIZON, MIN_TIME_HORIZON};
