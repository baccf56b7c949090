use thiserror::Error;

/// Reasons a scenario cannot be handed to the projection engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScenarioError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be >= 0")]
    Negative { field: &'static str },

    #[error("downPayment ({down_payment}) cannot exceed purchasePrice ({purchase_price})")]
    DownPaymentExceedsPrice {
        down_payment: f64,
        purchase_price: f64,
    },

    #[error("loanTerm must be > 0")]
    ZeroLoanTerm,

    #[error("timeHorizon must be between {min} and {max}, got {value}")]
    HorizonOutOfRange { value: u32, min: u32, max: u32 },

    #[error("{field} must be between {min} and {max}")]
    PercentOutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}
