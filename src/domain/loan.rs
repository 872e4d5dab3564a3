use crate::error::{Result, SimulationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Longest term accepted by the engine (100 years).
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Loan parameters entered by the user.
///
/// Field names follow the collaborator's wire format. Amount and rate are sent as
/// JSON numbers but accepted back either as numbers or strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Principal borrowed.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    /// Nominal annual interest rate, in percent.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub annual_rate: Decimal,
    /// Term in months.
    pub months: u32,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            amount: dec!(10000),
            annual_rate: dec!(12.5),
            months: 24,
        }
    }
}

impl SimulationRequest {
    pub fn new(amount: Decimal, annual_rate: Decimal, months: u32) -> Self {
        Self {
            amount,
            annual_rate,
            months,
        }
    }

    /// Checks the engine preconditions.
    ///
    /// A rate of exactly zero is accepted and handled as an interest-free loan.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(SimulationError::InvalidParameters(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.annual_rate < Decimal::ZERO || self.annual_rate > Decimal::ONE_HUNDRED {
            return Err(SimulationError::InvalidParameters(format!(
                "annual rate must be within [0, 100], got {}",
                self.annual_rate
            )));
        }
        if self.months == 0 || self.months > MAX_TERM_MONTHS {
            return Err(SimulationError::InvalidParameters(format!(
                "term must be between 1 and {} months, got {}",
                MAX_TERM_MONTHS, self.months
            )));
        }
        Ok(())
    }

    /// Monthly periodic rate as a fraction: `annual_rate / 100 / 12`.
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate / Decimal::ONE_HUNDRED / dec!(12)
    }
}
