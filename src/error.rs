//! Error taxonomy for the payoff engine.
//!
//! Every failure is pure arithmetic detected at the point of computation;
//! nothing here is transient or retryable. Each variant carries the values
//! the caller needs to present an actionable message.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by the payoff engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A payment was supplied that is zero or negative where a positive
    /// payment is required.
    #[error("invalid payment {payment}: a positive payment is required")]
    InvalidPayment {
        /// The offending payment amount.
        payment: Decimal,
    },

    /// A payment does not exceed the interest accruing on the balance each
    /// month, so the balance can never amortize under it.
    #[error("payment {payment} does not cover the monthly interest {monthly_interest}")]
    PaymentInsufficient {
        /// The supplied monthly payment.
        payment: Decimal,
        /// The interest accruing on the balance in the first month.
        monthly_interest: Decimal,
    },

    /// The multi-account simulation did not retire every balance within the
    /// configured month cap.
    #[error("balances did not reach zero within {limit} months")]
    Unconverging {
        /// The month cap that was exceeded.
        limit: u32,
    },

    /// An operation that requires at least one open debt account was called
    /// with none.
    #[error("at least one debt account with a positive balance is required")]
    NoDebtAccounts,
}
