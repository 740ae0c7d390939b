//! Input records and result view models for the payoff engine.
//!
//! All of these are pure values: inputs are immutable for the duration of a
//! computation, results are constructed fresh on every call and never
//! mutated or persisted by the engine.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Opaque account identifier, unique within a computation run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A debt-bearing account as supplied by the caller.
///
/// The caller normalizes the sign of the debt before handing accounts to the
/// engine, so `balance` is a non-negative magnitude. Accounts with a zero
/// balance are treated as already paid off and excluded from every
/// computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    /// Unique identifier for the account.
    pub id: AccountId,
    /// Display label.
    pub name: String,
    /// Current outstanding principal, >= 0.
    pub balance: Decimal,
    /// Annual interest rate as a percentage (e.g., 18.99 for 18.99%/year).
    pub annual_rate_pct: Decimal,
    /// Required monthly payment, > 0 for any account with a positive balance.
    pub minimum_payment: Decimal,
}

/// Repayment ordering applied by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Pay off the smallest balance first.
    Snowball,
    /// Pay off the highest interest rate first.
    Avalanche,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Snowball => write!(f, "snowball"),
            Strategy::Avalanche => write!(f, "avalanche"),
        }
    }
}

/// Per-account outcome of a strategy simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlanEntry {
    /// The account this entry describes.
    pub account_id: AccountId,
    /// 1-based priority rank under the strategy's ordering.
    pub order: u32,
    /// 1-based month index on which the balance reaches zero.
    ///
    /// Not necessarily non-decreasing in `order`: an account paid minimums
    /// only may still finish before one higher in the priority queue.
    pub payoff_month: u32,
    /// Interest accrued on this account over its lifetime.
    pub total_interest_paid: Decimal,
}

/// Full payoff plan produced by one strategy simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// The strategy that produced this plan.
    pub strategy: Strategy,
    /// Interest summed across all accounts.
    pub total_interest_paid: Decimal,
    /// The month the last account is retired.
    pub overall_payoff_month: u32,
    /// One entry per account, in priority order.
    pub entries: Vec<PayoffPlanEntry>,
}

/// Side-by-side comparison of the two strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    /// Plan under ascending-balance ordering.
    pub snowball: StrategyResult,
    /// Plan under descending-rate ordering.
    pub avalanche: StrategyResult,
    /// The recommended strategy given the configured thresholds.
    pub recommendation: Strategy,
    /// Interest saved by avalanche over snowball (never negative).
    pub interest_saved: Decimal,
    /// Months saved by avalanche over snowball (never negative).
    pub time_saved_months: i64,
}

/// Why an account received its recommended payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationRationale {
    /// Highest-rate account: receives the entire extra budget.
    HighestRate,
    /// Every other account: keeps paying its own minimum.
    MinimumOnly,
}

/// Per-account effect of paying the recommended amount instead of the
/// minimum, computed in isolation (no cross-account cascading).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentImpact {
    /// Months shaved off the account's own payoff.
    pub months_saved: u32,
    /// Interest avoided on the account's own balance.
    pub interest_saved: Decimal,
}

/// Recommended payment for one account under a fixed extra-payment budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecommendation {
    /// The account this recommendation applies to.
    pub account_id: AccountId,
    /// Total monthly payment recommended for the account.
    pub recommended_payment: Decimal,
    /// Portion of the extra budget allocated to the account.
    pub extra_portion: Decimal,
    /// Why the account received this allocation.
    pub rationale: AllocationRationale,
    /// Minimum-vs-recommended comparison; `None` when the account cannot
    /// amortize at its minimum payment alone, so no baseline exists.
    pub impact: Option<PaymentImpact>,
}

/// One month of a minimum-payments-only projection for a single account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based month index.
    pub month: u32,
    /// Balance remaining after the month's payment.
    pub balance: Decimal,
    /// Interest paid this month.
    pub interest_paid: Decimal,
    /// Principal paid this month.
    pub principal_paid: Decimal,
    /// Interest paid from month 1 through this month.
    pub cumulative_interest: Decimal,
}

/// Minimum-payments-only projection for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProjection {
    /// The projected account.
    pub account_id: AccountId,
    /// One point per month, ending at the horizon or natural payoff.
    pub points: Vec<ProjectionPoint>,
}

/// Filters out paid-off accounts and validates the remainder.
///
/// Zero-balance accounts are dropped silently (already retired); any open
/// account with a non-positive minimum payment is rejected.
pub(crate) fn active_accounts(accounts: &[DebtAccount]) -> Result<Vec<&DebtAccount>, EngineError> {
    let mut active = Vec::with_capacity(accounts.len());
    for account in accounts {
        if account.balance <= Decimal::ZERO {
            continue;
        }
        if account.minimum_payment <= Decimal::ZERO {
            return Err(EngineError::InvalidPayment {
                payment: account.minimum_payment,
            });
        }
        active.push(account);
    }
    Ok(active)
}
