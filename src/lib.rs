//! `debt_payoff` is a Rust library for simulating and optimizing debt
//! repayment across a set of accounts.
//!
//! It provides tools to project amortization trajectories and to compare
//! repayment plans under the two common orderings:
//! - **Snowball**: pay off the smallest balance first, retiring whole
//!   accounts as early as possible.
//! - **Avalanche**: pay off the highest interest rate first, minimizing
//!   total interest paid.
//!
//! The engine runs a single shared month clock across all accounts: every
//! open account accrues interest and pays its minimum, the extra budget goes
//! to the highest-priority open account, and a retired account's minimum
//! cascades to the next account in line the following month. On top of the
//! simulation it offers a minimum-payments-only cost projection and a
//! recommended split of a fixed extra-payment budget.
//!
//! Everything here is pure and synchronous: each entry point is a
//! deterministic function of its inputs with no shared state and no I/O, so
//! calls are safe to run from any thread and cheap to repeat.
//!
//! ## Usage
//!
//! Add `debt_payoff` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! debt_payoff = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then use `compare_strategies` to weigh the two plans for a portfolio:
//!
//! ```rust
//! use debt_payoff::{compare_strategies, AccountId, DebtAccount, EngineConfig};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let accounts = vec![
//!         DebtAccount {
//!             id: AccountId("card".into()),
//!             name: "Rewards card".into(),
//!             balance: dec!(4_500),
//!             annual_rate_pct: dec!(19.99),
//!             minimum_payment: dec!(90),
//!         },
//!         DebtAccount {
//!             id: AccountId("loan".into()),
//!             name: "Car loan".into(),
//!             balance: dec!(11_000),
//!             annual_rate_pct: dec!(6.5),
//!             minimum_payment: dec!(220),
//!         },
//!     ];
//!
//!     match compare_strategies(&accounts, dec!(300), &EngineConfig::default()) {
//!         Ok(comparison) => {
//!             println!("Recommended:    {}", comparison.recommendation);
//!             println!("Interest saved: {:.2}", comparison.interest_saved);
//!             println!("Months saved:   {}", comparison.time_saved_months);
//!         }
//!         Err(e) => {
//!             eprintln!("Error comparing strategies: {}", e);
//!         }
//!     }
//! }
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub mod amortization;
pub mod compare;
pub mod error;
pub mod model;
pub mod optimizer;
pub mod simulator;

pub use amortization::{
    AmortizationSchedule, ScheduleEntry, amortization_schedule, monthly_rate, months_to_payoff,
    total_interest,
};
pub use compare::compare_strategies;
pub use error::EngineError;
pub use model::{
    AccountId, AccountProjection, AllocationRationale, AllocationRecommendation, DebtAccount,
    PayoffPlanEntry, PaymentImpact, ProjectionPoint, Strategy, StrategyComparison, StrategyResult,
};
pub use optimizer::{optimize_allocation, project_interest_cost};
pub use simulator::simulate;

/// Tunable thresholds and caps recognized by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interest saving (currency units) above which avalanche is recommended
    /// over snowball.
    pub interest_threshold: Decimal,
    /// Months of overall time saving above which avalanche is recommended.
    pub time_saved_threshold_months: u32,
    /// Hard cap on simulated months before a run is declared unconverging.
    pub max_simulation_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interest_threshold: dec!(1000),
            time_saved_threshold_months: 6,
            max_simulation_months: 1200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.interest_threshold, dec!(1000));
        assert_eq!(config.time_saved_threshold_months, 6);
        assert_eq!(config.max_simulation_months, 1200);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EngineConfig =
            serde_json::from_str("{\"interest_threshold\": \"250\"}").unwrap();
        assert_eq!(config.interest_threshold, dec!(250));
        assert_eq!(config.max_simulation_months, 1200);
    }
}
