//! Property tests for the engine's arithmetic guarantees.

use debt_payoff::{
    AccountId, DebtAccount, EngineConfig, compare_strategies, months_to_payoff, total_interest,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds an account whose minimum payment always exceeds the first month's
/// interest by at least 1% of the starting balance, so every generated
/// portfolio amortizes well inside the default month cap.
fn converging_account(idx: usize, balance: u32, rate_bp: u32, slack: u32) -> DebtAccount {
    let balance = Decimal::from(balance);
    let rate = Decimal::new(i64::from(rate_bp), 2);
    let monthly_interest = balance * rate / dec!(1200);
    let minimum = monthly_interest.ceil() + (balance / dec!(100)).ceil() + Decimal::from(slack);
    DebtAccount {
        id: AccountId(format!("acct{idx}")),
        name: format!("Account {idx}"),
        balance,
        annual_rate_pct: rate,
        minimum_payment: minimum,
    }
}

proptest! {
    #[test]
    fn months_to_payoff_is_monotonic_in_payment(
        balance in 500u32..50_000,
        rate_bp in 0u32..3_000,
        base_slack in 1u32..500,
        bump in 1u32..2_000,
    ) {
        let balance = Decimal::from(balance);
        let rate = Decimal::new(i64::from(rate_bp), 2);
        let monthly_interest = balance * rate / dec!(1200);
        let lower = monthly_interest.ceil() + Decimal::from(base_slack);
        let higher = lower + Decimal::from(bump);

        let slow = months_to_payoff(balance, lower, rate).unwrap();
        let fast = months_to_payoff(balance, higher, rate).unwrap();
        prop_assert!(fast <= slow);
    }

    #[test]
    fn zero_rate_payoff_is_exact(balance in 1u32..20_000, payment in 1u32..5_000) {
        let months = months_to_payoff(
            Decimal::from(balance),
            Decimal::from(payment),
            dec!(0),
        )
        .unwrap();
        prop_assert_eq!(months, balance.div_ceil(payment));

        let interest = total_interest(
            Decimal::from(balance),
            Decimal::from(payment),
            dec!(0),
        )
        .unwrap();
        prop_assert_eq!(interest, dec!(0));
    }

    #[test]
    fn avalanche_dominates_snowball(
        specs in prop::collection::vec((100u32..20_000, 0u32..3_000, 1u32..200), 2..5),
        extra in 0u32..500,
    ) {
        let accounts: Vec<DebtAccount> = specs
            .iter()
            .enumerate()
            .map(|(idx, &(balance, rate_bp, slack))| converging_account(idx, balance, rate_bp, slack))
            .collect();
        let extra = Decimal::from(extra);
        let config = EngineConfig::default();

        let comparison = compare_strategies(&accounts, extra, &config).unwrap();
        prop_assert!(
            comparison.avalanche.total_interest_paid <= comparison.snowball.total_interest_paid
        );
        prop_assert!(
            comparison.avalanche.overall_payoff_month <= comparison.snowball.overall_payoff_month
        );
        prop_assert!(comparison.interest_saved >= dec!(0));
        prop_assert!(comparison.time_saved_months >= 0);
    }

    #[test]
    fn engine_calls_are_idempotent(
        specs in prop::collection::vec((100u32..10_000, 0u32..2_500, 1u32..150), 1..4),
        extra in 0u32..300,
    ) {
        let accounts: Vec<DebtAccount> = specs
            .iter()
            .enumerate()
            .map(|(idx, &(balance, rate_bp, slack))| converging_account(idx, balance, rate_bp, slack))
            .collect();
        let extra = Decimal::from(extra);
        let config = EngineConfig::default();

        let first = compare_strategies(&accounts, extra, &config).unwrap();
        let second = compare_strategies(&accounts, extra, &config).unwrap();
        prop_assert_eq!(first, second);
    }
}
