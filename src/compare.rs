//! Side-by-side comparison of the two repayment orderings.

use rust_decimal::Decimal;
use tracing::debug;

use crate::EngineConfig;
use crate::error::EngineError;
use crate::model::{DebtAccount, Strategy, StrategyComparison};
use crate::simulator::simulate;

/// Runs both strategies over the same portfolio and recommends one.
///
/// Avalanche never pays more interest or finishes later than snowball under
/// this simulation, so both savings figures are non-negative. Avalanche is
/// recommended only when a saving exceeds its configured threshold;
/// otherwise the recommendation is snowball, the ordering that retires whole
/// accounts soonest and keeps the user motivated.
///
/// # Errors
///
/// Propagates the failures of [`simulate`].
pub fn compare_strategies(
    accounts: &[DebtAccount],
    extra_payment: Decimal,
    config: &EngineConfig,
) -> Result<StrategyComparison, EngineError> {
    let snowball = simulate(accounts, Strategy::Snowball, extra_payment, config)?;
    let avalanche = simulate(accounts, Strategy::Avalanche, extra_payment, config)?;

    let interest_saved = snowball.total_interest_paid - avalanche.total_interest_paid;
    let time_saved_months =
        i64::from(snowball.overall_payoff_month) - i64::from(avalanche.overall_payoff_month);

    let recommendation = if interest_saved > config.interest_threshold
        || time_saved_months > i64::from(config.time_saved_threshold_months)
    {
        Strategy::Avalanche
    } else {
        Strategy::Snowball
    };
    debug!(
        %interest_saved,
        time_saved_months,
        recommendation = %recommendation,
        "strategies compared"
    );

    Ok(StrategyComparison {
        snowball,
        avalanche,
        recommendation,
        interest_saved,
        time_saved_months,
    })
}
