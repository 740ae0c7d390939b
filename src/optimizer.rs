//! Status-quo projection and extra-budget allocation.
//!
//! Both operations deliberately treat accounts in isolation: the projection
//! answers "what does doing nothing cost," and the allocation answers "where
//! does next month's extra dollar go." Neither cascades payments across
//! accounts; that is the simulator's job.

use rust_decimal::Decimal;
use tracing::debug;

use crate::amortization::{amortization_schedule, months_to_payoff, total_interest};
use crate::error::EngineError;
use crate::model::{
    AccountProjection, AllocationRationale, AllocationRecommendation, DebtAccount, PaymentImpact,
    ProjectionPoint, Strategy, active_accounts,
};
use crate::simulator::order_accounts;

/// Projects each account's minimum-payments-only schedule, truncated at the
/// horizon or natural payoff, whichever comes first.
///
/// Zero-balance accounts are skipped; an empty input yields an empty
/// projection.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPayment`] for an open account with a
/// non-positive minimum, and [`EngineError::PaymentInsufficient`] for an
/// account whose minimum cannot amortize its balance, since its status-quo
/// schedule never terminates.
pub fn project_interest_cost(
    accounts: &[DebtAccount],
    horizon_months: u32,
) -> Result<Vec<AccountProjection>, EngineError> {
    let active = active_accounts(accounts)?;
    let mut projections = Vec::with_capacity(active.len());
    for account in active {
        let schedule = amortization_schedule(
            account.balance,
            account.minimum_payment,
            account.annual_rate_pct,
        )?;
        let mut cumulative_interest = Decimal::ZERO;
        let mut points = Vec::new();
        for entry in schedule.take(horizon_months as usize) {
            cumulative_interest += entry.interest_portion;
            points.push(ProjectionPoint {
                month: entry.month,
                balance: entry.ending_balance,
                interest_paid: entry.interest_portion,
                principal_paid: entry.principal_portion,
                cumulative_interest,
            });
        }
        projections.push(AccountProjection {
            account_id: account.id.clone(),
            points,
        });
    }
    Ok(projections)
}

/// Splits a fixed extra-payment budget across accounts.
///
/// The single highest-rate account receives the entire budget on top of its
/// minimum (the mathematically optimal single-shot allocation); every other
/// account keeps its own minimum. Each recommendation carries the
/// account-local effect of paying the recommended amount instead of the
/// minimum.
///
/// # Errors
///
/// Returns [`EngineError::NoDebtAccounts`] when no account has a positive
/// balance (an empty recommendation list is never produced), and
/// [`EngineError::InvalidPayment`] for a negative `extra_payment` or a
/// non-positive minimum on an open account.
pub fn optimize_allocation(
    accounts: &[DebtAccount],
    extra_payment: Decimal,
) -> Result<Vec<AllocationRecommendation>, EngineError> {
    if extra_payment < Decimal::ZERO {
        return Err(EngineError::InvalidPayment {
            payment: extra_payment,
        });
    }
    let active = active_accounts(accounts)?;
    if active.is_empty() {
        return Err(EngineError::NoDebtAccounts);
    }

    let ordered = order_accounts(active, Strategy::Avalanche);
    let mut recommendations = Vec::with_capacity(ordered.len());
    for (idx, account) in ordered.into_iter().enumerate() {
        let (extra_portion, rationale) = if idx == 0 {
            (extra_payment, AllocationRationale::HighestRate)
        } else {
            (Decimal::ZERO, AllocationRationale::MinimumOnly)
        };
        let recommended_payment = account.minimum_payment + extra_portion;
        let impact = payment_impact(account, recommended_payment)?;
        recommendations.push(AllocationRecommendation {
            account_id: account.id.clone(),
            recommended_payment,
            extra_portion,
            rationale,
            impact,
        });
    }
    debug!(
        accounts = recommendations.len(),
        %extra_payment,
        "allocation computed"
    );
    Ok(recommendations)
}

/// Account-local minimum-vs-recommended comparison.
///
/// Returns `None` when the minimum payment cannot amortize the balance on
/// its own: the baseline of the comparison does not exist. Other failures
/// propagate.
fn payment_impact(
    account: &DebtAccount,
    recommended_payment: Decimal,
) -> Result<Option<PaymentImpact>, EngineError> {
    let base_months = match months_to_payoff(
        account.balance,
        account.minimum_payment,
        account.annual_rate_pct,
    ) {
        Ok(months) => months,
        Err(EngineError::PaymentInsufficient { .. }) => return Ok(None),
        Err(e) => return Err(e),
    };
    let base_interest = total_interest(
        account.balance,
        account.minimum_payment,
        account.annual_rate_pct,
    )?;
    let recommended_months =
        months_to_payoff(account.balance, recommended_payment, account.annual_rate_pct)?;
    let recommended_interest =
        total_interest(account.balance, recommended_payment, account.annual_rate_pct)?;

    Ok(Some(PaymentImpact {
        months_saved: base_months.saturating_sub(recommended_months),
        interest_saved: (base_interest - recommended_interest)
            .max(Decimal::ZERO)
            .round_dp(2),
    }))
}
