//! Multi-account payoff simulation under a shared month clock.
//!
//! Every open account accrues interest and pays its minimum each month; the
//! pooled extra budget goes to the highest-priority open account, and the
//! minimum of a retired account joins the pool the following month. This is
//! the cascading behavior that makes snowball/avalanche plans realistic: a
//! freed-up minimum is never lost.

use rust_decimal::Decimal;
use tracing::debug;

use crate::EngineConfig;
use crate::amortization::monthly_rate;
use crate::error::EngineError;
use crate::model::{
    AccountId, DebtAccount, PayoffPlanEntry, Strategy, StrategyResult, active_accounts,
};

/// Simulates paying off a set of accounts under the given strategy ordering.
///
/// # Arguments
///
/// * `accounts` - The portfolio; zero-balance accounts are skipped.
/// * `strategy` - Repayment ordering (snowball or avalanche).
/// * `extra_payment` - Monthly budget on top of the minimums, >= 0.
/// * `config` - Engine configuration; only the month cap applies here.
///
/// # Errors
///
/// Returns [`EngineError::NoDebtAccounts`] when no account has a positive
/// balance, [`EngineError::InvalidPayment`] for a negative `extra_payment`
/// or a non-positive minimum on an open account, and
/// [`EngineError::Unconverging`] when the portfolio does not fully amortize
/// within `config.max_simulation_months`.
pub fn simulate(
    accounts: &[DebtAccount],
    strategy: Strategy,
    extra_payment: Decimal,
    config: &EngineConfig,
) -> Result<StrategyResult, EngineError> {
    if extra_payment < Decimal::ZERO {
        return Err(EngineError::InvalidPayment {
            payment: extra_payment,
        });
    }
    let ordered = order_accounts(active_accounts(accounts)?, strategy);
    if ordered.is_empty() {
        return Err(EngineError::NoDebtAccounts);
    }

    let run = run_simulation(&ordered, extra_payment, config.max_simulation_months)?;

    let mut total_interest = Decimal::ZERO;
    let mut overall_payoff_month = 0u32;
    let mut entries = Vec::with_capacity(run.accounts.len());
    for (idx, outcome) in run.accounts.iter().enumerate() {
        total_interest += outcome.interest_accrued;
        overall_payoff_month = overall_payoff_month.max(outcome.payoff_month);
        entries.push(PayoffPlanEntry {
            account_id: outcome.id.clone(),
            order: idx as u32 + 1,
            payoff_month: outcome.payoff_month,
            total_interest_paid: outcome.interest_accrued.round_dp(2),
        });
    }

    Ok(StrategyResult {
        strategy,
        total_interest_paid: total_interest.round_dp(2),
        overall_payoff_month,
        entries,
    })
}

/// Sorts open accounts into the strategy's priority order.
///
/// Snowball: ascending balance, ties by id. Avalanche: descending rate,
/// ties by ascending balance, then id. Both orders are total, so a
/// simulation is deterministic for a given input.
pub(crate) fn order_accounts(
    mut accounts: Vec<&DebtAccount>,
    strategy: Strategy,
) -> Vec<&DebtAccount> {
    match strategy {
        Strategy::Snowball => {
            accounts.sort_by(|a, b| a.balance.cmp(&b.balance).then_with(|| a.id.cmp(&b.id)));
        }
        Strategy::Avalanche => {
            accounts.sort_by(|a, b| {
                b.annual_rate_pct
                    .cmp(&a.annual_rate_pct)
                    .then_with(|| a.balance.cmp(&b.balance))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
    }
    accounts
}

struct SimAccount<'a> {
    account: &'a DebtAccount,
    rate: Decimal,
    balance: Decimal,
    interest_accrued: Decimal,
    payoff_month: Option<u32>,
}

struct AccountOutcome {
    id: AccountId,
    payoff_month: u32,
    interest_accrued: Decimal,
}

/// Payment capacity and usage for one simulated month.
struct MonthFlow {
    /// extra budget + freed minimums + minimums of accounts open this month.
    available: Decimal,
    /// Payments actually applied to balances this month.
    applied: Decimal,
}

struct SimulationRun {
    accounts: Vec<AccountOutcome>,
    months: Vec<MonthFlow>,
}

fn run_simulation(
    ordered: &[&DebtAccount],
    extra_payment: Decimal,
    max_months: u32,
) -> Result<SimulationRun, EngineError> {
    let mut sims: Vec<SimAccount> = ordered
        .iter()
        .map(|account| SimAccount {
            account,
            rate: monthly_rate(account.annual_rate_pct),
            balance: account.balance,
            interest_accrued: Decimal::ZERO,
            payoff_month: None,
        })
        .collect();

    // Minimums of accounts retired in prior months.
    let mut freed = Decimal::ZERO;
    let mut months = Vec::new();

    for month in 1..=max_months {
        let mut available = extra_payment + freed;
        let mut applied = Decimal::ZERO;

        for sim in sims.iter_mut().filter(|s| s.payoff_month.is_none()) {
            let interest = sim.balance * sim.rate;
            sim.balance += interest;
            sim.interest_accrued += interest;
            available += sim.account.minimum_payment;
        }

        // Minimum payments, capped at the remaining balance; the unused
        // slice of a capped minimum joins the pool.
        let mut pool = extra_payment + freed;
        for sim in sims.iter_mut().filter(|s| s.payoff_month.is_none()) {
            let payment = sim.account.minimum_payment.min(sim.balance);
            sim.balance -= payment;
            applied += payment;
            pool += sim.account.minimum_payment - payment;
        }

        // The pool goes to the highest-priority open account; whatever it
        // does not need cascades to the next in line within the same month.
        for sim in sims.iter_mut().filter(|s| s.payoff_month.is_none()) {
            if pool.is_zero() {
                break;
            }
            let payment = pool.min(sim.balance);
            sim.balance -= payment;
            pool -= payment;
            applied += payment;
        }

        for sim in sims.iter_mut().filter(|s| s.payoff_month.is_none()) {
            if sim.balance <= Decimal::ZERO {
                sim.payoff_month = Some(month);
                freed += sim.account.minimum_payment;
                debug!(month, account = %sim.account.id, "account retired");
            }
        }

        months.push(MonthFlow { available, applied });

        if sims.iter().all(|s| s.payoff_month.is_some()) {
            let accounts = sims
                .iter()
                .map(|sim| AccountOutcome {
                    id: sim.account.id.clone(),
                    payoff_month: sim.payoff_month.unwrap_or(month),
                    interest_accrued: sim.interest_accrued,
                })
                .collect();
            return Ok(SimulationRun { accounts, months });
        }
    }

    Err(EngineError::Unconverging { limit: max_months })
}
