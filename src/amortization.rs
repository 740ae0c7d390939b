//! Single-account amortization routines.
//!
//! These are the primitives the simulator and optimizer compose: a
//! closed-form payoff-duration formula, an exact total-interest figure, and
//! a lazy month-by-month schedule. Interest is modeled as simple monthly
//! compounding on a declining balance.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Converts an annual interest rate percentage to a monthly decimal rate.
///
/// A rate like 18.99 (% per year) becomes `18.99 / 12 / 100` per month.
pub fn monthly_rate(annual_rate_pct: Decimal) -> Decimal {
    annual_rate_pct / Decimal::from(12) / Decimal::from(100)
}

/// Number of months needed to pay a balance down to zero under a fixed
/// monthly payment.
///
/// Uses the closed-form annuity formula
/// `months = -ln(1 - balance * r / payment) / ln(1 + r)`, rounded up and
/// floored at one month. A zero rate degenerates to `ceil(balance / payment)`.
///
/// # Arguments
///
/// * `balance` - Outstanding principal, as a non-negative magnitude.
/// * `monthly_payment` - Fixed payment applied each month.
/// * `annual_rate_pct` - Annual interest rate as a percentage.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPayment`] when `monthly_payment <= 0`, and
/// [`EngineError::PaymentInsufficient`] when the payment does not exceed the
/// interest accruing in the first month. The insufficiency is checked before
/// the logarithm is taken; the formula is never fed a non-positive argument.
pub fn months_to_payoff(
    balance: Decimal,
    monthly_payment: Decimal,
    annual_rate_pct: Decimal,
) -> Result<u32, EngineError> {
    if balance <= Decimal::ZERO {
        return Ok(0);
    }
    if monthly_payment <= Decimal::ZERO {
        return Err(EngineError::InvalidPayment {
            payment: monthly_payment,
        });
    }

    let r = monthly_rate(annual_rate_pct);
    if r.is_zero() {
        let months = (balance / monthly_payment).ceil();
        return months
            .to_u32()
            .ok_or(EngineError::Unconverging { limit: u32::MAX });
    }

    let monthly_interest = balance * r;
    if monthly_payment <= monthly_interest {
        return Err(EngineError::PaymentInsufficient {
            payment: monthly_payment,
            monthly_interest,
        });
    }

    // ratio is in (0, 1): the check above rejected payment <= balance * r.
    let ratio = Decimal::ONE - monthly_interest / monthly_payment;
    let months = (-ratio.ln() / (Decimal::ONE + r).ln())
        .ceil()
        .max(Decimal::ONE);
    months
        .to_u32()
        .ok_or(EngineError::Unconverging { limit: u32::MAX })
}

/// Total interest accrued while paying a balance down to zero under a fixed
/// monthly payment.
///
/// The figure is exact: it sums the interest portion of every month in the
/// schedule, including the final partial payment, so a zero-rate balance
/// reports exactly zero interest.
///
/// # Errors
///
/// Calls [`months_to_payoff`] first and propagates its failures.
pub fn total_interest(
    balance: Decimal,
    monthly_payment: Decimal,
    annual_rate_pct: Decimal,
) -> Result<Decimal, EngineError> {
    let months = months_to_payoff(balance, monthly_payment, annual_rate_pct)?;
    if months == 0 {
        return Ok(Decimal::ZERO);
    }
    let accrued: Decimal = amortization_schedule(balance, monthly_payment, annual_rate_pct)?
        .map(|entry| entry.interest_portion)
        .sum();
    Ok(accrued.max(Decimal::ZERO))
}

/// A single month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    /// Interest accrued on the balance this month.
    pub interest_portion: Decimal,
    /// Principal retired this month, capped at the remaining balance.
    pub principal_portion: Decimal,
    /// Balance remaining after the payment.
    pub ending_balance: Decimal,
}

/// Lazy month-by-month amortization of a balance under a fixed payment.
///
/// The iterator owns its cursor and carries no shared state: it is cheap to
/// clone, and a clone restarts the projection from month one. It terminates
/// the month the ending balance reaches zero.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    balance: Decimal,
    payment: Decimal,
    rate: Decimal,
    month: u32,
}

impl Iterator for AmortizationSchedule {
    type Item = ScheduleEntry;

    fn next(&mut self) -> Option<ScheduleEntry> {
        if self.balance <= Decimal::ZERO {
            return None;
        }
        self.month += 1;
        let interest_portion = self.balance * self.rate;
        let principal_portion = (self.payment - interest_portion).min(self.balance);
        self.balance -= principal_portion;
        Some(ScheduleEntry {
            month: self.month,
            interest_portion,
            principal_portion,
            ending_balance: self.balance,
        })
    }
}

/// Builds the amortization schedule for a balance under a fixed payment.
///
/// Validation mirrors [`months_to_payoff`]: a schedule that could never
/// terminate is refused up front rather than iterating forever. A
/// zero-or-negative balance yields an empty schedule.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPayment`] when `monthly_payment <= 0`, and
/// [`EngineError::PaymentInsufficient`] when the payment does not exceed the
/// first month's interest.
pub fn amortization_schedule(
    balance: Decimal,
    monthly_payment: Decimal,
    annual_rate_pct: Decimal,
) -> Result<AmortizationSchedule, EngineError> {
    let rate = monthly_rate(annual_rate_pct);
    if balance > Decimal::ZERO {
        if monthly_payment <= Decimal::ZERO {
            return Err(EngineError::InvalidPayment {
                payment: monthly_payment,
            });
        }
        let monthly_interest = balance * rate;
        if !rate.is_zero() && monthly_payment <= monthly_interest {
            return Err(EngineError::PaymentInsufficient {
                payment: monthly_payment,
                monthly_interest,
            });
        }
    }
    Ok(AmortizationSchedule {
        balance: balance.max(Decimal::ZERO),
        payment: monthly_payment,
        rate,
        month: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1200), dec!(100), dec!(0), 12)]
    #[case(dec!(1000), dec!(300), dec!(0), 4)]
    #[case(dec!(10000), dec!(300), dec!(18), 47)]
    #[case(dec!(2000), dec!(100), dec!(24), 26)]
    #[case(dec!(100), dec!(1000), dec!(12), 1)]
    #[case(dec!(0), dec!(100), dec!(18), 0)]
    fn test_months_to_payoff(
        #[case] balance: Decimal,
        #[case] payment: Decimal,
        #[case] rate: Decimal,
        #[case] expected: u32,
    ) {
        assert_eq!(months_to_payoff(balance, payment, rate).unwrap(), expected);
    }

    #[test]
    fn test_months_to_payoff_rejects_non_positive_payment() {
        assert_eq!(
            months_to_payoff(dec!(1000), dec!(0), dec!(12)),
            Err(EngineError::InvalidPayment { payment: dec!(0) })
        );
        assert_eq!(
            months_to_payoff(dec!(1000), dec!(-50), dec!(12)),
            Err(EngineError::InvalidPayment { payment: dec!(-50) })
        );
    }

    #[test]
    fn test_months_to_payoff_detects_insufficient_payment() {
        // 2%/month on 1000 accrues 20 in the first month; 10 can never amortize.
        assert_eq!(
            months_to_payoff(dec!(1000), dec!(10), dec!(24)),
            Err(EngineError::PaymentInsufficient {
                payment: dec!(10),
                monthly_interest: dec!(20),
            })
        );
        // Exactly covering the interest is still insufficient.
        assert!(matches!(
            months_to_payoff(dec!(1000), dec!(20), dec!(24)),
            Err(EngineError::PaymentInsufficient { .. })
        ));
    }

    #[test]
    fn test_total_interest_zero_rate_is_exact() {
        // Final partial payment means no interest at all, not payment * months - balance.
        assert_eq!(total_interest(dec!(1000), dec!(300), dec!(0)).unwrap(), dec!(0));
        assert_eq!(total_interest(dec!(1200), dec!(100), dec!(0)).unwrap(), dec!(0));
    }

    #[test]
    fn test_total_interest_matches_schedule() {
        let interest = total_interest(dec!(10000), dec!(300), dec!(18)).unwrap();
        assert!(interest > dec!(3900) && interest < dec!(4000), "{interest}");

        let from_schedule: Decimal = amortization_schedule(dec!(10000), dec!(300), dec!(18))
            .unwrap()
            .map(|entry| entry.interest_portion)
            .sum();
        assert_eq!(interest, from_schedule);
    }

    #[test]
    fn test_total_interest_propagates_failures() {
        assert!(matches!(
            total_interest(dec!(1000), dec!(10), dec!(24)),
            Err(EngineError::PaymentInsufficient { .. })
        ));
    }

    #[test]
    fn test_schedule_first_months() {
        let mut schedule = amortization_schedule(dec!(1000), dec!(100), dec!(12)).unwrap();

        let first = schedule.next().unwrap();
        assert_eq!(first.month, 1);
        assert_eq!(first.interest_portion, dec!(10));
        assert_eq!(first.principal_portion, dec!(90));
        assert_eq!(first.ending_balance, dec!(910));

        let second = schedule.next().unwrap();
        assert_eq!(second.month, 2);
        assert_eq!(second.interest_portion, dec!(9.10));
        assert_eq!(second.principal_portion, dec!(90.90));
        assert_eq!(second.ending_balance, dec!(819.10));
    }

    #[test]
    fn test_schedule_terminates_with_partial_payment() {
        let entries: Vec<_> = amortization_schedule(dec!(1000), dec!(300), dec!(0))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3].principal_portion, dec!(100));
        assert_eq!(entries[3].ending_balance, dec!(0));
    }

    #[test]
    fn test_schedule_caps_principal_at_balance() {
        let entries: Vec<_> = amortization_schedule(dec!(100), dec!(1000), dec!(12))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].interest_portion, dec!(1));
        assert_eq!(entries[0].principal_portion, dec!(100));
        assert_eq!(entries[0].ending_balance, dec!(0));
    }

    #[test]
    fn test_schedule_is_restartable() {
        let schedule = amortization_schedule(dec!(5000), dec!(150), dec!(18)).unwrap();
        let first: Vec<_> = schedule.clone().collect();
        let second: Vec<_> = schedule.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_schedule_empty_for_paid_off_balance() {
        let mut schedule = amortization_schedule(dec!(0), dec!(100), dec!(18)).unwrap();
        assert!(schedule.next().is_none());
    }

    #[test]
    fn test_schedule_refuses_insufficient_payment() {
        assert!(matches!(
            amortization_schedule(dec!(1000), dec!(10), dec!(24)),
            Err(EngineError::PaymentInsufficient { .. })
        ));
    }
}
