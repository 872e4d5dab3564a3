//! Fixed-payment (annuity) amortization.

use crate::domain::loan::SimulationRequest;
use crate::domain::schedule::{PaymentScheduleEntry, Schedule, round_money};
use crate::error::{Result, SimulationError};
use rust_decimal::{Decimal, MathematicalOps};

/// Computes the month-by-month schedule for a loan.
///
/// The running balance is carried at full precision; figures are rounded to cents
/// only when a row is emitted. Each row's principal is the drop of the displayed
/// balance, so the principal column sums to the rounded amount and the last row
/// (which absorbs the residue) always ends at a zero balance.
///
/// The payment column is therefore level only to the cent: before the last row,
/// every displayed payment is within one cent of the rounded level payment.
pub fn compute_schedule(
    amount: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Schedule> {
    compute_schedule_for(&SimulationRequest::new(amount, annual_rate_percent, term_months))
}

pub fn compute_schedule_for(request: &SimulationRequest) -> Result<Schedule> {
    request.validate()?;

    let amount = request.amount;
    let term = request.months;
    let rate = request.monthly_rate();
    let payment = level_payment(amount, rate, term)?;

    let mut balance = amount;
    let mut shown_balance = round_money(amount);
    let mut entries = Vec::with_capacity(term as usize);

    for month in 1..=term {
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| overflow("interest"))?;
        let principal = if month == term {
            balance
        } else {
            payment - interest
        };
        balance -= principal;

        let next_shown = round_money(balance);
        let principal_portion = shown_balance - next_shown;
        let interest_portion = round_money(interest);

        entries.push(PaymentScheduleEntry {
            month,
            payment: principal_portion + interest_portion,
            principal_portion,
            interest_portion,
            remaining_balance: next_shown,
        });
        shown_balance = next_shown;
    }

    Ok(Schedule::new(entries))
}

/// `amount * r / (1 - (1 + r)^-n)`, or `amount / n` for an interest-free loan.
///
/// A rate too small to separate `(1 + r)^-n` from one is treated as zero.
fn level_payment(amount: Decimal, rate: Decimal, term: u32) -> Result<Decimal> {
    let straight_line = amount / Decimal::from(term);
    if rate.is_zero() {
        return Ok(straight_line);
    }

    let discount = (Decimal::ONE / (Decimal::ONE + rate)).powu(u64::from(term));
    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        return Ok(straight_line);
    }

    amount
        .checked_mul(rate)
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or_else(|| overflow("payment"))
}

fn overflow(what: &str) -> SimulationError {
    SimulationError::InvalidParameters(format!("{what} exceeds representable range"))
}
