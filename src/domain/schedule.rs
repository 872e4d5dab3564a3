use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds a monetary figure to cents, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    pub month: u32,
    pub payment: Decimal,
    #[serde(rename = "principal")]
    pub principal_portion: Decimal,
    #[serde(rename = "interest")]
    pub interest_portion: Decimal,
    pub remaining_balance: Decimal,
}

/// Ordered month-by-month payment breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: Vec<PaymentScheduleEntry>,
}

impl Schedule {
    pub fn new(entries: Vec<PaymentScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaymentScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaymentScheduleEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&PaymentScheduleEntry> {
        self.entries.last()
    }

    pub fn total_principal(&self) -> Decimal {
        self.entries.iter().map(|e| e.principal_portion).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.entries.iter().map(|e| e.interest_portion).sum()
    }

    /// Remaining balance after the last month, or `None` for an empty schedule.
    pub fn final_balance(&self) -> Option<Decimal> {
        self.entries.last().map(|e| e.remaining_balance)
    }

    /// True when months run contiguously from 1 upwards.
    pub fn is_contiguous(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.month as usize == i + 1)
    }
}

impl IntoIterator for Schedule {
    type Item = PaymentScheduleEntry;
    type IntoIter = std::vec::IntoIter<PaymentScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PaymentScheduleEntry;
    type IntoIter = std::slice::Iter<'a, PaymentScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
