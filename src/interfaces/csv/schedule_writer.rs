use crate::domain::schedule::Schedule;
use crate::error::Result;
use rust_decimal::Decimal;
use std::io::Write;

pub const SCHEDULE_HEADER: [&str; 5] = [
    "month",
    "payment",
    "principal",
    "interest",
    "remaining_balance",
];

/// Writes amortization schedules as CSV, one row per month.
///
/// Monetary columns are always rendered with two decimals.
pub struct ScheduleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScheduleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_schedule(&mut self, schedule: &Schedule) -> Result<()> {
        self.writer.write_record(SCHEDULE_HEADER)?;
        for entry in schedule {
            self.writer.write_record([
                entry.month.to_string(),
                money(entry.payment),
                money(entry.principal_portion),
                money(entry.interest_portion),
                money(entry.remaining_balance),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}
