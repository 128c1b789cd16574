use crate::models::{DailyRecord, Period};

/// Keeps the records that fall in one year, or one month of one year.
#[derive(Debug, Clone, Copy)]
pub struct YearMonthFilter {
    period: Period,
}

impl YearMonthFilter {
    pub fn new(period: Period) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Lazily filter `records`, preserving their order.
    pub fn apply<I>(&self, records: I) -> impl Iterator<Item = DailyRecord>
    where
        I: IntoIterator<Item = DailyRecord>,
    {
        let period = self.period;
        records.into_iter().filter(move |record| record.is_in(&period))
    }
}
