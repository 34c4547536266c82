//! Calendar arithmetic for warranty and return end dates

use chrono::{Days, Months, NaiveDate};

/// End date of a warranty: `purchase` plus `months` calendar months.
///
/// Month addition clamps to the last day of a shorter target month
/// (Jan 31 + 1 month = Feb 29 in a leap year). If the calendar cannot
/// produce a date at all, the purchase date is returned unchanged.
pub fn warranty_end_date(purchase: NaiveDate, months: u32) -> NaiveDate {
    purchase
        .checked_add_months(Months::new(months))
        .unwrap_or(purchase)
}

/// End date of a return window: `purchase` plus `days` calendar days.
///
/// Same fallback rule as [`warranty_end_date`].
pub fn return_end_date(purchase: NaiveDate, days: u32) -> NaiveDate {
    purchase
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(purchase)
}
