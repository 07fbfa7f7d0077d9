use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::consts::{MAX_TIMESTAMP_MILLIS, MONTHS_IN_YEAR};
use crate::types::{DateValue, Mode, MonthRef, days_in_month};
use crate::DateError;

/// Calendar field access for one picker session.
///
/// Every read and write goes through the [`Mode`] captured at construction, so
/// all dates handled by one `DateUtils` agree on where a day starts and ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateUtils {
    mode: Mode,
}

impl DateUtils {
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub const fn utc() -> Self {
        Self::new(Mode::Utc)
    }

    pub const fn local() -> Self {
        Self::new(Mode::Local)
    }

    pub const fn from_use_utc(use_utc: bool) -> Self {
        Self::new(Mode::from_use_utc(use_utc))
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    fn naive(&self, date: &DateValue) -> NaiveDateTime {
        self.mode.to_naive(date)
    }

    pub fn full_year(&self, date: &DateValue) -> i32 {
        self.naive(date).year()
    }

    /// Month of `date`, 0-based.
    pub fn month(&self, date: &DateValue) -> u32 {
        self.naive(date).month0()
    }

    /// Day of the month, 1-based.
    pub fn day_of_month(&self, date: &DateValue) -> u32 {
        self.naive(date).day()
    }

    /// Day of the week, 0 for Sunday.
    pub fn weekday(&self, date: &DateValue) -> u32 {
        self.naive(date).weekday().num_days_from_sunday()
    }

    pub fn hours(&self, date: &DateValue) -> u32 {
        self.naive(date).hour()
    }

    pub fn minutes(&self, date: &DateValue) -> u32 {
        self.naive(date).minute()
    }

    /// Sets the year, keeping month, day and time. Feb 29 rolls to Mar 1 in a
    /// non-leap year.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn set_full_year(&self, date: &mut DateValue, year: i32) -> Result<(), DateError> {
        let naive = self.naive(date);
        self.write(date, year, i64::from(naive.month0()), i64::from(naive.day()), naive.time())
    }

    /// Sets the 0-based month. Values outside `0..12` move across years and
    /// day overflow moves into the following month.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn set_month(&self, date: &mut DateValue, month: i64) -> Result<(), DateError> {
        let naive = self.naive(date);
        self.write(date, naive.year(), month, i64::from(naive.day()), naive.time())
    }

    /// Sets the day of the month. 0 is the last day of the previous month and
    /// values past the month's end continue into the next one.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn set_date(&self, date: &mut DateValue, day: i64) -> Result<(), DateError> {
        let naive = self.naive(date);
        self.write(date, naive.year(), i64::from(naive.month0()), day, naive.time())
    }

    fn write(
        &self,
        date: &mut DateValue,
        year: i32,
        month: i64,
        day: i64,
        time: NaiveTime,
    ) -> Result<(), DateError> {
        let naive = normalized(year, month, day)
            .map(|d| d.and_time(time))
            .ok_or(DateError::OutOfRange)?;
        *date = self.mode.from_naive(&naive).ok_or(DateError::OutOfRange)?;
        Ok(())
    }

    /// Midnight of a calendar date in this mode; month is 0-based and day
    /// overflow is normalized like [`set_date`](Self::set_date).
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn make_date(&self, year: i32, month: i64, day: i64) -> Result<DateValue, DateError> {
        let naive = normalized(year, month, day)
            .map(|d| d.and_time(NaiveTime::MIN))
            .ok_or(DateError::OutOfRange)?;
        self.mode.from_naive(&naive).ok_or(DateError::OutOfRange)
    }

    /// Whether both instants fall on the same calendar day in this mode.
    pub fn compare_dates(&self, first: &DateValue, second: &DateValue) -> bool {
        self.naive(first).date() == self.naive(second).date()
    }

    /// Abbreviated weekday name of `date`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidWeekday` if `days` has no entry for the weekday.
    pub fn day_name_abbr<'a>(&self, date: &DateValue, days: &'a [String]) -> Result<&'a str, DateError> {
        let index = self.weekday(date) as usize;
        days.get(index)
            .map(String::as_str)
            .ok_or(DateError::InvalidWeekday(index))
    }

    /// Full month name for a month index or the month of a date.
    ///
    /// # Errors
    /// Returns `DateError::MissingNames` if `months` is `None` and
    /// `DateError::InvalidMonth` if the month has no entry.
    pub fn month_name<'a>(
        &self,
        month: impl Into<MonthRef>,
        months: Option<&'a [String]>,
    ) -> Result<&'a str, DateError> {
        let months = months.ok_or(DateError::MissingNames("months"))?;
        self.lookup_month(month.into(), months)
    }

    /// Abbreviated month name for a month index or the month of a date.
    ///
    /// # Errors
    /// Returns `DateError::MissingNames` if `months_abbr` is `None` and
    /// `DateError::InvalidMonth` if the month has no entry.
    pub fn month_name_abbr<'a>(
        &self,
        month: impl Into<MonthRef>,
        months_abbr: Option<&'a [String]>,
    ) -> Result<&'a str, DateError> {
        let months_abbr = months_abbr.ok_or(DateError::MissingNames("abbreviated months"))?;
        self.lookup_month(month.into(), months_abbr)
    }

    fn lookup_month<'a>(&self, month: MonthRef, names: &'a [String]) -> Result<&'a str, DateError> {
        let index = match month {
            MonthRef::Index(index) => index,
            MonthRef::Date(date) => self.month(&date) as usize,
        };
        names
            .get(index)
            .filter(|_| index < MONTHS_IN_YEAR)
            .map(String::as_str)
            .ok_or(DateError::InvalidMonth(index))
    }

    /// Every calendar day from `start` to `end` inclusive, stepping one day at
    /// a time in this mode. Empty when `start > end`.
    pub fn create_date_array(&self, start: &DateValue, end: &DateValue) -> Vec<DateValue> {
        let mut dates = Vec::new();
        let mut current = *start;
        while current <= *end {
            dates.push(current);
            let next_day = i64::from(self.day_of_month(&current)) + 1;
            if self.set_date(&mut current, next_day).is_err() {
                break;
            }
        }
        dates
    }

    /// Zeroes the time of day in this mode, in place, and returns the result.
    pub fn reset_date_time(&self, date: &mut DateValue) -> DateValue {
        let midnight = self.naive(date).date().and_time(NaiveTime::MIN);
        if let Some(reset) = self.mode.from_naive(&midnight) {
            *date = reset;
        }
        *date
    }

    /// A copy of `source` (or the current instant) with the time zeroed.
    pub fn new_date_object(&self, source: Option<&DateValue>) -> DateValue {
        let mut date = source.copied().unwrap_or_else(Utc::now);
        self.reset_date_time(&mut date)
    }

    /// Days in `month` (0-based) of `year`.
    ///
    /// # Panics
    /// Panics if `month` is 12 or more.
    pub fn days_in_month(&self, year: i32, month: u32) -> u32 {
        days_in_month(year, month)
    }
}

/// Whether a millisecond timestamp names a representable instant.
pub fn is_valid_date(timestamp_ms: f64) -> bool {
    timestamp_ms.is_finite() && timestamp_ms.abs() <= MAX_TIMESTAMP_MILLIS
}

/// Instant for a millisecond timestamp.
///
/// `None` when the timestamp is not a valid date or lies past chrono's
/// representable range (about ±8.2e15 ms), which is narrower than the
/// ±8.64e15 ms accepted by [`is_valid_date`].
#[allow(clippy::cast_possible_truncation)]
pub fn date_from_timestamp(timestamp_ms: f64) -> Option<DateValue> {
    if !is_valid_date(timestamp_ms) {
        return None;
    }
    DateTime::from_timestamp_millis(timestamp_ms.trunc() as i64)
}

/// English ordinal suffix for a day of the month.
pub const fn nth_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Calendar date for a year, 0-based month and 1-based day, normalizing
/// overflow in either field.
fn normalized(year: i32, month: i64, day: i64) -> Option<NaiveDate> {
    let months = MONTHS_IN_YEAR as i64;
    let year = i32::try_from(i64::from(year) + month.div_euclid(months)).ok()?;
    let month = u32::try_from(month.rem_euclid(months) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixed, utc, utc_hm};
    use crate::LanguageDescriptor;

    #[test]
    fn test_field_accessors_utc() {
        let utils = DateUtils::utc();
        let date = utc_hm(2024, 3, 9, 14, 45);
        assert_eq!(utils.full_year(&date), 2024);
        assert_eq!(utils.month(&date), 2);
        assert_eq!(utils.day_of_month(&date), 9);
        assert_eq!(utils.weekday(&date), 6);
        assert_eq!(utils.hours(&date), 14);
        assert_eq!(utils.minutes(&date), 45);
    }

    #[test]
    fn test_field_accessors_follow_mode() {
        // 2024-01-01T02:00Z is still New Year's Eve at UTC-05:00
        let date = utc_hm(2024, 1, 1, 2, 0);
        let local = DateUtils::new(fixed(-5));
        assert_eq!(local.full_year(&date), 2023);
        assert_eq!(local.month(&date), 11);
        assert_eq!(local.day_of_month(&date), 31);
        assert_eq!(local.hours(&date), 21);

        let utils = DateUtils::utc();
        assert_eq!(utils.full_year(&date), 2024);
        assert_eq!(utils.day_of_month(&date), 1);
    }

    #[test]
    fn test_set_date_normalizes() {
        let utils = DateUtils::utc();

        let mut date = utc(2024, 1, 31);
        utils.set_date(&mut date, 32).unwrap();
        assert_eq!(date, utc(2024, 2, 1));

        let mut date = utc(2024, 3, 10);
        utils.set_date(&mut date, 0).unwrap();
        assert_eq!(date, utc(2024, 2, 29));
    }

    #[test]
    fn test_set_month_normalizes() {
        let utils = DateUtils::utc();

        let mut date = utc(2024, 11, 15);
        utils.set_month(&mut date, 12).unwrap();
        assert_eq!(date, utc(2025, 1, 15));

        let mut date = utc(2024, 1, 15);
        utils.set_month(&mut date, -1).unwrap();
        assert_eq!(date, utc(2023, 12, 15));

        let mut date = utc(2023, 1, 31);
        utils.set_month(&mut date, 1).unwrap();
        assert_eq!(date, utc(2023, 3, 3));
    }

    #[test]
    fn test_set_full_year_keeps_time_and_rolls_leap_day() {
        let utils = DateUtils::utc();

        let mut date = utc_hm(2024, 2, 29, 8, 30);
        utils.set_full_year(&mut date, 2023).unwrap();
        assert_eq!(date, utc_hm(2023, 3, 1, 8, 30));
    }

    #[test]
    fn test_setters_in_fixed_mode() {
        let utils = DateUtils::new(fixed(9));
        let mut date = utils.make_date(2024, 0, 31).unwrap();
        utils.set_date(&mut date, 32).unwrap();
        assert_eq!(utils.full_year(&date), 2024);
        assert_eq!(utils.month(&date), 1);
        assert_eq!(utils.day_of_month(&date), 1);
        assert_eq!(utils.hours(&date), 0);
    }

    #[test]
    fn test_set_out_of_range() {
        let utils = DateUtils::utc();
        let mut date = utc(2024, 1, 1);
        assert_eq!(utils.set_full_year(&mut date, i32::MAX), Err(DateError::OutOfRange));
        assert_eq!(date, utc(2024, 1, 1));

        assert_eq!(utils.set_date(&mut date, i64::MIN), Err(DateError::OutOfRange));
        assert_eq!(utils.set_date(&mut date, i64::MAX), Err(DateError::OutOfRange));
        assert_eq!(utils.set_month(&mut date, i64::MIN), Err(DateError::OutOfRange));
        assert_eq!(date, utc(2024, 1, 1));
    }

    #[test]
    fn test_compare_dates() {
        let utils = DateUtils::utc();
        let late = utc_hm(2024, 1, 15, 23, 59);
        let early = utc_hm(2024, 1, 15, 0, 0);
        assert!(utils.compare_dates(&late, &early));
        assert!(!utils.compare_dates(&utc(2024, 1, 15), &utc(2024, 1, 16)));
        assert_eq!(late, utc_hm(2024, 1, 15, 23, 59));
    }

    #[test]
    fn test_compare_dates_depends_on_mode() {
        let evening = utc_hm(2024, 1, 15, 22, 0);
        let morning = utc_hm(2024, 1, 16, 1, 0);
        assert!(!DateUtils::utc().compare_dates(&evening, &morning));
        assert!(DateUtils::new(fixed(-3)).compare_dates(&evening, &morning));
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date(0.0));
        assert!(is_valid_date(1_705_276_800_000.0));
        assert!(is_valid_date(-8.64e15));
        assert!(!is_valid_date(f64::NAN));
        assert!(!is_valid_date(f64::INFINITY));
        assert!(!is_valid_date(8.64e15 + 1.0));
    }

    #[test]
    fn test_date_from_timestamp() {
        assert_eq!(date_from_timestamp(1_705_276_800_000.0), Some(utc(2024, 1, 15)));
        assert_eq!(date_from_timestamp(f64::NAN), None);

        // valid as a timestamp but past what chrono can hold
        assert!(is_valid_date(8.6e15));
        assert_eq!(date_from_timestamp(8.6e15), None);
        assert!(date_from_timestamp(8.2e15).is_some());
    }

    #[test]
    fn test_names() {
        let utils = DateUtils::utc();
        let en = LanguageDescriptor::english();
        let date = utc(2024, 1, 15);

        assert_eq!(utils.day_name_abbr(&date, en.days()).unwrap(), "Mon");
        assert_eq!(utils.month_name(0_usize, Some(en.months())).unwrap(), "January");
        assert_eq!(utils.month_name(date, Some(en.months())).unwrap(), "January");
        assert_eq!(utils.month_name_abbr(11_usize, Some(en.months_abbr())).unwrap(), "Dec");
        assert_eq!(utils.month_name(0_usize, None), Err(DateError::MissingNames("months")));
        assert_eq!(
            utils.month_name_abbr(12_usize, Some(en.months_abbr())),
            Err(DateError::InvalidMonth(12))
        );
        assert_eq!(utils.day_name_abbr(&date, &[]), Err(DateError::InvalidWeekday(1)));
    }

    #[test]
    fn test_nth_suffix() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(nth_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn test_create_date_array() {
        let utils = DateUtils::utc();
        let dates = utils.create_date_array(&utc(2024, 2, 27), &utc(2024, 3, 2));
        assert_eq!(
            dates,
            vec![utc(2024, 2, 27), utc(2024, 2, 28), utc(2024, 2, 29), utc(2024, 3, 1), utc(2024, 3, 2)]
        );

        assert!(utils.create_date_array(&utc(2024, 3, 2), &utc(2024, 3, 1)).is_empty());
        assert_eq!(utils.create_date_array(&utc(2024, 3, 1), &utc(2024, 3, 1)).len(), 1);
    }

    #[test]
    fn test_reset_date_time() {
        let utils = DateUtils::utc();
        let mut date = utc_hm(2024, 1, 15, 13, 37);
        let reset = utils.reset_date_time(&mut date);
        assert_eq!(reset, utc(2024, 1, 15));
        assert_eq!(date, reset);

        let mut again = reset;
        assert_eq!(utils.reset_date_time(&mut again), reset);
    }

    #[test]
    fn test_reset_date_time_in_fixed_mode() {
        let utils = DateUtils::new(fixed(2));
        let mut date = utc_hm(2024, 1, 15, 23, 0);
        let reset = utils.reset_date_time(&mut date);
        // 23:00Z is 01:00 on the 16th at +02:00
        assert_eq!(reset, utc_hm(2024, 1, 15, 22, 0));
    }

    #[test]
    fn test_new_date_object_copies() {
        let utils = DateUtils::utc();
        let source = utc_hm(2024, 5, 5, 10, 0);
        let copy = utils.new_date_object(Some(&source));
        assert_eq!(copy, utc(2024, 5, 5));
        assert_eq!(source, utc_hm(2024, 5, 5, 10, 0));

        let now = utils.new_date_object(None);
        assert_eq!(utils.hours(&now), 0);
        assert_eq!(utils.minutes(&now), 0);
    }

    #[test]
    fn test_days_in_month_method() {
        let utils = DateUtils::utc();
        assert_eq!(utils.days_in_month(2024, 1), 29);
        assert_eq!(utils.days_in_month(2023, 3), 30);
    }
}
