use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_DAY, MONTHS_IN_YEAR};
use crate::types::{DateValue, days_in_month};
use crate::utils::DateUtils;

/// Caller-supplied rule deciding whether a single date matches.
#[derive(Clone)]
pub struct CustomPredictor(Arc<dyn Fn(&DateValue) -> bool + Send + Sync>);

impl CustomPredictor {
    pub fn new(predicate: impl Fn(&DateValue) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    pub fn test(&self, date: &DateValue) -> bool {
        (self.0)(date)
    }
}

impl fmt::Debug for CustomPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomPredictor(..)")
    }
}

/// A span of dates. Only applies when both ends are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<DateValue>,
    #[serde(default)]
    pub to:   Option<DateValue>,
}

impl DateRange {
    pub const fn new(from: DateValue, to: DateValue) -> Self {
        Self {
            from: Some(from),
            to:   Some(to),
        }
    }

    /// Both ends, when both are set.
    pub const fn bounds(&self) -> Option<(DateValue, DateValue)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

/// Declarative rules for dates a picker must refuse.
///
/// Every field is optional; an empty field is a rule that never matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisabledDates {
    /// Dates strictly before this instant are disabled.
    pub to:               Option<DateValue>,
    /// Dates strictly after this instant are disabled.
    pub from:             Option<DateValue>,
    /// Individual days, compared by calendar day.
    pub dates:            Vec<DateValue>,
    /// Spans whose strict interior is disabled.
    pub ranges:           Vec<DateRange>,
    /// Weekdays, 0 for Sunday.
    pub days:             Vec<u32>,
    /// Days of the month, 1-based.
    pub days_of_month:    Vec<u32>,
    #[serde(skip)]
    pub custom_predictor: Option<CustomPredictor>,
}

impl DisabledDates {
    pub fn with_custom_predictor(
        mut self,
        predicate: impl Fn(&DateValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.custom_predictor = Some(CustomPredictor::new(predicate));
        self
    }

    /// Whether `date` is disabled by any rule.
    pub fn is_date_disabled(&self, date: &DateValue, utils: &DateUtils) -> bool {
        self.is_specific_date(date, utils)
            || self.is_outside_window(date)
            || self.is_inside_range(date)
            || self.days.contains(&utils.weekday(date))
            || self.days_of_month.contains(&utils.day_of_month(date))
            || self.custom_predictor.as_ref().is_some_and(|p| p.test(date))
    }

    fn is_specific_date(&self, date: &DateValue, utils: &DateUtils) -> bool {
        self.dates.iter().any(|d| utils.compare_dates(date, d))
    }

    // `to` and `from` bound the enabled window; the boundary instants stay enabled
    fn is_outside_window(&self, date: &DateValue) -> bool {
        self.to.is_some_and(|to| *date < to) || self.from.is_some_and(|from| *date > from)
    }

    fn is_inside_range(&self, date: &DateValue) -> bool {
        self.ranges
            .iter()
            .filter_map(DateRange::bounds)
            .any(|(from, to)| *date > from && *date < to)
    }

    /// Whether every day in the month of `date` is disabled.
    ///
    /// Months entirely before `to` or after `from` are rejected without
    /// visiting their days.
    pub fn is_month_disabled(&self, date: &DateValue, utils: &DateUtils) -> bool {
        let year = utils.full_year(date);
        let month = utils.month(date);

        if self
            .to
            .is_some_and(|to| (year, month) < (utils.full_year(&to), utils.month(&to)))
        {
            return true;
        }
        if self
            .from
            .is_some_and(|from| (year, month) > (utils.full_year(&from), utils.month(&from)))
        {
            return true;
        }

        (MIN_DAY..=days_in_month(year, month)).all(|day| {
            let mut day_date = *date;
            utils.set_date(&mut day_date, i64::from(day)).is_err()
                || self.is_date_disabled(&day_date, utils)
        })
    }

    /// Whether every month in the year of `date` is disabled.
    pub fn is_year_disabled(&self, date: &DateValue, utils: &DateUtils) -> bool {
        let year = utils.full_year(date);

        if self.to.is_some_and(|to| year < utils.full_year(&to)) {
            return true;
        }
        if self.from.is_some_and(|from| year > utils.full_year(&from)) {
            return true;
        }

        (0..MONTHS_IN_YEAR as i64).all(|month| {
            let mut month_date = *date;
            let moved = utils
                .set_date(&mut month_date, i64::from(MIN_DAY))
                .and_then(|()| utils.set_month(&mut month_date, month));
            moved.is_err() || self.is_month_disabled(&month_date, utils)
        })
    }
}
