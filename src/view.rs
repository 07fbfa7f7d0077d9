use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::DateError;
use crate::consts::{DAYS_IN_WEEK, MIN_DAY, MONTHS_IN_YEAR, SATURDAY, SUNDAY, YEARS_IN_DECADE};
use crate::disabled::DisabledDates;
use crate::highlighted::HighlightedDates;
use crate::language::LanguageDescriptor;
use crate::prelude::*;
use crate::types::DateValue;
use crate::utils::DateUtils;

/// The three calendar pages a picker can show, finest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PickerView {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl FromStr for PickerView {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DateError::UnknownView(s.to_owned())),
        }
    }
}

/// The span of views a picker may move between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewBounds {
    pub minimum: PickerView,
    pub maximum: PickerView,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self {
            minimum: PickerView::Day,
            maximum: PickerView::Year,
        }
    }
}

impl ViewBounds {
    pub const fn new(minimum: PickerView, maximum: PickerView) -> Self {
        Self { minimum, maximum }
    }

    pub fn allows(&self, view: PickerView) -> bool {
        self.minimum <= view && view <= self.maximum
    }

    /// The view to open on; `minimum` when none is requested.
    ///
    /// # Errors
    /// Returns `DateError::InvalidInitialView` if the view is out of bounds.
    pub fn initial_view(&self, requested: Option<PickerView>) -> Result<PickerView, DateError> {
        let view = requested.unwrap_or(self.minimum);
        if !self.allows(view) {
            return Err(DateError::InvalidInitialView {
                view,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(view)
    }

    /// The view to drill into after a cell of `view` is picked, or `None`
    /// when the pick selects the date itself.
    pub fn view_after_pick(&self, view: PickerView) -> Option<PickerView> {
        let finer = match view {
            PickerView::Year => PickerView::Month,
            PickerView::Month => PickerView::Day,
            PickerView::Day => return None,
        };
        self.allows(finer).then_some(finer)
    }
}

/// First day of the month of `date`, keeping its time; today at midnight
/// when no date is given.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result cannot be represented.
pub fn page_date_for(utils: &DateUtils, date: Option<&DateValue>) -> Result<DateValue, DateError> {
    let mut page = date.copied().unwrap_or_else(|| utils.new_date_object(None));
    utils.set_date(&mut page, i64::from(MIN_DAY))?;
    Ok(page)
}

/// One day on the day page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    /// Day of the month.
    pub value:              u32,
    /// Milliseconds since the epoch.
    pub timestamp:          i64,
    pub is_selected:        bool,
    pub is_disabled:        bool,
    pub is_highlighted:     bool,
    pub is_highlight_start: bool,
    pub is_highlight_end:   bool,
    pub is_today:           bool,
    pub is_weekend:         bool,
    pub is_saturday:        bool,
    pub is_sunday:          bool,
}

/// One month on the month page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    /// Full month name.
    pub value:       String,
    pub timestamp:   i64,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// One year on the decade page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCell {
    pub value:       i32,
    pub timestamp:   i64,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// Everything a renderer needs to lay out calendar pages.
///
/// Every method takes the page date, normally the first of a month as
/// returned by [`page_date_for`], and rebuilds its cells from scratch. Only
/// the page's year and month matter; cells always start at midnight.
#[derive(Debug, Clone)]
pub struct CalendarPage<'a> {
    utils:           DateUtils,
    language:        &'a LanguageDescriptor,
    selected:        Option<DateValue>,
    disabled:        Option<&'a DisabledDates>,
    highlighted:     Option<&'a HighlightedDates>,
    monday_first:    bool,
    full_month_name: bool,
    today:           DateValue,
}

impl<'a> CalendarPage<'a> {
    pub fn new(utils: DateUtils, language: &'a LanguageDescriptor) -> Self {
        Self {
            utils,
            language,
            selected: None,
            disabled: None,
            highlighted: None,
            monday_first: false,
            full_month_name: false,
            today: Utc::now(),
        }
    }

    pub const fn with_selected(mut self, selected: Option<DateValue>) -> Self {
        self.selected = selected;
        self
    }

    pub const fn with_disabled(mut self, disabled: &'a DisabledDates) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub const fn with_highlighted(mut self, highlighted: &'a HighlightedDates) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    pub const fn with_monday_first(mut self, monday_first: bool) -> Self {
        self.monday_first = monday_first;
        self
    }

    /// Use full month names in the day page header.
    pub const fn with_full_month_name(mut self, full_month_name: bool) -> Self {
        self.full_month_name = full_month_name;
        self
    }

    /// Overrides the instant used to mark today's cell.
    pub const fn with_today(mut self, today: DateValue) -> Self {
        self.today = today;
        self
    }

    // cells start at midnight so `to`/`from` boundary days compare as enabled
    fn first_of_month(&self, page: &DateValue) -> Result<DateValue, DateError> {
        self.utils.make_date(
            self.utils.full_year(page),
            i64::from(self.utils.month(page)),
            i64::from(MIN_DAY),
        )
    }

    fn is_date_disabled(&self, date: &DateValue) -> bool {
        self.disabled.is_some_and(|d| d.is_date_disabled(date, &self.utils))
    }

    // Day page

    /// A cell for every day of the page's month.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the month cannot be represented.
    pub fn day_cells(&self, page: &DateValue) -> Result<Vec<DayCell>, DateError> {
        let utils = &self.utils;
        let mut day = self.first_of_month(page)?;
        let count = utils.days_in_month(utils.full_year(&day), utils.month(&day));

        let mut cells = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let weekday = utils.weekday(&day);
            cells.push(DayCell {
                value:              utils.day_of_month(&day),
                timestamp:          day.timestamp_millis(),
                is_selected:        self.selected.is_some_and(|s| utils.compare_dates(&s, &day)),
                is_disabled:        self.is_date_disabled(&day),
                is_highlighted:     self
                    .highlighted
                    .is_some_and(|h| h.is_highlighted(&day, self.disabled, utils)),
                is_highlight_start: self
                    .highlighted
                    .is_some_and(|h| h.is_highlight_start(&day, self.disabled, utils)),
                is_highlight_end:   self
                    .highlighted
                    .is_some_and(|h| h.is_highlight_end(&day, self.disabled, utils)),
                is_today:           utils.compare_dates(&day, &self.today),
                is_weekend:         weekday == SUNDAY || weekday == SATURDAY,
                is_saturday:        weekday == SATURDAY,
                is_sunday:          weekday == SUNDAY,
            });
            let next = i64::from(utils.day_of_month(&day)) + 1;
            utils.set_date(&mut day, next)?;
        }
        Ok(cells)
    }

    /// Empty cells before the first of the month in a week row.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the month cannot be represented.
    pub fn blank_days(&self, page: &DateValue) -> Result<usize, DateError> {
        let weekday = self.utils.weekday(&self.first_of_month(page)?) as usize;
        if self.monday_first {
            Ok((weekday + DAYS_IN_WEEK - 1) % DAYS_IN_WEEK)
        } else {
            Ok(weekday)
        }
    }

    /// Weekday headings in display order.
    pub fn days_of_week(&self) -> Vec<&'a str> {
        let mut days: Vec<&str> = self.language.days().iter().map(String::as_str).collect();
        if self.monday_first && !days.is_empty() {
            days.rotate_left(1);
        }
        days
    }

    /// Name of the page's month, abbreviated unless full names are enabled.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the language has no name for it.
    pub fn current_month_name(&self, page: &DateValue) -> Result<&'a str, DateError> {
        let names = if self.full_month_name {
            self.language.months()
        } else {
            self.language.months_abbr()
        };
        self.utils.month_name(*page, Some(names))
    }

    /// The page's year followed by the language's year suffix.
    pub fn current_year_name(&self, page: &DateValue) -> String {
        format!("{}{}", self.utils.full_year(page), self.language.year_suffix())
    }

    /// Day page header, year first for year-month-day languages.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the language has no name for the month.
    pub fn day_page_title(&self, page: &DateValue) -> Result<String, DateError> {
        let month = self.current_month_name(page)?;
        let year = self.current_year_name(page);
        if self.language.ymd() {
            Ok(format!("{year} {month}"))
        } else {
            Ok(format!("{month} {year}"))
        }
    }

    pub fn is_previous_month_disabled(&self, page: &DateValue) -> bool {
        let utils = &self.utils;
        self.disabled.and_then(|d| d.to).is_some_and(|to| {
            (utils.full_year(&to), utils.month(&to)) >= (utils.full_year(page), utils.month(page))
        })
    }

    pub fn is_next_month_disabled(&self, page: &DateValue) -> bool {
        let utils = &self.utils;
        self.disabled.and_then(|d| d.from).is_some_and(|from| {
            (utils.full_year(&from), utils.month(&from)) <= (utils.full_year(page), utils.month(page))
        })
    }

    /// The page shifted by `months`, across years when needed.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn change_month(&self, page: &DateValue, months: i64) -> Result<DateValue, DateError> {
        let mut shifted = *page;
        self.utils.set_month(&mut shifted, i64::from(self.utils.month(page)) + months)?;
        Ok(shifted)
    }

    // Month page

    /// A cell for every month of the page's year.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year cannot be represented.
    pub fn month_cells(&self, page: &DateValue) -> Result<Vec<MonthCell>, DateError> {
        let utils = &self.utils;
        let first = self.first_of_month(page)?;
        let year = utils.full_year(&first);

        (0..MONTHS_IN_YEAR)
            .map(|index| {
                let mut month = first;
                utils.set_month(&mut month, index as i64)?;
                Ok(MonthCell {
                    value:       utils.month_name(index, Some(self.language.months()))?.to_owned(),
                    timestamp:   month.timestamp_millis(),
                    is_selected: self.selected.is_some_and(|s| {
                        utils.full_year(&s) == year && utils.month(&s) as usize == index
                    }),
                    is_disabled: self
                        .disabled
                        .is_some_and(|d| d.is_month_disabled(&month, utils)),
                })
            })
            .collect()
    }

    pub fn is_previous_year_disabled(&self, page: &DateValue) -> bool {
        self.disabled
            .and_then(|d| d.to)
            .is_some_and(|to| self.utils.full_year(&to) >= self.utils.full_year(page))
    }

    pub fn is_next_year_disabled(&self, page: &DateValue) -> bool {
        self.disabled
            .and_then(|d| d.from)
            .is_some_and(|from| self.utils.full_year(&from) <= self.utils.full_year(page))
    }

    /// The page shifted by `years`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result cannot be represented.
    pub fn change_year(&self, page: &DateValue, years: i32) -> Result<DateValue, DateError> {
        let year = self
            .utils
            .full_year(page)
            .checked_add(years)
            .ok_or(DateError::OutOfRange)?;
        let mut shifted = *page;
        self.utils.set_full_year(&mut shifted, year)?;
        Ok(shifted)
    }

    // Year page

    fn decade_start(&self, date: &DateValue) -> i32 {
        self.utils.full_year(date).div_euclid(YEARS_IN_DECADE) * YEARS_IN_DECADE
    }

    /// A cell for every year of the page's decade.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the decade cannot be represented.
    pub fn year_cells(&self, page: &DateValue) -> Result<Vec<YearCell>, DateError> {
        let utils = &self.utils;
        let first = self.first_of_month(page)?;
        let start = self.decade_start(&first);

        (start..start + YEARS_IN_DECADE)
            .map(|value| {
                let mut year = first;
                utils.set_full_year(&mut year, value)?;
                Ok(YearCell {
                    value,
                    timestamp: year.timestamp_millis(),
                    is_selected: self.selected.is_some_and(|s| utils.full_year(&s) == value),
                    is_disabled: self.disabled.is_some_and(|d| d.is_year_disabled(&year, utils)),
                })
            })
            .collect()
    }

    /// Decade header such as `2020 - 2029`, with the year suffix.
    pub fn decade_name(&self, page: &DateValue) -> String {
        let start = self.decade_start(page);
        let end = start + YEARS_IN_DECADE - 1;
        format!("{start} - {end}{}", self.language.year_suffix())
    }

    pub fn is_previous_decade_disabled(&self, page: &DateValue) -> bool {
        self.disabled
            .and_then(|d| d.to)
            .is_some_and(|to| self.decade_start(&to) >= self.decade_start(page))
    }

    pub fn is_next_decade_disabled(&self, page: &DateValue) -> bool {
        self.disabled
            .and_then(|d| d.from)
            .is_some_and(|from| self.decade_start(&from) <= self.decade_start(page))
    }
}
