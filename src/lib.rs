mod consts;
mod disabled;
mod format;
mod highlighted;
mod input;
mod language;
mod parse;
mod prelude;
mod types;
mod utils;
mod view;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use disabled::{CustomPredictor, DateRange, DisabledDates};
pub use format::{DateFormat, DateFormatter, format_date};
pub use highlighted::HighlightedDates;
pub use input::{BlurOutcome, TypedInput};
pub use language::{LanguageData, LanguageDescriptor, LanguageError};
pub use parse::{DateParser, ParseOutcome, ParserConfig, parse_date};
pub use types::{DateValue, Mode, MonthRef, days_in_month, is_leap_year};
pub use utils::{DateUtils, date_from_timestamp, is_valid_date, nth_suffix};
pub use view::{CalendarPage, DayCell, MonthCell, PickerView, ViewBounds, YearCell, page_date_for};

/// Error type for date utility, parsing and view configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// A custom formatter was configured without its companion parser.
    #[error("A parser is required when using a custom formatter")]
    MissingParser,

    /// A name lookup was given no names to look in.
    #[error("Missing {0} names")]
    MissingNames(&'static str),

    /// A month index with no entry in the names list.
    #[error("Invalid month index: {0}")]
    InvalidMonth(usize),

    /// A weekday index with no entry in the names list.
    #[error("Invalid weekday index: {0}")]
    InvalidWeekday(usize),

    /// A calendar computation left the representable date range.
    #[error("Date out of range")]
    OutOfRange,

    /// A view name other than `day`, `month` or `year`.
    #[error("Unknown picker view '{0}'")]
    UnknownView(String),

    /// The requested initial view lies outside the allowed view bounds.
    #[error("Initial view '{view}' cannot be rendered based on minimum '{minimum}' and maximum '{maximum}'")]
    InvalidInitialView {
        view:    PickerView,
        minimum: PickerView,
        maximum: PickerView,
    },

    /// Error building a locale.
    #[error(transparent)]
    Language(#[from] LanguageError),
}
