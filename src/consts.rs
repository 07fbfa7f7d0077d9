/// Months in a calendar year
pub const MONTHS_IN_YEAR: usize = 12;

/// Days in a week
pub const DAYS_IN_WEEK: usize = 7;

/// Years shown on one decade page
pub const YEARS_IN_DECADE: i32 = 10;

/// First day of month
pub const MIN_DAY: u32 = 1;

/// Month index for February (months are 0-indexed)
pub const FEBRUARY: u32 = 1;

/// Weekday index for Sunday (weekdays are 0-indexed from Sunday)
pub const SUNDAY: u32 = 0;
/// Weekday index for Saturday
pub const SATURDAY: u32 = 6;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Days in each month, 0-indexed from January.
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; MONTHS_IN_YEAR] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Largest absolute timestamp (ms from the epoch) a date instant may carry
pub const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

/// Separator used when the format pattern contains none of the known ones
pub const DEFAULT_SEPARATOR: &str = "-";

/// Format pattern used when the host supplies none
pub const DEFAULT_FORMAT: &str = "dd MMM yyyy";

/// Characters that stop a month token from matching (e.g. "Mai", "Mär")
pub(crate) const MONTH_TOKEN_STOPS: [char; 3] = ['a', 'ä', 'e'];
/// Characters that stop a weekday token from matching
pub(crate) const WEEKDAY_TOKEN_STOPS: [char; 3] = ['e', 'é', 'i'];
