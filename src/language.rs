use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_IN_WEEK, MONTHS_IN_YEAR};

/// Error type for locale construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("There must be 12 months for {language} language")]
    WrongMonthCount { language: String, found: usize },

    #[error("There must be 12 abbreviated months for {language} language")]
    WrongAbbrMonthCount { language: String, found: usize },

    #[error("There must be 7 days for {language} language")]
    WrongDayCount { language: String, found: usize },
}

/// Localized month and weekday names for one locale.
///
/// The name lists always have 12 months and 7 days. Setters re-validate, so a
/// descriptor can never hold a short list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LanguageData", into = "LanguageData")]
pub struct LanguageDescriptor {
    language:    String,
    months:      Vec<String>,
    months_abbr: Vec<String>,
    days:        Vec<String>,
    year_suffix: String,
    rtl:         bool,
    ymd:         bool,
    today:       String,
}

/// Unvalidated wire shape of a [`LanguageDescriptor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageData {
    pub language:    String,
    pub months:      Vec<String>,
    pub months_abbr: Vec<String>,
    pub days:        Vec<String>,
    #[serde(default)]
    pub year_suffix: String,
    #[serde(default)]
    pub rtl:         bool,
    #[serde(default)]
    pub ymd:         bool,
    #[serde(default)]
    pub today:       String,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

impl LanguageDescriptor {
    /// Creates a locale, validating name list lengths.
    ///
    /// # Errors
    /// Returns a [`LanguageError`] if `months` or `months_abbr` do not hold 12
    /// names or `days` does not hold 7.
    pub fn new(
        language: impl Into<String>,
        months: Vec<String>,
        months_abbr: Vec<String>,
        days: Vec<String>,
        today: impl Into<String>,
    ) -> Result<Self, LanguageError> {
        let mut descriptor = Self {
            language:    language.into(),
            months:      Vec::new(),
            months_abbr: Vec::new(),
            days:        Vec::new(),
            year_suffix: String::new(),
            rtl:         false,
            ymd:         false,
            today:       today.into(),
        };
        descriptor.set_months(months)?;
        descriptor.set_months_abbr(months_abbr)?;
        descriptor.set_days(days)?;
        Ok(descriptor)
    }

    /// The built-in English locale.
    pub fn english() -> Self {
        Self {
            language:    "English".to_owned(),
            months:      owned(&[
                "January", "February", "March", "April", "May", "June", "July", "August", "September",
                "October", "November", "December",
            ]),
            months_abbr: owned(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            days:        owned(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            year_suffix: String::new(),
            rtl:         false,
            ymd:         false,
            today:       "Today".to_owned(),
        }
    }

    pub fn with_year_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.year_suffix = suffix.into();
        self
    }

    pub const fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub const fn with_ymd(mut self, ymd: bool) -> Self {
        self.ymd = ymd;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn months_abbr(&self) -> &[String] {
        &self.months_abbr
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn year_suffix(&self) -> &str {
        &self.year_suffix
    }

    pub const fn rtl(&self) -> bool {
        self.rtl
    }

    pub const fn ymd(&self) -> bool {
        self.ymd
    }

    pub fn today(&self) -> &str {
        &self.today
    }

    /// # Errors
    /// Returns `LanguageError::WrongMonthCount` unless exactly 12 names are given.
    pub fn set_months(&mut self, months: Vec<String>) -> Result<(), LanguageError> {
        if months.len() != MONTHS_IN_YEAR {
            return Err(self.rejected(LanguageError::WrongMonthCount {
                language: self.language.clone(),
                found:    months.len(),
            }));
        }
        self.months = months;
        Ok(())
    }

    /// # Errors
    /// Returns `LanguageError::WrongAbbrMonthCount` unless exactly 12 names are given.
    pub fn set_months_abbr(&mut self, months_abbr: Vec<String>) -> Result<(), LanguageError> {
        if months_abbr.len() != MONTHS_IN_YEAR {
            return Err(self.rejected(LanguageError::WrongAbbrMonthCount {
                language: self.language.clone(),
                found:    months_abbr.len(),
            }));
        }
        self.months_abbr = months_abbr;
        Ok(())
    }

    /// # Errors
    /// Returns `LanguageError::WrongDayCount` unless exactly 7 names are given.
    pub fn set_days(&mut self, days: Vec<String>) -> Result<(), LanguageError> {
        if days.len() != DAYS_IN_WEEK {
            return Err(self.rejected(LanguageError::WrongDayCount {
                language: self.language.clone(),
                found:    days.len(),
            }));
        }
        self.days = days;
        Ok(())
    }

    pub fn set_today(&mut self, today: impl Into<String>) {
        self.today = today.into();
    }

    fn rejected(&self, err: LanguageError) -> LanguageError {
        log::debug!("rejecting name list for {}: {err}", self.language);
        err
    }

    /// 1-based month number for a full month name, exact match.
    pub fn month_by_name(&self, name: &str) -> Option<u32> {
        position_of(&self.months, name)
    }

    /// 1-based month number for an abbreviated month name, exact match.
    pub fn month_by_abbr_name(&self, name: &str) -> Option<u32> {
        position_of(&self.months_abbr, name)
    }
}

fn position_of(names: &[String], name: &str) -> Option<u32> {
    names
        .iter()
        .position(|candidate| candidate == name)
        .and_then(|index| u32::try_from(index + 1).ok())
}

impl Default for LanguageDescriptor {
    fn default() -> Self {
        Self::english()
    }
}

impl TryFrom<LanguageData> for LanguageDescriptor {
    type Error = LanguageError;

    fn try_from(data: LanguageData) -> Result<Self, Self::Error> {
        Ok(Self::new(data.language, data.months, data.months_abbr, data.days, data.today)?
            .with_year_suffix(data.year_suffix)
            .with_rtl(data.rtl)
            .with_ymd(data.ymd))
    }
}

impl From<LanguageDescriptor> for LanguageData {
    fn from(descriptor: LanguageDescriptor) -> Self {
        Self {
            language:    descriptor.language,
            months:      descriptor.months,
            months_abbr: descriptor.months_abbr,
            days:        descriptor.days,
            year_suffix: descriptor.year_suffix,
            rtl:         descriptor.rtl,
            ymd:         descriptor.ymd,
            today:       descriptor.today,
        }
    }
}
