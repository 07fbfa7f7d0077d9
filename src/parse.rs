use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SEPARATOR;
use crate::format::DateFormat;
use crate::language::LanguageDescriptor;
use crate::types::DateValue;
use crate::DateError;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-|/|\s|\.").expect("separator pattern is valid"));

static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"st|rd|nd|th").expect("suffix pattern is valid"));

/// Result of reading typed text back into a date.
///
/// Text that cannot be read is handed back untouched so the caller can keep
/// what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ParseOutcome {
    Parsed(DateValue),
    Unparsed(String),
}

impl ParseOutcome {
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    pub const fn date(&self) -> Option<&DateValue> {
        match self {
            Self::Parsed(date) => Some(date),
            Self::Unparsed(_) => None,
        }
    }
}

/// Reads text produced by a custom [`DateFormatter`](crate::DateFormatter).
///
/// Implemented for any `Fn(&str) -> ParseOutcome` closure.
pub trait DateParser: Send + Sync {
    fn parse(&self, text: &str) -> ParseOutcome;
}

impl<F> DateParser for F
where
    F: Fn(&str) -> ParseOutcome + Send + Sync,
{
    fn parse(&self, text: &str) -> ParseOutcome {
        self(text)
    }
}

/// A format paired with the parser needed to read it back, checked once when
/// the picker is configured.
#[derive(Clone)]
pub struct ParserConfig {
    format: DateFormat,
    parser: Option<Arc<dyn DateParser>>,
}

impl ParserConfig {
    /// # Errors
    /// Returns `DateError::MissingParser` for a custom format without a parser.
    pub fn new(format: DateFormat, parser: Option<Arc<dyn DateParser>>) -> Result<Self, DateError> {
        if format.is_custom() && parser.is_none() {
            return Err(DateError::MissingParser);
        }
        Ok(Self { format, parser })
    }

    pub const fn format(&self) -> &DateFormat {
        &self.format
    }

    pub fn parse(&self, text: &str, language: Option<&LanguageDescriptor>) -> ParseOutcome {
        parse_date(text, &self.format, language, self.parser.as_deref())
            .unwrap_or_else(|_| ParseOutcome::Unparsed(text.to_owned()))
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: DateFormat::default(),
            parser: None,
        }
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("format", &self.format)
            .field("parser", &self.parser.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Reads `text` written in `format` back into a UTC-midnight date.
///
/// Pattern formats are read positionally: the first of `-`, `/`, whitespace or
/// `.` found in the pattern splits both pattern and text, and each pattern
/// segment names the field its text segment fills (`yyyy`, `MMMM`, `MMM`,
/// `MM`/`M`, `dd`, `d`, case-insensitive). Custom formats defer to `parser`.
///
/// # Errors
/// Returns `DateError::MissingParser` when `format` is custom and no parser is
/// given. Text that does not form a valid date is not an error; it comes back
/// as [`ParseOutcome::Unparsed`].
pub fn parse_date(
    text: &str,
    format: &DateFormat,
    language: Option<&LanguageDescriptor>,
    parser: Option<&dyn DateParser>,
) -> Result<ParseOutcome, DateError> {
    let pattern = match format {
        DateFormat::Pattern(pattern) => pattern.as_str(),
        DateFormat::Custom(_) if text.is_empty() => return Ok(ParseOutcome::Unparsed(String::new())),
        DateFormat::Custom(_) => {
            let parser = parser.ok_or(DateError::MissingParser)?;
            log::trace!("parsing {text:?} with custom parser");
            return Ok(parser.parse(text));
        }
    };
    if text.is_empty() || pattern.is_empty() {
        return Ok(ParseOutcome::Unparsed(text.to_owned()));
    }

    let english;
    let language = match language {
        Some(language) => language,
        None => {
            english = LanguageDescriptor::english();
            &english
        }
    };

    let separator = SEPARATOR.find(pattern).map_or(DEFAULT_SEPARATOR, |m| m.as_str());
    let values: Vec<&str> = text.split(separator).collect();

    let mut year = String::from("0");
    let mut month = String::from("0");
    let mut day = String::from("0");
    for (segment, value) in pattern.split(separator).zip(values) {
        let segment = segment.to_lowercase();
        if segment.contains("yyyy") {
            value.clone_into(&mut year);
        } else if segment.contains("mmmm") {
            month = month_number(language.month_by_name(value));
        } else if segment.contains("mmm") {
            month = month_number(language.month_by_abbr_name(value));
        } else if segment.contains('m') {
            month = pad_single_digit(value);
        } else if segment.contains("dd") {
            value.clone_into(&mut day);
        } else if segment.contains('d') {
            day = pad_single_digit(&ORDINAL_SUFFIX.replace_all(value, ""));
        }
    }

    let iso = format!("{year}-{month}-{day}T00:00:00Z");
    match DateTime::parse_from_rfc3339(&iso) {
        Ok(date) => Ok(ParseOutcome::Parsed(date.with_timezone(&Utc))),
        Err(err) => {
            log::debug!("{text:?} does not match {pattern:?} ({iso}: {err})");
            Ok(ParseOutcome::Unparsed(text.to_owned()))
        }
    }
}

fn month_number(month: Option<u32>) -> String {
    format!("{:02}", month.unwrap_or(0))
}

fn pad_single_digit(value: &str) -> String {
    match value.parse::<u32>() {
        Ok(number) if number < 10 => format!("0{number}"),
        _ => value.to_owned(),
    }
}
