use std::fmt;
use std::sync::Arc;

use crate::consts::{DEFAULT_FORMAT, MONTH_TOKEN_STOPS, WEEKDAY_TOKEN_STOPS};
use crate::language::LanguageDescriptor;
use crate::types::DateValue;
use crate::utils::{DateUtils, nth_suffix};

/// Formats a date without going through a pattern.
///
/// Implemented for any `Fn(&DateValue) -> String` closure.
pub trait DateFormatter: Send + Sync {
    fn format(&self, date: &DateValue) -> String;
}

impl<F> DateFormatter for F
where
    F: Fn(&DateValue) -> String + Send + Sync,
{
    fn format(&self, date: &DateValue) -> String {
        self(date)
    }
}

/// How a picker renders its selected date: a token pattern or a custom
/// formatter. A custom formatter needs a matching
/// [`DateParser`](crate::DateParser) before typed input can be read back.
#[derive(Clone)]
pub enum DateFormat {
    Pattern(String),
    Custom(Arc<dyn DateFormatter>),
}

impl DateFormat {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    pub fn custom(formatter: impl DateFormatter + 'static) -> Self {
        Self::Custom(Arc::new(formatter))
    }

    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    pub fn format(
        &self,
        utils: &DateUtils,
        date: &DateValue,
        language: Option<&LanguageDescriptor>,
    ) -> String {
        match self {
            Self::Pattern(pattern) => format_date(utils, date, pattern, language),
            Self::Custom(formatter) => formatter.format(date),
        }
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::pattern(DEFAULT_FORMAT)
    }
}

impl From<&str> for DateFormat {
    fn from(pattern: &str) -> Self {
        Self::pattern(pattern)
    }
}

impl From<String> for DateFormat {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl fmt::Debug for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    FullYear,
    ShortYear,
    MonthName,
    MonthAbbr,
    MonthPadded,
    Month,
    DayPadded,
    Day,
    Ordinal,
    WeekdayAbbr,
}

impl Token {
    const fn len(self) -> usize {
        match self {
            Self::FullYear | Self::MonthName => 4,
            Self::MonthAbbr => 3,
            Self::ShortYear | Self::MonthPadded | Self::DayPadded => 2,
            Self::Month | Self::Day | Self::Ordinal | Self::WeekdayAbbr => 1,
        }
    }
}

fn run_length(chars: &[char], start: usize) -> usize {
    let first = chars[start];
    chars[start..].iter().take_while(|&&c| c == first).count()
}

/// Longest token starting at `start`, honouring the lookahead stops on month
/// and weekday tokens. A month run rejected at full length retries shorter.
fn token_at(chars: &[char], start: usize) -> Option<Token> {
    let followed_by = |len: usize, stops: &[char]| {
        chars.get(start + len).is_some_and(|next| stops.contains(next))
    };

    match chars[start] {
        'y' => match run_length(chars, start) {
            4.. => Some(Token::FullYear),
            2 | 3 => Some(Token::ShortYear),
            _ => None,
        },
        'M' => {
            let run = run_length(chars, start).min(4);
            (1..=run)
                .rev()
                .find(|&len| !followed_by(len, &MONTH_TOKEN_STOPS))
                .map(|len| match len {
                    4 => Token::MonthName,
                    3 => Token::MonthAbbr,
                    2 => Token::MonthPadded,
                    _ => Token::Month,
                })
        }
        'd' => Some(if run_length(chars, start) >= 2 { Token::DayPadded } else { Token::Day }),
        'o' => Some(Token::Ordinal),
        'E' if !followed_by(1, &WEEKDAY_TOKEN_STOPS) => Some(Token::WeekdayAbbr),
        _ => None,
    }
}

/// Renders `date` through a token pattern.
///
/// Recognized tokens, matched longest first and case-sensitively: `yyyy`,
/// `yy`, `MMMM`, `MMM`, `MM`, `M`, `dd`, `d`, `o` (ordinal suffix) and `E`
/// (abbreviated weekday). Month tokens do not match before `a`, `ä` or `e`
/// and `E` does not match before `e`, `é` or `i`, so words such as "Mai" or
/// "Eine" survive. Everything else is copied through. English names are used
/// when no language is given.
pub fn format_date(
    utils: &DateUtils,
    date: &DateValue,
    pattern: &str,
    language: Option<&LanguageDescriptor>,
) -> String {
    let english;
    let language = match language {
        Some(language) => language,
        None => {
            english = LanguageDescriptor::english();
            &english
        }
    };

    let year = utils.full_year(date);
    let month = utils.month(date);
    let day = utils.day_of_month(date);

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let Some(token) = token_at(&chars, i) else {
            out.push(chars[i]);
            i += 1;
            continue;
        };

        let value = match token {
            Token::FullYear => year.to_string(),
            Token::ShortYear => year.to_string().chars().skip(2).collect(),
            Token::MonthName => utils
                .month_name(month as usize, Some(language.months()))
                .unwrap_or_default()
                .to_owned(),
            Token::MonthAbbr => utils
                .month_name_abbr(month as usize, Some(language.months_abbr()))
                .unwrap_or_default()
                .to_owned(),
            Token::MonthPadded => format!("{:02}", month + 1),
            Token::Month => (month + 1).to_string(),
            Token::DayPadded => format!("{day:02}"),
            Token::Day => day.to_string(),
            Token::Ordinal => nth_suffix(day).to_owned(),
            Token::WeekdayAbbr => utils
                .day_name_abbr(date, language.days())
                .unwrap_or_default()
                .to_owned(),
        };

        let end = i + token.len();
        if value.is_empty() {
            // empty substitutions leave the token text in place
            out.extend(&chars[i..end]);
        } else {
            out.push_str(&value);
        }
        i = end;
    }
    out
}
