use serde::{Deserialize, Serialize};

use crate::disabled::{CustomPredictor, DateRange, DisabledDates};
use crate::types::DateValue;
use crate::utils::DateUtils;

/// Declarative rules for dates a picker draws attention to.
///
/// Unlike [`DisabledDates`], every bound here is inclusive: `from..=to` and
/// each entry of `ranges` highlight their own end points.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightedDates {
    pub to:               Option<DateValue>,
    pub from:             Option<DateValue>,
    pub dates:            Vec<DateValue>,
    pub ranges:           Vec<DateRange>,
    /// Weekdays, 0 for Sunday.
    pub days:             Vec<u32>,
    pub days_of_month:    Vec<u32>,
    /// Highlight dates even when they are also disabled.
    pub include_disabled: bool,
    #[serde(skip)]
    pub custom_predictor: Option<CustomPredictor>,
}

impl HighlightedDates {
    pub fn with_custom_predictor(
        mut self,
        predicate: impl Fn(&DateValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.custom_predictor = Some(CustomPredictor::new(predicate));
        self
    }

    /// Whether the calendar day of `date` is highlighted.
    ///
    /// The check runs on `date` with its time zeroed. Disabled days are never
    /// highlighted unless `include_disabled` is set.
    pub fn is_highlighted(
        &self,
        date: &DateValue,
        disabled: Option<&DisabledDates>,
        utils: &DateUtils,
    ) -> bool {
        let day = utils.new_date_object(Some(date));
        if !self.include_disabled && disabled.is_some_and(|d| d.is_date_disabled(&day, utils)) {
            return false;
        }

        self.dates.iter().any(|d| utils.compare_dates(&day, d))
            || self.is_within_span(&day)
            || self.is_inside_range(&day)
            || self.days.contains(&utils.weekday(&day))
            || self.days_of_month.contains(&utils.day_of_month(&day))
            || self.custom_predictor.as_ref().is_some_and(|p| p.test(&day))
    }

    fn is_within_span(&self, day: &DateValue) -> bool {
        DateRange {
            from: self.from,
            to:   self.to,
        }
        .bounds()
        .is_some_and(|(from, to)| from <= *day && *day <= to)
    }

    fn is_inside_range(&self, day: &DateValue) -> bool {
        self.ranges
            .iter()
            .filter_map(DateRange::bounds)
            .any(|(from, to)| from <= *day && *day <= to)
    }

    /// Whether `date` is highlighted and falls on the day of `from`.
    pub fn is_highlight_start(
        &self,
        date: &DateValue,
        disabled: Option<&DisabledDates>,
        utils: &DateUtils,
    ) -> bool {
        self.from.is_some_and(|from| utils.compare_dates(&from, date))
            && self.is_highlighted(date, disabled, utils)
    }

    /// Whether `date` is highlighted and falls on the day of `to`.
    pub fn is_highlight_end(
        &self,
        date: &DateValue,
        disabled: Option<&DisabledDates>,
        utils: &DateUtils,
    ) -> bool {
        self.to.is_some_and(|to| utils.compare_dates(&to, date))
            && self.is_highlighted(date, disabled, utils)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixed, utc, utc_hm};

    fn utils() -> DateUtils {
        DateUtils::utc()
    }

    fn span(from: DateValue, to: DateValue) -> HighlightedDates {
        HighlightedDates {
            from: Some(from),
            to: Some(to),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_highlights_nothing() {
        let config = HighlightedDates::default();
        assert!(!config.is_highlighted(&utc(2024, 1, 15), None, &utils()));
        assert!(!config.is_highlight_start(&utc(2024, 1, 15), None, &utils()));
    }

    #[test]
    fn test_span_is_inclusive() {
        let config = span(utc(2024, 1, 10), utc(2024, 1, 20));
        assert!(config.is_highlighted(&utc(2024, 1, 10), None, &utils()));
        assert!(config.is_highlighted(&utc(2024, 1, 15), None, &utils()));
        assert!(config.is_highlighted(&utc(2024, 1, 20), None, &utils()));
        assert!(!config.is_highlighted(&utc(2024, 1, 21), None, &utils()));
        assert!(!config.is_highlighted(&utc(2024, 1, 9), None, &utils()));
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let config = span(utc(2024, 1, 10), utc(2024, 1, 20));
        assert!(config.is_highlighted(&utc_hm(2024, 1, 20, 23, 30), None, &utils()));
    }

    #[test]
    fn test_dates_and_span_combine() {
        let config = HighlightedDates {
            dates: vec![utc(2024, 2, 14)],
            ..span(utc(2024, 1, 10), utc(2024, 1, 20))
        };
        assert!(config.is_highlighted(&utc(2024, 2, 14), None, &utils()));
        assert!(config.is_highlighted(&utc(2024, 1, 12), None, &utils()));
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let config = HighlightedDates {
            ranges: vec![DateRange::new(utc(2024, 3, 1), utc(2024, 3, 3))],
            ..Default::default()
        };
        assert!(config.is_highlighted(&utc(2024, 3, 1), None, &utils()));
        assert!(config.is_highlighted(&utc(2024, 3, 3), None, &utils()));
        assert!(!config.is_highlighted(&utc(2024, 3, 4), None, &utils()));
    }

    #[test]
    fn test_days_rules_and_predictor() {
        let config = HighlightedDates {
            days: vec![5],
            days_of_month: vec![1],
            ..Default::default()
        }
        .with_custom_predictor(|date| date.timestamp() == utc(2024, 1, 2).timestamp());

        assert!(config.is_highlighted(&utc(2024, 1, 12), None, &utils()));
        assert!(config.is_highlighted(&utc(2024, 2, 1), None, &utils()));
        assert!(config.is_highlighted(&utc_hm(2024, 1, 2, 15, 0), None, &utils()));
        assert!(!config.is_highlighted(&utc(2024, 1, 3), None, &utils()));
    }

    #[test]
    fn test_disabled_days_are_not_highlighted() {
        let disabled = DisabledDates {
            dates: vec![utc(2024, 1, 15)],
            ..Default::default()
        };
        let mut config = span(utc(2024, 1, 10), utc(2024, 1, 20));
        assert!(!config.is_highlighted(&utc(2024, 1, 15), Some(&disabled), &utils()));
        assert!(config.is_highlighted(&utc(2024, 1, 16), Some(&disabled), &utils()));

        config.include_disabled = true;
        assert!(config.is_highlighted(&utc(2024, 1, 15), Some(&disabled), &utils()));
    }

    #[test]
    fn test_highlight_start_and_end() {
        let config = span(utc(2024, 1, 10), utc(2024, 1, 20));
        assert!(config.is_highlight_start(&utc_hm(2024, 1, 10, 12, 0), None, &utils()));
        assert!(!config.is_highlight_start(&utc(2024, 1, 11), None, &utils()));
        assert!(config.is_highlight_end(&utc(2024, 1, 20), None, &utils()));
        assert!(!config.is_highlight_end(&utc(2024, 1, 10), None, &utils()));

        let disabled = DisabledDates {
            dates: vec![utc(2024, 1, 10)],
            ..Default::default()
        };
        assert!(!config.is_highlight_start(&utc(2024, 1, 10), Some(&disabled), &utils()));
    }

    #[test]
    fn test_fixed_mode_uses_local_day() {
        let utils = DateUtils::new(fixed(3));
        let from = utils.make_date(2024, 0, 10).unwrap();
        let to = utils.make_date(2024, 0, 20).unwrap();
        let config = span(from, to);
        // 22:00Z on the 19th is already the 20th at +03:00
        let date = utc_hm(2024, 1, 19, 22, 0);
        assert!(config.is_highlight_end(&date, None, &utils));
        // 21:00Z on the 20th is midnight of the 21st
        assert!(!config.is_highlighted(&utc_hm(2024, 1, 20, 21, 0), None, &utils));
    }

    #[test]
    fn test_serde_config() {
        let json = r#"{"from": "2024-01-10T00:00:00Z", "to": "2024-01-12T00:00:00Z", "includeDisabled": true}"#;
        let config: HighlightedDates = serde_json::from_str(json).unwrap();
        assert!(config.include_disabled);
        assert!(config.is_highlighted(&utc(2024, 1, 11), None, &utils()));

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["includeDisabled"], serde_json::Value::Bool(true));
        assert_eq!(value["daysOfMonth"], serde_json::json!([]));
    }
}
