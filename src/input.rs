use crate::format::DateFormat;
use crate::language::LanguageDescriptor;
use crate::parse::{ParseOutcome, ParserConfig};
use crate::types::DateValue;
use crate::utils::DateUtils;

/// What a picker does with its value when a typeable input loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurOutcome {
    Keep,
    /// The typed text is not a date; the selection should be cleared.
    Clear,
}

/// Interprets text typed into a picker's input field.
///
/// Text that parses is remembered and shown back verbatim until the next
/// selection resets it, so the user's own spelling is not reformatted under
/// the cursor.
#[derive(Debug, Clone)]
pub struct TypedInput {
    utils:    DateUtils,
    config:   ParserConfig,
    language: LanguageDescriptor,
    typed:    Option<String>,
}

impl TypedInput {
    pub fn new(utils: DateUtils, config: ParserConfig) -> Self {
        Self {
            utils,
            config,
            language: LanguageDescriptor::default(),
            typed: None,
        }
    }

    pub fn with_language(mut self, language: LanguageDescriptor) -> Self {
        self.language = language;
        self
    }

    pub const fn format(&self) -> &DateFormat {
        self.config.format()
    }

    pub fn typed_text(&self) -> Option<&str> {
        self.typed.as_deref()
    }

    /// Text to show for `selected`: the remembered typed text if any,
    /// otherwise the formatted selection. `None` when nothing is selected.
    pub fn formatted_value(&self, selected: Option<&DateValue>) -> Option<String> {
        let selected = selected?;
        if let Some(typed) = &self.typed {
            return Some(typed.clone());
        }
        Some(self.format().format(&self.utils, selected, Some(&self.language)))
    }

    /// Reads `text` after a key press, remembering it when it parses.
    pub fn key_up(&mut self, text: &str) -> Option<DateValue> {
        match self.config.parse(text, Some(&self.language)) {
            ParseOutcome::Parsed(date) => {
                self.typed = Some(text.to_owned());
                Some(date)
            }
            ParseOutcome::Unparsed(_) => None,
        }
    }

    /// Checks `text` when the input loses focus, forgetting it if it does
    /// not parse.
    pub fn blur(&mut self, text: &str) -> BlurOutcome {
        if self.config.parse(text, Some(&self.language)).is_parsed() {
            return BlurOutcome::Keep;
        }
        log::debug!("clearing unparsable input {text:?}");
        self.typed = None;
        BlurOutcome::Clear
    }

    /// Forgets typed text so the next render shows the formatted selection.
    pub fn reset(&mut self) {
        self.typed = None;
    }
}
