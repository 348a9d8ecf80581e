//! Wake-phrase detection
//!
//! An utterance addresses the assistant only when the wake phrase opens
//! it. Mentions of the phrase mid-utterance never trigger.

/// Default wake phrase when none is configured.
pub const DEFAULT_WAKE_PHRASE: &str = "hey assistant";

/// Outcome of matching an utterance against the wake phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Utterance does not start with the wake phrase
    None,

    /// Wake phrase spoken alone, no question to answer
    PhraseOnly,

    /// Wake phrase followed by a question
    Question(String),
}

/// Matches the configured wake phrase as a case-insensitive prefix and
/// extracts the question that follows it.
#[derive(Debug, Clone)]
pub struct WakeWordDetector {
    phrase: String,
}

impl WakeWordDetector {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Decide whether `utterance` is addressed to the assistant.
    ///
    /// The utterance is trimmed, then the wake phrase is matched as a
    /// case-insensitive prefix. The question is the remainder after the
    /// matched prefix, with surrounding whitespace and any punctuation
    /// separating it from the phrase ("Hey Assistant, ...") stripped.
    pub fn detect(&self, utterance: &str) -> Detection {
        let trimmed = utterance.trim();

        match strip_prefix_ignore_case(trimmed, &self.phrase) {
            Some(rest) => {
                let question = rest
                    .trim_start_matches(|c: char| {
                        c.is_whitespace() || matches!(c, ',' | ':' | ';' | '.' | '!' | '?' | '-')
                    })
                    .trim_end();
                if question.is_empty() {
                    Detection::PhraseOnly
                } else {
                    Detection::Question(question.to_string())
                }
            }
            None => Detection::None,
        }
    }
}

impl Default for WakeWordDetector {
    fn default() -> Self {
        Self::new(DEFAULT_WAKE_PHRASE)
    }
}

/// Strip `prefix` from the start of `text`, comparing case-insensitively.
/// Returns the remainder on a match.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text;

    for expected in prefix.chars() {
        let mut chars = rest.chars();
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        rest = chars.as_str();
    }

    Some(rest)
}
