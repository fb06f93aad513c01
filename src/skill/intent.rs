use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::locale::{self, Resource};

/// The intent of asking for the source of the last answer, e.g. *"send me the source on that"*.
pub const INFO_INTENT: &str = "Info";

/// An intent that is recognised by the presence of phrases from a number of vocabularies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub name: String,
    pub required: Vec<String>,
}

impl Intent {
    pub fn new(name: &str, required: &[&str]) -> Self {
        Intent {
            name: name.to_string(),
            required: required.iter().map(|vocab| vocab.to_string()).collect(),
        }
    }
}

/// Matches utterances against keyword intents.
pub struct IntentMatcher {
    vocabulary: HashMap<String, Vec<Vec<String>>>,
    intents: Vec<Intent>,
}

impl IntentMatcher {
    /// Create a matcher from vocabularies in TOML.
    ///
    /// The TOML maps every vocabulary to its phrases:
    ///
    /// ```toml
    /// Give = ["send", "show"]
    /// Source = ["source", "more information"]
    /// ```
    pub fn from_toml(content: &str, intents: Vec<Intent>) -> Result<Self, Error> {
        let vocabulary: HashMap<String, Vec<String>> = toml::from_str(content)?;
        let vocabulary = vocabulary
            .into_iter()
            .map(|(name, phrases)| {
                let phrases = phrases
                    .iter()
                    .map(|phrase| words(phrase))
                    .filter(|phrase| !phrase.is_empty())
                    .collect();

                (name, phrases)
            })
            .collect::<HashMap<_, _>>();
        debug!("Loaded {} vocabularies", vocabulary.len());

        Ok(IntentMatcher { vocabulary, intents })
    }

    /// Load the vocabularies for a language with the intents of the skill.
    pub fn load(data_dir: &Path, lang: &str) -> Result<Self, Error> {
        IntentMatcher::from_toml(
            &locale::load(data_dir, lang, Resource::Vocab)?,
            vec![Intent::new(INFO_INTENT, &["Give", "Source"])],
        )
    }

    /// Find the first intent whose vocabularies all occur in an utterance.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::skill::intent::{Intent, IntentMatcher};
    /// let matcher = IntentMatcher::from_toml(
    ///     "Give = [\"send\"]\nSource = [\"source\"]",
    ///     vec![Intent::new("Info", &["Give", "Source"])],
    /// )
    /// .unwrap();
    /// assert!(matcher.find("Send me the source on that").is_some());
    /// assert!(matcher.find("What is the source of the Nile?").is_none());
    /// ```
    pub fn find(&self, utterance: &str) -> Option<&Intent> {
        let utterance = words(utterance);

        self.intents.iter().find(|intent| {
            intent
                .required
                .iter()
                .all(|vocab| self.contains_vocab(&utterance, vocab))
        })
    }

    fn contains_vocab(&self, utterance: &[String], vocab: &str) -> bool {
        self.vocabulary.get(vocab).is_some_and(|phrases| {
            phrases.iter().any(|phrase| {
                utterance
                    .windows(phrase.len())
                    .any(|window| window == phrase.as_slice())
            })
        })
    }
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
