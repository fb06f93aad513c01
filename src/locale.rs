use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Error;

pub const DEFAULT_LANG: &str = "en-us";

/// A localized resource file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    /// Response templates.
    Dialog,
    /// Phrases intents are matched with.
    Vocab,
    /// Patterns used to clean answers.
    Regex,
}

impl Resource {
    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Dialog => "dialog.toml",
            Resource::Vocab => "vocab.toml",
            Resource::Regex => "regex.toml",
        }
    }

    fn builtin(&self, lang: &str) -> Option<&'static str> {
        match (lang, self) {
            ("en-us", Resource::Dialog) => Some(include_str!("../locale/en-us/dialog.toml")),
            ("en-us", Resource::Vocab) => Some(include_str!("../locale/en-us/vocab.toml")),
            ("en-us", Resource::Regex) => Some(include_str!("../locale/en-us/regex.toml")),
            ("de-de", Resource::Dialog) => Some(include_str!("../locale/de-de/dialog.toml")),
            ("de-de", Resource::Vocab) => Some(include_str!("../locale/de-de/vocab.toml")),
            _ => None,
        }
    }
}

/// Load a localized resource.
///
/// Files in `{data_dir}/locale/{lang}/` take precedence over the built-in resources. If a
/// resource does not exist for a language, the English one is used.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use polymath::locale::{self, Resource};
/// let vocab = locale::load(Path::new("missing"), "fr-fr", Resource::Vocab).unwrap();
/// assert!(vocab.contains("Source"));
/// ```
pub fn load(data_dir: &Path, lang: &str, resource: Resource) -> Result<String, Error> {
    let lang = lang.to_lowercase();
    let path = data_dir
        .join("locale")
        .join(&lang)
        .join(resource.file_name());

    if path.is_file() {
        debug!("Loading {}", path.display());

        return Ok(fs::read_to_string(path)?);
    }

    match resource.builtin(&lang) {
        Some(content) => Ok(content.to_string()),
        None => {
            debug!(
                "No {} for {lang}, falling back to {DEFAULT_LANG}",
                resource.file_name()
            );

            Ok(resource
                .builtin(DEFAULT_LANG)
                .unwrap_or_default()
                .to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let lang_dir = dir.path().join("locale/en-us");
        fs::create_dir_all(&lang_dir).unwrap();
        fs::write(lang_dir.join("vocab.toml"), "Give = [\"hand over\"]").unwrap();

        let vocab = load(dir.path(), "en-US", Resource::Vocab).unwrap();

        assert_eq!(vocab, "Give = [\"hand over\"]");
    }

    #[test]
    fn german_dialog_is_builtin() {
        let dialog = load(Path::new("missing"), "de-de", Resource::Dialog).unwrap();

        assert!(dialog.contains("Das weiss ich leider nicht."));
    }

    #[test]
    fn german_regex_falls_back_to_english() {
        let regex = load(Path::new("missing"), "de-de", Resource::Regex).unwrap();

        assert!(regex.contains("Definition"));
    }
}
