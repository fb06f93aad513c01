use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use rand::seq::SliceRandom;
use regex::{Captures, Regex};

use crate::error::Error;
use crate::locale::{self, Resource};

/// Renders responses from named templates.
///
/// Every template can have multiple variants, one of them is picked at random each time it is
/// rendered so the responses do not get repetitive.
#[derive(Debug, Clone)]
pub struct DialogRenderer {
    templates: HashMap<String, Vec<String>>,
    placeholder: Regex,
}

impl DialogRenderer {
    /// Parse templates from TOML.
    ///
    /// The TOML should have the following format:
    ///
    /// ```toml
    /// "dont.know" = ["I don't know.", "No idea."]
    /// "email.subject" = ["Answer to {{query}}"]
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        let templates: HashMap<String, Vec<String>> = toml::from_str(content)?;
        debug!("Loaded {} dialog templates", templates.len());

        Ok(DialogRenderer {
            templates,
            placeholder: Regex::new(r"\{\{(\w+)\}\}")?,
        })
    }

    /// Load the templates for a language.
    pub fn load(data_dir: &Path, lang: &str) -> Result<Self, Error> {
        DialogRenderer::from_toml(&locale::load(data_dir, lang, Resource::Dialog)?)
    }

    /// Render a template.
    ///
    /// All `{{key}}` placeholders are replaced with their values from `data` in a single pass, so
    /// values are never expanded again. Placeholders without a value are left as they are.
    /// Unknown templates are rendered as their name, with dots replaced by spaces.
    ///
    /// # Arguments
    ///
    /// * `name`: The name of the template.
    /// * `data`: The values of the placeholders.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::dialog::DialogRenderer;
    /// let dialogs = DialogRenderer::from_toml("greeting = [\"Hello {{name}}!\"]").unwrap();
    /// assert_eq!(dialogs.render("greeting", &[("name", "Ada")]), "Hello Ada!");
    /// assert_eq!(dialogs.render("no.such.dialog", &[]), "no such dialog");
    /// ```
    pub fn render(&self, name: &str, data: &[(&str, &str)]) -> String {
        let Some(template) = self
            .templates
            .get(name)
            .and_then(|variants| variants.choose(&mut rand::thread_rng()))
        else {
            warn!("Missing dialog {name}");

            return name.replace('.', " ");
        };

        self.placeholder
            .replace_all(template, |captures: &Captures| {
                data.iter()
                    .find(|(key, _)| *key == &captures[1])
                    .map_or_else(|| captures[0].to_string(), |(_, value)| value.to_string())
            })
            .trim()
            .to_string()
    }
}
