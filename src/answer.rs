//! Turning knowledge engine output into something that can be said out loud.

use regex::Regex;

use crate::error::Error;

/// Cleans spoken answers, optionally shortening lists to their first definition.
pub struct AnswerCleaner {
    whitespace: Regex,
    list: Option<Regex>,
}

impl AnswerCleaner {
    /// Create a cleaner.
    ///
    /// # Arguments
    ///
    /// * `list_pattern`: A pattern matching numbered lists. It must contain a `Definition` group,
    /// which is kept if the pattern matches at the start of an answer.
    pub fn new(list_pattern: Option<&str>) -> Result<Self, Error> {
        Ok(AnswerCleaner {
            whitespace: Regex::new(r" \s+")?,
            list: list_pattern
                .map(|pattern| Regex::new(&format!("^(?:{pattern})")))
                .transpose()?,
        })
    }

    /// Clean an answer.
    ///
    /// Repeated whitespace is collapsed, table separators and newlines become commas and
    /// exclamation marks are read as factorials.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::answer::AnswerCleaner;
    /// let cleaner = AnswerCleaner::new(None).unwrap();
    /// assert_eq!(cleaner.clean("5!  is 120"), "5,factorial is 120");
    /// assert_eq!(cleaner.clean("a | b\nc"), "a, b, c");
    /// ```
    pub fn clean(&self, text: &str) -> String {
        let text = self
            .whitespace
            .replace_all(text, " ")
            .replace(" | ", ", ")
            .replace('\n', ", ")
            .replace('!', ",factorial");

        if let Some(definition) = self
            .list
            .as_ref()
            .and_then(|list| list.captures(&text))
            .and_then(|captures| captures.name("Definition"))
        {
            return definition.as_str().to_string();
        }

        text
    }
}

/// Remove everything in parentheses, including nested parentheses.
///
/// Closing parentheses without a matching opening one are kept.
///
/// # Examples
///
/// ```
/// # use polymath::answer::remove_nested_parentheses;
/// assert_eq!(
///     remove_nested_parentheses("Lemurs (/ˈliːmər/ (listen) LEE-mər) are primates"),
///     "Lemurs  are primates"
/// );
/// ```
pub fn remove_nested_parentheses(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut depth = 0_usize;

    for char in text.chars() {
        match char {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => result.push(char),
            _ => {}
        }
    }

    result
}

/// Shorten people data to its first three lines.
///
/// # Examples
///
/// ```
/// # use polymath::answer::summarize_people_data;
/// assert_eq!(
///     summarize_people_data("born 1879\nUlm\ndied 1955\nPrinceton"),
///     "born 1879. Ulm. died 1955"
/// );
/// ```
pub fn summarize_people_data(text: &str) -> String {
    text.split('\n').take(3).collect::<Vec<_>>().join(". ")
}

/// Keep at most the first `count` lines of a text.
pub fn first_lines(text: &str, count: usize) -> String {
    text.split('\n').take(count).collect::<Vec<_>>().join("\n")
}

/// Capitalise the first letter of every word and lowercase all others.
///
/// A word continues only after a cased letter, every other character starts a new word.
///
/// # Examples
///
/// ```
/// # use polymath::answer::title_case;
/// assert_eq!(title_case("mount EVEREST's height"), "Mount Everest'S Height");
/// ```
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for char in text.chars() {
        let cased = char.is_lowercase() || char.is_uppercase();
        if cased {
            if in_word {
                result.extend(char.to_lowercase());
            } else {
                result.extend(char.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(char);
            in_word = false;
        }
    }

    result
}
