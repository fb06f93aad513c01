use std::fmt::{Display, Formatter, Write};

/// Represents a single key on the keyboard.
///
/// Can be parsed from a `char` taken from user input.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum KeyType {
    Key(char),
    Enter,
    CtrlC,
    Illegal,
}

impl KeyType {
    /// Join keys into a string, separated by a separator.
    ///
    /// # Arguments
    ///
    /// * `keys`: The keys to join together.
    /// * `separator`: The separator to separate the keys with.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::cli::key_type::KeyType;
    /// assert_eq!(KeyType::join(&[KeyType::Enter, KeyType::from('s')], " / "), "Enter / s");
    /// assert_eq!(KeyType::join(&[], ", "), "");
    /// ```
    pub fn join(keys: &[KeyType], separator: &str) -> String {
        keys.iter()
            .enumerate()
            .fold(String::new(), |mut output, (i, key)| {
                if i > 0 {
                    output.push_str(separator);
                }
                let _ = write!(output, "{key}");
                output
            })
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Key(key) => write!(f, "{key}"),
            KeyType::Enter => write!(f, "Enter"),
            KeyType::CtrlC => write!(f, "Ctrl+C"),
            KeyType::Illegal => write!(f, "ILLEGAL"),
        }
    }
}

impl From<char> for KeyType {
    fn from(value: char) -> Self {
        match value {
            'a'..='z' | '0'..='9' => KeyType::Key(value),
            'A'..='Z' => KeyType::Key(value.to_ascii_lowercase()),
            '\n' | '\r' => KeyType::Enter,
            '\u{3}' => KeyType::CtrlC,
            _ => KeyType::Illegal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(KeyType::from('Q'), KeyType::Key('q'));
        assert_eq!(KeyType::from('\r'), KeyType::Enter);
        assert_eq!(KeyType::from('\u{3}'), KeyType::CtrlC);
        assert_eq!(KeyType::from('?'), KeyType::Illegal);
    }
}
