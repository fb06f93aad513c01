use std::fmt::{Display, Formatter};

use regex::{Captures, Regex};

use crate::error::Error;

/// A question split into its question word, its verb and what is being asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub question_word: String,
    pub question_verb: String,
    pub query: String,
}

impl ParsedQuestion {
    /// The question in a canonical *word verb query* order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::parse::QuestionParser;
    /// let parser = QuestionParser::new().unwrap();
    /// let question = parser.parse("tell me when america was founded").unwrap();
    /// assert_eq!(question.query_text(), "when was america founded");
    /// ```
    pub fn query_text(&self) -> String {
        format!(
            "{} {} {}",
            self.question_word, self.question_verb, self.query
        )
    }
}

impl Display for ParsedQuestion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.query_text())
    }
}

/// A simple English question parser.
///
/// It is far from complete, but it recognises most ways of asking for facts and rejects
/// utterances that are not questions at all.
pub struct QuestionParser {
    patterns: Vec<Regex>,
}

impl QuestionParser {
    pub fn new() -> Result<Self, Error> {
        Ok(QuestionParser {
            patterns: vec![
                // "tell me when america was founded"
                Regex::new(
                    r"(?i)^.*(?P<word>who|what|when|where|why|which|whose) (?P<query1>.*) (?P<verb>is|are|was|were) (?P<query2>.*)",
                )?,
                // "how do crickets chirp"
                Regex::new(
                    r"(?i)^.*(?P<word>who|what|when|where|why|which|how) (?P<verb>\w+) (?P<query>.*)",
                )?,
            ],
        })
    }

    /// Parse an utterance into a question.
    ///
    /// The patterns are tried in order and the first match wins. Returns `None` if the utterance
    /// does not look like a question.
    ///
    /// # Arguments
    ///
    /// * `utterance`: The normalized utterance.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::parse::QuestionParser;
    /// let parser = QuestionParser::new().unwrap();
    /// let question = parser.parse("how tall is mount everest").unwrap();
    /// assert_eq!(question.question_word, "how");
    /// assert_eq!(question.question_verb, "tall");
    /// assert_eq!(question.query, "is mount everest");
    /// assert!(parser.parse("play some music").is_none());
    /// ```
    pub fn parse(&self, utterance: &str) -> Option<ParsedQuestion> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.captures(utterance))
            .map(|captures| from_captures(&captures))
    }
}

fn from_captures(captures: &Captures) -> ParsedQuestion {
    let group = |name: &str| {
        captures
            .name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    let query = match captures.name("query") {
        Some(query) => query.as_str().to_string(),
        None => format!("{} {}", group("query1"), group("query2")),
    };

    ParsedQuestion {
        question_word: group("word"),
        question_verb: group("verb"),
        query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(utterance: &str) -> Option<ParsedQuestion> {
        QuestionParser::new().unwrap().parse(utterance)
    }

    #[test]
    fn split_query_is_joined() {
        let question = parse("tell me when america was founded").unwrap();

        assert_eq!(question.question_word, "when");
        assert_eq!(question.question_verb, "was");
        assert_eq!(question.query, "america founded");
    }

    #[test]
    fn simple_what_question() {
        let question = parse("what is the capital of france").unwrap();

        assert_eq!(question.question_word, "what");
        assert_eq!(question.question_verb, "is");
        assert_eq!(question.query, "the capital of france");
    }

    #[test]
    fn case_is_ignored() {
        let question = parse("Who Are the Beatles").unwrap();

        assert_eq!(question.question_word, "Who");
        assert_eq!(question.question_verb, "Are");
        assert_eq!(question.query, "the Beatles");
    }

    #[test]
    fn how_only_matches_second_pattern() {
        let question = parse("how do crickets chirp").unwrap();

        assert_eq!(question.query_text(), "how do crickets chirp");
    }

    #[test]
    fn statements_are_not_questions() {
        assert!(parse("turn off the lights").is_none());
        assert!(parse("what").is_none());
        assert!(parse("").is_none());
    }
}
