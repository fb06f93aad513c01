const ARTICLES: &[&str] = &["a", "an", "the"];

const NUMBERS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "is not"),
    ("aren't", "are not"),
    ("can't", "can not"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("gonna", "going to"),
    ("gotta", "got to"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("how'd", "how did"),
    ("how'll", "how will"),
    ("how's", "how is"),
    ("i'd", "I would"),
    ("i'll", "I will"),
    ("i'm", "I am"),
    ("i've", "I have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("mightn't", "might not"),
    ("might've", "might have"),
    ("mustn't", "must not"),
    ("must've", "must have"),
    ("needn't", "need not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("should've", "should have"),
    ("that's", "that is"),
    ("that'll", "that will"),
    ("there's", "there is"),
    ("there're", "there are"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'd", "what did"),
    ("what'll", "what will"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("whats", "what is"),
    ("what've", "what have"),
    ("when's", "when is"),
    ("when'd", "when did"),
    ("where'd", "where did"),
    ("where's", "where is"),
    ("where've", "where have"),
    ("who'd", "who would"),
    ("who'll", "who will"),
    ("who're", "who are"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("why'd", "why did"),
    ("why're", "why are"),
    ("why's", "why is"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("would've", "would have"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Normalize an English utterance so it can be parsed more reliably.
///
/// Contractions are expanded, the numbers zero to twenty are written as digits and all whitespace
/// is collapsed into single spaces. Articles are only removed if `remove_articles` is set.
///
/// # Arguments
///
/// * `utterance`: The utterance to normalize.
/// * `remove_articles`: Whether to drop *a*, *an* and *the*.
///
/// # Examples
///
/// ```
/// # use polymath::parse::normalize;
/// assert_eq!(normalize("What's  two plus three", false), "what is 2 plus 3");
/// assert_eq!(normalize("Who is the president", true), "Who is president");
/// ```
pub fn normalize(utterance: &str, remove_articles: bool) -> String {
    utterance
        .split_whitespace()
        .filter_map(|word| {
            let lowercase = word.replace('\u{2019}', "'").to_lowercase();

            if remove_articles && ARTICLES.contains(&lowercase.as_str()) {
                return None;
            }
            if let Some((_, expanded)) = CONTRACTIONS.iter().find(|(c, _)| *c == lowercase) {
                return Some(expanded.to_string());
            }
            if let Some(number) = NUMBERS.iter().position(|n| *n == lowercase) {
                return Some(number.to_string());
            }

            Some(word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
