//! Turning free-form utterances into something the knowledge engine can answer.

pub mod normalize;
pub mod question;

pub use normalize::normalize;
pub use question::{ParsedQuestion, QuestionParser};
