use serde::Deserialize;
use serde_json::Value;

use crate::answer::{first_lines, remove_nested_parentheses, summarize_people_data, title_case};

/// Pods that hold an answer, in order of preference.
pub const ANSWER_POD_IDS: &[&str] = &[
    "Value",
    "NotableFacts:PeopleData",
    "BasicInformation:PeopleData",
    "Definition",
    "DecimalApproximation",
];

/// Scanners whose answers are best presented with a picture.
const IMAGE_SCANNERS: &[&str] = &["Data"];
/// Scanners whose answers are best presented as text only.
const TEXT_SCANNERS: &[&str] = &["Simplification"];

/// The wrapper object of a full results response.
#[derive(Deserialize, Debug)]
pub(crate) struct FullResults {
    pub queryresult: QueryResult,
}

/// The full results of a query.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct QueryResult {
    pub success: bool,
    /// Either `false` or an object describing the error.
    pub error: Value,
    pub pods: Vec<Pod>,
}

/// A pod is one block of the results, for example the input interpretation or a definition.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Pod {
    pub id: String,
    pub title: String,
    pub scanner: String,
    pub position: u32,
    pub primary: bool,
    pub subpods: Vec<Subpod>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Subpod {
    pub title: String,
    pub plaintext: String,
    pub imagesource: Option<String>,
}

/// A short title for an answer and where to find a picture of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualAnswer {
    pub title: String,
    pub image_source: Option<String>,
}

impl Pod {
    /// The first non-empty plaintext of this pod.
    pub fn text(&self) -> Option<String> {
        self.subpods
            .iter()
            .map(|subpod| subpod.plaintext.as_str())
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }

    pub fn image_source(&self) -> Option<&str> {
        self.subpods
            .iter()
            .find_map(|subpod| subpod.imagesource.as_deref())
    }
}

impl QueryResult {
    pub fn has_error(&self) -> bool {
        !matches!(self.error, Value::Null | Value::Bool(false))
    }

    /// The pods marked as a result, either by being primary or by their title.
    pub fn results(&self) -> impl Iterator<Item = &Pod> {
        self.pods
            .iter()
            .filter(|pod| pod.primary || pod.title == "Result")
    }

    /// The pod with exactly this id.
    pub fn pod(&self, id: &str) -> Option<&Pod> {
        self.pods.iter().find(|pod| pod.id == id)
    }

    /// The text of the first pod whose id contains `id`.
    pub fn find_pod_id(&self, id: &str) -> Option<String> {
        self.pods
            .iter()
            .filter(|pod| pod.id.contains(id))
            .find_map(Pod::text)
    }

    /// The text of the pod at a position.
    pub fn find_position(&self, position: u32) -> Option<String> {
        self.pods
            .iter()
            .find(|pod| pod.position == position)
            .and_then(Pod::text)
    }

    /// Find the best textual answer in these results.
    ///
    /// Result pods are preferred. After that, pods with well-known answer ids are searched in the
    /// order of [`ANSWER_POD_IDS`] and, as a last resort, the second pod (position 200) is used.
    pub fn answer_text(&self) -> Option<String> {
        if let Some(text) = self.results().find_map(Pod::text) {
            return Some(text);
        }

        for id in ANSWER_POD_IDS {
            if let Some(text) = self.find_pod_id(id) {
                return Some(if id.ends_with(":PeopleData") {
                    summarize_people_data(&text)
                } else {
                    first_lines(&text, 5)
                });
            }
        }

        self.find_position(200)
    }

    /// Find a title and an image for these results.
    ///
    /// The first pod is always the input interpretation, the pod after it decides how the
    /// answer is presented. Returns `None` if there is no such pod.
    pub fn visual_answer(&self) -> Option<VisualAnswer> {
        let primary = self.pods.get(1)?;

        if TEXT_SCANNERS.contains(&primary.scanner.as_str()) {
            let question = self.pod("Input").and_then(Pod::text).unwrap_or_default();
            let answer = primary.text().unwrap_or_default();

            return Some(VisualAnswer {
                title: format!("{question} = {answer}"),
                image_source: None,
            });
        }

        let image_source = if IMAGE_SCANNERS.contains(&primary.scanner.as_str()) {
            self.pods
                .iter()
                .find_map(Pod::image_source)
                .map(str::to_string)
        } else {
            None
        };

        Some(VisualAnswer {
            title: self.title()?,
            image_source,
        })
    }

    fn title(&self) -> Option<String> {
        let title = self
            .pod("Result")
            .or_else(|| self.pod("Input"))
            .and_then(Pod::text)
            .or_else(|| self.pods.iter().find_map(Pod::text))?;

        Some(title_case(remove_nested_parentheses(&title).trim()))
    }
}
