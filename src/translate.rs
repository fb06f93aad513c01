use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

use crate::error::Error;

/// Translates questions to English and answers back, since the knowledge engine only understands
/// English.
#[derive(Clone, Debug)]
pub struct Translator {
    client: Client,
    url: String,
}

impl Translator {
    pub fn new(client: Client, url: &str) -> Self {
        Translator {
            client,
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Translate a text between two languages.
    ///
    /// Returns `None` if the response contained no translation.
    ///
    /// # Arguments
    ///
    /// * `text`: The text to translate.
    /// * `from`: The two letter code of the language of the text.
    /// * `to`: The two letter code of the language to translate to.
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Result<Option<String>, Error> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.url))
            .query(&[
                ("client", "gtx"),
                ("sl", from),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::UnexpectedStatus(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        let translation = parse_translation(&body);
        debug!("Translated \"{text}\" ({from}) to {translation:?} ({to})");

        Ok(translation)
    }

    /// Translate a text, keeping the original if the translation fails.
    pub async fn translate_or_keep(&self, text: &str, from: &str, to: &str) -> String {
        match self.translate(text, from, to).await {
            Ok(Some(translation)) => translation,
            Ok(None) => {
                warn!("No translation received for \"{text}\"");

                text.to_string()
            }
            Err(error) => {
                warn!("Translation of \"{text}\" failed: {error}");

                text.to_string()
            }
        }
    }
}

/// Join the translated segments of a response.
///
/// The response is a nested array where the first element contains one array per translated
/// sentence, the translation being the first element of each.
fn parse_translation(response: &Value) -> Option<String> {
    let translation = response
        .get(0)?
        .as_array()?
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect::<String>();

    (!translation.is_empty()).then_some(translation)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn translator(server: &MockServer) -> Translator {
        Translator::new(Client::builder().no_proxy().build().unwrap(), &server.uri())
    }

    #[test]
    fn segments_are_joined() {
        let response = json!([
            [
                ["How tall is ", "Wie hoch ist ", null, null, 10],
                ["Mount Everest?", "der Mount Everest?", null, null, 10]
            ],
            null,
            "de"
        ]);

        assert_eq!(
            parse_translation(&response).as_deref(),
            Some("How tall is Mount Everest?")
        );
        assert_eq!(parse_translation(&json!([[]])), None);
        assert_eq!(parse_translation(&json!({})), None);
    }

    #[tokio::test]
    async fn translate_question() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("sl", "de"))
            .and(query_param("tl", "en"))
            .and(query_param("q", "wer ist angela merkel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                [["who is angela merkel", "wer ist angela merkel", null, null, 10]],
                null,
                "de"
            ])))
            .mount(&server)
            .await;

        let translation = translator(&server)
            .translate("wer ist angela merkel", "de", "en")
            .await
            .unwrap();

        assert_eq!(translation.as_deref(), Some("who is angela merkel"));
    }

    #[tokio::test]
    async fn failed_translation_keeps_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let translator = translator(&server);

        assert!(matches!(
            translator.translate("hallo", "de", "en").await,
            Err(Error::UnexpectedStatus(429))
        ));
        assert_eq!(translator.translate_or_keep("hallo", "de", "en").await, "hallo");
    }
}
