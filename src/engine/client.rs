use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response};

use crate::backend::{self, Backend};
use crate::config::Settings;
use crate::engine::result::{FullResults, QueryResult};
use crate::engine::{KnowledgeEngine, Location, Units};
use crate::error::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Endpoint {
    Spoken,
    FullResults,
}

impl Endpoint {
    fn direct_path(&self) -> &'static str {
        match self {
            Endpoint::Spoken => "v1/spoken",
            Endpoint::FullResults => "v2/query",
        }
    }

    fn backend_path(&self) -> &'static str {
        match self {
            Endpoint::Spoken => "wolframAlphaSpoken",
            Endpoint::FullResults => "wa",
        }
    }
}

/// How the client reaches Wolfram|Alpha.
#[derive(Clone, Debug)]
pub enum Access {
    /// Directly, with a private app id.
    Direct { url: String, app_id: String },
    /// Proxied through the device backend.
    Backend(Backend),
}

/// A client for the Wolfram|Alpha spoken and full results APIs.
pub struct WolframClient {
    client: Client,
    access: Access,
}

impl WolframClient {
    pub fn new(client: Client, access: Access) -> Self {
        WolframClient { client, access }
    }

    /// Create a client as configured in the settings.
    ///
    /// If a private app id is set, Wolfram|Alpha is queried directly. Otherwise all queries go
    /// through the backend.
    pub fn from_settings(client: Client, settings: &Settings) -> Self {
        let access = match &settings.wolfram.app_id {
            Some(app_id) => {
                debug!("Using private Wolfram|Alpha app id");

                Access::Direct {
                    url: settings.wolfram.url.trim_end_matches('/').to_string(),
                    app_id: app_id.clone(),
                }
            }
            None => Access::Backend(Backend::new(client.clone(), &settings.backend)),
        };

        WolframClient::new(client, access)
    }

    fn request(&self, endpoint: Endpoint) -> Result<RequestBuilder, Error> {
        match &self.access {
            Access::Direct { url, app_id } => Ok(self
                .client
                .get(format!("{url}/{}", endpoint.direct_path()))
                .query(&[("appid", app_id)])),
            Access::Backend(backend) => backend.get(endpoint.backend_path()),
        }
    }

    /// Send a request and return the response if it was successful.
    async fn send(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<Option<Response>, Error> {
        let response = backend::authorized(self.request(endpoint)?.query(params).send().await?)?;

        if response.status().is_success() {
            Ok(Some(response))
        } else {
            warn!(
                "Wolfram|Alpha could not answer, responded with {}",
                response.status()
            );

            Ok(None)
        }
    }
}

#[async_trait]
impl KnowledgeEngine for WolframClient {
    async fn spoken(
        &self,
        query: &str,
        location: &Location,
        units: Units,
    ) -> Result<Option<String>, Error> {
        debug!("Asking Wolfram|Alpha for a spoken answer to \"{query}\"");

        let params = [
            ("i", query.to_string()),
            ("geolocation", location.geolocation()),
            ("units", units.to_string()),
        ];

        match self.send(Endpoint::Spoken, &params).await? {
            Some(response) => Ok(Some(response.text().await?)),
            None => Ok(None),
        }
    }

    async fn full_results(
        &self,
        query: &str,
        location: &Location,
        units: Units,
    ) -> Result<Option<QueryResult>, Error> {
        debug!("Asking Wolfram|Alpha for full results of \"{query}\"");

        let params = [
            ("input", query.to_string()),
            ("geolocation", location.geolocation()),
            ("units", units.to_string()),
            ("mode", "Default".to_string()),
            ("format", "image,plaintext".to_string()),
            ("output", "json".to_string()),
        ];

        match self.send(Endpoint::FullResults, &params).await? {
            Some(response) => {
                let results: FullResults = serde_json::from_str(&response.text().await?)?;

                Ok(Some(results.queryresult))
            }
            None => Ok(None),
        }
    }

    async fn full_results_raw(&self, query: &str) -> Result<Option<String>, Error> {
        let params = [("input", query.to_string()), ("output", "json".to_string())];

        match self.send(Endpoint::FullResults, &params).await? {
            Some(response) => Ok(Some(response.text().await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::BackendSettings;

    use super::*;

    fn http() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    fn direct(server: &MockServer) -> WolframClient {
        WolframClient::new(
            http(),
            Access::Direct {
                url: server.uri(),
                app_id: "test-app-id".to_string(),
            },
        )
    }

    fn proxied(server: &MockServer) -> WolframClient {
        WolframClient::new(
            http(),
            Access::Backend(Backend::new(
                http(),
                &BackendSettings {
                    url: server.uri(),
                    token: Some("device-token".to_string()),
                    ..BackendSettings::default()
                },
            )),
        )
    }

    #[tokio::test]
    async fn direct_spoken_answer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/spoken"))
            .and(query_param("appid", "test-app-id"))
            .and(query_param("i", "how tall is mount everest"))
            .and(query_param("geolocation", "47.5,7.25"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "The height of Mount Everest is about 29032 feet",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let answer = direct(&server)
            .spoken(
                "how tall is mount everest",
                &Location {
                    latitude: 47.5,
                    longitude: 7.25,
                },
                Units::Imperial,
            )
            .await
            .unwrap();

        assert_eq!(
            answer.as_deref(),
            Some("The height of Mount Everest is about 29032 feet")
        );
    }

    #[tokio::test]
    async fn not_understood_is_no_answer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/spoken"))
            .respond_with(
                ResponseTemplate::new(501)
                    .set_body_string("Wolfram|Alpha did not understand your input"),
            )
            .mount(&server)
            .await;

        let answer = direct(&server)
            .spoken("blorp", &Location::default(), Units::Metric)
            .await
            .unwrap();

        assert_eq!(answer, None);
    }

    #[tokio::test]
    async fn proxied_spoken_answer_uses_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/wolframAlphaSpoken"))
            .and(header("Authorization", "Bearer device-token"))
            .and(query_param("i", "what is 2 plus 2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("4"))
            .expect(1)
            .mount(&server)
            .await;

        let answer = proxied(&server)
            .spoken("what is 2 plus 2", &Location::default(), Units::Metric)
            .await
            .unwrap();

        assert_eq!(answer.as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn unauthorized_means_not_paired() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = proxied(&server)
            .spoken("what is 2 plus 2", &Location::default(), Units::Metric)
            .await;

        assert!(matches!(result, Err(Error::NotPaired)));
    }

    #[tokio::test]
    async fn full_results_are_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/query"))
            .and(query_param("input", "pi"))
            .and(query_param("output", "json"))
            .and(query_param("format", "image,plaintext"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queryresult": {
                    "success": true,
                    "error": false,
                    "pods": [{
                        "title": "Decimal approximation",
                        "id": "DecimalApproximation",
                        "scanner": "Numeric",
                        "position": 200,
                        "subpods": [{ "title": "", "plaintext": "3.1415926535897932384626433832795028841971693993751058209749445923..." }]
                    }]
                }
            })))
            .mount(&server)
            .await;

        let result = direct(&server)
            .full_results("pi", &Location::default(), Units::Metric)
            .await
            .unwrap()
            .unwrap();

        assert!(result.success);
        assert_eq!(result.pods.len(), 1);
        assert!(result
            .answer_text()
            .is_some_and(|answer| answer.starts_with("3.14159")));
    }

    #[tokio::test]
    async fn raw_full_results_through_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/wa"))
            .and(query_param("input", "pi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"queryresult\":{}}"))
            .mount(&server)
            .await;

        let raw = proxied(&server).full_results_raw("pi").await.unwrap();

        assert_eq!(raw.as_deref(), Some("{\"queryresult\":{}}"));
    }
}
