use async_trait::async_trait;
use log::info;
use serde::Serialize;

use crate::backend::{self, Backend};
use crate::error::Error;

/// This trait is implemented by everything that can email the user.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email to the user.
    ///
    /// # Arguments
    ///
    /// * `title`: The subject of the email.
    /// * `body`: The text of the email.
    /// * `sender`: Who the email is from.
    async fn send_email(&self, title: &str, body: &str, sender: &str) -> Result<(), Error>;
}

#[derive(Serialize)]
struct Message<'a> {
    title: &'a str,
    body: &'a str,
    sender: &'a str,
}

/// Sends emails to the address this device is registered to, through the backend.
pub struct BackendMailer {
    backend: Backend,
}

impl BackendMailer {
    pub fn new(backend: Backend) -> Self {
        BackendMailer { backend }
    }
}

#[async_trait]
impl Mailer for BackendMailer {
    async fn send_email(&self, title: &str, body: &str, sender: &str) -> Result<(), Error> {
        let response = self
            .backend
            .put(&self.backend.device_path("message")?)?
            .json(&Message {
                title,
                body,
                sender,
            })
            .send()
            .await?;
        let response = backend::authorized(response)?;

        if !response.status().is_success() {
            return Err(Error::UnexpectedStatus(response.status().as_u16()));
        }

        info!("Sent email \"{title}\" from {sender}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::BackendSettings;

    use super::*;

    fn mailer(server: &MockServer, device_uuid: Option<&str>) -> BackendMailer {
        BackendMailer::new(Backend::new(
            Client::builder().no_proxy().build().unwrap(),
            &BackendSettings {
                url: server.uri(),
                token: Some("device-token".to_string()),
                device_uuid: device_uuid.map(str::to_string),
                ..BackendSettings::default()
            },
        ))
    }

    #[tokio::test]
    async fn email_is_put_to_device_messages() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/device/1234-abcd/message"))
            .and(header("Authorization", "Bearer device-token"))
            .and(body_json(json!({
                "title": "Subject",
                "body": "Body",
                "sender": "polymath"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        mailer(&server, Some("1234-abcd"))
            .send_email("Subject", "Body", "polymath")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failures_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/device/unpaired/message"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v1/device/broken/message"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(matches!(
            mailer(&server, Some("unpaired")).send_email("a", "b", "c").await,
            Err(Error::NotPaired)
        ));
        assert!(matches!(
            mailer(&server, Some("broken")).send_email("a", "b", "c").await,
            Err(Error::UnexpectedStatus(500))
        ));
        assert!(matches!(
            mailer(&server, None).send_email("a", "b", "c").await,
            Err(Error::MissingDeviceUuid)
        ));
    }
}
