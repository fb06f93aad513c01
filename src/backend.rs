use log::{trace, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::config::BackendSettings;
use crate::error::Error;

/// The device backend this installation is paired with.
///
/// The backend proxies knowledge engine queries for devices without a private app id and
/// delivers emails to the address the device is registered to.
#[derive(Clone, Debug)]
pub struct Backend {
    client: Client,
    url: String,
    version: String,
    token: Option<String>,
    device_uuid: Option<String>,
}

impl Backend {
    pub fn new(client: Client, settings: &BackendSettings) -> Self {
        Backend {
            client,
            url: settings.url.trim_end_matches('/').to_string(),
            version: settings.version.clone(),
            token: settings.token.clone(),
            device_uuid: settings.device_uuid.clone(),
        }
    }

    /// The full url of a backend path.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::backend::Backend;
    /// # use polymath::config::BackendSettings;
    /// let backend = Backend::new(reqwest::Client::new(), &BackendSettings::default());
    /// assert_eq!(
    ///     backend.endpoint("/wolframAlphaSpoken"),
    ///     "https://api.mycroft.ai/v1/wolframAlphaSpoken"
    /// );
    /// ```
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url,
            self.version,
            path.trim_start_matches('/')
        )
    }

    /// The path of a resource belonging to this device.
    pub fn device_path(&self, path: &str) -> Result<String, Error> {
        let uuid = self.device_uuid.as_ref().ok_or(Error::MissingDeviceUuid)?;

        Ok(format!("device/{uuid}/{}", path.trim_start_matches('/')))
    }

    /// Prepare an authenticated `GET` request.
    pub fn get(&self, path: &str) -> Result<RequestBuilder, Error> {
        let url = self.endpoint(path);
        trace!("GET {url}");

        Ok(self.client.get(url).bearer_auth(self.token()?))
    }

    /// Prepare an authenticated `PUT` request.
    pub fn put(&self, path: &str) -> Result<RequestBuilder, Error> {
        let url = self.endpoint(path);
        trace!("PUT {url}");

        Ok(self.client.put(url).bearer_auth(self.token()?))
    }

    fn token(&self) -> Result<&str, Error> {
        self.token.as_deref().ok_or(Error::MissingBackendToken)
    }
}

/// Fail with [`Error::NotPaired`] if the backend refused the credentials of this device.
///
/// All other responses are passed through unchanged.
pub fn authorized(response: Response) -> Result<Response, Error> {
    if response.status() == StatusCode::UNAUTHORIZED {
        warn!("Request to {} was unauthorized", response.url().path());

        Err(Error::NotPaired)
    } else {
        Ok(response)
    }
}
