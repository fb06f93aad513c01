use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_CONFIG_PATH: &str = "polymath.toml";

/// The unit system answers should be given in.
#[derive(ValueEnum, Serialize, Deserialize, Default, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Display for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Units::Metric => "metric",
                Units::Imperial => "imperial",
            }
        )
    }
}

/// Where the user is, used by the knowledge engine for questions like *"What time is sunset?"*.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// The location in the `latitude,longitude` format expected by the knowledge engine.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::config::Location;
    /// let location = Location { latitude: 47.5, longitude: 7.25 };
    /// assert_eq!(location.geolocation(), "47.5,7.25");
    /// ```
    pub fn geolocation(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl Default for Location {
    fn default() -> Self {
        // Lawrence, Kansas
        Location {
            latitude: 38.971669,
            longitude: -95.23525,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WolframSettings {
    /// A private app id. If this is missing, queries are proxied through the backend.
    pub app_id: Option<String>,
    pub url: String,
}

impl Default for WolframSettings {
    fn default() -> Self {
        WolframSettings {
            app_id: None,
            url: "http://api.wolframalpha.com".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BackendSettings {
    pub url: String,
    pub version: String,
    pub token: Option<String>,
    pub device_uuid: Option<String>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            url: "https://api.mycroft.ai".to_string(),
            version: "v1".to_string(),
            token: None,
            device_uuid: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TranslateSettings {
    pub url: String,
}

impl Default for TranslateSettings {
    fn default() -> Self {
        TranslateSettings {
            url: "https://translate.googleapis.com".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub lang: String,
    pub units: Units,
    /// Translate non-English questions to English and the answers back.
    pub autotranslate: bool,
    pub data_dir: PathBuf,
    pub location: Location,
    pub wolfram: WolframSettings,
    pub backend: BackendSettings,
    pub translate: TranslateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            lang: "en-us".to_string(),
            units: Units::default(),
            autotranslate: true,
            data_dir: PathBuf::from("data"),
            location: Location::default(),
            wolfram: WolframSettings::default(),
            backend: BackendSettings::default(),
            translate: TranslateSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from a TOML file.
    ///
    /// Every field is optional, missing fields are filled in with their defaults. If the file does
    /// not exist at all, the default settings are returned.
    ///
    /// # Arguments
    ///
    /// * `path`: The path to the TOML file.
    pub fn read_toml<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => {
                info!("Reading settings from {}", path.display());

                Settings::from_toml_str(&content)
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                warn!("No settings found at {}, using defaults", path.display());

                Ok(Settings::default())
            }
            Err(error) => Err(Error::Io(error)),
        }
    }

    /// Parse settings from a TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::config::{Settings, Units};
    /// let settings = Settings::from_toml_str("lang = \"de-de\"\nunits = \"imperial\"").unwrap();
    /// assert_eq!(settings.lang, "de-de");
    /// assert_eq!(settings.units, Units::Imperial);
    /// assert!(settings.autotranslate);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Override settings with values from the environment.
    ///
    /// Secrets should not live in the settings file, so the app id, backend url, backend token and
    /// device uuid can be set with `POLYMATH_WOLFRAM_APP_ID`, `POLYMATH_BACKEND_URL`,
    /// `POLYMATH_BACKEND_TOKEN` and `POLYMATH_DEVICE_UUID`.
    pub fn with_env(mut self) -> Self {
        if let Ok(app_id) = dotenvy::var("POLYMATH_WOLFRAM_APP_ID") {
            debug!("Using app id from environment");
            self.wolfram.app_id = Some(app_id);
        }
        if let Ok(url) = dotenvy::var("POLYMATH_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(token) = dotenvy::var("POLYMATH_BACKEND_TOKEN") {
            self.backend.token = Some(token);
        }
        if let Ok(uuid) = dotenvy::var("POLYMATH_DEVICE_UUID") {
            self.backend.device_uuid = Some(uuid);
        }

        self
    }

    /// The two letter language code.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::config::Settings;
    /// let settings = Settings { lang: "de-ch".to_string(), ..Settings::default() };
    /// assert_eq!(settings.lang_prefix(), "de");
    /// ```
    pub fn lang_prefix(&self) -> &str {
        self.lang.get(..2).unwrap_or(self.lang.as_str())
    }

    /// Whether questions and answers have to be translated to and from English.
    pub fn needs_translation(&self) -> bool {
        self.autotranslate && self.lang_prefix() != "en"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn full_settings_file() {
        let settings = Settings::from_toml_str(
            r#"
            lang = "fr-fr"
            units = "imperial"
            autotranslate = false
            data_dir = "/tmp/polymath"

            [location]
            latitude = 46.95
            longitude = 7.45

            [wolfram]
            app_id = "ABCDEF-1234567890"

            [backend]
            token = "secret"
            device_uuid = "1234"
            "#,
        )
        .unwrap();

        assert_eq!(settings.lang, "fr-fr");
        assert_eq!(settings.units, Units::Imperial);
        assert!(!settings.autotranslate);
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/polymath"));
        assert_eq!(settings.location.geolocation(), "46.95,7.45");
        assert_eq!(settings.wolfram.app_id.as_deref(), Some("ABCDEF-1234567890"));
        assert_eq!(settings.wolfram.url, "http://api.wolframalpha.com");
        assert_eq!(settings.backend.version, "v1");
        assert_eq!(settings.backend.token.as_deref(), Some("secret"));
    }

    #[test]
    fn invalid_units_are_rejected() {
        assert!(matches!(
            Settings::from_toml_str("units = \"parsecs\""),
            Err(Error::TomlDeserialize(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::read_toml(dir.path().join("missing.toml")).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn read_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lang = \"en-gb\"").unwrap();

        let settings = Settings::read_toml(file.path()).unwrap();

        assert_eq!(settings.lang, "en-gb");
        assert!(!settings.needs_translation());
    }

    #[test]
    fn translation_only_for_other_languages() {
        let mut settings = Settings {
            lang: "de-de".to_string(),
            ..Settings::default()
        };
        assert!(settings.needs_translation());

        settings.autotranslate = false;
        assert!(!settings.needs_translation());
    }
}
