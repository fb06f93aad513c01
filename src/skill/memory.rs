use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const FILE_NAME: &str = "last_answer.toml";

/// The last question that was answered, kept so its source can be sent on request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LastAnswer {
    pub query: String,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}

impl LastAnswer {
    pub fn new(query: &str, answer: &str) -> Self {
        LastAnswer {
            query: query.to_string(),
            answer: answer.to_string(),
            answered_at: Utc::now(),
        }
    }

    /// The query as it is used in a knowledge engine url.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::skill::memory::LastAnswer;
    /// let last = LastAnswer::new("how tall is mount everest", "8849 meters");
    /// assert_eq!(last.url_query(), "how+tall+is+mount+everest");
    /// ```
    pub fn url_query(&self) -> String {
        self.query.replace(' ', "+")
    }

    /// Where the last answer is stored in a data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(FILE_NAME)
    }

    /// Read the last answer from a data directory.
    ///
    /// Returns `None` if no question has been answered yet.
    pub fn read(data_dir: &Path) -> Result<Option<Self>, Error> {
        let path = LastAnswer::path(data_dir);

        match fs::read_to_string(&path) {
            Ok(content) => {
                let last = toml::from_str::<LastAnswer>(&content)?;
                debug!("Remembered \"{}\" from {}", last.query, last.answered_at);

                Ok(Some(last))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Error::Io(error)),
        }
    }

    /// Store this answer in a data directory, replacing the previous one.
    pub fn write(&self, data_dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(data_dir)?;
        let path = LastAnswer::path(data_dir);
        trace!("Writing last answer to {}", path.display());

        fs::write(path, toml::to_string(self)?)?;

        Ok(())
    }
}
