use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use log::{debug, error, info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::answer::AnswerCleaner;
use crate::backend::Backend;
use crate::config::Settings;
use crate::dialog::DialogRenderer;
use crate::engine::client::WolframClient;
use crate::engine::KnowledgeEngine;
use crate::error::Error;
use crate::image;
use crate::locale::{self, Resource};
use crate::mail::{BackendMailer, Mailer};
use crate::parse::{normalize, QuestionParser};
use crate::skill::intent::{IntentMatcher, INFO_INTENT};
use crate::skill::memory::LastAnswer;
use crate::translate::Translator;

pub mod intent;
pub mod memory;

/// Who source emails are sent from.
pub const SENDER: &str = "polymath";

/// How well a skill can answer a query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchLevel {
    /// A general knowledge answer, used when no specialised skill matched.
    General,
}

/// What an answer is based on, kept to send the source later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceData {
    pub query: String,
    pub answer: String,
}

/// A query the skill can answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatch {
    /// The phrase that was matched, in the language of the user.
    pub phrase: String,
    pub level: MatchLevel,
    pub answer: String,
    pub data: SourceData,
}

/// The response of the skill to an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The question was answered.
    Answer(QueryMatch),
    /// A dialog was rendered, e.g. to confirm an email was sent or to apologise.
    Dialog { name: &'static str, text: String },
}

impl Response {
    /// What should be said to the user.
    pub fn text(&self) -> &str {
        match self {
            Response::Answer(query_match) => &query_match.answer,
            Response::Dialog { text, .. } => text,
        }
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// A visual answer with an optional image saved to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visual {
    pub title: String,
    /// The best textual answer in the full results.
    pub answer: Option<String>,
    pub image: Option<PathBuf>,
}

/// The fallback skill answering general knowledge questions.
///
/// The skill only handles utterances that no other handler claimed. Questions are forwarded to a
/// [`KnowledgeEngine`], the last answer is remembered so its source can be emailed on request.
pub struct Skill {
    settings: Settings,
    engine: Box<dyn KnowledgeEngine>,
    mailer: Box<dyn Mailer>,
    translator: Translator,
    client: Client,
    parser: QuestionParser,
    cleaner: AnswerCleaner,
    dialogs: DialogRenderer,
    intents: IntentMatcher,
    last_answer: Option<LastAnswer>,
}

impl Skill {
    /// Create a skill with a specific knowledge engine and mailer.
    ///
    /// This loads all localized resources and the last answer from the data directory.
    ///
    /// # Arguments
    ///
    /// * `settings`: The settings of the skill.
    /// * `client`: The client used to translate and to download images.
    /// * `engine`: The knowledge engine answering questions.
    /// * `mailer`: Where source emails are sent through.
    pub fn new(
        settings: Settings,
        client: Client,
        engine: Box<dyn KnowledgeEngine>,
        mailer: Box<dyn Mailer>,
    ) -> Result<Self, Error> {
        Ok(Skill {
            translator: Translator::new(client.clone(), &settings.translate.url),
            client,
            parser: QuestionParser::new()?,
            cleaner: load_cleaner(&settings)?,
            dialogs: DialogRenderer::load(&settings.data_dir, &settings.lang)?,
            intents: IntentMatcher::load(&settings.data_dir, &settings.lang)?,
            last_answer: LastAnswer::read(&settings.data_dir)?,
            settings,
            engine,
            mailer,
        })
    }

    /// Create a skill that asks Wolfram|Alpha and sends emails through the backend.
    pub fn from_settings(settings: Settings) -> Result<Self, Error> {
        let client = Client::new();
        let engine = WolframClient::from_settings(client.clone(), &settings);
        let mailer = BackendMailer::new(Backend::new(client.clone(), &settings.backend));

        Skill::new(settings, client, Box::new(engine), Box::new(mailer))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_answer(&self) -> Option<&LastAnswer> {
        self.last_answer.as_ref()
    }

    /// Apply changed settings.
    ///
    /// Localized resources are reloaded if the language changed. The knowledge engine and mailer
    /// are kept.
    pub fn on_settings_changed(&mut self, settings: Settings) -> Result<(), Error> {
        debug!("Settings changed, autotranslate: {}", settings.autotranslate);

        if settings.lang != self.settings.lang || settings.data_dir != self.settings.data_dir {
            self.cleaner = load_cleaner(&settings)?;
            self.dialogs = DialogRenderer::load(&settings.data_dir, &settings.lang)?;
            self.intents = IntentMatcher::load(&settings.data_dir, &settings.lang)?;
        }
        if settings.translate != self.settings.translate {
            self.translator = Translator::new(self.client.clone(), &settings.translate.url);
        }
        self.settings = settings;

        Ok(())
    }

    /// Handle an utterance no other skill wanted.
    ///
    /// Requests for the source of the last answer are handled first, everything else is treated
    /// as a question. If the question can't be answered, the user is told so.
    ///
    /// # Arguments
    ///
    /// * `utterance`: What the user said.
    pub async fn handle_utterance(&mut self, utterance: &str) -> Result<Response, Error> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(Error::EmptyQuery);
        }

        if self
            .intents
            .find(utterance)
            .is_some_and(|intent| intent.name == INFO_INTENT)
        {
            return self.handle_get_sources().await;
        }

        let response = match self.match_query_phrase(utterance).await {
            Ok(Some(query_match)) => {
                self.action(&query_match.data);

                Ok(Response::Answer(query_match))
            }
            Ok(None) => Ok(self.dialog("dont.know", &[])),
            Err(error) => Err(error),
        };

        self.recover_not_paired(response)
    }

    /// Check whether an utterance is a question that can be answered and find the answer.
    ///
    /// Utterances that are not questions are ignored without asking the knowledge engine. If
    /// translation is enabled, the question is translated to English and the answer back.
    ///
    /// Returns `None` if the utterance is not a question or could not be answered. Only
    /// [`Error::NotPaired`] and [`Error::MissingBackendToken`] are returned as errors, all other
    /// failures are logged.
    ///
    /// # Arguments
    ///
    /// * `utterance`: What the user said.
    pub async fn match_query_phrase(&self, utterance: &str) -> Result<Option<QueryMatch>, Error> {
        debug!("Knowledge query: {utterance}");

        let lang = self.settings.lang_prefix();
        let translate = self.settings.needs_translation();
        let query = if translate {
            self.translator
                .translate_or_keep(utterance, lang, "en")
                .await
        } else {
            utterance.to_string()
        };

        let normalized = normalize(&query, false);
        let Some(question) = self.parser.parse(&normalized) else {
            debug!("Non-question, ignoring: {normalized}");

            return Ok(None);
        };
        debug!("Querying knowledge engine: {question}");

        let answer = match self
            .engine
            .spoken(&query, &self.settings.location, self.settings.units)
            .await
        {
            Ok(Some(answer)) => answer,
            Ok(None) => return Ok(None),
            Err(error @ (Error::NotPaired | Error::MissingBackendToken)) => return Err(error),
            Err(error) => {
                error!("Knowledge engine failed to answer \"{query}\": {error}");

                return Ok(None);
            }
        };

        let mut answer = self.cleaner.clean(&answer);
        let mut phrase = query;
        if translate {
            answer = self.translator.translate_or_keep(&answer, "en", lang).await;
            phrase = utterance.to_string();
        }
        debug!("Phrase: {phrase}, answer: {answer}");

        Ok(Some(QueryMatch {
            phrase: phrase.clone(),
            level: MatchLevel::General,
            answer: answer.clone(),
            data: SourceData {
                query: phrase,
                answer,
            },
        }))
    }

    /// Remember an answer that was given to the user.
    ///
    /// The answer is kept in memory even if it can't be stored in the data directory.
    pub fn action(&mut self, data: &SourceData) {
        info!("Setting information for source");

        let last = LastAnswer::new(&data.query, &data.answer);
        if let Err(error) = last.write(&self.settings.data_dir) {
            warn!("Could not store the last answer: {error}");
        }
        self.last_answer = Some(last);
    }

    /// Email the source of the last answer to the registered address of this device.
    pub async fn handle_get_sources(&self) -> Result<Response, Error> {
        let Some(last) = &self.last_answer else {
            return Ok(self.dialog("no.info.to.send", &[]));
        };

        let url_query = last.url_query();
        let data = [
            ("query", last.query.as_str()),
            ("answer", last.answer.as_str()),
            ("url_query", url_query.as_str()),
        ];
        let subject = self.dialogs.render("email.subject", &data);
        let body = self.dialogs.render("email.body", &data);

        let sent = self.mailer.send_email(&subject, &body, SENDER).await;
        let response = sent.map(|_| self.dialog("sent.email", &data));

        self.recover_not_paired(response)
    }

    /// Get the unprocessed full results of a query.
    pub async fn text_result(&self, query: &str) -> Result<Option<String>, Error> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        self.engine.full_results_raw(query).await
    }

    /// Get a title, a text answer and an image for a query.
    ///
    /// The image is saved as `answer` in the data directory. If it can't be downloaded, the
    /// answer has no image. Results the engine marked as failed give `None`.
    pub async fn visual_answer(&self, query: &str) -> Result<Option<Visual>, Error> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let Some(result) = self
            .engine
            .full_results(query, &self.settings.location, self.settings.units)
            .await?
        else {
            return Ok(None);
        };
        if result.has_error() {
            warn!("Wolfram|Alpha failed to answer \"{query}\": {}", result.error);

            return Ok(None);
        }
        let Some(answer) = result.visual_answer() else {
            return Ok(None);
        };

        let image = match &answer.image_source {
            Some(source) => {
                let url = if image::is_wikipedia_file_page(source) {
                    image::wikipedia_image_url(source)
                } else {
                    source.clone()
                };
                debug!("Image: {url}");

                let path = self.settings.data_dir.join("answer");
                image::save_image(&self.client, &url, &path)
                    .await
                    .unwrap_or_else(|error| {
                        error!("Could not save image from {url}: {error}");

                        None
                    })
            }
            None => None,
        };

        Ok(Some(Visual {
            title: answer.title,
            answer: result.answer_text(),
            image,
        }))
    }

    fn dialog(&self, name: &'static str, data: &[(&str, &str)]) -> Response {
        Response::Dialog {
            name,
            text: self.dialogs.render(name, data),
        }
    }

    fn recover_not_paired(&self, response: Result<Response, Error>) -> Result<Response, Error> {
        match response {
            Err(Error::NotPaired | Error::MissingBackendToken | Error::MissingDeviceUuid) => {
                warn!("Device is not paired");

                Ok(self.dialog("not.paired", &[]))
            }
            response => response,
        }
    }
}

#[derive(Deserialize)]
struct Patterns {
    list: Option<String>,
}

fn load_cleaner(settings: &Settings) -> Result<AnswerCleaner, Error> {
    let patterns: Patterns = toml::from_str(&locale::load(
        &settings.data_dir,
        &settings.lang,
        Resource::Regex,
    )?)?;

    AnswerCleaner::new(patterns.list.as_deref())
}
