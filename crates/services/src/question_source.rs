use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use quiz_core::model::Question;
use quiz_core::parse_questions;

use crate::error::LoadError;

/// Where the initial question set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    File(PathBuf),
    Url(String),
}

impl QuestionSource {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl FromStr for QuestionSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Reads question documents from disk or over HTTP and validates them.
#[derive(Clone, Default)]
pub struct QuestionLoader {
    client: reqwest::Client,
}

impl QuestionLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Load and validate the questions at `source`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the source cannot be read or does not hold a
    /// valid question document.
    pub async fn load(&self, source: &QuestionSource) -> Result<Vec<Question>, LoadError> {
        let result = match source {
            QuestionSource::File(path) => self.import_file(path).await,
            QuestionSource::Url(url) => self.fetch(url).await,
        };
        match &result {
            Ok(questions) => {
                tracing::info!(%source, count = questions.len(), "loaded questions");
            }
            Err(err) => tracing::warn!(%source, error = %err, "failed to load questions"),
        }
        result
    }

    /// Read a question document from a local file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the file cannot be read and
    /// `LoadError::Import` if its contents are not a valid question document.
    pub async fn import_file(&self, path: &Path) -> Result<Vec<Question>, LoadError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&raw)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<Question>, LoadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus(status));
        }
        let raw = response.text().await?;
        Self::parse(&raw)
    }

    /// Validate an in-memory question document.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Import` for documents that fail validation.
    pub fn parse(raw: &str) -> Result<Vec<Question>, LoadError> {
        let questions = parse_questions(raw)?;
        for (position, question) in questions.iter().enumerate() {
            if !question.answer_in_options() {
                tracing::warn!(
                    position,
                    answer = question.answer(),
                    "answer does not match any option"
                );
            }
        }
        Ok(questions)
    }
}
