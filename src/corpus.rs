use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::SessionError;

static LANG_DIR: Dir = include_dir!("src/lang");

/// Name of the word list shipped with the binary.
pub const BUILTIN: &str = "common";

#[derive(Deserialize)]
struct WordList {
    name: String,
    words: Vec<String>,
}

/// Fixed vocabulary that practice text is drawn from.
///
/// A corpus is never empty and none of its words contain whitespace, so every
/// drawn word is exactly one token of the generated content.
#[derive(Clone, Debug, PartialEq)]
pub struct Corpus {
    name: String,
    words: Vec<String>,
}

impl Corpus {
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::EmptyCorpus);
        }
        if let Some(bad) = words
            .iter()
            .find(|w| w.is_empty() || w.chars().any(char::is_whitespace))
        {
            return Err(SessionError::InvalidWord(bad.clone()));
        }

        Ok(Self {
            name: name.into(),
            words,
        })
    }

    /// The embedded list of common english words.
    pub fn builtin() -> Result<Self, SessionError> {
        Self::from_lang_dir(BUILTIN)
    }

    fn from_lang_dir(name: &str) -> Result<Self, SessionError> {
        let file_name = format!("{name}.json");
        let contents = LANG_DIR
            .get_file(&file_name)
            .and_then(|f| f.contents_utf8())
            .ok_or_else(|| SessionError::MissingCorpus(file_name.clone()))?;

        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let list: WordList = from_str(json)?;
        Self::new(list.name, list.words)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
