use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{StatusCode, Url};

mod cache;
mod dictionary;
mod word_api;

pub use cache::{frequencies, LookupResult, SharedLookup, WordCache, WordLookup};
pub use dictionary::{
    select_related_words, ParseRelationError, Pronunciation, Relation, ResultOptions, WordData,
    WordResult,
};
pub use word_api::DEFAULT_WORD_API_URL;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to reach the word service: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("failed to read the word service response: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("no entry for {0:?}")]
    NotFound(String),
    #[error("word service answered {status} for {word:?}")]
    Status { word: String, status: StatusCode },
    #[error("{0} cannot be used as a word service url")]
    InvalidUrl(String),
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl Dictionary {
    pub fn new(base_url: &str) -> Result<Self, DictionaryError> {
        let base_url =
            Url::parse(base_url).map_err(|_| DictionaryError::InvalidUrl(base_url.to_owned()))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_word(&self, word: &str) -> Result<WordData, DictionaryError> {
        word_api::get_word(&self.client, &self.base_url, word).await
    }
}

impl WordLookup for Dictionary {
    fn lookup(&self, word: &str) -> BoxFuture<'static, Result<WordData, DictionaryError>> {
        let dictionary = self.clone();
        let word = word.to_owned();
        async move { dictionary.get_word(&word).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_base_urls() {
        assert!(matches!(
            Dictionary::new("not a url"),
            Err(DictionaryError::InvalidUrl(_))
        ));
        assert!(matches!(
            Dictionary::new("data:text/plain,hello"),
            Err(DictionaryError::InvalidUrl(_))
        ));
        let dictionary = Dictionary::new(DEFAULT_WORD_API_URL).unwrap();
        assert_eq!(dictionary.base_url().as_str(), "http://localhost:8080/");
    }
}
