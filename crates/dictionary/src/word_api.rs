// Word lookup service, one JSON document per word: GET /word/:word

use reqwest::{StatusCode, Url};

use crate::{DictionaryError, WordData};

pub const DEFAULT_WORD_API_URL: &str = "http://localhost:8080";

/// `<base>/word/<word>`, with the word percent-encoded as a single path segment.
pub(crate) fn word_url(base: &Url, word: &str) -> Result<Url, DictionaryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DictionaryError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push("word")
        .push(word);
    Ok(url)
}

pub(crate) async fn get_word(
    client: &reqwest::Client,
    base: &Url,
    word: &str,
) -> Result<WordData, DictionaryError> {
    let url = word_url(base, word)?;
    tracing::debug!(%url, "looking up word");
    let res: reqwest::Response = client.get(url).send().await.map_err(DictionaryError::Fetch)?;
    match res.status() {
        status if status.is_success() => {}
        StatusCode::NOT_FOUND => {
            return Err(DictionaryError::NotFound(word.to_owned()));
        }
        status => {
            return Err(DictionaryError::Status {
                word: word.to_owned(),
                status,
            });
        }
    }
    res.json::<WordData>()
        .await
        .map_err(DictionaryError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_a_single_encoded_segment() {
        let base = Url::parse(DEFAULT_WORD_API_URL).unwrap();
        assert_eq!(
            word_url(&base, "ice cream").unwrap().as_str(),
            "http://localhost:8080/word/ice%20cream"
        );
        assert_eq!(
            word_url(&base, "either/or").unwrap().as_str(),
            "http://localhost:8080/word/either%2For"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let base = Url::parse("http://example.com/api/").unwrap();
        assert_eq!(
            word_url(&base, "hot").unwrap().as_str(),
            "http://example.com/api/word/hot"
        );
    }

    #[test]
    fn cannot_be_a_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            word_url(&base, "hot"),
            Err(DictionaryError::InvalidUrl(_))
        ));
    }
}
