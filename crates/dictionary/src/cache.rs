use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;

use crate::{DictionaryError, ResultOptions, WordData};

pub type LookupResult = Result<Arc<WordData>, Arc<DictionaryError>>;
pub type SharedLookup = Shared<BoxFuture<'static, LookupResult>>;

/// Something that can resolve a word, usually over the network.
pub trait WordLookup: Send + Sync {
    fn lookup(&self, word: &str) -> BoxFuture<'static, Result<WordData, DictionaryError>>;
}

impl<L: WordLookup + ?Sized> WordLookup for Arc<L> {
    fn lookup(&self, word: &str) -> BoxFuture<'static, Result<WordData, DictionaryError>> {
        (**self).lookup(word)
    }
}

/// Keeps one lookup per distinct word for as long as the cache lives.
///
/// A second request for a word that is still in flight awaits the same lookup
/// instead of issuing another one. Failures are kept as well and handed to every
/// caller; nothing is retried.
pub struct WordCache<L> {
    source: L,
    entries: Mutex<HashMap<String, SharedLookup>>,
}

impl<L: WordLookup> WordCache<L> {
    pub fn new(source: L) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &L {
        &self.source
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, SharedLookup>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the pending or finished lookup for `word`, starting one if needed.
    pub fn get_word(&self, word: &str) -> SharedLookup {
        let mut entries = self.entries();
        if let Some(pending) = entries.get(word) {
            tracing::debug!(word, "word cache hit");
            return pending.clone();
        }
        tracing::debug!(word, "word cache miss");
        let pending = self
            .source
            .lookup(word)
            .map(|result| result.map(Arc::new).map_err(Arc::new))
            .boxed()
            .shared();
        entries.insert(word.to_owned(), pending.clone());
        pending
    }

    /// Resolves `word` and starts a lookup for every related word selected by `options`.
    pub async fn get_words(
        &self,
        word: &str,
        options: &ResultOptions,
    ) -> Result<(Arc<WordData>, Vec<(String, SharedLookup)>), Arc<DictionaryError>> {
        let data = self.get_word(word).await?;
        let related = data
            .related_words(options)
            .into_iter()
            .map(|related| {
                let pending = self.get_word(&related);
                (related, pending)
            })
            .collect();
        Ok((data, related))
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries().contains_key(word)
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}

/// Waits for the related lookups and keeps every positive frequency.
/// A related word that fails to resolve is skipped.
pub async fn frequencies(related: Vec<(String, SharedLookup)>) -> HashMap<String, f64> {
    let (words, pending): (Vec<String>, Vec<SharedLookup>) = related.into_iter().unzip();
    words
        .into_iter()
        .zip(join_all(pending).await)
        .filter_map(|(word, result)| match result {
            Ok(data) => data
                .frequency
                .filter(|frequency| frequency.is_finite() && *frequency > 0.0)
                .map(|frequency| (word, frequency)),
            Err(error) => {
                tracing::warn!(word = %word, %error, "skipping related word");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Resolves every word after a short delay, counting calls per word.
    #[derive(Default)]
    struct CountingLookup {
        calls: Mutex<HashMap<String, usize>>,
        total: AtomicUsize,
    }

    impl CountingLookup {
        fn calls(&self, word: &str) -> usize {
            self.calls.lock().unwrap().get(word).copied().unwrap_or(0)
        }
    }

    impl WordLookup for CountingLookup {
        fn lookup(&self, word: &str) -> BoxFuture<'static, Result<WordData, DictionaryError>> {
            *self.calls.lock().unwrap().entry(word.to_owned()).or_default() += 1;
            self.total.fetch_add(1, Ordering::SeqCst);
            let word = word.to_owned();
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                if word == "missing" {
                    return Err(DictionaryError::NotFound(word));
                }
                let json = match &word[..] {
                    "hot" => r#"{"word": "hot", "frequency": 4.5, "results": [
                        {"definition": "warm", "antonyms": ["cold", "missing"]},
                        {"definition": "spicy", "antonyms": ["cold", "mild"]}]}"#
                        .to_owned(),
                    "mild" => r#"{"word": "mild", "frequency": 0}"#.to_owned(),
                    other => format!(r#"{{"word": "{other}", "frequency": 3.25}}"#),
                };
                Ok(serde_json::from_str(&json).unwrap())
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_lookup() {
        let cache = WordCache::new(CountingLookup::default());
        let (a, b) = tokio::join!(cache.get_word("hot"), cache.get_word("hot"));
        assert_eq!(a.unwrap().word, "hot");
        assert_eq!(b.unwrap().word, "hot");
        assert_eq!(cache.source().calls("hot"), 1);

        // already resolved
        cache.get_word("hot").await.unwrap();
        assert_eq!(cache.source().calls("hot"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn failures_are_shared_and_not_retried() {
        let cache = WordCache::new(CountingLookup::default());
        let first = cache.get_word("missing");
        let second = cache.get_word("missing");
        assert!(matches!(*first.await.unwrap_err(), DictionaryError::NotFound(_)));
        assert!(second.await.is_err());
        assert!(cache.get_word("missing").await.is_err());
        assert_eq!(cache.source().calls("missing"), 1);
    }

    #[tokio::test]
    async fn get_words_starts_related_lookups() {
        let cache = WordCache::new(CountingLookup::default());
        let (data, related) = cache.get_words("hot", &ResultOptions::default()).await.unwrap();
        assert_eq!(data.word, "hot");
        let names = related.iter().map(|(w, _)| &w[..]).collect::<Vec<&str>>();
        assert_eq!(names, vec!["cold", "mild", "missing"]);
        assert!(cache.contains("cold"));

        let frequencies = frequencies(related).await;
        assert_eq!(frequencies.get("cold"), Some(&3.25));
        assert!(!frequencies.contains_key("mild"));
        assert!(!frequencies.contains_key("missing"));
        assert_eq!(cache.source().total.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn clear_forgets_entries() {
        let cache = WordCache::new(CountingLookup::default());
        cache.get_word("cold").await.unwrap();
        cache.clear();
        assert!(cache.is_empty());
        cache.get_word("cold").await.unwrap();
        assert_eq!(cache.source().calls("cold"), 2);
    }
}
