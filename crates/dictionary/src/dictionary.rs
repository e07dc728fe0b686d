use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordData {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<Pronunciation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub results: Vec<WordResult>,
}

/// The lookup service sends either a single pronunciation or one per part of speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pronunciation {
    Plain(String),
    PerPartOfSpeech(HashMap<String, String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordResult {
    pub definition: String,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub also: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antonyms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_to: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_of: Option<Vec<String>>,
}

/// Relation fields that can feed the chart, in the order they are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Also,
    Antonyms,
    SimilarTo,
    Synonyms,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Also,
        Relation::Antonyms,
        Relation::SimilarTo,
        Relation::Synonyms,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Relation::Also => "also",
            Relation::Antonyms => "antonyms",
            Relation::SimilarTo => "similarTo",
            Relation::Synonyms => "synonyms",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation {0:?}, expected one of also, antonyms, similarTo, synonyms")]
pub struct ParseRelationError(pub String);

impl FromStr for Relation {
    type Err = ParseRelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.trim().to_ascii_lowercase()[..] {
            "also" => Ok(Relation::Also),
            "antonyms" | "antonym" => Ok(Relation::Antonyms),
            "similarto" | "similar" | "similar_to" | "similar-to" => Ok(Relation::SimilarTo),
            "synonyms" | "synonym" => Ok(Relation::Synonyms),
            other => Err(ParseRelationError(other.to_owned())),
        }
    }
}

/// Which relation fields contribute words. Only antonyms by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultOptions {
    pub also: bool,
    pub antonyms: bool,
    pub similar_to: bool,
    pub synonyms: bool,
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self {
            also: false,
            antonyms: true,
            similar_to: false,
            synonyms: false,
        }
    }
}

impl ResultOptions {
    pub fn none() -> Self {
        Self {
            also: false,
            antonyms: false,
            similar_to: false,
            synonyms: false,
        }
    }

    pub fn all() -> Self {
        Self {
            also: true,
            antonyms: true,
            similar_to: true,
            synonyms: true,
        }
    }

    pub fn is_enabled(&self, relation: Relation) -> bool {
        match relation {
            Relation::Also => self.also,
            Relation::Antonyms => self.antonyms,
            Relation::SimilarTo => self.similar_to,
            Relation::Synonyms => self.synonyms,
        }
    }

    pub fn with(mut self, relation: Relation) -> Self {
        self.set(relation, true);
        self
    }

    pub fn without(mut self, relation: Relation) -> Self {
        self.set(relation, false);
        self
    }

    fn set(&mut self, relation: Relation, enabled: bool) {
        match relation {
            Relation::Also => self.also = enabled,
            Relation::Antonyms => self.antonyms = enabled,
            Relation::SimilarTo => self.similar_to = enabled,
            Relation::Synonyms => self.synonyms = enabled,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = Relation> + '_ {
        Relation::ALL
            .into_iter()
            .filter(|relation| self.is_enabled(*relation))
    }
}

impl fmt::Display for ResultOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.enabled().map(Relation::name).collect::<Vec<&str>>();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join(","))
        }
    }
}

impl FromStr for ResultOptions {
    type Err = ParseRelationError;

    /// Parses a comma separated list such as `synonyms,also`. `none` and `all` are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.trim().to_ascii_lowercase()[..] {
            "" | "none" => return Ok(Self::none()),
            "all" => return Ok(Self::all()),
            _ => {}
        }
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .try_fold(Self::none(), |options, part| {
                part.parse::<Relation>().map(|relation| options.with(relation))
            })
    }
}

impl WordResult {
    pub fn relation(&self, relation: Relation) -> Option<&[String]> {
        match relation {
            Relation::Also => self.also.as_deref(),
            Relation::Antonyms => self.antonyms.as_deref(),
            Relation::SimilarTo => self.similar_to.as_deref(),
            Relation::Synonyms => self.synonyms.as_deref(),
        }
    }

    /// Words of every enabled relation of this sense, in relation order, duplicates kept.
    pub fn related<'a>(&'a self, options: &'a ResultOptions) -> impl Iterator<Item = &'a str> + 'a {
        options
            .enabled()
            .filter_map(move |relation| self.relation(relation))
            .flatten()
            .map(|word| &word[..])
    }
}

impl WordData {
    pub fn related_words(&self, options: &ResultOptions) -> Vec<String> {
        select_related_words(Some(self), options)
    }
}

/// All related words across every sense, sorted and without duplicates.
pub fn select_related_words(data: Option<&WordData>, options: &ResultOptions) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };
    let mut words = data
        .results
        .iter()
        .flat_map(|result| result.related(options))
        .map(str::to_owned)
        .collect::<Vec<String>>();
    words.sort_unstable();
    words.dedup();
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(antonyms: &[&str], synonyms: &[&str]) -> WordResult {
        let list = |words: &[&str]| -> Option<Vec<String>> {
            Some(words.iter().map(|w| w.to_string()).collect())
        };
        WordResult {
            definition: "a sense".to_owned(),
            antonyms: list(antonyms),
            synonyms: list(synonyms),
            ..Default::default()
        }
    }

    fn word(results: Vec<WordResult>) -> WordData {
        WordData {
            word: "good".to_owned(),
            pronunciation: None,
            frequency: Some(5.0),
            results,
        }
    }

    #[test]
    fn default_options_select_only_antonyms() {
        let data = word(vec![result(&["bad", "evil"], &["fine"])]);
        assert_eq!(data.related_words(&ResultOptions::default()), vec!["bad", "evil"]);
    }

    #[test]
    fn related_words_are_sorted_and_unique_across_results() {
        let data = word(vec![
            result(&["evil", "bad"], &["Fine", "ace"]),
            result(&["bad"], &["ace"]),
        ]);
        let options = ResultOptions::default().with(Relation::Synonyms);
        assert_eq!(data.related_words(&options), vec!["Fine", "ace", "bad", "evil"]);
    }

    #[test]
    fn missing_data_and_fields_yield_nothing() {
        assert!(select_related_words(None, &ResultOptions::all()).is_empty());
        let data = word(vec![WordResult {
            definition: "bare".to_owned(),
            ..Default::default()
        }]);
        assert!(data.related_words(&ResultOptions::all()).is_empty());
        assert!(word(Vec::new()).related_words(&ResultOptions::all()).is_empty());
    }

    #[test]
    fn per_result_words_follow_relation_order() {
        let mut sense = result(&["bad"], &["fine"]);
        sense.also = Some(vec!["zz".to_owned()]);
        sense.similar_to = Some(vec!["ok".to_owned()]);
        let options = ResultOptions::all();
        assert_eq!(
            sense.related(&options).collect::<Vec<&str>>(),
            vec!["zz", "bad", "ok", "fine"]
        );
    }

    #[test]
    fn parse_options() {
        let options: ResultOptions = "synonyms, also".parse().unwrap();
        assert!(options.synonyms && options.also);
        assert!(!options.antonyms && !options.similar_to);
        assert_eq!(options.to_string(), "also,synonyms");
        assert_eq!("all".parse::<ResultOptions>().unwrap(), ResultOptions::all());
        assert_eq!("none".parse::<ResultOptions>().unwrap(), ResultOptions::none());
        assert!("hypernyms".parse::<ResultOptions>().is_err());
    }

    #[test]
    fn deserialize_lookup_payload() {
        let json = r#"{
            "word": "hot",
            "pronunciation": {"all": "hɑt"},
            "frequency": 4.72,
            "results": [
                {"definition": "used of physical heat", "partOfSpeech": "adjective",
                 "antonyms": ["cold"], "similarTo": ["baking", "blistering"]},
                {"definition": "very popular", "partOfSpeech": null}
            ]
        }"#;
        let data: WordData = serde_json::from_str(json).unwrap();
        assert_eq!(data.word, "hot");
        assert_eq!(data.frequency, Some(4.72));
        assert_eq!(data.results.len(), 2);
        assert_eq!(data.results[0].similar_to.as_ref().map(Vec::len), Some(2));
        assert!(data.results[1].antonyms.is_none());
        assert!(matches!(data.pronunciation, Some(Pronunciation::PerPartOfSpeech(_))));

        let bare: WordData =
            serde_json::from_str(r#"{"word": "x", "pronunciation": "eks"}"#).unwrap();
        assert!(bare.results.is_empty());
        assert_eq!(bare.pronunciation, Some(Pronunciation::Plain("eks".to_owned())));
    }
}
