use std::collections::HashMap;

use dictionary::{ResultOptions, WordData};
use serde::{Deserialize, Serialize};

/// Weight of a related word whose frequency is unknown.
pub const DEFAULT_LEAF_WEIGHT: f64 = 3.0;

/// A chart node: the looked up word at the root, one child per sense, one leaf per related word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDatum {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WordDatum>,
}

impl WordDatum {
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<WordDatum>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows child indices down from this node.
    pub fn descend(&self, path: &[usize]) -> Option<&WordDatum> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }
}

pub fn to_datum(
    word: &WordData,
    frequencies: &HashMap<String, f64>,
    options: &ResultOptions,
) -> WordDatum {
    let senses = word
        .results
        .iter()
        .filter_map(|result| {
            let leaves = result
                .related(options)
                .filter(|related| !related.is_empty())
                .map(|related| related_leaf(related, frequencies))
                .collect::<Vec<WordDatum>>();
            if leaves.is_empty() {
                None
            } else {
                Some(WordDatum::branch(&result.definition[..], leaves))
            }
        })
        .collect();
    WordDatum::branch(&word.word[..], senses)
}

fn related_leaf(word: &str, frequencies: &HashMap<String, f64>) -> WordDatum {
    match frequencies.get(word) {
        Some(&frequency) if frequency.is_finite() && frequency > 0.0 => {
            WordDatum::leaf(format!("{word} ({frequency})"), frequency)
        }
        _ => WordDatum::leaf(word, DEFAULT_LEAF_WEIGHT),
    }
}
