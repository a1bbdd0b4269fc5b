use crate::core::rng::RandomSource;
use crate::error::{Error, Result};

/// Ordered, non-empty list of words supplied by the host.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary. An empty list is rejected up front, since no
    /// cycle could ever choose a word from it.
    pub fn new(words: Vec<String>) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::EmptyDictionary);
        }
        Ok(Self { words })
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let words: Vec<String> = serde_json::from_str(json)?;
        Self::new(words)
    }

    /// Pick a word uniformly at random.
    pub fn pick(&self, source: &mut dyn RandomSource) -> &str {
        &self.words[source.below(self.words.len())]
    }

    /// Number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }
}
