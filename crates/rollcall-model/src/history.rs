use serde::{Deserialize, Serialize};

/// Append-only log of draws; each entry holds the ids selected by one draw.
///
/// Only an explicit reset clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawHistory {
    entries: Vec<Vec<String>>,
}

impl DrawHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ids: Vec<String>) {
        self.entries.push(ids);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&[String]> {
        self.entries.last().map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.entries.iter().map(Vec::as_slice)
    }
}
