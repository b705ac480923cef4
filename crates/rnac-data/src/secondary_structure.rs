//! Dot-bracket secondary structures

use crate::rows::SecondaryStructureRow;
use rnac_common::checksum::md5_hex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SecondaryStructure {
    pub dot_bracket: String,
}

impl SecondaryStructure {
    pub fn new(dot_bracket: impl Into<String>) -> Self {
        Self {
            dot_bracket: dot_bracket.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dot_bracket.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dot_bracket.len()
    }

    pub fn md5(&self) -> String {
        md5_hex(self.dot_bracket.as_bytes())
    }

    /// Nothing is written for an empty structure.
    pub fn writeable(&self, accession: &str) -> Option<SecondaryStructureRow> {
        if self.is_empty() {
            return None;
        }
        Some(SecondaryStructureRow {
            accession: accession.to_string(),
            secondary_structure: self.dot_bracket.clone(),
            md5: self.md5(),
        })
    }
}
