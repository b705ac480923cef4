// Sequence Ontology OBO parser

use super::{OntologyError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One `[Term]` stanza of the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoTerm {
    pub id: String,
    pub name: String,
    pub definition: Option<String>,
    pub synonyms: Vec<String>,
    /// Parent ids from `is_a` lines
    pub is_a: Vec<String>,
    pub is_obsolete: bool,
    pub replaced_by: Vec<String>,
    pub consider: Vec<String>,
}

impl SoTerm {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            definition: None,
            synonyms: Vec::new(),
            is_a: Vec::new(),
            is_obsolete: false,
            replaced_by: Vec::new(),
            consider: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct ParsedObo {
    /// `data-version` from the header, if present
    pub data_version: Option<String>,
    pub terms: Vec<SoTerm>,
}

impl ParsedObo {
    pub fn relationship_count(&self) -> usize {
        self.terms.iter().map(|t| t.is_a.len()).sum()
    }
}

pub struct OboParser;

impl OboParser {
    /// Parse an OBO document.
    ///
    /// Stanzas other than `[Term]` (such as `[Typedef]`) are skipped, as are
    /// term stanzas without an id or name.
    pub fn parse(content: &str) -> Result<ParsedObo> {
        let lines: Vec<&str> = content.lines().collect();
        let mut terms = Vec::new();
        let mut data_version = None;
        let mut i = 0;

        // Header until the first stanza
        while i < lines.len() {
            let line = lines[i].trim();
            if line.starts_with('[') {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                if key.trim() == "data-version" {
                    data_version = Some(value.trim().to_string());
                }
            }
            i += 1;
        }

        while i < lines.len() {
            if lines[i].trim() == "[Term]" {
                match Self::parse_term_stanza(&lines, &mut i) {
                    Ok(term) => terms.push(term),
                    Err(e) => {
                        warn!("Failed to parse term stanza: {}", e);
                    },
                }
            } else {
                i += 1;
            }
        }

        let parsed = ParsedObo {
            data_version,
            terms,
        };

        info!(
            "Parsed {} SO terms and {} is_a relationships",
            parsed.terms.len(),
            parsed.relationship_count()
        );

        Ok(parsed)
    }

    /// Parse a single [Term] stanza
    fn parse_term_stanza(lines: &[&str], i: &mut usize) -> Result<SoTerm> {
        *i += 1; // Skip [Term] line

        let mut id: Option<String> = None;
        let mut name: Option<String> = None;
        let mut definition = None;
        let mut synonyms = Vec::new();
        let mut is_a = Vec::new();
        let mut is_obsolete = false;
        let mut replaced_by = Vec::new();
        let mut consider = Vec::new();

        while *i < lines.len() {
            let line = lines[*i].trim();

            // End of stanza
            if line.is_empty() || line.starts_with('[') {
                break;
            }

            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();
                match key.trim() {
                    "id" => id = Some(value.to_string()),
                    "name" => name = Some(value.to_string()),
                    "def" => definition = Some(Self::extract_quoted_text(value)),
                    "synonym" => synonyms.push(Self::extract_quoted_text(value)),
                    "is_obsolete" => is_obsolete = value == "true",
                    // "SO:0000655 ! ncRNA"
                    "is_a" | "replaced_by" | "consider" => {
                        let Some(target) = value.split_whitespace().next() else {
                            *i += 1;
                            continue;
                        };
                        match key.trim() {
                            "is_a" => is_a.push(target.to_string()),
                            "replaced_by" => replaced_by.push(target.to_string()),
                            _ => consider.push(target.to_string()),
                        }
                    },
                    _ => {},
                }
            }

            *i += 1;
        }

        let id = id.ok_or_else(|| OntologyError::Parse("Missing SO id".to_string()))?;
        let name = name.ok_or_else(|| OntologyError::Parse(format!("Missing name for {}", id)))?;

        Ok(SoTerm {
            id,
            name,
            definition,
            synonyms,
            is_a,
            is_obsolete,
            replaced_by,
            consider,
        })
    }

    /// Extract quoted text
    /// Example: "\"A non-coding transcript.\" [SO:ke]" -> "A non-coding transcript."
    fn extract_quoted_text(text: &str) -> String {
        if let Some(start) = text.find('"') {
            if let Some(end) = text[start + 1..].find('"') {
                return text[start + 1..start + 1 + end].to_string();
            }
        }
        text.to_string()
    }
}
