// Description selection
//
// Every cross reference of a sequence carries the description its expert
// database gave it. This module reduces those to one description:
// - species specific sequences go through the per-database rules in
//   `species_specific`
// - sequences seen in several taxa get a short cross-species summary
// - `short` strips the species prefix for compact displays

pub mod short;
pub mod species_specific;
pub mod utils;

pub use short::short_description;

use rnac_data::Entry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Result type for description operations
pub type Result<T> = std::result::Result<T, DescriptionError>;

/// Error types for description selection
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("Must have a defined RNA type to get a description")]
    MissingRnaType,

    #[error("No suitable database found for {0}")]
    NoSuitableDatabase(String),

    #[error("No cross references to select a description from for {0}")]
    NoCandidates(String),

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<regex::Error> for DescriptionError {
    fn from(err: regex::Error) -> Self {
        DescriptionError::Pattern(err.to_string())
    }
}

// ============================================================================
// Accessions and sequences
// ============================================================================

/// One cross reference of a sequence, reduced to the fields the description
/// rules read.
///
/// `database` is stored lower-cased so it compares directly against the
/// database ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accession {
    pub id: String,
    pub database: String,
    pub rna_type: String,
    pub description: String,
    #[serde(default)]
    pub gene: Option<String>,
    #[serde(default)]
    pub optional_id: Option<String>,
    #[serde(default)]
    pub locus_tag: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub taxid: Option<i64>,
}

impl Accession {
    pub fn new(
        id: impl Into<String>,
        database: impl Into<String>,
        rna_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            database: database.into().to_lowercase(),
            rna_type: rna_type.into(),
            description: description.into(),
            gene: None,
            optional_id: None,
            locus_tag: None,
            species: None,
            common_name: None,
            taxid: None,
        }
    }

    /// Cross reference record for an imported entry.
    pub fn from_entry(entry: &Entry) -> Self {
        let a = entry.annotations();
        Self {
            id: entry.accession().to_string(),
            database: entry.database().to_lowercase(),
            rna_type: entry.rna_type().as_str().to_string(),
            description: a.description.clone().unwrap_or_default(),
            gene: a.gene.clone(),
            optional_id: a.optional_id.clone(),
            locus_tag: a.locus_tag.clone(),
            species: a.species.clone(),
            common_name: a.common_name.clone(),
            taxid: Some(entry.ncbi_tax_id()),
        }
    }

    pub fn with_gene(mut self, gene: impl Into<String>) -> Self {
        self.gene = Some(gene.into());
        self
    }

    pub fn with_optional_id(mut self, optional_id: impl Into<String>) -> Self {
        self.optional_id = Some(optional_id.into());
        self
    }

    pub fn with_locus_tag(mut self, locus_tag: impl Into<String>) -> Self {
        self.locus_tag = Some(locus_tag.into());
        self
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    pub fn with_taxid(mut self, taxid: i64) -> Self {
        self.taxid = Some(taxid);
        self
    }
}

/// A sequence together with all of its cross references.
///
/// A sequence with a `taxid` is species specific, one without is the
/// cross-species sequence shared by every taxon it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    #[serde(default)]
    pub taxid: Option<i64>,
    pub accessions: Vec<Accession>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, taxid: Option<i64>, accessions: Vec<Accession>) -> Self {
        Self {
            id: id.into(),
            taxid,
            accessions,
        }
    }

    /// Parse a sequence with its cross references from JSON.
    ///
    /// Database names are lower-cased the same way [`Accession::new`] does.
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut sequence: Sequence = serde_json::from_str(raw)?;
        for accession in &mut sequence.accessions {
            accession.database = accession.database.to_lowercase();
        }
        Ok(sequence)
    }

    pub fn is_species_specific(&self) -> bool {
        self.taxid.is_some()
    }

    /// Distinct taxa among the cross references.
    pub fn taxa(&self) -> BTreeSet<i64> {
        self.accessions.iter().filter_map(|a| a.taxid).collect()
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Select the description of a sequence that has the given RNA type.
///
/// Species specific sequences get a description picked from their cross
/// references. Sequences found in more than one taxon are summarized as
/// `"{rna_type} from {n} species"`; with a single taxon they are treated as
/// species specific.
pub fn description_of(rna_type: &str, sequence: &Sequence) -> Result<String> {
    if rna_type.trim().is_empty() {
        return Err(DescriptionError::MissingRnaType);
    }

    if sequence.accessions.is_empty() {
        return Err(DescriptionError::NoCandidates(sequence.id.clone()));
    }

    if !sequence.is_species_specific() {
        let taxa = sequence.taxa();
        if taxa.len() > 1 {
            debug!(id = %sequence.id, taxa = taxa.len(), "Using generic description");
            return Ok(generic_description(rna_type, taxa.len()));
        }
    }

    species_specific::description_of(rna_type, sequence)
}

fn generic_description(rna_type: &str, species_count: usize) -> String {
    format!("{} from {} species", rna_type, species_count)
}
