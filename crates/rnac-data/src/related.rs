//! Typed relationships between sequences

use crate::error::{DataError, Result};
use crate::rows::{json_column, RelatedSequenceRow, SequenceFeatureRow};
use serde::{Deserialize, Serialize};

/// How a related sequence relates to the entry that lists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Precursor,
    #[serde(alias = "matureProduct")]
    MatureProduct,
    Isoform,
    TargetProtein,
    TargetRna,
}

impl Relationship {
    /// Canonical snake_case name written to output rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Precursor => "precursor",
            Relationship::MatureProduct => "mature_product",
            Relationship::Isoform => "isoform",
            Relationship::TargetProtein => "target_protein",
            Relationship::TargetRna => "target_rna",
        }
    }
}

impl std::str::FromStr for Relationship {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "precursor" => Ok(Relationship::Precursor),
            "mature_product" | "matureProduct" => Ok(Relationship::MatureProduct),
            "isoform" => Ok(Relationship::Isoform),
            "target_protein" => Ok(Relationship::TargetProtein),
            "target_rna" => Ok(Relationship::TargetRna),
            _ => Err(DataError::UnknownRelationship(s.to_string())),
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval on the related sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelatedCoordinate {
    pub start: i64,
    pub stop: i64,
}

impl RelatedCoordinate {
    pub fn new(start: i64, stop: i64) -> Result<Self> {
        if stop < start {
            return Err(DataError::InvalidExon { start, stop });
        }
        Ok(Self { start, stop })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RelatedEvidence {
    pub methods: Vec<String>,
}

impl RelatedEvidence {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Methods as a Postgres text array literal, `{"a","b"}`.
    pub fn methods_array(&self) -> String {
        let quoted: Vec<String> = self
            .methods
            .iter()
            .map(|m| format!("\"{}\"", m.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect();
        format!("{{{}}}", quoted.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelatedSequence {
    pub sequence_id: String,
    pub relationship: Relationship,
    #[serde(default)]
    pub coordinates: Vec<RelatedCoordinate>,
    #[serde(default)]
    pub evidence: RelatedEvidence,
}

impl RelatedSequence {
    pub fn new(sequence_id: impl Into<String>, relationship: Relationship) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            relationship,
            coordinates: Vec::new(),
            evidence: RelatedEvidence::empty(),
        }
    }

    pub fn with_coordinates(mut self, coordinates: Vec<RelatedCoordinate>) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn with_evidence(mut self, evidence: RelatedEvidence) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn writeable(&self, accession: &str) -> RelatedSequenceRow {
        RelatedSequenceRow {
            source_accession: accession.to_string(),
            target_accession: self.sequence_id.clone(),
            relationship_type: self.relationship.as_str().to_string(),
            methods: self.evidence.methods_array(),
        }
    }

    /// One feature row per coordinate pair.
    pub fn write_features(&self, accession: &str, taxid: i64) -> Vec<SequenceFeatureRow> {
        let metadata = json_column(&serde_json::json!({ "related": self.sequence_id }));
        self.coordinates
            .iter()
            .map(|coord| SequenceFeatureRow {
                accession: accession.to_string(),
                taxid,
                start: coord.start,
                stop: coord.stop,
                feature_name: self.relationship.as_str().to_string(),
                metadata: metadata.clone(),
            })
            .collect()
    }
}
