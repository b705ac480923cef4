//! RNA-type taxonomy
//!
//! Expert databases label sequences either with INSDC ncRNA class names
//! (`snoRNA`, `lncRNA`, ...) or with Sequence Ontology terms (`SO:0000275`).
//! Entries always store the INSDC name; the tables here translate between
//! the two vocabularies.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};

/// INSDC name to SO term.
///
/// `ncRNA` and `other` share `SO:0000655`; the reverse lookup resolves that
/// term to `other` because it appears last.
const INSDC_SO_MAPPING: &[(&str, &str)] = &[
    ("RNase_MRP_RNA", "SO:0000385"),
    ("RNase_P_RNA", "SO:0000386"),
    ("SRP_RNA", "SO:0000590"),
    ("Y_RNA", "SO:0000405"),
    ("antisense_RNA", "SO:0000644"),
    ("autocatalytically_spliced_intron", "SO:0000588"),
    ("guide_RNA", "SO:0000602"),
    ("hammerhead_ribozyme", "SO:0000380"),
    ("lncRNA", "SO:0001877"),
    ("miRNA", "SO:0000276"),
    ("ncRNA", "SO:0000655"),
    ("misc_RNA", "SO:0000673"),
    ("other", "SO:0000655"),
    ("precursor_RNA", "SO:0000185"),
    ("piRNA", "SO:0001035"),
    ("rasiRNA", "SO:0000454"),
    ("ribozyme", "SO:0000374"),
    ("scRNA", "SO:0000013"),
    ("siRNA", "SO:0000646"),
    ("snRNA", "SO:0000274"),
    ("snoRNA", "SO:0000275"),
    ("telomerase_RNA", "SO:0000390"),
    ("tmRNA", "SO:0000584"),
    ("vault_RNA", "SO:0000404"),
    ("rRNA", "SO:0000252"),
    ("tRNA", "SO:0000253"),
    ("bidirectional_promoter_lncrna", "SO:0002185"),
    ("3prime_overlapping_ncrna", "SO:0002120"),
];

/// SO terms with no INSDC counterpart of their own.
const EXTRA_SO_TO_INSDC: &[(&str, &str)] = &[
    ("SO:0001244", "precursor_RNA"),
    ("SO:0000209", "precursor_RNA"),
    ("SO:0001904", "lncRNA"),
    ("SO:0002095", "snoRNA"),
];

/// Legacy or ambiguous names and the INSDC name they are stored as.
const NORMALIZE_TO_INSDC: &[(&str, &str)] = &[
    ("sRNA", "other"),
    ("bidirectional_promoter_lncrna", "lncRNA"),
    ("3prime_overlapping_ncrna", "other"),
];

/// RNA types that are INSDC features of their own; everything else is an
/// `ncRNA` feature with an `ncrna_class`.
pub const FEATURE_TYPE_RNAS: &[&str] = &["rRNA", "tRNA", "precursor_RNA", "tmRNA", "misc_RNA"];

/// True for strings shaped like `SO:0000275`.
pub fn is_so_term(value: &str) -> bool {
    value
        .strip_prefix("SO:")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub fn is_insdc_name(value: &str) -> bool {
    INSDC_SO_MAPPING.iter().any(|(name, _)| *name == value)
}

/// SO term for an INSDC name; SO terms are returned unchanged.
pub fn as_so_term(name: &str) -> Result<String> {
    if is_so_term(name) {
        return Ok(name.to_string());
    }

    INSDC_SO_MAPPING
        .iter()
        .find(|(insdc, _)| *insdc == name)
        .map(|(_, so)| so.to_string())
        .ok_or_else(|| DataError::UnexpectedRnaType(name.to_string()))
}

/// INSDC name for an SO term, an INSDC name or a legacy name.
///
/// Legacy rewrites also apply to names reached through the SO table, so
/// `SO:0002185` is stored as `lncRNA`.
pub fn from_so_term(value: &str) -> Result<String> {
    if let Some(insdc) = normalized_name(value) {
        return Ok(insdc.to_string());
    }

    if is_insdc_name(value) {
        return Ok(value.to_string());
    }

    so_to_insdc(value)
        .map(|insdc| normalized_name(insdc).unwrap_or(insdc).to_string())
        .ok_or_else(|| DataError::UnexpectedRnaType(value.to_string()))
}

fn normalized_name(name: &str) -> Option<&'static str> {
    NORMALIZE_TO_INSDC
        .iter()
        .find(|(legacy, _)| *legacy == name)
        .map(|(_, insdc)| *insdc)
}

/// Reverse SO lookup, last mapping wins.
pub fn so_to_insdc(so_term: &str) -> Option<&'static str> {
    INSDC_SO_MAPPING
        .iter()
        .rfind(|(_, so)| *so == so_term)
        .map(|(insdc, _)| *insdc)
        .or_else(|| {
            EXTRA_SO_TO_INSDC
                .iter()
                .find(|(so, _)| *so == so_term)
                .map(|(_, insdc)| *insdc)
        })
}

/// Every INSDC name known to the taxonomy.
pub fn insdc_names() -> impl Iterator<Item = &'static str> {
    INSDC_SO_MAPPING.iter().map(|(name, _)| *name)
}

/// Whether `name` has a legacy rewrite applied by [`from_so_term`].
pub fn is_legacy_name(name: &str) -> bool {
    normalized_name(name).is_some()
}

/// An RNA type normalized to the INSDC vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RnaType(String);

impl RnaType {
    pub fn new(raw: &str) -> Result<Self> {
        from_so_term(raw.trim()).map(RnaType)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn so_term(&self) -> Result<String> {
        as_so_term(&self.0)
    }

    /// INSDC feature bucket for this type.
    pub fn feature_name(&self) -> &str {
        if FEATURE_TYPE_RNAS.contains(&self.0.as_str()) {
            &self.0
        } else {
            "ncRNA"
        }
    }

    /// The specific class when the feature is `ncRNA`.
    pub fn ncrna_class(&self) -> Option<&str> {
        if self.feature_name() == "ncRNA" {
            Some(&self.0)
        } else {
            None
        }
    }
}

impl std::str::FromStr for RnaType {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RnaType {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<RnaType> for String {
    fn from(value: RnaType) -> Self {
        value.0
    }
}

impl AsRef<str> for RnaType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RnaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
