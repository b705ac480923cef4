//! Literature references
//!
//! Expert databases cite literature in two shapes: a full citation
//! ([`Reference`]) keyed by an MD5 over its text, or a bare publication
//! identifier ([`IdReference`]) to be resolved later through Europe PMC.

use crate::error::{DataError, Result};
use crate::rows::{GenericPubmedRow, RefIdRow, ReferenceRow};
use rnac_common::checksum::md5_hex;
use serde::{Deserialize, Serialize};

const PMID_URL: &str = "https://www.ebi.ac.uk/europepmc/webservices/rest/search?query={pmid}+AND+SRC:MED&format=json";
const TERM_URL: &str = "https://www.ebi.ac.uk/europepmc/webservices/rest/search?query={term}&format=json";

// ============================================================================
// Full citations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub authors: String,
    pub location: String,
    pub title: Option<String>,
    pub pmid: Option<i64>,
    pub doi: Option<String>,
    pub pmcid: Option<String>,
}

impl Reference {
    pub fn new(authors: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            authors: authors.into(),
            location: location.into(),
            title: None,
            pmid: None,
            doi: None,
            pmcid: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_pmid(mut self, pmid: i64) -> Self {
        self.pmid = Some(pmid);
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub fn with_pmcid(mut self, pmcid: impl Into<String>) -> Self {
        self.pmcid = Some(pmcid.into());
        self
    }

    /// MD5 over authors, location and title (empty when absent).
    pub fn md5(&self) -> String {
        let data = format!(
            "{}{}{}",
            self.authors,
            self.location,
            self.title.as_deref().unwrap_or("")
        );
        md5_hex(data.as_bytes())
    }

    pub fn writeable(&self, accession: &str) -> ReferenceRow {
        ReferenceRow {
            md5: self.md5(),
            accession: accession.to_string(),
            authors: self.authors.clone(),
            location: self.location.clone(),
            title: self.title.clone(),
            pmid: self.pmid,
            doi: self.doi.clone(),
        }
    }

    pub fn writeable_generic_pubmed(&self) -> GenericPubmedRow {
        GenericPubmedRow {
            pmid: self.pmid,
            authors: self.authors.clone(),
            location: self.location.clone(),
            title: self.title.clone(),
            doi: self.doi.clone(),
        }
    }

    /// The identifier form of this citation, preferring pmid, then doi,
    /// then pmcid.
    pub fn id_reference(&self) -> Result<IdReference> {
        if let Some(pmid) = self.pmid {
            return Ok(IdReference::new(Namespace::Pmid, pmid.to_string()));
        }
        if let Some(doi) = self.doi.as_deref().filter(|d| !d.is_empty()) {
            return Ok(IdReference::new(Namespace::Doi, doi));
        }
        if let Some(pmcid) = self.pmcid.as_deref().filter(|p| !p.is_empty()) {
            return Ok(IdReference::new(Namespace::Pmcid, pmcid));
        }
        Err(DataError::NoIdReference(self.location.clone()))
    }
}

// ============================================================================
// Identifier references
// ============================================================================

/// Publication identifier namespaces Europe PMC can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Doi,
    Pmid,
    Pmcid,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Doi => "doi",
            Namespace::Pmid => "pmid",
            Namespace::Pmcid => "pmcid",
        }
    }
}

impl std::str::FromStr for Namespace {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "doi" => Ok(Namespace::Doi),
            "pmid" => Ok(Namespace::Pmid),
            "pmcid" => Ok(Namespace::Pmcid),
            _ => Err(DataError::UnknownPublicationType(s.to_string())),
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdReference {
    pub namespace: Namespace,
    pub external_id: String,
}

impl IdReference {
    pub fn new(namespace: Namespace, external_id: impl Into<String>) -> Self {
        Self {
            namespace,
            external_id: external_id.into(),
        }
    }

    pub fn from_pmid(pmid: u64) -> Self {
        Self::new(Namespace::Pmid, pmid.to_string())
    }

    /// Parse a raw identifier.
    ///
    /// Accepted forms: bare digits (pmid), `PMC123` (pmcid, any case) and
    /// `namespace:id` for doi, pmid and pmcid. pmcid values are upper-cased
    /// and given a `PMC` prefix when missing.
    pub fn build(raw: &str) -> Result<Self> {
        let ref_id = raw.trim();
        if is_digits(ref_id) {
            return Ok(Self::new(Namespace::Pmid, ref_id));
        }
        if is_pmcid(ref_id) {
            return Ok(Self::new(Namespace::Pmcid, ref_id.to_uppercase()));
        }

        let (service, eid) = ref_id
            .split_once(':')
            .ok_or_else(|| DataError::UnknownPublicationType(ref_id.to_string()))?;
        let namespace: Namespace = service.parse()?;
        let eid = match namespace {
            Namespace::Pmcid => {
                let upper = eid.to_uppercase();
                if upper.starts_with("PMC") {
                    upper
                } else {
                    format!("PMC{}", upper)
                }
            },
            _ => eid.to_string(),
        };
        Ok(Self::new(namespace, eid))
    }

    /// `namespace:external_id`
    pub fn normalized_id(&self) -> String {
        format!("{}:{}", self.namespace, self.external_id)
    }

    /// Europe PMC search URL resolving this identifier.
    pub fn external_url(&self) -> String {
        match self.namespace {
            Namespace::Pmid => PMID_URL.replace("{pmid}", &self.external_id),
            Namespace::Doi | Namespace::Pmcid => {
                let suffix = if self.namespace == Namespace::Doi {
                    format!("\"{}\"", self.external_id)
                } else {
                    self.external_id.clone()
                };
                let term = format!("{}:{}", self.namespace.as_str().to_uppercase(), suffix);
                TERM_URL.replace("{term}", &urlencoding::encode(&term))
            },
        }
    }

    pub fn writeable(&self, accession: &str) -> RefIdRow {
        RefIdRow {
            reference_id: self.normalized_id(),
            accession: accession.to_string(),
        }
    }

    pub fn writeable_id(&self) -> String {
        self.normalized_id()
    }
}

impl std::str::FromStr for IdReference {
    type Err = DataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::build(s)
    }
}

/// A citation attached to an entry, in either shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Citation {
    Full(Reference),
    Id(IdReference),
}

impl From<Reference> for Citation {
    fn from(r: Reference) -> Self {
        Citation::Full(r)
    }
}

impl From<IdReference> for Citation {
    fn from(r: IdReference) -> Self {
        Citation::Id(r)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_pmcid(s: &str) -> bool {
    s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("PMC")) && s.get(3..).is_some_and(is_digits)
}
