// Sequence Ontology index and RNA type lineages

use super::parser::{OboParser, SoTerm};
use super::{OntologyError, Result};
use crate::config::PrecomputeConfig;
use flate2::read::GzDecoder;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Ontology shared read-only between workers.
pub type SharedOntology = Arc<SoOntology>;

/// Roots a lineage may start from, in order of preference.
pub const ROOTS: [&str; 3] = ["SO:0000655", "SO:0000188", "SO:0000673"];

/// Terms still used by databases but missing or placed elsewhere in current
/// releases, as `(id, name, parent)`.
const LEGACY_TERMS: [(&str, &str, &str); 1] =
    [("SO:0000209", "rRNA_primary_transcript", "SO:0000252")];

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Default)]
pub struct SoOntology {
    terms: HashMap<String, SoTerm>,
    /// Term name to id
    names: HashMap<String, String>,
    data_version: Option<String>,
}

impl SoOntology {
    // ========================================================================
    // Loading
    // ========================================================================

    /// Build from the text of an OBO release.
    pub fn from_obo(content: &str) -> Result<Self> {
        let parsed = OboParser::parse(content)?;
        let mut ontology = Self::from_terms(parsed.terms);
        ontology.data_version = parsed.data_version;
        Ok(ontology)
    }

    /// Build from parsed terms, adding the legacy terms.
    pub fn from_terms(terms: Vec<SoTerm>) -> Self {
        let mut ontology = Self::default();
        for term in terms {
            ontology.terms.insert(term.id.clone(), term);
        }

        for (id, name, parent) in LEGACY_TERMS {
            let term = ontology
                .terms
                .entry(id.to_string())
                .or_insert_with(|| SoTerm::new(id, name));
            term.is_a = vec![parent.to_string()];
            term.is_obsolete = false;
        }

        ontology.index_names();
        ontology
    }

    /// Load an OBO file, gzipped or not.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;

        let content = if bytes.starts_with(&GZIP_MAGIC) {
            let mut decoder = GzDecoder::new(bytes.as_slice());
            let mut decompressed = String::new();
            decoder.read_to_string(&mut decompressed)?;
            decompressed
        } else {
            String::from_utf8(bytes)
                .map_err(|e| OntologyError::Parse(format!("{}: {}", path.display(), e)))?
        };

        let ontology = Self::from_obo(&content)?;
        info!(
            path = %path.display(),
            terms = ontology.len(),
            version = ontology.data_version().unwrap_or("unknown"),
            "Loaded Sequence Ontology"
        );
        Ok(ontology)
    }

    /// Load the configured ontology, ready to be shared.
    pub fn from_config(config: &PrecomputeConfig) -> Result<SharedOntology> {
        Ok(Self::load(&config.so_ontology)?.shared())
    }

    pub fn shared(self) -> SharedOntology {
        Arc::new(self)
    }

    fn index_names(&mut self) {
        self.names.clear();
        // Current terms win over obsolete terms with the same name
        let mut ordered: Vec<&SoTerm> = self.terms.values().collect();
        ordered.sort_by(|a, b| (!a.is_obsolete, &a.id).cmp(&(!b.is_obsolete, &b.id)));
        for term in ordered {
            self.names.insert(term.name.clone(), term.id.clone());
            if let Some(bare) = term.name.strip_prefix("obsolete ") {
                self.names.insert(bare.to_string(), term.id.clone());
            }
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn data_version(&self) -> Option<&str> {
        self.data_version.as_deref()
    }

    pub fn term(&self, id: &str) -> Option<&SoTerm> {
        self.terms.get(id)
    }

    /// Every SO id and term name mapped to its SO id.
    pub fn name_index(&self) -> BTreeMap<String, String> {
        let mut index: BTreeMap<String, String> = self
            .names
            .iter()
            .map(|(name, id)| (name.clone(), id.clone()))
            .collect();
        for id in self.terms.keys() {
            index.insert(id.clone(), id.clone());
        }
        index
    }

    /// SO id for an SO id, an SO term name or an INSDC RNA type name.
    pub fn id_of(&self, name_or_id: &str) -> Result<String> {
        if self.terms.contains_key(name_or_id) {
            return Ok(name_or_id.to_string());
        }
        if let Some(id) = self.names.get(name_or_id) {
            return Ok(id.clone());
        }
        match rnac_data::as_so_term(name_or_id) {
            Ok(id) if self.terms.contains_key(&id) => Ok(id),
            _ => Err(OntologyError::UnknownTerm(name_or_id.to_string())),
        }
    }

    /// Follow `replaced_by`, then `consider`, until a current term is found.
    pub fn resolve(&self, id: &str) -> Result<String> {
        let mut current = id.to_string();
        let mut seen = HashSet::new();
        loop {
            let term = self
                .terms
                .get(&current)
                .ok_or_else(|| OntologyError::UnknownTerm(current.clone()))?;
            if !term.is_obsolete {
                return Ok(current);
            }
            if !seen.insert(current.clone()) {
                return Err(OntologyError::NoRootPath(id.to_string()));
            }

            let next = term
                .replaced_by
                .first()
                .or_else(|| term.consider.first())
                .ok_or_else(|| OntologyError::NoRootPath(id.to_string()))?;
            debug!(from = %current, to = %next, "Resolving obsolete SO term");
            current = next.clone();
        }
    }

    fn label(&self, id: &str) -> String {
        self.terms
            .get(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    // ========================================================================
    // Lineages
    // ========================================================================

    /// Root-to-leaf lineage of an RNA type, inclusive of the type itself.
    ///
    /// The shortest `is_a` path to the most preferred reachable root in
    /// [`ROOTS`] is used; parents are visited in id order so ties resolve the
    /// same way every time. Obsolete types are replaced by their successor.
    pub fn rna_type_tree(&self, rna_type: &str) -> Result<Vec<(String, String)>> {
        let leaf = self.resolve(&self.id_of(rna_type)?)?;

        // child that first reached each ancestor
        let mut reached_from: HashMap<String, String> = HashMap::new();
        let mut queue = VecDeque::from([leaf.clone()]);
        while let Some(node) = queue.pop_front() {
            let Some(term) = self.terms.get(&node) else {
                continue;
            };
            let mut parents: Vec<&String> = term.is_a.iter().collect();
            parents.sort();
            for parent in parents {
                if *parent == leaf || reached_from.contains_key(parent) {
                    continue;
                }
                reached_from.insert(parent.clone(), node.clone());
                queue.push_back(parent.clone());
            }
        }

        let root = ROOTS
            .iter()
            .find(|root| **root == leaf || reached_from.contains_key(**root))
            .ok_or_else(|| OntologyError::NoRootPath(rna_type.to_string()))?;

        let mut path = vec![root.to_string()];
        let mut node = root.to_string();
        while node != leaf {
            node = reached_from
                .get(&node)
                .cloned()
                .ok_or_else(|| OntologyError::NoRootPath(rna_type.to_string()))?;
            path.push(node.clone());
        }

        Ok(path
            .into_iter()
            .map(|id| {
                let name = self.label(&id);
                (id, name)
            })
            .collect())
    }
}

/// Root-to-leaf `(SO id, name)` lineage of an RNA type name or SO id.
pub fn rna_type_tree(ontology: &SoOntology, rna_type: &str) -> Result<Vec<(String, String)>> {
    ontology.rna_type_tree(rna_type)
}
