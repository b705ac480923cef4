// Sequence Ontology type trees
//
// The Sequence Ontology (http://www.sequenceontology.org/) is loaded once from
// its OBO release and shared read-only. Every RNA type is placed under one of
// three roots:
// - ncRNA (SO:0000655), for almost every RNA type
// - intron (SO:0000188), for self-splicing introns
// - transcript (SO:0000673), for ribozymes and anything else
//
// - Parse: OBO stanza parser producing terms and is_a edges
// - Tree: term index and shortest root-to-leaf lineages

pub mod parser;
pub mod tree;

pub use parser::{OboParser, ParsedObo, SoTerm};
pub use tree::{rna_type_tree, SharedOntology, SoOntology};

/// Result type for ontology operations
pub type Result<T> = std::result::Result<T, OntologyError>;

/// Error types for ontology loading and lookups
#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown SO term: {0}")]
    UnknownTerm(String),

    #[error("No path from {0} to any known root")]
    NoRootPath(String),
}
