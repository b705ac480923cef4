//! Precomputed per-sequence data
//!
//! Once all cross references of a sequence are known, this crate decides how
//! the sequence is presented:
//!
//! - [`description`]: picks one human readable description out of the
//!   descriptions supplied by every expert database
//! - [`so_tree`]: loads the Sequence Ontology and computes the root-to-leaf
//!   lineage of an RNA type
//! - [`config`]: where the ontology is loaded from
//!
//! # Example
//!
//! ```
//! use rnac_precompute::description::{description_of, Accession, Sequence};
//!
//! let sequence = Sequence::new(
//!     "URS00001DEEBE_562",
//!     Some(562),
//!     vec![Accession::new(
//!         "GTRNADB:tRNA-Pro-CGG-1-1:CP000948.1:1",
//!         "GtRNAdb",
//!         "tRNA",
//!         "Escherichia coli tRNA-Pro (CGG)",
//!     )
//!     .with_gene("tRNA-Pro-CGG-1-1")],
//! );
//!
//! let description = description_of("tRNA", &sequence).unwrap();
//! assert_eq!(description, "Escherichia coli tRNA-Pro (CGG) (tRNA-Pro-CGG-1-1)");
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod description;
pub mod so_tree;

// Re-export commonly used types
pub use config::PrecomputeConfig;
pub use description::{
    description_of, short_description, Accession, DescriptionError, Sequence,
};
pub use so_tree::{rna_type_tree, OntologyError, SharedOntology, SoOntology};
