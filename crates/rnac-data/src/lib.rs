//! Canonical sequence data model
//!
//! Every expert database parser reduces its records to the types in this
//! crate. An [`Entry`] is built once per source record, validated, and then
//! flattened into the row shapes in [`rows`] for bulk loading.
//!
//! - [`coordinates`]: strands and the 0-based / 1-based coordinate systems
//! - [`regions`]: exons and genomic regions
//! - [`references`]: full citations and publication identifiers
//! - [`rna_type`]: the INSDC / Sequence Ontology RNA-type taxonomy
//! - [`related`]: relationships between sequences
//! - [`secondary_structure`]: dot-bracket structures
//! - [`entry`]: the entry itself and its builder
//! - [`config`]: validity thresholds
//!
//! # Example
//!
//! ```
//! use rnac_data::Entry;
//!
//! let entry = Entry::builder()
//!     .primary_id("URS0000000001")
//!     .accession("ENA:AB000001.1:1..90:tRNA")
//!     .ncbi_tax_id(9606)
//!     .database("ena")
//!     .sequence("GCCCGGATAGCTCAGTCGGTAGAGCAGCGGCCGAAAAGCGTGA")
//!     .rna_type("SO:0000253")
//!     .url("https://www.ebi.ac.uk/ena/browser/view/AB000001.1")
//!     .seq_version("1")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(entry.database(), "ENA");
//! assert_eq!(entry.rna_type().as_str(), "tRNA");
//! assert!(entry.is_valid());
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod coordinates;
pub mod entry;
pub mod error;
pub mod references;
pub mod regions;
pub mod related;
pub mod rna_type;
pub mod rows;
pub mod secondary_structure;

// Re-export commonly used types
pub use config::{DataConfig, ValidityRules};
pub use coordinates::{CloseStatus, CoordinateStart, CoordinateSystem, Strand};
pub use entry::{Entry, EntryAnnotations, EntryBuilder};
pub use error::{DataError, Result};
pub use references::{Citation, IdReference, Namespace, Reference};
pub use regions::{Exon, SequenceRegion};
pub use related::{RelatedCoordinate, RelatedEvidence, RelatedSequence, Relationship};
pub use rna_type::{as_so_term, from_so_term, RnaType};
pub use secondary_structure::SecondaryStructure;
