//! Flat output rows
//!
//! Each struct is one row of a downstream bulk-load table. Field order is the
//! column order; `None` is written as an empty column by CSV writers.

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io::{self, Write};

// ============================================================================
// JSON columns
// ============================================================================

/// Layout of existing loads: `", "` and `": "` separators, keys in insertion
/// order, non-ASCII characters as `\uXXXX` escapes.
struct ColumnFormatter;

impl Formatter for ColumnFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Render `value` as the text of a JSON column.
pub fn json_column(value: &Value) -> String {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, ColumnFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buffer).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

/// Accession metadata, one row per valid entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcInfoRow {
    pub accession: String,
    pub parent_accession: Option<String>,
    pub seq_version: String,
    pub feature_location_start: i64,
    pub feature_location_end: i64,
    pub feature_name: String,
    pub ordinal: Option<String>,
    pub is_composite: Option<String>,
    pub non_coding_id: Option<String>,
    pub database_name: String,
    pub primary_id: String,
    pub optional_id: Option<String>,
    pub project: Option<String>,
    pub division: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub species: Option<String>,
    pub common_name: Option<String>,
    pub organelle: Option<String>,
    pub lineage: Option<String>,
    pub allele: Option<String>,
    pub anticodon: Option<String>,
    pub chromosome: Option<String>,
    pub experiment: Option<String>,
    pub function: Option<String>,
    pub gene: Option<String>,
    pub gene_synonym: String,
    pub inference: Option<String>,
    pub locus_tag: Option<String>,
    pub map: Option<String>,
    pub mol_type: Option<String>,
    pub ncrna_class: Option<String>,
    pub note: String,
    pub old_locus_tag: Option<String>,
    pub operon: Option<String>,
    pub product: Option<String>,
    pub pseudogene: Option<String>,
    pub standard_name: Option<String>,
    pub db_xrefs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceRow {
    pub crc64: String,
    pub length: usize,
    pub sequence: String,
    pub database_name: String,
    pub accession: String,
    pub optional_id: Option<String>,
    pub seq_version: String,
    pub ncbi_tax_id: i64,
    pub md5: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
    pub md5: String,
    pub accession: String,
    pub authors: String,
    pub location: String,
    pub title: Option<String>,
    pub pmid: Option<i64>,
    pub doi: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericPubmedRow {
    pub pmid: Option<i64>,
    pub authors: String,
    pub location: String,
    pub title: Option<String>,
    pub doi: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefIdRow {
    pub reference_id: String,
    pub accession: String,
}

/// One exon of a genomic region, normalized to one-based closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRow {
    pub accession: String,
    pub region_name: String,
    pub chromosome: String,
    pub strand: i8,
    pub assembly_id: String,
    pub exon_count: usize,
    pub exon_start: i64,
    pub exon_stop: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedSequenceRow {
    pub source_accession: String,
    pub target_accession: String,
    pub relationship_type: String,
    pub methods: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceFeatureRow {
    pub accession: String,
    pub taxid: i64,
    pub start: i64,
    pub stop: i64,
    pub feature_name: String,
    pub metadata: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondaryStructureRow {
    pub accession: String,
    pub secondary_structure: String,
    pub md5: String,
}
