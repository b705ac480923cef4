//! The canonical sequence entry
//!
//! Every expert database parser produces [`Entry`] values through an
//! [`EntryBuilder`]. Construction fails on structural problems (missing
//! required fields, malformed `seq_version`, unknown RNA type); semantic
//! problems with the sequence itself are reported by [`Entry::is_valid`] and
//! make every `write_*` method return no rows.

use crate::config::{DataConfig, ValidityRules, DEFAULT_SHORT_SEQUENCE_LIMIT};
use crate::error::{DataError, Result};
use crate::references::{Citation, IdReference, Reference};
use crate::regions::{Exon, SequenceRegion};
use crate::related::RelatedSequence;
use crate::rna_type::RnaType;
use crate::rows::{
    json_column, AcInfoRow, RefIdRow, ReferenceRow, RegionRow, RelatedSequenceRow,
    SecondaryStructureRow, SequenceFeatureRow, SequenceRow,
};
use crate::secondary_structure::SecondaryStructure;
use rnac_common::checksum::{crc64, md5_hex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Free-text annotations copied from the source record.
///
/// `division`, `allele` and `map` are kept for parsers that read them but are
/// written out as empty columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryAnnotations {
    pub chromosome: Option<String>,
    pub species: Option<String>,
    pub common_name: Option<String>,
    pub lineage: Option<String>,
    pub gene: Option<String>,
    pub locus_tag: Option<String>,
    pub optional_id: Option<String>,
    pub product: Option<String>,
    pub parent_accession: Option<String>,
    pub ordinal: Option<String>,
    pub non_coding_id: Option<String>,
    pub project: Option<String>,
    pub keywords: Option<String>,
    pub division: Option<String>,
    pub organelle: Option<String>,
    pub allele: Option<String>,
    pub anticodon: Option<String>,
    pub experiment: Option<String>,
    pub function: Option<String>,
    pub inference: Option<String>,
    pub map: Option<String>,
    pub old_locus_tag: Option<String>,
    pub operon: Option<String>,
    pub standard_name: Option<String>,
    pub description: Option<String>,
    pub mol_type: Option<String>,
    pub is_composite: Option<String>,
    pub pseudogene: Option<String>,
}

/// One sequence record from one expert database.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    primary_id: String,
    accession: String,
    ncbi_tax_id: i64,
    database: String,
    sequence: String,
    regions: Vec<SequenceRegion>,
    rna_type: RnaType,
    url: String,
    seq_version: String,
    location_start: Option<i64>,
    location_end: Option<i64>,
    note_data: Map<String, Value>,
    xref_data: Map<String, Value>,
    gene_synonyms: Vec<String>,
    references: Vec<Citation>,
    related_sequences: Vec<RelatedSequence>,
    secondary_structure: SecondaryStructure,
    annotations: EntryAnnotations,
    validity: ValidityRules,
    short_sequence_limit: usize,
}

impl Entry {
    pub fn builder() -> EntryBuilder {
        EntryBuilder::default()
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// Identifier in the source database, also called the external id.
    pub fn primary_id(&self) -> &str {
        &self.primary_id
    }

    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn ncbi_tax_id(&self) -> i64 {
        self.ncbi_tax_id
    }

    /// Upper-cased database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn regions(&self) -> &[SequenceRegion] {
        &self.regions
    }

    pub fn rna_type(&self) -> &RnaType {
        &self.rna_type
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn seq_version(&self) -> &str {
        &self.seq_version
    }

    pub fn note_data(&self) -> &Map<String, Value> {
        &self.note_data
    }

    pub fn xref_data(&self) -> &Map<String, Value> {
        &self.xref_data
    }

    pub fn gene_synonyms(&self) -> &[String] {
        &self.gene_synonyms
    }

    pub fn references(&self) -> &[Citation] {
        &self.references
    }

    pub fn related_sequences(&self) -> &[RelatedSequence] {
        &self.related_sequences
    }

    pub fn secondary_structure(&self) -> &SecondaryStructure {
        &self.secondary_structure
    }

    pub fn annotations(&self) -> &EntryAnnotations {
        &self.annotations
    }

    pub fn validity_rules(&self) -> &ValidityRules {
        &self.validity
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// All exons across all regions.
    pub fn exons(&self) -> Vec<Exon> {
        self.regions
            .iter()
            .flat_map(|r| r.exons().iter().copied())
            .collect()
    }

    pub fn feature_name(&self) -> &str {
        self.rna_type.feature_name()
    }

    pub fn ncrna_class(&self) -> Option<&str> {
        self.rna_type.ncrna_class()
    }

    pub fn gene_synonym(&self) -> String {
        self.gene_synonyms.join(",")
    }

    /// Explicit start, else the smallest exon start, else 1.
    pub fn feature_location_start(&self) -> i64 {
        self.location_start.unwrap_or_else(|| {
            self.regions
                .iter()
                .flat_map(|r| r.exons())
                .map(Exon::start)
                .min()
                .unwrap_or(1)
        })
    }

    /// Explicit end, else the largest exon stop, else one past the sequence.
    pub fn feature_location_end(&self) -> i64 {
        self.location_end.unwrap_or_else(|| {
            self.regions
                .iter()
                .flat_map(|r| r.exons())
                .map(Exon::stop)
                .max()
                .unwrap_or(self.sequence_length() as i64 + 1)
        })
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn crc64(&self) -> String {
        crc64(self.sequence.as_bytes())
    }

    pub fn md5(&self) -> String {
        md5_hex(self.sequence.as_bytes())
    }

    /// `note_data` as a JSON object string.
    pub fn note(&self) -> String {
        json_column(&Value::Object(self.note_data.clone()))
    }

    /// `xref_data` as a JSON object string.
    pub fn db_xrefs(&self) -> String {
        json_column(&Value::Object(self.xref_data.clone()))
    }

    // ========================================================================
    // Validity
    // ========================================================================

    /// Whether the entry should be imported at all.
    ///
    /// Rejections are logged with the accession and the measured value.
    pub fn is_valid(&self) -> bool {
        let rules = &self.validity;
        let length = self.sequence_length();

        if length < rules.min_length {
            warn!(accession = %self.accession, length, "Sequence is too short");
            return false;
        }

        if length > rules.max_length {
            warn!(accession = %self.accession, length, "Sequence is too long");
            return false;
        }

        let n_count = self.sequence.chars().filter(|&c| c == 'N').count();
        let fraction = n_count as f64 / length as f64;
        if fraction > rules.max_n_fraction {
            warn!(
                accession = %self.accession,
                n_count,
                length,
                "Sequence has too many N's"
            );
            return false;
        }

        true
    }

    // ========================================================================
    // Output rows
    // ========================================================================

    pub fn write_ac_info(&self) -> Vec<AcInfoRow> {
        if !self.is_valid() {
            return Vec::new();
        }

        let a = &self.annotations;
        vec![AcInfoRow {
            accession: self.accession.clone(),
            parent_accession: a.parent_accession.clone(),
            seq_version: self.seq_version.clone(),
            feature_location_start: self.feature_location_start(),
            feature_location_end: self.feature_location_end(),
            feature_name: self.feature_name().to_string(),
            ordinal: a.ordinal.clone(),
            is_composite: a.is_composite.clone(),
            non_coding_id: a.non_coding_id.clone(),
            database_name: self.database.clone(),
            primary_id: self.primary_id.clone(),
            optional_id: a.optional_id.clone(),
            project: a.project.clone(),
            division: None,
            keywords: a.keywords.clone(),
            description: a.description.clone(),
            species: a.species.clone(),
            common_name: a.common_name.clone(),
            organelle: a.organelle.clone(),
            lineage: a.lineage.clone(),
            allele: None,
            anticodon: a.anticodon.clone(),
            chromosome: a.chromosome.clone(),
            experiment: a.experiment.clone(),
            function: a.function.clone(),
            gene: a.gene.clone(),
            gene_synonym: self.gene_synonym(),
            inference: a.inference.clone(),
            locus_tag: a.locus_tag.clone(),
            map: None,
            mol_type: a.mol_type.clone(),
            ncrna_class: self.ncrna_class().map(str::to_string),
            note: self.note(),
            old_locus_tag: a.old_locus_tag.clone(),
            operon: a.operon.clone(),
            product: a.product.clone(),
            pseudogene: a.pseudogene.clone(),
            standard_name: a.standard_name.clone(),
            db_xrefs: self.db_xrefs(),
        }]
    }

    pub fn write_sequence(&self) -> Vec<SequenceRow> {
        if !self.is_valid() {
            return Vec::new();
        }

        vec![SequenceRow {
            crc64: self.crc64(),
            length: self.sequence_length(),
            sequence: self.sequence.clone(),
            database_name: self.database.clone(),
            accession: self.accession.clone(),
            optional_id: self.annotations.optional_id.clone(),
            seq_version: self.seq_version.clone(),
            ncbi_tax_id: self.ncbi_tax_id,
            md5: self.md5(),
        }]
    }

    /// Sequence row when the sequence is at most the short sequence limit.
    pub fn write_seq_short(&self) -> Vec<SequenceRow> {
        if self.sequence_length() <= self.short_sequence_limit {
            self.write_sequence()
        } else {
            Vec::new()
        }
    }

    /// Sequence row when the sequence is above the short sequence limit.
    pub fn write_seq_long(&self) -> Vec<SequenceRow> {
        if self.sequence_length() > self.short_sequence_limit {
            self.write_sequence()
        } else {
            Vec::new()
        }
    }

    pub fn write_refs(&self) -> Vec<ReferenceRow> {
        self.write_part(|accession| {
            self.references
                .iter()
                .filter_map(|c| match c {
                    Citation::Full(r) => Some(r.writeable(accession)),
                    Citation::Id(_) => None,
                })
                .collect()
        })
    }

    pub fn write_ref_ids(&self) -> Vec<RefIdRow> {
        self.write_part(|accession| {
            self.references
                .iter()
                .filter_map(|c| match c {
                    Citation::Id(r) => Some(r.writeable(accession)),
                    Citation::Full(_) => None,
                })
                .collect()
        })
    }

    /// Exon rows for every region, including regions with an unknown strand.
    pub fn write_genomic_locations(&self) -> Vec<RegionRow> {
        self.write_part(|accession| {
            self.regions
                .iter()
                .flat_map(|r| r.writeable(accession, false, false))
                .collect()
        })
    }

    /// Exon rows for regions with a known strand.
    pub fn write_sequence_regions(&self) -> Vec<RegionRow> {
        self.write_part(|accession| {
            self.regions
                .iter()
                .flat_map(|r| r.writeable(accession, false, true))
                .collect()
        })
    }

    pub fn write_related_sequences(&self) -> Vec<RelatedSequenceRow> {
        self.write_part(|accession| {
            self.related_sequences
                .iter()
                .map(|r| r.writeable(accession))
                .collect()
        })
    }

    pub fn write_sequence_features(&self) -> Vec<SequenceFeatureRow> {
        self.write_part(|accession| {
            self.related_sequences
                .iter()
                .flat_map(|r| r.write_features(accession, self.ncbi_tax_id))
                .collect()
        })
    }

    pub fn write_secondary_structure(&self) -> Vec<SecondaryStructureRow> {
        self.write_part(|accession| {
            self.secondary_structure
                .writeable(accession)
                .into_iter()
                .collect()
        })
    }

    fn write_part<T>(&self, rows: impl FnOnce(&str) -> Vec<T>) -> Vec<T> {
        if !self.is_valid() {
            return Vec::new();
        }
        rows(&self.accession)
    }
}

// ============================================================================
// Builder
// ============================================================================

macro_rules! annotation_setters {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.annotations.$field = Some(value.into());
                self
            }
        )*
    };
}

/// Collects fields for an [`Entry`] and validates them together in `build`.
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    primary_id: Option<String>,
    accession: Option<String>,
    ncbi_tax_id: Option<i64>,
    database: Option<String>,
    sequence: Option<String>,
    regions: Vec<SequenceRegion>,
    rna_type: Option<String>,
    url: Option<String>,
    seq_version: Option<String>,
    location_start: Option<i64>,
    location_end: Option<i64>,
    note_data: Map<String, Value>,
    xref_data: Map<String, Value>,
    gene_synonyms: Vec<String>,
    references: Vec<Citation>,
    related_sequences: Vec<RelatedSequence>,
    secondary_structure: SecondaryStructure,
    annotations: EntryAnnotations,
    validity: ValidityRules,
    short_sequence_limit: Option<usize>,
}

impl EntryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary_id(mut self, value: impl Into<String>) -> Self {
        self.primary_id = Some(value.into());
        self
    }

    pub fn accession(mut self, value: impl Into<String>) -> Self {
        self.accession = Some(value.into());
        self
    }

    pub fn ncbi_tax_id(mut self, value: i64) -> Self {
        self.ncbi_tax_id = Some(value);
        self
    }

    pub fn database(mut self, value: impl Into<String>) -> Self {
        self.database = Some(value.into());
        self
    }

    pub fn sequence(mut self, value: impl Into<String>) -> Self {
        self.sequence = Some(value.into());
        self
    }

    pub fn regions(mut self, regions: Vec<SequenceRegion>) -> Self {
        self.regions = regions;
        self
    }

    pub fn region(mut self, region: SequenceRegion) -> Self {
        self.regions.push(region);
        self
    }

    /// INSDC name, SO term or legacy name; normalized in `build`.
    pub fn rna_type(mut self, value: impl Into<String>) -> Self {
        self.rna_type = Some(value.into());
        self
    }

    pub fn url(mut self, value: impl Into<String>) -> Self {
        self.url = Some(value.into());
        self
    }

    pub fn seq_version(mut self, value: impl Into<String>) -> Self {
        self.seq_version = Some(value.into());
        self
    }

    pub fn location_start(mut self, value: i64) -> Self {
        self.location_start = Some(value);
        self
    }

    pub fn location_end(mut self, value: i64) -> Self {
        self.location_end = Some(value);
        self
    }

    pub fn note_data(mut self, data: Map<String, Value>) -> Self {
        self.note_data = data;
        self
    }

    pub fn note(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.note_data.insert(key.into(), value.into());
        self
    }

    pub fn xref_data(mut self, data: Map<String, Value>) -> Self {
        self.xref_data = data;
        self
    }

    pub fn gene_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.gene_synonyms = synonyms;
        self
    }

    pub fn references(mut self, references: Vec<Citation>) -> Self {
        self.references = references;
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.references.push(Citation::Full(reference));
        self
    }

    pub fn id_reference(mut self, reference: IdReference) -> Self {
        self.references.push(Citation::Id(reference));
        self
    }

    pub fn related_sequences(mut self, related: Vec<RelatedSequence>) -> Self {
        self.related_sequences = related;
        self
    }

    pub fn secondary_structure(mut self, structure: SecondaryStructure) -> Self {
        self.secondary_structure = structure;
        self
    }

    /// Replace all free-text annotations at once.
    pub fn annotations(mut self, annotations: EntryAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn validity_rules(mut self, rules: ValidityRules) -> Self {
        self.validity = rules;
        self
    }

    /// Apply validity rules and the short sequence limit from `config`.
    pub fn config(mut self, config: &DataConfig) -> Self {
        self.validity = config.validity;
        self.short_sequence_limit = Some(config.short_sequence_limit);
        self
    }

    annotation_setters!(
        chromosome,
        species,
        common_name,
        lineage,
        gene,
        locus_tag,
        optional_id,
        product,
        parent_accession,
        ordinal,
        non_coding_id,
        project,
        keywords,
        division,
        organelle,
        allele,
        anticodon,
        experiment,
        function,
        inference,
        map,
        old_locus_tag,
        operon,
        standard_name,
        description,
        mol_type,
        is_composite,
        pseudogene,
    );

    pub fn build(self) -> Result<Entry> {
        let primary_id = self.primary_id.ok_or(DataError::MissingField("primary_id"))?;
        let accession = self.accession.ok_or(DataError::MissingField("accession"))?;
        let ncbi_tax_id = self.ncbi_tax_id.ok_or(DataError::MissingField("ncbi_tax_id"))?;
        let database = self.database.ok_or(DataError::MissingField("database"))?;
        let sequence = self.sequence.ok_or(DataError::MissingField("sequence"))?;
        let rna_type = self.rna_type.ok_or(DataError::MissingField("rna_type"))?;
        let url = self.url.ok_or(DataError::MissingField("url"))?;
        let seq_version = self.seq_version.ok_or(DataError::MissingField("seq_version"))?;

        if seq_version.is_empty() || !seq_version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::InvalidSeqVersion(seq_version));
        }
        if database.trim().is_empty() {
            return Err(DataError::InvalidField {
                field: "database",
                value: database,
            });
        }

        Ok(Entry {
            primary_id,
            accession,
            ncbi_tax_id,
            database: database.to_uppercase(),
            sequence,
            regions: self.regions,
            rna_type: RnaType::new(&rna_type)?,
            url,
            seq_version,
            location_start: self.location_start,
            location_end: self.location_end,
            note_data: self.note_data,
            xref_data: self.xref_data,
            gene_synonyms: self.gene_synonyms,
            references: self.references,
            related_sequences: self.related_sequences,
            secondary_structure: self.secondary_structure,
            annotations: self.annotations,
            validity: self.validity,
            short_sequence_limit: self.short_sequence_limit.unwrap_or(DEFAULT_SHORT_SEQUENCE_LIMIT),
        })
    }
}
