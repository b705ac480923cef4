//! Exons and genomic regions

use crate::coordinates::{CoordinateSystem, Strand};
use crate::error::{DataError, Result};
use crate::rows::RegionRow;
use serde::Serialize;

/// A single genomic interval. The coordinate system it is expressed in is
/// carried by the owning [`SequenceRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Exon {
    start: i64,
    stop: i64,
}

impl Exon {
    pub fn new(start: i64, stop: i64) -> Result<Self> {
        if stop < start {
            return Err(DataError::InvalidExon { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Build from a raw `{"exon_start": .., "exon_stop": ..}` object.
    pub fn from_json(raw: &serde_json::Value) -> Result<Self> {
        let field = |name: &'static str| {
            raw.get(name)
                .and_then(serde_json::Value::as_i64)
                .ok_or(DataError::MissingField(name))
        };
        Self::new(field("exon_start")?, field("exon_stop")?)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    /// Shift the start while keeping the stop; used by coordinate conversions.
    ///
    /// Unchecked: the one-based form of an empty half-open exon has
    /// `start == stop + 1`.
    pub(crate) fn with_start(&self, start: i64) -> Self {
        Self {
            start,
            stop: self.stop,
        }
    }
}

/// Ordered exons of one transcript on a single chromosome and strand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SequenceRegion {
    assembly_id: String,
    chromosome: String,
    strand: Strand,
    exons: Vec<Exon>,
    coordinate_system: CoordinateSystem,
}

impl SequenceRegion {
    /// Exons are sorted by start regardless of strand.
    pub fn new(
        assembly_id: impl Into<String>,
        chromosome: impl Into<String>,
        strand: Strand,
        mut exons: Vec<Exon>,
        coordinate_system: CoordinateSystem,
    ) -> Result<Self> {
        let chromosome = chromosome.into();
        if exons.is_empty() {
            return Err(DataError::EmptyRegion(chromosome));
        }
        exons.sort_by_key(|e| e.start);

        Ok(Self {
            assembly_id: assembly_id.into(),
            chromosome,
            strand,
            exons,
            coordinate_system,
        })
    }

    pub fn assembly_id(&self) -> &str {
        &self.assembly_id
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    pub fn start(&self) -> i64 {
        self.exons.first().map_or(0, Exon::start)
    }

    pub fn stop(&self) -> i64 {
        self.exons.last().map_or(0, Exon::stop)
    }

    /// Region name without a sequence id, e.g. `@1/11-20,31-40:+`.
    pub fn name(&self) -> String {
        self.name_with("")
    }

    /// Region name keyed by `id`, over one-based normalized exons.
    pub fn name_with(&self, id: &str) -> String {
        let exons: Vec<String> = self
            .exons
            .iter()
            .map(|e| {
                let normalized = self.coordinate_system.normalize(e);
                format!("{}-{}", normalized.start, normalized.stop)
            })
            .collect();

        format!(
            "{}@{}/{}:{}",
            id,
            self.chromosome,
            exons.join(","),
            self.strand.display_string()
        )
    }

    pub fn sizes(&self) -> Result<Vec<i64>> {
        self.exons
            .iter()
            .map(|e| self.coordinate_system.size(e))
            .collect()
    }

    pub fn as_one_based(&self) -> Self {
        self.converted(CoordinateSystem::one_based(), |cs, e| cs.as_one_based(e))
    }

    pub fn as_zero_based(&self) -> Self {
        self.converted(CoordinateSystem::zero_based(), |cs, e| cs.as_zero_based(e))
    }

    fn converted(
        &self,
        target: CoordinateSystem,
        convert: impl Fn(&CoordinateSystem, &Exon) -> Exon,
    ) -> Self {
        Self {
            assembly_id: self.assembly_id.clone(),
            chromosome: self.chromosome.clone(),
            strand: self.strand,
            exons: self
                .exons
                .iter()
                .map(|e| convert(&self.coordinate_system, e))
                .collect(),
            coordinate_system: target,
        }
    }

    /// One row per exon, coordinates normalized to one-based closed.
    ///
    /// Nothing is written for an unknown strand when `require_strand` is set.
    /// With `is_upi` the region name is keyed by `accession`.
    pub fn writeable(&self, accession: &str, is_upi: bool, require_strand: bool) -> Vec<RegionRow> {
        if require_strand && !self.strand.is_known() {
            return Vec::new();
        }

        let name = if is_upi {
            self.name_with(accession)
        } else {
            self.name()
        };

        self.exons
            .iter()
            .map(|exon| {
                let normalized = self.coordinate_system.normalize(exon);
                RegionRow {
                    accession: accession.to_string(),
                    region_name: name.clone(),
                    chromosome: self.chromosome.clone(),
                    strand: self.strand.display_int(),
                    assembly_id: self.assembly_id.clone(),
                    exon_count: self.exons.len(),
                    exon_start: normalized.start,
                    exon_stop: normalized.stop,
                }
            })
            .collect()
    }
}
