// Species specific descriptions
//
// Cross references are grouped by database and the first database in
// `ORDERING` that agrees with the computed RNA type supplies the description.
// Some databases annotate one sequence with many genes; their builders list
// the genes (or summarize them) instead of picking one description.

use super::utils::{self, item_sorter, select_best_description};
use super::{Accession, DescriptionError, Result, Sequence};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// Databases in the order their descriptions are trusted.
pub const ORDERING: [&str; 28] = [
    "mirbase",
    "wormbase",
    "hgnc",
    "gencode",
    "ensembl",
    "tair",
    "sgd",
    "flybase",
    "dictbase",
    "pombase",
    "mgi",
    "rgd",
    "lncipedia",
    "lncrnadb",
    "gtrnadb",
    "tmrna website",
    "pdbe",
    "refseq",
    "rfam",
    "modomics",
    "vega",
    "srpdb",
    "snopy",
    "silva",
    "greengenes",
    "rdp",
    "ena",
    "noncode",
];

// ============================================================================
// Cross reference selection
// ============================================================================

/// Selector accepting cross references whose database assigned a compatible
/// RNA type.
///
/// `ncRNA` is always compatible, and `miRNA` / `precursor_RNA` are treated as
/// one type since several databases mix them up. PDBe `misc_RNA` entries are
/// always accepted.
pub fn suitable_xref<'a>(required_rna_type: &'a str) -> impl Fn(&str, &Accession) -> bool + 'a {
    let mut allowed: Vec<&'a str> = vec![required_rna_type, "ncRNA"];
    if required_rna_type == "miRNA" || required_rna_type == "precursor_RNA" {
        allowed.extend(["miRNA", "precursor_RNA"]);
    }

    move |db_name: &str, accession: &Accession| {
        if accession.database != db_name {
            return false;
        }
        if allowed.contains(&accession.rna_type.as_str()) {
            return true;
        }
        accession.database == "pdbe" && accession.rna_type.eq_ignore_ascii_case("misc_rna")
    }
}

/// Selector accepting every cross reference of the database.
pub fn accept_any(db_name: &str, accession: &Accession) -> bool {
    accession.database == db_name
}

// ============================================================================
// Gene lists
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Gene,
    OptionalId,
    LocusTag,
}

impl Attribute {
    fn get(self, accession: &Accession) -> Option<&str> {
        match self {
            Attribute::Gene => accession.gene.as_deref(),
            Attribute::OptionalId => accession.optional_id.as_deref(),
            Attribute::LocusTag => accession.locus_tag.as_deref(),
        }
    }
}

/// How a database that maps many genes onto one sequence is summarized.
#[derive(Debug, Clone, Copy)]
struct GeneSelection {
    /// Plural noun used in `"multiple {name}"`
    name: &'static str,
    /// Removed from the chosen description; `{}` is the candidate's attribute
    pattern: &'static str,
    attribute: Attribute,
    items: Attribute,
    max_items: usize,
}

const GENES: GeneSelection = GeneSelection {
    name: "genes",
    pattern: r"\({}\)$",
    attribute: Attribute::Gene,
    items: Attribute::Gene,
    max_items: 5,
};

const TRNAS: GeneSelection = GeneSelection { name: "tRNAs", ..GENES };

const LOCUS_TAGS: GeneSelection = GeneSelection {
    name: "genes",
    pattern: r"{}$",
    attribute: Attribute::LocusTag,
    items: Attribute::LocusTag,
    max_items: 6,
};

const OPTIONAL_IDS: GeneSelection = GeneSelection {
    attribute: Attribute::OptionalId,
    items: Attribute::OptionalId,
    ..LOCUS_TAGS
};

const MIRNAS: GeneSelection = GeneSelection {
    name: "miRNAs",
    pattern: r"\w+-{}",
    attribute: Attribute::Gene,
    items: Attribute::OptionalId,
    max_items: 5,
};

const PRECURSORS: GeneSelection = GeneSelection { name: "precursors", ..MIRNAS };

/// Turn gene-like items into a compact list, collapsing numbered runs.
///
/// `RNA5S1` through `RNA5S8` become `RNA5S1-8`; a prefix that contains a dash
/// is written as `hsa-mir-1302 9 to 11`.
pub fn compute_item_ranges<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut data: Vec<(String, Option<u64>)> = items
        .into_iter()
        .filter(|item| !item.is_empty())
        .map(item_sorter)
        .collect();
    data.sort();
    data.dedup();

    let mut names = Vec::new();
    let mut index = 0;
    while index < data.len() {
        let prefix = data[index].0.clone();
        let mut numbers = Vec::new();
        while index < data.len() && data[index].0 == prefix {
            match data[index].1 {
                Some(number) => numbers.push(number),
                None if !prefix.is_empty() => names.push(prefix.clone()),
                None => {}
            }
            index += 1;
        }

        if prefix.is_empty() {
            continue;
        }

        let short = prefix.strip_suffix('-').unwrap_or(&prefix);
        for (start, stop) in utils::group_consecutives(numbers) {
            match stop {
                None => names.push(format!("{}{}", prefix, start)),
                Some(stop) if prefix.contains('-') => {
                    names.push(format!("{} {} to {}", short, start, stop))
                }
                Some(stop) => names.push(format!("{}{}-{}", short, start, stop)),
            }
        }
    }

    names
}

/// Append the listed terms to `base`, or `"multiple {name}"` when there are
/// `max_items` or more of them. Nothing is added when `base` already
/// contains the suffix.
pub fn add_term_suffix<'a, I>(base: &str, terms: I, name: &str, max_items: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let items = compute_item_ranges(terms);
    let suffix = if items.len() < max_items {
        items.join(", ")
    } else {
        format!("multiple {}", name)
    };

    if base.contains(&suffix) {
        return base.to_string();
    }

    format!("{} ({})", base.trim(), suffix)
}

/// Lowest attribute first; equal attributes fall back to the description so
/// the choice does not depend on the order of the cross references.
fn candidate_key(attribute: Attribute, accession: &Accession) -> (Option<&str>, &str) {
    (attribute.get(accession), accession.description.as_str())
}

fn select_with_several_genes(accessions: &[&Accession], selection: &GeneSelection) -> Result<String> {
    let attribute = selection.attribute;
    let candidate = accessions
        .iter()
        .copied()
        .min_by_key(|a| candidate_key(attribute, *a))
        .ok_or_else(|| DescriptionError::NoCandidates(selection.name.to_string()))?;

    let genes: BTreeSet<&str> = accessions
        .iter()
        .filter_map(|a| attribute.get(*a))
        .filter(|g| !g.is_empty())
        .collect();

    if genes.len() <= 1 {
        let mut description = candidate.description.clone();
        if let Some(gene) = genes.first() {
            if !description.contains(gene) {
                description.push_str(&format!(" ({})", gene));
            }
        }
        return Ok(description);
    }

    let basic = match attribute.get(candidate) {
        Some(value) => {
            let pattern = selection.pattern.replace("{}", &regex::escape(value));
            Regex::new(&pattern)?
                .replace_all(&candidate.description, "")
                .into_owned()
        }
        None => candidate.description.clone(),
    };

    let mut items: Vec<&str> = accessions
        .iter()
        .filter_map(|a| selection.items.get(*a))
        .filter(|item| !item.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if items.is_empty() {
        return Ok(basic);
    }
    items.sort_by_key(|item| (item_sorter(item), *item));

    Ok(add_term_suffix(&basic, items, selection.name, selection.max_items))
}

// ============================================================================
// Database specific builders
// ============================================================================

type Builder = fn(&[&Accession], &str) -> Result<String>;

const BUILDERS: &[(&str, Builder)] = &[
    ("ensembl", several_genes),
    ("flybase", locus_tags),
    ("gencode", several_genes),
    ("gtrnadb", trnas),
    ("hgnc", several_genes),
    ("mgi", several_genes),
    ("mirbase", mirbase),
    ("sgd", optional_ids),
    ("tair", locus_tags),
];

/// Builder for a database, falling back to [`fallback`] for databases without
/// special handling. Names are matched lower-cased with spaces replaced by
/// underscores.
fn builder_for(database: &str) -> Builder {
    let name = database.replace(' ', "_").to_lowercase();
    BUILDERS
        .iter()
        .find(|(db, _)| *db == name)
        .map(|(_, builder)| *builder)
        .unwrap_or(fallback)
}

fn several_genes(accessions: &[&Accession], _: &str) -> Result<String> {
    select_with_several_genes(accessions, &GENES)
}

fn trnas(accessions: &[&Accession], _: &str) -> Result<String> {
    select_with_several_genes(accessions, &TRNAS)
}

fn locus_tags(accessions: &[&Accession], _: &str) -> Result<String> {
    select_with_several_genes(accessions, &LOCUS_TAGS)
}

fn optional_ids(accessions: &[&Accession], _: &str) -> Result<String> {
    select_with_several_genes(accessions, &OPTIONAL_IDS)
}

fn fallback(accessions: &[&Accession], _: &str) -> Result<String> {
    select_best_description(accessions.iter().map(|a| a.description.as_str()))
        .map(str::to_string)
        .ok_or_else(|| DescriptionError::NoCandidates("fallback".to_string()))
}

/// miRBase precursors are renamed to `"{species} ({common name}) microRNA
/// {gene} precursor"` before genes are listed.
fn mirbase(accessions: &[&Accession], rna_type: &str) -> Result<String> {
    if rna_type == "miRNA" {
        return select_with_several_genes(accessions, &MIRNAS);
    }

    let mir_name = Regex::new(r"(?i)^.*-mir-\d+$")?;
    let precursor = Regex::new(r"^([^-]+?-mir-[^-]+)(.+)?$")?;

    let mut updated = Vec::with_capacity(accessions.len());
    for accession in accessions {
        let gene = precursor_gene(accession, &mir_name);
        let mut changed = (*accession).clone();

        if let Some(caps) = gene.as_deref().and_then(|g| precursor.captures(g)) {
            let full = caps.get(1).map_or("", |m| m.as_str());
            let trimmed = full.splitn(4, '-').take(3).collect::<Vec<_>>().join("-");
            changed.description = format!(
                "{} ({}) microRNA {} precursor",
                accession.species.as_deref().unwrap_or_default(),
                accession.common_name.as_deref().unwrap_or_default(),
                trimmed
            );
        }

        changed.gene = gene;
        updated.push(changed);
    }

    let refs: Vec<&Accession> = updated.iter().collect();
    select_with_several_genes(&refs, &PRECURSORS)
}

/// Precursor name from the optional id, else from a `stem-loop` description,
/// else from a trailing `xxx-mir-N` word.
fn precursor_gene(accession: &Accession, mir_name: &Regex) -> Option<String> {
    if let Some(id) = accession.optional_id.as_deref().filter(|id| !id.is_empty()) {
        return Some(id.to_string());
    }

    let description = accession.description.as_str();
    let words: Vec<&str> = description.split(' ').collect();
    let from_end = |n: usize| {
        words
            .iter()
            .rev()
            .nth(n)
            .filter(|w| !w.is_empty())
            .map(|w| w.to_string())
    };

    if description.ends_with("stem-loop") {
        if let Some(gene) = from_end(1) {
            return Some(gene);
        }
    }
    if description.ends_with("stem loop") {
        if let Some(gene) = from_end(2) {
            return Some(gene);
        }
    }

    let last = words.last().copied().unwrap_or_default();
    let last = last
        .strip_suffix("-3p")
        .or_else(|| last.strip_suffix("-5p"))
        .unwrap_or(last);
    mir_name.is_match(last).then(|| last.to_string())
}

// ============================================================================
// Post processing
// ============================================================================

/// Replace a "predicted" description with the best Rfam description of the
/// same RNA type, listing the genes of the selected cross references.
fn improve_predicted_description(
    rna_type: &str,
    all: &[Accession],
    selected: &[&Accession],
    description: &str,
) -> String {
    let alternatives = all
        .iter()
        .filter(|a| a.database == "rfam" && a.rna_type == rna_type)
        .map(|a| a.description.as_str());

    let Some(best) = select_best_description(alternatives) else {
        return description.to_string();
    };

    let genes = selected.iter().filter_map(|a| a.gene.as_deref());
    add_term_suffix(best, genes, "genes", 3)
}

/// Some databases end descriptions with a literal `null`.
fn replace_nulls(rna_type: &str, description: &str) -> String {
    if description.contains(rna_type) {
        return description.to_string();
    }
    match description.strip_suffix("null") {
        Some(stem) => format!("{}{}", stem, rna_type),
        None => description.to_string(),
    }
}

fn cleanup(rna_type: &str, db_name: &str, description: &str) -> Result<String> {
    let mut description = utils::remove_extra_description_terms(description)?;
    if db_name.eq_ignore_ascii_case("refseq") {
        description = utils::trim_trailing_rna_type(rna_type, &description)?;
    }
    Ok(description.trim().to_string())
}

/// Description of a species specific sequence.
///
/// Fails with [`DescriptionError::NoSuitableDatabase`] when no cross
/// reference comes from a known database.
pub fn description_of(rna_type: &str, sequence: &Sequence) -> Result<String> {
    let selector = suitable_xref(rna_type);
    let (db_name, accessions) = match utils::best(&ORDERING, &sequence.accessions, &selector) {
        Some(found) => found,
        None => {
            debug!(id = %sequence.id, rna_type, "No cross reference agrees on the RNA type");
            utils::best(&ORDERING, &sequence.accessions, accept_any)
                .ok_or_else(|| DescriptionError::NoSuitableDatabase(sequence.id.clone()))?
        }
    };

    debug!(
        id = %sequence.id,
        database = db_name,
        accessions = accessions.len(),
        "Selected description source"
    );

    let build = builder_for(db_name);
    let mut description = build(&accessions, rna_type)?;

    if description.contains("predicted") {
        description =
            improve_predicted_description(rna_type, &sequence.accessions, &accessions, &description);
    }

    if description.ends_with(" null") {
        description = replace_nulls(rna_type, &description);
    }

    cleanup(rna_type, db_name, &description)
}
