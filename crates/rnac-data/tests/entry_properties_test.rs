// Property tests for entry validity, taxonomy and coordinate normalization

use proptest::prelude::*;
use rnac_data::rna_type::{as_so_term, from_so_term, insdc_names, is_legacy_name, so_to_insdc};
use rnac_data::{CoordinateSystem, Entry, EntryBuilder, Exon, SequenceRegion, Strand};

fn builder(sequence: String) -> EntryBuilder {
    Entry::builder()
        .primary_id("a")
        .accession("b")
        .ncbi_tax_id(1)
        .database("a_database_name")
        .sequence(sequence)
        .rna_type("tRNA")
        .url("https://example.org")
        .seq_version("1")
}

fn entry(sequence: String) -> Entry {
    builder(sequence).build().expect("entry builds")
}

#[test]
fn test_length_boundaries() {
    assert!(!entry("A".repeat(9)).is_valid());
    assert!(entry("A".repeat(10)).is_valid());
    assert!(entry("A".repeat(1_000_000)).is_valid());
    assert!(!entry("A".repeat(1_000_001)).is_valid());
}

#[test]
fn test_exact_ten_percent_n_is_valid() {
    let sequence = format!("{}{}", "N".repeat(10), "A".repeat(90));
    assert!(entry(sequence).is_valid());

    let sequence = format!("{}{}", "N".repeat(11), "A".repeat(89));
    assert!(!entry(sequence).is_valid());
}

#[test]
fn test_lower_case_n_is_not_ambiguous() {
    let sequence = format!("{}{}", "n".repeat(50), "A".repeat(50));
    assert!(entry(sequence).is_valid());
}

#[test]
fn test_out_of_order_exons_are_sorted() {
    let exons = vec![
        Exon::new(53543, 53631).expect("exon"),
        Exon::new(53401, 53485).expect("exon"),
    ];
    let region = SequenceRegion::new("GRCh38", "7", Strand::Forward, exons, CoordinateSystem::one_based())
        .expect("region");
    assert_eq!(region.exons()[0].start(), 53401);
    assert_eq!(region.exons()[1].start(), 53543);
}

#[test]
fn test_feature_type_classification() {
    for rna_type in ["rRNA", "tRNA", "precursor_RNA", "tmRNA", "misc_RNA"] {
        let e = builder("ACGTACGTACGT".into()).rna_type(rna_type).build().expect("entry");
        assert_eq!(e.feature_name(), rna_type);
        assert_eq!(e.ncrna_class(), None);
    }

    for rna_type in ["miRNA", "snoRNA", "antisense_RNA", "lncRNA"] {
        let e = builder("ACGTACGTACGT".into()).rna_type(rna_type).build().expect("entry");
        assert_eq!(e.feature_name(), "ncRNA");
        assert_eq!(e.ncrna_class(), Some(rna_type));
    }

    let generic = builder("ACGTACGTACGT".into()).rna_type("SO:0000655").build().expect("entry");
    assert_eq!(generic.rna_type().as_str(), "other");
    assert_eq!(generic.ncrna_class(), Some("other"));
}

#[test]
fn test_so_round_trip_for_unambiguous_names() {
    for name in insdc_names() {
        if is_legacy_name(name) || name == "ncRNA" || name == "other" {
            continue;
        }
        let so = as_so_term(name).expect("known name");
        assert_eq!(
            from_so_term(&so).expect("known term"),
            from_so_term(name).expect("known name"),
            "round trip of {}",
            name
        );
        assert_eq!(so_to_insdc(&so), Some(name));
    }
}

proptest! {
    #[test]
    fn prop_invalid_entries_write_nothing(len in 0usize..10, n_heavy in 10usize..40) {
        let short = entry("A".repeat(len));
        prop_assert!(!short.is_valid());
        prop_assert!(short.write_ac_info().is_empty());
        prop_assert!(short.write_sequence().is_empty());
        prop_assert!(short.write_refs().is_empty());
        prop_assert!(short.write_genomic_locations().is_empty());

        // more than 10% N
        let ambiguous = entry(format!("{}{}", "N".repeat(n_heavy), "A".repeat(n_heavy)));
        prop_assert!(!ambiguous.is_valid());
        prop_assert!(ambiguous.write_sequence_regions().is_empty());
        prop_assert!(ambiguous.write_secondary_structure().is_empty());
    }

    #[test]
    fn prop_valid_sequences_accepted(sequence in "[ACGU]{10,200}") {
        prop_assert!(entry(sequence).is_valid());
    }

    #[test]
    fn prop_database_always_upper(database in "[a-zA-Z_]{1,20}") {
        let e = builder("ACGTACGTACGT".into()).database(database.clone()).build().expect("entry");
        prop_assert_eq!(e.database(), database.to_uppercase());
    }

    #[test]
    fn prop_as_so_term_idempotent_on_so_ids(digits in "[0-9]{7}") {
        let term = format!("SO:{}", digits);
        prop_assert_eq!(as_so_term(&term).expect("so term"), term);
    }

    #[test]
    fn prop_zero_based_round_trip(
        intervals in proptest::collection::vec((0i64..1_000_000, 1i64..5_000), 1..6),
        strand in prop_oneof![Just(Strand::Forward), Just(Strand::Reverse), Just(Strand::Unknown)],
    ) {
        let exons: Vec<Exon> = intervals
            .iter()
            .map(|&(start, len)| Exon::new(start, start + len).expect("exon"))
            .collect();
        let region = SequenceRegion::new("GRCh38", "1", strand, exons, CoordinateSystem::zero_based())
            .expect("region");

        let one = region.as_one_based();
        prop_assert_eq!(one.as_one_based(), one.clone());
        prop_assert_eq!(one.as_zero_based(), region);
    }
}
