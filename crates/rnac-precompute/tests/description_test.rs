// Description selection over realistic cross reference sets

use proptest::prelude::*;
use rnac_data::Entry;
use rnac_precompute::{description_of, short_description, Accession, DescriptionError, Sequence};

fn accession(database: &str, rna_type: &str, description: &str, species: &str) -> Accession {
    Accession::new(format!("{}:{}", database, description.len()), database, rna_type, description)
        .with_species(species)
}

#[test]
fn test_gtrnadb_gene_is_appended() {
    let sequence = Sequence::new(
        "URS00001DEEBE_562",
        Some(562),
        vec![
            accession("GtRNAdb", "tRNA", "Escherichia coli tRNA-Pro (CGG)", "Escherichia coli")
                .with_gene("tRNA-Pro-CGG-1-1"),
            accession("ENA", "tRNA", "Escherichia coli partial tRNA", "Escherichia coli"),
        ],
    );

    assert_eq!(
        description_of("tRNA", &sequence).unwrap(),
        "Escherichia coli tRNA-Pro (CGG) (tRNA-Pro-CGG-1-1)"
    );
}

#[test]
fn test_gtrnadb_many_trnas() {
    let genes = ["tRNA-Leu-CAA-1-1", "tRNA-Leu-CAA-1-2", "tRNA-Leu-CAA-2-1"];
    let accessions = genes
        .iter()
        .map(|g| {
            accession(
                "GtRNAdb",
                "tRNA",
                &format!("Homo sapiens tRNA-Leu (CAA) ({})", g),
                "Homo sapiens",
            )
            .with_gene(*g)
        })
        .collect();
    let sequence = Sequence::new("URS1_9606", Some(9606), accessions);

    assert_eq!(
        description_of("tRNA", &sequence).unwrap(),
        "Homo sapiens tRNA-Leu (CAA) (tRNA-Leu-CAA-1-1, tRNA-Leu-CAA-1-2, tRNA-Leu-CAA-2-1)"
    );
}

#[test]
fn test_database_order_wins_over_entropy() {
    let sequence = Sequence::new(
        "URS000069D7FA_6239",
        Some(6239),
        vec![
            accession("ENA", "tRNA", "Caenorhabditis elegans transfer RNA histidine", "Caenorhabditis elegans"),
            accession("WormBase", "tRNA", "Caenorhabditis elegans tRNA-His", "Caenorhabditis elegans"),
        ],
    );
    assert_eq!(description_of("tRNA", &sequence).unwrap(), "Caenorhabditis elegans tRNA-His");
}

#[test]
fn test_pdbe_repetitive_descriptions_lose() {
    let sequence = Sequence::new(
        "URS1_9606",
        Some(9606),
        vec![
            accession("PDBe", "misc_RNA", "5'-R(*AP*CP*AP*CP*AP*CP*AP*CP*A)-3'", "Homo sapiens"),
            accession("PDBe", "misc_RNA", "Homo sapiens tRNA", "Homo sapiens"),
        ],
    );
    assert_eq!(description_of("tRNA", &sequence).unwrap(), "Homo sapiens tRNA");
}

#[test]
fn test_description_from_entries() {
    let entry = Entry::builder()
        .primary_id("tmRNA_Hydr_sp._Y04A")
        .accession("TMRNA_WEB:1")
        .ncbi_tax_id(380749)
        .database("tmRNA Website")
        .sequence("GGGGCCGTCGAGGTTCGAAGCGCGGTGAGGCTCGTGGCATGGGCCGGCGCGGCC")
        .rna_type("tmRNA")
        .url("https://example.org")
        .seq_version("1")
        .species("Hydrogenobaculum sp. Y04AAS1")
        .description("Hydrogenobaculum sp. Y04AAS1 tmRNA")
        .build()
        .expect("entry");

    let accession = Accession::from_entry(&entry);
    assert_eq!(accession.database, "tmrna website");
    assert_eq!(accession.taxid, Some(380749));

    let sequence = Sequence::new("URS00000AEE53_380749", Some(380749), vec![accession]);
    assert_eq!(
        description_of("tmRNA", &sequence).unwrap(),
        "Hydrogenobaculum sp. Y04AAS1 tmRNA"
    );
}

#[test]
fn test_generic_and_errors() {
    let shared = Sequence::new(
        "URS0000181AEC",
        None,
        (1..=3)
            .map(|taxid| accession("ENA", "tRNA", "tRNA", "x").with_taxid(taxid))
            .collect(),
    );
    assert_eq!(description_of("tRNA", &shared).unwrap(), "tRNA from 3 species");

    let unknown = Sequence::new(
        "URS1_1",
        Some(1),
        vec![accession("SomewhereElse", "tRNA", "tRNA", "x")],
    );
    assert!(matches!(
        description_of("tRNA", &unknown),
        Err(DescriptionError::NoSuitableDatabase(_))
    ));
}

#[test]
fn test_short_description_of_selected() {
    let sequence = Sequence::new(
        "URS00007150F8_9913",
        Some(9913),
        vec![accession("miRBase", "precursor_RNA", "Bos taurus mir-431 stem-loop", "Bos taurus")
            .with_common_name("cattle")
            .with_optional_id("bta-mir-431")],
    );

    let description = description_of("precursor_RNA", &sequence).unwrap();
    assert_eq!(description, "Bos taurus (cattle) microRNA bta-mir-431 precursor");
    assert_eq!(
        short_description(&description, &sequence).unwrap(),
        "microRNA bta-mir-431 precursor"
    );
}

fn databases() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("ENA"),
        Just("RefSeq"),
        Just("Rfam"),
        Just("HGNC"),
        Just("GtRNAdb"),
        Just("PDBe"),
    ]
}

proptest! {
    #[test]
    fn prop_description_is_deterministic(
        xrefs in proptest::collection::vec(
            (databases(), "[A-Za-z ]{1,30}", proptest::option::of("[A-Z]{2,4}[0-9]{1,2}")),
            1..8,
        )
    ) {
        let accessions: Vec<Accession> = xrefs
            .iter()
            .map(|(db, description, gene)| {
                let accession = Accession::new("x", *db, "tRNA", description.clone());
                match gene {
                    Some(g) => accession.with_gene(g.clone()),
                    None => accession,
                }
            })
            .collect();

        let forward = Sequence::new("URS1_9606", Some(9606), accessions.clone());
        let mut reversed_accessions = accessions;
        reversed_accessions.reverse();
        let reversed = Sequence::new("URS1_9606", Some(9606), reversed_accessions);

        let first = description_of("tRNA", &forward).unwrap();
        prop_assert_eq!(&first, &description_of("tRNA", &forward).unwrap());
        prop_assert_eq!(first, description_of("tRNA", &reversed).unwrap());
    }
}
