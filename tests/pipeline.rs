use std::collections::BTreeSet;
use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use molgraph_forge::dataset::{self, PartitionKind};
use molgraph_forge::io::jsonl::{EntryFields, read_entries};
use molgraph_forge::io::record::{RecordWriter, read_records};
use molgraph_forge::io::{self, decompress};
use molgraph_forge::pipeline::{self, PreparedDataset};
use molgraph_forge::{BondOrder, BuildConfig, Element, EncodedRecord, SplitConfig};

const SMILES: &[&str] = &[
    "C", "N", "O", "C#C", "C#N", "C=O", "CO", "CC", "OC=O", "CC#N", "C1CC1", "c1ccccc1",
    "c1ccncc1", "c1cc[nH]c1", "FC(F)F", "CC(=O)N", "OCC#CC", "C1=CC=CO1", "NC(=O)C=O",
    "CC1(C)CC1",
];

fn jsonl_corpus() -> String {
    SMILES
        .iter()
        .enumerate()
        .map(|(i, smiles)| {
            format!(
                "{{\"index\": {i}, \"smiles\": \"{smiles}\", \"u0_atom\": {}, \"bandgap\": \"{}\"}}\n",
                -1.5 - i as f64,
                0.25 + i as f64 * 0.01
            )
        })
        .collect()
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn prepared(seed: u64) -> PreparedDataset {
    let reader = decompress(Cursor::new(gzip(&jsonl_corpus()))).unwrap();
    let entries = read_entries(reader, &EntryFields::default()).unwrap();
    assert_eq!(entries.len(), SMILES.len());

    let mut config = BuildConfig::default();
    config.split.seed = Some(seed);
    pipeline::prepare(&entries, &config).unwrap()
}

fn assert_well_formed(rec: &EncodedRecord) {
    assert_eq!(rec.atom.len(), rec.n_atom);
    assert_eq!(rec.bond.len(), rec.n_bond);
    assert_eq!(rec.connectivity.len(), rec.n_bond);
    assert_eq!(rec.n_bond % 2, 0);
    assert!(rec.connectivity.windows(2).all(|w| w[0] <= w[1]));
    if rec.n_bond > 0 {
        assert_eq!(rec.max_connected_atom(), Some(rec.n_atom - 1));
    }
    for row in &rec.connectivity {
        assert!(rec.connectivity.contains(&[row[1], row[0]]), "missing reverse of {row:?}");
    }
}

#[test]
fn gzipped_corpus_builds_consistent_partitions() {
    let prepared = prepared(42);

    assert_eq!(
        prepared.vocabulary.atom_types(),
        &[Element::H, Element::C, Element::N, Element::O, Element::F]
    );
    assert_eq!(
        prepared.vocabulary.bond_types(),
        &[
            BondOrder::Single,
            BondOrder::Double,
            BondOrder::Triple,
            BondOrder::Aromatic
        ]
    );

    // 20 entries: test ceil(2.0) = 2, valid ceil(1.8) = 2
    assert_eq!(prepared.partitions.test.len(), 2);
    assert_eq!(prepared.partitions.valid.len(), 2);
    assert_eq!(prepared.partitions.train.len(), 16);

    let mut seen = BTreeSet::new();
    for (_, records) in prepared.partitions.iter() {
        for labeled in records {
            assert_well_formed(&labeled.record);
            let energy = labeled.labels["u0_atom"];
            assert!(seen.insert(energy.to_bits()), "record {energy} appears twice");
            assert!(labeled.labels.contains_key("bandgap"));
            assert!(!labeled.labels.contains_key("index"));
        }
    }
    assert_eq!(seen.len(), SMILES.len());
}

#[test]
fn same_seed_reproduces_the_build() {
    assert_eq!(prepared(7), prepared(7));
}

#[test]
fn partitions_survive_the_record_container() {
    let prepared = prepared(5);

    for kind in PartitionKind::ALL {
        let records = prepared.partitions.get(kind);
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_all(records).unwrap();
        assert_eq!(writer.count(), records.len());
        let bytes = writer.finish().unwrap();

        let restored = read_records(Cursor::new(bytes)).unwrap();
        assert_eq!(restored.as_slice(), records, "{kind} partition changed");
    }
}

#[test]
fn vocabulary_file_round_trips() {
    let prepared = prepared(1);
    let mut buf = Vec::new();
    io::vocab::write(&mut buf, &prepared.vocabulary).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("\"aromatic\""));
    assert_eq!(io::vocab::read(Cursor::new(buf)).unwrap(), prepared.vocabulary);
}

#[test]
fn truncated_container_is_rejected() {
    let prepared = prepared(3);
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_all(&prepared.partitions.train).unwrap();
    let mut bytes = writer.finish().unwrap();
    bytes.truncate(bytes.len() - 3);

    let err = read_records(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, io::Error::MalformedRecord { .. }), "{err}");
}

#[test]
fn qm9_sized_corpus_splits_into_reference_counts() {
    let config = SplitConfig {
        test_fraction: 0.1,
        valid_fraction: 0.1,
        seed: Some(2024),
    };
    let parts = dataset::partition((0..25_000).collect::<Vec<u32>>(), &config).unwrap();

    assert_eq!(parts.train.len(), 20_250);
    assert_eq!(parts.valid.len(), 2_250);
    assert_eq!(parts.test.len(), 2_500);

    let mut all: Vec<u32> = parts.iter().flat_map(|(_, p)| p.iter().copied()).collect();
    all.sort_unstable();
    assert_eq!(all, (0..25_000).collect::<Vec<_>>());
}

#[test]
fn bad_smiles_stops_the_build_at_its_entry() {
    let text = "{\"smiles\": \"CC\", \"u0_atom\": 1, \"bandgap\": 2}\n\
                \n\
                {\"smiles\": \"C1CC\", \"u0_atom\": 1, \"bandgap\": 2}\n";
    let entries = read_entries(Cursor::new(text), &EntryFields::default()).unwrap();
    let err = pipeline::prepare(&entries, &BuildConfig::default()).unwrap_err();
    assert!(matches!(err, pipeline::Error::Parse { index: 1, line: 3, .. }), "{err}");
}
