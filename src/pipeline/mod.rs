//! End-to-end dataset build: entries → molecules → vocabulary → records →
//! partitions → files.
//!
//! Each stage is exposed on its own so callers can report progress between
//! stages; [`prepare`] chains the in-memory stages and [`write_dataset`]
//! persists the result.

mod config;
mod error;

pub use config::{BuildConfig, default_config, load_config};
pub use error::Error;

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dataset::{self, PartitionKind, Partitions, SplitConfig};
use crate::encode;
use crate::io::{self, jsonl::DatasetEntry, record::RecordWriter, smiles};
use crate::model::molecule::Molecule;
use crate::model::record::LabeledRecord;
use crate::model::vocab::TypeVocabulary;

/// A parsed molecule together with the labels of its dataset entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMolecule {
    pub molecule: Molecule,
    pub labels: BTreeMap<String, f64>,
}

/// Vocabulary and partitioned records produced by [`prepare`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDataset {
    pub vocabulary: TypeVocabulary,
    pub partitions: Partitions<LabeledRecord>,
}

/// One partition file written by [`write_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPartition {
    pub kind: PartitionKind,
    pub path: PathBuf,
    pub records: usize,
}

/// Parses every entry's SMILES, optionally expanding implicit hydrogens.
pub fn parse_entries(
    entries: &[DatasetEntry],
    add_hydrogens: bool,
) -> Result<Vec<LabeledMolecule>, Error> {
    let molecules = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut molecule = smiles::read(&entry.smiles).map_err(|source| Error::Parse {
                index,
                line: entry.line,
                source,
            })?;
            if add_hydrogens {
                molecule.add_hydrogens();
            }
            debug!(
                index,
                smiles = %entry.smiles,
                atoms = molecule.atom_count(),
                bonds = molecule.bond_count(),
                "parsed"
            );
            Ok(LabeledMolecule {
                molecule,
                labels: entry.labels.clone(),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    info!(molecules = molecules.len(), add_hydrogens, "parsed dataset entries");
    Ok(molecules)
}

/// Collects atom and bond categories over the whole corpus.
pub fn build_vocabulary(molecules: &[LabeledMolecule]) -> TypeVocabulary {
    let vocab = encode::build_vocabulary(molecules.iter().map(|m| &m.molecule));
    info!(
        atom_types = vocab.atom_types().len(),
        bond_types = vocab.bond_types().len(),
        "built vocabulary"
    );
    vocab
}

/// Encodes every molecule and attaches its labels as single-precision floats.
pub fn encode_entries(
    molecules: &[LabeledMolecule],
    vocab: &TypeVocabulary,
) -> Result<Vec<LabeledRecord>, Error> {
    let records = molecules
        .iter()
        .enumerate()
        .map(|(index, m)| {
            let record = encode::encode(&m.molecule, vocab)
                .map_err(|source| Error::Encode { index, source })?;
            let labels = m
                .labels
                .iter()
                .map(|(name, &value)| (name.clone(), value as f32))
                .collect();
            Ok(LabeledRecord { record, labels })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    info!(records = records.len(), "encoded molecules");
    Ok(records)
}

/// Shuffles and splits the records into train/valid/test partitions.
pub fn partition(
    records: Vec<LabeledRecord>,
    config: &SplitConfig,
) -> Result<Partitions<LabeledRecord>, Error> {
    Ok(dataset::partition(records, config)?)
}

/// Runs parsing, vocabulary construction, encoding and splitting.
pub fn prepare(entries: &[DatasetEntry], config: &BuildConfig) -> Result<PreparedDataset, Error> {
    let molecules = parse_entries(entries, config.add_hydrogens)?;
    let vocabulary = build_vocabulary(&molecules);
    let records = encode_entries(&molecules, &vocabulary)?;
    let partitions = partition(records, &config.split)?;
    Ok(PreparedDataset {
        vocabulary,
        partitions,
    })
}

/// Writes the three partition containers and `vocab.json` into `out_dir`,
/// creating the directory if needed.
///
/// A failure part-way leaves already written files in place.
pub fn write_dataset(
    out_dir: impl AsRef<Path>,
    prepared: &PreparedDataset,
) -> Result<Vec<WrittenPartition>, Error> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(io::Error::from)?;

    let mut written = Vec::with_capacity(PartitionKind::ALL.len());
    for (kind, records) in prepared.partitions.iter() {
        let path = out_dir.join(kind.file_name());
        let mut writer = RecordWriter::create(&path)?;
        writer.write_all(records)?;
        let count = writer.count();
        writer.finish()?;
        info!(partition = %kind, records = count, path = %path.display(), "wrote partition");
        written.push(WrittenPartition {
            kind,
            path,
            records: count,
        });
    }

    let vocab_path = out_dir.join(io::vocab::FILE_NAME);
    let file = fs::File::create(&vocab_path).map_err(io::Error::from)?;
    let mut out = BufWriter::new(file);
    io::vocab::write(&mut out, &prepared.vocabulary)?;
    out.flush().map_err(io::Error::from)?;
    info!(path = %vocab_path.display(), "wrote vocabulary");

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{BondOrder, Element};

    fn entry(line: usize, smiles: &str, gap: f64) -> DatasetEntry {
        DatasetEntry {
            line,
            smiles: smiles.to_string(),
            labels: BTreeMap::from([("bandgap".to_string(), gap)]),
        }
    }

    fn corpus() -> Vec<DatasetEntry> {
        ["C", "N", "O", "CC#N", "c1ccccc1", "C=O", "CO", "FC(F)F", "C1CC1", "OC=O"]
            .iter()
            .enumerate()
            .map(|(i, s)| entry(i + 1, s, i as f64 * 0.1))
            .collect()
    }

    #[test]
    fn parse_entries_expands_hydrogens_on_request() {
        let entries = vec![entry(1, "C", 0.5)];
        let with_h = parse_entries(&entries, true).unwrap();
        let without_h = parse_entries(&entries, false).unwrap();
        assert_eq!(with_h[0].molecule.atom_count(), 5);
        assert_eq!(without_h[0].molecule.atom_count(), 1);
        assert_eq!(with_h[0].labels["bandgap"], 0.5);
    }

    #[test]
    fn parse_failure_identifies_entry() {
        let entries = vec![entry(1, "C", 0.0), entry(4, "C(C", 0.0)];
        let err = parse_entries(&entries, true).unwrap_err();
        assert!(matches!(err, Error::Parse { index: 1, line: 4, .. }));
        assert_eq!(err.entry_index(), Some(1));
    }

    #[test]
    fn vocabulary_covers_corpus() {
        let molecules = parse_entries(&corpus(), true).unwrap();
        let vocab = build_vocabulary(&molecules);
        assert_eq!(
            vocab.atom_types(),
            &[Element::H, Element::C, Element::N, Element::O, Element::F]
        );
        assert_eq!(
            vocab.bond_types(),
            &[
                BondOrder::Single,
                BondOrder::Double,
                BondOrder::Triple,
                BondOrder::Aromatic
            ]
        );
    }

    #[test]
    fn encode_entries_carries_labels() {
        let molecules = parse_entries(&corpus(), true).unwrap();
        let vocab = build_vocabulary(&molecules);
        let records = encode_entries(&molecules, &vocab).unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].record.n_atom, 5);
        assert_eq!(records[0].record.atom, vec![1, 0, 0, 0, 0]);
        assert_eq!(records[2].labels["bandgap"], 0.2f64 as f32);
    }

    #[test]
    fn disconnected_entry_fails_encoding_with_index() {
        // heavy atoms only, so the isolated F is the highest index
        let entries = vec![entry(1, "C", 0.0), entry(2, "CC#N.[F]", 0.0)];
        let molecules = parse_entries(&entries, false).unwrap();
        let vocab = build_vocabulary(&molecules);
        let err = encode_entries(&molecules, &vocab).unwrap_err();
        match err {
            Error::Encode { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.molecule(), "CC#N.[F]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn prepare_partitions_every_record() {
        let mut config = BuildConfig::default();
        config.split.seed = Some(3);
        let prepared = prepare(&corpus(), &config).unwrap();

        assert_eq!(prepared.partitions.test.len(), 1);
        assert_eq!(prepared.partitions.valid.len(), 1);
        assert_eq!(prepared.partitions.train.len(), 8);
        assert_eq!(prepared.partitions.seed, 3);
        assert_eq!(prepare(&corpus(), &config).unwrap(), prepared);
    }

    #[test]
    fn invalid_split_fraction_is_reported() {
        let mut config = BuildConfig::default();
        config.split.test_fraction = 1.5;
        assert!(matches!(
            prepare(&corpus(), &config).unwrap_err(),
            Error::Split(_)
        ));
    }

    #[test]
    fn write_dataset_creates_partition_files_and_vocabulary() {
        let mut config = BuildConfig::default();
        config.split.seed = Some(11);
        let prepared = prepare(&corpus(), &config).unwrap();

        let out_dir = std::env::temp_dir().join(format!(
            "molgraph-forge-write-{}",
            std::process::id()
        ));
        let written = write_dataset(&out_dir, &prepared).unwrap();

        assert_eq!(written.len(), 3);
        for part in &written {
            let restored =
                io::record::read_records(fs::File::open(&part.path).unwrap()).unwrap();
            assert_eq!(restored.as_slice(), prepared.partitions.get(part.kind));
            assert_eq!(part.records, restored.len());
        }
        let vocab =
            io::vocab::read(fs::File::open(out_dir.join(io::vocab::FILE_NAME)).unwrap()).unwrap();
        assert_eq!(vocab, prepared.vocabulary);

        fs::remove_dir_all(&out_dir).unwrap();
    }
}
