use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed-schema graph record for one molecule.
///
/// `bond[k]` is the bond category of the directed edge `connectivity[k]`.
/// Rows are sorted by source then target atom index, so all edges leaving a
/// given atom occupy one contiguous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRecord {
    pub n_atom: usize,
    pub n_bond: usize,
    pub atom: Vec<usize>,
    pub bond: Vec<usize>,
    pub connectivity: Vec<[usize; 2]>,
}

impl EncodedRecord {
    /// Half-open range of `connectivity` rows whose source is `atom`.
    pub fn edges_from(&self, atom: usize) -> std::ops::Range<usize> {
        let start = self.connectivity.partition_point(|row| row[0] < atom);
        let end = self.connectivity.partition_point(|row| row[0] <= atom);
        start..end
    }

    /// Highest atom index referenced by any connectivity row.
    pub fn max_connected_atom(&self) -> Option<usize> {
        self.connectivity.iter().map(|row| row[0].max(row[1])).max()
    }
}

/// An encoded record with the scalar property labels attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub record: EncodedRecord,
    pub labels: BTreeMap<String, f32>,
}

impl LabeledRecord {
    pub fn new(record: EncodedRecord) -> Self {
        Self {
            record,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, name: impl Into<String>, value: f32) -> Self {
        self.labels.insert(name.into(), value);
        self
    }
}
