use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::record::{EncodedRecord, LabeledRecord};

pub const N_ATOM: &str = "n_atom";
pub const N_BOND: &str = "n_bond";
pub const ATOM: &str = "atom";
pub const BOND: &str = "bond";
pub const CONNECTIVITY: &str = "connectivity";

const RECORD_FIELDS: [&str; 5] = [N_ATOM, N_BOND, ATOM, BOND, CONNECTIVITY];

/// A typed list of values stored under one feature name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Feature {
    Int64List(Vec<i64>),
    FloatList(Vec<f32>),
}

impl Feature {
    pub fn len(&self) -> usize {
        match self {
            Feature::Int64List(v) => v.len(),
            Feature::FloatList(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Feature::Int64List(_) => "int64",
            Feature::FloatList(_) => "float",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("missing feature '{0}'")]
    Missing(String),

    #[error("feature '{name}' should be a {expected} list, found {found}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("feature '{name}' is inconsistent: {details}")]
    Inconsistent { name: String, details: String },
}

impl FeatureError {
    fn inconsistent(name: &str, details: impl Into<String>) -> Self {
        Self::Inconsistent {
            name: name.to_string(),
            details: details.into(),
        }
    }
}

/// Self-describing payload of one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub features: BTreeMap<String, Feature>,
}

impl Example {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, feature: Feature) {
        self.features.insert(name.into(), feature);
    }

    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features.get(name)
    }

    pub fn int64_list(&self, name: &str) -> Result<&[i64], FeatureError> {
        match self.get(name) {
            Some(Feature::Int64List(values)) => Ok(values),
            Some(other) => Err(FeatureError::WrongType {
                name: name.to_string(),
                expected: "int64",
                found: other.kind(),
            }),
            None => Err(FeatureError::Missing(name.to_string())),
        }
    }

    pub fn float_list(&self, name: &str) -> Result<&[f32], FeatureError> {
        match self.get(name) {
            Some(Feature::FloatList(values)) => Ok(values),
            Some(other) => Err(FeatureError::WrongType {
                name: name.to_string(),
                expected: "float",
                found: other.kind(),
            }),
            None => Err(FeatureError::Missing(name.to_string())),
        }
    }

    fn scalar(&self, name: &str) -> Result<usize, FeatureError> {
        match self.int64_list(name)? {
            [value] => to_index(name, *value),
            values => Err(FeatureError::inconsistent(
                name,
                format!("expected one value, found {}", values.len()),
            )),
        }
    }

    fn indices(&self, name: &str) -> Result<Vec<usize>, FeatureError> {
        self.int64_list(name)?
            .iter()
            .map(|&v| to_index(name, v))
            .collect()
    }
}

fn to_index(name: &str, value: i64) -> Result<usize, FeatureError> {
    usize::try_from(value)
        .map_err(|_| FeatureError::inconsistent(name, format!("negative value {value}")))
}

fn int64s(values: impl IntoIterator<Item = usize>) -> Feature {
    Feature::Int64List(values.into_iter().map(|v| v as i64).collect())
}

impl From<&LabeledRecord> for Example {
    fn from(labeled: &LabeledRecord) -> Self {
        let rec = &labeled.record;
        let mut example = Example::new();
        example.insert(N_ATOM, int64s([rec.n_atom]));
        example.insert(N_BOND, int64s([rec.n_bond]));
        example.insert(ATOM, int64s(rec.atom.iter().copied()));
        example.insert(BOND, int64s(rec.bond.iter().copied()));
        example.insert(
            CONNECTIVITY,
            int64s(rec.connectivity.iter().flat_map(|row| row.iter().copied())),
        );
        for (name, &value) in &labeled.labels {
            example.insert(name.clone(), Feature::FloatList(vec![value]));
        }
        example
    }
}

impl TryFrom<&Example> for LabeledRecord {
    type Error = FeatureError;

    /// Rebuilds a record, treating every other single-valued float feature as
    /// a label.
    fn try_from(example: &Example) -> Result<Self, Self::Error> {
        let n_atom = example.scalar(N_ATOM)?;
        let n_bond = example.scalar(N_BOND)?;
        let atom = example.indices(ATOM)?;
        let bond = example.indices(BOND)?;
        let flat = example.indices(CONNECTIVITY)?;

        if atom.len() != n_atom {
            return Err(FeatureError::inconsistent(
                ATOM,
                format!("{} entries for n_atom = {n_atom}", atom.len()),
            ));
        }
        if bond.len() != n_bond {
            return Err(FeatureError::inconsistent(
                BOND,
                format!("{} entries for n_bond = {n_bond}", bond.len()),
            ));
        }
        if flat.len() != 2 * n_bond {
            return Err(FeatureError::inconsistent(
                CONNECTIVITY,
                format!("{} values for n_bond = {n_bond}", flat.len()),
            ));
        }

        let connectivity = flat.chunks_exact(2).map(|row| [row[0], row[1]]).collect();
        let labels = example
            .features
            .iter()
            .filter(|(name, _)| !RECORD_FIELDS.contains(&name.as_str()))
            .filter_map(|(name, feature)| match feature {
                Feature::FloatList(values) if values.len() == 1 => Some((name.clone(), values[0])),
                _ => None,
            })
            .collect();

        Ok(LabeledRecord {
            record: EncodedRecord {
                n_atom,
                n_bond,
                atom,
                bond,
                connectivity,
            },
            labels,
        })
    }
}
