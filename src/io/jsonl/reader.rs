use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::io::{Format, error::Error};

/// Names of the fields pulled out of each dataset line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryFields {
    #[serde(default = "default_smiles_field")]
    pub smiles_field: String,

    /// Scalar properties copied into every entry's labels.
    #[serde(default = "default_label_fields")]
    pub label_fields: Vec<String>,
}

fn default_smiles_field() -> String {
    "smiles".to_string()
}
fn default_label_fields() -> Vec<String> {
    vec!["u0_atom".to_string(), "bandgap".to_string()]
}

impl Default for EntryFields {
    fn default() -> Self {
        Self {
            smiles_field: default_smiles_field(),
            label_fields: default_label_fields(),
        }
    }
}

/// One molecule as it appears in the dataset, before parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    /// 1-based line number in the source.
    pub line: usize,
    pub smiles: String,
    pub labels: BTreeMap<String, f64>,
}

/// Streams [`DatasetEntry`] values out of a JSON-lines source.
///
/// Blank lines are skipped. Each remaining line must be a JSON object that
/// carries the SMILES field as a string and every label field as a number
/// (numeric strings are accepted too).
pub struct EntryReader<'f, R> {
    lines: std::io::Lines<R>,
    fields: &'f EntryFields,
    line_no: usize,
}

impl<'f, R: BufRead> EntryReader<'f, R> {
    pub fn new(reader: R, fields: &'f EntryFields) -> Self {
        Self {
            lines: reader.lines(),
            fields,
            line_no: 0,
        }
    }

    fn parse_line(&self, line: &str) -> Result<DatasetEntry, Error> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| Error::parse(Format::JsonLines, self.line_no, e.to_string()))?;
        let Value::Object(object) = value else {
            return Err(Error::parse(
                Format::JsonLines,
                self.line_no,
                "expected a JSON object",
            ));
        };

        let smiles = match object.get(&self.fields.smiles_field) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(_) => {
                return Err(Error::parse(
                    Format::JsonLines,
                    self.line_no,
                    format!("field '{}' is not a string", self.fields.smiles_field),
                ));
            }
            None => {
                return Err(Error::parse(
                    Format::JsonLines,
                    self.line_no,
                    format!("missing field '{}'", self.fields.smiles_field),
                ));
            }
        };

        let labels = self
            .fields
            .label_fields
            .iter()
            .map(|name| Ok((name.clone(), self.label(&object, name)?)))
            .collect::<Result<BTreeMap<_, _>, Error>>()?;

        Ok(DatasetEntry {
            line: self.line_no,
            smiles,
            labels,
        })
    }

    fn label(&self, object: &Map<String, Value>, name: &str) -> Result<f64, Error> {
        let value = object.get(name).ok_or_else(|| {
            Error::parse(
                Format::JsonLines,
                self.line_no,
                format!("missing label field '{name}'"),
            )
        })?;
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number.ok_or_else(|| {
            Error::parse(
                Format::JsonLines,
                self.line_no,
                format!("label field '{name}' is not numeric: {value}"),
            )
        })
    }
}

impl<R: BufRead> Iterator for EntryReader<'_, R> {
    type Item = Result<DatasetEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => return Some(Err(Error::Io { source })),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(self.parse_line(&line));
        }
    }
}

/// Reads every entry from `reader`, stopping at the first bad line.
pub fn read_entries<R: BufRead>(reader: R, fields: &EntryFields) -> Result<Vec<DatasetEntry>, Error> {
    EntryReader::new(reader, fields).collect()
}
