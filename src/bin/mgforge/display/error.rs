use std::io::{self, Write};

use anyhow::Error;

use super::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// Gathers suggestions from every typed error found in the chain.
struct HintCollector {
    hints: Vec<String>,
    typed: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self {
            hints: Vec::new(),
            typed: false,
        };

        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<molgraph_forge::pipeline::Error>() {
                collector.pipeline_hints(e);
            } else if let Some(e) = cause.downcast_ref::<molgraph_forge::io::Error>() {
                collector.io_hints(e);
            } else if let Some(e) = cause.downcast_ref::<molgraph_forge::EncodeError>() {
                collector.encode_hints(e);
            } else if let Some(e) = cause.downcast_ref::<molgraph_forge::dataset::Error>() {
                collector.split_hints(e);
            } else if let Some(e) = cause.downcast_ref::<molgraph_forge::io::record::FeatureError>()
            {
                collector.feature_hints(e);
            } else if let Some(e) = cause.downcast_ref::<std::io::Error>() {
                collector.std_io_hints(e);
            }
        }

        if !collector.typed {
            collector.fallback_hints(err);
        }

        collector.hints.dedup();
        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.typed = true;
        self.hints.push(hint.into());
    }

    fn pipeline_hints(&mut self, err: &molgraph_forge::pipeline::Error) {
        use molgraph_forge::pipeline::Error as PipelineError;

        match err {
            PipelineError::ConfigParse(_) => {
                self.add("Check the TOML syntax of the --config file");
                self.add("Unknown keys are ignored; misspelled keys fall back to defaults");
            }
            PipelineError::Parse { index, line, .. } => {
                self.add(format!(
                    "Entry {index} on input line {line} holds the offending SMILES"
                ));
                self.add("Every entry must parse; remove or fix it and rerun the build");
            }
            PipelineError::Encode { index, .. } => {
                self.add(format!("Entry {index} parsed but could not be encoded"));
            }
            // transparent variants hide the inner error from the chain
            PipelineError::Io(inner) => self.io_hints(inner),
            PipelineError::Split(inner) => self.split_hints(inner),
        }
    }

    fn io_hints(&mut self, err: &molgraph_forge::io::Error) {
        use molgraph_forge::io::{Error as IoError, Format};

        match err {
            IoError::Io { source } => self.std_io_hints(source),

            IoError::Smiles { position, .. } => {
                self.add(format!(
                    "The SMILES parser stopped at character {position}"
                ));
                self.add(
                    "Supported: organic subset, bracket atoms, branches, ring closures, aromatic lowercase atoms",
                );
            }

            IoError::Parse { format, line, .. } => {
                self.add(format!("Inspect line {line} of the {format} input"));
                match format {
                    Format::JsonLines => {
                        self.add("Each non-blank line must be one JSON object");
                        self.add("Use --smiles-field and --label to match the field names");
                    }
                    Format::Vocabulary => {
                        self.add("The vocabulary file should be the vocab.json written by 'build'");
                    }
                }
            }

            IoError::Json { format, .. } => {
                self.add(format!("The {format} input is not valid JSON"));
            }

            IoError::Serialization(_) | IoError::MalformedRecord { .. } => {
                self.add("The record file may be truncated or was not written by 'build'");
                self.add("Rebuild the dataset to regenerate the partition files");
            }
        }
    }

    fn encode_hints(&mut self, err: &molgraph_forge::EncodeError) {
        use molgraph_forge::EncodeError;

        match err {
            EncodeError::Disconnected { .. } => {
                self.add("The highest-indexed atom has no bond, so the graph does not reach it");
                self.add("This usually means a '.'-separated fragment ends the SMILES string");
            }
            EncodeError::UnknownAtomType { .. } | EncodeError::UnknownBondType { .. } => {
                self.add("The vocabulary does not cover this molecule");
                self.add("Omit --vocab or pass the vocab.json built from a corpus containing it");
            }
            EncodeError::EmptyMolecule { .. } => {
                self.add("The SMILES string contains no atoms");
            }
            EncodeError::InvalidBond { .. } => {
                self.add("The molecule contains a self-bond or an out-of-range atom index");
            }
        }
    }

    fn split_hints(&mut self, err: &molgraph_forge::dataset::Error) {
        use molgraph_forge::dataset::Error as SplitError;

        match err {
            SplitError::InvalidFraction { .. } => {
                self.add("Fractions are shares of the corpus, e.g. --test-fraction 0.1");
                self.add("The validation share is taken from what remains after the test cut");
            }
        }
    }

    fn feature_hints(&mut self, err: &molgraph_forge::io::record::FeatureError) {
        self.add(format!("Record schema mismatch: {err}"));
    }

    fn std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("Check that the file path is correct");
            }
            ErrorKind::PermissionDenied => {
                self.add("Check file permissions with `ls -la`");
                self.add("Ensure the output directory is writable");
            }
            ErrorKind::UnexpectedEof => {
                self.add("The input ended early; the file may be truncated");
            }
            ErrorKind::InvalidData => {
                self.add("The input is not valid UTF-8 or the gzip stream is corrupt");
            }
            ErrorKind::BrokenPipe => {
                self.add("The downstream reader closed the pipe early");
            }
            _ => {}
        }
    }

    fn fallback_hints(&mut self, err: &Error) {
        let msg = err
            .chain()
            .map(|cause| cause.to_string())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        if msg.contains("terminal") || msg.contains("stdin") {
            self.hints
                .push("Provide a dataset via -i/--input or pipe JSON lines to stdin".into());
        } else if msg.contains("empty") {
            self.hints
                .push("Verify the input contains at least one dataset entry".into());
        }
    }
}
