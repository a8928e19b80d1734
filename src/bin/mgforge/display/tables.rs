use std::collections::BTreeMap;
use std::io::{self, Write};

use molgraph_forge::pipeline::{LabeledMolecule, WrittenPartition};
use molgraph_forge::{Element, LabeledRecord, TypeVocabulary};

use super::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_DISTRIBUTION_ROWS: usize = 12;

pub fn print_corpus_summary(entries: usize, molecules: &[LabeledMolecule]) {
    let atoms: usize = molecules.iter().map(|m| m.molecule.atom_count()).sum();
    let bonds: usize = molecules.iter().map(|m| m.molecule.bond_count()).sum();
    let largest = molecules
        .iter()
        .map(|m| m.molecule.atom_count())
        .max()
        .unwrap_or(0);
    let labels = molecules
        .first()
        .map(|m| m.labels.keys().cloned().collect::<Vec<_>>().join(", "))
        .unwrap_or_default();

    let rows = vec![
        ("Entries", entries.to_string()),
        ("Total Atoms", atoms.to_string()),
        ("Total Bonds", bonds.to_string()),
        ("Atoms / Mol", format!("{:.2}", mean(atoms, molecules.len()))),
        ("Bonds / Mol", format!("{:.2}", mean(bonds, molecules.len()))),
        ("Largest Mol", format!("{largest} atoms")),
        ("Labels", if labels.is_empty() { "-".into() } else { labels }),
    ];

    print_kv_table(&mut io::stderr().lock(), "Corpus Summary", &rows);
}

pub fn print_element_distribution(molecules: &[LabeledMolecule]) {
    let mut counts: BTreeMap<Element, usize> = BTreeMap::new();
    for atom in molecules.iter().flat_map(|m| &m.molecule.atoms) {
        *counts.entry(atom.element).or_insert(0) += 1;
    }

    let total = counts.values().sum();
    let mut sorted: Vec<_> = counts
        .into_iter()
        .map(|(element, count)| (element.symbol().to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    print_distribution_table(
        &mut io::stderr().lock(),
        "Element Distribution",
        &sorted,
        total,
    );
}

pub fn print_vocabulary(vocab: &TypeVocabulary) {
    let mut out = io::stderr().lock();

    let index_w = 5usize;
    let kind_w = 6usize;
    let sep_overhead = 8;
    let name_w = SAFE_TABLE_WIDTH.saturating_sub(index_w + kind_w + sep_overhead);

    let atoms = vocab
        .atom_types()
        .iter()
        .enumerate()
        .map(|(i, e)| (i, "atom", format!("{} (Z={})", e.symbol(), e.atomic_number())));
    let bonds = vocab
        .bond_types()
        .iter()
        .enumerate()
        .map(|(i, b)| (i, "bond", b.name().to_string()));

    let rule = |l: char, m: char, r: char| {
        format!(
            "{INDENT}{l}{}{m}{}{m}{}{r}",
            "─".repeat(index_w + 2),
            "─".repeat(kind_w + 2),
            "─".repeat(name_w + 2)
        )
    };

    let _ = writeln!(out, "{INDENT}┌─ Vocabulary ─┐");
    let _ = writeln!(out, "{}", rule('┌', '┬', '┐'));
    let _ = writeln!(
        out,
        "{INDENT}│ {:>index_w$} │ {:<kind_w$} │ {:<name_w$} │",
        "Index", "Kind", "Category"
    );
    let _ = writeln!(out, "{}", rule('├', '┼', '┤'));
    for (i, kind, name) in atoms.chain(bonds) {
        let _ = writeln!(
            out,
            "{INDENT}│ {:>index_w$} │ {:<kind_w$} │ {:<name_w$} │",
            i,
            kind,
            truncate(&name, name_w)
        );
    }
    let _ = writeln!(out, "{}", rule('└', '┴', '┘'));
}

pub fn print_partitions(written: &[WrittenPartition], seed: u64) {
    let mut out = io::stderr().lock();

    let total: usize = written.iter().map(|p| p.records).sum();
    let kind_w = 10usize;
    let count_w = 8usize;
    let share_w = 6usize;
    let sep_overhead = 10;
    let file_w = SAFE_TABLE_WIDTH.saturating_sub(kind_w + count_w + share_w + sep_overhead);

    let rule = |l: char, m: char, r: char| {
        format!(
            "{INDENT}{l}{}{m}{}{m}{}{m}{}{r}",
            "─".repeat(kind_w + 2),
            "─".repeat(count_w + 2),
            "─".repeat(share_w + 2),
            "─".repeat(file_w + 2)
        )
    };

    let _ = writeln!(out, "{INDENT}┌─ Partitions (seed {seed}) ─┐");
    let _ = writeln!(out, "{}", rule('┌', '┬', '┐'));
    let _ = writeln!(
        out,
        "{INDENT}│ {:<kind_w$} │ {:>count_w$} │ {:>share_w$} │ {:<file_w$} │",
        "Partition", "Records", "Share", "File"
    );
    let _ = writeln!(out, "{}", rule('├', '┼', '┤'));
    for part in written {
        let file = part
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{INDENT}│ {:<kind_w$} │ {:>count_w$} │ {:>share_w$} │ {:<file_w$} │",
            part.kind.to_string(),
            part.records,
            format!("{:.1}%", 100.0 * mean(part.records, total)),
            truncate(&file, file_w)
        );
    }
    let _ = writeln!(out, "{}", rule('└', '┴', '┘'));
}

/// Summary of a record container; `sample` is the decoded prefix, `total`
/// the number of records in the whole file.
pub fn print_record_summary(
    file: &str,
    sample: &[LabeledRecord],
    total: usize,
    vocab: Option<&TypeVocabulary>,
) {
    let mut out = io::stderr().lock();

    let atoms: usize = sample.iter().map(|r| r.record.n_atom).sum();
    let edges: usize = sample.iter().map(|r| r.record.n_bond).sum();
    let labels = sample
        .first()
        .map(|r| r.labels.keys().cloned().collect::<Vec<_>>().join(", "))
        .unwrap_or_default();

    let rows = vec![
        ("File", file.to_string()),
        ("Records", total.to_string()),
        ("Sampled", sample.len().to_string()),
        ("Atoms / Rec", format!("{:.2}", mean(atoms, sample.len()))),
        ("Edges / Rec", format!("{:.2}", mean(edges, sample.len()))),
        ("Labels", if labels.is_empty() { "-".into() } else { labels }),
    ];
    print_kv_table(&mut out, "Record Summary", &rows);

    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &index in sample.iter().flat_map(|r| &r.record.atom) {
        *counts.entry(index).or_insert(0) += 1;
    }
    let mut sorted: Vec<_> = counts
        .into_iter()
        .map(|(index, count)| {
            let name = vocab
                .and_then(|v| v.atom_type(index))
                .map(|e| e.symbol().to_string())
                .unwrap_or_else(|| format!("#{index}"));
            (name, count)
        })
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    if !sorted.is_empty() {
        print_distribution_table(&mut out, "Atom Type Distribution", &sorted, atoms);
    }
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 14usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let rule = |l: char, m: char, r: char| {
        format!(
            "{INDENT}{l}{}{m}{}{r}",
            "─".repeat(key_w + 2),
            "─".repeat(val_w + 2)
        )
    };

    let _ = writeln!(
        out,
        "{INDENT}┌─ {} ─┐",
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule('┌', '┬', '┐'));
    let _ = writeln!(out, "{INDENT}│ {:<key_w$} │ {:>val_w$} │", "Metric", "Value");
    let _ = writeln!(out, "{}", rule('├', '┼', '┤'));
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }
    let _ = writeln!(out, "{}", rule('└', '┴', '┘'));
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 8usize;
    let count_w = 10usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let rule = |l: char, m: char, r: char| {
        format!(
            "{INDENT}{l}{}{m}{}{m}{}{r}",
            "─".repeat(name_w + 2),
            "─".repeat(count_w + 2),
            "─".repeat(dist_w + 2)
        )
    };

    let _ = writeln!(
        out,
        "{INDENT}┌─ {} ─┐",
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule('┌', '┬', '┐'));
    let _ = writeln!(
        out,
        "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        "Type", "Count", "Distribution"
    );
    let _ = writeln!(out, "{}", rule('├', '┼', '┤'));

    for (name, count) in data.iter().take(MAX_DISTRIBUTION_ROWS) {
        let pct = 100.0 * mean(*count, total);
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            truncate(name, name_w),
            count,
            dist_cell
        );
    }

    if data.len() > MAX_DISTRIBUTION_ROWS {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            "...",
            "...",
            format!("({} more types)", data.len() - MAX_DISTRIBUTION_ROWS)
        );
    }

    let _ = writeln!(out, "{}", rule('└', '┴', '┘'));
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = (((pct / 100.0) * max_width as f64).round() as usize).min(max_width);
    format!("{}{}", "█".repeat(filled), "░".repeat(max_width - filled))
}

/// `num / den`, zero for an empty denominator.
fn mean(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
