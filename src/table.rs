use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

/// Marker for "field not found / not applicable", distinct from an empty string
/// (present but blank, e.g. a missing guardian name).
pub const NOT_AVAILABLE: &str = "N/A";

/// Identity columns, in their fixed leading order.
pub const BASE_COLUMNS: &[&str] = &[
    "PRN",
    "Seat No",
    "Name",
    "Mother Name",
    "Semester",
    "SGPA",
    "Credits Earned/Total",
    "Total Credit Points",
];

/// Per-subject attribute suffixes, in display priority order.
pub const ATTR_SUFFIXES: &[&str] = &[
    "_CCE", "_ESE", "_TW", "_TOT", "_CRD", "_ERN_CRD", "_GRD", "_GRD_PNT", "_CRD_PNT",
];

/// One student's flat column → value mapping. `None` marks a column the student
/// never produced (filled in during reconciliation).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentRecord {
    pub fields: BTreeMap<String, Option<String>>,
}

impl StudentRecord {
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), Some(value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(|v| v.as_deref())
    }
}

/// The reconciled, rectangular output: every row has every column.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<StudentRecord>,
}

#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub students: usize,
    pub subjects: usize,
    pub sgpa_reported: usize,
    pub sgpa_mean: Option<f64>,
}

impl ResultTable {
    pub fn summary(&self) -> TableSummary {
        let subjects: BTreeSet<&str> = self
            .columns
            .iter()
            .filter(|c| !BASE_COLUMNS.contains(&c.as_str()))
            .filter_map(|c| c.split('_').next())
            .collect();

        let sgpas: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|r| r.get("SGPA"))
            .filter_map(|s| s.parse::<f64>().ok())
            .collect();
        let sgpa_mean = if sgpas.is_empty() {
            None
        } else {
            Some(sgpas.iter().sum::<f64>() / sgpas.len() as f64)
        };

        TableSummary {
            students: self.rows.len(),
            subjects: subjects.len(),
            sgpa_reported: sgpas.len(),
            sgpa_mean,
        }
    }
}

/// Hands out unique column names: the first claim keeps the bare name, later
/// claims of the same name get the first free `_{i}` suffix. Used per student
/// while parsing subject rows, and again as a cross-record guard when the final
/// schema is assembled.
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    seen: HashSet<String>,
}

impl ColumnRegistry {
    pub fn claim(&mut self, name: &str) -> String {
        if self.seen.insert(name.to_string()) {
            return name.to_string();
        }
        let mut i = 1;
        loop {
            let candidate = format!("{name}_{i}");
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            i += 1;
        }
    }
}

/// Merge per-student records into one rectangular table: union the columns,
/// fill the gaps with `None`, order the schema, and drop repeated PRNs
/// (first occurrence wins).
pub fn reconcile(records: Vec<StudentRecord>) -> ResultTable {
    let union: BTreeSet<String> = records
        .iter()
        .flat_map(|r| r.fields.keys().cloned())
        .collect();

    let columns = order_columns(&union);

    let mut rows = Vec::with_capacity(records.len());
    let mut seen_prns: HashSet<String> = HashSet::new();
    for mut record in records {
        let prn = record.get("PRN").unwrap_or_default().to_string();
        if !seen_prns.insert(prn) {
            continue;
        }
        for col in &columns {
            record.fields.entry(col.clone()).or_insert(None);
        }
        rows.push(record);
    }

    ResultTable { columns, rows }
}

/// Fixed identity columns first, then subject columns grouped by subject code
/// and ordered by attribute priority within each group.
fn order_columns(union: &BTreeSet<String>) -> Vec<String> {
    let mut grouped: BTreeMap<&str, Vec<&String>> = BTreeMap::new();
    for col in union {
        if BASE_COLUMNS.contains(&col.as_str()) {
            continue;
        }
        let group = col.split('_').next().unwrap_or(col);
        grouped.entry(group).or_default().push(col);
    }

    // The union is a set, so each claim below keeps its bare name; the
    // registry is an invariant check that renames rather than collides if a
    // future derivation path ever produces an identical string twice.
    let mut registry = ColumnRegistry::default();
    let mut ordered: Vec<String> = BASE_COLUMNS
        .iter()
        .map(|c| registry.claim(c))
        .collect();

    for cols in grouped.values() {
        let mut keyed: Vec<(usize, &String)> = cols
            .iter()
            .map(|c| (attr_priority(c), *c))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        for (_, col) in keyed {
            ordered.push(registry.claim(col));
        }
    }

    ordered
}

/// Position of a column's attribute suffix in `ATTR_SUFFIXES`, after stripping
/// a trailing `_{i}` disambiguator. Longest suffix wins, so `X_ERN_CRD` sorts
/// at the `_ERN_CRD` slot rather than `_CRD`. Unrecognized suffixes sort last.
fn attr_priority(column: &str) -> usize {
    let stripped = strip_disambiguator(column);
    ATTR_SUFFIXES
        .iter()
        .enumerate()
        .filter(|(_, s)| stripped.ends_with(*s))
        .max_by_key(|(_, s)| s.len())
        .map(|(i, _)| i)
        .unwrap_or(usize::MAX)
}

fn strip_disambiguator(column: &str) -> &str {
    if let Some(pos) = column.rfind('_') {
        let tail = &column[pos + 1..];
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            return &column[..pos];
        }
    }
    column
}

// ── Tests ──
