use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::parser::segment::StudentBlock;
use crate::parser::tokens::{self, TokenKind};
use crate::table::{ColumnRegistry, NOT_AVAILABLE};

// Subject code shape: three letters, hyphen, digits, optional variant tags,
// optional term-work marker. Must cover the whole first token.
static SUBJECT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}-\d+(?:-[A-Z]{3})?(?:-\d+)?(?:_TW)?$").unwrap());

const TERM_WORK_TAG: &str = "_TW";

/// The nine attributes of one subject row, all defaulting to "N/A".
#[derive(Debug, Clone)]
struct SubjectValues {
    cce: String,
    ese: String,
    tw: String,
    tot: String,
    crd: String,
    ern_crd: String,
    grd: String,
    grd_pnt: String,
    crd_pnt: String,
}

impl Default for SubjectValues {
    fn default() -> Self {
        let na = || NOT_AVAILABLE.to_string();
        SubjectValues {
            cce: na(),
            ese: na(),
            tw: na(),
            tot: na(),
            crd: na(),
            ern_crd: na(),
            grd: na(),
            grd_pnt: na(),
            crd_pnt: na(),
        }
    }
}

impl SubjectValues {
    fn into_pairs(self, prefix: &str) -> [(String, String); 9] {
        [
            (format!("{prefix}_CCE"), self.cce),
            (format!("{prefix}_ESE"), self.ese),
            (format!("{prefix}_TW"), self.tw),
            (format!("{prefix}_TOT"), self.tot),
            (format!("{prefix}_CRD"), self.crd),
            (format!("{prefix}_ERN_CRD"), self.ern_crd),
            (format!("{prefix}_GRD"), self.grd),
            (format!("{prefix}_GRD_PNT"), self.grd_pnt),
            (format!("{prefix}_CRD_PNT"), self.crd_pnt),
        ]
    }
}

/// Parse every subject line in a block into `(column, value)` pairs. Repeated
/// column names within one student are disambiguated through the registry, so
/// a duplicated line never overwrites an earlier one.
pub fn extract(block: &StudentBlock) -> Vec<(String, String)> {
    let mut registry = ColumnRegistry::default();
    let mut pairs = Vec::new();

    for line in block.text.lines() {
        let line = line.trim();
        let parts: Vec<&str> = line.split_whitespace().collect();
        // Need at least a code and some data.
        if parts.len() < 3 {
            continue;
        }
        let code = parts[0];
        if !SUBJECT_CODE_RE.is_match(code) {
            continue;
        }

        // Term-work rows get their own column prefix so they never collide
        // with the base subject's nine attributes.
        let prefix = if code.contains(TERM_WORK_TAG) {
            format!("{}{}", code.replace(TERM_WORK_TAG, ""), TERM_WORK_TAG)
        } else {
            code.to_string()
        };

        let values = parse_line(&parts);
        if values.grd == NOT_AVAILABLE && values.cce == NOT_AVAILABLE {
            warn!(prn = %block.prn, line, "subject line yielded no values");
        }

        for (key, value) in values.into_pairs(&prefix) {
            pairs.push((registry.claim(&key), value));
        }
    }

    pairs
}

/// Positional decomposition of one tokenized subject line, anchored on the
/// first grade token. Without a grade anchor, fall back to taking the first
/// three numeric/omitted tokens on the line as CCE/ESE/TW; degraded data is
/// kept in preference to dropping the row.
fn parse_line(parts: &[&str]) -> SubjectValues {
    let mut v = SubjectValues::default();

    let grade_index = parts
        .iter()
        .skip(1)
        .position(|t| tokens::classify(t) == TokenKind::Grade)
        .map(|i| i + 1);

    let Some(g) = grade_index else {
        let values: Vec<String> = parts
            .iter()
            .filter(|t| tokens::classify(t).is_value())
            .map(|t| tokens::stored_value(t))
            .collect();
        if values.len() >= 3 {
            v.cce = values[0].clone();
            v.ese = values[1].clone();
            v.tw = values[2].clone();
        }
        return v;
    };

    v.grd = parts[g].to_string();
    if let Some(t) = parts.get(g + 1).filter(|t| tokens::is_plain_digits(t)) {
        v.grd_pnt = t.to_string();
    }
    if let Some(t) = parts.get(g + 2).filter(|t| tokens::is_plain_digits(t)) {
        v.crd_pnt = t.to_string();
    }

    // Earned credit, credit, and total sit immediately left of the grade;
    // a leading marker on the total is stripped.
    v.ern_crd = parts[g - 1].to_string();
    if g >= 2 {
        v.crd = parts[g - 2].to_string();
    }
    if g >= 3 {
        let tot = parts[g - 3];
        v.tot = tot.strip_prefix('*').unwrap_or(tot).to_string();
    }

    // CCE/ESE/TW come from the numeric/omitted tokens strictly between the
    // code and the total; as many slots as values found get filled.
    let mut values = parts
        .iter()
        .take(g.saturating_sub(3))
        .skip(1)
        .filter(|t| tokens::classify(t).is_value())
        .map(|t| tokens::stored_value(t));
    if let Some(val) = values.next() {
        v.cce = val;
    }
    if let Some(val) = values.next() {
        v.ese = val;
    }
    if let Some(val) = values.next() {
        v.tw = val;
    }

    v
}

// ── Tests ──
