use std::sync::LazyLock;

use regex::Regex;

use crate::parser::segment::StudentBlock;
use crate::table::NOT_AVAILABLE;

static SEMESTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Semester\s*:\s*(\d+)").unwrap());
static SGPA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SGPA\s*:\s*([0-9.\-]+)").unwrap());
static CREDITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Credits Earned/Total\s*:\s*(\d+/\d+)").unwrap());
static TOTAL_POINTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total Credit Points\s*:\s*(\d+)").unwrap());

/// Identity and summary fields for one student. Missing summary fields become
/// "" ("N/A" for SGPA); extraction never fails.
#[derive(Debug, Clone)]
pub struct IdentityFields {
    pub prn: String,
    pub seat_no: String,
    pub name: String,
    pub mother_name: String,
    pub semester: String,
    pub sgpa: String,
    pub credits_earned: String,
    pub total_credit_points: String,
}

pub fn extract(block: &StudentBlock) -> IdentityFields {
    IdentityFields {
        prn: block.prn.clone(),
        seat_no: block.seat_no.clone(),
        name: block.name.clone(),
        mother_name: block.mother_name.clone(),
        semester: first_capture(&SEMESTER_RE, &block.text).unwrap_or_default(),
        sgpa: extract_sgpa(&block.text),
        credits_earned: first_capture(&CREDITS_RE, &block.text).unwrap_or_default(),
        total_credit_points: first_capture(&TOTAL_POINTS_RE, &block.text).unwrap_or_default(),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| caps[1].to_string())
}

/// An SGPA printed as a dash run ("-----") means the result is withheld;
/// it maps to the absence sentinel rather than surviving as a pseudo-number.
fn extract_sgpa(text: &str) -> String {
    match first_capture(&SGPA_RE, text) {
        Some(v) if v.chars().all(|c| c == '-') => NOT_AVAILABLE.to_string(),
        Some(v) => v,
        None => NOT_AVAILABLE.to_string(),
    }
}

// ── Tests ──
