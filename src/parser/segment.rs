use std::sync::LazyLock;

use regex::Regex;

// One header per student: PRN + seat number + name, with an optional guardian
// name, terminated by a semester label or end of line.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)PRN:(\S+)\s+SEAT NO\.:(\S+)\s+NAME:([^\n]+?)(?:\s+Mother(?:\s*Name)?\s*:?[\s\-]*([^\n]*))?(?:\s+Semester|First\s+Semester|\s*\n)",
    )
    .unwrap()
});

/// The text span attributed to one student, plus the fields captured by the
/// header match itself.
#[derive(Debug, Clone)]
pub struct StudentBlock {
    pub prn: String,
    pub seat_no: String,
    pub name: String,
    /// Empty when the header carries no guardian-name group; the "N/A"
    /// sentinel is reserved for subject attributes.
    pub mother_name: String,
    pub text: String,
}

/// Split one page into per-student blocks. Each header match starts a block;
/// the block runs to the next match or the end of the page. A page without
/// headers (cover page, grading legend) yields no blocks.
pub fn segment(page_text: &str) -> Vec<StudentBlock> {
    let mut headers = Vec::new();
    for caps in HEADER_RE.captures_iter(page_text) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        let prn = caps[1].to_string();
        let seat_no = caps[2].to_string();
        let name = caps[3].trim().to_string();
        let mother_name = caps
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        headers.push((start, prn, seat_no, name, mother_name));
    }

    let mut blocks = Vec::with_capacity(headers.len());
    for i in 0..headers.len() {
        let end = headers
            .get(i + 1)
            .map(|h| h.0)
            .unwrap_or(page_text.len());
        let (start, prn, seat_no, name, mother_name) = headers[i].clone();
        blocks.push(StudentBlock {
            prn,
            seat_no,
            name,
            mother_name,
            text: page_text[start..end].to_string(),
        });
    }

    blocks
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_with_mother_name() {
        let page = "PRN:72260628M SEAT NO.:F190650011 NAME:ABHANG ROHAN RAMESH MOTHER NAME:SUNITA\nSemester : 1\n";
        let blocks = segment(page);
        assert_eq!(blocks.len(), 1);
        let b = &blocks[0];
        assert_eq!(b.prn, "72260628M");
        assert_eq!(b.seat_no, "F190650011");
        assert_eq!(b.name, "ABHANG ROHAN RAMESH");
        assert_eq!(b.mother_name, "SUNITA");
    }

    #[test]
    fn missing_mother_name_is_empty_string() {
        let page = "PRN:72260629N SEAT NO.:F190650012 NAME:BHOSALE SNEHA VIJAY\nSemester : 1\n";
        let blocks = segment(page);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "BHOSALE SNEHA VIJAY");
        assert_eq!(blocks[0].mother_name, "");
    }

    #[test]
    fn blocks_span_until_next_header() {
        let page = "PRN:1A SEAT NO.:S1 NAME:FIRST STUDENT\nMTH-101 45 38 7 90 4 4 A 8 32\nPRN:2B SEAT NO.:S2 NAME:SECOND STUDENT\nPHY-102 40 32 8 80 3 3 B 6 18\n";
        let blocks = segment(page);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].text.contains("MTH-101"));
        assert!(!blocks[0].text.contains("PHY-102"));
        assert!(blocks[1].text.contains("PHY-102"));
    }

    #[test]
    fn page_without_headers_yields_nothing() {
        let page = "RESULT SHEET FOR FIRST YEAR ENGINEERING\nCOLLEGE : [0650] SAMPLE COLLEGE\n";
        assert!(segment(page).is_empty());
    }

    #[test]
    fn header_is_case_insensitive() {
        let page = "prn:72260630P seat no.:F190650013 name:DESHMUKH AKASH\nSemester : 1\n";
        let blocks = segment(page);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].prn, "72260630P");
    }

    #[test]
    fn cover_page_fixture_is_empty() {
        let page = std::fs::read_to_string("tests/fixtures/page_cover.txt").unwrap();
        assert!(segment(&page).is_empty());
    }

    #[test]
    fn basic_fixture_has_two_students() {
        let page = std::fs::read_to_string("tests/fixtures/page_basic.txt").unwrap();
        let blocks = segment(&page);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].prn, "72260628M");
        assert_eq!(blocks[1].prn, "72260629N");
    }
}
