pub mod extract;
pub mod segment;
pub mod tokens;

use crate::table::StudentRecord;

/// Two-pass pipeline for one page: text → student blocks → flat records.
pub fn process_page(page_text: &str) -> Vec<StudentRecord> {
    segment::segment(page_text)
        .iter()
        .map(extract::extract_record)
        .collect()
}

/// Split a text file into pages on form feeds, the page separator emitted by
/// pdftotext-style extractors. A file without form feeds is a single page.
pub fn split_pages(text: &str) -> Vec<&str> {
    text.split('\x0c').collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_without_headers_yields_no_records() {
        assert!(process_page("GRADING LEGEND: O OUTSTANDING, A EXCELLENT\n").is_empty());
    }

    #[test]
    fn records_follow_block_order() {
        let page = std::fs::read_to_string("tests/fixtures/page_basic.txt").unwrap();
        let records = process_page(&page);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("PRN"), Some("72260628M"));
        assert_eq!(records[1].get("PRN"), Some("72260629N"));
    }

    #[test]
    fn edge_fixture_end_to_end() {
        let page = std::fs::read_to_string("tests/fixtures/page_edge.txt").unwrap();
        let table = crate::table::reconcile(process_page(&page));
        // Two blocks share a PRN; the first one wins.
        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.get("Name"), Some("DESHMUKH AKASH SANJAY"));
        assert_eq!(row.get("SGPA"), Some("N/A"));
        assert_eq!(row.get("Credits Earned/Total"), Some("0/20"));
        assert_eq!(row.get("MTH-101_CCE"), Some("*12"));
        assert_eq!(row.get("MTH-101_TOT"), Some("20"));
        assert_eq!(row.get("MTH-101_GRD"), Some("F"));
        assert_eq!(row.get("CSE-201_TW_CCE"), Some("---"));
        assert_eq!(row.get("CSE-201_TW_GRD"), Some("N/A"));
    }

    #[test]
    fn form_feed_splits_pages() {
        let pages = split_pages("page one\x0cpage two\x0c");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], "page one");
        assert_eq!(pages[1], "page two");
    }
}
