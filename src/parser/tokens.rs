/// Recognized grade tokens, searched left to right. Grades never recur on a
/// subject line, so the first hit anchors the positional decomposition.
pub const GRADES: &[&str] = &["A+", "A", "B+", "B", "C+", "C", "D", "E", "F", "O", "FFF"];

/// Literal marking a deliberately blank numeric field in the source text.
pub const OMITTED: &str = "---";

/// Classification of one whitespace token on a subject line. `starred` records
/// a leading `*` (failed/absent attempt marker in the source layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Grade,
    Numeric { starred: bool },
    Omitted { starred: bool },
    Other,
}

impl TokenKind {
    /// Numeric or omitted-marker tokens are the ones eligible for the
    /// CCE/ESE/TW value slots.
    pub fn is_value(self) -> bool {
        matches!(self, TokenKind::Numeric { .. } | TokenKind::Omitted { .. })
    }
}

pub fn classify(token: &str) -> TokenKind {
    if GRADES.contains(&token) {
        return TokenKind::Grade;
    }
    let starred = token.starts_with('*');
    let stripped: String = token.chars().filter(|c| *c != '*').collect();
    if stripped == OMITTED {
        TokenKind::Omitted { starred }
    } else if !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit()) {
        TokenKind::Numeric { starred }
    } else {
        TokenKind::Other
    }
}

/// True for plain digit runs with no decoration; grade-point and credit-point
/// positions accept only these.
pub fn is_plain_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Canonical stored form of a value token: interior `*` removed, a leading `*`
/// kept so the marker survives into the output cell.
pub fn stored_value(token: &str) -> String {
    let stripped: String = token.chars().filter(|c| *c != '*').collect();
    if token.starts_with('*') {
        format!("*{stripped}")
    } else {
        stripped
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_classify_exactly() {
        for g in GRADES {
            assert_eq!(classify(g), TokenKind::Grade);
        }
        assert_eq!(classify("AA"), TokenKind::Other);
        assert_eq!(classify("a"), TokenKind::Other);
    }

    #[test]
    fn numeric_and_omitted() {
        assert_eq!(classify("45"), TokenKind::Numeric { starred: false });
        assert_eq!(classify("*12"), TokenKind::Numeric { starred: true });
        assert_eq!(classify("---"), TokenKind::Omitted { starred: false });
        assert_eq!(classify("*---"), TokenKind::Omitted { starred: true });
        assert_eq!(classify("90/150"), TokenKind::Other);
        assert_eq!(classify("MTH-101"), TokenKind::Other);
    }

    #[test]
    fn plain_digits_rejects_decorations() {
        assert!(is_plain_digits("8"));
        assert!(!is_plain_digits("*8"));
        assert!(!is_plain_digits("8.5"));
        assert!(!is_plain_digits(""));
    }

    #[test]
    fn stored_value_keeps_leading_star_only() {
        assert_eq!(stored_value("*12"), "*12");
        assert_eq!(stored_value("1*2"), "12");
        assert_eq!(stored_value("45"), "45");
        assert_eq!(stored_value("---"), "---");
    }
}
