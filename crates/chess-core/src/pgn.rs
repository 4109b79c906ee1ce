//! PGN header utilities: lightweight regex-based extraction.
//!
//! The review core never reads move text; it only needs headers to label
//! games handed over by the game supplier.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).expect("static regex"))
}

/// Extract every `[Key "Value"]` pair from the header block of a single PGN.
/// Only the text before the first blank line is scanned. Empty values are
/// skipped.
pub fn extract_headers(pgn: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    let normalized = pgn.replace("\r\n", "\n");
    let header_block = normalized.split("\n\n").next().unwrap_or_default();

    for cap in header_regex().captures_iter(header_block) {
        let value = &cap[2];
        if !value.is_empty() {
            headers.insert(cap[1].to_string(), value.to_string());
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    const PGN: &str = r#"[Event "Live Chess"]
[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[Date "2025.01.15"]
[Termination ""]

1. e4 e5 2. Nf3 {[%clk 0:09:58]} Nc6 1-0"#;

    #[test]
    fn test_extract_headers_basic() {
        let headers = extract_headers(PGN);
        assert_eq!(headers.get("White").map(String::as_str), Some("Player1"));
        assert_eq!(headers.get("Black").map(String::as_str), Some("Player2"));
        assert_eq!(headers.get("Result").map(String::as_str), Some("1-0"));
        assert!(!headers.contains_key("Termination"));
        // Clock comments in the move text are not headers
        assert!(!headers.contains_key("%clk"));
    }

    #[test]
    fn test_extract_headers_crlf_and_missing() {
        let pgn = "[White \"a\"]\r\n[Black \"b\"]\r\n\r\n1. d4 *";
        let headers = extract_headers(pgn);
        assert_eq!(headers.len(), 2);
        assert!(extract_headers("1. e4 e5").is_empty());
    }

    #[test]
    fn test_extract_headers_across_many_games() {
        let names = ["a", "b", "c", "d"];
        for (i, name) in names.iter().enumerate() {
            let pgn = format!("[White \"{name}\"]\n[Round \"{i}\"]\n\n1. e4 *");
            let headers = extract_headers(&pgn);
            assert_eq!(headers.get("White").map(String::as_str), Some(*name));
            assert_eq!(headers.get("Round"), Some(&i.to_string()));
        }
    }
}
