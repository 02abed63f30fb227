//! TEXT value escaping (RFC 5545 §3.3.11).
//!
//! The icalendar parser already unescapes TEXT values, so only the writing
//! direction lives here.

pub fn escape(value: &str) -> String {
    escape_text(value, true)
}

/// Like [`escape`] but leaves commas bare, for multi-valued properties
/// such as CATEGORIES.
pub fn escape_list(value: &str) -> String {
    escape_text(value, false)
}

fn escape_text(value: &str, commas: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' if commas => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_sequences() {
        assert_eq!(escape("a, b; c\nd\\e"), r"a\, b\; c\nd\\e");
        assert_eq!(escape("line\r\nbreak"), r"line\nbreak");
    }

    #[test]
    fn test_escape_list_keeps_separators() {
        assert_eq!(escape_list("Lecture,Exam; room\n2"), r"Lecture,Exam\; room\n2");
    }
}
