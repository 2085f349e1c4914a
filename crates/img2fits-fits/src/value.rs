use std::str;

/// A FITS header value as written by the image writer.
///
/// Only the fixed-format logical and integer forms are needed for a default
/// primary header.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `T` or `F`.
    Logical(bool),
    Integer(i64),
}

/// Width of the fixed-format value slot, columns 11 to 30.
const FIXED_WIDTH: usize = 20;

/// Parse the 70 bytes after `= `.
///
/// Returns `None` for empty fields and for value kinds never written here
/// (strings, floats, complex numbers).
pub fn parse_value(value_bytes: &[u8]) -> Option<(Value, Option<&str>)> {
    let field = str::from_utf8(value_bytes).ok()?;
    let (text, comment) = match field.find(" /") {
        Some(at) => {
            let after = &field[at + 2..];
            let rest = after.strip_prefix(' ').unwrap_or(after).trim_end();
            (&field[..at], (!rest.is_empty()).then_some(rest))
        }
        None => (field, None),
    };

    let value = match text.trim() {
        "T" => Value::Logical(true),
        "F" => Value::Logical(false),
        other => Value::Integer(other.parse().ok()?),
    };
    Some((value, comment))
}

/// Render `value` right-justified in columns 11-30 of a blank 70-byte field.
pub fn format_value(value: &Value) -> [u8; 70] {
    let text = match value {
        Value::Logical(true) => String::from("T"),
        Value::Logical(false) => String::from("F"),
        Value::Integer(n) => n.to_string(),
    };
    let mut field = [b' '; 70];
    let start = FIXED_WIDTH.saturating_sub(text.len());
    field[start..FIXED_WIDTH].copy_from_slice(&text.as_bytes()[..FIXED_WIDTH - start]);
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> [u8; 70] {
        let mut buf = [b' '; 70];
        buf[..s.len()].copy_from_slice(s.as_bytes());
        buf
    }

    #[test]
    fn parse_logical() {
        let buf = field("                   T");
        let (v, c) = parse_value(&buf).unwrap();
        assert_eq!(v, Value::Logical(true));
        assert!(c.is_none());

        let buf = field("                   F");
        let (v, _) = parse_value(&buf).unwrap();
        assert_eq!(v, Value::Logical(false));
    }

    #[test]
    fn parse_integer_with_comment() {
        let buf = field("                 -32 / bits per data value");
        let (v, c) = parse_value(&buf).unwrap();
        assert_eq!(v, Value::Integer(-32));
        assert_eq!(c, Some("bits per data value"));
    }

    #[test]
    fn parse_comment_without_trailing_space() {
        let buf = field("                   2 /number of axes");
        let (v, c) = parse_value(&buf).unwrap();
        assert_eq!(v, Value::Integer(2));
        assert_eq!(c, Some("number of axes"));
    }

    #[test]
    fn comment_borrows_from_the_field() {
        let buf = field("                  16 / slot");
        let comment = parse_value(&buf).and_then(|(_, c)| c);
        assert_eq!(comment, Some("slot"));
    }

    #[test]
    fn parse_rejects_empty_and_unsupported() {
        assert!(parse_value(&field("")).is_none());
        assert!(parse_value(&field("'IMAGE   '")).is_none());
        assert!(parse_value(&field("                 1.5")).is_none());
    }

    #[test]
    fn format_logical_in_column_30() {
        let buf = format_value(&Value::Logical(true));
        assert_eq!(buf[19], b'T');
        assert!(buf[..19].iter().all(|&b| b == b' '));
    }

    #[test]
    fn format_integer_right_justified() {
        let buf = format_value(&Value::Integer(4096));
        assert_eq!(&buf[16..20], b"4096");
        assert!(buf[..16].iter().all(|&b| b == b' '));
        assert!(buf[20..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn format_then_parse() {
        for v in [Value::Logical(false), Value::Integer(i64::MIN), Value::Integer(8)] {
            let buf = format_value(&v);
            let (parsed, _) = parse_value(&buf).unwrap();
            assert_eq!(parsed, v);
        }
    }
}
