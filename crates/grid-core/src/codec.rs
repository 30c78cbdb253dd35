//! Row codec for the blank-line-delimited store format
//!
//! Each row is one line of comma-separated fields followed by an empty line,
//! so consecutive rows are separated by `\n\n`. A field is wrapped in double
//! quotes only when it contains a comma. Quote characters inside a field are
//! not escaped and cannot be round-tripped.
//!
//! The row delimiter is two bare line feeds. Text that uses `\r\n` line
//! endings will not split into rows; run it through
//! [`normalize_line_endings`] before decoding.

use crate::grid::Row;
use std::borrow::Cow;

/// Separator written after every row, including the last
pub const ROW_DELIMITER: &str = "\n\n";

/// Field separator
pub const FIELD_DELIMITER: char = ',';

const QUOTE: char = '"';

/// Encode one row, including its trailing row delimiter.
///
/// `None` and an empty slice both produce a bare delimiter (a blank row).
pub fn encode_row<S: AsRef<str>>(fields: Option<&[S]>) -> String {
    let mut line = String::new();

    if let Some(fields) = fields {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(FIELD_DELIMITER);
            }
            let field = field.as_ref();
            if field.contains(FIELD_DELIMITER) {
                line.push(QUOTE);
                line.push_str(field);
                line.push(QUOTE);
            } else {
                line.push_str(field);
            }
        }
    }

    line.push_str(ROW_DELIMITER);
    line
}

/// Encode a batch of rows in order
pub fn encode_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> String {
    rows.iter()
        .map(|row| encode_row(Some(row.as_slice())))
        .collect()
}

/// Decode file text into rows.
///
/// The text is trimmed as a whole before splitting, so blank rows at the very
/// start or end of the file are not reproduced. Whitespace-only text decodes
/// to no rows at all.
pub fn decode_text(text: &str) -> Vec<Row> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    text.split(ROW_DELIMITER).map(decode_block).collect()
}

/// Scanner position relative to a quoted run
#[derive(Clone, Copy)]
enum State {
    Outside,
    /// Inside quotes; holds the byte offset just past the opening quote
    Inside(usize),
}

/// Decode one row block into fields. An empty block is an empty row.
///
/// Tokens are either a quoted run or a maximal run of characters that are
/// neither comma nor quote. Bare tokens are whitespace-trimmed; quoted tokens
/// keep their content verbatim. Empty bare runs (as in `a,,b`) yield no field.
pub fn decode_block(block: &str) -> Row {
    let mut fields = Row::new();
    let mut bare = String::new();
    let mut state = State::Outside;

    for (pos, c) in block.char_indices() {
        match state {
            State::Outside => match c {
                FIELD_DELIMITER => push_token(&mut fields, &mut bare),
                QUOTE => {
                    push_token(&mut fields, &mut bare);
                    state = State::Inside(pos + QUOTE.len_utf8());
                }
                _ => bare.push(c),
            },
            State::Inside(start) => {
                if c == QUOTE {
                    fields.push(block[start..pos].to_string());
                    state = State::Outside;
                }
            }
        }
    }

    match state {
        State::Outside => push_token(&mut fields, &mut bare),
        State::Inside(start) => {
            // Unterminated quote: it is dropped and the remainder, which holds
            // no further quotes, reads as bare fields
            for token in block[start..].split(FIELD_DELIMITER) {
                bare.push_str(token);
                push_token(&mut fields, &mut bare);
            }
        }
    }

    fields
}

fn push_token(fields: &mut Row, bare: &mut String) {
    if !bare.is_empty() {
        fields.push(bare.trim().to_string());
        bare.clear();
    }
}

/// Replace `\r\n` line endings with `\n`
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::row;

    #[test]
    fn test_encode_plain_row() {
        assert_eq!(encode_row(Some(&["a", "b", "c"][..])), "a,b,c\n\n");
    }

    #[test]
    fn test_encode_quotes_fields_with_commas() {
        assert_eq!(encode_row(Some(&["x", "a,b"][..])), "x,\"a,b\"\n\n");
    }

    #[test]
    fn test_encode_passes_quotes_through() {
        assert_eq!(encode_row(Some(&["say \"hi\""][..])), "say \"hi\"\n\n");
    }

    #[test]
    fn test_encode_absent_and_empty_rows() {
        assert_eq!(encode_row::<&str>(None), "\n\n");
        assert_eq!(encode_row::<&str>(Some(&[])), "\n\n");
    }

    #[test]
    fn test_encode_rows_terminates_last_row() {
        let rows = vec![row(&["a"]), row(&["b"])];
        assert_eq!(encode_rows(&rows), "a\n\nb\n\n");
    }

    #[test]
    fn test_round_trip_plain_fields() {
        let rows = vec![row(&["Name", "Units", "Seats"]), row(&["COEN 12", "4", "None"])];
        assert_eq!(decode_text(&encode_rows(&rows)), rows);
    }

    #[test]
    fn test_round_trip_comma_field() {
        let encoded = encode_row(Some(&["a,b"][..]));
        assert_eq!(encoded, "\"a,b\"\n\n");
        assert_eq!(decode_text(&encoded), vec![row(&["a,b"])]);
    }

    #[test]
    fn test_decode_blank_block_is_empty_row() {
        let rows = decode_text("a\n\n\n\nb\n\n");
        assert_eq!(rows, vec![row(&["a"]), Row::new(), row(&["b"])]);
    }

    #[test]
    fn test_decode_empty_text() {
        assert!(decode_text("").is_empty());
        assert!(decode_text(" \n\n\n ").is_empty());
    }

    #[test]
    fn test_decode_single_empty_field_row_reads_back_empty() {
        // A row holding one empty string encodes exactly like an absent row
        let text = format!("a\n\n{}b\n\n", encode_row(Some(&[""][..])));
        assert_eq!(decode_text(&text), vec![row(&["a"]), Row::new(), row(&["b"])]);
    }

    #[test]
    fn test_decode_trims_outer_blank_rows() {
        let text = format!("{}a\n\n{}", encode_row::<&str>(None), encode_row::<&str>(None));
        assert_eq!(decode_text(&text), vec![row(&["a"])]);
    }

    #[test]
    fn test_decode_trims_bare_tokens_only() {
        assert_eq!(decode_block(" a , b "), row(&["a", "b"]));
        assert_eq!(decode_block("\" a,b \""), row(&[" a,b "]));
    }

    #[test]
    fn test_decode_whitespace_block_is_one_empty_field() {
        assert_eq!(decode_block(" "), row(&[""]));
    }

    #[test]
    fn test_decode_skips_empty_bare_runs() {
        assert_eq!(decode_block("a,,b"), row(&["a", "b"]));
        assert_eq!(decode_block(",a,"), row(&["a"]));
    }

    #[test]
    fn test_decode_quote_inside_bare_field() {
        assert_eq!(decode_block("a\"b\"c"), row(&["a", "b", "c"]));
    }

    #[test]
    fn test_decode_unterminated_quote() {
        assert_eq!(decode_block("x,\"a,b"), row(&["x", "a", "b"]));
    }

    #[test]
    fn test_decode_multibyte_quoted_field() {
        assert_eq!(decode_block("\"é,ü\",ñ"), row(&["é,ü", "ñ"]));
    }

    #[test]
    fn test_crlf_does_not_split_without_normalizing() {
        let text = "a,b\r\n\r\nc,d\r\n\r\n";
        assert_eq!(decode_text(text).len(), 1);
        assert_eq!(
            decode_text(&normalize_line_endings(text)),
            vec![row(&["a", "b"]), row(&["c", "d"])]
        );
    }
}
