//! Quote-aware splitter for published-sheet CSV exports.
//!
//! Published exports are close to RFC 4180 but not reliably so, and a bad
//! export must never take the refresh loop down. This parser therefore never
//! fails: commas split fields, newlines split rows, double quotes toggle a
//! literal region, `""` inside a quoted region is one literal quote, and
//! anything structurally odd (unbalanced quotes included) falls out as
//! garbage cells for downstream validation to reject.

/// Split `text` into rows of string fields in one linear pass.
///
/// A final cell or row without a trailing separator is still emitted. A `\r`
/// immediately before an unquoted row break is stripped, so CRLF exports
/// yield the same cells as LF ones.
pub fn parse_delimited(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(std::mem::take(&mut cell)),
            '\n' if !in_quotes => {
                if cell.ends_with('\r') {
                    cell.pop();
                }
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }

    // Unterminated trailing cell/row.
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quoted_comma_is_literal() {
        assert_eq!(parse_delimited("a,\"b,c\",d\n"), vec![row(&["a", "b,c", "d"])]);
    }

    #[test]
    fn doubled_quote_is_one_literal_quote() {
        assert_eq!(parse_delimited("\"a\"\"b\"\n"), vec![row(&["a\"b"])]);
    }

    #[test]
    fn quoted_newline_stays_in_cell() {
        assert_eq!(
            parse_delimited("x,\"line1\nline2\",y\n"),
            vec![row(&["x", "line1\nline2", "y"])]
        );
    }

    #[test]
    fn final_row_without_newline_is_emitted() {
        assert_eq!(
            parse_delimited("a,b\nc,d"),
            vec![row(&["a", "b"]), row(&["c", "d"])]
        );
    }

    #[test]
    fn trailing_comma_yields_empty_final_cell() {
        assert_eq!(parse_delimited("a,b,"), vec![row(&["a", "b", ""])]);
    }

    #[test]
    fn crlf_rows_match_lf_rows() {
        assert_eq!(parse_delimited("a,b\r\nc,d\r\n"), parse_delimited("a,b\nc,d\n"));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_delimited("").is_empty());
    }

    #[test]
    fn blank_line_yields_one_empty_cell() {
        assert_eq!(parse_delimited("a\n\nb\n"), vec![row(&["a"]), row(&[""]), row(&["b"])]);
    }

    #[test]
    fn unbalanced_quote_degrades_without_error() {
        // The dangling quote swallows the rest of the input into one cell;
        // garbage, but no panic and no lost text.
        let rows = parse_delimited("a,\"unclosed\nb,c\n");
        assert_eq!(rows, vec![row(&["a", "unclosed\nb,c\n"])]);
    }

    #[test]
    fn short_and_long_rows_are_preserved() {
        assert_eq!(
            parse_delimited("a\nb,c,d\n"),
            vec![row(&["a"]), row(&["b", "c", "d"])]
        );
    }
}
