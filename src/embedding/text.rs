//! Text word2vec format.
//!
//! ```text
//! 2 3
//! king 0.1 0.2 0.3
//! queen 0.4 0.5 0.6
//! ```
//!
//! The header declares `word_count dim`. Every following line holds a word and
//! exactly `dim` values. Line numbers in errors are 1-based, the header is line 1.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;

use ndarray::Array2;

use super::{parse_header, Embedding, MAX_PREALLOC};
use crate::error::ParseError;

/// Parse a text-format embedding from `reader`.
///
/// Invalid UTF-8 is replaced rather than rejected; blank lines are skipped.
pub fn parse_text<R: BufRead>(mut reader: R, source_path: &Path) -> Result<Embedding, ParseError> {
    let mut buf = Vec::new();

    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Err(ParseError::MissingSizeHeader);
    }
    let (word_count, dim) = parse_header(&String::from_utf8_lossy(&buf))?;

    let mut words = Vec::with_capacity(word_count.min(MAX_PREALLOC));
    let mut index = HashMap::with_capacity(word_count.min(MAX_PREALLOC));
    let mut flat = Vec::with_capacity(word_count.saturating_mul(dim).min(MAX_PREALLOC));
    let mut line_number = 1;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            continue;
        };

        let values: Vec<&str> = tokens.collect();
        if values.len() != dim {
            return Err(ParseError::VectorSizeMismatch {
                expected: dim,
                actual: values.len(),
                line: line_number,
            });
        }

        for token in values {
            let value = token.parse::<f32>().map_err(|_| ParseError::InvalidFloat {
                token: token.to_string(),
                line: line_number,
            })?;
            flat.push(value);
        }

        if index.contains_key(word) {
            return Err(ParseError::DuplicateWord {
                word: word.to_string(),
                line: line_number,
            });
        }
        index.insert(word.to_string(), words.len());
        words.push(word.to_string());
    }

    if words.len() != word_count {
        return Err(ParseError::WordCountMismatch {
            expected: word_count,
            actual: words.len(),
        });
    }

    let vectors = Array2::from_shape_vec((word_count, dim), flat)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(Embedding::from_parts(
        source_path.to_path_buf(),
        words,
        index,
        vectors,
    ))
}

/// Write `embedding` in the text format.
///
/// Values use the shortest representation that parses back to the same `f32`.
pub fn write_text<W: Write>(embedding: &Embedding, mut writer: W) -> std::io::Result<()> {
    let (word_count, dim) = embedding.shape();
    writeln!(writer, "{word_count} {dim}")?;

    for (word, row) in embedding.words().iter().zip(embedding.matrix().rows()) {
        write!(writer, "{word}")?;
        for value in row {
            write!(writer, " {value}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Embedding, ParseError> {
        parse_text(input.as_bytes(), Path::new("inline.txt"))
    }

    #[test]
    fn parses_crlf_lines() {
        let embedding = parse("1 2\r\nword 1.5 -2\r\n").unwrap();
        assert_eq!(embedding.words(), ["word"]);
        assert_eq!(embedding.vector("word").unwrap().to_vec(), vec![1.5, -2.0]);
    }

    #[test]
    fn skips_blank_lines_but_counts_them() {
        let embedding = parse("2 1\na 1\n\nb 2\n\n").unwrap();
        assert_eq!(embedding.shape(), (2, 1));

        let err = parse("2 1\na 1\n\nb 2 3\n").unwrap_err();
        assert!(matches!(err, ParseError::VectorSizeMismatch { line: 4, .. }));
    }

    #[test]
    fn invalid_float_is_not_swallowed() {
        let err = parse("1 2\nword 1.0 x\n").unwrap_err();
        match err {
            ParseError::InvalidFloat { token, line } => {
                assert_eq!(token, "x");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_in_word_is_replaced() {
        let mut input = b"1 1\nw".to_vec();
        input.push(0xff);
        input.extend_from_slice(b"rd 0.5\n");
        let embedding = parse_text(input.as_slice(), Path::new("lossy.txt")).unwrap();
        assert_eq!(embedding.words(), ["w\u{fffd}rd"]);
    }

    #[test]
    fn more_lines_than_declared_is_count_mismatch() {
        let err = parse("1 1\na 1\nb 2\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::WordCountMismatch { expected: 1, actual: 2 }
        ));
    }

    #[test]
    fn duplicate_word_names_line() {
        let err = parse("2 1\na 1\na 2\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateWord { line: 3, .. }));
    }

    #[test]
    fn empty_input_is_missing_header() {
        assert!(matches!(parse(""), Err(ParseError::MissingSizeHeader)));
    }

    #[test]
    fn writer_output_is_stable() {
        let embedding = parse("2 2\nb 0.25 1\na -3 4.5\n").unwrap();
        let mut out = Vec::new();
        write_text(&embedding, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2 2\nb 0.25 1\na -3 4.5\n");
    }
}
