//! Binary word2vec format.
//!
//! An ASCII header line `word_count dim\n`, then `word_count` records of
//! `<word> <dim x f32 little-endian>`. Records are not separated, but a single
//! `\n` in front of a word is accepted since classic word2vec writers emit one
//! after every vector.

use std::collections::HashMap;
use std::io::{BufRead, ErrorKind, Read, Write};
use std::path::Path;

use ndarray::Array2;

use super::{parse_header, Embedding, MAX_PREALLOC};
use crate::error::ParseError;

/// Size in bytes of one encoded vector value.
const VALUE_SIZE: usize = std::mem::size_of::<f32>();

/// Upper bound of the read buffer; longer vectors are read in several chunks.
const READ_CHUNK: usize = 64 * 1024;

/// Parse a binary-format embedding from `reader`.
///
/// Reads exactly the declared records; a short stream or bytes left over after
/// the last record are errors.
pub fn parse_binary<R: BufRead>(mut reader: R, source_path: &Path) -> Result<Embedding, ParseError> {
    let mut header = Vec::new();
    if reader.read_until(b'\n', &mut header)? == 0 {
        return Err(ParseError::MissingSizeHeader);
    }
    let (word_count, dim) = parse_header(&String::from_utf8_lossy(&header))?;

    let mut words = Vec::with_capacity(word_count.min(MAX_PREALLOC));
    let mut index = HashMap::with_capacity(word_count.min(MAX_PREALLOC));
    let mut flat = Vec::with_capacity(word_count.saturating_mul(dim).min(MAX_PREALLOC));
    let record_bytes = dim
        .checked_mul(VALUE_SIZE)
        .ok_or(ParseError::DimensionTooLarge { dim })?;
    let mut value_bytes = vec![0u8; record_bytes.min(READ_CHUNK)];
    let mut token = Vec::new();

    for record in 0..word_count {
        token.clear();
        let read = reader.read_until(b' ', &mut token)?;
        if read == 0 || token.last() != Some(&b' ') {
            return Err(ParseError::TruncatedBinary {
                record,
                detail: "stream ended inside a word token".into(),
            });
        }
        token.pop();
        if token.first() == Some(&b'\n') {
            token.remove(0);
        }
        if token.is_empty() {
            return Err(ParseError::EmptyWord { record });
        }
        let word = String::from_utf8_lossy(&token).into_owned();

        let mut remaining = record_bytes;
        while remaining > 0 {
            let chunk = &mut value_bytes[..remaining.min(READ_CHUNK)];
            reader.read_exact(chunk).map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => ParseError::TruncatedBinary {
                    record,
                    detail: format!("expected {record_bytes} vector bytes for '{word}'"),
                },
                _ => ParseError::Io(e),
            })?;
            flat.extend(
                chunk
                    .chunks_exact(VALUE_SIZE)
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]])),
            );
            remaining -= chunk.len();
        }

        if index.contains_key(&word) {
            return Err(ParseError::DuplicateRecord { word, record });
        }
        index.insert(word.clone(), words.len());
        words.push(word);
    }

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest)?;
    if !rest.iter().all(|&b| b == b'\n') {
        return Err(ParseError::TrailingBytes {
            count: rest.len(),
            records: word_count,
        });
    }

    let vectors = Array2::from_shape_vec((word_count, dim), flat)
        .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

    Ok(Embedding::from_parts(
        source_path.to_path_buf(),
        words,
        index,
        vectors,
    ))
}

/// Write `embedding` in the binary format, without record separators.
pub fn write_binary<W: Write>(embedding: &Embedding, mut writer: W) -> std::io::Result<()> {
    let (word_count, dim) = embedding.shape();
    writeln!(writer, "{word_count} {dim}")?;

    for (word, row) in embedding.words().iter().zip(embedding.matrix().rows()) {
        writer.write_all(word.as_bytes())?;
        writer.write_all(b" ")?;
        for value in row {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(word: &str, values: &[f32]) -> Vec<u8> {
        let mut out = word.as_bytes().to_vec();
        out.push(b' ');
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    #[test]
    fn parses_records_without_separator() {
        let mut input = b"2 2\n".to_vec();
        input.extend(record("a", &[1.0, 2.0]));
        input.extend(record("b", &[3.0, 4.0]));

        let embedding = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap();
        assert_eq!(embedding.words(), ["a", "b"]);
        assert_eq!(embedding.vector("b").unwrap().to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn accepts_newline_after_each_vector() {
        let mut input = b"2 1\n".to_vec();
        input.extend(record("a", &[1.0]));
        input.push(b'\n');
        input.extend(record("b", &[2.0]));
        input.push(b'\n');

        let embedding = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap();
        assert_eq!(embedding.words(), ["a", "b"]);
    }

    #[test]
    fn truncated_vector_is_error() {
        let mut input = b"1 2\n".to_vec();
        input.extend(record("a", &[1.0, 2.0]));
        input.truncate(input.len() - 3);

        let err = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap_err();
        assert!(matches!(err, ParseError::TruncatedBinary { record: 0, .. }));
    }

    #[test]
    fn missing_record_is_error() {
        let mut input = b"2 1\n".to_vec();
        input.extend(record("a", &[1.0]));

        let err = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap_err();
        assert!(matches!(err, ParseError::TruncatedBinary { record: 1, .. }));
    }

    #[test]
    fn trailing_bytes_are_error() {
        let mut input = b"1 1\n".to_vec();
        input.extend(record("a", &[1.0]));
        input.extend(record("b", &[2.0]));

        let err = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap_err();
        assert!(matches!(err, ParseError::TrailingBytes { records: 1, .. }));
    }

    #[test]
    fn empty_word_is_error() {
        let mut input = b"1 1\n".to_vec();
        input.extend(record("", &[1.0]));

        let err = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap_err();
        assert!(matches!(err, ParseError::EmptyWord { record: 0 }));
    }

    #[test]
    fn long_vectors_are_read_in_chunks() {
        let values: Vec<f32> = (0..READ_CHUNK / VALUE_SIZE + 3).map(|i| i as f32).collect();
        let mut input = format!("2 {}\n", values.len()).into_bytes();
        input.extend(record("a", &values));
        input.extend(record("b", &values));

        let embedding = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap();
        assert_eq!(embedding.vector("b").unwrap().to_vec(), values);
    }

    #[test]
    fn duplicate_word_names_record() {
        let mut input = b"2 1\n".to_vec();
        input.extend(record("a", &[1.0]));
        input.extend(record("a", &[2.0]));

        let err = parse_binary(input.as_slice(), Path::new("v.bin")).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateRecord { record: 1, .. }));
        assert!(err.to_string().contains("record 1"));
    }
}
