//! In-memory word embeddings and the word2vec file formats.
//!
//! [`Embedding`] is the immutable store every task evaluates against. It is
//! produced by [`load_embedding`] from either the [`text`] or [`binary`]
//! word2vec format; the format is always chosen by the caller.

pub mod binary;
pub mod similarity;
pub mod text;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LookupError, ParseError};

/// On-disk encoding of a word-vector file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// One word per line followed by its whitespace-separated values.
    Text,
    /// Word tokens followed by raw little-endian `f32` values.
    Binary,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }

    /// Format implied by a `.bin` or `.txt` extension, `None` for anything else.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("bin") {
            Some(Self::Binary)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(Self::Text)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "binary" => Ok(Self::Binary),
            _ => Err(format!("unknown embedding format: {s}. Supported: text, binary")),
        }
    }
}

/// A loaded, immutable word embedding.
///
/// Words keep the order of the source file. Each word owns one row of the
/// `(word_count, dim)` matrix. Equality ignores the source path.
#[derive(Debug)]
pub struct Embedding {
    source_path: PathBuf,
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
    unit_vectors: OnceLock<Array2<f32>>,
}

impl Embedding {
    /// Build an embedding from already validated parts.
    ///
    /// `words` must be distinct and `vectors` must have one row per word.
    pub(crate) fn from_parts(
        source_path: PathBuf,
        words: Vec<String>,
        index: HashMap<String, usize>,
        vectors: Array2<f32>,
    ) -> Self {
        debug_assert_eq!(words.len(), vectors.nrows());
        debug_assert_eq!(words.len(), index.len());
        Self {
            source_path,
            words,
            index,
            vectors,
            unit_vectors: OnceLock::new(),
        }
    }

    /// Build an embedding from `(word, vector)` pairs, enforcing the store invariants.
    ///
    /// `dim` is taken from the first vector; a later vector of another length is a
    /// [`ParseError::VectorSizeMismatch`] whose `line` is the 1-based pair index.
    /// Words must be non-empty and free of whitespace so both file formats can
    /// store them.
    pub fn from_pairs<I>(source_path: impl Into<PathBuf>, pairs: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut words = Vec::new();
        let mut index = HashMap::new();
        let mut flat = Vec::new();
        let mut dim = None;

        for (i, (word, vector)) in pairs.into_iter().enumerate() {
            let expected = *dim.get_or_insert(vector.len());
            if expected == 0 {
                return Err(ParseError::ZeroDimension);
            }
            if vector.len() != expected {
                return Err(ParseError::VectorSizeMismatch {
                    expected,
                    actual: vector.len(),
                    line: i + 1,
                });
            }
            if word.is_empty() {
                return Err(ParseError::EmptyWord { record: i });
            }
            if word.chars().any(char::is_whitespace) {
                return Err(ParseError::WhitespaceInWord { word, record: i });
            }
            if index.contains_key(&word) {
                return Err(ParseError::DuplicateWord { word, line: i + 1 });
            }
            index.insert(word.clone(), words.len());
            words.push(word);
            flat.extend(vector);
        }

        let dim = dim.unwrap_or(1);
        let vectors = Array2::from_shape_vec((words.len(), dim), flat)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        Ok(Self::from_parts(source_path.into(), words, index, vectors))
    }

    /// Path of the file this embedding was loaded from.
    pub fn path(&self) -> &Path {
        &self.source_path
    }

    /// All words, in file order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Vector of `word`.
    pub fn vector(&self, word: &str) -> Result<ArrayView1<'_, f32>, LookupError> {
        self.index
            .get(word)
            .map(|&row| self.vectors.row(row))
            .ok_or_else(|| LookupError::UnknownWord(word.to_string()))
    }

    /// `(word_count, dim)`.
    pub fn shape(&self) -> (usize, usize) {
        self.vectors.dim()
    }

    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// The full `(word_count, dim)` matrix, rows in word order.
    pub fn matrix(&self) -> ArrayView2<'_, f32> {
        self.vectors.view()
    }

    pub(crate) fn row_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }
}

impl PartialEq for Embedding {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words && self.vectors == other.vectors
    }
}

/// Load the embedding at `path` in the given format.
///
/// Either a complete embedding is returned or a [`LoadError`] naming the file.
pub fn load_embedding(path: impl AsRef<Path>, format: Format) -> Result<Embedding, LoadError> {
    let path = path.as_ref();
    let wrap = |source: ParseError| LoadError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| wrap(e.into()))?;
    let reader = BufReader::new(file);

    let embedding = match format {
        Format::Text => text::parse_text(reader, path),
        Format::Binary => binary::parse_binary(reader, path),
    }
    .map_err(wrap)?;

    let (word_count, dim) = embedding.shape();
    tracing::info!(
        path = %path.display(),
        format = %format,
        word_count,
        dim,
        "embedding loaded"
    );

    Ok(embedding)
}

/// Split and validate a header line into `(word_count, dim)`.
pub(crate) fn parse_header(line: &str) -> Result<(usize, usize), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.len() {
        0 | 1 => return Err(ParseError::MissingSizeHeader),
        2 => {}
        found => return Err(ParseError::TooManyHeaderValues { found }),
    }

    let parse = |token: &str| {
        token.parse::<usize>().map_err(|_| ParseError::NonIntegerHeader {
            line: line.trim_end_matches(['\r', '\n']).to_string(),
        })
    };
    let word_count = parse(tokens[0])?;
    let dim = parse(tokens[1])?;

    if dim == 0 {
        return Err(ParseError::ZeroDimension);
    }
    Ok((word_count, dim))
}

/// Upper bound for buffers preallocated from untrusted header values.
pub(crate) const MAX_PREALLOC: usize = 1 << 16;
