//! Vector-space queries over an [`Embedding`].
//!
//! All queries work on L2-normalized rows, computed once on first use and
//! then shared by every caller.

use anyhow::{bail, Result};
use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::Embedding;
use crate::error::LookupError;

/// Added to the denominator of the 3CosMul objective to avoid division by zero.
const COSMUL_EPSILON: f32 = 1e-6;

impl Embedding {
    /// The embedding matrix with every row scaled to unit length.
    ///
    /// Zero rows stay zero.
    pub fn unit_vectors(&self) -> &Array2<f32> {
        self.unit_vectors.get_or_init(|| {
            let mut unit = self.vectors.clone();
            for mut row in unit.rows_mut() {
                let norm = l2_norm(row.view());
                if norm > 0.0 {
                    row.mapv_inplace(|x| x / norm);
                }
            }
            unit
        })
    }

    /// Cosine similarity between two words.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32, LookupError> {
        let unit = self.unit_vectors();
        let row_a = self.lookup_row(a)?;
        let row_b = self.lookup_row(b)?;
        Ok(unit.row(row_a).dot(&unit.row(row_b)))
    }

    /// Find the word that doesn't match the others.
    ///
    /// Words outside the vocabulary are ignored. The result is the word whose
    /// vector is least similar to the normalized mean of all remaining vectors.
    pub fn doesnt_match<S: AsRef<str>>(&self, words: &[S]) -> Result<String> {
        let mut used = Vec::with_capacity(words.len());
        let mut rows = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_ref();
            match self.row_of(word) {
                Some(row) => {
                    used.push(word);
                    rows.push(row);
                }
                None => tracing::warn!(word, "ignoring word missing from vocabulary"),
            }
        }
        if rows.is_empty() {
            bail!("cannot select a word from an empty list: none of the words are in the vocabulary");
        }

        let selected = self.unit_vectors().select(Axis(0), &rows);
        let Some(mean) = selected.mean_axis(Axis(0)) else {
            bail!("cannot compute the mean of an empty selection");
        };
        let mean = l2_normalize(mean);
        let dists = selected.dot(&mean);

        let (odd, _) = used
            .iter()
            .zip(dists.iter())
            .min_by(|a, b| a.1.total_cmp(b.1))
            .expect("at least one word was selected");
        Ok(odd.to_string())
    }

    /// Rank vocabulary words by the multiplicative analogy objective (3CosMul).
    ///
    /// Each candidate `w` scores `Π cos⁺(w, p) / (Π cos⁺(w, n) + ε)` with
    /// `cos⁺(a, b) = (1 + cos(a, b)) / 2`. Query words are never returned.
    pub fn most_similar_cosmul<S: AsRef<str>>(
        &self,
        positive: &[S],
        negative: &[S],
        topn: usize,
    ) -> Result<Vec<(String, f32)>> {
        if positive.is_empty() {
            bail!("cannot compute similarity without at least one positive word");
        }

        let unit = self.unit_vectors();
        let shifted_cosine = |word: &str| -> Result<Array1<f32>, LookupError> {
            let row = self.lookup_row(word)?;
            Ok(unit.dot(&unit.row(row)).mapv(|c| (1.0 + c) / 2.0))
        };

        let mut numerator = Array1::<f32>::ones(self.len());
        for word in positive {
            numerator *= &shifted_cosine(word.as_ref())?;
        }
        let mut denominator = Array1::<f32>::ones(self.len());
        for word in negative {
            denominator *= &shifted_cosine(word.as_ref())?;
        }
        let scores = numerator / (denominator + COSMUL_EPSILON);

        let excluded: Vec<usize> = positive
            .iter()
            .chain(negative)
            .filter_map(|w| self.row_of(w.as_ref()))
            .collect();

        let mut ranked: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| !excluded.contains(i))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(topn);

        Ok(ranked
            .into_iter()
            .map(|(i, score)| (self.words[i].clone(), score))
            .collect())
    }

    fn lookup_row(&self, word: &str) -> Result<usize, LookupError> {
        self.row_of(word)
            .ok_or_else(|| LookupError::UnknownWord(word.to_string()))
    }
}

fn l2_norm(v: ArrayView1<'_, f32>) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// L2-normalize a vector. Returns the input unchanged if its norm is zero.
fn l2_normalize(v: Array1<f32>) -> Array1<f32> {
    let norm = l2_norm(v.view());
    if norm > 0.0 {
        v / norm
    } else {
        v
    }
}
