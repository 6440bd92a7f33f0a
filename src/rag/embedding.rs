//! Text embeddings.

use crate::error::{Error, Result};
use md5::{Digest, Md5};

/// Default dimension of [`HashingEmbedder`] vectors.
pub const DEFAULT_DIMENSION: usize = 384;

/// Maps text to a fixed-dimension vector.
///
/// Implementations must be deterministic: the same text always yields the
/// same vector.
pub trait Embedder {
    /// Length of every vector this embedder returns.
    fn dimension(&self) -> usize;

    /// Embed `text`.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

impl<T: Embedder + ?Sized> Embedder for &T {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

impl<T: Embedder + ?Sized> Embedder for Box<T> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

/// Local feature-hashing embedder.
///
/// Each lowercased alphanumeric token is hashed with MD5. The first four
/// digest bytes pick a bucket and the low bit of the fifth picks the sign.
/// The summed vector is L2-normalized, so texts without tokens embed to the
/// zero vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

impl HashingEmbedder {
    /// Create an embedder with the default dimension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an embedder producing `dimension`-length vectors.
    pub fn with_dimension(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidInput("embedding dimension must be positive".to_string()));
        }
        Ok(Self { dimension })
    }

    fn bucket(&self, token: &str) -> (usize, f32) {
        let digest = Md5::digest(token.as_bytes());
        let index = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]) as usize;
        let sign = if digest[4] & 1 == 0 { 1.0 } else { -1.0 };
        (index % self.dimension, sign)
    }
}

/// Lowercased runs of alphanumeric characters.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in tokenize(text) {
            let (index, sign) = self.bucket(&token);
            vector[index] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<String> = tokenize("Budget: APPROVED, Q3-2025!").collect();
        assert_eq!(tokens, vec!["budget", "approved", "q3", "2025"]);
    }

    #[test]
    fn test_deterministic_and_normalized() {
        let embedder = HashingEmbedder::new();
        let a = embedder.embed("The board approved the budget").unwrap();
        let b = embedder.embed("The board approved the budget").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 384);
        assert!((dot(&a, &a) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_case_insensitive() {
        let embedder = HashingEmbedder::new();
        assert_eq!(
            embedder.embed("Budget Approved").unwrap(),
            embedder.embed("budget approved").unwrap()
        );
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let v = HashingEmbedder::new().embed("  ... ").unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_related_text_scores_higher() {
        let embedder = HashingEmbedder::new();
        let query = embedder.embed("marketing budget decisions").unwrap();
        let related = embedder.embed("the marketing budget was approved").unwrap();
        let unrelated = embedder.embed("lunch menu for friday").unwrap();
        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(HashingEmbedder::with_dimension(0).is_err());
        assert_eq!(HashingEmbedder::with_dimension(8).unwrap().dimension(), 8);
    }
}
