//! Embedding provider trait.
//!
//! The engine calls the provider once per `add` batch and once per vector
//! query. Providers must map each input text to one fixed-length `f32`
//! vector; the engine validates batch length and dimensions at the call
//! site.

use crate::error::Result;

/// A batch embedding function.
///
/// Object-safe so collections can hold `Box<dyn Embedder>`. Any
/// `Fn(&[&str]) -> Result<Vec<Vec<f32>>>` closure implements it, which
/// keeps test fixtures and adapter shims to one line.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per text.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

impl<F> Embedder for F
where
    F: Fn(&[&str]) -> Result<Vec<Vec<f32>>> + Send + Sync,
{
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_an_embedder() {
        let embedder: Box<dyn Embedder> =
            Box::new(|texts: &[&str]| Ok(texts.iter().map(|t| vec![t.len() as f32]).collect()));
        let vectors = embedder.embed(&["ab", "cdef"]).unwrap();
        assert_eq!(vectors, vec![vec![2.0], vec![4.0]]);
    }
}
