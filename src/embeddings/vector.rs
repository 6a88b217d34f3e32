//! Vector encoding and similarity.
//!
//! The embedded backend stores embeddings as BLOBs of little-endian f32
//! (4 bytes per dimension) and ranks candidates in memory; both live
//! here. The server backend binds vectors through its driver and never
//! touches this encoding.

/// Encode a vector as little-endian f32 bytes.
#[must_use]
pub fn encode_blob(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Decode little-endian f32 bytes back into a vector.
///
/// A trailing partial float (corrupt blob) is dropped rather than
/// invented.
#[must_use]
pub fn decode_blob(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for mismatched lengths, empty
/// input, or a zero-magnitude operand.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        dot_product += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let magnitude = (norm_a * norm_b).sqrt();
    if magnitude == 0.0 {
        0.0
    } else {
        dot_product / magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_roundtrip() {
        let v = vec![0.25_f32, -1.5, 3.0];
        assert_eq!(decode_blob(&encode_blob(&v)), v);
        assert_eq!(encode_blob(&v).len(), 12);
    }

    #[test]
    fn test_decode_drops_partial_float() {
        let mut blob = encode_blob(&[1.0_f32]);
        blob.push(0xFF);
        assert_eq!(decode_blob(&blob), vec![1.0]);
    }

    #[test]
    fn test_cosine_identical_and_opposite() {
        let a = [1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
        let neg: Vec<f32> = a.iter().map(|x| -x).collect();
        assert!((cosine_similarity(&a, &neg) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
