//! f32 vector kernels: dot product, cosine similarity, and L2 normalization.
//!
//! Plain scalar loops. Summation order is fixed so repeated calls on the same
//! inputs are bit-identical.

/// Dot product between two f32 slices of equal length.
#[inline]
pub fn dot_product_f32(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0f32;
    for i in 0..a.len() {
        sum += a[i] * b[i];
    }
    sum
}

/// Cosine similarity between two f32 slices. Returns value in [-1, 1], 0 for zero vectors.
#[inline]
pub fn cosine_f32(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }
    dot / denom
}

/// Scale `v` in place to unit L2 norm. Zero (or non-finite) vectors become all zeros.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = dot_product_f32(v, v).sqrt();
    if norm < 1e-12 || !norm.is_finite() {
        v.iter_mut().for_each(|x| *x = 0.0);
        return;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert!((dot_product_f32(&a, &b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        assert!(cosine_f32(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_f32(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_normalize_unit_norm() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert!((dot_product_f32(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_stays_zero() {
        let mut v = vec![0.0; 4];
        l2_normalize(&mut v);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_normalize_nan_becomes_zero() {
        let mut v = vec![f32::NAN, 1.0];
        l2_normalize(&mut v);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_normalized_dot_equals_cosine() {
        let a = vec![0.5, -0.3, 0.8, 0.1];
        let b = vec![0.7, 0.2, -0.5, 0.3];
        let (mut na, mut nb) = (a.clone(), b.clone());
        l2_normalize(&mut na);
        l2_normalize(&mut nb);
        assert!((dot_product_f32(&na, &nb) - cosine_f32(&a, &b)).abs() < 1e-5);
    }
}
