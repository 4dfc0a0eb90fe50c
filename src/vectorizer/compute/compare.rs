use num::{Float, ToPrimitive};

pub trait Compare<N>
where
    N: Float,
{
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &[N], other: &[N]) -> f64;
    /// Euclidean norm
    /// ||a|| = sqrt(Σ(a_i^2))
    fn norm(vec: &[N]) -> f64;
    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0 when either side has zero norm
    fn cosine_similarity(vec: &[N], other: &[N]) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCompare;

#[inline(always)]
fn widen<N: Float>(v: N) -> f64 {
    v.to_f64().unwrap_or(0.0)
}

impl<N> Compare<N> for DefaultCompare
where
    N: Float,
{
    #[inline]
    fn dot(vec: &[N], other: &[N]) -> f64 {
        debug_assert_eq!(vec.len(), other.len(), "vectors must share the vocabulary");
        vec.iter()
            .zip(other)
            .map(|(&a, &b)| widen(a) * widen(b))
            .sum()
    }

    #[inline]
    fn norm(vec: &[N]) -> f64 {
        vec.iter().map(|&a| widen(a).powi(2)).sum::<f64>().sqrt()
    }

    fn cosine_similarity(vec: &[N], other: &[N]) -> f64 {
        let denom = Self::norm(vec) * Self::norm(other);
        if denom == 0.0 {
            return 0.0;
        }
        let score = Self::dot(vec, other) / denom;
        if score.is_finite() { score } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn cos(a: &[f64], b: &[f64]) -> f64 {
        <DefaultCompare as Compare<f64>>::cosine_similarity(a, b)
    }

    #[test]
    fn parallel_vectors_have_unit_similarity() {
        let a = [1.0_f64, 2.0, 0.0];
        let b = [2.0_f64, 4.0, 0.0];
        assert!((cos(&a, &b) - 1.0).abs() < EPS);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = [1.0_f64, 0.0];
        let b = [0.0_f64, 3.0];
        assert_eq!(cos(&a, &b), 0.0);
    }

    #[test]
    fn zero_norm_falls_back_to_zero() {
        let zero = [0.0_f64, 0.0];
        let a = [1.0_f64, 1.0];
        assert_eq!(cos(&zero, &a), 0.0);
        assert_eq!(cos(&a, &zero), 0.0);
        assert_eq!(cos(&zero, &zero), 0.0);
    }

    #[test]
    fn dot_and_norm() {
        let a = [3.0_f32, 4.0];
        let b = [1.0_f32, 1.0];
        assert!((<DefaultCompare as Compare<f32>>::dot(&a, &b) - 7.0).abs() < 1e-6);
        assert!((<DefaultCompare as Compare<f32>>::norm(&a) - 5.0).abs() < 1e-6);
    }
}
