use serde::{Deserialize, Serialize};

/// A dense vector of floating point numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Squared Euclidean distance, the metric the IVF index ranks by.
    /// Kept squared: ordering is identical and the root is never needed.
    #[inline]
    pub fn squared_l2(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return f32::INFINITY;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.data.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_l2() {
        let v1 = Vector::new(vec![0.0, 0.0]);
        let v2 = Vector::new(vec![3.0, 4.0]);
        assert!((v1.squared_l2(&v2) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_squared_l2_identical_is_zero() {
        let v = Vector::new(vec![0.3, 0.1, 0.9]);
        assert_eq!(v.squared_l2(&v), 0.0);
    }

    #[test]
    fn test_squared_l2_dim_mismatch() {
        let v1 = Vector::new(vec![1.0]);
        let v2 = Vector::new(vec![1.0, 2.0]);
        assert_eq!(v1.squared_l2(&v2), f32::INFINITY);
    }

    #[test]
    fn test_normalize() {
        let mut v = Vector::new(vec![3.0, 4.0]);
        v.normalize();
        assert!((v.as_slice()[0] - 0.6).abs() < 1e-6);
        assert!((v.as_slice()[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_unchanged() {
        let mut v = Vector::new(vec![0.0, 0.0, 0.0]);
        v.normalize();
        assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);
    }
}
