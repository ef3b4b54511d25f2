// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Built-in node functions
//!
//! Activation inputs are scaled and clamped so `exp` never overflows; the
//! scale factors keep each function's useful range near `[-1, 1]`.

/// Activation functions `f64 -> f64`
pub mod activation {
    pub fn sigmoid(z: f64) -> f64 {
        let z = (5.0 * z).clamp(-60.0, 60.0);
        1.0 / (1.0 + (-z).exp())
    }

    pub fn tanh(z: f64) -> f64 {
        (2.5 * z).clamp(-60.0, 60.0).tanh()
    }

    pub fn sin(z: f64) -> f64 {
        (5.0 * z).clamp(-60.0, 60.0).sin()
    }

    pub fn gauss(z: f64) -> f64 {
        let z = z.clamp(-3.4, 3.4);
        (-5.0 * z * z).exp()
    }

    pub fn relu(z: f64) -> f64 {
        z.max(0.0)
    }

    pub fn elu(z: f64) -> f64 {
        if z > 0.0 {
            z
        } else {
            z.exp() - 1.0
        }
    }

    pub fn lelu(z: f64) -> f64 {
        const LEAKY: f64 = 0.005;
        if z > 0.0 {
            z
        } else {
            LEAKY * z
        }
    }

    pub fn selu(z: f64) -> f64 {
        const LAMBDA: f64 = 1.050_700_987_355_480_5;
        const ALPHA: f64 = 1.673_263_242_354_377_3;
        if z > 0.0 {
            LAMBDA * z
        } else {
            LAMBDA * ALPHA * (z.exp() - 1.0)
        }
    }

    pub fn softplus(z: f64) -> f64 {
        let z = (5.0 * z).clamp(-60.0, 60.0);
        0.2 * (1.0 + z.exp()).ln()
    }

    pub fn identity(z: f64) -> f64 {
        z
    }

    pub fn clamped(z: f64) -> f64 {
        z.clamp(-1.0, 1.0)
    }

    /// `1/z`, with 0 mapped to 0
    pub fn inv(z: f64) -> f64 {
        if z == 0.0 {
            0.0
        } else {
            1.0 / z
        }
    }

    pub fn log(z: f64) -> f64 {
        z.max(1e-7).ln()
    }

    pub fn exp(z: f64) -> f64 {
        z.clamp(-60.0, 60.0).exp()
    }

    pub fn abs(z: f64) -> f64 {
        z.abs()
    }

    pub fn hat(z: f64) -> f64 {
        (1.0 - z.abs()).max(0.0)
    }

    pub fn square(z: f64) -> f64 {
        z * z
    }

    pub fn cube(z: f64) -> f64 {
        z * z * z
    }
}

/// Aggregation functions `&[f64] -> f64`; empty input yields the identity
/// element for sum/product and 0.0 otherwise
pub mod aggregation {
    pub fn sum(xs: &[f64]) -> f64 {
        xs.iter().sum()
    }

    pub fn product(xs: &[f64]) -> f64 {
        xs.iter().product()
    }

    pub fn max(xs: &[f64]) -> f64 {
        xs.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    pub fn min(xs: &[f64]) -> f64 {
        xs.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    /// Input with the largest magnitude, sign preserved
    pub fn maxabs(xs: &[f64]) -> f64 {
        xs.iter()
            .copied()
            .reduce(|best, x| if x.abs() > best.abs() { x } else { best })
            .unwrap_or(0.0)
    }

    pub fn median(xs: &[f64]) -> f64 {
        if xs.is_empty() {
            return 0.0;
        }
        let mut sorted = xs.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        }
    }

    pub fn mean(xs: &[f64]) -> f64 {
        if xs.is_empty() {
            0.0
        } else {
            sum(xs) / xs.len() as f64
        }
    }
}
