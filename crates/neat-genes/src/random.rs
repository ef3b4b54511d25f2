// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Random number sources for gene operations.

Nothing in this crate draws from a global generator: every stochastic
operation receives a `&mut dyn RngCore`. Seeded sources use ChaCha8 so a
fixed seed reproduces the same genes on every platform, and parallel workers
each own an independent source.
*/

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reproducible generator for a fixed seed
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generator seeded from the operating system
pub fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

/// Generate random f64 in range [0.0, 1.0)
pub fn random_unit(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Fair coin used to pick a parent during crossover
pub fn coin_flip(rng: &mut dyn RngCore) -> bool {
    rng.gen_bool(0.5)
}

/// Uniformly choose one of `options`, `None` when empty
pub fn choose<'a, T>(rng: &mut dyn RngCore, options: &'a [T]) -> Option<&'a T> {
    options.choose(rng)
}
