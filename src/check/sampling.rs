use rand::Rng;
use rand::seq::index;

/// Picks `min(k, len)` distinct coordinates out of `0..len`, uniformly at
/// random, returned in ascending order.
///
/// Checking every coordinate of a large parameter vector costs one loss
/// evaluation each; a random subset is usually enough to catch a wrong
/// backward pass.
pub fn sample_indices<R: Rng + ?Sized>(len: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut picked = index::sample(rng, len, k.min(len)).into_vec();
    picked.sort_unstable();
    picked
}
