//! Memory fade models.
//!
//! A fade multiplies each entry of a newest-first reward list by a factor in
//! `[0, 1]`, so every model is monotone non-increasing and never produces a
//! negative value from a non-negative one.  `rate` is a fraction (`0.05` for
//! a 5 % fade) and is clamped to `[0, 1]`.

use std::collections::VecDeque;

use ct_core::FadeStrategy;

/// Decay constant of the recency weights `w_i = exp(-0.5·i)`.
const RECENCY_DECAY: f64 = 0.5;

/// Normalised recency weights for a list of `len` entries.  Index 0 (the
/// newest) carries the largest weight; the weights sum to 1.
pub fn recency_weights(len: usize) -> Vec<f64> {
    let raw: Vec<f64> = (0..len).map(|i| (-RECENCY_DECAY * i as f64).exp()).collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return raw;
    }
    raw.into_iter().map(|w| w / total).collect()
}

/// Apply `strategy` at `rate` to one reward list in place.
pub fn fade_list(list: &mut VecDeque<f64>, strategy: FadeStrategy, rate: f64) {
    let rate = rate.clamp(0.0, 1.0);
    if list.is_empty() || rate == 0.0 {
        return;
    }
    match strategy {
        FadeStrategy::None => {}
        FadeStrategy::Linear => {
            let factor = 1.0 - rate;
            list.iter_mut().for_each(|v| *v *= factor);
        }
        FadeStrategy::Exponential => {
            let len = list.len();
            for (i, v) in list.iter_mut().enumerate() {
                let pos = if len == 1 { 0.0 } else { i as f64 / (len - 1) as f64 };
                *v *= (1.0 - rate).powf(1.0 + 2.0 * pos);
            }
        }
        FadeStrategy::RecencyWeighted => {
            let weights = recency_weights(list.len());
            for (v, w) in list.iter_mut().zip(weights) {
                *v *= (1.0 - rate * (1.0 - w) * 2.0).max(0.0);
            }
        }
    }
}
