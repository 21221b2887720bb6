//! Cached real-input FFT plans.
//!
//! Mirrors the teacher's `sync/fft.rs`: `rustfft` plans are expensive to
//! build and the waterfall builder calls the same size repeatedly (one
//! window length for the whole buffer), so plans are cached by size behind
//! a `Mutex` rather than rebuilt per call.

use once_cell::sync::Lazy;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

static FORWARD_CACHE: Lazy<Mutex<HashMap<usize, Arc<dyn Fft<f32>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn forward_plan(n: usize) -> Arc<dyn Fft<f32>> {
    let mut cache = FORWARD_CACHE.lock().expect("fft plan cache poisoned");
    cache
        .entry(n)
        .or_insert_with(|| FftPlanner::new().plan_fft_forward(n))
        .clone()
}

/// Compute the forward FFT of a real-valued, windowed frame of length `n`.
/// Returns the full complex spectrum; callers interested in magnitudes use
/// only the first `n/2 + 1` bins.
pub fn fft_real(samples: &[f32]) -> Vec<Complex<f32>> {
    let n = samples.len();
    let plan = forward_plan(n);
    let mut buf: Vec<Complex<f32>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();
    plan.process(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_signal_has_energy_only_in_bin_zero() {
        let samples = vec![1.0f32; 64];
        let spectrum = fft_real(&samples);
        assert!(spectrum[0].norm() > 63.0);
        for bin in &spectrum[1..32] {
            assert!(bin.norm() < 1e-3);
        }
    }

    #[test]
    fn plan_cache_reused_across_calls() {
        let a = fft_real(&vec![0.0f32; 128]);
        let b = fft_real(&vec![0.0f32; 128]);
        assert_eq!(a.len(), b.len());
    }
}
