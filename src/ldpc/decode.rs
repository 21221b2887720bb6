//! LDPC(174,91) belief-propagation decoding.
//!
//! Sum-product message passing over the parity-check adjacency built in
//! [`super::constants`], in the style of
//! `examples/N0YPR-RustyFt8/src/ldpc/decode.rs`: variable-to-check and
//! check-to-variable messages are updated each iteration, a hard decision
//! is taken from the total belief at each variable, and decoding stops
//! early the first iteration every parity check is satisfied. `platanh` is
//! the same piecewise-linear approximation of atanh ported from WSJT-X's
//! `lib/platanh.f90`, used in place of a transcendental `atanh` call for
//! every check-node update.
//!
//! Unlike the teacher, this decoder does not reach into CRC validation to
//! decide when to stop: it stops purely on parity satisfaction and leaves
//! "is this codeword actually the right message" to the CRC-14 check the
//! caller runs afterward, keeping the LDPC and CRC stages independently
//! testable as their own pipeline components.

use super::constants::PARITY_ADJACENCY;
use crate::constants::{LDPC_M, LDPC_N};
use bitvec::prelude::*;
use once_cell::sync::Lazy;

struct EdgeIndex {
    edge_check: Vec<usize>,
    edge_var: Vec<usize>,
    edges_for_check: Vec<Vec<usize>>,
    edges_for_var: Vec<Vec<usize>>,
}

static EDGES: Lazy<EdgeIndex> = Lazy::new(|| {
    let adj = &*PARITY_ADJACENCY;
    let mut edge_check = Vec::new();
    let mut edge_var = Vec::new();
    let mut edges_for_check = vec![Vec::new(); LDPC_M];
    let mut edges_for_var = vec![Vec::new(); LDPC_N];

    for (check, vars) in adj.checks.iter().enumerate() {
        for &var in vars {
            let edge = edge_check.len();
            edge_check.push(check);
            edge_var.push(var);
            edges_for_check[check].push(edge);
            edges_for_var[var].push(edge);
        }
    }

    EdgeIndex {
        edge_check,
        edge_var,
        edges_for_check,
        edges_for_var,
    }
});

/// Piecewise-linear approximation of atanh, ported from WSJT-X's
/// `lib/platanh.f90`.
fn platanh(x: f32) -> f32 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs();
    let y = if z <= 0.664 {
        z / 0.83
    } else if z <= 0.9217 {
        (z - 0.4064) / 0.322
    } else if z <= 0.9951 {
        (z - 0.8378) / 0.0524
    } else if z <= 0.9998 {
        (z - 0.9914) / 0.0012
    } else {
        7.0
    };
    sign * y
}

/// Result of a belief-propagation decode attempt.
pub struct DecodeResult {
    pub codeword: BitVec<u8, Msb0>,
    pub iterations_used: usize,
    pub parity_errors: usize,
}

/// Runs up to `max_iterations` rounds of belief propagation over `llr`
/// (174 log-likelihood ratios, positive favors 0). Always returns a best
/// effort result; callers check `parity_errors == 0` (and then CRC) to
/// decide whether the result is trustworthy.
pub fn decode(llr: &[f32], max_iterations: usize) -> DecodeResult {
    assert_eq!(llr.len(), LDPC_N, "expected {LDPC_N} LLRs");
    let edges = &*EDGES;
    let num_edges = edges.edge_check.len();

    let mut msg_v2c = vec![0.0f32; num_edges];
    for e in 0..num_edges {
        msg_v2c[e] = llr[edges.edge_var[e]];
    }
    let mut msg_c2v = vec![0.0f32; num_edges];

    let mut hard = BitVec::<u8, Msb0>::repeat(false, LDPC_N);
    let mut iterations_used = 0;
    let mut parity_errors = LDPC_M;

    for iter in 1..=max_iterations.max(1) {
        iterations_used = iter;

        // Check node update.
        for (check, check_edges) in edges.edges_for_check.iter().enumerate() {
            for &e in check_edges {
                let mut product = 1.0f32;
                for &other in check_edges {
                    if other != e {
                        product *= (-msg_v2c[other] / 2.0).tanh();
                    }
                }
                msg_c2v[e] = -2.0 * platanh(product);
                let _ = check;
            }
        }

        // Variable node update and hard decision.
        for var in 0..LDPC_N {
            let total: f32 = llr[var] + edges.edges_for_var[var].iter().map(|&e| msg_c2v[e]).sum::<f32>();
            hard.set(var, total < 0.0);
            for &e in &edges.edges_for_var[var] {
                msg_v2c[e] = total - msg_c2v[e];
            }
        }

        parity_errors = count_parity_errors(&hard);
        if parity_errors == 0 {
            break;
        }
    }

    DecodeResult {
        codeword: hard,
        iterations_used,
        parity_errors,
    }
}

fn count_parity_errors(hard: &BitSlice<u8, Msb0>) -> usize {
    PARITY_ADJACENCY
        .checks
        .iter()
        .filter(|vars| vars.iter().fold(false, |acc, &v| acc ^ hard[v]))
        .count()
}
