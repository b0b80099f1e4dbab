//! Word-level Markov chain: training and generation.
//!
//! - Fixed-length token windows (`Context`)
//! - Next-token counts per window (`Distribution`)
//! - Training into an immutable chain (`ChainBuilder`, `ChainModel`)
//! - Generation configuration (`GenerationInput`)
//! - Token-by-token generation (`Generator`)

/// Token-by-token generation over a trained chain, with seed and
/// fallback control.
pub mod generator;

/// Chain training: a mutable builder that freezes into a read-only model.
pub mod chain;

/// Value-compared token windows used as chain keys.
pub mod context;

/// Next-token counts of one context, with weighted sampling.
pub mod distribution;

/// Generation parameters: start seed and unknown-context fallback.
pub mod generation_input;

/// Weighted random selection over integer counts.
pub mod sampling;
