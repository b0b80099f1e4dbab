//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - Whitespace tokenization and prose rendering of generated words
//! - Training of a fixed-order chain over word tokens
//! - Frequency-weighted generation with a configurable fallback
//! - Small file helpers for the command-line front end
//!
//! Typical flow: `text::split_words` → `ChainModel::train` →
//! `generator::generate` → `text::to_prose` / `text::split_sentences`.

/// Chain model, sampling and generation.
pub mod model;

/// Tokenizer and prose helpers.
pub mod text;

/// Error type shared by the whole crate.
pub mod error;

/// File loading and output path helpers.
pub mod io;

pub use error::{ChainError, Result};
pub use model::chain::{ChainBuilder, ChainEntry, ChainModel};
pub use model::context::Context;
pub use model::distribution::Distribution;
pub use model::generation_input::{FallbackPolicy, GenerationInput, StartSeed};
pub use model::generator::{Generator, generate, generate_with};
