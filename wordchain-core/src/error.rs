use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by chain training, generation and the file helpers.
///
/// None of these represent corrupted state: the model is immutable once
/// trained, so every variant is recoverable by fixing the input and retrying.
#[derive(Error, Debug)]
pub enum ChainError {
	#[error("Invalid order: {0} (must be >= 1)")]
	InvalidOrder(usize),

	#[error("Chain has no contexts, the corpus is too short for its order")]
	EmptyModel,

	#[error("Invalid request size: {0} (must be >= 1)")]
	InvalidRequestSize(usize),

	#[error("Context not found: {0:?}")]
	ContextNotFound(Vec<String>),

	#[error("Invalid seed: expected {expected} tokens, got {got}")]
	InvalidSeed { expected: usize, got: usize },

	#[error("Output already exists: {}", .0.display())]
	OutputExists(PathBuf),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChainError>;
