use thiserror::Error;

/// Errors raised while building or querying a k-gram model.
///
/// Every failure is local and synchronous: no operation returns a partial
/// result alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriterError {
	/// The order is larger than the source text (in characters).
	#[error("order k={order} cannot be larger than text size ({length})")]
	InvalidOrder { order: usize, length: usize },

	/// Order 0 needs at least one character to form its bag.
	#[error("input cannot be empty for k=0")]
	EmptyInput,

	#[error("kgram length must equal k (expected {expected}, got {found})")]
	KgramLengthMismatch { expected: usize, found: usize },

	/// The kgram was never observed while building the model.
	#[error("no such kgram in model: {0:?}")]
	UnknownKgram(String),

	#[error("order k cannot be zero in generate()")]
	OrderZeroUnsupported,

	/// The requested output is shorter than the seed.
	#[error("L must be at least k (L={length}, k={order})")]
	LengthTooShort { length: usize, order: usize },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_carry_values() {
		let err = WriterError::InvalidOrder { order: 5, length: 3 };
		assert_eq!(err.to_string(), "order k=5 cannot be larger than text size (3)");

		let err = WriterError::KgramLengthMismatch { expected: 2, found: 1 };
		assert_eq!(err.to_string(), "kgram length must equal k (expected 2, got 1)");

		let err = WriterError::UnknownKgram("zz".to_owned());
		assert_eq!(err.to_string(), "no such kgram in model: \"zz\"");
	}
}
