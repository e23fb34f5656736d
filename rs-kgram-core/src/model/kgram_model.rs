use std::fmt;

use super::state::State;
use crate::error::WriterError;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// Represents an order-k Markov model over the characters of a text.
///
/// The `KGramModel` stores one state per k-character context and
/// answers frequency queries about the transitions learned from a
/// circularized copy of the source.
///
/// # Responsibilities
/// - Build the transition table from a source text
/// - Record the alphabet in first-occurrence order
/// - Answer aggregate and per-character counts for a kgram
///
/// # Invariants
/// - `order` never changes after construction
/// - Each state in `states` corresponds to a unique context of length `order`
/// - The counts of all states sum to `source_len`
/// - With `order == 0` there is a single state keyed by the empty string
#[derive(Serialize, Clone, Debug)]
pub struct KGramModel {
	/// The order of the model (number of characters of context)
	order: usize,

	/// Distinct characters of the source, in first-occurrence order
	alphabet: String,

	/// Number of characters in the source
	source_len: usize,

	/// Mapping from a context (length `order`) to its corresponding state
	states: IndexMap<String, State>,
}

impl KGramModel {
	/// Builds an order-`order` model from `text`.
	///
	/// The text is read as a cyclic buffer: the first `order` characters are
	/// appended to its end, so every source character is recorded exactly
	/// once as the successor of some kgram.
	///
	/// # Errors
	/// - `InvalidOrder` if `order` exceeds the text length.
	/// - `EmptyInput` if `order == 0` and the text is empty.
	pub fn new(text: &str, order: usize) -> Result<Self, WriterError> {
		let chars: Vec<char> = text.chars().collect();
		let source_len = chars.len();

		if order > source_len {
			return Err(WriterError::InvalidOrder { order, length: source_len });
		}
		if order == 0 && source_len == 0 {
			return Err(WriterError::EmptyInput);
		}

		let mut alphabet = String::new();
		for &c in &chars {
			if !alphabet.contains(c) {
				alphabet.push(c);
			}
		}

		let circular: Vec<char> = chars.iter().chain(&chars[..order]).copied().collect();

		let mut states: IndexMap<String, State> = IndexMap::new();
		for i in 0..source_len {
			let kgram: String = circular[i..i + order].iter().collect();
			let next_char = circular[i + order];

			states
				.entry(kgram)
				.or_insert_with_key(|key| State::new(key))
				.add_transition(next_char);
		}

		debug!(
			"built order-{} model: {} kgrams, {} symbols, {} chars",
			order,
			states.len(),
			alphabet.chars().count(),
			source_len
		);

		Ok(Self { order, alphabet, source_len, states })
	}

	/// Returns the order `k` of the model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the distinct characters of the source in first-occurrence order.
	pub fn alphabet(&self) -> &str {
		&self.alphabet
	}

	/// Returns the number of characters in the source text.
	pub fn source_len(&self) -> usize {
		self.source_len
	}

	/// Iterates over all states in first-insertion order.
	pub fn kgrams(&self) -> impl Iterator<Item = &State> {
		self.states.values()
	}

	/// Looks up the state for `kgram`, if it was observed.
	pub fn state(&self, kgram: &str) -> Option<&State> {
		self.states.get(kgram)
	}

	/// Rejects kgrams whose character count differs from the order.
	///
	/// Always succeeds for order 0, where the kgram content is ignored.
	pub(crate) fn check_kgram(&self, kgram: &str) -> Result<(), WriterError> {
		if self.order == 0 {
			return Ok(());
		}
		let found = kgram.chars().count();
		if found != self.order {
			return Err(WriterError::KgramLengthMismatch { expected: self.order, found });
		}
		Ok(())
	}

	/// Number of times `kgram` is followed by any character.
	///
	/// Returns 0 for an unseen kgram. With order 0 every character of the
	/// source counts, so the result is the source length.
	///
	/// # Errors
	/// Returns `KgramLengthMismatch` if the kgram length differs from `k` (k > 0).
	pub fn total_frequency(&self, kgram: &str) -> Result<usize, WriterError> {
		if self.order == 0 {
			return Ok(self.source_len);
		}
		self.check_kgram(kgram)?;
		Ok(self.states.get(kgram).map_or(0, State::total))
	}

	/// Number of times `kgram` is followed by `c`.
	///
	/// With order 0 this is the number of occurrences of `c` in the source.
	///
	/// # Errors
	/// Returns `KgramLengthMismatch` if the kgram length differs from `k` (k > 0).
	pub fn frequency(&self, kgram: &str, c: char) -> Result<usize, WriterError> {
		if self.order == 0 {
			return Ok(self.states.values().map(|state| state.count(c)).sum());
		}
		self.check_kgram(kgram)?;
		Ok(self.states.get(kgram).map_or(0, |state| state.count(c)))
	}
}

impl fmt::Display for KGramModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Order: {}", self.order)?;
		writeln!(f, "Alphabet: {}", self.alphabet)?;
		writeln!(f, "Model:")?;
		for state in self.states.values() {
			write!(f, "  \"{}\" -> {{", state.key())?;
			for (i, (c, occurrence)) in state.transitions().enumerate() {
				if i > 0 {
					write!(f, ", ")?;
				}
				write!(f, "'{}':{}", c, occurrence)?;
			}
			writeln!(f, "}}")?;
		}
		Ok(())
	}
}
