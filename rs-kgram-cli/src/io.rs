use std::io::{self, Read};

/// Reads the whole source text from `reader`.
///
/// - Reads everything into memory, line breaks included
/// - Invalid UTF-8 sequences are replaced with U+FFFD instead of failing
pub(crate) fn read_source<R: Read>(mut reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Returns the first `k` characters of `text`, the kgram generation starts from.
///
/// Examples:
/// - `("gagga", 2)` → `"ga"`
/// - `("héllo", 2)` → `"hé"`
pub(crate) fn seed_kgram(text: &str, k: usize) -> String {
    text.chars().take(k).collect()
}
