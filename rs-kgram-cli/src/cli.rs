use std::io::{Read, Write};

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use log::debug;
use rs_kgram_core::RandWriter;

use crate::io;

/// Generate text from an order-k Markov model of standard input.
#[derive(Parser, Debug)]
#[command(name = "rs-kgram", version, about)]
pub struct Cli {
    /// Order of the model (number of characters of context)
    #[arg(value_name = "k")]
    pub order: usize,

    /// Length of the generated text, in characters
    #[arg(value_name = "L")]
    pub length: usize,

    /// Seed for the random generator, for reproducible output
    #[arg(long, env = "RS_KGRAM_SEED")]
    pub seed: Option<u64>,

    /// Print the built model to stderr before generating
    #[arg(long, value_enum)]
    pub dump: Option<DumpFormat>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Text,
    Json,
}

/// Reads the source from `input`, builds the model and writes one generated
/// line to `output`. Model dumps go to `diagnostics`.
pub fn run<R, W, E>(cli: &Cli, input: R, mut output: W, mut diagnostics: E) -> Result<()>
where
    R: Read,
    W: Write,
    E: Write,
{
    let text = io::read_source(input)?;
    let text_len = text.chars().count();
    debug!("read {} chars of source text", text_len);

    if text_len < cli.order {
        bail!("input text too short (length {}) for order k={}", text_len, cli.order);
    }

    let mut writer = match cli.seed {
        Some(seed) => RandWriter::with_seed(&text, cli.order, seed)?,
        None => RandWriter::new(&text, cli.order)?,
    };

    match cli.dump {
        Some(DumpFormat::Text) => write!(diagnostics, "{}", writer)?,
        Some(DumpFormat::Json) => {
            writeln!(diagnostics, "{}", serde_json::to_string_pretty(writer.model())?)?
        }
        None => (),
    }

    let seed = io::seed_kgram(&text, cli.order);
    let generated = writer.generate(&seed, cli.length)?;
    writeln!(output, "{}", generated)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["rs-kgram"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_with(args: &[&str], input: &str) -> (Result<()>, String, String) {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let result = run(&cli(args), input.as_bytes(), &mut out, &mut diag);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn parses_two_positionals() {
        let parsed = cli(&["2", "10"]);
        assert_eq!(parsed.order, 2);
        assert_eq!(parsed.length, 10);
        assert_eq!(parsed.dump, None);
    }

    #[test]
    fn parses_options() {
        let parsed = cli(&["3", "40", "--seed", "7", "--dump", "json"]);
        assert_eq!(parsed.seed, Some(7));
        assert_eq!(parsed.dump, Some(DumpFormat::Json));
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(Cli::try_parse_from(["rs-kgram", "2"]).is_err());
        assert!(Cli::try_parse_from(["rs-kgram", "2", "10", "5"]).is_err());
        assert!(Cli::try_parse_from(["rs-kgram", "two", "10"]).is_err());
    }

    #[test]
    fn generates_one_line() {
        let (result, out, diag) = run_with(&["2", "10", "--seed", "1"], "gagggagaggcgagaaa");
        result.unwrap();
        assert!(diag.is_empty());
        let line = out.strip_suffix('\n').unwrap();
        assert_eq!(line.chars().count(), 10);
        assert!(line.starts_with("ga"));
    }

    #[test]
    fn short_input_is_reported() {
        let (result, out, _) = run_with(&["5", "10"], "abc");
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "input text too short (length 3) for order k=5");
        assert!(out.is_empty());
    }

    #[test]
    fn core_errors_propagate() {
        let (result, _, _) = run_with(&["0", "10"], "aab");
        assert_eq!(result.unwrap_err().to_string(), "order k cannot be zero in generate()");

        let (result, _, _) = run_with(&["3", "2"], "abcdef");
        assert_eq!(result.unwrap_err().to_string(), "L must be at least k (L=2, k=3)");
    }

    #[test]
    fn dumps_model_as_text() {
        let (result, _, diag) = run_with(&["1", "3", "--seed", "0", "--dump", "text"], "aab");
        result.unwrap();
        assert!(diag.starts_with("Order: 1\nAlphabet: ab\nModel:\n"));
    }

    #[test]
    fn dumps_model_as_json() {
        let (result, _, diag) = run_with(&["1", "3", "--seed", "0", "--dump", "json"], "aab");
        result.unwrap();
        let json: serde_json::Value = serde_json::from_str(&diag).unwrap();
        assert_eq!(json["order"], 1);
    }
}
