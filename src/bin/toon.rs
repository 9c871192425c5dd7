//! Command-line converter between JSON and TOON.
//!
//! Direction is auto-detected from the input file extension (`.json`
//! encodes, anything else decodes; stdin defaults to encoding) and can be
//! forced with `--encode` / `--decode`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use toon_codec::{decode_with_options, encode_with_options, Delimiter, ToonOptions, Value};

/// Convert between JSON and TOON (Token-Oriented Object Notation).
#[derive(Parser, Debug)]
#[command(name = "toon")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file. If not specified (or '-'), reads from stdin.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file. If not specified, writes to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Force encode mode (JSON -> TOON).
    #[arg(short, long, conflicts_with = "decode")]
    encode: bool,

    /// Force decode mode (TOON -> JSON).
    #[arg(short, long)]
    decode: bool,

    /// Array delimiter: , | \t
    #[arg(long, default_value = ",")]
    delimiter: String,

    /// Indentation spaces.
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Add a # prefix to array lengths.
    #[arg(long)]
    length_marker: bool,

    /// Disable strict validation (decode only).
    #[arg(long)]
    no_strict: bool,

    /// Show token count estimates on stderr (encode only).
    #[arg(long)]
    stats: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("toon: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(args.input.as_deref())?;
    let options = build_options(&args)?;

    let should_encode = if args.encode || args.decode {
        args.encode
    } else {
        detect_encode(args.input.as_deref())
    };

    let output = if should_encode {
        let json: serde_json::Value = serde_json::from_str(&input)?;
        let toon = encode_with_options(&Value::from(json), &options);
        if args.stats {
            print_stats(&input, &toon);
        }
        toon
    } else {
        let value = decode_with_options(&input, &options)?;
        serde_json::to_string(&serde_json::Value::from(value))?
    };

    match args.output {
        Some(path) => fs::write(&path, &output)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?,
        None => io::stdout().write_all(output.as_bytes())?,
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        None => read_stdin(),
        Some(p) if p.as_os_str() == "-" => read_stdin(),
        Some(p) => Ok(fs::read_to_string(p)
            .map_err(|e| format!("cannot read '{}': {}", p.display(), e))?),
    }
}

fn read_stdin() -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// A `.json` extension means encode; anything else (including stdin) is
/// decoded unless stdin, which defaults to encoding.
fn detect_encode(path: Option<&std::path::Path>) -> bool {
    match path {
        None => true,
        Some(p) if p.as_os_str() == "-" => true,
        Some(p) => p.extension().is_some_and(|ext| ext == "json"),
    }
}

fn build_options(args: &Args) -> Result<ToonOptions, Box<dyn std::error::Error>> {
    let delimiter = match args.delimiter.as_str() {
        "," => Delimiter::Comma,
        "\t" | "\\t" => Delimiter::Tab,
        "|" => Delimiter::Pipe,
        other => return Err(format!("unknown delimiter: {:?} (use: , | \\t)", other).into()),
    };

    if args.indent < 1 {
        return Err("indent must be >= 1".into());
    }

    Ok(ToonOptions::new()
        .with_indent(args.indent)
        .with_delimiter(delimiter)
        .with_length_marker(args.length_marker)
        .with_strict(!args.no_strict))
}

/// Rough token estimate (length heuristic); actual counts vary by
/// tokenizer.
fn estimate_tokens(text: &str) -> usize {
    text.len() / 4 + 10
}

fn print_stats(json: &str, toon: &str) {
    let json_tokens = estimate_tokens(json);
    let toon_tokens = estimate_tokens(toon);
    let savings = (100.0 * (1.0 - toon_tokens as f64 / json_tokens as f64)) as i64;
    eprintln!(
        "JSON tokens: {}, TOON tokens: {}, savings: {}%",
        json_tokens, toon_tokens, savings
    );
}
