// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use lexjson::{CloserPolicy, DecodeConfig, Decoder, EscapeMode, NumberMode, DEFAULT_MAX_DEPTH};

/// Decode a JSON document and print the resulting value tree.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file; reads stdin when absent or `-`
    file: Option<PathBuf>,

    /// Materialize numbers as integers and floats instead of keeping their text
    #[arg(long)]
    parse_numbers: bool,

    /// Decode every JSON escape sequence, not only `\"`
    #[arg(long)]
    full_escapes: bool,

    /// Reject objects and arrays with a missing closing delimiter
    #[arg(long)]
    strict: bool,

    /// Maximum nesting of objects and arrays
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Args {
    fn config(&self) -> DecodeConfig {
        let mut config = DecodeConfig::new().with_max_depth(self.max_depth);
        if self.parse_numbers {
            config = config.with_numbers(NumberMode::Parsed);
        }
        if self.full_escapes {
            config = config.with_escapes(EscapeMode::Full);
        }
        if self.strict {
            config = config.with_closers(CloserPolicy::Strict);
        }
        config
    }
}

fn read_input(file: Option<&PathBuf>) -> std::io::Result<String> {
    let mut s = String::new();
    match file {
        Some(path) if path.as_os_str() != "-" => {
            File::open(path)?.read_to_string(&mut s)?;
        }
        _ => {
            std::io::stdin().read_to_string(&mut s)?;
        }
    }
    Ok(s)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let input = match read_input(args.file.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            let name = args
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<stdin>".to_string());
            eprintln!("Error: Unable to read '{}': {}", name, e);
            std::process::exit(1);
        }
    };

    match Decoder::with_config(args.config()).decode(&input) {
        Ok(value) => println!("{value:#?}"),
        Err(e) => {
            eprintln!("Error: JSON decoding failed: {e}");
            std::process::exit(1);
        }
    }
}
