//! `triform` CLI — convert JSON, XML, and YAML documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Convert JSON to YAML (stdin → stdout)
//! echo '{"name":"Ada"}' | triform convert --to yaml
//!
//! # Convert from file to file
//! triform convert --to xml -i config.yaml -o config.xml
//!
//! # Minified output
//! triform convert --to json --minify -i data.xml
//!
//! # Report the detected format of a document
//! triform detect -i mystery.txt
//! ```
//!
//! The source format is never passed explicitly; it is detected from the
//! content the same way the library does it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use triform_core::{ConvertOptions, Format};

#[derive(Parser)]
#[command(
    name = "triform",
    version,
    about = "Convert documents between JSON, XML, and YAML"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to the target format (source format is auto-detected)
    Convert {
        /// Target format: json, xml, or yaml
        #[arg(short, long)]
        to: Format,
        /// Emit minified output instead of pretty-printed
        #[arg(long)]
        minify: bool,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the format a document would be detected as
    Detect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            to,
            minify,
            input,
            output,
        } => {
            let content = read_input(input.as_deref())?;
            let options = ConvertOptions { minify };
            let converted = triform_core::convert(&content, to, &options)
                .with_context(|| format!("Failed to convert document to {to}"))?;
            write_output(output.as_deref(), &converted)?;
        }
        Commands::Detect { input } => {
            let content = read_input(input.as_deref())?;
            println!("{}", Format::detect(&content));
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
