//! huffpack CLI - Huffman text compression tool
//!
//! Compresses a text file into a self-contained `<name>.bin` archive and
//! restores it into `<name>_decompressed.txt`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use huffpack::{Codec, CodecOptions, TextArchive};

/// Lossless static Huffman compression for text files.
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a text file (writes <name>.bin by default)
    Compress {
        /// Input text file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output archive path
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Keep trailing whitespace instead of stripping it
        #[arg(long)]
        keep_trailing_whitespace: bool,
    },
    /// Decompress an archive (writes <name>_decompressed.txt by default)
    Decompress {
        /// Input archive
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output text path
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
    /// Compress a text file, then decompress the result next to it
    Roundtrip {
        /// Input text file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Keep trailing whitespace instead of stripping it
        #[arg(long)]
        keep_trailing_whitespace: bool,
    },
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> huffpack::Result<()> {
    match command {
        Command::Compress {
            input,
            output,
            keep_trailing_whitespace,
        } => {
            let output = output.unwrap_or_else(|| compressed_path(&input));
            compress_file(&input, &output, options(keep_trailing_whitespace))?;
        }
        Command::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| decompressed_path(&input));
            decompress_file(&input, &output)?;
        }
        Command::Roundtrip {
            input,
            keep_trailing_whitespace,
        } => {
            let compressed = compressed_path(&input);
            compress_file(&input, &compressed, options(keep_trailing_whitespace))?;
            decompress_file(&compressed, &decompressed_path(&compressed))?;
        }
    }

    Ok(())
}

fn options(keep_trailing_whitespace: bool) -> CodecOptions {
    CodecOptions::default().strip_trailing_whitespace(!keep_trailing_whitespace)
}

fn compress_file(input: &Path, output: &Path, options: CodecOptions) -> huffpack::Result<()> {
    println!("Compression started...");
    let start = Instant::now();

    let text = fs::read_to_string(input)?;
    let compressed = Codec::new(options).compress(&text)?;

    let mut writer = BufWriter::new(File::create(output)?);
    TextArchive::new(&compressed).write_to(&mut writer)?;
    writer.flush()?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        input_bytes = text.len(),
        payload_bytes = compressed.stream().len(),
        distinct = compressed.table().len(),
        ratio = compressed.ratio(),
        elapsed = ?start.elapsed(),
        "compressed"
    );
    println!("Compression completed successfully: {}", output.display());
    Ok(())
}

fn decompress_file(input: &Path, output: &Path) -> huffpack::Result<()> {
    let start = Instant::now();

    let reader = BufReader::new(File::open(input)?);
    let compressed = TextArchive::read_from(reader)?.into_compressed()?;
    let text = Codec::default().decompress(&compressed)?;

    fs::write(output, &text)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        output_bytes = text.len(),
        elapsed = ?start.elapsed(),
        "decompressed"
    );
    println!("Decompression completed successfully: {}", output.display());
    Ok(())
}

/// `dir/name.txt` -> `dir/name.bin`
fn compressed_path(input: &Path) -> PathBuf {
    input.with_extension("bin")
}

/// `dir/name.bin` -> `dir/name_decompressed.txt`
fn decompressed_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push("_decompressed.txt");
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths() {
        assert_eq!(
            compressed_path(Path::new("docs/notes.txt")),
            PathBuf::from("docs/notes.bin")
        );
        assert_eq!(compressed_path(Path::new("README")), PathBuf::from("README.bin"));
        assert_eq!(
            decompressed_path(Path::new("docs/notes.bin")),
            PathBuf::from("docs/notes_decompressed.txt")
        );
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample.txt");
        fs::write(&input, "Huffman coding is a greedy algorithm.\n\n").unwrap();

        run(Command::Roundtrip {
            input: input.clone(),
            keep_trailing_whitespace: false,
        })
        .unwrap();

        let restored = fs::read_to_string(dir.path().join("sample_decompressed.txt")).unwrap();
        assert_eq!(restored, "Huffman coding is a greedy algorithm.");
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(Command::Decompress {
            input: dir.path().join("missing.bin"),
            output: None,
        })
        .unwrap_err();

        assert!(matches!(err, huffpack::Error::Io(_)));
    }
}
