use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vgmrom::vgm::emit;

/// Converts a VGM/VGZ sound log into the compact indexed bytestream
/// consumed by the target firmware.
#[derive(Parser)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
struct Cli {
    /// Input file to read (use '-' for stdin)
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn open_input(path: &PathBuf) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Box::new(file))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let reader = open_input(&cli.file)?;
    let output = match vgmrom::convert_reader(reader) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    emit::emit(&output, &mut handle).context("failed to write output")?;
    handle.flush().context("failed to flush stdout")?;

    Ok(())
}
