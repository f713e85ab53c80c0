use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lc2k_asm::{assemble, AsmConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-pass LC-2K assembler")]
struct Opts {
    /// Assembly source, one instruction or .fill per line
    #[arg(value_name = "ASSEMBLY")]
    input: PathBuf,
    /// Machine-code output, one decimal word per line
    #[arg(value_name = "MACHINE_CODE")]
    output: PathBuf,
    /// Export the label table as JSON (Vec<{ addr, name }>)
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
}

fn run(opts: Opts) -> Result<()> {
    let src = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("error in opening {}", opts.input.display()))?;
    let asm = assemble(&src, &AsmConfig::default())?;

    let out = File::create(&opts.output)
        .with_context(|| format!("error in opening {}", opts.output.display()))?;
    asm.write_to(BufWriter::new(out))
        .with_context(|| format!("writing {}", opts.output.display()))?;

    if let Some(path) = opts.symbols {
        let json = serde_json::to_string_pretty(&asm.symbols.export())?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Opts::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
