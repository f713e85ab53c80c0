use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use lc2k_rs::{
    exec::IntExecutor, isa::lc2k::Lc2kDecoder, loader, Cpu, CpuConfig, MachineState, WordMemory,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run an LC-2K machine-code file")]
struct Opts {
    /// Machine-code file, one decimal word per line
    #[arg(value_name = "MACHINE_CODE")]
    input: PathBuf,
    /// State report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Stop after N instructions even if no HALT was reached
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
}

fn report(format: OutputFormat, state: &MachineState) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{state}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
    }
    Ok(())
}

fn run(opts: Opts) -> Result<()> {
    let cfg = CpuConfig {
        max_steps: opts.max_steps,
        ..CpuConfig::default()
    };
    let mut mem = WordMemory::new(cfg.memory_words);
    let loaded = loader::load_file(&mut mem, &opts.input)
        .with_context(|| format!("loading {}", opts.input.display()))?;
    if matches!(opts.format, OutputFormat::Text) {
        for (addr, word) in mem.words[..loaded].iter().enumerate() {
            println!("memory[{addr}]={word}");
        }
    }

    let mut cpu = Cpu::new(cfg);
    cpu.reset(0);
    let dec = Lc2kDecoder::new();
    let exec = IntExecutor;

    let mut report_err = None;
    let summary = cpu.run(&mut mem, &dec, &exec, |cpu, mem| {
        if report_err.is_none() {
            report_err = report(opts.format, &MachineState::capture(cpu, mem)).err();
        }
    })?;
    if let Some(e) = report_err {
        return Err(e);
    }

    if summary.halted {
        println!("machine halted");
    } else {
        println!("step limit reached");
    }
    println!("total of {} instructions executed", summary.instructions);
    println!("final state of machine:");
    report(opts.format, &MachineState::capture(&cpu, &mem))
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
