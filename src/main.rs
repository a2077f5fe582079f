use ls8::compiler::compiler;
use ls8::{loader, Computer, ComputerConfig, LineSink};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use eyre::{Result, WrapErr};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[derive(Parser, Debug)]
#[command(name = "ls8")]
#[command(about = "Runs an LS-8 program", long_about = None)]
struct Args {
    /// Program file: one binary byte per line, or mnemonics if it ends in .asm
    program: PathBuf,

    /// Treat the program as mnemonics regardless of extension
    #[arg(long, action = ArgAction::SetTrue)]
    assemble: bool,

    /// Fail after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,

    /// Initial stack pointer (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_byte, default_value = "0xf4")]
    stack_top: u8,

    /// Print per-opcode execution counts to stderr after the run
    #[arg(long, action = ArgAction::SetTrue)]
    profile: bool,

    /// Log a trace line before every instruction
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_byte(value: &str) -> Result<u8, String> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse::<u8>(),
    };
    parsed.map_err(|e| format!("`{value}` is not a byte: {e}"))
}

fn load(path: &Path, assemble: bool) -> Result<Vec<u8>> {
    let is_assembly = assemble || path.extension().is_some_and(|extension| extension == "asm");

    Ok(match is_assembly {
        true => compiler::compile(&fs::read_to_string(path)?)?,
        false => loader::parse_file(path)?,
    })
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = match (args.trace, args.verbose) {
        (true, _) => LevelFilter::Trace,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()?;

    let program = load(&args.program, args.assemble)
        .wrap_err_with(|| format!("failed to load program {}", args.program.display()))?;

    let config = ComputerConfig {
        stack_top: args.stack_top,
        step_limit: args.max_steps,
        profile: args.profile,
    };
    let mut computer = Computer::with_config(LineSink::new(io::stdout().lock()), config);
    computer.load_program(&program)?;

    let result = computer.run();

    if let Some(profile) = computer.profile() {
        for (mnemonic, count) in profile.rows() {
            eprintln!("{mnemonic:>4} {count}");
        }
        eprintln!("total {}", profile.total());
    }

    result.wrap_err("execution failed")?;
    Ok(())
}
