//! Three-address code compiler driver
//!
//! Compiles one source file to assembly and optionally writes the
//! intermediate products (tokens, symbol table, IR) next to it.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use tac_backend::{compile_program, LoweringOptions};
use tac_codegen::emit_program;
use tac_frontend::{CompiledUnit, Frontend};

#[derive(Parser, Debug)]
#[command(name = "tacc", version, about = "Three-address code compiler")]
struct Args {
    /// Input source file
    input: PathBuf,

    /// Output assembly file (defaults to the input with an .asm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print IR to stdout before lowering
    #[arg(long)]
    print_ir: bool,

    /// Write the IR dump to this file
    #[arg(long, value_name = "PATH")]
    ir_output: Option<PathBuf>,

    /// Write the token dump to this file
    #[arg(long, value_name = "PATH")]
    tokens_output: Option<PathBuf>,

    /// Write the symbol table dump to this file
    #[arg(long, value_name = "PATH")]
    symbols_output: Option<PathBuf>,

    /// Render IR dumps as JSON
    #[arg(long)]
    json: bool,

    /// Number of scratch registers to allocate from (t0 upwards)
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(1..=7),
        conflicts_with = "config"
    )]
    registers: Option<u8>,

    /// JSON file with lowering options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::init();
    }

    let options = lowering_options(&args)?;

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let unit = Frontend::compile_to_ir(&source, &filename)?;
    write_frontend_dumps(&args, &unit)?;

    let instructions = compile_program(unit.program, &options)?;
    let assembly = emit_program(&instructions);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    fs::write(&output, &assembly)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("assembly written to {}", output.display());

    Ok(())
}

fn lowering_options(args: &Args) -> Result<LoweringOptions> {
    if let Some(path) = &args.config {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        return Ok(LoweringOptions::from_json(&text)?);
    }
    match args.registers {
        Some(count) => Ok(LoweringOptions::with_register_count(usize::from(count))?),
        None => Ok(LoweringOptions::default()),
    }
}

fn write_frontend_dumps(args: &Args, unit: &CompiledUnit) -> Result<()> {
    if let Some(path) = &args.tokens_output {
        let dump: String = unit.tokens.iter().map(|t| format!("{t}\n")).collect();
        write_dump(path, &dump)?;
    }

    if let Some(path) = &args.symbols_output {
        write_dump(path, &unit.symbols.dump())?;
    }

    if args.print_ir || args.ir_output.is_some() {
        let ir = if args.json {
            unit.program.to_json()?
        } else {
            unit.program.dump()
        };
        if args.print_ir {
            println!("{ir}");
        }
        if let Some(path) = &args.ir_output {
            write_dump(path, &ir)?;
        }
    }

    Ok(())
}

fn write_dump(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("asm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path(Path::new("prog.txt")), PathBuf::from("prog.asm"));
        assert_eq!(default_output_path(Path::new("dir/prog")), PathBuf::from("dir/prog.asm"));
    }

    #[test]
    fn test_register_flag() {
        let args = Args::try_parse_from(["tacc", "prog.txt", "--registers", "3"]).unwrap();
        assert_eq!(lowering_options(&args).unwrap().registers.len(), 3);

        assert!(Args::try_parse_from(["tacc", "prog.txt", "--registers", "0"]).is_err());
        assert!(Args::try_parse_from(["tacc", "prog.txt", "--registers", "8"]).is_err());
    }

    #[test]
    fn test_default_options() {
        let args = Args::try_parse_from(["tacc", "prog.txt"]).unwrap();
        assert_eq!(lowering_options(&args).unwrap(), LoweringOptions::default());
        assert!(args.output.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_config_conflicts_with_registers() {
        let parsed = Args::try_parse_from([
            "tacc", "prog.txt", "--registers", "2", "--config", "opts.json",
        ]);
        assert!(parsed.is_err());
    }
}
