use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use regsnap_core::catalog::Architecture;
use regsnap_core::layout::{self, NativeLayout};
use regsnap_core::{AddressTranslator, NativeTranslator, ThreadContext};
use regsnap_utils::{debug, info, init_logging, init_logging_with_level, log_format_from_env, LogLevel, LoggingError};

/// Inspect register catalogs and decode raw register dumps.
#[derive(Parser, Debug)]
#[command(name = "regsnap")]
#[command(version)]
#[command(about = "Inspect register catalogs and decode raw register dumps", long_about = None)]
struct Cli
{
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// List supported architectures
    Archs,
    /// Print the register table of an architecture
    Names
    {
        /// Architecture name (amd64, x86, aarch64, or an alias like x86_64/arm64)
        arch: Architecture,
    },
    /// List native register-dump layouts
    Layouts,
    /// Populate a thread context from a raw register dump and print it
    Decode
    {
        /// Layout of the dump (see `regsnap layouts`)
        #[arg(short, long)]
        layout: String,
        /// File holding the raw register words
        file: PathBuf,
    },
}

fn main()
{
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.log_level) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    if let Err(e) = run_command(cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn setup_logging(level: Option<LogLevel>) -> Result<(), LoggingError>
{
    match level {
        Some(level) => init_logging_with_level(level, log_format_from_env()?),
        None => init_logging(),
    }
}

fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>>
{
    match command {
        Commands::Archs => {
            println!("{:<10} {:>9} {:>5}  pc/sp/fp", "arch", "registers", "word");
            for arch in Architecture::ALL {
                let catalog = arch.catalog();
                println!(
                    "{:<10} {:>9} {:>5}  {}/{}/{}",
                    arch.name(),
                    catalog.register_count(),
                    catalog.word_size(),
                    catalog.register_name(catalog.pc_index())?,
                    catalog.register_name(catalog.sp_index())?,
                    catalog.register_name(catalog.fp_index())?,
                );
            }
            Ok(())
        }
        Commands::Names { arch } => {
            let catalog = arch.catalog();
            for (index, name) in catalog.names().iter().enumerate() {
                let role = match index {
                    i if i == catalog.pc_index() => "  (pc)",
                    i if i == catalog.sp_index() => "  (sp)",
                    i if i == catalog.fp_index() => "  (fp)",
                    _ => "",
                };
                println!("{index:>3}  {name}{role}");
            }
            Ok(())
        }
        Commands::Layouts => {
            println!("{:<16} {:<8} {:>6} {:>6}", "layout", "arch", "words", "bytes");
            for layout in &layout::ALL {
                println!(
                    "{:<16} {:<8} {:>6} {:>6}",
                    layout.name(),
                    layout.catalog().architecture(),
                    layout.slot_count(),
                    layout.byte_len()
                );
            }
            Ok(())
        }
        Commands::Decode { layout, file } => decode(NativeLayout::by_name(&layout)?, &file),
    }
}

fn decode(layout: &NativeLayout, file: &Path) -> Result<(), Box<dyn std::error::Error>>
{
    info!("Decoding {} as {}", file.display(), layout.name());
    let bytes = std::fs::read(file)?;
    debug!(bytes = bytes.len(), expected = layout.byte_len(), "read register dump");

    let mut ctx = ThreadContext::new(layout.catalog());
    ctx.populate(layout, &bytes)?;
    print!("{ctx}");

    let catalog = ctx.catalog();
    let translator = NativeTranslator::for_catalog(catalog);
    println!();
    println!("pc = {}", translator.register_as_address(&ctx, catalog.pc_index())?);
    println!("sp = {}", translator.register_as_address(&ctx, catalog.sp_index())?);
    println!("fp = {}", translator.register_as_address(&ctx, catalog.fp_index())?);
    Ok(())
}
