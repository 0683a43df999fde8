//! `msgpack-unpack`: decode MessagePack (file or stdin) to JSON (stdout).

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use msgunpack::cli::{unpack, CliError};
use msgunpack::{DecodeOptions, DEFAULT_MAX_DEPTH};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "msgpack-unpack",
    version,
    about = "Decode one MessagePack value to JSON"
)]
struct Args {
    /// Input file. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Maximum nesting of arrays and maps.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    debug!(input = ?args.input, "reading input");
    let bytes = read_input(args.input.as_ref())?;
    let options = DecodeOptions::default().with_max_depth(args.max_depth);
    let json = unpack(&bytes, &options, !args.compact)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read(p),
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
