// Command-line interface for blocklz.
//
// Subcommands: compress, decompress, inspect, config.
// Input defaults to stdin and output to stdout; explicit paths can be given
// as options or positionally.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::codec::{decoder, max_encoded_len};
use crate::format::{FORMAT_VERSION, MAX_INPUT_LEN, MAX_WINDOW, Token, TokenReader};
use crate::hash::config::{AUTO_HIGH_THRESHOLD, FAST, HIGH, Level, MIN_MATCH};
use crate::io::{compress_stream, decompress_stream};

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Byte size parsing (supports K, M, G suffixes)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024u64),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        Some(b'g' | b'G') => (&s[..s.len() - 1], 1024 * 1024 * 1024),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// LZ77 block compressor/decompressor.
#[derive(Parser, Debug)]
#[command(
    name = "blocklz",
    version,
    about = "LZ77 block compressor/decompressor",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress an input stream.
    Compress(CompressArgs),
    /// Decompress an input stream.
    Decompress(DecompressArgs),
    /// List the tokens of a compressed stream.
    Inspect(InspectArgs),
    /// Print format and level details.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    Fast,
    High,
    /// Fast below 64 KiB of input, high otherwise.
    Auto,
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Check/compute only (do not write output).
    #[arg(long = "check-only")]
    no_output: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Compression level.
    #[arg(long, short = 'l', value_enum, default_value_t = LevelArg::Auto)]
    level: LevelArg,

    #[command(flatten)]
    io: IoArgs,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Expected decompressed size, used to pre-size the output (supports K/M/G suffix).
    #[arg(long = "size-hint", value_parser = parse_byte_size)]
    size_hint: Option<u64>,

    #[command(flatten)]
    io: IoArgs,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Compressed input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Compress,
    Decompress,
    Inspect,
    Config,
}

struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    /// `None` means pick from the input size.
    level: Option<Level>,
    size_hint: Option<usize>,
    no_output: bool,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_level(arg: LevelArg) -> Option<Level> {
    match arg {
        LevelArg::Fast => Some(Level::Fast),
        LevelArg::High => Some(Level::High),
        LevelArg::Auto => None,
    }
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        level: None,
        size_hint: None,
        no_output: false,
        input_file: None,
        output_file: None,
    };

    let io = match cli.command {
        Cmd::Compress(args) => {
            opts.command = Command::Compress;
            opts.level = resolve_level(args.level);
            Some(args.io)
        }
        Cmd::Decompress(args) => {
            opts.command = Command::Decompress;
            opts.size_hint = args
                .size_hint
                .map(|h| usize::try_from(h).unwrap_or(usize::MAX));
            Some(args.io)
        }
        Cmd::Inspect(args) => {
            opts.command = Command::Inspect;
            opts.input_file = Some(args.input);
            None
        }
        Cmd::Config => None,
    };

    if let Some(io) = io {
        opts.use_stdout = io.stdout;
        opts.no_output = io.no_output;
        opts.input_file = io.input.or(io.input_pos);
        opts.output_file = io.output.or(io.output_pos);
    }

    opts
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("blocklz".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// I/O plumbing
// ---------------------------------------------------------------------------

fn open_input(opts: &Options) -> Result<Box<dyn Read>, String> {
    match &opts.input_file {
        Some(path) => File::open(path)
            .map(|f| Box::new(BufReader::with_capacity(BUF_SIZE, f)) as Box<dyn Read>)
            .map_err(|e| format!("input file: {}: {e}", path.display())),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, String> {
    if opts.no_output {
        return Ok(Box::new(io::sink()));
    }
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        ))),
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                return Err(format!(
                    "output file exists, use -f to overwrite: {}",
                    path.display()
                ));
            }
            File::create(path)
                .map(|f| Box::new(BufWriter::with_capacity(BUF_SIZE, f)) as Box<dyn Write>)
                .map_err(|e| format!("output file: {}: {e}", path.display()))
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => log::warn!("failed to serialize stats: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_compress(opts: &Options) -> i32 {
    let (reader, writer) = match open_input(opts).and_then(|r| Ok((r, open_output(opts)?))) {
        Ok(pair) => pair,
        Err(msg) => {
            eprintln!("blocklz: {msg}");
            return 1;
        }
    };

    let stats = match compress_stream(reader, writer, opts.level) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("blocklz: compress error: {e}");
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "blocklz: compress ({}): input size: {}, output size: {}, ratio: {:.3}",
            stats.level,
            stats.input_size,
            stats.output_size,
            stats.ratio()
        );
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "compress",
            "level": stats.level.name(),
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "ratio": stats.ratio(),
        }));
    }

    0
}

fn cmd_decompress(opts: &Options) -> i32 {
    let (reader, writer) = match open_input(opts).and_then(|r| Ok((r, open_output(opts)?))) {
        Ok(pair) => pair,
        Err(msg) => {
            eprintln!("blocklz: {msg}");
            return 1;
        }
    };

    let stats = match decompress_stream(reader, writer, opts.size_hint) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("blocklz: decompress error: {e}");
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "blocklz: decompress: input size: {}, output size: {}, tokens: {}",
            stats.input_size, stats.output_size, stats.tokens
        );
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "decompress",
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "tokens": stats.tokens,
        }));
    }

    0
}

fn cmd_inspect(opts: &Options) -> i32 {
    let Some(path) = &opts.input_file else {
        eprintln!("blocklz: inspect: no input file");
        return 1;
    };
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("blocklz: input file: {}: {e}", path.display());
            return 1;
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(BUF_SIZE, stdout.lock());
    let mut reader = TokenReader::new(&data);
    let mut literals = 0u64;
    let mut backrefs = 0u64;
    let mut decoded = 0u64;

    loop {
        let offset = reader.offset();
        let token = match reader.next() {
            None => break,
            Some(Ok(t)) => t,
            Some(Err(e)) => {
                let _ = out.flush();
                eprintln!("blocklz: inspect: {e}");
                return 1;
            }
        };
        let line = match token {
            Token::Literal(bytes) => {
                literals += 1;
                format!("{offset:>10}  {decoded:>10}  LIT  len={}", bytes.len())
            }
            Token::BackRef { distance, length } => {
                backrefs += 1;
                format!("{offset:>10}  {decoded:>10}  REF  dist={distance} len={length}")
            }
        };
        decoded += token.decoded_len() as u64;
        if !opts.quiet && writeln!(out, "{line}").is_err() {
            return 1;
        }
    }
    if out.flush().is_err() {
        return 1;
    }

    // The parser does not know how much output exists; the decoder does.
    if let Err(e) = decoder::decoded_len(&data) {
        eprintln!("blocklz: inspect: {e}");
        return 1;
    }

    if !opts.quiet {
        eprintln!(
            "blocklz: {} bytes, {literals} literal runs, {backrefs} back-references, decodes to {decoded} bytes",
            data.len()
        );
    }
    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "inspect",
            "input_size": data.len(),
            "literal_runs": literals,
            "backrefs": backrefs,
            "output_size": decoded,
        }));
    }

    0
}

fn cmd_config(opts: &Options) -> i32 {
    if opts.json_output {
        let profiles: Vec<_> = [FAST, HIGH]
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "window": p.window,
                    "hash_bits": p.hash_bits,
                    "chain_depth": p.chain_depth,
                    "insert_all": p.insert_all,
                    "long_enough": p.long_enough,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "format_version": FORMAT_VERSION,
            "min_match": MIN_MATCH,
            "max_window": MAX_WINDOW,
            "max_input": MAX_INPUT_LEN,
            "profiles": profiles,
        }));
        return 0;
    }

    println!("blocklz version {}", env!("CARGO_PKG_VERSION"));
    println!("Format version: {FORMAT_VERSION}");
    println!("Minimum match: {MIN_MATCH}");
    println!("Maximum window: {MAX_WINDOW}");
    println!("Maximum input: {MAX_INPUT_LEN}");
    println!(
        "Worst-case output for 1 MiB: {}",
        max_encoded_len(1 << 20)
    );
    println!("Auto level: high at >= {AUTO_HIGH_THRESHOLD} bytes");
    for p in [FAST, HIGH] {
        println!(
            "Level {}: window={} hash_bits={} chain_depth={} insert_all={} long_enough={}",
            p.name, p.window, p.hash_bits, p.chain_depth, p.insert_all, p.long_enough
        );
    }
    0
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

pub fn run() -> ! {
    let cli = Cli::parse();

    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut opts = resolve_options(cli);

    if opts.use_stdout && !opts.quiet {
        if let Some(path) = opts.output_file.take() {
            eprintln!(
                "blocklz: warning: -c option overrides output filename: {}",
                path.display()
            );
        }
    }

    let exit_code = match opts.command {
        Command::Compress => cmd_compress(&opts),
        Command::Decompress => cmd_decompress(&opts),
        Command::Inspect => cmd_inspect(&opts),
        Command::Config => cmd_config(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
