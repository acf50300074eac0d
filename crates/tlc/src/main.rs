//! tlc - scanner and static checker for the toy language
//!
//! Usage: tlc [-v] lex <FILE>
//!        tlc [-v] check <PROGRAM.json> [--source <FILE>]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand};
use log::LevelFilter;
use toy_lang::{AnalyzerConfig, CompileError, FrontendConfig, Pipeline, ReturnCheck};

#[derive(ClapParser, Debug)]
#[command(name = "tlc")]
#[command(author = "TLC Team")]
#[command(version)]
#[command(about = "Scanner and static checker for a small imperative toy language", long_about = None)]
struct Args {
    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a source file and print its tokens
    Lex {
        /// Source file
        file: PathBuf,

        /// Dump tokens with their spans (for debugging)
        #[arg(long)]
        dump_tokens: bool,
    },

    /// Check a JSON node program
    Check {
        /// Node program produced by a parser
        program: PathBuf,

        /// Original source, used to point diagnostics at lines
        #[arg(long)]
        source: Option<PathBuf>,

        /// Accept functions whose every path returns, not only direct returns
        #[arg(long)]
        return_paths: bool,

        /// Reject break/continue outside of loops
        #[arg(long)]
        strict_jumps: bool,

        /// Dump AST (for debugging)
        #[arg(long)]
        dump_ast: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Compile errors were already rendered by the reporter
            if e.downcast_ref::<CompileError>().is_none() {
                eprintln!("error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    match &args.command {
        Command::Lex { file, dump_tokens } => {
            let source = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;

            let mut pipeline = Pipeline::new(FrontendConfig {
                dump_tokens: *dump_tokens,
                ..FrontendConfig::default()
            });
            let tokens = pipeline.scan_source(&file.display().to_string(), &source)?;
            for token in &tokens {
                println!("{}\t{}", token.position, token.kind);
            }
        }

        Command::Check {
            program,
            source,
            return_paths,
            strict_jumps,
            dump_ast,
        } => {
            let json = std::fs::read_to_string(program)
                .with_context(|| format!("failed to read {}", program.display()))?;
            let source = match source {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Some((path.display().to_string(), text))
                }
                None => None,
            };

            let config = FrontendConfig {
                dump_ast: *dump_ast,
                analyzer: AnalyzerConfig {
                    return_check: if *return_paths {
                        ReturnCheck::AllPaths
                    } else {
                        ReturnCheck::DirectStatements
                    },
                    require_loop_for_jumps: *strict_jumps,
                },
                ..FrontendConfig::default()
            };

            let mut pipeline = Pipeline::new(config);
            pipeline.check_json(
                &program.display().to_string(),
                &json,
                source.as_ref().map(|(name, text)| (name.as_str(), text.as_str())),
            )?;

            if args.verbose {
                eprintln!("{}: ok", program.display());
            }
        }
    }

    Ok(())
}
