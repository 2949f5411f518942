// Command-line entry point for strictc.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::io;
use std::path::Path;
use strictc::application::AnalyzeUsecase;
use strictc::infrastructure::args::ForwardedArgs;
use strictc::infrastructure::clang_runner;
use strictc::infrastructure::logging::init_logging;
use strictc::infrastructure::{ClangAstProvider, StreamSink};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Report every place where two differently spelled C types are combined",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Compiler used to parse the sources and to discover system include directories
    #[arg(long, env = "STRICTC_CLANG", default_value = "clang")]
    clang: String,

    /// Do not prefix the compiler arguments with the compiler's system include directories
    #[arg(long)]
    no_system_includes: bool,

    /// Print the parsed translation units as indented trees instead of checking them
    #[arg(long)]
    dump_ast: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Compiler arguments: `.c` sources, `-I` directories and any other flags, forwarded verbatim
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    compiler_args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let mut forwarded = ForwardedArgs::from_args(cli.compiler_args);
    if !cli.no_system_includes {
        let system_includes = clang_runner::discover_system_includes(&cli.clang)?;
        forwarded = forwarded.with_system_includes(&system_includes);
    }

    let provider = ClangAstProvider::new(&cli.clang);
    let usecase = AnalyzeUsecase { provider: &provider };

    let result = if cli.dump_ast {
        usecase.dump(&forwarded.clang_args).map(|dump| print!("{}", dump))
    } else {
        let mut sink = StreamSink::new(io::stderr().lock());
        usecase
            .run(&forwarded.include_dirs(), &forwarded.clang_args, &mut sink)
            .map(|report| {
                tracing::info!(
                    units = report.units,
                    functions = report.functions,
                    diagnostics = report.diagnostics,
                    "analysis completed"
                );
            })
    };

    if let Err(e) = clang_runner::remove_stray_object(Path::new(".")) {
        tracing::warn!("{:#}", e);
    }

    // Exit status reflects process errors only; mismatches never fail the run.
    result
}
