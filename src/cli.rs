use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::types::{ClassifierConfig, SimplifyErrorPolicy, UnknownCodePolicy};
use crate::verdict::decoder::OutputFormat;

/// Which binary is running.
///
/// The compat binary exposes both reports as subcommands; the dedicated
/// binaries take their input path as a bare positional argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CliMode {
    Compat,
    Verdicts,
    Formulas,
}

#[derive(Parser)]
#[command(name = "oraclebox", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a verdict matrix result file into per-slot report lines
    Verdicts(VerdictsArgs),
    /// Classify the formula queries of every benchmark directory under a root
    Formulas(FormulasArgs),
}

#[derive(Parser)]
#[command(name = "verdicts", author, version, about = "Decode a verdict matrix result file")]
struct VerdictsCli {
    #[command(flatten)]
    args: VerdictsArgs,
}

#[derive(Parser)]
#[command(name = "formulas", author, version, about = "Classify benchmark formula queries")]
struct FormulasCli {
    #[command(flatten)]
    args: FormulasArgs,
}

#[derive(Args)]
struct VerdictsArgs {
    /// Path to the result file (one 18-field record per line)
    file: PathBuf,
    /// Handling of verdict codes outside the known alphabet
    #[arg(long, value_enum, default_value = "ignore")]
    unknown_codes: UnknownCodesArg,
    /// Emit one JSON object per line instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FormulasArgs {
    /// Root directory with one subdirectory per benchmark model
    root: PathBuf,
    /// Simplify each formula before classifying (off by default; can be
    /// very time consuming)
    #[arg(long)]
    simplify: bool,
    /// Wall-clock budget for one simplification attempt, in seconds
    #[arg(long, default_value_t = 60)]
    deadline_secs: u64,
    /// Handling of simplification failures
    #[arg(long, value_enum, default_value = "warn")]
    simplify_errors: SimplifyErrorsArg,
    /// Emit one JSON object per line instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnknownCodesArg {
    Ignore,
    Warn,
    Fail,
}

impl From<UnknownCodesArg> for UnknownCodePolicy {
    fn from(arg: UnknownCodesArg) -> Self {
        match arg {
            UnknownCodesArg::Ignore => UnknownCodePolicy::Ignore,
            UnknownCodesArg::Warn => UnknownCodePolicy::Warn,
            UnknownCodesArg::Fail => UnknownCodePolicy::Fail,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SimplifyErrorsArg {
    Warn,
    Ignore,
    Fail,
}

impl From<SimplifyErrorsArg> for SimplifyErrorPolicy {
    fn from(arg: SimplifyErrorsArg) -> Self {
        match arg {
            SimplifyErrorsArg::Warn => SimplifyErrorPolicy::Warn,
            SimplifyErrorsArg::Ignore => SimplifyErrorPolicy::Ignore,
            SimplifyErrorsArg::Fail => SimplifyErrorPolicy::Fail,
        }
    }
}

fn output_format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    }
}

pub fn run(mode: CliMode) -> Result<()> {
    env_logger::init();

    let command = match mode {
        CliMode::Compat => Cli::parse().command,
        CliMode::Verdicts => Commands::Verdicts(VerdictsCli::parse().args),
        CliMode::Formulas => Commands::Formulas(FormulasCli::parse().args),
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match command {
        Commands::Verdicts(args) => {
            crate::report::verdicts::write_report(
                &args.file,
                &mut writer,
                args.unknown_codes.into(),
                output_format(args.json),
            )?;
        }
        Commands::Formulas(args) => {
            let config = ClassifierConfig {
                enable_simplification: args.simplify,
                deadline: Duration::from_secs(args.deadline_secs),
                simplify_errors: args.simplify_errors.into(),
            };
            crate::report::formulas::write_report(
                &args.root,
                &mut writer,
                &config,
                output_format(args.json),
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}
