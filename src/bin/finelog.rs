#![deny(unsafe_code)]

//! `finelog` runs one shorthand against a configured logger.
//!
//! ```text
//! finelog --level debug5 --show-level infofmt3 "{} files in {:.1f}s" 12 0.26
//! finelog --file run.log --mode w warningbanner "deploy finished"
//! finelog --list
//! ```
//!
//! Values are parsed as JSON when they can be (`12`, `[1, 2]`, `{"k": 1}`)
//! and passed as strings otherwise. Output on stdout goes through a buffer
//! so [`run_with`] can be driven from tests.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use finelog::finelog_sink::SharedBuffer;
use finelog::{
    Args, CoreLogger, FileMode, Level, Logger, LoggerOptions, PrettyBackend, Shorthand,
    StreamTarget, set_pretty_backend,
};
use serde_json::Value;

const LOGGER_NAME: &str = "finelog.cli";

#[derive(Parser, Debug)]
#[command(name = "finelog", version, about = "Emit a message through a finelog shorthand")]
struct Cli {
    /// Threshold level, by name (`info3`, `warn`, `LEVEL42`) or number.
    #[arg(long, default_value = "INFO")]
    level: String,

    /// Log file; repeat for several files.
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// File mode (`a`/`append` or `w`/`overwrite`), paired with `--file`.
    #[arg(long = "mode", value_name = "MODE")]
    modes: Vec<FileMode>,

    /// `{}` prefix placed before each message, e.g. `"[{name}] "`.
    #[arg(long)]
    format: Option<String>,

    /// strftime pattern or alias (`YMD HMS`) for `{asctime}`.
    #[arg(long)]
    time_format: Option<String>,

    /// Prefix messages with `LEVELNAME> `.
    #[arg(long)]
    show_level: bool,

    /// Console stream (`stdout` or `stderr`). Defaults to stdout when no
    /// file is given.
    #[arg(long)]
    stream: Vec<StreamTarget>,

    /// Pretty-print backend for the `pp` operations.
    #[arg(long)]
    backend: Option<PrettyBackend>,

    /// Print internal configuration diagnostics through `tracing`.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    trace_config: bool,

    /// List every shorthand and its level, then exit.
    #[arg(long, conflicts_with = "shorthand")]
    list: bool,

    /// Shorthand to run, e.g. `info3`, `debugfmt`, `errorbanner2`.
    #[arg(required_unless_present = "list")]
    shorthand: Option<String>,

    /// Arguments; the template comes first for the `fmt` variants.
    #[arg(allow_hyphen_values = true)]
    values: Vec<String>,
}

impl Cli {
    fn options(&self, console: &SharedBuffer) -> LoggerOptions {
        let mut options = LoggerOptions::new()
            .level(self.level.as_str())
            .show_level(self.show_level);
        options.file_name.clone_from(&self.files);
        options.file_mode.clone_from(&self.modes);
        options.format.clone_from(&self.format);
        options.time_format.clone_from(&self.time_format);

        for target in &self.stream {
            options = options.stream(match target {
                StreamTarget::Stdout => StreamTarget::from(console.clone()),
                other => other.clone(),
            });
        }
        if self.stream.is_empty() && self.files.is_empty() {
            options = options.stream(console.clone());
        }
        options
    }
}

/// Turns one command-line value into a log argument.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn list_shorthands(stdout: &mut impl Write) -> io::Result<()> {
    for shorthand in Shorthand::all() {
        let level = shorthand.level();
        writeln!(stdout, "{:<18} {:>3}  {level}", shorthand.name(), level.0)?;
    }
    Ok(())
}

fn run(cli: &Cli, stdout: &mut impl Write) -> finelog::Result<()> {
    if cli.list {
        return list_shorthands(stdout).map_err(finelog::Error::Write);
    }
    #[cfg(feature = "tracing")]
    if cli.trace_config {
        finelog::init_tracing();
    }
    if let Some(backend) = cli.backend {
        set_pretty_backend(backend);
    }

    let console = SharedBuffer::new();
    let logger = Logger::new(Arc::new(CoreLogger::detached(LOGGER_NAME, Level::INFO)));
    logger.configure(&cli.options(&console))?;
    let name = cli.shorthand.as_deref().unwrap_or_default();
    let args = cli
        .values
        .iter()
        .fold(Args::new(), |args, raw| args.arg(parse_value(raw)));
    let outcome = logger.dispatch(name, args);

    stdout.write_all(console.take().as_bytes())?;
    stdout.flush()?;
    outcome
}

/// Parses `args`, runs the requested shorthand and maps the outcome to an
/// exit code. Errors are reported on `stderr`.
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let rendered = err.render().to_string();
            let sink: &mut dyn Write = if err.use_stderr() { stderr } else { stdout };
            let _ = sink.write_all(rendered.as_bytes());
            return ExitCode::from(code);
        }
    };

    match run(&cli, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(stderr, "finelog: {err}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run_with(std::env::args_os(), &mut stdout, &mut stderr)
}
