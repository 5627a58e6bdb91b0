//! Interactive rolodex shell.
//!
//! # Responsibility
//! - Wire configuration, logging and SQLite persistence around the engine.
//! - Read one command per line and print its feedback.
//!
//! # Invariants
//! - The directory is saved after every command that changed data.

mod render;

use clap::Parser;
use log::{error, info};
use rolodex_core::command::usage::ALL_USAGES;
use rolodex_core::{
    default_log_level, init_logging, open_db, parse_command, CommandEngine, CommandRequest,
    ConfigError, DbError, DirectoryRepository, EngineConfig, LogConfig, LogLevel,
    LoggingError, RepoError, SqliteDirectoryRepository,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "rolodex", version, about = "Contact directory with tags and client bookings")]
struct Args {
    /// SQLite file holding the directory.
    #[arg(long, default_value = "rolodex.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rotating log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Never auto-pick a single partial name match.
    #[arg(long)]
    strict_names: bool,

    /// Write the stored directory as JSON to this path and exit.
    #[arg(long, value_name = "PATH")]
    export_json: Option<PathBuf>,
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Json(serde_json::Error),
    Io(io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "database error: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "json export failed: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("rolodex: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if let Some(log_dir) = &args.log_dir {
        let level = match &args.log_level {
            Some(level) => level.parse::<LogLevel>()?,
            None => default_log_level(),
        };
        init_logging(&LogConfig::new(level, log_dir)?)?;
    }

    let mut conn = open_db(&args.db)?;
    let mut repo = SqliteDirectoryRepository::new(&mut conn);

    if let Some(path) = &args.export_json {
        let records = repo.load_records()?;
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(path, json)?;
        info!(
            "event=directory_export module=cli status=ok persons={}",
            records.persons.len()
        );
        println!("Exported {} person(s) to {}", records.persons.len(), path.display());
        return Ok(());
    }

    let config = if args.strict_names {
        EngineConfig::strict()
    } else {
        EngineConfig::default()
    };
    let mut engine = CommandEngine::new(repo.load_directory()?, config);
    info!(
        "event=session_start module=cli status=ok persons={} partial_match={}",
        engine.directory().len(),
        config.partial_match.as_str()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "help" => {
                for usage in ALL_USAGES {
                    writeln!(stdout, "{}\n{usage}\n", usage.command_word)?;
                }
                continue;
            }
            _ => {}
        }

        let request = match parse_command(&line) {
            Ok(request) => request,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };
        match engine.execute(&request) {
            Ok(outcome) => {
                writeln!(stdout, "{}", outcome.feedback)?;
                if outcome.changed {
                    if let Err(err) = repo.save_directory(engine.directory()) {
                        error!("event=directory_save module=cli status=error error={err}");
                        writeln!(stdout, "Could not save the directory: {err}")?;
                    }
                }
                if matches!(request, CommandRequest::Find(_) | CommandRequest::List) {
                    render::write_displayed(&mut stdout, engine.directory(), engine.clock())?;
                }
            }
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }

    info!("event=session_end module=cli status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn defaults_use_local_sqlite_file() {
        let args = Args::try_parse_from(["rolodex"]).unwrap();
        assert_eq!(args.db.to_str(), Some("rolodex.sqlite3"));
        assert!(args.log_dir.is_none());
        assert!(!args.strict_names);
    }

    #[test]
    fn export_and_strict_flags_parse() {
        let args = Args::try_parse_from([
            "rolodex",
            "--db",
            "/tmp/team.sqlite3",
            "--strict-names",
            "--export-json",
            "/tmp/team.json",
        ])
        .unwrap();
        assert!(args.strict_names);
        assert_eq!(
            args.export_json.as_deref().and_then(|path| path.to_str()),
            Some("/tmp/team.json")
        );
    }
}
