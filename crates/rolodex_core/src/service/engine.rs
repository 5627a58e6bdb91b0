//! Command engine: parse, dispatch and execute one command line.
//!
//! # Responsibility
//! - Own the current directory snapshot and swap it only on success.
//! - Route every `CommandRequest` variant through one exhaustive match.
//! - Emit one `command_execute` event per command.
//!
//! # Invariants
//! - A failed command leaves the current snapshot untouched.
//! - The engine performs no I/O besides logging; persistence is the caller's job.

use crate::command::error::CommandError;
use crate::command::parser::parse_command;
use crate::command::request::CommandRequest;
use crate::config::EngineConfig;
use crate::model::directory::Directory;
use crate::service::clock::{Clock, SystemClock};
use crate::service::commands::{
    add, book, clear, delete, edit, find, list, Execution, ExecutionContext,
};
use crate::service::resolver::NameResolver;
use log::{info, warn};
use std::time::Instant;

/// What the caller shows and whether it must persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub feedback: String,
    pub changed: bool,
}

/// Single-writer engine over one directory.
pub struct CommandEngine<C: Clock = SystemClock> {
    directory: Directory,
    resolver: NameResolver,
    clock: C,
}

impl CommandEngine<SystemClock> {
    pub fn new(directory: Directory, config: EngineConfig) -> Self {
        Self::with_clock(directory, config, SystemClock)
    }
}

impl<C: Clock> CommandEngine<C> {
    pub fn with_clock(directory: Directory, config: EngineConfig, clock: C) -> Self {
        Self {
            directory,
            resolver: NameResolver::new(config.partial_match),
            clock,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_directory(self) -> Directory {
        self.directory
    }

    /// Parses and executes one raw command line.
    pub fn execute_line(&mut self, line: &str) -> Result<CommandOutcome, CommandError> {
        let request = parse_command(line).inspect_err(|err| {
            warn!(
                "event=command_parse module=engine status=error kind={}",
                err.kind()
            );
        })?;
        self.execute(&request)
    }

    /// Executes an already parsed request.
    pub fn execute(&mut self, request: &CommandRequest) -> Result<CommandOutcome, CommandError> {
        let started_at = Instant::now();
        let command = request.command_word();

        match run(&self.directory, request, &self.resolver, self.clock.now()) {
            Ok(execution) => {
                info!(
                    "event=command_execute module=engine command={command} status=ok changed={} duration_ms={}",
                    execution.changed,
                    started_at.elapsed().as_millis()
                );
                self.directory = execution.directory;
                Ok(CommandOutcome {
                    feedback: execution.feedback,
                    changed: execution.changed,
                })
            }
            Err(err) => {
                warn!(
                    "event=command_execute module=engine command={command} status=error kind={} duration_ms={}",
                    err.kind(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

/// Dispatches one request against `directory`.
pub fn run(
    directory: &Directory,
    request: &CommandRequest,
    resolver: &NameResolver,
    now: chrono::NaiveDateTime,
) -> Result<Execution, CommandError> {
    let ctx = ExecutionContext { resolver, now };
    match request {
        CommandRequest::Add(request) => add::execute(directory, request),
        CommandRequest::Delete(request) => delete::execute(directory, request, ctx),
        CommandRequest::Book(request) => book::execute(directory, request),
        CommandRequest::Find(request) => Ok(find::execute(directory, request)),
        CommandRequest::Clear { force } => Ok(clear::execute(directory, *force)),
        CommandRequest::Edit(request) => edit::execute(directory, request, ctx),
        CommandRequest::List => Ok(list::execute(directory)),
    }
}
