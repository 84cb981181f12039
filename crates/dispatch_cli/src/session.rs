//! Read-eval-print loop over a [`DispatchEngine`].

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use dispatch_core::fleet_store::save_fleet;
use dispatch_core::{CabId, DispatchEngine, DispatchError, NodeId, RideId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::commands::{parse_line, ReplCommand};
use crate::render::{self, ClosureKind, OutputFormat};

pub const PROMPT: &str = "dispatch> ";

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

pub struct Session {
    engine: DispatchEngine,
    /// Where the fleet is saved after every change; `None` keeps it in memory only.
    fleet_file: Option<PathBuf>,
    format: OutputFormat,
}

impl Session {
    pub fn new(engine: DispatchEngine, fleet_file: Option<PathBuf>, format: OutputFormat) -> Self {
        Self {
            engine,
            fleet_file,
            format,
        }
    }

    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }

    /// Read commands until `exit` or end of input. The prompt is only written when
    /// `interactive` is set.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        interactive: bool,
    ) -> io::Result<()> {
        let prompt = |out: &mut W| -> io::Result<()> {
            if interactive {
                write!(out, "{PROMPT}")?;
                out.flush()?;
            }
            Ok(())
        };

        prompt(out)?;
        for line in input.lines() {
            let line = line?;
            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if self.execute(command, out)? == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(error) => self.report_usage(out, &error)?,
            }
            prompt(out)?;
        }
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> io::Result<Flow> {
        debug!(?command, "executing");
        match command {
            ReplCommand::AddCab {
                id,
                location,
                driver,
            } => {
                let driver = driver.join(" ");
                let added = self
                    .engine
                    .add_cab(CabId(id), driver, NodeId(location))
                    .cloned();
                match added {
                    Ok(cab) => {
                        let text = render::cab_added_message(&cab);
                        let body = self.render(&cab, text);
                        writeln!(out, "{body}")?;
                        self.persist(out)?;
                    }
                    Err(error) => self.report(out, &error)?,
                }
            }
            ReplCommand::Cabs => {
                let cabs = self.engine.snapshot().cabs;
                let body = self.render(&cabs, render::cabs_table(&cabs));
                writeln!(out, "{body}")?;
            }
            ReplCommand::Book { pickup } => match self.engine.book_ride(NodeId(pickup)) {
                Ok(outcome) => {
                    let text = render::booking_message(&outcome, self.engine.fleet());
                    writeln!(out, "{}", self.render(&outcome, text))?;
                    self.persist(out)?;
                }
                Err(error) => self.report(out, &error)?,
            },
            ReplCommand::Active => {
                let rides = self.engine.snapshot().active_rides;
                let body = self.render(&rides, render::active_rides_table(&rides));
                writeln!(out, "{body}")?;
            }
            ReplCommand::End { ride, drop } => {
                match self.engine.end_ride(RideId(ride), NodeId(drop)) {
                    Ok(closure) => {
                        let fleet = self.engine.fleet();
                        let text = render::closure_message(&closure, ClosureKind::Ended, fleet);
                        writeln!(out, "{}", self.render(&closure, text))?;
                        self.persist(out)?;
                    }
                    Err(error) => self.report(out, &error)?,
                }
            }
            ReplCommand::Completed => {
                let rides = self.engine.ledger().completed_rides();
                let body = self.render(&rides, render::completed_rides_table(rides));
                writeln!(out, "{body}")?;
            }
            ReplCommand::Cancel { ride } => match self.engine.cancel_ride(RideId(ride)) {
                Ok(closure) => {
                    let fleet = self.engine.fleet();
                    let text = render::closure_message(&closure, ClosureKind::Canceled, fleet);
                    writeln!(out, "{}", self.render(&closure, text))?;
                    self.persist(out)?;
                }
                Err(error) => self.report(out, &error)?,
            },
            ReplCommand::Queue => {
                let backlog = self.engine.snapshot().backlog;
                let body = self.render(&backlog, render::backlog_table(&backlog));
                writeln!(out, "{body}")?;
            }
            ReplCommand::Reset => {
                let summary = self.engine.reset_availability();
                writeln!(out, "{}", self.render(&summary, render::reset_message(&summary)))?;
                self.persist(out)?;
            }
            ReplCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Save the fleet file. A failed save is reported but leaves the session running.
    pub fn persist<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(path) = &self.fleet_file else {
            return Ok(());
        };
        if let Err(error) = save_fleet(path, self.engine.fleet()) {
            warn!(%error, "fleet not saved");
            writeln!(out, "warning: {error}")?;
        }
        Ok(())
    }

    fn render<T: Serialize>(&self, value: &T, text: String) -> String {
        match self.format {
            OutputFormat::Table => text,
            OutputFormat::Json => render::to_json(value),
        }
    }

    /// Help and usage errors from the command parser. Tables get clap's own rendering.
    fn report_usage<W: Write>(&self, out: &mut W, error: &clap::Error) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => write!(out, "{error}"),
            OutputFormat::Json => {
                let message = error.to_string();
                let body = ErrorBody {
                    error: message.trim_end(),
                };
                writeln!(out, "{}", render::to_json(&body))
            }
        }
    }

    fn report<W: Write>(&self, out: &mut W, error: &DispatchError) -> io::Result<()> {
        debug!(%error, "command rejected");
        let message = error.to_string();
        let body = self.render(&ErrorBody { error: &message }, render::error_message(error));
        writeln!(out, "{body}")
    }
}
