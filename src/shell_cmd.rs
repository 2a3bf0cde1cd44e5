//! Interactive session loop.
//!
//! Reads one command per line, executes it against the [`Session`] and renders
//! the outcome. Input errors are printed as warnings and the loop carries on;
//! system errors follow the configured [`ErrorPolicy`].

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::console::Console;
use crate::input::{Outcome, execute};
use crate::storage::Session;
use crate::{PublishError, PublishResult};

/// What to do when a command fails on the filesystem or a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// End the session and return the error
    #[default]
    Abort,
    /// Print the error as a warning and read the next line
    Continue,
}

#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub policy: ErrorPolicy,
    pub console: Console,
}

impl Default for ShellOptions {
    fn default() -> Self {
        ShellOptions {
            policy: ErrorPolicy::default(),
            console: Console::new(false),
        }
    }
}

/// Run the shell until `q`, end of input, or an aborting error.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    options: &ShellOptions,
) -> PublishResult<()> {
    let console = &options.console;
    console.write_header(out)?;
    console.write_help_menu(out)?;
    console.write_prompt(out)?;

    for line in input.lines() {
        let line = line?;
        match execute(session, &line) {
            Ok(Outcome::Quit) => {
                console.write_exit(out)?;
                return Ok(());
            }
            Ok(outcome) => console.render(out, &outcome)?,
            Err(PublishError::Input(e)) => {
                warn!(input = %line, "{e}");
                console.warn(out, &e)?;
            }
            Err(PublishError::System(e)) if options.policy == ErrorPolicy::Continue => {
                warn!(input = %line, error = %e, "command failed");
                console.warn(out, &e)?;
            }
            Err(e) => return Err(e),
        }
        console.write_prompt(out)?;
    }

    info!("end of input");
    Ok(())
}
