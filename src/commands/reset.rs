//! Reset command implementation
//!
//! Picks the target application, asks for confirmation and runs the reset
//! transaction. A failed reset becomes an error so the process exits non-zero.

use std::io::IsTerminal;

use crate::cli::ResetArgs;
use crate::error::{Result, ResetterError};
use crate::profile::{ProfileRegistry, TargetProfile};
use crate::transaction::reset_profile;
use crate::ui::{display, prompt};

/// Run reset command
pub fn run(args: ResetArgs, verbose: bool) -> Result<()> {
    let registry = ProfileRegistry::load()?;
    let interactive = std::io::stdin().is_terminal();

    let Some(profile) = choose_profile(&registry, args.profile.as_deref(), interactive)? else {
        println!("Reset cancelled.");
        return Ok(());
    };

    if !args.yes {
        if !interactive {
            return Err(ResetterError::ConfirmationRequired);
        }
        if !prompt::confirm_reset(profile)? {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    let result = reset_profile(profile);
    display::display_reset_result(&result, verbose);

    if result.succeeded {
        Ok(())
    } else {
        Err(ResetterError::ResetFailed {
            message: result.message,
        })
    }
}

fn choose_profile<'a>(
    registry: &'a ProfileRegistry,
    requested: Option<&str>,
    interactive: bool,
) -> Result<Option<&'a TargetProfile>> {
    match requested {
        Some(id) => registry.require(id).map(Some),
        None if interactive => prompt::select_profile(registry.all()),
        None => Err(ResetterError::ProfileRequired),
    }
}
