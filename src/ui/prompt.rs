//! Interactive prompts
//!
//! Stands in for the dialogs of a desktop shell: choose an application,
//! then confirm before anything is written.

use inquire::{Confirm, Select};

use crate::error::{Result, ResetterError};
use crate::profile::TargetProfile;

/// Pick a profile from the list; `None` if the user cancels
pub fn select_profile(profiles: &[TargetProfile]) -> Result<Option<&TargetProfile>> {
    if profiles.is_empty() {
        return Ok(None);
    }

    let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();

    let Some(selection) = Select::new("Select application to reset", names)
        .with_starting_cursor(0)
        .with_page_size(10)
        .without_filtering()
        .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
        .raw_prompt_skippable()?
    else {
        return Ok(None);
    };

    Ok(profiles.get(selection.index))
}

/// Ask before resetting; defaults to no
pub fn confirm_reset(profile: &TargetProfile) -> Result<bool> {
    Confirm::new(&format!("Do you want to reset the {} IDs?", profile.name))
        .with_default(false)
        .with_help_message("This will reset IDs and cannot be undone.")
        .prompt()
        .map_err(|e| ResetterError::IoError {
            message: format!("Failed to read confirmation: {e}"),
            source: Some(Box::new(e)),
        })
}
