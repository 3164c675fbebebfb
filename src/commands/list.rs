//! List command implementation
//!
//! Lists every known application with its storage file and whether the file
//! is present on this machine.

use console::Style;

use crate::error::Result;
use crate::profile::{ProfileRegistry, config_home};
use crate::ui::display;

/// Run list command
pub fn run() -> Result<()> {
    let registry = ProfileRegistry::load()?;
    let home = config_home()?;

    println!(
        "{} ({}):",
        Style::new().bold().apply_to("Supported applications"),
        registry.all().len()
    );
    println!();

    for profile in registry.all() {
        display::display_profile(profile, &profile.resolve_in(&home));
        println!();
    }

    Ok(())
}
