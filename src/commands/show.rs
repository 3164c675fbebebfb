//! Show command implementation

use console::Style;

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::profile::ProfileRegistry;
use crate::transaction::load_document;
use crate::ui::display;

/// Run show command
pub fn run(args: &ShowArgs) -> Result<()> {
    let registry = ProfileRegistry::load()?;
    let profile = registry.require(&args.profile)?;
    let path = profile.resolve()?;

    let document = load_document(&path, &profile.name)?;

    println!("{}", Style::new().bold().yellow().apply_to(&profile.name));
    println!("  {} {}", Style::new().bold().apply_to("File:"), path.display());
    println!();
    display::display_fields(profile, &document);

    Ok(())
}
