//! Display functions for profiles and reset results

use std::path::Path;

use console::Style;

use crate::profile::TargetProfile;
use crate::transaction::{ConfigDocument, ResetResult};

/// Render a reset outcome as a single status line
///
/// Failures are not printed here; the command turns them into an error so
/// the process exits non-zero.
pub fn display_reset_result(result: &ResetResult, verbose: bool) {
    if result.succeeded {
        println!(
            "{} {}",
            Style::new().green().bold().apply_to("✓"),
            Style::new().green().apply_to(&result.message)
        );
        if verbose {
            println!("  {} {}", Style::new().bold().apply_to("File:"), result.path.display());
        }
    } else if verbose {
        eprintln!("  {} {}", Style::new().bold().apply_to("File:"), result.path.display());
        if let Some(kind) = result.failure_kind {
            eprintln!("  {} {:?}", Style::new().bold().apply_to("Failure:"), kind);
        }
        if let Some(ref detail) = result.detail {
            eprintln!("  {} {}", Style::new().bold().apply_to("Cause:"), detail);
        }
    }
}

/// Display one profile with its storage file and whether it exists
pub fn display_profile(profile: &TargetProfile, path: &Path) {
    let status = if path.is_file() {
        Style::new().green().apply_to("found")
    } else {
        Style::new().dim().apply_to("not found")
    };

    println!(
        "  {} ({}) {}",
        Style::new().bold().yellow().apply_to(&profile.name),
        profile.id,
        status
    );
    println!("    {} {}", Style::new().bold().apply_to("File:"), path.display());
}

/// Display the current values of a profile's identifier fields
pub fn display_fields(profile: &TargetProfile, document: &ConfigDocument) {
    let width = profile
        .field_rules
        .iter()
        .map(|rule| rule.key.len())
        .max()
        .unwrap_or(0);

    for rule in &profile.field_rules {
        let (value, expected) = match document.get(&rule.key) {
            Some(serde_json::Value::String(s)) => (s.clone(), rule.strategy.matches(s)),
            Some(other) => (other.to_string(), false),
            None => (Style::new().dim().apply_to("<unset>").to_string(), false),
        };
        let marker = if expected {
            Style::new().green().apply_to("✓")
        } else {
            Style::new().yellow().apply_to("!")
        };
        println!(
            "  {} {:<width$}  {}  {}",
            marker,
            rule.key,
            value,
            Style::new().dim().apply_to(rule.strategy.describe()),
            width = width
        );
    }
}
