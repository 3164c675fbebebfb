//! Terminal presentation layer
//!
//! This module handles:
//! - Rendering reset results and profile information with `console` styles
//! - Interactive profile selection and reset confirmation using `inquire`

pub mod display;
pub mod prompt;
