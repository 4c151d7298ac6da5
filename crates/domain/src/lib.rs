//! # acswitch-domain
//!
//! Pure domain model for the acswitch air-conditioner toggler.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **switch state** (`on` / `off`) and how it flips
//! - Define the **appliance status** snapshot reported to users
//! - Define the validated **auto-toggle interval**
//! - Parse chat text into **commands**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod interval;
pub mod status;
pub mod switch;
