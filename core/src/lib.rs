//! Core metadata types for fastlane tool wrapper generation.
//!
//! This crate defines the foundational types for modeling fastlane tool
//! options and the synthesized metadata document:
//!
//! - [`OptionRecord`] — one normalized configuration option as declared in a
//!   fastlane source text.
//! - [`ArgumentSpec`] — the generated argument descriptor derived from an
//!   option record (name, format template, value type, help).
//! - [`TaskSpec`] — one tool's complete description (postfix, invocation
//!   prefix, settings class).
//! - [`MetadataDocument`] — the top-level artifact aggregating all tasks,
//!   references, and the fixed document envelope.
//!
//! Serialization follows the generator's wire contract: camelCase keys, a
//! literal `$schema` pointer, and omission (rather than `null`/`false`) of
//! default-valued optional fields.
//!
//! # Example
//!
//! ```
//! use fastlane_meta_core::*;
//!
//! let arg = ArgumentSpec {
//!     name: "Username".into(),
//!     format: "--username={value}".into(),
//!     secret: false,
//!     help: "Your Apple ID Username.".into(),
//!     value_kind: ValueKind::String,
//!     separator: None,
//! };
//! let task = TaskSpec {
//!     postfix: "Pilot".into(),
//!     definite_argument: "pilot".into(),
//!     settings_class: SettingsClass {
//!         base_class: "FastlaneBaseSettings".into(),
//!         properties: vec![arg],
//!     },
//! };
//! assert_eq!(task.settings_class.properties.len(), 1);
//! ```

mod document;
mod types;

pub use document::{MetadataDocument, SettingsClass, TaskSpec};
pub use types::{ArgumentSpec, OptionRecord, ValueKind};
