//! Client-side validation and payload building for create/update requests.
//!
//! Both the CLI and the dashboard go through these forms, so a rejected
//! submission never reaches the network.

mod catalog;
mod payload;
mod signup;

pub use catalog::{CatalogForm, FieldKind, FieldSpec, FormMode, INVALID_TYPE, fields_for};
pub use payload::Payload;
pub use signup::{PASSWORDS_DO_NOT_MATCH, SignUpForm};

pub const NOTHING_TO_UPDATE: &str = "Nothing to update.";
