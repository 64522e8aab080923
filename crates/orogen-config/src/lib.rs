//! Pack manifest and operator-facing input validation.
//!
//! The manifest carries the identity and world settings of a pack and
//! persists as a RON file with CLI overrides. Validation failures are
//! descriptive: they name the offending value, suggest the nearest valid
//! option, and list a bounded slice of the allowed set.

mod cli;
mod error;
mod manifest;
mod validate;

pub use cli::CliArgs;
pub use error::ManifestError;
pub use manifest::{KNOWN_PREPROCESSORS, PackInfo, PackManifest, WorldSettings};
pub use validate::{InputError, closest};
