//! Message store, resolution, and text decoration.
//!
//! - `source`: the pluggable (locale, source text) → translated text store
//!   and the resolver that consults it with language fallback
//! - `decorate`: placeholder replacements applied to resolved text
//! - `choice`: branch selection for pluralized choice messages

mod choice;
mod decorate;
mod source;

pub use choice::select_branch;
pub use decorate::{apply_replacements, Replacement};
pub use source::{MapMessageSource, MessageResolver, MessageSource};
