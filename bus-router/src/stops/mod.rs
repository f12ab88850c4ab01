//! Stop name resolution.
//!
//! Maps the free text a user types to stop identifiers, for the web
//! layer, the interactive prompt and the route loader.

mod names;

pub use names::{StopMatch, StopNames};
