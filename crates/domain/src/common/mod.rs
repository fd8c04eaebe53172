//! Pure helpers shared by the engine's request handling.
//!
//! Request bodies arrive as flat text fields; these functions cast them to the
//! types stored on a location the way the document store's schema would.

pub mod cast;

pub use cast::{cast_bool, cast_integer, parse_float, split_facilities};
