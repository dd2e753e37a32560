//! Utility functions and types for testing and debugging sparse sets.
//!
//! These are not needed for normal use, but are useful when developing the
//! set itself or when tracking down a misuse of it: an operation script can be
//! written by hand (or generated), replayed against a reference model, and
//! every intermediate state checked for consistency.

mod checker;
mod op_script;
mod validate_script;

pub use checker::*;
pub use op_script::*;
pub use validate_script::*;
