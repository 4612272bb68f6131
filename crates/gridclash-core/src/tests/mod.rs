//! Crate-level test suites.
//!
//! Unit tests live next to the modules they cover; these suites exercise
//! the crate through its public surface the way a front end would, driving
//! whole turns and frame loops.

mod helpers;
mod properties;
