#![allow(dead_code)]

mod assertions;
mod fixtures;
mod helpers;

// Re-export
pub use assertions::{
    assert_modes_monotonic, assert_single_terminal, assert_state_valid, assert_trajectory_valid,
};

pub use helpers::*;

pub use fixtures::*;
