#[path = "../common/mod.rs"]
mod common;

mod approach_tests;
