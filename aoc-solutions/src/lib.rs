//! Advent of Code puzzle solutions with automatic registration
//!
//! Each day module registers its solution and the sample cases from the
//! puzzle text with `aoc_solver::solution!`. Linking this crate is enough for
//! `RegistryBuilder::register_all_plugins` to find them.

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
