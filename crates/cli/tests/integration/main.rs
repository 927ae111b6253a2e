//! CLI integration tests that drive full build passes against a scripted
//! cargo/rustup pair.

#![cfg(unix)]

mod build_tests;
mod common;
