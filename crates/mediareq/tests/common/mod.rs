//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use mediareq::id_generation::{IdGenerator, IdSource};
use std::path::Path;
use std::process::{Command, Output};

/// Run the mediareq binary in the specified directory.
///
/// `ADMIN_ID` is cleared so the host environment cannot leak into tests.
pub fn run_mediareq_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mediareq"))
        .args(args)
        .current_dir(dir)
        .env_remove("ADMIN_ID")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute mediareq binary")
}

/// Stdout of a successful run, as a string.
pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Id source replaying a fixed sequence, cycling at the end.
pub struct SequenceIds {
    values: Vec<u16>,
    next: usize,
}

impl IdSource for SequenceIds {
    fn next_candidate(&mut self) -> u16 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Generator that proposes `values` in order.
pub fn scripted_ids(values: &[u16]) -> IdGenerator {
    IdGenerator::new(Box::new(SequenceIds {
        values: values.to_vec(),
        next: 0,
    }))
}
