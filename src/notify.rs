// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// User-facing feedback for in-flight store operations. Each operation gets
/// an opaque key; the progress message is later replaced, under the same
/// key, by exactly one success or error message.
pub trait Notifier {
    fn progress(&mut self, key: &str, message: &str);
    fn success(&mut self, key: &str, message: &str);
    fn error(&mut self, key: &str, message: &str);
}

/// Terminal notifier. There is nothing to "replace" on a terminal, so the
/// settlement line simply follows the progress line.
#[derive(Debug, Default)]
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn progress(&mut self, _key: &str, message: &str) {
        println!("... {}", message);
    }

    fn success(&mut self, _key: &str, message: &str) {
        println!("{}", message);
    }

    fn error(&mut self, _key: &str, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// Notifier that drops everything. Useful for read-only commands where the
/// ledger is only loaded, never mutated.
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn progress(&mut self, _key: &str, _message: &str) {}
    fn success(&mut self, _key: &str, _message: &str) {}
    fn error(&mut self, _key: &str, _message: &str) {}
}
