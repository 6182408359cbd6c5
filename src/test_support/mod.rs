//! Test utilities and mocks for unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use cmbuild::test_support::{cwd_lock, MockRunner};
//!
//! #[test]
//! fn test_example() {
//!     let _lock = cwd_lock();
//!     let runner = MockRunner::new().fail_on("cmake");
//!     // Hand `runner.clone()` to the code under test, then inspect
//!     // `runner.calls()`.
//! }
//! ```

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::builder::compiler::ExecutableProbe;
use crate::builder::executor::CommandRunner;
use crate::util::process::CommandError;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that change the process working directory.
///
/// The lock survives a panicking holder so one failing test doesn't cascade.
pub fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// A command seen by [`MockRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    /// Working directory at the time of the call.
    pub cwd: PathBuf,
}

/// Command runner that records calls instead of spawning processes.
///
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failing_prefixes: Vec<String>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Make any command starting with `prefix` exit with status 1.
    pub fn fail_on(mut self, prefix: impl Into<String>) -> Self {
        self.failing_prefixes.push(prefix.into());
        self
    }

    /// All commands run so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &str) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push(RecordedCall {
            command: command.to_string(),
            cwd: std::env::current_dir().unwrap_or_default(),
        });

        if self.failing_prefixes.iter().any(|p| command.starts_with(p)) {
            return Err(CommandError::Failed {
                command: command.to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

/// Executable probe with a fixed set of installed tools.
#[derive(Debug, Default)]
pub struct MockProbe {
    installed: HashSet<String>,
    probed: Mutex<Vec<String>>,
}

impl MockProbe {
    pub fn with(installed: &[&str]) -> Self {
        MockProbe {
            installed: installed.iter().map(|s| s.to_string()).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }

    /// Names asked about so far, in order.
    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

impl ExecutableProbe for MockProbe {
    fn exists(&self, name: &str) -> bool {
        self.probed.lock().unwrap().push(name.to_string());
        self.installed.contains(name)
    }
}
