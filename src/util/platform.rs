//! Host platform detection and shell command execution.

use std::fmt;

use crate::util::process::{CommandError, ProcessBuilder};

/// Operating system family, as far as build tool selection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Os {
    /// The OS this binary is running on.
    pub fn current() -> Self {
        Os::from_name(std::env::consts::OS)
    }

    /// Map a platform name (as reported by `std::env::consts::OS`) to an `Os`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "linux" => Os::Linux,
            "macos" | "darwin" => Os::MacOs,
            "windows" => Os::Windows,
            _ => Os::Other,
        }
    }

    /// Check whether this is the named OS (case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        Os::from_name(name) == *self && *self != Os::Other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::MacOs => "macos",
            Os::Windows => "windows",
            Os::Other => "other",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run a command line through the platform shell, echoing it first.
///
/// The child inherits stdio. A non-zero exit becomes `CommandError::Failed`.
pub fn exec_command(command: &str) -> Result<(), CommandError> {
    tracing::info!("Executing command: '{}'", command);
    ProcessBuilder::shell(command).run()
}

/// Shell snippet that checks for an executable on the given OS.
///
/// Returns `None` where no probe is known.
pub fn probe_command(os: Os, name: &str) -> Option<String> {
    match os {
        Os::Windows => Some(format!("where {}", name)),
        Os::Linux | Os::MacOs => Some(format!("type {} >/dev/null 2>&1 || exit 1", name)),
        Os::Other => None,
    }
}

/// Check whether an executable is reachable on PATH for the given OS.
///
/// Unsupported platforms report `false` instead of failing.
pub fn executable_exists(os: Os, name: &str) -> bool {
    let Some(command) = probe_command(os, name) else {
        tracing::debug!("no executable probe for platform `{}`", os);
        return false;
    };

    tracing::debug!("Probing for `{}`: {}", name, command);
    let found = ProcessBuilder::shell(command).succeeds();
    tracing::debug!("`{}` {}", name, if found { "found" } else { "not found" });
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_from_name() {
        assert_eq!(Os::from_name("Linux"), Os::Linux);
        assert_eq!(Os::from_name("windows"), Os::Windows);
        assert_eq!(Os::from_name("darwin"), Os::MacOs);
        assert_eq!(Os::from_name("freebsd"), Os::Other);
    }

    #[test]
    fn test_is_is_case_insensitive() {
        assert!(Os::Windows.is("Windows"));
        assert!(!Os::Linux.is("windows"));
        assert!(!Os::Other.is("solaris"));
    }

    #[test]
    fn test_probe_commands() {
        assert_eq!(
            probe_command(Os::Windows, "jom").as_deref(),
            Some("where jom")
        );
        assert_eq!(
            probe_command(Os::Linux, "make").as_deref(),
            Some("type make >/dev/null 2>&1 || exit 1")
        );
        assert_eq!(probe_command(Os::Other, "make"), None);
    }

    #[test]
    fn test_unknown_platform_fails_closed() {
        assert!(!executable_exists(Os::Other, "sh"));
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_unix_probe() {
        let os = Os::current();
        assert!(executable_exists(os, "sh"));
        assert!(!executable_exists(os, "no-such-tool-cmbuild-test"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_command_propagates_failure() {
        assert!(exec_command("true").is_ok());
        assert!(exec_command("exit 1").is_err());
    }
}
