//! Native build tools driven after CMake has generated build files.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::util::platform::{self, Os};

/// Default parallel job count passed to make-style tools.
pub const DEFAULT_THREADS: usize = 9;

/// A native build tool together with the CMake generator that targets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compiler {
    /// GNU make with `Unix Makefiles`.
    Make,
    /// `mingw32-make` with `MinGW Makefiles`.
    MinGWMake,
    /// Qt's jom with `NMake Makefiles`.
    Jom,
    /// Microsoft nmake with `NMake Makefiles`.
    NMake,
}

#[derive(Debug, Error)]
#[error("unknown compiler `{0}` (expected one of: gcc, mingw, jom, nmake)")]
pub struct UnknownCompiler(pub String);

impl Compiler {
    pub const ALL: [Compiler; 4] = [
        Compiler::Make,
        Compiler::MinGWMake,
        Compiler::Jom,
        Compiler::NMake,
    ];

    /// Key used to select this compiler by name.
    pub fn key(&self) -> &'static str {
        match self {
            Compiler::Make => "gcc",
            Compiler::MinGWMake => "mingw",
            Compiler::Jom => "jom",
            Compiler::NMake => "nmake",
        }
    }

    /// Command line that runs the build in the current directory.
    ///
    /// nmake has no parallel mode, so `threads` is ignored for it.
    pub fn build_command(&self, threads: usize) -> String {
        match self {
            Compiler::Make => format!("make -j{}", threads),
            Compiler::MinGWMake => format!("mingw32-make -j{}", threads),
            Compiler::Jom => format!("jom -j{}", threads),
            Compiler::NMake => "nmake".to_string(),
        }
    }

    /// Static library file extension, including the dot.
    pub fn lib_extension(&self) -> &'static str {
        match self {
            Compiler::Make | Compiler::MinGWMake => ".a",
            Compiler::Jom | Compiler::NMake => ".lib",
        }
    }

    /// CMake generator name.
    pub fn generator(&self) -> &'static str {
        match self {
            Compiler::Make => "Unix Makefiles",
            Compiler::MinGWMake => "MinGW Makefiles",
            Compiler::Jom | Compiler::NMake => "NMake Makefiles",
        }
    }

    /// Executable that must be on PATH for this compiler to be usable.
    pub fn executable_name(&self) -> &'static str {
        match self {
            Compiler::Make => "make",
            Compiler::MinGWMake => "mingw32-make",
            Compiler::Jom => "jom",
            Compiler::NMake => "nmake",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Compiler {
    type Err = UnknownCompiler;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gcc" | "make" => Ok(Compiler::Make),
            "mingw" | "mingw32-make" => Ok(Compiler::MinGWMake),
            "jom" => Ok(Compiler::Jom),
            "nmake" => Ok(Compiler::NMake),
            _ => Err(UnknownCompiler(s.to_string())),
        }
    }
}

/// Compilers worth probing on `os`, most preferred first.
pub fn preferred_compilers(os: Os) -> &'static [Compiler] {
    match os {
        Os::Linux | Os::MacOs => &[Compiler::Make],
        Os::Windows => &[Compiler::Jom, Compiler::NMake, Compiler::MinGWMake],
        Os::Other => &[],
    }
}

/// Answers whether an executable can be found on the host.
pub trait ExecutableProbe {
    fn exists(&self, name: &str) -> bool;
}

/// Probes the real host with `where`/`type`.
#[derive(Debug, Clone, Copy)]
pub struct HostProbe {
    os: Os,
}

impl HostProbe {
    pub fn new(os: Os) -> Self {
        HostProbe { os }
    }
}

impl Default for HostProbe {
    fn default() -> Self {
        HostProbe::new(Os::current())
    }
}

impl ExecutableProbe for HostProbe {
    fn exists(&self, name: &str) -> bool {
        platform::executable_exists(self.os, name)
    }
}

/// Pick a compiler.
///
/// A non-blank `name` is looked up directly with no platform or PATH check.
/// Otherwise the platform's preferred compilers are probed in order and the
/// first one whose executable exists wins.
pub fn select_compiler(
    name: Option<&str>,
    os: Os,
    probe: &dyn ExecutableProbe,
) -> Option<Compiler> {
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        return match name.parse::<Compiler>() {
            Ok(compiler) => Some(compiler),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };
    }

    let found = preferred_compilers(os)
        .iter()
        .copied()
        .find(|c| probe.exists(c.executable_name()));

    match found {
        Some(compiler) => tracing::debug!("selected compiler `{}` for {}", compiler, os),
        None => tracing::debug!("no usable compiler found for {}", os),
    }
    found
}
