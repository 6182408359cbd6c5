//! CMake configuration and native build tool driving.

pub mod cmake;
pub mod compile_flags;
pub mod compiler;
pub mod defines;
pub mod executor;

pub use cmake::{BuildReport, CMakeCommand, CMakeOptions};
pub use compile_flags::{extract_flags, generate_flags_file, FlagsError};
pub use compiler::{select_compiler, Compiler, ExecutableProbe, HostProbe};
pub use defines::Defines;
pub use executor::{BuildError, CommandRunner, DirCommand, ShellRunner};
