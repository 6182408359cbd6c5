//! `cmbuild toolchain` command

use anyhow::{bail, Result};

use crate::cli::ToolchainArgs;
use cmbuild::builder::compiler::{select_compiler, HostProbe, DEFAULT_THREADS};
use cmbuild::util::platform::Os;
use cmbuild::util::process::{find_cmake, find_executable, ProcessBuilder};

pub fn execute(args: ToolchainArgs) -> Result<()> {
    let os = Os::current();
    let Some(compiler) = select_compiler(args.compiler.as_deref(), os, &HostProbe::new(os)) else {
        bail!(
            "no supported build tool found for {}\n\
             help: install make (or jom/nmake/mingw32-make on Windows), or pass --compiler",
            os
        );
    };

    println!("Toolchain:");
    println!();
    println!("  Platform:   {}", os);
    println!("  Compiler:   {}", compiler.key());
    println!("  Generator:  {}", compiler.generator());
    println!("  Build:      {}", compiler.build_command(DEFAULT_THREADS));
    println!("  Library:    *{}", compiler.lib_extension());

    match find_executable(compiler.executable_name()) {
        Some(path) => println!("  Executable: {}", path.display()),
        None => println!("  Executable: {} (not found)", compiler.executable_name()),
    }

    println!();

    // CMake
    if let Some(cmake) = find_cmake() {
        println!("  CMake:      {}", cmake.display());

        if let Ok(output) = ProcessBuilder::new(&cmake).arg("--version").exec() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if let Some(first_line) = stdout.lines().next() {
                println!("              {}", first_line.trim());
            }
        }
    } else {
        println!("  CMake:      not found");
    }

    Ok(())
}
