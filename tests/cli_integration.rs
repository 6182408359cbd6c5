//! CLI integration tests for cmbuild.
//!
//! Build tests put stub `cmake` and `make` scripts first on PATH so the whole
//! configure → flags → build → artifacts flow runs without a real toolchain.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the cmbuild binary command.
fn cmbuild() -> Command {
    let mut cmd = Command::cargo_bin("cmbuild").unwrap();
    cmd.env_remove("CMBUILD_COMPILER");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn cmake_project(root: &Path) -> PathBuf {
    let source = root.join("demo");
    fs::create_dir_all(&source).unwrap();
    fs::write(
        source.join("CMakeLists.txt"),
        "cmake_minimum_required(VERSION 3.10)\nproject(demo)\n",
    )
    .unwrap();
    source
}

const COMPILE_COMMANDS: &str = r#"[{"directory": ".", "command": "/usr/bin/g++ -c -I/inc -std=c++17 -o obj.o -g main.cpp", "file": "main.cpp"}]"#;

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Stub toolchain: `cmake` records its arguments and emits a compile-commands
/// database; `make` records its arguments and produces a static library.
#[cfg(unix)]
fn stub_toolchain(root: &Path, cmake_exit: i32) -> PathBuf {
    let bin = root.join("stub-bin");
    fs::create_dir_all(&bin).unwrap();
    write_script(
        &bin,
        "cmake",
        &format!(
            "echo \"$@\" > cmake-args.txt\nprintf '%s' '{}' > compile_commands.json\nexit {}",
            COMPILE_COMMANDS, cmake_exit
        ),
    );
    write_script(
        &bin,
        "make",
        "echo \"$@\" > make-args.txt\nmkdir -p CMakeFiles\ntouch libdemo.a CMakeFiles/objects.a",
    );
    bin
}

#[cfg(unix)]
fn path_with(bin: &Path) -> String {
    let current = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", bin.display(), current)
}

// ============================================================================
// cmbuild build
// ============================================================================

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[test]
fn test_build_probes_make_and_refreshes_flags() {
    let tmp = temp_dir();
    let source = cmake_project(tmp.path());
    let bin = stub_toolchain(tmp.path(), 0);

    cmbuild()
        .args(["build", "-D", "DEMO=ON", "-j", "3"])
        .arg(&source)
        .env("PATH", path_with(&bin))
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished"));

    let build = source.join("build");
    let cmake_args = fs::read_to_string(build.join("cmake-args.txt")).unwrap();
    assert!(cmake_args.contains("-DCMAKE_BUILD_TYPE=RelWithDebInfo"));
    assert!(cmake_args.contains("-DDEMO=ON"));
    assert!(cmake_args.contains("-G Unix Makefiles"));

    let make_args = fs::read_to_string(build.join("make-args.txt")).unwrap();
    assert_eq!(make_args.trim(), "-j3");

    let flags = fs::read_to_string(source.join(".clang_complete")).unwrap();
    assert_eq!(flags, "-I/inc\n-std=c++17\n");
}

#[cfg(unix)]
#[test]
fn test_build_reads_project_config_and_collects_artifacts() {
    let tmp = temp_dir();
    let source = cmake_project(tmp.path());
    let bin = stub_toolchain(tmp.path(), 0);
    fs::write(
        source.join("cmbuild.toml"),
        "[build]\ncompiler = \"gcc\"\nthreads = 5\nbuild_dir = \"out\"\n\
         export_compile_commands = true\nartifacts_dir = \"lib\"\n\
         [defines]\nFROM_CONFIG = \"1\"\n",
    )
    .unwrap();

    cmbuild()
        .args(["build", "."])
        .env("PATH", path_with(&bin))
        .current_dir(&source)
        .assert()
        .success()
        .stderr(predicate::str::contains("Moved"));

    let out = source.join("out");
    assert_eq!(
        fs::read_to_string(out.join("make-args.txt")).unwrap().trim(),
        "-j5"
    );
    assert!(fs::read_to_string(out.join("cmake-args.txt"))
        .unwrap()
        .contains("-DFROM_CONFIG=1"));
    assert!(source.join("compile_commands.json").exists());
    assert!(source.join("lib").join("libdemo.a").exists());
    assert!(out.join("CMakeFiles").join("objects.a").exists());
}

#[cfg(unix)]
#[test]
fn test_relative_flags_file_is_written_under_source() {
    let tmp = temp_dir();
    let source = cmake_project(tmp.path());
    let bin = stub_toolchain(tmp.path(), 0);

    cmbuild()
        .args(["build", "--compiler", "gcc", "--flags-file", "editor_flags"])
        .arg(&source)
        .env("PATH", path_with(&bin))
        .current_dir(tmp.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(source.join("editor_flags")).unwrap(),
        "-I/inc\n-std=c++17\n"
    );
    assert!(!source.join("build").join("editor_flags").exists());
}

#[cfg(unix)]
#[test]
fn test_configure_failure_stops_build() {
    let tmp = temp_dir();
    let source = cmake_project(tmp.path());
    let bin = stub_toolchain(tmp.path(), 1);

    cmbuild()
        .args(["build", "--compiler", "gcc"])
        .arg(&source)
        .env("PATH", path_with(&bin))
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("CMake configuration failed"));

    let build = source.join("build");
    assert!(build.join("cmake-args.txt").exists());
    assert!(!build.join("make-args.txt").exists());
}

#[test]
fn test_build_fails_without_cmakelists() {
    let tmp = temp_dir();

    cmbuild()
        .args(["build", "--compiler", "gcc"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no CMakeLists.txt"));
}

#[test]
fn test_build_rejects_unknown_compiler() {
    let tmp = temp_dir();
    let source = cmake_project(tmp.path());

    cmbuild()
        .args(["build", "--compiler", "msbuild"])
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown compiler `msbuild`"));
}

#[test]
fn test_build_rejects_malformed_define() {
    cmbuild()
        .args(["build", "-D", "NOVALUE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

// ============================================================================
// cmbuild flags
// ============================================================================

#[test]
fn test_flags_writes_completion_file() {
    let tmp = temp_dir();
    let db = tmp.path().join("compile_commands.json");
    fs::write(&db, COMPILE_COMMANDS).unwrap();

    cmbuild()
        .args(["flags", "compile_commands.json", "-o", "flags.txt"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("flags.txt"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("flags.txt")).unwrap(),
        "-I/inc\n-std=c++17\n"
    );
}

#[test]
fn test_flags_fails_without_database() {
    let tmp = temp_dir();

    cmbuild()
        .args(["flags"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("compile_commands.json"));
}

// ============================================================================
// cmbuild clean
// ============================================================================

#[test]
fn test_clean_removes_build_dir() {
    let tmp = temp_dir();
    let build = tmp.path().join("build");
    fs::create_dir_all(build.join("CMakeFiles")).unwrap();
    fs::write(build.join("CMakeCache.txt"), "").unwrap();

    cmbuild()
        .args(["clean"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));

    assert!(!build.exists());

    // Nothing left to remove is not an error
    cmbuild()
        .args(["clean"])
        .current_dir(tmp.path())
        .assert()
        .success();
}

// ============================================================================
// cmbuild toolchain
// ============================================================================

#[test]
fn test_toolchain_explicit_nmake() {
    cmbuild()
        .args(["toolchain", "--compiler", "nmake"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NMake Makefiles"))
        .stdout(predicate::str::contains("*.lib"));
}

// ============================================================================
// cmbuild artifacts
// ============================================================================

#[test]
fn test_artifacts_moves_libraries() {
    let tmp = temp_dir();
    let build = tmp.path().join("build");
    fs::create_dir_all(build.join("CMakeFiles")).unwrap();
    fs::write(build.join("libcore.a"), "").unwrap();
    fs::write(build.join("CMakeFiles").join("objects.a"), "").unwrap();

    cmbuild()
        .args(["artifacts", "build", "dist", "--ext", "a"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("dist").join("libcore.a").exists());
    assert!(!tmp.path().join("dist").join("objects.a").exists());
}

#[test]
fn test_artifacts_uses_compiler_extension() {
    let tmp = temp_dir();
    let build = tmp.path().join("build");
    fs::create_dir_all(&build).unwrap();
    fs::write(build.join("core.lib"), "").unwrap();
    fs::write(build.join("libcore.a"), "").unwrap();

    cmbuild()
        .args(["artifacts", "build", "dist", "--compiler", "jom"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("dist").join("core.lib").exists());
    assert!(build.join("libcore.a").exists());
}

// ============================================================================
// cmbuild completions
// ============================================================================

#[test]
fn test_completions_bash() {
    cmbuild()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cmbuild"));
}
