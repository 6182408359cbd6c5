//! `cmbuild build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use cmbuild::ops::cmbuild_build::{build, BuildOptions};
use cmbuild::util::config::load_for_project;
use cmbuild::util::shell::{Shell, Status};

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    // Load configuration (global + project)
    let config = load_for_project(&args.source);

    let opts = BuildOptions {
        source_dir: args.source,
        build_dir: args.build_dir,
        compiler: args.compiler,
        threads: args.jobs,
        defines: args.defines.into_iter().collect(),
        flags_path: args.flags_file,
        export_compile_commands: match (
            args.export_compile_commands,
            args.no_export_compile_commands,
        ) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        artifacts_dir: args.artifacts_dir,
    };

    shell.status(Status::Configuring, opts.source_dir.display());

    let result = build(&opts, &config)?;

    shell.note(format!("configure: {}", result.report.configure_command));
    match result.report.flags_written {
        Some(count) => shell.note(format!("{} completion flag(s) refreshed", count)),
        None => shell.status(Status::Skipped, "completion flags (no compile_commands.json)"),
    }
    if let Some(ref exported) = result.report.exported_compile_commands {
        shell.status(Status::Created, exported.display());
    }
    for artifact in &result.artifacts {
        shell.status(Status::Moved, artifact.display());
    }

    shell.status(
        Status::Finished,
        format!(
            "{} with {} in {}",
            opts.source_dir.display(),
            result.compiler.executable_name(),
            result.report.build_dir.display()
        ),
    );

    Ok(())
}
