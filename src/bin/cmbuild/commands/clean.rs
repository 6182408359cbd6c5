//! `cmbuild clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use cmbuild::ops::cmbuild_build::{resolve_build_dir, BuildOptions};
use cmbuild::ops::cmbuild_clean::clean;
use cmbuild::util::config::load_for_project;
use cmbuild::util::shell::{Shell, Status};

pub fn execute(args: CleanArgs, shell: &Shell) -> Result<()> {
    let config = load_for_project(&args.source);

    let opts = BuildOptions {
        source_dir: args.source,
        build_dir: args.build_dir,
        ..Default::default()
    };
    let build_dir = resolve_build_dir(&opts, &config);

    if clean(&build_dir) {
        shell.status(Status::Removed, build_dir.display());
    } else {
        shell.status(Status::Skipped, format!("{} (not found)", build_dir.display()));
    }

    Ok(())
}
