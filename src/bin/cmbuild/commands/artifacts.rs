//! `cmbuild artifacts` command

use anyhow::{bail, Result};

use crate::cli::ArtifactsArgs;
use cmbuild::builder::compiler::{select_compiler, HostProbe};
use cmbuild::ops::artifacts::collect_artifacts;
use cmbuild::util::platform::Os;
use cmbuild::util::shell::{Shell, Status};

pub fn execute(args: ArtifactsArgs, shell: &Shell) -> Result<()> {
    let extension = match args.ext {
        Some(ext) if ext.starts_with('.') => ext,
        Some(ext) => format!(".{}", ext),
        None => {
            let os = Os::current();
            match select_compiler(args.compiler.as_deref(), os, &HostProbe::new(os)) {
                Some(compiler) => compiler.lib_extension().to_string(),
                None => bail!(
                    "cannot tell which library extension to collect\n\
                     help: pass --ext or --compiler"
                ),
            }
        }
    };

    let moved = collect_artifacts(&args.build_dir, &extension, &args.dest)?;

    for path in &moved {
        shell.status(Status::Moved, path.display());
    }
    if moved.is_empty() {
        shell.status(
            Status::Skipped,
            format!("no `*{}` files under {}", extension, args.build_dir.display()),
        );
    }

    Ok(())
}
