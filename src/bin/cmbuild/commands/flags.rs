//! `cmbuild flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use cmbuild::builder::compile_flags::generate_flags_file;
use cmbuild::util::shell::{Shell, Status};

pub fn execute(args: FlagsArgs, shell: &Shell) -> Result<()> {
    let count = generate_flags_file(&args.database, &args.output)?;

    shell.status(
        Status::Created,
        format!("{} ({} flag line(s))", args.output.display(), count),
    );

    Ok(())
}
