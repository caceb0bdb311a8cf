//! `vdoc exists` command implementation.

use std::io::Write;

use clap::Args;
use vdoc_docs::Documentation;

use crate::error::CliError;

/// Arguments for the exists command.
#[derive(Args)]
pub(crate) struct ExistsArgs {
    /// Documentation version.
    version: String,

    /// Page name without `.md`.
    page: String,
}

impl ExistsArgs {
    /// Print `true` or `false`; the exit code is 0 or 1 accordingly.
    pub(crate) fn execute(
        self,
        docs: &Documentation,
        out: &mut impl Write,
    ) -> Result<i32, CliError> {
        let exists = docs.section_exists(&self.version, &self.page);
        writeln!(out, "{exists}")?;
        Ok(i32::from(!exists))
    }
}
