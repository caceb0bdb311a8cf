//! `vdoc render` command implementation.

use std::io::Write;

use clap::Args;
use vdoc_docs::Documentation;

use crate::error::CliError;
use crate::output::Output;

/// Exit code for a page that does not exist.
const EXIT_MISSING: i32 = 2;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Documentation version (e.g. `5.4`, `master`).
    version: String,

    /// Page name without `.md`; omit to render the version index.
    page: Option<String>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Writes the HTML to `out` and returns the process exit code.
    pub(crate) fn execute(
        self,
        docs: &Documentation,
        output: &Output,
        out: &mut impl Write,
    ) -> Result<i32, CliError> {
        if !docs.doc_versions().contains(&self.version) {
            output.warning(format_args!("Version {} is not published", self.version));
        }

        let html = match &self.page {
            Some(page) => docs.get(&self.version, page)?,
            None => docs.index(&self.version)?,
        };

        let Some(html) = html else {
            let page = self.page.as_deref().unwrap_or("documentation");
            output.info(format_args!("Page not found: {}/{page}", self.version));
            return Ok(EXIT_MISSING);
        };

        writeln!(out, "{html}")?;
        Ok(0)
    }
}
