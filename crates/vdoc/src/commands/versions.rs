//! `vdoc versions` command implementation.

use std::io::Write;

use vdoc_docs::Documentation;

use crate::error::CliError;

/// Print each published version as `id<TAB>label`, in display order.
pub(crate) fn list_versions(docs: &Documentation, out: &mut impl Write) -> Result<i32, CliError> {
    for (id, label) in docs.doc_versions().iter() {
        writeln!(out, "{id}\t{label}")?;
    }
    Ok(0)
}
