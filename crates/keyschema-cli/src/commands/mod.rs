//! Command handlers grouped by concern.

mod binary;
mod check;
mod cidr;
mod compliance;
mod validate;

pub(crate) use binary::{handle_binary_decode, handle_binary_encode};
pub(crate) use check::handle_check;
pub(crate) use cidr::{handle_cidr_contains, handle_cidr_range, handle_cidr_scope};
pub(crate) use compliance::handle_compliance;
pub(crate) use validate::handle_validate;

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::PathBuf;

    use keyschema_core::ValidatorRegistry;
    use keyschema_test_support::fixtures::catalog_json;
    use tempfile::TempDir;

    use crate::cli::{AppContext, OutputFormat};

    /// Context pointing at the fixture catalog written to a temporary directory.
    pub(crate) fn fixture_context(output: OutputFormat) -> anyhow::Result<(TempDir, AppContext)> {
        let dir = tempfile::tempdir()?;
        let path = write_catalog(&dir, "catalog.json", catalog_json())?;
        let ctx = AppContext {
            registry: ValidatorRegistry::new(),
            catalog: Some(path),
            output,
        };
        Ok((dir, ctx))
    }

    pub(crate) fn write_catalog(dir: &TempDir, name: &str, payload: &str) -> anyhow::Result<PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, payload)?;
        Ok(path)
    }
}
