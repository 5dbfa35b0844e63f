use keyschema_core::validate_schema_entry;

use crate::catalog::Catalog;
use crate::cli::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::{CheckReport, render_check};

pub(crate) fn handle_check(ctx: &AppContext) -> CliResult<()> {
    let catalog = ctx.catalog()?;
    let reports = check_catalog(ctx, &catalog);
    print!("{}", render_check(&reports, ctx.output)?);

    let invalid = reports.iter().filter(|report| !report.valid).count();
    if invalid == 0 {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{invalid} of {} schema entries are invalid",
            catalog.len()
        )))
    }
}

fn check_catalog(ctx: &AppContext, catalog: &Catalog) -> Vec<CheckReport> {
    catalog
        .entries()
        .map(|entry| match validate_schema_entry(&ctx.registry, entry) {
            Ok(()) => CheckReport {
                key: entry.key.clone(),
                valid: true,
                detail: None,
            },
            Err(err) => CheckReport {
                key: entry.key.clone(),
                valid: false,
                detail: Some(err.to_string()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::commands::test_support::{fixture_context, write_catalog};
    use anyhow::{Result, anyhow};

    #[test]
    fn fixture_catalog_is_clean() -> Result<()> {
        let (_dir, ctx) = fixture_context(OutputFormat::Table)?;
        let catalog = ctx.catalog().map_err(|err| anyhow!(err.display_message()))?;
        let reports = check_catalog(&ctx, &catalog);
        assert_eq!(reports.len(), 4);
        assert!(reports.iter().all(|report| report.valid));
        assert!(handle_check(&ctx).is_ok());
        Ok(())
    }

    #[test]
    fn broken_entries_fail_the_check() -> Result<()> {
        let (dir, mut ctx) = fixture_context(OutputFormat::Json)?;
        let path = write_catalog(
            &dir,
            "broken.json",
            r#"[
                {"key":"a.port","dataType":"NUMBER","description":"Port.","defaultValue":"abc"},
                {"key":"b.name","dataType":"STRING","description":"Name."}
            ]"#,
        )?;
        ctx.catalog = Some(path);
        let catalog = ctx.catalog().map_err(|err| anyhow!(err.display_message()))?;
        let reports = check_catalog(&ctx, &catalog);
        assert!(!reports[0].valid);
        assert!(reports[0].detail.as_deref().is_some_and(|detail| detail.contains("defaultValue")));
        assert!(reports[1].valid);

        let err = handle_check(&ctx).unwrap_err();
        assert_eq!(err.display_message(), "1 of 2 schema entries are invalid");
        Ok(())
    }
}
