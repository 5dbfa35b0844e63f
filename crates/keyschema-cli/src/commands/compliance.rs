use keyschema_core::is_compliant;

use crate::catalog::Catalog;
use crate::cli::{AppContext, ComplianceArgs};
use crate::error::{CliError, CliResult};
use crate::output::{ComplianceReport, render_compliance};

const REMOVED: &str = "key removed from the candidate catalog";
const ADDED: &str = "new key";

pub(crate) fn handle_compliance(ctx: &AppContext, args: &ComplianceArgs) -> CliResult<()> {
    let current = Catalog::load(&args.current).map_err(CliError::failure)?;
    let candidate = Catalog::load(&args.candidate).map_err(CliError::failure)?;
    let reports = compare(ctx, &current, &candidate)?;
    print!("{}", render_compliance(&reports, ctx.output)?);

    let breaking = reports.iter().filter(|report| !report.compliant).count();
    if breaking == 0 {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{breaking} key(s) are not backward compatible"
        )))
    }
}

fn compare(
    ctx: &AppContext,
    current: &Catalog,
    candidate: &Catalog,
) -> CliResult<Vec<ComplianceReport>> {
    let mut reports = Vec::with_capacity(current.len());
    for entry in current.entries() {
        let report = match candidate.resolve(&entry.key) {
            None => ComplianceReport {
                key: entry.key.clone(),
                compliant: false,
                detail: Some(REMOVED.to_string()),
            },
            Some(next) => {
                let verdict = is_compliant(&ctx.registry, entry, next)?;
                ComplianceReport {
                    key: entry.key.clone(),
                    compliant: verdict.compliant,
                    detail: verdict.reason,
                }
            }
        };
        reports.push(report);
    }
    reports.extend(
        candidate
            .entries()
            .filter(|entry| current.resolve(&entry.key).is_none())
            .map(|entry| ComplianceReport {
                key: entry.key.clone(),
                compliant: true,
                detail: Some(ADDED.to_string()),
            }),
    );
    tracing::debug!(keys = reports.len(), "catalogs compared");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::commands::test_support::{fixture_context, write_catalog};
    use anyhow::{Result, anyhow};
    use keyschema_test_support::fixtures::catalog_json;

    #[test]
    fn identical_catalogs_are_compliant() -> Result<()> {
        let (dir, ctx) = fixture_context(OutputFormat::Table)?;
        let current = write_catalog(&dir, "current.json", catalog_json())?;
        let candidate = write_catalog(&dir, "candidate.json", catalog_json())?;
        let args = ComplianceArgs { current, candidate };
        assert!(handle_compliance(&ctx, &args).is_ok());
        Ok(())
    }

    #[test]
    fn narrowing_removal_and_addition_are_reported() -> Result<()> {
        let (_dir, ctx) = fixture_context(OutputFormat::Table)?;
        let current = Catalog::from_json(
            r#"[
                {"key":"a.port","dataType":"NUMBER","description":"Port.","valueSize":{"min":"10","max":"20"}},
                {"key":"b.name","dataType":"STRING","description":"Name."}
            ]"#,
        )?;
        let candidate = Catalog::from_json(
            r#"[
                {"key":"a.port","dataType":"NUMBER","description":"Port.","valueSize":{"min":"5","max":"20"}},
                {"key":"c.flag","dataType":"BOOLEAN","description":"Flag."}
            ]"#,
        )?;
        let reports =
            compare(&ctx, &current, &candidate).map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(reports.len(), 3);

        assert_eq!(reports[0].key, "a.port");
        assert!(!reports[0].compliant);
        assert_eq!(
            reports[0].detail.as_deref(),
            Some("valueSize min widened from [10] to [5]")
        );
        assert_eq!(reports[1].key, "b.name");
        assert_eq!(reports[1].detail.as_deref(), Some(REMOVED));
        assert_eq!(reports[2].key, "c.flag");
        assert!(reports[2].compliant);
        Ok(())
    }

    #[test]
    fn breaking_changes_exit_with_validation_code() -> Result<()> {
        let (dir, ctx) = fixture_context(OutputFormat::Json)?;
        let current = write_catalog(&dir, "current.json", catalog_json())?;
        let candidate = write_catalog(
            &dir,
            "candidate.json",
            &catalog_json().replace("\"dataType\": \"CIDR\"", "\"dataType\": \"STRING\""),
        )?;
        let err = handle_compliance(&ctx, &ComplianceArgs { current, candidate }).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "1 key(s) are not backward compatible");
        Ok(())
    }
}
