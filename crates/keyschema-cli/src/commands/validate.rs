use chrono::Utc;
use keyschema_core::{validate_input, validate_schema_entry};

use crate::cli::{AppContext, ValidateArgs};
use crate::error::{CliError, CliResult};
use crate::output::render_values;

pub(crate) fn handle_validate(ctx: &AppContext, args: &ValidateArgs) -> CliResult<()> {
    let text = validate_report(ctx, args)?;
    print!("{text}");
    Ok(())
}

fn validate_report(ctx: &AppContext, args: &ValidateArgs) -> CliResult<String> {
    let catalog = ctx.catalog()?;
    let entry = catalog
        .resolve(&args.key)
        .ok_or_else(|| CliError::validation(format!("key '{}' is not in the catalog", args.key)))?;
    if !entry.is_valid_at(Utc::now()) {
        return Err(CliError::validation(format!(
            "key '{}' is outside its validity window",
            entry.key
        )));
    }
    validate_schema_entry(&ctx.registry, entry)?;

    let raw = args.value.as_deref().or(entry.default_value.as_deref());
    match validate_input(&ctx.registry, entry, raw) {
        Ok(values) => render_values(entry, &values, ctx.output),
        Err(err) if err.is_empty_value() => render_values(entry, &[], ctx.output),
        Err(err) => Err(err.into()),
    }
}
