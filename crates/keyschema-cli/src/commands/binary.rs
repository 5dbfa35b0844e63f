use chrono::{DateTime, Utc};
use keyschema_core::{BinaryObject, decode_binary_object, encode_binary_object};

use crate::cli::{AppContext, BinaryDecodeArgs, BinaryEncodeArgs};
use crate::error::{CliError, CliResult};
use crate::output::render_binary;

pub(crate) fn handle_binary_encode(ctx: &AppContext, args: BinaryEncodeArgs) -> CliResult<()> {
    let object = object_from_args(args)?;
    print!("{}", describe(ctx, &object)?);
    Ok(())
}

pub(crate) fn handle_binary_decode(ctx: &AppContext, args: &BinaryDecodeArgs) -> CliResult<()> {
    let object = decode_binary_object(&args.literal)
        .map_err(|err| CliError::validation(err.to_string()))?;
    print!("{}", describe(ctx, &object)?);
    Ok(())
}

fn object_from_args(args: BinaryEncodeArgs) -> CliResult<BinaryObject> {
    let timestamp = args
        .timestamp
        .as_deref()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|instant| instant.with_timezone(&Utc))
                .map_err(|err| {
                    CliError::validation(format!("'{raw}' is not an RFC-3339 timestamp ({err})"))
                })
        })
        .transpose()?;
    Ok(BinaryObject {
        name: args.name,
        timestamp,
        mimetype: args.mimetype,
        data: args.data,
    })
}

fn describe(ctx: &AppContext, object: &BinaryObject) -> CliResult<String> {
    let bytes = object
        .decoded_data()
        .map_err(|err| CliError::validation(format!("payload is not base64 ({err})")))?;
    let encoded = encode_binary_object(object);
    tracing::debug!(bytes = bytes.len(), "binary object rendered");
    render_binary(object, &encoded, bytes.len(), ctx.output)
}
