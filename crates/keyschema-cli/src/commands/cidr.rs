use keyschema_core::{CidrError, address_in_scope, cidr_contains, parse_cidr};

use crate::cli::{AppContext, CidrContainsArgs, CidrRangeArgs, CidrScopeArgs};
use crate::error::{CliError, CliResult};
use crate::output::{render_membership, render_range};
use crate::resolver::SystemResolver;

pub(crate) fn handle_cidr_range(ctx: &AppContext, args: &CidrRangeArgs) -> CliResult<()> {
    let range = parse_cidr(&args.range).map_err(cidr_error)?;
    print!("{}", render_range(&range, ctx.output)?);
    Ok(())
}

pub(crate) fn handle_cidr_contains(ctx: &AppContext, args: &CidrContainsArgs) -> CliResult<()> {
    let inside = contains(args)?;
    print!(
        "{}",
        render_membership(&args.address, &args.range, inside, ctx.output)?
    );
    Ok(())
}

pub(crate) fn handle_cidr_scope(ctx: &AppContext, args: &CidrScopeArgs) -> CliResult<()> {
    let inside = address_in_scope(&SystemResolver, &args.address, &args.scope).map_err(cidr_error)?;
    print!(
        "{}",
        render_membership(&args.address, &args.scope, inside, ctx.output)?
    );
    Ok(())
}

fn contains(args: &CidrContainsArgs) -> CliResult<bool> {
    let range = parse_cidr(&args.range).map_err(cidr_error)?;
    if args.address.trim().parse::<std::net::IpAddr>().is_err() {
        return Err(cidr_error(CidrError::InvalidAddress {
            literal: args.address.trim().to_string(),
        }));
    }
    Ok(cidr_contains(&range, &args.address))
}

fn cidr_error(err: CidrError) -> CliError {
    match err {
        CidrError::Resolve { .. } => CliError::failure(err),
        other => CliError::validation(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use keyschema_core::ValidatorRegistry;

    fn contains_args(range: &str, address: &str) -> CidrContainsArgs {
        CidrContainsArgs {
            range: range.to_string(),
            address: address.to_string(),
        }
    }

    #[test]
    fn containment_follows_the_range() {
        assert!(contains(&contains_args("10.0.0.0/24", "10.0.0.255")).expect("valid input"));
        assert!(!contains(&contains_args("10.0.0.0/24", "10.0.1.0")).expect("valid input"));
        assert!(!contains(&contains_args("10.0.0.0/24", "::1")).expect("valid input"));
    }

    #[test]
    fn malformed_input_is_a_validation_error() {
        let err = contains(&contains_args("10.0.0.0", "10.0.0.1")).unwrap_err();
        assert_eq!(err.display_message(), "'10.0.0.0' is not CIDR notation");
        let err = contains(&contains_args("10.0.0.0/24", "host")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn resolver_failures_are_operational() {
        let err = cidr_error(CidrError::Resolve {
            host: "example.invalid".into(),
            detail: "no such host".into(),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn scope_accepts_literal_addresses_without_resolving() {
        let ctx = AppContext {
            registry: ValidatorRegistry::new(),
            catalog: None,
            output: OutputFormat::Table,
        };
        let args = CidrScopeArgs {
            address: "192.168.1.7".into(),
            scope: "192.168.1.7".into(),
        };
        assert!(handle_cidr_scope(&ctx, &args).is_ok());
        let range = CidrRangeArgs {
            range: "fe80::/10".into(),
        };
        assert!(handle_cidr_range(&ctx, &range).is_ok());
    }
}
