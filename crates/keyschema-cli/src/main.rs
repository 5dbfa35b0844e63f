//! Binary entrypoint for the keyschema CLI.

fn main() {
    std::process::exit(keyschema_cli::run());
}
