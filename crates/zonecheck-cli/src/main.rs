//! zonecheck - DNS zone-transfer exposure tester.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    zonecheck_cli::run().await
}
