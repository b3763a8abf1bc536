use std::process::ExitCode;

use dkron_gateway::boot::boot;

#[tokio::main]
async fn main() -> ExitCode {
    boot().await
}
