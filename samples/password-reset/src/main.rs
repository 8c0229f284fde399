mod config;
mod scenarios;

use cupi_client::LogLevel;
use cupi_client::cupi::connectionserver::{ConnectionServer, ServerOptions};

use config::load_secrets;

#[tokio::main]
async fn main() -> Result<(), String> {
    let secrets = load_secrets()?;

    let server = ConnectionServer::new(
        &secrets.server_name,
        &secrets.login,
        &secrets.password,
        ServerOptions::default()
            .with_log_level(LogLevel::Information)
            .with_accept_invalid_certs(secrets.accept_invalid_certs),
    )?;

    scenarios::lookup::run(&server, &secrets).await?;
    scenarios::reset::run(&server, &secrets).await?;

    Ok(())
}
