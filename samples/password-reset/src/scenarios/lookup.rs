use cupi_client::cupi::connectionserver::ConnectionServer;
use cupi_client::cupi::entities::USER;
use cupi_client::cupi::entity::Record;

use crate::config::Secrets;

pub async fn run(server: &ConnectionServer, secrets: &Secrets) -> Result<(), String> {
    println!("Scenario: lookup");

    let version = server
        .fetch_version()
        .await
        .map_err(|result| result.to_string())?
        .value;
    println!("Connected to Unity Connection {}", version.raw);

    let user = Record::bind(server, &USER, &secrets.user_alias)
        .await
        .map_err(|e| e.to_string())?;
    println!("{}", user);
    println!("{}", user.dump_all_props());

    Ok(())
}
