use cupi_client::cupi::connectionserver::{ConnectionServer, CredentialKind};
use cupi_client::cupi::entities::USER;
use cupi_client::cupi::entity::Record;

use crate::config::Secrets;

pub async fn run(server: &ConnectionServer, secrets: &Secrets) -> Result<(), String> {
    println!("Scenario: reset");

    let user = Record::bind(server, &USER, &secrets.user_alias)
        .await
        .map_err(|e| e.to_string())?;
    let object_id = user.object_id().unwrap_or_default();

    let resets = [
        (CredentialKind::Pin, secrets.new_pin.as_deref()),
        (CredentialKind::Password, secrets.new_password.as_deref()),
    ];

    for (kind, value) in resets {
        let Some(value) = value else {
            continue;
        };

        match server.reset_user_credential(object_id, kind, value).await {
            Ok(_) => println!("{:?} reset for {}", kind, secrets.user_alias),
            Err(result) => {
                println!(
                    "{:?} reset failed: {}\n{}",
                    kind,
                    result.attempted_operation(),
                    result.response_text
                );
            }
        }
    }

    Ok(())
}
