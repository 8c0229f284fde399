use std::sync::Arc;

use cupi_client::LogLevel;
use cupi_client::auth::credentials::Credentials;
use cupi_client::cupi::cannedtransport::CannedTransport;
use cupi_client::cupi::connectionserver::{ConnectionServer, ServerOptions};
use cupi_client::cupi::entitydescriptor::{EntityDescriptor, FieldKind};
use serde_json::{Map, Value, json};

pub const BASE_URL: &str = "https://cuc.test:8443/vmrest";
pub const PARENT_ID: &str = "9b1c7e2a-1111-4aaa-8bbb-000000000099";

/// Server wired to a fresh canned transport.
pub fn canned_server() -> (ConnectionServer, Arc<CannedTransport>) {
    canned_server_with(ServerOptions::default().with_log_level(LogLevel::Debug))
}

pub fn canned_server_with(options: ServerOptions) -> (ConnectionServer, Arc<CannedTransport>) {
    let transport = Arc::new(CannedTransport::new());
    let server = ConnectionServer::with_transport(
        BASE_URL,
        Credentials::new("admin", "secret"),
        transport.clone(),
        options,
    );
    (server, transport)
}

/// Deterministic object id for the n-th sample record.
pub fn object_id(n: usize) -> String {
    format!("4f3a2b1c-0000-4000-8000-{:012}", n)
}

/// A payload carrying every field of the descriptor, in the string-heavy shape CUPI uses.
pub fn sample_object(descriptor: &EntityDescriptor, n: usize) -> Value {
    let mut object = Map::new();
    for field in descriptor.fields {
        let value = if field.name == descriptor.id_field {
            json!(object_id(n))
        } else {
            match field.kind {
                FieldKind::String => json!(format!("{}-{}", field.name, n)),
                FieldKind::Int => json!(n.to_string()),
                FieldKind::Float => json!("1.5"),
                FieldKind::Boolean => json!(if n % 2 == 0 { "true" } else { "false" }),
                FieldKind::DateTime => json!("2013-10-28 19:23:16.653"),
                FieldKind::Enum(values) => json!(values.variants[0].0.to_string()),
            }
        };
        object.insert(field.name.to_string(), value);
    }
    Value::Object(object)
}

/// CUPI collection wrapper around `count` sample objects.
pub fn sample_list(descriptor: &EntityDescriptor, count: usize, total: usize) -> String {
    let items = (0..count)
        .map(|n| sample_object(descriptor, n))
        .collect::<Vec<Value>>();

    let mut wrapper = Map::new();
    wrapper.insert("@total".to_string(), json!(total.to_string()));
    match items.len() {
        0 => {}
        // A single match comes back as an object, not a one-element array.
        1 => {
            wrapper.insert(descriptor.list_key.to_string(), items[0].clone());
        }
        _ => {
            wrapper.insert(descriptor.list_key.to_string(), Value::Array(items));
        }
    }
    Value::Object(wrapper).to_string()
}

/// Parent id for nested descriptors, `None` otherwise.
pub fn parent_for(descriptor: &EntityDescriptor) -> Option<&'static str> {
    descriptor.is_nested().then_some(PARENT_ID)
}
