/// In-memory transport with scripted responses.
pub mod cannedtransport;
/// Generic operations against one Unity Connection server.
pub mod connectionserver;
/// Descriptor table of the supported object types.
pub mod entities;
/// Records, field values and pending changes.
pub mod entity;
/// Declarative field and resource descriptors.
pub mod entitydescriptor;
/// Field and binding errors.
pub mod error;
/// JSON-to-record mapping and schema drift diagnostics.
pub mod parse;
/// Query clause and pagination helpers.
pub mod query;
/// HTTP transport abstraction and the reqwest implementation.
pub mod transport;
/// Uniform outcome of remote calls.
pub mod webcallresult;
