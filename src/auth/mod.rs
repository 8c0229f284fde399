/// Login/password pairs and the Basic authorization header.
pub mod credentials;
