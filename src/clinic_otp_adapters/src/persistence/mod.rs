pub mod hashmap_credential_store;
pub mod postgres_credential_store;

pub use hashmap_credential_store::HashMapCredentialStore;
pub use postgres_credential_store::PostgresCredentialStore;
