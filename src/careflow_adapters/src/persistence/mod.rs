pub mod hashmap_credential_store;
pub mod postgres_credential_store;

pub use hashmap_credential_store::HashMapCredentialStore;
pub use postgres_credential_store::{PostgresCredentialStore, migrate};

/// Specialties every deployment starts with, keyed by their stable id.
pub const SEEDED_SPECIALTIES: [(i64, &str); 7] = [
    (1, "Generalist"),
    (2, "Dentist"),
    (3, "Cardiologist"),
    (4, "Neurologist"),
    (5, "Ophthalmologist"),
    (6, "Pediatrician"),
    (7, "Psychiatrist"),
];
