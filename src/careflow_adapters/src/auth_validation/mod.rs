pub mod role_gate;

pub use role_gate::{BEARER_PREFIX, RoleGate, RoleGateError, extract_bearer_token};
