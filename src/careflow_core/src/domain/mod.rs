pub mod client_shape;
pub mod email;
pub mod password;
pub mod profile;
pub mod registration;
pub mod role;
pub mod session;
pub mod user;
pub mod verification_code;
