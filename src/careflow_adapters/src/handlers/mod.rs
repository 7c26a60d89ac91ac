//! Framework-agnostic auth and profile handlers.
//!
//! These handlers contain the request logic without any framework dependencies.
//! Framework-specific routes (Axum, Actix, etc.) extract data from requests, call these handlers,
//! and render an `AuthApiError` back into a framework response.

pub mod change_role;
pub mod login;
pub mod logout;
pub mod oauth_login;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod resend_code;
pub mod verify_email;
pub mod verify_token;

pub use change_role::{ChangeRoleBody, handle_change_role};
pub use login::{LoginBody, handle_login};
pub use logout::handle_logout;
pub use oauth_login::{OAuthLoginBody, handle_oauth_login};
pub use profile::{
    UpdateProfileBody, handle_doctor_profile, handle_get_me, handle_patient_profile,
    handle_update_me,
};
pub use refresh::handle_refresh;
pub use register::{RegisterBody, handle_register};
pub use resend_code::{ResendCodeBody, handle_resend_code};
pub use verify_email::{VerifyEmailBody, handle_verify_email};
pub use verify_token::handle_verify_token;
