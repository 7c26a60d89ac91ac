pub mod change_role;
pub mod login;
pub mod oauth_login;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod resend_code;
pub mod session;
pub mod verify_email;

// Re-export for convenience
pub use change_role::ChangeRoleUseCase;
pub use login::{LoginError, LoginUseCase};
pub use oauth_login::{OAuthLoginError, OAuthLoginUseCase};
pub use profile::{DoctorProfileUseCase, GetProfileUseCase, PatientProfileUseCase, UpdateProfileUseCase};
pub use refresh::{RefreshError, RefreshUseCase};
pub use register::{RegisterError, RegisterUseCase};
pub use resend_code::{ResendCodeError, ResendCodeUseCase};
pub use session::issue_session;
pub use verify_email::{VerifyEmailError, VerifyEmailUseCase};
