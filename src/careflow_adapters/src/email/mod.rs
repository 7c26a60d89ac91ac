pub mod mock_email_client;
pub mod postmark_email_client;

pub use mock_email_client::{MockEmailClient, SentCode};
pub use postmark_email_client::PostmarkEmailClient;

use askama::Template;
use careflow_core::{CODE_TTL_MINUTES, EmailClientError, VerificationCode};

#[derive(Template)]
#[template(path = "verification_email.html")]
struct VerificationEmailTemplate<'a> {
    code: &'a str,
    ttl_minutes: i64,
}

/// Subject line of the verification email.
pub fn verification_subject(code: &VerificationCode) -> String {
    format!("{} is your verification code", code.as_str())
}

/// HTML body of the verification email.
pub fn render_verification_html(code: &VerificationCode) -> Result<String, EmailClientError> {
    VerificationEmailTemplate {
        code: code.as_str(),
        ttl_minutes: CODE_TTL_MINUTES,
    }
    .render()
    .map_err(|e| EmailClientError::Template(e.to_string()))
}

/// Plain-text alternative of the verification email.
pub fn render_verification_text(code: &VerificationCode) -> String {
    format!(
        "Your CareFlow verification code is {}. It expires in {} minutes.",
        code.as_str(),
        CODE_TTL_MINUTES
    )
}
