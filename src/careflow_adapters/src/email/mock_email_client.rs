use std::sync::{Arc, Mutex};

use careflow_core::{Email, EmailClient, EmailClientError, VerificationCode};
use secrecy::ExposeSecret;

/// A verification code captured instead of being delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub recipient: String,
    pub code: String,
}

/// Email client that records outgoing codes, for development and tests.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<Mutex<Vec<SentCode>>>,
    fail: bool,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentCode> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// The most recent code sent to `recipient`.
    pub fn last_code_for(&self, recipient: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|sent| sent.recipient == recipient)
            .map(|sent| sent.code)
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_verification_code(
        &self,
        recipient: &Email,
        code: &VerificationCode,
    ) -> Result<(), EmailClientError> {
        if self.fail {
            return Err(EmailClientError::Delivery(
                "mock email client is configured to fail".to_owned(),
            ));
        }

        let recipient = recipient.as_ref().expose_secret().clone();
        tracing::debug!(%recipient, "recording verification code");
        self.sent
            .lock()
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?
            .push(SentCode {
                recipient,
                code: code.as_str().to_owned(),
            });
        Ok(())
    }
}
