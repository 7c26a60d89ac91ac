use careflow_core::{Email, EmailClient, EmailClientError, VerificationCode};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use super::{render_verification_html, render_verification_text, verification_subject};

/// Delivers verification codes through the Postmark HTTP API.
///
/// Requests are single attempt; the timeout is whatever the injected
/// `reqwest::Client` was built with.
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }

    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), EmailClientError> {
        let base =
            Url::parse(&self.base_url).map_err(|e| EmailClientError::Delivery(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?;

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            html_body,
            text_body,
            message_stream: MESSAGE_STREAM,
        };

        self.http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending verification email", skip_all)]
    async fn send_verification_code(
        &self,
        recipient: &Email,
        code: &VerificationCode,
    ) -> Result<(), EmailClientError> {
        let html = render_verification_html(code)?;
        let text = render_verification_text(code);

        self.send_email(recipient, &verification_subject(code), &html, &text)
            .await
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
