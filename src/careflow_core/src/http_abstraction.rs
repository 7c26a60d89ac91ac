//! The request and response surface the session transport works against.
//!
//! Client-shape detection reads `User-Agent`, web refresh reads the session
//! cookie, and every flow answers with a status, optional `Set-Cookie`
//! headers and a JSON envelope. Those are the only HTTP details the flows
//! need, so they are all these traits expose. `careflow_axum` implements them
//! over `HeaderMap` and `axum::response::Response`; tests use small capturing
//! builders.

/// Headers and cookies of an incoming request.
pub trait AuthRequest {
    /// Header value by case-insensitive name; `None` when absent or not UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Value of the named cookie from the `Cookie` header.
    fn cookie(&self, name: &str) -> Option<&str>;

    fn user_agent(&self) -> Option<&str> {
        self.header("user-agent")
    }
}

/// Accumulates a response and hands back the framework's response type.
pub trait AuthResponseBuilder: Sized {
    type Response;

    fn status(self, code: u16) -> Self;

    fn header(self, name: &str, value: &str) -> Self;

    /// Append a `Set-Cookie` header carrying an already rendered cookie.
    fn cookie(self, cookie_value: &str) -> Self {
        self.header("set-cookie", cookie_value)
    }

    /// JSON body, sent as `application/json`.
    fn json_body(self, body: serde_json::Value) -> Self;

    fn build(self) -> Self::Response;
}

/// The two envelopes every route answers with.
pub trait AuthResponseHelpers: AuthResponseBuilder {
    /// `{"message": ..., "data": ...}`; `data` is omitted when `None`.
    fn success(self, status: u16, message: &str, data: Option<serde_json::Value>) -> Self::Response {
        let body = match data {
            Some(data) => serde_json::json!({ "message": message, "data": data }),
            None => serde_json::json!({ "message": message }),
        };
        self.status(status).json_body(body).build()
    }

    /// `{"error": ...}`
    fn error(self, status: u16, message: &str) -> Self::Response {
        self.status(status)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }
}

impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}
