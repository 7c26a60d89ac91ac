use async_trait::async_trait;

/// Trait for validating callers of protected routes in middleware.
///
/// A validator reads the credentials it cares about from the request parts,
/// verifies them and produces the identity that downstream handlers see.
///
/// The validator receives `RequestParts` (headers, method, URI, extensions)
/// rather than the full request so that non-`Sync` bodies never have to be
/// shared across the validation await point.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The verified identity attached to the request on success.
    type Claims: Clone + Send + Sync + 'static;

    /// The request parts type this validator operates on.
    ///
    /// Typically `http::request::Parts`.
    type RequestParts;

    /// Errors that can occur during validation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate the caller from the request parts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credentials are present or they are malformed
    /// - The token is invalid or expired
    /// - The caller's role does not satisfy the route
    /// - The backing store cannot be reached
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
