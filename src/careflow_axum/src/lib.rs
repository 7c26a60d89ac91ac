//! Axum glue for the CareFlow identity service.
//!
//! [`AxumRequest`] and [`AxumResponseBuilder`] let the handlers in
//! `careflow_adapters` read headers and write responses without knowing about
//! Axum. [`require_role`] runs a `RoleGate` in front of a route family and
//! stores the verified `SessionClaims` as a request extension.
//!
//! ```ignore
//! let protected = Router::new()
//!     .route("/me", get(routes::get_me::<S, E, O>))
//!     .route_layer(from_fn_with_state(
//!         (flow.role_gate(RoleRequirement::Any), flow.transport().clone()),
//!         require_role::<S, JwtTokenService>,
//!     ));
//! ```

pub mod adapters;
pub mod middleware;
pub mod routes;

pub use adapters::{AxumRequest, AxumResponseBuilder, render_error, response_builder};
pub use middleware::require_role;
