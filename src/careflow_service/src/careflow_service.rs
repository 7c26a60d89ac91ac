use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use careflow_adapters::{
    authentication::{AuthFlow, JwtTokenService},
    config::AllowedOrigins,
};
use careflow_axum::{
    middleware::require_role,
    routes::{
        change_role, doctor_me, get_me, login, logout, oauth_login, patient_me, refresh, register,
        resend_code, update_me, verify_email, verify_token,
    },
};
use careflow_core::{CredentialStore, EmailClient, OAuthProvider, Role, RoleRequirement};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The identity service: public auth routes plus the role-gated surfaces.
pub struct CareflowService {
    router: Router,
}

impl CareflowService {
    /// Build every route over one shared [`AuthFlow`].
    ///
    /// Each protected family gets its own Role Gate:
    /// `/auth/verify` and `/me` accept any role, `/patient/*` patients only,
    /// `/doctor/*` doctors only and `/admin/*` admins only.
    pub fn new<S, E, O>(flow: AuthFlow<S, E, O>) -> Self
    where
        S: CredentialStore + 'static,
        E: EmailClient + 'static,
        O: OAuthProvider + 'static,
    {
        let gate = |requirement| {
            from_fn_with_state(
                (flow.role_gate(requirement), flow.transport().clone()),
                require_role::<S, JwtTokenService>,
            )
        };

        let public = Router::new()
            .route("/auth/register", post(register::<S, E, O>))
            .route("/auth/login", post(login::<S, E, O>))
            .route("/auth/oauth/google", post(oauth_login::<S, E, O>))
            .route("/auth/verify-email", post(verify_email::<S, E, O>))
            .route("/auth/resend-verification", post(resend_code::<S, E, O>))
            .route("/auth/refresh-token", post(refresh::<S, E, O>))
            .route("/auth/logout", post(logout::<S, E, O>));

        let any_role = Router::new()
            .route("/auth/verify", get(verify_token))
            .route("/me", get(get_me::<S, E, O>).put(update_me::<S, E, O>))
            .route_layer(gate(RoleRequirement::Any));

        let patient = Router::new()
            .route("/patient/me", get(patient_me::<S, E, O>))
            .route_layer(gate(RoleRequirement::Only(Role::Patient)));

        let doctor = Router::new()
            .route("/doctor/me", get(doctor_me::<S, E, O>))
            .route_layer(gate(RoleRequirement::Only(Role::Doctor)));

        let admin = Router::new()
            .route("/admin/users/{id}/role", put(change_role::<S, E, O>))
            .route_layer(gate(RoleRequirement::Only(Role::Admin)));

        let router = public
            .merge(any_role)
            .merge(patient)
            .merge(doctor)
            .merge(admin)
            .with_state(flow);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router.
    ///
    /// Credentialed CORS is enabled for exactly the listed origins; with no
    /// origins configured no CORS layer is installed.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve until the listener fails.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("CareFlow identity service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
