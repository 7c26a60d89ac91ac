pub mod google_oauth_provider;

pub use google_oauth_provider::GoogleOAuthProvider;
