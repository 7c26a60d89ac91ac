//! The CareFlow identity HTTP service: router assembly, request tracing and
//! the startup helpers used by the binary.

pub mod careflow_service;
pub mod helpers;
pub mod tracing;

pub use careflow_service::CareflowService;
