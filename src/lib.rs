//! Admission Portal: client for the online college-admission backend
//!
//! Students follow their applications, admission outcome and fee payment;
//! administrators review admissions and payment records. All decisions and
//! persistence live in the backend. This crate fetches over REST, keeps
//! per-view load state and renders pages for the terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
// REST wrappers: one trait method per backend endpoint
pub mod services;
pub mod ui;
pub mod views;

pub use app::Portal;
pub use error::{PortalError, Result};
