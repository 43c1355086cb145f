//! # trustproofs
//!
//! A small HTTP service that answers `GET /api/trust-proofs` with JSON.
//!
//! The pieces, in request order:
//!
//! - [`Server`] — hyper listener (HTTP/1.1 and HTTP/2), graceful shutdown on
//!   SIGTERM / Ctrl-C
//! - [`Router`] — radix-tree routing via [`matchit`], `/api` mounted with
//!   [`Router::nest`]
//! - [`controllers::TrustProofsController`] — produces the payload
//! - [`write_json`] — turns a [`Reply`] into exactly one JSON [`Response`]
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use trustproofs::controllers::TrustProofsController;
//! use trustproofs::{app, Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trustproofs::Error> {
//!     let config = Config::from_env()?;
//!     let router = app::build(Arc::new(TrustProofsController::default()));
//!     Server::bind(config.addr()).serve(router).await
//! }
//! ```
//!
//! ## Writing handlers
//!
//! A handler is any `async fn(Request) -> impl IntoResponse`. JSON handlers
//! return a [`Reply`], or a [`ResponsePayload`] from [`respond_with_code`]
//! when the status is not `200`:
//!
//! ```rust
//! use trustproofs::{respond_with_code, Reply, Request, ResponsePayload};
//! use serde_json::json;
//!
//! async fn ok(_req: Request) -> Reply {
//!     Reply::raw(json!({ "trustProofs": [] }))
//! }
//!
//! async fn missing(_req: Request) -> ResponsePayload {
//!     respond_with_code(404, json!({ "error": "no such proof" }))
//! }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod writer;

pub mod app;
pub mod controllers;
pub mod health;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use writer::{respond_with_code, write_json, Reply, ResponsePayload};
