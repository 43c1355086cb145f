//! Route table for the whole service.

use std::sync::Arc;

use crate::controllers::TrustProofsController;
use crate::{health, Method, Request, Router};

/// Builds the root router: `/`, the health probes, and the `/api` mount.
pub fn build(controller: Arc<TrustProofsController>) -> Router {
    Router::new()
        .on(Method::Get, "/", index)
        .on(Method::Get, "/healthz", health::liveness)
        .on(Method::Get, "/readyz", health::readiness)
        .nest("/api", controller.routes())
}

async fn index(_req: Request) -> &'static str {
    "Hello world!"
}
