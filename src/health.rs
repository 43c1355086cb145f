//! Liveness and readiness probes.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it serve traffic? Failure → pulled from the load balancer. |
//!
//! Both answer in the same JSON shape as the rest of the service.

use serde_json::json;

use crate::{Reply, Request};

/// Always `200 {"status": "ok"}`. If the process can answer HTTP, it is alive.
pub async fn liveness(_req: Request) -> Reply {
    Reply::raw(json!({ "status": "ok" }))
}

/// `200 {"status": "ready"}`. The service has no dependencies to wait on.
pub async fn readiness(_req: Request) -> Reply {
    Reply::raw(json!({ "status": "ready" }))
}
