//! `/trust-proofs` controller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Method, Reply, Request, Router};

/// A published trust proof. Digests and signature are base64 text and are
/// not interpreted here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustProof {
    pub metadata_digest: String,
    pub dataset_digest: String,
    pub signature: String,
    pub did_publisher: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrustProofList<'a> {
    trust_proofs: &'a [TrustProof],
}

#[derive(Debug, Default)]
pub struct TrustProofsController {
    proofs: Vec<TrustProof>,
}

impl TrustProofsController {
    pub fn new(proofs: Vec<TrustProof>) -> Self {
        Self { proofs }
    }

    /// `GET /trust-proofs`, relative to wherever the router is mounted.
    pub fn routes(self: Arc<Self>) -> Router {
        Router::new().on(Method::Get, "/trust-proofs", move |req: Request| {
            let controller = Arc::clone(&self);
            async move { controller.create_trust_proof(req).await }
        })
    }

    pub async fn create_trust_proof(&self, req: Request) -> Reply {
        tracing::debug!(path = req.path(), count = self.proofs.len(), "serving trust proofs");
        Reply::raw(TrustProofList { trust_proofs: &self.proofs })
    }
}
