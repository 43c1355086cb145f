//! Route-level tests for the assembled application.

use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Empty;
use trustproofs::controllers::{TrustProof, TrustProofsController};
use trustproofs::{app, respond_with_code, Method, Reply, Request, ResponsePayload, Router};

fn get(path: &str) -> http::Request<Empty<Bytes>> {
    http::Request::get(path).body(Empty::new()).unwrap()
}

fn sample_proof() -> TrustProof {
    TrustProof {
        metadata_digest: "bWV0YQ==".to_owned(),
        dataset_digest: "ZGF0YQ==".to_owned(),
        signature: "c2ln".to_owned(),
        did_publisher: "did:iota:publisher".to_owned(),
    }
}

#[tokio::test]
async fn test_trust_proofs_default_is_200_json() {
    let app = app::build(Arc::new(TrustProofsController::default()));

    let res = app.dispatch(get("/api/trust-proofs")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("application/json"));
    let json: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(json, serde_json::json!({ "trustProofs": [] }));
}

#[tokio::test]
async fn test_trust_proofs_body_is_indented_camel_case() {
    let controller = TrustProofsController::new(vec![sample_proof()]);
    let app = app::build(Arc::new(controller));

    let res = app.dispatch(get("/api/trust-proofs")).await;
    let body = std::str::from_utf8(res.body()).unwrap();

    assert!(body.starts_with("{\n  \"trustProofs\": [\n    {\n"));
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["trustProofs"][0]["didPublisher"], "did:iota:publisher");
    assert_eq!(json["trustProofs"][0]["metadataDigest"], "bWV0YQ==");
}

#[tokio::test]
async fn test_wrapper_status_reaches_the_wire() {
    async fn conflict(_req: Request) -> ResponsePayload {
        respond_with_code(409, serde_json::json!({ "error": "duplicate proof" }))
    }
    let app = Router::new().nest("/api", Router::new().on(Method::Get, "/trust-proofs", conflict));

    let res = app.dispatch(get("/api/trust-proofs")).await;

    assert_eq!(res.status_code(), StatusCode::CONFLICT);
    assert_eq!(res.body(), b"{\n  \"error\": \"duplicate proof\"\n}");
}

#[tokio::test]
async fn test_root_and_probes() {
    let app = app::build(Arc::new(TrustProofsController::default()));

    let root = app.dispatch(get("/")).await;
    assert_eq!(root.status_code(), StatusCode::OK);
    assert_eq!(root.body(), b"Hello world!");

    for path in ["/healthz", "/readyz"] {
        let res = app.dispatch(get(path)).await;
        assert_eq!(res.status_code(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_unknown_path_and_wrong_method() {
    let app = app::build(Arc::new(TrustProofsController::default()));

    assert_eq!(app.dispatch(get("/trust-proofs")).await.status_code(), StatusCode::NOT_FOUND);

    let post = http::Request::post("/api/trust-proofs").body(Empty::<Bytes>::new()).unwrap();
    assert_eq!(app.dispatch(post).await.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_falsy_payloads_reach_the_body() {
    let app = Router::new()
        .on(Method::Get, "/zero", |_req: Request| async { Reply::raw(0) })
        .on(Method::Get, "/false", |_req: Request| async { Reply::raw(false) });

    for (path, expected) in [("/zero", "0"), ("/false", "false")] {
        let res = app.dispatch(get(path)).await;
        assert_eq!(res.status_code(), StatusCode::OK, "{path}");
        assert_eq!(res.header("content-type"), Some("application/json"), "{path}");
        assert_eq!(res.body(), expected.as_bytes(), "{path}");
    }
}

#[tokio::test]
async fn test_out_of_range_code_falls_back_to_200() {
    async fn bogus(_req: Request) -> ResponsePayload {
        respond_with_code(700, serde_json::json!({ "ok": false }))
    }
    let app = Router::new().on(Method::Get, "/bogus", bogus);

    let res = app.dispatch(get("/bogus")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.body(), b"{\n  \"ok\": false\n}");
}

#[tokio::test]
async fn test_head_trust_proofs_has_headers_only() {
    let app = app::build(Arc::new(TrustProofsController::default()));
    let head = http::Request::head("/api/trust-proofs").body(Empty::<Bytes>::new()).unwrap();

    let res = app.dispatch(head).await;
    let full = app.dispatch(get("/api/trust-proofs")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert!(res.body().is_empty());
    assert_eq!(res.header("content-length"), Some(full.body().len().to_string().as_str()));
}

#[tokio::test]
async fn test_trailing_slash_is_served() {
    let app = app::build(Arc::new(TrustProofsController::default()));

    let res = app.dispatch(get("/api/trust-proofs/")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.body(), b"{\n  \"trustProofs\": []\n}");
}
