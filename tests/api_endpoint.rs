use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use quickpick::server::{router, AppState};
use quickpick::{Catalog, DataResponse};

fn test_router(count: usize) -> axum::Router {
    router(Arc::new(AppState {
        catalog: Catalog::new(count),
    }))
}

async fn get_data(app: axum::Router) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/data")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();

    (status, bytes.to_vec())
}

#[tokio::test]
async fn data_endpoint_serves_the_full_collection() {
    let (status, body) = get_data(test_router(50)).await;

    assert_eq!(status, StatusCode::OK);

    let payload: DataResponse = serde_json::from_slice(&body).expect("payload");
    assert_eq!(payload.total, 50);
    assert_eq!(payload.data.len(), 50);
    assert_eq!(payload.data[0].datasource, "ironbank");
    assert_eq!(payload.data[0].name, "测试RAG问答_000001");
}

#[tokio::test]
async fn data_endpoint_is_idempotent() {
    let app = test_router(20);

    let (_, first) = get_data(app.clone()).await;
    let (_, second) = get_data(app).await;

    let first: DataResponse = serde_json::from_slice(&first).expect("first");
    let second: DataResponse = serde_json::from_slice(&second).expect("second");

    assert_eq!(
        first.data.iter().map(|r| &r.pid).collect::<Vec<_>>(),
        second.data.iter().map(|r| &r.pid).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_router(5);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/other")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
