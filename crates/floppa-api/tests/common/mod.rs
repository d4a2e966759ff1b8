//! Shared fixtures for gateway tests.

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use floppa_api::{AnimalConfig, AnimalRegistry, AppState, GatewayConfig, SourceConfig, build_router};
use floppa_core::{CollectionName, StoreUrl};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

/// A gateway wired to a mock store and a temporary image directory.
pub struct Gateway {
    pub store: MockServer,
    pub images: TempDir,
    pub frontend: TempDir,
    pub router: Router,
}

impl Gateway {
    pub async fn start() -> Self {
        Self::with_timeout(Duration::from_secs(10)).await
    }

    /// Start with a custom per-request deadline.
    pub async fn with_timeout(request_timeout: Duration) -> Self {
        let store = MockServer::start().await;
        let images = tempfile::tempdir().unwrap();
        let frontend = tempfile::tempdir().unwrap();

        let config = config(&store, images.path(), frontend.path());
        let registry = AnimalRegistry::from_config(&config).unwrap();
        let router = build_router(AppState::new(registry, request_timeout), frontend.path());

        Self {
            store,
            images,
            frontend,
            router,
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// `floppapi` from a local directory, `macka` and `capybara` from the store.
pub fn config(store: &MockServer, images: &Path, frontend: &Path) -> GatewayConfig {
    let pocketbase = |collection: &str| SourceConfig::PocketBase {
        collection: CollectionName::new(collection).unwrap(),
    };

    GatewayConfig {
        pocketbase_url: Some(StoreUrl::new(store.uri()).unwrap()),
        frontend_dir: frontend.to_path_buf(),
        animals: vec![
            AnimalConfig {
                endpoint: "floppapi".to_string(),
                title: "Floppa".to_string(),
                description: "Local floppa".to_string(),
                source: SourceConfig::Local {
                    directory: images.to_path_buf(),
                },
                external_id_lookup: false,
            },
            AnimalConfig {
                endpoint: "macka".to_string(),
                title: "Macka".to_string(),
                description: String::new(),
                source: pocketbase("macky"),
                external_id_lookup: true,
            },
            AnimalConfig {
                endpoint: "capybara".to_string(),
                title: "Capybara".to_string(),
                description: String::new(),
                source: pocketbase("capybaras"),
                external_id_lookup: false,
            },
        ],
        ..GatewayConfig::default()
    }
}

pub fn page(items: Value, total: u64) -> Value {
    json!({
        "page": 1,
        "perPage": 1,
        "totalItems": total,
        "totalPages": total,
        "items": items
    })
}

/// Serve one random record of `collection` with the given file.
pub async fn mount_random_record(server: &MockServer, collection: &str, id: &str, views: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/api/collections/{collection}/records")))
        .and(query_param("sort", "@random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": id, "image": "pic.jpg", "views": views}]),
            1,
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/files/{collection}/{id}/pic.jpg")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG))
        .mount(server)
        .await;
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
