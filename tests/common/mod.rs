//! Common test infrastructure
//!
//! Mock HTTP servers standing in for the creature API and the hosted store,
//! plus helpers that wire an [`AppContext`] against them.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{sqlite_app, MockCreatureApi, SMALL_CATALOG_SIZE};
//!
//! #[tokio::test]
//! async fn test_sync() {
//!     let api = MockCreatureApi::spawn(SMALL_CATALOG_SIZE).await;
//!     let (app, _dir) = sqlite_app(&api, SMALL_CATALOG_SIZE);
//!     let outcome = app.synchronizer().synchronize().await.unwrap();
//!     assert!(outcome.populated);
//! }
//! ```

mod constants;
mod fixtures;
mod mock_store;

#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{creature_detail_json, creature_name};
pub use mock_source::MockCreatureApi;
#[allow(unused_imports)]
pub use mock_store::MockRestStore;

use pokecounter_catalog::config::{builtin_default_location, AppConfig, StoreSettings};
use pokecounter_catalog::AppContext;
use tempfile::TempDir;

fn app_config(store: StoreSettings, source_url: &str, catalog_size: u32) -> AppConfig {
    AppConfig {
        store,
        source_url: source_url.to_string(),
        expected_catalog_size: catalog_size as usize,
        request_timeout_sec: 5,
        default_location: builtin_default_location(),
    }
}

/// An app backed by a SQLite file in a fresh temp dir. Keep the dir alive
/// for as long as the app is used.
#[allow(dead_code)]
pub fn sqlite_app(api: &MockCreatureApi, catalog_size: u32) -> (AppContext, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let app = sqlite_app_in(&dir, api, catalog_size);
    (app, dir)
}

/// An app over `catalog.db` inside `dir`, for tests that reopen the same file.
#[allow(dead_code)]
pub fn sqlite_app_in(dir: &TempDir, api: &MockCreatureApi, catalog_size: u32) -> AppContext {
    sqlite_app_with_source(dir, &api.base_url, catalog_size)
}

/// An app over `catalog.db` inside `dir` that fetches from `source_url`.
#[allow(dead_code)]
pub fn sqlite_app_with_source(dir: &TempDir, source_url: &str, catalog_size: u32) -> AppContext {
    let store = StoreSettings::Sqlite {
        db_path: dir.path().join("catalog.db"),
    };
    AppContext::from_config(app_config(store, source_url, catalog_size))
        .expect("Failed to build SQLite app")
}

/// Base URL of a local port nothing listens on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let port = listener
        .local_addr()
        .expect("Failed to get local address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/v2", port)
}

/// An app backed by the mock hosted store.
#[allow(dead_code)]
pub fn rest_app(store: &MockRestStore, api: &MockCreatureApi, catalog_size: u32) -> AppContext {
    let settings = StoreSettings::Rest {
        url: store.base_url.clone(),
        api_key: TEST_STORE_API_KEY.to_string(),
    };
    AppContext::from_config(app_config(settings, &api.base_url, catalog_size))
        .expect("Failed to build REST app")
}
