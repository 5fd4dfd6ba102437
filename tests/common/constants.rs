//! Shared constants for end-to-end tests

/// Key the mock store expects in both the `apikey` and bearer headers.
pub const TEST_STORE_API_KEY: &str = "test-anon-key";

/// Catalog size used by suites that do not need the full 151 entries.
pub const SMALL_CATALOG_SIZE: u32 = 9;

/// Full reference catalog size.
pub const FULL_CATALOG_SIZE: u32 = 151;

/// Id of "bulbasaur" in the mock creature API.
pub const BULBASAUR_ID: u32 = 1;

/// Id of "charmander" in the mock creature API.
pub const CHARMANDER_ID: u32 = 4;
