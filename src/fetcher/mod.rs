pub mod client;
pub mod errors;
pub mod retry;
pub mod types;

pub use errors::FetchError;
pub use retry::{FetchPolicy, Fetcher};
pub use types::PageResponse;
