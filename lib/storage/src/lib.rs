pub mod source;
pub mod loader;

pub use source::DataSource;
pub use loader::{Fetch, FileFetch, HttpFetch, LoadCause, LoadError, Loader, SourceFetch};
