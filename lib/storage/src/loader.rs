// Restaurant document loading
// Network errors, bad statuses, unreadable files and malformed documents all
// surface as one LoadError; the cause is kept for logging.

use bytes::Bytes;
use nsbbites_core::{Collection, RestaurantDocument};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use crate::DataSource;

#[derive(Error, Debug)]
#[error("Unable to load restaurants from {location}: {cause}")]
pub struct LoadError {
    pub location: String,
    #[source]
    pub cause: LoadCause,
}

#[derive(Error, Debug)]
pub enum LoadCause {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Invalid document: {0}")]
    Document(#[from] nsbbites_core::Error),

    #[error("{0}")]
    Other(String),
}

impl LoadError {
    pub fn new(location: impl Into<String>, cause: impl Into<LoadCause>) -> Self {
        Self {
            location: location.into(),
            cause: cause.into(),
        }
    }
}

/// Fetches the raw document bytes from a fixed location
pub trait Fetch {
    fn location(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<Bytes, LoadError>> + Send;
}

pub struct FileFetch {
    path: PathBuf,
}

impl FileFetch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetch for FileFetch {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Bytes, LoadError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::new(self.location(), e))?;
        Ok(Bytes::from(data))
    }
}

pub struct HttpFetch {
    client: reqwest::Client,
    url: String,
}

impl HttpFetch {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Fetch for HttpFetch {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Bytes, LoadError> {
        let response = self.client.get(&self.url).send().await
            .map_err(|e| LoadError::new(self.location(), e))?;

        if !response.status().is_success() {
            return Err(LoadError::new(
                self.location(),
                LoadCause::Status(response.status().as_u16()),
            ));
        }

        response.bytes().await
            .map_err(|e| LoadError::new(self.location(), e))
    }
}

/// Fetch for a [`DataSource`] chosen at runtime
pub enum SourceFetch {
    File(FileFetch),
    Http(HttpFetch),
}

impl From<DataSource> for SourceFetch {
    fn from(source: DataSource) -> Self {
        match source {
            DataSource::File(path) => SourceFetch::File(FileFetch::new(path)),
            DataSource::Url(url) => SourceFetch::Http(HttpFetch::new(url)),
        }
    }
}

impl Fetch for SourceFetch {
    fn location(&self) -> String {
        match self {
            SourceFetch::File(f) => f.location(),
            SourceFetch::Http(h) => h.location(),
        }
    }

    async fn fetch(&self) -> Result<Bytes, LoadError> {
        match self {
            SourceFetch::File(f) => f.fetch().await,
            SourceFetch::Http(h) => h.fetch().await,
        }
    }
}

/// Loads the ordered restaurant collection. Every call fetches again;
/// nothing is cached between calls.
pub struct Loader<F> {
    fetch: F,
}

impl Loader<SourceFetch> {
    pub fn from_source(source: DataSource) -> Self {
        Self::new(SourceFetch::from(source))
    }
}

impl<F: Fetch> Loader<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }

    pub fn location(&self) -> String {
        self.fetch.location()
    }

    pub async fn load(&self) -> Result<Collection, LoadError> {
        let location = self.fetch.location();
        debug!("Fetching restaurants from {}", location);

        let bytes = self.fetch.fetch().await?;
        let doc = RestaurantDocument::from_slice(&bytes)
            .map_err(|e| LoadError::new(location.clone(), e))?;

        info!("Parsed {} restaurants from {}", doc.restaurants.len(), location);
        Ok(Collection::from_document(doc))
    }
}
