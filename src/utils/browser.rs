use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("could not open {url}: {source}")]
pub struct NavigationError {
    pub url: String,
    #[source]
    pub source: std::io::Error,
}

pub trait Navigator {
    fn navigate(&self, url: &str) -> Result<(), NavigationError>;
}

/// Opens the result page in the system browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), NavigationError> {
        info!("Opening result page {}", url);
        open::that(url).map_err(|source| NavigationError {
            url: url.to_string(),
            source,
        })
    }
}
