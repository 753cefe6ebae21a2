//! The "analyze a photo" capability and its two implementations.
//!
//! [`RemoteAnalyzer`] posts the photo to the nutrition backend;
//! [`PlaceholderAnalyzer`] fabricates canned results for demos. Which one the
//! app uses is fixed at build time through [`DefaultAnalyzer`].

use std::future::Future;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::AnalysisResult;
use crate::selection::SelectedImage;

mod placeholder;
mod remote;

pub use placeholder::{canned_results, PlaceholderAnalyzer, PLACEHOLDER_DELAY};
pub use remote::{interpret_response, RemoteAnalyzer};

/// Something that can turn a photo into a nutrition estimate
pub trait Analyzer {
    /// Run one best-effort analysis of `image`.
    fn analyze(
        &self,
        image: &SelectedImage,
    ) -> impl Future<Output = AppResult<AnalysisResult>> + Send;

    /// Check that the analyzer is reachable.
    fn health(&self) -> impl Future<Output = AppResult<()>> + Send;
}

#[cfg(not(feature = "placeholder"))]
pub type DefaultAnalyzer = RemoteAnalyzer;

#[cfg(feature = "placeholder")]
pub type DefaultAnalyzer = PlaceholderAnalyzer;

/// Build the analyzer this binary was compiled to use.
#[cfg(not(feature = "placeholder"))]
pub fn default_analyzer(config: &Config) -> AppResult<DefaultAnalyzer> {
    RemoteAnalyzer::new(config.clone())
}

/// Build the analyzer this binary was compiled to use.
#[cfg(feature = "placeholder")]
pub fn default_analyzer(_config: &Config) -> AppResult<DefaultAnalyzer> {
    Ok(PlaceholderAnalyzer::new())
}
