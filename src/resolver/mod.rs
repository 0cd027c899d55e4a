//! Direct-link resolvers
//!
//! A [`LinkResolver`] turns one playlist entry plus a quality preference
//! into a time-limited direct download link. The shipped implementation
//! shells out to yt-dlp; tests inject scripted resolvers through the same
//! trait.

mod ytdlp;

pub use ytdlp::YtDlpResolver;

use crate::error::ResolveError;
use crate::types::{DirectLink, Quality, VideoEntry};
use async_trait::async_trait;

/// Resolution client boundary
///
/// One call resolves one entry. Failures are typed ([`ResolveError`]) so
/// the retry controller can carry a meaningful diagnostic into the terminal
/// per-item outcome; the engine never sees these errors directly.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Resolve a direct link for one entry
    async fn resolve(
        &self,
        entry: &VideoEntry,
        quality: Quality,
    ) -> Result<DirectLink, ResolveError>;

    /// Short identifier for logging
    fn name(&self) -> &'static str;
}
