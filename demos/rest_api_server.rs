//! REST API server example
//!
//! Starts the playlist-grab REST API on the configured bind address.
//! Once running:
//! - `POST /playlist` with `{"playlist_ref": "PLxxxxx"}` fetches metadata
//! - `POST /grab` runs a full resolution and returns the summary
//! - `GET /events` streams progress as server-sent events
//! - `GET /swagger-ui` serves interactive documentation

use playlist_grab::api::start_api_server;
use playlist_grab::{Config, ConcurrencyMode, PlaylistGrabber};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        concurrency: ConcurrencyMode::Bounded { workers: 10 },
        ..Default::default()
    };

    let config = Arc::new(config);
    let grabber = Arc::new(PlaylistGrabber::new((*config).clone())?);

    println!("API listening on http://{}", config.api.bind_address);
    println!("Swagger UI at http://{}/swagger-ui", config.api.bind_address);

    // Serves until the process is terminated
    start_api_server(grabber, config).await?;

    Ok(())
}
