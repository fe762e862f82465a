mod api;

use argh::FromArgs;
use axum::{routing::get, Router};
use std::{path::PathBuf, sync::Arc};
use tower_http::services::ServeDir;

#[derive(FromArgs)]
/// Serve a sparse reconstruction visualization and its query API.
struct Args {
    /// directory the static assets and dataset are served from
    #[argh(option, short = 'r', default = "PathBuf::from(\".\")")]
    root_dir: PathBuf,

    /// path of the exported reconstruction document, relative to the root
    #[argh(option, default = "PathBuf::from(\"data/fern/reconstruction.json\")")]
    reconstruction: PathBuf,

    /// directory containing the dataset images, relative to the root
    #[argh(option, default = "PathBuf::from(\"data/fern/images_8\")")]
    images_dir: PathBuf,

    /// port to listen on
    #[argh(option, short = 'p', default = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let state = Arc::new(api::AppState {
        reconstruction: args.root_dir.join(&args.reconstruction),
        images_dir: args.root_dir.join(&args.images_dir),
        root_dir: args.root_dir.clone(),
    });

    log::info!("🚀 Starting the server");
    log::info!("🔥 Listening on: http://0.0.0.0:{}", args.port);
    log::info!("🔧 Press Ctrl+C to stop the server");

    // API routes first, everything else is served from the root directory
    let app = Router::new()
        .route("/api/images", get(api::list_images))
        .route("/api/intrinsics", get(api::get_intrinsics))
        .fallback_service(ServeDir::new(&args.root_dir))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
