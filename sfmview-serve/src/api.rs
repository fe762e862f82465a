use axum::{extract::State, response::Json};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};

use sfmview_3d::export::ExportDocument;

/// Paths resolved once at startup and shared across requests.
pub struct AppState {
    /// Directory static files are served from
    pub root_dir: PathBuf,
    /// Location of the exported reconstruction document
    pub reconstruction: PathBuf,
    /// Directory containing the dataset images
    pub images_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImageEntry {
    name: String,
    path: String,
}

/// List the dataset images available for display, sorted by name.
///
/// A missing images directory yields an empty list.
pub async fn list_images(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut images = walkdir::WalkDir::new(&state.images_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "png")
                    .unwrap_or(false)
        })
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let relative = entry
                .path()
                .strip_prefix(&state.root_dir)
                .unwrap_or(entry.path());
            Some(ImageEntry {
                name,
                path: format!("/{}", relative.display()),
            })
        })
        .collect::<Vec<_>>();
    images.sort_by(|a, b| a.name.cmp(&b.name));

    Json(serde_json::json!({ "images": images }))
}

/// Return the camera intrinsics cached in the exported reconstruction.
///
/// An absent or unreadable document yields an empty mapping rather than an
/// error, so the frontend keeps working before an export has run.
pub async fn get_intrinsics(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match ExportDocument::read_json(&state.reconstruction) {
        Ok(document) => Json(serde_json::json!({
            "camera_intrinsics": document.camera_intrinsics
        })),
        Err(error) => {
            log::warn!("reconstruction document unavailable: {}", error);
            Json(serde_json::json!({ "camera_intrinsics": {} }))
        }
    }
}
