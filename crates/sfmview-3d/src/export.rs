use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::io::colmap::{ColmapCamera, ColmapImage, ColmapPoint3d};
use crate::pointcloud::PointCloud;
use crate::transforms::{camera_center, view_direction};

/// Error types for the export module.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize the document
    #[error("failed to serialize or deserialize the document")]
    Json(#[from] serde_json::Error),
}

/// A single point of the visualization payload: position and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// x coordinate
    pub x: f64,
    /// y coordinate
    pub y: f64,
    /// z coordinate
    pub z: f64,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

/// A camera pose derived from a registered image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPoseRecord {
    /// Image id
    pub id: i32,
    /// Image file name
    pub name: String,
    /// Camera center in world coordinates
    pub position: [f64; 3],
    /// Viewing direction in world coordinates
    pub view_direction: [f64; 3],
    /// The original pose quaternion, scalar-first (w, x, y, z)
    pub qvec: [f64; 4],
    /// Camera id of the intrinsics used by this image
    pub camera_id: i32,
}

/// The assembled reconstruction document consumed by the serving layer.
///
/// Field names and nesting are a compatibility contract with the
/// visualization frontend and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Point cloud payload
    pub points: Vec<PointRecord>,
    /// Derived camera poses, one per registered image
    pub cameras: Vec<CameraPoseRecord>,
    /// Camera intrinsics keyed by camera id
    pub camera_intrinsics: BTreeMap<i32, ColmapCamera>,
}

impl ExportDocument {
    /// Serialize the document as JSON to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read a document previously written with [`ExportDocument::write_json`].
    pub fn read_json(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// View the point payload as a point cloud.
    pub fn to_pointcloud(&self) -> PointCloud {
        let points = self.points.iter().map(|p| [p.x, p.y, p.z]).collect();
        let colors = self.points.iter().map(|p| [p.r, p.g, p.b]).collect();
        PointCloud::new(points, Some(colors))
    }
}

/// Assemble the export document from the three decoded tables.
///
/// Points are flattened to position plus color, one camera pose is derived
/// per registered image, and the camera intrinsics pass through unchanged.
/// Decoder failures never reach this function; it has no failure modes of
/// its own.
///
/// # Arguments
///
/// * `cameras` - The decoded camera intrinsics table.
/// * `images` - The decoded registered image table.
/// * `points` - The decoded sparse point table.
///
/// # Returns
///
/// The assembled [`ExportDocument`].
pub fn assemble_document(
    cameras: &BTreeMap<i32, ColmapCamera>,
    images: &BTreeMap<i32, ColmapImage>,
    points: &BTreeMap<u64, ColmapPoint3d>,
) -> ExportDocument {
    let point_records = points
        .values()
        .map(|point| PointRecord {
            x: point.xyz[0],
            y: point.xyz[1],
            z: point.xyz[2],
            r: point.rgb[0],
            g: point.rgb[1],
            b: point.rgb[2],
        })
        .collect();

    let camera_records = images
        .values()
        .map(|image| CameraPoseRecord {
            id: image.image_id,
            name: image.name.clone(),
            position: camera_center(&image.rotation, &image.translation),
            view_direction: view_direction(&image.rotation),
            qvec: image.rotation,
            camera_id: image.camera_id,
        })
        .collect();

    ExportDocument {
        points: point_records,
        cameras: camera_records,
        camera_intrinsics: cameras.clone(),
    }
}
