use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of intrinsic parameters stored for a COLMAP camera model id.
///
/// The catalog covers the eleven documented model ids; unrecognized ids
/// fall back to 4 parameters. The count drives how many bytes the camera
/// decoder consumes per record, so a wrong entry silently misaligns every
/// subsequent record in the file.
pub fn model_num_params(model_id: i32) -> usize {
    match model_id {
        0 => 3,
        1 => 4,
        2 => 4,
        3 => 5,
        4 => 8,
        5 => 12,
        6 => 4,
        7 => 5,
        8 => 8,
        9 => 12,
        10 => 5,
        _ => 4,
    }
}

/// Represents a camera in the Colmap system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColmapCamera {
    /// Camera id
    #[serde(rename = "id")]
    pub camera_id: i32,
    /// Camera model id
    pub model_id: i32,
    /// Image width in pixels
    pub width: u64,
    /// Image height in pixels
    pub height: u64,
    /// Camera parameters, `model_num_params(model_id)` values
    pub params: Vec<f64>,
}

/// Represents a registered image in the Colmap system.
#[derive(Debug, Clone, PartialEq)]
pub struct ColmapImage {
    /// Image id
    pub image_id: i32,
    /// Rotation as a unit quaternion, scalar-first (qw, qx, qy, qz),
    /// mapping world to camera coordinates
    pub rotation: [f64; 4],
    /// Translation of the world-to-camera transform
    pub translation: [f64; 3],
    /// Camera id
    pub camera_id: i32,
    /// Image file name
    pub name: String,
    /// Number of 2D observations; the per-observation payload is consumed
    /// during decoding but not retained
    pub num_points2d: u64,
}

/// Represents a 3D point in the Colmap system.
#[derive(Debug, Clone, PartialEq)]
pub struct ColmapPoint3d {
    /// Point3d id
    pub point3d_id: u64,
    /// x, y, z coordinates
    pub xyz: [f64; 3],
    /// rgb color
    pub rgb: [u8; 3],
    /// Mean reprojection error
    pub error: f64,
    /// Length of the visibility track; the per-track payload is consumed
    /// during decoding but not retained
    pub track_length: u64,
}

/// A decoded sparse reconstruction: intrinsics, posed images and 3D points.
#[derive(Debug, Clone)]
pub struct ColmapReconstruction {
    /// Camera intrinsics keyed by camera id
    pub cameras: BTreeMap<i32, ColmapCamera>,
    /// Registered images keyed by image id
    pub images: BTreeMap<i32, ColmapImage>,
    /// Sparse 3D points keyed by point id
    pub points: BTreeMap<u64, ColmapPoint3d>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_num_params_catalog() {
        let expected = [3, 4, 4, 5, 8, 12, 4, 5, 8, 12, 5];
        for (model_id, num_params) in expected.iter().enumerate() {
            assert_eq!(model_num_params(model_id as i32), *num_params);
        }
    }

    #[test]
    fn test_model_num_params_unknown_falls_back() {
        assert_eq!(model_num_params(11), 4);
        assert_eq!(model_num_params(-1), 4);
        assert_eq!(model_num_params(255), 4);
    }

    #[test]
    fn test_camera_serializes_with_output_field_names() {
        let camera = ColmapCamera {
            camera_id: 1,
            model_id: 0,
            width: 100,
            height: 50,
            params: vec![80.0, 50.0, 25.0],
        };

        let value = serde_json::to_value(&camera).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["model_id"], 0);
        assert_eq!(value["width"], 100);
        assert_eq!(value["height"], 50);
        assert_eq!(value["params"].as_array().unwrap().len(), 3);
    }
}
