use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use super::{
    model_num_params,
    records::{CameraHeader, ImageHeader, PointHeader},
    ColmapCamera, ColmapError, ColmapImage, ColmapPoint3d, ColmapReconstruction,
};

/// Bytes of one 2D observation entry: x, y as f64 plus an i64 point3d id.
const POINT2D_ENTRY_SIZE: u64 = 24;

/// Bytes of one track entry: image id and feature index as i32 each.
const TRACK_ENTRY_SIZE: u64 = 8;

/// Sequential little-endian reader over a byte source.
///
/// Each decoder owns its own cursor; access is purely forward, one record
/// at a time, with no buffering beyond the current read.
struct Cursor<R> {
    reader: R,
}

impl<R: Read> Cursor<R> {
    fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read exactly `N` bytes, failing with `TruncatedInput` on a short source.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ColmapError> {
        let mut buffer = [0u8; N];
        self.reader.read_exact(&mut buffer).map_err(truncated)?;
        Ok(buffer)
    }

    fn read_u64(&mut self) -> Result<u64, ColmapError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_f64(&mut self) -> Result<f64, ColmapError> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    fn read_f64_vec(&mut self, count: usize) -> Result<Vec<f64>, ColmapError> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_f64()?);
        }
        Ok(values)
    }

    /// Read single bytes up to the 0x00 sentinel; the sentinel is consumed
    /// but excluded from the returned string.
    fn read_cstring(&mut self) -> Result<String, ColmapError> {
        let mut bytes = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            match self.reader.read_exact(&mut byte) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return Err(ColmapError::MalformedCString)
                }
                Err(e) => return Err(ColmapError::Io(e)),
            }
            if byte[0] == 0 {
                break;
            }
            bytes.push(byte[0]);
        }
        Ok(String::from_utf8(bytes)?)
    }

    /// Consume and discard exactly `num_bytes` bytes.
    fn skip(&mut self, num_bytes: u64) -> Result<(), ColmapError> {
        let consumed = std::io::copy(
            &mut self.reader.by_ref().take(num_bytes),
            &mut std::io::sink(),
        )?;
        if consumed < num_bytes {
            return Err(ColmapError::TruncatedInput(
                std::io::ErrorKind::UnexpectedEof.into(),
            ));
        }
        Ok(())
    }
}

fn truncated(error: std::io::Error) -> ColmapError {
    if error.kind() == std::io::ErrorKind::UnexpectedEof {
        ColmapError::TruncatedInput(error)
    } else {
        ColmapError::Io(error)
    }
}

/// Decode the camera intrinsics table from a byte source.
///
/// Binary layout (little-endian): a u64 camera count, then per camera a
/// 24-byte header (camera id, model id, width, height) followed by the
/// model-dependent number of f64 parameters.
///
/// # Arguments
///
/// * `reader` - Byte source positioned at the start of the table.
///
/// # Returns
///
/// A map from camera id to [`ColmapCamera`]. Duplicate camera ids keep the
/// last record.
pub fn decode_cameras<R: Read>(reader: R) -> Result<BTreeMap<i32, ColmapCamera>, ColmapError> {
    let mut cursor = Cursor::new(reader);
    let num_cameras = cursor.read_u64()?;

    let mut cameras = BTreeMap::new();
    for _ in 0..num_cameras {
        let header = CameraHeader::decode(&cursor.read_array::<{ CameraHeader::SIZE }>()?)?;
        let params = cursor.read_f64_vec(model_num_params(header.model_id))?;

        cameras.insert(
            header.camera_id,
            ColmapCamera {
                camera_id: header.camera_id,
                model_id: header.model_id,
                width: header.width,
                height: header.height,
                params,
            },
        );
    }

    Ok(cameras)
}

/// Decode the registered image table from a byte source.
///
/// Binary layout (little-endian): a u64 image count, then per image a
/// 64-byte header (image id, quaternion qw/qx/qy/qz, translation tx/ty/tz,
/// camera id), a null-terminated name, a u64 observation count and
/// `count` 24-byte observation entries, which are consumed to keep the
/// cursor aligned and then discarded.
///
/// # Arguments
///
/// * `reader` - Byte source positioned at the start of the table.
///
/// # Returns
///
/// A map from image id to [`ColmapImage`]. Duplicate image ids keep the
/// last record.
pub fn decode_images<R: Read>(reader: R) -> Result<BTreeMap<i32, ColmapImage>, ColmapError> {
    let mut cursor = Cursor::new(reader);
    let num_images = cursor.read_u64()?;

    let mut images = BTreeMap::new();
    for _ in 0..num_images {
        let header = ImageHeader::decode(&cursor.read_array::<{ ImageHeader::SIZE }>()?)?;
        let name = cursor.read_cstring()?;

        let num_points2d = cursor.read_u64()?;
        cursor.skip(num_points2d * POINT2D_ENTRY_SIZE)?;

        images.insert(
            header.image_id,
            ColmapImage {
                image_id: header.image_id,
                rotation: [header.qw, header.qx, header.qy, header.qz],
                translation: [header.tx, header.ty, header.tz],
                camera_id: header.camera_id,
                name,
                num_points2d,
            },
        );
    }

    Ok(images)
}

/// Decode the sparse 3D point table from a byte source.
///
/// Binary layout (little-endian): a u64 point count, then per point a
/// 43-byte header (point id, xyz as f64, rgb as u8, reprojection error),
/// a u64 track length and `length` 8-byte track entries, which are
/// consumed to keep the cursor aligned and then discarded.
///
/// # Arguments
///
/// * `reader` - Byte source positioned at the start of the table.
///
/// # Returns
///
/// A map from point id to [`ColmapPoint3d`]. Duplicate point ids keep the
/// last record.
pub fn decode_points3d<R: Read>(reader: R) -> Result<BTreeMap<u64, ColmapPoint3d>, ColmapError> {
    let mut cursor = Cursor::new(reader);
    let num_points = cursor.read_u64()?;

    let mut points = BTreeMap::new();
    for _ in 0..num_points {
        let header = PointHeader::decode(&cursor.read_array::<{ PointHeader::SIZE }>()?)?;

        let track_length = cursor.read_u64()?;
        cursor.skip(track_length * TRACK_ENTRY_SIZE)?;

        points.insert(
            header.point3d_id,
            ColmapPoint3d {
                point3d_id: header.point3d_id,
                xyz: [header.x, header.y, header.z],
                rgb: [header.r, header.g, header.b],
                error: header.error,
                track_length,
            },
        );
    }

    Ok(points)
}

/// Read a cameras.bin file and return the camera table.
///
/// # Arguments
///
/// * `path` - The path to the cameras.bin file.
pub fn read_cameras_bin(
    path: impl AsRef<Path>,
) -> Result<BTreeMap<i32, ColmapCamera>, ColmapError> {
    let file = File::open(path)?;
    decode_cameras(BufReader::new(file))
}

/// Read an images.bin file and return the registered image table.
///
/// # Arguments
///
/// * `path` - The path to the images.bin file.
pub fn read_images_bin(path: impl AsRef<Path>) -> Result<BTreeMap<i32, ColmapImage>, ColmapError> {
    let file = File::open(path)?;
    decode_images(BufReader::new(file))
}

/// Read a points3D.bin file and return the sparse point table.
///
/// # Arguments
///
/// * `path` - The path to the points3D.bin file.
pub fn read_points3d_bin(
    path: impl AsRef<Path>,
) -> Result<BTreeMap<u64, ColmapPoint3d>, ColmapError> {
    let file = File::open(path)?;
    decode_points3d(BufReader::new(file))
}

/// Read a complete sparse reconstruction directory.
///
/// Expected directory structure:
/// ```text
/// sparse/0/
///   cameras.bin
///   images.bin
///   points3D.bin
/// ```
pub fn read_reconstruction_bin(
    sparse_dir: impl AsRef<Path>,
) -> Result<ColmapReconstruction, ColmapError> {
    let sparse_dir = sparse_dir.as_ref();

    Ok(ColmapReconstruction {
        cameras: read_cameras_bin(sparse_dir.join("cameras.bin"))?,
        images: read_images_bin(sparse_dir.join("images.bin"))?,
        points: read_points3d_bin(sparse_dir.join("points3D.bin"))?,
    })
}
