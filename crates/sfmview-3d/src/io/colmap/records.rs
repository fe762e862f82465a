use super::ColmapError;

/// Fixed-size head of a camera record: 24 bytes on the wire.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, bincode::Decode)]
pub(crate) struct CameraHeader {
    pub camera_id: i32,
    pub model_id: i32,
    pub width: u64,
    pub height: u64,
}

impl CameraHeader {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn decode(buffer: &[u8; Self::SIZE]) -> Result<Self, ColmapError> {
        // legacy config: fixed-width integers, little endian, matching the wire layout
        let (header, _): (Self, usize) =
            bincode::decode_from_slice(buffer, bincode::config::legacy())?;
        Ok(header)
    }
}

/// Fixed-size head of an image record: 64 bytes on the wire.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, bincode::Decode)]
pub(crate) struct ImageHeader {
    pub image_id: i32,
    pub qw: f64,
    pub qx: f64,
    pub qy: f64,
    pub qz: f64,
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub camera_id: i32,
}

impl ImageHeader {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn decode(buffer: &[u8; Self::SIZE]) -> Result<Self, ColmapError> {
        let (header, _): (Self, usize) =
            bincode::decode_from_slice(buffer, bincode::config::legacy())?;
        Ok(header)
    }
}

/// Fixed-size head of a point record: 43 bytes on the wire.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, bincode::Decode)]
pub(crate) struct PointHeader {
    pub point3d_id: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub error: f64,
}

impl PointHeader {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn decode(buffer: &[u8; Self::SIZE]) -> Result<Self, ColmapError> {
        let (header, _): (Self, usize) =
            bincode::decode_from_slice(buffer, bincode::config::legacy())?;
        Ok(header)
    }
}
