/// Compute the rotation matrix from a unit quaternion.
///
/// # Arguments
///
/// * `quaternion` - The quaternion in scalar-first order (w, x, y, z).
///
/// # Returns
///
/// The 3x3 rotation matrix, row-major.
///
/// PRECONDITION: quaternion is unit-length; no normalization is performed,
/// a non-unit input yields whatever the algebra produces.
///
/// Example:
///
/// ```
/// use sfmview_3d::transforms::quaternion_to_rotation_matrix;
///
/// let rotation = quaternion_to_rotation_matrix(&[1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(rotation, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// ```
pub fn quaternion_to_rotation_matrix(quaternion: &[f64; 4]) -> [[f64; 3]; 3] {
    let [qw, qx, qy, qz] = *quaternion;

    [
        [
            1.0 - 2.0 * qy * qy - 2.0 * qz * qz,
            2.0 * qx * qy - 2.0 * qz * qw,
            2.0 * qx * qz + 2.0 * qy * qw,
        ],
        [
            2.0 * qx * qy + 2.0 * qz * qw,
            1.0 - 2.0 * qx * qx - 2.0 * qz * qz,
            2.0 * qy * qz - 2.0 * qx * qw,
        ],
        [
            2.0 * qx * qz - 2.0 * qy * qw,
            2.0 * qy * qz + 2.0 * qx * qw,
            1.0 - 2.0 * qx * qx - 2.0 * qy * qy,
        ],
    ]
}

/// Transpose a 3x3 matrix.
pub fn transpose_mat3(matrix: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut transposed = [[0.0; 3]; 3];
    for (i, row) in matrix.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            transposed[j][i] = *value;
        }
    }
    transposed
}

/// Multiply a 3x3 matrix by a 3-vector.
pub fn mat3_mul_vec3(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    [
        matrix[0][0] * vector[0] + matrix[0][1] * vector[1] + matrix[0][2] * vector[2],
        matrix[1][0] * vector[0] + matrix[1][1] * vector[1] + matrix[1][2] * vector[2],
        matrix[2][0] * vector[0] + matrix[2][1] * vector[1] + matrix[2][2] * vector[2],
    ]
}

/// Compute the world-space camera center of a world-to-camera pose.
///
/// The pose maps a world point p to camera coordinates as `R * p + t`, so
/// the center is `C = -R^T * t`.
///
/// # Arguments
///
/// * `rotation` - The pose quaternion in scalar-first order (w, x, y, z).
/// * `translation` - The pose translation vector.
///
/// # Returns
///
/// The camera center in world coordinates.
///
/// Example:
///
/// ```
/// use sfmview_3d::transforms::camera_center;
///
/// let center = camera_center(&[1.0, 0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);
/// assert_eq!(center, [-1.0, -2.0, -3.0]);
/// ```
pub fn camera_center(rotation: &[f64; 4], translation: &[f64; 3]) -> [f64; 3] {
    let rotation_t = transpose_mat3(&quaternion_to_rotation_matrix(rotation));
    let neg_translation = [-translation[0], -translation[1], -translation[2]];
    mat3_mul_vec3(&rotation_t, &neg_translation)
}

/// Compute the world-space viewing direction of a world-to-camera pose.
///
/// The camera looks down its local -Z axis; the direction is that axis
/// transformed to world space, `R^T * (0, 0, -1)`, unit-length for a unit
/// input quaternion.
///
/// # Arguments
///
/// * `rotation` - The pose quaternion in scalar-first order (w, x, y, z).
///
/// # Returns
///
/// The viewing direction in world coordinates.
pub fn view_direction(rotation: &[f64; 4]) -> [f64; 3] {
    let rotation_t = transpose_mat3(&quaternion_to_rotation_matrix(rotation));
    mat3_mul_vec3(&rotation_t, &[0.0, 0.0, -1.0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_identity_quaternion_to_rotation_matrix() {
        let rotation = quaternion_to_rotation_matrix(&[1.0, 0.0, 0.0, 0.0]);
        let expected = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_eq!(rotation, expected);
    }

    #[test]
    fn test_quaternion_to_rotation_matrix_quarter_turn_z() {
        // 90 degrees about +Z maps +X to +Y
        let rotation = quaternion_to_rotation_matrix(&[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]);
        let expected = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(rotation[i][j], expected[i][j], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_transpose_mat3() {
        let matrix = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let expected = [[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]];
        assert_eq!(transpose_mat3(&matrix), expected);
    }

    #[test]
    fn test_mat3_mul_vec3() {
        let matrix = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let vector = [1.0, 0.0, -1.0];
        assert_eq!(mat3_mul_vec3(&matrix, &vector), [-2.0, -2.0, -2.0]);
    }

    #[test]
    fn test_camera_center_identity_rotation() {
        let center = camera_center(&[1.0, 0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);
        assert_eq!(center, [-1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_camera_center_quarter_turn_z() {
        // for t = R * (-C), the recovered center must be C
        let quaternion = [FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2];
        let rotation = quaternion_to_rotation_matrix(&quaternion);
        let expected_center = [2.0, -1.0, 0.5];
        let translation = mat3_mul_vec3(
            &rotation,
            &[-expected_center[0], -expected_center[1], -expected_center[2]],
        );

        let center = camera_center(&quaternion, &translation);
        for i in 0..3 {
            assert_relative_eq!(center[i], expected_center[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_view_direction_identity_rotation() {
        let direction = view_direction(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(direction, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_view_direction_half_turn_y() {
        // 180 degrees about +Y flips the viewing direction to +Z
        let direction = view_direction(&[0.0, 0.0, 1.0, 0.0]);
        for (value, expected) in direction.iter().zip([0.0, 0.0, 1.0]) {
            assert_relative_eq!(*value, expected, epsilon = 1e-12);
        }
    }
}
