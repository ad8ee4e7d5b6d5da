//! # Primitive Shape Generation
//!
//! Generators for the shapes the demo scenes use: cube, torus and sphere.
//! All shapes are centered at the origin and carry outward-facing normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a cube with the given edge length, centered at the origin.
///
/// Each face has four dedicated vertices so normals stay flat per face.
pub fn generate_cube(size: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let h = size * 0.5;

    let positions = [
        // Front face
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
        // Back face
        [-h, -h, -h],
        [-h, h, -h],
        [h, h, -h],
        [h, -h, -h],
        // Left face
        [-h, -h, -h],
        [-h, -h, h],
        [-h, h, h],
        [-h, h, -h],
        // Right face
        [h, -h, h],
        [h, -h, -h],
        [h, h, -h],
        [h, h, h],
        // Top face
        [-h, h, h],
        [h, h, h],
        [h, h, -h],
        [-h, h, -h],
        // Bottom face
        [-h, -h, -h],
        [h, -h, -h],
        [h, -h, h],
        [-h, -h, h],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    for normal in face_normals {
        for _ in 0..4 {
            data.normals.push(normal);
        }
    }

    // Two counter-clockwise triangles per face
    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a torus in the XY plane.
///
/// # Arguments
/// * `radius` - Distance from the torus center to the tube center
/// * `tube` - Radius of the tube itself
/// * `radial_segments` - Segments around the tube cross-section
/// * `tubular_segments` - Segments around the main ring
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial_segs = radial_segments.max(3);
    let tubular_segs = tubular_segments.max(3);

    for j in 0..=radial_segs {
        let v = j as f32 * 2.0 * PI / radial_segs as f32;
        let (sin_v, cos_v) = v.sin_cos();

        for i in 0..=tubular_segs {
            let u = i as f32 * 2.0 * PI / tubular_segs as f32;
            let (sin_u, cos_u) = u.sin_cos();

            // Ring center at (radius * cos_u, radius * sin_u, 0)
            let x = (radius + tube * cos_v) * cos_u;
            let y = (radius + tube * cos_v) * sin_u;
            let z = tube * sin_v;
            data.vertices.push([x, y, z]);

            // Normal points from the ring center to the surface point
            let cx = radius * cos_u;
            let cy = radius * sin_u;
            let len = ((x - cx).powi(2) + (y - cy).powi(2) + z.powi(2)).sqrt();
            data.normals.push([(x - cx) / len, (y - cy) / len, z / len]);
        }
    }

    let stride = tubular_segs + 1;
    for j in 1..=radial_segs {
        for i in 1..=tubular_segs {
            let a = (stride * j + i - 1) as u32;
            let b = (stride * (j - 1) + i - 1) as u32;
            let c = (stride * (j - 1) + i) as u32;
            let d = (stride * j + i) as u32;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

/// Generate a UV sphere of radius 1.0 centered at the origin.
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            // Normal equals position on a unit sphere
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[
                first,
                second,
                first + 1,
                second,
                second + 1,
                first + 1,
            ]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube(1.0);
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);

        // Edge length respected
        for v in &cube.vertices {
            for c in v {
                assert!(c.abs() <= 0.5 + f32::EPSILON);
            }
        }
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(0.3, 0.2, 20, 45);
        assert_eq!(torus.vertices.len(), (20 + 1) * (45 + 1));
        assert_eq!(torus.triangle_count(), (20 * 45 * 2) as usize);
        assert_eq!(torus.vertices.len(), torus.normals.len());

        // Normals are unit length
        for n in &torus.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
    }

    #[test]
    fn test_torus_indices_in_range() {
        let torus = generate_torus(1.0, 0.4, 8, 12);
        let max = torus.vertices.len() as u32;
        assert!(torus.indices.iter().all(|&i| i < max));
    }
}
