//! The one mesh the template draws: a unit cube with a color per corner.

/// Matches the `POSITION`/`COLOR` input layout, both `float3`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPosColor {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

pub const POSITION_OFFSET: u32 = std::mem::offset_of!(VertexPosColor, position) as u32;
pub const COLOR_OFFSET: u32 = std::mem::offset_of!(VertexPosColor, color) as u32;
pub const VERTEX_STRIDE: u32 = std::mem::size_of::<VertexPosColor>() as u32;

const fn vertex(position: [f32; 3], color: [f32; 3]) -> VertexPosColor {
    VertexPosColor { position, color }
}

pub const CUBE_VERTICES: [VertexPosColor; 8] = [
    vertex([-1.0, -1.0, -1.0], [0.0, 0.0, 0.0]), // 0
    vertex([-1.0, 1.0, -1.0], [0.0, 1.0, 0.0]),  // 1
    vertex([1.0, 1.0, -1.0], [1.0, 1.0, 0.0]),   // 2
    vertex([1.0, -1.0, -1.0], [1.0, 0.0, 0.0]),  // 3
    vertex([-1.0, -1.0, 1.0], [0.0, 0.0, 1.0]),  // 4
    vertex([-1.0, 1.0, 1.0], [0.0, 1.0, 1.0]),   // 5
    vertex([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]),    // 6
    vertex([1.0, -1.0, 1.0], [1.0, 0.0, 1.0]),   // 7
];

/// Two clockwise triangles per face, as seen from outside the cube.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // -z
    4, 6, 5, 4, 7, 6, // +z
    4, 5, 1, 4, 1, 0, // -x
    3, 2, 6, 3, 6, 7, // +x
    1, 5, 6, 1, 6, 2, // +y
    4, 0, 3, 4, 3, 7, // -y
];

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec3;
    use std::collections::BTreeSet;

    fn position(index: u16) -> Vec3 {
        Vec3::from_array(CUBE_VERTICES[index as usize].position)
    }

    #[test]
    fn layout_is_two_packed_float3s() {
        assert_eq!(POSITION_OFFSET, 0);
        assert_eq!(COLOR_OFFSET, 12);
        assert_eq!(VERTEX_STRIDE, 24);
    }

    #[test]
    fn indices_cover_exactly_the_eight_corners() {
        let used: BTreeSet<u16> = CUBE_INDICES.iter().copied().collect();
        assert_eq!(used, (0..8).collect::<BTreeSet<u16>>());
    }

    #[test]
    fn every_triangle_faces_outward() {
        for triangle in CUBE_INDICES.chunks_exact(3) {
            let (a, b, c) = (position(triangle[0]), position(triangle[1]), position(triangle[2]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid) > 0.0,
                "triangle {triangle:?} winds inward"
            );
        }
    }

    #[test]
    fn each_face_is_covered_by_two_triangles() {
        let mut normals: Vec<Vec3> = CUBE_INDICES
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (position(t[0]), position(t[1]), position(t[2]));
                (b - a).cross(c - a).normalize()
            })
            .collect();
        normals.dedup_by(|x, y| x.abs_diff_eq(*y, 1e-6));
        assert_eq!(normals.len(), 6);
    }
}
