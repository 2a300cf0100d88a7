//! Static geometry for the two shapes the demo draws.
//!
//! Each shape is a list of square faces, every face split into two triangles. Vertices are
//! interleaved position and color, see [`ColorVertex`].

use crate::abs::{Attribute, Vertex, VertexAttribute};

/// A vertex with a position and a flat RGB color.
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

impl Vertex for ColorVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            attribute: Attribute::Position,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            attribute: Attribute::Color,
            components: 3,
            offset: size_of::<[f32; 3]>() as i32,
        },
    ];
}

/// Immutable vertex and index data for one shape.
#[derive(Debug)]
pub struct GeometryTable {
    name: &'static str,
    vertices: &'static [ColorVertex],
    indices: &'static [u16],
}

/// A triangle whose indices are out of range or repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadTriangle {
    pub triangle: usize,
    pub indices: [u16; 3],
}

impl GeometryTable {
    pub const fn new(
        name: &'static str,
        vertices: &'static [ColorVertex],
        indices: &'static [u16],
    ) -> Self {
        Self {
            name,
            vertices,
            indices,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn vertices(&self) -> &'static [ColorVertex] {
        self.vertices
    }

    pub fn indices(&self) -> &'static [u16] {
        self.indices
    }

    pub fn index_count(&self) -> i32 {
        self.indices.len() as i32
    }

    /// Checks that every triangle references three distinct, in-range vertices.
    pub fn validate(&self) -> Result<(), BadTriangle> {
        let vertex_count = self.vertices.len();
        for (triangle, tri) in self.indices.chunks(3).enumerate() {
            let indices = match *tri {
                [a, b, c] => [a, b, c],
                // A trailing partial triangle can never be drawn correctly.
                _ => {
                    let mut padded = [u16::MAX; 3];
                    padded[..tri.len()].copy_from_slice(tri);
                    return Err(BadTriangle {
                        triangle,
                        indices: padded,
                    });
                }
            };
            let in_range = indices.iter().all(|&i| (i as usize) < vertex_count);
            let distinct =
                indices[0] != indices[1] && indices[1] != indices[2] && indices[0] != indices[2];
            if !in_range || !distinct {
                return Err(BadTriangle { triangle, indices });
            }
        }
        Ok(())
    }
}

/// The shapes that can be placed in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Cube,
    Table,
}

impl Primitive {
    pub fn table(self) -> &'static GeometryTable {
        match self {
            Primitive::Cube => &CUBE,
            Primitive::Table => &TABLE,
        }
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const GREY: [f32; 3] = [0.2, 0.2, 0.2];

const CUBE_VERTICES: [ColorVertex; 24] = [
    // Front
    ColorVertex::new([-1.0, -1.0, 1.0], RED),
    ColorVertex::new([1.0, -1.0, 1.0], RED),
    ColorVertex::new([1.0, 1.0, 1.0], RED),
    ColorVertex::new([-1.0, 1.0, 1.0], RED),
    // Back
    ColorVertex::new([-1.0, -1.0, -1.0], RED),
    ColorVertex::new([-1.0, 1.0, -1.0], RED),
    ColorVertex::new([1.0, 1.0, -1.0], RED),
    ColorVertex::new([1.0, -1.0, -1.0], RED),
    // Top
    ColorVertex::new([-1.0, 1.0, -1.0], GREEN),
    ColorVertex::new([-1.0, 1.0, 1.0], GREEN),
    ColorVertex::new([1.0, 1.0, 1.0], GREEN),
    ColorVertex::new([1.0, 1.0, -1.0], GREEN),
    // Bottom
    ColorVertex::new([-1.0, -1.0, -1.0], GREEN),
    ColorVertex::new([1.0, -1.0, -1.0], GREEN),
    ColorVertex::new([1.0, -1.0, 1.0], GREEN),
    ColorVertex::new([-1.0, -1.0, 1.0], GREEN),
    // Right
    ColorVertex::new([1.0, -1.0, -1.0], BLUE),
    ColorVertex::new([1.0, 1.0, -1.0], BLUE),
    ColorVertex::new([1.0, 1.0, 1.0], BLUE),
    ColorVertex::new([1.0, -1.0, 1.0], BLUE),
    // Left
    ColorVertex::new([-1.0, -1.0, -1.0], BLUE),
    ColorVertex::new([-1.0, -1.0, 1.0], BLUE),
    ColorVertex::new([-1.0, 1.0, 1.0], BLUE),
    ColorVertex::new([-1.0, 1.0, -1.0], BLUE),
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    0, 1, 2,     0, 2, 3,    // front
    4, 5, 6,     4, 6, 7,    // back
    8, 9, 10,    8, 10, 11,  // top
    12, 13, 14,  12, 14, 15, // bottom
    16, 17, 18,  16, 18, 19, // right
    20, 21, 22,  20, 22, 23, // left
];

/// The cube's top face, scaled by 10 in X and Z and dropped to y = 0.
const TABLE_VERTICES: [ColorVertex; 4] = [
    ColorVertex::new([-10.0, 0.0, -10.0], GREY),
    ColorVertex::new([-10.0, 0.0, 10.0], GREY),
    ColorVertex::new([10.0, 0.0, 10.0], GREY),
    ColorVertex::new([10.0, 0.0, -10.0], GREY),
];

const TABLE_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit cube spanning -1..1 on every axis, one flat color per face.
pub static CUBE: GeometryTable = GeometryTable::new("cube", &CUBE_VERTICES, &CUBE_INDICES);

/// Grey ground quad.
pub static TABLE: GeometryTable = GeometryTable::new("table", &TABLE_VERTICES, &TABLE_INDICES);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(size_of::<ColorVertex>(), 24);
        assert_eq!(ColorVertex::ATTRIBUTES[0].offset, 0);
        assert_eq!(ColorVertex::ATTRIBUTES[1].offset, 12);
    }

    #[test]
    fn cube_has_six_faces_of_two_triangles() {
        assert_eq!(CUBE.vertices().len(), 24);
        assert_eq!(CUBE.indices().len(), 36);
        assert!(CUBE.indices().iter().all(|&i| i <= 23));
        assert!(CUBE.validate().is_ok());

        for (face, indices) in CUBE.indices().chunks(6).enumerate() {
            let base = (face * 4) as u16;
            // Both triangles stay within this face's four vertices.
            assert!(indices.iter().all(|&i| (base..base + 4).contains(&i)));
            let colors: Vec<_> = (0..4)
                .map(|v| CUBE.vertices()[base as usize + v].color)
                .collect();
            assert!(colors.iter().all(|c| *c == colors[0]), "face {face}");
        }
    }

    #[test]
    fn table_is_a_grey_quad_below_the_cube_top() {
        assert_eq!(TABLE.vertices().len(), 4);
        assert_eq!(TABLE.index_count(), 6);
        assert!(TABLE.validate().is_ok());
        for v in TABLE.vertices() {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.position[0].abs(), 10.0);
            assert_eq!(v.position[2].abs(), 10.0);
            assert_eq!(v.color, GREY);
        }
    }

    #[test]
    fn validate_rejects_bad_triangles() {
        static VERTS: [ColorVertex; 3] = [
            ColorVertex::new([0.0, 0.0, 0.0], RED),
            ColorVertex::new([1.0, 0.0, 0.0], RED),
            ColorVertex::new([0.0, 1.0, 0.0], RED),
        ];
        static OUT_OF_RANGE: [u16; 3] = [0, 1, 3];
        static REPEATED: [u16; 6] = [0, 1, 2, 0, 0, 2];

        let table = GeometryTable::new("broken", &VERTS, &OUT_OF_RANGE);
        assert_eq!(
            table.validate(),
            Err(BadTriangle {
                triangle: 0,
                indices: [0, 1, 3]
            })
        );

        let table = GeometryTable::new("broken", &VERTS, &REPEATED);
        assert_eq!(table.validate().map_err(|e| e.triangle), Err(1));
    }

    #[test]
    fn primitives_map_to_their_tables() {
        assert_eq!(Primitive::Cube.table().name(), "cube");
        assert_eq!(Primitive::Table.table().name(), "table");
    }
}
