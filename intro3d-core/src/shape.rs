//! Rigid-body shape instances drawn from pooled geometry.

use glam::{Mat4, Quat, Vec3};

use crate::abs::{GeometryId, GeometryPool, Graphics};

/// One placed copy of a shape.
///
/// The transform fields can be changed at any time; the world matrix is rebuilt on every
/// draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInstance {
    pub position: Vec3,
    pub scale: f32,
    /// Unit axis to rotate around.
    pub rotation_axis: Vec3,
    /// Rotation in radians.
    pub rotation_angle: f32,
    geometry: GeometryId,
    index_count: i32,
}

impl ShapeInstance {
    pub fn new(
        position: Vec3,
        scale: f32,
        rotation_axis: Vec3,
        rotation_angle: f32,
        geometry: GeometryId,
        index_count: i32,
    ) -> Self {
        Self {
            position,
            scale,
            rotation_axis: rotation_axis.try_normalize().unwrap_or(Vec3::Y),
            rotation_angle,
            geometry,
            index_count,
        }
    }

    pub fn geometry(&self) -> GeometryId {
        self.geometry
    }

    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    /// `translation * rotation * scale`.
    pub fn world_matrix(&self) -> Mat4 {
        let axis = self.rotation_axis.try_normalize().unwrap_or(Vec3::Y);
        let rotation = Quat::from_axis_angle(axis, self.rotation_angle);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }

    /// Uploads the world matrix and issues one indexed draw.
    ///
    /// Panics if the geometry has been released from `pool`.
    pub fn draw<G: Graphics>(
        &self,
        gfx: &G,
        pool: &GeometryPool<G>,
        world_uniform: &G::UniformLocation,
    ) {
        let geometry = &pool[self.geometry];

        gfx.uniform_matrix_4(world_uniform, &self.world_matrix());
        gfx.bind_vertex_array(Some(geometry.vertex_array()));
        gfx.draw_elements(
            glow::TRIANGLES,
            self.index_count,
            glow::UNSIGNED_SHORT,
            0,
        );
        gfx.bind_vertex_array(None);
    }
}
