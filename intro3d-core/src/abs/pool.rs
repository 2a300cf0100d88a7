//! GPU-side geometry management.
//!
//! [`GeometryPool`] uploads [`GeometryTable`]s into vertex/index buffers plus a vertex array
//! and owns the resulting objects. Everything else refers to an upload through a
//! [`GeometryId`], so one cube upload can be drawn by any number of shapes.

use std::ops::Index;

use crate::{
    abs::{Attribute, Graphics, ShaderBindings},
    error::RenderError,
    geometry::GeometryTable,
};

/// Trait that defines the necessary data for a vertex.
pub trait Vertex: bytemuck::Pod {
    /// Layout of each shader input inside one vertex.
    const ATTRIBUTES: &'static [VertexAttribute];

    fn stride() -> i32 {
        size_of::<Self>() as i32
    }
}

/// Where one float attribute lives inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub attribute: Attribute,
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

/// Handle to an upload owned by a [`GeometryPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(u32);

/// Buffers and vertex array for one uploaded table.
#[derive(Debug)]
pub struct GpuGeometry<G: Graphics> {
    name: &'static str,
    vao: G::VertexArray,
    vbo: G::Buffer,
    ebo: G::Buffer,
    index_count: i32,
}

impl<G: Graphics> GpuGeometry<G> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn vertex_array(&self) -> G::VertexArray {
        self.vao
    }

    /// Number of indices drawn for this geometry.
    pub fn index_count(&self) -> i32 {
        self.index_count
    }
}

/// Sole owner of every uploaded geometry.
pub struct GeometryPool<G: Graphics> {
    entries: Vec<Option<GpuGeometry<G>>>,
}

impl<G: Graphics> Default for GeometryPool<G> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<G: Graphics> GeometryPool<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads a static geometry table.
    pub fn upload(
        &mut self,
        gfx: &G,
        table: &GeometryTable,
        bindings: &ShaderBindings<G>,
    ) -> Result<GeometryId, RenderError> {
        self.upload_vertices(gfx, table.name(), table.vertices(), table.indices(), bindings)
    }

    /// Uploads interleaved vertices and 16-bit indices into static buffers.
    ///
    /// Nothing is left bound afterwards. On failure every object created so far is deleted.
    pub fn upload_vertices<V: Vertex>(
        &mut self,
        gfx: &G,
        name: &'static str,
        vertices: &[V],
        indices: &[u16],
        bindings: &ShaderBindings<G>,
    ) -> Result<GeometryId, RenderError> {
        let vbo = gfx
            .create_buffer()
            .map_err(|reason| RenderError::BufferAllocationFailed {
                geometry: name,
                what: "vertex",
                reason,
            })?;
        let ebo = match gfx.create_buffer() {
            Ok(ebo) => ebo,
            Err(reason) => {
                gfx.delete_buffer(vbo);
                return Err(RenderError::BufferAllocationFailed {
                    geometry: name,
                    what: "index",
                    reason,
                });
            }
        };
        let vao = match gfx.create_vertex_array() {
            Ok(vao) => vao,
            Err(reason) => {
                gfx.delete_buffer(vbo);
                gfx.delete_buffer(ebo);
                return Err(RenderError::VaoCreationFailed {
                    geometry: name,
                    reason,
                });
            }
        };

        gfx.bind_vertex_array(Some(vao));

        gfx.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gfx.buffer_data(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        // Recorded in the vertex array, so it must stay bound until the array is unbound.
        gfx.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
        gfx.buffer_data(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            glow::STATIC_DRAW,
        );

        let stride = V::stride();
        for attr in V::ATTRIBUTES {
            let location = bindings.attribute(attr.attribute);
            gfx.enable_vertex_attrib_array(location);
            gfx.vertex_attrib_pointer_f32(location, attr.components, stride, attr.offset);
        }

        gfx.bind_vertex_array(None);
        gfx.bind_buffer(glow::ARRAY_BUFFER, None);
        gfx.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        let id = GeometryId(self.entries.len() as u32);
        self.entries.push(Some(GpuGeometry {
            name,
            vao,
            vbo,
            ebo,
            index_count: indices.len() as i32,
        }));

        log::debug!(
            "Uploaded `{name}` as {id:?}: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Ok(id)
    }

    /// Looks up a live upload.
    pub fn get(&self, id: GeometryId) -> Option<&GpuGeometry<G>> {
        self.entries.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Deletes the buffers and vertex array behind `id`.
    ///
    /// Returns `false` without touching the GPU if `id` was already released.
    pub fn release(&mut self, gfx: &G, id: GeometryId) -> bool {
        let Some(geometry) = self.entries.get_mut(id.0 as usize).and_then(Option::take) else {
            log::warn!("Geometry {id:?} released twice");
            return false;
        };

        gfx.delete_buffer(geometry.vbo);
        gfx.delete_buffer(geometry.ebo);
        gfx.delete_vertex_array(geometry.vao);
        log::debug!("Released `{}` ({id:?})", geometry.name);
        true
    }

    /// Releases every upload that is still live.
    pub fn release_all(&mut self, gfx: &G) {
        for index in 0..self.entries.len() {
            if self.entries[index].is_some() {
                self.release(gfx, GeometryId(index as u32));
            }
        }
    }

    /// Number of uploads that have not been released.
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

impl<G: Graphics> Index<GeometryId> for GeometryPool<G> {
    type Output = GpuGeometry<G>;

    fn index(&self, id: GeometryId) -> &Self::Output {
        match self.get(id) {
            Some(geometry) => geometry,
            None => panic!("{id:?} does not refer to live geometry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abs::{
            ShaderProgram,
            gfx::recording::{Call, RecordingGraphics},
        },
        geometry::{CUBE, TABLE},
    };

    fn bindings(gfx: &RecordingGraphics) -> ShaderBindings<RecordingGraphics> {
        let program = ShaderProgram::unlit(gfx).unwrap();
        ShaderBindings::resolve(gfx, &program).unwrap()
    }

    #[test]
    fn upload_builds_interleaved_layout() {
        let gfx = RecordingGraphics::default();
        let bindings = bindings(&gfx);
        let mut pool = GeometryPool::new();
        gfx.clear_calls();

        let id = pool.upload(&gfx, &CUBE, &bindings).unwrap();
        assert_eq!(pool[id].index_count(), 36);
        assert_eq!(pool[id].name(), "cube");

        let calls = gfx.calls();
        assert!(calls.contains(&Call::BufferData {
            target: glow::ARRAY_BUFFER,
            len: 24 * 24,
            usage: glow::STATIC_DRAW,
        }));
        assert!(calls.contains(&Call::BufferData {
            target: glow::ELEMENT_ARRAY_BUFFER,
            len: 36 * 2,
            usage: glow::STATIC_DRAW,
        }));
        assert!(calls.contains(&Call::VertexAttribPointer {
            index: bindings.attribute(Attribute::Position),
            size: 3,
            stride: 24,
            offset: 0,
        }));
        assert!(calls.contains(&Call::VertexAttribPointer {
            index: bindings.attribute(Attribute::Color),
            size: 3,
            stride: 24,
            offset: 12,
        }));
    }

    #[test]
    fn upload_leaves_nothing_bound() {
        let gfx = RecordingGraphics::default();
        let bindings = bindings(&gfx);
        let mut pool = GeometryPool::new();
        gfx.clear_calls();
        pool.upload(&gfx, &TABLE, &bindings).unwrap();

        let calls = gfx.calls();
        let tail = &calls[calls.len() - 3..];
        assert_eq!(
            tail,
            &[
                Call::BindVertexArray(None),
                Call::BindBuffer(glow::ARRAY_BUFFER, None),
                Call::BindBuffer(glow::ELEMENT_ARRAY_BUFFER, None),
            ]
        );
    }

    #[test]
    fn failed_index_buffer_frees_vertex_buffer() {
        let gfx = RecordingGraphics::default();
        let bindings = bindings(&gfx);
        gfx.buffer_budget.set(Some(1));
        let mut pool = GeometryPool::new();

        let err = pool.upload(&gfx, &CUBE, &bindings).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferAllocationFailed { geometry: "cube", what: "index", .. }
        ));
        let created = gfx
            .calls()
            .iter()
            .find_map(|c| match c {
                Call::CreateBuffer(id) => Some(*id),
                _ => None,
            })
            .unwrap();
        assert!(gfx.calls().contains(&Call::DeleteBuffer(created)));
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn failed_vertex_array_frees_both_buffers() {
        let gfx = RecordingGraphics {
            fail_vertex_arrays: true,
            ..Default::default()
        };
        let bindings = bindings(&gfx);
        let mut pool = GeometryPool::new();

        let err = pool.upload(&gfx, &TABLE, &bindings).unwrap_err();
        assert!(matches!(err, RenderError::VaoCreationFailed { geometry: "table", .. }));
        let deleted = gfx
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::DeleteBuffer(_)))
            .count();
        assert_eq!(deleted, 2);
    }

    #[test]
    fn release_is_safe_to_repeat() {
        let gfx = RecordingGraphics::default();
        let bindings = bindings(&gfx);
        let mut pool = GeometryPool::new();
        let cube = pool.upload(&gfx, &CUBE, &bindings).unwrap();
        let table = pool.upload(&gfx, &TABLE, &bindings).unwrap();
        gfx.clear_calls();

        assert!(pool.release(&gfx, cube));
        assert!(!pool.release(&gfx, cube));
        assert!(pool.get(cube).is_none());
        assert_eq!(gfx.calls().len(), 3);

        pool.release_all(&gfx);
        assert!(pool.get(table).is_none());
        assert_eq!(pool.live_count(), 0);
        assert_eq!(gfx.calls().len(), 6);
    }

    #[test]
    #[should_panic(expected = "does not refer to live geometry")]
    fn indexing_a_released_id_panics() {
        let gfx = RecordingGraphics::default();
        let bindings = bindings(&gfx);
        let mut pool = GeometryPool::new();
        let cube = pool.upload(&gfx, &CUBE, &bindings).unwrap();
        pool.release(&gfx, cube);
        let _ = pool[cube].index_count();
    }
}
