//! Shader programs and their fixed attribute/uniform interface.
//!
//! The demo only ever uses one program. Its inputs are resolved once into a
//! [`ShaderBindings`], and after that nothing is looked up by name.

use std::fmt;

use glam::Mat4;

use crate::{
    abs::Graphics,
    error::{BindingKind, RenderError, ShaderStage},
};

/// Vertex shader for unlit, vertex-colored geometry.
pub const UNLIT_VERTEX_SHADER: &str = include_str!("../shaders/unlit/vert.glsl");
/// Fragment shader for unlit, vertex-colored geometry.
pub const UNLIT_FRAGMENT_SHADER: &str = include_str!("../shaders/unlit/frag.glsl");

/// Vertex inputs of the unlit program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Color,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Position, Attribute::Color];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Position => "vertexPosition",
            Attribute::Color => "vertexColor",
        }
    }
}

/// Uniforms of the unlit program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformSlot {
    /// Per-instance local-to-world transform.
    World,
    /// Per-frame projection * view.
    ViewProj,
}

impl UniformSlot {
    pub const ALL: [UniformSlot; 2] = [UniformSlot::World, UniformSlot::ViewProj];

    pub fn name(self) -> &'static str {
        match self {
            UniformSlot::World => "matWorld",
            UniformSlot::ViewProj => "matViewProj",
        }
    }
}

/// Compiles one stage. The caller owns the returned shader object.
fn compile_stage<G: Graphics>(
    gfx: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, RenderError> {
    let shader = gfx
        .create_shader(stage.gl_type())
        .map_err(|log| RenderError::ShaderCompileFailed { stage, log })?;
    if let Err(log) = gfx.compile_shader(shader, source) {
        gfx.delete_shader(shader);
        return Err(RenderError::ShaderCompileFailed { stage, log });
    }
    Ok(shader)
}

/// A linked GL program.
pub struct ShaderProgram<G: Graphics> {
    id: Option<G::Program>,
}

impl<G: Graphics> fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("id", &self.id).finish()
    }
}

impl<G: Graphics> ShaderProgram<G> {
    /// Compiles both stages and links them.
    ///
    /// The intermediate shader objects are always deleted before returning.
    pub fn compile(
        gfx: &G,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, RenderError> {
        let vert = compile_stage(gfx, ShaderStage::Vertex, vertex_source)?;
        let frag = match compile_stage(gfx, ShaderStage::Fragment, fragment_source) {
            Ok(frag) => frag,
            Err(err) => {
                gfx.delete_shader(vert);
                return Err(err);
            }
        };

        let result = Self::link(gfx, &[vert, frag]);
        gfx.delete_shader(vert);
        gfx.delete_shader(frag);
        result
    }

    /// Compiles the built-in unlit program.
    pub fn unlit(gfx: &G) -> Result<Self, RenderError> {
        Self::compile(gfx, UNLIT_VERTEX_SHADER, UNLIT_FRAGMENT_SHADER)
    }

    fn link(gfx: &G, shaders: &[G::Shader]) -> Result<Self, RenderError> {
        let program = gfx.create_program().map_err(RenderError::ShaderLinkFailed)?;
        for &shader in shaders {
            gfx.attach_shader(program, shader);
        }

        let linked = gfx.link_program(program);

        for &shader in shaders {
            gfx.detach_shader(program, shader);
        }

        if let Err(log) = linked {
            gfx.delete_program(program);
            return Err(RenderError::ShaderLinkFailed(log));
        }

        log::debug!("Linked shader program {program:?}");
        Ok(Self { id: Some(program) })
    }

    /// The GL program, or `None` once released.
    pub fn id(&self) -> Option<G::Program> {
        self.id
    }

    /// Binds the shader program for use.
    pub fn use_program(&self, gfx: &G) {
        gfx.use_program(self.id);
    }

    /// Deletes the program. Calling this again does nothing.
    pub fn release(&mut self, gfx: &G) {
        if let Some(id) = self.id.take() {
            gfx.use_program(None);
            gfx.delete_program(id);
        }
    }
}

/// Resolved locations of every input the unlit program is expected to have.
pub struct ShaderBindings<G: Graphics> {
    position: u32,
    color: u32,
    world: G::UniformLocation,
    view_proj: G::UniformLocation,
}

impl<G: Graphics> fmt::Debug for ShaderBindings<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderBindings")
            .field("position", &self.position)
            .field("color", &self.color)
            .field("world", &self.world)
            .field("view_proj", &self.view_proj)
            .finish()
    }
}

impl<G: Graphics> ShaderBindings<G> {
    /// Looks up every [`Attribute`] and [`UniformSlot`], failing on the first one missing.
    pub fn resolve(gfx: &G, program: &ShaderProgram<G>) -> Result<Self, RenderError> {
        let Some(id) = program.id() else {
            return Err(RenderError::ShaderLinkFailed(
                "program was already released".to_string(),
            ));
        };

        let attribute = |attr: Attribute| {
            gfx.get_attrib_location(id, attr.name())
                .ok_or(RenderError::AttributeOrUniformNotFound {
                    kind: BindingKind::Attribute,
                    name: attr.name(),
                })
        };
        let uniform = |slot: UniformSlot| {
            gfx.get_uniform_location(id, slot.name())
                .ok_or(RenderError::AttributeOrUniformNotFound {
                    kind: BindingKind::Uniform,
                    name: slot.name(),
                })
        };

        Ok(Self {
            position: attribute(Attribute::Position)?,
            color: attribute(Attribute::Color)?,
            world: uniform(UniformSlot::World)?,
            view_proj: uniform(UniformSlot::ViewProj)?,
        })
    }

    pub fn attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Position => self.position,
            Attribute::Color => self.color,
        }
    }

    pub fn uniform(&self, slot: UniformSlot) -> &G::UniformLocation {
        match slot {
            UniformSlot::World => &self.world,
            UniformSlot::ViewProj => &self.view_proj,
        }
    }

    /// Uploads a matrix to one of the program's uniforms.
    pub fn set_matrix(&self, gfx: &G, slot: UniformSlot, value: &Mat4) {
        gfx.uniform_matrix_4(self.uniform(slot), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::gfx::recording::{Call, RecordingGraphics};

    #[test]
    fn compile_links_and_cleans_up_stages() {
        let gfx = RecordingGraphics::default();
        let program = ShaderProgram::unlit(&gfx).unwrap();
        let id = program.id().unwrap();

        let calls = gfx.calls();
        assert!(calls.contains(&Call::LinkProgram(id)));
        let deleted = calls
            .iter()
            .filter(|c| matches!(c, Call::DeleteShader(_)))
            .count();
        assert_eq!(deleted, 2);
        let detached = calls
            .iter()
            .filter(|c| matches!(c, Call::DetachShader(p, _) if *p == id))
            .count();
        assert_eq!(detached, 2);
    }

    #[test]
    fn compile_error_reports_the_stage() {
        let gfx = RecordingGraphics {
            compile_error: Some((glow::FRAGMENT_SHADER, "bad token".to_string())),
            ..Default::default()
        };
        let err = ShaderProgram::unlit(&gfx).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ShaderCompileFailed { stage: ShaderStage::Fragment, ref log } if log == "bad token"
        ));
        // The vertex stage compiled and must not leak.
        assert!(gfx.calls().iter().any(|c| matches!(c, Call::DeleteShader(_))));
        assert!(!gfx.calls().iter().any(|c| matches!(c, Call::CreateProgram(_))));
    }

    #[test]
    fn link_error_deletes_the_program() {
        let gfx = RecordingGraphics {
            link_error: Some("varying mismatch".to_string()),
            ..Default::default()
        };
        let err = ShaderProgram::unlit(&gfx).unwrap_err();
        assert!(matches!(err, RenderError::ShaderLinkFailed(ref log) if log == "varying mismatch"));
        assert!(gfx.calls().iter().any(|c| matches!(c, Call::DeleteProgram(_))));
    }

    #[test]
    fn bindings_fail_fast_on_missing_inputs() {
        let gfx = RecordingGraphics {
            uniforms: vec!["matWorld"],
            ..Default::default()
        };
        let program = ShaderProgram::unlit(&gfx).unwrap();
        let err = ShaderBindings::resolve(&gfx, &program).unwrap_err();
        assert!(matches!(
            err,
            RenderError::AttributeOrUniformNotFound {
                kind: BindingKind::Uniform,
                name: "matViewProj"
            }
        ));

        let gfx = RecordingGraphics {
            attributes: vec!["vertexPosition"],
            ..Default::default()
        };
        let program = ShaderProgram::unlit(&gfx).unwrap();
        let err = ShaderBindings::resolve(&gfx, &program).unwrap_err();
        assert!(matches!(
            err,
            RenderError::AttributeOrUniformNotFound {
                kind: BindingKind::Attribute,
                name: "vertexColor"
            }
        ));
    }

    #[test]
    fn bindings_map_slots_to_locations() {
        let gfx = RecordingGraphics {
            attributes: vec!["vertexColor", "vertexPosition"],
            ..Default::default()
        };
        let program = ShaderProgram::unlit(&gfx).unwrap();
        let bindings = ShaderBindings::resolve(&gfx, &program).unwrap();
        assert_eq!(bindings.attribute(Attribute::Position), 1);
        assert_eq!(bindings.attribute(Attribute::Color), 0);
        assert_eq!(*bindings.uniform(UniformSlot::World), gfx.uniform_location("matWorld"));
    }

    #[test]
    fn release_is_idempotent() {
        let gfx = RecordingGraphics::default();
        let mut program = ShaderProgram::unlit(&gfx).unwrap();
        gfx.clear_calls();
        program.release(&gfx);
        program.release(&gfx);
        let deletes = gfx
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::DeleteProgram(_)))
            .count();
        assert_eq!(deletes, 1);
        assert_eq!(program.id(), None);
    }
}
