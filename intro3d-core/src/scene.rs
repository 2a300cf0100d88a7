//! The scene: camera, shapes, and the per-frame update/draw loop.
//!
//! A [`Scene`] moves through `Uninitialized -> Ready -> Running -> Stopped`. The host calls
//! [`Scene::frame`] once per display refresh and keeps doing so for as long as it returns
//! [`NextFrame::Schedule`].

use std::time::Instant;

use glam::Vec3;

use crate::{
    abs::{GeometryId, GeometryPool, Graphics, ShaderBindings, ShaderProgram, UniformSlot},
    camera::OrbitCamera,
    config::DemoConfig,
    error::RenderError,
    geometry::Primitive,
    shape::ShapeInstance,
    surface::{Surface, fit_to_display},
};

/// Lifecycle of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Uninitialized,
    Ready,
    Running,
    Stopped,
}

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextFrame {
    Schedule,
    Stop,
}

/// Where to put one shape when the scene is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDesc {
    pub primitive: Primitive,
    pub position: Vec3,
    pub scale: f32,
    pub rotation_axis: Vec3,
    pub rotation_degrees: f32,
}

impl ShapeDesc {
    pub fn new(primitive: Primitive, position: Vec3, scale: f32, rotation_degrees: f32) -> Self {
        Self {
            primitive,
            position,
            scale,
            rotation_axis: Vec3::Y,
            rotation_degrees,
        }
    }
}

/// The grey table with five cubes of increasing size and rotation on it.
pub fn demo_layout() -> Vec<ShapeDesc> {
    vec![
        ShapeDesc::new(Primitive::Table, Vec3::ZERO, 1.0, 0.0),
        ShapeDesc::new(Primitive::Cube, Vec3::new(0.0, 0.4, 0.0), 0.4, 0.0),
        ShapeDesc::new(Primitive::Cube, Vec3::new(1.0, 0.05, 1.0), 0.05, 20.0),
        ShapeDesc::new(Primitive::Cube, Vec3::new(1.0, 0.1, -1.0), 0.1, 40.0),
        ShapeDesc::new(Primitive::Cube, Vec3::new(-1.0, 0.15, 1.0), 0.15, 60.0),
        ShapeDesc::new(Primitive::Cube, Vec3::new(-1.0, 0.2, -1.0), 0.2, 80.0),
    ]
}

/// GPU objects and shapes, alive between `init` and `stop`.
struct SceneResources<G: Graphics> {
    program: ShaderProgram<G>,
    bindings: ShaderBindings<G>,
    pool: GeometryPool<G>,
    shapes: Vec<ShapeInstance>,
}

pub struct Scene<G: Graphics> {
    state: SceneState,
    camera: OrbitCamera,
    clear_color: [f32; 4],
    layout: Vec<ShapeDesc>,
    last_frame: Option<Instant>,
    resources: Option<SceneResources<G>>,
}

impl<G: Graphics> Scene<G> {
    pub fn new(config: &DemoConfig, layout: Vec<ShapeDesc>) -> Self {
        Self {
            state: SceneState::Uninitialized,
            camera: OrbitCamera::from_config(&config.camera),
            clear_color: config.clear_color,
            layout,
            last_frame: None,
            resources: None,
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Shapes in draw order. Empty unless the scene is ready or running.
    pub fn shapes(&self) -> &[ShapeInstance] {
        match &self.resources {
            Some(resources) => &resources.shapes,
            None => &[],
        }
    }

    pub fn shapes_mut(&mut self) -> &mut [ShapeInstance] {
        match &mut self.resources {
            Some(resources) => &mut resources.shapes,
            None => &mut [],
        }
    }

    /// Compiles the program, uploads geometry and places the shapes.
    ///
    /// On failure everything created so far is released and the scene stays
    /// uninitialized.
    pub fn init(&mut self, gfx: &G) -> Result<(), RenderError> {
        if self.state != SceneState::Uninitialized {
            log::warn!("Ignoring init of a scene that is {:?}", self.state);
            return Ok(());
        }

        let mut program = ShaderProgram::unlit(gfx)?;
        let mut pool = GeometryPool::new();
        match Self::build(gfx, &self.layout, &program, &mut pool) {
            Ok((bindings, shapes)) => {
                log::info!(
                    "Scene ready: {} shapes sharing {} geometries",
                    shapes.len(),
                    pool.live_count()
                );
                self.resources = Some(SceneResources {
                    program,
                    bindings,
                    pool,
                    shapes,
                });
                self.state = SceneState::Ready;
                Ok(())
            }
            Err(err) => {
                pool.release_all(gfx);
                program.release(gfx);
                Err(err)
            }
        }
    }

    fn build(
        gfx: &G,
        layout: &[ShapeDesc],
        program: &ShaderProgram<G>,
        pool: &mut GeometryPool<G>,
    ) -> Result<(ShaderBindings<G>, Vec<ShapeInstance>), RenderError> {
        let bindings = ShaderBindings::resolve(gfx, program)?;

        let mut uploaded: Vec<(Primitive, GeometryId)> = Vec::new();
        let mut shapes = Vec::with_capacity(layout.len());
        for desc in layout {
            let table = desc.primitive.table();
            let id = match uploaded.iter().find(|(p, _)| *p == desc.primitive) {
                Some(&(_, id)) => id,
                None => {
                    debug_assert!(table.validate().is_ok(), "`{}` is malformed", table.name());
                    let id = pool.upload(gfx, table, &bindings)?;
                    uploaded.push((desc.primitive, id));
                    id
                }
            };
            shapes.push(ShapeInstance::new(
                desc.position,
                desc.scale,
                desc.rotation_axis,
                desc.rotation_degrees.to_radians(),
                id,
                table.index_count(),
            ));
        }

        Ok((bindings, shapes))
    }

    /// Starts the frame loop. `now` becomes the timestamp of the previous frame.
    pub fn start(&mut self, now: Instant) {
        if self.state != SceneState::Ready {
            log::warn!("Cannot start a scene that is {:?}", self.state);
            return;
        }
        self.last_frame = Some(now);
        self.state = SceneState::Running;
        log::info!("Scene running");
    }

    /// Runs one frame timed against the previous call.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        gfx: &G,
        surface: &mut S,
        now: Instant,
    ) -> NextFrame {
        if self.state != SceneState::Running {
            return NextFrame::Stop;
        }
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last_frame = Some(now);
        self.advance(gfx, surface, dt)
    }

    /// Runs one frame with an explicit time step in seconds.
    pub fn advance<S: Surface + ?Sized>(
        &mut self,
        gfx: &G,
        surface: &mut S,
        dt: f32,
    ) -> NextFrame {
        if self.state != SceneState::Running {
            return NextFrame::Stop;
        }
        let Some(resources) = &self.resources else {
            return NextFrame::Stop;
        };

        self.camera.advance(dt);

        let (width, height) = fit_to_display(surface);
        let view_proj = self.camera.view_projection(width, height);

        gfx.clear_color(self.clear_color);
        gfx.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        gfx.enable(glow::DEPTH_TEST);
        gfx.enable(glow::CULL_FACE);
        gfx.cull_face(glow::BACK);
        gfx.viewport(0, 0, width as i32, height as i32);

        resources.program.use_program(gfx);
        resources
            .bindings
            .set_matrix(gfx, UniformSlot::ViewProj, &view_proj);

        let world = resources.bindings.uniform(UniformSlot::World);
        for shape in &resources.shapes {
            shape.draw(gfx, &resources.pool, world);
        }

        NextFrame::Schedule
    }

    /// Releases every GPU object. The shapes go first, then their geometry, then the
    /// program.
    pub fn stop(&mut self, gfx: &G) {
        if self.state == SceneState::Stopped {
            return;
        }
        if let Some(resources) = self.resources.take() {
            let SceneResources {
                mut program,
                mut pool,
                shapes,
                ..
            } = resources;
            drop(shapes);
            pool.release_all(gfx);
            program.release(gfx);
        }
        self.last_frame = None;
        self.state = SceneState::Stopped;
        log::info!("Scene stopped");
    }
}
