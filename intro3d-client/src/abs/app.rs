//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context, and [`WindowSurface`] which exposes the window to the scene.

use intro3d_core::{RenderError, config::WindowConfig, surface::Surface};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: glow::Context,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Opens a window with a GL 3.3 core context as described by `config`.
    /// The width and height options are ignored if `fullscreen` is set to `true`.
    pub fn new(config: &WindowConfig) -> Result<Self, RenderError> {
        let sdl = sdl2::init().map_err(RenderError::SurfaceAcquisitionFailed)?;
        let video_subsystem = sdl
            .video()
            .map_err(RenderError::SurfaceAcquisitionFailed)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);

        let (width, height) = if config.fullscreen {
            let display_mode = video_subsystem
                .current_display_mode(0)
                .map_err(RenderError::SurfaceAcquisitionFailed)?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (config.width, config.height)
        };

        let mut window = video_subsystem
            .window(&config.title, width, height)
            .opengl()
            .resizable()
            .allow_highdpi()
            .build()
            .map_err(|e| RenderError::SurfaceAcquisitionFailed(e.to_string()))?;
        window
            .set_fullscreen(if config.fullscreen {
                sdl2::video::FullscreenType::Desktop
            } else {
                sdl2::video::FullscreenType::Off
            })
            .map_err(RenderError::SurfaceAcquisitionFailed)?;

        let gl_context = window
            .gl_create_context()
            .map_err(RenderError::SurfaceAcquisitionFailed)?;
        window
            .gl_make_current(&gl_context)
            .map_err(RenderError::SurfaceAcquisitionFailed)?;

        let interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(err) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval: {err}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl
            .event_pump()
            .map_err(RenderError::SurfaceAcquisitionFailed)?;

        log::info!(
            "Opened {}x{} window (drawable {:?})",
            width,
            height,
            window.drawable_size()
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }
}

/// The window as seen by the scene.
///
/// SDL keeps the GL drawable in step with the window itself, so a resize request only
/// needs to be noted; the scene reads back the real drawable size afterwards.
pub struct WindowSurface<'a> {
    window: &'a sdl2::video::Window,
}

impl<'a> WindowSurface<'a> {
    pub fn new(window: &'a sdl2::video::Window) -> Self {
        Self { window }
    }
}

impl Surface for WindowSurface<'_> {
    fn display_size(&self) -> (u32, u32) {
        self.window.size()
    }

    fn pixel_ratio(&self) -> (f32, f32) {
        let (width, height) = self.window.size();
        let (drawable_width, drawable_height) = self.window.drawable_size();
        let ratio = |drawable: u32, logical: u32| {
            if logical == 0 {
                1.0
            } else {
                drawable as f32 / logical as f32
            }
        };
        (ratio(drawable_width, width), ratio(drawable_height, height))
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    fn set_drawable_size(&mut self, width: u32, height: u32) {
        log::trace!("Drawable follows the window, requested {width}x{height}");
    }
}
