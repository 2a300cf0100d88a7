use std::time::Instant;

use intro3d_core::{
    RenderError,
    config::DemoConfig,
    scene::{NextFrame, Scene, demo_layout},
    timing::FpsCounter,
};
use sdl2::{event::Event, keyboard::Keycode};

use crate::abs::*;

mod abs;
mod logger;
mod settings;

/// Shows a fatal error to the user. The message is logged in any case.
fn show_error(title: &str, message: &str) {
    log::error!("{message}");
    if let Err(err) = sdl2::messagebox::show_simple_message_box(
        sdl2::messagebox::MessageBoxFlag::ERROR,
        title,
        message,
        None::<&sdl2::video::Window>,
    ) {
        log::error!("Could not show error dialog: {err:?}");
    }
}

fn run(config: &DemoConfig) -> Result<(), RenderError> {
    let mut app = App::new(&config.window)?;

    let mut scene = Scene::new(config, demo_layout());
    scene.init(&app.gl)?;
    scene.start(Instant::now());

    let mut fps = FpsCounter::default();

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } if keycode == Keycode::Escape => break 'running,
                _ => {}
            }
        }

        let now = Instant::now();
        let mut surface = WindowSurface::new(&app.window);
        if scene.frame(&app.gl, &mut surface, now) == NextFrame::Stop {
            break 'running;
        }
        app.window.gl_swap_window();

        if config.window.show_fps
            && let Some(rate) = fps.tick(now)
        {
            let title = format!("{} - FPS: {rate:.1}", config.window.title);
            if let Err(err) = app.window.set_title(&title) {
                log::warn!("Could not update window title: {err}");
            }
        }
    }

    scene.stop(&app.gl);
    Ok(())
}

fn main() {
    let (config, source) = settings::load();
    logger::init(&config.log_level);
    match source {
        settings::Source::Defaults => log::info!("No config file, using defaults"),
        settings::Source::File(path) => log::info!("Loaded config from {}", path.display()),
        settings::Source::Failed(path, err) => {
            log::warn!("{}: {err}; using defaults", path.display())
        }
    }

    if let Err(err) = run(&config) {
        show_error(&config.window.title, &err.to_string());
        std::process::exit(1);
    }
}
