extern crate nalgebra_glm as glm;

use anyhow::Context;
use thiserror::Error;

mod app;
mod camera;
mod config;
mod input;
mod mesh;
mod renderer;
mod shader;
mod sphere;

use app::AppState;
use camera::Camera;
use config::Config;
use renderer::Renderer;
use sphere::Sphere;

/// Window or context setup failures; SDL reports most of them as strings.
#[derive(Debug, Error)]
enum InitError {
    #[error("SDL initialization failed: {0}")]
    Sdl(String),
    #[error("window creation failed: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("OpenGL context creation failed: {0}")]
    Context(String),
    #[error("failed to load OpenGL function pointers")]
    GlLoad,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let (config, source) = Config::discover().context("failed to load configuration")?;
    match source {
        Some(path) => log::info!("using config {}", path.display()),
        None => log::info!("no config file found, using defaults"),
    }

    // reject bad parameters before touching the GPU
    let sphere = Sphere::generate(
        config.sphere.radius,
        config.sphere.rings,
        config.sphere.vertices_per_ring
    ).context("invalid sphere parameters")?;
    log::info!(
        "sphere: {} vertices ({} floats), {} triangles ({} indices)",
        sphere.vertex_count(),
        sphere.vertices.len(),
        sphere.triangle_count(),
        sphere.indices.len()
    );
    log::debug!(
        "apex {:?}, base pole {:?}, center {:?}",
        sphere.position(0),
        sphere.position(sphere.vertex_count() - 1),
        sphere.center()
    );

    let sdl = sdl2::init().map_err(InitError::Sdl)?;
    let video_subsystem = sdl.video().map_err(InitError::Sdl)?;
    let gl_attr = video_subsystem.gl_attr();

    gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
    gl_attr.set_context_version(3, 3);

    let window = video_subsystem
        .window(&config.window.title, config.window.width, config.window.height)
        .opengl()
        .resizable()
        .build()
        .map_err(InitError::from)?;

    let _gl_context = window.gl_create_context().map_err(InitError::Context)?;
    gl::load_with(
        |s| video_subsystem.gl_get_proc_address(s) as *const std::os::raw::c_void
    );
    if !gl::DrawElements::is_loaded() {
        return Err(InitError::GlLoad.into());
    }
    log_gl_version();

    let swap_interval = if config.render.vsync {
        sdl2::video::SwapInterval::VSync
    } else {
        sdl2::video::SwapInterval::Immediate
    };
    if let Err(err) = video_subsystem.gl_set_swap_interval(swap_interval) {
        log::warn!("could not set swap interval: {}", err);
    }

    sdl.mouse().set_relative_mouse_mode(true);

    let renderer = Renderer::new(&config.render, &sphere)
        .context("failed to set up sphere renderer")?;

    let camera = Camera::from_config(&config.camera);
    log::info!(
        "camera at {:?}, yaw {} pitch {} fov {}",
        camera.position().as_slice(),
        camera.yaw(),
        camera.pitch(),
        camera.zoom()
    );
    log::debug!(
        "camera basis: front {:?} right {:?} up {:?}",
        camera.front().as_slice(),
        camera.right().as_slice(),
        camera.up().as_slice()
    );

    let mut state = AppState::new(camera, window.drawable_size());

    let mut event_pump = sdl.event_pump().map_err(InitError::Sdl)?;
    while state.is_running() {
        let dt = state.tick();

        for event in event_pump.poll_iter() {
            state.handle_event(&event);
        }

        let keyboard = event_pump.keyboard_state();
        state.process_keyboard(|scancode| keyboard.is_scancode_pressed(scancode), dt);

        if state.take_resize() {
            let (width, height) = window.drawable_size();
            if state.set_viewport(width, height) {
                renderer.resize(width, height);
            }
        }

        renderer.draw(&state.camera, state.aspect());
        window.gl_swap_window();
    }

    log::info!("shutting down");
    Ok(())
}

fn log_gl_version() {
    let version = unsafe {
        let ptr = gl::GetString(gl::VERSION);
        if ptr.is_null() {
            return;
        }
        std::ffi::CStr::from_ptr(ptr as *const std::os::raw::c_char)
    };
    log::info!("OpenGL {}", version.to_string_lossy());
}
