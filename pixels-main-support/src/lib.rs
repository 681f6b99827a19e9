#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::error::Error;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};
use world_grid::World;

const FRAME_MILLIS: u64 = 33;
const BACKGROUND_COLOR: Color = Color::BLACK;

/// Runs a fullscreen window that feeds the world its elapsed time once per frame and paints
/// one pixel per grid cell, scaled up to fill the screen. `build_world` gets the window's
/// physical size; if it fails, the error is logged and the loop exits before a first frame.
pub fn animate<W, E, F>(build_world: F) -> Result<(), EventLoopError>
where
    W: World,
    E: Error + 'static,
    F: Fn(PhysicalSize<u32>) -> Result<W, E>,
{
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut AppEventHandler::new(build_world))
}

pub fn log_error<E: Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}

struct App<W: World> {
    world: W,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    started: Instant,
    next_frame: Instant,
}

impl<W: World> App<W> {
    fn new<E, F>(event_loop: &ActiveEventLoop, build_world: &F) -> Option<Self>
    where
        E: Error + 'static,
        F: Fn(PhysicalSize<u32>) -> Result<W, E>,
    {
        let window = match Self::build_window(event_loop) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log_error("create_window", err);
                return None;
            }
        };
        let world = match build_world(window.inner_size()) {
            Ok(world) => world,
            Err(err) => {
                log_error("build_world", err);
                return None;
            }
        };
        let pixels = match Self::build_pixels(&window, &world) {
            Ok(pixels) => pixels,
            Err(err) => {
                log_error("build_pixels", err);
                return None;
            }
        };
        let size = world.size();
        info!("Animating a {}x{} world", size.width, size.height);
        let now = Instant::now();
        Some(Self {
            world,
            window,
            pixels,
            started: now,
            next_frame: now,
        })
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Result<Window, winit::error::OsError> {
        let window_attributes = Window::default_attributes()
            .with_title("Life Saver")
            .with_fullscreen(Some(Fullscreen::Borderless(None)))
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(window: &Arc<Window>, world: &W) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let size = world.size();
        PixelsBuilder::new(size.width, size.height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.window.set_cursor_visible(false);
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_frame(&mut self) {
        self.world.update(self.started.elapsed());
        self.window.request_redraw();

        let frame = Duration::from_millis(FRAME_MILLIS);
        while self.next_frame < Instant::now() {
            self.next_frame += frame;
        }
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * self.world.size().num_cells());

        for (color, pixel) in self
            .world
            .cell_colors_rgba()
            .zip(screen.chunks_exact_mut(4))
        {
            pixel.copy_from_slice(&color);
        }
        self.pixels.render()
    }
}

struct AppEventHandler<W, E, F>
where
    W: World,
    E: Error + 'static,
    F: Fn(PhysicalSize<u32>) -> Result<W, E>,
{
    build_world: F,
    app: Option<App<W>>,
    _error: PhantomData<fn() -> E>,
}

impl<W, E, F> AppEventHandler<W, E, F>
where
    W: World,
    E: Error + 'static,
    F: Fn(PhysicalSize<u32>) -> Result<W, E>,
{
    fn new(build_world: F) -> Self {
        Self {
            build_world,
            app: None,
            _error: PhantomData,
        }
    }
}

impl<W, E, F> ApplicationHandler for AppEventHandler<W, E, F>
where
    W: World,
    E: Error + 'static,
    F: Fn(PhysicalSize<u32>) -> Result<W, E>,
{
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_frame();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, &self.build_world) {
            Some(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            None => event_loop.exit(),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                _ => (),
            },
            WindowEvent::RedrawRequested => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.on_redraw()
                {
                    log_error("pixels.render", err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_frame));
        }
    }
}
