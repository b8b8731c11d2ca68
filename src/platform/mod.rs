//! Native platform shell
//!
//! Handles the OS side of the loop:
//! - Window creation and the event pump (winit)
//! - Held-key tracking
//! - Presenting the back buffer through a `pixels` surface

pub mod keys;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::game::Game;
use crate::renderer::Framebuffer;
use crate::settings::Settings;
use crate::sim::InputState;
use crate::sprite::Sprite;
use keys::{KeyAction, apply_key};

/// Open the window and run until it is closed
pub fn run(settings: Settings, sprite: Sprite) -> Result<()> {
    let game = Game::from_settings(&settings, sprite).context("building the scene")?;

    let event_loop = EventLoop::new().context("creating the event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, game);
    event_loop.run_app(&mut app).context("running the event loop")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Convert the bottom-up `0x00RRGGBB` back buffer into a top-down RGBA8 frame
pub fn present(back_buffer: &[u32], width: usize, frame: &mut [u8]) {
    if width == 0 {
        return;
    }
    let rows = back_buffer.chunks_exact(width).rev();
    for (src, dst) in rows.zip(frame.chunks_exact_mut(width * 4)) {
        for (&pixel, rgba) in src.iter().zip(dst.chunks_exact_mut(4)) {
            rgba.copy_from_slice(&[(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8, 0xFF]);
        }
    }
}

struct Surface {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

struct App {
    settings: Settings,
    game: Game,
    /// Held keys, rebuilt from key events between frames
    input: InputState,
    back_buffer: Vec<u32>,
    surface: Option<Surface>,
    last_frame: Option<Instant>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings, game: Game) -> Self {
        let len = settings.width as usize * settings.height as usize;
        Self {
            settings,
            game,
            input: InputState::default(),
            back_buffer: vec![0; len],
            surface: None,
            last_frame: None,
            error: None,
        }
    }

    fn create_surface(&self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("creating the window")?,
        );

        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(self.settings.width, self.settings.height, texture)
            .context("creating the pixel surface")?;
        log::info!(
            "Window created ({}x{}, back buffer {}x{})",
            size.width,
            size.height,
            self.settings.width,
            self.settings.height
        );

        Ok(Surface { window, pixels })
    }

    fn redraw(&mut self) -> Result<()> {
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map(|prev| now.duration_since(prev).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        let width = self.settings.width as usize;
        let height = self.settings.height as usize;
        let mut fb = Framebuffer::new(&mut self.back_buffer, width, height)?;
        self.game.advance(&self.input, elapsed, &mut fb);

        if let Some(surface) = self.surface.as_mut() {
            present(&self.back_buffer, width, surface.pixels.frame_mut());
            surface.pixels.render().context("presenting the frame")?;
        }
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        if let Some(surface) = self.surface.as_mut() {
            surface
                .pixels
                .resize_surface(size.width, size.height)
                .context("resizing the surface")?;
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match self.create_surface(event_loop) {
            Ok(surface) => self.surface = Some(surface),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(surface) = &self.surface {
            surface.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Err(err) = self.resize(size) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if apply_key(&mut self.input, code, pressed) == KeyAction::Quit {
                    log::info!("Escape pressed, exiting");
                    event_loop.exit();
                }
            }

            // Key-up events are lost while unfocused
            WindowEvent::Focused(false) => self.input = InputState::default(),

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }

            _ => {}
        }
    }
}
