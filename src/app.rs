//! Window, event loop and the per-frame drive.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::animation::FrameScheduler;
use crate::error::AppError;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::renderer::Renderer;
use crate::scene::{CompositionConfig, Stage, compose, compose_showcases};

/// Window and scene settings for [`run`].
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub composition: CompositionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "portfolio3d".to_string(),
            width: 1280,
            height: 800,
            composition: CompositionConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fixes the RNG seed for the particle field and flame flicker.
    pub fn seed(mut self, seed: u64) -> Self {
        self.composition = self.composition.seed(seed);
        self
    }

    pub fn particles(mut self, count: usize) -> Self {
        self.composition = self.composition.particles(count);
        self
    }
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: Renderer,
    input: Input,
}

/// A minimised window reports a zero-sized surface; there is nothing to draw into.
fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

struct PortfolioApp {
    config: AppConfig,
    scheduler: FrameScheduler<dyn Stage>,
    running: Option<Running>,
    start_time: Instant,
    error: Option<AppError>,
}

impl PortfolioApp {
    fn new(config: AppConfig) -> Self {
        let mut scheduler: FrameScheduler<dyn Stage> = FrameScheduler::new();
        scheduler.register(Box::new(compose(&config.composition)));
        for showcase in compose_showcases() {
            scheduler.register(Box::new(showcase));
        }

        Self {
            config,
            scheduler,
            running: None,
            start_time: Instant::now(),
            error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, AppError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;
        let renderer = Renderer::new(&gpu);
        let input = Input::for_window(window.inner_size(), window.scale_factor());
        log::info!(
            "[app] window {}x{}, {} scenes",
            gpu.width(),
            gpu.height(),
            self.scheduler.len()
        );

        Ok(Running {
            window,
            gpu,
            renderer,
            input,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };
        if !is_drawable(running.window.inner_size()) {
            // the next non-zero Resized restarts the loop
            return;
        }

        let elapsed = self.start_time.elapsed().as_secs_f32();
        self.scheduler.tick(&running.input.state(elapsed));

        match running.renderer.render(&running.gpu, self.scheduler.scenes()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("[app] surface lost, reconfiguring");
                running.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Outdated) => {
                log::debug!("[app] surface outdated, reconfiguring");
                running.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("[app] surface timeout, skipping frame");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[app] out of GPU memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("[app] skipping frame: {}", e);
            }
        }

        running.window.request_redraw();
    }
}

impl ApplicationHandler for PortfolioApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("[app] startup failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = &mut self.running else {
            return;
        };

        running.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("[app] exiting after {} frames", self.scheduler.frames());
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running.gpu.resize(size.width, size.height);
                if is_drawable(size) {
                    running.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Opens the window and runs the scene until it is closed.
///
/// Scenes are composed before the window exists; a failure to create the window or
/// initialise the GPU ends the loop and is returned here.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PortfolioApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_feeds_composition() {
        let config = AppConfig::new().title("demo").size(640, 480).seed(12).particles(100);
        assert_eq!(config.title, "demo");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.composition.seed, Some(12));
        assert_eq!(config.composition.particle_count, 100);
    }

    #[test]
    fn defaults_match_the_portfolio_page() {
        let config = AppConfig::default();
        assert_eq!(config.title, "portfolio3d");
        assert_eq!((config.width, config.height), (1280, 800));
        assert_eq!(config.composition.particle_count, 8000);
        assert_eq!(config.composition.seed, None);
    }

    #[test]
    fn app_registers_background_then_showcases() {
        let app = PortfolioApp::new(AppConfig::new().seed(1).particles(10));
        let names: Vec<&str> = app.scheduler.scenes().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["background", "about", "dna", "atom", "flower"]);
        assert_eq!(app.scheduler.scenes()[0].inset(), None);
    }

    #[test]
    fn minimised_windows_are_not_drawn() {
        assert!(!is_drawable(PhysicalSize::new(0, 0)));
        assert!(!is_drawable(PhysicalSize::new(1280, 0)));
        assert!(is_drawable(PhysicalSize::new(1280, 800)));
    }
}
