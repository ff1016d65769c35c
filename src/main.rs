//! DataGlimpse hero banner
//!
//! An animated particle field behind the landing page headline: drifting
//! particles linked by faint lines, pulled gently toward the pointer.

mod cli;
mod gui;
mod headless;
mod host;
mod scroll;
mod typewriter;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use field_renderer::color::palette;
use field_renderer::renderer::FieldRenderer;
use field_renderer::tessellate::FieldStyle;
use field_simulation::{Animator, AnimatorState, FieldParams, HostEvent, SurfaceSize};
use gui::{Gui, UiState};
use host::WindowHost;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scroll::{ScrollProgress, LINE_HEIGHT};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use typewriter::Typewriter;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Frame times kept for the FPS average
const FRAME_WINDOW: usize = 100;

/// Everything decided before the window exists
struct Settings {
    params: FieldParams,
    seed: u64,
    width: u32,
    height: u32,
    page_heights: f32,
    overlay: bool,
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: FieldRenderer,
    gui: Option<Gui>,
    ui_state: UiState,
    animator: Animator<WindowHost>,
    typewriter: Typewriter,
    scroll: ScrollProgress,
    last_frame_time: Instant,
    frame_times: VecDeque<f32>,
}

impl GpuState {
    async fn new(window: Arc<Window>, settings: &Settings) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create GPU device")?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            // Frames follow the display refresh
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = FieldRenderer::new(
            &device,
            surface_format,
            FieldStyle::default(),
            palette::BACKGROUND,
        );
        log::info!("✓ Renderer initialized");

        let gui = settings
            .overlay
            .then(|| Gui::new(&device, surface_format, &window));

        let host = WindowHost::new(window.clone());
        let logical_height = host.logical_size(size).map_or(0.0, |s| s.height);
        let animator = Animator::new(
            host,
            settings.params.clone(),
            StdRng::seed_from_u64(settings.seed),
        );

        let ui_state = UiState {
            seed: settings.seed,
            ..Default::default()
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            gui,
            ui_state,
            animator,
            typewriter: Typewriter::default(),
            scroll: ScrollProgress::new(logical_height, settings.page_heights),
            last_frame_time: Instant::now(),
            frame_times: VecDeque::with_capacity(FRAME_WINDOW),
        })
    }

    fn configure_surface(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.configure_surface(new_size);

        let Some(logical) = self.animator.host().logical_size(new_size) else {
            // Minimized: keep the current field until there is a surface again
            return;
        };
        self.scroll.set_viewport_height(logical.height);

        match self.animator.state() {
            AnimatorState::Idle => {
                self.animator.mount();
            }
            // winit also reports the initial size; only real changes respawn
            AnimatorState::Running if self.animator.field().map(|f| f.size()) != Some(logical) => {
                self.animator.dispatch(HostEvent::Resize(logical));
            }
            AnimatorState::Running | AnimatorState::Stopped => {}
        }
    }

    fn logical_surface(&self) -> SurfaceSize {
        self.animator
            .host()
            .logical_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ))
            .unwrap_or(SurfaceSize {
                width: 1.0,
                height: 1.0,
            })
    }

    fn render(&mut self, window: &Window) -> Result<(f32, f32), wgpu::SurfaceError> {
        // Track frame time
        let now = Instant::now();
        let dt = now - self.last_frame_time;
        self.last_frame_time = now;

        let frame_time = dt.as_secs_f32() * 1000.0;
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_WINDOW {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = 1000.0 / avg_frame_time;

        // Step the field only when this redraw is the frame it asked for
        if let Some(handle) = self.animator.host_mut().take_pending() {
            self.animator.on_frame(handle);
        }
        self.typewriter.advance(dt);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let surface = self.logical_surface();
        self.renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            [surface.width, surface.height],
            self.animator.frame(),
        );

        if let Some(gui) = &mut self.gui {
            self.ui_state.fps = fps;
            self.ui_state.frame_time = avg_frame_time;
            self.ui_state.particle_count = self.animator.field().map_or(0, |f| f.particles().len());
            self.ui_state.link_count = self.animator.frame().links.len();
            self.ui_state.generation = self.animator.field().map_or(0, |f| f.generation());
            self.ui_state.typed_text = self.typewriter.text();
            self.ui_state.scroll_progress = self.scroll.progress();
            self.ui_state.indicator_visible = self.scroll.indicator_visible();

            let actions = gui.render(
                &self.device,
                &self.queue,
                &mut encoder,
                window,
                &view,
                &mut self.ui_state,
                self.animator.params_mut(),
            );
            if actions.regenerate {
                self.animator.regenerate();
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok((fps, avg_frame_time))
    }
}

struct App {
    settings: Settings,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    /// Finger whose movement steers the field
    primary_touch: Option<u64>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            window: None,
            gpu_state: None,
            primary_touch: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("DataGlimpse")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );
        let mut gpu_state = pollster::block_on(GpuState::new(window.clone(), &self.settings))?;

        // Stays idle on a zero-sized window; the first real resize mounts it.
        gpu_state.animator.mount();

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn handle_touch(&mut self, touch: Touch) {
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        match touch.phase {
            TouchPhase::Started => {
                if self.primary_touch.is_none() {
                    self.primary_touch = Some(touch.id);
                }
            }
            TouchPhase::Moved => {
                // Other fingers carry no usable touch point
                let point = (self.primary_touch == Some(touch.id))
                    .then(|| gpu_state.animator.host().logical_position(touch.location));
                gpu_state.animator.dispatch(HostEvent::TouchMove(point));
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.primary_touch == Some(touch.id) {
                    self.primary_touch = None;
                }
            }
        }
    }

    fn into_result(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                log::error!("{err:#}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Handle GUI events
        if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
            if let Some(gui) = &mut gpu_state.gui {
                if gui.handle_event(window, &event) {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.animator.unmount();
                }
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    match code {
                        KeyCode::KeyR => gpu_state.animator.regenerate(),
                        KeyCode::KeyF => {
                            gpu_state.ui_state.show_controls = !gpu_state.ui_state.show_controls
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    let position = gpu_state.animator.host().logical_position(position);
                    gpu_state.animator.dispatch(HostEvent::PointerMove(position));
                }
            }

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    let scroll_amount = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
                        MouseScrollDelta::PixelDelta(pos) => {
                            -pos.to_logical::<f32>(gpu_state.animator.host().scale_factor()).y
                        }
                    };
                    gpu_state.scroll.scroll_by(scroll_amount);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(window) {
                        Ok((fps, frame_time)) => {
                            window.set_title(&format!(
                                "DataGlimpse - {:.0} FPS ({:.2}ms)",
                                fps, frame_time
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.configure_surface(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state.animator.unmount();
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    // GPU backends are chatty below warn
    builder
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("naga", log::LevelFilter::Warn);
    if let Some(level) = cli.log_level() {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let params = cli.load_params()?;
    if cli.dump_params {
        print!("{}", params.to_toml_string()?);
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Starting hero particle field (seed {seed})");

    if let Some(frames) = cli.headless {
        let size = SurfaceSize::new(cli.width as f32, cli.height as f32)
            .context("headless surface needs a positive width and height")?;
        let report = headless::run(params, size, seed, frames)?;
        println!(
            "{} frames, {} particles, {:.1} links/frame (max {}), {:.2?} total",
            report.frames, report.particles, report.mean_links, report.max_links, report.elapsed
        );
        return Ok(());
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    // Redraws are requested by the animator itself
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(Settings {
        params,
        seed,
        width: cli.width,
        height: cli.height,
        page_heights: cli.page_heights,
        overlay: !cli.no_overlay,
    });

    event_loop.run_app(&mut app).context("event loop failed")?;
    app.into_result()
}
