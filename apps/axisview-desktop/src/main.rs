use anyhow::{Context, Result};
use axisview_common::ViewerConfig;
use axisview_render::{FrameGeometry, Renderer, SceneMesher, TextStyle};
use axisview_render_wgpu::WgpuRenderer;
use axisview_scene::{Font, FontLoader};
use axisview_viewer::{StartupGate, Viewer};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// egui family name the toolbar font is registered under.
const TOOLBAR_FAMILY: &str = "toolbar";

#[derive(Parser)]
#[command(name = "axisview-desktop", about = "Interactive axis plane viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON viewer config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with the dark theme
    #[arg(long)]
    dark: bool,

    /// Show the spinning marker cube
    #[arg(long)]
    show_marker: bool,

    /// Edge length of the axis planes
    #[arg(long)]
    reference_size: Option<f32>,

    /// Toolbar caption font (TTF)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Delay before the first animated frame, in milliseconds
    #[arg(long)]
    startup_delay_ms: Option<u64>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ViewerConfig> {
        let mut config = ViewerConfig::load_or_default(self.config.as_deref())
            .context("loading viewer config")?;
        if self.dark {
            config.dark_theme = true;
        }
        if self.show_marker {
            config.show_marker = true;
        }
        if let Some(size) = self.reference_size {
            config.reference_size = size;
        }
        if let Some(font) = &self.font {
            config.font_path = font.clone();
        }
        if let Some(delay) = self.startup_delay_ms {
            config.startup_delay_ms = delay;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Viewer plus the host-side bits that feed it.
struct AppState {
    viewer: Viewer,
    mesher: SceneMesher,
    font_loader: FontLoader,
    gate: StartupGate,
    cursor: Vec2,
}

impl AppState {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            viewer: Viewer::new(config, config.window_width, config.window_height),
            mesher: SceneMesher::new(),
            font_loader: FontLoader::spawn(config.font_path.clone()),
            gate: StartupGate::new(Instant::now(), config.startup_delay()),
            cursor: Vec2::ZERO,
        }
    }

    /// Pick up the font if the loader finished. Returns it for egui.
    fn poll_font(&mut self) -> Option<Font> {
        match self.font_loader.poll()? {
            Ok(font) => {
                self.viewer.set_font(font.clone());
                Some(font)
            }
            Err(e) => {
                self.viewer.font_failed(&e);
                None
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyT => self.viewer.toggle_theme(),
            KeyCode::Escape => {
                self.viewer.unlock();
            }
            _ => {}
        }
    }

    /// Advance the viewer if the startup delay has passed, then mesh the
    /// current state.
    fn frame(&mut self) -> FrameGeometry {
        if self.gate.poll(Instant::now()) {
            self.viewer.frame();
        }
        self.mesher.render(&self.viewer)
    }

    /// Draw world-anchored text over the 3D pass.
    fn draw_overlay(&self, ctx: &EguiContext, frame: &FrameGeometry) {
        let camera = self.viewer.camera();
        let viewport = self.viewer.viewport();
        let ppp = ctx.pixels_per_point();
        let has_toolbar_font = self.viewer.font().is_some();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("world_text"),
        ));

        for text in &frame.texts {
            let Some(pixel) = camera.project(text.position, viewport) else {
                continue;
            };
            let family = if has_toolbar_font && text.style == TextStyle::Caption {
                egui::FontFamily::Name(TOOLBAR_FAMILY.into())
            } else {
                egui::FontFamily::Proportional
            };
            let [r, g, b, a] = text.color.to_rgba8();
            painter.text(
                egui::pos2(pixel.x / ppp, pixel.y / ppp),
                egui::Align2::CENTER_CENTER,
                &text.text,
                egui::FontId::new(text.pixel_height / ppp, family),
                egui::Color32::from_rgba_unmultiplied(r, g, b, a),
            );
        }
    }
}

/// Register the toolbar font with egui under [`TOOLBAR_FAMILY`].
fn install_font(ctx: &EguiContext, font: &Font) {
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        font.name.clone(),
        Arc::new(egui::FontData::from_owned(font.data.as_ref().clone())),
    );
    fonts
        .families
        .insert(egui::FontFamily::Name(TOOLBAR_FAMILY.into()), vec![font.name.clone()]);
    ctx.set_fonts(fonts);
}

/// Window, GPU and egui handles, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, size: PhysicalSize<u32>) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Axis Viewer")
            .with_inner_size(size);
        let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("axisview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Draw the scene pass then the egui pass into the next surface texture.
    fn draw(&mut self, egui_ctx: &EguiContext, state: &mut AppState) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frame = state.frame();
        self.renderer.render(&self.device, &self.queue, &view, &frame);

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_overlay(ctx, &frame));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    window_size: PhysicalSize<u32>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
            window_size: PhysicalSize::new(config.window_width, config.window_height),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx, self.window_size) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.state.viewer.resize(size.width, size.height);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
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
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if gpu.egui_winit.on_window_event(&gpu.window, &event).consumed {
            return;
        }

        let state = &mut self.state;
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size.width, new_size.height);
                state.viewer.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                state.handle_key(key);
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Vec2::new(position.x as f32, position.y as f32);
                state.viewer.pointer_move(state.cursor);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: button_state,
                ..
            } => match button_state {
                ElementState::Pressed => {
                    state.viewer.pointer_down(state.cursor);
                }
                ElementState::Released => {
                    state.viewer.pointer_up(state.cursor);
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                // Scrolling up moves closer.
                state.viewer.wheel(-dy);
            }
            WindowEvent::RedrawRequested => {
                if let Some(font) = state.poll_font() {
                    install_font(&self.egui_ctx, &font);
                }
                gpu.draw(&self.egui_ctx, state);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.resolve_config()?;
    tracing::info!(?config, "axisview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
