use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use glasslab_assets::{DEFAULT_ENVIRONMENT_PATH, EnvironmentLoader};
use glasslab_input::{PointerButton, PointerTracker};
use glasslab_render::{FrameLoop, OrbitControls, PerspectiveCamera, Resize, Viewport};
use glasslab_render_wgpu::{SurfaceFrame, WgpuRenderer};
use glasslab_scene::DemoScene;
use glasslab_tools::{MaterialPanel, SceneInspector};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "glasslab-desktop", about = "Transmissive glass material demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Equirectangular Radiance HDR used as background and lighting
    #[arg(long, default_value = DEFAULT_ENVIRONMENT_PATH)]
    environment: PathBuf,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
}

/// Application state.
struct AppState {
    demo: DemoScene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    viewport: Viewport,
    frames: FrameLoop,
    loader: EnvironmentLoader,
    pointer: PointerTracker,
}

impl AppState {
    fn new(environment: PathBuf, width: u32, height: u32) -> Self {
        let mut demo = DemoScene::build();
        let viewport = Viewport::new(width as f64, height as f64, 1.0);
        let camera = PerspectiveCamera::demo(viewport.aspect());
        demo.scene.register_camera();
        let controls = OrbitControls::damped(&camera);

        Self {
            demo,
            camera,
            controls,
            viewport,
            frames: FrameLoop::new(),
            loader: EnvironmentLoader::spawn(environment),
            pointer: PointerTracker::new(),
        }
    }

    fn handle_pointer_move(&mut self, position: Vec2) {
        if let Some(action) = self.pointer.move_to(position) {
            let height = self.viewport.height() as f32;
            self.controls.handle(action, &self.camera, height);
        }
    }

    fn handle_scroll(&mut self, delta_y: f32) {
        if let Some(action) = self.pointer.scroll(delta_y) {
            let height = self.viewport.height() as f32;
            self.controls.handle(action, &self.camera, height);
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        let summary =
            SceneInspector::summary(&self.demo.scene, self.frames.elapsed(), self.camera.position);
        MaterialPanel::show(ctx, &mut self.demo.scene, self.demo.material, &summary);
    }
}

/// GPU and window resources, created once the event loop is running.
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
    fn apply_resize(&mut self, resize: Resize) {
        if !resize.changed {
            return;
        }
        self.config.width = resize.surface.width;
        self.config.height = resize.surface.height;
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("Glasslab")
            .with_inner_size(LogicalSize::new(
                self.state.viewport.width(),
                self.state.viewport.height(),
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("glasslab_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        // Sizing runs once at startup as well as on every resize.
        let logical: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
        self.state.viewport.resize(
            logical.width,
            logical.height,
            window.scale_factor(),
            &mut self.state.camera,
        );
        let size = self.state.viewport.surface_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            size.width,
            size.height,
            &self.state.demo.scene,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width = size.width,
            height = size.height,
            pixel_ratio = self.state.viewport.pixel_ratio(),
            "GPU initialized"
        );

        Ok(Gpu {
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

    /// Re-read the window size and feed it through the viewport.
    fn sync_window_size(&mut self, physical: PhysicalSize<u32>) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let scale = gpu.window.scale_factor();
        let logical: LogicalSize<f64> = physical.to_logical(scale);
        let resize =
            self.state
                .viewport
                .resize(logical.width, logical.height, scale, &mut self.state.camera);
        gpu.apply_resize(resize);
    }

    fn redraw(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let state = &mut self.state;

        state.loader.install_into(&mut state.demo.scene);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                gpu.window.request_redraw();
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

        let mut frame = SurfaceFrame {
            renderer: &mut gpu.renderer,
            device: &gpu.device,
            queue: &gpu.queue,
            view: &view,
        };
        state.frames.run_frame(
            Instant::now(),
            &mut state.demo.scene,
            &mut state.camera,
            &mut state.controls,
            &mut frame,
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        // The surface may be smaller than the window when the pixel ratio is
        // clamped, so egui's points are mapped with the clamped ratio.
        let surface_scale = state.viewport.pixel_ratio() / gpu.window.scale_factor();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point * surface_scale as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
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
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                gpu.window.request_redraw();
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
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let consumed = gpu.egui_winit.on_window_event(&gpu.window, &event).consumed;
        let scale = gpu.window.scale_factor();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.sync_window_size(new_size);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = gpu.window.inner_size();
                self.sync_window_size(size);
            }
            // Releases always reach the tracker so a drag never sticks.
            WindowEvent::MouseInput {
                button,
                state: ElementState::Released,
                ..
            } => {
                if let Some(button) = pointer_button(button) {
                    self.state.pointer.release(button);
                }
            }
            WindowEvent::MouseInput {
                button,
                state: ElementState::Pressed,
                ..
            } if !consumed => {
                if let Some(button) = pointer_button(button) {
                    self.state.pointer.press(button);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale);
                self.state
                    .handle_pointer_move(Vec2::new(logical.x, logical.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.pointer.reset();
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                // Wheel away from the user zooms in.
                self.state.handle_scroll(-dy);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(
        environment = %cli.environment.display(),
        "glasslab-desktop starting ({}, {}, {})",
        glasslab_assets::crate_info(),
        glasslab_render::crate_info(),
        glasslab_tools::crate_info(),
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(cli.environment, cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    Ok(())
}
