use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use shipdemo_assets::{Model, ship_model};
use shipdemo_common::DemoConfig;
#[cfg(feature = "gamepad")]
use shipdemo_input::{AxisMap, GamepadSource};
use shipdemo_input::{InputSource, KeyboardStick, StickKey};
use shipdemo_kernel::Demo;
use shipdemo_render::FrameComposer;
use shipdemo_render_wgpu::WgpuRenderer;
use shipdemo_tools::DemoInspector;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "shipdemo-desktop", about = "Spaceship demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config overriding the built-in tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Application state.
struct AppState {
    config: DemoConfig,
    demo: Demo,
    stick: KeyboardStick,
    #[cfg(feature = "gamepad")]
    gamepad: Option<GamepadSource>,
    composer: FrameComposer,
    model: Model,
    start: Instant,
    show_hud: bool,
}

impl AppState {
    fn new(config: DemoConfig) -> Result<Self> {
        let model = ship_model().context("building ship model")?;
        Ok(Self {
            demo: Demo::new(&config),
            stick: KeyboardStick::default(),
            #[cfg(feature = "gamepad")]
            gamepad: GamepadSource::open(AxisMap::default()),
            composer: FrameComposer::new(&config),
            model,
            start: Instant::now(),
            show_hud: false,
            config,
        })
    }

    fn stick_key(key: KeyCode) -> Option<StickKey> {
        match key {
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(StickKey::TurnLeft),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(StickKey::TurnRight),
            KeyCode::KeyW | KeyCode::ArrowUp => Some(StickKey::Up),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(StickKey::Down),
            KeyCode::KeyQ | KeyCode::ShiftLeft => Some(StickKey::TriggerLeft),
            KeyCode::KeyE | KeyCode::Space => Some(StickKey::TriggerRight),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(stick) = Self::stick_key(key) {
            self.stick.set(stick, pressed);
            return;
        }
        if pressed && key == KeyCode::F1 {
            self.show_hud = !self.show_hud;
        }
    }

    /// Name of the device driving the ship: a connected gamepad wins over
    /// the keyboard.
    fn input_name(&self) -> &str {
        #[cfg(feature = "gamepad")]
        if let Some(pad) = self.gamepad.as_ref().filter(|p| p.is_connected()) {
            return pad.name();
        }
        self.stick.name()
    }

    fn update(&mut self) {
        let now_ms = self.start.elapsed().as_millis() as u64;
        #[cfg(feature = "gamepad")]
        if let Some(pad) = self.gamepad.as_mut().filter(|p| p.is_connected()) {
            self.demo.update_from(pad, now_ms);
            return;
        }
        self.demo.update_from(&mut self.stick, now_ms);
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let summary = DemoInspector::summary(&self.demo);
        let input = self.demo.input();

        egui::Window::new("Ship")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.label(format!("Frame: {}  FPS: {}", summary.frame, summary.fps));
                ui.label(format!("Time: {:.2}s", summary.elapsed));
                ui.separator();
                ui.label(format!(
                    "Position: ({:.1}, {:.1}, {:.1})",
                    summary.position[0], summary.position[1], summary.position[2]
                ));
                ui.label(format!(
                    "Camera: yaw {:.3}  pitch {:.3}  radius {:.1}",
                    summary.yaw, summary.pitch, summary.radius
                ));
                ui.separator();
                ui.label(format!("Input: {}", self.input_name()));
                ui.label(format!(
                    "Stick: ({:+.2}, {:+.2})  Triggers: L {:.2} R {:.2}",
                    input.left_stick.x,
                    input.left_stick.y,
                    input.left_trigger(),
                    input.right_trigger()
                ));
                ui.label(format!(
                    "Ground: {} tiles x {:.0}",
                    self.config.ground.num_tiles, self.config.ground.tile_size
                ));
                ui.separator();
                ui.small("A/D: Turn | Space/Shift: Climb/Descend | F1: HUD");
            });
    }
}

/// Window, device and renderers, created once the event loop resumes.
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

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let win_cfg = &self.state.config.window;
        let attrs = Window::default_attributes()
            .with_title(win_cfg.title.clone())
            .with_inner_size(PhysicalSize::new(win_cfg.width, win_cfg.height));
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
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("shipdemo_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
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

        let mut renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            self.state.composer.max_ground_vertices(),
        );
        renderer.upload_model(&device, &self.state.model);

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
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
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

    fn redraw(&mut self) {
        self.state.update();

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
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

        {
            let scene = self.state.composer.compose(&self.state.demo);
            gpu.window.set_title(&scene.title);
            gpu.renderer
                .render(&gpu.device, &gpu.queue, &view, &scene, &self.state.model);
        }

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
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

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
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
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                    self.state
                        .composer
                        .resize(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.stick.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
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

    tracing::info!("shipdemo-desktop starting");

    let config = DemoConfig::load_or_default(cli.config.as_deref())
        .with_context(|| format!("loading config {:?}", cli.config))?;
    let state = AppState::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_map_to_stick() {
        assert_eq!(AppState::stick_key(KeyCode::KeyA), Some(StickKey::TurnLeft));
        assert_eq!(
            AppState::stick_key(KeyCode::ArrowRight),
            Some(StickKey::TurnRight)
        );
        assert_eq!(
            AppState::stick_key(KeyCode::Space),
            Some(StickKey::TriggerRight)
        );
        assert_eq!(AppState::stick_key(KeyCode::F1), None);
    }

    #[test]
    fn keyboard_drives_without_a_pad() {
        let state = AppState::new(DemoConfig::default()).unwrap();
        #[cfg(feature = "gamepad")]
        if state.gamepad.as_ref().is_some_and(|p| p.is_connected()) {
            return;
        }
        assert_eq!(state.input_name(), "keyboard");
    }

    #[test]
    fn f1_toggles_hud() {
        let mut state = AppState::new(DemoConfig::default()).unwrap();
        assert!(!state.show_hud);
        state.handle_key(KeyCode::F1, true);
        state.handle_key(KeyCode::F1, false);
        assert!(state.show_hud);
    }

    #[test]
    fn held_turn_key_yaws_ship() {
        let mut state = AppState::new(DemoConfig::default()).unwrap();
        let yaw = state.demo.camera().rotation_y();
        state.handle_key(KeyCode::KeyD, true);
        state.demo.update_from(&mut state.stick, 16);
        assert!(state.demo.camera().rotation_y() > yaw);
    }
}
