//! Core application state and lifecycle.

use kurbo::{Point, Size};
use medsketch_core::{SketchSurface, StrokeStore, WidthPreset};
use medsketch_render::{RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use peniko::Color;
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::error::EventLoopError;
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowId};

use crate::event_handler::EventHandler;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{render_ui, UiAction, UiState};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub stroke_color: Color,
    /// Canvas frame color, `None` to hide the frame.
    pub border_color: Option<Color>,
    /// Pen width selected at startup.
    pub initial_width: WidthPreset,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "MedSketch".to_string(),
            width: 1024,
            height: 768,
            background_color: Color::WHITE,
            stroke_color: Color::from_rgba8(255, 0, 0, 255),
            border_color: Some(Color::BLACK),
            initial_width: WidthPreset::Small,
        }
    }
}

/// egui output that has to reach the GPU after the canvas is drawn.
struct EguiFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    stroke_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    sketch: SketchSurface,
    events: EventHandler,
    modifiers: ModifiersState,
    config: AppConfig,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(mut self) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)
    }

    /// Create the GPU surface and all per-window state.
    fn init_window(&mut self, window: Arc<Window>) -> RenderResult<()> {
        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut store = StrokeStore::with_width(self.config.initial_width.width());
        let redraw_window = window.clone();
        store.set_change_hook(move |_| redraw_window.request_redraw());
        let sketch = SketchSurface::with_store(store);

        let mut ui_state = UiState::default();
        ui_state.sync(&sketch);

        log::info!("MedSketch initialized - {}x{}", width, height);
        ShortcutRegistry::log_all();

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            stroke_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state,
            sketch,
            events: EventHandler::new(),
            modifiers: ModifiersState::empty(),
            config: self.config.clone(),
        });

        window.request_redraw();
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Convert a physical window position to canvas coordinates.
    fn to_canvas(&self, x: f64, y: f64) -> Point {
        let scale = self.window.scale_factor();
        Point::new(x / scale, y / scale)
    }

    fn apply(&mut self, action: UiAction) {
        action.apply(&mut self.sketch);
        self.ui_state.sync(&self.sketch);
    }

    /// Run the toolbar pass and build the canvas scene.
    fn prepare_frame(&mut self) -> (Scene, Color, EguiFrame) {
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut pending = None;
        let ui_state = &self.ui_state;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            pending = render_ui(ctx, ui_state);
        });
        if let Some(action) = pending {
            self.apply(action);
        }

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let viewport = Size::new(
            self.surface.config.width as f64,
            self.surface.config.height as f64,
        );
        let ctx = RenderContext::new(&self.sketch, viewport)
            .with_scale_factor(self.window.scale_factor())
            .with_background(self.config.background_color)
            .with_stroke_color(self.config.stroke_color)
            .with_border(self.config.border_color);
        self.stroke_renderer.build_scene(&ctx);
        let base_color = self.stroke_renderer.background_color(&ctx);

        let frame = EguiFrame {
            primitives,
            textures_delta: egui_output.textures_delta,
            pixels_per_point: egui_output.pixels_per_point,
        };
        (self.stroke_renderer.take_scene(), base_color, frame)
    }

    /// Render the scene, overlay egui and present.
    fn present(
        &mut self,
        render_cx: &vello::util::RenderContext,
        scene: &Scene,
        base_color: Color,
        egui_frame: &EguiFrame,
    ) -> RenderResult<()> {
        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(format!("{:?}", e)))?;

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need StorageBinding, which WebGPU only
        // allows on Rgba8Unorm, so render to an intermediate texture.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_frame.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_frame.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });

            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_frame.primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load, // Keep Vello content
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_frame.primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        surface_texture.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.init_window(window) {
            log::error!("Failed to initialize renderer: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        let egui_wants_pointer = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                state.window.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = state.to_canvas(position.x, position.y);
                if let Some(sample) = state.events.cursor_moved(point) {
                    state.sketch.handle_pointer(sample);
                }
            }

            WindowEvent::MouseInput { state: button_state, button, .. } => {
                if let Some(sample) = state.events.mouse_input(button_state, button, egui_wants_pointer) {
                    state.sketch.handle_pointer(sample);
                    state.ui_state.sync(&state.sketch);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed
                    || event.repeat
                    || state.egui_ctx.wants_keyboard_input()
                {
                    return;
                }

                let key = match &event.logical_key {
                    Key::Character(c) => c.as_str(),
                    Key::Named(NamedKey::Escape) => "Escape",
                    _ => return,
                };

                if let Some(action) = ShortcutRegistry::action_for(key, state.modifiers.shift_key()) {
                    state.apply(action);
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let (scene, base_color, egui_frame) = state.prepare_frame();

                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };

                if let Err(e) = state.present(render_cx, &scene, base_color, &egui_frame) {
                    log::warn!("Skipping frame: {}", e);
                }

                if state.egui_ctx.has_requested_repaint() {
                    state.window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
