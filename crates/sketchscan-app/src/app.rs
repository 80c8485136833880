//! Core application state and lifecycle.

use kurbo::{Point, Size};
use peniko::Color;
use sketchscan_core::{GestureController, PointerEvent, Scene, Tool, TouchEvent};
use sketchscan_recognize::{Recognition, RecognizeClient, RecognizeError};
use sketchscan_render::{PngRenderResult, RenderLoop, VelloSurface};
use std::sync::{mpsc, Arc};
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::shortcuts::ShortcutRegistry;

/// Application configuration.
///
/// The viewport size and the gesture y-offset are host inputs; the core
/// never asks the environment for them itself.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Height of a host toolbar strip subtracted from raw pointer y.
    /// Zero for the native window, which draws no toolbar.
    pub gesture_y_offset: f64,
    /// Base URL of the recognition service.
    pub recognize_url: String,
    pub background_color: Color,
    pub ink_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "SketchScan".to_string(),
            width: 1280,
            height: 800,
            gesture_y_offset: 0.0,
            recognize_url: "https://sketch-scan.vercel.app".to_string(),
            background_color: Color::from_rgba8(236, 236, 244, 255),
            ink_color: Color::from_rgba8(24, 24, 27, 255),
        }
    }
}

/// Per-window state, created once the surface exists.
struct AppState {
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    draw_surface: VelloSurface,
    render_loop: RenderLoop,
    /// Texture blitter for RGBA -> surface format conversion.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    scene: Scene,
    gestures: GestureController,
    config: AppConfig,
    /// Last observed cursor position (button events carry no position).
    cursor: Point,

    // Recognition
    recognized: Option<Recognition>,
    recognition_rx: Option<mpsc::Receiver<Result<Recognition, RecognizeError>>>,
}

impl AppState {
    /// Show the current tool and latest recognition in the title bar.
    fn update_title(&self) {
        let mut title = format!("{} - {}", self.config.title, self.gestures.tool().name());
        if let Some(recognition) = &self.recognized {
            title.push_str(&format!(" - {} = {}", recognition.expr, recognition.result));
        }
        self.window.set_title(&title);
    }
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

    /// Run the application.
    pub async fn run() {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        let mut app = App::new();
        event_loop.run_app(&mut app).expect("Event loop error");
    }

    /// Finish initialization after the surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let render_cx = self.render_cx.as_ref().expect("RenderContext not initialized");
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .expect("Failed to create Vello renderer");

        // Vello renders into Rgba8Unorm; the window surface format may be
        // Bgra8Unorm, so frames go through a blit.
        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let viewport = Size::new(surface.config.width as f64, surface.config.height as f64);
        let draw_surface = VelloSurface::new(viewport)
            .with_colors(self.config.background_color, self.config.ink_color);

        let gestures = GestureController::new(Tool::Pencil)
            .with_y_offset(self.config.gesture_y_offset);

        log::info!(
            "SketchScan initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );
        ShortcutRegistry::print_all();

        let state = AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            draw_surface,
            render_loop: RenderLoop::new(),
            texture_blitter,
            scene: Scene::new(),
            gestures,
            config: self.config.clone(),
            cursor: Point::ZERO,
            recognized: None,
            recognition_rx: None,
        };
        state.update_title();
        self.state = Some(state);

        window.request_redraw();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
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

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .expect("Failed to create surface");
        let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };

        self.finish_init(window, surface);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                state
                    .draw_surface
                    .set_viewport(Size::new(size.width as f64, size.height as f64));

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                // Deliver any finished recognition. Failures keep the last
                // displayed result untouched.
                if let Some(rx) = &state.recognition_rx {
                    match rx.try_recv() {
                        Ok(Ok(recognition)) => {
                            log::info!(
                                "recognized: {} = {}",
                                recognition.expr,
                                recognition.result
                            );
                            state.recognized = Some(recognition);
                            state.recognition_rx = None;
                            state.update_title();
                        }
                        Ok(Err(err)) => {
                            log::error!("recognition failed: {err}");
                            state.recognition_rx = None;
                        }
                        Err(mpsc::TryRecvError::Empty) => {}
                        Err(mpsc::TryRecvError::Disconnected) => {
                            state.recognition_rx = None;
                        }
                    }
                }

                // Rebuild the drawn scene only when the model moved.
                state
                    .render_loop
                    .render_if_changed(&state.scene, &mut state.draw_surface);

                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                let device_handle = &render_cx.devices[state.surface.dev_id];
                let device = &device_handle.device;
                let queue = &device_handle.queue;

                let surface_texture = match state.surface.surface.get_current_texture() {
                    Ok(t) => t,
                    Err(e) => {
                        log::warn!("Failed to get surface texture: {:?}", e);
                        return;
                    }
                };

                let width = state.surface.config.width;
                let height = state.surface.config.height;

                let params = RenderParams {
                    base_color: state.config.background_color,
                    width,
                    height,
                    antialiasing_method: AaConfig::Area,
                };

                let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
                    label: Some("sketchscan render texture"),
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

                if let Err(e) = state.vello_renderer.render_to_texture(
                    device,
                    queue,
                    state.draw_surface.scene(),
                    &render_texture_view,
                    &params,
                ) {
                    log::error!("Failed to render: {:?}", e);
                    return;
                }

                let surface_view = surface_texture
                    .texture
                    .create_view(&vello::wgpu::TextureViewDescriptor::default());

                let mut blit_encoder =
                    device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                        label: Some("blit encoder"),
                    });
                state.texture_blitter.copy(
                    device,
                    &mut blit_encoder,
                    &render_texture_view,
                    &surface_view,
                );
                queue.submit(std::iter::once(blit_encoder.finish()));

                surface_texture.present();
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Point::new(position.x, position.y);
                state.gestures.handle_pointer_event(
                    PointerEvent::Move {
                        position: state.cursor,
                    },
                    &mut state.scene,
                );
                if state.gestures.is_drawing() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let event = match button_state {
                    ElementState::Pressed => PointerEvent::Down {
                        position: state.cursor,
                    },
                    ElementState::Released => PointerEvent::Up,
                };
                state.gestures.handle_pointer_event(event, &mut state.scene);
                state.window.request_redraw();
            }

            WindowEvent::Touch(touch) => {
                let position = Point::new(touch.location.x, touch.location.y);
                let event = match touch.phase {
                    TouchPhase::Started => TouchEvent::Start {
                        id: touch.id,
                        position,
                    },
                    TouchPhase::Moved => TouchEvent::Move {
                        id: touch.id,
                        position,
                    },
                    TouchPhase::Ended => TouchEvent::End { id: touch.id },
                    TouchPhase::Cancelled => TouchEvent::Cancel { id: touch.id },
                };
                state.gestures.handle_touch_event(event, &mut state.scene);
                state.window.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }

                let tool = match &event.logical_key {
                    Key::Character(c) => match c.as_str() {
                        "p" | "P" | "1" => Some(Tool::Pencil),
                        "r" | "R" | "2" => Some(Tool::Rectangle),
                        "l" | "L" | "3" => Some(Tool::Line),
                        "c" | "C" | "4" => Some(Tool::Circle),
                        _ => None,
                    },
                    _ => None,
                };

                if let Some(tool) = tool {
                    log::info!("tool: {}", tool.name());
                    state.gestures.set_tool(tool);
                    state.update_title();
                    return;
                }

                match &event.logical_key {
                    Key::Named(NamedKey::Enter) => {
                        let render_cx = self.render_cx.as_ref();
                        if let Some(render_cx) = render_cx {
                            trigger_recognition(state, render_cx);
                        }
                    }
                    Key::Named(NamedKey::Escape) => {
                        state.gestures.end();
                    }
                    _ => {}
                }
            }

            _ => {}
        }
    }
}

/// Snapshot the canvas and submit it to the recognition service on a worker
/// thread. The result arrives over a channel polled during redraw.
fn trigger_recognition(state: &mut AppState, render_cx: &vello::util::RenderContext) {
    if state.recognition_rx.is_some() {
        log::warn!("recognition already in flight, ignoring");
        return;
    }

    let device_handle = &render_cx.devices[state.surface.dev_id];
    let width = state.surface.config.width;
    let height = state.surface.config.height;

    // Make sure the built scene matches the model before exporting.
    state
        .render_loop
        .render(&state.scene, &mut state.draw_surface);

    let Some(raster) = render_scene_to_png(
        &device_handle.device,
        &device_handle.queue,
        &mut state.vello_renderer,
        state.draw_surface.scene(),
        width,
        height,
    ) else {
        log::error!("canvas snapshot failed");
        return;
    };

    let Some(png_data) = encode_png(&raster.rgba_data, raster.width, raster.height) else {
        return;
    };
    log::info!("snapshot ready: {} bytes", png_data.len());

    let client = RecognizeClient::new(&state.config.recognize_url);
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(client.recognize_png(&png_data));
    });
    state.recognition_rx = Some(rx);
    state.window.request_redraw();
}

/// Render a Vello scene to raw RGBA pixels (blocking readback).
fn render_scene_to_png(
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
    vello_renderer: &mut vello::Renderer,
    scene: &vello::Scene,
    width: u32,
    height: u32,
) -> Option<PngRenderResult> {
    if width == 0 || height == 0 {
        return None;
    }

    let texture = device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some("png export texture"),
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
    let texture_view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color: Color::WHITE,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };

    if let Err(e) = vello_renderer.render_to_texture(device, queue, scene, &texture_view, &params) {
        log::error!("Failed to render scene for PNG export: {:?}", e);
        return None;
    }

    // wgpu requires 256-byte row alignment for buffer copies.
    let bytes_per_row = (width * 4).next_multiple_of(256);
    let buffer_size = (bytes_per_row * height) as u64;

    let readback_buffer = device.create_buffer(&vello::wgpu::BufferDescriptor {
        label: Some("png readback buffer"),
        size: buffer_size,
        usage: vello::wgpu::BufferUsages::COPY_DST | vello::wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
        label: Some("png copy encoder"),
    });
    encoder.copy_texture_to_buffer(
        vello::wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: vello::wgpu::Origin3d::ZERO,
            aspect: vello::wgpu::TextureAspect::All,
        },
        vello::wgpu::TexelCopyBufferInfo {
            buffer: &readback_buffer,
            layout: vello::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = readback_buffer.slice(..);
    let (tx, rx) = mpsc::channel();
    buffer_slice.map_async(vello::wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });

    let _ = device.poll(vello::wgpu::PollType::wait());

    if rx.recv().ok()?.is_err() {
        log::error!("Failed to map buffer for PNG readback");
        return None;
    }

    let data = buffer_slice.get_mapped_range();

    // Strip row padding.
    let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        let row_start = (row * bytes_per_row) as usize;
        let row_end = row_start + (width * 4) as usize;
        rgba_data.extend_from_slice(&data[row_start..row_end]);
    }

    drop(data);
    readback_buffer.unmap();

    Some(PngRenderResult {
        rgba_data,
        width,
        height,
    })
}

/// Encode RGBA pixel data to PNG bytes.
fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = match encoder.write_header() {
            Ok(w) => w,
            Err(e) => {
                log::error!("Failed to write PNG header: {:?}", e);
                return None;
            }
        };

        if let Err(e) = writer.write_image_data(rgba_data) {
            log::error!("Failed to write PNG data: {:?}", e);
            return None;
        }
    }

    Some(png_data)
}
