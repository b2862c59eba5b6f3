//! Window, event loop and frame submission.
//!
//! [`run`] opens a window, builds the [`Scene`] and its GPU resources and drives the
//! [`AnimationLoop`] from `WindowEvent::RedrawRequested`:
//! 1. Tick the loop (animate, update uniforms, submit through [`Renderer`])
//! 2. Request the next redraw while the loop reports [`LoopState::Running`]
//! 3. Reconfigure on lost/outdated surfaces, skip timed-out frames, exit on anything else

use std::{fmt::Debug, iter, sync::Arc};

use anyhow::anyhow;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    animation::{AnimationLoop, FrameSink, LoopState, StopSignal},
    clock::{Clock, SystemClock},
    config::SceneConfig,
    context::Context,
    render::{Batches, SceneGpu},
    scene::Scene,
};

/// Draws a [`Scene`] into the window surface.
#[derive(Debug)]
pub struct Renderer {
    pub(crate) ctx: Context,
    gpu: SceneGpu,
    is_surface_configured: bool,
}

impl Renderer {
    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }
}

impl FrameSink for Renderer {
    fn submit(&mut self, scene: &mut Scene) -> Result<(), wgpu::SurfaceError> {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let ctx = &mut self.ctx;
        ctx.camera.update(&ctx.queue, scene.camera_uniform());
        ctx.light.update(&ctx.queue, scene.light.to_uniform());
        self.gpu.write_to_buffers(&ctx.queue, scene);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            let mut batches = Batches::default();
            self.gpu.get_render().set_pipelines(&mut batches);
            batches.draw(ctx, &mut render_pass);
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Everything that exists once the window and GPU are up.
pub struct AppState {
    renderer: Renderer,
    scene: Scene,
    animation: AnimationLoop<SystemClock>,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let clock = SystemClock;
        let now = clock.now_millis();
        let seed = config.seed.unwrap_or(now as u64);
        log::info!("Point clouds seeded with {}", seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let size = window.inner_size();
        let scene = Scene::new(config, &mut rng, now, size.width, size.height);
        let ctx = Context::new(
            window,
            scene.camera_uniform(),
            scene.light.to_uniform(),
            scene.clear_colour,
        )
        .await?;
        let gpu = SceneGpu::new(&ctx, &scene);

        let mut animation = AnimationLoop::new(clock, config.animation);
        animation.start();

        Ok(Self {
            renderer: Renderer {
                ctx,
                gpu,
                is_surface_configured: false,
            },
            scene,
            animation,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.scene.resize(width, height);
    }

    fn render(&mut self) -> Result<LoopState, wgpu::SurfaceError> {
        self.animation.tick(&mut self.scene, &mut self.renderer)
    }

    fn window(&self) -> &Window {
        self.renderer.ctx.window()
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.animation.stop_signal()
    }
}

pub(crate) enum AppEvent {
    #[allow(dead_code)]
    Initialized(Box<AppState>),
}

impl Debug for AppEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<AppEvent>,
    config: SceneConfig,
    state: Option<AppState>,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Builder::new_current_thread().build()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            state: None,
        })
    }

    fn adopt(&mut self, mut state: AppState) {
        let size = state.window().inner_size();
        state.resize(size.width, size.height);
        state.window().request_redraw();
        self.state = Some(state);
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(&self.config.title);

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID));
            match canvas {
                Some(canvas) => {
                    window_attributes = window_attributes.with_canvas(Some(canvas.unchecked_into()))
                }
                None => log::warn!("No #{} element, letting winit create a canvas", CANVAS_ID),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create the window: {}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self
                .async_runtime
                .block_on(AppState::new(window, &self.config))
            {
                Ok(state) => self.adopt(state),
                Err(e) => {
                    log::error!("App initialization failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            let config = self.config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match AppState::new(window, &config).await {
                    Ok(state) => {
                        if proxy
                            .send_event(AppEvent::Initialized(Box::new(state)))
                            .is_err()
                        {
                            log::error!("The event loop closed before the app was initialized");
                        }
                    }
                    Err(e) => log::error!("App initialization failed: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            AppEvent::Initialized(state) => self.adopt(*state),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.stop_signal().request_stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(LoopState::Running) => state.window().request_redraw(),
                Ok(LoopState::Stopped) => log::info!("Animation stopped, no more redraws"),
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost or outdated, reconfiguring");
                    let size = state.window().inner_size();
                    state.resize(size.width, size.height);
                    state.window().request_redraw();
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    log::warn!("Surface timed out, skipping frame");
                    state.window().request_redraw();
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                    event_loop.exit();
                }
            },
            _ => {}
        }
    }
}

/// Runs the default scene until the window is closed.
pub fn run() -> anyhow::Result<()> {
    run_with(SceneConfig::default())
}

pub fn run_with(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| anyhow!("Could not initialize logger: {}", e))?;
    }

    let event_loop: EventLoop<AppEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;

    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop terminated abnormally: {}", e))?;

    Ok(())
}
