//! Window, context and the per-frame loop.

use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use glutin::dpi::LogicalSize;
use glutin::event::{ElementState, Event, KeyboardInput, StartCause, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};
use log::{error, info, warn};

use crate::config::DemoConfig;
use crate::demos::Scene;
use crate::graphics::debug;
use crate::graphics::opengl::*;

pub type Context = WindowedContext<PossiblyCurrent>;

/// Opens the window, makes its context current on this thread and loads the GL function
/// pointers. Nothing GL-related may be called before this.
pub fn open(config: &DemoConfig) -> Result<(EventLoop<()>, Context)> {
    let events = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.window.title.clone())
        .with_inner_size(LogicalSize::new(config.window.width as f64, config.window.height as f64));

    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, (config.gl.major, config.gl.minor)))
        .with_gl_profile(GlProfile::Core)
        .with_vsync(true)
        .build_windowed(window, &events)
        .map_err(|e| anyhow!("Could not create window: {}", e))?;

    let context = unsafe { context.make_current() }
        .map_err(|(_, e)| anyhow!("Could not make the GL context current: {}", e))?;

    gl::load_with(|s| context.get_proc_address(s) as *const _);

    Ok((events, context))
}

/// Checks what the demos rely on and sets up global GL state.
pub fn prepare_gl() -> Result<()> {
    info!("Using OpenGL {}", version_string());

    if !gl::DrawArraysInstanced::is_loaded() {
        bail!("Support for EXT_draw_instanced is required");
    }

    if !debug::install_message_callback() {
        warn!("glDebugMessageCallback is unavailable; driver messages won't be logged");
    }

    enable_alpha_blending();
    Ok(())
}

/// Polygon fill state. `P` flips it.
struct RenderState {
    wireframe: bool,
}

impl RenderState {
    fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
        set_wireframe(self.wireframe);
    }
}

/// Runs the demo until the window is closed or Escape is pressed, then exits the process.
pub fn run(config: DemoConfig, events: EventLoop<()>, context: Context, scene: Scene) -> ! {
    let start = Instant::now();
    let mut state = RenderState {
        wireframe: config.render.wireframe || scene.kind().starts_in_wireframe(),
    };
    set_wireframe(state.wireframe);

    let size = context.window().inner_size();
    set_viewport(size.width, size.height);

    // Taken out on shutdown so the GL objects are deleted while the context still exists
    let mut scene = Some(scene);

    events.run(move |event, _, control_flow| {
        match event {
            Event::NewEvents(StartCause::Init) => *control_flow = ControlFlow::Poll,

            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    context.resize(size);
                    set_viewport(size.width, size.height);
                },
                WindowEvent::KeyboardInput {
                    input: KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(key),
                        ..
                    },
                    ..
                } => match key {
                    VirtualKeyCode::Escape => *control_flow = ControlFlow::Exit,
                    VirtualKeyCode::P => state.toggle_wireframe(),
                    _ => {}
                },
                _ => {}
            },

            Event::MainEventsCleared => context.window().request_redraw(),

            Event::RedrawRequested(_) => {
                clear(config.render.clear_color);
                if let Some(scene) = &scene {
                    scene.draw(start.elapsed().as_secs_f32());
                }

                if let Err(e) = context.swap_buffers() {
                    error!("Could not swap buffers: {}", e);
                    *control_flow = ControlFlow::Exit;
                }
            },

            Event::LoopDestroyed => {
                scene.take();
            },

            _ => {}
        }
    })
}
