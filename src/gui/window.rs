//! Cross-platform loading window
//!
//! A borderless, non-resizable, always-on-top winit window centered on the
//! primary monitor. Frames come from the shared tiny-skia renderer and are
//! copied into a softbuffer surface. The event loop is pumped from the
//! launcher loop, so the window never owns the thread.

use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use softbuffer::{Context, SoftBufferError, Surface};
use tiny_skia::{Pixmap, PremultipliedColorU8};
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize};
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopBuilder};
use winit::monitor::MonitorHandle;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder, WindowButtons, WindowLevel};

use crate::application::ports::{LoadingSurface, SurfaceError};
use crate::domain::window::{IndeterminateBar, Rect, SplashContent, WindowGeometry};

use super::font::load_font;
use super::render::{render_frame, PanelShape};

/// Error type for the winit window
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to start the window event loop: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("Failed to create window: {0}")]
    Os(#[from] OsError),
    #[error("Failed to present frame: {0}")]
    Present(#[from] SoftBufferError),
    #[error("Failed to render frame")]
    Render,
}

impl From<WindowError> for SurfaceError {
    fn from(e: WindowError) -> Self {
        match e {
            WindowError::EventLoop(_) | WindowError::Os(_) => SurfaceError::Unavailable(e.to_string()),
            other => SurfaceError::Backend(other.to_string()),
        }
    }
}

type Canvas = Surface<Rc<Window>, Rc<Window>>;

/// Loading window driven by a pumped winit event loop
pub struct WindowSurface {
    event_loop: EventLoop<()>,
    window: Option<Rc<Window>>,
    canvas: Option<Canvas>,

    geometry: WindowGeometry,
    bar: IndeterminateBar,
    content: SplashContent,
    elapsed: Duration,
    font: Option<fontdue::Font>,
}

impl WindowSurface {
    /// Start the platform event loop.
    ///
    /// Fails when no display is reachable, so the caller can pick another
    /// surface. The window itself is only created by `show`.
    pub fn connect(font_path: Option<&Path>) -> Result<Self, WindowError> {
        Ok(Self {
            event_loop: new_event_loop()?,
            window: None,
            canvas: None,
            geometry: WindowGeometry::splash(),
            bar: IndeterminateBar::default(),
            content: SplashContent::default(),
            elapsed: Duration::ZERO,
            font: load_font(font_path).map(|(_, font)| font),
        })
    }

    /// Whether a caption font was found
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    fn open(&mut self) -> Result<(), WindowError> {
        let size = self.geometry.size();
        let mut builder = WindowBuilder::new()
            .with_title(self.content.title.as_str())
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_resizable(false)
            .with_decorations(false)
            .with_enabled_buttons(WindowButtons::empty())
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_active(false);

        // Wayland does not report a primary monitor; the compositor places
        // the window then.
        if let Some(monitor) = self.event_loop.primary_monitor() {
            let frame = self.geometry.centered_in(monitor_frame(&monitor));
            builder = builder.with_position(LogicalPosition::new(frame.x, frame.y));
        }

        let window = Rc::new(builder.build(&self.event_loop)?);
        let context = Context::new(Rc::clone(&window))?;
        let canvas = Surface::new(&context, Rc::clone(&window))?;

        self.window = Some(window);
        self.canvas = Some(canvas);
        Ok(())
    }

    fn draw(&mut self) -> Result<(), WindowError> {
        let (Some(window), Some(canvas)) = (self.window.as_ref(), self.canvas.as_mut()) else {
            return Ok(());
        };

        let PhysicalSize { width, height } = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };

        let pixmap = render_frame(
            &self.content,
            self.font.as_ref(),
            &self.bar,
            self.elapsed,
            PanelShape::Square,
        )
        .ok_or(WindowError::Render)?;

        canvas.resize(w, h)?;
        let mut buffer = canvas.buffer_mut()?;
        scale_into_xrgb(&pixmap, &mut buffer, width, height);
        buffer.present()?;
        Ok(())
    }
}

impl LoadingSurface for WindowSurface {
    fn name(&self) -> &'static str {
        "window"
    }

    fn show(&mut self, content: &SplashContent) -> Result<(), SurfaceError> {
        self.content = content.clone();
        if self.window.is_none() {
            self.open()?;
        }
        self.draw()?;
        Ok(())
    }

    fn animate(&mut self, elapsed: Duration) -> Result<(), SurfaceError> {
        self.elapsed = elapsed;
        self.draw()?;
        Ok(())
    }

    fn pump(&mut self, timeout: Duration) -> Result<(), SurfaceError> {
        let mut redraw = false;
        let mut destroyed = false;

        // Close requests are ignored: the window has no user-facing cancel.
        let status = self.event_loop.pump_events(Some(timeout), |event, _target| {
            if let Event::WindowEvent { event, .. } = event {
                match event {
                    WindowEvent::RedrawRequested
                    | WindowEvent::Resized(_)
                    | WindowEvent::ScaleFactorChanged { .. } => redraw = true,
                    WindowEvent::Destroyed => destroyed = true,
                    _ => {}
                }
            }
        });

        if destroyed || matches!(status, PumpStatus::Exit(_)) {
            self.canvas = None;
            self.window = None;
            return Err(SurfaceError::Closed);
        }
        if redraw {
            self.draw()?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.window.is_none() {
            return;
        }
        self.canvas = None;
        self.window = None;
        // Let the platform process the teardown
        let _ = self.event_loop.pump_events(Some(Duration::ZERO), |_, _| {});
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(target_os = "linux")]
fn new_event_loop() -> Result<EventLoop<()>, EventLoopError> {
    use winit::platform::x11::EventLoopBuilderExtX11;
    EventLoopBuilder::new().with_any_thread(true).build()
}

#[cfg(target_os = "windows")]
fn new_event_loop() -> Result<EventLoop<()>, EventLoopError> {
    use winit::platform::windows::EventLoopBuilderExtWindows;
    EventLoopBuilder::new().with_any_thread(true).build()
}

// AppKit only runs on the main thread; the launcher loop stays there.
#[cfg(target_os = "macos")]
fn new_event_loop() -> Result<EventLoop<()>, EventLoopError> {
    EventLoopBuilder::new().build()
}

/// Monitor bounds in logical units
fn monitor_frame(monitor: &MonitorHandle) -> Rect {
    logical_display(monitor.position(), monitor.size(), monitor.scale_factor())
}

fn logical_display(position: PhysicalPosition<i32>, size: PhysicalSize<u32>, scale: f64) -> Rect {
    let position = position.to_logical::<i32>(scale);
    let size = size.to_logical::<u32>(scale);
    Rect::new(position.x, position.y, size.width, size.height)
}

/// Nearest-neighbour scale of the frame into a 0RGB softbuffer
fn scale_into_xrgb(pixmap: &Pixmap, dst: &mut [u32], width: u32, height: u32) {
    let (src_w, src_h) = (pixmap.width(), pixmap.height());
    let pixels = pixmap.pixels();

    for (y, row) in dst
        .chunks_exact_mut(width as usize)
        .take(height as usize)
        .enumerate()
    {
        let sy = (y as u64 * src_h as u64 / height as u64) as u32;
        for (x, out) in row.iter_mut().enumerate() {
            let sx = (x as u64 * src_w as u64 / width as u64) as u32;
            *out = pack_xrgb(pixels[(sy * src_w + sx) as usize]);
        }
    }
}

/// The frame is opaque, so premultiplied channels are the final color.
fn pack_xrgb(px: PremultipliedColorU8) -> u32 {
    (px.red() as u32) << 16 | (px.green() as u32) << 8 | px.blue() as u32
}
