//! Wayland layer-shell loading window
//!
//! Uses smithay-client-toolkit to create a layer-shell surface that:
//! - Renders on the overlay layer (always on top)
//! - Has no keyboard interactivity and no close/resize affordances
//! - Doesn't appear in taskbar
//! - Sits centered on the first output

use std::path::Path;
use std::time::Duration;

use smithay_client_toolkit::{
    compositor::{CompositorHandler, CompositorState},
    delegate_compositor, delegate_layer, delegate_output, delegate_registry, delegate_shm,
    output::{OutputHandler, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    shell::{
        wlr_layer::{
            Anchor, KeyboardInteractivity, Layer, LayerShell, LayerShellHandler, LayerSurface,
            LayerSurfaceConfigure,
        },
        WaylandSurface,
    },
    shm::{
        slot::{Buffer, SlotPool},
        Shm, ShmHandler,
    },
};
use wayland_client::{
    globals::registry_queue_init,
    protocol::{wl_output, wl_shm, wl_surface},
    Connection, EventQueue, QueueHandle,
};

use crate::application::ports::{LoadingSurface, SurfaceError};
use crate::domain::window::{IndeterminateBar, Rect, SplashContent, WindowGeometry};

use super::font::load_font;
use super::render::{self, render_frame, PanelShape};

const WIDTH: u32 = render::WIDTH;
const HEIGHT: u32 = render::HEIGHT;

/// Layer-shell namespace
const NAMESPACE: &str = "ready-splash";

/// Error type for the layer-shell window
#[derive(Debug, thiserror::Error)]
pub enum LayerShellError {
    #[error("Failed to connect to Wayland: {0}")]
    Connection(#[from] wayland_client::ConnectError),
    #[error("Failed to initialize registry: {0}")]
    Registry(#[from] wayland_client::globals::GlobalError),
    #[error("Layer shell not available (compositor doesn't support wlr-layer-shell)")]
    LayerShellNotAvailable,
    #[error("Wayland dispatch error: {0}")]
    Dispatch(#[from] wayland_client::DispatchError),
    #[error("Wayland error: {0}")]
    Wayland(#[from] wayland_client::backend::WaylandError),
    #[error("Failed to create buffer pool: {0}")]
    BufferPool(String),
    #[error("Failed to render frame")]
    Render,
}

impl From<LayerShellError> for SurfaceError {
    fn from(e: LayerShellError) -> Self {
        match e {
            LayerShellError::Connection(_)
            | LayerShellError::Registry(_)
            | LayerShellError::LayerShellNotAvailable => SurfaceError::Unavailable(e.to_string()),
            other => SurfaceError::Backend(other.to_string()),
        }
    }
}

/// Loading window on the Wayland overlay layer
pub struct LayerShellSurface {
    _conn: Connection,
    event_queue: EventQueue<SplashWindow>,
    qh: QueueHandle<SplashWindow>,
    window: SplashWindow,
}

impl LayerShellSurface {
    /// Connect to the compositor and bind the globals the window needs.
    ///
    /// Fails fast when there is no Wayland display or the compositor lacks
    /// wlr-layer-shell, so the caller can pick another surface.
    pub fn connect(font_path: Option<&Path>) -> Result<Self, LayerShellError> {
        let conn = Connection::connect_to_env()?;
        let (globals, mut event_queue) = registry_queue_init(&conn)?;
        let qh = event_queue.handle();

        let mut window = SplashWindow::new(&globals, &qh, font_path)?;

        // Initial roundtrip to learn about outputs
        event_queue.roundtrip(&mut window)?;

        Ok(Self {
            _conn: conn,
            event_queue,
            qh,
            window,
        })
    }

    /// Whether a caption font was found
    pub fn has_font(&self) -> bool {
        self.window.font.is_some()
    }

    fn dispatch(&mut self, timeout: Duration) -> Result<(), LayerShellError> {
        self.event_queue.flush()?;
        if let Some(guard) = self.event_queue.prepare_read() {
            let fd = guard.connection_fd();
            let mut poll_fds = [nix::poll::PollFd::new(fd, nix::poll::PollFlags::POLLIN)];
            let _ = nix::poll::poll(
                &mut poll_fds,
                nix::poll::PollTimeout::from(poll_timeout_millis(timeout)),
            );
            // Read events, ignoring WouldBlock errors
            if let Err(e) = guard.read() {
                match e {
                    wayland_client::backend::WaylandError::Io(ref io_err)
                        if io_err.kind() == std::io::ErrorKind::WouldBlock => {}
                    other => return Err(LayerShellError::Wayland(other)),
                }
            }
        }
        self.event_queue.dispatch_pending(&mut self.window)?;
        Ok(())
    }
}

impl LoadingSurface for LayerShellSurface {
    fn name(&self) -> &'static str {
        "layer-shell"
    }

    fn show(&mut self, content: &SplashContent) -> Result<(), SurfaceError> {
        self.window.content = content.clone();
        self.window.create_surface(&self.qh);
        self.event_queue
            .roundtrip(&mut self.window)
            .map_err(LayerShellError::from)?;
        self.window.redraw_if_needed()?;
        Ok(())
    }

    fn animate(&mut self, elapsed: Duration) -> Result<(), SurfaceError> {
        self.window.elapsed = elapsed;
        self.window.dirty = true;
        self.window.redraw_if_needed()?;
        Ok(())
    }

    fn pump(&mut self, timeout: Duration) -> Result<(), SurfaceError> {
        self.dispatch(timeout)?;
        if self.window.closed {
            return Err(SurfaceError::Closed);
        }
        self.window.redraw_if_needed()?;
        Ok(())
    }

    fn close(&mut self) {
        self.window.destroy_surface();
        let _ = self.event_queue.flush();
    }
}

/// SCTK state for the splash window
struct SplashWindow {
    registry_state: RegistryState,
    output_state: OutputState,
    compositor_state: CompositorState,
    shm: Shm,
    layer_shell: LayerShell,

    geometry: WindowGeometry,
    bar: IndeterminateBar,
    content: SplashContent,
    elapsed: Duration,

    // Surface state
    layer_surface: Option<LayerSurface>,
    configured: bool,
    closed: bool,
    dirty: bool,

    // Buffer management
    pool: SlotPool,
    buffer: Option<Buffer>,

    font: Option<fontdue::Font>,
}

impl SplashWindow {
    fn new(
        globals: &wayland_client::globals::GlobalList,
        qh: &QueueHandle<Self>,
        font_path: Option<&Path>,
    ) -> Result<Self, LayerShellError> {
        let registry_state = RegistryState::new(globals);
        let output_state = OutputState::new(globals, qh);
        let compositor_state =
            CompositorState::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;
        let shm = Shm::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;
        let layer_shell =
            LayerShell::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;

        let pool = SlotPool::new((WIDTH * HEIGHT * 4) as usize, &shm)
            .map_err(|e| LayerShellError::BufferPool(e.to_string()))?;

        Ok(Self {
            registry_state,
            output_state,
            compositor_state,
            shm,
            layer_shell,
            geometry: WindowGeometry::splash(),
            bar: IndeterminateBar::default(),
            content: SplashContent::default(),
            elapsed: Duration::ZERO,
            layer_surface: None,
            configured: false,
            closed: false,
            dirty: false,
            pool,
            buffer: None,
            font: load_font(font_path).map(|(_, font)| font),
        })
    }

    /// Frame of the window on the primary (first) output, relative to it
    fn placement(&self) -> Option<(wl_output::WlOutput, Option<Rect>)> {
        let output = self.output_state.outputs().next()?;
        let frame = self
            .output_state
            .info(&output)
            .and_then(|info| info.logical_size)
            .and_then(|(w, h)| Some((u32::try_from(w).ok()?, u32::try_from(h).ok()?)))
            .map(|(w, h)| self.geometry.centered_in(Rect::new(0, 0, w, h)));
        Some((output, frame))
    }

    fn create_surface(&mut self, qh: &QueueHandle<Self>) {
        if self.layer_surface.is_some() {
            return;
        }

        let surface = self.compositor_state.create_surface(qh);
        let placement = self.placement();
        let output = placement.as_ref().map(|(output, _)| output);

        let layer_surface = self.layer_shell.create_layer_surface(
            qh,
            surface,
            Layer::Overlay,
            Some(NAMESPACE),
            output,
        );

        // Without anchors the compositor centers the surface itself; with a
        // known output size we pin it explicitly.
        if let Some((_, Some(frame))) = placement {
            layer_surface.set_anchor(Anchor::TOP | Anchor::LEFT);
            layer_surface.set_margin(frame.y, 0, 0, frame.x);
        }

        let size = self.geometry.size();
        layer_surface.set_size(size.width, size.height);
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.commit();

        self.layer_surface = Some(layer_surface);
        self.dirty = true;
    }

    fn destroy_surface(&mut self) {
        self.layer_surface = None;
        self.configured = false;
        self.buffer = None;
    }

    fn redraw_if_needed(&mut self) -> Result<(), LayerShellError> {
        if self.configured && self.dirty {
            self.draw()?;
            self.dirty = false;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<(), LayerShellError> {
        let Some(layer_surface) = self.layer_surface.as_ref() else {
            return Ok(());
        };

        let pixmap = render_frame(
            &self.content,
            self.font.as_ref(),
            &self.bar,
            self.elapsed,
            PanelShape::Rounded,
        )
        .ok_or(LayerShellError::Render)?;

        let (buffer, canvas) = self
            .pool
            .create_buffer(
                WIDTH as i32,
                HEIGHT as i32,
                (WIDTH * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .map_err(|e| LayerShellError::BufferPool(e.to_string()))?;

        copy_rgba_to_argb(pixmap.data(), canvas);

        buffer.attach_to(layer_surface.wl_surface()).map_err(|e| {
            LayerShellError::BufferPool(format!("Failed to attach buffer: {}", e))
        })?;
        layer_surface
            .wl_surface()
            .damage_buffer(0, 0, WIDTH as i32, HEIGHT as i32);
        layer_surface.commit();

        // Keep the buffer alive until the next frame
        self.buffer = Some(buffer);
        Ok(())
    }
}

/// Whole milliseconds to block in `poll`, rounded up so a sub-millisecond
/// wait does not turn into a zero-timeout spin.
fn poll_timeout_millis(timeout: Duration) -> u16 {
    u16::try_from(timeout.as_nanos().div_ceil(1_000_000)).unwrap_or(u16::MAX)
}

/// tiny-skia produces RGBA; wl_shm Argb8888 is BGRA in memory on little-endian
fn copy_rgba_to_argb(src: &[u8], dst: &mut [u8]) {
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        out[0] = px[2];
        out[1] = px[1];
        out[2] = px[0];
        out[3] = px[3];
    }
}

// SCTK delegate implementations

impl CompositorHandler for SplashWindow {
    fn scale_factor_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_factor: i32,
    ) {
        self.dirty = true;
    }

    fn transform_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_transform: wl_output::Transform,
    ) {
        self.dirty = true;
    }

    fn frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _time: u32,
    ) {
    }

    fn surface_enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }

    fn surface_leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }
}

impl OutputHandler for SplashWindow {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }
}

impl LayerShellHandler for SplashWindow {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        self.destroy_surface();
        self.closed = true;
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        _configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        // Surface is now configured and can be drawn to
        self.configured = true;
        self.dirty = true;
    }
}

impl ShmHandler for SplashWindow {
    fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm
    }
}

impl ProvidesRegistryState for SplashWindow {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState];
}

delegate_compositor!(SplashWindow);
delegate_output!(SplashWindow);
delegate_shm!(SplashWindow);
delegate_layer!(SplashWindow);
delegate_registry!(SplashWindow);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_conversion_swaps_red_and_blue() {
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut dst = [0u8; 8];
        copy_rgba_to_argb(&src, &mut dst);
        assert_eq!(dst, [3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn poll_timeout_rounds_sub_millisecond_up() {
        assert_eq!(poll_timeout_millis(Duration::from_micros(300)), 1);
        assert_eq!(poll_timeout_millis(Duration::from_micros(1_001)), 2);
    }

    #[test]
    fn poll_timeout_keeps_whole_milliseconds() {
        assert_eq!(poll_timeout_millis(Duration::ZERO), 0);
        assert_eq!(poll_timeout_millis(Duration::from_millis(33)), 33);
    }

    #[test]
    fn poll_timeout_saturates() {
        assert_eq!(poll_timeout_millis(Duration::from_secs(3600)), u16::MAX);
    }
}
