//! Window size and placement

/// Splash window width in logical units
pub const SPLASH_WIDTH: u32 = 300;

/// Splash window height in logical units
pub const SPLASH_HEIGHT: u32 = 100;

/// A width/height pair in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A positioned rectangle in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Fixed-size window geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    size: Size,
}

impl WindowGeometry {
    pub const fn new(size: Size) -> Self {
        Self { size }
    }

    /// The 300x100 loading window
    pub const fn splash() -> Self {
        Self::new(Size::new(SPLASH_WIDTH, SPLASH_HEIGHT))
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    /// Frame of the window centered on `display`.
    ///
    /// On a display smaller than the window the frame is pinned to the
    /// display origin on that axis.
    pub fn centered_in(&self, display: Rect) -> Rect {
        let offset = |outer: u32, inner: u32| -> i32 {
            let slack = outer.saturating_sub(inner) / 2;
            i32::try_from(slack).unwrap_or(i32::MAX)
        };

        Rect::new(
            display.x.saturating_add(offset(display.width, self.size.width)),
            display.y.saturating_add(offset(display.height, self.size.height)),
            self.size.width,
            self.size.height,
        )
    }
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self::splash()
    }
}
