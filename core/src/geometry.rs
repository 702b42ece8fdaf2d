/// Window size and scroll offset, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            width,
            height,
            scroll_x,
            scroll_y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

/// Where the dimming layer sits: pinned to the scrolled viewport origin and
/// as tall as the window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayFrame {
    pub top: f64,
    pub left: f64,
    pub height: f64,
}

pub fn overlay_frame(viewport: &Viewport) -> OverlayFrame {
    OverlayFrame {
        top: viewport.scroll_y,
        left: viewport.scroll_x,
        height: viewport.height,
    }
}

pub fn overlay_origin(viewport: &Viewport) -> Point {
    Point {
        left: viewport.scroll_x,
        top: viewport.scroll_y,
    }
}

/// Top-left corner that centers a `card_width` x `card_height` box in the
/// visible part of the page.
pub fn viewer_position(viewport: &Viewport, card_width: f64, card_height: f64) -> Point {
    Point {
        left: viewport.scroll_x + (viewport.width / 2.0 - card_width / 2.0),
        top: viewport.scroll_y + (viewport.height / 2.0 - card_height / 2.0),
    }
}
