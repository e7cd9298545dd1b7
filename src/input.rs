use glam::Vec2;
use web_sys as web;

// Movement beyond this many CSS pixels between press and release is a drag
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Deselect,
    Next,
    Previous,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" | "Esc" => Some(KeyAction::Deselect),
        "ArrowRight" => Some(KeyAction::Next),
        "ArrowLeft" => Some(KeyAction::Previous),
        _ => None,
    }
}

/// What a pointer release turned out to be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    Click(Vec2),
    DragEnd,
    None,
}

/// Tells clicks from orbit drags. Positions are canvas pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    down_at: Option<Vec2>,
    last: Vec2,
    dragging: bool,
}

impl PointerTracker {
    pub fn press(&mut self, pos: Vec2) {
        self.down_at = Some(pos);
        self.last = pos;
        self.dragging = false;
    }

    /// Returns the movement since the last event once the press has become
    /// a drag.
    pub fn move_to(&mut self, pos: Vec2, threshold_px: f32) -> Option<Vec2> {
        let start = self.down_at?;
        if !self.dragging && start.distance(pos) > threshold_px {
            self.dragging = true;
        }
        let delta = pos - self.last;
        self.last = pos;
        self.dragging.then_some(delta)
    }

    pub fn release(&mut self, pos: Vec2) -> Release {
        let Some(_) = self.down_at.take() else {
            return Release::None;
        };
        if std::mem::take(&mut self.dragging) {
            Release::DragEnd
        } else {
            Release::Click(pos)
        }
    }

    #[inline]
    pub fn is_down(&self) -> bool {
        self.down_at.is_some()
    }
}

/// Canvas pixel to NDC, y up.
#[inline]
pub fn px_to_ndc(px: Vec2, size: [u32; 2]) -> Vec2 {
    let w = size[0].max(1) as f32;
    let h = size[1].max(1) as f32;
    Vec2::new(px.x / w * 2.0 - 1.0, 1.0 - px.y / h * 2.0)
}

/// Pointer position in canvas backing pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Pointer position in CSS pixels, used for drag distances.
#[inline]
pub fn pointer_css_px(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
