use super::constants::{
    DENSITY_STEP, DENSITY_UI_MAX, DENSITY_UI_MIN, MAX_TOUCH_EVENT_PX, MAX_WHEEL_EVENT_PX,
    WHEEL_LINE_PX, WHEEL_PAGE_FALLBACK_PX,
};

// DOM WheelEvent.deltaMode values
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Convert a wheel event's `deltaY` to pixels, clamped per event.
#[inline]
pub fn normalize_wheel_delta(delta_y: f64, delta_mode: u32, viewport_h: f64) -> f32 {
    let dy = delta_y as f32;
    let px = match delta_mode {
        DOM_DELTA_LINE => dy * WHEEL_LINE_PX,
        DOM_DELTA_PAGE => {
            let page = if viewport_h > 0.0 {
                viewport_h as f32
            } else {
                WHEEL_PAGE_FALLBACK_PX
            };
            dy * page
        }
        _ => dy,
    };
    if px.is_finite() {
        px.clamp(-MAX_WHEEL_EVENT_PX, MAX_WHEEL_EVENT_PX)
    } else {
        0.0
    }
}

/// Single-finger vertical drag tracking. Dragging up scrolls forward.
#[derive(Default, Clone, Copy, Debug)]
pub struct TouchTracker {
    last_y: Option<f32>,
}

impl TouchTracker {
    pub fn start(&mut self, y: f32) {
        self.last_y = Some(y);
    }

    /// Scroll delta since the previous sample; 0 without an active touch.
    pub fn move_to(&mut self, y: f32) -> f32 {
        let Some(last) = self.last_y else {
            return 0.0;
        };
        self.last_y = Some(y);
        (last - y).clamp(-MAX_TOUCH_EVENT_PX, MAX_TOUCH_EVENT_PX)
    }

    pub fn end(&mut self) {
        self.last_y = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.last_y.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Next,
    Previous,
    First,
    Last,
    DenseUp,
    DenseDown,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowDown" | "PageDown" | " " => Some(KeyAction::Next),
        "ArrowUp" | "PageUp" => Some(KeyAction::Previous),
        "Home" => Some(KeyAction::First),
        "End" => Some(KeyAction::Last),
        "+" | "=" => Some(KeyAction::DenseUp),
        "-" | "_" => Some(KeyAction::DenseDown),
        _ => None,
    }
}

/// Next density ratio for a key press, clamped to the UI range.
#[inline]
pub fn step_density(current: f32, up: bool) -> f32 {
    let next = if up {
        current * DENSITY_STEP
    } else {
        current / DENSITY_STEP
    };
    next.clamp(DENSITY_UI_MIN, DENSITY_UI_MAX)
}

/// Section index a navigation key points at, with wraparound for
/// next/previous. `None` when the key does not navigate or the target is the
/// current section.
#[inline]
pub fn navigation_target(action: KeyAction, current: usize, count: usize) -> Option<(usize, bool)> {
    if count < 2 {
        return None;
    }
    let (index, forward) = match action {
        KeyAction::Next => ((current + 1) % count, true),
        KeyAction::Previous => ((current + count - 1) % count, false),
        KeyAction::First => (0, false),
        KeyAction::Last => (count - 1, true),
        KeyAction::DenseUp | KeyAction::DenseDown => return None,
    };
    (index != current).then_some((index, forward))
}
