// Browser-side tuning constants. Scroll thresholds and transition timing
// live in the show configuration; these cover DOM wiring and input only.

// Wheel deltaMode conversion (DOM_DELTA_LINE / DOM_DELTA_PAGE to pixels)
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_FALLBACK_PX: f32 = 800.0; // used when the viewport height is unknown

// Per-event clamp so a single flick cannot skip a whole phase
pub const MAX_WHEEL_EVENT_PX: f32 = 600.0;
pub const MAX_TOUCH_EVENT_PX: f32 = 200.0;

// Keyboard density control
pub const DENSITY_STEP: f32 = 1.25; // multiplicative per key press
pub const DENSITY_UI_MIN: f32 = 0.05;
pub const DENSITY_UI_MAX: f32 = 1.0;

// Frame clock
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // tab switches and stalls

// Document wiring
pub const SHOW_CONFIG_URL: &str = "sections.json";
pub const CANVAS_ID: &str = "app-canvas";
pub const BACKDROP_ID: &str = "backdrop";
pub const TEXT_ID: &str = "section-text";
pub const TITLE_ID: &str = "section-title";
pub const BODY_ID: &str = "section-body";
pub const PROGRESS_ID: &str = "section-progress";
pub const OVERLAY_ID: &str = "loading-overlay";
pub const OVERLAY_MESSAGE_ID: &str = "loading-message";
