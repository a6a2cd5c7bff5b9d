use crate::Easing;

/// Configuration for [`crate::DragManager`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragOptions {
    /// Movement (on either axis) required before a press becomes a drag.
    pub drag_threshold: f64,
    /// Maximum distance from the pointer to a drop region's rectangle.
    pub drop_range: f64,
    /// Distance from a viewport edge that triggers auto-scroll.
    pub scroll_threshold: f64,
    /// Auto-scroll speed per tick, in the same units as geometry.
    pub scroll_speed: f64,
    /// Minimum press duration before a touch may promote to dragging;
    /// rejects incidental scroll gestures.
    pub touch_hold_ms: u64,
    /// Heartbeat interval for re-firing `Over` on the current target.
    pub over_interval_ms: u64,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            drop_range: 50.0,
            scroll_threshold: 12.0,
            scroll_speed: 7.0,
            touch_hold_ms: 50,
            over_interval_ms: 50,
        }
    }
}

impl DragOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag_threshold(mut self, drag_threshold: f64) -> Self {
        self.drag_threshold = drag_threshold;
        self
    }

    pub fn with_drop_range(mut self, drop_range: f64) -> Self {
        self.drop_range = drop_range;
        self
    }

    pub fn with_scroll_threshold(mut self, scroll_threshold: f64) -> Self {
        self.scroll_threshold = scroll_threshold;
        self
    }

    pub fn with_scroll_speed(mut self, scroll_speed: f64) -> Self {
        self.scroll_speed = scroll_speed;
        self
    }

    pub fn with_touch_hold_ms(mut self, touch_hold_ms: u64) -> Self {
        self.touch_hold_ms = touch_hold_ms;
        self
    }

    pub fn with_over_interval_ms(mut self, over_interval_ms: u64) -> Self {
        self.over_interval_ms = over_interval_ms;
        self
    }
}

/// Configuration for [`crate::FlipEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipOptions {
    /// Snapshots are ignored until this long after the first tick, so the
    /// initial render does not animate everything in. Zero enables
    /// animations immediately.
    pub initial_delay_ms: u64,
    /// How long removed nodes linger (fading out) before being freed.
    pub remove_timeout_ms: u64,
    /// Duration of the release transition back to the natural position.
    pub transition_ms: u64,
    pub easing: Easing,
}

impl Default for FlipOptions {
    fn default() -> Self {
        Self {
            initial_delay_ms: 100,
            remove_timeout_ms: 200,
            transition_ms: 200,
            easing: Easing::default(),
        }
    }
}

impl FlipOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_delay_ms(mut self, initial_delay_ms: u64) -> Self {
        self.initial_delay_ms = initial_delay_ms;
        self
    }

    pub fn with_remove_timeout_ms(mut self, remove_timeout_ms: u64) -> Self {
        self.remove_timeout_ms = remove_timeout_ms;
        self
    }

    pub fn with_transition_ms(mut self, transition_ms: u64) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
