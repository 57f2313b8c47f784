//! Visibility and height of the presenter sheet.
//!
//! Heights are percentages of the viewport height (`vh`). The sheet is
//! anchored to the bottom of the viewport with its resize handle on the top
//! edge, so dragging the handle upward grows the sheet.

pub const MIN_HEIGHT_VH: f64 = 24.0;
pub const MAX_HEIGHT_VH: f64 = 85.0;
pub const DEFAULT_HEIGHT_VH: f64 = 42.0;

/// Presets visited by double-clicking the handle, in order.
pub const SIZE_CYCLE: [f64; 3] = [28.0, 42.0, 65.0];

const CYCLE_TOLERANCE_VH: f64 = 1.0;

/// Clamp a height into `[MIN_HEIGHT_VH, MAX_HEIGHT_VH]`.
///
/// Non-finite input yields the default height.
pub fn clamp_height(vh: f64) -> f64 {
    if !vh.is_finite() {
        return DEFAULT_HEIGHT_VH;
    }
    vh.clamp(MIN_HEIGHT_VH, MAX_HEIGHT_VH)
}

/// Preset that follows `current` in [`SIZE_CYCLE`].
///
/// A height within one unit of a preset counts as sitting on it and moves to
/// the next preset. Any other height moves to the first preset above it,
/// wrapping to the smallest.
pub fn next_cycle_size(current: f64) -> f64 {
    if let Some(idx) = SIZE_CYCLE
        .iter()
        .position(|v| (v - current).abs() < CYCLE_TOLERANCE_VH)
    {
        return SIZE_CYCLE[(idx + 1) % SIZE_CYCLE.len()];
    }
    SIZE_CYCLE
        .iter()
        .copied()
        .find(|v| *v > current)
        .unwrap_or(SIZE_CYCLE[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn flipped(self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }
}

/// Pointer capture held while the handle is pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_pointer_y: f64,
    pub start_height_px: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    visibility: Visibility,
    height_vh: f64,
    drag: Option<DragSession>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_VH)
    }
}

impl PanelState {
    pub fn new(height_vh: f64) -> Self {
        Self {
            visibility: Visibility::Visible,
            height_vh: clamp_height(height_vh),
            drag: None,
        }
    }

    /// Mount-time state from a persisted height, if one was readable.
    pub fn restore(saved_vh: Option<f64>) -> Self {
        match saved_vh {
            Some(vh) if vh.is_finite() => Self::new(vh),
            _ => Self::default(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn height_vh(&self) -> f64 {
        self.height_vh
    }

    pub fn is_resizing(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    pub fn toggle(&mut self) -> Visibility {
        self.visibility = self.visibility.flipped();
        self.visibility
    }

    /// Start a resize. Returns `false` when hidden or already resizing.
    pub fn begin_drag(&mut self, pointer_y: f64, rendered_height_px: f64) -> bool {
        if !self.is_visible() || self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragSession {
            start_pointer_y: pointer_y,
            start_height_px: rendered_height_px,
        });
        true
    }

    /// Apply a pointer move and return the new height, if a drag is active.
    pub fn drag_to(&mut self, pointer_y: f64, viewport_height_px: f64) -> Option<f64> {
        let session = self.drag?;
        if !(viewport_height_px > 0.0) || !pointer_y.is_finite() {
            return None;
        }
        let delta_y = pointer_y - session.start_pointer_y;
        let new_px = session.start_height_px - delta_y;
        self.height_vh = clamp_height(new_px / viewport_height_px * 100.0);
        Some(self.height_vh)
    }

    /// Finish a resize and return the height to persist.
    pub fn end_drag(&mut self) -> Option<f64> {
        self.drag.take().map(|_| self.height_vh)
    }

    /// Jump to the next preset and return it.
    pub fn cycle_size(&mut self) -> f64 {
        self.height_vh = next_cycle_size(self.height_vh);
        self.height_vh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_falls_back_to_default() {
        assert_eq!(PanelState::restore(None).height_vh(), 42.0);
        assert_eq!(PanelState::restore(Some(f64::NAN)).height_vh(), 42.0);
        assert_eq!(PanelState::restore(Some(55.5)).height_vh(), 55.5);
        // Out-of-range values are pulled back into range.
        assert_eq!(PanelState::restore(Some(120.0)).height_vh(), MAX_HEIGHT_VH);
        assert_eq!(PanelState::restore(Some(3.0)).height_vh(), MIN_HEIGHT_VH);
    }

    #[test]
    fn mounts_visible() {
        let state = PanelState::default();
        assert!(state.is_visible());
        assert!(!state.is_resizing());
    }

    #[test]
    fn double_toggle_restores_visibility() {
        let mut state = PanelState::default();
        assert_eq!(state.toggle(), Visibility::Hidden);
        assert_eq!(state.toggle(), Visibility::Visible);

        let mut hidden = PanelState::default();
        hidden.toggle();
        let before = hidden.visibility();
        hidden.toggle();
        hidden.toggle();
        assert_eq!(hidden.visibility(), before);
    }

    #[test]
    fn dragging_up_grows_sheet() {
        let mut state = PanelState::new(40.0);
        // 1000px viewport, 400px sheet.
        assert!(state.begin_drag(600.0, 400.0));
        assert!(state.is_resizing());
        let h = state.drag_to(500.0, 1000.0).unwrap();
        assert!((h - 50.0).abs() < 1e-9);
        let h = state.drag_to(700.0, 1000.0).unwrap();
        assert!((h - 30.0).abs() < 1e-9);
        let saved = state.end_drag().unwrap();
        assert!((saved - 30.0).abs() < 1e-9);
        assert!(!state.is_resizing());
    }

    #[test]
    fn drag_is_always_clamped() {
        let deltas = [-1.0e9, -5_000.0, -900.0, -1.0, 0.0, 1.0, 900.0, 5_000.0, 1.0e9];
        for delta in deltas {
            let mut state = PanelState::new(42.0);
            state.begin_drag(500.0, 420.0);
            let h = state.drag_to(500.0 + delta, 1000.0).unwrap();
            assert!(
                (MIN_HEIGHT_VH..=MAX_HEIGHT_VH).contains(&h),
                "delta {delta} produced {h}"
            );
        }
    }

    #[test]
    fn drag_requires_session_and_viewport() {
        let mut state = PanelState::new(42.0);
        assert_eq!(state.drag_to(10.0, 1000.0), None);
        assert_eq!(state.end_drag(), None);

        state.begin_drag(100.0, 420.0);
        assert_eq!(state.drag_to(50.0, 0.0), None);
        assert_eq!(state.height_vh(), 42.0);
    }

    #[test]
    fn drag_sessions_are_exclusive() {
        let mut state = PanelState::new(42.0);
        assert!(state.begin_drag(100.0, 420.0));
        assert!(!state.begin_drag(300.0, 999.0));
        assert_eq!(state.drag_session().unwrap().start_pointer_y, 100.0);
    }

    #[test]
    fn hidden_sheet_ignores_drag() {
        let mut state = PanelState::new(42.0);
        state.toggle();
        assert!(!state.begin_drag(100.0, 420.0));
    }

    #[test]
    fn cycle_walks_presets() {
        let mut state = PanelState::new(28.0);
        assert_eq!(state.cycle_size(), 42.0);
        assert_eq!(state.cycle_size(), 65.0);
        assert_eq!(state.cycle_size(), 28.0);
        assert_eq!(state.cycle_size(), 42.0);
    }

    #[test]
    fn cycle_tolerance_and_off_preset_heights() {
        assert_eq!(next_cycle_size(42.6), 65.0);
        assert_eq!(next_cycle_size(27.2), 42.0);
        assert_eq!(next_cycle_size(30.0), 42.0);
        assert_eq!(next_cycle_size(50.0), 65.0);
        assert_eq!(next_cycle_size(24.0), 28.0);
        assert_eq!(next_cycle_size(80.0), 28.0);
    }
}
