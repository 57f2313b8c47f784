pub mod hotkey;
pub mod panel;
pub mod prefs;
pub mod sheet;

pub use hotkey::{FocusKind, Hotkey, KeyPress};
pub use panel::{
    clamp_height, next_cycle_size, DragSession, PanelState, Visibility, DEFAULT_HEIGHT_VH,
    MAX_HEIGHT_VH, MIN_HEIGHT_VH, SIZE_CYCLE,
};
pub use prefs::{MemoryBackend, PrefError, PreferenceBackend, PreferenceStore};
pub use sheet::{
    escape_html, fact_sheet, render_card, Block, Bullet, Card, Facts, FlagStripe, Preset,
};
