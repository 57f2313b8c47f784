use serde::Deserialize;

/// Where keyboard focus was when a key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusKind {
    Document,
    /// An input, textarea, select or content-editable element.
    Editable,
}

impl FocusKind {
    pub fn from_element(tag_name: &str, content_editable: bool) -> Self {
        let editable_tag = matches!(
            tag_name.to_ascii_lowercase().as_str(),
            "input" | "textarea" | "select"
        );
        if editable_tag || content_editable {
            FocusKind::Editable
        } else {
            FocusKind::Document
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub focus: FocusKind,
}

/// Global shortcut that toggles the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Hotkey {
    pub key: char,
    /// Skip the shortcut while the user is typing into an editable element.
    pub guard_editable: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: 'i',
            guard_editable: true,
        }
    }
}

impl Hotkey {
    pub fn matches(&self, press: &KeyPress<'_>) -> bool {
        if press.ctrl || press.meta || press.alt {
            return false;
        }
        if self.guard_editable && press.focus == FocusKind::Editable {
            return false;
        }
        let mut chars = press.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_lowercase().eq(self.key.to_lowercase()),
            _ => false,
        }
    }
}
