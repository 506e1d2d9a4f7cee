//! CSS class helpers shared by pages and components. The classes themselves
//! live in `assets/main.css`.

use super::components::toast::ToastKind;

// ============================================
// BUTTONS
// ============================================

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "btn btn-active"
    } else {
        "btn"
    }
}

pub const BUTTON: &str = "btn";
pub const BUTTON_PRIMARY: &str = "btn btn-primary";

// ============================================
// FORM CONTROLS
// ============================================

pub const INPUT: &str = "input";
pub const SELECT: &str = "select";
pub const SLIDER: &str = "slider";

// ============================================
// CONTAINERS / FEEDBACK
// ============================================

pub const PANEL: &str = "panel";

pub fn notice(error: bool) -> &'static str {
    if error {
        "notice notice-error"
    } else {
        "notice notice-info"
    }
}

pub fn toast(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Info => "toast toast-info",
        ToastKind::Success => "toast toast-success",
        ToastKind::Warning => "toast toast-warning",
        ToastKind::Error => "toast toast-error",
    }
}

// ============================================
// MAP
// ============================================

pub fn map_marker(selected: bool, matches_filters: bool) -> &'static str {
    match (selected, matches_filters) {
        (true, _) => "map-marker map-marker-selected",
        (false, true) => "map-marker",
        (false, false) => "map-marker map-marker-dimmed",
    }
}
