//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use medsketch_core::WidthPreset;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub shift: bool,
    pub action: UiAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        shift: bool,
        action: UiAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Shift+C").
    pub fn format(&self) -> String {
        if self.shift {
            format!("Shift+{}", self.key)
        } else {
            self.key.to_string()
        }
    }

    fn matches(&self, key: &str, shift: bool) -> bool {
        self.shift == shift && self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts = vec![
            Shortcut::new("C", false, UiAction::Clear, "Clear all strokes"),
            Shortcut::new("C", true, UiAction::ClearAll, "Clear strokes, including the one being drawn"),
            Shortcut::new("Escape", false, UiAction::DiscardStroke, "Discard the stroke being drawn"),
        ];
        shortcuts.extend(WidthPreset::ALL.into_iter().map(|preset| {
            let description = match preset {
                WidthPreset::Small => "Small pen",
                WidthPreset::Medium => "Medium pen",
                WidthPreset::Large => "Large pen",
            };
            Shortcut::new(preset.shortcut(), false, UiAction::SetWidth(preset), description)
        }));
        shortcuts
    }

    /// Look up the action bound to a key press.
    pub fn action_for(key: &str, shift: bool) -> Option<UiAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, shift))
            .map(|shortcut| shortcut.action)
    }

    /// Log all shortcuts.
    pub fn log_all() {
        log::info!("Keyboard shortcuts:");
        for shortcut in Self::all() {
            log::info!("  {:10} {}", shortcut.format(), shortcut.description);
        }
    }
}
