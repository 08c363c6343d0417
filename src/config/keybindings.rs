//! Keybinding configuration for the TUI.
//!
//! `[keybindings]` maps an action to the keys that trigger it. Listing an
//! action replaces its default keys; unlisted actions keep theirs.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::Deserialize;

use crate::tui::event::Action;

const DEFAULT_KEYS: &[(Action, &[&str])] = &[
    (Action::Quit, &["q", "Ctrl+c"]),
    (Action::MoveUp, &["k", "Up"]),
    (Action::MoveDown, &["j", "Down"]),
    (Action::NextPage, &["n", "PageDown"]),
    (Action::PrevPage, &["p", "PageUp"]),
    (Action::NextPane, &["Tab"]),
    (Action::PrevPane, &["BackTab", "Shift+Tab"]),
    (Action::GoHome, &["h", "0"]),
    (Action::GoPosts, &["1"]),
    (Action::GoPages, &["2"]),
    (Action::ChangeSite, &["S"]),
    (Action::Select, &["Enter"]),
    (Action::OpenInBrowser, &["o"]),
    (Action::Reload, &["R"]),
    (Action::FilterCategory, &["c"]),
    (Action::FilterTag, &["t"]),
    (Action::ClearFilter, &["x", "Backspace"]),
];

/// Parsed key map. When two actions share a key, the one declared first in
/// [`Action`] wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>")]
pub struct KeybindingConfig {
    keymap: Vec<(KeyBinding, Action)>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        let mut keymap = Vec::new();
        for (action, keys) in DEFAULT_KEYS {
            for key in *keys {
                if let Ok(binding) = parse_key_string(key) {
                    keymap.push((binding, *action));
                }
            }
        }
        Self { keymap }
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for KeybindingConfig {
    type Error = String;

    fn try_from(overrides: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut keys: BTreeMap<Action, Vec<String>> = DEFAULT_KEYS
            .iter()
            .map(|(action, keys)| (*action, keys.iter().map(|k| k.to_string()).collect()))
            .collect();

        for (name, bound) in overrides {
            let de: StrDeserializer<ValueError> = name.as_str().into_deserializer();
            let action = Action::deserialize(de).map_err(|e| format!("Unknown action `{}`: {}", name, e))?;
            if action == Action::None {
                return Err("`none` cannot be bound to keys".to_string());
            }
            keys.insert(action, bound);
        }

        let mut keymap = Vec::new();
        for (action, keys) in keys {
            for key in keys {
                keymap.push((parse_key_string(&key)?, action));
            }
        }
        Ok(Self { keymap })
    }
}

impl KeybindingConfig {
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        self.keymap
            .iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored on bindings that don't ask for it, so "R" matches
    /// the Shift+R event terminals report.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Named keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (prefix, key) = match s.rsplit_once('+') {
        // "+" on its own, or "Ctrl++"
        Some((prefix, "")) => (prefix.strip_suffix('+').unwrap_or(prefix), "+"),
        Some((prefix, key)) => (prefix, key),
        None => ("", s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    Ok(match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        _ => return Err(format!("Unknown key: {}", s)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_plain_keys() {
        let binding = parse_key_string("j").unwrap();
        assert_eq!(binding.code, KeyCode::Char('j'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);

        assert_eq!(parse_key_string("PageDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("F12").unwrap().code, KeyCode::F(12));
        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
        assert!(parse_key_string("F13").is_err());
        assert!(parse_key_string("Hyper").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(binding.code, KeyCode::Char('a'));
        assert_eq!(
            binding.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );

        let binding = parse_key_string("Ctrl++").unwrap();
        assert_eq!(binding.code, KeyCode::Char('+'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);

        assert!(parse_key_string("Meta+x").is_err());
    }

    #[test]
    fn test_binding_ignores_implicit_shift() {
        let binding = parse_key_string("R").unwrap();
        assert!(binding.matches(&press(KeyCode::Char('R'), KeyModifiers::SHIFT)));

        let binding = parse_key_string("Ctrl+c").unwrap();
        assert!(binding.matches(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_default_keymap() {
        let config = KeybindingConfig::default();

        assert_eq!(config.get_action(&press(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(config.get_action(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(
            config.get_action(&press(KeyCode::Char('c'), KeyModifiers::NONE)),
            Action::FilterCategory
        );
        assert_eq!(config.get_action(&press(KeyCode::Char('2'), KeyModifiers::NONE)), Action::GoPages);
        assert_eq!(config.get_action(&press(KeyCode::Backspace, KeyModifiers::NONE)), Action::ClearFilter);
        assert_eq!(config.get_action(&press(KeyCode::Char('z'), KeyModifiers::NONE)), Action::None);
        assert_eq!(config.get_action(&press(KeyCode::BackTab, KeyModifiers::SHIFT)), Action::PrevPane);
    }

    #[test]
    fn test_overrides_replace_only_listed_actions() {
        let config: KeybindingConfig = toml::from_str("reload = [\"F5\"]").unwrap();

        assert_eq!(config.get_action(&press(KeyCode::F(5), KeyModifiers::NONE)), Action::Reload);
        assert_eq!(config.get_action(&press(KeyCode::Char('R'), KeyModifiers::SHIFT)), Action::None);
        assert_eq!(config.get_action(&press(KeyCode::Char('j'), KeyModifiers::NONE)), Action::MoveDown);
    }

    #[test]
    fn test_invalid_bindings_fail_at_load() {
        assert!(toml::from_str::<KeybindingConfig>("reload = [\"Hyper+r\"]").is_err());
        assert!(toml::from_str::<KeybindingConfig>("teleport = [\"x\"]").is_err());
        assert!(toml::from_str::<KeybindingConfig>("none = [\"x\"]").is_err());
    }
}
