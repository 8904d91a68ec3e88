//! Key strings ("ctrl+s", "shift+tab", "j") and their mapping to actions.

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// A single key binding mapping a key combination to an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key string (e.g., "j", "down", "ctrl+s")
    pub key: String,

    /// The action this key triggers
    pub action: Action,

    /// Optional description override (uses action description if None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parsed key representation for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
            description: None,
        }
    }

    /// Check if this binding matches the given key event
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Ok(parsed) = self.parse() else {
            return false;
        };
        // Terminals report uppercase letters and symbols like '?' with SHIFT
        // set, so a plain character binding ignores that modifier.
        let modifiers = match code {
            KeyCode::Char(_) if !parsed.modifiers.contains(KeyModifiers::SHIFT) => {
                modifiers - KeyModifiers::SHIFT
            }
            _ => modifiers,
        };
        parsed.code == code && parsed.modifiers == modifiers
    }

    pub fn parse(&self) -> Result<ParsedKey, String> {
        parse_key_string(&self.key)
    }

    /// Display string for this binding (e.g., "Ctrl+S")
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }

    pub fn get_description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.action.description())
    }
}

/// Parse a key string like "ctrl+shift+n" into KeyCode and KeyModifiers
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let key = key.trim().to_lowercase();
    // "+" on its own (or as the last element of "ctrl++") is the plus key
    let (mods, key_part) = match key.strip_suffix("++") {
        Some(prefix) => (prefix, "+"),
        None if key == "+" => ("", "+"),
        None => key.rsplit_once('+').unwrap_or(("", key.as_str())),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in mods.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        modifiers |= match part {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "option" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    let code = parse_key_code(key_part)?;
    Ok(ParsedKey { code, modifiers })
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let code = match key.trim() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..]
                .parse()
                .map_err(|_| format!("Unknown key: {}", f))?;
            KeyCode::F(n)
        }
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("Unknown key: {}", other)),
            }
        }
    };
    Ok(code)
}

/// Format a key string for display (e.g., "ctrl+n" -> "Ctrl+N")
pub fn format_key_display(key: &str) -> String {
    key.split('+')
        .map(|part| match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => "Ctrl".to_string(),
            "alt" | "option" => "Alt".to_string(),
            "shift" => "Shift".to_string(),
            "up" => "↑".to_string(),
            "down" => "↓".to_string(),
            "left" => "←".to_string(),
            "right" => "→".to_string(),
            "enter" | "return" => "Enter".to_string(),
            "esc" | "escape" => "Esc".to_string(),
            "space" => "Space".to_string(),
            "pageup" | "pgup" => "PgUp".to_string(),
            "pagedown" | "pgdn" => "PgDn".to_string(),
            "home" => "Home".to_string(),
            "end" => "End".to_string(),
            other if other.len() == 1 => other.to_uppercase(),
            other if other.starts_with('f') && other.len() <= 3 => other.to_uppercase(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let parsed = parse_key_string("j").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('j'));
        assert_eq!(parsed.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_modifiers() {
        let parsed = parse_key_string("ctrl+shift+n").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('n'));
        assert_eq!(parsed.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(parse_key_string("hyper+x").is_err());
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_string("enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_string("esc").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key_string("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("f5").unwrap().code, KeyCode::F(5));
        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
        assert!(parse_key_string("nope").is_err());
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key_display("ctrl+n"), "Ctrl+N");
        assert_eq!(format_key_display("up"), "↑");
        assert_eq!(format_key_display("enter"), "Enter");
    }

    #[test]
    fn test_key_binding_matches() {
        let binding = KeyBinding::new("ctrl+s", Action::Save);
        assert!(binding.matches(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!binding.matches(KeyCode::Char('s'), KeyModifiers::NONE));
    }

    #[test]
    fn test_char_binding_ignores_shift() {
        let binding = KeyBinding::new("?", Action::Help);
        assert!(binding.matches(KeyCode::Char('?'), KeyModifiers::SHIFT));
        assert!(!binding.matches(KeyCode::Char('?'), KeyModifiers::CONTROL));
    }
}
