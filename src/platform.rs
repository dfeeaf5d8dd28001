//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifier accepted alongside Ctrl for wizard shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Modifier for jumping to a progress step
pub const JUMP_MODIFIER: KeyModifiers = KeyModifiers::ALT;

/// Next section shortcut display
pub const NEXT_SHORTCUT: &str = "Ctrl+N";

/// Previous section shortcut display
pub const PREVIOUS_SHORTCUT: &str = "Ctrl+P";

/// Submit shortcut display
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Jump-to-step shortcut display
pub const JUMP_SHORTCUT: &str = "Alt+1-9";

/// Whether a key carries the wizard shortcut modifier
pub fn is_command(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(COMMAND_MODIFIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_is_always_a_command() {
        assert!(is_command(KeyModifiers::CONTROL));
        assert!(is_command(KeyModifiers::CONTROL | KeyModifiers::SHIFT));
        assert!(!is_command(KeyModifiers::NONE));
        assert!(!is_command(KeyModifiers::SHIFT));
    }

    #[test]
    fn test_platform_modifier_is_a_command() {
        assert!(is_command(COMMAND_MODIFIER));
    }
}
