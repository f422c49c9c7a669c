//! Input & Rules (`spec.md` §4.3): turns raw keycodes/buttons plus a
//! modifier state into a configured `Action`, and matches newly mapped
//! windows against the app-rule table. Pure lookups; the display facade only
//! supplies the numlock mask and the keycode→keysym translation.

use x11::xlib::{ControlMask, LockMask, Mod1Mask, Mod2Mask, Mod3Mask, Mod4Mask, Mod5Mask, ShiftMask};

use crate::config::{Action, AppRule, ButtonBinding, KeyBinding, BUTTONS, KEYS, RULES};

const ALL_MODIFIERS: u32 = ShiftMask | ControlMask | Mod1Mask | Mod2Mask | Mod3Mask | Mod4Mask | Mod5Mask;

/// Strips CapsLock and NumLock out of a raw modifier state so a binding
/// written as `MOD_KEY` matches whether or not either lock is engaged.
pub fn clean_mask(state: u32, numlockmask: u32) -> u32 {
    state & !(LockMask | numlockmask) & ALL_MODIFIERS
}

/// Resolves a `KeyPress` (already translated to a keysym) against `KEYS`.
pub fn resolve_key(keysym: u64, state: u32, numlockmask: u32) -> Option<&'static Action> {
    let clean = clean_mask(state, numlockmask);
    KEYS.iter()
        .find(|b: &&KeyBinding| b.keysym == keysym && b.modifiers == clean)
        .map(|b| &b.action)
}

/// Resolves a `ButtonPress` against `BUTTONS`.
pub fn resolve_button(button: u32, state: u32, numlockmask: u32) -> Option<&'static Action> {
    let clean = clean_mask(state, numlockmask);
    BUTTONS
        .iter()
        .find(|b: &&ButtonBinding| b.button == button && b.modifiers == clean)
        .map(|b| &b.action)
}

/// First rule whose `pattern` is a substring of either the class or instance
/// component wins (case-sensitive — see DESIGN.md's Open Question decision).
pub fn matching_rule(class: &str, instance: &str) -> Option<&'static AppRule> {
    RULES.iter().find(|r| class.contains(r.pattern) || instance.contains(r.pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MOD_KEY;
    use x11::keysym::XK_q;

    #[test]
    fn clean_mask_strips_locks_but_keeps_real_modifiers() {
        let numlockmask = 0x10;
        let dirty = MOD_KEY | LockMask | numlockmask;
        assert_eq!(clean_mask(dirty, numlockmask), MOD_KEY);
    }

    #[test]
    fn resolve_key_finds_kill_client_binding() {
        let action = resolve_key(XK_q as u64, MOD_KEY, 0).unwrap();
        assert!(matches!(action, Action::KillClient));
    }

    #[test]
    fn resolve_key_ignores_locks_in_state() {
        let numlockmask = 0x10;
        let action = resolve_key(XK_q as u64, MOD_KEY | LockMask | numlockmask, numlockmask).unwrap();
        assert!(matches!(action, Action::KillClient));
    }

    #[test]
    fn resolve_key_returns_none_for_unbound_combo() {
        assert!(resolve_key(0xdeadbeef, MOD_KEY, 0).is_none());
    }

    #[test]
    fn matching_rule_checks_class_then_instance() {
        let rule = matching_rule("Gimp-2.10", "gimp").unwrap();
        assert_eq!(rule.pattern, "Gimp");

        let rule2 = matching_rule("mpv", "mpv").unwrap();
        assert_eq!(rule2.pattern, "mpv");

        assert!(matching_rule("Alacritty", "alacritty").is_none());
    }

    #[test]
    fn matching_rule_is_case_sensitive() {
        assert!(matching_rule("gimp", "gimp").is_none(), "lowercase must not match \"Gimp\"");
    }
}
