//! Compile-time configuration table (`spec.md` §6: "No flags, no config
//! file; configuration is compile-time"). This is the idiomatic-Rust
//! rendition of a dwm-style `config.h`: plain `const`s and `&'static` array
//! literals, consumed by `input.rs` and `wm.rs` but never mutated at
//! runtime.

use x11::keysym::*;
use x11::xlib::{Button1, Button3, Mod1Mask, Mod4Mask, ShiftMask};

use crate::desktop::Mode;
use crate::drag::DragKind;

pub const DESKTOPS: usize = 4;
pub const DEFAULT_DESKTOP: usize = 0;
pub const DEFAULT_MODE: Mode = Mode::Tile;
pub const MASTER_SIZE: f32 = 0.55;
pub const RESIZE_STEP: f32 = 0.05;
pub const GROWTH_STEP: i32 = 20;

pub const PANEL_HEIGHT: i32 = 18;
pub const TOP_PANEL: bool = true;
pub const SHOW_PANEL: bool = true;

pub const BORDER_WIDTH: u32 = 1;
pub const MINWSZ: i32 = 50;

pub const FOCUS_COLOR: u64 = 0x5f8ae6;
pub const UNFOCUS_COLOR: u64 = 0x30302f;

pub const FOLLOW_MOUSE: bool = false;
pub const CLICK_TO_FOCUS: bool = true;
pub const ATTACH_ASIDE: bool = false;
pub const FOLLOW_WINDOW: bool = false;

pub const MOD_KEY: u32 = Mod4Mask;

/// Mirrors the `Arg` shape in `other_examples/8bd1a4a1_..._dwm.rs.rs`: a
/// binding names one static argument alongside its action.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    Spawn(&'static [&'static str]),
    Quit(i32),
    KillClient,
    ChangeDesktop(usize),
    LastDesktop,
    ClientToDesktop(usize),
    FocusUrgent,
    NextWindow,
    PrevWindow,
    MoveUp,
    MoveDown,
    SwapMaster,
    ToggleFloating,
    ToggleFullscreen,
    SwitchMode(Mode),
    ResizeMaster(f32),
    ResizeGrowth(i32),
    TogglePanel,
    Drag(DragKind),
}

pub struct KeyBinding {
    pub modifiers: u32,
    pub keysym: u64,
    pub action: Action,
}

pub struct ButtonBinding {
    pub modifiers: u32,
    pub button: u32,
    pub action: Action,
}

/// App rule: first entry whose `pattern` is a substring of either the
/// window's class or instance component wins. `desktop < 0` means "the
/// currently selected desktop" (§4.3).
pub struct AppRule {
    pub pattern: &'static str,
    pub desktop: i32,
    pub follow: bool,
    pub floating: bool,
}

pub static KEYS: &[KeyBinding] = &[
    KeyBinding { modifiers: MOD_KEY, keysym: XK_Return as u64, action: Action::Spawn(&["alacritty"]) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_p as u64, action: Action::Spawn(&["dmenu_run"]) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_q as u64, action: Action::KillClient },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_q as u64, action: Action::Quit(0) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_j as u64, action: Action::NextWindow },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_k as u64, action: Action::PrevWindow },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_j as u64, action: Action::MoveDown },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_k as u64, action: Action::MoveUp },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_Return as u64, action: Action::SwapMaster },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_t as u64, action: Action::SwitchMode(Mode::Tile) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_b as u64, action: Action::SwitchMode(Mode::Bstack) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_g as u64, action: Action::SwitchMode(Mode::Grid) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_m as u64, action: Action::SwitchMode(Mode::Monocle) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_f as u64, action: Action::SwitchMode(Mode::Float) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_space as u64, action: Action::ToggleFloating },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_u as u64, action: Action::ToggleFullscreen },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_h as u64, action: Action::ResizeMaster(-RESIZE_STEP) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_l as u64, action: Action::ResizeMaster(RESIZE_STEP) },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_h as u64, action: Action::ResizeGrowth(-GROWTH_STEP) },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_l as u64, action: Action::ResizeGrowth(GROWTH_STEP) },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_b as u64, action: Action::TogglePanel },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_grave as u64, action: Action::LastDesktop },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_y as u64, action: Action::FocusUrgent },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_1 as u64, action: Action::ChangeDesktop(0) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_2 as u64, action: Action::ChangeDesktop(1) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_3 as u64, action: Action::ChangeDesktop(2) },
    KeyBinding { modifiers: MOD_KEY, keysym: XK_4 as u64, action: Action::ChangeDesktop(3) },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_1 as u64, action: Action::ClientToDesktop(0) },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_2 as u64, action: Action::ClientToDesktop(1) },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_3 as u64, action: Action::ClientToDesktop(2) },
    KeyBinding { modifiers: MOD_KEY | ShiftMask, keysym: XK_4 as u64, action: Action::ClientToDesktop(3) },
];

pub static BUTTONS: &[ButtonBinding] = &[
    ButtonBinding { modifiers: MOD_KEY, button: Button1, action: Action::Drag(DragKind::Move) },
    ButtonBinding { modifiers: MOD_KEY, button: Button3, action: Action::Drag(DragKind::Resize) },
    ButtonBinding { modifiers: Mod1Mask, button: Button1, action: Action::Drag(DragKind::Move) },
];

pub static RULES: &[AppRule] = &[
    AppRule { pattern: "Gimp", desktop: -1, follow: false, floating: true },
    AppRule { pattern: "mpv", desktop: -1, follow: true, floating: true },
];
