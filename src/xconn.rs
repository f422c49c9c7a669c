//! Display Facade: the thin abstraction over the X server that the rest of
//! the window manager speaks to instead of touching Xlib directly.
//!
//! `XConn` is implemented for real by `x11conn::X11Conn` (raw Xlib calls) and
//! for tests by `x11conn::MockConn` (an in-memory stand-in), so the event
//! dispatcher, focus manager and drag session can be exercised without a
//! live X server.

use crate::geometry::Rect;

/// Window and atom IDs are both `unsigned long` on the wire; we keep them as
/// a single opaque integer type so nothing above this module needs to know
/// about Xlib's `Window`/`Atom` typedefs.
pub type XId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ClassHint {
    pub class: String,
    pub instance: String,
}

/// Atom table interned once at startup. Field names mirror the ICCCM/EWMH
/// names in `spec.md` §6.
#[derive(Debug, Clone, Copy, Default)]
pub struct Atoms {
    pub wm_protocols: XId,
    pub wm_delete_window: XId,
    pub net_supported: XId,
    pub net_active_window: XId,
    pub net_wm_state: XId,
    pub net_wm_state_fullscreen: XId,
}

/// Friendly event enum the dispatcher matches on, decoupled from Xlib's
/// tagged-union `XEvent`.
#[derive(Debug, Clone)]
pub enum XEventKind {
    MapRequest {
        window: XId,
    },
    DestroyNotify {
        window: XId,
    },
    UnmapNotify {
        window: XId,
        send_event: bool,
    },
    ConfigureRequest {
        window: XId,
        geometry: WindowGeometry,
        border_width: u32,
        value_mask: u64,
    },
    ClientMessage {
        window: XId,
        message_type: XId,
        data: [i64; 5],
    },
    PropertyNotify {
        window: XId,
        atom: XId,
    },
    EnterNotify {
        window: XId,
        normal: bool,
        inferior: bool,
    },
    FocusIn {
        window: XId,
    },
    KeyPress {
        keycode: u32,
        state: u32,
    },
    ButtonPress {
        window: XId,
        button: u32,
        state: u32,
        root_x: i32,
        root_y: i32,
    },
    ButtonRelease,
    MotionNotify {
        root_x: i32,
        root_y: i32,
    },
    Other,
}

/// The Display Facade. Every method is a single X round trip (or a locally
/// cached fact about one); nothing here understands desktops, layouts or
/// focus — that's the rest of the crate's job.
pub trait XConn {
    fn root(&self) -> XId;
    fn screen_size(&self) -> (i32, i32);
    fn atoms(&self) -> &Atoms;
    fn numlock_mask(&self) -> u32;

    fn next_event(&self) -> XEventKind;
    fn flush(&self);
    fn sync(&self);

    /// Maps a raw `KeyPress` keycode back to the keysym a binding table is
    /// keyed on. Group/level 0 only — this window manager binds no
    /// shift-level-sensitive keys.
    fn keysym_for_keycode(&self, keycode: u32) -> u64;

    fn map_window(&self, w: XId);
    fn unmap_window(&self, w: XId);
    fn kill_client(&self, w: XId);
    fn destroy_window(&self, w: XId);

    fn move_resize(&self, w: XId, geom: WindowGeometry);
    fn set_border_width(&self, w: XId, width: u32);
    fn set_border_color(&self, w: XId, focused: bool);
    fn restack(&self, windows: &[XId]);

    fn set_input_focus(&self, w: XId);
    fn set_active_window(&self, w: Option<XId>);

    fn select_input_for_client(&self, w: XId);
    fn grab_buttons(&self, w: XId, click_to_focus_unfocused: bool);
    fn ungrab_buttons(&self, w: XId);
    fn grab_keys(&self);
    fn grab_pointer_for_drag(&self);
    fn ungrab_pointer(&self);
    fn warp_pointer(&self, w: XId, x: i32, y: i32);
    fn query_pointer_root(&self) -> (i32, i32);

    fn get_window_attributes(&self, w: XId) -> Option<WindowGeometry>;
    fn is_override_redirect(&self, w: XId) -> bool;
    fn get_class_hint(&self, w: XId) -> Option<ClassHint>;
    fn get_transient_for(&self, w: XId) -> Option<XId>;
    fn get_wm_hints_urgent(&self, w: XId) -> bool;
    fn get_wm_protocols(&self, w: XId) -> Vec<XId>;
    fn get_net_wm_state(&self, w: XId) -> Vec<XId>;
    fn set_net_wm_state(&self, w: XId, atoms: &[XId]);
    fn send_client_message(&self, w: XId, message_type: XId, data: [i64; 5]);

    fn configure_window_raw(&self, w: XId, geom: WindowGeometry, border_width: u32, value_mask: u64);
}

impl From<Rect> for WindowGeometry {
    fn from(r: Rect) -> Self {
        WindowGeometry {
            x: r.x,
            y: r.y,
            w: r.w,
            h: r.h,
        }
    }
}

impl From<WindowGeometry> for Rect {
    fn from(g: WindowGeometry) -> Self {
        Rect::new(g.x, g.y, g.w, g.h)
    }
}
