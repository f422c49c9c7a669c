//! Event Dispatcher (`spec.md` §4.5): one handler per X event type, plus the
//! action table that key/button bindings resolve into. Mirrors the
//! teacher's match-on-event-type run loop, generalized from rdwm's fixed
//! handler set to this spec's event list.

use crate::config::Action;
use crate::drag::{self, DragSideEffect};
use crate::input;
use crate::xconn::{XConn, XEventKind, XId};
use crate::wm::Wm;

/// Runs the blocking `next_event`/dispatch loop until `wm.running` goes
/// false (`Action::Quit`).
pub fn run<X: XConn>(wm: &mut Wm<X>) {
    wm.conn.grab_keys();
    wm.publish_status();
    while wm.running {
        let event = wm.conn.next_event();
        dispatch(wm, event);
    }
}

pub fn dispatch<X: XConn>(wm: &mut Wm<X>, event: XEventKind) {
    match event {
        XEventKind::MapRequest { window } => wm.manage_window(window),
        XEventKind::DestroyNotify { window } => wm.unmanage_window(window),
        XEventKind::UnmapNotify { window, send_event } => {
            // Only synthetic unmaps (via SendEvent) mean the client asked to
            // withdraw itself; plain unmaps can be this WM's own doing
            // (e.g. hiding a desktop) and must not unmanage the client.
            if send_event {
                wm.unmanage_window(window);
            }
        }
        XEventKind::ConfigureRequest { window, geometry, border_width, value_mask } => {
            handle_configure_request(wm, window, geometry, border_width, value_mask);
        }
        XEventKind::ClientMessage { window, message_type, data } => {
            handle_client_message(wm, window, message_type, data);
        }
        XEventKind::PropertyNotify { window, atom } => handle_property_notify(wm, window, atom),
        XEventKind::EnterNotify { window, normal, inferior } => {
            if crate::config::FOLLOW_MOUSE && normal && !inferior && wm.current().get(window).is_some() {
                wm.with_current(|conn, d| crate::focus::update_current(conn, d, Some(window)));
            }
        }
        XEventKind::FocusIn { window } => handle_focus_in(wm, window),
        XEventKind::KeyPress { keycode, state } => handle_key_press(wm, keycode, state),
        XEventKind::ButtonPress { window, button, state, root_x, root_y } => {
            handle_button_press(wm, window, button, state, root_x, root_y);
        }
        XEventKind::ButtonRelease | XEventKind::MotionNotify { .. } | XEventKind::Other => {}
    }
}

fn handle_configure_request<X: XConn>(
    wm: &mut Wm<X>,
    window: XId,
    geometry: crate::xconn::WindowGeometry,
    border_width: u32,
    value_mask: u64,
) {
    // Honor the client's request at face value for anything not currently
    // managed or that is floating/transient (§4.5); tiled clients get their
    // geometry from the layout engine instead, but still need an
    // acknowledging ConfigureNotify, which `configure_window_raw` provides.
    let floating = wm.current().get(window).map_or(true, |c| !c.is_tileable());
    if floating {
        wm.conn.configure_window_raw(window, geometry, border_width, value_mask);
    } else {
        wm.relayout();
    }
}

fn handle_client_message<X: XConn>(wm: &mut Wm<X>, window: XId, message_type: XId, data: [i64; 5]) {
    let atoms = *wm.conn.atoms();
    if message_type == atoms.net_wm_state && data[1] as u64 == atoms.net_wm_state_fullscreen {
        // data[0]: 0 = remove, 1 = add, 2 = toggle (EWMH _NET_WM_STATE wire format).
        let wants_fullscreen = match data[0] {
            0 => false,
            1 => true,
            _ => wm.current().get(window).map_or(true, |c| !c.is_fullscreen()),
        };
        let is_fullscreen = wm.current().get(window).map_or(false, |c| c.is_fullscreen());
        if wants_fullscreen != is_fullscreen && wm.current().current == Some(window) {
            wm.toggle_fullscreen();
        }
    } else if message_type == atoms.net_active_window && wm.current().get(window).is_some() {
        // A pager/taskbar asking for `window` to become the active one (§4.5).
        wm.with_current(|conn, d| crate::focus::update_current(conn, d, Some(window)));
    }
}

/// A client that sets its own `WM_HINTS` urgency bit (e.g. a terminal bell)
/// shows up as a `PropertyNotify` on `WM_HINTS`; the atom value itself
/// carries no extra information, so every `WM_HINTS` change just re-checks
/// the hint (§4.3, §4.7).
fn handle_property_notify<X: XConn>(wm: &mut Wm<X>, window: XId, _atom: XId) {
    if wm.current().get(window).is_some() && wm.conn.get_wm_hints_urgent(window) {
        if let Some(c) = wm.current_mut().get_mut(window) {
            c.set_urgent(true);
        }
        wm.publish_status();
    }
}

/// Defends against applications that call `SetInputFocus` on themselves: if
/// the window that just took focus isn't the one we think is current, put
/// focus back (§4.5).
fn handle_focus_in<X: XConn>(wm: &mut Wm<X>, window: XId) {
    if let Some(current) = wm.current().current {
        if window != current {
            wm.conn.set_input_focus(current);
        }
    }
}

fn handle_key_press<X: XConn>(wm: &mut Wm<X>, keycode: u32, state: u32) {
    let keysym = wm.conn.keysym_for_keycode(keycode);
    let numlockmask = wm.conn.numlock_mask();
    let Some(action) = input::resolve_key(keysym, state, numlockmask).copied() else { return };
    run_action(wm, action);
}

fn handle_button_press<X: XConn>(wm: &mut Wm<X>, window: XId, button: u32, state: u32, root_x: i32, root_y: i32) {
    if crate::config::CLICK_TO_FOCUS && wm.current().get(window).is_some() {
        wm.with_current(|conn, d| crate::focus::update_current(conn, d, Some(window)));
    }
    let numlockmask = wm.conn.numlock_mask();
    if let Some(Action::Drag(kind)) = input::resolve_button(button, state, numlockmask).copied() {
        // §4.6 step 1/4: abort if the clicked client isn't managed. A
        // fullscreen target is pulled back to a floating window first so the
        // remaining tiled clients close the gap immediately.
        if wm.current().get(window).is_none() {
            return;
        }
        let was_fullscreen = wm.current().get(window).map_or(false, |c| c.is_fullscreen());
        if let Some(c) = wm.current_mut().get_mut(window) {
            c.set_fullscreen(false);
            c.set_floating(true);
        }
        if was_fullscreen {
            wm.conn.set_net_wm_state(window, &[]);
        }
        wm.relayout();

        let Some(start) = wm.conn.get_window_attributes(window) else { return };
        let (end, side_effects) = drag::run(&wm.conn, window, kind, start.into());
        wm.conn.move_resize(window, end.into());
        for effect in side_effects {
            match effect {
                DragSideEffect::MapRequest(w) => wm.manage_window(w),
                DragSideEffect::ConfigureRequest { window, geometry, border_width, value_mask } => {
                    wm.conn.configure_window_raw(window, geometry, border_width, value_mask);
                }
            }
        }
        wm.relayout();
    }
    let _ = (root_x, root_y);
}

/// Executes one resolved `Action` against the window manager state.
pub fn run_action<X: XConn>(wm: &mut Wm<X>, action: Action) {
    match action {
        Action::Spawn(argv) => wm.spawn(argv),
        Action::Quit(code) => wm.quit(code),
        Action::KillClient => {
            if let Some(w) = wm.current().current {
                wm.kill_client(w);
            }
        }
        Action::ChangeDesktop(idx) => wm.change_desktop(idx),
        Action::LastDesktop => wm.toggle_last_desktop(),
        Action::ClientToDesktop(idx) => wm.client_to_desktop(idx),
        Action::FocusUrgent => wm.focus_urgent(),
        Action::NextWindow => wm.next_window(),
        Action::PrevWindow => wm.prev_window(),
        Action::MoveUp => wm.move_up(),
        Action::MoveDown => wm.move_down(),
        Action::SwapMaster => wm.swap_master(),
        Action::ToggleFloating => wm.toggle_floating(),
        Action::ToggleFullscreen => wm.toggle_fullscreen(),
        Action::SwitchMode(mode) => wm.switch_mode(mode),
        Action::ResizeMaster(delta) => wm.resize_master(delta),
        Action::ResizeGrowth(delta) => wm.resize_growth(delta),
        Action::TogglePanel => wm.toggle_panel(),
        Action::Drag(_) => {
            // Drag sessions start from a ButtonPress on the target window,
            // not a plain keybinding; see `handle_button_press`.
        }
    }
}
