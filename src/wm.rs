//! The root of control flow (`spec.md` §2): owns every desktop, the current
//! display connection and the screen geometry, and exposes the operations
//! `events.rs` and `main.rs` drive. Mirrors the teacher's top-level `Rdwm`
//! struct holding workspaces, current index and config in one place.

use std::ffi::CString;

use crate::config::{
    DEFAULT_DESKTOP, DEFAULT_MODE, DESKTOPS, MASTER_SIZE, PANEL_HEIGHT, SHOW_PANEL, TOP_PANEL,
};
use crate::desktop::{Desktop, Mode, RemoveOutcome};
use crate::geometry::Rect;
use crate::input::matching_rule;
use crate::layout;
use crate::xconn::{ClassHint, XConn, XId};

pub struct Wm<X: XConn> {
    pub conn: X,
    pub desktops: Vec<Desktop>,
    pub current_desktop: usize,
    pub last_desktop: usize,
    pub screen_w: i32,
    pub screen_h: i32,
    pub running: bool,
    pub exit_code: i32,
}

impl<X: XConn> Wm<X> {
    pub fn new(conn: X) -> Self {
        let (screen_w, screen_h) = conn.screen_size();
        let desktops = (0..DESKTOPS).map(|_| Desktop::new(DEFAULT_MODE, MASTER_SIZE, SHOW_PANEL)).collect();
        Wm {
            conn,
            desktops,
            current_desktop: DEFAULT_DESKTOP,
            last_desktop: DEFAULT_DESKTOP,
            screen_w,
            screen_h,
            running: true,
            exit_code: 0,
        }
    }

    fn usable_height(&self) -> i32 {
        self.screen_h - PANEL_HEIGHT
    }

    pub fn current(&self) -> &Desktop {
        &self.desktops[self.current_desktop]
    }

    pub fn current_mut(&mut self) -> &mut Desktop {
        &mut self.desktops[self.current_desktop]
    }

    /// Applies `f` to the current desktop together with the connection,
    /// without the borrow checker treating the two as aliasing — `conn` and
    /// `desktops` are disjoint fields, but only when projected directly
    /// instead of through a whole-`self` method call.
    pub(crate) fn with_current<R>(&mut self, f: impl FnOnce(&X, &mut Desktop) -> R) -> R {
        let idx = self.current_desktop;
        f(&self.conn, &mut self.desktops[idx])
    }

    /// Recomputes geometry for every tileable client on the current desktop
    /// and hands the stacking/focus work to `focus::update_current`.
    pub fn relayout(&mut self) {
        let idx = self.current_desktop;
        let rects = layout::tile(&self.desktops[idx], self.screen_w, self.usable_height(), PANEL_HEIGHT, TOP_PANEL);
        for (w, rect) in rects {
            self.conn.move_resize(w, rect.into());
        }
        let target = self.desktops[idx].current;
        self.with_current(|conn, desktop| crate::focus::update_current(conn, desktop, target));
        self.publish_status();
    }

    pub fn publish_status(&self) {
        crate::status::publish(&self.desktops, self.current_desktop);
    }

    /// MapRequest handler (§4.5): skips override-redirect windows and
    /// already-managed ones, applies the first matching app rule, and
    /// otherwise attaches per the compile-time default.
    pub fn manage_window(&mut self, w: XId) {
        if self.conn.is_override_redirect(w) {
            return;
        }
        if self.desktops.iter().any(|d| d.get(w).is_some()) {
            self.conn.map_window(w);
            return;
        }

        let hint = self.conn.get_class_hint(w).unwrap_or_else(|| ClassHint { class: String::new(), instance: String::new() });
        let rule = matching_rule(&hint.class, &hint.instance);

        let target_desktop = match rule {
            Some(r) if r.desktop >= 0 => r.desktop as usize,
            _ => self.current_desktop,
        };
        let floating = rule.map_or(false, |r| r.floating);
        let follow = rule.map_or(false, |r| r.follow);
        let transient_for = self.conn.get_transient_for(w);
        let atoms = *self.conn.atoms();
        let wants_fullscreen = self.conn.get_net_wm_state(w).contains(&atoms.net_wm_state_fullscreen);

        let desktop = &mut self.desktops[target_desktop];
        desktop.add_window(w, crate::config::ATTACH_ASIDE);
        if let Some(c) = desktop.get_mut(w) {
            c.set_floating(floating);
            if transient_for.is_some() {
                c.set_transient(true);
            }
            if wants_fullscreen {
                c.set_fullscreen(true);
            }
        }

        self.conn.select_input_for_client(w);
        self.conn.grab_buttons(w, crate::config::CLICK_TO_FOCUS);
        debug!("managing window {:#x} on desktop {}", w, target_desktop);

        if follow && target_desktop != self.current_desktop {
            self.change_desktop(target_desktop);
        }
        // Only map if the client lands on the desktop now showing; otherwise
        // it stays hidden until that desktop is visited (§4.5), keeping
        // windows on other desktops off screen.
        if target_desktop == self.current_desktop {
            self.conn.map_window(w);
            self.desktops[self.current_desktop].current = Some(w);
            self.relayout();
        } else {
            self.publish_status();
        }
    }

    fn desktop_owning(&self, w: XId) -> Option<usize> {
        self.desktops.iter().position(|d| d.get(w).is_some())
    }

    /// DestroyNotify / UnmapNotify handler.
    pub fn unmanage_window(&mut self, w: XId) {
        let Some(idx) = self.desktop_owning(w) else { return };
        debug!("unmanaging window {:#x} from desktop {}", w, idx);
        let outcome = self.desktops[idx].remove(w);
        if idx == self.current_desktop {
            self.apply_remove_outcome(outcome);
            self.relayout();
        } else {
            self.publish_status();
        }
    }

    fn apply_remove_outcome(&mut self, outcome: RemoveOutcome) {
        match outcome {
            RemoveOutcome::Empty => self.with_current(|conn, d| crate::focus::update_current(conn, d, None)),
            RemoveOutcome::RefocusWith(candidate) => {
                self.with_current(|conn, d| crate::focus::update_current(conn, d, candidate))
            }
            RemoveOutcome::NoFocusChange => {}
        }
    }

    /// Anti-flicker switch (§4.5): the incoming desktop's windows are mapped
    /// — current first, so it's already on screen before its neighbors pop
    /// in — before the outgoing desktop's windows disappear, so there's
    /// never a moment with nothing mapped at all; the outgoing desktop's
    /// current window is unmapped last, after everything else is already
    /// gone, for the same reason in reverse.
    pub fn change_desktop(&mut self, idx: usize) {
        if idx >= self.desktops.len() || idx == self.current_desktop {
            return;
        }
        let outgoing = self.current_desktop;
        debug!("switching desktop {} -> {}", outgoing, idx);

        self.current_desktop = idx;
        let incoming_current = self.desktops[idx].current;
        for c in &self.desktops[idx].clients {
            if Some(c.window) == incoming_current {
                self.conn.map_window(c.window);
            }
        }
        for c in &self.desktops[idx].clients {
            if Some(c.window) != incoming_current {
                self.conn.map_window(c.window);
            }
        }

        self.current_desktop = outgoing;
        let outgoing_current = self.desktops[outgoing].current;
        for c in &self.desktops[outgoing].clients {
            if Some(c.window) != outgoing_current {
                self.conn.unmap_window(c.window);
            }
        }
        for c in &self.desktops[outgoing].clients {
            if Some(c.window) == outgoing_current {
                self.conn.unmap_window(c.window);
            }
        }

        self.last_desktop = outgoing;
        self.current_desktop = idx;
        self.relayout();
    }

    pub fn toggle_last_desktop(&mut self) {
        self.change_desktop(self.last_desktop);
    }

    /// Moves the current client to another desktop, following it there when
    /// `FOLLOW_WINDOW` is set (§9 supplement).
    pub fn client_to_desktop(&mut self, idx: usize) {
        if idx >= self.desktops.len() || idx == self.current_desktop {
            return;
        }
        let Some(w) = self.current().current else { return };
        let outcome = self.current_mut().remove(w);
        self.conn.unmap_window(w);
        self.desktops[idx].add_window(w, crate::config::ATTACH_ASIDE);

        self.apply_remove_outcome(outcome);

        if crate::config::FOLLOW_WINDOW {
            self.change_desktop(idx);
        } else {
            self.relayout();
        }
    }

    /// Jumps to the desktop holding the first urgent client, and focuses it.
    pub fn focus_urgent(&mut self) {
        let Some((idx, w)) = self.desktops.iter().enumerate().find_map(|(i, d)| {
            d.clients.iter().find(|c| c.is_urgent()).map(|c| (i, c.window))
        }) else {
            return;
        };
        if idx != self.current_desktop {
            self.change_desktop(idx);
        }
        self.with_current(|conn, d| crate::focus::update_current(conn, d, Some(w)));
        self.relayout();
    }

    pub fn next_window(&mut self) {
        let target = self.current().cyclic_neighbor(true);
        self.with_current(|conn, d| crate::focus::update_current(conn, d, target));
        self.publish_status();
    }

    pub fn prev_window(&mut self) {
        let target = self.current().cyclic_neighbor(false);
        self.with_current(|conn, d| crate::focus::update_current(conn, d, target));
        self.publish_status();
    }

    pub fn move_up(&mut self) {
        self.current_mut().move_current_up();
        self.relayout();
    }

    pub fn move_down(&mut self) {
        self.current_mut().move_current_down();
        self.relayout();
    }

    pub fn swap_master(&mut self) {
        self.current_mut().swap_master();
        self.relayout();
    }

    /// Switching to the mode already active is not a no-op: it clears every
    /// client's floating flag on this desktop, a quick way back to an
    /// all-tiled layout without a dedicated "reset" binding (§8 round-trip
    /// laws).
    pub fn switch_mode(&mut self, mode: Mode) {
        let desktop = self.current_mut();
        if desktop.mode == mode {
            for c in &mut desktop.clients {
                // Transient clients stay floating regardless (client.rs's
                // transient ⇒ floating invariant).
                if !c.is_transient() {
                    c.set_floating(false);
                }
            }
        } else {
            desktop.mode = mode;
        }
        self.relayout();
    }

    pub fn resize_master(&mut self, delta: f32) {
        self.current_mut().adjust_master_size(delta);
        self.relayout();
    }

    pub fn resize_growth(&mut self, delta: i32) {
        self.current_mut().adjust_growth(delta);
        self.relayout();
    }

    pub fn toggle_panel(&mut self) {
        let desktop = self.current_mut();
        desktop.show_panel = !desktop.show_panel;
        self.relayout();
    }

    pub fn toggle_floating(&mut self) {
        let Some(w) = self.current().current else { return };
        if let Some(c) = self.current_mut().get_mut(w) {
            let now = !c.is_floating();
            c.set_floating(now);
        }
        self.relayout();
    }

    /// Enters/leaves fullscreen for the current client, updating
    /// `_NET_WM_STATE` and snapping geometry to the full screen rect while
    /// active (§4.5, §6).
    pub fn toggle_fullscreen(&mut self) {
        let Some(w) = self.current().current else { return };
        let atoms = *self.conn.atoms();
        let now_fullscreen = {
            let c = self.current_mut().get_mut(w).unwrap();
            let now = !c.is_fullscreen();
            c.set_fullscreen(now);
            now
        };
        debug!("fullscreen {:#x} -> {}", w, now_fullscreen);
        if now_fullscreen {
            self.conn.set_net_wm_state(w, &[atoms.net_wm_state_fullscreen]);
            // (0, 0, ww, hh + panel_height) with hh the full screen height
            // (§8 S3: ww=1000, wh=600, panel=18 ⇒ fullscreen rect height 618).
            self.conn.move_resize(w, Rect::new(0, 0, self.screen_w, self.screen_h + PANEL_HEIGHT).into());
        } else {
            self.conn.set_net_wm_state(w, &[]);
        }
        self.relayout();
    }

    /// Politely asks a client to close via `WM_DELETE_WINDOW` when it
    /// advertises support; otherwise forces the connection closed. Either way
    /// the client record is dropped immediately rather than waiting on the
    /// DestroyNotify/UnmapNotify the close request will eventually produce
    /// (§4.5's literal "...then remove_client").
    pub fn kill_client(&mut self, w: XId) {
        let atoms = *self.conn.atoms();
        let supports_delete = self.conn.get_wm_protocols(w).contains(&atoms.wm_delete_window);
        if supports_delete {
            self.conn.send_client_message(
                w,
                atoms.wm_protocols,
                [atoms.wm_delete_window as i64, 0, 0, 0, 0],
            );
        } else {
            self.conn.kill_client(w);
        }
        self.unmanage_window(w);
    }

    /// Forks and execs a configured command (`Action::Spawn`), detaching it
    /// from the window manager's own process group so it survives restarts.
    pub fn spawn(&self, argv: &[&str]) {
        if argv.is_empty() {
            return;
        }
        unsafe {
            let pid = libc::fork();
            if pid == 0 {
                libc::setsid();
                let cmd = CString::new(argv[0]).unwrap();
                let c_args: Vec<CString> = argv.iter().map(|a| CString::new(*a).unwrap()).collect();
                let mut ptrs: Vec<*const std::os::raw::c_char> = c_args.iter().map(|a| a.as_ptr()).collect();
                ptrs.push(std::ptr::null());
                libc::execvp(cmd.as_ptr(), ptrs.as_ptr());
                libc::_exit(1);
            } else if pid < 0 {
                log::error!("fork failed while spawning {:?}", argv);
            }
        }
    }

    pub fn quit(&mut self, code: i32) {
        self.running = false;
        self.exit_code = code;
    }
}

/// Reaps terminated spawned children so they never become zombies. Installed
/// once at startup; `waitpid` with `WNOHANG` drains every child that has
/// already exited without blocking the event loop.
pub extern "C" fn reap_children(_sig: libc::c_int) {
    unsafe {
        loop {
            let pid = libc::waitpid(-1, std::ptr::null_mut(), libc::WNOHANG);
            if pid <= 0 {
                break;
            }
        }
    }
}

pub fn install_sigchld_handler() {
    unsafe {
        libc::signal(libc::SIGCHLD, reap_children as libc::sighandler_t);
    }
}
