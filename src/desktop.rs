//! Client & Desktop Model — the per-desktop client list and the process-wide
//! view onto "the current desktop" (`spec.md` §3, §4.1).

use crate::client::Client;
use crate::xconn::XId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Tile,
    Monocle,
    Bstack,
    Grid,
    Float,
}

/// One virtual workspace. `clients[0]` is `head`; `clients` preserves the
/// singly-linked insertion order described in §3 — a `Vec` gives us that
/// ordering plus O(1) head/tail access without hand-rolled list surgery
/// (see `spec.md` §9's "a target-language implementation may equivalently
/// use a small index-based ring").
#[derive(Debug, Clone)]
pub struct Desktop {
    pub mode: Mode,
    pub master_size: f32,
    pub growth: i32,
    pub clients: Vec<Client>,
    /// Non-owning reference into `clients`, by window id.
    pub current: Option<XId>,
    /// Non-owning reference into `clients`, by window id.
    pub prev_focus: Option<XId>,
    pub show_panel: bool,
}

const MASTER_SIZE_MIN: f32 = 0.05;
const MASTER_SIZE_MAX: f32 = 0.95;

impl Desktop {
    pub fn new(mode: Mode, master_size: f32, show_panel: bool) -> Self {
        Desktop {
            mode,
            master_size,
            growth: 0,
            clients: Vec::new(),
            current: None,
            prev_focus: None,
            show_panel,
        }
    }

    pub fn head(&self) -> Option<XId> {
        self.clients.first().map(|c| c.window)
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn index_of(&self, w: XId) -> Option<usize> {
        self.clients.iter().position(|c| c.window == w)
    }

    pub fn get(&self, w: XId) -> Option<&Client> {
        self.clients.iter().find(|c| c.window == w)
    }

    pub fn get_mut(&mut self, w: XId) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.window == w)
    }

    pub fn current_client(&self) -> Option<&Client> {
        self.current.and_then(|w| self.get(w))
    }

    /// The O(n) "previous client of c" scan described in §3's Ordering
    /// convention: lists are short, so this is preferred over back-pointers.
    pub fn previous_of(&self, w: XId) -> Option<XId> {
        let idx = self.index_of(w)?;
        if idx == 0 {
            None
        } else {
            Some(self.clients[idx - 1].window)
        }
    }

    pub fn any_urgent(&self) -> bool {
        self.clients.iter().any(|c| c.is_urgent())
    }

    /// Inserts a new client for `w`, at head unless `attach_aside`, in which
    /// case it is appended at tail. Returns the new client's window id for
    /// convenience (it is always `w`).
    pub fn add_window(&mut self, w: XId, attach_aside: bool) -> XId {
        let client = Client::new(w);
        if attach_aside {
            self.clients.push(client);
        } else {
            self.clients.insert(0, client);
        }
        w
    }

    /// Unlinks `w` from this desktop's list, repointing `prev_focus` first
    /// per §4.1's ownership rule: "current and prev_focus are non-owning
    /// pointers... repoint them before freeing in remove_client."
    ///
    /// Returns the appropriate candidate to pass to `update_current`: the
    /// caller is responsible for invoking the focus manager if this returns
    /// `Some`-or-`None`-meaning-empty per §4.1.
    pub fn remove(&mut self, w: XId) -> RemoveOutcome {
        let was_current = self.current == Some(w);
        if self.prev_focus == Some(w) {
            self.prev_focus = self.previous_of(self.current.unwrap_or(w));
        }
        if let Some(idx) = self.index_of(w) {
            self.clients.remove(idx);
        }

        if self.clients.is_empty() {
            self.current = None;
            self.prev_focus = None;
            return RemoveOutcome::Empty;
        }

        if was_current || self.clients.len() <= 1 {
            let candidate = self.prev_focus;
            return RemoveOutcome::RefocusWith(candidate);
        }

        RemoveOutcome::NoFocusChange
    }

    /// Clamped per §4.2: "master_size is clamped to (0.05, 0.95); attempts
    /// to push it outside are silently rejected."
    pub fn adjust_master_size(&mut self, delta: f32) {
        let next = self.master_size + delta;
        if next > MASTER_SIZE_MIN && next < MASTER_SIZE_MAX {
            self.master_size = next;
        }
    }

    pub fn adjust_growth(&mut self, delta: i32) {
        self.growth += delta;
    }

    /// move_up: swap the current client with its predecessor, wrapping from
    /// head to tail (§4.5 "Movement operations").
    pub fn move_current_up(&mut self) {
        let Some(w) = self.current else { return };
        let Some(idx) = self.index_of(w) else { return };
        if self.clients.len() < 2 {
            return;
        }
        let prev = if idx == 0 { self.clients.len() - 1 } else { idx - 1 };
        self.clients.swap(idx, prev);
    }

    /// move_down: swap the current client with its successor, wrapping from
    /// tail to head.
    pub fn move_current_down(&mut self) {
        let Some(w) = self.current else { return };
        let Some(idx) = self.index_of(w) else { return };
        if self.clients.len() < 2 {
            return;
        }
        let next = if idx + 1 == self.clients.len() { 0 } else { idx + 1 };
        self.clients.swap(idx, next);
    }

    /// swap_master: promote the current client to head. If it is already
    /// head, instead demote it one slot (§4.5).
    pub fn swap_master(&mut self) {
        let Some(w) = self.current else { return };
        let Some(idx) = self.index_of(w) else { return };
        if self.clients.len() < 2 {
            return;
        }
        if idx == 0 {
            self.clients.swap(0, 1);
        } else {
            let client = self.clients.remove(idx);
            self.clients.insert(0, client);
        }
    }

    /// next_win/prev_win: cyclic neighbor of the current client, for the
    /// focus manager to hand to `update_current`.
    pub fn cyclic_neighbor(&self, forward: bool) -> Option<XId> {
        let w = self.current?;
        let idx = self.index_of(w)?;
        if self.clients.is_empty() {
            return None;
        }
        let len = self.clients.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Some(self.clients[next].window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The desktop is now empty; caller must clear focus globally.
    Empty,
    /// The removed client was current, or only one client remains; caller
    /// must call `update_current` with this candidate (itself may be `None`,
    /// meaning "fall back to head").
    RefocusWith(Option<XId>),
    /// Removed client was neither current nor prev_focus and the list still
    /// has more than one member; no focus change needed.
    NoFocusChange,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop_with(n: usize) -> Desktop {
        let mut d = Desktop::new(Mode::Tile, 0.55, true);
        for i in 0..n {
            d.add_window(i as XId, true);
        }
        d.current = d.head();
        d
    }

    #[test]
    fn add_window_head_vs_tail() {
        let mut d = Desktop::new(Mode::Tile, 0.55, true);
        d.add_window(1, false);
        d.add_window(2, false);
        // attach at head: newest first.
        assert_eq!(d.clients.iter().map(|c| c.window).collect::<Vec<_>>(), vec![2, 1]);

        let mut d2 = Desktop::new(Mode::Tile, 0.55, true);
        d2.add_window(1, true);
        d2.add_window(2, true);
        assert_eq!(d2.clients.iter().map(|c| c.window).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn move_up_then_down_is_identity() {
        let mut d = desktop_with(3);
        let before: Vec<XId> = d.clients.iter().map(|c| c.window).collect();
        d.current = Some(1);
        d.move_current_up();
        d.move_current_down();
        let after: Vec<XId> = d.clients.iter().map(|c| c.window).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn move_up_from_head_wraps_to_tail() {
        let mut d = desktop_with(3);
        d.current = Some(0);
        d.move_current_up();
        assert_eq!(d.clients.iter().map(|c| c.window).collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn remove_current_reports_prev_focus_candidate() {
        let mut d = desktop_with(3);
        // A(0) head, B(1) current, C(2). prev_focus = A.
        d.current = Some(1);
        d.prev_focus = Some(0);
        let outcome = d.remove(1);
        assert_eq!(outcome, RemoveOutcome::RefocusWith(Some(0)));
        assert_eq!(d.clients.iter().map(|c| c.window).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn remove_last_client_reports_empty() {
        let mut d = desktop_with(1);
        d.current = d.head();
        let outcome = d.remove(0);
        assert_eq!(outcome, RemoveOutcome::Empty);
        assert!(d.current.is_none());
        assert!(d.prev_focus.is_none());
    }

    #[test]
    fn master_size_clamped() {
        let mut d = Desktop::new(Mode::Tile, 0.90, true);
        d.adjust_master_size(0.10);
        assert_eq!(d.master_size, 0.90, "push past 0.95 must be rejected");
        d.adjust_master_size(-0.95);
        assert_eq!(d.master_size, 0.90, "push below 0.05 must be rejected");
    }

    #[test]
    fn previous_of_head_is_none() {
        let d = desktop_with(3);
        assert_eq!(d.previous_of(0), None);
        assert_eq!(d.previous_of(1), Some(0));
    }
}
