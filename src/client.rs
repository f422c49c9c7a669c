//! Client & Desktop Model — the per-client half. See `desktop.rs` for the
//! per-desktop list that owns these.

use crate::xconn::XId;
use bitflags::bitflags;

bitflags! {
    /// The four independent client flags from `spec.md` §3. `ISFFT` below is
    /// the orthogonal-to-tiling predicate the layout engine filters on.
    pub struct ClientState: u8 {
        const NONE       = 0;
        const URGENT     = 1 << 0;
        const TRANSIENT  = 1 << 1;
        const FULLSCREEN = 1 << 2;
        const FLOATING   = 1 << 3;
    }
}

/// Fullscreen-or-floating-or-transient: clients the layout engine skips.
fn isfft() -> ClientState {
    ClientState::FULLSCREEN | ClientState::FLOATING | ClientState::TRANSIENT
}

#[derive(Debug, Clone)]
pub struct Client {
    pub window: XId,
    pub state: ClientState,
}

impl Client {
    pub fn new(window: XId) -> Self {
        Client {
            window,
            state: ClientState::NONE,
        }
    }

    pub fn is_urgent(&self) -> bool {
        self.state.contains(ClientState::URGENT)
    }

    pub fn is_transient(&self) -> bool {
        self.state.contains(ClientState::TRANSIENT)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.contains(ClientState::FULLSCREEN)
    }

    pub fn is_floating(&self) -> bool {
        self.state.contains(ClientState::FLOATING)
    }

    /// c.transient ⇒ c.floating (spec.md §3 invariant).
    pub fn set_transient(&mut self, transient: bool) {
        if transient {
            self.state.insert(ClientState::TRANSIENT);
            self.state.insert(ClientState::FLOATING);
        } else {
            self.state.remove(ClientState::TRANSIENT);
        }
    }

    pub fn set_floating(&mut self, floating: bool) {
        self.state.set(ClientState::FLOATING, floating);
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.state.set(ClientState::FULLSCREEN, fullscreen);
    }

    pub fn set_urgent(&mut self, urgent: bool) {
        self.state.set(ClientState::URGENT, urgent);
    }

    /// True when the layout engine should skip this client and leave its
    /// user-placed geometry alone.
    pub fn is_isfft(&self) -> bool {
        self.state.intersects(isfft())
    }

    /// Tileable: neither fullscreen, floating, nor transient.
    pub fn is_tileable(&self) -> bool {
        !self.is_isfft()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_forces_floating() {
        let mut c = Client::new(1);
        c.set_transient(true);
        assert!(c.is_floating());
        assert!(c.is_transient());
    }

    #[test]
    fn clearing_transient_leaves_floating_alone() {
        let mut c = Client::new(1);
        c.set_transient(true);
        c.set_transient(false);
        assert!(!c.is_transient());
        assert!(c.is_floating(), "floating was forced, not reverted, by transient");
    }

    #[test]
    fn isfft_matches_individual_flags() {
        let mut c = Client::new(1);
        assert!(c.is_tileable());
        c.set_floating(true);
        assert!(!c.is_tileable());
        c.set_floating(false);
        c.set_fullscreen(true);
        assert!(!c.is_tileable());
    }
}
