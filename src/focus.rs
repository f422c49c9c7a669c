//! Focus & Stacking Manager (`spec.md` §4.4): decides which client is
//! "current", repaints borders, raises/lowers windows into the right Z-order
//! and tells the display which window holds input focus.

use crate::config::{BORDER_WIDTH, CLICK_TO_FOCUS};
use crate::desktop::{Desktop, Mode};
use crate::xconn::{XConn, XId};

/// Sets `desktop.current` to `target`, repaints every client's border,
/// restacks in Z-order and moves input focus (§4.4). Three cases: an empty
/// desktop clears focus outright; targeting `prev_focus` rotates (current
/// becomes the old `prev_focus`, or `head` if that was null, and the new
/// `prev_focus` becomes the list-previous of the new current); otherwise the
/// usual current/prev_focus shift. Targeting the already-current client is
/// idempotent — no field changes, but borders/stacking/focus are still
/// reasserted.
pub fn update_current<X: XConn>(conn: &X, desktop: &mut Desktop, target: Option<XId>) {
    if desktop.is_empty() {
        desktop.current = None;
        desktop.prev_focus = None;
    } else if target == desktop.prev_focus {
        let new_current = target.or_else(|| desktop.head());
        desktop.prev_focus = new_current.and_then(|w| desktop.previous_of(w));
        desktop.current = new_current;
    } else if target != desktop.current {
        desktop.prev_focus = desktop.current;
        desktop.current = target;
    }

    paint_borders(conn, desktop);
    if CLICK_TO_FOCUS {
        update_click_grabs(conn, desktop);
    }
    conn.restack(&stacking_order(desktop));

    match desktop.current {
        Some(w) => {
            conn.set_input_focus(w);
            conn.set_active_window(Some(w));
            if let Some(c) = desktop.get_mut(w) {
                c.set_urgent(false);
            }
        }
        None => {
            conn.set_input_focus(conn.root());
            conn.set_active_window(None);
        }
    }
    conn.flush();
}

/// Border policy: no border at all when there's nothing to distinguish it
/// from (a single client, a fullscreen client, or a tiled client under
/// monocle where only the current one is visible); otherwise the usual
/// focus/unfocus color pair.
fn paint_borders<X: XConn>(conn: &X, desktop: &Desktop) {
    let borderless_monocle = matches!(desktop.mode, Mode::Monocle);
    for c in &desktop.clients {
        let skip_border = c.is_fullscreen()
            || desktop.clients.len() == 1
            || (borderless_monocle && c.is_tileable());
        if skip_border {
            conn.set_border_width(c.window, 0);
        } else {
            conn.set_border_width(c.window, BORDER_WIDTH);
            conn.set_border_color(c.window, desktop.current == Some(c.window));
        }
    }
}

/// Button1 is grabbed on every non-current client and released on the
/// current, so clicking an unfocused window focuses it without the click
/// reaching the application (§4.4).
fn update_click_grabs<X: XConn>(conn: &X, desktop: &Desktop) {
    for c in &desktop.clients {
        if Some(c.window) == desktop.current {
            conn.ungrab_buttons(c.window);
        } else {
            conn.grab_buttons(c.window, true);
        }
    }
}

/// Builds the Z-order top-to-bottom, the order `XRestackWindows` expects —
/// the literal six-item list in §4.4: (1) current if floating/transient,
/// (2) other floating/transient, (3) current if tiled, (4) current if
/// fullscreen, (5) other fullscreen, (6) remaining tiled. Items 3 and 4 are
/// mutually exclusive for any one client (tiled and fullscreen can't both
/// hold), so their relative order only ever matters in the sense that
/// whichever applies to `current` sits directly below the floating group.
fn stacking_order(desktop: &Desktop) -> Vec<XId> {
    let current = desktop.current;
    let mut order = Vec::with_capacity(desktop.clients.len());

    let is_plain_floaty = |w: XId| {
        desktop.get(w).map_or(false, |c| (c.is_floating() || c.is_transient()) && !c.is_fullscreen())
    };
    let is_tiled = |w: XId| desktop.get(w).map_or(false, |c| c.is_tileable());
    let is_fullscreen = |w: XId| desktop.get(w).map_or(false, |c| c.is_fullscreen());

    if let Some(w) = current {
        if is_plain_floaty(w) {
            order.push(w);
        }
    }
    for c in &desktop.clients {
        if is_plain_floaty(c.window) && Some(c.window) != current {
            order.push(c.window);
        }
    }
    if let Some(w) = current {
        if is_tiled(w) {
            order.push(w);
        }
    }
    if let Some(w) = current {
        if is_fullscreen(w) {
            order.push(w);
        }
    }
    for c in &desktop.clients {
        if is_fullscreen(c.window) && Some(c.window) != current {
            order.push(c.window);
        }
    }
    for c in &desktop.clients {
        if is_tiled(c.window) && Some(c.window) != current {
            order.push(c.window);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x11conn::MockConn;

    fn desktop_with(n: usize) -> Desktop {
        let mut d = Desktop::new(Mode::Tile, 0.55, true);
        for i in 0..n {
            d.add_window(i as XId, true);
        }
        d
    }

    #[test]
    fn update_current_falls_back_to_head_when_none() {
        let conn = MockConn::new();
        let mut d = desktop_with(3);
        update_current(&conn, &mut d, None);
        assert_eq!(d.current, Some(0));
        assert_eq!(*conn.focus_calls.borrow(), vec![0]);
        assert_eq!(*conn.active_window.borrow(), Some(0));
    }

    #[test]
    fn update_current_clears_urgent_on_the_newly_focused_client() {
        let conn = MockConn::new();
        let mut d = desktop_with(2);
        d.get_mut(1).unwrap().set_urgent(true);
        update_current(&conn, &mut d, Some(1));
        assert!(!d.get(1).unwrap().is_urgent());
    }

    #[test]
    fn update_current_with_no_clients_unsets_focus() {
        let conn = MockConn::new();
        let mut d = Desktop::new(Mode::Tile, 0.55, true);
        update_current(&conn, &mut d, None);
        assert_eq!(d.current, None);
        assert_eq!(*conn.active_window.borrow(), None);
    }

    #[test]
    fn single_client_gets_no_border() {
        let conn = MockConn::new();
        let mut d = desktop_with(1);
        update_current(&conn, &mut d, Some(0));
        assert_eq!(conn.border_widths.borrow().get(&0), Some(&0));
    }

    #[test]
    fn multi_client_tile_gets_border() {
        let conn = MockConn::new();
        let mut d = desktop_with(2);
        update_current(&conn, &mut d, Some(0));
        assert_eq!(conn.border_widths.borrow().get(&0), Some(&BORDER_WIDTH));
        assert_eq!(conn.border_focused.borrow().get(&0), Some(&true));
        assert_eq!(conn.border_focused.borrow().get(&1), Some(&false));
    }

    #[test]
    fn monocle_tiled_clients_get_no_border() {
        let conn = MockConn::new();
        let mut d = desktop_with(2);
        d.mode = Mode::Monocle;
        update_current(&conn, &mut d, Some(0));
        assert_eq!(conn.border_widths.borrow().get(&0), Some(&0));
        assert_eq!(conn.border_widths.borrow().get(&1), Some(&0));
    }

    #[test]
    fn stacking_order_puts_current_tiled_last_among_tiled() {
        let mut d = desktop_with(3);
        d.current = Some(1);
        let order = stacking_order(&d);
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn update_current_grabs_clicks_on_unfocused_clients_and_ungrabs_the_current() {
        let conn = MockConn::new();
        let mut d = desktop_with(3);
        update_current(&conn, &mut d, Some(1));
        let grabbed = conn.click_grabbed.borrow();
        assert!(!grabbed.contains(&1));
        assert!(grabbed.contains(&0));
        assert!(grabbed.contains(&2));
    }

    #[test]
    fn stacking_order_floats_ride_above_tiled_and_current_float_is_first() {
        let mut d = desktop_with(3);
        d.get_mut(2).unwrap().set_floating(true);
        d.current = Some(2);
        let order = stacking_order(&d);
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn stacking_order_puts_current_fullscreen_above_every_tiled_client() {
        let mut d = desktop_with(3);
        d.get_mut(0).unwrap().set_fullscreen(true);
        d.current = Some(0);
        let order = stacking_order(&d);
        assert_eq!(order, vec![0, 1, 2]);
    }
}
