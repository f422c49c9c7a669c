//! Drag Session — the modal move/resize loop driven by pointer motion
//! (`spec.md` §4.6). Implemented as a self-contained nested event pump
//! (the spec's literal "nested event pump" framing); because Rust's call
//! stack supports ordinary re-entrant function calls, this needs none of
//! the `IDLE/DRAG_MOVE/DRAG_RESIZE` state-machine indirection §9 suggests
//! for languages without a re-entrant event loop — the snapshot fields live
//! as local variables for the duration of one call instead of as
//! long-lived struct fields.

use crate::config::MINWSZ;
use crate::geometry::Rect;
use crate::xconn::{XConn, XEventKind, XId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize,
}

/// What the caller must do in response to events that arrive mid-drag but
/// aren't part of the drag itself — new windows mapping, or existing ones
/// requesting a reconfigure, must still be handled so the session doesn't
/// freeze the rest of the desktop (§4.6 step 5).
pub enum DragSideEffect {
    MapRequest(XId),
    ConfigureRequest {
        window: XId,
        geometry: crate::xconn::WindowGeometry,
        border_width: u32,
        value_mask: u64,
    },
}

/// Runs one drag session to completion. `start_geometry` is the client's
/// geometry snapshot at drag start. Returns the final geometry to apply (the
/// caller has already been streaming intermediate geometries via
/// `on_motion`) plus any side-effect events observed along the way, which
/// the caller replays through its regular handlers once the drag ends.
pub fn run<X: XConn>(
    conn: &X,
    window: XId,
    kind: DragKind,
    start_geometry: Rect,
) -> (Rect, Vec<DragSideEffect>) {
    let (start_x, start_y) = conn.query_pointer_root();

    if kind == DragKind::Resize {
        // Warp the pointer to the bottom-right corner so subsequent motion
        // deltas are anchored there (§4.6 step 2).
        conn.warp_pointer(window, start_geometry.w, start_geometry.h);
    }

    conn.grab_pointer_for_drag();

    let mut geometry = start_geometry;
    let mut side_effects = Vec::new();

    loop {
        match conn.next_event() {
            XEventKind::MotionNotify { root_x, root_y } => {
                let dx = root_x - start_x;
                let dy = root_y - start_y;
                geometry = match kind {
                    DragKind::Move => Rect::new(start_geometry.x + dx, start_geometry.y + dy, geometry.w, geometry.h),
                    DragKind::Resize => Rect::new(
                        geometry.x,
                        geometry.y,
                        (start_geometry.w + dx).max(MINWSZ),
                        (start_geometry.h + dy).max(MINWSZ),
                    ),
                };
                conn.move_resize(window, geometry.into());
            }
            XEventKind::ConfigureRequest { window: w, geometry: g, border_width, value_mask } => {
                side_effects.push(DragSideEffect::ConfigureRequest {
                    window: w,
                    geometry: g,
                    border_width,
                    value_mask,
                });
            }
            XEventKind::MapRequest { window: w } => {
                side_effects.push(DragSideEffect::MapRequest(w));
            }
            XEventKind::ButtonRelease => break,
            _ => {}
        }
    }

    conn.ungrab_pointer();
    (geometry, side_effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x11conn::MockConn;

    #[test]
    fn move_applies_pointer_delta_to_position() {
        let conn = MockConn::new();
        conn.push_pointer(100, 100);
        conn.queue_events(vec![
            XEventKind::MotionNotify { root_x: 110, root_y: 90 },
            XEventKind::ButtonRelease,
        ]);
        let start = Rect::new(10, 10, 200, 100);
        let (end, effects) = run(&conn, 1, DragKind::Move, start);
        assert_eq!(end, Rect::new(20, 0, 200, 100));
        assert!(effects.is_empty());
    }

    #[test]
    fn resize_respects_minimum_size() {
        let conn = MockConn::new();
        conn.push_pointer(100, 100);
        conn.queue_events(vec![
            XEventKind::MotionNotify { root_x: 100 - 400, root_y: 100 - 400 },
            XEventKind::ButtonRelease,
        ]);
        let start = Rect::new(0, 0, 200, 100);
        let (end, _) = run(&conn, 1, DragKind::Resize, start);
        assert_eq!(end.w, MINWSZ);
        assert_eq!(end.h, MINWSZ);
    }

    #[test]
    fn side_effect_events_are_forwarded_not_dropped() {
        let conn = MockConn::new();
        conn.push_pointer(0, 0);
        conn.queue_events(vec![
            XEventKind::MapRequest { window: 42 },
            XEventKind::ButtonRelease,
        ]);
        let (_, effects) = run(&conn, 1, DragKind::Move, Rect::new(0, 0, 100, 100));
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], DragSideEffect::MapRequest(42)));
    }
}
