//! Status Publisher (`spec.md` §4.7): a one-line-per-desktop summary emitted
//! to stdout after every state change, for a bar like dwm's `dwmblocks` or a
//! polybar module to consume.

use std::io::Write;

use crate::desktop::{Desktop, Mode};

fn mode_letter(mode: Mode) -> char {
    match mode {
        Mode::Tile => 'T',
        Mode::Monocle => 'M',
        Mode::Bstack => 'B',
        Mode::Grid => 'G',
        Mode::Float => 'F',
    }
}

/// Formats one desktop's status field: `idx:client_count:mode:is_current:has_urgent`.
pub fn format_desktop(idx: usize, desktop: &Desktop, is_current: bool) -> String {
    format!(
        "{}:{}:{}:{}:{}",
        idx,
        desktop.clients.len(),
        mode_letter(desktop.mode),
        is_current as u8,
        desktop.any_urgent() as u8,
    )
}

/// Joins every desktop's field into the full status line, space-separated in
/// desktop order.
pub fn format_line(desktops: &[Desktop], current_desktop: usize) -> String {
    desktops
        .iter()
        .enumerate()
        .map(|(i, d)| format_desktop(i, d, i == current_desktop))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the line to stdout and flushes immediately, so a piped status bar
/// sees every update without buffering delay.
pub fn publish(desktops: &[Desktop], current_desktop: usize) {
    let line = format_line(desktops, current_desktop);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if writeln!(handle, "{line}").is_ok() {
        let _ = handle.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_desktop_reports_all_five_fields() {
        let mut d = Desktop::new(Mode::Grid, 0.55, true);
        d.add_window(1, true);
        d.add_window(2, true);
        assert_eq!(format_desktop(2, &d, true), "2:2:G:1:0");
    }

    #[test]
    fn format_desktop_reports_urgency() {
        let mut d = Desktop::new(Mode::Tile, 0.55, true);
        d.add_window(1, true);
        d.get_mut(1).unwrap().set_urgent(true);
        assert_eq!(format_desktop(0, &d, false), "0:1:T:0:1");
    }

    #[test]
    fn format_line_joins_every_desktop_in_order() {
        let desktops = vec![
            Desktop::new(Mode::Tile, 0.55, true),
            Desktop::new(Mode::Monocle, 0.55, true),
        ];
        assert_eq!(format_line(&desktops, 1), "0:0:T:0:0 1:0:M:1:0");
    }
}
