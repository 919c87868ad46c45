//! Cargo-style status lines on stderr: `      Locked 12 entries in Verlock.lock`.

use std::io::Write;

use console::Style;

/// Width the label is right-aligned to.
const LABEL_WIDTH: usize = 12;

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>width$} {message}",
        style.apply_to(label),
        width = LABEL_WIDTH,
    );
}

/// An action that changed something (bold green label).
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Informational line where nothing changed (bold cyan label).
pub fn status_info(label: &str, message: &str) {
    print_status(Style::new().cyan().bold(), label, message);
}

/// Something the user should look at that does not fail the run.
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}
