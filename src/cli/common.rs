//! Output helpers shared by the headless commands.

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}

/// Print a progress line to stderr so stdout stays machine readable.
pub fn print_progress(msg: &str) {
    eprintln!("\u{2026} {}", msg);
}
