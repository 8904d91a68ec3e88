// Shared building blocks drawn by every screen

pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod message_box;

pub use footer::Footer;
pub use header::{Header, NEW_UPLOAD_LABEL};
pub use help_overlay::HelpOverlay;
pub use message_box::MessageBox;
