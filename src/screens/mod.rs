//! Screen controllers for the application.
//!
//! Each screen implements the [`Screen`] trait and owns its local UI state.
//! The app keeps one instance of each and routes to the one matching the
//! controller's current [`ScreenId`](crate::state::ScreenId).
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                       App                          │
//! │  match controller.screen() {                       │
//! │    Upload     => upload.handle_event(...)          │
//! │    Processing => processing.handle_event(...)      │
//! │    Editor     => editor.handle_event(...)          │
//! │  }                                                 │
//! │                                                    │
//! │  ScreenAction ──► ControllerEvent ──► dispatch()   │
//! └────────────────────────────────────────────────────┘
//! ```

pub mod editor;
pub mod processing;
pub mod screen_trait;
pub mod upload;

pub use editor::EditorScreen;
pub use processing::ProcessingScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
pub use upload::{resolve_video, UploadScreen};
