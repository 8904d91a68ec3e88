//! The screen controller: a three-state machine plus a subscriber list.

use super::{
    ControllerEvent, ScreenId, ScreenView, Transition, TranscriptionResult, VideoFile, VideoRef,
};
use std::fmt;
use tracing::{debug, info, warn};

/// Handle returned by [`ScreenController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ScreenController, Transition)>;

/// Per-screen data. Using one enum for the phase keeps the video and
/// transcription tied to the screens that may hold them.
#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Upload,
    Processing {
        video: VideoRef,
        status: String,
    },
    Editor {
        video: VideoRef,
        transcription: TranscriptionResult,
    },
}

/// Owns the active screen and the data handed from one screen to the next.
///
/// The three `handle_*` methods and [`set_processing_status`] are the only
/// mutators. Each applied change notifies subscribers once, after the new
/// state is fully in place.
///
/// [`set_processing_status`]: ScreenController::set_processing_status
pub struct ScreenController {
    phase: Phase,
    /// Bumped on every accepted upload so late processing results can be
    /// matched against the session they were started for.
    session: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for ScreenController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenController")
            .field("phase", &self.phase)
            .field("session", &self.session)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Upload,
            session: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The active screen.
    pub fn screen(&self) -> ScreenId {
        match self.phase {
            Phase::Upload => ScreenId::Upload,
            Phase::Processing { .. } => ScreenId::Processing,
            Phase::Editor { .. } => ScreenId::Editor,
        }
    }

    /// The uploaded video, set exactly while in Processing or Editor.
    pub fn video(&self) -> Option<&VideoRef> {
        match &self.phase {
            Phase::Upload => None,
            Phase::Processing { video, .. } | Phase::Editor { video, .. } => Some(video),
        }
    }

    /// The transcription, set only while in Editor.
    pub fn transcription(&self) -> Option<&TranscriptionResult> {
        match &self.phase {
            Phase::Editor { transcription, .. } => Some(transcription),
            _ => None,
        }
    }

    /// Current processing status text. Empty outside of Processing.
    pub fn processing_status(&self) -> &str {
        match &self.phase {
            Phase::Processing { status, .. } => status,
            _ => "",
        }
    }

    /// Session counter of the current upload.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Whether the header shows the "New Upload" control.
    pub fn shows_reset_control(&self) -> bool {
        self.screen() != ScreenId::Upload
    }

    /// Project the state into what the active screen receives.
    pub fn view(&self) -> ScreenView<'_> {
        match &self.phase {
            Phase::Upload => ScreenView::Upload,
            Phase::Processing { video, status } => ScreenView::Processing {
                url: &video.url,
                status,
            },
            Phase::Editor {
                video,
                transcription,
            } => ScreenView::Editor {
                file: &video.file,
                url: &video.url,
                transcription,
            },
        }
    }

    /// Route an event to the matching handler.
    pub fn dispatch(&mut self, event: ControllerEvent) -> Transition {
        debug!(event = event.name(), screen = ?self.screen(), "Dispatching");
        match event {
            ControllerEvent::VideoUploaded(video) => {
                self.handle_video_upload(video.file, video.url)
            }
            ControllerEvent::StatusUpdated(status) => self.set_processing_status(status),
            ControllerEvent::TranscriptionComplete(data) => {
                self.handle_transcription_complete(data)
            }
            ControllerEvent::BackToUpload => self.handle_back_to_upload(),
        }
    }

    /// Store the uploaded video and move to Processing.
    ///
    /// Only valid from Upload; anything else is ignored.
    pub fn handle_video_upload(&mut self, file: VideoFile, url: String) -> Transition {
        if !matches!(self.phase, Phase::Upload) {
            return self.ignore("video_uploaded");
        }

        self.session += 1;
        info!(session = self.session, file = ?file.path, url = %url, "Video uploaded");
        self.phase = Phase::Processing {
            video: VideoRef::new(file, url),
            status: String::new(),
        };
        self.commit(Transition::Moved {
            from: ScreenId::Upload,
            to: ScreenId::Processing,
        })
    }

    /// Store the transcription and move to Editor, keeping the video.
    ///
    /// Only valid from Processing; anything else is ignored.
    pub fn handle_transcription_complete(&mut self, data: TranscriptionResult) -> Transition {
        let video = match std::mem::take(&mut self.phase) {
            Phase::Processing { video, .. } => video,
            other => {
                self.phase = other;
                return self.ignore("transcription_complete");
            }
        };
        info!(session = self.session, "Transcription complete");
        self.phase = Phase::Editor {
            video,
            transcription: data,
        };
        self.commit(Transition::Moved {
            from: ScreenId::Processing,
            to: ScreenId::Editor,
        })
    }

    /// Discard the session and return to the initial Upload state.
    ///
    /// Always available. From Upload this is a no-op.
    pub fn handle_back_to_upload(&mut self) -> Transition {
        let from = self.screen();
        if from == ScreenId::Upload {
            debug!("Reset requested while already on upload");
            return Transition::Unchanged;
        }

        info!(session = self.session, from = ?from, "Back to upload");
        self.phase = Phase::Upload;
        self.commit(Transition::Moved {
            from,
            to: ScreenId::Upload,
        })
    }

    /// Replace the processing status text.
    ///
    /// Only accepted while in Processing.
    pub fn set_processing_status(&mut self, text: String) -> Transition {
        let Phase::Processing { status, .. } = &mut self.phase else {
            return self.ignore("status_updated");
        };
        if *status == text {
            return Transition::Unchanged;
        }

        debug!(status = %text, "Processing status");
        *status = text;
        self.commit(Transition::StatusUpdated)
    }

    /// Register a listener called after every applied change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ScreenController, Transition) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < len_before
    }

    fn ignore(&self, event: &'static str) -> Transition {
        let screen = self.screen();
        warn!(event, screen = ?screen, "Ignoring event not valid for the current screen");
        Transition::Ignored { event, screen }
    }

    fn commit(&mut self, transition: Transition) -> Transition {
        // Listeners only get shared access, so none can be added while we
        // iterate over the taken list.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(self, transition);
        }
        self.listeners = listeners;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn video(name: &str, url: &str) -> VideoRef {
        VideoRef::new(VideoFile::new(name, 0), url)
    }

    fn in_processing() -> ScreenController {
        let mut controller = ScreenController::new();
        let v = video("a.mp4", "blob:1");
        controller.handle_video_upload(v.file, v.url);
        controller
    }

    fn in_editor() -> ScreenController {
        let mut controller = in_processing();
        controller.handle_transcription_complete(json!({"segments": []}).into());
        controller
    }

    fn assert_initial(controller: &ScreenController) {
        assert_eq!(controller.screen(), ScreenId::Upload);
        assert!(controller.video().is_none());
        assert!(controller.transcription().is_none());
        assert_eq!(controller.processing_status(), "");
        assert_eq!(controller.view(), ScreenView::Upload);
    }

    #[test]
    fn test_initial_state() {
        assert_initial(&ScreenController::new());
    }

    #[test]
    fn test_upload_moves_to_processing() {
        let mut controller = ScreenController::new();
        let v = video("a.mp4", "blob:1");
        let transition = controller.handle_video_upload(v.file.clone(), v.url.clone());

        assert_eq!(
            transition,
            Transition::Moved {
                from: ScreenId::Upload,
                to: ScreenId::Processing
            }
        );
        assert_eq!(controller.screen(), ScreenId::Processing);
        assert_eq!(controller.video(), Some(&v));
        assert!(controller.transcription().is_none());
        assert_eq!(
            controller.view(),
            ScreenView::Processing {
                url: "blob:1",
                status: ""
            }
        );
    }

    #[test]
    fn test_transcription_complete_moves_to_editor() {
        let mut controller = in_processing();
        let before = controller.video().cloned();
        let data: TranscriptionResult =
            json!({"segments": [{"start": 0.0, "end": 1.0, "text": "hi"}]}).into();

        controller.handle_transcription_complete(data.clone());

        assert_eq!(controller.screen(), ScreenId::Editor);
        assert_eq!(controller.video().cloned(), before);
        assert_eq!(controller.transcription(), Some(&data));
    }

    #[test]
    fn test_reset_from_every_screen_restores_initial_state() {
        for mut controller in [ScreenController::new(), in_processing(), in_editor()] {
            controller.handle_back_to_upload();
            assert_initial(&controller);
            // Second reset is a no-op
            assert_eq!(controller.handle_back_to_upload(), Transition::Unchanged);
            assert_initial(&controller);
        }
    }

    #[test]
    fn test_reset_clears_status_text() {
        let mut controller = in_processing();
        controller.set_processing_status("Reading transcript".to_string());
        controller.handle_back_to_upload();
        assert_eq!(controller.processing_status(), "");
    }

    #[test]
    fn test_reset_control_visibility() {
        assert!(!ScreenController::new().shows_reset_control());
        assert!(in_processing().shows_reset_control());
        assert!(in_editor().shows_reset_control());
    }

    #[test]
    fn test_status_visible_in_processing_but_not_editor() {
        let mut controller = in_processing();
        assert_eq!(
            controller.set_processing_status("50%".to_string()),
            Transition::StatusUpdated
        );
        assert_eq!(
            controller.view(),
            ScreenView::Processing {
                url: "blob:1",
                status: "50%"
            }
        );

        controller.handle_transcription_complete(json!({"segments": []}).into());
        assert_eq!(controller.processing_status(), "");
        assert!(matches!(controller.view(), ScreenView::Editor { .. }));
    }

    #[test]
    fn test_same_status_is_unchanged() {
        let mut controller = in_processing();
        controller.set_processing_status("step".to_string());
        assert_eq!(
            controller.set_processing_status("step".to_string()),
            Transition::Unchanged
        );
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut controller = ScreenController::new();
        let transition = controller.handle_transcription_complete(json!({}).into());
        assert_eq!(
            transition,
            Transition::Ignored {
                event: "transcription_complete",
                screen: ScreenId::Upload
            }
        );
        assert_initial(&controller);

        assert!(matches!(
            controller.set_processing_status("x".to_string()),
            Transition::Ignored { .. }
        ));
        assert_initial(&controller);

        let mut controller = in_editor();
        let before = controller.video().cloned();
        let v = video("b.mp4", "blob:2");
        assert!(matches!(
            controller.handle_video_upload(v.file, v.url),
            Transition::Ignored { .. }
        ));
        assert_eq!(controller.screen(), ScreenId::Editor);
        assert_eq!(controller.video().cloned(), before);

        let mut controller = in_processing();
        let v = video("b.mp4", "blob:2");
        assert!(matches!(
            controller.handle_video_upload(v.file, v.url),
            Transition::Ignored { .. }
        ));
        assert_eq!(controller.video().map(|v| v.url.as_str()), Some("blob:1"));
    }

    #[test]
    fn test_session_bumps_on_each_upload() {
        let mut controller = in_processing();
        assert_eq!(controller.session(), 1);
        controller.handle_back_to_upload();
        assert_eq!(controller.session(), 1);
        let v = video("b.mp4", "blob:2");
        controller.handle_video_upload(v.file, v.url);
        assert_eq!(controller.session(), 2);
    }

    #[test]
    fn test_subscribers_see_complete_state() {
        let seen: Rc<RefCell<Vec<(ScreenId, bool, bool)>>> = Rc::default();
        let mut controller = ScreenController::new();
        let sink = Rc::clone(&seen);
        controller.subscribe(move |c, _| {
            sink.borrow_mut()
                .push((c.screen(), c.video().is_some(), c.transcription().is_some()));
        });

        let v = video("a.mp4", "blob:1");
        controller.handle_video_upload(v.file, v.url);
        controller.handle_transcription_complete(json!({"segments": []}).into());
        controller.handle_back_to_upload();

        assert_eq!(
            *seen.borrow(),
            vec![
                (ScreenId::Processing, true, false),
                (ScreenId::Editor, true, true),
                (ScreenId::Upload, false, false),
            ]
        );
    }

    #[test]
    fn test_ignored_events_do_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let mut controller = ScreenController::new();
        let sink = Rc::clone(&count);
        controller.subscribe(move |_, _| *sink.borrow_mut() += 1);

        controller.handle_back_to_upload();
        controller.handle_transcription_complete(json!({}).into());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut controller = ScreenController::new();
        let sink = Rc::clone(&count);
        let id = controller.subscribe(move |_, _| *sink.borrow_mut() += 1);

        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        let v = video("a.mp4", "blob:1");
        controller.handle_video_upload(v.file, v.url);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut controller = ScreenController::new();
        controller.dispatch(ControllerEvent::VideoUploaded(video("a.mp4", "blob:1")));
        controller.dispatch(ControllerEvent::StatusUpdated("working".to_string()));
        assert_eq!(controller.processing_status(), "working");
        controller.dispatch(ControllerEvent::TranscriptionComplete(
            json!({"segments": []}).into(),
        ));
        assert_eq!(controller.screen(), ScreenId::Editor);
        controller.dispatch(ControllerEvent::BackToUpload);
        assert_initial(&controller);
    }
}
