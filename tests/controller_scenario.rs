//! The controller on its own: the upload → complete → reset scenario and the
//! subscriber contract.

use podclip::{
    ControllerEvent, ScreenController, ScreenId, ScreenView, Transition, TranscriptionResult,
    VideoFile, VideoRef,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn upload(name: &str, url: &str) -> ControllerEvent {
    ControllerEvent::VideoUploaded(VideoRef::new(VideoFile::new(name, 0), url))
}

#[test]
fn test_upload_complete_reset_scenario() {
    let mut controller = ScreenController::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    controller.subscribe(move |c, transition| log.borrow_mut().push((c.screen(), transition)));

    controller.dispatch(upload("a.mp4", "blob:1"));
    assert_eq!(
        controller.view(),
        ScreenView::Processing {
            url: "blob:1",
            status: ""
        }
    );

    let data: TranscriptionResult = json!({ "segments": [] }).into();
    controller.dispatch(ControllerEvent::TranscriptionComplete(data.clone()));
    match controller.view() {
        ScreenView::Editor {
            file,
            url,
            transcription,
        } => {
            assert_eq!(file.name(), "a.mp4");
            assert_eq!(url, "blob:1");
            assert_eq!(transcription, &data);
        }
        other => panic!("expected editor view, got {:?}", other),
    }

    controller.dispatch(ControllerEvent::BackToUpload);
    assert_eq!(controller.view(), ScreenView::Upload);
    assert!(controller.video().is_none());
    assert!(controller.transcription().is_none());

    assert_eq!(
        *seen.borrow(),
        vec![
            (
                ScreenId::Processing,
                Transition::Moved {
                    from: ScreenId::Upload,
                    to: ScreenId::Processing
                }
            ),
            (
                ScreenId::Editor,
                Transition::Moved {
                    from: ScreenId::Processing,
                    to: ScreenId::Editor
                }
            ),
            (
                ScreenId::Upload,
                Transition::Moved {
                    from: ScreenId::Editor,
                    to: ScreenId::Upload
                }
            ),
        ]
    );
}

#[test]
fn test_out_of_order_events_leave_state_alone() {
    let mut controller = ScreenController::new();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    controller.subscribe(move |_, _| *counter.borrow_mut() += 1);

    let transition =
        controller.dispatch(ControllerEvent::TranscriptionComplete(json!({}).into()));
    assert_eq!(
        transition,
        Transition::Ignored {
            event: "transcription_complete",
            screen: ScreenId::Upload
        }
    );
    assert_eq!(
        controller.dispatch(ControllerEvent::StatusUpdated("x".into())),
        Transition::Ignored {
            event: "status_updated",
            screen: ScreenId::Upload
        }
    );
    assert_eq!(
        controller.dispatch(ControllerEvent::BackToUpload),
        Transition::Unchanged
    );

    controller.dispatch(upload("a.mp4", "blob:1"));
    assert!(!controller
        .dispatch(upload("b.mp4", "blob:2"))
        .changed());
    assert_eq!(controller.video().unwrap().url, "blob:1");

    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_status_updates_are_not_visible_in_editor() {
    let mut controller = ScreenController::new();
    controller.dispatch(upload("a.mp4", "blob:1"));
    controller.dispatch(ControllerEvent::StatusUpdated("Transcribing 50%".into()));
    assert_eq!(controller.processing_status(), "Transcribing 50%");

    controller.dispatch(ControllerEvent::TranscriptionComplete(json!({}).into()));
    assert!(matches!(controller.view(), ScreenView::Editor { .. }));
    assert_eq!(controller.processing_status(), "");

    controller.dispatch(ControllerEvent::BackToUpload);
    controller.dispatch(upload("b.mp4", "blob:2"));
    assert_eq!(controller.processing_status(), "");
}

#[test]
fn test_each_upload_starts_a_new_session() {
    let mut controller = ScreenController::new();
    controller.dispatch(upload("a.mp4", "blob:1"));
    let first = controller.session();
    controller.dispatch(ControllerEvent::BackToUpload);
    controller.dispatch(upload("a.mp4", "blob:1"));
    assert!(controller.session() > first);
}

#[test]
fn test_unsubscribed_listener_is_not_called() {
    let mut controller = ScreenController::new();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let id = controller.subscribe(move |_, _| *counter.borrow_mut() += 1);

    controller.dispatch(upload("a.mp4", "blob:1"));
    assert!(controller.unsubscribe(id));
    assert!(!controller.unsubscribe(id));
    controller.dispatch(ControllerEvent::BackToUpload);

    assert_eq!(*calls.borrow(), 1);
}
