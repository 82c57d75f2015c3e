//! Notice announcement through the full runtime.

#[cfg(test)]
mod tests {
    use bw_04_notices::{AnnounceError, Politeness, RecordingAnnouncer};
    use effects_runtime::{Collaborators, EditorRuntime, RuntimeConfig};
    use shared_bus::{EditorEvent, Notice, NoticeStatus};
    use shared_types::DocumentSnapshot;
    use std::sync::Arc;

    use crate::integration::fixtures::Harness;

    #[test]
    fn test_notice_content_is_announced() {
        let mut harness = Harness::new(DocumentSnapshot::default());

        let report = harness
            .runtime
            .dispatch(EditorEvent::create_notice(
                Notice::new("Saved").with_status(NoticeStatus::Success),
            ))
            .unwrap();

        assert!(report.follow_ups().is_empty());
        assert_eq!(
            harness.announcer.spoken(),
            vec![("Saved".to_string(), Politeness::Assertive)]
        );
    }

    #[test]
    fn test_spoken_message_overrides_content() {
        let mut harness = Harness::new(DocumentSnapshot::default());

        harness
            .runtime
            .dispatch(EditorEvent::create_notice(
                Notice::new("Saved").with_spoken_message("Draft saved"),
            ))
            .unwrap();

        assert_eq!(harness.announcer.messages(), vec!["Draft saved"]);
    }

    #[test]
    fn test_empty_spoken_message_falls_back_to_content() {
        let mut harness = Harness::new(DocumentSnapshot::default());

        harness
            .runtime
            .dispatch(EditorEvent::create_notice(
                Notice::new("Saved").with_spoken_message(""),
            ))
            .unwrap();

        assert_eq!(harness.announcer.messages(), vec!["Saved"]);
    }

    #[test]
    fn test_announcer_failure_never_aborts_dispatch() {
        let announcer = Arc::new(RecordingAnnouncer::failing(AnnounceError::Unavailable(
            "no live region".to_string(),
        )));
        let collaborators = Collaborators::in_memory().with_announcer(announcer.clone());
        let mut runtime = EditorRuntime::new(RuntimeConfig::default(), &collaborators).unwrap();

        let report = runtime
            .dispatch(EditorEvent::create_notice(Notice::new("Saved")))
            .unwrap();

        assert_eq!(report.len(), 1);
        assert!(announcer.spoken().is_empty());
    }
}
