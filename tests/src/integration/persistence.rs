//! Persistence routing: requests reach the stores, outcomes come back
//! through the inbox and reach the observers.

#[cfg(test)]
mod tests {
    use effects_runtime::adapters::{InMemoryPostStore, InMemoryReusableBlockStore, NoticeObserver};
    use serde_json::json;
    use shared_bus::{EditorEvent, EventFilter, EventKind, NoticeStatus, ReusableBlock};
    use shared_types::DocumentSnapshot;

    use crate::integration::fixtures::{paragraph, Harness, IDLE};

    fn harness_with_post() -> Harness {
        Harness::with_stores(
            DocumentSnapshot::default(),
            InMemoryPostStore::new().with_post(1, json!({ "id": 1, "title": "Draft" })),
            InMemoryReusableBlockStore::new(),
        )
    }

    fn reusable(id: u64, title: &str) -> ReusableBlock {
        ReusableBlock {
            id,
            title: title.to_string(),
            content: vec![paragraph(&format!("r{id}"), title)],
        }
    }

    #[tokio::test]
    async fn test_post_update_reaches_observer_and_announces() {
        let mut harness = harness_with_post();

        let report = harness
            .runtime
            .dispatch(EditorEvent::RequestPostUpdate {
                post_id: 1,
                edits: json!({ "title": "Published" }),
                is_autosave: false,
            })
            .unwrap();
        // Routing never emits synchronously.
        assert_eq!(report.len(), 1);

        let settled = harness.runtime.settle(IDLE).await.unwrap();
        assert_eq!(
            settled.kinds(),
            vec![EventKind::RequestPostUpdateSuccess, EventKind::CreateNotice]
        );

        assert_eq!(
            harness.observer.events(),
            vec![EditorEvent::RequestPostUpdateSuccess {
                previous_post: json!({ "id": 1, "title": "Draft" }),
                post: json!({ "id": 1, "title": "Published" }),
                is_autosave: false,
            }]
        );
        assert_eq!(harness.announcer.messages(), vec!["Post updated."]);
        assert_eq!(
            harness.posts.post(1),
            Some(json!({ "id": 1, "title": "Published" }))
        );
    }

    #[tokio::test]
    async fn test_autosave_is_silent() {
        let mut harness = harness_with_post();

        harness
            .runtime
            .dispatch(EditorEvent::RequestPostUpdate {
                post_id: 1,
                edits: json!({ "title": "Typing" }),
                is_autosave: true,
            })
            .unwrap();
        harness.runtime.settle(IDLE).await.unwrap();

        assert_eq!(harness.observer.kinds(), vec![EventKind::RequestPostUpdateSuccess]);
        assert!(harness.announcer.spoken().is_empty());
        assert_eq!(harness.posts.post(1), Some(json!({ "id": 1, "title": "Draft" })));
        assert_eq!(
            harness.posts.autosave(1),
            Some(json!({ "id": 1, "title": "Typing" }))
        );
    }

    #[tokio::test]
    async fn test_update_failure_carries_edits_and_error() {
        let mut harness = harness_with_post();
        harness.posts.set_outage(Some("offline".to_string()));

        harness
            .runtime
            .dispatch(EditorEvent::RequestPostUpdate {
                post_id: 1,
                edits: json!({ "title": "Lost" }),
                is_autosave: false,
            })
            .unwrap();
        harness.runtime.settle(IDLE).await.unwrap();

        let events = harness.observer.events();
        let [EditorEvent::RequestPostUpdateFailure { post, error }] = events.as_slice() else {
            panic!("expected one failure, got {events:?}");
        };
        assert_eq!(post, &json!({ "id": 1, "edits": { "title": "Lost" } }));
        assert_eq!(error.code, "unavailable");
        assert_eq!(
            harness.announcer.messages(),
            vec![format!("Updating failed. {}", error.message)]
        );
    }

    #[tokio::test]
    async fn test_trash_outcomes() {
        let mut harness = harness_with_post();

        harness
            .runtime
            .dispatch(EditorEvent::TrashPost {
                post_id: 1,
                post_type: "post".to_string(),
            })
            .unwrap();
        let settled = harness
            .runtime
            .settle_until(&EventFilter::kinds(vec![EventKind::TrashPostSuccess]), IDLE)
            .await
            .unwrap();
        assert_eq!(settled.kinds(), vec![EventKind::TrashPostSuccess]);
        assert!(harness.posts.is_trashed(1));
        // Success is not an observed outcome.
        assert!(harness.observer.events().is_empty());

        harness
            .runtime
            .dispatch(EditorEvent::TrashPost {
                post_id: 9,
                post_type: "post".to_string(),
            })
            .unwrap();
        harness.runtime.settle(IDLE).await.unwrap();

        assert_eq!(harness.observer.kinds(), vec![EventKind::TrashPostFailure]);
        assert_eq!(harness.announcer.messages().len(), 1);
        assert!(harness.announcer.messages()[0].starts_with("Trashing failed."));
    }

    #[test]
    fn test_trash_failure_notice_is_an_error() {
        let notice = NoticeObserver::notice_for(&EditorEvent::TrashPostFailure {
            post_id: 1,
            error: shared_bus::PersistenceFailure::new("not_found", "post 1 not found"),
        })
        .unwrap();

        assert_eq!(notice.status, NoticeStatus::Error);
        assert_eq!(notice.id.as_deref(), Some(NoticeObserver::TRASH_NOTICE_ID));
        assert!(notice.is_dismissible);
    }

    #[tokio::test]
    async fn test_refresh_failure_emits_nothing() {
        let mut harness = harness_with_post();

        harness
            .runtime
            .dispatch(EditorEvent::RefreshPost {
                post_id: 1,
                post_type: "post".to_string(),
            })
            .unwrap();
        let settled = harness.runtime.settle(IDLE).await.unwrap();
        assert_eq!(settled.kinds(), vec![EventKind::RefreshPostSuccess]);

        harness
            .runtime
            .dispatch(EditorEvent::RefreshPost {
                post_id: 404,
                post_type: "post".to_string(),
            })
            .unwrap();
        let settled = harness.runtime.settle(IDLE).await.unwrap();
        assert!(settled.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_reusable_blocks_delivers_results() {
        let mut harness = Harness::with_stores(
            DocumentSnapshot::default(),
            InMemoryPostStore::new(),
            InMemoryReusableBlockStore::new()
                .with_block(reusable(1, "Footer"))
                .with_block(reusable(2, "Signature")),
        );

        harness
            .runtime
            .dispatch(EditorEvent::FetchReusableBlocks { id: None })
            .unwrap();
        let settled = harness.runtime.settle(IDLE).await.unwrap();

        assert_eq!(
            settled.kinds(),
            vec![
                EventKind::ReceiveReusableBlocks,
                EventKind::FetchReusableBlocksSuccess
            ]
        );
        assert_eq!(
            harness.observer.events(),
            vec![EditorEvent::ReceiveReusableBlocks {
                results: vec![reusable(1, "Footer"), reusable(2, "Signature")],
            }]
        );
    }

    #[tokio::test]
    async fn test_save_draft_reusable_block_gets_server_id() {
        let mut harness = Harness::with_stores(
            DocumentSnapshot::default(),
            InMemoryPostStore::new(),
            InMemoryReusableBlockStore::new().with_block(reusable(4, "Footer")),
        );
        harness.reusable_blocks.insert_draft(reusable(100, "New"));

        harness
            .runtime
            .dispatch(EditorEvent::SaveReusableBlock { id: 100 })
            .unwrap();
        let settled = harness.runtime.settle(IDLE).await.unwrap();

        assert_eq!(settled.kinds(), vec![EventKind::SaveReusableBlockSuccess]);
        assert!(harness.reusable_blocks.block(100).is_none());
        assert_eq!(
            harness.reusable_blocks.block(101).map(|block| block.title),
            Some("New".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_reusable_block_fails() {
        let mut harness = Harness::new(DocumentSnapshot::default());

        harness
            .runtime
            .dispatch(EditorEvent::DeleteReusableBlock { id: 7 })
            .unwrap();
        let settled = harness.runtime.settle(IDLE).await.unwrap();

        assert_eq!(settled.kinds(), vec![EventKind::DeleteReusableBlockFailure]);
    }

    #[test]
    fn test_conversions_forwarded_to_observer() {
        let mut harness = Harness::new(DocumentSnapshot::new(vec![paragraph("a", "A")]));

        harness
            .runtime
            .dispatch(EditorEvent::ConvertBlockToReusable {
                client_ids: vec!["a".into()],
            })
            .unwrap();
        harness
            .runtime
            .dispatch(EditorEvent::ConvertBlockToStatic {
                client_id: "a".into(),
            })
            .unwrap();

        assert_eq!(
            harness.observer.kinds(),
            vec![EventKind::ConvertBlockToReusable, EventKind::ConvertBlockToStatic]
        );
    }
}
