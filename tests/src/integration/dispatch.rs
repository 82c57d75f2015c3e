//! Dispatch ordering, chain bounds and precondition policy over the
//! in-memory document.

#[cfg(test)]
mod tests {
    use effects_runtime::adapters::InMemoryDocument;
    use effects_runtime::{build_dispatcher, Collaborators, DocumentConfig};
    use shared_bus::{
        handler_fn, DispatchError, DispatcherConfig, EditorEvent, EffectDispatcher, EffectError,
        EventKind, Notice,
    };
    use shared_types::{DocumentAccessor, DocumentError, DocumentSnapshot, Selection};
    use std::sync::Arc;

    use bw_04_notices::RecordingAnnouncer;

    use crate::integration::fixtures::{nested_document, paragraph};

    fn document(snapshot: DocumentSnapshot) -> InMemoryDocument {
        InMemoryDocument::with_snapshot(snapshot, &DocumentConfig::default())
    }

    #[test]
    fn test_follow_ups_processed_breadth_first() {
        let mut dispatcher = EffectDispatcher::with_config(DispatcherConfig::strict());
        dispatcher
            .register(
                EventKind::CheckTemplateValidity,
                handler_fn("fan-out", |_, _| {
                    Ok(vec![
                        EditorEvent::SynchronizeTemplate,
                        EditorEvent::create_notice(Notice::new("first")),
                    ])
                }),
            )
            .register(
                EventKind::SynchronizeTemplate,
                handler_fn("nested", |_, _| {
                    Ok(vec![EditorEvent::create_notice(Notice::new("second"))])
                }),
            );

        let mut store = document(DocumentSnapshot::default());
        let report = dispatcher
            .dispatch(EditorEvent::CheckTemplateValidity, &mut store)
            .unwrap();

        assert_eq!(
            report.events(),
            &[
                EditorEvent::CheckTemplateValidity,
                EditorEvent::SynchronizeTemplate,
                EditorEvent::create_notice(Notice::new("first")),
                EditorEvent::create_notice(Notice::new("second")),
            ]
        );
    }

    #[test]
    fn test_event_applied_before_its_handlers_run() {
        let mut dispatcher = EffectDispatcher::with_config(DispatcherConfig::strict());
        dispatcher.register(
            EventKind::SetTemplateValidity,
            handler_fn("observe-validity", |event, state| {
                let EditorEvent::SetTemplateValidity { is_valid } = event else {
                    return Ok(Vec::new());
                };
                assert_eq!(state.is_template_valid(), *is_valid);
                Ok(Vec::new())
            }),
        );

        let mut store = document(DocumentSnapshot::default());
        dispatcher
            .dispatch(EditorEvent::set_template_validity(false), &mut store)
            .unwrap();
        assert!(!store.is_template_valid());
    }

    #[test]
    fn test_runaway_chain_is_bounded() {
        let config = DispatcherConfig {
            max_chain_length: 8,
            strict_preconditions: true,
        };
        let mut dispatcher = build_dispatcher(config, &Collaborators::in_memory());
        dispatcher.register(
            EventKind::SetTemplateValidity,
            handler_fn("recheck", |_, _| Ok(vec![EditorEvent::CheckTemplateValidity])),
        );

        let mut store = document(DocumentSnapshot::default());
        let result = dispatcher.dispatch(EditorEvent::CheckTemplateValidity, &mut store);

        assert_eq!(result, Err(DispatchError::ChainLimitExceeded { limit: 8 }));
    }

    #[test]
    fn test_strict_aborts_on_missing_merge_block() {
        let mut dispatcher =
            build_dispatcher(DispatcherConfig::strict(), &Collaborators::in_memory());
        let mut store = document(DocumentSnapshot::new(vec![paragraph("a", "A")]));

        let result = dispatcher.dispatch(EditorEvent::merge_blocks("a", "zzz"), &mut store);

        assert_eq!(
            result,
            Err(DispatchError::Effect {
                handler: "merge-blocks",
                kind: EventKind::MergeBlocks,
                source: EffectError::BlockNotFound("zzz".into()),
            })
        );
    }

    #[test]
    fn test_lenient_skips_missing_merge_block() {
        let mut dispatcher =
            build_dispatcher(DispatcherConfig::lenient(), &Collaborators::in_memory());
        let mut store = document(DocumentSnapshot::new(vec![paragraph("a", "A")]));

        let report = dispatcher
            .dispatch(EditorEvent::merge_blocks("a", "zzz"), &mut store)
            .unwrap();

        assert_eq!(report.kinds(), vec![EventKind::MergeBlocks]);
        assert_eq!(store.blocks().blocks(), &[paragraph("a", "A")]);
    }

    #[test]
    fn test_store_rejection_by_policy() {
        let removal = EditorEvent::remove_blocks(vec!["missing".into()], true);

        let mut strict = build_dispatcher(DispatcherConfig::strict(), &Collaborators::in_memory());
        let mut store = document(nested_document());
        assert_eq!(
            strict.dispatch(removal.clone(), &mut store),
            Err(DispatchError::Store {
                kind: EventKind::RemoveBlocks,
                source: DocumentError::BlockNotFound("missing".into()),
            })
        );

        // Lenient: the rejection is logged and the recovery handler is skipped.
        let mut lenient =
            build_dispatcher(DispatcherConfig::lenient(), &Collaborators::in_memory());
        let mut store = document(nested_document());
        let report = lenient.dispatch(removal, &mut store).unwrap();
        assert_eq!(report.kinds(), vec![EventKind::RemoveBlocks]);
        assert_eq!(store.blocks().len(), 2);
    }

    #[test]
    fn test_rejected_removal_keeps_selection() {
        let mut dispatcher =
            build_dispatcher(DispatcherConfig::lenient(), &Collaborators::in_memory());
        let mut store = document(nested_document().with_selection(Selection::block("c")));

        dispatcher
            .dispatch(EditorEvent::remove_blocks(vec!["b".into()], false), &mut store)
            .unwrap();
        let report = dispatcher
            .dispatch(EditorEvent::remove_blocks(vec!["b".into()], true), &mut store)
            .unwrap();

        assert_eq!(report.kinds(), vec![EventKind::RemoveBlocks]);
        assert_eq!(store.selected_block_client_id(), Some(&"c".into()));
    }

    #[test]
    fn test_failing_handler_does_not_block_siblings_when_lenient() {
        let announcer = Arc::new(RecordingAnnouncer::new());
        let collaborators = Collaborators::in_memory().with_announcer(announcer.clone());

        let mut dispatcher = EffectDispatcher::with_config(DispatcherConfig::lenient());
        dispatcher.register(
            EventKind::CreateNotice,
            handler_fn("always-fails", |_, _| Err(EffectError::MissingHistory)),
        );
        effects_runtime::register_effects(&mut dispatcher, &collaborators);

        let mut store = document(DocumentSnapshot::default());
        dispatcher
            .dispatch(EditorEvent::create_notice(Notice::new("Saved")), &mut store)
            .unwrap();

        assert_eq!(announcer.messages(), vec!["Saved"]);
    }

    #[test]
    fn test_inbox_events_dispatched_in_arrival_order() {
        let mut dispatcher =
            build_dispatcher(DispatcherConfig::strict(), &Collaborators::in_memory());
        let sender = dispatcher.event_sender();
        assert!(sender.send(EditorEvent::set_template_validity(false)));
        assert!(sender.send(EditorEvent::select_block("a", None)));

        let mut store = document(DocumentSnapshot::new(vec![paragraph("a", "A")]));
        let report = dispatcher.pump(&mut store).unwrap();

        assert_eq!(
            report.kinds(),
            vec![EventKind::SetTemplateValidity, EventKind::SelectBlock]
        );
        assert_eq!(store.selected_block_client_id(), Some(&"a".into()));
        assert!(dispatcher.pump(&mut store).unwrap().is_empty());
    }
}
