use shared_bus::EffectError;
use shared_types::{ClientId, DocumentAccessor};

/// Block to select after `removed` disappears, looked up in the past snapshot.
///
/// Returns `Ok(None)` when the removed block was the first top-level block.
pub fn previous_block_candidate(
    state: &dyn DocumentAccessor,
    removed: &ClientId,
) -> Result<Option<ClientId>, EffectError> {
    let past = state.previous_snapshot().ok_or(EffectError::MissingHistory)?;
    if !past.blocks().contains(removed) {
        return Err(EffectError::BlockNotFound(removed.clone()));
    }

    let candidate = past
        .previous_block_client_id(removed)
        .or_else(|| past.block_root_client_id(removed));
    Ok(candidate.cloned())
}
