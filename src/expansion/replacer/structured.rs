// Range-based replacer - swaps a trigger inside a rich region
//
// The trigger may be split over several text leaves (formatting applied
// mid-word, browser-fragmented text nodes). The replacement is parsed into
// nodes, and the caret move to the end of the inserted content is queued
// for the next tick rather than applied while the tree is being mutated.

use super::locate_range;
use crate::events::{current_timestamp, ExpansionEventEmitter, SurfaceInputPayload};
use crate::expansion::ExpansionError;
use crate::html::parse_fragment;
use crate::surface::{NodeId, Position, StructuredSurface, SurfaceKind};

/// Replace the first occurrence of `trigger` under `scope` with `content`.
///
/// Returns the position right after the inserted content, which is also the
/// queued caret position. Nothing is mutated when the trigger can't be found.
pub fn replace_structured(
    surface: &mut StructuredSurface,
    scope: NodeId,
    trigger: &str,
    content: &str,
    emitter: &dyn ExpansionEventEmitter,
) -> Result<Position, ExpansionError> {
    let range = if surface.is_attached(scope) {
        locate_range(surface, scope, trigger)
    } else {
        None
    };
    let Some(range) = range else {
        crate::warn!("Trigger '{}' not found in rich region, skipping expansion", trigger);
        return Err(ExpansionError::NotFound {
            trigger: trigger.to_string(),
        });
    };

    let fragment = parse_fragment(content);
    let at = surface.delete_range(
        Position::new(range.start_leaf, range.start_offset),
        Position::new(range.end_leaf, range.end_offset),
    );
    let end = surface.insert_fragment(at, &fragment);
    surface.queue_caret(end);

    emitter.emit_surface_input(SurfaceInputPayload {
        surface_id: surface.id().to_string(),
        surface_kind: SurfaceKind::Structured.as_str().to_string(),
        synthetic: true,
        timestamp: current_timestamp(),
    });
    Ok(end)
}

#[cfg(test)]
#[path = "structured_test.rs"]
mod tests;
