// Plain-text replacer - string splice for value-based text boxes

use crate::events::{current_timestamp, ExpansionEventEmitter, SurfaceInputPayload};
use crate::expansion::ExpansionError;
use crate::surface::{FlatSurface, SurfaceKind};

/// Replace `trigger` at char offset `start` with plain `replacement`.
///
/// The caret ends up right after the inserted text. If the trigger is no
/// longer at `start` the surface is left untouched.
pub fn replace_flat(
    surface: &mut FlatSurface,
    trigger: &str,
    start: usize,
    replacement: &str,
    emitter: &dyn ExpansionEventEmitter,
) -> Result<usize, ExpansionError> {
    let still_there = surface
        .value()
        .chars()
        .skip(start)
        .take(trigger.chars().count())
        .eq(trigger.chars());
    if trigger.is_empty() || !still_there {
        crate::warn!(
            "Trigger '{}' no longer at offset {}, skipping expansion",
            trigger,
            start
        );
        return Err(ExpansionError::NotFound {
            trigger: trigger.to_string(),
        });
    }

    surface.splice(start, trigger.chars().count(), replacement);
    let caret = start + replacement.chars().count();
    surface.set_caret(caret);

    emitter.emit_surface_input(SurfaceInputPayload {
        surface_id: surface.id().to_string(),
        surface_kind: SurfaceKind::Flat.as_str().to_string(),
        synthetic: true,
        timestamp: current_timestamp(),
    });
    Ok(caret)
}

#[cfg(test)]
#[path = "flat_test.rs"]
mod tests;
