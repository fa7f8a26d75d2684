//! The drag session state machine.
//!
//! One [`DragSession`] tracks the lifecycle of a single drag gesture:
//!
//! ```text
//! Idle → Dragging(source) → Hovering(source, target?) → Idle
//! ```
//!
//! The session only observes; it never mutates the grid. On release it
//! yields a [`DropEvent`] (when a target is under the pointer) for the
//! caller to feed through the placement resolver, and always returns to
//! [`DragState::Idle`]. Cancellation leaves no trace: afterwards the
//! session is indistinguishable from one that never started a gesture.
//!
//! The machine is deliberately toolkit-agnostic so any drag library (or a
//! headless test harness) can drive it.

use thiserror::Error;

use tessera_core::{instance::InstanceId, module::ModuleDefinition};

use crate::placement::DropTarget;

/// What a drag gesture started on.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A library card; carries the full definition payload so a drop can
    /// create an instance without a catalog round-trip.
    Library(ModuleDefinition),

    /// An already-placed instance on the canvas.
    Canvas(InstanceId),
}

/// The lifecycle state of a drag session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No active gesture.
    #[default]
    Idle,

    /// A gesture has started; nothing is hovered yet.
    Dragging { source: DragSource },

    /// A gesture is in progress; `target` is the nearest droppable under
    /// the pointer, or `None` while over dead space.
    Hovering {
        source: DragSource,
        target: Option<DropTarget>,
    },
}

/// A completed drop: the gesture's source and the target it ended over.
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    source: DragSource,
    target: DropTarget,
}

impl DropEvent {
    /// Returns what the gesture started on.
    pub fn source(&self) -> &DragSource {
        &self.source
    }

    /// Returns the target the gesture ended over.
    pub fn target(&self) -> &DropTarget {
        &self.target
    }

    /// Decomposes the event into its parts.
    pub fn into_parts(self) -> (DragSource, DropTarget) {
        (self.source, self.target)
    }
}

/// Errors from driving the state machine out of order.
///
/// These indicate a wiring bug in the hosting UI, not a user mistake, but
/// they are reported rather than panicking so a misbehaving event stream
/// cannot take the editor down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `begin` was called while a gesture was already in progress.
    #[error("a drag gesture is already in progress")]
    AlreadyDragging,

    /// `hover` or `release` was called with no gesture in progress.
    #[error("no drag gesture is in progress")]
    NotDragging,
}

/// State machine for one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns `true` when no gesture is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    /// Starts a gesture from the given source.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyDragging`] if a gesture is already in
    /// progress; the existing gesture is left untouched.
    pub fn begin(&mut self, source: DragSource) -> Result<(), SessionError> {
        if !self.is_idle() {
            return Err(SessionError::AlreadyDragging);
        }
        log::trace!(source:?; "Drag gesture started");
        self.state = DragState::Dragging { source };
        Ok(())
    }

    /// Records the droppable currently under the pointer (or `None`).
    ///
    /// Pure observation: calling this any number of times mutates nothing
    /// beyond the hover record itself.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotDragging`] if no gesture is in progress.
    pub fn hover(&mut self, target: Option<DropTarget>) -> Result<(), SessionError> {
        let source = match std::mem::take(&mut self.state) {
            DragState::Idle => return Err(SessionError::NotDragging),
            DragState::Dragging { source } | DragState::Hovering { source, .. } => source,
        };
        self.state = DragState::Hovering { source, target };
        Ok(())
    }

    /// Ends the gesture.
    ///
    /// Returns a [`DropEvent`] when a target was under the pointer,
    /// `None` when the release happened over dead space. Either way the
    /// session is idle afterwards and the hover record is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotDragging`] if no gesture is in progress.
    pub fn release(&mut self) -> Result<Option<DropEvent>, SessionError> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => Err(SessionError::NotDragging),
            DragState::Dragging { .. } => Ok(None),
            DragState::Hovering { source, target } => {
                Ok(target.map(|target| DropEvent { source, target }))
            }
        }
    }

    /// Aborts any gesture in progress with zero mutation.
    ///
    /// Safe to call in any state; afterwards the session is idle.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            log::trace!("Drag gesture cancelled");
        }
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{DropTarget, Side};

    fn canvas_source() -> DragSource {
        DragSource::Canvas(InstanceId::from_raw("mi-1"))
    }

    #[test]
    fn test_full_lifecycle_yields_drop_event() {
        let mut session = DragSession::new();

        session.begin(canvas_source()).unwrap();
        session.hover(Some(DropTarget::Canvas)).unwrap();
        session
            .hover(Some(DropTarget::ColumnZone {
                row: 0,
                column: 1,
                side: Side::Left,
            }))
            .unwrap();

        let event = session.release().unwrap().expect("target was hovered");
        assert_eq!(event.source(), &canvas_source());
        assert_eq!(
            event.target(),
            &DropTarget::ColumnZone {
                row: 0,
                column: 1,
                side: Side::Left
            }
        );
        assert!(session.is_idle());
    }

    #[test]
    fn test_release_without_target_is_clean() {
        let mut session = DragSession::new();

        session.begin(canvas_source()).unwrap();
        session.hover(Some(DropTarget::Canvas)).unwrap();
        session.hover(None).unwrap();

        assert_eq!(session.release().unwrap(), None);
        assert!(session.is_idle());
    }

    #[test]
    fn test_release_without_hover_is_clean() {
        let mut session = DragSession::new();

        session.begin(canvas_source()).unwrap();

        assert_eq!(session.release().unwrap(), None);
        assert!(session.is_idle());
    }

    #[test]
    fn test_cancel_is_indistinguishable_from_idle() {
        let fresh = DragSession::new();
        let mut cancelled = DragSession::new();

        cancelled.begin(canvas_source()).unwrap();
        cancelled.hover(Some(DropTarget::Canvas)).unwrap();
        cancelled.cancel();

        assert_eq!(cancelled.state(), fresh.state());
        assert!(cancelled.release().is_err());
    }

    #[test]
    fn test_out_of_order_calls_are_reported() {
        let mut session = DragSession::new();

        assert_eq!(session.hover(None), Err(SessionError::NotDragging));
        assert_eq!(session.release(), Err(SessionError::NotDragging));

        session.begin(canvas_source()).unwrap();
        assert_eq!(
            session.begin(canvas_source()),
            Err(SessionError::AlreadyDragging)
        );
        // The original gesture survives a rejected begin.
        assert!(!session.is_idle());
    }
}
