//! Tessera - A grid placement engine for drag-and-drop template builders.
//!
//! Tessera backs the "Template Builder" of a welding qualification
//! document system (WPS/PQR/pPQR): reusable field modules are dragged
//! from a library and dropped into rows of at most four columns, with
//! reordering and renumbering resolved here rather than in the UI.
//!
//! # Pipeline
//!
//! ```text
//! pointer events
//!     ↓ DragSession           (session) - gesture lifecycle, hover tracking
//! DropEvent
//!     ↓ resolve               (placement) - drop target → mutation intent
//! PlacementIntent
//!     ↓ GridModel             (grid) - atomic, invariant-preserving mutation
//! instance list
//!     ↓ normalize             (reindex) - contiguous columns, row-major order
//! normalized list
//!     ↓ project / save        (preview / persistence collaborator)
//! ```
//!
//! [`TemplateSession`] wires these stages together for one editing
//! session; each stage is also usable on its own.

pub mod config;
pub mod grid;
pub mod placement;
pub mod preview;
pub mod reindex;
pub mod session;
pub mod validate;

mod error;

pub use tessera_core::{catalog, instance, module};

pub use error::{GridError, TesseraError};

use log::{debug, info};

use tessera_core::{
    catalog::ModuleCatalog,
    instance::{InstanceId, ModuleInstance},
    module::{ModuleDefinition, ModuleKind},
};

use config::AppConfig;
use grid::{GridModel, Outcome};
use placement::DropTarget;
use preview::PreviewRow;
use session::{DragSession, DragSource};

/// The outcome of a completed drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The grid was mutated and renumbered.
    Applied,
    /// Nothing changed: the release happened over dead space, or the drop
    /// reproduced the current layout. No "changed" notification is due.
    Unchanged,
    /// The drop was rejected; the grid is untouched and the reason should
    /// be shown to the user as a dismissible warning.
    Rejected(GridError),
}

/// One editing session of one template's module grid.
///
/// Owns the grid and the drag state machine, borrows the module catalog,
/// and drives the placement resolver on release. Created empty (create
/// mode) or from a persisted instance list (edit mode); its final state is
/// handed off wholesale through [`TemplateSession::save`].
///
/// # Examples
///
/// ```
/// use tessera_engine::{TemplateSession, config::AppConfig};
/// use tessera_engine::placement::DropTarget;
/// use tessera_engine::catalog::InMemoryCatalog;
/// use tessera_engine::module::{ModuleDefinition, ModuleKind};
///
/// let mut catalog = InMemoryCatalog::new();
/// let gas = ModuleDefinition::new("gas", "Shielding Gas", "Gas");
/// catalog.register(ModuleKind::Wps, gas.clone());
///
/// let mut session = TemplateSession::new(&catalog, ModuleKind::Wps, AppConfig::default());
/// session.begin_drag_from_library(gas).unwrap();
/// session.hover(Some(DropTarget::Canvas)).unwrap();
/// session.release_drag().unwrap();
///
/// assert_eq!(session.instances().len(), 1);
/// ```
pub struct TemplateSession<'c> {
    catalog: &'c dyn ModuleCatalog,
    kind: ModuleKind,
    config: AppConfig,
    grid: GridModel,
    drag: DragSession,
}

impl<'c> TemplateSession<'c> {
    /// Starts an empty editing session (create mode).
    pub fn new(catalog: &'c dyn ModuleCatalog, kind: ModuleKind, config: AppConfig) -> Self {
        info!(kind:% = kind; "Starting template session");
        let grid = GridModel::with_config(config.grid());
        Self {
            catalog,
            kind,
            config,
            grid,
            drag: DragSession::new(),
        }
    }

    /// Starts a session from a persisted instance list (edit mode).
    ///
    /// The list is renormalized on load. Instances whose module ids no
    /// longer resolve are kept and shown as "module not found" in the
    /// preview.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Grid`] when the list carries duplicate
    /// instance ids or a row over capacity.
    pub fn open(
        catalog: &'c dyn ModuleCatalog,
        kind: ModuleKind,
        config: AppConfig,
        instances: Vec<ModuleInstance>,
    ) -> Result<Self, TesseraError> {
        info!(kind:% = kind, count = instances.len(); "Opening template session");
        let grid = GridModel::from_instances(instances, config.grid())?;
        Ok(Self {
            catalog,
            kind,
            config,
            grid,
            drag: DragSession::new(),
        })
    }

    /// Returns the module kind this session edits.
    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// Switches the session to another module kind.
    ///
    /// Templates of different kinds share no modules, so switching resets
    /// the grid and aborts any drag in progress. Setting the current kind
    /// again is a no-op.
    pub fn set_kind(&mut self, kind: ModuleKind) {
        if self.kind == kind {
            return;
        }
        info!(from:% = self.kind, to:% = kind; "Switching module kind, resetting grid");
        self.kind = kind;
        self.drag.cancel();
        self.grid.clear();
    }

    /// Returns the placed instances in row-major order.
    pub fn instances(&self) -> &[ModuleInstance] {
        self.grid.instances()
    }

    /// Returns the grid for direct inspection.
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Starts a drag from a library card.
    pub fn begin_drag_from_library(
        &mut self,
        definition: ModuleDefinition,
    ) -> Result<(), TesseraError> {
        self.drag.begin(DragSource::Library(definition))?;
        Ok(())
    }

    /// Starts a drag from a placed instance.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Grid`] with
    /// [`GridError::UnknownInstance`] when the instance does not exist,
    /// so a stale UI handle cannot start a gesture.
    pub fn begin_drag_from_canvas(&mut self, id: &InstanceId) -> Result<(), TesseraError> {
        if self.grid.get(id).is_none() {
            return Err(GridError::UnknownInstance(id.clone()).into());
        }
        self.drag.begin(DragSource::Canvas(id.clone()))?;
        Ok(())
    }

    /// Records the droppable currently under the pointer.
    pub fn hover(&mut self, target: Option<DropTarget>) -> Result<(), TesseraError> {
        self.drag.hover(target)?;
        Ok(())
    }

    /// Aborts the drag in progress, if any, with zero mutation.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Ends the drag gesture, resolving and applying its drop.
    ///
    /// Releasing over dead space yields [`SessionOutcome::Unchanged`];
    /// an over-capacity drop yields [`SessionOutcome::Rejected`] with the
    /// grid untouched. The session is idle afterwards in every case.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Session`] when no gesture is in progress,
    /// and [`TesseraError::Grid`] for non-capacity grid failures (stale
    /// instance handles).
    pub fn release_drag(&mut self) -> Result<SessionOutcome, TesseraError> {
        let Some(event) = self.drag.release()? else {
            return Ok(SessionOutcome::Unchanged);
        };

        let (source, target) = event.into_parts();
        let intent = placement::resolve(&source, &target, &self.grid);
        debug!(intent:?; "Resolved drop");

        let applied = match &source {
            DragSource::Library(definition) => self
                .grid
                .insert(definition.id(), &intent)
                .map(|_| Outcome::Applied),
            DragSource::Canvas(id) => self.grid.move_existing(id, &intent),
        };

        match applied {
            Ok(Outcome::Applied) => Ok(SessionOutcome::Applied),
            Ok(Outcome::Unchanged) => Ok(SessionOutcome::Unchanged),
            Err(err) if err.is_capacity() => {
                debug!(err:% = err; "Drop rejected");
                Ok(SessionOutcome::Rejected(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes an instance. See [`GridModel::remove`].
    pub fn remove(&mut self, id: &InstanceId) -> Result<(), TesseraError> {
        self.grid.remove(id)?;
        Ok(())
    }

    /// Duplicates an instance into a fresh trailing row. See
    /// [`GridModel::copy`].
    pub fn copy(&mut self, id: &InstanceId) -> Result<InstanceId, TesseraError> {
        Ok(self.grid.copy(id)?)
    }

    /// Renames an instance, reporting whether anything changed so the
    /// caller can skip a "changed" notification for a same-name rename.
    /// See [`GridModel::rename`].
    pub fn rename(
        &mut self,
        id: &InstanceId,
        name: Option<String>,
    ) -> Result<Outcome, TesseraError> {
        Ok(self.grid.rename(id, name)?)
    }

    /// Projects the grid into read-only preview rows, resolving modules
    /// against the catalog.
    pub fn preview(&self) -> Vec<PreviewRow<'_>> {
        preview::project(self.grid.instances(), self.catalog, self.kind)
    }

    /// Returns the instance list for the save collaborator.
    pub fn save(&self) -> Vec<ModuleInstance> {
        self.grid.save()
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
