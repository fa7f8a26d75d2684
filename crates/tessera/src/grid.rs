//! The authoritative grid of placed module instances.
//!
//! [`GridModel`] owns the instance list for one editing session and is the
//! only place it is mutated. Every operation is atomic: mutations build a
//! candidate list, renormalize it through [`crate::reindex`], and either
//! commit or fail leaving the observable state identical to before. The
//! stored list is always normalized and sorted row-major, so two grids
//! with the same placements compare equal.

use log::debug;

use tessera_core::instance::{InstanceId, ModuleInstance};

use crate::{
    config::GridConfig,
    error::GridError,
    placement::PlacementIntent,
    reindex::{normalize, row_groups, row_sizes, sort_row_major},
};

/// Whether a mutation changed the grid.
///
/// Drop gestures that reproduce the existing layout must not bump `order`
/// or fire a "changed" notification; callers branch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The grid was mutated and renumbered.
    Applied,
    /// The operation resolved to the current layout; nothing was touched.
    Unchanged,
}

impl Outcome {
    /// Returns `true` if the grid was mutated.
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// The authoritative list of placed module instances.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    instances: Vec<ModuleInstance>,
    capacity: usize,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GridModel {
    /// Creates an empty grid with the default row capacity (create mode).
    pub fn new() -> Self {
        Self::with_config(&GridConfig::default())
    }

    /// Creates an empty grid with the given configuration.
    pub fn with_config(config: &GridConfig) -> Self {
        Self {
            instances: Vec::new(),
            capacity: config.row_capacity(),
        }
    }

    /// Adopts an externally loaded instance list (edit mode).
    ///
    /// The list is renormalized (column gaps closed, row-major order
    /// reassigned); row indices are kept as loaded, including row gaps.
    ///
    /// # Errors
    ///
    /// - [`GridError::DuplicateInstanceId`] if two entries share an id.
    /// - [`GridError::RowFull`] if a loaded row exceeds the capacity.
    pub fn from_instances(
        instances: Vec<ModuleInstance>,
        config: &GridConfig,
    ) -> Result<Self, GridError> {
        let capacity = config.row_capacity();

        let mut seen: Vec<&InstanceId> = instances.iter().map(|i| i.instance_id()).collect();
        seen.sort();
        if let Some(pair) = seen.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(GridError::DuplicateInstanceId(pair[0].clone()));
        }
        if let Some((row, _)) = row_sizes(&instances)
            .into_iter()
            .find(|&(_, size)| size > capacity)
        {
            return Err(GridError::RowFull { row, capacity });
        }

        let mut grid = Self {
            instances,
            capacity,
        };
        normalize(&mut grid.instances);
        sort_row_major(&mut grid.instances);
        debug!(count = grid.instances.len(); "Loaded template layout");
        Ok(grid)
    }

    /// Returns the instances in row-major order.
    pub fn instances(&self) -> &[ModuleInstance] {
        &self.instances
    }

    /// Returns the number of placed instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Returns the configured row capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Looks up an instance by id.
    pub fn get(&self, id: &InstanceId) -> Option<&ModuleInstance> {
        self.instances.iter().find(|i| i.instance_id() == id)
    }

    /// Returns the highest occupied row index, if any.
    pub fn last_row(&self) -> Option<usize> {
        self.instances.iter().map(|i| i.row_index()).max()
    }

    /// Returns the instance list for the persistence collaborator.
    pub fn save(&self) -> Vec<ModuleInstance> {
        self.instances.clone()
    }

    /// Removes every instance (bulk reset, e.g. when the template's
    /// module kind changes).
    pub fn clear(&mut self) {
        if !self.instances.is_empty() {
            debug!(count = self.instances.len(); "Clearing grid");
        }
        self.instances.clear();
    }

    /// Creates a new instance of `module_id` at the resolved target and
    /// returns its id.
    ///
    /// # Errors
    ///
    /// [`GridError::RowFull`] when the intent inserts into a row already
    /// at capacity; the grid is unchanged.
    pub fn insert(
        &mut self,
        module_id: &str,
        intent: &PlacementIntent,
    ) -> Result<InstanceId, GridError> {
        let mut candidate = self.instances.clone();
        let id = self.fresh_id();
        let instance = ModuleInstance::new(id.clone(), module_id, 0, 0);
        self.place(&mut candidate, instance, intent)?;
        self.commit(candidate);

        debug!(module_id, instance_id:% = id; "Inserted module instance");
        Ok(id)
    }

    /// Detaches an instance from its row (closing the column gap) and
    /// places it at the resolved target.
    ///
    /// A drop that reproduces the current layout is a no-op: the grid,
    /// including every `order`, is left untouched and
    /// [`Outcome::Unchanged`] is returned.
    ///
    /// # Errors
    ///
    /// - [`GridError::UnknownInstance`] if the instance does not exist.
    /// - [`GridError::RowFull`] when the target row is at capacity (the
    ///   instance's own row never rejects, since it is detached first).
    pub fn move_existing(
        &mut self,
        id: &InstanceId,
        intent: &PlacementIntent,
    ) -> Result<Outcome, GridError> {
        if let PlacementIntent::ReorderRank { onto } = intent {
            return self.reorder_by_drag_rank(id, onto);
        }

        let index = self
            .instances
            .iter()
            .position(|i| i.instance_id() == id)
            .ok_or_else(|| GridError::UnknownInstance(id.clone()))?;

        let mut candidate = self.instances.clone();
        let moved = Self::detach(&mut candidate, index);
        self.place(&mut candidate, moved, intent)?;

        normalize(&mut candidate);
        sort_row_major(&mut candidate);
        if self.same_shape(&candidate) {
            return Ok(Outcome::Unchanged);
        }

        debug!(instance_id:% = id; "Moved module instance");
        self.instances = candidate;
        Ok(Outcome::Applied)
    }

    /// Deletes an instance, closing the column gap in its row.
    ///
    /// Other rows are never renumbered: removing the only instance of a
    /// row leaves a row gap, which `order` simply skips.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownInstance`] if the instance does not exist.
    pub fn remove(&mut self, id: &InstanceId) -> Result<(), GridError> {
        let index = self
            .instances
            .iter()
            .position(|i| i.instance_id() == id)
            .ok_or_else(|| GridError::UnknownInstance(id.clone()))?;

        let mut candidate = self.instances.clone();
        Self::detach(&mut candidate, index);
        self.commit(candidate);

        debug!(instance_id:% = id; "Removed module instance");
        Ok(())
    }

    /// Duplicates an instance into a fresh row appended after the highest
    /// existing row, returning the copy's id.
    ///
    /// Copies never land in an existing row, so a copy can never overflow
    /// one. A set custom name is carried over with a `(copy)` suffix.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownInstance`] if the instance does not exist.
    pub fn copy(&mut self, id: &InstanceId) -> Result<InstanceId, GridError> {
        let source = self
            .get(id)
            .ok_or_else(|| GridError::UnknownInstance(id.clone()))?;
        let module_id = source.module_id().to_string();
        let derived_name = source.custom_name().map(|name| format!("{name} (copy)"));

        let mut candidate = self.instances.clone();
        let copy_id = self.fresh_id();
        let mut instance = ModuleInstance::new(copy_id.clone(), module_id, 0, 0);
        instance.set_custom_name(derived_name);
        self.place(&mut candidate, instance, &PlacementIntent::NewRowAtEnd)?;
        self.commit(candidate);

        debug!(instance_id:% = id, copy_id:% = copy_id; "Copied module instance");
        Ok(copy_id)
    }

    /// Updates an instance's custom name. Pure field update; no
    /// renumbering happens and `order` is untouched.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownInstance`] if the instance does not exist.
    pub fn rename(&mut self, id: &InstanceId, name: Option<String>) -> Result<Outcome, GridError> {
        let instance = self
            .instances
            .iter_mut()
            .find(|i| i.instance_id() == id)
            .ok_or_else(|| GridError::UnknownInstance(id.clone()))?;

        if instance.custom_name() == name.as_deref() {
            return Ok(Outcome::Unchanged);
        }
        instance.set_custom_name(name);
        Ok(Outcome::Applied)
    }

    /// Reorders the whole list by row-major rank: `from` is removed from
    /// the flat sequence and reinserted after `to` when dragged forward,
    /// before `to` when dragged backward. The reordered sequence is then
    /// laid back into rows preserving the grid's existing row-size
    /// sequence, so whole-list reordering never changes the grid's shape.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownInstance`] if either instance does not exist.
    pub fn reorder_by_drag_rank(
        &mut self,
        from: &InstanceId,
        to: &InstanceId,
    ) -> Result<Outcome, GridError> {
        let from_index = self
            .instances
            .iter()
            .position(|i| i.instance_id() == from)
            .ok_or_else(|| GridError::UnknownInstance(from.clone()))?;
        let to_index = self
            .instances
            .iter()
            .position(|i| i.instance_id() == to)
            .ok_or_else(|| GridError::UnknownInstance(to.clone()))?;
        if from_index == to_index {
            return Ok(Outcome::Unchanged);
        }

        let sizes = row_sizes(&self.instances);
        let mut candidate = self.instances.clone();
        let moved = candidate.remove(from_index);
        // After the removal this lands the moved instance after `to` on a
        // forward drag and before `to` on a backward drag.
        candidate.insert(to_index, moved);

        let mut flat = candidate.iter_mut();
        for (row, size) in sizes {
            for column in 0..size {
                // row_sizes counts exactly the candidate's length
                if let Some(instance) = flat.next() {
                    instance.set_position(row, column);
                }
            }
        }
        self.commit(candidate);

        debug!(from:% = from, to:% = to; "Reordered by drag rank");
        Ok(Outcome::Applied)
    }

    /// Removes `candidate[index]`, shifting the later columns of its row
    /// left by one, and returns the detached instance.
    fn detach(candidate: &mut Vec<ModuleInstance>, index: usize) -> ModuleInstance {
        let detached = candidate.remove(index);
        for instance in candidate.iter_mut() {
            if instance.row_index() == detached.row_index()
                && instance.column_index() > detached.column_index()
            {
                instance.set_position(instance.row_index(), instance.column_index() - 1);
            }
        }
        detached
    }

    /// Places `instance` into `candidate` according to `intent`.
    ///
    /// `PlacementIntent::ReorderRank` is handled by the move path and is
    /// resolved here as insert-right-of the reference instance, which only
    /// library-origin drops reach.
    fn place(
        &self,
        candidate: &mut Vec<ModuleInstance>,
        mut instance: ModuleInstance,
        intent: &PlacementIntent,
    ) -> Result<(), GridError> {
        let (row, column) = match intent {
            PlacementIntent::NewRowAtEnd => {
                let row = candidate
                    .iter()
                    .map(|i| i.row_index() + 1)
                    .max()
                    .unwrap_or(0);
                (row, 0)
            }
            PlacementIntent::NewRowAt { row } => {
                for existing in candidate.iter_mut() {
                    if existing.row_index() >= *row {
                        existing.set_position(existing.row_index() + 1, existing.column_index());
                    }
                }
                (*row, 0)
            }
            PlacementIntent::InColumn { row, column } => {
                self.open_column(candidate, *row, *column)?
            }
            PlacementIntent::ReorderRank { onto } => {
                let reference = candidate
                    .iter()
                    .find(|i| i.instance_id() == onto)
                    .ok_or_else(|| GridError::UnknownInstance(onto.clone()))?;
                let (row, column) = (reference.row_index(), reference.column_index() + 1);
                self.open_column(candidate, row, column)?
            }
        };

        instance.set_position(row, column);
        candidate.push(instance);
        Ok(())
    }

    /// Opens a column slot at `(row, column)`, shifting later columns
    /// right; rejects when the row is at capacity. The column is clamped
    /// to the row's current size, so a zone past the end appends.
    fn open_column(
        &self,
        candidate: &mut [ModuleInstance],
        row: usize,
        column: usize,
    ) -> Result<(usize, usize), GridError> {
        let size = candidate.iter().filter(|i| i.row_index() == row).count();
        if size >= self.capacity {
            return Err(GridError::RowFull {
                row,
                capacity: self.capacity,
            });
        }
        let column = column.min(size);
        for existing in candidate.iter_mut() {
            if existing.row_index() == row && existing.column_index() >= column {
                existing.set_position(row, existing.column_index() + 1);
            }
        }
        Ok((row, column))
    }

    /// Normalizes, sorts, and adopts a candidate list.
    fn commit(&mut self, mut candidate: Vec<ModuleInstance>) {
        normalize(&mut candidate);
        sort_row_major(&mut candidate);
        self.instances = candidate;
    }

    /// Returns `true` when `candidate` (normalized, sorted) places the
    /// same instances in the same row groupings as the current grid. Row
    /// gaps are invisible, so layouts differing only in gap positions
    /// count as the same shape. As a consequence a move that would only
    /// shift a gap is dropped entirely: the stored `rowIndex` values
    /// keep their old gap positions rather than the ones an applied
    /// move would have written.
    fn same_shape(&self, candidate: &[ModuleInstance]) -> bool {
        let groups = |list: &[ModuleInstance]| -> Vec<Vec<InstanceId>> {
            row_groups(list)
                .into_iter()
                .map(|members| {
                    members
                        .into_iter()
                        .map(|index| list[index].instance_id().clone())
                        .collect()
                })
                .collect()
        };
        groups(&self.instances) == groups(candidate)
    }

    /// Generates an instance id not present in the grid.
    fn fresh_id(&self) -> InstanceId {
        loop {
            let id = InstanceId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Asserts the grid invariants; used by the test suites, never at runtime.
#[cfg(any(test, feature = "test-checks"))]
pub fn assert_invariants(grid: &GridModel) {
    let instances = grid.instances();

    let mut ids: Vec<_> = instances.iter().map(|i| i.instance_id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), instances.len(), "instance ids must be unique");

    for members in row_groups(instances) {
        assert!(
            members.len() <= grid.capacity(),
            "row exceeds capacity {}",
            grid.capacity()
        );
        for (column, index) in members.into_iter().enumerate() {
            assert_eq!(
                instances[index].column_index(),
                column,
                "columns must be contiguous from zero"
            );
        }
    }

    let mut sorted: Vec<_> = instances.iter().collect();
    sorted.sort_by_key(|i| (i.row_index(), i.column_index()));
    for (rank, instance) in sorted.iter().enumerate() {
        assert_eq!(
            instance.order(),
            rank + 1,
            "order must be row-major from one"
        );
    }
}
