//! The placement resolver.
//!
//! Translates a drag-release event (the gesture's [`DragSource`] and the
//! [`DropTarget`] it ended over) into a [`PlacementIntent`], the single
//! mutation the grid should apply. The resolver is a pure function of
//! `(source, target, grid)`: it performs no mutation itself, which keeps
//! it unit-testable without a UI harness.

use tessera_core::instance::InstanceId;

use crate::{grid::GridModel, session::DragSource};

/// Which side of a column a zone is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A droppable the pointer can release over.
///
/// Zones are transient, position-specific targets offered by the UI only
/// while a drag is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The canvas background, outside any row.
    Canvas,

    /// The seam zone attached below row `row` (below the whole list for
    /// the last row).
    RowSeam { row: usize },

    /// A zone attached to the left or right edge of column `column` in
    /// row `row`.
    ColumnZone { row: usize, column: usize, side: Side },

    /// Directly over another instance's card, not over any zone.
    Instance(InstanceId),
}

/// The grid mutation a drop resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementIntent {
    /// Start a new row after the last existing row.
    NewRowAtEnd,

    /// Start a new row at this index; rows at or after it shift down by
    /// one.
    NewRowAt { row: usize },

    /// Insert into an existing row at this column; instances at or after
    /// the column shift right by one. Rejected by the grid when the row is
    /// at capacity.
    InColumn { row: usize, column: usize },

    /// Reorder the whole list by row-major rank, landing next to `onto`.
    /// Only produced for canvas-origin drags.
    ReorderRank { onto: InstanceId },
}

/// Resolves a drop into the mutation to apply.
///
/// Zone targets resolve the same way for both drag sources. A drop
/// directly on another instance's card depends on the source: a
/// canvas-origin drag swaps ranks with the hovered instance
/// ([`PlacementIntent::ReorderRank`]), while a library-origin drag
/// inserts to the hovered instance's right. A hovered instance that no
/// longer exists in the grid falls back to a new row at the end.
pub fn resolve(source: &DragSource, target: &DropTarget, grid: &GridModel) -> PlacementIntent {
    match target {
        DropTarget::Canvas => PlacementIntent::NewRowAtEnd,
        DropTarget::RowSeam { row } => PlacementIntent::NewRowAt { row: row + 1 },
        DropTarget::ColumnZone { row, column, side } => PlacementIntent::InColumn {
            row: *row,
            column: match side {
                Side::Left => *column,
                Side::Right => column + 1,
            },
        },
        DropTarget::Instance(onto) => match source {
            DragSource::Canvas(_) => PlacementIntent::ReorderRank { onto: onto.clone() },
            DragSource::Library(_) => match grid.get(onto) {
                Some(hovered) => PlacementIntent::InColumn {
                    row: hovered.row_index(),
                    column: hovered.column_index() + 1,
                },
                None => PlacementIntent::NewRowAtEnd,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::module::ModuleDefinition;

    use super::*;
    use crate::grid::GridModel;

    fn library_source() -> DragSource {
        DragSource::Library(ModuleDefinition::new("gas", "Shielding Gas", "Gas"))
    }

    fn grid_with_row(ids: &[&str]) -> GridModel {
        let mut grid = GridModel::new();
        for &id in ids {
            grid.insert(id, &PlacementIntent::NewRowAtEnd).unwrap();
        }
        grid
    }

    #[test]
    fn test_canvas_background_resolves_to_trailing_row() {
        let grid = GridModel::new();

        let intent = resolve(&library_source(), &DropTarget::Canvas, &grid);
        assert_eq!(intent, PlacementIntent::NewRowAtEnd);
    }

    #[test]
    fn test_row_seam_resolves_to_row_below() {
        let grid = grid_with_row(&["a", "b"]);

        let intent = resolve(&library_source(), &DropTarget::RowSeam { row: 0 }, &grid);
        assert_eq!(intent, PlacementIntent::NewRowAt { row: 1 });
    }

    #[test]
    fn test_column_zone_sides() {
        let grid = grid_with_row(&["a"]);
        let left = DropTarget::ColumnZone {
            row: 0,
            column: 2,
            side: Side::Left,
        };
        let right = DropTarget::ColumnZone {
            row: 0,
            column: 2,
            side: Side::Right,
        };

        assert_eq!(
            resolve(&library_source(), &left, &grid),
            PlacementIntent::InColumn { row: 0, column: 2 }
        );
        assert_eq!(
            resolve(&library_source(), &right, &grid),
            PlacementIntent::InColumn { row: 0, column: 3 }
        );
    }

    #[test]
    fn test_canvas_drag_onto_card_swaps_rank() {
        let grid = grid_with_row(&["a", "b"]);
        let onto = grid.instances()[1].instance_id().clone();
        let source = DragSource::Canvas(grid.instances()[0].instance_id().clone());

        let intent = resolve(&source, &DropTarget::Instance(onto.clone()), &grid);
        assert_eq!(intent, PlacementIntent::ReorderRank { onto });
    }

    #[test]
    fn test_library_drag_onto_card_inserts_right_of_it() {
        let grid = grid_with_row(&["a"]);
        let onto = grid.instances()[0].instance_id().clone();

        let intent = resolve(&library_source(), &DropTarget::Instance(onto), &grid);
        assert_eq!(intent, PlacementIntent::InColumn { row: 0, column: 1 });
    }

    #[test]
    fn test_stale_hovered_instance_falls_back_to_trailing_row() {
        let grid = grid_with_row(&["a"]);
        let stale = InstanceId::from_raw("mi-gone");

        let intent = resolve(&library_source(), &DropTarget::Instance(stale), &grid);
        assert_eq!(intent, PlacementIntent::NewRowAtEnd);
    }
}
