//! Index renormalization after grid mutations.
//!
//! After any structural change the grid runs [`normalize`] over its
//! instance list: per row, column indices are reassigned to `0..k-1`
//! preserving the relative order; then a strictly increasing row-major
//! `order` starting at 1 is assigned across rows. Row indices themselves
//! are never touched: removing the last instance of a row leaves a row
//! gap, and `order` simply skips it.
//!
//! Normalization is idempotent: applying it to an already-normalized list
//! yields an identical list.

use std::collections::BTreeMap;

use tessera_core::instance::ModuleInstance;

/// Renormalizes column indices and row-major order in place.
///
/// Instances are grouped by `row_index` and sorted within each row by
/// their current `column_index` (stable, so equal columns keep their list
/// order); columns are reassigned to `0..k-1` and `order` is assigned
/// from 1 across rows in ascending row order.
pub fn normalize(instances: &mut [ModuleInstance]) {
    let mut order = 1;
    for members in row_groups(instances) {
        for (column, index) in members.into_iter().enumerate() {
            let row = instances[index].row_index();
            instances[index].set_position(row, column);
            instances[index].set_order(order);
            order += 1;
        }
    }
}

/// Sorts the list into row-major order (row ascending, then column
/// ascending). Run after [`normalize`] so the stored list, the preview,
/// and the persisted array all share one traversal order.
pub fn sort_row_major(instances: &mut [ModuleInstance]) {
    instances.sort_by_key(|instance| (instance.row_index(), instance.column_index()));
}

/// Returns the indices of `instances` grouped by row, rows ascending,
/// members sorted by current column (stable).
pub fn row_groups(instances: &[ModuleInstance]) -> Vec<Vec<usize>> {
    let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, instance) in instances.iter().enumerate() {
        rows.entry(instance.row_index()).or_default().push(index);
    }
    rows.into_values()
        .map(|mut members| {
            members.sort_by_key(|&index| instances[index].column_index());
            members
        })
        .collect()
}

/// Returns the occupied row indices (ascending) paired with their sizes.
pub fn row_sizes(instances: &[ModuleInstance]) -> Vec<(usize, usize)> {
    let mut rows: BTreeMap<usize, usize> = BTreeMap::new();
    for instance in instances {
        *rows.entry(instance.row_index()).or_default() += 1;
    }
    rows.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use tessera_core::instance::InstanceId;

    use super::*;

    fn instance(id: &str, row: usize, column: usize) -> ModuleInstance {
        ModuleInstance::new(InstanceId::from_raw(id), "m", row, column)
    }

    fn coords(instances: &[ModuleInstance]) -> Vec<(&str, usize, usize, usize)> {
        instances
            .iter()
            .map(|i| (i.instance_id().as_str(), i.row_index(), i.column_index(), i.order()))
            .collect()
    }

    #[test]
    fn test_normalize_closes_column_gaps() {
        let mut instances = vec![instance("a", 0, 0), instance("b", 0, 2), instance("c", 0, 5)];

        normalize(&mut instances);

        assert_eq!(
            coords(&instances),
            vec![("a", 0, 0, 1), ("b", 0, 1, 2), ("c", 0, 2, 3)]
        );
    }

    #[test]
    fn test_normalize_orders_across_row_gaps() {
        let mut instances = vec![instance("a", 0, 0), instance("b", 3, 0), instance("c", 3, 1)];

        normalize(&mut instances);

        // Row 3 keeps its index; order skips the empty rows.
        assert_eq!(
            coords(&instances),
            vec![("a", 0, 0, 1), ("b", 3, 0, 2), ("c", 3, 1, 3)]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut instances = vec![
            instance("b", 1, 3),
            instance("a", 0, 0),
            instance("c", 1, 0),
        ];

        normalize(&mut instances);
        let first = instances.clone();
        normalize(&mut instances);

        assert_eq!(instances, first);
    }

    #[test]
    fn test_sort_row_major() {
        let mut instances = vec![
            instance("c", 1, 0),
            instance("b", 0, 1),
            instance("a", 0, 0),
        ];

        normalize(&mut instances);
        sort_row_major(&mut instances);

        let ids: Vec<_> = instances.iter().map(|i| i.instance_id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_row_sizes() {
        let instances = vec![instance("a", 0, 0), instance("b", 2, 0), instance("c", 2, 1)];

        assert_eq!(row_sizes(&instances), vec![(0, 1), (2, 2)]);
    }

    #[test]
    fn test_equal_columns_keep_list_order() {
        // Corrupt input with duplicate columns: the stable sort keeps the
        // earlier list entry first.
        let mut instances = vec![instance("a", 0, 1), instance("b", 0, 1)];

        normalize(&mut instances);

        assert_eq!(coords(&instances), vec![("a", 0, 0, 1), ("b", 0, 1, 2)]);
    }
}
