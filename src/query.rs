//! Queries over a decoded [`DeviceTree`].
//!
//! Partition queries follow lsblk's disk → partition convention and look at
//! the direct children of root devices only. Use [`DeviceTree::walk`] to reach
//! deeper levels.

use crate::types::{DeviceRecord, DeviceTree};

/// Direct children of every root device accepted by `device_filter` that are
/// themselves accepted by `partition_filter`, in source order.
pub fn descendant_partitions<D, P>(
    tree: &DeviceTree,
    device_filter: D,
    partition_filter: P,
) -> Vec<&DeviceRecord>
where
    D: Fn(&DeviceRecord) -> bool,
    P: Fn(&DeviceRecord) -> bool,
{
    tree.iter()
        .filter(|device| device_filter(*device))
        .flat_map(|device| device.children.iter())
        .filter(|partition| partition_filter(*partition))
        .collect()
}

pub fn unmounted_removable_partitions(tree: &DeviceTree) -> Vec<&DeviceRecord> {
    descendant_partitions(tree, DeviceRecord::is_removable_transport, |p| {
        !p.is_mounted()
    })
}

pub fn mounted_removable_partitions(tree: &DeviceTree) -> Vec<&DeviceRecord> {
    descendant_partitions(
        tree,
        DeviceRecord::is_removable_transport,
        DeviceRecord::is_mounted,
    )
}

/// Maximum by `key`; on ties the earliest record wins. `None` on empty input.
pub fn largest_by<'a, I, K>(records: I, key: K) -> Option<&'a DeviceRecord>
where
    I: IntoIterator<Item = &'a DeviceRecord>,
    K: Fn(&DeviceRecord) -> i64,
{
    let mut best: Option<(&'a DeviceRecord, i64)> = None;
    for record in records {
        let value = key(record);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((record, value)),
        }
    }
    best.map(|(record, _)| record)
}

/// Biggest unmounted partition on a USB device, by device size.
pub fn largest_unmounted_removable_partition(tree: &DeviceTree) -> Option<&DeviceRecord> {
    largest_by(unmounted_removable_partitions(tree), |p| p.size.exact_value())
}

/// Mounted partition on a USB device with the most free filesystem space.
pub fn mounted_removable_partition_with_most_available_space(
    tree: &DeviceTree,
) -> Option<&DeviceRecord> {
    largest_by(mounted_removable_partitions(tree), |p| {
        p.fsavail.exact_value()
    })
}
