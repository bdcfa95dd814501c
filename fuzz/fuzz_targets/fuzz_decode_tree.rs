#![no_main]

use libfuzzer_sys::fuzz_target;
use lsblk_tree::{decode_device_tree, largest_unmounted_removable_partition};

fuzz_target!(|data: &[u8]| {
    if let Ok(tree) = decode_device_tree(data) {
        let _ = tree.walk().count();
        let _ = largest_unmounted_removable_partition(&tree);
    }
});
