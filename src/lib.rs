pub mod decode;
pub mod error;
pub mod query;
pub mod scalar;
pub mod source;
pub mod types;
pub mod units;

pub use decode::decode_device_tree;
pub use error::{DecodeError, Result};
pub use query::{
    descendant_partitions, largest_by, largest_unmounted_removable_partition,
    mounted_removable_partition_with_most_available_space, mounted_removable_partitions,
    unmounted_removable_partitions,
};
pub use scalar::{Quantity, RawToken, decode_integer, decode_quantity, decode_tri_bool};
pub use source::{FileSource, ReaderSource, SnapshotSource, SourceError, load_tree};
pub use types::{DeviceRecord, DeviceTree, Walk};
pub use units::{format_iec, format_si};
