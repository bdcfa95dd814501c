use serde::Serialize;

use crate::scalar::Quantity;

pub const RUNNING_STATE: &str = "running";
pub const REMOVABLE_TRANSPORT: &str = "usb";

/// One node of the lsblk tree: a disk, partition, loop device, array or
/// logical volume.
///
/// Field names follow lsblk column names. Serialization writes the exact
/// lsblk keys back, so a decoded tree can be saved and decoded again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    /// Device name
    pub name: String,
    /// Internal kernel device name
    pub kname: String,
    /// Internal parent kernel device name
    pub pkname: String,
    /// Path to the device node
    pub path: String,
    /// Major:minor device number
    #[serde(rename = "maj:min")]
    pub maj_min: String,

    /// Filesystem size available
    pub fsavail: Quantity,
    /// Filesystem size
    pub fssize: Quantity,
    pub fstype: String,
    pub fsused: String,
    #[serde(rename = "fsuse%")]
    pub fsuse_percent: String,
    pub fsver: String,
    pub mountpoint: String,
    pub label: String,
    pub uuid: String,

    /// Partition table identifier, usually a UUID
    pub ptuuid: String,
    pub pttype: String,
    /// Partition type code or UUID
    pub parttype: String,
    pub parttypename: String,
    pub partlabel: String,
    pub partuuid: String,
    pub partflags: String,

    /// Read-ahead
    pub ra: Option<i64>,
    pub ro: bool,
    /// Removable media
    pub rm: bool,
    /// Removable or hotplug device (usb, pcmcia, ...)
    pub hotplug: bool,
    pub rota: bool,
    /// Contributes to the entropy pool
    pub rand: bool,

    pub model: String,
    pub serial: String,
    pub size: Quantity,
    /// e.g. running, suspended, live
    pub state: String,
    pub owner: String,
    pub group: String,
    /// Device node permissions, e.g. brw-rw----
    pub mode: String,

    pub alignment: Option<i64>,
    #[serde(rename = "min-io")]
    pub min_io: Option<i64>,
    #[serde(rename = "opt-io")]
    pub opt_io: Option<i64>,
    #[serde(rename = "phy-sec")]
    pub phy_sec: Option<i64>,
    #[serde(rename = "log-sec")]
    pub log_sec: Option<i64>,
    /// I/O scheduler, e.g. mq-deadline
    pub sched: String,
    #[serde(rename = "rq-size")]
    pub rq_size: Option<i64>,
    /// disk, part, loop, crypt, lvm, raid1, ...
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(rename = "disc-aln")]
    pub disc_aln: Option<i64>,
    #[serde(rename = "disc-gran")]
    pub disc_gran: Option<i64>,
    #[serde(rename = "disc-max")]
    pub disc_max: Option<i64>,
    #[serde(rename = "disc-zero")]
    pub disc_zero: bool,
    /// Write-same max bytes
    pub wsame: Option<i64>,
    pub wwn: String,
    /// Host:Channel:Target:Lun for SCSI
    pub hctl: String,
    /// Transport, e.g. usb, nvme, sata
    pub tran: String,
    /// De-duplicated subsystem chain, e.g. block:scsi:usb:pci
    pub subsystems: String,
    pub rev: String,
    pub vendor: String,
    pub zoned: String,
    pub dax: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeviceRecord>,
}

impl DeviceRecord {
    pub fn has_partitions(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.state == RUNNING_STATE
    }

    pub fn is_mounted(&self) -> bool {
        !self.mountpoint.is_empty()
    }

    /// Exact, case-sensitive match on the `usb` transport.
    pub fn is_removable_transport(&self) -> bool {
        self.tran == REMOVABLE_TRANSPORT
    }

    /// Every record below this one, depth-first, parents before children.
    pub fn descendants(&self) -> Walk<'_> {
        Walk::new(&self.children)
    }
}

/// Root devices of one lsblk snapshot, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceTree {
    #[serde(rename = "blockdevices")]
    devices: Vec<DeviceRecord>,
}

impl DeviceTree {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self { devices }
    }

    #[inline]
    pub fn roots(&self) -> &[DeviceRecord] {
        &self.devices
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, DeviceRecord> {
        self.devices.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Every record at every depth, depth-first, parents before children.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.devices)
    }

    pub fn find_by_path(&self, path: &str) -> Option<&DeviceRecord> {
        self.walk().find(|record| record.path == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&DeviceRecord> {
        self.walk().find(|record| record.name == name)
    }

    pub fn into_devices(self) -> Vec<DeviceRecord> {
        self.devices
    }
}

impl<'a> IntoIterator for &'a DeviceTree {
    type Item = &'a DeviceRecord;
    type IntoIter = std::slice::Iter<'a, DeviceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}

/// Pre-order traversal over a forest of records.
pub struct Walk<'a> {
    stack: Vec<&'a DeviceRecord>,
}

impl<'a> Walk<'a> {
    fn new(level: &'a [DeviceRecord]) -> Self {
        Self {
            stack: level.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DeviceRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.stack.pop()?;
        self.stack.extend(record.children.iter().rev());
        Some(record)
    }
}
