//! `lsblk -pabOJ` output → [`DeviceTree`].
//!
//! Decoding happens in two passes. serde first reads the document into raw
//! records whose fields are untyped [`RawToken`]s, which only fails on
//! broken JSON or a wrong document shape. Each raw record is then converted
//! field by field, so a bad value is reported against its lsblk key.

use serde::Deserialize;

use crate::error::{DecodeError, Result};
use crate::scalar::{RawToken, decode_flag, decode_integer, decode_quantity, decode_text};
use crate::types::{DeviceRecord, DeviceTree};

// Children nest to any depth. Both passes grow the stack on the heap once
// less than RED_ZONE is left, instead of relying on the caller's stack.
const RED_ZONE: usize = 256 * 1024;
const STACK_GROWTH: usize = 4 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct RawDocument {
    blockdevices: Vec<RawRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    name: Option<RawToken>,
    kname: Option<RawToken>,
    pkname: Option<RawToken>,
    path: Option<RawToken>,
    #[serde(rename = "maj:min")]
    maj_min: Option<RawToken>,
    fsavail: Option<RawToken>,
    fssize: Option<RawToken>,
    fstype: Option<RawToken>,
    fsused: Option<RawToken>,
    #[serde(rename = "fsuse%")]
    fsuse_percent: Option<RawToken>,
    fsver: Option<RawToken>,
    mountpoint: Option<RawToken>,
    label: Option<RawToken>,
    uuid: Option<RawToken>,
    ptuuid: Option<RawToken>,
    pttype: Option<RawToken>,
    parttype: Option<RawToken>,
    parttypename: Option<RawToken>,
    partlabel: Option<RawToken>,
    partuuid: Option<RawToken>,
    partflags: Option<RawToken>,
    ra: Option<RawToken>,
    ro: Option<RawToken>,
    rm: Option<RawToken>,
    hotplug: Option<RawToken>,
    rota: Option<RawToken>,
    rand: Option<RawToken>,
    model: Option<RawToken>,
    serial: Option<RawToken>,
    size: Option<RawToken>,
    state: Option<RawToken>,
    owner: Option<RawToken>,
    group: Option<RawToken>,
    mode: Option<RawToken>,
    alignment: Option<RawToken>,
    #[serde(rename = "min-io")]
    min_io: Option<RawToken>,
    #[serde(rename = "opt-io")]
    opt_io: Option<RawToken>,
    #[serde(rename = "phy-sec")]
    phy_sec: Option<RawToken>,
    #[serde(rename = "log-sec")]
    log_sec: Option<RawToken>,
    sched: Option<RawToken>,
    #[serde(rename = "rq-size")]
    rq_size: Option<RawToken>,
    #[serde(rename = "type")]
    device_type: Option<RawToken>,
    #[serde(rename = "disc-aln")]
    disc_aln: Option<RawToken>,
    #[serde(rename = "disc-gran")]
    disc_gran: Option<RawToken>,
    #[serde(rename = "disc-max")]
    disc_max: Option<RawToken>,
    #[serde(rename = "disc-zero")]
    disc_zero: Option<RawToken>,
    wsame: Option<RawToken>,
    wwn: Option<RawToken>,
    hctl: Option<RawToken>,
    tran: Option<RawToken>,
    subsystems: Option<RawToken>,
    rev: Option<RawToken>,
    vendor: Option<RawToken>,
    zoned: Option<RawToken>,
    dax: Option<RawToken>,
    children: Option<Vec<RawRecord>>,
}

/// Decodes one complete lsblk JSON snapshot.
///
/// Fails with [`DecodeError::MalformedDocument`] when the buffer is not JSON
/// or is not shaped as `{"blockdevices": [ {..}, .. ]}`, and with
/// [`DecodeError::MalformedScalar`] on the first field that does not decode.
/// Nothing is returned on failure.
pub fn decode_device_tree(bytes: &[u8]) -> Result<DeviceTree> {
    let mut json = serde_json::Deserializer::from_slice(bytes);
    json.disable_recursion_limit();

    let mut stacked = serde_stacker::Deserializer::new(&mut json);
    stacked.red_zone = RED_ZONE;
    stacked.stack_size = STACK_GROWTH;

    let document = RawDocument::deserialize(stacked)?;
    json.end()?;

    let devices = decode_records(document.blockdevices)?;
    Ok(DeviceTree::new(devices))
}

fn decode_records(raw: Vec<RawRecord>) -> Result<Vec<DeviceRecord>> {
    raw.into_iter()
        .map(|record| stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || decode_record(record)))
        .collect()
}

fn decode_record(raw: RawRecord) -> Result<DeviceRecord> {
    let size = decode_quantity("size", raw.size.as_ref().map(RawToken::as_str))?;
    let fssize = decode_quantity("fssize", raw.fssize.as_ref().map(RawToken::as_str))?;
    let fsavail = decode_quantity("fsavail", raw.fsavail.as_ref().map(RawToken::as_str))?;

    let ro = decode_flag("ro", raw.ro.as_ref())?;
    let rm = decode_flag("rm", raw.rm.as_ref())?;
    let hotplug = decode_flag("hotplug", raw.hotplug.as_ref())?;
    let rota = decode_flag("rota", raw.rota.as_ref())?;
    let rand = decode_flag("rand", raw.rand.as_ref())?;
    let disc_zero = decode_flag("disc-zero", raw.disc_zero.as_ref())?;
    let dax = decode_flag("dax", raw.dax.as_ref())?;

    let ra = integer("ra", &raw.ra)?;
    let alignment = integer("alignment", &raw.alignment)?;
    let min_io = integer("min-io", &raw.min_io)?;
    let opt_io = integer("opt-io", &raw.opt_io)?;
    let phy_sec = integer("phy-sec", &raw.phy_sec)?;
    let log_sec = integer("log-sec", &raw.log_sec)?;
    let rq_size = integer("rq-size", &raw.rq_size)?;
    let disc_aln = integer("disc-aln", &raw.disc_aln)?;
    let disc_gran = integer("disc-gran", &raw.disc_gran)?;
    let disc_max = integer("disc-max", &raw.disc_max)?;
    let wsame = integer("wsame", &raw.wsame)?;

    let children = decode_records(raw.children.unwrap_or_default())?;

    Ok(DeviceRecord {
        name: decode_text(raw.name),
        kname: decode_text(raw.kname),
        pkname: decode_text(raw.pkname),
        path: decode_text(raw.path),
        maj_min: decode_text(raw.maj_min),
        fsavail,
        fssize,
        fstype: decode_text(raw.fstype),
        fsused: decode_text(raw.fsused),
        fsuse_percent: decode_text(raw.fsuse_percent),
        fsver: decode_text(raw.fsver),
        mountpoint: decode_text(raw.mountpoint),
        label: decode_text(raw.label),
        uuid: decode_text(raw.uuid),
        ptuuid: decode_text(raw.ptuuid),
        pttype: decode_text(raw.pttype),
        parttype: decode_text(raw.parttype),
        parttypename: decode_text(raw.parttypename),
        partlabel: decode_text(raw.partlabel),
        partuuid: decode_text(raw.partuuid),
        partflags: decode_text(raw.partflags),
        ra,
        ro,
        rm,
        hotplug,
        rota,
        rand,
        model: decode_text(raw.model),
        serial: decode_text(raw.serial),
        size,
        state: decode_text(raw.state),
        owner: decode_text(raw.owner),
        group: decode_text(raw.group),
        mode: decode_text(raw.mode),
        alignment,
        min_io,
        opt_io,
        phy_sec,
        log_sec,
        sched: decode_text(raw.sched),
        rq_size,
        device_type: decode_text(raw.device_type),
        disc_aln,
        disc_gran,
        disc_max,
        disc_zero,
        wsame,
        wwn: decode_text(raw.wwn),
        hctl: decode_text(raw.hctl),
        tran: decode_text(raw.tran),
        subsystems: decode_text(raw.subsystems),
        rev: decode_text(raw.rev),
        vendor: decode_text(raw.vendor),
        zoned: decode_text(raw.zoned),
        dax,
        children,
    })
}

fn integer(key: &str, raw: &Option<RawToken>) -> Result<Option<i64>> {
    decode_integer(key, raw.as_ref().map(RawToken::as_str))
}

impl TryFrom<&[u8]> for DeviceTree {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        decode_device_tree(bytes)
    }
}
