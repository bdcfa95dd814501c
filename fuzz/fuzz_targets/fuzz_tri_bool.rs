#![no_main]

use libfuzzer_sys::fuzz_target;
use lsblk_tree::{decode_quantity, decode_tri_bool};

fuzz_target!(|token: &str| {
    let _ = decode_tri_bool("rm", token);
    let _ = decode_quantity("size", Some(token));
});
