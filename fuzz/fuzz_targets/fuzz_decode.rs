#![no_main]

use bytes::Bytes;
use hpack::{Decoder, DynamicTable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut input = Bytes::from(data.to_vec());
    let mut table = DynamicTable::new();
    let _ = Decoder::new().decode(&mut input, &mut table);
});
