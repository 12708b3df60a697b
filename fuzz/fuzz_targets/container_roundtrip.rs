#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the history size and buffer size; the rest is payload.
    let Some((&knob, payload)) = data.split_first() else {
        return;
    };
    let mut prefs = fednet::Prefs::new();
    prefs.set_display_level(0);
    prefs.set_history_log_2(u32::from(knob) % 32).unwrap();
    prefs.set_buffer_size(usize::from(knob >> 5) * 64 + 1);

    let mut packed = Cursor::new(Vec::new());
    fednet::compress_stream(&mut Cursor::new(payload), &mut packed, &prefs).unwrap();
    let packed = packed.into_inner();

    let mut out = Vec::new();
    fednet::decompress_stream(&mut packed.as_slice(), &mut out, &prefs).unwrap();
    assert_eq!(out, payload);
});
