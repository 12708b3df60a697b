#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail cleanly, never panic.
    let Some((&knob, container)) = data.split_first() else {
        return;
    };
    let mut prefs = fednet::Prefs::new();
    prefs.set_display_level(0);
    prefs.set_history_log_2(u32::from(knob) % 32).unwrap();

    let mut out = Vec::new();
    if fednet::decompress_stream(&mut &container[..], &mut out, &prefs).is_ok() {
        let header = i32::from_le_bytes([container[0], container[1], container[2], container[3]]);
        assert_eq!(out.len() as u64, header as u64);
    }
});
