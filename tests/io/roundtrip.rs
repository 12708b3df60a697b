// Property tests: any byte sequence survives compress then decompress for
// every legal history size and buffer size.

use proptest::prelude::*;

use super::common::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_bytes_round_trip(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        history_log_2 in 0u32..=31,
        buffer_size in 1usize..600,
    ) {
        let mut prefs = quiet_prefs_with_history(history_log_2);
        prefs.set_buffer_size(buffer_size);
        let container = compress_bytes(&data, &prefs);
        prop_assert_eq!(header_of(&container), data.len() as i32);
        prop_assert_eq!(decompress_bytes(&container, &prefs).unwrap(), data);
    }

    #[test]
    fn repetitive_bytes_round_trip(
        unit in proptest::collection::vec(any::<u8>(), 1..16),
        repeats in 1usize..500,
        history_log_2 in 0u32..=16,
    ) {
        let data: Vec<u8> = unit.iter().copied().cycle().take(unit.len() * repeats).collect();
        let prefs = quiet_prefs_with_history(history_log_2);
        let container = compress_bytes(&data, &prefs);
        prop_assert_eq!(decompress_bytes(&container, &prefs).unwrap(), data);
    }
}
