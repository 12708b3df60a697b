// arg_utils.rs - Low-level argument helpers.

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Returns `true` if `opt` (without its leading `-`) abbreviates `name`:
/// at least `min_len` characters long and a case-insensitive prefix of it.
pub fn is_switch(opt: &str, name: &str, min_len: usize) -> bool {
    opt.len() >= min_len
        && opt.len() <= name.len()
        && name.as_bytes()[..opt.len()].eq_ignore_ascii_case(opt.as_bytes())
}

/// Parses a whole decimal argument within `min..=max`.
pub fn read_bounded_u32(s: &str, min: u32, max: u32) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|v| (min..=max).contains(v))
}
