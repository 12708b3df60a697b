// timefn - wall-clock and CPU-time measurement for timed runs
//
// Wall-clock spans use std::time::Instant. The `-time` switch reports
// processor time instead, read through the C runtime's clock().

use std::time::Instant;

/// Nanosecond duration type.
pub type DurationNs = u64;

/// Opaque timestamp container. The absolute value is not meaningful;
/// use it only to compute a duration between two measurements.
#[derive(Clone, Copy)]
pub struct TimeT {
    pub(crate) t: Instant,
}

impl TimeT {
    pub fn new() -> Self {
        TimeT { t: Instant::now() }
    }
}

impl Default for TimeT {
    fn default() -> Self {
        TimeT::new()
    }
}

/// Returns current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Measures nanoseconds elapsed since `clock_start`.
pub fn clock_span_ns(clock_start: TimeT) -> DurationNs {
    clock_start.t.elapsed().as_nanos() as DurationNs
}

// ---------------------------------------------------------------------------
// Processor time
// ---------------------------------------------------------------------------

// CLOCKS_PER_SEC is 1_000_000 on POSIX (SUSv2) and 1000 with the MSVC runtime.
#[cfg(not(target_os = "windows"))]
const CLOCKS_PER_SEC: f64 = 1_000_000.0;
#[cfg(target_os = "windows")]
const CLOCKS_PER_SEC: f64 = 1_000.0;

/// Processor-time stamp taken with [`cpu_now`].
#[derive(Clone, Copy, Debug)]
pub struct CpuStamp(libc::clock_t);

// The libc crate does not bind the C runtime's clock(); declare it here.
extern "C" {
    fn clock() -> libc::clock_t;
}

/// Reads the processor time consumed by the process so far.
pub fn cpu_now() -> CpuStamp {
    // SAFETY: clock() has no preconditions and touches no caller memory.
    CpuStamp(unsafe { clock() })
}

/// Returns seconds of processor time consumed since `start`.
///
/// A runtime that cannot report processor time returns `(clock_t)-1`; the
/// span is then reported as zero rather than as a bogus negative value.
pub fn cpu_span_sec(start: CpuStamp) -> f64 {
    let end = cpu_now();
    if start.0 == -1 as libc::clock_t || end.0 == -1 as libc::clock_t {
        return 0.0;
    }
    ((end.0 as f64 - start.0 as f64) / CLOCKS_PER_SEC).max(0.0)
}
