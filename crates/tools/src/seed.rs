use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dungeon_core::DungeonRng;

/// Largest seed handed out by `--new-seed`.
pub const MAX_FRESH_SEED: i32 = 999_999;

static FRESH_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A fresh seed in `0..=MAX_FRESH_SEED` from wall-clock time and process identity.
pub fn fresh_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = FRESH_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    DungeonRng::new(entropy).int_range(0, MAX_FRESH_SEED) as u64
}
