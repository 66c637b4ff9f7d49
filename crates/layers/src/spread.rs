use std::collections::HashMap;

/// Degrees between adjacent markers spread off a shared coordinate.
pub const SPREAD_STEP_DEG: f64 = 0.01;

// Repeats walk a 3-wide grid: latitude steps within a column, longitude
// advances every third repeat.
const SPREAD_GRID_COLUMNS: u64 = 3;

/// Nudges repeated coordinates apart so stacked markers stay individually
/// clickable. Keys are the raw parsed coordinates, matched bit-for-bit; the
/// first occurrence of a pair is never moved, and placement depends only on
/// how many times the pair has been seen before.
#[derive(Debug, Default)]
pub struct SpreadRegistry {
    seen: HashMap<(u64, u64), u64>,
}

impl SpreadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the (lat, lon) to place this occurrence of the raw pair at,
    /// and records the occurrence.
    pub fn place(&mut self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let key = (lat_deg.to_bits(), lon_deg.to_bits());
        match self.seen.get_mut(&key) {
            Some(count) => {
                let c = *count;
                *count += 1;
                (
                    lat_deg + SPREAD_STEP_DEG * (c % SPREAD_GRID_COLUMNS) as f64,
                    lon_deg + SPREAD_STEP_DEG * (c / SPREAD_GRID_COLUMNS) as f64,
                )
            }
            None => {
                self.seen.insert(key, 1);
                (lat_deg, lon_deg)
            }
        }
    }
}
