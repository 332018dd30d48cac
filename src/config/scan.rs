//! Scan budget and hit-testing configuration

/// Settings for the per-frame text walk
pub struct WalkSettings {
    // Upper bound on text nodes inspected by a single scan (visible or not)
    pub max_nodes_per_scan: usize,
    // How many leading chars of the hovered container feed the quick pre-filter
    pub quick_scan_sample_chars: usize,
}

/// Settings for geometry checks
pub struct HitSettings {
    // Pixels added on every side of a price rect before testing the pointer
    pub tolerance_px: f64,
    // Number of elements (anchor included) inspected for line-through decoration
    pub strike_out_depth: usize,
}

/// The Master Scan Configuration
pub struct ScanConfig {
    pub walk: WalkSettings,
    pub hit: HitSettings,
}

pub const SCAN: ScanConfig = ScanConfig {
    walk: WalkSettings {
        max_nodes_per_scan: 80,
        quick_scan_sample_chars: 2000,
    },
    hit: HitSettings {
        tolerance_px: 2.0,
        strike_out_depth: 4,
    },
};

pub const MAX_NODES_PER_SCAN: usize = SCAN.walk.max_nodes_per_scan;
pub const QUICK_SCAN_SAMPLE_CHARS: usize = SCAN.walk.quick_scan_sample_chars;
pub const DEFAULT_TOLERANCE_PX: f64 = SCAN.hit.tolerance_px;
pub const STRIKE_OUT_DEPTH: usize = SCAN.hit.strike_out_depth;
