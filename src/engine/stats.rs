use serde::Serialize;

/// Scan counters exposed to debug tooling.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Frames that actually ran a scan
    pub scans: u64,
    /// Text nodes inspected by the most recent scan
    pub nodes_checked: usize,
    /// Scans that locked onto a price
    pub hits: u64,
    pub last_scan_ms: f64,
}

impl ScanStats {
    pub fn begin_frame(&mut self) {
        self.nodes_checked = 0;
    }
}
