//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. The runtime `debug_enabled` setting only unlocks the
//! per-scan summary, these flags gate the noisier per-candidate output.

pub struct DebugFlags {
    /// Emit every candidate the matcher yields, with its normalized value.
    pub print_candidates: bool,
    /// Emit why a candidate was rejected (parse, geometry, containment, strike-out).
    pub print_rejections: bool,
    /// Emit scheduler state transitions (lock, unlock, coalesce).
    pub print_state_transitions: bool,
    /// Emit settings reloads coming from the live update signal.
    pub print_settings_reload: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_candidates: false,
    print_rejections: false,
    print_state_transitions: false,
    print_settings_reload: true,
};
