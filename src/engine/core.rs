use std::sync::Arc;

use crate::analysis::{
    find_candidates, hit_test, is_rendered_text_node, is_struck_through, looks_like_price,
    normalize, rect_for, sample_prefix,
};
use crate::config::{DEBUG_FLAGS, MAX_NODES_PER_SCAN, QUICK_SCAN_SAMPLE_CHARS, Settings};
use crate::domain::duration::describe_amount;
use crate::page::Page;
use crate::utils::app_time;

use super::messages::{MoveOutcome, PointerMove, Renderer};
use super::state::{Hit, ScanState};
use super::stats::ScanStats;

/// The hover scan scheduler.
///
/// Pointer-moves are cheap: while the pointer stays inside the locked price
/// the engine only refreshes the description. Anything else is deferred to
/// `on_frame`, which the host calls once per requested display refresh. Moves
/// arriving before that frame replace each other instead of queueing.
pub struct HoverEngine<E, R> {
    state: ScanState<E>,
    /// Swapped whole on live updates; a scan keeps the Arc it started with
    settings: Arc<Settings>,
    enabled: bool,
    renderer: R,
    stats: ScanStats,
}

impl<E: Clone, R: Renderer> HoverEngine<E, R> {
    pub fn new(settings: Arc<Settings>, renderer: R) -> Self {
        let enabled = settings.hover_enabled;
        Self {
            state: ScanState::Idle,
            settings,
            enabled,
            renderer,
            stats: ScanStats::default(),
        }
    }

    // --- ACCESSORS ---

    pub fn state(&self) -> &ScanState<E> {
        &self.state
    }

    pub fn current_hit(&self) -> Option<&Hit> {
        self.state.hit()
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    // --- CONFIGURATION ---

    /// The live update signal: take the new snapshot, then arm or disarm.
    /// Receiving the same snapshot twice changes nothing.
    pub fn apply_settings(&mut self, settings: Arc<Settings>) {
        if cfg!(debug_assertions)
            && DEBUG_FLAGS.print_settings_reload
            && *settings != *self.settings
        {
            log::info!(
                "[hover] settings reloaded: enabled={} rate={:.2}/h debug={}",
                settings.hover_enabled,
                settings.effective_hourly_rate(),
                settings.debug_enabled
            );
        }
        let enabled = settings.hover_enabled;
        self.settings = settings;
        self.set_enabled(enabled);
    }

    /// Switching off clears any locked or pending state synchronously.
    /// A frame callback already queued by the host becomes a no-op.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.clear_hit();
            self.state = ScanState::Idle;
        }
        log::info!("Hover engine {}", if enabled { "ON" } else { "OFF" });
    }

    /// Toggle per-scan diagnostics without touching the rest of the snapshot.
    pub fn set_debug(&mut self, enabled: bool) {
        if self.settings.debug_enabled != enabled {
            let mut next = (*self.settings).clone();
            next.debug_enabled = enabled;
            self.settings = Arc::new(next);
        }
    }

    // --- EVENTS ---

    pub fn on_pointer_move(&mut self, event: PointerMove<E>) -> MoveOutcome {
        if !self.enabled {
            return MoveOutcome::Ignored;
        }

        match std::mem::replace(&mut self.state, ScanState::Idle) {
            ScanState::Locked(hit) if hit_test::contains_point(&hit.rect, event.x, event.y) => {
                // Wage settings may have changed since the hit was locked
                let rate = self.settings.effective_hourly_rate();
                if let Some(description) = describe_amount(hit.price, rate) {
                    self.renderer
                        .update_position(event.x, event.y, &description, hit.price);
                }
                self.state = ScanState::Locked(hit);
                MoveOutcome::Tracking
            }
            ScanState::Locked(_) => {
                self.renderer.hide();
                self.trace_transition("Locked -> Idle (pointer left price)");
                self.request_scan(event)
            }
            ScanState::ScanPending(_) => {
                self.state = ScanState::ScanPending(event);
                MoveOutcome::Coalesced
            }
            ScanState::Idle | ScanState::Scanning => self.request_scan(event),
        }
    }

    fn request_scan(&mut self, event: PointerMove<E>) -> MoveOutcome {
        self.state = ScanState::ScanPending(event);
        MoveOutcome::FrameRequested
    }

    /// Run the deferred scan. Returns the locked hit, if any.
    pub fn on_frame<P>(&mut self, page: &P) -> Option<Hit>
    where
        P: Page<Element = E>,
    {
        if !self.enabled {
            return None;
        }
        let event = match std::mem::replace(&mut self.state, ScanState::Scanning) {
            ScanState::ScanPending(event) => event,
            other => {
                // Spurious frame: nothing was requested
                self.state = other;
                return None;
            }
        };

        let settings = Arc::clone(&self.settings);
        self.stats.begin_frame();
        let started = app_time::now();
        let found = self.scan(page, &event);
        self.stats.last_scan_ms = app_time::elapsed_ms(started);
        self.stats.scans += 1;

        match found {
            Some(hit) => {
                self.stats.hits += 1;
                if let Some(description) =
                    describe_amount(hit.price, settings.effective_hourly_rate())
                {
                    self.renderer
                        .show(event.x, event.y, &description, hit.price, hit.rect);
                }
                self.state = ScanState::Locked(hit);
                self.trace_transition("Scanning -> Locked");
            }
            None => {
                self.state = ScanState::Idle;
                self.trace_transition("Scanning -> Idle");
            }
        }

        if settings.debug_enabled {
            log::debug!(
                "[hover] scan #{} checked={} hits={} {:.2}ms",
                self.stats.scans,
                self.stats.nodes_checked,
                self.stats.hits,
                self.stats.last_scan_ms
            );
        }

        found
    }

    /// Drop a pending scan whose frame will never arrive (the host failed to
    /// schedule it). The next move requests a fresh frame.
    pub fn cancel_pending(&mut self) {
        if self.state.is_pending() {
            self.state = ScanState::Idle;
            self.trace_transition("ScanPending -> Idle (frame not scheduled)");
        }
    }

    fn scan<P>(&mut self, page: &P, event: &PointerMove<E>) -> Option<Hit>
    where
        P: Page<Element = E>,
    {
        // Innermost element on the composed path that carries any text
        let (target, content) = event.path.iter().find_map(|element| {
            let text = page.text_content(element);
            (!text.is_empty()).then_some((element, text))
        })?;

        if !looks_like_price(sample_prefix(&content, QUICK_SCAN_SAMPLE_CHARS)) {
            return None;
        }

        for node in page.text_nodes(target).take(MAX_NODES_PER_SCAN) {
            self.stats.nodes_checked += 1;
            if !is_rendered_text_node(page, &node) {
                continue;
            }
            if let Some(hit) = hit_in_node(page, &node, event.x, event.y) {
                return Some(hit);
            }
        }
        None
    }

    fn clear_hit(&mut self) {
        if self.state.hit().is_some() {
            self.renderer.hide();
        }
    }

    fn trace_transition(&self, what: &str) {
        if cfg!(debug_assertions) && DEBUG_FLAGS.print_state_transitions {
            log::debug!("[hover] {what}");
        }
    }
}

/// First candidate in `node` that parses, measures, contains the pointer and is not struck out.
fn hit_in_node<P: Page>(page: &P, node: &P::Text, x: f64, y: f64) -> Option<Hit> {
    let text = page.node_text(node);
    let anchor = page.parent_element(node);
    let print_rejections = cfg!(debug_assertions) && DEBUG_FLAGS.print_rejections;

    for candidate in find_candidates(&text) {
        let price = match normalize(&candidate.raw_amount, candidate.suffix.as_deref()) {
            Ok(price) => price,
            Err(e) => {
                if print_rejections {
                    log::debug!("[hover] {:?} rejected: {e}", candidate.raw_amount);
                }
                continue;
            }
        };
        if cfg!(debug_assertions) && DEBUG_FLAGS.print_candidates {
            log::debug!("[hover] candidate {:?} -> {}", candidate.raw_amount, price.value());
        }

        let Some(rect) = rect_for(page, node, candidate.start_offset, candidate.end_offset) else {
            if print_rejections {
                log::debug!("[hover] {:?} has no usable rect", candidate.raw_amount);
            }
            continue;
        };
        if !hit_test::contains_point(&rect, x, y) {
            continue;
        }
        if anchor
            .as_ref()
            .is_some_and(|element| is_struck_through(page, element))
        {
            if print_rejections {
                log::debug!("[hover] {:?} is struck through", candidate.raw_amount);
            }
            continue;
        }

        return Some(Hit { rect, price });
    }
    None
}
