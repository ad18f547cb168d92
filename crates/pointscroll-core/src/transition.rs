//! Section transition state machine.
//!
//! `Director` owns every piece of mutable state: the morph buffer, slot
//! fractions, scatter field, camera tracker, scroll accumulator, asset cache
//! and the in-flight transition. Hosts feed it input (`on_scroll`,
//! `on_section_advance_request`), time (`tick`) and geometry
//! (`on_geometry_loaded`), fetch whatever `take_load_requests` asks for, and
//! read back `render_frame` / `presentation` after each update.
//!
//! Phases run `Boot -> Idle -> FadeOut -> Loading -> FadeIn -> Idle`, with
//! `FadeOut` cancelling back to `Idle` when its progress returns to zero.
//! Geometry for the next section is requested at the start of `FadeOut` so
//! the fetch overlaps the fade. Every request carries a `LoadTicket`; a
//! resolution whose ticket is no longer the one being waited for still fills
//! the asset cache but never touches the displayed state.

use crate::assets::{AssetCache, LoadRequest, LoadTicket};
use crate::blend::Crossfade;
use crate::camera::{CameraPath, CameraPose, CameraTracker};
use crate::constants::{POINT_SIZE_FACTOR, PROGRESS_EPSILON};
use crate::error::LoadError;
use crate::geometry::{bounding_radius, PointCloud};
use crate::morph::MorphBuffer;
use crate::output::{FrameUniforms, Presentation, RenderFrame};
use crate::resample::{compute_sample_fractions, keep_count_for, resample_positions_and_colors};
use crate::scatter::ScatterField;
use crate::scroll::{Direction, InputKind, ScrollAccumulator};
use crate::section::{normalize_color, Section, Show};
use glam::{Mat4, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first section's geometry.
    Boot,
    Idle,
    FadeOut,
    /// Fade-out finished; waiting for the next section's morph target.
    Loading,
    FadeIn,
}

/// Snapshot and progress of the transition in flight.
#[derive(Clone, Copy, Debug)]
struct Transition {
    to: usize,
    direction: Direction,
    progress: f32,
    /// Progress that overflowed a phase, replayed once the transition ends.
    carry: f32,
    carry_kind: InputKind,
    /// Ticket of the geometry load this transition is waiting for.
    ticket: Option<LoadTicket>,
    target_ready: bool,
    /// Driven by `tick` rather than scroll input.
    auto: bool,
    camera_start: CameraPose,
    camera_end: CameraPose,
    rotation_start: f32,
    rotation_mid: f32,
    rotation_target: f32,
    scatter_start: f32,
    scatter_peak: f32,
    scatter_end: f32,
}

/// Values that define what is on screen, used to compare states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub rotation: f32,
    pub scatter: f32,
    pub camera: CameraPose,
    pub position_blend: f32,
    pub background_mix: f32,
    pub text_opacity: f32,
}

impl VisualState {
    pub fn approx_eq(&self, other: &VisualState, tol: f32) -> bool {
        (self.rotation - other.rotation).abs() <= tol
            && (self.scatter - other.scatter).abs() <= tol
            && self.camera.max_abs_diff(&other.camera) <= tol
            && (self.position_blend - other.position_blend).abs() <= tol
            && (self.background_mix - other.background_mix).abs() <= tol
            && (self.text_opacity - other.text_opacity).abs() <= tol
    }
}

pub struct Director {
    show: Show,
    assets: AssetCache,
    morph: MorphBuffer,
    fractions: Vec<f64>,
    scatter_field: ScatterField,
    camera: CameraTracker,
    scroll: ScrollAccumulator,
    phase: Phase,
    current: usize,
    transition: Option<Transition>,
    rotation: f32,
    scatter: f32,
    crossfade: Crossfade,
    density: f32,
    generation: u64,
    boot_ticket: Option<LoadTicket>,
    requests: SmallVec<[LoadRequest; 2]>,
    highlight_override: Option<Vec3>,
    /// Leftover carry from a finished transition, fed back as scroll input.
    replay: Option<(f32, InputKind)>,
    time: f32,
}

impl Director {
    /// Create a director in `Boot` and queue the first section's geometry.
    pub fn new(show: Show) -> Self {
        let timing = &show.timing;
        let mut camera = CameraTracker::new(CameraPath::default(), timing.camera_ease_rate);
        if let Some(first) = show.sections.first() {
            camera.set_target_pose(first.camera, true);
        }
        let mut director = Self {
            scatter_field: ScatterField::new(0, timing.seed),
            density: timing.density,
            assets: AssetCache::default(),
            morph: MorphBuffer::default(),
            fractions: Vec::new(),
            camera,
            scroll: ScrollAccumulator::default(),
            phase: Phase::Boot,
            current: 0,
            transition: None,
            rotation: 0.0,
            scatter: 0.0,
            crossfade: Crossfade::REST,
            generation: 0,
            boot_ticket: None,
            requests: SmallVec::new(),
            highlight_override: None,
            replay: None,
            time: 0.0,
            show,
        };
        director.request_boot();
        director
    }

    // ---------------- Accessors ----------------

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn current_section(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn show(&self) -> &Show {
        &self.show
    }

    /// Progress of the active fade (0 outside a transition). Backward scroll
    /// can take fade-in progress below zero; visuals clamp it.
    pub fn progress(&self) -> f32 {
        self.transition.map_or(0.0, |t| t.progress)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.transition.map(|t| t.direction)
    }

    pub fn transition_target(&self) -> Option<usize> {
        self.transition.map(|t| t.to)
    }

    /// Scroll progress waiting to be replayed after the transition.
    pub fn pending_carry(&self) -> f32 {
        self.transition.map_or(0.0, |t| t.carry)
    }

    pub fn is_target_ready(&self) -> bool {
        self.transition.is_some_and(|t| t.target_ready)
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn scatter(&self) -> f32 {
        self.scatter
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.morph.len()
    }

    #[inline]
    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    #[inline]
    pub fn morph(&self) -> &MorphBuffer {
        &self.morph
    }

    #[inline]
    pub fn camera(&self) -> &CameraTracker {
        &self.camera
    }

    #[inline]
    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    #[inline]
    pub fn crossfade(&self) -> Crossfade {
        self.crossfade
    }

    pub fn visual_state(&self) -> VisualState {
        VisualState {
            rotation: self.rotation,
            scatter: self.scatter,
            camera: self.camera.target(),
            position_blend: self.morph.position_blend(),
            background_mix: self.crossfade.background_mix,
            text_opacity: self.crossfade.text_opacity,
        }
    }

    /// Drain geometry requests for the host to fetch.
    pub fn take_load_requests(&mut self) -> SmallVec<[LoadRequest; 2]> {
        std::mem::take(&mut self.requests)
    }

    // ---------------- Input ----------------

    /// Feed a raw scroll delta (positive = forward).
    pub fn on_scroll(&mut self, delta: f32, kind: InputKind) {
        self.scroll_step(delta, kind);
        self.replay_carry();
    }

    /// Feed leftover carry back as input until a transition stops short of
    /// completing.
    fn replay_carry(&mut self) {
        while let Some((delta, kind)) = self.replay.take() {
            self.scroll_step(delta, kind);
        }
    }

    fn scroll_step(&mut self, delta: f32, kind: InputKind) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        match self.phase {
            Phase::Boot => {
                if self.boot_ticket.is_none() {
                    self.request_boot();
                }
            }
            Phase::Idle => {
                let tuning = *self.show.timing.tuning(kind);
                if let Some(trigger) = self.scroll.accumulate_idle(delta, &tuning) {
                    let to = trigger.direction.step(self.current, self.show.len());
                    if to == self.current {
                        log::debug!("[scroll] single section; nothing to advance to");
                        return;
                    }
                    self.start_transition(to, trigger.direction, false);
                    if let Some(t) = self.transition.as_mut() {
                        t.carry = trigger.carry;
                        t.carry_kind = kind;
                    }
                    self.set_progress(trigger.initial_progress);
                }
            }
            Phase::FadeOut | Phase::FadeIn => {
                let Some(t) = self.transition.as_mut() else {
                    return;
                };
                // Manual input takes over from an auto-driven advance
                t.auto = false;
                t.carry_kind = kind;
                let dp = self.show.timing.tuning(kind).progress_delta(delta, t.direction);
                self.advance_progress(dp);
            }
            Phase::Loading => {
                let tuning = *self.show.timing.tuning(kind);
                if let Some(t) = self.transition.as_mut() {
                    t.carry = (t.carry + tuning.progress_delta(delta, t.direction)).max(0.0);
                    t.carry_kind = kind;
                }
            }
        }
    }

    /// Jump to `index` (e.g. from navigation UI). The transition is driven by
    /// `tick`, one phase per `spin_duration`. Ignored unless idle.
    pub fn on_section_advance_request(&mut self, index: usize, direction: Direction) {
        if self.phase != Phase::Idle {
            log::debug!("[transition] advance to {} ignored in {:?}", index, self.phase);
            return;
        }
        if index >= self.show.len() || index == self.current {
            return;
        }
        self.scroll.reset();
        self.start_transition(index, direction, true);
        self.set_progress(0.0);
    }

    /// Advance eased state by `dt_sec`.
    pub fn tick(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        self.time += dt;
        self.camera.tick(dt);
        if let Some(t) = self.transition {
            if t.auto && matches!(self.phase, Phase::FadeOut | Phase::FadeIn) {
                let duration = self.show.timing.spin_duration(&self.show.sections[t.to]);
                self.advance_progress(dt / duration);
            }
        }
        self.replay_carry();
    }

    // ---------------- UI overrides ----------------

    /// Overwrite the displayed scatter amplitude. The next phase update
    /// recomputes it.
    pub fn set_scatter(&mut self, amount: f32) {
        if amount.is_finite() {
            self.scatter = amount.max(0.0);
        }
    }

    /// Override the highlight colour; invalid input keeps the previous one.
    pub fn set_highlight(&mut self, raw: &str) {
        let previous = self
            .highlight_override
            .unwrap_or(self.show.sections[self.current].look.highlight);
        self.highlight_override = Some(normalize_color(Some(raw), previous));
    }

    /// Change the downsample ratio and rebuild the slot array. An in-flight
    /// morph target is re-derived for the new slot count when its geometry is
    /// already cached; otherwise it is resampled when the load lands.
    pub fn set_density(&mut self, ratio: f32) {
        let ratio = ratio.clamp(crate::constants::DENSITY_MIN, 1.0);
        if (ratio - self.density).abs() < 1e-6 {
            return;
        }
        self.density = ratio;
        if self.phase == Phase::Boot {
            return;
        }
        self.build_base(self.current);
        if let Some(t) = self.transition.as_mut() {
            t.target_ready = false;
            self.prepare_target();
            self.apply_visuals();
        }
    }

    // ---------------- Geometry ----------------

    /// Deliver the result of a geometry request.
    pub fn on_geometry_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<PointCloud, LoadError>,
    ) {
        let Some(section) = self.show.sections.get(ticket.section) else {
            log::warn!("[assets] load for unknown section {}", ticket.section);
            return;
        };
        let id = section.id.clone();
        let result = result.and_then(|cloud| {
            if cloud.is_empty() {
                Err(LoadError::Empty(section.model.clone()))
            } else {
                Ok(cloud)
            }
        });
        match result {
            Ok(cloud) => {
                log::info!("[assets] {} loaded ({} points)", id, cloud.len());
                self.assets.insert_geometry(&id, cloud);
                if self.phase == Phase::Boot && self.boot_ticket == Some(ticket) {
                    self.finish_boot();
                } else if self.pending_ticket() == Some(ticket) {
                    if let Some(t) = self.transition.as_mut() {
                        t.ticket = None;
                    }
                    self.prepare_target();
                    self.apply_visuals();
                    if self.phase == Phase::Loading && self.is_target_ready() {
                        self.enter_fade_in();
                    }
                } else {
                    log::debug!("[assets] stale resolution {:?} cached only", ticket);
                }
                self.replay_carry();
            }
            Err(e) => {
                let asset = self.assets.entry(&id);
                if asset.in_flight == Some(ticket) {
                    asset.in_flight = None;
                }
                if self.phase == Phase::Boot && self.boot_ticket == Some(ticket) {
                    log::error!("[assets] boot load failed: {}", e);
                    self.boot_ticket = None;
                } else if self.pending_ticket() == Some(ticket) {
                    log::error!("[transition] aborting: {}", e);
                    self.abort_to_idle();
                } else {
                    log::debug!("[assets] stale failure {:?}: {}", ticket, e);
                }
            }
        }
    }

    fn pending_ticket(&self) -> Option<LoadTicket> {
        self.transition.and_then(|t| t.ticket)
    }

    /// Ticket for `section`'s geometry: `None` when already cached, the
    /// in-flight ticket when a fetch is running, otherwise a new request.
    fn request_geometry(&mut self, section: usize) -> Option<LoadTicket> {
        let s = &self.show.sections[section];
        let asset = self.assets.entry(&s.id);
        if asset.geometry.is_some() {
            return None;
        }
        if let Some(t) = asset.in_flight {
            return Some(t);
        }
        self.generation += 1;
        let ticket = LoadTicket {
            section,
            generation: self.generation,
        };
        asset.in_flight = Some(ticket);
        log::info!("[assets] requesting {} ({})", s.id, s.model);
        self.requests.push(LoadRequest {
            ticket,
            path: s.model.clone(),
        });
        Some(ticket)
    }

    fn request_boot(&mut self) {
        if self.show.is_empty() {
            log::warn!("[transition] show has no sections");
            return;
        }
        self.boot_ticket = self.request_geometry(self.current);
        if self.boot_ticket.is_none() {
            self.finish_boot();
        }
    }

    fn finish_boot(&mut self) {
        self.boot_ticket = None;
        if !self.build_base(self.current) {
            return;
        }
        let section = &self.show.sections[self.current];
        self.scatter = self.show.timing.scatter_rest(section);
        self.camera.set_target_pose(section.camera, true);
        self.camera.snap_model_radius();
        self.crossfade = Crossfade::REST;
        self.phase = Phase::Idle;
        log::info!("[transition] ready on section {}", section.id);
    }

    /// Rebuild the fixed slot array from `section`'s geometry at the current
    /// density. Returns `false` when the geometry is not available.
    fn build_base(&mut self, section: usize) -> bool {
        let s = &self.show.sections[section];
        let Some(geometry) = self.assets.geometry(&s.id) else {
            return false;
        };
        let keep = keep_count_for(geometry.len(), self.density, self.show.timing.max_points);
        let Some(slots) = resample_positions_and_colors(&geometry, keep) else {
            return false;
        };
        let previous = self.morph.len();
        self.fractions = compute_sample_fractions(geometry.len(), keep);
        self.morph.reset(slots.transform(&s.transform), s.look.point_color);
        self.scatter_field.resize(keep);
        self.camera
            .set_model_radius(bounding_radius(self.morph.base_positions()));
        // Memoised morph targets were resampled against the old fractions
        self.assets.invalidate_morphs();
        if previous != keep {
            log::info!("[morph] slot array rebuilt: {} -> {} slots", previous, keep);
        }
        true
    }

    /// Cross-resample the transition target onto the current slots and
    /// install it in the morph buffer.
    fn prepare_target(&mut self) {
        let Some(t) = self.transition.as_mut() else {
            return;
        };
        let s = &self.show.sections[t.to];
        if let Some(slots) = self.assets.morph_for(&s.id, &self.fractions, &s.transform) {
            t.target_ready = self
                .morph
                .set_morph_target(&slots.positions, slots.colors.as_deref());
        }
    }

    // ---------------- Phases ----------------

    fn start_transition(&mut self, to: usize, direction: Direction, auto: bool) {
        let from = &self.show.sections[self.current];
        let next = &self.show.sections[to];
        let timing = &self.show.timing;
        let rotation_start = self.rotation;
        let rotation_target = rotation_start + direction.sign() * timing.spin_turns(next) * TAU;
        let transition = Transition {
            to,
            direction,
            progress: 0.0,
            carry: 0.0,
            carry_kind: InputKind::Wheel,
            ticket: None,
            target_ready: false,
            auto,
            camera_start: self.camera.target(),
            camera_end: next.camera,
            rotation_start,
            rotation_mid: rotation_start + (rotation_target - rotation_start) * 0.5,
            rotation_target,
            scatter_start: self.scatter,
            scatter_peak: timing.scatter_peak(next),
            scatter_end: timing.scatter_rest(next),
        };
        log::info!(
            "[transition] {} -> {} ({:?}{})",
            from.id,
            next.id,
            direction,
            if auto { ", auto" } else { "" }
        );
        self.phase = Phase::FadeOut;
        self.transition = Some(transition);
        let ticket = self.request_geometry(to);
        if let Some(t) = self.transition.as_mut() {
            t.ticket = ticket;
        }
        if ticket.is_none() {
            self.prepare_target();
        }
    }

    /// Set fade progress directly (used when a transition starts).
    fn set_progress(&mut self, progress: f32) {
        if let Some(t) = self.transition.as_mut() {
            t.progress = progress.max(0.0);
        }
        self.settle_progress();
    }

    fn advance_progress(&mut self, dp: f32) {
        let Some(t) = self.transition.as_mut() else {
            return;
        };
        t.progress += dp;
        if self.phase == Phase::FadeOut && dp < 0.0 && t.progress <= 0.0 {
            self.cancel();
            return;
        }
        self.settle_progress();
    }

    /// Apply the current progress, moving to the next phase when it is full.
    fn settle_progress(&mut self) {
        let Some(t) = self.transition.as_mut() else {
            return;
        };
        if t.progress < 1.0 - PROGRESS_EPSILON {
            self.apply_visuals();
            return;
        }
        t.carry += (t.progress - 1.0).max(0.0);
        t.progress = 1.0;
        match self.phase {
            Phase::FadeOut => self.enter_loading(),
            Phase::FadeIn => self.complete_fade_in(),
            _ => self.apply_visuals(),
        }
    }

    fn enter_loading(&mut self) {
        self.phase = Phase::Loading;
        let Some(t) = self.transition else {
            return;
        };
        if !t.target_ready && t.ticket.is_none() {
            // Geometry may have been dropped by a density rebuild or a failed
            // earlier fetch; ask again.
            let ticket = self.request_geometry(t.to);
            if let Some(tr) = self.transition.as_mut() {
                tr.ticket = ticket;
            }
            if ticket.is_none() {
                self.prepare_target();
            }
        }
        self.apply_visuals();
        log::debug!("[transition] loading (carry {:.3})", self.pending_carry());
        if self.is_target_ready() {
            self.enter_fade_in();
        }
    }

    fn enter_fade_in(&mut self) {
        self.phase = Phase::FadeIn;
        let Some(t) = self.transition.as_mut() else {
            return;
        };
        t.progress = 0.0;
        if t.carry >= 1.0 - PROGRESS_EPSILON {
            // Enough scroll arrived while loading to finish the fade outright
            t.carry = (t.carry - 1.0).max(0.0);
            t.progress = 1.0;
            self.complete_fade_in();
            return;
        }
        self.apply_visuals();
    }

    fn complete_fade_in(&mut self) {
        let Some(t) = self.transition.take() else {
            return;
        };
        self.morph.set_blend(1.0);
        self.morph.commit();
        self.current = t.to;
        self.rotation = t.rotation_target.rem_euclid(TAU);
        self.scatter = t.scatter_end;
        self.camera.set_target_pose(t.camera_end, false);
        self.camera
            .set_model_radius(bounding_radius(self.morph.base_positions()));
        self.crossfade = Crossfade::REST;
        self.scroll.reset();
        self.phase = Phase::Idle;
        log::info!(
            "[transition] now on {} (carry {:.3})",
            self.show.sections[self.current].id,
            t.carry
        );
        if t.carry > PROGRESS_EPSILON {
            let delta = self
                .show
                .timing
                .tuning(t.carry_kind)
                .delta_for_progress(t.carry, t.direction);
            self.replay = Some((delta, t.carry_kind));
        }
    }

    /// Scrolled back to the start of the fade-out: restore the snapshot.
    fn cancel(&mut self) {
        if let Some(t) = self.transition.take() {
            log::info!("[transition] cancelled toward {}", self.show.sections[t.to].id);
            self.restore(&t);
        }
    }

    /// Load failure: drop the transition and any carry, keep the current
    /// section fully displayed.
    fn abort_to_idle(&mut self) {
        if let Some(t) = self.transition.take() {
            self.restore(&t);
        }
    }

    fn restore(&mut self, t: &Transition) {
        self.rotation = t.rotation_start;
        self.scatter = t.scatter_start;
        self.camera.set_target_pose(t.camera_start, true);
        self.crossfade = Crossfade::REST;
        self.morph.clear_morph_target();
        self.scroll.reset();
        self.phase = Phase::Idle;
    }

    /// Derive rotation, scatter, camera target, crossfade and morph blend from
    /// the phase and eased progress.
    fn apply_visuals(&mut self) {
        let Some(t) = self.transition else {
            return;
        };
        let e = self.show.timing.ease.apply(t.progress);
        let lerp = |a: f32, b: f32, k: f32| a + (b - a) * k;
        let blend = match self.phase {
            Phase::FadeOut => {
                self.rotation = lerp(t.rotation_start, t.rotation_mid, e);
                self.scatter = lerp(t.scatter_start, t.scatter_peak, e);
                self.camera
                    .set_target_pose(t.camera_start.lerp(&t.camera_end, e), false);
                self.crossfade = Crossfade::fade_out(e);
                if t.target_ready {
                    e
                } else {
                    0.0
                }
            }
            Phase::Loading => {
                self.rotation = t.rotation_mid;
                self.scatter = t.scatter_peak;
                self.camera.set_target_pose(t.camera_end, false);
                self.crossfade = Crossfade::HELD;
                if t.target_ready {
                    1.0
                } else {
                    0.0
                }
            }
            Phase::FadeIn => {
                self.rotation = lerp(t.rotation_mid, t.rotation_target, e);
                self.scatter = lerp(t.scatter_peak, t.scatter_end, e);
                self.camera.set_target_pose(t.camera_end, false);
                self.crossfade = Crossfade::fade_in(e);
                1.0
            }
            Phase::Boot | Phase::Idle => return,
        };
        self.morph.set_blend(blend);
    }

    // ---------------- Output ----------------

    fn display_pair(&self) -> (&Section, &Section) {
        let from = &self.show.sections[self.current];
        let to = self
            .transition
            .map_or(from, |t| &self.show.sections[t.to]);
        (from, to)
    }

    /// Fill `out` with this frame's point buffers and uniforms.
    pub fn render_frame(&self, aspect: f32, out: &mut RenderFrame) {
        self.morph.write_blended(&mut out.positions, &mut out.colors);
        let radius = self.camera.model_radius();
        self.scatter_field
            .apply(&mut out.positions, self.scatter * radius, self.time);
        let camera = self.camera.camera(aspect);
        let model = Mat4::from_rotation_y(self.rotation);
        let mut u = FrameUniforms::new(camera.view_projection(), model);
        u.post = [0.0, 0.0, radius * POINT_SIZE_FACTOR, camera.aspect];
        if !self.show.is_empty() {
            let (from, to) = self.display_pair();
            let look = self.crossfade.look(from, to);
            let highlight = self.highlight_override.unwrap_or(look.highlight);
            u.highlight = highlight.extend(look.glow.uniform_code()).to_array();
            u.post[0] = look.bloom;
            u.post[1] = look.vignette;
        }
        u.params = [
            self.time,
            self.scatter,
            self.morph.position_blend(),
            self.morph.color_blend(),
        ];
        out.uniforms = u;
    }

    /// Text, background and progress for the DOM layer.
    pub fn presentation(&self) -> Option<Presentation<'_>> {
        if self.show.is_empty() {
            return None;
        }
        let (from, to) = self.display_pair();
        let text = if self.crossfade.next_text { &to.text } else { &from.text };
        Some(Presentation {
            phase: self.phase,
            section: self.current,
            next: self.transition.map(|t| t.to),
            progress: self.progress(),
            title: &text.title,
            body: &text.body,
            text_opacity: if self.phase == Phase::Boot {
                0.0
            } else {
                self.crossfade.text_opacity
            },
            palette: self.crossfade.palette(from, to),
            look: self.crossfade.look(from, to),
        })
    }
}
