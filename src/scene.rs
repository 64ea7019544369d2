//! Scene driver
//!
//! Owns the live creature roster and ties the simulation to rendering:
//! reconciles against the host's drawing list, advances every creature
//! once per frame, emits a back-to-front [`FrameBatch`], and turns pointer
//! clicks into jumps or removal requests.

use std::collections::HashSet;
use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::drawing::{Drawing, Layer, parse_css_color};
use crate::renderer::{FrameBatch, Starfield, creature};
use crate::settings::Settings;
use crate::sim::{RunningCreature, Viewport, hit_test, planet_geometry, visible_arc_range};
use crate::tuning::Tuning;

/// Mixed into the seed to give the starfield its own RNG stream
const STARFIELD_STREAM: u64 = 0x5eed_57a2;

/// Result of a pointer click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing under the pointer
    Miss,
    /// The creature with this drawing id hopped (or was already airborne)
    Jumped(String),
    /// Second click on the same creature inside the double-click window
    RemoveRequested(String),
}

/// Frame-driven scene state
pub struct Scene {
    creatures: Vec<RunningCreature>,
    viewport: Viewport,
    starfield: Starfield,
    rng: Pcg32,
    /// Timestamp (ms) of the previous frame
    last_time: Option<f64>,
    /// Drawing id and timestamp (ms) of the last click that hit a creature
    last_click: Option<(String, f64)>,
    pub tuning: Tuning,
    pub settings: Settings,
}

impl Scene {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        log::info!("Scene created with seed: {}", seed);
        Self {
            creatures: Vec::new(),
            viewport: Viewport::default(),
            starfield: Starfield::new(seed ^ STARFIELD_STREAM),
            rng: Pcg32::seed_from_u64(seed),
            last_time: None,
            last_click: None,
            tuning,
            settings,
        }
    }

    pub fn creatures(&self) -> &[RunningCreature] {
        &self.creatures
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn creature(&self, id: &str) -> Option<&RunningCreature> {
        self.creatures.iter().find(|c| c.id() == id)
    }

    /// Record a new viewport size; the star layout is rebuilt on the next frame
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::info!("Viewport resized to {}x{}", viewport.width, viewport.height);
        }
        self.viewport = viewport;
        self.starfield.reset();
    }

    /// Forget the previous frame time so the next frame starts with
    /// `first_frame_dt` (used when the animation loop restarts)
    pub fn reset_clock(&mut self) {
        self.last_time = None;
    }

    /// Reconcile the live creatures against the host's active drawings.
    ///
    /// Creatures whose drawing disappeared are dropped, new drawings get a
    /// freshly spawned creature, and everything else keeps its in-flight
    /// state untouched. Repeated ids in `drawings` are ignored after the first.
    pub fn sync_roster(&mut self, drawings: &[Drawing]) {
        let mut seen = HashSet::with_capacity(drawings.len());
        let incoming: Vec<&Drawing> = drawings
            .iter()
            .filter(|d| seen.insert(d.id.as_str()))
            .collect();
        if incoming.len() != drawings.len() {
            log::warn!(
                "Roster contained {} duplicate id(s)",
                drawings.len() - incoming.len()
            );
        }

        let before = self.creatures.len();
        self.creatures.retain(|c| seen.contains(c.id()));
        let removed = before - self.creatures.len();

        let live: HashSet<String> = self.creatures.iter().map(|c| c.id().to_string()).collect();
        let mut added = 0;
        for drawing in incoming {
            if live.contains(&drawing.id) {
                continue;
            }
            warn_unparseable_colors(drawing);
            let creature = RunningCreature::spawn(
                Arc::new(drawing.clone()),
                self.viewport,
                &self.tuning,
                &mut self.rng,
            );
            self.creatures.push(creature);
            added += 1;
        }

        if added > 0 || removed > 0 {
            log::info!(
                "Roster synced: +{} -{} ({} running)",
                added,
                removed,
                self.creatures.len()
            );
        }
    }

    /// Creature indices sorted back to front (descending angle)
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.creatures.len()).collect();
        order.sort_by(|&a, &b| self.creatures[b].angle.total_cmp(&self.creatures[a].angle));
        order
    }

    /// Advance the simulation to `time_ms` and build the frame.
    ///
    /// Returns `None` (and leaves all state alone) when the viewport has
    /// nothing to draw into.
    pub fn frame(&mut self, time_ms: f64) -> Option<FrameBatch> {
        if !self.viewport.is_drawable() {
            log::trace!(
                "Skipping frame: viewport {}x{}",
                self.viewport.width,
                self.viewport.height
            );
            return None;
        }

        let raw_dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => self.tuning.first_frame_dt,
        };
        self.last_time = Some(time_ms);
        // max/min instead of clamp: a hand-built Tuning may have a bad ceiling
        let dt = if raw_dt.is_finite() {
            raw_dt.max(0.0).min(self.tuning.max_frame_dt.max(0.0))
        } else {
            0.0
        };

        let geo = planet_geometry(self.viewport);
        let arc = visible_arc_range(&geo, self.viewport);

        let mut batch = FrameBatch::new(self.viewport, geo);
        batch.vertices = self.starfield.render(
            self.viewport,
            &geo,
            (time_ms / 1000.0) as f32,
            &self.tuning,
            &self.settings,
        );

        for c in &mut self.creatures {
            *c = c.advance_on_arc(dt, &arc, &self.tuning);
        }

        if arc.is_degenerate() {
            log::trace!("Visible arc is empty, drawing background only");
            return Some(batch);
        }

        for idx in self.draw_order() {
            batch.vertices.extend(creature::creature(
                &self.creatures[idx],
                &geo,
                &self.tuning,
                &self.settings,
            ));
        }

        Some(batch)
    }

    /// Dispatch a click at canvas pixel `point`, `now_ms` being wall-clock ms.
    ///
    /// The front-most creature under the pointer wins. A second hit on the
    /// same creature within the double-click window asks for removal;
    /// otherwise the creature jumps in place.
    pub fn click(&mut self, point: Vec2, now_ms: f64) -> ClickOutcome {
        let geo = planet_geometry(self.viewport);
        let hit = self
            .draw_order()
            .into_iter()
            .rev()
            .find(|&i| hit_test(point, &self.creatures[i], &geo, &self.tuning));
        let Some(idx) = hit else {
            return ClickOutcome::Miss;
        };

        let id = self.creatures[idx].id().to_string();
        let is_double = matches!(
            &self.last_click,
            Some((last_id, at)) if *last_id == id && now_ms - at < self.tuning.double_click_ms
        );

        if is_double {
            self.last_click = None;
            log::info!("Removal requested for {}", id);
            ClickOutcome::RemoveRequested(id)
        } else {
            self.creatures[idx] = self.creatures[idx].trigger_jump(&self.tuning);
            self.last_click = Some((id.clone(), now_ms));
            log::debug!("{} jumped", id);
            ClickOutcome::Jumped(id)
        }
    }
}

/// Map a CSS client position to canvas pixels, given the canvas element's
/// bounding rect (`rect_origin`, `rect_size`) and its backing `canvas_size`
pub fn canvas_point(client: Vec2, rect_origin: Vec2, rect_size: Vec2, canvas_size: Vec2) -> Vec2 {
    let scale = Vec2::new(
        if rect_size.x > 0.0 { canvas_size.x / rect_size.x } else { 1.0 },
        if rect_size.y > 0.0 { canvas_size.y / rect_size.y } else { 1.0 },
    );
    (client - rect_origin) * scale
}

fn warn_unparseable_colors(drawing: &Drawing) {
    let bad = Layer::PAINT_ORDER
        .iter()
        .flat_map(|&layer| drawing.layer(layer))
        .filter(|s| parse_css_color(&s.color).is_err())
        .count();
    if bad > 0 {
        log::warn!(
            "Drawing {} has {} stroke(s) with unreadable colours, using default ink",
            drawing.id,
            bad
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Point, Stroke};
    use crate::sim::surface_position;

    const HD: Viewport = Viewport::new(1920.0, 1080.0);

    fn drawing(id: &str) -> Drawing {
        let body = vec![Stroke::new(
            vec![Point::new(100.0, 100.0), Point::new(200.0, 140.0)],
            "#333333",
            4.0,
        )];
        Drawing::new(id, body, Vec::new(), Vec::new())
    }

    fn scene() -> Scene {
        let mut scene = Scene::new(7, Tuning::default(), Settings::default());
        scene.resize(HD);
        scene
    }

    /// Centre of a creature, where a click is sure to land
    fn center_of(scene: &Scene, id: &str) -> Vec2 {
        let c = scene.creature(id).unwrap();
        let geo = planet_geometry(scene.viewport());
        surface_position(&geo, c.angle, c.jump_height + scene.tuning.sheep_height / 2.0)
    }

    #[test]
    fn test_single_drawing_lifecycle() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);

        let arc = visible_arc_range(&planet_geometry(HD), HD);
        let a = scene.creature("A").unwrap();
        assert!(a.angle >= arc.end && a.angle <= arc.start);
        assert_eq!(a.jump_height, 0.0);

        scene.sync_roster(&[]);
        assert!(scene.creature("A").is_none());
        assert!(scene.creatures().is_empty());
    }

    #[test]
    fn test_persisting_creatures_keep_state() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);
        scene.frame(0.0);
        let before = scene.creature("A").unwrap().clone();

        scene.sync_roster(&[drawing("A"), drawing("B")]);
        let after = scene.creature("A").unwrap();
        assert_eq!(after.angle, before.angle);
        assert_eq!(after.leg_phase, before.leg_phase);
        assert_eq!(scene.creatures().len(), 2);
    }

    #[test]
    fn test_duplicate_ids_spawn_once() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A"), drawing("A"), drawing("B")]);
        assert_eq!(scene.creatures().len(), 2);
    }

    #[test]
    fn test_draw_order_descending_angle() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A"), drawing("B"), drawing("C"), drawing("D")]);
        let order = scene.draw_order();
        for pair in order.windows(2) {
            assert!(scene.creatures()[pair[0]].angle >= scene.creatures()[pair[1]].angle);
        }
    }

    #[test]
    fn test_first_frame_uses_default_dt() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);
        let start = scene.creature("A").unwrap().angle;
        scene.frame(5000.0);
        let a = scene.creature("A").unwrap();
        let expected = start - a.speed * scene.tuning.first_frame_dt;
        assert!((a.angle - expected).abs() < 1e-5);
    }

    #[test]
    fn test_long_pause_is_clamped() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);
        scene.frame(0.0);
        let start = scene.creature("A").unwrap().angle;
        scene.frame(60_000.0);
        let a = scene.creature("A").unwrap();
        let expected = start - a.speed * scene.tuning.max_frame_dt;
        assert!((a.angle - expected).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_viewport_skips_frame() {
        let mut scene = Scene::new(1, Tuning::default(), Settings::default());
        scene.sync_roster(&[drawing("A")]);
        let before = scene.creature("A").unwrap().clone();
        assert!(scene.frame(16.0).is_none());
        scene.resize(Viewport::new(0.0, 600.0));
        assert!(scene.frame(32.0).is_none());
        assert_eq!(scene.creature("A").unwrap().angle, before.angle);
    }

    #[test]
    fn test_frame_clips_creatures_only() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);
        let batch = scene.frame(0.0).unwrap();
        let clipped = batch.vertices.iter().filter(|v| v.clip == 1.0).count();
        assert!(clipped > 0);
        assert_eq!(batch.vertices[0].clip, 0.0);
        assert_eq!(batch.vertices.len() % 3, 0);
    }

    #[test]
    fn test_click_jumps_then_double_click_removes() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);

        let p = center_of(&scene, "A");
        assert_eq!(scene.click(p, 1000.0), ClickOutcome::Jumped("A".into()));
        assert!(scene.creature("A").unwrap().is_airborne());

        let p = center_of(&scene, "A");
        assert_eq!(scene.click(p, 1200.0), ClickOutcome::RemoveRequested("A".into()));

        // Window was reset: the next click is a single click again
        assert_eq!(scene.click(p, 1300.0), ClickOutcome::Jumped("A".into()));
    }

    #[test]
    fn test_slow_second_click_is_not_double() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);
        let p = center_of(&scene, "A");
        scene.click(p, 1000.0);
        assert_eq!(scene.click(p, 1400.0), ClickOutcome::Jumped("A".into()));
    }

    #[test]
    fn test_miss_far_from_creatures() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);
        assert_eq!(scene.click(Vec2::new(-500.0, -500.0), 0.0), ClickOutcome::Miss);
    }

    #[test]
    fn test_canvas_point_scaling() {
        let p = canvas_point(
            Vec2::new(150.0, 60.0),
            Vec2::new(50.0, 10.0),
            Vec2::new(500.0, 250.0),
            Vec2::new(1000.0, 500.0),
        );
        assert_eq!(p, Vec2::new(200.0, 100.0));
        let unscaled = canvas_point(Vec2::splat(5.0), Vec2::ZERO, Vec2::ZERO, Vec2::splat(100.0));
        assert_eq!(unscaled, Vec2::new(5.0, 5.0));
    }

    fn grounded(id: &str, angle: f32) -> RunningCreature {
        RunningCreature {
            drawing: Arc::new(drawing(id)),
            angle,
            speed: 0.06,
            leg_phase: 0.0,
            jump_velocity: 0.0,
            jump_height: 0.0,
        }
    }

    #[test]
    fn test_front_most_creature_takes_the_click() {
        let mut scene = scene();
        // Back one first so roster order does not decide the winner
        scene.creatures = vec![grounded("back", 1.51), grounded("front", 1.50)];
        let geo = planet_geometry(HD);
        let lift = scene.tuning.sheep_height / 2.0;
        let between =
            (surface_position(&geo, 1.50, lift) + surface_position(&geo, 1.51, lift)) / 2.0;
        assert!(scene.creatures.iter().all(|c| hit_test(between, c, &geo, &scene.tuning)));

        assert_eq!(scene.click(between, 0.0), ClickOutcome::Jumped("front".into()));
        assert!(scene.creature("front").unwrap().is_airborne());
        assert!(!scene.creature("back").unwrap().is_airborne());

        // Same answer with the roster order flipped
        scene.creatures = vec![grounded("front", 1.50), grounded("back", 1.51)];
        assert_eq!(scene.click(between, 5000.0), ClickOutcome::Jumped("front".into()));
        assert!(!scene.creature("back").unwrap().is_airborne());
    }

    #[test]
    fn test_bad_frame_ceiling_does_not_panic() {
        let tuning = Tuning {
            max_frame_dt: -0.1,
            ..Tuning::default()
        };
        let mut scene = Scene::new(3, tuning, Settings::default());
        scene.resize(HD);
        scene.sync_roster(&[drawing("A")]);
        let start = scene.creature("A").unwrap().angle;
        assert!(scene.frame(0.0).is_some());
        assert!(scene.frame(16.0).is_some());
        assert_eq!(scene.creature("A").unwrap().angle, start);
    }

    #[test]
    fn test_reset_clock_restarts_with_first_frame_dt() {
        let mut scene = scene();
        scene.sync_roster(&[drawing("A")]);
        scene.frame(0.0);
        scene.reset_clock();
        let start = scene.creature("A").unwrap().angle;
        // A long gap (page restored from cache) is not treated as elapsed time
        scene.frame(600_000.0);
        let a = scene.creature("A").unwrap();
        let expected = start - a.speed * scene.tuning.first_frame_dt;
        assert!((a.angle - expected).abs() < 1e-5);
    }
}
