//! Level layout and procedural generation
//!
//! Generation must be reproducible bit-for-bit for a given (number, width, height):
//! - PCG32 seeded with the level number on a fixed stream
//! - Integer draws only, mapped by multiply-shift
//! - Fixed draw order (platforms, then collectibles, then goal)

use glam::Vec2;
use rand::RngCore;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::{Collectible, Obstacle};
use crate::consts::*;

/// PCG stream shared by every level
pub const LEVEL_STREAM: u64 = 0xa02b_dbf7_bb3c_0a7;

/// Deterministic RNG for level layouts
#[derive(Debug, Clone)]
pub struct LevelRng {
    rng: Pcg32,
}

impl LevelRng {
    /// State is exactly the level number
    pub fn for_level(level: u32) -> Self {
        Self {
            rng: Pcg32::new(level as u64, LEVEL_STREAM),
        }
    }

    /// Uniform in `[0, bound)`
    pub fn below(&mut self, bound: u32) -> u32 {
        ((self.rng.next_u32() as u64 * bound as u64) >> 32) as u32
    }

    /// Uniform in `[lo, hi)`; an empty range yields `lo` without drawing
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        lo + self.below((hi - lo) as u32) as i32
    }
}

/// Outcome of a bounded placement search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<T> {
    pub value: T,
    /// Draws used (equal to the budget when nothing qualified)
    pub attempts: u32,
    /// Whether `value` met the clearance rules
    pub clear: bool,
}

/// Which generated placements met their clearance rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub collectibles_clear: Vec<bool>,
    pub goal_clear: bool,
}

/// A pickup point keeps its distance from every hit-box (per axis)
pub fn collectible_clear(hitboxes: &[Rect], point: Vec2) -> bool {
    !hitboxes
        .iter()
        .any(|hb| hb.expand(COLLECTIBLE_CLEARANCE).contains_point(point))
}

/// The goal keeps its distance from every hit-box and every pickup
pub fn goal_clear(hitboxes: &[Rect], collectibles: &[Collectible], goal: &Rect) -> bool {
    let zone = goal.expand(GOAL_CLEARANCE);
    let center = goal.center();
    !hitboxes.iter().any(|hb| zone.intersects(hb))
        && !collectibles
            .iter()
            .any(|c| c.pos().distance(center) < GOAL_CLEARANCE)
}

/// Draw pickup positions until one is clear; keep the last draw otherwise
pub fn place_collectible(
    rng: &mut LevelRng,
    width: i32,
    height: i32,
    hitboxes: &[Rect],
) -> Placement<Vec2> {
    let mut candidate = Vec2::ZERO;
    for attempt in 1..=COLLECTIBLE_ATTEMPTS {
        candidate = Vec2::new(
            rng.range(COLLECTIBLE_EDGE_MARGIN, width - COLLECTIBLE_EDGE_MARGIN) as f32,
            rng.range(COLLECTIBLE_EDGE_MARGIN, height - COLLECTIBLE_EDGE_MARGIN) as f32,
        );
        if collectible_clear(hitboxes, candidate) {
            return Placement {
                value: candidate,
                attempts: attempt,
                clear: true,
            };
        }
    }
    Placement {
        value: candidate,
        attempts: COLLECTIBLE_ATTEMPTS,
        clear: false,
    }
}

/// Draw goal rectangles until one is clear; keep the last draw otherwise
pub fn place_goal(
    rng: &mut LevelRng,
    width: i32,
    height: i32,
    hitboxes: &[Rect],
    collectibles: &[Collectible],
) -> Placement<Rect> {
    let mut goal = Rect::default();
    for attempt in 1..=GOAL_ATTEMPTS {
        let gx = rng.range(GOAL_EDGE_MARGIN, width - GOAL_SIZE as i32 - GOAL_EDGE_MARGIN);
        let gy = rng.range(GOAL_EDGE_MARGIN, height - GOAL_SIZE as i32 - GOAL_EDGE_MARGIN);
        goal = Rect::from_xywh(gx as f32, gy as f32, GOAL_SIZE, GOAL_SIZE);
        if goal_clear(hitboxes, collectibles, &goal) {
            return Placement {
                value: goal,
                attempts: attempt,
                clear: true,
            };
        }
    }
    Placement {
        value: goal,
        attempts: GOAL_ATTEMPTS,
        clear: false,
    }
}

/// One stage: obstacles, pickups, goal, score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub(crate) number: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) collectibles: Vec<Collectible>,
    pub(crate) goal: Rect,
    pub(crate) score: u64,
    pub(crate) completed: bool,
    #[serde(default)]
    pub(crate) placement: PlacementReport,
}

impl Level {
    /// Generate level `number` at the given size
    pub fn new(number: u32, width: u32, height: u32) -> Self {
        let mut level = Self {
            number,
            width,
            height,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            goal: Rect::default(),
            score: 0,
            completed: false,
            placement: PlacementReport::default(),
        };
        level.generate();
        log::info!(
            "Level {} generated: {}x{}, {} obstacles, {} collectibles, goal at ({}, {})",
            number,
            width,
            height,
            level.obstacles.len(),
            level.collectibles.len(),
            level.goal.left,
            level.goal.top
        );
        level
    }

    /// Build a level from explicit parts (tests, editors, replays)
    ///
    /// Hand-built levels carry an empty placement report.
    pub fn from_parts(
        number: u32,
        width: u32,
        height: u32,
        obstacles: Vec<Obstacle>,
        collectibles: Vec<Collectible>,
        goal: Rect,
    ) -> Self {
        Self {
            number,
            width,
            height,
            obstacles,
            collectibles,
            goal,
            score: 0,
            completed: false,
            placement: PlacementReport::default(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn goal(&self) -> Rect {
        self.goal
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn placement(&self) -> &PlacementReport {
        &self.placement
    }

    pub fn all_collected(&self) -> bool {
        self.collectibles.iter().all(|c| c.is_collected())
    }

    /// Interior platforms generated for level `number`
    pub fn platform_count(number: u32) -> u32 {
        BASE_PLATFORMS.saturating_add(number)
    }

    /// Where the avatar starts on this level
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new((self.width / 4) as f32, (self.height / 4) as f32)
    }

    /// Translate moving obstacles by one tick
    pub fn update_obstacles(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.update();
        }
    }

    fn generate(&mut self) {
        let w = self.width as f32;
        let h = self.height as f32;
        let mut rng = LevelRng::for_level(self.number);

        // Boundary walls: top, bottom, left, right
        self.obstacles.push(Obstacle::boundary(0.0, 0.0, w, WALL_THICKNESS));
        self.obstacles
            .push(Obstacle::boundary(0.0, h - WALL_THICKNESS, w, WALL_THICKNESS));
        self.obstacles.push(Obstacle::boundary(0.0, 0.0, WALL_THICKNESS, h));
        self.obstacles
            .push(Obstacle::boundary(w - WALL_THICKNESS, 0.0, WALL_THICKNESS, h));

        let width = self.width as i32;
        let height = self.height as i32;

        // More platforms on later levels
        for _ in 0..Self::platform_count(self.number) {
            let pw = rng.range(PLATFORM_MIN_WIDTH, PLATFORM_MAX_WIDTH);
            let ph = rng.range(PLATFORM_MIN_HEIGHT, PLATFORM_MAX_HEIGHT);
            let px = rng.range(PLATFORM_EDGE_MARGIN, width - pw - PLATFORM_EDGE_MARGIN);
            let py = rng.range(PLATFORM_EDGE_MARGIN, height - ph - PLATFORM_EDGE_MARGIN);
            self.obstacles.push(Obstacle::platform(
                px as f32, py as f32, pw as f32, ph as f32,
            ));
        }

        let hitboxes: Vec<Rect> = self.obstacles.iter().map(Obstacle::hitbox).collect();

        for i in 0..COLLECTIBLE_COUNT {
            let placed = place_collectible(&mut rng, width, height, &hitboxes);
            if !placed.clear {
                log::warn!(
                    "Level {}: collectible {} placed near an obstacle after {} attempts",
                    self.number,
                    i,
                    placed.attempts
                );
            }
            self.placement.collectibles_clear.push(placed.clear);
            self.collectibles.push(Collectible::new(placed.value));
        }

        let placed = place_goal(&mut rng, width, height, &hitboxes, &self.collectibles);
        if !placed.clear {
            log::warn!(
                "Level {}: goal placed without clearance after {} attempts",
                self.number,
                placed.attempts
            );
        }
        self.placement.goal_clear = placed.clear;
        self.goal = placed.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn layout(level: &Level) -> (Vec<(f32, f32, f32, f32)>, Vec<(f32, f32)>, Rect) {
        (
            level
                .obstacles()
                .iter()
                .map(|o| (o.pos.x, o.pos.y, o.size.x, o.size.y))
                .collect(),
            level
                .collectibles()
                .iter()
                .map(|c| (c.pos().x, c.pos().y))
                .collect(),
            level.goal(),
        )
    }

    #[test]
    fn test_rng_is_seeded_by_level() {
        let mut a = LevelRng::for_level(7);
        let mut b = LevelRng::for_level(7);
        let mut c = LevelRng::for_level(8);
        let xs: Vec<u32> = (0..16).map(|_| a.below(1000)).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.below(1000)).collect();
        let zs: Vec<u32> = (0..16).map(|_| c.below(1000)).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
        assert!(xs.iter().all(|&x| x < 1000));
    }

    #[test]
    fn test_rng_empty_range() {
        let mut rng = LevelRng::for_level(1);
        assert_eq!(rng.range(100, 100), 100);
        assert_eq!(rng.range(100, 50), 100);
        for _ in 0..100 {
            let v = rng.range(-5, 5);
            assert!((-5..5).contains(&v));
        }
    }

    #[test]
    fn test_level_structure() {
        let level = Level::new(3, LEVEL_WIDTH, LEVEL_HEIGHT);
        assert_eq!(level.obstacles().len(), 4 + 5 + 3);
        assert_eq!(level.collectibles().len(), COLLECTIBLE_COUNT);
        assert_eq!(level.score(), 0);
        assert!(!level.is_completed());

        let walls: Vec<_> = level
            .obstacles()
            .iter()
            .filter(|o| o.kind == ObstacleKind::Boundary)
            .collect();
        assert_eq!(walls.len(), 4);
        assert!(walls.iter().all(|o| o.speed == 0.0 && o.inset.is_none()));
        assert_eq!(walls[0].bounds(), Rect::new(0.0, 0.0, 2000.0, 50.0));
        assert_eq!(walls[3].bounds(), Rect::new(1950.0, 0.0, 2000.0, 1500.0));
    }

    #[test]
    fn test_platforms_respect_margins() {
        for n in 1..20 {
            let level = Level::new(n, LEVEL_WIDTH, LEVEL_HEIGHT);
            for o in level.obstacles().iter().filter(|o| o.kind == ObstacleKind::Platform) {
                assert!((100.0..300.0).contains(&o.size.x));
                assert!((20.0..40.0).contains(&o.size.y));
                let b = o.bounds();
                assert!(b.left >= 100.0 && b.top >= 100.0);
                assert!(b.right <= LEVEL_WIDTH as f32 - 100.0);
                assert!(b.bottom <= LEVEL_HEIGHT as f32 - 100.0);
                assert!(o.inset.is_some());
            }
            let g = level.goal();
            assert_eq!(g.width(), GOAL_SIZE);
            assert!(g.left >= 100.0 && g.right <= LEVEL_WIDTH as f32 - 100.0);
            for c in level.collectibles() {
                assert!(c.pos().x >= 150.0 && c.pos().x < LEVEL_WIDTH as f32 - 150.0);
                assert!(c.pos().y >= 150.0 && c.pos().y < LEVEL_HEIGHT as f32 - 150.0);
            }
        }
    }

    #[test]
    fn test_tiny_level_still_generates() {
        let level = Level::new(4, 120, 90);
        assert_eq!(level.obstacles().len(), 4 + 5 + 4);
        assert_eq!(level.collectibles().len(), COLLECTIBLE_COUNT);
    }

    #[test]
    fn test_spawn_point() {
        let level = Level::new(1, 2000, 1500);
        assert_eq!(level.spawn_point(), Vec2::new(500.0, 375.0));
    }

    #[test]
    fn test_platform_count_saturates() {
        assert_eq!(Level::platform_count(1), 6);
        assert_eq!(Level::platform_count(u32::MAX - 2), u32::MAX);
        assert_eq!(Level::platform_count(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_clear_placements_keep_their_distance() {
        let mut clear_collectibles = 0;
        let mut clear_goals = 0;
        for n in 1..60 {
            let level = Level::new(n, LEVEL_WIDTH, LEVEL_HEIGHT);
            let hitboxes: Vec<Rect> = level.obstacles().iter().map(Obstacle::hitbox).collect();
            let report = level.placement();
            assert_eq!(report.collectibles_clear.len(), COLLECTIBLE_COUNT);

            for (c, &clear) in level.collectibles().iter().zip(&report.collectibles_clear) {
                if !clear {
                    continue;
                }
                clear_collectibles += 1;
                let p = c.pos();
                for hb in &hitboxes {
                    let inside_x = p.x > hb.left - 120.0 && p.x < hb.right + 120.0;
                    let inside_y = p.y > hb.top - 120.0 && p.y < hb.bottom + 120.0;
                    assert!(!(inside_x && inside_y), "level {}: {:?} near {:?}", n, p, hb);
                }
            }

            if report.goal_clear {
                clear_goals += 1;
                let g = level.goal();
                let zone = Rect::new(g.left - 150.0, g.top - 150.0, g.right + 150.0, g.bottom + 150.0);
                assert!(hitboxes.iter().all(|hb| !zone.intersects(hb)), "level {}", n);
                for c in level.collectibles() {
                    assert!(c.pos().distance(g.center()) >= 150.0, "level {}", n);
                }
            }
        }
        assert!(clear_collectibles > 0);
        assert!(clear_goals > 0);
    }

    #[test]
    fn test_collectible_budget_exhausted_keeps_last_draw() {
        // One hit-box over the whole map: no candidate can ever be clear
        let hitboxes = [Rect::new(0.0, 0.0, 700.0, 600.0)];
        let mut rng = LevelRng::for_level(9);
        let mut replay = rng.clone();

        let placed = place_collectible(&mut rng, 700, 600, &hitboxes);

        let mut last = Vec2::ZERO;
        for _ in 0..COLLECTIBLE_ATTEMPTS {
            let x = replay.range(150, 550);
            let y = replay.range(150, 450);
            last = Vec2::new(x as f32, y as f32);
        }
        assert!(!placed.clear);
        assert_eq!(placed.attempts, COLLECTIBLE_ATTEMPTS);
        assert_eq!(placed.value, last);
        // Exactly two draws per attempt were consumed
        assert_eq!(rng.below(1 << 20), replay.below(1 << 20));
    }

    #[test]
    fn test_goal_budget_exhausted_keeps_last_draw() {
        let hitboxes = [Rect::new(0.0, 0.0, 700.0, 600.0)];
        let mut rng = LevelRng::for_level(11);
        let mut replay = rng.clone();

        let placed = place_goal(&mut rng, 700, 600, &hitboxes, &[]);

        let mut last = Rect::default();
        for _ in 0..GOAL_ATTEMPTS {
            let x = replay.range(100, 500);
            let y = replay.range(100, 400);
            last = Rect::from_xywh(x as f32, y as f32, 100.0, 100.0);
        }
        assert!(!placed.clear);
        assert_eq!(placed.attempts, GOAL_ATTEMPTS);
        assert_eq!(placed.value, last);
        assert_eq!(rng.below(1 << 20), replay.below(1 << 20));
    }

    #[test]
    fn test_goal_rejects_nearby_collectible() {
        let goal = Rect::from_xywh(500.0, 500.0, 100.0, 100.0);
        // Center (550, 550): 149 away is too close, 150 is fine
        let near = [Collectible::new(Vec2::new(699.0, 550.0))];
        let far = [Collectible::new(Vec2::new(700.0, 550.0))];
        assert!(!goal_clear(&[], &near, &goal));
        assert!(goal_clear(&[], &far, &goal));

        // A hit-box 149 away intersects the clearance zone
        assert!(!goal_clear(&[Rect::from_xywh(749.0, 500.0, 10.0, 10.0)], &[], &goal));
        assert!(goal_clear(&[Rect::from_xywh(750.0, 500.0, 10.0, 10.0)], &[], &goal));
    }

    #[test]
    fn test_collectible_rejects_points_near_hitbox() {
        let hitboxes = [Rect::new(500.0, 500.0, 600.0, 520.0)];
        assert!(!collectible_clear(&hitboxes, Vec2::new(550.0, 639.0)));
        assert!(collectible_clear(&hitboxes, Vec2::new(550.0, 640.0)));
        assert!(!collectible_clear(&hitboxes, Vec2::new(381.0, 510.0)));
        assert!(collectible_clear(&hitboxes, Vec2::new(380.0, 510.0)));
    }

    #[test]
    fn test_crowded_level_reports_unclear_placements() {
        // Walls alone swallow every candidate on a tiny map
        let level = Level::new(4, 120, 90);
        assert_eq!(level.placement().collectibles_clear, vec![false; COLLECTIBLE_COUNT]);
        assert!(!level.placement().goal_clear);
        assert_eq!(level.goal(), Rect::from_xywh(100.0, 100.0, 100.0, 100.0));
        for c in level.collectibles() {
            assert_eq!(c.pos(), Vec2::new(150.0, 150.0));
        }
    }

    proptest! {
        #[test]
        fn generation_is_deterministic(n in 1u32..500, w in 600u32..4000, h in 600u32..4000) {
            let a = Level::new(n, w, h);
            let b = Level::new(n, w, h);
            prop_assert_eq!(layout(&a), layout(&b));
        }
    }
}
