//! The UFO
//!
//! Crosses the sky once per night. Along the way it zaps trees with a laser
//! and, in a narrow window mid-night, may abduct a cow with a tractor beam.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use super::cow::Cow;
use super::sky::night_progress;
use super::tree::Tree;
use crate::config::{lerp, CANVAS_HEIGHT, CANVAS_WIDTH};

const UFO_WIDTH: f32 = 90.0;
const UFO_HEIGHT: f32 = 26.0;
const BEAM_LIFE: f32 = 0.25;
const ABDUCTION_WINDOW: (f32, f32) = (0.72, 0.82);

/// Short-lived laser bolt from the saucer down to a tree
struct LaserBeam {
    x: f32,
    start_y: f32,
    end_y: f32,
    life: f32,
}

pub struct Ufo {
    pub x: f32,
    pub y: f32,
    lights_angle: f32,
    beams: Vec<LaserBeam>,
    shot_cooldown: f32,
    pub abducting: Option<usize>,
    pub abduction_progress: f32,
    abduction_rolled: bool,
}

impl Ufo {
    pub fn new() -> Self {
        Self {
            x: -100.0,
            y: 60.0,
            lights_angle: 0.0,
            beams: Vec::new(),
            shot_cooldown: gen_range(2.0, 5.0),
            abducting: None,
            abduction_progress: 0.0,
            abduction_rolled: false,
        }
    }

    /// Returns true the frame an abduction begins, so the caller can play the moo
    pub fn update(
        &mut self,
        dt: f32,
        cycle_progress: f32,
        is_night: bool,
        trees: &mut [Tree],
        tree_texture: Option<&Texture2D>,
        cows: &mut [Cow],
        cow_texture: Option<&Texture2D>,
    ) -> bool {
        if !is_night {
            // Park offscreen and drop any half-done abduction
            self.x = -100.0;
            self.beams.clear();
            if let Some(i) = self.abducting.take() {
                if let Some(cow) = cows.get_mut(i) {
                    cow.is_abducted = false;
                    cow.abduction_progress = 0.0;
                }
            }
            self.abduction_progress = 0.0;
            self.abduction_rolled = false;
            return false;
        }

        let p = night_progress(cycle_progress);
        self.x = lerp(-100.0, CANVAS_WIDTH + 50.0, p);
        self.y = lerp(60.0, 100.0, p);
        self.lights_angle += dt * 10.0;

        for beam in &mut self.beams {
            beam.life -= dt;
        }
        self.beams.retain(|b| b.life > 0.0);

        self.update_shooting(dt, trees, tree_texture);
        self.update_abduction(dt, cycle_progress, cows, cow_texture)
    }

    fn update_shooting(&mut self, dt: f32, trees: &mut [Tree], texture: Option<&Texture2D>) {
        self.shot_cooldown -= dt;
        if self.shot_cooldown > 0.0 {
            return;
        }
        self.shot_cooldown = gen_range(2.0, 5.0);
        if gen_range(0.0, 1.0) > 0.4 {
            return;
        }

        let center = self.x + UFO_WIDTH / 2.0;
        // Only zap a tree directly under the saucer
        let target = trees.iter_mut().find(|t| {
            !t.is_burning && (t.center_x(texture) - center).abs() < UFO_WIDTH / 2.0
        });
        if let Some(tree) = target {
            tree.is_burning = true;
            self.beams.push(LaserBeam {
                x: tree.center_x(texture),
                start_y: self.y + UFO_HEIGHT,
                end_y: tree.top_y(texture),
                life: BEAM_LIFE,
            });
        }
    }

    fn update_abduction(
        &mut self,
        dt: f32,
        cycle_progress: f32,
        cows: &mut [Cow],
        texture: Option<&Texture2D>,
    ) -> bool {
        let mut started = false;
        let in_window = cycle_progress > ABDUCTION_WINDOW.0 && cycle_progress < ABDUCTION_WINDOW.1;

        if in_window && self.abducting.is_none() && !self.abduction_rolled {
            self.abduction_rolled = true;
            if gen_range(0.0, 1.0) < 0.5 {
                let center = self.x + UFO_WIDTH / 2.0;
                // Prefer the cow closest to the beam
                let target = cows
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.visible && !c.is_abducted && c.x > 0.0 && c.x < CANVAS_WIDTH)
                    .min_by(|(_, a), (_, b)| {
                        let da = (a.x - center).abs();
                        let db = (b.x - center).abs();
                        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(i, _)| i);
                if let Some(i) = target {
                    cows[i].is_abducted = true;
                    self.abducting = Some(i);
                    self.abduction_progress = 0.0;
                    started = true;
                }
            }
        }
        if !in_window {
            self.abduction_rolled = false;
        }

        if let Some(i) = self.abducting {
            if let Some(cow) = cows.get_mut(i) {
                self.abduction_progress += dt / 2.0;
                cow.abduction_progress = self.abduction_progress.min(1.0);

                // Exponential pull toward the saucer belly
                let (_, h) = cow.size(texture);
                let target_x = self.x + UFO_WIDTH / 2.0;
                let target_y = self.y + UFO_HEIGHT - h / 2.0;
                let k = 1.0 - (-6.0 * dt).exp();
                cow.x += (target_x - cow.x) * k;
                cow.y += (target_y - cow.y) * k;

                if self.abduction_progress >= 1.0 {
                    cow.visible = false;
                    self.abducting = None;
                    self.abduction_progress = 0.0;
                }
            } else {
                self.abducting = None;
            }
        }
        started
    }

    pub fn draw(&self, is_night: bool) {
        if !is_night {
            return;
        }

        // Dome, hull, belly lights
        draw_ellipse(self.x + UFO_WIDTH / 2.0, self.y + 4.0, 20.0, 14.0, 0.0, Color::from_rgba(141, 184, 199, 255));
        draw_ellipse(self.x + UFO_WIDTH / 2.0, self.y + UFO_HEIGHT / 2.0, UFO_WIDTH / 2.0, UFO_HEIGHT / 2.0, 0.0, Color::from_rgba(105, 115, 125, 255));
        draw_ellipse(self.x + UFO_WIDTH / 2.0, self.y + UFO_HEIGHT / 2.0 + 4.0, UFO_WIDTH / 2.2, UFO_HEIGHT / 3.0, 0.0, Color::from_rgba(75, 85, 95, 255));

        for i in 0..4 {
            let phase = self.lights_angle + i as f32 * std::f32::consts::FRAC_PI_2;
            let color = Color::new(
                0.5 + 0.5 * phase.sin(),
                0.5 + 0.5 * (phase + 2.1).sin(),
                0.5 + 0.5 * (phase + 4.2).sin(),
                0.9,
            );
            let light_x = self.x + UFO_WIDTH * (0.2 + i as f32 * 0.2);
            draw_circle(light_x, self.y + UFO_HEIGHT - 4.0, 3.0, color);
        }
    }

    /// Beams render above the foreground so they visibly cut through the scene
    pub fn draw_beams(&self, is_night: bool) {
        if !is_night {
            return;
        }
        self.draw_tractor_beam();
        for beam in &self.beams {
            let alpha = (beam.life / BEAM_LIFE).clamp(0.0, 1.0);
            draw_line(beam.x, beam.start_y, beam.x, beam.end_y, 3.0, Color::new(1.0, 0.2, 0.2, alpha));
            draw_line(beam.x, beam.start_y, beam.x, beam.end_y, 1.0, Color::new(1.0, 0.9, 0.9, alpha));
        }
    }

    fn draw_tractor_beam(&self) {
        if self.abducting.is_none() {
            return;
        }
        let flicker = 0.85 + 0.15 * (self.lights_angle * 3.0).sin();
        let alpha = self.abduction_progress * 0.7 * flicker;
        let top = self.y + UFO_HEIGHT;
        let cx = self.x + UFO_WIDTH / 2.0;
        let half_top = 10.0;
        let half_bottom = 45.0;
        let green = Color::new(0.3, 1.0, 0.4, alpha);
        draw_triangle(
            vec2(cx - half_top, top),
            vec2(cx + half_top, top),
            vec2(cx - half_bottom, CANVAS_HEIGHT),
            green,
        );
        draw_triangle(
            vec2(cx + half_top, top),
            vec2(cx + half_bottom, CANVAS_HEIGHT),
            vec2(cx - half_bottom, CANVAS_HEIGHT),
            green,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ufo_hides_by_day() {
        macroquad::rand::srand(40);
        let mut ufo = Ufo::new();
        ufo.x = 300.0;
        ufo.update(0.016, 0.2, false, &mut [], None, &mut [], None);
        assert_eq!(ufo.x, -100.0);
    }

    #[test]
    fn test_ufo_crosses_over_the_night() {
        macroquad::rand::srand(41);
        let mut ufo = Ufo::new();
        ufo.update(0.016, 0.56, true, &mut [], None, &mut [], None);
        let early_x = ufo.x;
        ufo.update(0.016, 0.94, true, &mut [], None, &mut [], None);
        assert!(ufo.x > early_x);
        assert!(ufo.x > CANVAS_WIDTH * 0.8);
    }

    #[test]
    fn test_laser_ignites_tree_under_saucer() {
        macroquad::rand::srand(42);
        let mut ufo = Ufo::new();
        let mut trees = vec![Tree::new()];
        ufo.shot_cooldown = 0.0;

        // Force the saucer over the tree and roll until a shot lands
        let mut hit = false;
        for _ in 0..64 {
            trees[0].x = 250.0;
            trees[0].is_burning = false;
            ufo.update(0.016, 0.7, true, &mut trees, None, &mut [], None);
            ufo.x = 250.0 + trees[0].size(None).0 / 2.0 - UFO_WIDTH / 2.0;
            ufo.shot_cooldown = 0.0;
            ufo.update_shooting(0.016, &mut trees, None);
            if trees[0].is_burning {
                hit = true;
                break;
            }
        }
        assert!(hit, "40% shot chance should land within 64 rolls");
        assert!(!ufo.beams.is_empty());
    }

    #[test]
    fn test_laser_misses_distant_tree() {
        macroquad::rand::srand(43);
        let mut ufo = Ufo::new();
        ufo.x = 0.0;
        let mut trees = vec![Tree::new()];
        for _ in 0..64 {
            trees[0].x = 500.0;
            ufo.shot_cooldown = 0.0;
            ufo.update_shooting(0.016, &mut trees, None);
        }
        assert!(!trees[0].is_burning);
    }

    #[test]
    fn test_abduction_lifts_and_removes_cow() {
        macroquad::rand::srand(44);
        let mut ufo = Ufo::new();
        let mut cows = vec![Cow::new(None)];
        cows[0].x = 300.0;

        // Roll the 50% chance until an abduction starts
        let mut started = false;
        for _ in 0..64 {
            ufo.abduction_rolled = false;
            ufo.abducting = None;
            cows[0].is_abducted = false;
            cows[0].x = 300.0;
            if ufo.update(0.016, 0.75, true, &mut [], None, &mut cows, None) {
                started = true;
                break;
            }
        }
        assert!(started);
        assert!(cows[0].is_abducted);

        // Two seconds of beam time finishes the job
        for _ in 0..150 {
            ufo.update(0.016, 0.75, true, &mut [], None, &mut cows, None);
        }
        assert!(!cows[0].visible);
        assert!(ufo.abducting.is_none());
    }

    #[test]
    fn test_dawn_releases_half_abducted_cow() {
        macroquad::rand::srand(45);
        let mut ufo = Ufo::new();
        let mut cows = vec![Cow::new(None)];
        cows[0].is_abducted = true;
        cows[0].abduction_progress = 0.5;
        ufo.abducting = Some(0);
        ufo.abduction_progress = 0.5;

        ufo.update(0.016, 0.96, false, &mut [], None, &mut cows, None);
        assert!(!cows[0].is_abducted);
        assert_eq!(cows[0].abduction_progress, 0.0);
        assert!(ufo.abducting.is_none());
    }
}
