//! The truck
//!
//! Owns the speed multiplier every parallax layer scales by, plus its own
//! cosmetics: body bounce, a spring-damper antenna, exhaust smoke, dust or
//! spray from the rear wheel, skid marks under hard braking, and lights.

use macroquad::prelude::*;

use super::particles::{DustParticle, ParticleRng, SkidMark, SmokeParticle, SplashParticle};
use crate::config::{SceneConfig, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Fallback sprite size when no texture is present
const BODY_WIDTH: f32 = 100.0;
const BODY_HEIGHT: f32 = 50.0;

const PIPE_OFFSET_X: f32 = 45.0;
const PIPE_OFFSET_Y: f32 = 50.0;
const WHEEL_OFFSET_X: f32 = 15.0;

/// Spring-damper state for the whip antenna
#[derive(Debug)]
pub struct Antenna {
    pub angle: f32,
    velocity: f32,
    spring: f32,
    damping: f32,
    pub base_x: f32,
    pub base_y: f32,
    pub length: f32,
}

impl Antenna {
    fn new() -> Self {
        Self {
            angle: 0.0,
            velocity: 0.0,
            spring: 25.0,
            damping: 8.0,
            base_x: 65.0,
            base_y: 15.0,
            length: 35.0,
        }
    }

    /// Hooke's-law spring toward a target angle set by wind and acceleration,
    /// Euler-integrated and clamped so it can't windmill
    fn update(&mut self, dt: f32, wind: f32, speed_multiplier: f32) {
        let mut target = 0.0;
        target -= wind / 250.0;
        target -= (speed_multiplier - 1.0) * 0.2;

        let spring_force = self.spring * (target - self.angle);
        let damping_force = -self.damping * self.velocity;
        let acceleration = spring_force + damping_force;

        self.velocity += acceleration * dt;
        self.angle += self.velocity * dt;
        self.angle = self.angle.clamp(-std::f32::consts::FRAC_PI_3, std::f32::consts::FRAC_PI_3);
    }
}

pub struct Truck {
    pub x: f32,
    pub y: f32,
    base_y: f32,
    bounce_angle: f32,
    pub speed_multiplier: f32,
    pub antenna: Antenna,
    wheel_angle: f32,

    smoke: Vec<SmokeParticle>,
    dust: Vec<DustParticle>,
    splash: Vec<SplashParticle>,
    smoke_timer: f32,
    skid_timer: f32,
    dust_timer: f32,
    splash_timer: f32,
    rng: ParticleRng,
}

impl Truck {
    pub fn new() -> Self {
        let base_y = CANVAS_HEIGHT - 15.0 - BODY_HEIGHT;
        Self {
            x: CANVAS_WIDTH * 0.25,
            y: base_y,
            base_y,
            bounce_angle: 0.0,
            speed_multiplier: 1.0,
            antenna: Antenna::new(),
            wheel_angle: 0.0,
            smoke: Vec::new(),
            dust: Vec::new(),
            splash: Vec::new(),
            smoke_timer: 0.0,
            skid_timer: 0.0,
            dust_timer: 0.0,
            splash_timer: 0.0,
            rng: ParticleRng::new(0xCAFE),
        }
    }

    /// Cabin position, where the radio visualizer floats
    pub fn cabin(&self) -> (f32, f32) {
        (self.x + 75.0, self.y - 15.0)
    }

    /// Apply throttle/brake input; everything is scaled to frames-at-60fps so
    /// the feel matches regardless of the actual frame rate
    pub fn update_speed(&mut self, accelerate: bool, brake: bool, dt: f32, cfg: &SceneConfig) {
        let frames = dt * 60.0;
        let t = &cfg.truck;
        if accelerate {
            self.speed_multiplier = (self.speed_multiplier + t.acceleration * frames).min(t.max_speed);
        } else if brake {
            self.speed_multiplier = (self.speed_multiplier - t.deceleration * frames).max(t.min_speed);
        } else if self.speed_multiplier > 1.0 {
            self.speed_multiplier = (self.speed_multiplier - t.natural_deceleration * frames).max(1.0);
        } else if self.speed_multiplier < 1.0 {
            self.speed_multiplier = (self.speed_multiplier + t.natural_deceleration * frames).min(1.0);
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        is_night: bool,
        wind: f32,
        braking: bool,
        skid_marks: &mut Vec<SkidMark>,
        cfg: &SceneConfig,
    ) {
        self.bounce_angle += dt * 10.0 * self.speed_multiplier;
        self.y = self.base_y - self.bounce_angle.sin() * 2.0;
        self.wheel_angle += dt * 8.0 * self.speed_multiplier;

        self.antenna.update(dt, wind, self.speed_multiplier);
        self.update_emitters(dt, is_night, braking, skid_marks, cfg);

        for p in &mut self.smoke {
            p.update(dt, wind);
        }
        self.smoke.retain(|p| p.alive());
        for p in &mut self.dust {
            p.update(dt);
        }
        self.dust.retain(|p| p.alive());
        for p in &mut self.splash {
            p.update(dt);
        }
        self.splash.retain(|p| p.alive());
    }

    fn update_emitters(
        &mut self,
        dt: f32,
        is_night: bool,
        braking: bool,
        skid_marks: &mut Vec<SkidMark>,
        cfg: &SceneConfig,
    ) {
        // Exhaust smoke, denser at speed
        self.smoke_timer += dt;
        let smoke_interval = (0.3 / self.speed_multiplier).max(0.08);
        if self.smoke_timer > smoke_interval {
            self.smoke_timer = 0.0;
            let pipe_x = self.x + PIPE_OFFSET_X;
            let pipe_y = self.y + PIPE_OFFSET_Y;
            self.smoke.push(SmokeParticle::new(
                pipe_x - 10.0,
                pipe_y,
                is_night,
                self.speed_multiplier,
                &mut self.rng,
            ));
        }

        let wheel_x = self.x + WHEEL_OFFSET_X;
        let wheel_y = CANVAS_HEIGHT - 3.0;

        // Hard braking on dry road lays rubber and tire smoke
        let braking_hard = braking && self.speed_multiplier > 1.2;
        if braking_hard && !is_night {
            self.skid_timer += dt;
            if self.skid_timer > 0.05 {
                self.skid_timer = 0.0;
                skid_marks.push(SkidMark::new(wheel_x, wheel_y, self.speed_multiplier, cfg.truck.max_speed));
                self.smoke.push(SmokeParticle::tire(wheel_x, wheel_y - 5.0, is_night, &mut self.rng));
            }
        }

        if is_night {
            // Wet road: spray off the rear wheel
            self.splash_timer += dt;
            let splash_interval = (0.16 / self.speed_multiplier).max(0.025);
            if self.splash_timer > splash_interval {
                self.splash_timer = 0.0;
                for _ in 0..2 {
                    self.splash.push(SplashParticle::new(wheel_x, wheel_y, self.speed_multiplier, &mut self.rng));
                }
            }
            // Rain settles the dust instantly
            self.dust.clear();
        } else {
            self.dust_timer += dt;
            let dust_interval = (0.18 / self.speed_multiplier).max(0.03);
            if self.dust_timer > dust_interval {
                self.dust_timer = 0.0;
                for _ in 0..2 {
                    self.dust.push(DustParticle::new(wheel_x, wheel_y, self.speed_multiplier, &mut self.rng));
                }
            }
            self.splash.clear();
        }
    }

    pub fn draw(
        &self,
        body: Option<&Texture2D>,
        wheels: Option<&Texture2D>,
        is_night: bool,
        fog: f32,
    ) {
        // Particles go behind the truck
        for p in &self.smoke {
            p.draw();
        }
        for p in &self.dust {
            p.draw();
        }
        for p in &self.splash {
            p.draw();
        }

        match wheels {
            Some(t) => draw_texture(t, self.x, CANVAS_HEIGHT - 15.0, WHITE),
            None => self.draw_procedural_wheels(),
        }
        match body {
            Some(t) => draw_texture(t, self.x, self.y, WHITE),
            None => self.draw_procedural_body(),
        }

        self.draw_antenna();
        self.draw_exhaust_pipe();

        if is_night {
            self.draw_headlight();
        }
        if fog > 0.0 {
            self.draw_fog_lights(fog);
        }
    }

    fn draw_procedural_body(&self) {
        let x = self.x;
        let y = self.y;
        // Trailer
        draw_rectangle(x, y, BODY_WIDTH * 0.62, BODY_HEIGHT * 0.8, Color::from_rgba(198, 68, 60, 255));
        draw_rectangle(x, y, BODY_WIDTH * 0.62, 6.0, Color::from_rgba(226, 96, 86, 255));
        // Cab
        draw_rectangle(x + BODY_WIDTH * 0.62, y + BODY_HEIGHT * 0.25, BODY_WIDTH * 0.38, BODY_HEIGHT * 0.55, Color::from_rgba(60, 110, 180, 255));
        draw_rectangle(x + BODY_WIDTH * 0.62, y + BODY_HEIGHT * 0.8, BODY_WIDTH * 0.38, BODY_HEIGHT * 0.2, Color::from_rgba(45, 85, 140, 255));
        // Windshield
        draw_rectangle(x + BODY_WIDTH * 0.78, y + BODY_HEIGHT * 0.32, BODY_WIDTH * 0.16, BODY_HEIGHT * 0.22, Color::from_rgba(180, 225, 235, 255));
        // Bumper
        draw_rectangle(x + BODY_WIDTH * 0.96, y + BODY_HEIGHT * 0.75, BODY_WIDTH * 0.06, BODY_HEIGHT * 0.18, Color::from_rgba(160, 160, 160, 255));
    }

    fn draw_procedural_wheels(&self) {
        let ground = CANVAS_HEIGHT - 3.0;
        for (offset, radius) in [(WHEEL_OFFSET_X, 12.0), (38.0, 12.0), (82.0, 12.0)] {
            let cx = self.x + offset;
            let cy = ground - radius;
            draw_circle(cx, cy, radius, Color::from_rgba(30, 30, 30, 255));
            draw_circle(cx, cy, radius * 0.55, Color::from_rgba(120, 120, 120, 255));
            // Spokes show the spin
            for i in 0..3 {
                let a = self.wheel_angle + i as f32 * std::f32::consts::TAU / 3.0;
                draw_line(cx, cy, cx + a.cos() * radius * 0.5, cy + a.sin() * radius * 0.5, 1.5, Color::from_rgba(60, 60, 60, 255));
            }
        }
    }

    fn draw_antenna(&self) {
        let base_x = self.x + self.antenna.base_x;
        let base_y = self.y + self.antenna.base_y;
        // Rotate the mast around its base by the spring angle
        let tip_x = base_x + self.antenna.angle.sin() * self.antenna.length;
        let tip_y = base_y - self.antenna.angle.cos() * self.antenna.length;
        draw_line(base_x, base_y, tip_x, tip_y, 1.5, Color::from_rgba(85, 85, 85, 255));
        draw_circle(tip_x, tip_y, 2.0, Color::from_rgba(169, 50, 38, 255));
    }

    fn draw_exhaust_pipe(&self) {
        let pipe_x = self.x + PIPE_OFFSET_X;
        let pipe_y = self.y + PIPE_OFFSET_Y;
        draw_rectangle(pipe_x - 8.0, pipe_y - 2.0, 8.0, 4.0, Color::from_rgba(61, 61, 61, 255));
        draw_rectangle(pipe_x - 10.0, pipe_y - 3.0, 2.0, 6.0, Color::from_rgba(34, 34, 34, 255));
    }

    /// Flickering trapezoid of light ahead of the cab
    fn draw_headlight(&self) {
        let x = self.x + 85.0;
        let y_top = self.y + 32.0;
        let y_bottom = self.y + 47.0;
        let flicker = if macroquad::rand::gen_range(0.0, 1.0) > 0.1 { 0.6 } else { 0.5 };
        let trail = 150.0 * (0.5 + self.speed_multiplier / 2.0);
        let warm = Color::new(1.0, 1.0, 0.88, flicker * 0.25);
        let dim = Color::new(1.0, 1.0, 0.88, 0.02);

        draw_triangle(vec2(x, y_top), vec2(x + trail, y_top), vec2(x, y_bottom), warm);
        draw_triangle(vec2(x + trail, y_top), vec2(x + trail, y_bottom + 40.0), vec2(x, y_bottom), dim);
    }

    fn draw_fog_lights(&self, intensity: f32) {
        let flicker = if macroquad::rand::gen_range(0.0, 1.0) > 0.1 { 1.0 } else { 0.9 };
        let alpha = intensity * 0.7 * flicker;
        let light_y = self.y + BODY_HEIGHT + 8.0;

        for light_x in [self.x + 70.0, self.x + 82.0] {
            self.draw_fog_cone(light_x, light_y, alpha);
            draw_rectangle(light_x - 2.0, light_y - 2.0, 4.0, 4.0, Color::new(1.0, 0.86, 0.59, intensity * 0.9));
        }
    }

    fn draw_fog_cone(&self, light_x: f32, light_y: f32, alpha: f32) {
        let cone_length = 90.0;
        let cone_spread = 50.0;
        let warm = Color::new(1.0, 0.86, 0.59, alpha * 0.5);
        draw_triangle(
            vec2(light_x, light_y - 3.0),
            vec2(light_x + cone_length, light_y - cone_spread / 2.0 + 20.0),
            vec2(light_x, light_y + 3.0),
            warm,
        );
        draw_triangle(
            vec2(light_x + cone_length, light_y - cone_spread / 2.0 + 20.0),
            vec2(light_x + cone_length, light_y + cone_spread / 2.0 + 20.0),
            vec2(light_x, light_y + 3.0),
            warm,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_accelerate_caps_at_max_speed() {
        let cfg = SceneConfig::default();
        let mut truck = Truck::new();
        for _ in 0..200 {
            truck.update_speed(true, false, DT, &cfg);
        }
        assert!((truck.speed_multiplier - cfg.truck.max_speed).abs() < 0.001);
    }

    #[test]
    fn test_brake_floors_at_min_speed() {
        let cfg = SceneConfig::default();
        let mut truck = Truck::new();
        for _ in 0..200 {
            truck.update_speed(false, true, DT, &cfg);
        }
        assert!((truck.speed_multiplier - cfg.truck.min_speed).abs() < 0.001);
    }

    #[test]
    fn test_speed_relaxes_to_cruise() {
        let cfg = SceneConfig::default();
        let mut truck = Truck::new();
        truck.speed_multiplier = 2.0;
        for _ in 0..300 {
            truck.update_speed(false, false, DT, &cfg);
        }
        assert!((truck.speed_multiplier - 1.0).abs() < 0.001);

        truck.speed_multiplier = 0.3;
        for _ in 0..300 {
            truck.update_speed(false, false, DT, &cfg);
        }
        assert!((truck.speed_multiplier - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_antenna_settles_near_target() {
        let mut antenna = Antenna::new();
        let wind = 25.0;
        let speed = 1.0;
        for _ in 0..600 {
            antenna.update(DT, wind, speed);
        }
        let expected = -wind / 250.0;
        assert!((antenna.angle - expected).abs() < 0.01, "angle {} vs {}", antenna.angle, expected);
        assert!(antenna.velocity.abs() < 0.05);
    }

    #[test]
    fn test_antenna_angle_is_clamped() {
        let mut antenna = Antenna::new();
        for _ in 0..600 {
            antenna.update(DT, 500.0, 3.0);
        }
        assert!(antenna.angle >= -std::f32::consts::FRAC_PI_3 - 0.001);
    }

    #[test]
    fn test_truck_bounces_around_base_height() {
        let cfg = SceneConfig::default();
        let mut truck = Truck::new();
        let mut skids = Vec::new();
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for _ in 0..120 {
            truck.update(DT, false, 0.0, false, &mut skids, &cfg);
            min_y = min_y.min(truck.y);
            max_y = max_y.max(truck.y);
        }
        assert!(min_y >= truck.base_y - 2.001);
        assert!(max_y <= truck.base_y + 2.001);
        assert!(max_y - min_y > 1.0, "should visibly bounce");
    }

    #[test]
    fn test_exhaust_smoke_accumulates() {
        let cfg = SceneConfig::default();
        let mut truck = Truck::new();
        let mut skids = Vec::new();
        for _ in 0..60 {
            truck.update(DT, false, 10.0, false, &mut skids, &cfg);
        }
        assert!(!truck.smoke.is_empty());
        assert!(!truck.dust.is_empty(), "daytime dust emitter should run");
        assert!(truck.splash.is_empty(), "no spray on a dry day");
    }

    #[test]
    fn test_night_switches_dust_for_spray() {
        let cfg = SceneConfig::default();
        let mut truck = Truck::new();
        let mut skids = Vec::new();
        for _ in 0..60 {
            truck.update(DT, true, 10.0, false, &mut skids, &cfg);
        }
        assert!(truck.dust.is_empty());
        assert!(!truck.splash.is_empty());
    }

    #[test]
    fn test_hard_braking_lays_skid_marks() {
        let cfg = SceneConfig::default();
        let mut truck = Truck::new();
        let mut skids = Vec::new();
        truck.speed_multiplier = 2.0;
        for _ in 0..30 {
            truck.update(DT, false, 0.0, true, &mut skids, &cfg);
        }
        assert!(!skids.is_empty());

        // Gentle cruising leaves none
        let mut truck = Truck::new();
        let mut skids = Vec::new();
        for _ in 0..30 {
            truck.update(DT, false, 0.0, true, &mut skids, &cfg);
        }
        assert!(skids.is_empty(), "speed 1.0 is below the skid threshold");
    }
}
