//! Banner-towing biplane
//!
//! Flies left-to-right across the day sky with a rippling ad banner in tow.
//! At night it snaps back offscreen and waits for morning.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{CANVAS_WIDTH, SceneConfig};

const SPEED: f32 = 165.0;
const SCALE: f32 = 0.75;
const BODY_WIDTH: f32 = 90.0 * SCALE;
const BODY_HEIGHT: f32 = 30.0 * SCALE;
const BANNER_WIDTH: f32 = 150.0;
const BANNER_HEIGHT: f32 = 45.0;
const BANNER_OFFSET: (f32, f32) = (-200.0, 10.0);

pub struct Biplane {
    pub x: f32,
    pub y: f32,
    propeller_angle: f32,
    bobbing_angle: f32,
    banner_wave: f32,
}

impl Biplane {
    pub fn new() -> Self {
        Self {
            x: -300.0,
            y: 100.0,
            propeller_angle: 0.0,
            bobbing_angle: 0.0,
            banner_wave: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, is_night: bool) {
        if is_night {
            self.x = -300.0;
            return;
        }

        // Flies against the scroll, so no speed multiplier here
        self.x += SPEED * dt;
        self.propeller_angle += dt * 50.0;
        self.bobbing_angle += dt * 5.0;
        self.banner_wave += dt * 10.0;

        if self.x > CANVAS_WIDTH + 200.0 {
            self.x = -300.0 - BANNER_WIDTH * SCALE;
            self.y = 100.0 + gen_range(0.0, 50.0);
        }
    }

    pub fn draw(&self, pilot: Option<&Texture2D>, cfg: &SceneConfig) {
        if self.x < -250.0 {
            return;
        }
        let y = self.y + self.bobbing_angle.sin() * 3.0;

        self.draw_banner(y, cfg);
        self.draw_airframe(y, pilot);
    }

    /// Rope plus a ribbon of sine-offset slices so the cloth ripples
    fn draw_banner(&self, plane_y: f32, cfg: &SceneConfig) {
        let banner_x = self.x + BANNER_OFFSET.0 * SCALE;
        let banner_y = plane_y + BANNER_OFFSET.1 * SCALE;
        let w = BANNER_WIDTH * SCALE;
        let h = BANNER_HEIGHT * SCALE;

        draw_line(banner_x + w, banner_y + h / 2.0, self.x + 5.0, plane_y + BODY_HEIGHT / 2.0, 1.0, Color::from_rgba(80, 80, 80, 255));

        let slices = 10;
        let slice_w = w / slices as f32;
        let amplitude = 4.0;
        let wavelength = 60.0;
        for i in 0..slices {
            let sx = banner_x + i as f32 * slice_w;
            let phase = self.banner_wave + sx / wavelength * std::f32::consts::TAU;
            let offset = phase.sin() * amplitude;
            draw_rectangle(sx, banner_y + offset, slice_w + 0.5, h, Color::from_rgba(255, 249, 230, 255));
        }

        let text_phase = self.banner_wave + (banner_x + w / 2.0) / wavelength * std::f32::consts::TAU;
        draw_text(
            &cfg.banner_text,
            banner_x + w * 0.18,
            banner_y + h * 0.68 + text_phase.sin() * amplitude,
            h * 0.8,
            Color::from_rgba(198, 68, 60, 255),
        );
    }

    fn draw_airframe(&self, y: f32, pilot: Option<&Texture2D>) {
        let red = Color::from_rgba(198, 68, 60, 255);
        let dark_red = Color::from_rgba(150, 45, 40, 255);

        // Fuselage and tail
        draw_ellipse(self.x + BODY_WIDTH * 0.45, y + BODY_HEIGHT * 0.55, BODY_WIDTH * 0.45, BODY_HEIGHT * 0.3, 0.0, red);
        draw_triangle(
            vec2(self.x, y + BODY_HEIGHT * 0.55),
            vec2(self.x - BODY_WIDTH * 0.12, y),
            vec2(self.x + BODY_WIDTH * 0.12, y + BODY_HEIGHT * 0.45),
            dark_red,
        );

        // Stacked wings
        draw_rectangle(self.x + BODY_WIDTH * 0.35, y - BODY_HEIGHT * 0.3, BODY_WIDTH * 0.28, 3.0, dark_red);
        draw_rectangle(self.x + BODY_WIDTH * 0.35, y + BODY_HEIGHT * 0.75, BODY_WIDTH * 0.28, 3.0, dark_red);
        draw_line(self.x + BODY_WIDTH * 0.4, y - BODY_HEIGHT * 0.3, self.x + BODY_WIDTH * 0.4, y + BODY_HEIGHT * 0.75, 1.5, Color::from_rgba(90, 90, 90, 255));
        draw_line(self.x + BODY_WIDTH * 0.58, y - BODY_HEIGHT * 0.3, self.x + BODY_WIDTH * 0.58, y + BODY_HEIGHT * 0.75, 1.5, Color::from_rgba(90, 90, 90, 255));

        // Cockpit and pilot
        let cockpit_x = self.x + BODY_WIDTH * 0.52;
        let cockpit_y = y + BODY_HEIGHT * 0.2;
        match pilot {
            Some(t) => {
                let size = BODY_HEIGHT * 0.8;
                draw_texture_ex(
                    t,
                    cockpit_x - size / 2.0,
                    cockpit_y - size / 2.0,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(size, size)),
                        ..Default::default()
                    },
                );
            }
            None => {
                draw_circle(cockpit_x, cockpit_y, BODY_HEIGHT * 0.25, Color::from_rgba(230, 190, 150, 255));
                draw_rectangle(cockpit_x - BODY_HEIGHT * 0.25, cockpit_y - BODY_HEIGHT * 0.4, BODY_HEIGHT * 0.5, BODY_HEIGHT * 0.2, Color::from_rgba(110, 70, 40, 255));
            }
        }

        // Landing gear
        let gear_y = y + BODY_HEIGHT * 0.85;
        draw_line(self.x + BODY_WIDTH * 0.5, gear_y, self.x + BODY_WIDTH * 0.45, gear_y + 6.0, 1.5, Color::from_rgba(60, 60, 60, 255));
        draw_circle(self.x + BODY_WIDTH * 0.45, gear_y + 7.0, 3.0, Color::from_rgba(30, 30, 30, 255));

        // Propeller disc
        let prop_x = self.x + BODY_WIDTH * 0.92;
        let prop_y = y + BODY_HEIGHT * 0.5;
        let blade = self.propeller_angle;
        draw_line(
            prop_x + blade.cos() * 10.0,
            prop_y + blade.sin() * 10.0,
            prop_x - blade.cos() * 10.0,
            prop_y - blade.sin() * 10.0,
            2.0,
            Color::new(0.3, 0.3, 0.3, 0.8),
        );
        draw_circle(prop_x, prop_y, 2.5, Color::from_rgba(50, 50, 50, 255));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biplane_flies_right_by_day() {
        let mut plane = Biplane::new();
        let x0 = plane.x;
        plane.update(1.0, false);
        assert!((plane.x - (x0 + SPEED)).abs() < 0.001);
    }

    #[test]
    fn test_biplane_hides_at_night() {
        let mut plane = Biplane::new();
        plane.x = 300.0;
        plane.update(0.016, true);
        assert_eq!(plane.x, -300.0);
    }

    #[test]
    fn test_biplane_wraps_with_new_altitude() {
        macroquad::rand::srand(60);
        let mut plane = Biplane::new();
        plane.x = CANVAS_WIDTH + 201.0;
        plane.update(0.016, false);
        assert!(plane.x < -300.0);
        assert!(plane.y >= 100.0 && plane.y <= 150.0);
    }
}
