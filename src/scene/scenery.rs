//! Parallax backdrop: mountain/hill discs and the distant cityscape

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{rgb, SceneConfig, CANVAS_HEIGHT, CANVAS_WIDTH};

/// A big soft circle poking over the horizon. Mountains use a slow layer
/// speed, hills a faster one, which sells the depth.
pub struct SceneryObject {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Layer speed in px per frame-at-60fps, scaled by truck speed
    pub speed: f32,
}

impl SceneryObject {
    pub fn new(x: f32, y: f32, radius: f32, speed: f32) -> Self {
        Self { x, y, radius, speed }
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32) {
        self.x -= self.speed * speed_multiplier * dt * 60.0;
        if self.x < -self.radius * 2.0 {
            self.x = CANVAS_WIDTH + self.radius * 2.0;
        }
    }

    pub fn draw(&self, cfg: &SceneConfig) {
        draw_circle(self.x, self.y, self.radius, rgb(cfg.palette.scenery));
    }
}

/// The default backdrop: three mountains and three hills
pub fn default_layers() -> (Vec<SceneryObject>, Vec<SceneryObject>) {
    let mountains = vec![
        SceneryObject::new(100.0, CANVAS_HEIGHT + 100.0, 120.0, 1.0),
        SceneryObject::new(400.0, CANVAS_HEIGHT + 80.0, 150.0, 1.0),
        SceneryObject::new(700.0, CANVAS_HEIGHT + 120.0, 100.0, 1.0),
    ];
    let hills = vec![
        SceneryObject::new(200.0, CANVAS_HEIGHT + 20.0, 80.0, 2.0),
        SceneryObject::new(500.0, CANVAS_HEIGHT + 30.0, 100.0, 2.0),
        SceneryObject::new(800.0, CANVAS_HEIGHT + 15.0, 90.0, 2.0),
    ];
    (mountains, hills)
}

struct Window {
    x: f32,
    y: f32,
    on: bool,
}

struct Building {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    windows: Vec<Window>,
}

/// Far-distance building silhouettes, tiled twice for an endless strip.
/// Barely moves; the city is a long way off.
pub struct Cityscape {
    buildings: Vec<Building>,
    total_width: f32,
    x: f32,
    speed: f32,
}

impl Cityscape {
    pub fn new() -> Self {
        let total_width = CANVAS_WIDTH * 2.0;
        let mut buildings = Vec::new();
        let mut current_x = 0.0;
        while current_x < total_width {
            let width = gen_range(30.0, 90.0);
            let height = gen_range(40.0, 120.0);
            let y = CANVAS_HEIGHT - height;

            let count = ((width * height) / 200.0) as usize;
            let windows = (0..count)
                .map(|_| Window {
                    x: gen_range(2.0, (width - 4.0).max(3.0)),
                    y: gen_range(4.0, (height - 4.0).max(5.0)),
                    on: gen_range(0.0, 1.0) > 0.4,
                })
                .collect();

            buildings.push(Building {
                x: current_x,
                y,
                width,
                height,
                windows,
            });
            current_x += width + gen_range(0.0, 5.0);
        }

        Self {
            buildings,
            total_width,
            x: 0.0,
            speed: 5.0,
        }
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32) {
        // Only weakly coupled to the truck - it's on the horizon
        let effective = self.speed * (speed_multiplier * 0.2 + 0.8);
        self.x -= effective * dt;
        if self.x < -self.total_width {
            self.x += self.total_width;
        }
    }

    pub fn draw(&self, is_night: bool, clock: f32) {
        self.draw_set(self.x, is_night, clock);
        self.draw_set(self.x + self.total_width, is_night, clock);
    }

    fn draw_set(&self, offset_x: f32, is_night: bool, clock: f32) {
        let silhouette = Color::from_rgba(26, 37, 42, 255);
        for b in &self.buildings {
            draw_rectangle(offset_x + b.x, b.y, b.width, b.height, silhouette);
        }

        if is_night {
            let time_factor = clock * 2.0;
            for b in &self.buildings {
                for (i, w) in b.windows.iter().enumerate() {
                    let flicker = (time_factor + i as f32 * 0.5).sin() > 0.8;
                    if w.on || flicker {
                        let color = if flicker {
                            WHITE
                        } else {
                            Color::from_rgba(253, 245, 169, 255)
                        };
                        draw_rectangle(offset_x + b.x + w.x, b.y + w.y, 2.0, 3.0, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenery_wraps_around() {
        let mut obj = SceneryObject::new(10.0, 200.0, 50.0, 2.0);
        // Push it well past the left edge
        for _ in 0..120 {
            obj.update(1.0 / 60.0, 1.0);
        }
        assert!(obj.x > 0.0, "should have wrapped to the right");
        assert!(obj.x <= CANVAS_WIDTH + obj.radius * 2.0);
    }

    #[test]
    fn test_mountains_slower_than_hills() {
        let (mountains, hills) = default_layers();
        assert_eq!(mountains.len(), 3);
        assert_eq!(hills.len(), 3);
        assert!(mountains.iter().all(|m| m.speed < hills[0].speed));
    }

    #[test]
    fn test_cityscape_covers_strip() {
        macroquad::rand::srand(42);
        let city = Cityscape::new();
        assert!(!city.buildings.is_empty());
        let last = city.buildings.last().unwrap();
        // Generation runs until the strip is covered
        assert!(last.x + last.width >= city.total_width);
        for b in &city.buildings {
            assert!(b.y >= 0.0 && b.y < CANVAS_HEIGHT);
            for w in &b.windows {
                assert!(w.x < b.width);
                assert!(w.y < b.height);
            }
        }
    }

    #[test]
    fn test_cityscape_loops() {
        macroquad::rand::srand(42);
        let mut city = Cityscape::new();
        city.x = -city.total_width - 1.0;
        city.update(0.016, 1.0);
        assert!(city.x > -city.total_width);
    }
}
