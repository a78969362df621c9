//! Particle effects
//!
//! Each emitter in the scene uses one of these small particle kinds: spawn
//! with randomized velocity, Euler-integrate, decrement life, cull at zero.
//! They share a deterministic xorshift RNG so particle behavior is
//! reproducible in tests.

use macroquad::prelude::*;

/// Fast xorshift PRNG (no external deps, deterministic)
#[derive(Debug, Clone)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state as f32) / (u32::MAX as f32)
    }

    /// Random float in [min, max]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }
}

/// Exhaust and tire smoke: rises, drifts back, grows as it fades,
/// with a slight heat wobble while young
pub struct SmokeParticle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    max_size: f32,
    pub life: f32,
    initial_life: f32,
    night: bool,
    tint: Option<Color>,
    wobble_angle: f32,
    wobble_speed: f32,
}

impl SmokeParticle {
    pub fn new(x: f32, y: f32, night: bool, speed_factor: f32, rng: &mut ParticleRng) -> Self {
        let life = rng.range(1.0, 2.5);
        Self {
            x,
            y,
            vx: -rng.range(30.0, 70.0) * (speed_factor * 0.5 + 0.5),
            vy: -rng.range(20.0, 50.0),
            size: rng.range(2.0, 6.0),
            max_size: rng.range(12.0, 20.0),
            life,
            initial_life: life,
            night,
            tint: None,
            wobble_angle: rng.range(0.0, std::f32::consts::TAU),
            wobble_speed: rng.range(4.0, 8.0),
        }
    }

    /// Tire smoke from hard braking - darker and denser
    pub fn tire(x: f32, y: f32, night: bool, rng: &mut ParticleRng) -> Self {
        let mut p = Self::new(x, y, night, 0.5, rng);
        p.tint = Some(Color::from_rgba(80, 80, 80, 153));
        p
    }

    pub fn update(&mut self, dt: f32, wind: f32) {
        self.life -= dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.vx -= wind * dt;
        self.wobble_angle += self.wobble_speed * dt;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn draw(&self) {
        if self.life <= 0.0 {
            return;
        }
        let progress = (self.life / self.initial_life).max(0.0);
        let size = self.size + (1.0 - progress) * (self.max_size - self.size);
        let alpha = progress * if self.night { 0.5 } else { 0.4 };

        // Hotter particles shimmer more
        let wobble = (1.0 - progress) * 2.5;
        let x = self.x + self.wobble_angle.cos() * wobble;
        let y = self.y + (self.wobble_angle * 1.5).sin() * wobble;

        let core = match self.tint {
            Some(c) => Color::new(c.r, c.g, c.b, alpha),
            None if self.night => Color::new(0.39, 0.39, 0.39, alpha),
            None => Color::new(0.86, 0.86, 0.86, alpha),
        };
        // Two discs approximate the soft radial falloff
        draw_circle(x, y, size, Color::new(core.r, core.g, core.b, alpha * 0.35));
        draw_circle(x, y, size * 0.6, core);
    }
}

/// Dry-road dust kicked up by the rear wheel (daytime only)
pub struct DustParticle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    pub life: f32,
    initial_life: f32,
}

const DUST_GRAVITY: f32 = 150.0;

impl DustParticle {
    pub fn new(x: f32, y: f32, speed_factor: f32, rng: &mut ParticleRng) -> Self {
        let life = rng.range(0.5, 1.3);
        Self {
            x,
            y,
            vx: -rng.range(40.0, 80.0) * speed_factor + rng.range(-10.0, 10.0),
            vy: -rng.range(20.0, 80.0),
            size: rng.range(1.5, 4.5),
            life,
            initial_life: life,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.vy += DUST_GRAVITY * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.life -= dt;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn draw(&self) {
        if self.life <= 0.0 {
            return;
        }
        let alpha = (self.life / self.initial_life) * 0.5;
        // Sandy brown
        draw_circle(self.x, self.y, self.size, Color::new(0.76, 0.70, 0.50, alpha));
    }
}

/// Wet-road spray from the rear wheel (rainy nights)
pub struct SplashParticle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    pub life: f32,
    initial_life: f32,
}

const SPLASH_GRAVITY: f32 = 300.0;

impl SplashParticle {
    pub fn new(x: f32, y: f32, speed_factor: f32, rng: &mut ParticleRng) -> Self {
        let life = rng.range(0.3, 0.9);
        Self {
            x,
            y,
            vx: -rng.range(50.0, 110.0) * speed_factor,
            vy: -rng.range(50.0, 150.0),
            size: rng.range(1.0, 3.5),
            life,
            initial_life: life,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.vy += SPLASH_GRAVITY * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.life -= dt;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn draw(&self) {
        if self.life <= 0.0 {
            return;
        }
        let alpha = (self.life / self.initial_life) * 0.7;
        draw_circle(self.x, self.y, self.size, Color::new(1.0, 1.0, 1.0, alpha));
    }
}

/// Rubber laid on the road during hard braking; scrolls with the ground
pub struct SkidMark {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    opacity: f32,
    pub life: f32,
    initial_life: f32,
}

/// Ground parallax speed in px/s, same as the tree layer
const GROUND_SPEED: f32 = 150.0;
const SKID_LIFE: f32 = 15.0;

impl SkidMark {
    pub fn new(x: f32, y: f32, braking_speed: f32, max_speed: f32) -> Self {
        // Faster braking leaves wider, darker marks
        let intensity = ((braking_speed - 1.0) / (max_speed - 1.0)).max(0.0);
        Self {
            x,
            y,
            width: 3.0 + intensity * 5.0,
            opacity: 0.4 + intensity * 0.3,
            life: SKID_LIFE,
            initial_life: SKID_LIFE,
        }
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32) {
        self.x -= GROUND_SPEED * speed_multiplier * dt;
        self.life -= dt;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn draw(&self) {
        if self.life <= 0.0 {
            return;
        }
        let alpha = (self.life / self.initial_life) * self.opacity;
        let color = Color::new(0.16, 0.16, 0.16, alpha);
        // Two parallel marks for the twin rear wheels
        draw_rectangle(self.x, self.y, self.width, 2.0, color);
        draw_rectangle(self.x + 20.0, self.y, self.width, 2.0, color);
    }
}

/// Cooling-tower steam: big, slow, long-lived, pushed by the wind
pub struct SteamParticle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    max_size: f32,
    pub life: f32,
    initial_life: f32,
}

impl SteamParticle {
    pub fn new(x: f32, y: f32, rng: &mut ParticleRng) -> Self {
        let life = rng.range(3.0, 7.0);
        Self {
            x: x + rng.range(-10.0, 10.0),
            y,
            vx: rng.range(-2.5, 2.5),
            vy: -rng.range(10.0, 20.0),
            size: rng.range(5.0, 15.0),
            max_size: 35.0,
            life,
            initial_life: life,
        }
    }

    pub fn update(&mut self, dt: f32, wind: f32) {
        self.life -= dt;
        self.x += (self.vx - wind * 0.3) * dt;
        self.y += self.vy * dt;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn draw(&self) {
        if self.life <= 0.0 {
            return;
        }
        let progress = (self.life / self.initial_life).max(0.0);
        let size = self.size + (1.0 - progress) * (self.max_size - self.size);
        let alpha = progress * 0.25;
        draw_circle(self.x, self.y, size, Color::new(0.86, 0.88, 0.90, alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_range_bounds() {
        let mut rng = ParticleRng::new(12345);
        for _ in 0..1000 {
            let v = rng.range(2.0, 5.0);
            assert!((2.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..10 {
            assert_eq!(a.range(0.0, 1.0), b.range(0.0, 1.0));
        }
    }

    #[test]
    fn test_smoke_lifecycle() {
        let mut rng = ParticleRng::new(1);
        let mut p = SmokeParticle::new(100.0, 200.0, false, 1.0, &mut rng);
        assert!(p.alive());
        let x0 = p.x;
        let y0 = p.y;
        p.update(0.1, 20.0);
        // Smoke rises and drifts backward
        assert!(p.x < x0);
        assert!(p.y < y0);
        // Run it past its lifetime
        for _ in 0..100 {
            p.update(0.1, 20.0);
        }
        assert!(!p.alive());
    }

    #[test]
    fn test_dust_falls_under_gravity() {
        let mut rng = ParticleRng::new(2);
        let mut p = DustParticle::new(0.0, 0.0, 1.0, &mut rng);
        let mut last_vy = f32::NEG_INFINITY;
        for _ in 0..20 {
            p.update(0.05);
            assert!(p.vy > last_vy);
            last_vy = p.vy;
        }
    }

    #[test]
    fn test_splash_falls_faster_than_dust() {
        assert!(SPLASH_GRAVITY > DUST_GRAVITY);
    }

    #[test]
    fn test_skid_mark_intensity_scales_with_speed() {
        let slow = SkidMark::new(0.0, 0.0, 1.2, 2.5);
        let fast = SkidMark::new(0.0, 0.0, 2.5, 2.5);
        assert!(fast.width > slow.width);
        assert!((fast.width - 8.0).abs() < 0.001);
        assert!((slow.width - 3.0 - (0.2 / 1.5) * 5.0).abs() < 0.001);
    }

    #[test]
    fn test_skid_mark_scrolls_with_ground() {
        let mut mark = SkidMark::new(100.0, 240.0, 2.0, 2.5);
        mark.update(1.0, 2.0);
        assert!((mark.x - (100.0 - 300.0)).abs() < 0.001);
        assert!((mark.life - (SKID_LIFE - 1.0)).abs() < 0.001);
    }

    #[test]
    fn test_steam_outlives_smoke() {
        let mut rng = ParticleRng::new(3);
        let steam = SteamParticle::new(0.0, 0.0, &mut rng);
        assert!(steam.life >= 3.0);
    }
}
