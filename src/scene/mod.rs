//! The whole roadside scene
//!
//! `Scene` owns every entity and runs the day/night clock. Update order is
//! mostly free-form, but draw order is strict back-to-front so the parallax
//! layering reads correctly.

pub mod billboard;
pub mod biplane;
pub mod cloud;
pub mod cow;
pub mod critter;
pub mod particles;
pub mod plant;
pub mod rain;
pub mod scenery;
pub mod sky;
pub mod tree;
pub mod ufo;
pub mod weather;

mod truck;

pub use truck::Truck;

use crate::assets::Assets;
use crate::audio::{AudioOutput, Radio};
use crate::config::SceneConfig;
use crate::input::FrameInput;

use billboard::Billboard;
use biplane::Biplane;
use cloud::Cloud;
use cow::Cow;
use critter::Critter;
use particles::SkidMark;
use plant::NuclearPlant;
use rain::Rain;
use scenery::{Cityscape, SceneryObject};
use sky::Sky;
use tree::Tree;
use ufo::Ufo;
use weather::{Lightning, Weather};

pub struct Scene {
    pub cfg: SceneConfig,
    clock: f32,
    pub cycle_progress: f32,

    sky: Sky,
    weather: Weather,
    lightning: Lightning,
    clouds: Vec<Cloud>,
    mountains: Vec<SceneryObject>,
    hills: Vec<SceneryObject>,
    cityscape: Cityscape,
    plant: NuclearPlant,
    billboard: Billboard,
    trees: Vec<Tree>,
    cows: Vec<Cow>,
    critters: Vec<Critter>,
    rain: Rain,
    biplane: Biplane,
    ufo: Ufo,
    pub truck: Truck,
    skid_marks: Vec<SkidMark>,
    pub radio: Radio,
}

impl Scene {
    pub fn new(cfg: SceneConfig, audio: Option<AudioOutput>, assets: &Assets) -> Scene {
        let (mountains, hills) = scenery::default_layers();
        Scene {
            sky: Sky::new(&cfg),
            weather: Weather::new(),
            lightning: Lightning::new(),
            clouds: (0..cfg.cloud_count).map(|_| Cloud::new()).collect(),
            mountains,
            hills,
            cityscape: Cityscape::new(),
            plant: NuclearPlant::new(),
            billboard: Billboard::new(assets.billboard.as_ref()),
            trees: (0..cfg.tree_count).map(|_| Tree::new()).collect(),
            cows: (0..cfg.cow_count)
                .map(|_| Cow::new(assets.cow.as_ref()))
                .collect(),
            critters: (0..cfg.critter_count).map(|_| Critter::new()).collect(),
            rain: Rain::new(cfg.raindrop_count),
            biplane: Biplane::new(),
            ufo: Ufo::new(),
            truck: Truck::new(),
            skid_marks: Vec::new(),
            radio: Radio::new(audio),
            clock: 0.0,
            cycle_progress: 0.0,
            cfg,
        }
    }

    pub fn is_night(&self) -> bool {
        sky::is_night(self.cycle_progress)
    }

    pub fn update(&mut self, dt: f32, input: FrameInput, assets: &Assets) {
        self.clock += dt;
        self.cycle_progress = (self.clock / self.cfg.cycle_duration).fract();
        let night = self.is_night();

        self.weather.update(dt, self.cycle_progress);
        self.lightning.update(dt, night);
        self.sky.update(dt);

        self.truck.update_speed(input.accelerate, input.brake, dt, &self.cfg);
        let speed = self.truck.speed_multiplier;
        self.truck.update(dt, night, self.weather.wind, input.brake, &mut self.skid_marks, &self.cfg);

        for cloud in &mut self.clouds {
            cloud.update(dt);
        }
        for m in &mut self.mountains {
            m.update(dt, speed);
        }
        for h in &mut self.hills {
            h.update(dt, speed);
        }
        self.cityscape.update(dt, speed);
        self.plant.update(dt, speed, self.weather.wind);
        self.billboard.update(dt, speed);

        for tree in &mut self.trees {
            tree.update(dt, speed);
        }
        for cow in &mut self.cows {
            cow.update(dt, speed, assets.cow.as_ref());
            // Abducted cows come back with the dawn
            if !cow.visible && self.cycle_progress > 0.95 {
                cow.reset(assets.cow.as_ref());
            }
        }
        for critter in &mut self.critters {
            critter.update(dt, speed, self.cycle_progress);
        }

        let abduction_started = self.ufo.update(
            dt,
            self.cycle_progress,
            night,
            &mut self.trees,
            assets.tree.as_ref(),
            &mut self.cows,
            assets.cow.as_ref(),
        );
        if abduction_started {
            self.radio.play_moo();
        }

        self.biplane.update(dt, night);
        self.rain.update(dt, night, self.weather.wind);

        for mark in &mut self.skid_marks {
            mark.update(dt, speed);
        }
        self.skid_marks.retain(|m| m.alive());

        self.radio.update(dt, input.radio_toggle, input.radio_next);
    }

    /// Back-to-front paint of the whole frame onto the logical canvas
    pub fn draw(&self, assets: &Assets) {
        let night = self.is_night();

        self.sky.draw(self.cycle_progress, &self.cfg);
        self.sky.draw_stars(self.cycle_progress);
        self.rain.draw(night, self.weather.wind);

        self.cityscape.draw(night, self.clock);
        for m in &self.mountains {
            m.draw(&self.cfg);
        }
        for h in &self.hills {
            h.draw(&self.cfg);
        }
        for cloud in &self.clouds {
            cloud.draw(night, &self.cfg);
        }

        self.plant.draw(night);
        self.billboard.draw(assets.billboard.as_ref(), night);
        self.biplane.draw(assets.pilot.as_ref(), &self.cfg);
        self.ufo.draw(night);

        for tree in &self.trees {
            tree.draw(assets.tree.as_ref());
        }
        for cow in &self.cows {
            cow.draw(assets.cow.as_ref());
        }
        for critter in &self.critters {
            critter.draw();
        }
        for mark in &self.skid_marks {
            mark.draw();
        }

        self.truck.draw(assets.truck.as_ref(), assets.wheels.as_ref(), night, self.weather.fog);
        self.weather.draw_fog();

        let (cabin_x, cabin_y) = self.truck.cabin();
        self.radio.draw_visualizer(cabin_x, cabin_y);

        self.ufo.draw_beams(night);
        self.lightning.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;

    fn empty_assets() -> Assets {
        Assets {
            truck: None,
            wheels: None,
            tree: None,
            cow: None,
            pilot: None,
            billboard: None,
            errors: Vec::new(),
        }
    }

    fn test_scene() -> Scene {
        macroquad::rand::srand(99);
        let assets = empty_assets();
        Scene::new(SceneConfig::default(), None, &assets)
    }

    #[test]
    fn test_cycle_progress_wraps() {
        let assets = empty_assets();
        let mut scene = test_scene();
        let input = FrameInput::default();
        // A hair past one full cycle
        for _ in 0..((scene.cfg.cycle_duration * 10.0) as usize + 2) {
            scene.update(0.1, input, &assets);
        }
        assert!(scene.cycle_progress >= 0.0 && scene.cycle_progress < 1.0);
    }

    #[test]
    fn test_full_cycle_runs_without_panics() {
        let assets = empty_assets();
        let mut scene = test_scene();
        let input = FrameInput {
            accelerate: true,
            ..Default::default()
        };
        // Two cycles at 60fps touches every phase, including night
        let steps = (scene.cfg.cycle_duration * 2.0 * 60.0) as usize;
        for _ in 0..steps {
            scene.update(1.0 / 60.0, input, &assets);
        }
    }

    #[test]
    fn test_abducted_cows_return_at_dawn() {
        let assets = empty_assets();
        let mut scene = test_scene();
        scene.cows[0].visible = false;

        // Jump the clock to the dawn window
        scene.clock = scene.cfg.cycle_duration * 0.96;
        scene.update(1.0 / 60.0, FrameInput::default(), &assets);
        assert!(scene.cows[0].visible);
    }

    #[test]
    fn test_skid_marks_expire() {
        let assets = empty_assets();
        let mut scene = test_scene();
        scene.skid_marks.push(SkidMark::new(300.0, 240.0, 2.0, 2.5));
        for _ in 0..200 {
            scene.update(0.1, FrameInput::default(), &assets);
        }
        assert!(scene.skid_marks.is_empty());
    }

    #[test]
    fn test_radio_keys_are_edge_triggered_through_scene() {
        let assets = empty_assets();
        let mut scene = test_scene();
        // No output device: toggling must be a no-op, not a crash
        let input = FrameInput {
            radio_toggle: true,
            radio_next: true,
            ..Default::default()
        };
        scene.update(1.0 / 60.0, input, &assets);
        assert!(!scene.radio.is_on());
    }
}
