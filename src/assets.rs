//! Optional scene textures
//!
//! Every texture is optional: entities carry a procedural vector fallback, so
//! the animation always runs. A file that exists but fails to decode is
//! recorded and surfaced on the HUD error banner.

use macroquad::prelude::*;

pub struct Assets {
    pub truck: Option<Texture2D>,
    pub wheels: Option<Texture2D>,
    pub tree: Option<Texture2D>,
    pub cow: Option<Texture2D>,
    pub pilot: Option<Texture2D>,
    pub billboard: Option<Texture2D>,
    /// Load failures to show on the HUD (missing files are not errors)
    pub errors: Vec<String>,
}

impl Assets {
    pub async fn load() -> Assets {
        let mut errors = Vec::new();
        let truck = load_optional("assets/truck.png", &mut errors).await;
        let wheels = load_optional("assets/wheels.png", &mut errors).await;
        let tree = load_optional("assets/tree.png", &mut errors).await;
        let cow = load_optional("assets/cow.png", &mut errors).await;
        let pilot = load_optional("assets/pilot.png", &mut errors).await;
        let billboard = load_optional("assets/billboard.png", &mut errors).await;

        Assets {
            truck,
            wheels,
            tree,
            cow,
            pilot,
            billboard,
            errors,
        }
    }
}

async fn load_optional(path: &str, errors: &mut Vec<String>) -> Option<Texture2D> {
    if !std::path::Path::new(path).exists() {
        return None;
    }
    match load_texture(path).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Linear);
            println!("Loaded texture {}", path);
            Some(tex)
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}", path, e);
            errors.push(format!("Error loading {}: {}", path, e));
            None
        }
    }
}
