//! Image assets
//!
//! The core only asks whether a sprite is decoded; loading and decoding belong
//! to the browser. Cutscene and win panels are shown by the page, so they are
//! only named here.

use serde::{Deserialize, Serialize};

/// In-game sprites drawn on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Player,
    Projectile,
    Enemy,
    Platform,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [
        Sprite::Player,
        Sprite::Projectile,
        Sprite::Enemy,
        Sprite::Platform,
    ];

    pub fn file(&self) -> &'static str {
        match self {
            Sprite::Player => "ant.png",
            Sprite::Projectile => "arrow.png",
            Sprite::Enemy => "enemy.png",
            Sprite::Platform => "kintoun.png",
        }
    }
}

/// Full-screen background panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    FirstIllustration,
    Encounter,
    Capture,
    Intro,
    Win,
}

impl Panel {
    /// Cutscene panels in the order they are shown
    pub const CUTSCENE: [Panel; 4] = [
        Panel::FirstIllustration,
        Panel::Encounter,
        Panel::Capture,
        Panel::Intro,
    ];

    pub fn file(&self) -> &'static str {
        match self {
            Panel::FirstIllustration => "firstIllustration.png",
            Panel::Encounter => "encounterScene.png",
            Panel::Capture => "captureScene.png",
            Panel::Intro => "introScene.png",
            Panel::Win => "winScene.png",
        }
    }
}

/// Join an asset root and file name, tolerating a missing or extra slash
pub fn asset_url(root: &str, file: &str) -> String {
    if root.is_empty() {
        return file.to_string();
    }
    format!("{}/{}", root.trim_end_matches('/'), file)
}

/// Readiness queries for sprite images
pub trait ImageGateway {
    /// True once the sprite is decoded and can be drawn
    fn ready(&self, sprite: Sprite) -> bool;
}

impl<F: Fn(Sprite) -> bool> ImageGateway for F {
    fn ready(&self, sprite: Sprite) -> bool {
        self(sprite)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebImages;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use web_sys::HtmlImageElement;

    use super::{ImageGateway, Sprite, asset_url};

    /// Sprite images loaded through `<img>` elements
    pub struct WebImages {
        images: HashMap<Sprite, HtmlImageElement>,
    }

    impl WebImages {
        /// Start loading every sprite; images that cannot be created are skipped
        pub fn load(root: &str) -> Self {
            let mut images = HashMap::new();
            for sprite in Sprite::ALL {
                match HtmlImageElement::new() {
                    Ok(img) => {
                        img.set_src(&asset_url(root, sprite.file()));
                        images.insert(sprite, img);
                    }
                    Err(_) => log::warn!("Could not create image for {:?}", sprite),
                }
            }
            Self { images }
        }

        pub fn get(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
            self.images.get(&sprite)
        }
    }

    impl ImageGateway for WebImages {
        fn ready(&self, sprite: Sprite) -> bool {
            self.images
                .get(&sprite)
                .is_some_and(|img| img.complete() && img.natural_width() > 0)
        }
    }
}
