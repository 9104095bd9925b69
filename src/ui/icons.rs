// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Icon lookup for markers and the live position.
//!
//! Icons are addressed by [`IconKey`]. The [`IconAtlas`] resolves keys to
//! textures decoded from PNG files in the configured icon directory; keys
//! without an asset fall back to a drawn glyph.

use crate::models::geo::MarkerCategory;
use std::collections::HashMap;
use std::path::Path;

/// Natural size of a glyph drawn in place of a missing asset.
pub const DEFAULT_ICON_SIZE: f32 = 48.0;

/// Something that can be drawn as an icon on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKey {
    Marker(MarkerCategory),
    CurrentPosition,
}

impl IconKey {
    /// Every key the canvas may ask for.
    pub fn all() -> impl Iterator<Item = IconKey> {
        MarkerCategory::ALL
            .into_iter()
            .map(IconKey::Marker)
            .chain(std::iter::once(IconKey::CurrentPosition))
    }

    /// File stem of the PNG asset.
    pub fn asset_stem(&self) -> &'static str {
        match self {
            IconKey::Marker(category) => category.asset_stem(),
            IconKey::CurrentPosition => "user_marker",
        }
    }

    /// Fill colour of the fallback glyph.
    pub fn fallback_color(&self) -> egui::Color32 {
        match self {
            IconKey::Marker(MarkerCategory::Camping) => egui::Color32::from_rgb(46, 125, 50),
            IconKey::Marker(MarkerCategory::Mushrooms) => egui::Color32::from_rgb(141, 110, 99),
            IconKey::Marker(MarkerCategory::Berries) => egui::Color32::from_rgb(123, 31, 162),
            IconKey::CurrentPosition => egui::Color32::BLUE,
        }
    }

    /// Letter drawn on the fallback glyph.
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            IconKey::Marker(MarkerCategory::Camping) => Some("C"),
            IconKey::Marker(MarkerCategory::Mushrooms) => Some("M"),
            IconKey::Marker(MarkerCategory::Berries) => Some("B"),
            IconKey::CurrentPosition => None,
        }
    }
}

/// A texture ready to paint, with its natural size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedIcon {
    pub texture: egui::TextureId,
    pub size: egui::Vec2,
}

/// Maps icon keys to renderable images.
pub trait IconResolver {
    fn resolve(&self, key: IconKey) -> Option<ResolvedIcon>;
}

/// Icons loaded into egui textures.
#[derive(Default)]
pub struct IconAtlas {
    textures: HashMap<IconKey, egui::TextureHandle>,
}

impl IconAtlas {
    /// An atlas with no assets; everything draws as a glyph.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `<stem>.png` for every key from `dir`.
    pub fn load(ctx: &egui::Context, dir: Option<&Path>) -> Self {
        let mut atlas = Self::empty();
        let Some(dir) = dir else {
            log::info!("No icon directory configured, using drawn markers");
            return atlas;
        };

        for key in IconKey::all() {
            let path = dir.join(format!("{}.png", key.asset_stem()));
            match crate::io::media::load_image(&path) {
                Ok(img) => {
                    let size = [img.width as usize, img.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
                    let texture = ctx.load_texture(
                        key.asset_stem(),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    atlas.textures.insert(key, texture);
                    log::info!("Loaded icon: {}", path.display());
                }
                Err(e) => {
                    log::warn!("Failed to load icon {}: {}", path.display(), e);
                }
            }
        }

        if atlas.is_empty() {
            log::warn!("No icons found in {}, using drawn markers", dir.display());
        } else {
            log::info!("Loaded {} icons from {}", atlas.len(), dir.display());
        }
        atlas
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl IconResolver for IconAtlas {
    fn resolve(&self, key: IconKey) -> Option<ResolvedIcon> {
        self.textures.get(&key).map(|texture| ResolvedIcon {
            texture: texture.id(),
            size: texture.size_vec2(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_distinct_asset() {
        let stems: Vec<&str> = IconKey::all().map(|k| k.asset_stem()).collect();
        assert_eq!(stems, vec!["mushrooms", "berries", "camping", "user_marker"]);
    }

    #[test]
    fn test_empty_atlas_resolves_nothing() {
        let atlas = IconAtlas::empty();
        assert!(atlas.is_empty());
        assert!(atlas.resolve(IconKey::CurrentPosition).is_none());
        assert!(atlas
            .resolve(IconKey::Marker(MarkerCategory::Camping))
            .is_none());
    }

    #[test]
    fn test_missing_directory_loads_nothing() {
        let ctx = egui::Context::default();
        let dir = std::env::temp_dir().join("trailmark-no-such-icon-dir");
        let atlas = IconAtlas::load(&ctx, Some(&dir));
        assert_eq!(atlas.len(), 0);
    }
}
