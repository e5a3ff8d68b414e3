use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use std::fs;
use std::path::{Path, PathBuf};

pub const FLOWER_PATH: &str = "assets/images/eden_flower.png";
pub const CLIP_DIR: &str = "assets/movies/eden_clip";

/// Start offsets (in frames) for the three clip layers. The layers play the
/// same loop, desynchronized so they don't read as one image.
pub const CLIP_LAYER_OFFSETS: [usize; 3] = [0, 240, 720];

/// Textures loaded once at startup. A missing asset is logged and the
/// corresponding draw is skipped; nothing here is fatal.
pub struct MediaLibrary {
    pub flower: Option<TextureHandle>,
    pub clip: ClipLayers,
}

impl MediaLibrary {
    pub fn load(ctx: &Context) -> Self {
        Self {
            flower: load_png_texture(ctx, Path::new(FLOWER_PATH), "eden_flower"),
            clip: ClipLayers::load(ctx, Path::new(CLIP_DIR)),
        }
    }
}

/// One looping clip, stored as a pre-extracted PNG frame sequence and played
/// back as three offset layers. Advances one frame per rendered frame.
pub struct ClipLayers {
    frames: Vec<TextureHandle>,
    tick: usize,
}

impl ClipLayers {
    fn load(ctx: &Context, dir: &Path) -> Self {
        let frames = load_clip_frames(ctx, dir);
        if frames.is_empty() {
            log::warn!("no clip frames under {}, layers stay blank", dir.display());
        } else {
            log::info!("loaded {} clip frames from {}", frames.len(), dir.display());
        }
        Self { frames, tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Current frame of the given layer, offset into the shared loop.
    pub fn layer_frame(&self, layer: usize) -> Option<&TextureHandle> {
        if self.frames.is_empty() {
            return None;
        }
        let offset = CLIP_LAYER_OFFSETS.get(layer).copied().unwrap_or(0);
        Some(&self.frames[(self.tick + offset) % self.frames.len()])
    }

    pub fn layer_count(&self) -> usize {
        CLIP_LAYER_OFFSETS.len()
    }
}

fn load_clip_frames(ctx: &Context, dir: &Path) -> Vec<TextureHandle> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("cannot read clip directory {}: {err}", dir.display());
            return Vec::new();
        }
    };
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .collect();
    // frame order comes from the file names (frame_0001.png, ...)
    paths.sort();

    paths
        .iter()
        .enumerate()
        .filter_map(|(i, path)| load_png_texture(ctx, path, &format!("eden_clip_{i}")))
        .collect()
}

fn load_png_texture(ctx: &Context, path: &Path, name: &str) -> Option<TextureHandle> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("failed to read {}: {err}", path.display());
            return None;
        }
    };
    let icon = match eframe::icon_data::from_png_bytes(&bytes) {
        Ok(icon) => icon,
        Err(err) => {
            log::warn!("failed to decode {}: {err}", path.display());
            return None;
        }
    };
    let image = ColorImage::from_rgba_unmultiplied(
        [icon.width as usize, icon.height as usize],
        &icon.rgba,
    );
    Some(ctx.load_texture(name, image, TextureOptions::LINEAR))
}
