use crate::error::AssetError;
use crate::theme::{Theme, ThemeMap};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Raw bytes of an ambient sound, decoded afresh each time it starts playing.
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub theme: Theme,
    pub bytes: Arc<[u8]>,
}

/// Original, unscaled artwork and sounds for every theme. Loaded once at
/// startup; scaled copies are always derived from these.
#[derive(Debug)]
pub struct AssetSet {
    backgrounds: ThemeMap<RgbaImage>,
    icons: ThemeMap<RgbaImage>,
    sounds: ThemeMap<SoundClip>,
}

impl AssetSet {
    /// Loads all twelve asset files from `dir`. Any missing or undecodable
    /// file aborts the load.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let backgrounds =
            ThemeMap::try_build(|theme| load_image(&dir.join(theme.background_file())))?;
        let icons = ThemeMap::try_build(|theme| load_image(&dir.join(theme.icon_file())))?;
        let sounds = ThemeMap::try_build(|theme| load_sound(theme, &dir.join(theme.sound_file())))?;

        tracing::info!("Loaded assets from {}", dir.display());
        Ok(Self {
            backgrounds,
            icons,
            sounds,
        })
    }

    #[cfg(test)]
    pub fn from_parts(
        backgrounds: ThemeMap<RgbaImage>,
        icons: ThemeMap<RgbaImage>,
        sounds: ThemeMap<SoundClip>,
    ) -> Self {
        Self {
            backgrounds,
            icons,
            sounds,
        }
    }

    pub fn background(&self, theme: Theme) -> &RgbaImage {
        self.backgrounds.get(theme)
    }

    pub fn icon(&self, theme: Theme) -> &RgbaImage {
        self.icons.get(theme)
    }

    pub fn sound(&self, theme: Theme) -> &SoundClip {
        self.sounds.get(theme)
    }

    pub fn scaled_background(&self, theme: Theme, width: u32, height: u32) -> RgbaImage {
        scale_image(self.background(theme), width, height)
    }

    pub fn scaled_icon(&self, theme: Theme, size: u32) -> RgbaImage {
        scale_image(self.icon(theme), size, size)
    }
}

/// Lanczos resize from an original. Zero dimensions are clamped to one pixel.
pub fn scale_image(original: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(original, width.max(1), height.max(1), FilterType::Lanczos3)
}

/// Draws `icon` over `background` with its top-left corner at (`x`, `y`).
pub fn compose(background: &RgbaImage, icon: &RgbaImage, x: i64, y: i64) -> RgbaImage {
    let mut scene = background.clone();
    imageops::overlay(&mut scene, icon, x, y);
    scene
}

fn require_file(path: &Path) -> Result<(), AssetError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AssetError::Missing(path.to_path_buf()))
    }
}

fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    require_file(path)?;
    let image = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Decoded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image.to_rgba8())
}

fn load_sound(theme: Theme, path: &Path) -> Result<SoundClip, AssetError> {
    require_file(path)?;
    let bytes: Arc<[u8]> = std::fs::read(path)
        .map_err(|source| AssetError::Io {
            path: PathBuf::from(path),
            source,
        })?
        .into();

    // Decode once up front so a corrupt clip fails at startup, not on first play.
    rodio::Decoder::new(Cursor::new(bytes.clone())).map_err(|source| AssetError::Sound {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(SoundClip { theme, bytes })
}
