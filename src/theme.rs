/// Presentation bundle (background, icon, ambient sound) for a weather category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Clear,
    Rain,
    Clouds,
    Thunderstorm,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Clear,
        Theme::Rain,
        Theme::Clouds,
        Theme::Thunderstorm,
    ];

    /// Maps a lower-cased condition key to its theme. Anything unrecognised,
    /// including differently-cased keys, falls back to `Clear`.
    pub fn resolve(condition: &str) -> Theme {
        match condition {
            "clear" => Theme::Clear,
            "rain" => Theme::Rain,
            "clouds" => Theme::Clouds,
            "thunderstorm" => Theme::Thunderstorm,
            _ => Theme::Clear,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Theme::Clear => 0,
            Theme::Rain => 1,
            Theme::Clouds => 2,
            Theme::Thunderstorm => 3,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Theme::Clear => "clear",
            Theme::Rain => "rain",
            Theme::Clouds => "clouds",
            Theme::Thunderstorm => "thunderstorm",
        }
    }

    pub fn background_file(self) -> &'static str {
        match self {
            Theme::Clear => "sunny_background.png",
            Theme::Rain => "rainy_background.png",
            Theme::Clouds => "cloudy_background.png",
            Theme::Thunderstorm => "thunderstorm_background.png",
        }
    }

    pub fn icon_file(self) -> &'static str {
        match self {
            Theme::Clear => "sun.png",
            Theme::Rain => "heavy-rain.png",
            Theme::Clouds => "cloud.png",
            Theme::Thunderstorm => "thunder.png",
        }
    }

    pub fn sound_file(self) -> &'static str {
        match self {
            Theme::Clear => "sunny_sound.wav",
            Theme::Rain => "rain_sound.wav",
            Theme::Clouds => "wind_sound.wav",
            Theme::Thunderstorm => "thunder_sound.wav",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One value per theme, indexed by [`Theme::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeMap<T>([T; 4]);

impl<T> ThemeMap<T> {
    pub fn build(mut f: impl FnMut(Theme) -> T) -> Self {
        Self(Theme::ALL.map(&mut f))
    }

    /// Builds the map in `Theme::ALL` order, stopping at the first error.
    pub fn try_build<E>(mut f: impl FnMut(Theme) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self([
            f(Theme::Clear)?,
            f(Theme::Rain)?,
            f(Theme::Clouds)?,
            f(Theme::Thunderstorm)?,
        ]))
    }

    pub fn get(&self, theme: Theme) -> &T {
        &self.0[theme.index()]
    }

    pub fn set(&mut self, theme: Theme, value: T) {
        self.0[theme.index()] = value;
    }
}
