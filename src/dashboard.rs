use crate::assets::{self, AssetSet};
use crate::audio::{AudioBackend, SoundSlot};
use crate::graph::SineGraph;
use crate::layout::Layout;
use crate::theme::{Theme, ThemeMap};
use crate::weather::{CityWeather, WeatherResult};
use chrono::{DateTime, Local};
use iced::widget::image::Handle as ImageHandle;
use image::RgbaImage;

pub const INITIAL_STATUS: &str = "No city searched";
/// Top-left corner of the icon on the scene, in pixels.
pub const ICON_POSITION: (i64, i64) = (50, 50);

/// Everything currently on screen or playing, derived from one weather
/// state. Background, icon and sound always belong to `theme`.
pub struct Dashboard {
    assets: AssetSet,
    theme: Theme,
    sound: SoundSlot,
    layout: Layout,
    status: String,
    last_updated: Option<DateTime<Local>>,
    // Only the active theme's entry is guaranteed to match the current layout.
    backgrounds: ThemeMap<RgbaImage>,
    icons: ThemeMap<RgbaImage>,
    scene: ImageHandle,
    graph: SineGraph,
}

impl Dashboard {
    pub fn new(assets: AssetSet, audio: Box<dyn AudioBackend>, layout: Layout) -> Self {
        let backgrounds = ThemeMap::build(|theme| {
            assets.scaled_background(theme, layout.canvas_width, layout.canvas_height)
        });
        let icons = ThemeMap::build(|theme| assets.scaled_icon(theme, layout.icon_size));
        let mut dashboard = Self {
            assets,
            theme: Theme::Clear,
            sound: SoundSlot::new(audio),
            layout,
            status: INITIAL_STATUS.to_string(),
            last_updated: None,
            backgrounds,
            icons,
            scene: ImageHandle::from_pixels(1, 1, vec![0u8; 4]),
            graph: SineGraph::default(),
        };
        dashboard.recompose();
        dashboard
    }

    /// Applies a batch of lookups in order. The status line ends up showing
    /// the last result of any kind; visuals show the last city that was found.
    pub fn apply_results(&mut self, results: &[WeatherResult]) {
        if results.is_empty() {
            return;
        }

        self.status.clear();
        for result in results {
            tracing::debug!(city = result.name(), "Applying lookup result");
            match result {
                WeatherResult::Found(weather) => self.render_weather(weather),
                WeatherResult::NotFound { name } => {
                    tracing::info!(city = %name, "City not found");
                    self.status = format!("{} not found!", name);
                }
            }
        }
    }

    pub fn render_weather(&mut self, weather: &CityWeather) {
        let theme = Theme::resolve(&weather.condition);
        tracing::info!(
            city = %weather.name,
            condition = %weather.condition,
            %theme,
            "Displaying weather"
        );

        self.theme = theme;
        self.refresh_background();
        self.status = format_status(weather);
        self.sound.play(self.assets.sound(theme));
        self.graph.restart(weather.temperature);
        self.last_updated = Some(Local::now());
        self.recompose();
    }

    /// Recomputes every size from the reference dimensions. `width` is the
    /// canvas width; the height follows the 8:3 artwork ratio.
    pub fn handle_resize(&mut self, width: u32, window_height: u32) {
        self.layout = Layout::for_canvas_width(width);
        tracing::debug!(
            width,
            window_height,
            canvas_height = self.layout.canvas_height,
            scale = self.layout.scale,
            font_size = self.layout.font_size,
            icon_size = self.layout.icon_size,
            "Resized"
        );

        let background = self.assets.scaled_background(
            self.theme,
            self.layout.canvas_width,
            self.layout.canvas_height,
        );
        self.backgrounds.set(self.theme, background);

        let icon_size = self.layout.icon_size;
        self.icons = ThemeMap::build(|theme| self.assets.scaled_icon(theme, icon_size));
        self.recompose();
    }

    pub fn tick_graph(&mut self) {
        self.graph.tick();
        tracing::trace!(frame = self.graph.frame, "Graph tick");
    }

    pub fn close(&mut self) {
        tracing::info!("Closing dashboard");
        self.sound.stop();
    }

    #[cfg(test)]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The graph's phase is the raw last temperature.
    #[cfg(test)]
    pub fn last_temperature(&self) -> f64 {
        self.graph.phase
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    #[cfg(test)]
    pub fn playing_sound(&self) -> Option<Theme> {
        self.sound.playing()
    }

    pub fn background(&self) -> &RgbaImage {
        self.backgrounds.get(self.theme)
    }

    pub fn icon(&self) -> &RgbaImage {
        self.icons.get(self.theme)
    }

    #[cfg(test)]
    pub fn icon_for(&self, theme: Theme) -> &RgbaImage {
        self.icons.get(theme)
    }

    pub fn scene(&self) -> &ImageHandle {
        &self.scene
    }

    pub fn graph(&self) -> SineGraph {
        self.graph
    }

    /// Rescales the active theme's background if it was cached at another size.
    fn refresh_background(&mut self) {
        let wanted = (
            self.layout.canvas_width.max(1),
            self.layout.canvas_height.max(1),
        );
        if self.backgrounds.get(self.theme).dimensions() != wanted {
            let background = self.assets.scaled_background(self.theme, wanted.0, wanted.1);
            self.backgrounds.set(self.theme, background);
        }
    }

    fn recompose(&mut self) {
        let (x, y) = ICON_POSITION;
        let scene = assets::compose(self.background(), self.icon(), x, y);
        let (width, height) = scene.dimensions();
        self.scene = ImageHandle::from_pixels(width, height, scene.into_raw());
    }
}

/// "<name>: <temp>°C, <Description>, Humidity: <humidity>%"
pub fn format_status(weather: &CityWeather) -> String {
    format!(
        "{}: {}°C, {}, Humidity: {}%",
        weather.name,
        format_temperature(weather.temperature, weather.temperature_is_integer),
        capitalize(&weather.description),
        weather.humidity
    )
}

/// Integers print bare ("20"); floats always keep a decimal point ("15.0").
pub fn format_temperature(value: f64, is_integer: bool) -> String {
    if is_integer {
        format!("{}", value as i64)
    } else if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fixtures::sample_assets;
    use crate::audio::fixtures::{AudioEvent, RecordingBackend};
    use crate::weather::{parse_cities, WeatherClient};

    fn dashboard() -> (Dashboard, RecordingBackend) {
        let backend = RecordingBackend::default();
        let dashboard = Dashboard::new(
            sample_assets(),
            Box::new(backend.clone()),
            Layout::default(),
        );
        (dashboard, backend)
    }

    fn city(name: &str, condition: &str, temperature: f64) -> CityWeather {
        CityWeather {
            name: name.to_string(),
            condition: condition.to_string(),
            temperature,
            temperature_is_integer: false,
            humidity: 70,
            description: "some weather".to_string(),
        }
    }

    fn found(name: &str, condition: &str, temperature: f64) -> WeatherResult {
        WeatherResult::Found(city(name, condition, temperature))
    }

    fn not_found(name: &str) -> WeatherResult {
        WeatherResult::NotFound {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_initial_state() {
        let (dashboard, backend) = dashboard();

        assert_eq!(dashboard.theme(), Theme::Clear);
        assert_eq!(dashboard.status(), INITIAL_STATUS);
        assert_eq!(dashboard.playing_sound(), None);
        assert!(backend.events().is_empty());
        assert_eq!(dashboard.background().dimensions(), (800, 300));
        for theme in Theme::ALL {
            assert_eq!(dashboard.icon_for(theme).dimensions(), (100, 100));
        }
        assert_eq!(dashboard.last_updated(), None);
    }

    #[test]
    fn test_initial_layout_follows_window_width() {
        let layout = Layout::for_canvas_width(Layout::canvas_width_for_window(1024));
        let dashboard = Dashboard::new(
            sample_assets(),
            Box::new(RecordingBackend::default()),
            layout,
        );

        assert_eq!(dashboard.layout().canvas_width, 1004);
        assert_eq!(dashboard.layout().font_size, 10);
        assert_eq!(dashboard.background().dimensions(), (1004, 376));
        for theme in Theme::ALL {
            assert_eq!(dashboard.icon_for(theme).dimensions(), (125, 125));
        }
    }

    #[test]
    fn test_status_format() {
        let weather = CityWeather {
            name: "London".to_string(),
            condition: "rain".to_string(),
            temperature: 11.5,
            temperature_is_integer: false,
            humidity: 81,
            description: "light RAIN".to_string(),
        };
        assert_eq!(
            format_status(&weather),
            "London: 11.5°C, Light rain, Humidity: 81%"
        );
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(20.0, false), "20.0");
        assert_eq!(format_temperature(-3.0, false), "-3.0");
        assert_eq!(format_temperature(11.53, false), "11.53");
        assert_eq!(format_temperature(-0.5, false), "-0.5");
        assert_eq!(format_temperature(20.0, true), "20");
        assert_eq!(format_temperature(-4.0, true), "-4");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("overcast clouds"), "Overcast clouds");
        assert_eq!(capitalize("THUNDERSTORM with RAIN"), "Thunderstorm with rain");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("é"), "É");
    }

    #[test]
    fn test_render_weather_switches_everything_together() {
        let (mut dashboard, backend) = dashboard();
        dashboard.render_weather(&city("Bergen", "rain", 7.25));

        let expected = sample_assets();
        assert_eq!(dashboard.theme(), Theme::Rain);
        assert_eq!(dashboard.playing_sound(), Some(Theme::Rain));
        assert_eq!(backend.active(), vec![Theme::Rain]);
        assert_eq!(
            dashboard.background(),
            &expected.scaled_background(Theme::Rain, 800, 300)
        );
        assert_eq!(dashboard.icon(), &expected.scaled_icon(Theme::Rain, 100));
        assert_eq!(dashboard.graph().phase, 7.25);
        assert_eq!(dashboard.last_temperature(), 7.25);
        assert_eq!(
            dashboard.status(),
            "Bergen: 7.25°C, Some weather, Humidity: 70%"
        );
        assert!(dashboard.last_updated().is_some());
    }

    #[test]
    fn test_unknown_condition_renders_clear() {
        let (mut dashboard, _backend) = dashboard();
        dashboard.render_weather(&city("Tromsø", "snow", -4.0));
        assert_eq!(dashboard.theme(), Theme::Clear);
        assert_eq!(dashboard.playing_sound(), Some(Theme::Clear));
    }

    #[test]
    fn test_two_renders_leave_one_loop() {
        let (mut dashboard, backend) = dashboard();
        dashboard.render_weather(&city("Oslo", "clouds", 5.0));
        dashboard.render_weather(&city("Miami", "thunderstorm", 29.0));

        assert_eq!(backend.active(), vec![Theme::Thunderstorm]);
        assert_eq!(
            backend.events(),
            vec![
                AudioEvent::Started(Theme::Clouds),
                AudioEvent::Stopped(Theme::Clouds),
                AudioEvent::Started(Theme::Thunderstorm),
            ]
        );
    }

    #[test]
    fn test_last_found_city_wins_visuals_and_last_result_wins_status() {
        let (mut dashboard, backend) = dashboard();
        dashboard.apply_results(&[
            found("London", "rain", 11.0),
            not_found("Nowhereville123"),
            found("Paris", "clouds", 14.0),
        ]);

        assert_eq!(
            dashboard.status(),
            "Paris: 14.0°C, Some weather, Humidity: 70%"
        );
        assert_eq!(dashboard.theme(), Theme::Clouds);
        assert_eq!(backend.active(), vec![Theme::Clouds]);
        assert_eq!(dashboard.graph().phase, 14.0);
    }

    #[test]
    fn test_trailing_not_found_overwrites_status_only() {
        let (mut dashboard, backend) = dashboard();
        dashboard.apply_results(&[
            found("London", "rain", 11.0),
            found("Paris", "clouds", 14.0),
            not_found("Nowhereville123"),
        ]);

        assert_eq!(dashboard.status(), "Nowhereville123 not found!");
        assert_eq!(dashboard.theme(), Theme::Clouds);
        assert_eq!(backend.active(), vec![Theme::Clouds]);
        assert_eq!(dashboard.last_temperature(), 14.0);
    }

    #[test]
    fn test_all_not_found_keeps_visuals() {
        let (mut dashboard, backend) = dashboard();
        dashboard.render_weather(&city("Cairo", "clear", 30.0));
        dashboard.apply_results(&[not_found("Atlantis"), not_found("El Dorado")]);

        assert_eq!(dashboard.status(), "El Dorado not found!");
        assert_eq!(dashboard.theme(), Theme::Clear);
        assert_eq!(backend.active(), vec![Theme::Clear]);
        assert_eq!(dashboard.last_temperature(), 30.0);
    }

    #[test]
    fn test_empty_batch_changes_nothing() {
        let (mut dashboard, backend) = dashboard();
        dashboard.apply_results(&[]);
        assert_eq!(dashboard.status(), INITIAL_STATUS);
        assert_eq!(dashboard.theme(), Theme::Clear);
        assert!(backend.events().is_empty());
    }

    #[test]
    fn test_resize_scales_fonts_icons_and_background() {
        let (mut dashboard, _backend) = dashboard();
        dashboard.render_weather(&city("Seattle", "rain", 9.0));
        dashboard.handle_resize(400, 600);

        let layout = dashboard.layout();
        assert_eq!(layout.scale, 0.5);
        assert_eq!(layout.font_size, 4);
        assert_eq!(layout.icon_size, 50);
        assert_eq!(layout.graph_width, 400.0);
        assert_eq!(dashboard.background().dimensions(), (400, 150));
        for theme in Theme::ALL {
            assert_eq!(dashboard.icon_for(theme).dimensions(), (50, 50));
        }
    }

    #[test]
    fn test_resize_round_trip_restores_reference_sizes() {
        let (mut dashboard, _backend) = dashboard();
        dashboard.handle_resize(537, 700);
        dashboard.handle_resize(1213, 700);
        dashboard.handle_resize(800, 700);

        let expected = sample_assets();
        let layout = dashboard.layout();
        assert_eq!(layout.font_size, 8);
        assert_eq!(layout.icon_size, 100);
        assert_eq!(dashboard.icon(), &expected.scaled_icon(Theme::Clear, 100));
        assert_eq!(
            dashboard.background(),
            &expected.scaled_background(Theme::Clear, 800, 300)
        );
    }

    #[test]
    fn test_theme_switch_after_resize_uses_current_size() {
        let (mut dashboard, _backend) = dashboard();
        dashboard.handle_resize(600, 500);
        dashboard.render_weather(&city("Dhaka", "thunderstorm", 31.0));

        assert_eq!(dashboard.background().dimensions(), (600, 225));
        assert_eq!(dashboard.icon().dimensions(), (75, 75));
    }

    #[test]
    fn test_close_stops_sound() {
        let (mut dashboard, backend) = dashboard();
        dashboard.render_weather(&city("Lima", "clouds", 18.0));
        dashboard.close();

        assert!(backend.active().is_empty());
        assert_eq!(dashboard.playing_sound(), None);
    }

    #[test]
    fn test_tick_advances_graph_without_changing_phase() {
        let (mut dashboard, _backend) = dashboard();
        dashboard.render_weather(&city("Rome", "clear", 22.0));
        dashboard.tick_graph();
        dashboard.tick_graph();

        assert_eq!(dashboard.graph().frame, 2);
        assert_eq!(dashboard.graph().phase, 22.0);
    }

    #[tokio::test]
    async fn test_search_batch_against_api() {
        use wiremock::matchers::{method, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [{"main": "Rain", "description": "moderate rain"}],
                "main": {"temp": 10.0, "humidity": 88},
                "name": "London"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [{"main": "Clouds", "description": "few clouds"}],
                "main": {"temp": 16.5, "humidity": 55},
                "name": "Paris"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "Nowhereville123"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = crate::config::Config {
            api_key: "key".to_string(),
            api_url: mock_server.uri(),
            assets_dir: "assets".into(),
            window_width: 820.0,
            window_height: 700.0,
        };
        let client = WeatherClient::new(&config).unwrap();
        let (mut dashboard, backend) = dashboard();

        let results = client
            .fetch_all(&parse_cities("London, Nowhereville123, Paris"))
            .await;
        dashboard.apply_results(&results);

        assert_eq!(
            dashboard.status(),
            "Paris: 16.5°C, Few clouds, Humidity: 55%"
        );
        assert_eq!(dashboard.theme(), Theme::Clouds);
        assert_eq!(backend.active(), vec![Theme::Clouds]);
        assert_eq!(
            backend.events(),
            vec![
                AudioEvent::Started(Theme::Rain),
                AudioEvent::Stopped(Theme::Rain),
                AudioEvent::Started(Theme::Clouds),
            ]
        );
    }
}
