use crate::assets::AssetSet;
use crate::audio::AudioBackend;
use crate::dashboard::Dashboard;
use crate::layout::Layout;
use crate::view;
use crate::weather::{self, WeatherClient, WeatherResult};
use iced::{event, window, Application, Command, Element, Event, Subscription, Theme};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Search,
    WeatherFetched(Vec<WeatherResult>),
    WindowResized(u32, u32),
    CloseRequested,
    Tick,
}

/// Everything that has to exist before the window opens.
pub struct Flags {
    pub client: WeatherClient,
    pub assets: AssetSet,
    pub audio: Box<dyn AudioBackend>,
    /// Initial window width; the first layout is derived from it.
    pub window_width: u32,
}

pub struct WeatherApp {
    pub client: WeatherClient,
    pub dashboard: Dashboard,
    pub input: String,
    pub loading: bool,
}

impl WeatherApp {
    pub fn with_flags(flags: Flags) -> Self {
        Self {
            client: flags.client,
            dashboard: Dashboard::new(
                flags.assets,
                flags.audio,
                Layout::for_canvas_width(Layout::canvas_width_for_window(flags.window_width)),
            ),
            input: String::new(),
            loading: false,
        }
    }

    fn submit_search(&mut self) -> Command<Message> {
        if self.loading {
            return Command::none();
        }

        let cities = weather::parse_cities(&self.input);
        if cities.is_empty() {
            tracing::debug!("Search submitted with no cities");
            return Command::none();
        }

        tracing::info!(count = cities.len(), "Searching {}", cities.join(", "));
        self.loading = true;
        let client = self.client.clone();
        Command::perform(
            async move { client.fetch_all(&cities).await },
            Message::WeatherFetched,
        )
    }
}

impl Application for WeatherApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = Flags;

    fn new(flags: Flags) -> (WeatherApp, Command<Message>) {
        (WeatherApp::with_flags(flags), Command::none())
    }

    fn title(&self) -> String {
        String::from("Weather Dashboard")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value;
                Command::none()
            }
            Message::Search => self.submit_search(),
            Message::WeatherFetched(results) => {
                self.loading = false;
                self.dashboard.apply_results(&results);
                Command::none()
            }
            Message::WindowResized(width, height) => {
                self.dashboard
                    .handle_resize(Layout::canvas_width_for_window(width), height);
                Command::none()
            }
            Message::CloseRequested => {
                self.dashboard.close();
                window::close(window::Id::MAIN)
            }
            Message::Tick => {
                self.dashboard.tick_graph();
                Command::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let window_events = event::listen_with(|event, _status| match event {
            Event::Window(_, window::Event::Resized { width, height }) => {
                Some(Message::WindowResized(width, height))
            }
            Event::Window(_, window::Event::CloseRequested) => Some(Message::CloseRequested),
            _ => None,
        });
        let animation = iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick);

        Subscription::batch([window_events, animation])
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn view(&self) -> Element<Message> {
        view::view(self)
    }
}
