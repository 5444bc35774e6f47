use crate::app::{Message, WeatherApp};
use crate::layout::{BUTTON_PADDING, GRAPH_HEIGHT};
use iced::{
    theme,
    widget::{button, canvas::Canvas, column, container, image, row, text, text_input},
    Alignment, Color, Element, Length,
};

pub fn create_search_bar(app: &WeatherApp) -> Element<Message> {
    let font_size = app.dashboard.layout().render_font_size();

    let city_input = text_input("London, Paris, Tokyo", &app.input)
        .on_input(Message::InputChanged)
        .on_submit(Message::Search)
        .padding(6)
        .size(font_size)
        .width(Length::Fill);

    let search_button = button(text("Search").size(font_size))
        .padding(BUTTON_PADDING)
        .style(theme::Button::Primary);
    // No second search while a batch is in flight
    let search_button = if app.loading {
        search_button
    } else {
        search_button.on_press(Message::Search)
    };

    row![
        text("Enter Cities (separate by commas):").size(font_size),
        city_input,
        search_button
    ]
    .spacing(5)
    .align_items(Alignment::Center)
    .width(Length::Fill)
    .into()
}

/// Background with the weather icon composited on top.
pub fn create_scene(app: &WeatherApp) -> Element<Message> {
    let layout = app.dashboard.layout();
    let scene = image(app.dashboard.scene().clone())
        .width(Length::Fixed(layout.canvas_width as f32))
        .height(Length::Fixed(layout.canvas_height as f32));

    container(scene).center_x().width(Length::Fill).into()
}

pub fn create_status_display(app: &WeatherApp) -> Element<Message> {
    let font_size = app.dashboard.layout().render_font_size();

    let status_text = if app.loading {
        text("Loading weather data...").size(font_size)
    } else {
        text(app.dashboard.status()).size(font_size)
    };

    let updated = match app.dashboard.last_updated() {
        Some(updated) => text(format!("Updated: {}", updated.format("%I:%M:%S %p")))
            .size(12)
            .style(Color::from_rgb(0.5, 0.5, 0.5)),
        None => text("").size(12),
    };

    column![status_text, updated]
        .spacing(4)
        .align_items(Alignment::Center)
        .width(Length::Fill)
        .into()
}

pub fn create_graph(app: &WeatherApp) -> Element<Message> {
    let layout = app.dashboard.layout();
    let graph = Canvas::new(app.dashboard.graph())
        .width(Length::Fixed(layout.graph_width))
        .height(Length::Fixed(GRAPH_HEIGHT));

    container(graph).center_x().width(Length::Fill).into()
}
