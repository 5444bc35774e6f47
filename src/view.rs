use crate::app::{Message, WeatherApp};
use crate::components;
use crate::layout::WINDOW_PADDING;
use iced::{
    widget::{column, container, scrollable},
    Alignment, Element, Length,
};

pub fn view(app: &WeatherApp) -> Element<Message> {
    let content = column![
        components::create_search_bar(app),
        components::create_scene(app),
        components::create_status_display(app),
        components::create_graph(app),
    ]
    .spacing(WINDOW_PADDING)
    .padding(WINDOW_PADDING)
    .align_items(Alignment::Center);

    container(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
