use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length};

use crate::Message;

use super::style;

/// The `response` box: the last body or failure message, shown verbatim.
pub fn view<'a>(response: Option<&'a str>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match response {
        Some(body) => scrollable(
            container(text(body).size(13).font(iced::Font::MONOSPACE))
                .padding(10)
                .width(Length::Fill),
        )
        .height(Length::Fill)
        .into(),
        None => container(text("No response yet").size(14).color(style::TEXT_MUTED))
            .center_x(Length::Fill)
            .padding(16)
            .into(),
    };

    column![
        text("Response").size(12).color(style::TEXT_MUTED),
        container(content)
            .height(Length::Fill)
            .width(Length::Fill)
            .style(|_| style::surface_style(style::SURFACE_1, 8.0)),
    ]
    .spacing(6)
    .height(Length::Fill)
    .into()
}
