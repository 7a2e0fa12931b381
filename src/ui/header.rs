use iced::alignment::Alignment;
use iced::widget::{container, horizontal_space, row, text};
use iced::{Element, Length};

use crate::Message;

use super::style;

pub fn view<'a>(endpoint: &'a str) -> Element<'a, Message> {
    container(
        row![
            text("HTTPS Tester").size(16),
            text(format!("v{}", env!("CARGO_PKG_VERSION"))).size(10).color(style::TEXT_MUTED),
            horizontal_space(),
            text(format!("GET {endpoint}")).size(12).color(style::TEXT_MUTED),
        ]
        .spacing(8)
        .padding([8, 12])
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .style(|_| style::surface_style(style::SURFACE_1, 0.0))
    .into()
}
