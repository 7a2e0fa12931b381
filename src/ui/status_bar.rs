use iced::alignment::Alignment;
use iced::widget::{button, row, text};
use iced::{Element, Length};

use crate::Message;
use crate::panel::Phase;

use super::style;

/// The `status` line and the `btn` that triggers a request.
///
/// The button stays enabled while a request is in flight; pressing it again
/// supersedes the pending request.
pub fn view<'a>(status: &'a str, phase: Phase) -> Element<'a, Message> {
    let status_line = text(status)
        .size(15)
        .color(style::phase_color(phase))
        .width(Length::Fill);

    let send_button = button(text("Send request").size(14))
        .on_press(Message::SendPressed)
        .padding([10, 18])
        .style(style::send_button);

    row![status_line, send_button]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}
