use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

use crate::panel::Phase;

pub const BG: Color = rgb(18, 21, 27);
pub const SURFACE_0: Color = rgb(20, 24, 32);
pub const SURFACE_1: Color = rgb(25, 30, 38);
pub const SURFACE_3: Color = rgb(37, 45, 56);
pub const BORDER: Color = rgb(48, 58, 70);
pub const TEXT: Color = rgb(230, 236, 244);
pub const TEXT_MUTED: Color = rgb(132, 145, 160);
pub const PRIMARY: Color = rgb(58, 201, 111);
pub const PRIMARY_HOVER: Color = rgb(71, 214, 124);
pub const WARNING: Color = rgb(242, 196, 15);
pub const DANGER: Color = rgb(226, 92, 92);

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        a: 1.0,
    }
}

pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => TEXT_MUTED,
        Phase::Loading => WARNING,
        Phase::Success => PRIMARY,
        Phase::Failure => DANGER,
    }
}

pub fn app_theme() -> Theme {
    Theme::custom(
        "HTTPS Tester".to_string(),
        iced::theme::Palette {
            background: BG,
            text: TEXT,
            primary: PRIMARY,
            success: PRIMARY,
            danger: DANGER,
        },
    )
}

pub fn surface_style(color: Color, border_radius: f32) -> container::Style {
    container::Style::default()
        .background(Background::Color(color))
        .color(TEXT)
        .border(Border {
            radius: border_radius.into(),
            width: 1.0,
            color: BORDER,
        })
}

pub fn flat_surface_style(color: Color) -> container::Style {
    container::Style::default()
        .background(Background::Color(color))
        .color(TEXT)
}

pub fn send_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active | button::Status::Pressed => PRIMARY,
        button::Status::Hovered => PRIMARY_HOVER,
        button::Status::Disabled => SURFACE_3,
    };

    button::Style {
        background: Some(Background::Color(bg)),
        text_color: if matches!(status, button::Status::Disabled) {
            TEXT_MUTED
        } else {
            BG
        },
        border: Border {
            radius: 8.0.into(),
            width: 1.0,
            color: bg,
        },
        shadow: Default::default(),
    }
}
