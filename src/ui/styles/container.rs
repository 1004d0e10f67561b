// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Project card surface on the portfolio page.
///
/// The color is derived from the active Iced `Theme` background so cards stay
/// readable in both light and dark modes.
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Portfolio page background.
pub fn page(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

/// Full-window layer dimming the page behind the modal.
pub fn backdrop(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        ..Default::default()
    }
}

/// Stand-in for media that is still loading or failed to load.
pub fn placeholder(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::design_tokens::palette;

    #[test]
    fn backdrop_uses_given_color() {
        let color = Color {
            a: opacity::BACKDROP,
            ..palette::BLACK
        };
        let style = backdrop(color)(&Theme::Light);
        assert_eq!(style.background, Some(Background::Color(color)));
    }

    #[test]
    fn card_is_rounded() {
        let style = card(&Theme::Dark);
        assert!(style.background.is_some());
        assert_eq!(style.border.radius, iced::border::Radius::from(radius::LG));
    }
}
