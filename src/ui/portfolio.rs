// SPDX-License-Identifier: MPL-2.0
//! Portfolio page: one card per project with a cover and a strip of
//! thumbnails. Every tile opens the project's gallery at its own position.

use crate::application::gallery::GalleryRegistry;
use crate::content::{Portfolio, Project};
use crate::domain::gallery::{Gallery, Position};
use crate::domain::media::MediaItem;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::Handle;
use iced::widget::{button, image, scrollable, Column, Container, Row, Stack, Text};
use iced::{ContentFit, Element, Length};
use std::path::Path;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Directory media paths are resolved against.
    pub media_root: &'a Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    OpenGallery { gallery: String, position: Position },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    OpenGallery { gallery: String, position: Position },
}

#[must_use]
pub fn update(message: Message) -> Event {
    match message {
        Message::OpenGallery { gallery, position } => Event::OpenGallery { gallery, position },
    }
}

pub fn view<'a>(
    ctx: &ViewContext<'a>,
    portfolio: &'a Portfolio,
    registry: &'a GalleryRegistry,
) -> Element<'a, Message> {
    let header = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(ctx.i18n.tr("portfolio-heading")).size(typography::TITLE_LG))
        .push(Text::new(ctx.i18n.tr("portfolio-subtitle")).size(typography::BODY_LG));

    let mut cards = Column::new()
        .spacing(spacing::LG)
        .max_width(sizing::PROJECT_CARD_MAX_WIDTH)
        .push(header);

    for project in &portfolio.projects {
        // Dangling references are reported at startup
        if let Ok(gallery) = registry.lookup(&project.gallery) {
            cards = cards.push(project_card(ctx, project, gallery));
        }
    }

    scrollable(
        Container::new(cards)
            .width(Length::Fill)
            .padding(spacing::XL)
            .align_x(Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn project_card<'a>(
    ctx: &ViewContext<'a>,
    project: &'a Project,
    gallery: &'a Gallery,
) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::MD)
        .push(Text::new(project.title.as_str()).size(typography::TITLE_MD));

    if !project.description.is_empty() {
        column = column.push(Text::new(project.description.as_str()).size(typography::BODY));
    }

    if let Some(cover) = gallery.cover() {
        let tile = media_tile(ctx, cover, Length::Fill, Length::Fixed(sizing::COVER_HEIGHT));
        column = column.push(
            button(tile)
                .padding(0)
                .width(Length::Fill)
                .style(styles::button::media_tile)
                .on_press(open(gallery, Position::Cover)),
        );
    }

    let thumbnails = gallery
        .thumbnails()
        .iter()
        .enumerate()
        .fold(Row::new().spacing(spacing::XS), |row, (p, item)| {
            let size = Length::Fixed(sizing::THUMBNAIL);
            row.push(
                button(media_tile(ctx, item, size, size))
                    .padding(0)
                    .style(styles::button::media_tile)
                    .on_press(open(gallery, Position::Thumbnail(p))),
            )
        })
        .wrap();
    column = column.push(thumbnails);

    let label = ctx.i18n.tr_with_args(
        "project-item-count",
        &[("count", gallery.len().to_string().as_str())],
    );
    column = column.push(Text::new(label).size(typography::CAPTION));

    Container::new(column)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::card)
        .into()
}

fn open(gallery: &Gallery, position: Position) -> Message {
    Message::OpenGallery {
        gallery: gallery.name().to_string(),
        position,
    }
}

/// Picture for images, a labelled play tile with a badge for videos.
fn media_tile<'a>(
    ctx: &ViewContext<'a>,
    item: &'a MediaItem,
    width: Length,
    height: Length,
) -> Element<'a, Message> {
    if !item.kind().is_video() {
        return image(Handle::from_path(ctx.media_root.join(item.path())))
            .content_fit(ContentFit::Cover)
            .width(width)
            .height(height)
            .into();
    }

    let poster = Container::new(Text::new("▶").size(typography::TITLE_MD))
        .width(width)
        .height(height)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center);
    let badge = Container::new(
        Container::new(Text::new(ctx.i18n.tr("video-badge")).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::overlay::indicator(radius::SM)),
    )
    .width(width)
    .height(height)
    .padding(spacing::XXS)
    .align_x(Horizontal::Right)
    .align_y(Vertical::Top);

    Stack::new().push(poster).push(badge).into()
}
