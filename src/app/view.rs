// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The page is always drawn. The gallery modal, when open, is stacked on top
//! of it, and toasts float above both.

use super::{LoadedImage, Message, VideoSession};
use crate::application::gallery::GalleryModalController;
use crate::content::Portfolio;
use crate::i18n::fluent::I18n;
use crate::ui::gallery_modal;
use crate::ui::notifications::{self, Toast};
use crate::ui::portfolio;
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::widget::{Container, Stack};
use iced::{Element, Length};
use std::path::Path;
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub portfolio: &'a Portfolio,
    pub gallery: &'a GalleryModalController,
    pub image: Option<&'a LoadedImage>,
    pub video: Option<&'a VideoSession>,
    pub media_root: &'a Path,
    pub colors: &'a ColorScheme,
    pub content_width: f32,
    pub content_height: f32,
    pub now: Instant,
    pub notifications: &'a notifications::Manager,
}

/// Renders the page, the modal layer and the toast layer.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = portfolio::view(
        &portfolio::ViewContext {
            i18n: ctx.i18n,
            media_root: ctx.media_root,
        },
        ctx.portfolio,
        ctx.gallery.registry(),
    )
    .map(Message::Portfolio);

    let mut layers = Stack::new().push(
        Container::new(page)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::page(ctx.colors.surface_primary)),
    );

    // Bytes from an earlier surface are never shown
    let current = ctx.gallery.surface().map(|surface| surface.id());
    let image = ctx
        .image
        .filter(|loaded| Some(loaded.surface) == current)
        .map(|loaded| &loaded.handle);
    let video = ctx.video.filter(|session| Some(session.surface) == current);

    let modal = gallery_modal::view(
        gallery_modal::ViewContext {
            i18n: ctx.i18n,
            colors: ctx.colors,
            content_width: ctx.content_width,
            content_height: ctx.content_height,
            now: ctx.now,
        },
        gallery_modal::ViewModel {
            controller: ctx.gallery,
            image,
            video_frame: video.and_then(|session| session.frame.as_ref()),
            video_ready: video.is_some(),
        },
    );
    if let Some(modal) = modal {
        layers = layers.push(modal.map(Message::Modal));
    }

    layers
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
