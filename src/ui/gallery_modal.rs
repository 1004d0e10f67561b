// SPDX-License-Identifier: MPL-2.0
//! Gallery modal rendering and input mapping.
//!
//! The modal is drawn as layers on top of the page:
//!
//! 1. the backdrop, which closes the modal when pressed
//! 2. the content region, sized relative to the window and centered
//! 3. the close button and, for galleries with several items, previous/next
//!
//! Presses on the content region are captured there so they never reach the
//! backdrop. The whole modal is wrapped in `opaque` while the page scroll is
//! locked, so wheel events stop at the modal.

use crate::application::gallery::{
    ClickTarget, GalleryKey, GalleryModalController, LoadRequest, LoadState, MediaSurface,
    SurfaceId, SurfaceKind, Transition,
};
use crate::domain::media::MediaItem;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, radius, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::alignment::{Horizontal, Vertical};
use iced::keyboard;
use iced::widget::image::Handle;
use iced::widget::{
    button, image, mouse_area, opaque, responsive, slider, text, Column, Container, Row, Stack,
    Text,
};
use iced::{ContentFit, Element, Length, Size};
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    Click(ClickTarget),
    TogglePlayback(SurfaceId),
    ToggleMute(SurfaceId),
    VolumeChanged(SurfaceId, f32),
}

/// What the app has to do after a modal message.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// A new surface needs its resource.
    Load(LoadRequest),
    /// The user asked a video surface to play or pause.
    Playback { surface: SurfaceId, playing: bool },
    Closed,
}

impl From<Transition> for Event {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Render(request) => Event::Load(request),
            Transition::Closed => Event::Closed,
            Transition::Unchanged => Event::None,
        }
    }
}

/// Applies a modal message to the controller.
pub fn update(controller: &mut GalleryModalController, message: Message) -> Event {
    match message {
        Message::Click(target) => controller.handle_click(target).into(),
        Message::TogglePlayback(id) => match controller.video_playback_toggled(id) {
            Some(playing) => Event::Playback {
                surface: id,
                playing,
            },
            None => Event::None,
        },
        Message::ToggleMute(id) => {
            controller.video_mute_toggled(id);
            Event::None
        }
        Message::VolumeChanged(id, volume) => {
            controller.video_volume_requested(id, volume);
            Event::None
        }
    }
}

/// Maps a pressed key to the keys the modal understands.
#[must_use]
pub fn gallery_key(key: &keyboard::Key) -> Option<GalleryKey> {
    match key {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(GalleryKey::Escape),
        keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => Some(GalleryKey::ArrowLeft),
        keyboard::Key::Named(keyboard::key::Named::ArrowRight) => Some(GalleryKey::ArrowRight),
        _ => None,
    }
}

#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub colors: &'a ColorScheme,
    /// Content width as a fraction of the window.
    pub content_width: f32,
    /// Content height as a fraction of the window.
    pub content_height: f32,
    pub now: Instant,
}

#[derive(Clone, Copy)]
pub struct ViewModel<'a> {
    pub controller: &'a GalleryModalController,
    /// Decoded bytes of the current image surface, once loaded.
    pub image: Option<&'a Handle>,
    /// Latest frame of the current video surface.
    pub video_frame: Option<&'a Handle>,
    /// Whether the video decoder accepts commands yet.
    pub video_ready: bool,
}

/// Renders the modal, or nothing while it is closed.
pub fn view<'a>(ctx: ViewContext<'a>, model: ViewModel<'a>) -> Option<Element<'a, Message>> {
    let presentation = model.controller.presentation();
    if !presentation.active {
        return None;
    }
    let surface = model.controller.surface()?;

    let backdrop_color = ctx.colors.backdrop;
    let backdrop = mouse_area(
        Container::new(text(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::backdrop(backdrop_color)),
    )
    .on_press(Message::Click(ClickTarget::Backdrop));

    let content = responsive(move |available: Size| view_content(&ctx, &model, surface, available));

    let mut stack = Stack::new()
        .push(backdrop)
        .push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(close_layer(&ctx));

    if presentation.navigation_visible {
        stack = stack.push(navigation_layer(&ctx));
    }

    let modal: Element<'a, Message> = stack.width(Length::Fill).height(Length::Fill).into();
    Some(if presentation.scroll_locked {
        opaque(modal)
    } else {
        modal
    })
}

fn view_content<'a>(
    ctx: &ViewContext<'a>,
    model: &ViewModel<'a>,
    surface: &'a MediaSurface,
    available: Size,
) -> Element<'a, Message> {
    let width = available.width * ctx.content_width;
    let height = available.height * ctx.content_height;

    let media: Element<'a, Message> = match surface.kind() {
        SurfaceKind::Image(_) => view_image(ctx, model, surface),
        SurfaceKind::Video(video) => {
            let id = surface.id();
            let failed = surface.load_state() == LoadState::Failed;
            let poster = match model.video_frame {
                _ if failed => media_label(ctx, model, surface, "⚠"),
                None => media_label(ctx, model, surface, "▶"),
                Some(frame) => image(frame.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
            };
            let play_label = if video.is_playing() {
                ctx.i18n.tr("video-pause")
            } else {
                ctx.i18n.tr("video-play")
            };
            let controls = Row::new()
                .spacing(spacing::SM)
                .padding(spacing::XS)
                .align_y(Vertical::Center)
                .push(
                    button(Text::new(play_label).size(typography::BODY))
                        .on_press_maybe(
                            (model.video_ready && !failed)
                                .then_some(Message::TogglePlayback(id)),
                        )
                        .style(styles::button::primary),
                )
                .push(
                    button(Text::new(ctx.i18n.tr("video-muted")).size(typography::BODY))
                        .on_press(Message::ToggleMute(id))
                        .style(styles::button::primary),
                )
                .push(
                    slider(0.0..=1.0, video.volume(), move |volume| {
                        Message::VolumeChanged(id, volume)
                    })
                    .step(0.05)
                    .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH)),
                );

            let mut column = Column::new().push(poster);
            if video.controls() {
                column = column.push(
                    Container::new(controls)
                        .width(Length::Fill)
                        .style(styles::overlay::controls_container),
                );
            }
            column.width(Length::Fill).height(Length::Fill).into()
        }
    };

    let counter = Container::new(
        Text::new(counter_label(ctx.i18n, model.controller)).size(typography::CAPTION),
    )
    .padding([spacing::XXS, spacing::XS])
    .style(styles::overlay::indicator(radius::FULL));

    let caption = Text::new(caption_label(ctx.i18n, surface.index()))
        .size(typography::BODY_SM)
        .color(ctx.colors.modal_text);

    let footer = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(counter)
        .push(caption);

    let body = Column::new()
        .spacing(spacing::XS)
        .push(
            Container::new(media)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
        )
        .push(footer)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height));

    let content = mouse_area(body).on_press(Message::Click(ClickTarget::Content));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn view_image<'a>(
    ctx: &ViewContext<'a>,
    model: &ViewModel<'a>,
    surface: &'a MediaSurface,
) -> Element<'a, Message> {
    match (surface.load_state(), model.image) {
        (LoadState::Loaded(_), Some(handle)) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .opacity(model.controller.surface_opacity(ctx.now))
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        (LoadState::Failed, _) => media_label(ctx, model, surface, "⚠"),
        // Invisible until loaded
        _ => Container::new(text(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    }
}

/// Large glyph plus file name, used for video posters and broken images.
fn media_label<'a>(
    ctx: &ViewContext<'a>,
    model: &ViewModel<'a>,
    surface: &'a MediaSurface,
    glyph: &'a str,
) -> Element<'a, Message> {
    let name = model
        .controller
        .current_item()
        .map_or("", MediaItem::file_name);
    let status = match surface.load_state() {
        LoadState::Failed => Some(ctx.i18n.tr("media-load-failed")),
        LoadState::Pending | LoadState::Loaded(_) => None,
    };

    let mut column = Column::new()
        .spacing(spacing::XS)
        .align_x(Horizontal::Center)
        .push(Text::new(glyph).size(sizing::ICON_MD * 2.0))
        .push(Text::new(name).size(typography::BODY));
    if let Some(status) = status {
        column = column.push(Text::new(status).size(typography::BODY_SM));
    }

    let placeholder = ctx.colors.placeholder;
    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(styles::container::placeholder(placeholder))
        .into()
}

fn close_layer<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let close = button(
        Text::new("×")
            .size(typography::TITLE_LG)
            .align_x(Horizontal::Center),
    )
    .width(Length::Fixed(sizing::MODAL_NAV_BUTTON))
    .height(Length::Fixed(sizing::MODAL_NAV_BUTTON))
    .on_press(Message::Click(ClickTarget::CloseButton))
    .style(styles::button::overlay(
        ctx.colors.modal_text,
        opacity::OVERLAY_SUBTLE,
        opacity::OVERLAY_HOVER,
    ));

    Container::new(close)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Top)
        .into()
}

fn navigation_layer<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let arrow = |glyph: &'static str, target: ClickTarget| {
        button(Text::new(glyph).size(typography::TITLE_MD).align_x(Horizontal::Center))
            .width(Length::Fixed(sizing::MODAL_NAV_BUTTON))
            .height(Length::Fixed(sizing::MODAL_NAV_BUTTON))
            .on_press(Message::Click(target))
            .style(styles::button::overlay(
                ctx.colors.modal_text,
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_HOVER,
            ))
    };

    let previous = Container::new(arrow("◀", ClickTarget::PreviousButton))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(Horizontal::Left)
        .align_y(Vertical::Center);
    let next = Container::new(arrow("▶", ClickTarget::NextButton))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Center);

    Stack::new()
        .push(previous)
        .push(next)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// "5 / 12" style position counter for the open modal.
#[must_use]
pub fn counter_label(i18n: &I18n, controller: &GalleryModalController) -> String {
    let (Some(index), Some(gallery)) = (controller.current_index(), controller.active_gallery())
    else {
        return String::new();
    };
    let current = (index + 1).to_string();
    let total = gallery.len().to_string();
    i18n.tr_with_args(
        "modal-counter",
        &[("current", current.as_str()), ("total", total.as_str())],
    )
}

/// Accessible description of the item at `index`: "Gallery Image 5".
#[must_use]
pub fn caption_label(i18n: &I18n, index: usize) -> String {
    let number = (index + 1).to_string();
    i18n.tr_with_args("gallery-image-alt", &[("number", number.as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::domain::gallery::Position;
    use crate::domain::media::MediaType;
    use crate::test_utils::builtin_controller;

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    #[test]
    fn named_keys_map_to_gallery_keys() {
        use keyboard::key::Named;
        assert_eq!(
            gallery_key(&keyboard::Key::Named(Named::Escape)),
            Some(GalleryKey::Escape)
        );
        assert_eq!(
            gallery_key(&keyboard::Key::Named(Named::ArrowLeft)),
            Some(GalleryKey::ArrowLeft)
        );
        assert_eq!(
            gallery_key(&keyboard::Key::Named(Named::ArrowRight)),
            Some(GalleryKey::ArrowRight)
        );
        assert_eq!(gallery_key(&keyboard::Key::Named(Named::Enter)), None);
        assert_eq!(gallery_key(&keyboard::Key::Character("a".into())), None);
    }

    #[test]
    fn backdrop_click_closes() {
        let mut controller = builtin_controller();
        controller.open("orgconnect", Position::Cover).expect("open");

        let event = update(&mut controller, Message::Click(ClickTarget::Backdrop));
        assert_eq!(event, Event::Closed);
        assert!(!controller.is_open());
    }

    #[test]
    fn content_click_keeps_modal_open() {
        let mut controller = builtin_controller();
        controller.open("orgconnect", Position::Cover).expect("open");

        let event = update(&mut controller, Message::Click(ClickTarget::Content));
        assert_eq!(event, Event::None);
        assert!(controller.is_open());
    }

    #[test]
    fn next_button_requests_a_load() {
        let mut controller = builtin_controller();
        controller.open("orgconnect", Position::Cover).expect("open");

        match update(&mut controller, Message::Click(ClickTarget::NextButton)) {
            Event::Load(request) => {
                assert_eq!(request.index, 1);
                assert_eq!(request.kind, MediaType::Image);
            }
            other => panic!("expected a load request, got {other:?}"),
        }
    }

    #[test]
    fn volume_changes_do_not_unmute() {
        let mut controller = builtin_controller();
        let request = controller
            .open("devotion", Position::Thumbnail(10))
            .expect("open video");

        update(&mut controller, Message::VolumeChanged(request.surface, 0.9));
        update(&mut controller, Message::ToggleMute(request.surface));

        let video = controller
            .surface()
            .and_then(MediaSurface::as_video)
            .expect("video surface");
        assert!(video.is_muted());
        assert!(video.volume() <= 0.0);
    }

    #[test]
    fn play_toggle_reports_the_new_state() {
        let mut controller = builtin_controller();
        let request = controller
            .open("devotion", Position::Thumbnail(10))
            .expect("open video");

        assert_eq!(
            update(&mut controller, Message::TogglePlayback(request.surface)),
            Event::Playback {
                surface: request.surface,
                playing: true,
            }
        );
        assert_eq!(
            update(&mut controller, Message::TogglePlayback(request.surface)),
            Event::Playback {
                surface: request.surface,
                playing: false,
            }
        );
    }

    #[test]
    fn play_toggle_on_an_image_does_nothing() {
        let mut controller = builtin_controller();
        let request = controller.open("devotion", Position::Cover).expect("open");

        assert_eq!(
            update(&mut controller, Message::TogglePlayback(request.surface)),
            Event::None
        );
    }

    #[test]
    fn counter_reads_one_based_position() {
        let i18n = english();
        let mut controller = builtin_controller();
        assert_eq!(counter_label(&i18n, &controller), "");

        controller.open("orgconnect", Position::Thumbnail(3)).expect("open");
        assert_eq!(counter_label(&i18n, &controller), "5 / 12");
    }

    #[test]
    fn caption_numbers_items_from_one() {
        assert_eq!(caption_label(&english(), 0), "Gallery Image 1");
        assert_eq!(caption_label(&english(), 11), "Gallery Image 12");
    }
}
