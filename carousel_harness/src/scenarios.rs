// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios against the simulated collaborators.

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use carousel_core::Error;
use carousel_core::autoscroll::{AutoscrollConfig, Direction};
use carousel_core::backend::Transition;
use carousel_core::observer::ScrollObserver;
use carousel_core::page::PageSource;
use carousel_core::settings::{CarouselSettings, ContentMode, FailureRetry};
use carousel_core::slot::SlotState;
use carousel_debug::recorder::{RecordedEvent, RecordedPage, RecorderSink, decode};
use kurbo::Vec2;

use super::*;

const VIEWPORT: Size = Size::new(120.0, 90.0);
const AUK: &str = "http://site.com/auk.png";
const BIRD: &str = "http://site.com/bird.png";

fn carousel() -> SimCarousel {
    sim_carousel(VIEWPORT)
}

fn carousel_with(settings: CarouselSettings<SimImage>) -> SimCarousel {
    Carousel::with_settings(
        SimContainer::new(VIEWPORT),
        FetchSimulator::default(),
        ManualTimer::default(),
        settings,
    )
    .unwrap()
}

fn three_local_pages() -> SimCarousel {
    let mut carousel = carousel();
    for name in ["one", "two", "three"] {
        carousel.show_image(SimImage::named(name));
    }
    carousel
}

fn slot_state(carousel: &SimCarousel, page: PageId) -> Option<SlotState> {
    carousel.pages().get(page)?.slot().map(|slot| slot.state())
}

fn fade_in() -> Presentation {
    Presentation {
        content_mode: ContentMode::AspectFit,
        transition: Transition::FadeIn(Duration::from_millis(300)),
    }
}

// ---------------------------------------------------------------------------
// Setup and layout
// ---------------------------------------------------------------------------

#[test]
fn show_configures_container_once() {
    let mut carousel = carousel();
    carousel.show_image(SimImage::named("one"));
    carousel.show_image(SimImage::named("two"));

    let container = carousel.container();
    assert!(container.paging_enabled());
    assert!(!container.shows_horizontal_scroll_indicator());
    assert_eq!(container.indicators_created(), 1);
}

#[test]
fn indicator_is_not_created_when_disabled() {
    let mut settings = CarouselSettings::default();
    settings.page_indicator.visible = false;
    let mut carousel = carousel_with(settings);
    carousel.show_image(SimImage::named("one"));
    carousel.show_image(SimImage::named("two"));

    assert!(carousel.page_indicator().is_none());
    assert_eq!(carousel.container().indicators_created(), 0);
}

#[test]
fn indicator_tracks_count_and_visibility() {
    let mut carousel = carousel();
    carousel.show_image(SimImage::named("one"));
    let indicator = carousel.page_indicator().unwrap();
    assert_eq!(indicator.page_count, 1);
    assert!(indicator.hidden);

    carousel.show_image(SimImage::named("two"));
    let indicator = carousel.page_indicator().unwrap();
    assert_eq!(indicator.page_count, 2);
    assert!(!indicator.hidden);
}

#[test]
fn pages_are_laid_out_side_by_side() {
    let mut carousel = carousel();
    let first = carousel.show_remote_image(AUK);
    let second = carousel.show_remote_image(BIRD);

    let container = carousel.container();
    assert_eq!(container.content_size(), Size::new(240.0, 90.0));
    assert_eq!(
        container.view(first).unwrap().frame,
        Rect::new(0.0, 0.0, 120.0, 90.0)
    );
    assert_eq!(
        container.view(second).unwrap().frame,
        Rect::new(120.0, 0.0, 240.0, 90.0)
    );
}

#[test]
fn local_image_is_presented_without_transition() {
    let mut carousel = carousel();
    let id = carousel.show_image(SimImage::named("bird"));

    let view = carousel.container().view(id).unwrap();
    assert_eq!(
        view.local,
        Some(Shown {
            image: SimImage::named("bird"),
            presentation: Presentation {
                content_mode: ContentMode::AspectFit,
                transition: Transition::None,
            },
        })
    );
    assert!(carousel.fetcher().downloads().is_empty());
}

#[test]
fn relayout_keeps_current_page_after_resize() {
    let mut carousel = three_local_pages();
    scroll_to_offset(&mut carousel, 120.0);
    assert_eq!(carousel.current_page_index(), 1);

    carousel.container_mut().resize(Size::new(200.0, 90.0));
    carousel.relayout();

    let container = carousel.container();
    assert_eq!(container.content_size(), Size::new(600.0, 90.0));
    assert_eq!(
        container.views()[1].frame,
        Rect::new(200.0, 0.0, 400.0, 90.0)
    );
    assert_eq!(container.offset(), Point::new(200.0, 0.0));
    assert_eq!(carousel.current_page_index(), 1);
}

#[test]
fn relayout_after_programmatic_scroll_keeps_target_page() {
    let mut carousel = three_local_pages();
    carousel.scroll_to(2, false);

    carousel.container_mut().resize(Size::new(200.0, 90.0));
    carousel.relayout();

    assert_eq!(carousel.container().offset(), Point::new(400.0, 0.0));
    assert_eq!(carousel.current_page_index(), 2);
    assert_eq!(carousel.page_indicator().unwrap().current_page, 2);
}

#[test]
fn programmatic_scroll_notification_updates_indicator() {
    let mut carousel = three_local_pages();
    carousel.scroll_to(1, true);
    assert_eq!(deliver_scroll_notifications(&mut carousel), 1);
    assert_eq!(carousel.page_indicator().unwrap().current_page, 1);
    assert_eq!(deliver_scroll_notifications(&mut carousel), 0);
}

// ---------------------------------------------------------------------------
// Lazy loading
// ---------------------------------------------------------------------------

#[test]
fn downloads_follow_visibility_with_hysteresis() {
    let mut carousel = carousel();
    carousel.show_remote_image(AUK);
    carousel.show_remote_image(BIRD);
    assert_eq!(carousel.fetcher().started_urls(), vec![AUK]);

    scroll_to_offset(&mut carousel, 10.0);
    assert_eq!(carousel.fetcher().started_urls(), vec![AUK, BIRD]);
    assert_eq!(carousel.fetcher().cancelled_count(), 0);

    // The first page no longer overlaps but is within the margin.
    scroll_to_offset(&mut carousel, 120.0);
    assert_eq!(carousel.fetcher().cancelled_count(), 0);

    scroll_to_offset(&mut carousel, 180.0);
    let downloads = carousel.fetcher().downloads();
    assert!(downloads[0].cancelled);
    assert!(!downloads[1].cancelled);
}

#[test]
fn placeholder_is_shown_until_download_completes() {
    let mut settings = CarouselSettings::default();
    settings.placeholder_image = Some(SimImage::named("placeholder"));
    let mut carousel = carousel_with(settings);
    let id = carousel.show_remote_image(AUK);

    let view = carousel.container().view(id).unwrap();
    assert_eq!(
        view.local.as_ref().map(|shown| &shown.image),
        Some(&SimImage::named("placeholder"))
    );
    assert_eq!(view.remote, None);
}

#[test]
fn downloaded_image_fades_in_and_is_final() {
    let mut carousel = carousel();
    let id = carousel.show_remote_image(AUK);
    assert!(
        carousel
            .fetcher_mut()
            .respond_with_image(0, SimImage::named("auk"))
    );
    assert_eq!(carousel.process_completions(), 1);

    let view = carousel.container().view(id).unwrap();
    assert_eq!(
        view.remote,
        Some(Shown {
            image: SimImage::named("auk"),
            presentation: fade_in(),
        })
    );
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Loaded));

    scroll_to_offset(&mut carousel, 300.0);
    scroll_to_offset(&mut carousel, 0.0);
    assert_eq!(carousel.fetcher().downloads().len(), 1);
    assert_eq!(carousel.fetcher().cancelled_count(), 0);
}

#[test]
fn response_racing_cancellation_is_ignored() {
    let mut carousel = carousel();
    let id = carousel.show_remote_image(AUK);

    scroll_to_offset(&mut carousel, 180.0);
    assert!(carousel.fetcher().downloads()[0].cancelled);
    assert!(
        carousel
            .fetcher_mut()
            .respond_with_image(0, SimImage::named("late"))
    );
    assert_eq!(carousel.process_completions(), 0);
    assert_eq!(carousel.container().view(id).unwrap().remote, None);
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Idle));

    scroll_to_offset(&mut carousel, 0.0);
    let downloads = carousel.fetcher().downloads();
    assert_eq!(downloads.len(), 2);
    assert_eq!(downloads[1].ticket.attempt, 2);

    assert!(
        carousel
            .fetcher_mut()
            .respond_with_image(1, SimImage::named("auk"))
    );
    assert_eq!(carousel.process_completions(), 1);
    assert_eq!(
        carousel
            .container()
            .view(id)
            .unwrap()
            .remote
            .as_ref()
            .map(|shown| &shown.image),
        Some(&SimImage::named("auk"))
    );
}

#[test]
fn pages_sharing_a_url_complete_independently() {
    let mut carousel = carousel();
    let first = carousel.show_remote_image(AUK);
    let second = carousel.show_remote_image(AUK);

    scroll_to_offset(&mut carousel, 10.0);
    scroll_to_offset(&mut carousel, 180.0);
    let downloads = carousel.fetcher().downloads();
    assert_eq!(downloads.len(), 2);
    assert_eq!(downloads[0].ticket.page, first);
    assert!(downloads[0].cancelled);
    assert_eq!(downloads[1].ticket.page, second);
    assert!(!downloads[1].cancelled);

    let fetcher = carousel.fetcher_mut();
    assert!(fetcher.respond_with_image(0, SimImage::named("first")));
    assert!(fetcher.respond_with_image(1, SimImage::named("second")));
    assert_eq!(carousel.process_completions(), 1);

    let container = carousel.container();
    assert_eq!(container.view(first).unwrap().remote, None);
    assert_eq!(
        container
            .view(second)
            .unwrap()
            .remote
            .as_ref()
            .map(|shown| &shown.image),
        Some(&SimImage::named("second"))
    );
    assert_eq!(slot_state(&carousel, first), Some(SlotState::Idle));
    assert_eq!(slot_state(&carousel, second), Some(SlotState::Loaded));
}

#[test]
fn completion_from_worker_thread_is_applied_on_process() {
    let mut carousel = carousel();
    let id = carousel.show_remote_image(AUK);
    let completer = carousel.fetcher_mut().take_completer(0).unwrap();

    std::thread::spawn(move || completer.succeed(SimImage::named("auk")))
        .join()
        .unwrap();
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Downloading));

    assert_eq!(carousel.process_completions(), 1);
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Loaded));
    assert_eq!(carousel.process_completions(), 0);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn failure_shows_error_image() {
    let mut settings = CarouselSettings::default();
    settings.error_image = Some(SimImage::named("error"));
    let mut carousel = carousel_with(settings);
    let id = carousel.show_remote_image(AUK);

    assert!(
        carousel
            .fetcher_mut()
            .respond_with_error(0, FetchError::Status(404))
    );
    assert_eq!(carousel.process_completions(), 1);
    assert_eq!(
        carousel.container().view(id).unwrap().remote,
        Some(Shown {
            image: SimImage::named("error"),
            presentation: fade_in(),
        })
    );
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Loaded));

    scroll_to_offset(&mut carousel, 180.0);
    scroll_to_offset(&mut carousel, 0.0);
    assert_eq!(carousel.fetcher().downloads().len(), 1);
}

#[test]
fn failure_retries_only_after_leaving_view() {
    let mut carousel = carousel();
    let id = carousel.show_remote_image(AUK);
    carousel
        .fetcher_mut()
        .respond_with_error(0, FetchError::Network("offline".into()));
    assert_eq!(carousel.process_completions(), 1);
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Failed));
    assert_eq!(carousel.container().view(id).unwrap().remote, None);

    scroll_to_offset(&mut carousel, 10.0);
    assert_eq!(carousel.fetcher().downloads().len(), 1);

    scroll_to_offset(&mut carousel, 180.0);
    assert_eq!(carousel.fetcher().cancelled_count(), 0);
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Idle));

    scroll_to_offset(&mut carousel, 0.0);
    assert_eq!(carousel.fetcher().started_urls(), vec![AUK, AUK]);
}

#[test]
fn failure_is_terminal_without_retry() {
    let mut settings = CarouselSettings::default();
    settings.failure_retry = FailureRetry::Never;
    let mut carousel = carousel_with(settings);
    let id = carousel.show_remote_image(AUK);
    carousel
        .fetcher_mut()
        .respond_with_error(0, FetchError::Decode("truncated".into()));
    carousel.process_completions();

    scroll_to_offset(&mut carousel, 180.0);
    scroll_to_offset(&mut carousel, 0.0);
    assert_eq!(slot_state(&carousel, id), Some(SlotState::Failed));
    assert_eq!(carousel.fetcher().downloads().len(), 1);
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[test]
fn remove_all_cancels_downloads_and_resets() {
    let mut carousel = carousel();
    carousel.show_remote_image(AUK);
    carousel.show_remote_image(BIRD);
    scroll_to_offset(&mut carousel, 10.0);

    carousel.remove_all();
    assert_eq!(carousel.number_of_pages(), 0);
    assert_eq!(carousel.current_page_index(), 0);
    assert_eq!(carousel.fetcher().cancelled_count(), 2);

    let container = carousel.container();
    assert!(container.views().is_empty());
    assert_eq!(container.content_size(), Size::ZERO);

    let indicator = carousel.page_indicator().unwrap();
    assert_eq!(indicator.page_count, 0);
    assert_eq!(indicator.current_page, 0);
    assert!(indicator.hidden);

    carousel
        .fetcher_mut()
        .respond_with_image(0, SimImage::named("late"));
    assert_eq!(carousel.process_completions(), 0);
}

#[test]
fn pages_can_be_added_after_remove_all() {
    let mut carousel = carousel();
    let old = carousel.show_remote_image(AUK);
    carousel.remove_all();
    let new = carousel.show_remote_image(BIRD);

    assert_ne!(old, new);
    assert!(carousel.pages().get(old).is_none());
    assert_eq!(carousel.fetcher().started_urls(), vec![AUK, BIRD]);
    assert_eq!(carousel.fetcher().downloads()[1].ticket.page, new);
}

#[test]
fn dropping_the_carousel_cancels_in_flight_downloads() {
    #[derive(Debug, Default)]
    struct SharedFetcher {
        cancelled: Rc<RefCell<Vec<FetchTicket>>>,
    }

    impl ImageFetcher for SharedFetcher {
        type Image = SimImage;

        fn start(&mut self, _request: FetchRequest<SimImage>) {}

        fn cancel(&mut self, ticket: FetchTicket, _url: &str) {
            self.cancelled.borrow_mut().push(ticket);
        }
    }

    let cancelled = Rc::new(RefCell::new(Vec::new()));
    let fetcher = SharedFetcher {
        cancelled: Rc::clone(&cancelled),
    };
    let mut carousel = Carousel::new(SimContainer::new(VIEWPORT), fetcher, ManualTimer::default());
    let id = carousel.show_remote_image(AUK);
    drop(carousel);

    assert_eq!(
        *cancelled.borrow(),
        vec![FetchTicket {
            page: id,
            attempt: 1,
        }]
    );
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

#[test]
fn scroll_to_clamps_index() {
    let mut carousel = three_local_pages();
    carousel.scroll_to(5, true);
    assert_eq!(
        carousel.container().offset_changes(),
        &[OffsetChange {
            offset: Point::new(240.0, 0.0),
            animated: true,
        }]
    );
    assert_eq!(carousel.current_page_index(), 2);
}

#[test]
fn scroll_to_without_pages_does_nothing() {
    let mut carousel = carousel();
    carousel.scroll_to(3, false);
    carousel.scroll_to_next_page(true, false);
    assert!(carousel.container().offset_changes().is_empty());
}

#[test]
fn next_and_previous_respect_cycle() {
    let mut carousel = three_local_pages();
    carousel.scroll_to_next_page(false, false);
    assert_eq!(carousel.current_page_index(), 1);

    carousel.scroll_to_previous_page(false, false);
    assert_eq!(carousel.current_page_index(), 0);

    carousel.scroll_to_previous_page(false, false);
    assert_eq!(carousel.container().offset_changes().len(), 2);

    carousel.scroll_to_previous_page(true, false);
    assert_eq!(carousel.current_page_index(), 2);

    carousel.scroll_to_next_page(false, false);
    assert_eq!(carousel.container().offset_changes().len(), 3);
}

#[test]
fn did_scroll_updates_indicator() {
    let mut carousel = three_local_pages();
    scroll_to_offset(&mut carousel, 170.0);
    assert_eq!(carousel.page_indicator().unwrap().current_page, 1);
    scroll_to_offset(&mut carousel, 180.0);
    assert_eq!(carousel.page_indicator().unwrap().current_page, 2);
}

// ---------------------------------------------------------------------------
// Autoscroll
// ---------------------------------------------------------------------------

#[test]
fn autoscroll_wraps_to_first_page() {
    let mut carousel = three_local_pages();
    carousel.scroll_to(2, false);
    carousel
        .start_auto_scroll(AutoscrollConfig::new(Duration::from_secs(3)))
        .unwrap();
    assert_eq!(
        carousel.timer().active(),
        &[(TimerId(1), Duration::from_secs(3))]
    );

    ManualTimer::fire_all(&mut carousel);
    assert_eq!(
        carousel.container().offset_changes().last(),
        Some(&OffsetChange {
            offset: Point::ZERO,
            animated: true,
        })
    );
    assert_eq!(carousel.current_page_index(), 0);
}

#[test]
fn second_autoscroll_supersedes_first() {
    let mut carousel = three_local_pages();
    let config = AutoscrollConfig::new(Duration::from_secs(2));
    carousel.start_auto_scroll(config).unwrap();
    carousel.start_auto_scroll(config).unwrap();

    assert_eq!(carousel.timer().cancelled(), &[TimerId(1)]);
    assert_eq!(carousel.autoscroll_timer(), Some(TimerId(2)));

    carousel.on_timer_fired(TimerId(1));
    assert!(carousel.container().offset_changes().is_empty());

    carousel.on_timer_fired(TimerId(2));
    assert_eq!(carousel.current_page_index(), 1);
}

#[test]
fn autoscroll_tick_moves_indicator() {
    let mut carousel = three_local_pages();
    carousel
        .start_auto_scroll(AutoscrollConfig::new(Duration::from_secs(2)))
        .unwrap();

    ManualTimer::fire_all(&mut carousel);
    assert_eq!(carousel.current_page_index(), 1);
    assert_eq!(carousel.page_indicator().unwrap().current_page, 1);
}

#[test]
fn zero_interval_autoscroll_is_rejected() {
    let mut carousel = three_local_pages();
    assert_eq!(
        carousel.start_auto_scroll(AutoscrollConfig::new(Duration::ZERO)),
        Err(Error::ZeroAutoscrollInterval)
    );
    assert!(carousel.timer().active().is_empty());
}

#[test]
fn backward_autoscroll_without_cycle_stops_at_first_page() {
    let mut carousel = three_local_pages();
    let config = AutoscrollConfig::new(Duration::from_secs(1))
        .with_direction(Direction::Backward)
        .with_cycle(false)
        .with_animated(false);
    carousel.start_auto_scroll(config).unwrap();

    ManualTimer::fire_all(&mut carousel);
    assert!(carousel.container().offset_changes().is_empty());
    assert_eq!(carousel.autoscroll_timer(), Some(TimerId(1)));
}

#[test]
fn stop_auto_scroll_is_idempotent() {
    let mut carousel = three_local_pages();
    carousel
        .start_auto_scroll(AutoscrollConfig::new(Duration::from_secs(1)))
        .unwrap();
    carousel.stop_auto_scroll();
    carousel.stop_auto_scroll();
    assert_eq!(carousel.timer().cancelled(), &[TimerId(1)]);
    assert_eq!(carousel.autoscroll_timer(), None);
}

// ---------------------------------------------------------------------------
// Observer pass-through
// ---------------------------------------------------------------------------

struct RecordingObserver {
    log: Rc<RefCell<Vec<String>>>,
    allow_scroll_to_top: bool,
    zoom_page: Option<PageId>,
}

impl ScrollObserver<SimContainer> for RecordingObserver {
    fn did_scroll(&mut self, container: &SimContainer) {
        self.log
            .borrow_mut()
            .push(format!("did_scroll x={}", container.offset().x));
    }

    fn did_zoom(&mut self, _container: &SimContainer) {
        self.log.borrow_mut().push("did_zoom".into());
    }

    fn will_begin_dragging(&mut self, _container: &SimContainer) {
        self.log.borrow_mut().push("will_begin_dragging".into());
    }

    fn will_end_dragging(
        &mut self,
        _container: &SimContainer,
        velocity: Vec2,
        target_offset: &mut Point,
    ) {
        self.log
            .borrow_mut()
            .push(format!("will_end_dragging vx={}", velocity.x));
        target_offset.x = 240.0;
    }

    fn did_end_dragging(&mut self, _container: &SimContainer, will_decelerate: bool) {
        self.log
            .borrow_mut()
            .push(format!("did_end_dragging {will_decelerate}"));
    }

    fn view_for_zooming(&mut self, _container: &SimContainer) -> Option<PageId> {
        self.log.borrow_mut().push("view_for_zooming".into());
        self.zoom_page
    }

    fn did_end_zooming(&mut self, _container: &SimContainer, scale: f64) {
        self.log
            .borrow_mut()
            .push(format!("did_end_zooming {scale}"));
    }

    fn should_scroll_to_top(&mut self, _container: &SimContainer) -> bool {
        self.log.borrow_mut().push("should_scroll_to_top".into());
        self.allow_scroll_to_top
    }
}

#[test]
fn container_events_reach_the_observer() {
    let mut carousel = three_local_pages();
    assert!(carousel.should_scroll_to_top());
    assert_eq!(carousel.view_for_zooming(), None);

    let second = carousel.pages().id_at(1);
    let log = Rc::new(RefCell::new(Vec::new()));
    let previous = carousel.set_scroll_observer(Some(Box::new(RecordingObserver {
        log: Rc::clone(&log),
        allow_scroll_to_top: false,
        zoom_page: second,
    })));
    assert!(previous.is_none());

    scroll_to_offset(&mut carousel, 120.0);
    carousel.did_zoom();
    let mut target = Point::new(120.0, 0.0);
    carousel.will_end_dragging(Vec2::new(-3.0, 0.0), &mut target);
    carousel.did_end_dragging(true);
    carousel.will_begin_decelerating();
    carousel.did_end_decelerating();
    carousel.did_end_scrolling_animation();
    assert_eq!(carousel.view_for_zooming(), second);
    carousel.will_begin_zooming();
    carousel.did_end_zooming(2.0);
    assert!(!carousel.should_scroll_to_top());
    carousel.did_scroll_to_top();

    assert_eq!(target, Point::new(240.0, 0.0));
    assert_eq!(
        *log.borrow(),
        vec![
            "did_scroll x=120",
            "did_zoom",
            "will_end_dragging vx=-3",
            "did_end_dragging true",
            "view_for_zooming",
            "did_end_zooming 2",
            "should_scroll_to_top",
        ]
    );

    assert!(carousel.set_scroll_observer(None).is_some());
    assert!(carousel.should_scroll_to_top());
}

#[test]
fn zoom_target_must_be_a_live_page() {
    let mut carousel = three_local_pages();
    let first = carousel.pages().id_at(0);
    carousel.set_scroll_observer(Some(Box::new(RecordingObserver {
        log: Rc::new(RefCell::new(Vec::new())),
        allow_scroll_to_top: true,
        zoom_page: first,
    })));
    assert_eq!(carousel.view_for_zooming(), first);

    carousel.remove_all();
    assert_eq!(carousel.view_for_zooming(), None);
}

#[test]
fn dragging_forwards_then_stops_autoscroll() {
    let mut carousel = three_local_pages();
    let log = Rc::new(RefCell::new(Vec::new()));
    carousel.set_scroll_observer(Some(Box::new(RecordingObserver {
        log: Rc::clone(&log),
        allow_scroll_to_top: true,
        zoom_page: None,
    })));
    carousel
        .start_auto_scroll(AutoscrollConfig::new(Duration::from_secs(2)))
        .unwrap();

    carousel.will_begin_dragging();
    assert_eq!(*log.borrow(), vec!["will_begin_dragging"]);
    assert!(carousel.timer().active().is_empty());
    assert_eq!(carousel.timer().cancelled(), &[TimerId(1)]);
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[test]
fn trace_records_download_lifecycle() {
    let mut carousel = carousel();
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    carousel.set_trace_sink(Box::new(Rc::clone(&recorder)));

    carousel.show_remote_image(AUK);
    carousel
        .fetcher_mut()
        .respond_with_image(0, SimImage::named("auk"));
    carousel.process_completions();

    let page = RecordedPage {
        index: 0,
        generation: 0,
    };
    let events: Vec<_> = decode(recorder.borrow().as_bytes()).collect();
    assert_eq!(
        events,
        vec![
            RecordedEvent::PageAdded {
                page,
                position: 0,
                source: PageSource::Remote,
            },
            RecordedEvent::SlotTransition {
                page,
                attempt: 1,
                from: SlotState::Idle,
                to: SlotState::Downloading,
            },
            RecordedEvent::SlotTransition {
                page,
                attempt: 1,
                from: SlotState::Downloading,
                to: SlotState::Loaded,
            },
        ]
    );
}

#[test]
fn trace_records_stale_completion_after_removal() {
    let mut carousel = carousel();
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    carousel.set_trace_sink(Box::new(Rc::clone(&recorder)));

    carousel.show_remote_image(AUK);
    carousel.remove_all();
    carousel
        .fetcher_mut()
        .respond_with_image(0, SimImage::named("late"));
    carousel.process_completions();

    let events: Vec<_> = decode(recorder.borrow().as_bytes()).collect();
    assert!(events.contains(&RecordedEvent::PagesRemoved {
        count: 1,
        cancelled_fetches: 1,
    }));
    assert_eq!(
        events.last(),
        Some(&RecordedEvent::StaleCompletion {
            page: RecordedPage {
                index: 0,
                generation: 0,
            },
            attempt: 1,
        })
    );
}
