//! Integration tests for the playback controller driven by a simulated source.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::sync::Arc;

use futures::StreamExt;
use playbar::config::PlayerConfig;
use playbar::controller::{Activity, ControllerState, PlaybackController, TrackBounds};
use playbar::media::{MediaCommand, Notification, SimulatedSource, SourceUri, TimeRange};

const SOURCE: &str = "/video/Obiwan.mp4";

fn source() -> Arc<SimulatedSource> {
    Arc::new(SimulatedSource::new(SourceUri::parse(SOURCE).unwrap()))
}

fn controller() -> PlaybackController {
    PlaybackController::new(PlayerConfig::new(SOURCE))
}

/// Let the monitor task drain whatever the source has emitted.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

mod commands {
    use super::*;

    #[tokio::test]
    async fn commands_without_source_are_ignored() {
        let controller = controller();

        controller.toggle();
        controller.seek(0.5);
        controller.seek_to_pointer(10.0, TrackBounds::new(0.0, 100.0));

        assert!(!controller.is_bound());
        assert_eq!(controller.state(), ControllerState::default());
    }

    #[tokio::test]
    async fn toggle_while_paused_plays_before_any_notification() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        controller.toggle();

        assert!(controller.state().is_playing());
        assert_eq!(source.commands(), vec![MediaCommand::Play]);
    }

    #[tokio::test]
    async fn toggle_while_playing_pauses() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        controller.toggle();
        controller.toggle();

        assert_eq!(controller.state().playback.activity, Activity::Paused);
        assert_eq!(
            source.commands(),
            vec![MediaCommand::Play, MediaCommand::Pause]
        );
    }

    #[tokio::test]
    async fn toggle_while_buffering_requests_play() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        source.stall();
        settle().await;
        assert!(controller.state().is_buffering());

        controller.toggle();

        assert!(controller.state().is_playing());
        assert!(!controller.state().is_buffering());
    }

    #[tokio::test]
    async fn rejected_toggle_leaves_state_alone() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        source.close();

        controller.toggle();

        assert!(!controller.state().is_playing());
        assert!(source.commands().is_empty());
    }

    #[tokio::test]
    async fn optimistic_play_is_overwritten_by_next_notification() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        controller.toggle();
        source.stall();
        settle().await;

        assert!(controller.state().is_buffering());
        assert!(!controller.state().is_playing());
    }

    #[tokio::test]
    async fn seek_issues_one_command_scaled_by_duration() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        source.load_metadata(100.0);

        controller.seek(0.25);

        assert_eq!(source.commands(), vec![MediaCommand::SetCurrentTime(25.0)]);
    }

    #[tokio::test]
    async fn seek_outside_unit_range_issues_nothing() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        source.load_metadata(100.0);

        controller.seek(-0.2);
        controller.seek(1.01);
        controller.seek(f64::NAN);

        assert!(source.commands().is_empty());
    }

    #[tokio::test]
    async fn seek_with_unknown_duration_issues_nothing() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        controller.seek(0.5);
        source.load_metadata(0.0);
        controller.seek(0.5);

        assert!(source.commands().is_empty());
    }

    #[tokio::test]
    async fn seek_does_not_touch_state_until_time_advances() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        source.load_metadata(100.0);
        settle().await;
        let before = controller.state();

        controller.seek(0.5);
        assert_eq!(controller.state(), before);

        source.emit(Notification::TimeAdvanced);
        settle().await;

        assert_eq!(controller.state().playback.elapsed_seconds, 50.0);
        assert_eq!(controller.state().timeline.progress_fraction, 0.5);
    }

    #[tokio::test]
    async fn pointer_position_maps_onto_track() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        source.load_metadata(80.0);
        let bounds = TrackBounds::new(100.0, 400.0);

        controller.seek_to_pointer(300.0, bounds);
        controller.seek_to_pointer(90.0, bounds);
        controller.seek_to_pointer(520.0, bounds);

        assert_eq!(source.commands(), vec![MediaCommand::SetCurrentTime(40.0)]);
    }
}

mod notifications {
    use super::*;

    #[tokio::test]
    async fn time_advanced_updates_elapsed_and_progress() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        source.load_metadata(100.0);
        source.set_position(25.0);
        source.emit(Notification::TimeAdvanced);
        settle().await;

        let state = controller.state();
        assert_eq!(state.playback.elapsed_seconds, 25.0);
        assert_eq!(state.playback.total_seconds, 100.0);
        assert_eq!(state.timeline.progress_fraction, 0.25);
        assert_eq!(controller.view().progress_percent, 25.0);
    }

    #[tokio::test]
    async fn repeated_time_advanced_changes_nothing() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        source.load_metadata(100.0);
        source.set_position(25.0);

        source.emit(Notification::TimeAdvanced);
        settle().await;
        let once = controller.state();

        source.emit(Notification::TimeAdvanced);
        settle().await;

        assert_eq!(controller.state(), once);
    }

    #[tokio::test]
    async fn buffered_width_follows_furthest_end() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        source.load_metadata(100.0);
        source.set_buffered(vec![TimeRange::new(0.0, 40.0)]);
        settle().await;

        assert_eq!(controller.state().timeline.buffered_fraction, 0.4);
        assert_eq!(controller.view().buffered_percent, 40.0);
    }

    #[tokio::test]
    async fn buffered_width_ignores_zero_duration() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        source.load_metadata(0.0);
        source.set_buffered(vec![TimeRange::new(0.0, 40.0)]);
        settle().await;

        assert_eq!(controller.state().timeline.buffered_fraction, 0.0);
    }

    #[tokio::test]
    async fn stall_then_time_advanced_clears_buffering() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        source.emit(Notification::Started);
        source.stall();
        settle().await;
        assert!(controller.state().is_buffering());
        assert!(!controller.state().is_playing());

        source.emit(Notification::TimeAdvanced);
        settle().await;

        assert!(!controller.state().is_buffering());
        assert!(!controller.state().is_playing());
    }

    #[tokio::test]
    async fn notifications_apply_in_arrival_order() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        source.emit(Notification::Stalled);
        source.emit(Notification::Started);
        source.emit(Notification::Paused);
        source.emit(Notification::Started);
        settle().await;

        assert!(controller.state().is_playing());
    }

    #[tokio::test]
    async fn burst_of_notifications_is_applied_in_full() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());

        source.load_metadata(100.0);
        source.emit(Notification::Started);
        for _ in 0..70 {
            source.emit(Notification::BufferExtended);
        }
        settle().await;

        let state = controller.state();
        assert!(state.is_playing());
        assert_eq!(state.playback.total_seconds, 100.0);
    }

    #[tokio::test]
    async fn watch_reports_state_changes() {
        let source = source();
        let mut controller = controller();
        let mut states = controller.watch();
        controller.bind(source.clone());

        assert_eq!(states.next().await, Some(ControllerState::default()));

        source.emit(Notification::Started);

        let next = states.next().await.unwrap();
        assert!(next.is_playing());
    }

    #[tokio::test]
    async fn engine_feedback_drives_a_full_session() {
        let source = Arc::new(
            SimulatedSource::new(SourceUri::parse(SOURCE).unwrap()).with_feedback(),
        );
        let mut controller = controller();
        controller.bind(source.clone());
        source.load_metadata(20.0);

        controller.toggle();
        for _ in 0..4 {
            source.tick(1.0);
        }
        settle().await;

        let state = controller.state();
        assert!(state.is_playing());
        assert_eq!(state.playback.elapsed_seconds, 4.0);
        assert_eq!(state.timeline.progress_fraction, 0.2);
        assert_eq!(state.timeline.buffered_fraction, 0.6);

        source.stall();
        settle().await;
        assert!(controller.state().is_buffering());
        assert_eq!(controller.view().loading_label, Some("Loading..."));

        source.recover();
        settle().await;
        assert!(controller.state().is_playing());

        controller.toggle();
        settle().await;
        assert_eq!(controller.state().playback.activity, Activity::Paused);
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn bind_applies_mount_options() {
        let source = source();
        let options = PlayerConfig {
            auto_play: true,
            muted: true,
            ..PlayerConfig::new(SOURCE)
        };
        let mut controller = PlaybackController::new(options);

        controller.bind(source.clone());

        assert_eq!(
            source.commands(),
            vec![MediaCommand::SetMuted(true), MediaCommand::Play]
        );
        assert!(source.is_muted());
        // Auto-play waits for the source to confirm.
        assert!(!controller.state().is_playing());
    }

    #[tokio::test]
    async fn auto_play_confirmation_is_not_missed() {
        let source = Arc::new(
            SimulatedSource::new(SourceUri::parse(SOURCE).unwrap()).with_feedback(),
        );
        let options = PlayerConfig {
            auto_play: true,
            ..PlayerConfig::new(SOURCE)
        };
        let mut controller = PlaybackController::new(options);

        controller.bind(source.clone());
        settle().await;

        assert!(controller.state().is_playing());
    }

    #[tokio::test]
    async fn unbind_releases_subscription() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        settle().await;
        assert_eq!(source.subscriber_count(), 1);

        controller.unbind();
        settle().await;

        assert_eq!(source.subscriber_count(), 0);
        assert!(!controller.is_bound());

        source.emit(Notification::Started);
        source.load_metadata(100.0);
        settle().await;

        assert_eq!(controller.state(), ControllerState::default());
    }

    #[tokio::test]
    async fn rebind_ignores_previous_source() {
        let first = source();
        let second = Arc::new(SimulatedSource::new(
            SourceUri::parse("/video/second.mp4").unwrap(),
        ));
        let mut controller = controller();

        controller.bind(first.clone());
        first.emit(Notification::Started);
        settle().await;
        assert!(controller.state().is_playing());

        controller.bind(second.clone());
        settle().await;
        assert_eq!(controller.state(), ControllerState::default());
        assert_eq!(first.subscriber_count(), 0);
        assert_eq!(
            controller.source_uri().map(SourceUri::as_str),
            Some("/video/second.mp4")
        );

        first.emit(Notification::Started);
        settle().await;
        assert!(!controller.state().is_playing());

        second.emit(Notification::Stalled);
        settle().await;
        assert!(controller.state().is_buffering());
    }

    #[tokio::test]
    async fn dropping_controller_releases_subscription() {
        let source = source();
        let mut controller = controller();
        controller.bind(source.clone());
        settle().await;

        drop(controller);
        settle().await;

        assert_eq!(source.subscriber_count(), 0);
    }
}
