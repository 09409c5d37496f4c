use std::time::Duration;

use super::*;

fn cfg() -> TrackerConfig {
    TrackerConfig::default()
}

fn processing(start: i64) -> TrackingRecord {
    TrackingRecord::submitted(start)
}

#[test]
fn submit_from_idle_enters_processing() {
    let t = on(&Event::Submit { now_ms: 1_000 }, &TrackingRecord::default(), &cfg());
    assert_eq!(t.phases(), vec![Phase::Idle, Phase::Processing]);
    assert_eq!(t.from, Phase::Idle);
    assert_eq!(t.to, Phase::Processing);
    assert_eq!(t.persist, Persist::Save);
    assert!(t.effects.is_empty());
    assert_eq!(t.record, TrackingRecord::submitted(1_000));
}

#[test]
fn submit_resets_download_flag_and_start_time() {
    let armed = TrackingRecord {
        download_initiated: true,
        ..processing(1_000)
    };
    let t = on(&Event::Submit { now_ms: 9_000 }, &armed, &cfg());
    assert_eq!(t.from, Phase::Downloading);
    assert_eq!(t.to, Phase::Processing);
    assert!(!t.record.download_initiated);
    assert_eq!(t.record.processing_start_time, Some(9_000));
}

#[test]
fn submit_keeps_pending_flash_suppression() {
    let pending = TrackingRecord {
        suppress_flash_messages: true,
        ..TrackingRecord::default()
    };
    let t = on(&Event::Submit { now_ms: 5 }, &pending, &cfg());
    assert!(t.record.suppress_flash_messages);
}

#[test]
fn unload_during_processing_assumes_download_started() {
    let t = on(&Event::BeforeUnload, &processing(1_000), &cfg());
    assert_eq!(t.from, Phase::Processing);
    assert_eq!(t.to, Phase::Downloading);
    assert_eq!(t.persist, Persist::Save);
    assert!(t.record.download_initiated);
    assert!(t.record.pdf_processing);
    assert_eq!(
        t.effects,
        vec![
            Effect::HideSpinner,
            Effect::ShowSuccessIndicator,
            Effect::SetProcessingText("Complete Conversion!".to_string()),
            Effect::SuppressUnloadPrompt,
        ]
    );
}

#[test]
fn unload_while_idle_changes_nothing() {
    let t = on(&Event::BeforeUnload, &TrackingRecord::default(), &cfg());
    assert_eq!(t.persist, Persist::Unchanged);
    assert!(t.effects.is_empty());
    assert_eq!(t.record, TrackingRecord::default());
}

#[test]
fn unload_while_already_downloading_changes_nothing() {
    let armed = TrackingRecord {
        download_initiated: true,
        ..processing(1_000)
    };
    let t = on(&Event::BeforeUnload, &armed, &cfg());
    assert_eq!(t.persist, Persist::Unchanged);
    assert!(t.effects.is_empty());
}

#[test]
fn load_with_armed_record_completes_and_clears() {
    let armed = TrackingRecord {
        download_initiated: true,
        ..processing(10_000)
    };
    let t = on(&Event::page_load("/", 17_400), &armed, &cfg());
    assert_eq!(t.from, Phase::Downloading);
    assert_eq!(t.to, Phase::Idle);
    assert_eq!(t.persist, Persist::Clear);
    assert!(t.record.is_empty());
    assert_eq!(t.completion, Some(Completion { elapsed_secs: Some(7) }));
    assert_eq!(
        t.phases(),
        vec![Phase::Downloading, Phase::Complete, Phase::Idle]
    );
    assert_eq!(
        t.effects,
        vec![
            Effect::HideFlash,
            Effect::HideOverlay,
            Effect::HideFlash,
            Effect::ShowStatus {
                text: "Complete Conversion! Your file has been successfully processed and downloaded."
                    .to_string(),
                severity: Severity::Success,
            },
            Effect::AppendStatusLine("Processing completed in 7 seconds".to_string()),
            Effect::AnimateStatus,
        ]
    );
}

#[test]
fn completion_without_start_time_skips_elapsed_line() {
    let armed = TrackingRecord {
        download_initiated: true,
        ..TrackingRecord::default()
    };
    let t = on(&Event::page_load("/", 5_000), &armed, &cfg());
    assert_eq!(t.completion, Some(Completion { elapsed_secs: None }));
    assert!(!t
        .effects
        .iter()
        .any(|e| matches!(e, Effect::AppendStatusLine(_) | Effect::AnimateStatus)));
}

#[test]
fn stale_processing_record_never_completes() {
    let t = on(&Event::page_load("/", 999_999), &processing(1_000), &cfg());
    assert_eq!(t.completion, None);
    assert_eq!(t.persist, Persist::Unchanged);
    assert!(t.effects.is_empty());
    assert_eq!(t.to, Phase::Processing);
}

#[test]
fn flash_suppression_is_one_shot_and_leaves_download_flag() {
    let pending = TrackingRecord {
        suppress_flash_messages: true,
        ..processing(1_000)
    };
    let t = on(&Event::page_load("/", 2_000), &pending, &cfg());
    assert_eq!(t.effects, vec![Effect::HideFlash]);
    assert!(!t.record.suppress_flash_messages);
    assert!(!t.record.download_initiated);
    assert!(t.record.pdf_processing);
    assert_eq!(t.persist, Persist::Save);
}

#[test]
fn flash_suppression_waits_for_a_page_with_a_banner() {
    let pending = TrackingRecord {
        suppress_flash_messages: true,
        ..processing(1_000)
    };
    let event = Event::PageLoad {
        path: "/about".to_string(),
        now_ms: 2_000,
        has_flash: false,
    };
    let t = on(&event, &pending, &cfg());
    assert!(t.effects.is_empty());
    assert!(t.record.suppress_flash_messages);
    assert_eq!(t.persist, Persist::Unchanged);
}

#[test]
fn download_page_arms_and_schedules_redirect() {
    let t = on(
        &Event::page_load("/download/abc123", 0),
        &TrackingRecord::default(),
        &cfg(),
    );
    assert!(t.record.download_initiated);
    assert_eq!(t.to, Phase::Downloading);
    assert_eq!(t.persist, Persist::Save);
    assert_eq!(
        t.effects,
        vec![Effect::Schedule {
            delay: Duration::from_millis(1000),
            action: TimerAction::Redirect("/".to_string()),
        }]
    );
}

#[test]
fn download_page_with_armed_record_completes_then_rearms() {
    let armed = TrackingRecord {
        download_initiated: true,
        ..processing(0)
    };
    let t = on(&Event::page_load("/download/out.txt", 3_000), &armed, &cfg());
    assert_eq!(t.completion, Some(Completion { elapsed_secs: Some(3) }));
    assert_eq!(
        t.record,
        TrackingRecord {
            download_initiated: true,
            ..TrackingRecord::default()
        }
    );
    assert_eq!(t.persist, Persist::Save);
    assert!(matches!(
        t.effects.last(),
        Some(Effect::Schedule {
            action: TimerAction::Redirect(_),
            ..
        })
    ));
}

#[test]
fn custom_navigation_config_is_honoured() {
    let mut config = cfg();
    config.navigation.download_segment = "/files/".to_string();
    config.navigation.home_path = "/tool".to_string();
    config.timing.redirect_delay_ms = 50;

    let t = on(&Event::page_load("/download/x", 0), &TrackingRecord::default(), &config);
    assert!(t.effects.is_empty());

    let t = on(&Event::page_load("/files/x", 0), &TrackingRecord::default(), &config);
    assert_eq!(
        t.effects,
        vec![Effect::Schedule {
            delay: Duration::from_millis(50),
            action: TimerAction::Redirect("/tool".to_string()),
        }]
    );
}

#[test]
fn elapsed_seconds_floor_and_clamp() {
    assert_eq!(elapsed_whole_seconds(0, 7_400), 7);
    assert_eq!(elapsed_whole_seconds(0, 7_999), 7);
    assert_eq!(elapsed_whole_seconds(0, 999), 0);
    assert_eq!(elapsed_whole_seconds(5_000, 1_000), 0);
    assert_eq!(elapsed_whole_seconds(i64::MIN, i64::MAX), (i64::MAX / 1000) as u64);
}
