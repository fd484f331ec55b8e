// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{sync::{Arc, Mutex},
          time::Duration};

use pretty_assertions::assert_eq;
use r3bl_hint_jump::{AssignOptions, CursorPos, EditorMode, HintJumpConfig, HintMapping,
                     HintRenderer, InputResolution, LabelPoolConfig, ManualClock,
                     MotionDetector, RequestCoordinator, ShowParams, SkipReason, Word,
                     assign_hints, generate_labels, load_config_from_str};
use test_case::test_case;

fn alpha_beta() -> Vec<Word> { vec![Word::new("alpha", 1, 1), Word::new("beta", 1, 6)] }

fn hint_text(hints: &[HintMapping]) -> Vec<(String, String)> {
    hints
        .iter()
        .map(|it| (it.word.text.clone(), it.hint.to_string()))
        .collect()
}

/// Labels go to the closest word first, by column distance on the same line.
#[test_case(CursorPos::new(1, 10), &[("beta", "a"), ("alpha", "s")] ; "cursor right of both")]
#[test_case(CursorPos::new(2, 1), &[("alpha", "a"), ("beta", "s")] ; "cursor below alpha")]
fn test_generate_then_assign(cursor: CursorPos, expected: &[(&str, &str)]) {
    let pool = LabelPoolConfig::new(&["a", "s"], &[]);
    let labels = generate_labels(2, &pool);
    assert_eq!(
        labels.iter().map(|it| it.as_str()).collect::<Vec<_>>(),
        vec!["a", "s"]
    );

    let hints = assign_hints(
        &alpha_beta(),
        &labels,
        cursor,
        EditorMode::Normal,
        &AssignOptions::default(),
    );

    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(word, label)| ((*word).to_string(), (*label).to_string()))
        .collect();
    assert_eq!(hint_text(&hints), expected);
}

#[derive(Debug, Default)]
struct CollectingRenderer {
    shown: Mutex<Vec<HintMapping>>,
}

impl HintRenderer for CollectingRenderer {
    fn render(&self, hints: &[HintMapping]) {
        self.shown.lock().unwrap().extend_from_slice(hints);
    }

    fn clear(&self) { self.shown.lock().unwrap().clear(); }
}

/// Three `j` presses trigger a debounced show, typing a label jumps and hides.
#[tokio::test(start_paused = true)]
async fn test_motion_to_jump() {
    let config = Arc::new(
        load_config_from_str(r#"{ "motionCount": 3, "debounceDelay": 20 }"#)
            .unwrap()
            .config,
    );
    assert_eq!(config.default_motion_count, 3);
    assert_eq!(config.debounce_delay_ms, 20);

    let clock = Arc::new(ManualClock::new(1_000_000));
    let mut detector = MotionDetector::new(clock.clone());

    let renderer = Arc::new(CollectingRenderer::default());
    let coordinator = RequestCoordinator::new(
        Arc::new(|| {
            vec![
                Word::new("first", 1, 1),
                Word::new("second", 3, 1),
                Word::new("third", 6, 1),
            ]
        }),
        Arc::new(CursorPos::new(2, 1)),
        renderer.clone(),
    );

    let mut reasons = vec![];
    for _ in 0..3 {
        let decision = detector.handle_key("j", 0, &config);
        if decision.trigger {
            coordinator.request_show(
                ShowParams::new(Arc::clone(&config)).with_motion_key("j"),
            );
        }
        reasons.push(decision.reason);
        clock.advance(200);
    }
    assert_eq!(
        reasons,
        vec![
            Some(SkipReason::TimeoutReset),
            Some(SkipReason::BelowThreshold),
            None,
        ]
    );
    assert_eq!(detector.state().motion_count, 0);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(coordinator.is_hints_visible());

    let shown = renderer.shown.lock().unwrap().clone();
    // Lines 1 and 3 are both one line away from the cursor; detection order breaks the
    // tie.
    assert_eq!(
        hint_text(&shown),
        vec![
            ("first".to_string(), "A".to_string()),
            ("second".to_string(), "S".to_string()),
            ("third".to_string(), "D".to_string()),
        ]
    );

    match coordinator.narrow("s") {
        InputResolution::Jump(target) => assert_eq!(target.word.line, 3),
        other => panic!("expected a jump, got {other:?}"),
    }
    assert!(!coordinator.is_hints_visible());
    assert!(renderer.shown.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_default_config_round_trip_through_json() {
    let json = serde_json::to_string(&HintJumpConfig::default()).unwrap();
    let loaded = load_config_from_str(&json).unwrap();
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.config, HintJumpConfig::default());
}
