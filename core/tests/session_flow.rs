use card_reveal_core::{
    Effect, Event, OverlayFrame, Phase, Point, ResolvedSettings, Session, SettingsOverrides,
    Viewport,
};

fn viewport() -> Viewport {
    Viewport::new(1024.0, 768.0, 0.0, 120.0)
}

fn session() -> Session<&'static str> {
    Session::new(ResolvedSettings::default())
}

/// Drives a trigger through both fade completions and returns the effects of
/// the final step.
fn reveal(session: &mut Session<&'static str>, cards: Vec<&'static str>) -> Vec<Effect> {
    session.apply(Event::Trigger {
        cards,
        viewport: viewport(),
    });
    let generation = session.generation();
    session.apply(Event::OverlayShown { generation });
    session.apply(Event::ViewerShown { generation })
}

fn navigation(effects: &[Effect]) -> Option<(bool, bool)> {
    effects.iter().find_map(|effect| match effect {
        Effect::ShowNavigation { previous, next } => Some((*previous, *next)),
        _ => None,
    })
}

fn presented(effects: &[Effect]) -> Option<usize> {
    effects.iter().find_map(|effect| match effect {
        Effect::PresentCard { index, .. } => Some(*index),
        _ => None,
    })
}

#[test]
fn trigger_fades_overlay_then_viewer_then_card() {
    let mut session = session();
    assert_eq!(session.phase(), Phase::Hidden);

    let effects = session.apply(Event::Trigger {
        cards: vec!["a", "b"],
        viewport: viewport(),
    });
    assert_eq!(session.phase(), Phase::OverlayFadingIn);
    let generation = session.generation();
    assert_eq!(
        effects,
        vec![
            Effect::HideObstructions,
            Effect::HideNavigation,
            Effect::PlaceOverlay(OverlayFrame {
                top: 120.0,
                left: 0.0,
                height: 768.0,
            }),
            Effect::FadeInOverlay {
                generation,
                duration_ms: 400.0,
            },
        ]
    );

    let effects = session.apply(Event::OverlayShown { generation });
    assert_eq!(session.phase(), Phase::ViewerFadingIn);
    assert_eq!(
        effects,
        vec![
            Effect::PlaceViewer(Point {
                left: 312.0,
                top: 379.0,
            }),
            Effect::FadeInViewer {
                generation,
                duration_ms: 400.0,
            },
        ]
    );

    let effects = session.apply(Event::ViewerShown { generation });
    assert_eq!(session.phase(), Phase::CardVisible(0));
    assert_eq!(effects[0], Effect::HideNavigation);
    assert_eq!(presented(&effects), Some(0));
}

#[test]
fn card_waits_for_both_fades() {
    let mut session = session();
    session.apply(Event::Trigger {
        cards: vec!["a"],
        viewport: viewport(),
    });
    let generation = session.generation();
    assert!(session.apply(Event::ViewerShown { generation }).is_empty());
    assert_eq!(session.phase(), Phase::OverlayFadingIn);
    assert!(session.apply(Event::Next).is_empty());
}

#[test]
fn walks_three_cards_forward_and_back() {
    let mut session = session();
    let effects = reveal(&mut session, vec!["A", "B", "C"]);
    assert_eq!(presented(&effects), Some(0));
    assert_eq!(navigation(&effects), Some((false, true)));

    let effects = session.apply(Event::Next);
    assert_eq!(session.current_index(), Some(1));
    assert_eq!(session.card(1), Some(&"B"));
    assert_eq!(navigation(&effects), Some((true, true)));

    let effects = session.apply(Event::Next);
    assert_eq!(session.current_index(), Some(2));
    assert_eq!(navigation(&effects), Some((true, false)));

    let effects = session.apply(Event::Previous);
    assert_eq!(presented(&effects), Some(1));
    assert_eq!(navigation(&effects), Some((true, true)));

    let effects = session.apply(Event::Dismiss);
    assert_eq!(session.phase(), Phase::Hidden);
    assert!(session.cards().is_empty());
    assert_eq!(
        effects,
        vec![
            Effect::HideViewer,
            Effect::ClearContent,
            Effect::FadeOutOverlay { duration_ms: 400.0 },
            Effect::RestoreObstructions,
        ]
    );
}

#[test]
fn navigation_never_leaves_the_card_list() {
    let mut session = session();
    reveal(&mut session, vec!["A", "B"]);
    assert!(session.apply(Event::Previous).is_empty());
    assert_eq!(session.current_index(), Some(0));

    session.apply(Event::Next);
    assert!(session.apply(Event::Next).is_empty());
    assert_eq!(session.current_index(), Some(1));
}

#[test]
fn boundary_controls_for_every_index() {
    for count in 2..6usize {
        let names: Vec<&'static str> = ["a", "b", "c", "d", "e"][..count].to_vec();
        let mut session = session();
        let mut effects = reveal(&mut session, names);
        for index in 0..count {
            assert_eq!(session.current_index(), Some(index));
            assert_eq!(
                navigation(&effects),
                Some((index > 0, index + 1 < count)),
                "count {count}, index {index}"
            );
            effects = session.apply(Event::Next);
        }
    }
}

#[test]
fn single_card_never_shows_navigation() {
    let mut session = session();
    let mut seen = session.apply(Event::Trigger {
        cards: vec!["me"],
        viewport: viewport(),
    });
    let generation = session.generation();
    seen.extend(session.apply(Event::OverlayShown { generation }));
    seen.extend(session.apply(Event::ViewerShown { generation }));
    seen.extend(session.apply(Event::Next));
    seen.extend(session.apply(Event::Previous));
    assert_eq!(session.phase(), Phase::CardVisible(0));
    assert!(navigation(&seen).is_none());
}

#[test]
fn dismiss_then_retrigger_starts_at_zero() {
    let mut session = session();
    reveal(&mut session, vec!["A", "B", "C"]);
    session.apply(Event::Next);
    session.apply(Event::Next);
    session.apply(Event::Dismiss);

    let effects = reveal(&mut session, vec!["A", "B", "C"]);
    assert_eq!(session.phase(), Phase::CardVisible(0));
    assert_eq!(navigation(&effects), Some((false, true)));
}

#[test]
fn stale_completions_are_ignored() {
    let mut session = session();
    session.apply(Event::Trigger {
        cards: vec!["A"],
        viewport: viewport(),
    });
    let stale = session.generation();
    session.apply(Event::Dismiss);
    assert!(session.apply(Event::OverlayShown { generation: stale }).is_empty());

    session.apply(Event::Trigger {
        cards: vec!["A"],
        viewport: viewport(),
    });
    assert_ne!(session.generation(), stale);
    assert!(session.apply(Event::OverlayShown { generation: stale }).is_empty());
    assert_eq!(session.phase(), Phase::OverlayFadingIn);
}

#[test]
fn triggers_during_a_session_are_ignored() {
    let mut session = session();
    reveal(&mut session, vec!["A", "B"]);
    session.apply(Event::Next);
    let generation = session.generation();

    let effects = session.apply(Event::Trigger {
        cards: vec!["X"],
        viewport: viewport(),
    });
    assert!(effects.is_empty());
    assert_eq!(session.generation(), generation);
    assert_eq!(session.current_index(), Some(1));
    assert_eq!(session.cards(), &["A", "B"]);
}

#[test]
fn zero_cards_never_leave_hidden() {
    let mut session = session();
    let effects = session.apply(Event::Trigger {
        cards: Vec::new(),
        viewport: viewport(),
    });
    assert!(effects.is_empty());
    assert_eq!(session.phase(), Phase::Hidden);
}

#[test]
fn dismiss_while_hidden_does_nothing() {
    let mut session = session();
    assert!(session.apply(Event::Dismiss).is_empty());
}

#[test]
fn scroll_moves_overlay_fast_and_viewer_slow() {
    let mut session = session();
    reveal(&mut session, vec!["A"]);
    let effects = session.apply(Event::Scroll(Viewport::new(1024.0, 768.0, 10.0, 500.0)));
    assert_eq!(
        effects,
        vec![
            Effect::MoveOverlay {
                to: Point {
                    left: 10.0,
                    top: 500.0,
                },
                duration_ms: 100.0,
            },
            Effect::MoveViewer {
                to: Point {
                    left: 322.0,
                    top: 759.0,
                },
                duration_ms: 400.0,
            },
        ]
    );
}

#[test]
fn resize_resizes_overlay_and_recenters_viewer() {
    let mut session = session();
    reveal(&mut session, vec!["A"]);
    let effects = session.apply(Event::Resize(Viewport::new(800.0, 600.0, 0.0, 0.0)));
    assert_eq!(
        effects,
        vec![
            Effect::SizeOverlay {
                width: 800.0,
                height: 600.0,
            },
            Effect::MoveViewer {
                to: Point {
                    left: 200.0,
                    top: 175.0,
                },
                duration_ms: 300.0,
            },
        ]
    );
}

#[test]
fn resize_during_overlay_fade_updates_pending_viewer_position() {
    let mut session = session();
    session.apply(Event::Trigger {
        cards: vec!["A"],
        viewport: viewport(),
    });
    let effects = session.apply(Event::Resize(Viewport::new(800.0, 600.0, 0.0, 0.0)));
    assert_eq!(effects.len(), 1);

    let generation = session.generation();
    let effects = session.apply(Event::OverlayShown { generation });
    assert_eq!(
        effects[0],
        Effect::PlaceViewer(Point {
            left: 200.0,
            top: 175.0,
        })
    );
}

#[test]
fn repositioning_is_ignored_while_hidden() {
    let mut session = session();
    assert!(session.apply(Event::Resize(viewport())).is_empty());
    assert!(session.apply(Event::Scroll(viewport())).is_empty());
}

#[test]
fn durations_follow_settings() {
    let overrides = SettingsOverrides::default()
        .overlay("fadeDuration", 0.0)
        .card("fadeDuration", 50.0)
        .card("scrollDuration", 0.0);
    let settings = ResolvedSettings::from_overrides(&overrides).expect("valid");
    let mut session: Session<&'static str> = Session::new(settings);
    let effects = session.apply(Event::Trigger {
        cards: vec!["A"],
        viewport: viewport(),
    });
    assert!(effects.contains(&Effect::FadeInOverlay {
        generation: session.generation(),
        duration_ms: 0.0,
    }));
    let effects = session.apply(Event::OverlayShown {
        generation: session.generation(),
    });
    assert!(effects.contains(&Effect::FadeInViewer {
        generation: session.generation(),
        duration_ms: 50.0,
    }));
}
