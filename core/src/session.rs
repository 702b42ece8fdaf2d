use crate::geometry::{overlay_frame, overlay_origin, viewer_position, OverlayFrame, Point, Viewport};
use crate::settings::ResolvedSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    OverlayFadingIn,
    ViewerFadingIn,
    CardVisible(usize),
}

/// Inputs to the reveal state machine. `OverlayShown` and `ViewerShown` are
/// animation completions; they carry the generation of the session that
/// started the animation.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<N> {
    Trigger { cards: Vec<N>, viewport: Viewport },
    OverlayShown { generation: u64 },
    ViewerShown { generation: u64 },
    Previous,
    Next,
    Dismiss,
    Resize(Viewport),
    Scroll(Viewport),
}

/// DOM work requested by a transition, in execution order.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    HideObstructions,
    RestoreObstructions,
    /// Hides the navigation bar and both controls.
    HideNavigation,
    ShowNavigation { previous: bool, next: bool },
    PlaceOverlay(OverlayFrame),
    FadeInOverlay { generation: u64, duration_ms: f64 },
    PlaceViewer(Point),
    FadeInViewer { generation: u64, duration_ms: f64 },
    /// Clears the content region and fades in a copy of card `index`.
    PresentCard { index: usize, duration_ms: f64 },
    HideViewer,
    ClearContent,
    FadeOutOverlay { duration_ms: f64 },
    SizeOverlay { width: f64, height: f64 },
    MoveOverlay { to: Point, duration_ms: f64 },
    MoveViewer { to: Point, duration_ms: f64 },
}

pub struct Session<N> {
    settings: ResolvedSettings,
    phase: Phase,
    cards: Vec<N>,
    generation: u64,
    viewer_at: Point,
}

impl<N> Session<N> {
    pub fn new(settings: ResolvedSettings) -> Self {
        Self {
            settings,
            phase: Phase::Hidden,
            cards: Vec::new(),
            generation: 0,
            viewer_at: Point::default(),
        }
    }

    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Hidden
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cards(&self) -> &[N] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&N> {
        self.cards.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            Phase::CardVisible(index) => Some(index),
            _ => None,
        }
    }

    /// Advances the machine. Events that make no sense in the current phase
    /// (a trigger during an active session, a stale animation completion,
    /// navigation past either end) are dropped and yield no effects.
    pub fn apply(&mut self, event: Event<N>) -> Vec<Effect> {
        match event {
            Event::Trigger { cards, viewport } => self.start(cards, viewport),
            Event::OverlayShown { generation } => {
                if self.phase != Phase::OverlayFadingIn || generation != self.generation {
                    return Vec::new();
                }
                self.phase = Phase::ViewerFadingIn;
                vec![
                    Effect::PlaceViewer(self.viewer_at),
                    Effect::FadeInViewer {
                        generation,
                        duration_ms: self.settings.timing.card_fade_in,
                    },
                ]
            }
            Event::ViewerShown { generation } => {
                if self.phase != Phase::ViewerFadingIn || generation != self.generation {
                    return Vec::new();
                }
                self.present(0)
            }
            Event::Previous => match self.phase {
                Phase::CardVisible(index) if index > 0 => self.present(index - 1),
                _ => Vec::new(),
            },
            Event::Next => match self.phase {
                Phase::CardVisible(index) if index + 1 < self.cards.len() => {
                    self.present(index + 1)
                }
                _ => Vec::new(),
            },
            Event::Dismiss => self.dismiss(),
            Event::Resize(viewport) => self.resize(viewport),
            Event::Scroll(viewport) => self.scroll(viewport),
        }
    }

    fn start(&mut self, cards: Vec<N>, viewport: Viewport) -> Vec<Effect> {
        if self.is_active() || cards.is_empty() {
            return Vec::new();
        }
        self.generation = self.generation.wrapping_add(1);
        self.cards = cards;
        self.phase = Phase::OverlayFadingIn;
        self.viewer_at = self.centered(&viewport);
        vec![
            Effect::HideObstructions,
            Effect::HideNavigation,
            Effect::PlaceOverlay(overlay_frame(&viewport)),
            Effect::FadeInOverlay {
                generation: self.generation,
                duration_ms: self.settings.timing.overlay_fade_in,
            },
        ]
    }

    fn present(&mut self, index: usize) -> Vec<Effect> {
        self.phase = Phase::CardVisible(index);
        let mut effects = vec![
            Effect::HideNavigation,
            Effect::PresentCard {
                index,
                duration_ms: self.settings.timing.card_fade_in,
            },
        ];
        let count = self.cards.len();
        if count > 1 {
            effects.push(Effect::ShowNavigation {
                previous: index >= 1,
                next: index + 1 < count,
            });
        }
        effects
    }

    fn dismiss(&mut self) -> Vec<Effect> {
        if !self.is_active() {
            return Vec::new();
        }
        self.phase = Phase::Hidden;
        self.cards.clear();
        vec![
            Effect::HideViewer,
            Effect::ClearContent,
            Effect::FadeOutOverlay {
                duration_ms: self.settings.timing.overlay_fade_out,
            },
            Effect::RestoreObstructions,
        ]
    }

    fn resize(&mut self, viewport: Viewport) -> Vec<Effect> {
        if !self.is_active() {
            return Vec::new();
        }
        self.viewer_at = self.centered(&viewport);
        let mut effects = vec![Effect::SizeOverlay {
            width: viewport.width,
            height: viewport.height,
        }];
        if self.phase != Phase::OverlayFadingIn {
            effects.push(Effect::MoveViewer {
                to: self.viewer_at,
                duration_ms: self.settings.timing.card_resize,
            });
        }
        effects
    }

    fn scroll(&mut self, viewport: Viewport) -> Vec<Effect> {
        if !self.is_active() {
            return Vec::new();
        }
        self.viewer_at = self.centered(&viewport);
        let mut effects = vec![Effect::MoveOverlay {
            to: overlay_origin(&viewport),
            duration_ms: self.settings.timing.overlay_scroll,
        }];
        if self.phase != Phase::OverlayFadingIn {
            effects.push(Effect::MoveViewer {
                to: self.viewer_at,
                duration_ms: self.settings.timing.card_scroll,
            });
        }
        effects
    }

    fn centered(&self, viewport: &Viewport) -> Point {
        viewer_position(viewport, self.settings.card.width, self.settings.card.height)
    }
}
