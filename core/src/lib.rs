pub mod discovery;
pub mod geometry;
pub mod session;
pub mod settings;
pub mod stylesheet;
pub mod tween;

pub use discovery::{discover_cards, has_class, CardSource, CardTree};
pub use geometry::{overlay_frame, viewer_position, OverlayFrame, Point, Viewport};
pub use session::{Effect, Event, Phase, Session};
pub use settings::{
    CardSettings, Namespace, OverlaySettings, ResolvedSettings, SettingValue, Settings,
    SettingsError, SettingsOverrides, Timing,
};
pub use stylesheet::default_stylesheet;
pub use tween::{swing, Tween};
