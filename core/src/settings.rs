use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{OverlayFrame, Point};

pub const OVERLAY_NAMESPACE: &str = "overlay";
pub const CARD_NAMESPACE: &str = "card";

pub const DEFAULT_OVERLAY_ID: &str = "overlay";
pub const DEFAULT_CARD_ID: &str = "reveal";
pub const DEFAULT_CARD_MARKER: &str = "vcard";
pub const DEFAULT_OBSTRUCTIONS: &str = "select, embed, object";

pub const DEFAULT_FADE_MS: f64 = 400.0;
pub const DEFAULT_RESIZE_MS: f64 = 300.0;
pub const DEFAULT_OVERLAY_SCROLL_MS: f64 = 100.0;
pub const DEFAULT_CARD_SCROLL_MS: f64 = 400.0;

const UNITLESS_PROPERTIES: &[&str] = &["opacity", "z-index", "-moz-opacity"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(f64),
    Text(String),
    /// Any other JSON value. Kept so unknown keys survive a merge; a known key
    /// holding one fails to resolve.
    Other(serde_json::Value),
}

impl SettingValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(value) => Some(*value),
            SettingValue::Text(raw) => raw.trim().parse::<f64>().ok(),
            SettingValue::Flag(_) | SettingValue::Other(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(value) => Some(*value),
            SettingValue::Text(raw) => match raw.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            SettingValue::Number(_) | SettingValue::Other(_) => None,
        }
    }

    /// Text form of a scalar; `None` for [`SettingValue::Other`].
    pub fn as_scalar_text(&self) -> Option<String> {
        match self {
            SettingValue::Other(_) => None,
            scalar => Some(scalar.as_text()),
        }
    }

    /// A JSON `null` stands for a key that was not given.
    pub fn is_absent(&self) -> bool {
        matches!(self, SettingValue::Other(serde_json::Value::Null))
    }

    pub fn as_text(&self) -> String {
        match self {
            SettingValue::Text(raw) => raw.clone(),
            SettingValue::Number(value) => fmt_number(*value),
            SettingValue::Flag(value) => value.to_string(),
            SettingValue::Other(value) => value.to_string(),
        }
    }

    /// Bare numbers become pixel lengths unless the property is unitless.
    pub fn to_css(&self, property: &str) -> String {
        match self {
            SettingValue::Number(value) if !UNITLESS_PROPERTIES.contains(&property) => {
                format!("{}px", fmt_number(*value))
            }
            other => other.as_text(),
        }
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

pub type Namespace = BTreeMap<String, SettingValue>;

/// Caller-supplied partial settings. Either namespace may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOverrides")]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Namespace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Namespace>,
}

/// Options as written by the caller. `hcard` is the older name of `card`;
/// when both are present their keys are combined and `card` wins.
#[derive(Deserialize)]
struct RawOverrides {
    #[serde(default)]
    overlay: Option<Namespace>,
    #[serde(default)]
    card: Option<Namespace>,
    #[serde(default)]
    hcard: Option<Namespace>,
}

impl From<RawOverrides> for SettingsOverrides {
    fn from(raw: RawOverrides) -> Self {
        let card = match (raw.hcard, raw.card) {
            (Some(mut legacy), Some(card)) => {
                legacy.extend(card);
                Some(legacy)
            }
            (legacy, card) => card.or(legacy),
        };
        Self {
            overlay: raw.overlay,
            card,
        }
    }
}

impl SettingsOverrides {
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed).map_err(|err| SettingsError::Malformed(err.to_string()))
    }

    pub fn overlay(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.overlay
            .get_or_insert_with(Namespace::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn card(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.card
            .get_or_insert_with(Namespace::new)
            .insert(key.to_string(), value.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub overlay: Namespace,
    pub card: Namespace,
}

impl Settings {
    pub fn defaults() -> Self {
        let overlay = namespace(&[
            ("id", DEFAULT_OVERLAY_ID.into()),
            ("top", 0.0.into()),
            ("left", 0.0.into()),
            ("margin", 0.0.into()),
            ("padding", 0.0.into()),
            ("width", "100%".into()),
            ("background-color", "#210".into()),
            ("opacity", ".9".into()),
            ("z-index", 99.0.into()),
            ("fadeDuration", DEFAULT_FADE_MS.into()),
            ("fadeOutDuration", DEFAULT_FADE_MS.into()),
            ("scrollDuration", DEFAULT_OVERLAY_SCROLL_MS.into()),
            ("obstructions", DEFAULT_OBSTRUCTIONS.into()),
        ]);
        let card = namespace(&[
            ("id", DEFAULT_CARD_ID.into()),
            ("position", "absolute".into()),
            ("width", 400.0.into()),
            ("height", 250.0.into()),
            ("background-color", "#333".into()),
            ("border-style", "solid".into()),
            ("border-color", "#777".into()),
            ("border-width", "12px".into()),
            ("z-index", 100.0.into()),
            ("addStyle", true.into()),
            ("nextCardTitle", "Next".into()),
            ("previousCardTitle", "Previous".into()),
            ("marker", DEFAULT_CARD_MARKER.into()),
            ("fadeDuration", DEFAULT_FADE_MS.into()),
            ("resizeDuration", DEFAULT_RESIZE_MS.into()),
            ("scrollDuration", DEFAULT_CARD_SCROLL_MS.into()),
        ]);
        Self { overlay, card }
    }

    /// Layers `previous`, the built-in defaults and `overrides`, key by key
    /// within each namespace. Later layers win.
    pub fn merge(previous: &Settings, overrides: &SettingsOverrides) -> Settings {
        let defaults = Settings::defaults();
        Settings {
            overlay: merge_namespace(
                &previous.overlay,
                &defaults.overlay,
                overrides.overlay.as_ref(),
            ),
            card: merge_namespace(&previous.card, &defaults.card, overrides.card.as_ref()),
        }
    }

    pub fn from_overrides(overrides: &SettingsOverrides) -> Settings {
        Settings::merge(&Settings::default(), overrides)
    }
}

fn namespace(entries: &[(&str, SettingValue)]) -> Namespace {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn merge_namespace(
    previous: &Namespace,
    defaults: &Namespace,
    overrides: Option<&Namespace>,
) -> Namespace {
    let mut merged = previous.clone();
    merged.extend(defaults.iter().map(|(k, v)| (k.clone(), v.clone())));
    if let Some(overrides) = overrides {
        merged.extend(
            overrides
                .iter()
                .filter(|(_, v)| !v.is_absent())
                .map(|(k, v)| (k.clone(), v.clone())),
        );
    }
    merged
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    Malformed(String),
    InvalidValue {
        namespace: &'static str,
        key: &'static str,
        expected: &'static str,
    },
    EmptyId { namespace: &'static str },
    DuplicateId(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Malformed(detail) => write!(f, "malformed options: {detail}"),
            SettingsError::InvalidValue {
                namespace,
                key,
                expected,
            } => write!(f, "{namespace}.{key} must be a {expected}"),
            SettingsError::EmptyId { namespace } => write!(f, "{namespace}.id must not be empty"),
            SettingsError::DuplicateId(id) => {
                write!(f, "overlay and card share the element id '{id}'")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySettings {
    pub id: String,
    pub width: SettingValue,
    pub margin: SettingValue,
    pub padding: SettingValue,
    pub background_color: String,
    pub opacity: f64,
    pub z_index: SettingValue,
    pub obstructions: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardSettings {
    pub id: String,
    pub position: String,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    pub border_style: String,
    pub border_color: String,
    pub border_width: SettingValue,
    pub z_index: SettingValue,
    pub add_style: bool,
    pub next_title: String,
    pub previous_title: String,
    pub marker: String,
}

/// Animation durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub overlay_fade_in: f64,
    pub overlay_fade_out: f64,
    pub overlay_scroll: f64,
    pub card_fade_in: f64,
    pub card_resize: f64,
    pub card_scroll: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSettings {
    pub overlay: OverlaySettings,
    pub card: CardSettings,
    pub timing: Timing,
}

impl ResolvedSettings {
    pub fn resolve(settings: &Settings) -> Result<Self, SettingsError> {
        let overlay = Reader::new(OVERLAY_NAMESPACE, &settings.overlay);
        let card = Reader::new(CARD_NAMESPACE, &settings.card);

        let overlay_settings = OverlaySettings {
            id: overlay.id()?,
            width: overlay.value("width")?,
            margin: overlay.value("margin")?,
            padding: overlay.value("padding")?,
            background_color: overlay.text("background-color")?,
            opacity: overlay.number("opacity")?.clamp(0.0, 1.0),
            z_index: overlay.value("z-index")?,
            obstructions: overlay.text("obstructions")?,
        };
        let card_settings = CardSettings {
            id: card.id()?,
            position: card.text("position")?,
            width: card.number("width")?,
            height: card.number("height")?,
            background_color: card.text("background-color")?,
            border_style: card.text("border-style")?,
            border_color: card.text("border-color")?,
            border_width: card.value("border-width")?,
            z_index: card.value("z-index")?,
            add_style: card.flag("addStyle")?,
            next_title: card.text("nextCardTitle")?,
            previous_title: card.text("previousCardTitle")?,
            marker: card.text("marker")?.trim().to_string(),
        };
        if card_settings.marker.is_empty() {
            return Err(SettingsError::InvalidValue {
                namespace: CARD_NAMESPACE,
                key: "marker",
                expected: "non-empty class name",
            });
        }
        if overlay_settings.id == card_settings.id {
            return Err(SettingsError::DuplicateId(card_settings.id));
        }
        let timing = Timing {
            overlay_fade_in: overlay.duration("fadeDuration")?,
            overlay_fade_out: overlay.duration("fadeOutDuration")?,
            overlay_scroll: overlay.duration("scrollDuration")?,
            card_fade_in: card.duration("fadeDuration")?,
            card_resize: card.duration("resizeDuration")?,
            card_scroll: card.duration("scrollDuration")?,
        };
        Ok(Self {
            overlay: overlay_settings,
            card: card_settings,
            timing,
        })
    }

    pub fn from_overrides(overrides: &SettingsOverrides) -> Result<Self, SettingsError> {
        Self::resolve(&Settings::from_overrides(overrides))
    }

    pub fn stylesheet_id(&self) -> String {
        format!("{}-style", self.card.id)
    }

    pub fn overlay_css(&self, frame: &OverlayFrame) -> Vec<(String, String)> {
        let overlay = &self.overlay;
        let opacity = fmt_number(overlay.opacity);
        vec![
            css("position", "absolute"),
            css("top", format!("{}px", fmt_number(frame.top))),
            css("left", format!("{}px", fmt_number(frame.left))),
            css("z-index", overlay.z_index.to_css("z-index")),
            css("width", overlay.width.to_css("width")),
            css("height", format!("{}px", fmt_number(frame.height))),
            css("margin", overlay.margin.to_css("margin")),
            css("padding", overlay.padding.to_css("padding")),
            css("background-color", &overlay.background_color),
            css("-moz-opacity", &opacity),
            css("opacity", &opacity),
            css(
                "filter",
                format!("alpha(opacity={})", (overlay.opacity * 100.0).round()),
            ),
        ]
    }

    pub fn viewer_css(&self, position: &Point) -> Vec<(String, String)> {
        let card = &self.card;
        vec![
            css("position", &card.position),
            css("left", format!("{}px", fmt_number(position.left))),
            css("top", format!("{}px", fmt_number(position.top))),
            css("z-index", card.z_index.to_css("z-index")),
            css("width", format!("{}px", fmt_number(card.width))),
            css("height", format!("{}px", fmt_number(card.height))),
            css("background-color", &card.background_color),
            css("border-style", &card.border_style),
            css("border-color", &card.border_color),
            css("border-width", card.border_width.to_css("border-width")),
        ]
    }
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        // The built-in defaults always resolve.
        match Self::resolve(&Settings::defaults()) {
            Ok(resolved) => resolved,
            Err(err) => unreachable!("built-in defaults rejected: {err}"),
        }
    }
}

fn css(property: &str, value: impl Into<String>) -> (String, String) {
    (property.to_string(), value.into())
}

struct Reader<'a> {
    namespace: &'static str,
    values: &'a Namespace,
}

impl<'a> Reader<'a> {
    fn new(namespace: &'static str, values: &'a Namespace) -> Self {
        Self { namespace, values }
    }

    fn invalid(&self, key: &'static str, expected: &'static str) -> SettingsError {
        SettingsError::InvalidValue {
            namespace: self.namespace,
            key,
            expected,
        }
    }

    fn value(&self, key: &'static str) -> Result<SettingValue, SettingsError> {
        match self.values.get(key) {
            Some(SettingValue::Other(_)) | None => Err(self.invalid(key, "string or number")),
            Some(value) => Ok(value.clone()),
        }
    }

    fn text(&self, key: &'static str) -> Result<String, SettingsError> {
        self.values
            .get(key)
            .and_then(SettingValue::as_scalar_text)
            .ok_or_else(|| self.invalid(key, "string"))
    }

    fn number(&self, key: &'static str) -> Result<f64, SettingsError> {
        self.value(key)?
            .as_number()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.invalid(key, "number"))
    }

    fn duration(&self, key: &'static str) -> Result<f64, SettingsError> {
        let value = self.number(key)?;
        if value < 0.0 {
            return Err(self.invalid(key, "non-negative number"));
        }
        Ok(value)
    }

    fn flag(&self, key: &'static str) -> Result<bool, SettingsError> {
        self.value(key)?
            .as_flag()
            .ok_or_else(|| self.invalid(key, "boolean"))
    }

    fn id(&self) -> Result<String, SettingsError> {
        let id = self.text("id")?.trim().to_string();
        if id.is_empty() {
            return Err(SettingsError::EmptyId {
                namespace: self.namespace,
            });
        }
        Ok(id)
    }
}

pub fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
