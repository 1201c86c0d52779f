use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::CanvasSize,
    foundation::error::{CueframeError, CueframeResult},
    schedule::beat::Pace,
};

/// Reserved cue target naming the template's fixed anchor slot rather than a
/// fill key. Always considered resolvable.
pub const ANCHOR_TARGET: &str = "anchor";

/// Substring marking a connector target of the form `"a->b"`. Connector
/// endpoints are template concerns, so the whole token bypasses fill lookup.
pub const CONNECTOR_SEPARATOR: &str = "->";

/// Reveal window length in seconds applied when a cue omits `duration`.
pub const DEFAULT_CUE_DURATION_SECS: f64 = 1.0;

/// `style_tokens` key carrying the scene's pacing word.
pub const STYLE_TOKEN_PACE: &str = "pace";

/// True when a cue target token routes to a connector instead of a fill slot.
pub fn is_connector_target(value: &str) -> bool {
    value.contains(CONNECTOR_SEPARATOR)
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One scene's declarative content, style and timing.
///
/// This is the JSON-facing, human-edited boundary object. Parsing is
/// deliberately lenient: absent fields load as defaults or `None`, and a
/// wrong-typed field falls back to its default with the mismatch recorded,
/// so content problems surface as accumulated [`crate::Issue`] values from
/// [`crate::validate`] instead of parse errors. Only unparseable JSON fails
/// outright.
pub struct SceneDescriptor {
    /// Authoring schema revision tag; opaque to the engine.
    #[serde(default)]
    pub schema_version: String,
    /// Template the renderer will select; must name a registered template.
    #[serde(default)]
    pub template_id: String,
    /// Declared scene length in seconds.
    #[serde(default)]
    pub duration_s: f64,
    /// Declared frame rate in frames per second.
    #[serde(default)]
    pub fps: f64,
    /// Authoring metadata; opaque to the engine.
    #[serde(default)]
    pub meta: Meta,
    /// Style token table passed through to the renderer untouched, except
    /// for [`STYLE_TOKEN_PACE`] which the beat scheduler consumes.
    #[serde(default)]
    pub style_tokens: BTreeMap<String, serde_json::Value>,
    /// Canvas dimensions plus template-specific layout payload.
    #[serde(default)]
    pub layout: Layout,
    /// Content slots that cues may target. `None` when the descriptor never
    /// provided the object; the validator reports the absence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    /// Ordered visual cue list. Beat-driven templates may leave it empty and
    /// have their timeline synthesized at load, but it must be present; the
    /// validator reports `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<Cue>>,
    /// Fields the lenient constructors could not type.
    #[serde(skip)]
    pub(crate) defects: Vec<FieldDefect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A field the lenient constructors could not deserialize, recorded so
/// [`crate::validate`] can report it as a schema issue.
pub(crate) struct FieldDefect {
    /// Top-level descriptor field name, or `"$"` for the document itself.
    pub field: &'static str,
    /// What went wrong, in serde's words.
    pub message: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Title and tags shown by authoring surfaces.
pub struct Meta {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Canvas dimensions plus whatever layout payload the template consumes.
pub struct Layout {
    /// Output canvas in authored units.
    #[serde(default)]
    pub canvas: CanvasSize,
    /// Template-specific layout fields, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Content slots a cue's `target` or `from` may reference.
pub struct Fill {
    /// Text slots keyed by stable names.
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
    /// Image slots keyed by stable names.
    #[serde(default)]
    pub images: BTreeMap<String, String>,
    /// Template-specific nested payloads, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Fill {
    /// True when `key` names a text or image slot.
    pub fn contains_key(&self, key: &str) -> bool {
        self.texts.contains_key(key) || self.images.contains_key(key)
    }

    /// Element keys in reveal order for beat-driven templates: the explicit
    /// `sequence` array when the descriptor provides one, otherwise text slot
    /// keys in sorted order. Non-string entries in `sequence` are skipped.
    pub fn sequence(&self) -> Vec<String> {
        if let Some(serde_json::Value::Array(items)) = self.extra.get("sequence") {
            return items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect();
        }
        self.texts.keys().cloned().collect()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One timeline entry: an action tag bound to a start time, with an optional
/// reveal window and target slot.
pub struct Cue {
    /// Start time in seconds from scene start. `None` only in drafts; the
    /// validator reports it and resolution treats it as `0`.
    #[serde(default)]
    pub t: Option<f64>,
    /// Action tag, e.g. `"reveal"` or `"underline"`. `None` only in drafts.
    #[serde(default)]
    pub action: Option<String>,
    /// Slot this cue animates; `None` addresses the scene as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Slot the action originates from (connector draws, morphs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Reveal window length in seconds; [`DEFAULT_CUE_DURATION_SECS`] when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Cue {
    /// Build a cue with the two required fields set.
    pub fn new(t: f64, action: impl Into<String>) -> Self {
        Self {
            t: Some(t),
            action: Some(action.into()),
            target: None,
            from: None,
            duration: None,
        }
    }

    /// Attach a target slot.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Attach an explicit reveal window length in seconds.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Effective start in seconds: missing or negative `t` clamps to `0`.
    pub fn start_secs(&self) -> f64 {
        let t = self.t.unwrap_or(0.0);
        if t.is_finite() { t.max(0.0) } else { 0.0 }
    }

    /// Effective reveal window in seconds. Absent durations take the engine
    /// default; zero, negative or non-finite authored values collapse to `0`
    /// (an instantaneous step at the start frame).
    pub fn duration_secs(&self) -> f64 {
        match self.duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(_) => 0.0,
            None => DEFAULT_CUE_DURATION_SECS,
        }
    }

    /// True when this cue carries `action` aimed at exactly `target`.
    /// A `None` request matches only cues without a target.
    pub fn matches(&self, action: &str, target: Option<&str>) -> bool {
        self.action.as_deref() == Some(action) && self.target.as_deref() == target
    }
}

/// Deserialize one top-level field, falling back to the default and recording
/// a defect when the authored value has the wrong shape.
fn lenient_field<T>(
    field: &'static str,
    value: serde_json::Value,
    defects: &mut Vec<FieldDefect>,
) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    serde_json::from_value(value).unwrap_or_else(|e| {
        defects.push(FieldDefect {
            field,
            message: e.to_string(),
        });
        T::default()
    })
}

impl SceneDescriptor {
    /// Parse a scene descriptor from JSON text.
    ///
    /// Fails only on unparseable JSON. Wrong-typed fields fall back to their
    /// defaults and are left for [`crate::validate`] to report alongside the
    /// other content problems.
    pub fn from_json_str(s: &str) -> CueframeResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| CueframeError::structural(format!("parse scene descriptor JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Load a scene descriptor from an already-parsed JSON value.
    ///
    /// Any value loads: each field is typed independently, so one mistyped
    /// field never hides the rest of the descriptor. The mismatches surface
    /// as schema issues from [`crate::validate`].
    pub fn from_value(value: serde_json::Value) -> CueframeResult<Self> {
        let serde_json::Value::Object(mut fields) = value else {
            return Ok(Self {
                defects: vec![FieldDefect {
                    field: "$",
                    message: "descriptor must be a JSON object".to_owned(),
                }],
                ..Self::default()
            });
        };
        let mut defects = Vec::new();
        Ok(Self {
            schema_version: fields
                .remove("schema_version")
                .map(|v| lenient_field("schema_version", v, &mut defects))
                .unwrap_or_default(),
            template_id: fields
                .remove("template_id")
                .map(|v| lenient_field("template_id", v, &mut defects))
                .unwrap_or_default(),
            duration_s: fields
                .remove("duration_s")
                .map(|v| lenient_field("duration_s", v, &mut defects))
                .unwrap_or_default(),
            fps: fields
                .remove("fps")
                .map(|v| lenient_field("fps", v, &mut defects))
                .unwrap_or_default(),
            meta: fields
                .remove("meta")
                .map(|v| lenient_field("meta", v, &mut defects))
                .unwrap_or_default(),
            style_tokens: fields
                .remove("style_tokens")
                .map(|v| lenient_field("style_tokens", v, &mut defects))
                .unwrap_or_default(),
            layout: fields
                .remove("layout")
                .map(|v| lenient_field("layout", v, &mut defects))
                .unwrap_or_default(),
            fill: fields
                .remove("fill")
                .map(|v| lenient_field("fill", v, &mut defects)),
            timeline: fields
                .remove("timeline")
                .map(|v| lenient_field("timeline", v, &mut defects)),
            defects,
        })
    }

    /// Parse a scene descriptor from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CueframeResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| CueframeError::structural(format!("parse scene descriptor JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Parse a scene descriptor from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CueframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CueframeError::structural(format!("open scene descriptor '{}': {e}", path.display()))
        })?;
        let r = BufReader::new(f);
        Self::from_reader(r)
    }

    /// Pacing word resolved from `style_tokens.pace`; unknown or missing
    /// tokens fall back to [`Pace::Normal`].
    pub fn pace(&self) -> Pace {
        let token = self
            .style_tokens
            .get(STYLE_TOKEN_PACE)
            .and_then(|v| v.as_str());
        Pace::from_token(token)
    }

    /// Declared scene length in whole frames, `0` when `duration_s` or `fps`
    /// is not a positive finite number. The validator reports those cases.
    pub fn duration_frames(&self) -> u64 {
        if self.duration_s.is_finite()
            && self.duration_s > 0.0
            && self.fps.is_finite()
            && self.fps > 0.0
        {
            (self.duration_s * self.fps).floor() as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/descriptor/model.rs"]
mod tests;
