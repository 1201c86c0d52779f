use std::fmt;

use crate::descriptor::model::{
    ANCHOR_TARGET, Cue, Fill, STYLE_TOKEN_PACE, SceneDescriptor, is_connector_target,
};
use crate::descriptor::registry::{TemplateFamily, TemplateRegistry};
use crate::schedule::beat::Pace;

/// Longest `fill.texts` value (in chars) before an overflow warning.
pub const MAX_TEXT_LEN: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// How serious an accumulated issue is.
pub enum Severity {
    /// Blocks activation of the descriptor.
    Error,
    /// Surfaced to the author, never blocks.
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Category of an accumulated issue.
pub enum IssueKind {
    /// Required field missing or carrying an out-of-range value.
    Schema,
    /// Cue pointing at a slot the fill does not provide.
    Reference,
    /// Time value the resolver will clamp rather than honor.
    Timing,
    /// `template_id` absent from the registry.
    Template,
    /// Content that likely exceeds its slot's capacity.
    Overflow,
}

impl IssueKind {
    /// Stable lowercase name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Reference => "reference",
            Self::Timing => "timing",
            Self::Template => "template",
            Self::Overflow => "overflow",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One finding from [`validate`].
///
/// Issues accumulate; a single pass reports everything wrong with a
/// descriptor instead of stopping at the first problem.
pub struct Issue {
    /// Category.
    pub kind: IssueKind,
    /// Whether this finding blocks activation.
    pub severity: Severity,
    /// Index into `timeline` when the finding concerns one cue.
    pub cue_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    /// Build a blocking issue.
    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            cue_index: None,
            message: message.into(),
        }
    }

    /// Build a non-blocking issue.
    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            cue_index: None,
            message: message.into(),
        }
    }

    /// Pin the issue to one timeline entry.
    pub fn at_cue(mut self, index: usize) -> Self {
        self.cue_index = Some(index);
        self
    }

    /// True when this issue alone prevents activation.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cue_index {
            Some(i) => write!(f, "timeline[{i}]: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// True when any accumulated issue blocks activation.
///
/// Warnings alone never block; a descriptor with only warnings plays with
/// clamped or fallback behavior.
pub fn issues_block_activation(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_blocking)
}

#[tracing::instrument(skip(descriptor, registry))]
/// Check one descriptor against `registry` and accumulate every finding.
///
/// Never fails on content: the return value is the complete issue list for
/// this descriptor, in a deterministic order (boundary defects, then scalar
/// and container fields, then timeline entries by index, then fill content,
/// then style tokens). An empty list means the descriptor is clean.
pub fn validate(descriptor: &SceneDescriptor, registry: &TemplateRegistry) -> Vec<Issue> {
    let mut issues = Vec::new();

    // Fields the lenient boundary could not type. A defective field holds
    // its default, so the value checks below stay quiet about it.
    for defect in &descriptor.defects {
        issues.push(Issue::error(
            IssueKind::Schema,
            format!("{}: {}", defect.field, defect.message),
        ));
    }
    let defective = |field: &str| descriptor.defects.iter().any(|d| d.field == field);

    // Required scalars.
    if descriptor.template_id.is_empty() {
        if !defective("template_id") {
            issues.push(Issue::error(IssueKind::Schema, "template_id is required"));
        }
    } else if !registry.contains(&descriptor.template_id) {
        let known: Vec<&str> = registry.ids().collect();
        issues.push(Issue::error(
            IssueKind::Template,
            format!(
                "unknown template_id \"{}\" (known templates: {})",
                descriptor.template_id,
                known.join(", ")
            ),
        ));
    }

    let duration_ok = descriptor.duration_s.is_finite() && descriptor.duration_s > 0.0;
    if !duration_ok && !defective("duration_s") {
        issues.push(Issue::error(
            IssueKind::Schema,
            "duration_s must be finite and > 0",
        ));
    }
    let fps_ok = descriptor.fps.is_finite() && descriptor.fps > 0.0;
    if !fps_ok && !defective("fps") {
        issues.push(Issue::error(IssueKind::Schema, "fps must be finite and > 0"));
    }

    // Required containers. Both may be empty, but they must be there.
    if descriptor.fill.is_none() {
        issues.push(Issue::error(IssueKind::Schema, "fill is required"));
    }
    if descriptor.timeline.is_none() {
        issues.push(Issue::error(IssueKind::Schema, "timeline is required"));
    }

    let no_fill = Fill::default();
    let fill = descriptor.fill.as_ref().unwrap_or(&no_fill);

    // Timeline entries, in authored order.
    let scene_end_secs = if duration_ok { descriptor.duration_s } else { f64::MAX };
    for (i, cue) in descriptor.timeline.iter().flatten().enumerate() {
        validate_cue(cue, i, fill, scene_end_secs, &mut issues);
    }

    // Fill content capacity.
    for (key, text) in &fill.texts {
        let chars = text.chars().count();
        if chars > MAX_TEXT_LEN {
            issues.push(Issue::warning(
                IssueKind::Overflow,
                format!("fill.texts[\"{key}\"] is {chars} chars; may overflow its slot"),
            ));
        }
    }

    // Beat-driven templates need something to reveal. A missing fill is
    // already reported above.
    if let Some(info) = registry.get(&descriptor.template_id)
        && info.family == TemplateFamily::BeatDriven
        && let Some(fill) = &descriptor.fill
        && fill.sequence().is_empty()
    {
        issues.push(Issue::error(
            IssueKind::Schema,
            format!(
                "fill provides no elements for beat-driven template \"{}\"",
                descriptor.template_id
            ),
        ));
    }

    // Pace token.
    if let Some(value) = descriptor.style_tokens.get(STYLE_TOKEN_PACE) {
        let known = value.as_str().is_some_and(Pace::is_known_token);
        if !known {
            issues.push(Issue::warning(
                IssueKind::Schema,
                format!("unknown style_tokens.pace {value}; using \"normal\""),
            ));
        }
    }

    for issue in &issues {
        tracing::debug!(kind = issue.kind.as_str(), "{issue}");
    }
    tracing::debug!(issues = issues.len(), "validated scene descriptor");
    issues
}

fn validate_cue(
    cue: &Cue,
    index: usize,
    fill: &Fill,
    scene_end_secs: f64,
    issues: &mut Vec<Issue>,
) {
    if cue.action.is_none() {
        issues.push(Issue::error(IssueKind::Schema, "cue is missing \"action\"").at_cue(index));
    }
    if cue.t.is_none() {
        issues.push(Issue::error(IssueKind::Schema, "cue is missing \"t\"").at_cue(index));
    }

    if let Some(t) = cue.t {
        if !t.is_finite() {
            issues.push(
                Issue::warning(IssueKind::Timing, "t must be finite; treated as 0").at_cue(index),
            );
        } else if t < 0.0 {
            issues.push(
                Issue::warning(IssueKind::Timing, format!("t is {t}; clamps to 0")).at_cue(index),
            );
        } else if t >= scene_end_secs {
            issues.push(
                Issue::warning(
                    IssueKind::Timing,
                    format!("t is {t}s but the scene ends at {scene_end_secs}s"),
                )
                .at_cue(index),
            );
        } else if t.max(0.0) + cue.duration_secs() > scene_end_secs {
            issues.push(
                Issue::warning(
                    IssueKind::Timing,
                    "reveal window extends past the scene end; progress clamps there",
                )
                .at_cue(index),
            );
        }
    }

    if let Some(d) = cue.duration
        && !(d.is_finite() && d > 0.0)
    {
        issues.push(
            Issue::warning(
                IssueKind::Timing,
                "duration must be finite and > 0; reveal collapses to a step",
            )
            .at_cue(index),
        );
    }

    for (field, value) in [("target", &cue.target), ("from", &cue.from)] {
        if let Some(name) = value {
            if name == ANCHOR_TARGET || is_connector_target(name) {
                continue;
            }
            if !fill.contains_key(name) {
                issues.push(
                    Issue::error(
                        IssueKind::Reference,
                        format!("unknown {field} \"{name}\" (no matching fill slot)"),
                    )
                    .at_cue(index),
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/descriptor/validate.rs"]
mod tests;
