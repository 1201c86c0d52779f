use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::schedule::beat::StaggerMode;
use crate::timeline::ease::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Which timing family a template belongs to.
pub enum TemplateFamily {
    /// Timing comes from the authored `timeline` cue list.
    CueDriven,
    /// Timing is synthesized at load from the fill element list and the
    /// template's [`BeatPlan`].
    BeatDriven,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Declarative beat configuration for a beat-driven template.
pub struct BeatPlan {
    /// Beats before the first element starts.
    pub base_beats: f64,
    /// Beats between successive element starts; read in
    /// [`StaggerMode::FixedStride`] only.
    pub stride_beats: f64,
    /// How element start frames are spaced.
    pub mode: StaggerMode,
    /// Build-in window length in beats.
    pub build_in_beats: f64,
    /// Entrance curve applied over the build-in window.
    pub entrance: Ease,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Static metadata for one registered template.
pub struct TemplateInfo {
    /// Stable identifier matched against `template_id`.
    pub id: &'static str,
    /// Short description for authoring surfaces.
    pub description: &'static str,
    /// Timing family.
    pub family: TemplateFamily,
    /// Beat configuration; always `Some` for beat-driven templates.
    pub beats: Option<BeatPlan>,
}

/// Global template table - lazily initialized, immutable afterwards.
static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();

/// Table of templates the engine can activate descriptors against.
///
/// Keyed by stable ids so iteration order is deterministic; validator
/// messages list ids in this order.
pub struct TemplateRegistry {
    templates: BTreeMap<&'static str, TemplateInfo>,
}

impl TemplateRegistry {
    /// The built-in table shared by the whole process.
    pub fn builtin() -> &'static Self {
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let templates = [
            TemplateInfo {
                id: "title_card",
                description: "Opening title with subhead and accent rule",
                family: TemplateFamily::CueDriven,
                beats: None,
            },
            TemplateInfo {
                id: "quote_reveal",
                description: "Quotation with attribution, revealed in passes",
                family: TemplateFamily::CueDriven,
                beats: None,
            },
            TemplateInfo {
                id: "compare_pair",
                description: "Two labeled panels with connector annotations",
                family: TemplateFamily::CueDriven,
                beats: None,
            },
            TemplateInfo {
                id: "diagram_flow",
                description: "Node diagram with drawn connectors",
                family: TemplateFamily::CueDriven,
                beats: None,
            },
            TemplateInfo {
                id: "bullet_list",
                description: "Headline plus bullets revealed on a steady stride",
                family: TemplateFamily::BeatDriven,
                beats: Some(BeatPlan {
                    base_beats: 2.0,
                    stride_beats: 1.5,
                    mode: StaggerMode::FixedStride,
                    build_in_beats: 1.0,
                    entrance: Ease::OutCubic,
                }),
            },
            TemplateInfo {
                id: "icon_grid",
                description: "Icon cells popping in on a tight stride",
                family: TemplateFamily::BeatDriven,
                beats: Some(BeatPlan {
                    base_beats: 2.0,
                    stride_beats: 1.0,
                    mode: StaggerMode::FixedStride,
                    build_in_beats: 0.75,
                    entrance: Ease::OutBack,
                }),
            },
            TemplateInfo {
                id: "fact_stack",
                description: "Stacked facts paced to fill the scene",
                family: TemplateFamily::BeatDriven,
                beats: Some(BeatPlan {
                    base_beats: 1.5,
                    stride_beats: 0.0,
                    mode: StaggerMode::DurationProportional,
                    build_in_beats: 1.0,
                    entrance: Ease::OutCubic,
                }),
            },
            TemplateInfo {
                id: "step_sequence",
                description: "Numbered steps paced to fill the scene",
                family: TemplateFamily::BeatDriven,
                beats: Some(BeatPlan {
                    base_beats: 2.0,
                    stride_beats: 0.0,
                    mode: StaggerMode::DurationProportional,
                    build_in_beats: 1.25,
                    entrance: Ease::OutCubic,
                }),
            },
        ];

        let mut table = BTreeMap::new();
        for template in templates {
            table.insert(template.id, template);
        }
        Self { templates: table }
    }

    /// True when `id` names a registered template.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Metadata for `id`, if registered.
    pub fn get(&self, id: &str) -> Option<&TemplateInfo> {
        self.templates.get(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.keys().copied()
    }
}
