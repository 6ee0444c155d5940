use serde::Serialize;

/// A named interval of fasting time, keyed by the hour it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub threshold_hours: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub style_tag: &'static str,
}

/// Ordered by ascending `threshold_hours`; the first entry starts at hour 0.
pub static STAGES: &[Stage] = &[
    Stage {
        threshold_hours: 0,
        name: "Blood sugar is rising",
        description: "The body is digesting and absorbing nutrients. Blood sugar and insulin levels are elevated",
        style_tag: "stage-0",
    },
    Stage {
        threshold_hours: 4,
        name: "Blood sugar drops",
        description: "Blood sugar and insulin levels begin to drop, and the body starts to use stored glycogen for energy",
        style_tag: "stage-4",
    },
    Stage {
        threshold_hours: 8,
        name: "Fat burning phase",
        description: "Glycogen stores are depleted and the body begins to shift towards using fat for energy",
        style_tag: "stage-8",
    },
    Stage {
        threshold_hours: 12,
        name: "Ketosis phase",
        description: "The body enters ketosis, where fat stores are converted into ketones, providing an alternative energy source",
        style_tag: "stage-12",
    },
    Stage {
        threshold_hours: 18,
        name: "Higher ketosis phase",
        description: "Higher ketone levels signal the body to ramp up stress busting pathways to reduce inflammation and repair DNA damage",
        style_tag: "stage-18",
    },
    Stage {
        threshold_hours: 24,
        name: "Autophagy phase",
        description: "The body relies heavily on ketones for energy. Cellular repair and detoxification processes are at their peak",
        style_tag: "stage-24",
    },
    Stage {
        threshold_hours: 36,
        name: "Enhanced autophagy phase",
        description: "Body begins to recycle damaged cells and misfolded proteins",
        style_tag: "stage-36",
    },
    Stage {
        threshold_hours: 48,
        name: "Growth hormone peak phase",
        description: "Growth hormones reach the highest level (500%)",
        style_tag: "stage-48",
    },
    Stage {
        threshold_hours: 54,
        name: "Low insulin level phase",
        description: "Insulin levels drop to the lowest point. The body becomes more insulin sensitive",
        style_tag: "stage-54",
    },
    Stage {
        threshold_hours: 72,
        name: "Immune cell reformation phase",
        description: "Breakdown of old immune cells and generation of new ones",
        style_tag: "stage-72",
    },
    Stage {
        threshold_hours: 96,
        name: "Metabolic shift phase",
        description: "The body transitions to full ketosis, utilizing fatty acids and ketone bodies as primary energy sources",
        style_tag: "stage-96",
    },
    Stage {
        threshold_hours: 120,
        name: "Multi-Organ response phase",
        description: "Significant changes in protein levels across multiple organs, indicating systemic adaptation to prolonged fasting",
        style_tag: "stage-120",
    },
    Stage {
        threshold_hours: 144,
        name: "Protein level phase",
        description: "Systemic changes are occurring in protein levels, indicating widespread physiological adaptations",
        style_tag: "stage-144",
    },
];

/// Returns the stage with the greatest threshold not above `elapsed_hours`.
pub fn resolve_stage(elapsed_hours: u64) -> &'static Stage {
    STAGES
        .iter()
        .rev()
        .find(|stage| u64::from(stage.threshold_hours) <= elapsed_hours)
        .unwrap_or(&STAGES[0])
}
