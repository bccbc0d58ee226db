use crate::model::settings::{CustomLabel, CustomPriority};

/// Fallback color for unknown priorities and labels.
pub const FALLBACK_COLOR: &str = "gray";

/// Colors for the built-in `Priority 1`..`Priority 6` levels.
const PRIORITY_LEVEL_COLORS: [&str; 6] = ["red", "orange", "yellow", "green", "blue", "purple"];

/// Labels every store understands without configuration.
pub const PRESET_LABELS: [(&str, &str); 10] = [
    ("#ByKairo", "blue"),
    ("#School", "green"),
    ("#Work", "orange"),
    ("#Personal", "pink"),
    ("#Urgent", "red"),
    ("#Shopping", "cyan"),
    ("#Health", "emerald"),
    ("#Finance", "amber"),
    ("#Family", "rose"),
    ("#Projects", "teal"),
];

/// Resolve a priority name to a display color: built-in levels first, then
/// user-defined custom priorities, then the gray fallback.
pub fn priority_color<'a>(name: &str, custom: &'a [CustomPriority]) -> &'a str {
    if let Some(level) = name.strip_prefix("Priority ") {
        if let Ok(n) = level.parse::<usize>() {
            if (1..=PRIORITY_LEVEL_COLORS.len()).contains(&n) {
                return PRIORITY_LEVEL_COLORS[n - 1];
            }
        }
        return FALLBACK_COLOR;
    }
    custom
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.color.as_str())
        .unwrap_or(FALLBACK_COLOR)
}

/// Resolve a label name to a display color: custom labels override presets.
pub fn label_color<'a>(name: &str, custom: &'a [CustomLabel]) -> &'a str {
    if let Some(label) = custom.iter().find(|l| l.name == name) {
        return &label.color;
    }
    PRESET_LABELS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_levels_have_fixed_colors() {
        assert_eq!(priority_color("Priority 1", &[]), "red");
        assert_eq!(priority_color("Priority 6", &[]), "purple");
        assert_eq!(priority_color("Priority 7", &[]), FALLBACK_COLOR);
        assert_eq!(priority_color("Priority x", &[]), FALLBACK_COLOR);
    }

    #[test]
    fn custom_priorities_resolve_by_name() {
        let custom = vec![CustomPriority {
            name: "Someday".into(),
            color: "violet".into(),
        }];
        assert_eq!(priority_color("Someday", &custom), "violet");
        assert_eq!(priority_color("Never", &custom), FALLBACK_COLOR);
    }

    #[test]
    fn custom_labels_override_presets() {
        let custom = vec![CustomLabel {
            name: "#Work".into(),
            color: "lime".into(),
        }];
        assert_eq!(label_color("#Work", &custom), "lime");
        assert_eq!(label_color("#Work", &[]), "orange");
        assert_eq!(label_color("#Nowhere", &[]), FALLBACK_COLOR);
    }
}
