//! StatKind - The fixed menu of family-tree statistics

use serde::{Deserialize, Serialize};

/// One named statistic shown on the stats widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    TotalMembers,
    Levels,
    MaleMembers,
    FemaleMembers,
    LivingMembers,
    DeceasedMembers,
    NoPhoto,
    Under18,
    AdultsWithChildren,
    AdultsWithoutChildren,
}

impl StatKind {
    /// Display order of the statistic cards
    pub const ALL: [StatKind; 10] = [
        StatKind::TotalMembers,
        StatKind::Levels,
        StatKind::MaleMembers,
        StatKind::FemaleMembers,
        StatKind::LivingMembers,
        StatKind::DeceasedMembers,
        StatKind::NoPhoto,
        StatKind::Under18,
        StatKind::AdultsWithChildren,
        StatKind::AdultsWithoutChildren,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::TotalMembers => "Total Members",
            StatKind::Levels => "Levels",
            StatKind::MaleMembers => "Male Members",
            StatKind::FemaleMembers => "Female Members",
            StatKind::LivingMembers => "Living Members",
            StatKind::DeceasedMembers => "Deceased Members",
            StatKind::NoPhoto => "No Photo",
            StatKind::Under18 => "Under 18",
            StatKind::AdultsWithChildren => "Adults With Children",
            StatKind::AdultsWithoutChildren => "Adults Without Children",
        }
    }

    /// Whether the statistic is backed by a member bucket that can be exported
    pub fn is_exportable(&self) -> bool {
        !matches!(self, StatKind::Levels)
    }

    /// Lowercase, underscore-joined form of the label (`total_members`)
    pub fn slug(&self) -> String {
        self.label()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for StatKind {
    type Err = String;

    /// Accepts the label (`"No Photo"`) or its slug (`no_photo`, `no-photo`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s
            .trim()
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();

        StatKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| format!("Unknown statistic: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_and_slug() {
        assert_eq!("No Photo".parse::<StatKind>(), Ok(StatKind::NoPhoto));
        assert_eq!("adults-with-children".parse::<StatKind>(), Ok(StatKind::AdultsWithChildren));
        assert_eq!("under_18".parse::<StatKind>(), Ok(StatKind::Under18));
        assert!("grandparents".parse::<StatKind>().is_err());
    }

    #[test]
    fn test_only_levels_is_not_exportable() {
        let not_exportable: Vec<_> = StatKind::ALL
            .into_iter()
            .filter(|k| !k.is_exportable())
            .collect();
        assert_eq!(not_exportable, vec![StatKind::Levels]);
    }
}
