//! Static compatibility table
//!
//! Only four pairs are listed. Connector/visionary and builder/analyst are
//! absent, and no type is compatible with itself. Keep the gaps until product
//! confirms otherwise.

use crate::personality::PersonalityType;
use crate::personality::PersonalityType::{Analyst, Builder, Connector, Visionary};

const BUILDER_COMPATIBLE: &[PersonalityType] = &[Connector, Visionary];
const VISIONARY_COMPATIBLE: &[PersonalityType] = &[Builder, Analyst];
const CONNECTOR_COMPATIBLE: &[PersonalityType] = &[Builder, Analyst];
const ANALYST_COMPATIBLE: &[PersonalityType] = &[Visionary, Connector];

impl PersonalityType {
    /// Types considered complementary to this one
    pub fn compatible_types(&self) -> &'static [PersonalityType] {
        match self {
            Builder => BUILDER_COMPATIBLE,
            Visionary => VISIONARY_COMPATIBLE,
            Connector => CONNECTOR_COMPATIBLE,
            Analyst => ANALYST_COMPATIBLE,
        }
    }

    /// Whether `other` is in this type's compatibility set
    pub fn is_compatible_with(&self, other: PersonalityType) -> bool {
        self.compatible_types().contains(&other)
    }
}

/// Look up the compatibility set for a raw tag
///
/// Unrecognized tags yield an empty set rather than an error.
pub fn compatible_types(tag: &str) -> &'static [PersonalityType] {
    tag.parse::<PersonalityType>()
        .map(|t| t.compatible_types())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries() {
        assert_eq!(compatible_types("builder"), &[Connector, Visionary]);
        assert_eq!(compatible_types("visionary"), &[Builder, Analyst]);
        assert_eq!(compatible_types("connector"), &[Builder, Analyst]);
        assert_eq!(compatible_types("analyst"), &[Visionary, Connector]);
    }

    #[test]
    fn test_connector_excludes_visionary() {
        let set = compatible_types("connector");
        assert!(set.contains(&Builder));
        assert!(set.contains(&Analyst));
        assert!(!set.contains(&Visionary));
        assert_eq!(set.len(), 2);

        // visionary lists analyst, but that does not make connector list visionary
        assert!(Visionary.is_compatible_with(Analyst));
        assert!(!Connector.is_compatible_with(Visionary));
        assert!(!Visionary.is_compatible_with(Connector));
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        assert!(compatible_types("wizard").is_empty());
        assert!(compatible_types("").is_empty());
        assert!(compatible_types("Builder").is_empty());
    }

    #[test]
    fn test_no_type_is_compatible_with_itself() {
        for tag in PersonalityType::ALL {
            assert!(!tag.is_compatible_with(tag));
        }
    }
}
