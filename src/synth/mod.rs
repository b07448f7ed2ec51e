//! Page config synthesis
//!
//! A [`PageConfig`] is the default [`ColorTokens`] plus one section per
//! extracted entry, keyed by the declaration name exactly as written in the
//! page. Sections are not renamed, merged or validated.

mod colors;

pub use colors::{BackgroundColors, BorderColors, ButtonColors, ColorTokens, TextColors};

use crate::extract::{ExtractedEntries, RecognizedName};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Key the styling tokens are stored under
pub const COLORS_KEY: &str = "colors";

/// The synthesized configuration for one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub colors: ColorTokens,
    sections: ExtractedEntries,
}

impl PageConfig {
    pub fn section(&self, name: RecognizedName) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> &ExtractedEntries {
        &self.sections
    }

    /// Top-level keys in serialization order, `colors` first
    pub fn keys(&self) -> Vec<&'static str> {
        std::iter::once(COLORS_KEY)
            .chain(self.sections.iter().map(|entry| entry.name.as_str()))
            .collect()
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl Serialize for PageConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1 + self.sections.len()))?;
        map.serialize_entry(COLORS_KEY, &self.colors)?;
        for entry in self.sections.iter() {
            map.serialize_entry(entry.name.as_str(), &entry.value)?;
        }
        map.end()
    }
}

/// Builds the page config for a set of extracted entries
pub fn synthesize_config(entries: ExtractedEntries) -> PageConfig {
    PageConfig {
        colors: ColorTokens::default(),
        sections: entries,
    }
}
