//! The allow-list of declaration names that carry page data

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A variable name whose literal initializer is lifted into the page config
///
/// Variants are listed in extraction order. Synonyms are deliberately kept
/// apart: `heroSections` and `heroSlides`, `product` and `products` each map
/// to their own config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecognizedName {
    Products,
    HeroSections,
    HeroSlides,
    Categories,
    CartItems,
    Faqs,
    Posts,
    Team,
    Testimonials,
    FooterSections,
    SocialLinks,
    Results,
    Product,
}

impl RecognizedName {
    pub const ALL: [RecognizedName; 13] = [
        RecognizedName::Products,
        RecognizedName::HeroSections,
        RecognizedName::HeroSlides,
        RecognizedName::Categories,
        RecognizedName::CartItems,
        RecognizedName::Faqs,
        RecognizedName::Posts,
        RecognizedName::Team,
        RecognizedName::Testimonials,
        RecognizedName::FooterSections,
        RecognizedName::SocialLinks,
        RecognizedName::Results,
        RecognizedName::Product,
    ];

    /// The identifier as written in page source, also used as the config key
    pub fn as_str(&self) -> &'static str {
        match self {
            RecognizedName::Products => "products",
            RecognizedName::HeroSections => "heroSections",
            RecognizedName::HeroSlides => "heroSlides",
            RecognizedName::Categories => "categories",
            RecognizedName::CartItems => "cartItems",
            RecognizedName::Faqs => "faqs",
            RecognizedName::Posts => "posts",
            RecognizedName::Team => "team",
            RecognizedName::Testimonials => "testimonials",
            RecognizedName::FooterSections => "footerSections",
            RecognizedName::SocialLinks => "socialLinks",
            RecognizedName::Results => "results",
            RecognizedName::Product => "product",
        }
    }

    pub fn from_identifier(ident: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|name| name.as_str() == ident)
    }

    /// Closest recognized name for typo correction, within edit distance 3
    pub fn suggest(input: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .map(|name| (*name, strsim::damerau_levenshtein(input, name.as_str())))
            .filter(|(_, dist)| *dist <= 3)
            .min_by_key(|(_, dist)| *dist)
            .map(|(name, _)| name)
    }
}

impl fmt::Display for RecognizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecognizedName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown declaration name '{input}'{}", did_you_mean(.suggestion))]
pub struct UnknownNameError {
    pub input: String,
    pub suggestion: Option<RecognizedName>,
}

fn did_you_mean(suggestion: &Option<RecognizedName>) -> String {
    suggestion
        .map(|name| format!(" (did you mean '{}'?)", name))
        .unwrap_or_default()
}

impl FromStr for RecognizedName {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| UnknownNameError {
            input: s.to_string(),
            suggestion: Self::suggest(s),
        })
    }
}
