//! Default styling tokens every page config starts from

use serde::Serialize;

/// Tailwind class tokens grouped by what they style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorTokens {
    pub background: BackgroundColors,
    pub text: TextColors,
    pub borders: BorderColors,
    pub buttons: ButtonColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
    pub muted: String,
    pub inverse: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorderColors {
    pub default: String,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonColors {
    pub primary: String,
    pub secondary: String,
}

impl Default for ColorTokens {
    fn default() -> Self {
        Self {
            background: BackgroundColors {
                primary: "bg-white".to_string(),
                secondary: "bg-gray-50".to_string(),
                accent: "bg-indigo-600".to_string(),
            },
            text: TextColors {
                primary: "text-gray-900".to_string(),
                secondary: "text-gray-600".to_string(),
                muted: "text-gray-400".to_string(),
                inverse: "text-white".to_string(),
            },
            borders: BorderColors {
                default: "border-gray-200".to_string(),
                focus: "border-indigo-500".to_string(),
            },
            buttons: ButtonColors {
                primary: "bg-indigo-600 hover:bg-indigo-700 text-white".to_string(),
                secondary: "bg-white hover:bg-gray-50 text-gray-900 border border-gray-300"
                    .to_string(),
            },
        }
    }
}
