//! Chart styling handed to the rendering layer.
//!
//! The renderer receives a `Theme` value alongside each aggregate; nothing
//! here mutates global plotting defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algo::filter::SentimentSelector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 50, bottom: 25, left: 25, right: 25 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub family: String,
    pub size: u32,
    pub color: String,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Arial".into(),
            size: 12,
            color: "#707070".into(),
        }
    }
}

/// Bar colour and word-cloud colormap for one dashboard tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabStyle {
    pub bar_color: String,
    pub wordcloud_colormap: String,
}

impl TabStyle {
    fn new(bar_color: &str, wordcloud_colormap: &str) -> Self {
        Self {
            bar_color: bar_color.into(),
            wordcloud_colormap: wordcloud_colormap.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStyles {
    pub all: TabStyle,
    pub positive: TabStyle,
    pub negative: TabStyle,
}

impl Default for TabStyles {
    fn default() -> Self {
        Self {
            all: TabStyle::new("#54A24B", "Greens"),
            positive: TabStyle::new("#1F77B4", "Blues"),
            negative: TabStyle::new("#FF7F0E", "Oranges"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub font: Font,
    pub title_font: Font,
    pub axis_line_color: String,
    pub colorway: Vec<String>,
    /// Fill colour per sentiment label (pie slices, record table cells).
    pub sentiment_colors: BTreeMap<String, String>,
    pub tabs: TabStyles,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            width: 600,
            height: 450,
            margin: Margin::default(),
            font: Font::default(),
            title_font: Font {
                size: 16,
                color: "#353535".into(),
                ..Font::default()
            },
            axis_line_color: "lightgray".into(),
            colorway: [
                "#1F77B4", "#FF7F0E", "#54A24B", "#D62728", "#C355FA", "#8C564B", "#E377C2",
                "#7F7F7F", "#FFE323", "#17BECF",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            sentiment_colors: [("Positive", "#1F77B4"), ("Negative", "#FF7F0E")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            tabs: TabStyles::default(),
        }
    }
}

impl Theme {
    pub fn tab(&self, selector: SentimentSelector) -> &TabStyle {
        match selector {
            SentimentSelector::All => &self.tabs.all,
            SentimentSelector::Positive => &self.tabs.positive,
            SentimentSelector::Negative => &self.tabs.negative,
        }
    }
}
