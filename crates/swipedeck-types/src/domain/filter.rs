use serde::{Deserialize, Serialize};

/// Which page loader the candidate source should use.
///
/// The core treats the variants as opaque alternatives; only the source looks
/// inside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FilterMode {
    /// Plain feed
    #[default]
    Feed,
    /// Case-insensitive keyword search
    Keyword { query: String },
    /// Free-text semantic search
    Semantic {
        query: String,
        #[serde(default = "default_exclude_favorites")]
        exclude_favorites: bool,
    },
    /// Candidates tagged with an emotion
    Emotion { emotion: String },
}

fn default_exclude_favorites() -> bool {
    true
}

impl FilterMode {
    /// Pick the active mode from the host's search inputs.
    ///
    /// Precedence: emotion, then semantic query, then keyword search, then the
    /// plain feed. Blank inputs count as absent.
    pub fn resolve(search: Option<&str>, semantic: Option<&str>, emotion: Option<&str>) -> Self {
        if let Some(emotion) = non_blank(emotion) {
            return FilterMode::Emotion { emotion };
        }
        if let Some(query) = non_blank(semantic) {
            return FilterMode::Semantic {
                query,
                exclude_favorites: true,
            };
        }
        if let Some(query) = non_blank(search) {
            return FilterMode::Keyword { query };
        }
        FilterMode::Feed
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterMode::Feed => "feed",
            FilterMode::Keyword { .. } => "keyword",
            FilterMode::Semantic { .. } => "semantic",
            FilterMode::Emotion { .. } => "emotion",
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
