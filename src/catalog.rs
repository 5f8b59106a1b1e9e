use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rewrite transformation applied to the input text.
///
/// The serde representation doubles as the wire token the rephrase API
/// expects in its `mapping` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStyle {
    #[default]
    Paraphrase,
    InformalToFormal,
    PassiveToActive,
    ActiveToPassive,
    SentenceSplit,
    Expand,
    SwitchTone,
}

#[derive(Debug, Error)]
#[error("unknown rewrite style: {0}")]
pub struct UnknownStyle(String);

impl RewriteStyle {
    pub fn token(&self) -> &'static str {
        match self {
            RewriteStyle::Paraphrase => "paraphrase",
            RewriteStyle::InformalToFormal => "informal_to_formal",
            RewriteStyle::PassiveToActive => "passive_to_active",
            RewriteStyle::ActiveToPassive => "active_to_passive",
            RewriteStyle::SentenceSplit => "sentence_split",
            RewriteStyle::Expand => "expand",
            RewriteStyle::SwitchTone => "switch_tone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RewriteStyle::Paraphrase => "Paraphrase",
            RewriteStyle::InformalToFormal => "Formalize",
            RewriteStyle::PassiveToActive => "Passive to Active",
            RewriteStyle::ActiveToPassive => "Active to Passive",
            RewriteStyle::SentenceSplit => "Split Sentences",
            RewriteStyle::Expand => "Expand",
            RewriteStyle::SwitchTone => "Change Tone",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RewriteStyle::Paraphrase => "Reword text while keeping the same meaning.",
            RewriteStyle::InformalToFormal => "Make the text more professional.",
            RewriteStyle::PassiveToActive => "Switch to active voice for clarity.",
            RewriteStyle::ActiveToPassive => "Switch to passive voice.",
            RewriteStyle::SentenceSplit => "Break long sentences into shorter ones.",
            RewriteStyle::Expand => "Add detail and length to the text.",
            RewriteStyle::SwitchTone => "Adjust the emotional tone of the text.",
        }
    }

    /// Whether this style requires a target tone in the request.
    pub fn needs_tone(&self) -> bool {
        matches!(self, RewriteStyle::SwitchTone)
    }

    /// Parse a style from its wire token.
    pub fn parse(s: &str) -> Result<Self, UnknownStyle> {
        Self::all()
            .iter()
            .copied()
            .find(|style| style.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }

    /// All available styles, in display order.
    pub fn all() -> &'static [RewriteStyle] {
        &[
            RewriteStyle::Paraphrase,
            RewriteStyle::InformalToFormal,
            RewriteStyle::PassiveToActive,
            RewriteStyle::ActiveToPassive,
            RewriteStyle::SentenceSplit,
            RewriteStyle::Expand,
            RewriteStyle::SwitchTone,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|s| s == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|s| s == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for RewriteStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Target register for the switch-tone style.
///
/// A tone is always selected (default straightforward) but only travels on
/// the wire when the selected style requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Straightforward,
    Confident,
    Friendly,
    Empathetic,
}

#[derive(Debug, Error)]
#[error("unknown tone: {0}")]
pub struct UnknownTone(String);

impl Tone {
    pub fn token(&self) -> &'static str {
        match self {
            Tone::Straightforward => "straightforward",
            Tone::Confident => "confident",
            Tone::Friendly => "friendly",
            Tone::Empathetic => "empathetic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Straightforward => "Straightforward",
            Tone::Confident => "Confident",
            Tone::Friendly => "Friendly",
            Tone::Empathetic => "Empathetic",
        }
    }

    /// Parse a tone from its wire token.
    pub fn parse(s: &str) -> Result<Self, UnknownTone> {
        Self::all()
            .iter()
            .copied()
            .find(|tone| tone.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTone(s.to_string()))
    }

    /// All available tones, in display order.
    pub fn all() -> &'static [Tone] {
        &[
            Tone::Straightforward,
            Tone::Confident,
            Tone::Friendly,
            Tone::Empathetic,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
