use serde::Deserialize;

/// One entry of the ability listing: a name and the locator of its detail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ability {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EffectEntry {
    pub effect: String,
    pub language: Language,
}

/// Detail document for a single ability. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityDetail {
    pub name: String,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

impl AbilityDetail {
    /// Effect texts written in English.
    pub fn english_effects(&self) -> Vec<&str> {
        self.effect_entries
            .iter()
            .filter(|entry| entry.language.name == "en")
            .map(|entry| entry.effect.as_str())
            .collect()
    }
}

/// Envelope of the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityPage {
    #[serde(default)]
    pub results: Vec<Ability>,
}
