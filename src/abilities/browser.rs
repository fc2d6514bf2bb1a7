use tracing::{debug, info, instrument, warn};

use super::api::AbilityApi;
use super::error::ApiError;
use crate::domain::{Ability, AbilityDetail};

/// Claim on the detail slot taken when a detail fetch starts. Only the
/// ticket from the latest fetch may fill the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    url: String,
}

impl DetailTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// State behind the ability screen: the fetched page, the current
/// selection and the single detail slot.
pub struct AbilityBrowser<A> {
    api: A,
    abilities: Vec<Ability>,
    loading: bool,
    error: Option<String>,
    search: String,
    selected: Option<Ability>,
    detail: Option<AbilityDetail>,
    detail_loading: bool,
    generation: u64,
}

impl<A: AbilityApi> AbilityBrowser<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            abilities: Vec::new(),
            loading: true,
            error: None,
            search: String::new(),
            selected: None,
            detail: None,
            detail_loading: false,
            generation: 0,
        }
    }

    /// Fetches the fixed first page. A failure leaves the list empty and
    /// sets the page error; nothing is retried.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_abilities().await {
            Ok(abilities) => {
                info!(count = abilities.len(), "Abilities loaded");
                self.abilities = abilities;
            }
            Err(e) => {
                warn!(error = %e, "Ability list failed");
                self.abilities.clear();
                self.error = Some(e.page_message());
            }
        }

        self.loading = false;
    }

    /// Marks `ability` selected and starts a detail fetch for it.
    pub fn begin_detail(&mut self, ability: Ability) -> DetailTicket {
        self.generation += 1;
        self.detail_loading = true;
        let ticket = DetailTicket {
            generation: self.generation,
            url: ability.url.clone(),
        };
        self.selected = Some(ability);
        ticket
    }

    /// Stores the outcome of a detail fetch. Returns false, leaving state
    /// untouched, when a newer fetch has started since `ticket` was issued.
    /// A failed fetch empties the slot.
    pub fn apply_detail(&mut self, ticket: DetailTicket, result: Result<AbilityDetail, ApiError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                latest = self.generation,
                "Discarding stale ability detail"
            );
            return false;
        }

        self.detail = match result {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(error = %e, url = %ticket.url, "Ability detail failed");
                None
            }
        };
        self.detail_loading = false;
        true
    }

    /// Selects `ability` and waits for its detail.
    #[instrument(fields(ability = %ability.name), skip(self, ability))]
    pub async fn select(&mut self, ability: Ability) {
        let ticket = self.begin_detail(ability);
        let result = self.api.ability_detail(ticket.url()).await;
        self.apply_detail(ticket, result);
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Abilities whose name contains the search text. Matching is
    /// case-sensitive.
    pub fn filtered(&self) -> Vec<&Ability> {
        self.abilities
            .iter()
            .filter(|a| a.name.contains(self.search.as_str()))
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.name == name)
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Ability> {
        self.selected.as_ref()
    }

    pub fn detail(&self) -> Option<&AbilityDetail> {
        self.detail.as_ref()
    }

    pub fn is_detail_loading(&self) -> bool {
        self.detail_loading
    }
}
