//! Catalogue view state and the mutations that change it

use catalogue_async::types::Tool;

/// What the user is currently looking at
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CatalogueState {
    /// Full catalogue, replaced wholesale on every reload
    pub tools: Vec<Tool>,
    /// Sorted tag vocabulary
    pub tags: Vec<String>,
    /// Current filtered/sorted view
    pub view: Vec<Tool>,
    /// Search box text
    pub query: String,
    /// Selected tag filters, in selection order
    pub selected_tags: Vec<String>,
    /// Whether the admin panel is available
    pub is_admin: bool,
    /// Whether `view` came from a hybrid search
    pub is_hybrid: bool,
    /// Transient message for the user (e.g. search fallback)
    pub notice: Option<String>,
}

/// Mutations that can be applied to catalogue state
#[derive(Debug, Clone)]
pub enum CatalogueMutation {
    /// Replace the catalogue
    SetTools(Vec<Tool>),
    /// Replace the tag vocabulary
    SetTags(Vec<String>),
    /// Replace the current view
    SetView(Vec<Tool>),
    /// Set the search text
    SetQuery(String),
    /// Add the tag if absent, remove it if present
    ToggleTag(String),
    /// Replace the tag selection
    SetSelectedTags(Vec<String>),
    /// Set admin visibility
    SetAdmin(bool),
    /// Mark the view as hybrid or local
    SetHybrid(bool),
    /// Set or clear the transient notice
    SetNotice(Option<String>),
}

impl CatalogueMutation {
    /// Apply this mutation to the given state
    pub fn apply(self, state: &mut CatalogueState) {
        match self {
            Self::SetTools(t) => state.tools = t,
            Self::SetTags(t) => state.tags = t,
            Self::SetView(v) => state.view = v,
            Self::SetQuery(q) => {
                state.query = q;
                state.is_hybrid = false;
            }
            Self::ToggleTag(tag) => {
                if let Some(pos) = state.selected_tags.iter().position(|t| *t == tag) {
                    state.selected_tags.remove(pos);
                } else {
                    state.selected_tags.push(tag);
                }
                state.is_hybrid = false;
            }
            Self::SetSelectedTags(t) => {
                state.selected_tags = t;
                state.is_hybrid = false;
            }
            Self::SetAdmin(b) => state.is_admin = b,
            Self::SetHybrid(b) => state.is_hybrid = b,
            Self::SetNotice(n) => state.notice = n,
        }
    }
}
