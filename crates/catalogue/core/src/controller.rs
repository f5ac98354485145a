//! Catalogue controller: owns the loaded catalogue and derives the view

use crate::{
    CoreError,
    filter::{self, FilterRequest},
    fusion::{self, DocOnlyPolicy, FusionInput},
    policy::{AdminEnvironment, can_administer},
    sequencer::{Generation, SearchSequencer},
    session::{SessionContext, server_admin_flag},
    state::{CatalogueMutation, CatalogueState},
    tags,
};
use catalogue_async::{
    CatalogueError, Client,
    config::Config,
    types::{
        AiSearchResponse, DEFAULT_SEARCH_LIMIT, DocSearchResponse, SearchParams, Tool, ToolCreate,
        ToolUpdate,
    },
};
use catalogue_config::types::{DEFAULT_PRIORITY_NAMES, SearchConfig};

/// Notice shown when hybrid search degrades to the local filter
pub const FALLBACK_NOTICE: &str = "Search service unavailable; showing local matches";

/// Knobs for both search paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Result cap sent to both remote searches
    pub limit: u32,
    /// Bound on document-only results
    pub policy: DocOnlyPolicy,
    /// Names pinned to the front of an unfiltered listing
    pub priority_names: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            policy: DocOnlyPolicy::default(),
            priority_names: DEFAULT_PRIORITY_NAMES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl SearchOptions {
    /// Build from the `search` config section
    pub fn from_config(cfg: &SearchConfig) -> Self {
        Self {
            limit: cfg.limit,
            policy: DocOnlyPolicy::from(cfg),
            priority_names: cfg.priority_names.clone(),
        }
    }
}

/// What happened to one hybrid search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HybridOutcome {
    /// Fused results are now the view
    Applied {
        /// Number of fused tools
        results: usize,
    },
    /// Empty query: the view is the tag-filtered catalogue
    Unfiltered,
    /// A remote call failed; the view came from the local filter
    FellBack {
        /// Why the remote path failed
        reason: String,
    },
    /// A newer search was issued before this one finished
    Stale,
}

/// Remote answers for one hybrid search, not yet applied.
#[derive(Debug)]
pub struct HybridResponse {
    generation: Generation,
    fetched: Option<Result<(AiSearchResponse, DocSearchResponse), CatalogueError>>,
}

impl HybridResponse {
    /// Generation this response was issued under
    pub const fn generation(&self) -> Generation {
        self.generation
    }
}

/// Owns catalogue state and the API client.
#[derive(Debug)]
pub struct CatalogueController<C: Config> {
    /// Current state; change it through [`Self::dispatch_mutation`]
    pub state: CatalogueState,
    client: Client<C>,
    sequencer: SearchSequencer,
    options: SearchOptions,
    admin_env: AdminEnvironment,
}

impl<C: Config> CatalogueController<C> {
    /// Create a controller with an empty catalogue
    pub fn new(client: Client<C>, options: SearchOptions, admin_env: AdminEnvironment) -> Self {
        Self {
            state: CatalogueState::default(),
            client,
            sequencer: SearchSequencer::new(),
            options,
            admin_env,
        }
    }

    /// The API client
    pub const fn client(&self) -> &Client<C> {
        &self.client
    }

    /// Active search options
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Dispatch a single mutation
    pub fn dispatch_mutation(&mut self, mutation: CatalogueMutation) {
        mutation.apply(&mut self.state);
    }

    /// Dispatch multiple mutations in order
    pub fn dispatch_mutations(&mut self, mutations: Vec<CatalogueMutation>) {
        for m in mutations {
            m.apply(&mut self.state);
        }
    }

    /// Fetch tools and tags concurrently, then rebuild the view.
    ///
    /// Tools and tags must both succeed. With a resolved session its admin
    /// flag is reused; otherwise the server is asked alongside the catalogue
    /// and a failed check counts as "not admin".
    pub async fn load(&mut self, session: Option<&SessionContext>) -> Result<(), CoreError> {
        let (tools, server_tags, is_admin) = match session {
            Some(s) => {
                let (tools, server_tags) = self.fetch_catalogue().await?;
                (tools, server_tags, s.is_admin)
            }
            None => {
                let (fetched, server_flag) =
                    tokio::join!(self.fetch_catalogue(), server_admin_flag(&self.client));
                let (tools, server_tags) = fetched?;
                let is_admin = can_administer(None, None, &self.admin_env, server_flag);
                (tools, server_tags, is_admin)
            }
        };

        tracing::debug!(tools = tools.len(), is_admin, "Catalogue loaded");
        self.install(tools, &server_tags);
        self.dispatch_mutation(CatalogueMutation::SetAdmin(is_admin));
        self.filter();
        Ok(())
    }

    /// Refetch tools and tags, keeping admin visibility.
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        let (tools, server_tags) = self.fetch_catalogue().await?;
        self.install(tools, &server_tags);
        self.filter();
        Ok(())
    }

    async fn fetch_catalogue(&self) -> Result<(Vec<Tool>, Vec<String>), CatalogueError> {
        let (tools, tags) = (self.client.tools(), self.client.tags());
        tokio::try_join!(tools.list(), tags.list())
    }

    fn install(&mut self, tools: Vec<Tool>, server_tags: &[String]) {
        let vocabulary = tags::vocabulary(&tools, server_tags);
        self.dispatch_mutations(vec![
            CatalogueMutation::SetTools(tools),
            CatalogueMutation::SetTags(vocabulary),
        ]);
    }

    /// Re-derive the view with the local scorer.
    pub fn filter(&mut self) -> &[Tool] {
        let view = filter::apply(
            &self.state.tools,
            &FilterRequest {
                query: &self.state.query,
                tags: &self.state.selected_tags,
                priority_names: &self.options.priority_names,
            },
        );
        self.dispatch_mutation(CatalogueMutation::SetView(view));
        &self.state.view
    }

    /// Change the search text and refilter locally.
    ///
    /// Like the other view inputs this supersedes any in-flight hybrid search.
    pub fn set_query(&mut self, query: impl Into<String>) -> &[Tool] {
        self.dispatch_mutation(CatalogueMutation::SetQuery(query.into()));
        self.sequencer.issue();
        self.filter()
    }

    /// Toggle one tag filter and refilter locally
    pub fn toggle_tag(&mut self, tag: impl Into<String>) -> &[Tool] {
        self.dispatch_mutation(CatalogueMutation::ToggleTag(tag.into()));
        self.sequencer.issue();
        self.filter()
    }

    /// Replace the tag selection and refilter locally
    pub fn select_tags(&mut self, tags: Vec<String>) -> &[Tool] {
        self.dispatch_mutation(CatalogueMutation::SetSelectedTags(tags));
        self.sequencer.issue();
        self.filter()
    }

    /// Issue a hybrid search for the current query without touching state.
    ///
    /// Pair with [`Self::apply_hybrid`]; only the newest issued response applies.
    pub async fn run_hybrid(&self) -> HybridResponse {
        let generation = self.sequencer.issue();
        let query = self.state.query.trim();
        if query.is_empty() {
            return HybridResponse {
                generation,
                fetched: None,
            };
        }

        let params = SearchParams::new(query).with_limit(self.options.limit);
        let (metadata, documents) = (self.client.ai_search(), self.client.doc_search());
        let fetched = tokio::try_join!(metadata.query(&params), documents.query(&params));
        HybridResponse {
            generation,
            fetched: Some(fetched),
        }
    }

    /// Apply a hybrid response if it is still the newest one.
    ///
    /// A rejected token is returned as an error; every other remote failure
    /// falls back to the local filter and sets a notice.
    pub fn apply_hybrid(&mut self, response: HybridResponse) -> Result<HybridOutcome, CoreError> {
        if !self.sequencer.is_current(response.generation) {
            tracing::debug!(
                generation = response.generation.get(),
                "Discarding stale search response"
            );
            return Ok(HybridOutcome::Stale);
        }

        match response.fetched {
            None => {
                let view = filter::filter_by_tags(self.state.tools.clone(), &self.state.selected_tags);
                self.dispatch_mutations(vec![
                    CatalogueMutation::SetView(view),
                    CatalogueMutation::SetHybrid(false),
                    CatalogueMutation::SetNotice(None),
                ]);
                Ok(HybridOutcome::Unfiltered)
            }
            Some(Ok((metadata, documents))) => {
                let metadata: Vec<Tool> = metadata.results.into_iter().map(Tool::from).collect();
                let fused = fusion::fuse(&FusionInput {
                    catalogue: &self.state.tools,
                    metadata: &metadata,
                    documents: &documents.results,
                    tags: &self.state.selected_tags,
                    policy: self.options.policy,
                });
                let results = fused.len();
                self.dispatch_mutations(vec![
                    CatalogueMutation::SetView(fused),
                    CatalogueMutation::SetHybrid(true),
                    CatalogueMutation::SetNotice(None),
                ]);
                Ok(HybridOutcome::Applied { results })
            }
            Some(Err(e)) if e.is_unauthorized() => Err(e.into()),
            Some(Err(e)) => {
                tracing::warn!("Hybrid search failed, using local filter: {e}");
                self.filter();
                self.dispatch_mutations(vec![
                    CatalogueMutation::SetHybrid(false),
                    CatalogueMutation::SetNotice(Some(FALLBACK_NOTICE.into())),
                ]);
                Ok(HybridOutcome::FellBack {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Run and apply a hybrid search for the current query
    pub async fn hybrid_search(&mut self) -> Result<HybridOutcome, CoreError> {
        let response = self.run_hybrid().await;
        self.apply_hybrid(response)
    }

    fn require_admin(&self) -> Result<(), CoreError> {
        if self.state.is_admin {
            Ok(())
        } else {
            Err(CoreError::Forbidden("admin access required".into()))
        }
    }

    /// Create a tool, then reload the catalogue
    pub async fn create_tool(&mut self, req: &ToolCreate) -> Result<Tool, CoreError> {
        self.require_admin()?;
        let tool = self.client.tools().create(req).await?;
        tracing::info!(id = %tool.id, "Created tool");
        self.reload().await?;
        Ok(tool)
    }

    /// Partially update a tool, then reload the catalogue
    pub async fn update_tool(&mut self, id: &str, req: &ToolUpdate) -> Result<Tool, CoreError> {
        self.require_admin()?;
        if req.is_empty() {
            return Err(CoreError::Other("nothing to update".into()));
        }
        let tool = self.client.tools().update(id, req).await?;
        tracing::info!(id, "Updated tool");
        self.reload().await?;
        Ok(tool)
    }

    /// Delete a tool, then reload the catalogue
    pub async fn delete_tool(&mut self, id: &str) -> Result<(), CoreError> {
        self.require_admin()?;
        self.client.tools().delete(id).await?;
        tracing::info!(id, "Deleted tool");
        self.reload().await
    }
}
