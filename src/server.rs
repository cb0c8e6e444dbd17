//! MCP tool surface (spec §4.6): one `#[tool]` method per operation,
//! each delegating to the matching `tools::*::run` against a snapshot of
//! the current index. Mirrors the teacher's `#[tool_router]`/
//! `#[tool_handler]` wiring, generalized from a per-project snapshot
//! cache to a single shared, swappable index.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ServerInfo;
use rmcp::{ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::context::ServerContext;
use crate::tools;

fn default_limit() -> usize {
    tools::shared::DEFAULT_LIMIT
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ComponentNameParams {
    /// Component title, id, or a close variant (fuzzy-matched).
    component_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct SearchDocsParams {
    /// Free-text search query.
    query: String,
    /// Optional module filter: foundation, components, patterns, enterprise, quick-reference, other.
    #[serde(default)]
    module: Option<String>,
    /// Maximum results to return (default 10, max 25).
    #[serde(default = "default_limit")]
    limit: usize,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct CategoryParams {
    /// Component category (e.g. "forms", "buttons"). Omit for an overview.
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ListAllDocsParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct FoundationParams {
    /// Foundation topic or alias. Omit for an overview.
    #[serde(default)]
    topic: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct PatternParams {
    /// Pattern category (composition, data, forms, layout, modals, navigation, state).
    #[serde(default)]
    pattern_category: Option<String>,
    /// Pattern name within the category.
    #[serde(default)]
    pattern_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct EnterpriseParams {
    /// Enterprise topic or alias (app-shell, dashboard, admin, data, accessibility).
    #[serde(default)]
    topic: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct SuggestComponentsParams {
    /// Natural-language description of the UI being built.
    ui_description: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ImplementationGuideParams {
    /// What the caller is trying to build, e.g. "login form with validation".
    goal: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ReindexParams {}

pub struct DocsServer {
    ctx: Arc<ServerContext>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl DocsServer {
    pub fn new(ctx: Arc<ServerContext>) -> Self {
        Self {
            ctx,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl DocsServer {
    #[tool(
        name = "query_component",
        description = "Look up a single component by name (fuzzy-matched) and return its full documentation."
    )]
    async fn query_component(&self, Parameters(params): Parameters<ComponentNameParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::query_component::run(&index, &params.component_name)
    }

    #[tool(
        name = "search_docs",
        description = "Full-text search across the documentation corpus, optionally filtered to one module."
    )]
    async fn search_docs(&self, Parameters(params): Parameters<SearchDocsParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::search_docs::run(
            &index,
            &params.query,
            params.module.as_deref(),
            Some(params.limit),
        )
    }

    #[tool(
        name = "list_by_category",
        description = "List components in a category, or list all categories with counts when omitted."
    )]
    async fn list_by_category(&self, Parameters(params): Parameters<CategoryParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::list_by_category::run(&index, params.category.as_deref())
    }

    #[tool(
        name = "list_all_docs",
        description = "Full index of all indexed documents, grouped by module and (for components) by category."
    )]
    async fn list_all_docs(&self, Parameters(_params): Parameters<ListAllDocsParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::list_all_docs::run(&index)
    }

    #[tool(
        name = "get_component_examples",
        description = "Return the labeled TS/TSX code examples extracted from a component's documentation."
    )]
    async fn get_component_examples(&self, Parameters(params): Parameters<ComponentNameParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::examples::run(&index, &params.component_name)
    }

    #[tool(
        name = "get_props_reference",
        description = "Return a component's props table, falling back to any prop-like table in the document."
    )]
    async fn get_props_reference(&self, Parameters(params): Parameters<ComponentNameParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::props::run(&index, &params.component_name)
    }

    #[tool(
        name = "get_foundation",
        description = "Return a foundation topic (getting-started, fluent-provider, theming, styling-griffel, component-architecture, accessibility), or an overview when omitted."
    )]
    async fn get_foundation(&self, Parameters(params): Parameters<FoundationParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::foundation::run(&index, params.topic.as_deref())
    }

    #[tool(
        name = "get_pattern",
        description = "Return design patterns by category and optional name (composition, data, forms, layout, modals, navigation, state)."
    )]
    async fn get_pattern(&self, Parameters(params): Parameters<PatternParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::pattern::run(
            &index,
            params.pattern_category.as_deref(),
            params.pattern_name.as_deref(),
        )
    }

    #[tool(
        name = "get_enterprise",
        description = "Return enterprise documentation by topic (app-shell, dashboard, admin, data, accessibility), or an overview when omitted."
    )]
    async fn get_enterprise(&self, Parameters(params): Parameters<EnterpriseParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::enterprise::run(&index, &params.topic)
    }

    #[tool(
        name = "suggest_components",
        description = "Suggest components for a natural-language UI description, merging keyword, search, and category signals."
    )]
    async fn suggest_components(&self, Parameters(params): Parameters<SuggestComponentsParams>) -> String {
        let index = self.ctx.snapshot().await;
        tools::suggest::run(&index, &params.ui_description)
    }

    #[tool(
        name = "get_implementation_guide",
        description = "Generate a full implementation guide (components, patterns, steps, accessibility checklist) for a goal."
    )]
    async fn get_implementation_guide(
        &self,
        Parameters(params): Parameters<ImplementationGuideParams>,
    ) -> String {
        let index = self.ctx.snapshot().await;
        tools::guide::run(&index, &params.goal)
    }

    #[tool(
        name = "reindex",
        description = "Rebuild the documentation index from disk and report what changed."
    )]
    async fn reindex(&self, Parameters(_params): Parameters<ReindexParams>) -> String {
        tools::reindex::run(&self.ctx).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: rmcp::model::ServerCapabilities {
                tools: Some(rmcp::model::ToolsCapability::default()),
                ..Default::default()
            },
            server_info: rmcp::model::Implementation {
                name: "fluentui-docs-mcp".to_string(),
                title: Some("Fluent UI Docs MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Indexes a Fluent UI documentation corpus and exposes it to coding agents. \
                 Prefer these tools over grepping the docs tree directly.\n\n\
                 LOOKUP:\n\
                 - query_component(componentName) - Full docs for one component.\n\
                 - get_component_examples(componentName) - Code examples only.\n\
                 - get_props_reference(componentName) - Props table only.\n\
                 - get_foundation(topic?) - Foundational concepts (theming, providers, styling, a11y).\n\
                 - get_pattern(patternCategory?, patternName?) - Composition/form/layout patterns.\n\
                 - get_enterprise(topic) - Enterprise app-shell, dashboard, admin guidance.\n\n\
                 SEARCH & DISCOVERY:\n\
                 - search_docs(query, module?, limit?) - Full-text search across the corpus.\n\
                 - list_by_category(category?) - Browse components by category.\n\
                 - list_all_docs() - Full index of everything indexed.\n\
                 - suggest_components(uiDescription) - Suggest components for a UI description.\n\n\
                 AUTHORING HELP:\n\
                 - get_implementation_guide(goal) - End-to-end plan: components, patterns, steps, a11y.\n\
                 - reindex() - Rebuild after the docs corpus changes on disk."
                    .into(),
            ),
        }
    }
}
