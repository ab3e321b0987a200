//! MCP server implementation for the DraCor API.
//!
//! This crate wires the DraCor client into rmcp tool handlers and exposes
//! corpora, plays, networks, spoken text, DTS navigation, documentation and
//! admin operations as MCP tools, plus the corpora list and corpus registry
//! as MCP resources.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use dracor_core::client::DracorClient;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool_handler,
};
use rmcp::model::{
    AnnotateAble,
    ListResourcesResult,
    PaginatedRequestParams,
    RawResource,
    ReadResourceRequestParams,
    ReadResourceResult,
    ResourceContents,
    ServerCapabilities,
    ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};

/// Raw ODD with the DraCor encoding guidelines.
pub const DRACOR_ODD_URL: &str =
    "https://raw.githubusercontent.com/dracor-org/dracor-schema/refs/heads/main/dracor.odd";
/// Research based on DraCor, maintained in the frontend repository.
pub const DRACOR_RESEARCH_URL: &str =
    "https://raw.githubusercontent.com/dracor-org/dracor-frontend/refs/heads/main/public/doc/research.md";
/// README of the DraCor API repository, including local-instance setup.
pub const DRACOR_API_README_URL: &str =
    "https://raw.githubusercontent.com/dracor-org/dracor-api/refs/heads/main/README.md";
/// Registry of all DraCor corpora.
pub const DRACOR_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/dracor-org/dracor-registry/refs/heads/main/corpora.json";

const CORPORA_RESOURCE_URI: &str = "dracor://corpora";
const REGISTRY_RESOURCE_URI: &str = "dracor://registry";

const SERVER_INSTRUCTIONS: &str = r"dracor-mcp provides MCP tools for the DraCor drama corpora API: play metadata, character networks, spoken text and encoding documentation.

Workflow:
1. Call `get_corpora` to see the available corpora, or read the `dracor://corpora` resource.
2. Browse a corpus with `get_corpus`. Full play lists rarely fit into context: prefer
   `get_play_names`, `get_minimal_play_info`, `get_corpus_contents_paged` or
   `get_corpus_metadata_paged` and page through the results, or filter with
   `get_plays_by_author`, `get_plays_by_title`, `get_plays_by_year_normalized`.
3. Inspect a play: `get_play_metadata`, `get_play_metrics`, `get_play_characters`,
   `get_play_network` (co-presence graph), `get_play_character_relations`.
4. Read text: `get_spoken_text` (with gender/relation/role filters),
   `get_spoken_text_of_single_character`, `get_stage_directions`, `get_play_tei`,
   `get_play_plaintext`. For fine-grained access use `get_citable_units` together with
   `get_citable_unit_text` (DTS navigation).
5. Encoding questions: `get_odd_table_of_contents`, `get_odd_section`,
   `get_tei_element_documentation`, `get_feature_check_rule`, `validate_play_tei`.

Notes:
- Corpus identifiers are short codes such as `ger`, `rus`, `als`; play identifiers are
  slugs such as `lessing-emilia-galotti` or `gogol-revizor`.
- Paged tools accept `items_per_page` and `page`; setting both to 0 returns everything.
- Admin tools (`add_corpus`, `load_corpus_from_repository`, `add_play_to_corpus`,
  `remove_play_from_corpus`, `remove_corpus`) write to a local DraCor instance and need
  admin credentials configured on the server.";

/// MCP server wrapper around the DraCor client and tool routers.
#[derive(Clone)]
pub struct DracorMcp {
    tool_router: ToolRouter<Self>,
    client: Arc<DracorClient>,
    urls: DocumentUrls,
}

/// URLs of the auxiliary documents served by the docs tools and resources.
#[derive(Debug, Clone)]
pub struct DocumentUrls {
    pub odd: String,
    pub research: String,
    pub readme: String,
    pub registry: String,
    pub schema: String,
}

impl DocumentUrls {
    /// Fixed document URLs; the RelaxNG schema lives next to the frontend of
    /// the configured instance.
    #[must_use]
    pub fn for_frontend(frontend_base: &str) -> Self {
        Self {
            odd: DRACOR_ODD_URL.to_string(),
            research: DRACOR_RESEARCH_URL.to_string(),
            readme: DRACOR_API_README_URL.to_string(),
            registry: DRACOR_REGISTRY_URL.to_string(),
            schema: format!("{frontend_base}/schema.rng"),
        }
    }
}

impl DracorMcp {
    /// Creates a new server for a shared client handle.
    #[must_use]
    pub fn new(client: Arc<DracorClient>) -> Self {
        let urls = DocumentUrls::for_frontend(client.frontend_base());
        let tool_router = Self::tool_router_info()
            + Self::tool_router_plays()
            + Self::tool_router_network()
            + Self::tool_router_text()
            + Self::tool_router_wikidata()
            + Self::tool_router_browsing()
            + Self::tool_router_dts()
            + Self::tool_router_docs()
            + Self::tool_router_admin();
        Self {
            tool_router,
            client,
            urls,
        }
    }

    pub(crate) fn client(&self) -> &DracorClient {
        &self.client
    }

    pub(crate) const fn urls(&self) -> &DocumentUrls {
        &self.urls
    }

    async fn corpora_resource(&self) -> Result<String, ErrorData> {
        let collection = self
            .client
            .get_json(None, None, Some("dts/collection"))
            .await
            .map_err(helpers::map_api_err)?;
        let corpora = collection
            .get("member")
            .ok_or_else(|| helpers::shape_err("DTS collection response has no member list"))?;
        serde_json::to_string(corpora).map_err(|err| helpers::shape_err(err.to_string()))
    }

    async fn registry_resource(&self) -> Result<String, ErrorData> {
        let registry = self
            .client
            .get_json_url(&self.urls.registry)
            .await
            .map_err(helpers::map_api_err)?;
        serde_json::to_string(&registry).map_err(|err| helpers::shape_err(err.to_string()))
    }
}

#[tool_handler]
impl ServerHandler for DracorMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let mut corpora = RawResource::new(CORPORA_RESOURCE_URI, "corpora");
        corpora.description = Some("All available corpora (collections of plays).".to_string());
        corpora.mime_type = Some("application/json".to_string());

        let mut registry = RawResource::new(REGISTRY_RESOURCE_URI, "registry");
        registry.description =
            Some("All DraCor corpora registered in the DraCor registry.".to_string());
        registry.mime_type = Some("application/json".to_string());

        Ok(ListResourcesResult {
            meta: None,
            resources: vec![corpora.no_annotation(), registry.no_annotation()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let text = match request.uri.as_str() {
            CORPORA_RESOURCE_URI => self.corpora_resource().await?,
            REGISTRY_RESOURCE_URI => self.registry_resource().await?,
            other => {
                return Err(helpers::mcp_err(
                    rmcp::model::ErrorCode::RESOURCE_NOT_FOUND,
                    format!("unknown resource: {other}"),
                ));
            }
        };
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}
