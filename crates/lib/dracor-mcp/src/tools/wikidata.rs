use dracor_core::paginate::{Pagination, paginate};
use dracor_core::tabular::{self, MixnmatchEntry};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DracorMcp, helpers};

/// Parameters carrying a Wikidata identifier.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct QidParams {
    /// Wikidata identifier (Q-number), e.g. `Q131412`.
    pub qid: String,
}

/// Parameters for paging through the mix-n-match table.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MixnmatchParams {
    /// Number of items per batch. Defaults to 0 (everything at once).
    pub items_per_page: Option<usize>,
    /// Page to retrieve. Defaults to 0 (everything at once).
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
struct PlaysWithCharacterPayload {
    plays_with_character: Value,
}

#[derive(Debug, Serialize)]
struct AuthorPayload {
    author: Value,
}

#[derive(Debug, Serialize)]
struct MixnmatchPayload {
    pagination: Pagination,
    data: Vec<MixnmatchEntry>,
}

#[tool_router(router = tool_router_wikidata, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get plays that have a character identified by a Wikidata Q-number.")]
    async fn get_plays_with_character_by_wikidata_id(
        &self,
        Parameters(params): Parameters<QidParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let method = format!("character/{}", params.qid);
        let plays_with_character = self
            .client()
            .get_json(None, None, Some(&method))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(PlaysWithCharacterPayload {
            plays_with_character,
        })?]))
    }

    #[tool(description = "Get information about an author from Wikidata by Q-number, \
                          e.g. Q34628.")]
    async fn get_author_info_from_wikidata(
        &self,
        Parameters(params): Parameters<QidParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let method = format!("wikidata/author/{}", params.qid);
        let author = self
            .client()
            .get_json(None, None, Some(&method))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(AuthorPayload { author })?]))
    }

    #[tool(description = "Get the Wikidata mix-n-match table: DraCor play id, main title and \
                          matched Q-number. Supports batching via items_per_page and page.")]
    async fn get_wikidata_mixnmatch(
        &self,
        Parameters(params): Parameters<MixnmatchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let raw = self
            .client()
            .get_text(None, None, Some("wikidata/mixnmatch"))
            .await
            .map_err(helpers::map_api_err)?;
        let entries = tabular::parse_mixnmatch_csv(&raw).map_err(helpers::map_tabular_err)?;
        let (data, pagination) = paginate(
            &entries,
            params.items_per_page.unwrap_or(0),
            params.page.unwrap_or(0),
        )
        .map_err(helpers::map_paginate_err)?;
        Ok(CallToolResult::success(vec![Content::json(MixnmatchPayload {
            pagination,
            data,
        })?]))
    }
}
