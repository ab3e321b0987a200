use dracor_core::tabular::{self, CharacterRelation};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};
use serde::Serialize;

use crate::tools::plays::PlayParams;
use crate::{DracorMcp, helpers};

#[derive(Debug, Serialize)]
struct RelationsPayload {
    relations: Vec<CharacterRelation>,
}

#[tool_router(router = tool_router_network, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get the co-presence network of a play as node and edge lists. \
                          Edges connect characters who are on stage together.")]
    async fn get_play_network(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let raw = self
            .client()
            .get_text(Some(&params.corpus_name), Some(&params.play_name), Some("networkdata/csv"))
            .await
            .map_err(helpers::map_api_err)?;
        let graph = tabular::parse_network_csv(&raw).map_err(helpers::map_tabular_err)?;
        Ok(CallToolResult::success(vec![Content::json(graph)?]))
    }

    #[tool(description = "Get kinship and other social relations between the characters of a \
                          play.")]
    async fn get_play_character_relations(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let raw = self
            .client()
            .get_text(Some(&params.corpus_name), Some(&params.play_name), Some("relations/csv"))
            .await
            .map_err(helpers::map_api_err)?;
        let relations = tabular::parse_relations_csv(&raw).map_err(helpers::map_tabular_err)?;
        Ok(CallToolResult::success(vec![Content::json(RelationsPayload { relations })?]))
    }
}
