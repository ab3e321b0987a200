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

/// Parameters identifying a play within a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PlayParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
    /// Identifier of a play in the corpus, e.g. `lessing-emilia-galotti`,
    /// `gogol-revizor`.
    pub play_name: String,
}

#[derive(Debug, Serialize)]
struct PlayPayload {
    play: Value,
}

#[derive(Debug, Serialize)]
struct MetricsPayload {
    metrics: Value,
}

#[derive(Debug, Serialize)]
struct CharactersPayload {
    characters: Value,
}

#[tool_router(router = tool_router_plays, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get metadata and network metrics of a single play.")]
    async fn get_play_metadata(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let play = self
            .client()
            .get_json(Some(&params.corpus_name), Some(&params.play_name), None)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(PlayPayload { play })?]))
    }

    #[tool(description = "Get network metrics of a single play.")]
    async fn get_play_metrics(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let metrics = self
            .client()
            .get_json(Some(&params.corpus_name), Some(&params.play_name), Some("metrics"))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(MetricsPayload { metrics })?]))
    }

    #[tool(description = "Get the TEI-XML source of a play.")]
    async fn get_play_tei(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let tei = self
            .client()
            .get_text(Some(&params.corpus_name), Some(&params.play_name), Some("tei"))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::text(tei)]))
    }

    #[tool(description = "Get the plaintext of a play.")]
    async fn get_play_plaintext(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .client()
            .get_text(Some(&params.corpus_name), Some(&params.play_name), Some("txt"))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get the characters of a play.")]
    async fn get_play_characters(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let characters = self
            .client()
            .get_json(Some(&params.corpus_name), Some(&params.play_name), Some("characters"))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(CharactersPayload { characters })?]))
    }
}
