//! Distributed Text Services (DTS) tools.
//!
//! The DTS endpoints address plays by URI and expose the internal structure
//! of a TEI document as citable units, which allows fetching text at the
//! granularity of a single act or scene instead of a whole play.

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

/// Parameters addressing a corpus by DTS identifier.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DtsCorpusParams {
    /// Identifier/URI of the corpus, e.g. `https://staging.dracor.org/id/ger`
    /// or `ger`.
    pub corpus_name: String,
}

/// Parameters addressing a play by DTS URI.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DtsPlayParams {
    /// Identifier/URI of the play, e.g.
    /// `https://staging.dracor.org/id/ger000088`.
    pub play_uri: String,
}

/// Parameters for the DTS Navigation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CitableUnitsParams {
    /// Identifier/URI of the play, e.g.
    /// `https://staging.dracor.org/id/ger000088`.
    pub play_uri: String,
    /// Fragment identifier, e.g. `body/div[2]/div[1]` for the first scene of
    /// the second act. When omitted the whole play is navigated.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    /// Depth to which to retrieve nested citable units, e.g. `1` for one
    /// level, `-1` for all levels. Defaults to `-1`.
    pub down: Option<String>,
}

/// Parameters for the DTS Document endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CitableUnitTextParams {
    /// Identifier/URI of the play, e.g.
    /// `https://staging.dracor.org/id/ger000088`.
    pub play_uri: String,
    /// Fragment identifier of the citable unit, e.g. `body/div[2]/div[1]`.
    #[serde(rename = "ref")]
    pub reference: String,
}

#[derive(Debug, Serialize)]
struct DtsCorpusPayload {
    corpus: Value,
}

#[derive(Debug, Serialize)]
struct DtsPlayPayload {
    play: Value,
}

#[derive(Debug, Serialize)]
struct CitableUnitsPayload {
    citable_units: Value,
}

#[tool_router(router = tool_router_dts, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get information about the DraCor DTS implementation: the version \
                          of the DTS specification and RFC 6570 URI templates for the \
                          Collection, Navigation and Document endpoints.")]
    async fn get_dts_entrypoint(&self) -> Result<CallToolResult, ErrorData> {
        let entrypoint = self
            .client()
            .get_json(None, None, Some("dts"))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(entrypoint)?]))
    }

    #[tool(description = "Get information on a corpus via the DTS Collection endpoint \
                          /dts/collection.")]
    async fn get_corpus_via_dts(
        &self,
        Parameters(params): Parameters<DtsCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let corpus = self
            .client()
            .get_json_query(
                None,
                None,
                Some("dts/collection"),
                &[("id", params.corpus_name.as_str())],
            )
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(DtsCorpusPayload { corpus })?]))
    }

    #[tool(description = "Get information on a play via the DTS Collection endpoint \
                          /dts/collection. The play is addressed by its DTS URI.")]
    async fn get_play_via_dts(
        &self,
        Parameters(params): Parameters<DtsPlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let play = self
            .client()
            .get_json_query(
                None,
                None,
                Some("dts/collection"),
                &[("id", params.play_uri.as_str())],
            )
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(DtsPlayPayload { play })?]))
    }

    #[tool(description = "Get the citable units of a play via the DTS Navigation endpoint \
                          /dts/navigation. Use ref to descend into a segment, e.g. \
                          body/div[2]/div[1], and down to control depth (-1 for all levels).")]
    async fn get_citable_units(
        &self,
        Parameters(params): Parameters<CitableUnitsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let down = params.down.unwrap_or_else(|| "-1".to_string());
        let mut query = vec![("resource", params.play_uri.as_str())];
        if let Some(reference) = params.reference.as_deref() {
            query.push(("ref", reference));
        }
        query.push(("down", down.as_str()));
        let navigation = self
            .client()
            .get_json_query(None, None, Some("dts/navigation"), &query)
            .await
            .map_err(helpers::map_api_err)?;
        let members = navigation
            .get("member")
            .cloned()
            .ok_or_else(|| helpers::shape_err("navigation response has no member list"))?;
        Ok(CallToolResult::success(vec![Content::json(CitableUnitsPayload {
            citable_units: members,
        })?]))
    }

    #[tool(description = "Get the plain text of a single citable unit of a play via the DTS \
                          Document endpoint /dts/document.")]
    async fn get_citable_unit_text(
        &self,
        Parameters(params): Parameters<CitableUnitTextParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .client()
            .get_text_query(
                None,
                None,
                Some("dts/document"),
                &[
                    ("resource", params.play_uri.as_str()),
                    ("ref", params.reference.as_str()),
                    ("mediaType", "text/plain"),
                ],
            )
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
