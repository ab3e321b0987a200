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

/// Parameters identifying a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CorpusParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
}

#[derive(Debug, Serialize)]
struct InfoPayload {
    info: Value,
}

#[derive(Debug, Serialize)]
struct CorporaPayload {
    corpora: Value,
}

#[derive(Debug, Serialize)]
struct CorpusPayload {
    corpus: Value,
}

#[derive(Debug, Serialize)]
struct CorpusMetadataPayload {
    metadata: Value,
}

#[tool_router(router = tool_router_info, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get information about the DraCor API instance (endpoint /info).")]
    async fn get_api_info(&self) -> Result<CallToolResult, ErrorData> {
        let info = self
            .client()
            .get_json(None, None, None)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(InfoPayload { info })?]))
    }

    #[tool(description = "List all corpora, including their metrics.")]
    async fn get_corpora(&self) -> Result<CallToolResult, ErrorData> {
        let corpora = self
            .client()
            .get_json_query(None, None, Some("corpora"), &[("include", "metrics")])
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(CorporaPayload { corpora })?]))
    }

    #[tool(description = "Get a single corpus with its list of plays. Prefer the paged \
                          browsing tools when the corpus is large.")]
    async fn get_corpus(
        &self,
        Parameters(params): Parameters<CorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let corpus = self
            .client()
            .get_json(Some(&params.corpus_name), None, None)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(CorpusPayload { corpus })?]))
    }

    #[tool(description = "Get extended metadata of all plays in a corpus. Use \
                          get_corpus_metadata_paged if the result does not fit into context.")]
    async fn get_corpus_metadata(
        &self,
        Parameters(params): Parameters<CorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let metadata = self
            .client()
            .get_json(Some(&params.corpus_name), None, Some("metadata"))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(CorpusMetadataPayload { metadata })?]))
    }
}
