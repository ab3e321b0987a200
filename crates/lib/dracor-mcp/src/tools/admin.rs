//! Admin tools for local DraCor instances.
//!
//! All of these write to the eXist-DB database behind the configured
//! instance and require admin credentials on the server. Rejections by the
//! API (corpus exists, play not found, update already running) come back as
//! regular outcome payloads so the caller can react to them.

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

use crate::tools::plays::PlayParams;
use crate::{DracorMcp, helpers};

/// Parameters for creating a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddCorpusParams {
    /// Metadata of the corpus, e.g. `{"name": "test", "title": "Test Drama
    /// Corpus", "repository": "https://github.com/dracor-org/testdracor"}`.
    pub corpus_metadata: Value,
}

/// Parameters naming a corpus on the local instance.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AdminCorpusParams {
    /// Identifier of the corpus, e.g. `test`.
    pub corpus_name: String,
}

/// Parameters for uploading the TEI of a play.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddPlayParams {
    /// Identifier of a corpus, e.g. `test`.
    pub corpus_name: String,
    /// Identifier (play_name) of the play to create or overwrite.
    pub play_name: String,
    /// TEI-XML encoded play.
    pub tei: String,
}

#[tool_router(router = tool_router_admin, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Add a corpus to a local DraCor instance. Requires admin \
                          credentials. Takes corpus metadata with name, title and optional \
                          repository.")]
    async fn add_corpus(
        &self,
        Parameters(params): Parameters<AddCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .client()
            .create_corpus(&params.corpus_metadata)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(outcome)?]))
    }

    #[tool(description = "Load the plays of a corpus from its GitHub repository into a local \
                          DraCor instance. Requires admin credentials. The update is \
                          scheduled and may take a while.")]
    async fn load_corpus_from_repository(
        &self,
        Parameters(params): Parameters<AdminCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .client()
            .load_corpus(&params.corpus_name)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(outcome)?]))
    }

    #[tool(description = "Add the TEI file of a play to a corpus on a local DraCor instance. \
                          Requires admin credentials.")]
    async fn add_play_to_corpus(
        &self,
        Parameters(params): Parameters<AddPlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .client()
            .put_play_tei(&params.corpus_name, &params.play_name, params.tei)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(outcome)?]))
    }

    #[tool(description = "Remove a play from a corpus on a local DraCor instance. Requires \
                          admin credentials.")]
    async fn remove_play_from_corpus(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .client()
            .delete_play(&params.corpus_name, &params.play_name)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(outcome)?]))
    }

    #[tool(description = "Remove a corpus from a local DraCor instance. Requires admin \
                          credentials.")]
    async fn remove_corpus(
        &self,
        Parameters(params): Parameters<AdminCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .client()
            .delete_corpus(&params.corpus_name)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(outcome)?]))
    }
}
