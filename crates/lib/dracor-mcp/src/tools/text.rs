use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ErrorCode},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::plays::PlayParams;
use crate::{DracorMcp, helpers};

/// Parameters for filtered spoken-text retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SpokenTextParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
    /// Identifier of a play in the corpus, e.g. `lessing-emilia-galotti`.
    pub play_name: String,
    /// Filter by gender: `FEMALE`, `MALE`, `UNKNOWN`.
    pub gender: Option<String>,
    /// Filter by relation, e.g. `siblings`, `friends`, `spouses`,
    /// `parent_of_active`, `lover_of_passive`.
    pub relation: Option<String>,
    /// Filter by the role of a character.
    pub role: Option<String>,
}

/// Parameters selecting one character of a play.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CharacterTextParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
    /// Identifier of a play in the corpus, e.g. `lessing-emilia-galotti`.
    pub play_name: String,
    /// Identifier of the character, e.g. `marinelli`.
    pub character_id: String,
}

#[derive(Debug, Serialize)]
struct SpokenTextPayload {
    text: String,
}

#[derive(Debug, Serialize)]
struct SpokenTextsByCharacterPayload {
    spoken_texts: Value,
}

#[derive(Debug, Serialize)]
struct CharacterTextPayload {
    character_spoken_text: Value,
}

#[derive(Debug, Serialize)]
struct StageDirectionsPayload {
    stage_directions: String,
}

#[tool_router(router = tool_router_text, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get the spoken text of a play, excluding stage directions. \
                          Optionally filtered by gender, relation or role.")]
    async fn get_spoken_text(
        &self,
        Parameters(params): Parameters<SpokenTextParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(gender) = params.gender.as_deref() {
            query.push(("gender", gender));
        }
        if let Some(relation) = params.relation.as_deref() {
            query.push(("relation", relation));
        }
        if let Some(role) = params.role.as_deref() {
            query.push(("role", role));
        }
        let text = self
            .client()
            .get_text_query(
                Some(&params.corpus_name),
                Some(&params.play_name),
                Some("spoken-text"),
                &query,
            )
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(SpokenTextPayload { text })?]))
    }

    #[tool(description = "Get the spoken text of each character of a play. The items in the \
                          text lists are speech acts.")]
    async fn get_spoken_text_by_characters(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let spoken_texts = self
            .client()
            .get_json(
                Some(&params.corpus_name),
                Some(&params.play_name),
                Some("spoken-text-by-character"),
            )
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(
            SpokenTextsByCharacterPayload { spoken_texts },
        )?]))
    }

    #[tool(description = "Get the speech acts of a single character of a play.")]
    async fn get_spoken_text_of_single_character(
        &self,
        Parameters(params): Parameters<CharacterTextParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let all_texts = self
            .client()
            .get_json(
                Some(&params.corpus_name),
                Some(&params.play_name),
                Some("spoken-text-by-character"),
            )
            .await
            .map_err(helpers::map_api_err)?;
        let items = all_texts
            .as_array()
            .ok_or_else(|| helpers::shape_err("spoken-text-by-character did not return a list"))?;
        let character = items
            .iter()
            .find(|item| item.get("id").and_then(Value::as_str) == Some(params.character_id.as_str()))
            .ok_or_else(|| {
                helpers::mcp_err(
                    ErrorCode::RESOURCE_NOT_FOUND,
                    format!(
                        "character '{}' not found in play {}",
                        params.character_id, params.play_name
                    ),
                )
            })?;
        let text = character.get("text").cloned().unwrap_or(Value::Null);
        Ok(CallToolResult::success(vec![Content::json(CharacterTextPayload {
            character_spoken_text: text,
        })?]))
    }

    #[tool(description = "Get the text of all stage directions of a play.")]
    async fn get_stage_directions(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let stage_directions = self
            .client()
            .get_text(Some(&params.corpus_name), Some(&params.play_name), Some("stage-directions"))
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(StageDirectionsPayload {
            stage_directions,
        })?]))
    }

    #[tool(description = "Get the text of all stage directions of a play, including the \
                          speakers.")]
    async fn get_stage_directions_with_speakers(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let stage_directions = self
            .client()
            .get_text(
                Some(&params.corpus_name),
                Some(&params.play_name),
                Some("stage-directions-with-speakers"),
            )
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::json(StageDirectionsPayload {
            stage_directions,
        })?]))
    }
}
