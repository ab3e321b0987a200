//! Context-budget helpers: paged and filtered views of a corpus's plays.
//!
//! Corpus responses can be far larger than an LLM context window. These
//! tools fetch the full list once per call and slice or filter it before it
//! crosses the tool boundary.

use dracor_core::links;
use dracor_core::paginate::{Pagination, paginate};
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

/// Parameters for paged corpus browsing. The `(0, 0)` default returns
/// everything.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PagedCorpusParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
    /// Number of items per batch. Defaults to 0 (everything at once).
    pub items_per_page: Option<usize>,
    /// Page to retrieve. Defaults to 0 (everything at once).
    pub page: Option<usize>,
}

/// Parameters for filtering plays by author name.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AuthorFilterParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
    /// Name (or part of a name) of an author, e.g. `Goethe`, `Shakespeare`.
    pub author_name: String,
}

/// Parameters for filtering plays by main title.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TitleFilterParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
    /// Main title (or part of it) of a play, e.g. `Faust`, `Tempest`.
    pub title: String,
}

/// Parameters for filtering plays by normalized year.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct YearFilterParams {
    /// Identifier of a corpus, e.g. `ger`, `rus`, `als`.
    pub corpus_name: String,
    /// Start of the year range (inclusive).
    pub year_start: i64,
    /// End of the year range (inclusive).
    pub year_end: i64,
}

/// Compact play record: identifiers, title, normalized year and author
/// short names.
#[derive(Debug, Clone, Serialize)]
pub struct MinimalPlay {
    pub name: String,
    pub id: String,
    pub title: String,
    #[serde(rename = "yearNormalized")]
    pub year_normalized: Value,
    pub authors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PagedMinimalPlaysPayload {
    pagination: Pagination,
    plays: Vec<MinimalPlay>,
}

#[derive(Debug, Serialize)]
struct PagedPlayNamesPayload {
    pagination: Pagination,
    play_names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PagedPlaysPayload {
    pagination: Pagination,
    plays: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct PlaysPayload {
    plays: Vec<Value>,
}

#[tool_router(router = tool_router_browsing, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get a compact list of the plays in a corpus: identifiers, main \
                          title, author short names and normalized year. Supports batching \
                          via items_per_page and page.")]
    async fn get_minimal_play_info(
        &self,
        Parameters(params): Parameters<PagedCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let plays = self.fetch_corpus_plays(&params.corpus_name).await?;
        let (page, pagination) = paginate(
            &plays,
            params.items_per_page.unwrap_or(0),
            params.page.unwrap_or(0),
        )
        .map_err(helpers::map_paginate_err)?;
        let plays = page.iter().map(minimal_play).collect();
        Ok(CallToolResult::success(vec![Content::json(PagedMinimalPlaysPayload {
            pagination,
            plays,
        })?]))
    }

    #[tool(description = "Get only the play_name identifiers of a corpus, the shortest \
                          possible play list. Supports batching via items_per_page and page.")]
    async fn get_play_names(
        &self,
        Parameters(params): Parameters<PagedCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let plays = self.fetch_corpus_plays(&params.corpus_name).await?;
        let names: Vec<String> = plays
            .iter()
            .map(|play| {
                play.get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        let (play_names, pagination) = paginate(
            &names,
            params.items_per_page.unwrap_or(0),
            params.page.unwrap_or(0),
        )
        .map_err(helpers::map_paginate_err)?;
        Ok(CallToolResult::success(vec![Content::json(PagedPlayNamesPayload {
            pagination,
            play_names,
        })?]))
    }

    #[tool(description = "Get extended metadata of the plays in a corpus in batches. \
                          Defaults to 50 plays per page. The unpaged metadata endpoint \
                          tends to time out on large corpora.")]
    async fn get_corpus_metadata_paged(
        &self,
        Parameters(params): Parameters<PagedCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let metadata = self
            .client()
            .get_json(Some(&params.corpus_name), None, Some("metadata"))
            .await
            .map_err(helpers::map_api_err)?;
        let items = metadata
            .as_array()
            .ok_or_else(|| helpers::shape_err("corpus metadata did not return a list"))?;
        let (plays, pagination) = paginate(
            items,
            params.items_per_page.unwrap_or(50),
            params.page.unwrap_or(1),
        )
        .map_err(helpers::map_paginate_err)?;
        Ok(CallToolResult::success(vec![Content::json(PagedPlaysPayload {
            pagination,
            plays,
        })?]))
    }

    #[tool(description = "Get the plays of a corpus in batches, without the corpus metadata. \
                          Defaults to 25 plays per page.")]
    async fn get_corpus_contents_paged(
        &self,
        Parameters(params): Parameters<PagedCorpusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let plays = self.fetch_corpus_plays(&params.corpus_name).await?;
        let (plays, pagination) = paginate(
            &plays,
            params.items_per_page.unwrap_or(25),
            params.page.unwrap_or(1),
        )
        .map_err(helpers::map_paginate_err)?;
        Ok(CallToolResult::success(vec![Content::json(PagedPlaysPayload {
            pagination,
            plays,
        })?]))
    }

    #[tool(description = "Filter the plays of a corpus by author. Matches when the supplied \
                          name is contained in any author's name.")]
    async fn get_plays_by_author(
        &self,
        Parameters(params): Parameters<AuthorFilterParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let plays = self.fetch_corpus_plays(&params.corpus_name).await?;
        let plays = plays
            .into_iter()
            .filter(|play| {
                play.get("authors")
                    .and_then(Value::as_array)
                    .is_some_and(|authors| {
                        authors.iter().any(|author| {
                            author
                                .get("name")
                                .and_then(Value::as_str)
                                .is_some_and(|name| name.contains(&params.author_name))
                        })
                    })
            })
            .collect();
        Ok(CallToolResult::success(vec![Content::json(PlaysPayload { plays })?]))
    }

    #[tool(description = "Filter the plays of a corpus by main title (case-insensitive \
                          substring match).")]
    async fn get_plays_by_title(
        &self,
        Parameters(params): Parameters<TitleFilterParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let needle = params.title.to_lowercase();
        let plays = self.fetch_corpus_plays(&params.corpus_name).await?;
        let plays = plays
            .into_iter()
            .filter(|play| {
                play.get("title")
                    .and_then(Value::as_str)
                    .is_some_and(|title| title.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(CallToolResult::success(vec![Content::json(PlaysPayload { plays })?]))
    }

    #[tool(description = "Filter the plays of a corpus by normalized year, inclusive on both \
                          ends. Plays without a normalized year are skipped.")]
    async fn get_plays_by_year_normalized(
        &self,
        Parameters(params): Parameters<YearFilterParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let plays = self.fetch_corpus_plays(&params.corpus_name).await?;
        let plays = plays
            .into_iter()
            .filter(|play| {
                play.get("yearNormalized")
                    .and_then(Value::as_i64)
                    .is_some_and(|year| params.year_start <= year && year <= params.year_end)
            })
            .collect();
        Ok(CallToolResult::success(vec![Content::json(PlaysPayload { plays })?]))
    }

    #[tool(description = "Get links for viewing and downloading play data: DraCor frontend \
                          tabs, CLARIN Language Resource Switchboard, Voyant Tools, Gephi \
                          Lite and network/relation download formats.")]
    async fn get_play_data_links(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let links = links::play_links(
            self.client().frontend_base(),
            self.client().base_url(),
            &params.corpus_name,
            &params.play_name,
        );
        Ok(CallToolResult::success(vec![Content::json(links)?]))
    }
}

impl DracorMcp {
    async fn fetch_corpus_plays(&self, corpus_name: &str) -> Result<Vec<Value>, ErrorData> {
        let corpus = self
            .client()
            .get_json(Some(corpus_name), None, None)
            .await
            .map_err(helpers::map_api_err)?;
        corpus
            .get("plays")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| helpers::shape_err("corpus response does not contain a plays list"))
    }
}

fn minimal_play(play: &Value) -> MinimalPlay {
    let authors = play
        .get("authors")
        .and_then(Value::as_array)
        .map(|authors| {
            authors
                .iter()
                .filter_map(|author| author.get("shortname").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    MinimalPlay {
        name: string_field(play, "name"),
        id: string_field(play, "id"),
        title: string_field(play, "title"),
        year_normalized: play.get("yearNormalized").cloned().unwrap_or(Value::Null),
        authors,
    }
}

fn string_field(play: &Value, key: &str) -> String {
    play.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_play_extracts_author_shortnames() {
        let play = json!({
            "name": "lessing-emilia-galotti",
            "id": "ger000088",
            "title": "Emilia Galotti",
            "yearNormalized": 1772,
            "authors": [{"name": "Lessing, Gotthold Ephraim", "shortname": "Lessing"}],
            "source": {"name": "TextGrid"}
        });
        let minimal = minimal_play(&play);
        assert_eq!(minimal.name, "lessing-emilia-galotti");
        assert_eq!(minimal.id, "ger000088");
        assert_eq!(minimal.authors, vec!["Lessing"]);
        assert_eq!(minimal.year_normalized, json!(1772));
    }

    #[test]
    fn minimal_play_tolerates_missing_fields() {
        let minimal = minimal_play(&json!({"name": "anonymous-play"}));
        assert_eq!(minimal.name, "anonymous-play");
        assert_eq!(minimal.id, "");
        assert_eq!(minimal.year_normalized, Value::Null);
        assert!(minimal.authors.is_empty());
    }
}
