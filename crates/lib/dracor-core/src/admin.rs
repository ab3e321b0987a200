//! Write operations against a local DraCor instance.
//!
//! Creating, loading and removing corpora and plays require basic-auth
//! credentials for the eXist-DB behind the API. The operations are not
//! transactional: a transport failure after the server accepted a write is
//! reported as an error even though the side effect may have committed, and
//! nothing is retried.
//!
//! Expected upstream failure codes (404, 409, 400) are part of each
//! operation's result shape rather than errors, because the caller is an LLM
//! that acts on them ("corpus already exists", "update still running").

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::client::{ApiError, DracorClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// Structured result of an admin write operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminOutcome {
    pub status: OutcomeStatus,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl AdminOutcome {
    fn success(status_code: u16, api_response: Option<Value>, comment: Option<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            status_code,
            api_response,
            comment,
        }
    }

    fn failed(status_code: u16, api_response: Option<Value>, comment: Option<String>) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            status_code,
            api_response,
            comment,
        }
    }
}

impl DracorClient {
    /// Creates a corpus from a metadata document (name, title, repository).
    ///
    /// # Errors
    /// Returns `ApiError` only for transport failures; upstream rejections
    /// are expressed in the outcome.
    pub async fn create_corpus(&self, corpus_metadata: &Value) -> Result<AdminOutcome, ApiError> {
        let url = self.api_url(None, None, Some("corpora"));
        let response = self
            .http()
            .post(&url)
            .basic_auth(&self.credentials().username, Some(&self.credentials().password))
            .json(corpus_metadata)
            .send()
            .await?;
        let code = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        info!(code, "create corpus");
        Ok(create_corpus_outcome(code, body))
    }

    /// Schedules loading a corpus's plays from its GitHub repository.
    ///
    /// # Errors
    /// Returns `ApiError` only for transport failures.
    pub async fn load_corpus(&self, corpus_name: &str) -> Result<AdminOutcome, ApiError> {
        let url = self.api_url(Some(corpus_name), None, None);
        let response = self
            .http()
            .post(&url)
            .basic_auth(&self.credentials().username, Some(&self.credentials().password))
            .json(&json!({ "load": true }))
            .send()
            .await?;
        let code = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        info!(code, corpus_name, "load corpus");
        Ok(load_corpus_outcome(code, body, corpus_name))
    }

    /// Adds or replaces the TEI document of a play in a corpus.
    ///
    /// # Errors
    /// Returns `ApiError` only for transport failures.
    pub async fn put_play_tei(
        &self,
        corpus_name: &str,
        play_name: &str,
        tei: String,
    ) -> Result<AdminOutcome, ApiError> {
        let url = self.api_url(Some(corpus_name), Some(play_name), Some("tei"));
        let response = self
            .http()
            .put(&url)
            .basic_auth(&self.credentials().username, Some(&self.credentials().password))
            .header("Content-Type", "application/xml")
            .body(tei)
            .send()
            .await?;
        let code = response.status().as_u16();
        info!(code, corpus_name, play_name, "put play TEI");
        Ok(put_play_outcome(code, corpus_name, play_name))
    }

    /// Removes a play from a corpus.
    ///
    /// # Errors
    /// Returns `ApiError` only for transport failures.
    pub async fn delete_play(
        &self,
        corpus_name: &str,
        play_name: &str,
    ) -> Result<AdminOutcome, ApiError> {
        let url = self.api_url(Some(corpus_name), Some(play_name), None);
        let response = self
            .http()
            .delete(&url)
            .basic_auth(&self.credentials().username, Some(&self.credentials().password))
            .send()
            .await?;
        let code = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        info!(code, corpus_name, play_name, "delete play");
        Ok(delete_play_outcome(code, body, corpus_name, play_name))
    }

    /// Removes a corpus and all of its plays.
    ///
    /// # Errors
    /// Returns `ApiError` only for transport failures.
    pub async fn delete_corpus(&self, corpus_name: &str) -> Result<AdminOutcome, ApiError> {
        let url = self.api_url(Some(corpus_name), None, None);
        let response = self
            .http()
            .delete(&url)
            .basic_auth(&self.credentials().username, Some(&self.credentials().password))
            .send()
            .await?;
        let code = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        info!(code, corpus_name, "delete corpus");
        Ok(delete_corpus_outcome(code, body, corpus_name))
    }
}

fn create_corpus_outcome(code: u16, api_response: Option<Value>) -> AdminOutcome {
    match code {
        200 | 201 => AdminOutcome::success(code, api_response, None),
        409 => AdminOutcome::failed(code, api_response, Some("Corpus already exists!".to_string())),
        _ => AdminOutcome::failed(code, None, None),
    }
}

fn load_corpus_outcome(code: u16, api_response: Option<Value>, corpus_name: &str) -> AdminOutcome {
    match code {
        202 => AdminOutcome::success(
            code,
            api_response,
            Some(
                "Corpus update has been scheduled. It may take some time until the data has been loaded."
                    .to_string(),
            ),
        ),
        404 => AdminOutcome::failed(
            code,
            api_response,
            Some(format!("Corpus with the identifier {corpus_name} does not exist!")),
        ),
        409 => AdminOutcome::failed(
            code,
            api_response,
            Some(
                "Corpus update could not be scheduled. Another update has not yet finished."
                    .to_string(),
            ),
        ),
        _ => AdminOutcome::failed(code, None, None),
    }
}

fn put_play_outcome(code: u16, corpus_name: &str, play_name: &str) -> AdminOutcome {
    match code {
        200 => AdminOutcome::success(
            code,
            None,
            Some(format!("Play {play_name} has been added to corpus {corpus_name}.")),
        ),
        400 => AdminOutcome::failed(
            code,
            None,
            Some("The request body is not a valid TEI document or the play name is invalid.".to_string()),
        ),
        404 => AdminOutcome::failed(code, None, Some(format!("Corpus {corpus_name} does not exist."))),
        _ => AdminOutcome::failed(code, None, None),
    }
}

fn delete_play_outcome(
    code: u16,
    api_response: Option<Value>,
    corpus_name: &str,
    play_name: &str,
) -> AdminOutcome {
    match code {
        200 => AdminOutcome::success(
            code,
            api_response,
            Some(format!("Play {play_name} has been removed from corpus {corpus_name}.")),
        ),
        404 => AdminOutcome::failed(
            code,
            api_response,
            Some("Play and/or corpus do not exist.".to_string()),
        ),
        _ => AdminOutcome::failed(code, None, None),
    }
}

fn delete_corpus_outcome(code: u16, api_response: Option<Value>, corpus_name: &str) -> AdminOutcome {
    match code {
        200 => AdminOutcome::success(code, api_response, None),
        404 => AdminOutcome::failed(
            code,
            api_response,
            Some(format!("Corpus with the identifier {corpus_name} does not exist!")),
        ),
        _ => AdminOutcome::failed(code, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_creation_accepts_200_and_201() {
        for code in [200, 201] {
            let outcome = create_corpus_outcome(code, Some(json!({"name": "test"})));
            assert_eq!(outcome.status, OutcomeStatus::Success);
            assert_eq!(outcome.status_code, code);
        }
    }

    #[test]
    fn corpus_conflict_reports_already_exists() {
        let outcome = create_corpus_outcome(409, None);
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(outcome.comment.as_deref(), Some("Corpus already exists!"));
    }

    #[test]
    fn corpus_load_is_scheduled_on_202() {
        let outcome = load_corpus_outcome(202, None, "test");
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert!(outcome.comment.unwrap().contains("scheduled"));

        let conflict = load_corpus_outcome(409, None, "test");
        assert_eq!(conflict.status, OutcomeStatus::Failed);
        assert!(conflict.comment.unwrap().contains("not yet finished"));
    }

    #[test]
    fn play_upload_maps_bad_request_and_missing_corpus() {
        let invalid = put_play_outcome(400, "test", "new-play");
        assert!(invalid.comment.unwrap().contains("not a valid TEI document"));

        let missing = put_play_outcome(404, "test", "new-play");
        assert_eq!(missing.comment.as_deref(), Some("Corpus test does not exist."));

        let ok = put_play_outcome(200, "test", "new-play");
        assert_eq!(ok.status, OutcomeStatus::Success);
    }

    #[test]
    fn deletions_name_the_removed_entities() {
        let play = delete_play_outcome(200, None, "test", "old-play");
        assert_eq!(
            play.comment.as_deref(),
            Some("Play old-play has been removed from corpus test.")
        );

        let corpus = delete_corpus_outcome(404, None, "test");
        assert_eq!(corpus.status, OutcomeStatus::Failed);
        assert!(corpus.comment.unwrap().contains("does not exist"));
    }

    #[test]
    fn unexpected_codes_fail_without_commentary() {
        let outcome = create_corpus_outcome(500, None);
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(outcome.status_code, 500);
        assert!(outcome.comment.is_none());
        assert!(outcome.api_response.is_none());
    }

    #[test]
    fn outcome_serializes_without_empty_fields() {
        let outcome = create_corpus_outcome(500, None);
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"status": "Failed", "status_code": 500}));
    }
}
