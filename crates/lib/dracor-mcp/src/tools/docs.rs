//! Documentation tools: ODD encoding guidelines, OpenAPI specification,
//! research listing, API readme and RelaxNG validation.

use dracor_core::odd::OddDocument;
use dracor_core::schema::RelaxNgIndex;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{DracorMcp, helpers};

/// Parameters for retrieving a section of the ODD by its identifier.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OddSectionParams {
    /// `xml:id` of a section, e.g. `levelsOfEncodingPlays`. Use the table of
    /// contents tool to discover section identifiers.
    pub section_id: String,
}

/// Parameters for retrieving the documentation of a TEI element.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ElementDocParams {
    /// Name of a TEI element, e.g. `sp`, `stage`, `castList`.
    pub element_name: String,
}

/// Parameters for retrieving an encoding rule behind an API feature.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FeatureRuleParams {
    /// Identifier of an API feature, e.g. `normalizedGenre`.
    pub feature_id: String,
}

/// Parameters for validating an XML document against the DraCor schema.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ValidateParams {
    /// Name of the file, used in the validation report.
    pub file_name: String,
    /// Content of the XML file to validate.
    pub file_content: String,
    /// URL of the RelaxNG schema. Optional, the schema of the configured
    /// DraCor instance is used when omitted.
    pub schema_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct TocPayload {
    table_of_contents: Vec<dracor_core::odd::TocEntry>,
}

#[derive(Debug, Serialize)]
struct ValidationPayload {
    valid: bool,
    comment: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    error_log: Vec<String>,
}

#[tool_router(router = tool_router_docs, vis = "pub")]
impl DracorMcp {
    #[tool(description = "Get a table of contents of the DraCor ODD, the encoding guidelines \
                          of the corpora. Section identifiers can be passed to \
                          get_odd_section.")]
    async fn get_odd_table_of_contents(&self) -> Result<CallToolResult, ErrorData> {
        let source = self.fetch_odd().await?;
        let odd = OddDocument::parse(&source).map_err(helpers::map_odd_err)?;
        let table_of_contents = odd.table_of_contents();
        Ok(CallToolResult::success(vec![Content::json(TocPayload {
            table_of_contents,
        })?]))
    }

    #[tool(description = "Get a single section of the DraCor ODD as raw TEI, addressed by \
                          the section identifier from the table of contents.")]
    async fn get_odd_section(
        &self,
        Parameters(params): Parameters<OddSectionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let source = self.fetch_odd().await?;
        let odd = OddDocument::parse(&source).map_err(helpers::map_odd_err)?;
        let section = odd.section(&params.section_id).map_err(helpers::map_odd_err)?;
        Ok(CallToolResult::success(vec![Content::text(section)]))
    }

    #[tool(description = "Get the elementSpec of a TEI element from the DraCor ODD, i.e. how \
                          the element is used in the corpora.")]
    async fn get_tei_element_documentation(
        &self,
        Parameters(params): Parameters<ElementDocParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let source = self.fetch_odd().await?;
        let odd = OddDocument::parse(&source).map_err(helpers::map_odd_err)?;
        let spec = odd
            .element_documentation(&params.element_name)
            .map_err(helpers::map_odd_err)?;
        Ok(CallToolResult::success(vec![Content::text(spec)]))
    }

    #[tool(description = "Get the encoding rule (constraintSpec) that backs an API feature, \
                          i.e. what a play must encode for the feature to be extracted.")]
    async fn get_feature_check_rule(
        &self,
        Parameters(params): Parameters<FeatureRuleParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let source = self.fetch_odd().await?;
        let odd = OddDocument::parse(&source).map_err(helpers::map_odd_err)?;
        let rule = odd
            .feature_check_rule(&params.feature_id)
            .map_err(helpers::map_odd_err)?;
        Ok(CallToolResult::success(vec![Content::text(rule)]))
    }

    #[tool(description = "Get the OpenAPI specification of the DraCor API as YAML.")]
    async fn get_openapi_specification(&self) -> Result<CallToolResult, ErrorData> {
        let info = self
            .client()
            .get_json(None, None, Some("info"))
            .await
            .map_err(helpers::map_api_err)?;
        let openapi_url = info
            .get("openapi")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| helpers::shape_err("API info does not contain an openapi URL"))?;
        let spec = self
            .client()
            .get_text_url(openapi_url)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::text(spec)]))
    }

    #[tool(description = "Get the listing of research based on DraCor, as published at \
                          https://dracor.org/doc/research.")]
    async fn get_dracor_research(&self) -> Result<CallToolResult, ErrorData> {
        let research = self
            .client()
            .get_text_url(&self.urls().research)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::text(research)]))
    }

    #[tool(description = "Get the README of the DraCor API repository, including instructions \
                          for running a local instance.")]
    async fn get_api_readme(&self) -> Result<CallToolResult, ErrorData> {
        let readme = self
            .client()
            .get_text_url(&self.urls().readme)
            .await
            .map_err(helpers::map_api_err)?;
        Ok(CallToolResult::success(vec![Content::text(readme)]))
    }

    #[tool(description = "Validate an XML file against the DraCor RelaxNG schema. Reports \
                          well-formedness problems and names not declared by the schema.")]
    async fn validate_play_tei(
        &self,
        Parameters(params): Parameters<ValidateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let schema_url = params
            .schema_url
            .unwrap_or_else(|| self.urls().schema.clone());
        let grammar = self
            .client()
            .get_text_url(&schema_url)
            .await
            .map_err(helpers::map_api_err)?;
        let index = RelaxNgIndex::parse(&grammar).map_err(helpers::map_schema_err)?;
        let report = index.validate(&params.file_content);
        let comment = if report.valid {
            format!(
                "{} validates against the DraCor RelaxNG schema from {schema_url}.",
                params.file_name
            )
        } else {
            format!(
                "{} does not validate against the DraCor RelaxNG schema from {schema_url}. \
                 See the error log.",
                params.file_name
            )
        };
        Ok(CallToolResult::success(vec![Content::json(ValidationPayload {
            valid: report.valid,
            comment,
            error_log: report.errors,
        })?]))
    }
}

impl DracorMcp {
    async fn fetch_odd(&self) -> Result<String, ErrorData> {
        self.client()
            .get_text_url(&self.urls().odd)
            .await
            .map_err(helpers::map_api_err)
    }
}
