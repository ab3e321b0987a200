//! The single boundary where core errors become host-visible MCP errors.
//!
//! Tool bodies propagate typed errors; nothing inside dracor-core knows
//! about the protocol. Upstream 404s map to resource-not-found so the host
//! can distinguish "no such play" from a broken instance.

use std::borrow::Cow;

use dracor_core::client::ApiError;
use dracor_core::odd::OddError;
use dracor_core::paginate::PaginateError;
use dracor_core::schema::SchemaError;
use dracor_core::tabular::TabularError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub(crate) fn shape_err(message: impl Into<Cow<'static, str>>) -> ErrorData {
    mcp_err(ErrorCode::INTERNAL_ERROR, message)
}

pub(crate) fn map_api_err(err: ApiError) -> ErrorData {
    match err.status_code() {
        Some(404) => mcp_err(ErrorCode::RESOURCE_NOT_FOUND, err.to_string()),
        _ => mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string()),
    }
}

pub(crate) fn map_tabular_err(err: TabularError) -> ErrorData {
    mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
}

pub(crate) fn map_paginate_err(err: PaginateError) -> ErrorData {
    mcp_err(ErrorCode::INVALID_PARAMS, err.to_string())
}

pub(crate) fn map_odd_err(err: OddError) -> ErrorData {
    match err {
        OddError::NotFound { .. } => mcp_err(ErrorCode::RESOURCE_NOT_FOUND, err.to_string()),
        OddError::Parse(_) => mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string()),
    }
}

pub(crate) fn map_schema_err(err: SchemaError) -> ErrorData {
    mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_404_becomes_resource_not_found() {
        let err = map_api_err(ApiError::Status { code: 404 });
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert!(err.message.contains("404"));
        assert!(err.data.is_none(), "no partial payload accompanies a failure");
    }

    #[test]
    fn other_statuses_are_internal_errors() {
        for code in [400, 409, 500, 502] {
            let err = map_api_err(ApiError::Status { code });
            assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        }
    }

    #[test]
    fn invalid_page_requests_are_parameter_errors() {
        let err = map_paginate_err(PaginateError::InvalidPageRequest {
            items_per_page: 0,
            page: 3,
        });
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn missing_odd_sections_are_resource_not_found() {
        let err = map_odd_err(OddError::NotFound {
            what: "section",
            ident: "missing".to_string(),
        });
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }
}
