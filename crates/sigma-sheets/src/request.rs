//! Request/response boundary
//!
//! The wire shape consumed by UI/IPC hosts. [`handle_request`] never fails:
//! every error flattens into a `{ success: false, error }` response, so a
//! host can forward the result as-is and is guaranteed the spreadsheet was
//! not touched on failure.

use crate::propagation::{propagate, PropagationError, PropagationResult};
use serde::{Deserialize, Serialize};
use sigma_sheets_core::{ColumnRange, VariableBinding};

/// One variable in the wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Variable name as it appears in the formula
    pub name: String,
    /// Value range in "A1:A10" notation
    pub value_range: String,
    /// Uncertainty range in "B1:B10" notation; `null` or an empty string
    /// means the variable carries no uncertainty
    #[serde(default)]
    pub uncertainty_range: Option<String>,
}

/// A propagation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationRequest {
    pub variables: Vec<VariableSpec>,
    pub formula: String,
}

/// A propagation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationResponse {
    pub success: bool,
    #[serde(default)]
    pub value_formulas: Vec<String>,
    #[serde(default)]
    pub uncertainty_formulas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PropagationResponse {
    fn ok(result: PropagationResult) -> Self {
        Self {
            success: true,
            value_formulas: result.value_formulas,
            uncertainty_formulas: result.uncertainty_formulas,
            error: None,
        }
    }

    fn fail(error: &PropagationError) -> Self {
        Self {
            success: false,
            value_formulas: Vec::new(),
            uncertainty_formulas: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Parse the wire shape into validated bindings
fn bindings_from_specs(specs: &[VariableSpec]) -> Result<Vec<VariableBinding>, PropagationError> {
    specs
        .iter()
        .map(|spec| {
            let values = ColumnRange::parse(&spec.value_range)?;
            let uncertainties = match spec.uncertainty_range.as_deref() {
                None => None,
                Some(text) if text.trim().is_empty() => None,
                Some(text) => Some(ColumnRange::parse(text)?),
            };
            Ok(VariableBinding::new(
                spec.name.clone(),
                values,
                uncertainties,
            )?)
        })
        .collect()
}

/// Run a propagation request end to end
pub fn handle_request(request: &PropagationRequest) -> PropagationResponse {
    let outcome = bindings_from_specs(&request.variables)
        .and_then(|bindings| propagate(&bindings, &request.formula, None));

    match outcome {
        Ok(result) => PropagationResponse::ok(result),
        Err(error) => {
            log::warn!("propagation request failed: {error}");
            PropagationResponse::fail(&error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(name: &str, values: &str, sigmas: Option<&str>) -> VariableSpec {
        VariableSpec {
            name: name.into(),
            value_range: values.into(),
            uncertainty_range: sigmas.map(Into::into),
        }
    }

    #[test]
    fn test_successful_request() {
        let request = PropagationRequest {
            variables: vec![
                spec("x", "A1:A2", Some("B1:B2")),
                spec("y", "C1:C2", Some("D1:D2")),
            ],
            formula: "x+y".into(),
        };

        let response = handle_request(&request);
        assert!(response.success);
        assert_eq!(response.error, None);
        assert_eq!(response.value_formulas, vec!["=A1+C1", "=A2+C2"]);
        assert_eq!(response.uncertainty_formulas.len(), 2);
    }

    #[test]
    fn test_failure_flattens_to_error_string() {
        let request = PropagationRequest {
            variables: vec![spec("x", "A1:A2", None)],
            formula: "x+z".into(),
        };

        let response = handle_request(&request);
        assert!(!response.success);
        assert!(response.value_formulas.is_empty());
        assert!(response.uncertainty_formulas.is_empty());
        assert_eq!(
            response.error.as_deref(),
            Some("Unknown variable in formula: z")
        );
    }

    #[test]
    fn test_empty_string_uncertainty_range_means_none() {
        let request = PropagationRequest {
            variables: vec![spec("x", "A1:A2", Some(""))],
            formula: "x".into(),
        };

        let response = handle_request(&request);
        assert!(response.success);
        assert_eq!(response.uncertainty_formulas, vec!["=0", "=0"]);
    }

    #[test]
    fn test_bad_range_string() {
        let request = PropagationRequest {
            variables: vec![spec("x", "1A:zz", None)],
            formula: "x".into(),
        };

        let response = handle_request(&request);
        assert!(!response.success);
        assert!(response.error.is_some());
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{
            "variables": [
                { "name": "x", "value_range": "A1:A3", "uncertainty_range": "B1:B3" },
                { "name": "y", "value_range": "C1:C3", "uncertainty_range": null }
            ],
            "formula": "x*y"
        }"#;

        let request: PropagationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.variables.len(), 2);
        assert_eq!(request.variables[1].uncertainty_range, None);

        let response = handle_request(&request);
        assert!(response.success);
        assert_eq!(response.value_formulas[2], "=A3*C3");
    }

    #[test]
    fn test_response_serializes_without_error_field_on_success() {
        let request = PropagationRequest {
            variables: vec![spec("x", "A1", None)],
            formula: "x".into(),
        };
        let response = handle_request(&request);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("\"error\""));
    }
}
