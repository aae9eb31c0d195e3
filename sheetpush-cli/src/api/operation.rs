//! GraphQL mutation request and response classification

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value, json};

use super::RemoteError;

/// Header carrying the configured credential, verbatim
pub const AUTH_TOKEN_HEADER: &str = "AUTH_TOKEN";

/// Start of an operation definition header, with its optional name
static OPERATION_HEADER: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^(?:query|mutation|subscription)\b\s*([_A-Za-z][_0-9A-Za-z]*)?").ok()
});

/// A single remote write: one document plus one set of variables
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    /// Endpoint URL, used unchanged
    pub endpoint: String,
    /// Optional credential sent in the `AUTH_TOKEN` header
    pub auth_token: Option<String>,
    /// Operation document, sent verbatim
    pub document: String,
    /// Variables derived from one row
    pub variables: Map<String, Value>,
}

impl MutationRequest {
    pub fn new(
        endpoint: impl Into<String>,
        auth_token: Option<String>,
        document: impl Into<String>,
        variables: Map<String, Value>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token,
            document: document.into(),
            variables,
        }
    }

    /// Name of the document's operation, when it holds exactly one named operation
    ///
    /// Documents with several operations, or an anonymous one, yield `None`, so
    /// no `operationName` is sent and the server picks as it would by default.
    pub fn operation_name(&self) -> Option<String> {
        let re = OPERATION_HEADER.as_ref()?;
        let operations: Vec<Option<String>> = definition_headers(&self.document)
            .iter()
            .filter_map(|header| {
                let header = header.trim_matches(|c: char| c.is_whitespace() || c == ',');
                if header.is_empty() {
                    // `{ ... }` shorthand query
                    return Some(None);
                }
                let caps = re.captures(header)?;
                Some(caps.get(1).map(|m| m.as_str().to_string()))
            })
            .collect();

        match operations.as_slice() {
            [Some(name)] => Some(name.clone()),
            _ => None,
        }
    }

    /// JSON body posted to the endpoint
    pub fn body(&self) -> Value {
        let mut body = json!({
            "query": self.document,
            "variables": Value::Object(self.variables.clone()),
        });
        if let (Some(name), Value::Object(obj)) = (self.operation_name(), &mut body) {
            obj.insert("operationName".to_string(), Value::String(name));
        }
        body
    }
}

/// Top-level text preceding each `{ ... }` definition body
///
/// Comments, string literals and anything inside parentheses or braces are
/// skipped, so a header reads like `mutation UpdateTags ` or `fragment F on T `.
fn definition_headers(document: &str) -> Vec<String> {
    let chars: Vec<char> = document.chars().collect();
    let mut headers = Vec::new();
    let mut header = String::new();
    let mut braces = 0usize;
    let mut parens = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let top_level = braces == 0 && parens == 0;
        match chars[i] {
            '#' => {
                while i < chars.len() && chars[i] != '\n' && chars[i] != '\r' {
                    i += 1;
                }
                if top_level {
                    header.push(' ');
                }
                continue;
            }
            '"' => {
                i = skip_string(&chars, i);
                if top_level {
                    header.push(' ');
                }
                continue;
            }
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            '{' => {
                if top_level {
                    headers.push(std::mem::take(&mut header));
                }
                braces += 1;
            }
            '}' => braces = braces.saturating_sub(1),
            c if top_level => header.push(c),
            _ => {}
        }
        i += 1;
    }

    headers
}

/// Index just past the string literal opening at `start`
fn skip_string(chars: &[char], start: usize) -> usize {
    let is_quotes = |at: usize| chars.get(at..at + 3) == Some(&['"', '"', '"'][..]);

    if is_quotes(start) {
        let mut i = start + 3;
        while i < chars.len() {
            if chars[i] == '\\' && is_quotes(i + 1) {
                i += 4;
            } else if is_quotes(i) {
                return i + 3;
            } else {
                i += 1;
            }
        }
        return chars.len();
    }

    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '"' => return i + 1,
            // Unterminated on this line
            '\n' | '\r' => return i,
            _ => i += 1,
        }
    }
    chars.len()
}

/// Classify a raw HTTP response into the operation's `data` payload or an error
///
/// Operation-level `errors` win over the status code, so a 400 carrying a
/// GraphQL error message surfaces that message.
pub fn classify_response(status: u16, body: &str) -> Result<Value, RemoteError> {
    let parsed: Result<Value, _> = serde_json::from_str(body);
    let success_status = (200..300).contains(&status);

    if let Ok(payload) = &parsed {
        if let Some(Value::Array(errors)) = payload.get("errors") {
            if !errors.is_empty() {
                let messages = error_messages(errors);
                if !messages.is_empty() {
                    return Err(RemoteError::Operation(messages));
                }
                if success_status {
                    return Err(RemoteError::Unknown);
                }
            }
        }
    }

    if !success_status {
        return Err(RemoteError::Status { status });
    }

    let payload = parsed.map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
    match payload.get("data") {
        Some(data) if !data.is_null() => Ok(data.clone()),
        _ => Err(RemoteError::MissingData { status }),
    }
}

fn error_messages(errors: &[Value]) -> Vec<String> {
    errors
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(document: &str) -> MutationRequest {
        let mut vars = Map::new();
        vars.insert("id".to_string(), json!("1"));
        MutationRequest::new("http://localhost/graphql", None, document, vars)
    }

    #[test]
    fn test_operation_name() {
        assert_eq!(
            request("mutation UpdateTags($id: ID!) { update(id: $id) { id } }").operation_name(),
            Some("UpdateTags".to_string())
        );
        assert_eq!(request("mutation($id: ID!) { x }").operation_name(), None);
        assert_eq!(request("{ viewer { id } }").operation_name(), None);
    }

    #[test]
    fn test_body_shape() {
        let body = request("mutation Save { save }").body();
        assert_eq!(body["query"], json!("mutation Save { save }"));
        assert_eq!(body["variables"], json!({"id": "1"}));
        assert_eq!(body["operationName"], json!("Save"));

        let anonymous = request("mutation { save }").body();
        assert!(anonymous.get("operationName").is_none());
    }

    #[test]
    fn test_operation_name_ignores_comments() {
        let document = "# mutation to update tags\n\
            mutation UpdateProcessoTagList($id: ID!) { update(id: $id) { id } }";
        let body = request(document).body();
        assert_eq!(body["operationName"], json!("UpdateProcessoTagList"));
        assert_eq!(body["query"], json!(document));

        let trailing = "mutation Save($query: String) { save(note: \"mutation Other\") } # query X";
        assert_eq!(request(trailing).operation_name(), Some("Save".to_string()));
    }

    #[test]
    fn test_operation_name_skips_strings_and_fragments() {
        let document = r#"
            fragment Fields on Processo { id tagList }
            mutation Tag($id: ID!) {
                update(id: $id, note: """query Hidden { x }""") { ...Fields }
            }
        "#;
        assert_eq!(request(document).operation_name(), Some("Tag".to_string()));
    }

    #[test]
    fn test_operation_name_absent_with_several_operations() {
        let document = "mutation First { a } mutation Second { b }";
        assert_eq!(request(document).operation_name(), None);
        assert!(request(document).body().get("operationName").is_none());

        assert_eq!(request("query Q { a } { b }").operation_name(), None);
    }

    #[test]
    fn test_classify_success() {
        let data = classify_response(200, r#"{"data":{"update":{"id":"1"}}}"#).unwrap();
        assert_eq!(data, json!({"update": {"id": "1"}}));
    }

    #[test]
    fn test_classify_operation_errors_preferred() {
        let err = classify_response(
            400,
            r#"{"errors":[{"message":"Record not found"},{"message":"second"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err, RemoteError::Operation(vec!["Record not found".into(), "second".into()]));
        assert_eq!(err.to_string(), "Record not found; second");
    }

    #[test]
    fn test_classify_errors_with_200() {
        let err = classify_response(200, r#"{"data":null,"errors":[{"message":"denied"}]}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn test_classify_status_without_payload() {
        let err = classify_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, RemoteError::Status { status: 502 });
        assert_eq!(err.to_string(), "GraphQL Error (Code: 502)");
    }

    #[test]
    fn test_classify_missing_data_and_bad_json() {
        assert_eq!(
            classify_response(200, r#"{"data":null}"#).unwrap_err(),
            RemoteError::MissingData { status: 200 }
        );
        assert!(matches!(
            classify_response(200, "not json"),
            Err(RemoteError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_classify_errors_without_messages() {
        assert_eq!(
            classify_response(200, r#"{"errors":[{}]}"#).unwrap_err().to_string(),
            "Unknown error"
        );
    }
}
