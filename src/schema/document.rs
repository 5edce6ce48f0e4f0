//! OpenAPI document parsing and operation lookup

use super::types::SchemaObject;
use crate::error::{Error, Result};
use reqwest::Method;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

// Refs nested deeper than this indicate a cycle in the document.
const MAX_REF_DEPTH: usize = 16;

/// Where a parameter lives on the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// A declared operation parameter with its schema resolved
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Request location
    pub location: ParameterLocation,
    /// Whether the parameter must be present
    pub required: bool,
    /// Value schema
    pub schema: SchemaObject,
}

/// One operation from the document, ready for case generation
#[derive(Debug, Clone)]
pub struct Operation {
    /// The document's stable identifier for this endpoint+method pair
    pub operation_id: String,
    /// HTTP method
    pub method: Method,
    /// Path template, e.g. "/websites/{hostname}"
    pub path: String,
    /// Path and query parameters
    pub parameters: Vec<Parameter>,
    /// JSON request body schema, when the operation declares one
    pub request_body: Option<SchemaObject>,
    /// Declared responses: status key ("201", "4XX", "default") to
    /// optional JSON body schema
    pub responses: BTreeMap<String, Option<SchemaObject>>,
}

impl Operation {
    /// Whether the document declares the given response status.
    ///
    /// Handles exact codes, range keys like "4XX", and "default".
    pub fn declares_status(&self, status: u16) -> bool {
        self.response_key(status).is_some()
    }

    /// The declared body schema for a status, if any
    pub fn response_schema(&self, status: u16) -> Option<&SchemaObject> {
        let key = self.response_key(status)?;
        self.responses.get(&key).and_then(Option::as_ref)
    }

    fn response_key(&self, status: u16) -> Option<String> {
        let exact = status.to_string();
        if self.responses.contains_key(&exact) {
            return Some(exact);
        }
        let range = format!("{}XX", status / 100);
        if self.responses.contains_key(&range) {
            return Some(range);
        }
        if self.responses.contains_key("default") {
            return Some("default".to_string());
        }
        None
    }

    /// Parameters in the given location
    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.location == location)
    }
}

// ============================================================================
// Raw document shapes (serde targets)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct RawDocument {
    #[allow(dead_code)]
    openapi: String,
    paths: BTreeMap<String, RawPathItem>,
    #[serde(default)]
    components: RawComponents,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawComponents {
    #[serde(default)]
    schemas: BTreeMap<String, SchemaObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawPathItem {
    get: Option<RawOperation>,
    post: Option<RawOperation>,
    put: Option<RawOperation>,
    patch: Option<RawOperation>,
    delete: Option<RawOperation>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

impl RawPathItem {
    fn methods(&self) -> impl Iterator<Item = (Method, &RawOperation)> {
        [
            (Method::GET, &self.get),
            (Method::POST, &self.post),
            (Method::PUT, &self.put),
            (Method::PATCH, &self.patch),
            (Method::DELETE, &self.delete),
        ]
        .into_iter()
        .filter_map(|(m, op)| op.as_ref().map(|op| (m, op)))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawOperation {
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(rename = "requestBody")]
    request_body: Option<RawRequestBody>,
    #[serde(default)]
    responses: BTreeMap<String, RawResponse>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawParameter {
    name: String,
    #[serde(rename = "in")]
    location: ParameterLocation,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    schema: Option<SchemaObject>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawRequestBody {
    #[serde(default)]
    content: BTreeMap<String, RawMediaType>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMediaType {
    schema: Option<SchemaObject>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawResponse {
    #[allow(dead_code)]
    #[serde(default)]
    description: String,
    #[serde(default)]
    content: BTreeMap<String, RawMediaType>,
}

// ============================================================================
// Document
// ============================================================================

/// A parsed OpenAPI document
#[derive(Debug, Clone)]
pub struct Document {
    raw: RawDocument,
}

impl Document {
    /// Parse a document from YAML or JSON text.
    ///
    /// YAML is a superset of JSON, so a single parser covers both the
    /// `openapi.yaml` and `openapi.json` cases.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawDocument = serde_yaml::from_str(content)?;
        Ok(Self { raw })
    }

    /// Fetch and parse the document from a URL
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self> {
        debug!(url, "fetching OpenAPI document");
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::schema_fetch(
                url,
                format!("unexpected status {status}"),
            ));
        }
        let body = response.text().await?;
        Self::parse(&body).map_err(|e| Error::schema_fetch(url, e.to_string()))
    }

    /// Look up one operation by its operation ID.
    ///
    /// Only the matching operation is resolved, so a broken reference
    /// elsewhere in the document does not poison the lookup.
    pub fn operation(&self, operation_id: &str) -> Result<Operation> {
        for (path, item) in &self.raw.paths {
            for (method, raw) in item.methods() {
                if raw.operation_id.as_deref() == Some(operation_id) {
                    return self.build_operation(
                        operation_id.to_string(),
                        method,
                        path,
                        item,
                        raw,
                    );
                }
            }
        }
        Err(Error::operation_not_found(operation_id))
    }

    /// All operations carrying an operation ID, in path order
    pub fn operations(&self) -> Result<Vec<Operation>> {
        let mut out = Vec::new();
        for (path, item) in &self.raw.paths {
            for (method, raw) in item.methods() {
                let Some(id) = raw.operation_id.clone() else {
                    continue;
                };
                out.push(self.build_operation(id, method, path, item, raw)?);
            }
        }
        Ok(out)
    }

    fn build_operation(
        &self,
        operation_id: String,
        method: Method,
        path: &str,
        item: &RawPathItem,
        raw: &RawOperation,
    ) -> Result<Operation> {
        // Path-level parameters apply to every operation under the path.
        let mut parameters = Vec::new();
        for p in item.parameters.iter().chain(raw.parameters.iter()) {
            let schema = match &p.schema {
                Some(s) => self.resolve(s, 0)?,
                None => SchemaObject::default(),
            };
            parameters.push(Parameter {
                name: p.name.clone(),
                location: p.location,
                required: p.required || p.location == ParameterLocation::Path,
                schema,
            });
        }

        let request_body = match raw.request_body.as_ref().and_then(json_media) {
            Some(schema) => Some(self.resolve(schema, 0)?),
            None => None,
        };

        let mut responses = BTreeMap::new();
        for (status, response) in &raw.responses {
            let schema = response
                .content
                .iter()
                .find(|(mime, _)| mime.starts_with("application/json"))
                .and_then(|(_, media)| media.schema.as_ref());
            let resolved = match schema {
                Some(s) => Some(self.resolve(s, 0)?),
                None => None,
            };
            responses.insert(status.clone(), resolved);
        }

        Ok(Operation {
            operation_id,
            method,
            path: path.to_string(),
            parameters,
            request_body,
            responses,
        })
    }

    /// Deep-resolve local `$ref`s into a self-contained schema
    fn resolve(&self, schema: &SchemaObject, depth: usize) -> Result<SchemaObject> {
        if depth > MAX_REF_DEPTH {
            return Err(Error::schema("reference cycle in document"));
        }

        if let Some(reference) = &schema.reference {
            let name = reference
                .strip_prefix("#/components/schemas/")
                .ok_or_else(|| Error::unresolved_ref(reference.clone()))?;
            let target = self
                .raw
                .components
                .schemas
                .get(name)
                .ok_or_else(|| Error::unresolved_ref(reference.clone()))?;
            return self.resolve(target, depth + 1);
        }

        let mut resolved = schema.clone();
        if let Some(props) = &schema.properties {
            let mut out = BTreeMap::new();
            for (name, prop) in props {
                out.insert(name.clone(), self.resolve(prop, depth + 1)?);
            }
            resolved.properties = Some(out);
        }
        if let Some(items) = &schema.items {
            resolved.items = Some(Box::new(self.resolve(items, depth + 1)?));
        }
        Ok(resolved)
    }
}

fn json_media(body: &RawRequestBody) -> Option<&SchemaObject> {
    body.content
        .iter()
        .find(|(mime, _)| mime.starts_with("application/json"))
        .and_then(|(_, media)| media.schema.as_ref())
}
