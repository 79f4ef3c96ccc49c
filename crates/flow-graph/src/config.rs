//! Typed per-integration node configuration
//!
//! A node's configuration arrives as a loose key→value object (from the
//! step configuration panel or a saved workflow). It is checked against
//! the integration's declared field list and then decoded into the
//! variant for that integration, so unknown keys and mistyped values are
//! rejected instead of being stored verbatim.
//!
//! Every typed field is optional: a freshly placed node has an empty
//! configuration and is filled in over several saves. Whether the
//! required fields are present is a separate question answered by
//! [`NodeConfig::missing_required`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::registry::{FieldKind, Integration, IntegrationField};

/// HTTP verbs offered by the webhook trigger and the HTTP request step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// Currencies accepted by the PayPal step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Cad,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookTriggerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GmailConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpRequestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Free-form JSON (usually an object of header names)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetsAppendConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Rows to append, as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaypalPaymentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Configuration of one node, tagged by the integration it instantiates
///
/// Serializes as the flat key→value object (unset fields omitted).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeConfig {
    WebhookTrigger(WebhookTriggerConfig),
    Gmail(GmailConfig),
    Slack(SlackConfig),
    HttpRequest(HttpRequestConfig),
    SheetsAppend(SheetsAppendConfig),
    PaypalPayment(PaypalPaymentConfig),
}

impl NodeConfig {
    /// Empty configuration for a freshly placed node
    pub fn empty_for(integration: &Integration) -> Result<Self, ConfigError> {
        Self::from_fields(integration, &Map::new())
    }

    /// Validate a raw key→value map against the integration's fields and
    /// decode it into the matching variant.
    pub fn from_fields(
        integration: &Integration,
        fields: &Map<String, Value>,
    ) -> Result<Self, ConfigError> {
        let mut normalized = Map::new();
        for (key, value) in fields {
            let field = integration
                .field(key)
                .ok_or_else(|| ConfigError::UnknownField {
                    integration: integration.id.clone(),
                    field: key.clone(),
                })?;
            if let Some(value) = normalize(field, value)? {
                normalized.insert(key.clone(), value);
            }
        }

        match integration.id.as_str() {
            "trigger-webhook" => decode(normalized).map(Self::WebhookTrigger),
            "gmail-send" => decode(normalized).map(Self::Gmail),
            "slack-message" => decode(normalized).map(Self::Slack),
            "http-request" => decode(normalized).map(Self::HttpRequest),
            "sheets-append" => decode(normalized).map(Self::SheetsAppend),
            "paypal-payment" => decode(normalized).map(Self::PaypalPayment),
            other => Err(ConfigError::UnsupportedIntegration(other.to_string())),
        }
    }

    /// Same as [`NodeConfig::from_fields`] for an arbitrary JSON value;
    /// `null` is treated as an empty object.
    pub fn from_value(integration: &Integration, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Self::empty_for(integration),
            Value::Object(map) => Self::from_fields(integration, map),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    /// Catalog id of the integration this configuration belongs to
    pub fn integration_id(&self) -> &'static str {
        match self {
            Self::WebhookTrigger(_) => "trigger-webhook",
            Self::Gmail(_) => "gmail-send",
            Self::Slack(_) => "slack-message",
            Self::HttpRequest(_) => "http-request",
            Self::SheetsAppend(_) => "sheets-append",
            Self::PaypalPayment(_) => "paypal-payment",
        }
    }

    /// Flat key→value view, unset fields omitted
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Required keys of `integration` that are unset (or empty strings)
    pub fn missing_required(&self, integration: &Integration) -> Vec<String> {
        let fields = self.to_fields();
        integration
            .required_keys()
            .filter(|key| match fields.get(*key) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(str::to_string)
            .collect()
    }

    /// True when nothing has been configured yet
    pub fn is_empty(&self) -> bool {
        self.to_fields().is_empty()
    }
}

fn decode<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, ConfigError> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| ConfigError::Decode(e.to_string()))
}

fn mismatch(field: &IntegrationField) -> ConfigError {
    ConfigError::TypeMismatch {
        field: field.key.clone(),
        expected: field.kind.expectation().to_string(),
    }
}

/// Check one value against its field kind. `Ok(None)` means "unset".
fn normalize(field: &IntegrationField, value: &Value) -> Result<Option<Value>, ConfigError> {
    if value.is_null() {
        return Ok(None);
    }

    match field.kind {
        FieldKind::Text | FieldKind::Textarea => match value {
            Value::String(_) => Ok(Some(value.clone())),
            _ => Err(mismatch(field)),
        },
        FieldKind::Select => match value {
            Value::String(s) if s.is_empty() => Ok(None),
            Value::String(s) if field.accepts_option(s) => Ok(Some(value.clone())),
            Value::String(s) => Err(ConfigError::InvalidOption {
                field: field.key.clone(),
                value: s.clone(),
            }),
            _ => Err(mismatch(field)),
        },
        FieldKind::Number => match value {
            Value::Number(_) => Ok(Some(value.clone())),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| mismatch(field)),
            _ => Err(mismatch(field)),
        },
        FieldKind::Boolean => match value {
            Value::Bool(_) => Ok(Some(value.clone())),
            Value::String(s) if s.is_empty() => Ok(None),
            _ => Err(mismatch(field)),
        },
        FieldKind::Json => Ok(Some(value.clone())),
    }
}
