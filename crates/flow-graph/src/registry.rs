//! Static integration catalog
//!
//! Every workflow step is an instance of one catalog entry. The catalog is
//! built once on first access and never mutated afterwards; nodes hold
//! `&'static Integration` references into it.
//!
//! # Usage
//!
//! ```
//! use flow_graph::registry::{integration_by_id, integrations_by_category};
//! use flow_graph::IntegrationCategory;
//!
//! let gmail = integration_by_id("gmail-send").unwrap();
//! assert_eq!(gmail.name, "Gmail");
//! assert_eq!(integrations_by_category(IntegrationCategory::Trigger).len(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Icon shown when a type has no catalog entry
pub const FALLBACK_ICON: &str = "Circle";

/// Color used when a type has no catalog entry
pub const FALLBACK_COLOR: &str = "hsl(var(--muted))";

/// The fixed set of step types a node may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationType {
    Gmail,
    Slack,
    Webhook,
    Http,
    Sheets,
    Paypal,
    Trigger,
}

impl IntegrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gmail => "gmail",
            Self::Slack => "slack",
            Self::Webhook => "webhook",
            Self::Http => "http",
            Self::Sheets => "sheets",
            Self::Paypal => "paypal",
            Self::Trigger => "trigger",
        }
    }
}

impl fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette grouping for an integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationCategory {
    /// Starts a workflow
    Trigger,
    /// Performs a side effect
    Action,
    /// Control flow
    Logic,
}

impl FromStr for IntegrationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trigger" => Ok(Self::Trigger),
            "action" => Ok(Self::Action),
            "logic" => Ok(Self::Logic),
            other => Err(format!("unknown integration category '{}'", other)),
        }
    }
}

/// Input widget / value kind of a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Json,
    Boolean,
    Number,
}

impl FieldKind {
    /// Human-readable description of the accepted value, used in errors
    pub fn expectation(&self) -> &'static str {
        match self {
            Self::Text | Self::Textarea => "a string",
            Self::Select => "one of the declared options",
            Self::Json => "any JSON value",
            Self::Boolean => "a boolean",
            Self::Number => "a number",
        }
    }
}

/// One choice of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Declaration of one configurable field of an integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationField {
    /// Key under which the value is stored in a node's config
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Declared choices (select fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IntegrationField {
    /// Create a required field
    pub fn required(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: true,
            placeholder: None,
            options: None,
            description: None,
        }
    }

    /// Create an optional field
    pub fn optional(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(key, label, kind)
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare select options whose label equals their value
    pub fn with_options(mut self, values: &[&str]) -> Self {
        self.options = Some(
            values
                .iter()
                .map(|v| SelectOption {
                    label: (*v).to_string(),
                    value: (*v).to_string(),
                })
                .collect(),
        );
        self
    }

    /// Check whether a select value is among the declared options
    pub fn accepts_option(&self, value: &str) -> bool {
        self.options
            .as_deref()
            .is_some_and(|opts| opts.iter().any(|o| o.value == value))
    }
}

/// A catalog entry describing one reusable step type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub category: IntegrationCategory,
    pub fields: Vec<IntegrationField>,
}

impl Integration {
    /// Look up a declared field by key
    pub fn field(&self, key: &str) -> Option<&IntegrationField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Keys of all required fields, in declaration order
    pub fn required_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
    }

    fn matches_term(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

fn entry(
    id: &str,
    name: &str,
    integration_type: IntegrationType,
    description: &str,
    icon: &str,
    category: IntegrationCategory,
    fields: Vec<IntegrationField>,
) -> Integration {
    let color_key = match integration_type {
        IntegrationType::Trigger => "webhook",
        other => other.as_str(),
    };
    Integration {
        id: id.to_string(),
        name: name.to_string(),
        integration_type,
        description: description.to_string(),
        icon: icon.to_string(),
        color: format!("hsl(var(--integration-{}))", color_key),
        category,
        fields,
    }
}

static CATALOG: Lazy<Vec<Integration>> = Lazy::new(|| {
    use FieldKind::*;
    use IntegrationCategory::*;

    vec![
        entry(
            "trigger-webhook",
            "Webhook Trigger",
            IntegrationType::Trigger,
            "Start workflow when a webhook is called",
            "Webhook",
            Trigger,
            vec![
                IntegrationField::required("webhook_url", "Webhook URL", Text)
                    .with_placeholder("https://your-webhook-url.com")
                    .with_description("URL that will trigger this workflow"),
                IntegrationField::required("method", "HTTP Method", Select)
                    .with_options(&["POST", "GET", "PUT", "DELETE"]),
            ],
        ),
        entry(
            "gmail-send",
            "Gmail",
            IntegrationType::Gmail,
            "Send emails via Gmail",
            "Mail",
            Action,
            vec![
                IntegrationField::required("to", "To", Text)
                    .with_placeholder("recipient@example.com")
                    .with_description("Email address of the recipient"),
                IntegrationField::required("subject", "Subject", Text)
                    .with_placeholder("Email subject")
                    .with_description("Subject line for the email"),
                IntegrationField::required("body", "Body", Textarea)
                    .with_placeholder("Email content...")
                    .with_description("Email body content"),
                IntegrationField::optional("cc", "CC", Text)
                    .with_placeholder("cc@example.com")
                    .with_description("Carbon copy recipients (optional)"),
            ],
        ),
        entry(
            "slack-message",
            "Slack",
            IntegrationType::Slack,
            "Send messages to Slack channels",
            "MessageCircle",
            Action,
            vec![
                IntegrationField::required("channel", "Channel", Text)
                    .with_placeholder("#general")
                    .with_description("Slack channel to send message to"),
                IntegrationField::required("message", "Message", Textarea)
                    .with_placeholder("Your message...")
                    .with_description("Message content to send"),
                IntegrationField::optional("username", "Username", Text)
                    .with_placeholder("Bot Name")
                    .with_description("Display name for the bot (optional)"),
            ],
        ),
        entry(
            "http-request",
            "HTTP Request",
            IntegrationType::Http,
            "Make HTTP requests to any API",
            "Globe",
            Action,
            vec![
                IntegrationField::required("url", "URL", Text)
                    .with_placeholder("https://api.example.com/endpoint")
                    .with_description("URL to make the request to"),
                IntegrationField::required("method", "Method", Select)
                    .with_options(&["GET", "POST", "PUT", "DELETE", "PATCH"]),
                IntegrationField::optional("headers", "Headers", Json)
                    .with_placeholder(r#"{"Content-Type": "application/json"}"#)
                    .with_description("HTTP headers as JSON object"),
                IntegrationField::optional("body", "Body", Json)
                    .with_placeholder(r#"{"key": "value"}"#)
                    .with_description("Request body as JSON (for POST/PUT requests)"),
            ],
        ),
        entry(
            "sheets-append",
            "Google Sheets",
            IntegrationType::Sheets,
            "Add data to Google Sheets",
            "FileSpreadsheet",
            Action,
            vec![
                IntegrationField::required("spreadsheet_id", "Spreadsheet ID", Text)
                    .with_placeholder("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms")
                    .with_description("Google Sheets spreadsheet ID"),
                IntegrationField::required("range", "Range", Text)
                    .with_placeholder("Sheet1!A:Z")
                    .with_description("Cell range to append data to"),
                IntegrationField::required("values", "Values", Json)
                    .with_placeholder(r#"[["Value 1", "Value 2", "Value 3"]]"#)
                    .with_description("Values to append as JSON array"),
            ],
        ),
        entry(
            "paypal-payment",
            "PayPal",
            IntegrationType::Paypal,
            "Process PayPal payments",
            "CreditCard",
            Action,
            vec![
                IntegrationField::required("amount", "Amount", Number)
                    .with_placeholder("10.00")
                    .with_description("Payment amount"),
                IntegrationField::required("currency", "Currency", Select)
                    .with_options(&["USD", "EUR", "GBP", "CAD"]),
                IntegrationField::required("description", "Description", Text)
                    .with_placeholder("Payment for services")
                    .with_description("Payment description"),
            ],
        ),
    ]
});

/// All catalog entries in palette order
pub fn integrations() -> &'static [Integration] {
    &CATALOG
}

/// Find a catalog entry by id
pub fn integration_by_id(id: &str) -> Option<&'static Integration> {
    CATALOG.iter().find(|i| i.id == id)
}

/// Catalog entries belonging to one category
pub fn integrations_by_category(category: IntegrationCategory) -> Vec<&'static Integration> {
    CATALOG.iter().filter(|i| i.category == category).collect()
}

/// Icon name for a step type
pub fn icon_for(integration_type: IntegrationType) -> &'static str {
    CATALOG
        .iter()
        .find(|i| i.integration_type == integration_type)
        .map_or(FALLBACK_ICON, |i| i.icon.as_str())
}

/// Accent color for a step type
pub fn color_for(integration_type: IntegrationType) -> &'static str {
    CATALOG
        .iter()
        .find(|i| i.integration_type == integration_type)
        .map_or(FALLBACK_COLOR, |i| i.color.as_str())
}

/// Palette search: case-insensitive match on name or description,
/// optionally restricted to one category.
pub fn search(term: &str, category: Option<IntegrationCategory>) -> Vec<&'static Integration> {
    let needle = term.to_lowercase();
    CATALOG
        .iter()
        .filter(|i| category.map_or(true, |c| i.category == c))
        .filter(|i| i.matches_term(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_ids() {
        let ids: Vec<&str> = integrations().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "trigger-webhook",
                "gmail-send",
                "slack-message",
                "http-request",
                "sheets-append",
                "paypal-payment",
            ]
        );
    }

    #[test]
    fn test_lookup_by_category() {
        assert_eq!(integrations_by_category(IntegrationCategory::Trigger).len(), 1);
        assert_eq!(integrations_by_category(IntegrationCategory::Action).len(), 5);
        assert!(integrations_by_category(IntegrationCategory::Logic).is_empty());
    }

    #[test]
    fn test_icon_and_color_fallbacks() {
        assert_eq!(icon_for(IntegrationType::Gmail), "Mail");
        assert_eq!(color_for(IntegrationType::Trigger), "hsl(var(--integration-webhook))");
        // No catalog entry declares the plain webhook type
        assert_eq!(icon_for(IntegrationType::Webhook), FALLBACK_ICON);
        assert_eq!(color_for(IntegrationType::Webhook), FALLBACK_COLOR);
    }

    #[test]
    fn test_search() {
        let hits = search("SLACK", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "slack-message");

        // "webhook" matches the trigger by name and description
        assert_eq!(search("webhook", Some(IntegrationCategory::Trigger)).len(), 1);
        assert!(search("webhook", Some(IntegrationCategory::Action)).is_empty());
        assert_eq!(search("", None).len(), integrations().len());
    }

    #[test]
    fn test_required_keys() {
        let paypal = integration_by_id("paypal-payment").unwrap();
        let keys: Vec<&str> = paypal.required_keys().collect();
        assert_eq!(keys, vec!["amount", "currency", "description"]);

        let http = integration_by_id("http-request").unwrap();
        let method = http.field("method").unwrap();
        assert!(method.accepts_option("PATCH"));
        assert!(!method.accepts_option("TRACE"));
    }

    #[test]
    fn test_field_serialization_shape() {
        let slack = integration_by_id("slack-message").unwrap();
        let json = serde_json::to_value(slack).unwrap();
        assert_eq!(json["type"], "slack");
        assert_eq!(json["category"], "action");
        assert_eq!(json["fields"][0]["type"], "text");
        assert_eq!(json["fields"][0]["required"], true);
        assert!(json["fields"][2].get("required").is_none());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("logic".parse::<IntegrationCategory>(), Ok(IntegrationCategory::Logic));
        assert!("all".parse::<IntegrationCategory>().is_err());
    }
}
