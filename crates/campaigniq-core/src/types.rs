use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A mock analytics integration toggled on by the user. Only `name` is
/// required on the wire; selector UIs routinely send sparse records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: DataSourceKind,
    #[serde(default)]
    pub status: DataSourceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    #[default]
    Gtm,
    FacebookPixel,
    GoogleAdsTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceStatus {
    #[default]
    Connected,
    Disconnected,
    Error,
}

/// A delivery medium selected for the campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: ChannelKind,
    #[serde(default)]
    pub status: ChannelStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    #[default]
    Email,
    Sms,
    Push,
    Whatsapp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelStatus {
    #[default]
    Active,
    Inactive,
}

/// The structured campaign suggestion returned by the generator and embedded
/// verbatim in the streamed report's fenced JSON block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecommendation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_audience: TargetAudience,
    pub timing: Timing,
    pub channels: ChannelPlan,
    pub content: ContentPlan,
    pub metrics: ExpectedMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAudience {
    pub segments: Vec<String>,
    pub demographics: Demographics,
    pub behaviors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age: String,
    pub gender: String,
    pub location: String,
    pub income: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub optimal_times: Vec<String>,
    pub frequency: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPlan {
    pub primary: String,
    pub secondary: Vec<String>,
    /// Channel name to dollar amount, in input channel order.
    pub budget: IndexMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlan {
    /// Present only when the primary channel is Email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub headline: String,
    pub body: String,
    pub cta: String,
    pub media: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedMetrics {
    pub expected_reach: u64,
    pub expected_engagement: u64,
    pub expected_conversion: u64,
}
