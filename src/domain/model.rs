use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 審核狀態。`featured` 旗標由此推導，不再獨立保存。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_featured(&self) -> bool {
        matches!(self, ApplicationStatus::Approved)
    }

    /// 表格上顯示的徽章文字
    pub fn badge(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider-submitted experience listing awaiting admin review.
///
/// The hosted table stores both `featured` and `status`; in memory only
/// [`ApplicationStatus`] is kept and `featured` is derived on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExperienceRow", into = "ExperienceRow")]
pub struct ExperienceApplication {
    pub id: String,
    pub title: String,
    pub location: String,
    pub category: String,
    /// 草稿列可能沒有價格
    pub price: Option<f64>,
    pub duration: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// 其他欄位（description、provider_id 等）原樣保留
    pub extra: HashMap<String, serde_json::Value>,
}

impl ExperienceApplication {
    pub fn is_featured(&self) -> bool {
        self.status.is_featured()
    }

    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) => format!("₹{}", price),
            None => "₹".to_string(),
        }
    }
}

/// 欄位缺少或為 null 時都取預設值
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wire shape of one row in the `experiences` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceRow {
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    category: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    featured: bool,
    #[serde(default)]
    status: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl From<ExperienceRow> for ExperienceApplication {
    fn from(row: ExperienceRow) -> Self {
        // status 欄位優先；缺少或無法辨識時退回 featured
        let status = match row.status.as_deref().map(ApplicationStatus::parse) {
            Some(Some(status)) => status,
            other => {
                if matches!(other, Some(None)) {
                    tracing::warn!(
                        "Unrecognised status {:?} on experience {}, falling back to featured flag",
                        row.status,
                        row.id
                    );
                }
                if row.featured {
                    ApplicationStatus::Approved
                } else {
                    ApplicationStatus::Pending
                }
            }
        };

        Self {
            id: row.id,
            title: row.title,
            location: row.location,
            category: row.category,
            price: row.price,
            duration: row.duration,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            extra: row.extra,
        }
    }
}

impl From<ExperienceApplication> for ExperienceRow {
    fn from(app: ExperienceApplication) -> Self {
        Self {
            featured: app.is_featured(),
            status: Some(app.status.as_str().to_string()),
            id: app.id,
            title: app.title,
            location: app.location,
            category: app.category,
            price: app.price,
            duration: app.duration,
            created_at: app.created_at,
            updated_at: app.updated_at,
            extra: app.extra,
        }
    }
}

/// Partial update sent to the record store for a status transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPatch {
    pub featured: bool,
    pub status: ApplicationStatus,
    pub updated_at: DateTime<Utc>,
}

impl StatusPatch {
    pub fn new(status: ApplicationStatus, updated_at: DateTime<Utc>) -> Self {
        Self {
            featured: status.is_featured(),
            status,
            updated_at,
        }
    }

    pub fn approve(updated_at: DateTime<Utc>) -> Self {
        Self::new(ApplicationStatus::Approved, updated_at)
    }

    pub fn reject(updated_at: DateTime<Utc>) -> Self {
        Self::new(ApplicationStatus::Rejected, updated_at)
    }
}

/// 每列可用的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ViewDetails,
    Approve,
    Reject,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::ViewDetails => "View Details",
            RowAction::Approve => "Approve",
            RowAction::Reject => "Reject",
        }
    }

    /// Approve / Reject are hidden once a record is featured.
    pub fn available_for(app: &ExperienceApplication) -> Vec<RowAction> {
        if app.is_featured() {
            vec![RowAction::ViewDetails]
        } else {
            vec![RowAction::ViewDetails, RowAction::Approve, RowAction::Reject]
        }
    }
}
