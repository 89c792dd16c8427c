use crate::core::ExperienceApplication;
use crate::utils::error::{AdminError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    title: &'a str,
    location: &'a str,
    category: &'a str,
    price: Option<f64>,
    duration: &'a str,
    status: &'static str,
    featured: bool,
    created_at: String,
    updated_at: String,
}

impl<'a> From<&'a ExperienceApplication> for CsvRow<'a> {
    fn from(app: &'a ExperienceApplication) -> Self {
        Self {
            id: &app.id,
            title: &app.title,
            location: &app.location,
            category: &app.category,
            price: app.price,
            duration: &app.duration,
            status: app.status.as_str(),
            featured: app.is_featured(),
            created_at: app.created_at.to_rfc3339(),
            updated_at: app.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        }
    }
}

/// JSON array in the store's wire shape (both `featured` and `status`).
pub fn render_json(applications: &[&ExperienceApplication]) -> Result<String> {
    Ok(serde_json::to_string_pretty(applications)?)
}

pub fn render_csv(applications: &[&ExperienceApplication]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for app in applications {
        writer.serialize(CsvRow::from(*app))?;
    }
    // 沒有資料列時仍輸出表頭
    if applications.is_empty() {
        writer.write_record([
            "id",
            "title",
            "location",
            "category",
            "price",
            "duration",
            "status",
            "featured",
            "created_at",
            "updated_at",
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AdminError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AdminError::IoError(std::io::Error::other(e)))
}
