use crate::domain::model::ExperienceApplication;

/// 以關鍵字篩選：title / location / category 任一欄位包含查詢字串（不分大小寫）。
///
/// Keeps the relative order of `applications`. An empty query returns every record.
pub fn filter_applications<'a>(
    applications: &'a [ExperienceApplication],
    query: &str,
) -> Vec<&'a ExperienceApplication> {
    let needle = query.to_lowercase();
    applications
        .iter()
        .filter(|app| matches_query(app, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
fn matches_query(app: &ExperienceApplication, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [&app.title, &app.location, &app.category]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
