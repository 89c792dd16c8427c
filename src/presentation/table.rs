use crate::core::{ExperienceApplication, RowAction};
use crate::presentation::{SCREEN_DESCRIPTION, SCREEN_TITLE};

pub const COLUMNS: [&str; 7] = [
    "Experience Name",
    "Location",
    "Category",
    "Price",
    "Duration",
    "Status",
    "Actions",
];

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_column_width: Option<usize>,
}

/// One table row per application, in the order given.
pub fn application_rows(applications: &[&ExperienceApplication]) -> Vec<Vec<String>> {
    applications
        .iter()
        .map(|app| {
            let actions = RowAction::available_for(app)
                .iter()
                .map(RowAction::label)
                .collect::<Vec<_>>()
                .join(" | ");
            vec![
                app.title.clone(),
                app.location.clone(),
                app.category.clone(),
                app.display_price(),
                app.duration.clone(),
                app.status.badge().to_string(),
                actions,
            ]
        })
        .collect()
}

/// Full screen: heading, search line, the table and a count footer.
pub fn render_applications(
    visible: &[&ExperienceApplication],
    total: usize,
    query: &str,
    options: TableOptions,
) -> String {
    let mut out = String::new();
    out.push_str(SCREEN_TITLE);
    out.push('\n');
    out.push_str(SCREEN_DESCRIPTION);
    out.push('\n');
    if !query.is_empty() {
        out.push_str(&format!("Search: {}\n", query));
    }
    out.push('\n');

    if visible.is_empty() {
        out.push_str("No experience applications found.\n");
    } else {
        out.push_str(&render_table(&COLUMNS, &application_rows(visible), options));
    }

    out.push_str(&format!("\n{} of {} shown\n", visible.len(), total));
    out
}

/// Render a simple aligned table for string rows.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let natural = rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header));
            match options.max_column_width {
                Some(limit) => natural.min(limit.max(display_width(header))),
                None => natural,
            }
        })
        .collect();

    let format_line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| pad(&truncate_text(cell, *width), *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_line = format_line(headers.iter().map(|h| h.to_string()).collect());
    let divider = "-".repeat(display_width(&header_line));

    let mut lines = vec![header_line, divider];
    for row in rows {
        let cells = (0..widths.len())
            .map(|index| row.get(index).cloned().unwrap_or_else(|| "-".to_string()))
            .collect();
        lines.push(format_line(cells));
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn truncate_text(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut truncated: String = text.chars().take(width - 3).collect();
    truncated.push_str("...");
    truncated
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(padding))
}
