//! Paste-ready rendering of normalized rows
//!
//! Rendering computes derived columns (price per area, NOI per area, week
//! number), selects the column layout for the sheet and country, and formats
//! every cell as display text.

mod format;
mod renderer;

pub use format::{format_value, group_thousands};
pub use renderer::{CountryProfile, DEFAULT_COUNTRY, RenderedRow, RowRenderer};

use crate::models::Row;
use crate::schema::SchemaKind;

/// Render rows as a TSV block: header line plus one line per row, joined by
/// `\n` without a trailing newline.
///
/// Transaction rows all use the layout of the first row's country so the
/// block has a single header.
pub fn rows_to_tsv(rows: &[Row], renderer: &RowRenderer<'_>) -> String {
    let renderer = match (renderer.kind(), rows.first()) {
        (SchemaKind::Transactions, Some(first)) => {
            let country = renderer.country_of(first);
            renderer.clone().with_country(country)
        }
        _ => renderer.clone(),
    };

    let columns = match rows.first() {
        Some(first) => renderer.columns_for(first),
        None => renderer.columns_for(&Row::new()),
    };

    let mut lines = vec![columns.join("\t")];
    for row in rows {
        let rendered = renderer.render(row);
        lines.push(rendered.project(&columns).join("\t"));
    }
    lines.join("\n")
}

/// Render one row as a TSV line, optionally preceded by its header line
pub fn row_to_tsv(row: &Row, renderer: &RowRenderer<'_>, include_header: bool) -> String {
    let rendered = renderer.render(row);
    if include_header {
        format!("{}\n{}", rendered.header_line(), rendered.to_tsv_line())
    } else {
        rendered.to_tsv_line()
    }
}
