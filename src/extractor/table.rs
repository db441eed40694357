//! Table grid harvesting and serialization.
//!
//! A table is read into a grid of [`CellData`] rows, colspans are expanded
//! into placeholder cells, rows are padded to a common width, and the grid
//! is emitted as a markdown pipe table or as `<table>` markup.

use dom_query::{NodeRef, Selection};
use tracing::trace;

use crate::dom;
use crate::extractor::tags::is_non_content_tag;
use crate::markdown;
use crate::options::TableFormat;
use crate::patterns::css_declaration;
use crate::walker::{walk, Walk};

/// Largest `colspan` honoured, as in the HTML standard.
pub const MAX_COLSPAN: usize = 1000;

/// Largest `rowspan` honoured, as in the HTML standard.
pub const MAX_ROWSPAN: usize = 65534;

/// Upper bound on grid cells (rows times columns) per table.
pub const MAX_TABLE_CELLS: usize = 20_000;

/// Horizontal alignment of a cell or column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    #[default]
    Default,
}

impl Alignment {
    /// Parse an `align` attribute or `text-align` value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            "justify" => Self::Justify,
            _ => Self::Default,
        }
    }

    /// CSS keyword, `None` for `Default`.
    #[must_use]
    pub fn css_value(self) -> Option<&'static str> {
        match self {
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
            Self::Justify => Some("justify"),
            Self::Default => None,
        }
    }
}

/// One cell of the table grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellData {
    pub text: String,
    pub alignment: Alignment,
    pub colspan: usize,
    pub rowspan: usize,
    pub is_header: bool,
    /// Normalized width such as `120px` or `50%`.
    pub width: Option<String>,
    /// Placeholder produced by colspan expansion.
    pub is_expanded: bool,
    /// Colspan of the source cell, kept on the first grid cell.
    pub original_colspan: usize,
}

impl CellData {
    /// Padding cell holding a single space.
    #[must_use]
    pub fn padding() -> Self {
        Self {
            text: " ".to_string(),
            alignment: Alignment::Default,
            colspan: 1,
            rowspan: 1,
            is_header: false,
            width: None,
            is_expanded: false,
            original_colspan: 1,
        }
    }

    fn placeholder(is_header: bool) -> Self {
        Self {
            text: String::new(),
            is_header,
            is_expanded: true,
            ..Self::padding()
        }
    }
}

/// Serialize the first node of `sel` as a table.
///
/// Returns an empty string for an empty selection or a table without rows.
///
/// # Example
///
/// ```rust
/// use rs_maintext::dom;
/// use rs_maintext::extractor::table::serialize_table;
/// use rs_maintext::TableFormat;
///
/// let doc = dom::parse("<table><tr><th>H1</th><th>H2</th></tr><tr><td>D1</td><td>D2</td></tr></table>");
/// let md = serialize_table(&doc.select("table"), TableFormat::Markdown);
/// assert_eq!(md, "| H1 | H2 |\n| --- | --- |\n| D1 | D2 |\n");
/// ```
#[must_use]
pub fn serialize_table(sel: &Selection, format: TableFormat) -> String {
    dom::first_node(sel).map_or_else(String::new, |table| serialize_table_node(&table, format))
}

/// Serialize a `table` node.
#[must_use]
pub fn serialize_table_node(table: &NodeRef, format: TableFormat) -> String {
    let rows = harvest(table);
    if rows.is_empty() {
        return String::new();
    }

    let mut grid = expand_colspans(rows);
    rectangularize(&mut grid);

    match format {
        TableFormat::Markdown => markdown::render_table(&grid),
        TableFormat::Html => render_html(&grid),
    }
}

/// Read the table's rows without entering nested tables.
///
/// Rows without cells are dropped. Harvesting stops once the grid would
/// exceed [`MAX_TABLE_CELLS`].
#[must_use]
pub fn harvest(table: &NodeRef) -> Vec<Vec<CellData>> {
    let mut rows: Vec<Vec<CellData>> = Vec::new();
    let mut max_width = 0usize;

    walk(table, |node| {
        if node.id != table.id && dom::has_tag(node, "table") {
            return Walk::SkipChildren;
        }
        if !dom::has_tag(node, "tr") {
            return Walk::Continue;
        }

        let row: Vec<CellData> = dom::element_children(node)
            .filter(|cell| dom::has_tag(cell, "td") || dom::has_tag(cell, "th"))
            .map(|cell| read_cell(&cell))
            .collect();
        if row.is_empty() {
            return Walk::SkipChildren;
        }

        let width: usize = row.iter().map(|c| c.colspan).sum();
        max_width = max_width.max(width);
        if (rows.len() + 1).saturating_mul(max_width) > MAX_TABLE_CELLS {
            trace!(rows = rows.len(), columns = max_width, "table truncated at cell limit");
            return Walk::Stop;
        }

        rows.push(row);
        Walk::SkipChildren
    });

    rows
}

fn read_cell(cell: &NodeRef) -> CellData {
    let style = dom::get_attribute_lower(cell, "style").unwrap_or_default();
    let colspan = parse_span(dom::get_attribute(cell, "colspan").as_deref(), MAX_COLSPAN);

    CellData {
        text: cell_text(cell),
        alignment: read_alignment(cell, &style),
        colspan,
        rowspan: parse_span(dom::get_attribute(cell, "rowspan").as_deref(), MAX_ROWSPAN),
        is_header: dom::has_tag(cell, "th"),
        width: read_width(cell, &style),
        is_expanded: false,
        original_colspan: colspan,
    }
}

/// Parse a span attribute: default 1, non-positive or garbage is 1.
fn parse_span(value: Option<&str>, max: usize) -> usize {
    let Some(value) = value else {
        return 1;
    };
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).map_or(max, |n| n.min(max)),
        _ => 1,
    }
}

fn read_alignment(cell: &NodeRef, style: &str) -> Alignment {
    let from_attr = dom::get_attribute(cell, "align").map_or(Alignment::Default, |a| Alignment::parse(&a));
    if from_attr != Alignment::Default {
        return from_attr;
    }
    css_declaration(style, "text-align").map_or(Alignment::Default, Alignment::parse)
}

fn read_width(cell: &NodeRef, style: &str) -> Option<String> {
    if let Some(width) = dom::get_attribute(cell, "width") {
        if let Some(width) = normalize_width(&width) {
            return Some(width);
        }
    }
    css_declaration(style, "width").and_then(normalize_width)
}

/// Drop zero and empty widths; give bare integers a `px` unit.
fn normalize_width(raw: &str) -> Option<String> {
    let width = raw.trim();
    if matches!(width, "" | "0" | "0px" | "0%") {
        return None;
    }
    if width.bytes().all(|b| b.is_ascii_digit()) {
        Some(format!("{width}px"))
    } else {
        Some(width.to_string())
    }
}

/// Flattened text of a cell: trimmed text nodes joined by single spaces.
///
/// Nested tables contribute their text the same way.
#[must_use]
pub fn cell_text(cell: &NodeRef) -> String {
    let mut parts: Vec<String> = Vec::new();
    walk(cell, |node| {
        if let Some(tag) = dom::tag_name(node) {
            if is_non_content_tag(&tag) {
                return Walk::SkipChildren;
            }
        } else if node.is_text() {
            let text = dom::normalize_spaces(&node.text());
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }
        Walk::Continue
    });
    parts.join(" ")
}

/// Replace each colspan `k > 1` cell with itself plus `k - 1` placeholders.
#[must_use]
pub fn expand_colspans(rows: Vec<Vec<CellData>>) -> Vec<Vec<CellData>> {
    rows.into_iter()
        .map(|row| {
            let mut out = Vec::with_capacity(row.iter().map(|c| c.colspan).sum());
            for cell in row {
                let span = cell.colspan;
                let is_header = cell.is_header;
                out.push(CellData { colspan: 1, ..cell });
                out.extend((1..span).map(|_| CellData::placeholder(is_header)));
            }
            out
        })
        .collect()
}

/// Pad every row with single-space cells to the widest row.
pub fn rectangularize(rows: &mut [Vec<CellData>]) {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in rows.iter_mut() {
        row.resize_with(columns, CellData::padding);
    }
}

fn render_html(rows: &[Vec<CellData>]) -> String {
    let mut out = String::from("<table>\n");
    for row in rows {
        out.push_str("<tr>\n");
        for cell in row.iter().filter(|c| !c.is_expanded) {
            let tag = if cell.is_header { "th" } else { "td" };
            out.push('<');
            out.push_str(tag);
            if cell.original_colspan > 1 {
                out.push_str(&format!(" colspan=\"{}\"", cell.original_colspan));
            }
            let style: Vec<String> = cell
                .width
                .iter()
                .map(|w| format!("width:{w}"))
                .chain(cell.alignment.css_value().map(|a| format!("text-align:{a}")))
                .collect();
            if !style.is_empty() {
                out.push_str(&format!(" style=\"{}\"", escape_html(&style.join(";"))));
            }
            out.push('>');
            out.push_str(&escape_html(&cell.text));
            out.push_str(&format!("</{tag}>\n"));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_rows(html: &str) -> Vec<Vec<CellData>> {
        let doc = dom::parse(html);
        let table = dom::first_node(&doc.select("table")).unwrap();
        harvest(&table)
    }

    fn first_cell(td: &str) -> CellData {
        let rows = table_rows(&format!("<table><tr>{td}</tr></table>"));
        rows[0][0].clone()
    }

    #[test]
    fn test_span_parsing() {
        assert_eq!(parse_span(None, MAX_COLSPAN), 1);
        assert_eq!(parse_span(Some(" 3 "), MAX_COLSPAN), 3);
        assert_eq!(parse_span(Some("0"), MAX_COLSPAN), 1);
        assert_eq!(parse_span(Some("-2"), MAX_COLSPAN), 1);
        assert_eq!(parse_span(Some("abc"), MAX_COLSPAN), 1);
        assert_eq!(parse_span(Some("5000"), MAX_COLSPAN), 1000);
        assert_eq!(parse_span(Some("99999999999999999999"), MAX_ROWSPAN), 1);
    }

    #[test]
    fn test_alignment_attribute_wins_over_style() {
        let cell = first_cell(r#"<td align="right" style="text-align: center">x</td>"#);
        assert_eq!(cell.alignment, Alignment::Right);

        let cell = first_cell(r#"<td style="color:red; text-align: Center">x</td>"#);
        assert_eq!(cell.alignment, Alignment::Center);

        let cell = first_cell(r#"<td align="middle">x</td>"#);
        assert_eq!(cell.alignment, Alignment::Default);
    }

    #[test]
    fn test_width_normalization() {
        assert_eq!(first_cell(r#"<td width="120">x</td>"#).width.as_deref(), Some("120px"));
        assert_eq!(first_cell(r#"<td width="50%">x</td>"#).width.as_deref(), Some("50%"));
        assert_eq!(first_cell(r#"<td width="0">x</td>"#).width, None);
        assert_eq!(first_cell(r#"<td style="width: 0px">x</td>"#).width, None);
        assert_eq!(
            first_cell(r#"<td width="" style="width:3em">x</td>"#).width.as_deref(),
            Some("3em")
        );
        assert_eq!(first_cell(r#"<td style="max-width:10px">x</td>"#).width, None);
    }

    #[test]
    fn test_rows_without_cells_are_dropped() {
        let rows = table_rows("<table><tr></tr><tr><td>a</td></tr></table>");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_nested_table_is_flattened_into_cell() {
        let rows = table_rows(
            "<table><tr><td>outer <table><tr><td>in1</td><td>in2</td></tr></table></td></tr></table>",
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0][0].text, "outer in1 in2");
    }

    #[test]
    fn test_cell_text_skips_scripts() {
        let cell = first_cell("<td>a<script>var x;</script> <b>b</b></td>");
        assert_eq!(cell.text, "a b");
    }

    #[test]
    fn test_colspan_expansion() {
        let rows = table_rows(r#"<table><tr><th colspan="3">Wide</th></tr></table>"#);
        let grid = expand_colspans(rows);
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[0][0].text, "Wide");
        assert_eq!(grid[0][0].original_colspan, 3);
        assert!(!grid[0][0].is_expanded);
        assert!(grid[0][1].is_expanded && grid[0][2].is_expanded);
        assert!(grid[0][1].text.is_empty());
    }

    #[test]
    fn test_rectangularize_pads_with_space_cells() {
        let rows = table_rows("<table><tr><td>a</td><td>b</td><td>c</td></tr><tr><td>d</td></tr></table>");
        let mut grid = expand_colspans(rows);
        rectangularize(&mut grid);
        assert!(grid.iter().all(|r| r.len() == 3));
        assert_eq!(grid[1][1].text, " ");
    }

    #[test]
    fn test_html_output() {
        let doc = dom::parse(
            r#"<table><tr><th colspan="2" width="100" align="center">A&B</th></tr><tr><td>1</td><td>2</td></tr></table>"#,
        );
        let html = serialize_table(&doc.select("table"), TableFormat::Html);
        assert_eq!(
            html,
            "<table>\n<tr>\n<th colspan=\"2\" style=\"width:100px;text-align:center\">A&amp;B</th>\n</tr>\n<tr>\n<td>1</td>\n<td>2</td>\n</tr>\n</table>\n"
        );
    }

    #[test]
    fn test_empty_table_produces_nothing() {
        let doc = dom::parse("<table></table>");
        assert_eq!(serialize_table(&doc.select("table"), TableFormat::Markdown), "");
        assert_eq!(serialize_table(&doc.select("table"), TableFormat::Html), "");
        assert_eq!(serialize_table(&doc.select("section"), TableFormat::Html), "");
    }

    #[test]
    fn test_cell_limit_truncates_rows() {
        let row = format!("<tr><td colspan=\"{MAX_COLSPAN}\">x</td></tr>");
        let html = format!("<table>{}</table>", row.repeat(50));
        let rows = table_rows(&html);
        assert_eq!(rows.len(), MAX_TABLE_CELLS / MAX_COLSPAN);
    }
}
