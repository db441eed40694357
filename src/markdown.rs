//! Markdown table emission.
//!
//! Renders a rectangular cell grid as a GitHub Flavored Markdown pipe table.
//! The first row is the header row.

use crate::extractor::table::{Alignment, CellData};

/// Escape a cell's text for use inside a pipe table.
///
/// Pipes become `\|`, line breaks become spaces and empty text becomes a
/// single space so the column never collapses.
///
/// # Examples
///
/// ```
/// use rs_maintext::markdown::escape_cell;
///
/// assert_eq!(escape_cell("a|b"), r"a\|b");
/// assert_eq!(escape_cell(""), " ");
/// ```
#[must_use]
pub fn escape_cell(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return " ".to_string();
    }

    let mut result = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        match ch {
            '|' => result.push_str(r"\|"),
            '\n' | '\r' => result.push(' '),
            _ => result.push(ch),
        }
    }
    result
}

/// Separator token for a column alignment.
#[must_use]
pub fn format_separator(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => ":---",
        Alignment::Center => ":--:",
        Alignment::Right => "---:",
        Alignment::Justify | Alignment::Default => "---",
    }
}

/// Alignment of each column: the first non-default alignment, top to bottom.
#[must_use]
pub fn column_alignments(rows: &[Vec<CellData>]) -> Vec<Alignment> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.alignment)
                .find(|a| *a != Alignment::Default)
                .unwrap_or_default()
        })
        .collect()
}

/// Render a grid as a pipe table. An empty grid renders as nothing.
///
/// # Example Output
///
/// ```text
/// | Header A | Header B |
/// | --- | ---: |
/// | Cell 1 | Cell 2 |
/// ```
#[must_use]
pub fn render_table(rows: &[Vec<CellData>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let mut output = String::new();
    push_row(&mut output, header.iter().map(|c| escape_cell(&c.text)));

    let separators = column_alignments(rows).into_iter().map(|a| format_separator(a).to_string());
    push_row(&mut output, separators);

    for row in body {
        push_row(&mut output, row.iter().map(|c| escape_cell(&c.text)));
    }
    output
}

fn push_row(output: &mut String, cells: impl Iterator<Item = String>) {
    output.push('|');
    for cell in cells {
        output.push(' ');
        output.push_str(&cell);
        output.push_str(" |");
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str, alignment: Alignment) -> CellData {
        CellData {
            text: text.to_string(),
            alignment,
            ..CellData::padding()
        }
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("plain"), "plain");
        assert_eq!(escape_cell("  padded  "), "padded");
        assert_eq!(escape_cell("a | b"), r"a \| b");
        assert_eq!(escape_cell("line1\nline2"), "line1 line2");
        assert_eq!(escape_cell("   "), " ");
    }

    #[test]
    fn test_separators() {
        assert_eq!(format_separator(Alignment::Left), ":---");
        assert_eq!(format_separator(Alignment::Center), ":--:");
        assert_eq!(format_separator(Alignment::Right), "---:");
        assert_eq!(format_separator(Alignment::Justify), "---");
        assert_eq!(format_separator(Alignment::Default), "---");
    }

    #[test]
    fn test_column_alignment_first_non_default_wins() {
        let rows = vec![
            vec![cell("a", Alignment::Default), cell("b", Alignment::Right)],
            vec![cell("c", Alignment::Center), cell("d", Alignment::Left)],
        ];
        assert_eq!(column_alignments(&rows), vec![Alignment::Center, Alignment::Right]);
    }

    #[test]
    fn test_render_table() {
        let rows = vec![
            vec![cell("H1", Alignment::Default), cell("H2", Alignment::Right)],
            vec![cell("D1", Alignment::Default), cell("", Alignment::Default)],
        ];
        assert_eq!(render_table(&rows), "| H1 | H2 |\n| --- | ---: |\n| D1 |   |\n");
    }

    #[test]
    fn test_render_empty_grid() {
        assert_eq!(render_table(&[]), "");
    }
}
