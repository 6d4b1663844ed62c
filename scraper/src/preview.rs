//! Boxed console rendering of a `Table`.
//!
//! Read-only: rendering never touches the export files.

use crate::export::Table;

fn width(s: &str) -> usize {
    s.chars().count()
}

fn rule(widths: &[usize], left: char, fill: char, mid: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            line.push(mid);
        }
        line.extend(std::iter::repeat(fill).take(w + 2));
    }
    line.push(right);
    line.push('\n');
    line
}

fn cells(values: &[String], widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (value, w) in values.iter().zip(widths) {
        let pad = w - width(value);
        line.push(' ');
        line.push_str(value);
        line.extend(std::iter::repeat(' ').take(pad + 1));
        line.push('│');
    }
    line.push('\n');
    line
}

/// Renders the table as a grid: double rule under the header, single
/// rules between rows.
pub fn render_table(table: &Table) -> String {
    if table.headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = table.headers.iter().map(|h| width(h)).collect();
    for row in &table.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = rule(&widths, '╒', '═', '╤', '╕');
    out.push_str(&cells(&table.headers, &widths));

    if table.rows.is_empty() {
        out.push_str(&rule(&widths, '╘', '═', '╧', '╛'));
        return out;
    }

    out.push_str(&rule(&widths, '╞', '═', '╪', '╡'));
    for (i, row) in table.rows.iter().enumerate() {
        out.push_str(&cells(row, &widths));
        if i + 1 < table.rows.len() {
            out.push_str(&rule(&widths, '├', '─', '┼', '┤'));
        }
    }
    out.push_str(&rule(&widths, '╘', '═', '╧', '╛'));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            headers: vec!["job_id".into(), "role".into()],
            rows: vec![
                vec!["1".into(), "Data Scientist".into()],
                vec!["22".into(), "".into()],
            ],
        }
    }

    #[test]
    fn test_render_grid() {
        let expected = "\
╒════════╤════════════════╕
│ job_id │ role           │
╞════════╪════════════════╡
│ 1      │ Data Scientist │
├────────┼────────────────┤
│ 22     │                │
╘════════╧════════════════╛
";
        assert_eq!(render_table(&table()), expected);
    }

    #[test]
    fn test_header_only() {
        let t = Table {
            headers: vec!["job_id".into()],
            rows: vec![],
        };
        assert_eq!(render_table(&t), "╒════════╕\n│ job_id │\n╘════════╛\n");
    }

    #[test]
    fn test_no_records_still_shows_columns() {
        let rendered = render_table(&Table::from_records(&[]));
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "│ job_id │ company_name │ role │ job_url │");
    }

    #[test]
    fn test_nothing_to_render() {
        let t = Table {
            headers: vec![],
            rows: vec![],
        };
        assert_eq!(render_table(&t), "");
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let t = Table {
            headers: vec!["company_name".into()],
            rows: vec![vec!["Société Générale Ümlaut".into()]],
        };
        let rendered = render_table(&t);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(width(lines[0]), width(lines[3]));
    }
}
