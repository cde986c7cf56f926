use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    for line in format_table(headers, &rows) {
        println!("{line}");
    }
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header. Trailing padding is trimmed.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(headers.iter().map(|h| h.to_string()).collect()));
    lines.push(render(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        lines.push(render(row.clone()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let lines = format_table(
            &["ID", "TITLE"],
            &[
                vec!["1".into(), "Gym".into()],
                vec!["12".into(), "Deep work".into()],
            ],
        );
        assert_eq!(
            lines,
            vec![
                "ID  TITLE",
                "--  ---------",
                "1   Gym",
                "12  Deep work",
            ]
        );
    }

    #[test]
    fn empty_rows_still_print_header() {
        let lines = format_table(&["A", "B"], &[]);
        assert_eq!(lines, vec!["A  B", "-  -"]);
    }
}
