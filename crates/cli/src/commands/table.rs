//! Plain-text table rendering for list commands.

/// Print rows as an aligned table with a header rule.
pub fn render(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter().copied())
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    println!("{}", header_line.join("  "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        println!("{}", line.join("  "));
    }
    println!("({} rows)", rows.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_does_not_panic_on_ragged_rows() {
        render(
            &["ID", "Name"],
            &[
                vec!["1".to_string(), "Mug".to_string()],
                vec!["2".to_string()],
            ],
        );
    }
}
