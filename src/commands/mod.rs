//! Command implementations for the CLI
//!
//! Each submodule backs one or two subcommands: it loads the configuration,
//! wires up the hasher and repository backend, delegates to the orchestrators
//! in `ops`, and renders the result for the terminal.

pub mod build;
pub mod clean;
pub mod deploy;
pub mod hash;
pub mod names;
pub mod status;

/// Render a two-column table with dashed rules above and below the rows.
///
/// Column widths follow the longest cell, so the output stays aligned for
/// any artifact or application name length.
pub(crate) fn render_table(headers: (&str, &str), rows: &[(String, String)]) -> String {
    let left_width = rows
        .iter()
        .map(|(left, _)| left.len())
        .chain([headers.0.len()])
        .max()
        .unwrap_or(0);
    let right_width = rows
        .iter()
        .map(|(_, right)| right.len())
        .chain([headers.1.len()])
        .max()
        .unwrap_or(0);

    let rule = format!("{} {}", "-".repeat(left_width + 2), "-".repeat(right_width + 2));
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(" {:<left_width$}   {}\n", headers.0, headers.1));
    out.push_str(&rule);
    out.push('\n');
    for (left, right) in rows {
        out.push_str(&format!(" {left:<left_width$}   {right}\n"));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            ("api".to_string(), "api-abc.tar.gz".to_string()),
            ("frontend".to_string(), "fe-def.tar.gz".to_string()),
        ];
        let table = render_table(("Application", "Artifact Name"), &rows);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("---"));
        assert_eq!(lines[0], lines[2]);
        assert_eq!(lines[0], lines[5]);
        assert!(lines[1].contains("Application"));
        assert!(lines[3].contains("api-abc.tar.gz"));
        // both value columns start at the same offset
        let offset = lines[3].find("api-abc").unwrap();
        assert_eq!(lines[4].find("fe-def").unwrap(), offset);
    }

    #[test]
    fn test_render_table_header_wider_than_rows() {
        let rows = vec![("a".to_string(), "b".to_string())];
        let table = render_table(("Application", "Hash"), &rows);
        assert!(table.contains(" Application   Hash"));
    }
}
