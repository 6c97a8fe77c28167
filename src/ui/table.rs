use std::path::{Path, PathBuf};

use tabled::{settings::Style, Table, Tabled};

use crate::descriptor::Descriptor;

#[derive(Tabled)]
struct DescriptorRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Functions")]
    functions: usize,
    #[tabled(rename = "Exported to")]
    path: String,
}

/// Render the recovered descriptors and their export destinations as a
/// summary table. Empty input renders an empty string.
pub fn descriptor_table(rows: &[(Descriptor, PathBuf)]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let rows: Vec<DescriptorRow> = rows
        .iter()
        .map(|(descriptor, path)| DescriptorRow {
            name: descriptor.name.clone(),
            version: descriptor.version.clone(),
            functions: descriptor.function_count(),
            path: display_path(path),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_rows_render_nothing() {
        assert_eq!(descriptor_table(&[]), "");
    }

    #[test]
    fn test_rows_include_name_and_destination() {
        let descriptor = Descriptor {
            version: "1.2".to_string(),
            name: "Faucet".to_string(),
            bytecode: "00".to_string(),
            code_hash: "11".to_string(),
            fields_sig: json!({}),
            events_sig: json!([]),
            functions: json!([{"name": "a"}, {"name": "b"}]),
            constants: json!([]),
            enums: json!([]),
        };
        let table = descriptor_table(&[(descriptor, PathBuf::from("exports/x/Faucet.json"))]);
        assert!(table.contains("Faucet"));
        assert!(table.contains("1.2"));
        assert!(table.contains("2"));
        assert!(table.contains("exports/x/Faucet.json"));
    }
}
