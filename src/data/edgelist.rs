//! Edge list and JSON adjacency file handling

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Read a plain-text edge list.
///
/// One `u v` pair per line, separated by whitespace or a comma. Blank lines
/// and lines starting with `#` are skipped. Pairs are returned as read; any
/// symmetry or self-loop checks happen when the graph is built.
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<Vec<(String, String)>> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let mut pairs = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        match (fields.next(), fields.next(), fields.next()) {
            (Some(u), Some(v), None) => pairs.push((u.to_string(), v.to_string())),
            _ => {
                return Err(anyhow!(
                    "{}:{}: expected two vertex ids, got {:?}",
                    path.display(),
                    line_no + 1,
                    line
                ))
            }
        }
    }

    log::info!("Loaded {} edges", pairs.len());
    Ok(pairs)
}

/// Read a JSON object mapping each vertex id to an array of neighbor ids
pub fn load_adjacency_json(path: impl AsRef<Path>) -> Result<BTreeMap<String, Vec<String>>> {
    let path = path.as_ref();
    log::info!("Reading adjacency mapping: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let adjacency: BTreeMap<String, Vec<String>> = serde_json::from_str(&text)
        .with_context(|| format!("parsing adjacency JSON in {}", path.display()))?;

    log::info!("Loaded adjacency for {} vertices", adjacency.len());
    Ok(adjacency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn edge_list_skips_comments_and_mixed_separators() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# karate excerpt").unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "2,3").unwrap();
        writeln!(file, "  3\t4  ").unwrap();

        let pairs = load_edge_list(file.path()).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("1".to_string(), "2".to_string()),
                ("2".to_string(), "3".to_string()),
                ("3".to_string(), "4".to_string()),
            ]
        );
    }

    #[test]
    fn edge_list_rejects_malformed_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2 3").unwrap();
        let err = load_edge_list(file.path()).unwrap_err();
        assert!(err.to_string().contains("expected two vertex ids"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_edge_list(dir.path().join("nope.txt")).is_err());
        assert!(load_adjacency_json(dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn adjacency_json_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"a": ["b"], "b": ["a"], "c": []}}"#).unwrap();
        let adjacency = load_adjacency_json(file.path()).unwrap();
        assert_eq!(adjacency.len(), 3);
        assert_eq!(adjacency["a"], vec!["b".to_string()]);
    }
}
