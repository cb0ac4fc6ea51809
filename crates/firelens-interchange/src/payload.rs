//! Export files

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use firelens_core::Document;

use crate::{ExportError, to_csv, to_json_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportMode {
    /// One file per document, named after its id
    #[default]
    PerDocument,
    /// One file for all documents, named after the collection
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub mode: ExportMode,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            mode: ExportMode::PerDocument,
            pretty: true,
        }
    }
}

/// One file to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub contents: String,
}

/// Build export files with pretty-printed JSON
pub fn build_payloads(
    collection: &str,
    docs: &[&Document],
    format: ExportFormat,
    mode: ExportMode,
) -> Result<Vec<ExportPayload>, ExportError> {
    build_payloads_with(
        collection,
        docs,
        &ExportOptions {
            format,
            mode,
            pretty: true,
        },
    )
}

pub fn build_payloads_with(
    collection: &str,
    docs: &[&Document],
    options: &ExportOptions,
) -> Result<Vec<ExportPayload>, ExportError> {
    if docs.is_empty() {
        return Err(ExportError::NothingSelected);
    }

    let ext = options.format.extension();
    let payloads = match options.mode {
        ExportMode::PerDocument => {
            let mut used = HashSet::new();
            docs.iter()
                .map(|doc| {
                    Ok(ExportPayload {
                        file_name: unique_file_name(&sanitize_file_name(&doc.id), ext, &mut used),
                        contents: render(&[*doc], options, false)?,
                    })
                })
                .collect::<Result<Vec<_>, ExportError>>()?
        }
        ExportMode::Combined => vec![ExportPayload {
            file_name: format!("{}.{}", sanitize_file_name(collection), ext),
            contents: render(docs, options, true)?,
        }],
    };

    tracing::debug!(
        collection = %collection,
        documents = docs.len(),
        files = payloads.len(),
        format = ext,
        "built export payloads"
    );
    Ok(payloads)
}

fn render(docs: &[&Document], options: &ExportOptions, as_array: bool) -> Result<String, ExportError> {
    match options.format {
        ExportFormat::Csv => Ok(to_csv(docs)),
        ExportFormat::Json => {
            let value = if as_array {
                serde_json::Value::Array(docs.iter().map(|doc| to_json_value(doc)).collect())
            } else {
                docs.first()
                    .map(|doc| to_json_value(doc))
                    .unwrap_or(serde_json::Value::Null)
            };
            let text = if options.pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            Ok(text)
        }
    }
}

/// `stem.ext`, or `stem_2.ext`, `stem_3.ext`... when an earlier file already took the name.
/// Names are compared case-insensitively.
fn unique_file_name(stem: &str, ext: &str, used: &mut HashSet<String>) -> String {
    let mut name = format!("{stem}.{ext}");
    let mut n = 2;
    while !used.insert(name.to_lowercase()) {
        name = format!("{stem}_{n}.{ext}");
        n += 1;
    }
    name
}

/// Replace characters that can't appear in a file name
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Write every payload into `dir`, creating it if needed; returns the written paths.
/// Nothing is written when two payloads share a file name.
pub async fn write_payloads(
    dir: &Path,
    payloads: &[ExportPayload],
) -> Result<Vec<PathBuf>, ExportError> {
    let mut names = HashSet::new();
    if let Some(dup) = payloads
        .iter()
        .find(|payload| !names.insert(payload.file_name.to_lowercase()))
    {
        return Err(ExportError::DuplicateFileName(dup.file_name.clone()));
    }

    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(payloads.len());
    for payload in payloads {
        let path = dir.join(&payload.file_name);
        tokio::fs::write(&path, payload.contents.as_bytes()).await?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "export written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn docs() -> Vec<Document> {
        vec![
            Document::from_value(json!({"id": "a", "n": 1})).unwrap(),
            Document::from_value(json!({"id": "b", "m": 2})).unwrap(),
        ]
    }

    #[test]
    fn test_per_document_json() {
        let all = docs();
        let refs: Vec<&Document> = all.iter().collect();
        let payloads =
            build_payloads("users", &refs, ExportFormat::Json, ExportMode::PerDocument).unwrap();

        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0].file_name, "a.json");
        assert_eq!(payloads[0].contents, "{\n  \"id\": \"a\",\n  \"n\": 1\n}");
        assert_eq!(payloads[1].file_name, "b.json");
    }

    #[test]
    fn test_combined_csv() {
        let all = docs();
        let refs: Vec<&Document> = all.iter().collect();
        let payloads =
            build_payloads("users", &refs, ExportFormat::Csv, ExportMode::Combined).unwrap();

        assert_eq!(
            payloads,
            vec![ExportPayload {
                file_name: "users.csv".into(),
                contents: "id,m,n\na,,1\nb,2,".into(),
            }]
        );
    }

    #[test]
    fn test_per_document_csv_has_own_header() {
        let all = docs();
        let refs: Vec<&Document> = all.iter().collect();
        let payloads =
            build_payloads("users", &refs, ExportFormat::Csv, ExportMode::PerDocument).unwrap();
        assert_eq!(payloads[1].file_name, "b.csv");
        assert_eq!(payloads[1].contents, "id,m\nb,2");
    }

    #[test]
    fn test_compact_combined_json() {
        let all = docs();
        let refs: Vec<&Document> = all.iter().collect();
        let options = ExportOptions {
            format: ExportFormat::Json,
            mode: ExportMode::Combined,
            pretty: false,
        };
        let payloads = build_payloads_with("users", &refs, &options).unwrap();
        assert_eq!(
            payloads[0].contents,
            r#"[{"id":"a","n":1},{"id":"b","m":2}]"#
        );
    }

    #[test]
    fn test_nothing_selected() {
        assert!(matches!(
            build_payloads("users", &[], ExportFormat::Json, ExportMode::Combined),
            Err(ExportError::NothingSelected)
        ));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("plain-id_1"), "plain-id_1");
        assert_eq!(sanitize_file_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_file_name(".."), "_");
    }

    #[tokio::test]
    async fn test_write_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let payloads = vec![
            ExportPayload {
                file_name: "a.json".into(),
                contents: "{}".into(),
            },
            ExportPayload {
                file_name: "b.json".into(),
                contents: "[]".into(),
            },
        ];

        let paths = write_payloads(&out, &payloads).await.unwrap();
        assert_eq!(paths, vec![out.join("a.json"), out.join("b.json")]);
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_colliding_ids_get_distinct_files() {
        let all = vec![
            Document::from_value(json!({"id": "a/b", "n": 1})).unwrap(),
            Document::from_value(json!({"id": "a_b", "n": 2})).unwrap(),
            Document::from_value(json!({"id": "A_B", "n": 3})).unwrap(),
            Document::from_value(json!({"id": "a_b_2", "n": 4})).unwrap(),
        ];
        let refs: Vec<&Document> = all.iter().collect();
        let payloads =
            build_payloads("users", &refs, ExportFormat::Json, ExportMode::PerDocument).unwrap();

        let names: Vec<&str> = payloads.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["a_b.json", "a_b_2.json", "A_B_3.json", "a_b_2_2.json"]);

        let dir = tempfile::tempdir().unwrap();
        let paths = write_payloads(dir.path(), &payloads).await.unwrap();
        assert_eq!(paths.len(), 4);
        assert!(std::fs::read_to_string(&paths[1]).unwrap().contains("\"a_b\""));
    }

    #[tokio::test]
    async fn test_write_rejects_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let payloads = vec![
            ExportPayload {
                file_name: "a.json".into(),
                contents: "1".into(),
            },
            ExportPayload {
                file_name: "a.json".into(),
                contents: "2".into(),
            },
        ];

        let err = write_payloads(&out, &payloads).await.unwrap_err();
        assert!(matches!(err, ExportError::DuplicateFileName(name) if name == "a.json"));
        assert!(!out.exists());
    }
}
