/// Formula report driver
///
/// Walks one benchmark root (one subdirectory per model), decodes the two
/// category formula files in each, classifies every query, and emits one
/// report line per query. A missing or malformed formula file is fatal for
/// the whole run, matching the verdict decoder's policy.
use crate::classify::classifier::QueryClassifier;
use crate::classify::Classification;
use crate::config::types::*;
use crate::verdict::decoder::OutputFormat;
use crate::formula::decode_queries;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

/// One report line of the formula report.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FormulaEntry {
    pub model: String,
    pub category: Category,
    pub index: usize,
    #[serde(flatten)]
    pub classification: Classification,
}

impl fmt::Display for FormulaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:02} {} {}",
            self.model,
            self.category,
            self.index,
            self.classification.polarity,
            self.classification.size
        )
    }
}

/// Classify every query under `root`, writing one line per query.
///
/// Subdirectory names are sorted so the report is deterministic regardless
/// of directory listing order; within one file, queries keep their
/// declaration order.
pub fn write_report<W: Write>(
    root: &Path,
    writer: &mut W,
    config: &ClassifierConfig,
    format: OutputFormat,
) -> Result<()> {
    let classifier = QueryClassifier::new(config.clone());

    let mut models = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            models.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    models.sort();

    for model in &models {
        for category in Category::ALL {
            write_category(root, model, category, &classifier, writer, format)?;
        }
    }
    Ok(())
}

fn write_category<W: Write>(
    root: &Path,
    model: &str,
    category: Category,
    classifier: &QueryClassifier,
    writer: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let path = root.join(model).join(category.file_name());
    log::debug!("decoding formula file {}", path.display());
    let xml = fs::read_to_string(&path)?;
    let queries = decode_queries(&xml)?;

    for (index, query) in queries.iter().enumerate() {
        let classification = classifier.classify(query, category)?;
        let entry = FormulaEntry {
            model: model.to_string(),
            category,
            index,
            classification,
        };
        match format {
            OutputFormat::Text => writeln!(writer, "{}", entry)?,
            OutputFormat::Json => {
                let json = serde_json::to_string(&entry)
                    .map_err(|e| ReportError::Serialize(e.to_string()))?;
                writeln!(writer, "{}", json)?;
            }
        }
    }
    Ok(())
}
