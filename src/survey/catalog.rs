use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::priorities::FamilyPriorities;
use super::responses::Responses;
use super::types::Question;
use crate::error::ValidationError;

/// Question catalog file: `{ questions: [...] }`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub questions: Vec<Question>,
}

impl Catalog {
    /// Reject catalogs that reuse a question id
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(ValidationError::DuplicateQuestionId {
                    id: question.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// One family's survey submission: their priorities and answers
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SurveySubmission {
    pub priorities: FamilyPriorities,
    #[serde(default)]
    pub responses: Responses,
}

/// Read a YAML or JSON document. `.json` files are parsed as JSON,
/// anything else as YAML.
fn read_document<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} at {}", what, path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}: invalid JSON in {}", what, path.display()))
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse {}: invalid YAML in {}", what, path.display()))
    }
}

/// Load and validate a question catalog
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog: Catalog = read_document(path, "question catalog")?;
    catalog
        .validate()
        .with_context(|| format!("Invalid question catalog at {}", path.display()))?;
    tracing::debug!(
        "Loaded {} questions from {}",
        catalog.questions.len(),
        path.display()
    );
    Ok(catalog)
}

/// Load a survey submission
pub fn load_submission(path: &Path) -> Result<SurveySubmission> {
    let submission: SurveySubmission = read_document(path, "survey submission")?;
    tracing::debug!(
        "Loaded {} responses from {}",
        submission.responses.len(),
        path.display()
    );
    Ok(submission)
}
