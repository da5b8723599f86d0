use anyhow::{Context, Result};
use std::path::Path;

use crate::error::AgentError;
use crate::es::{EsApi, EsTransport};

/// Placeholder v těle templatu, nahrazuje se `{prefix}*`
pub const INDEX_PREFIX_PLACEHOLDER: &str = "{{INDEX_PREFIX}}";

/// Definice index templatu (název + tělo s placeholderem)
#[derive(Debug, Clone, PartialEq)]
pub struct IndexTemplate {
    pub name: String,
    pub body: String,
}

impl IndexTemplate {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Dosadí prefix indexu do placeholderu
    pub fn render(&self, index_prefix: &str) -> String {
        self.body
            .replace(INDEX_PREFIX_PLACEHOLDER, &format!("{}*", index_prefix))
            .trim()
            .to_string()
    }
}

/// Načte všechny `*.json` soubory z adresáře, název templatu = název souboru bez přípony
pub fn load_templates(dir: &Path) -> Result<Vec<IndexTemplate>> {
    let entries = std::fs::read_dir(dir).map_err(|source| AgentError::TemplateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut templates = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| AgentError::TemplateDir {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;

        templates.push(IndexTemplate::new(name, body));
    }

    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}

/// Zaregistruje templaty v cílovém clusteru (create-or-replace)
///
/// Jakákoliv chyba je fatální, bez templatů se do smyčky nepokračuje.
pub async fn provision_templates<T: EsTransport + ?Sized>(
    destination: &T,
    templates: &[IndexTemplate],
    index_prefix: &str,
) -> Result<()> {
    if templates.is_empty() {
        tracing::warn!("No index templates to register");
        return Ok(());
    }

    for template in templates {
        destination
            .put_template(&template.name, template.render(index_prefix))
            .await
            .with_context(|| format!("Failed to register index template '{}'", template.name))?;

        tracing::info!("Registered index template: {}", template.name);
    }

    Ok(())
}
