use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::es::api::BulkResponse;
use crate::es::{EsApi, EsTransport};
use crate::models::MonitoringDocument;

/// Action řádek bulk API: `{"index":{"_index":..., "_type":...}}`
#[derive(Debug, Serialize)]
struct BulkAction<'a> {
    index: BulkActionMeta<'a>,
}

#[derive(Debug, Serialize)]
struct BulkActionMeta<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_type")]
    doc_type: &'a str,
}

/// Dávka dokumentů pro jeden cílový index, staví se pro každý cyklus znovu
#[derive(Debug)]
pub struct BulkBatch {
    index: String,
    documents: Vec<MonitoringDocument>,
}

impl BulkBatch {
    pub fn new(index: impl Into<String>, documents: Vec<MonitoringDocument>) -> Self {
        Self {
            index: index.into(),
            documents,
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// NDJSON payload: action řádek + dokument pro každou položku, s koncovým newline
    pub fn to_ndjson(&self) -> Result<String> {
        let mut payload = String::new();

        for document in &self.documents {
            let action = BulkAction {
                index: BulkActionMeta {
                    index: &self.index,
                    doc_type: document.doc_type(),
                },
            };
            payload.push_str(&serde_json::to_string(&action)?);
            payload.push('\n');
            payload.push_str(
                &serde_json::to_string(document).context("Failed to serialize document")?,
            );
            payload.push('\n');
        }

        Ok(payload)
    }
}

/// Výsledek publikace jedné dávky
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub submitted: usize,
    pub failed: usize,
}

/// Položka bulk odpovědi, která neskončila statusem 201
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub position: usize,
    pub id: Option<String>,
    pub status: u16,
    pub error: Option<Value>,
}

/// Vybere neúspěšné položky bulk odpovědi
pub fn item_failures(response: &BulkResponse) -> Vec<ItemFailure> {
    response
        .items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let result = item.index.as_ref()?;
            (result.status != 201).then(|| ItemFailure {
                position,
                id: result.id.clone(),
                status: result.status,
                error: result.error.clone(),
            })
        })
        .collect()
}

/// Posílá dávky do monitorovacího clusteru
pub struct Publisher<T> {
    destination: T,
}

impl<T: EsTransport> Publisher<T> {
    pub fn new(destination: T) -> Self {
        Self { destination }
    }

    #[cfg(test)]
    pub fn destination(&self) -> &T {
        &self.destination
    }

    /// Odešle dávku jedním bulk requestem
    ///
    /// Chyba celého requestu se propaguje, chyby jednotlivých položek se jen
    /// zalogují a položky se zahodí.
    pub async fn publish(&self, batch: &BulkBatch) -> Result<PublishReport> {
        if batch.is_empty() {
            return Ok(PublishReport {
                submitted: 0,
                failed: 0,
            });
        }

        let payload = batch.to_ndjson()?;
        tracing::debug!(
            "Sending {} documents ({} bytes) to index {}",
            batch.len(),
            payload.len(),
            batch.index()
        );

        let response = self
            .destination
            .bulk(batch.index(), payload)
            .await
            .with_context(|| format!("Bulk request to index {} failed", batch.index()))?;

        tracing::debug!("Bulk request took {} ms", response.took);

        let failures = item_failures(&response);
        for failure in &failures {
            let error = failure
                .error
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_else(|| "null".to_string());
            tracing::warn!(
                "Failed to index document #{} (id {}, status {}): {}",
                failure.position,
                failure.id.as_deref().unwrap_or("-"),
                failure.status,
                error
            );
        }

        Ok(PublishReport {
            submitted: batch.len(),
            failed: failures.len(),
        })
    }
}
