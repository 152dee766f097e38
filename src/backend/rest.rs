use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use ureq::Agent;

use super::{InvoiceSource, KotQuery, KotSource};
use crate::config::BackendSettings;
use crate::error::{PosError, Result};
use crate::model::{Invoice, InvoiceDocument, InvoiceLineItem, KotRecord};

/// Read-only client for the hosted PostgREST endpoint.
pub struct RestClient {
    agent: Agent,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct InvoiceRow {
    #[serde(flatten)]
    invoice: Invoice,
    #[serde(default)]
    invoice_items: Vec<InvoiceLineItem>,
}

impl RestClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_settings(settings: &BackendSettings) -> Result<Self> {
        match (settings.url.as_deref(), settings.anon_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Ok(Self::new(
                url,
                key,
                Duration::from_secs(settings.timeout_secs),
            )),
            _ => Err(PosError::BackendNotConfigured),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn get_json<T>(&self, table: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.table_url(table);
        debug!(%url, ?params, "backend query");

        let mut request = self
            .agent
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json");
        for (key, value) in params {
            request = request.query(key, value);
        }

        let body = request.call()?.body_mut().read_to_string()?;
        serde_json::from_str(&body).map_err(|e| PosError::Parse {
            what: format!("{table} response"),
            source: e,
        })
    }
}

impl KotSource for RestClient {
    fn fetch_kots(&self, query: &KotQuery) -> Result<Vec<KotRecord>> {
        let records: Vec<KotRecord> = self.get_json("kots", &query.to_params())?;
        info!(count = records.len(), "fetched tickets");
        Ok(records)
    }
}

impl InvoiceSource for RestClient {
    fn fetch_invoice(&self, number: &str) -> Result<InvoiceDocument> {
        let params = [
            ("select", "*,invoice_items(*)".to_string()),
            ("invoice_number", format!("eq.{number}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<InvoiceRow> = self.get_json("invoices", &params)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| PosError::InvoiceNotFound(number.to_string()))?;

        Ok(InvoiceDocument {
            invoice: row.invoice,
            items: row.invoice_items,
        })
    }
}
