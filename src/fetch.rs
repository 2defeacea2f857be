//! Remote catalog client
//!
//! `DataProvider` over the HTTP boundary. Every call performs a fresh
//! `GET /api/data`; the payload is identical across calls because the
//! server memoizes its collection.

use std::sync::Arc;

use crate::catalog::{DataProvider, DataResponse, Record};
use crate::error::{QuickPickError, Result};

pub struct RemoteCatalog {
    endpoint: String,
}

impl RemoteCatalog {
    /// `base_url` is the server root, e.g. `http://localhost:3000`
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/api/data", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DataProvider for RemoteCatalog {
    fn fetch_all(&self) -> Result<Arc<Vec<Record>>> {
        let response = reqwest::blocking::get(&self.endpoint)
            .map_err(|e| QuickPickError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(QuickPickError::EndpointStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: DataResponse = response
            .json()
            .map_err(|e| QuickPickError::MalformedPayload(e.to_string()))?;

        Ok(Arc::new(payload.data))
    }
}
