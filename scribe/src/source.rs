//! Where records come from

use crate::errors::ScribeError;
use crate::record::Record;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{info, instrument};

/// Produces the records of one run.
pub trait RecordSource {
    /// Returns at most `limit` records, in the order the source lists them.
    fn fetch(&self, limit: usize) -> Result<Vec<Record>, ScribeError>;
}

/// Reads records with a single unauthenticated GET returning a JSON array.
pub struct HttpRecordSource {
    client: Client,
    url: String,
}

impl HttpRecordSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ScribeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl RecordSource for HttpRecordSource {
    #[instrument(skip(self), fields(url = %self.url))]
    fn fetch(&self, limit: usize) -> Result<Vec<Record>, ScribeError> {
        info!("Fetching records from {}", self.url);

        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScribeError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let payload = response.text()?;
        let mut records: Vec<Record> = serde_json::from_str(&payload)?;
        info!("Got {} records from API", records.len());

        records.truncate(limit);
        Ok(records)
    }
}
