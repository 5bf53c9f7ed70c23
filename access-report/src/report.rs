use csv::WriterBuilder;
use serde::Serialize;

use crate::{error::IngestError, invariants::ClientIp, models::AggregateResult};

pub const HEADER: [&str; 2] = ["Count", "Ip-Address"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub count: usize,
    pub ip_address: ClientIp,
}

impl From<AggregateResult> for ReportRow {
    fn from(AggregateResult { ip, count, .. }: AggregateResult) -> Self {
        Self {
            count,
            ip_address: ip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub header: [&'static str; 2],
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Keeps the order of `results`.
    pub fn assemble(results: Vec<AggregateResult>) -> Self {
        Self {
            header: HEADER,
            rows: results.into_iter().map(ReportRow::from).collect(),
        }
    }

    pub fn to_csv(&self) -> Result<String, IngestError> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        writer.write_record(self.header)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| IngestError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
