use std::collections::HashMap;

use tracing::warn;

use crate::{
    error::RankError,
    invariants::ClientIp,
    models::{AggregateResult, LogRecord},
    rank::octet_rank,
};

/// Request counts keyed by client address.
#[derive(Debug, Default)]
pub struct Analytics {
    hits: HashMap<ClientIp, usize>,
}

impl Analytics {
    pub fn record_hit(&mut self, ip: &ClientIp) {
        *self.hits.entry(ip.clone()).or_default() += 1;
    }

    pub fn distinct_ips(&self) -> usize {
        self.hits.len()
    }

    /// Ranked results: most requests first, then highest octet rank, then
    /// address text so equal keys still come out in a fixed order.
    pub fn into_ranked(self) -> Result<Vec<AggregateResult>, RankError> {
        let mut results = self
            .hits
            .into_iter()
            .map(|(ip, count)| {
                if !ip.is_conventional() {
                    warn!(
                        ip = ip.as_str(),
                        "client ip is not a dotted quad, rank may not follow address order"
                    );
                }
                let rank = octet_rank(&ip)?;
                Ok(AggregateResult { ip, count, rank })
            })
            .collect::<Result<Vec<_>, RankError>>()?;
        results.sort_unstable_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(b.rank.cmp(&a.rank))
                .then_with(|| a.ip.cmp(&b.ip))
        });
        Ok(results)
    }
}

impl<'a> FromIterator<&'a LogRecord> for Analytics {
    fn from_iter<T: IntoIterator<Item = &'a LogRecord>>(iter: T) -> Self {
        let mut analytics = Self::default();
        for record in iter {
            analytics.record_hit(&record.client_ip);
        }
        analytics
    }
}

/// Groups `records` by client address and ranks the groups.
pub fn requests_per_ip(records: &[LogRecord]) -> Result<Vec<AggregateResult>, RankError> {
    records.iter().collect::<Analytics>().into_ranked()
}
