use chrono::NaiveDateTime;

use crate::{
    invariants::{ClientIp, OctetRank},
    status::HttpStatus,
};

/// One request line of a W3C extended access log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// `None` when the date and time fields could not be read.
    pub timestamp: Option<NaiveDateTime>,
    pub client_ip: ClientIp,
    pub username: String,
    pub site_name: String,
    pub computer_name: String,
    pub server_ip: String,
    pub server_port: i32,
    pub method: String,
    pub uri_stem: String,
    pub uri_query: String,
    pub status: HttpStatus,
    pub win32_status: i32,
    pub bytes_sent: u32,
    pub time_taken_ms: u32,
    pub protocol_version: String,
    pub host: String,
    pub user_agent: String,
    pub cookie: String,
    pub referrer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub ip: ClientIp,
    pub count: usize,
    pub rank: OctetRank,
}
