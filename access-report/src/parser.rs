use std::{num::ParseIntError, str::FromStr};

use chrono::NaiveDateTime;
use derive_more::Display;
use tracing::debug;

use crate::{error::ParseError, models::LogRecord, status::HttpStatus};

pub const SEPARATOR: char = ' ';
pub const COMMENT_MARKER: char = '#';
pub const FIELD_COUNT: usize = 20;

// Tried in order against "<date> <time>".
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

/// Column of the fixed W3C layout. The discriminant is the field's position
/// on the line and the display form is its `#Fields:` directive name.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    #[display("date")]
    Date = 0,
    #[display("time")]
    Time = 1,
    #[display("c-ip")]
    ClientIp = 2,
    #[display("cs-username")]
    Username = 3,
    #[display("s-sitename")]
    SiteName = 4,
    #[display("s-computername")]
    ComputerName = 5,
    #[display("s-ip")]
    ServerIp = 6,
    #[display("s-port")]
    ServerPort = 7,
    #[display("cs-method")]
    Method = 8,
    #[display("cs-uri-stem")]
    UriStem = 9,
    #[display("cs-uri-query")]
    UriQuery = 10,
    #[display("sc-status")]
    Status = 11,
    #[display("sc-win32-status")]
    Win32Status = 12,
    #[display("sc-bytes")]
    BytesSent = 13,
    #[display("time-taken")]
    TimeTaken = 14,
    #[display("cs-version")]
    ProtocolVersion = 15,
    #[display("cs-host")]
    Host = 16,
    #[display("cs(User-Agent)")]
    UserAgent = 17,
    #[display("cs(Cookie)")]
    Cookie = 18,
    #[display("cs(Referer)")]
    Referrer = 19,
}

impl Field {
    pub const LAYOUT: [Field; FIELD_COUNT] = [
        Field::Date,
        Field::Time,
        Field::ClientIp,
        Field::Username,
        Field::SiteName,
        Field::ComputerName,
        Field::ServerIp,
        Field::ServerPort,
        Field::Method,
        Field::UriStem,
        Field::UriQuery,
        Field::Status,
        Field::Win32Status,
        Field::BytesSent,
        Field::TimeTaken,
        Field::ProtocolVersion,
        Field::Host,
        Field::UserAgent,
        Field::Cookie,
        Field::Referrer,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
pub struct ParsedLog {
    pub records: Vec<LogRecord>,
    pub lines: usize,
    pub comments: usize,
    pub dropped: usize,
}

/// Parses every data line of a log. Comment lines are skipped, lines with
/// fewer than [`FIELD_COUNT`] fields are dropped, and the first bad numeric
/// or status field aborts the whole parse.
pub fn parse_lines<'a, I>(lines: I, separator: char) -> Result<ParsedLog, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed = ParsedLog::default();
    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        parsed.lines += 1;
        if line.starts_with(COMMENT_MARKER) {
            parsed.comments += 1;
            continue;
        }
        let fields: Vec<&str> = line.split(separator).collect();
        if fields.len() < FIELD_COUNT {
            debug!(line = line_no, fields = fields.len(), "dropping short line");
            parsed.dropped += 1;
            continue;
        }
        parsed.records.push(parse_record(line_no, &fields)?);
    }
    Ok(parsed)
}

struct RawFields<'a, 'f> {
    line: usize,
    fields: &'f [&'a str],
}

impl<'a> RawFields<'a, '_> {
    fn text(&self, field: Field) -> &'a str {
        self.fields[field.index()]
    }

    fn string(&self, field: Field) -> String {
        self.text(field).to_string()
    }

    fn number<T>(&self, field: Field) -> Result<T, ParseError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let value = self.text(field);
        value.parse().map_err(|source| ParseError::InvalidNumber {
            line: self.line,
            field,
            value: value.into(),
            source,
        })
    }

    fn status(&self) -> Result<HttpStatus, ParseError> {
        self.text(Field::Status)
            .parse()
            .map_err(|source| ParseError::UnknownStatus {
                line: self.line,
                source,
            })
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        let joined = format!("{} {}", self.text(Field::Date), self.text(Field::Time));
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&joined, fmt).ok())
    }
}

fn parse_record(line: usize, fields: &[&str]) -> Result<LogRecord, ParseError> {
    let raw = RawFields { line, fields };
    Ok(LogRecord {
        timestamp: raw.timestamp(),
        client_ip: raw.text(Field::ClientIp).into(),
        username: raw.string(Field::Username),
        site_name: raw.string(Field::SiteName),
        computer_name: raw.string(Field::ComputerName),
        server_ip: raw.string(Field::ServerIp),
        server_port: raw.number(Field::ServerPort)?,
        method: raw.string(Field::Method),
        uri_stem: raw.string(Field::UriStem),
        uri_query: raw.string(Field::UriQuery),
        status: raw.status()?,
        win32_status: raw.number(Field::Win32Status)?,
        bytes_sent: raw.number(Field::BytesSent)?,
        time_taken_ms: raw.number(Field::TimeTaken)?,
        protocol_version: raw.string(Field::ProtocolVersion),
        host: raw.string(Field::Host),
        user_agent: raw.string(Field::UserAgent),
        cookie: raw.string(Field::Cookie),
        referrer: raw.string(Field::Referrer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;
    use chrono::NaiveDate;

    const LINE: &str = "2024-01-01 00:00:00 10.0.0.1 - W3SVC1 WEB01 10.0.0.2 80 GET /a q=1 200 0 100 5 HTTP/1.1 host agent - -";

    fn with_field(field: Field, value: &str) -> String {
        let mut fields: Vec<&str> = LINE.split(SEPARATOR).collect();
        fields[field.index()] = value;
        fields.join(" ")
    }

    #[test]
    fn layout_matches_positions() {
        for (pos, field) in Field::LAYOUT.iter().enumerate() {
            assert_eq!(field.index(), pos, "{field}");
        }
    }

    #[test]
    fn parse_full_line() {
        let parsed = parse_lines([LINE], SEPARATOR).unwrap();
        assert_that!(parsed.records.len()).is_equal_to(1);
        assert_eq!(
            parsed.records[0],
            LogRecord {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0)),
                client_ip: "10.0.0.1".into(),
                username: "-".into(),
                site_name: "W3SVC1".into(),
                computer_name: "WEB01".into(),
                server_ip: "10.0.0.2".into(),
                server_port: 80,
                method: "GET".into(),
                uri_stem: "/a".into(),
                uri_query: "q=1".into(),
                status: HttpStatus::Ok,
                win32_status: 0,
                bytes_sent: 100,
                time_taken_ms: 5,
                protocol_version: "HTTP/1.1".into(),
                host: "host".into(),
                user_agent: "agent".into(),
                cookie: "-".into(),
                referrer: "-".into(),
            }
        );
    }

    #[test]
    fn comments_and_short_lines_are_skipped() {
        let short = "2024-01-01 00:00:00 10.0.0.9 - - - 10.0.0.2 80 GET /a";
        let parsed = parse_lines(["#Fields: date time", LINE, short, ""], SEPARATOR).unwrap();
        assert_that!(parsed.records.len()).is_equal_to(1);
        assert_that!(parsed.lines).is_equal_to(4);
        assert_that!(parsed.comments).is_equal_to(1);
        assert_that!(parsed.dropped).is_equal_to(2);
    }

    #[test]
    fn nineteen_fields_are_dropped() {
        let short: Vec<&str> = LINE.split(SEPARATOR).take(FIELD_COUNT - 1).collect();
        let parsed = parse_lines([short.join(" ").as_str(), LINE], SEPARATOR).unwrap();
        assert_that!(parsed.dropped).is_equal_to(1);
        assert_that!(parsed.records.len()).is_equal_to(1);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let line = format!("{LINE} trailing extra");
        let parsed = parse_lines([line.as_str()], SEPARATOR).unwrap();
        assert_that!(parsed.records[0].referrer.as_str()).is_equal_to("-");
    }

    #[test]
    fn doubled_separator_yields_empty_field() {
        // The empty string lands in cs-username and shifts the rest right.
        let line = LINE.replacen("10.0.0.1 -", "10.0.0.1  -", 1);
        let parsed = parse_lines([line.as_str()], SEPARATOR).unwrap();
        assert_that!(parsed.records[0].username.as_str()).is_equal_to("");
        assert_that!(parsed.records[0].referrer.as_str()).is_equal_to("-");
    }

    #[test]
    fn bad_timestamp_defaults() {
        let line = with_field(Field::Date, "yesterday");
        let parsed = parse_lines([line.as_str()], SEPARATOR).unwrap();
        assert_that!(parsed.records[0].timestamp).is_none();
    }

    #[test]
    fn alternate_timestamp_formats() {
        let line = with_field(Field::Date, "01/31/2024");
        let parsed = parse_lines([line.as_str()], SEPARATOR).unwrap();
        assert_eq!(
            parsed.records[0].timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 31).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn bad_number_fails_whole_parse() {
        let bad = with_field(Field::BytesSent, "-");
        let err = parse_lines([LINE, bad.as_str()], SEPARATOR).unwrap_err();
        match err {
            ParseError::InvalidNumber { line, field, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, Field::BytesSent);
                assert_eq!(value, "-");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn negative_unsigned_is_rejected() {
        let bad = with_field(Field::TimeTaken, "-5");
        assert_that!(parse_lines([bad.as_str()], SEPARATOR)).is_err();
    }

    #[test]
    fn signed_fields_accept_negative_values() {
        let line = with_field(Field::Win32Status, "-1");
        let parsed = parse_lines([line.as_str()], SEPARATOR).unwrap();
        assert_that!(parsed.records[0].win32_status).is_equal_to(-1);
    }

    #[test]
    fn unknown_status_fails_whole_parse() {
        let bad = with_field(Field::Status, "299");
        let err = parse_lines([bad.as_str()], SEPARATOR).unwrap_err();
        assert!(matches!(err, ParseError::UnknownStatus { line: 1, .. }));
    }

    #[test]
    fn short_line_with_bad_number_is_still_dropped() {
        let short = "2024-01-01 00:00:00 10.0.0.1 - - - 10.0.0.2 eighty";
        let parsed = parse_lines([short], SEPARATOR).unwrap();
        assert_that!(parsed.records).is_empty();
    }
}
