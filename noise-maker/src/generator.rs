use chrono::{DateTime, Utc};
use rand::{Rng, seq::IndexedRandom};

const METHODS: [(&str, u8); 4] = [("GET", 6), ("POST", 2), ("PUT", 1), ("DELETE", 1)];
const PATHS: [(&str, u8); 6] = [
    ("/", 10),
    ("/login", 10),
    ("/api", 50),
    ("/admin", 5),
    ("/splash", 20),
    ("/gallery", 10),
];
const STATUS: [(u16, u8); 7] = [
    (200, 50),
    (201, 10),
    (304, 15),
    (400, 10),
    (401, 20),
    (404, 50),
    (500, 5),
];
const AGENTS: [(&str, u8); 3] = [
    ("Mozilla/5.0+(Windows+NT+10.0;+Win64;+x64)", 10),
    ("Mozilla/5.0+(X11;+Linux+x86_64)", 5),
    ("curl/8.5.0", 2),
];
const PORTS: [(u16, u8); 2] = [(80, 3), (443, 7)];

pub const DIRECTIVE_FIELDS: &str = "date time c-ip cs-username s-sitename s-computername s-ip s-port \
cs-method cs-uri-stem cs-uri-query sc-status sc-win32-status sc-bytes time-taken cs-version cs-host \
cs(User-Agent) cs(Cookie) cs(Referer)";

/// Pool of `n` distinct client addresses spread over a few subnets.
pub fn client_pool<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<String> {
    let mut pool = Vec::with_capacity(n);
    while pool.len() < n {
        let ip = format!(
            "{}.{}.{}.{}",
            [10, 172, 192].choose(rng).copied().unwrap_or(10),
            rng.random_range(0..256),
            rng.random_range(0..256),
            rng.random_range(1..255)
        );
        if !pool.contains(&ip) {
            pool.push(ip);
        }
    }
    pool
}

pub fn directive_header(now: DateTime<Utc>) -> String {
    format!(
        "#Software: Microsoft Internet Information Services 10.0\n#Version: 1.0\n#Date: {}\n#Fields: {DIRECTIVE_FIELDS}\n",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn generate_w3c_log<R: Rng + ?Sized>(rng: &mut R, clients: &[String], now: DateTime<Utc>) -> String {
    let ip = clients.choose(rng).map(String::as_str).unwrap_or("127.0.0.1");
    let timestamp = now.format("%Y-%m-%d %H:%M:%S");
    let port = PORTS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let method = METHODS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let path = PATHS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let status = STATUS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let agent = AGENTS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let bytes = rng.random_range(100..20_000);
    let taken = rng.random_range(1..900);

    format!(
        "{timestamp} {ip} - W3SVC1 WEB01 10.0.0.2 {port} {method} {path} - {status} 0 {bytes} {taken} HTTP/1.1 example.com {agent} - -"
    )
}

/// A line cut off after the method, too short to be ingested.
pub fn generate_truncated_log<R: Rng + ?Sized>(rng: &mut R, clients: &[String], now: DateTime<Utc>) -> String {
    let full = generate_w3c_log(rng, clients, now);
    full.split(' ').take(9).collect::<Vec<_>>().join(" ")
}
