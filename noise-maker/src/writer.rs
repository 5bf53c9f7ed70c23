use std::{
    fs::{self, File},
    io::{BufWriter, Write},
};

use anyhow::Context;
use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::args::CliArgs;
use crate::generator::{client_pool, directive_header, generate_truncated_log, generate_w3c_log};

pub fn write_log(args: &CliArgs) -> anyhow::Result<()> {
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let clients = client_pool(&mut rng, *args.clients());

    let path = args.output();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let now = Utc::now();
    out.write_all(directive_header(now).as_bytes())?;
    let every = *args.malformed_every();
    for n in 1..=*args.lines() {
        let line = if every > 0 && n % every == 0 {
            generate_truncated_log(&mut rng, &clients, now)
        } else {
            generate_w3c_log(&mut rng, &clients, now)
        };
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    info!(path = %path.display(), lines = args.lines(), clients = clients.len(), "log written");
    Ok(())
}
