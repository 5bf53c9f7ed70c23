use std::{
    env,
    path::{Path, PathBuf},
};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Rank client addresses of a W3C access log by request count", long_about = None)]
pub struct Args {
    /// Directory relative paths resolve against [default: the executable's directory]
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// W3C access log to ingest
    #[arg(long, default_value = "RawLogsInput/access.log")]
    input: PathBuf,

    /// Where the CSV report is written
    #[arg(long, default_value = "IngestedLogResults/report.csv")]
    output: PathBuf,
}

impl Args {
    pub fn input_path(&self) -> std::io::Result<PathBuf> {
        self.resolve(&self.input)
    }

    pub fn output_path(&self) -> std::io::Result<PathBuf> {
        self.resolve(&self.output)
    }

    fn resolve(&self, path: &Path) -> std::io::Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };
        Ok(base.join(path))
    }
}

fn executable_dir() -> std::io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}
