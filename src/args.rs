use crate::error::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// Archive a Slack workspace to local JSON documents and raw files
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Directory the archive is written into. Reused across runs so
    /// already-downloaded files are skipped.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output {
            Some(dir) => Ok(dir.clone()),
            None => dirs::download_dir()
                .map(|dir| dir.join("slack-archive"))
                .ok_or(Error::NoOutputDir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_output_dir_wins() {
        let args = Args {
            output: Some(PathBuf::from("/tmp/archive")),
        };

        assert_eq!(args.output_dir().unwrap(), PathBuf::from("/tmp/archive"));
    }
}
