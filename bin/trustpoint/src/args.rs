//! CLI argument parsing.

use std::path::PathBuf;

use argh::FromArgs;

#[derive(Clone, Debug, FromArgs)]
#[argh(description = "Trustpoint checkpoint gateway")]
pub(crate) struct Args {
    // Config non-overriding args
    #[argh(option, short = 'c', description = "path to configuration")]
    pub config: Option<PathBuf>,

    // Config overriding args
    /// Listen host that will override the host in the config toml.
    #[argh(option, description = "listen host")]
    pub host: Option<String>,

    /// Listen port that will override the port in the config toml.
    #[argh(option, description = "listen port")]
    pub port: Option<u16>,
}
