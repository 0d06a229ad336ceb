use std::path::Path;

use clap::{Arg, ArgMatches};
use litt::repo::OnDisk;

use super::Result;

pub(crate) fn args(app: clap::App<'static, 'static>) -> clap::App<'static, 'static> {
    app.arg(
        Arg::with_name("directory")
            .default_value(".")
            .help("Where to create the repository"),
    )
}

pub(crate) fn run(args: &ArgMatches) -> Result<()> {
    let dir = args.value_of("directory").unwrap_or(".");
    OnDisk::init(Path::new(dir))?;
    Ok(())
}
