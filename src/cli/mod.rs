use std::error::Error;

#[cfg(test)]
use std::ffi::OsString;

mod error;
pub(crate) use error::CliError;

mod find_repo;
mod init;

mod registry;
pub(crate) use registry::Registry;

#[cfg(test)]
mod temp_cwd;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

// Parse `args` (without the program name) against the standard registry
// and run the selected command.
#[cfg(test)]
pub(crate) fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
    args.insert(0, OsString::from("litt"));

    let registry = Registry::standard();
    let matches = registry.clap_app().get_matches_from_safe(args)?;

    registry.dispatch(&matches)
}
