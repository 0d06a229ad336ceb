use clap::{crate_version, AppSettings, Arg, ArgMatches, SubCommand};
use tracing::debug;

use super::{find_repo, init, CliError, Result};

type Args = fn(clap::App<'static, 'static>) -> clap::App<'static, 'static>;
type Run = fn(&ArgMatches) -> Result<()>;

/// One entry in the command table.
///
/// A command without a `run` function is known by name only: it still finds
/// the enclosing repository (so it fails the same way a real command would
/// outside of one) and then reports that it isn't implemented.
pub(crate) struct Command {
    name: &'static str,
    about: &'static str,
    args: Args,
    run: Option<Run>,
}

impl Command {
    fn new(name: &'static str, about: &'static str, args: Args, run: Run) -> Command {
        Command {
            name,
            about,
            args,
            run: Some(run),
        }
    }

    fn unimplemented(name: &'static str, about: &'static str) -> Command {
        Command {
            name,
            about,
            args: passthrough_args,
            run: None,
        }
    }

    fn subcommand(&self) -> clap::App<'static, 'static> {
        (self.args)(SubCommand::with_name(self.name).about(self.about))
    }
}

/// The table of commands known to `litt`. Built once in `main` and passed
/// to whatever needs it.
pub(crate) struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    pub fn standard() -> Registry {
        Registry {
            commands: vec![
                Command::unimplemented("add", "Add file contents to the index"),
                Command::unimplemented("cat-file", "Provide content of repository objects"),
                Command::unimplemented("checkout", "Switch branches or restore working tree files"),
                Command::unimplemented("commit", "Record changes to the repository"),
                Command::unimplemented("hash-object", "Compute object ID and optionally create a blob"),
                Command::new("init", "Initialize a new, empty repository", init::args, init::run),
                Command::unimplemented("log", "Show commit logs"),
                Command::unimplemented("ls-tree", "List the contents of a tree object"),
                Command::unimplemented("merge", "Join two or more development histories together"),
                Command::unimplemented("rebase", "Reapply commits on top of another base tip"),
                Command::unimplemented("rev-parse", "Pick out and massage parameters"),
                Command::unimplemented("rm", "Remove files from the working tree and from the index"),
                Command::unimplemented("show-ref", "List references in a local repository"),
                Command::unimplemented("tag", "Create, list, delete or verify a tag object"),
            ],
        }
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }

    pub fn clap_app(&self) -> clap::App<'static, 'static> {
        let app = clap::App::new("litt")
            .version(crate_version!())
            .about("The humble version control")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .setting(AppSettings::VersionlessSubcommands);

        self.commands
            .iter()
            .fold(app, |app, command| app.subcommand(command.subcommand()))
    }

    pub fn dispatch(&self, matches: &ArgMatches) -> Result<()> {
        let (name, sub_matches) = matches.subcommand();

        let command = self
            .commands
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        let sub_matches = sub_matches.ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        match command.run {
            Some(run) => {
                debug!(command = name, "running");
                run(sub_matches)
            }
            None => {
                let repo = find_repo::from_current_dir()?;
                debug!(command = name, git_dir = %repo.git_dir().display(), "no implementation");
                Err(CliError::NotImplemented(name.to_string()).into())
            }
        }
    }
}

fn passthrough_args(app: clap::App<'static, 'static>) -> clap::App<'static, 'static> {
    app.setting(AppSettings::TrailingVarArg)
        .setting(AppSettings::AllowLeadingHyphen)
        .arg(Arg::with_name("args").multiple(true))
}
