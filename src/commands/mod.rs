pub mod stack;
pub mod stacks;

use std::ffi::OsString;

use async_trait::async_trait;
use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing::debug;

use crate::{
    requirements::{Requirement, RequirementsFactory},
    ui::Ui,
};

#[async_trait]
pub trait Command: Send {
    type Args: Parser + Send;

    fn requirements<'f>(
        &self,
        factory: &'f dyn RequirementsFactory,
        args: &Self::Args,
    ) -> Vec<Box<dyn Requirement + 'f>>;

    /// Returns whether the command succeeded.
    async fn execute(&mut self, args: Self::Args, ui: &mut dyn Ui) -> bool;
}

/// Checks requirements in order and executes the command only if all pass.
pub async fn run<C: Command>(
    cmd: &mut C,
    args: C::Args,
    factory: &dyn RequirementsFactory,
    ui: &mut dyn Ui,
) -> bool {
    for requirement in cmd.requirements(factory, &args) {
        if !requirement.execute(ui) {
            debug!("Requirement failed, command not executed");
            return false;
        }
    }
    cmd.execute(args, ui).await
}

/// Parses raw arguments (without the command name) and runs the command.
pub async fn run_with_argv<C, I, T>(
    cmd: &mut C,
    argv: I,
    factory: &dyn RequirementsFactory,
    ui: &mut dyn Ui,
) -> bool
where
    C: Command,
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let name = OsString::from(C::Args::command().get_name());
    let argv = std::iter::once(name).chain(argv.into_iter().map(Into::into));
    match C::Args::try_parse_from(argv) {
        Ok(args) => run(cmd, args, factory, ui).await,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            ui.say(e.render().to_string().trim_end());
            true
        }
        Err(e) => {
            ui.failed("Incorrect Usage.");
            ui.say(e.render().to_string().trim_end());
            false
        }
    }
}
