use async_trait::async_trait;
use clap::Parser;
use tracing::info;

use crate::{
    commands::Command,
    config::Config,
    requirements::{Requirement, RequirementsFactory},
    stacks::StackLister,
    ui::{Table, Ui},
};

/// List all stacks (a stack is a pre-built file system, including an operating
/// system, that can run apps)
#[derive(Debug, Parser)]
#[command(name = "stacks")]
pub struct StacksArgs {}

pub struct ListStacksCommand<'a> {
    config: &'a Config,
    lister: &'a dyn StackLister,
}

impl<'a> ListStacksCommand<'a> {
    pub fn new(config: &'a Config, lister: &'a dyn StackLister) -> Self {
        Self { config, lister }
    }
}

#[async_trait]
impl Command for ListStacksCommand<'_> {
    type Args = StacksArgs;

    fn requirements<'f>(
        &self,
        factory: &'f dyn RequirementsFactory,
        _args: &StacksArgs,
    ) -> Vec<Box<dyn Requirement + 'f>> {
        vec![factory.new_login_requirement()]
    }

    async fn execute(&mut self, _args: StacksArgs, ui: &mut dyn Ui) -> bool {
        ui.say(&format!(
            "Getting stacks in org {} / space {} as {}...",
            self.config.organization_name(),
            self.config.space_name(),
            self.config.username()
        ));

        let stacks = match self.lister.find_all().await {
            Ok(stacks) => stacks,
            Err(e) => {
                ui.failed(&e.to_string());
                return false;
            }
        };
        info!("Found {} stacks", stacks.len());

        ui.ok();
        ui.say("");
        if stacks.is_empty() {
            ui.say("No stacks found");
            return true;
        }

        let mut table = Table::new(["name", "description"]);
        for stack in stacks {
            table.add([stack.name, stack.description]);
        }
        table.print(ui);
        true
    }
}
