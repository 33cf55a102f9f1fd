use async_trait::async_trait;
use clap::Parser;
use tracing::{debug, info};

use crate::{
    commands::Command,
    config::Config,
    requirements::{Requirement, RequirementsFactory},
    stacks::StackFinder,
    ui::{Table, Ui},
};

/// Show information for a stack (a stack is a pre-built file system, including
/// an operating system, that can run apps)
#[derive(Debug, Parser)]
#[command(name = "stack")]
pub struct StackArgs {
    /// Name of the stack
    pub stack_name: String,
    /// Retrieve and display the given stack's guid. All other output for the stack is suppressed.
    #[arg(long)]
    pub guid: bool,
}

pub struct ListStackCommand<'a> {
    config: &'a Config,
    finder: &'a dyn StackFinder,
}

impl<'a> ListStackCommand<'a> {
    pub fn new(config: &'a Config, finder: &'a dyn StackFinder) -> Self {
        Self { config, finder }
    }
}

#[async_trait]
impl Command for ListStackCommand<'_> {
    type Args = StackArgs;

    fn requirements<'f>(
        &self,
        factory: &'f dyn RequirementsFactory,
        _args: &StackArgs,
    ) -> Vec<Box<dyn Requirement + 'f>> {
        vec![factory.new_login_requirement()]
    }

    async fn execute(&mut self, args: StackArgs, ui: &mut dyn Ui) -> bool {
        info!("Looking up stack {}", args.stack_name);
        if args.guid {
            // A missing stack prints an empty guid rather than an error.
            return match self.finder.find_by_name(&args.stack_name).await {
                Ok(stack) => {
                    ui.say(&stack.guid);
                    true
                }
                Err(e) => {
                    debug!("Stack lookup failed: {e}");
                    ui.say("");
                    false
                }
            };
        }

        ui.say(&format!(
            "Getting stack '{}' in org {} / space {} as {}...",
            args.stack_name,
            self.config.organization_name(),
            self.config.space_name(),
            self.config.username()
        ));
        match self.finder.find_by_name(&args.stack_name).await {
            Ok(stack) => {
                ui.ok();
                ui.say("");
                let mut table = Table::new(["name", "description"]);
                table.add([stack.name, stack.description]);
                table.print(ui);
                true
            }
            Err(e) => {
                ui.failed(&e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{
            run_with_argv,
            testing::{FakeReqFactory, FakeStackRepository},
        },
        stacks::Stack,
        ui::BufferUi,
    };

    fn stack_1() -> Stack {
        Stack {
            name: "Stack-1".into(),
            description: "Stack 1 Description".into(),
            guid: "Stack-1-GUID".into(),
        }
    }

    fn config() -> Config {
        let mut config = Config {
            target: "https://api.example.com".into(),
            access_token: "bearer token".into(),
            username: "my-user".into(),
            ..Config::default()
        };
        config.organization_fields.name = "my-org".into();
        config.space_fields.name = "my-space".into();
        config
    }

    async fn run_stack(
        repo: &FakeStackRepository,
        args: &[&str],
        login_success: bool,
    ) -> (bool, BufferUi) {
        let config = config();
        let mut ui = BufferUi::new();
        let mut cmd = ListStackCommand::new(&config, repo);
        let passed = run_with_argv(
            &mut cmd,
            args.iter().copied(),
            &FakeReqFactory { login_success },
            &mut ui,
        )
        .await;
        (passed, ui)
    }

    fn position(outputs: &[String], needle: &str) -> Option<usize> {
        outputs.iter().position(|line| line.contains(needle))
    }

    #[tokio::test]
    async fn fails_if_the_user_is_not_logged_in() {
        let repo = FakeStackRepository::with_stacks(vec![stack_1()]);

        let (passed, ui) = run_stack(&repo, &["Stack-1"], false).await;

        assert!(!passed);
        assert!(ui.outputs.is_empty());
        assert!(repo.find_by_name_calls().is_empty());
    }

    #[tokio::test]
    async fn fails_with_usage_when_stack_name_is_missing() {
        let repo = FakeStackRepository::with_stacks(vec![stack_1()]);

        let (passed, ui) = run_stack(&repo, &[], true).await;

        assert!(!passed);
        assert_eq!(ui.outputs[0], "FAILED");
        assert_eq!(ui.outputs[1], "Incorrect Usage.");
        assert!(repo.find_by_name_calls().is_empty());
    }

    #[tokio::test]
    async fn returns_the_stack_guid_when_guid_flag_is_provided() {
        let repo = FakeStackRepository::with_stacks(vec![stack_1()]);

        let (passed, ui) = run_stack(&repo, &["Stack-1", "--guid"], true).await;

        assert!(passed);
        assert_eq!(ui.outputs, ["Stack-1-GUID"]);
        assert_eq!(repo.find_by_name_calls(), ["Stack-1"]);
    }

    #[tokio::test]
    async fn returns_the_guid_of_the_requested_stack() {
        let stack = |name: &str| Stack {
            name: name.into(),
            description: format!("{name} description"),
            guid: format!("{name}-GUID"),
        };
        let repo = FakeStackRepository::with_stacks(vec![
            stack("cflinuxfs3"),
            stack("cflinuxfs4"),
            stack("windows"),
        ]);

        for name in ["windows", "cflinuxfs4", "cflinuxfs3"] {
            let (passed, ui) = run_stack(&repo, &[name, "--guid"], true).await;

            assert!(passed);
            assert_eq!(ui.outputs, [format!("{name}-GUID")]);
        }
        assert_eq!(
            repo.find_by_name_calls(),
            ["windows", "cflinuxfs4", "cflinuxfs3"]
        );
    }

    #[tokio::test]
    async fn prints_help_without_looking_up_a_stack() {
        let repo = FakeStackRepository::with_stacks(vec![stack_1()]);

        let (passed, ui) = run_stack(&repo, &["--help"], true).await;

        assert!(passed);
        assert!(ui.outputs.iter().any(|line| line.contains("--guid")));
        assert!(repo.find_by_name_calls().is_empty());
    }

    #[tokio::test]
    async fn returns_an_empty_guid_when_stack_does_not_exist() {
        let repo = FakeStackRepository::default();

        let (passed, ui) = run_stack(&repo, &["Stack-1", "--guid"], true).await;

        assert!(!passed);
        assert_eq!(ui.outputs, [""]);
    }

    #[tokio::test]
    async fn returns_an_empty_guid_for_any_lookup_error() {
        let repo = FakeStackRepository::failing("Internal Server Error");

        let (_, ui) = run_stack(&repo, &["--guid", "Stack-1"], true).await;

        assert_eq!(ui.outputs, [""]);
    }

    #[tokio::test]
    async fn informs_user_if_stack_is_not_found() {
        let repo = FakeStackRepository::default();

        let (passed, ui) = run_stack(&repo, &["Stack-1"], true).await;

        assert!(!passed);
        let failed = position(&ui.outputs, "FAILED").unwrap();
        let message = position(&ui.outputs, "Stack Stack-1 not found").unwrap();
        assert!(failed < message, "outputs: {:?}", ui.outputs);
    }

    #[tokio::test]
    async fn lists_the_stack_requested() {
        let repo = FakeStackRepository::with_stacks(vec![stack_1()]);

        let (passed, ui) = run_stack(&repo, &["Stack-1"], true).await;

        assert!(passed);
        assert_eq!(
            ui.outputs,
            [
                "Getting stack 'Stack-1' in org my-org / space my-space as my-user...",
                "OK",
                "",
                "name      description",
                "Stack-1   Stack 1 Description",
            ]
        );
    }
}
