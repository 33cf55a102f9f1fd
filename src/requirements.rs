use crate::{config::Config, ui::Ui};

/// A precondition gating command execution. Reports its own failure.
pub trait Requirement {
    fn execute(&self, ui: &mut dyn Ui) -> bool;
}

pub trait RequirementsFactory {
    fn new_login_requirement(&self) -> Box<dyn Requirement + '_>;
}

pub struct LoginRequirement<'a> {
    config: &'a Config,
}

impl Requirement for LoginRequirement<'_> {
    fn execute(&self, ui: &mut dyn Ui) -> bool {
        if !self.config.has_api_endpoint() {
            ui.failed("No API endpoint set. Use 'cf login' or 'cf api' to target an endpoint.");
            return false;
        }
        if !self.config.is_logged_in() {
            ui.failed("Not logged in. Use 'cf login' to log in.");
            return false;
        }
        true
    }
}

pub struct ConfigRequirementsFactory<'a> {
    config: &'a Config,
}

impl<'a> ConfigRequirementsFactory<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

impl RequirementsFactory for ConfigRequirementsFactory<'_> {
    fn new_login_requirement(&self) -> Box<dyn Requirement + '_> {
        Box::new(LoginRequirement {
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::BufferUi;

    fn logged_in() -> Config {
        Config {
            target: "https://api.example.com".into(),
            access_token: "bearer token".into(),
            ..Config::default()
        }
    }

    #[test]
    fn passes_with_endpoint_and_token() {
        let config = logged_in();
        let mut ui = BufferUi::new();

        let passed = ConfigRequirementsFactory::new(&config)
            .new_login_requirement()
            .execute(&mut ui);

        assert!(passed);
        assert!(ui.outputs.is_empty());
    }

    #[test]
    fn fails_without_endpoint() {
        let config = Config::default();
        let mut ui = BufferUi::new();

        let passed = ConfigRequirementsFactory::new(&config)
            .new_login_requirement()
            .execute(&mut ui);

        assert!(!passed);
        assert_eq!(ui.outputs[0], "FAILED");
        assert!(ui.outputs[1].starts_with("No API endpoint set."));
    }

    #[test]
    fn fails_without_token() {
        let config = Config {
            access_token: String::new(),
            ..logged_in()
        };
        let mut ui = BufferUi::new();

        let passed = ConfigRequirementsFactory::new(&config)
            .new_login_requirement()
            .execute(&mut ui);

        assert!(!passed);
        assert_eq!(
            ui.outputs,
            ["FAILED", "Not logged in. Use 'cf login' to log in."]
        );
    }
}
