//! Scenario definition and builder.

use fieldmap_core::{Environment, Fields};
use fieldmap_processor::{ProcessorOptions, TagSet};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::ScenarioResult;
use crate::runner::Runner;

/// What a step does to the scenario's processor.
#[derive(Debug, Clone)]
pub enum StepAction {
    /// Compile further rule source into the processor.
    Compile { source: String, file: Option<String> },
    /// Transform left-hand fields into right-hand fields.
    Forward {
        input: Fields,
        tags: Option<TagSet>,
        locals: Option<Environment>,
    },
    /// Transform right-hand fields into left-hand fields.
    Reverse {
        input: Fields,
        tags: Option<TagSet>,
        locals: Option<Environment>,
    },
}

/// A step in a scenario with its assertion.
#[derive(Debug)]
pub struct Step {
    /// Step name (for reporting).
    pub name: String,
    pub action: StepAction,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// A complete test scenario.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Names visible to rules; the builtins unless replaced.
    env: Environment,
    options: ProcessorOptions,
    /// Rule sources compiled before the first step.
    rules: Vec<String>,
    /// Steps with assertions.
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            env: Environment::builtins(),
            options: ProcessorOptions::default(),
            rules: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Replace the environment rules resolve names in.
    pub fn env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn options(mut self, options: ProcessorOptions) -> Self {
        self.options = options;
        self
    }

    /// Add rule source compiled before any step runs.
    pub fn rules(mut self, source: impl Into<String>) -> Self {
        self.rules.push(source.into());
        self
    }

    /// Add a step that compiles more rules.
    pub fn compile<F>(self, name: impl Into<String>, source: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Compile {
            source: source.into(),
            file: None,
        };
        self.step(name, action, f)
    }

    /// Add a step that compiles more rules, attributed to `file`.
    pub fn compile_named<F>(
        self,
        name: impl Into<String>,
        source: impl Into<String>,
        file: impl Into<String>,
        f: F,
    ) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Compile {
            source: source.into(),
            file: Some(file.into()),
        };
        self.step(name, action, f)
    }

    /// Add a forward transformation step.
    pub fn forward<F>(self, name: impl Into<String>, input: Fields, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Forward {
            input,
            tags: None,
            locals: None,
        };
        self.step(name, action, f)
    }

    /// Add a forward transformation step with active tags.
    pub fn forward_tagged<F>(
        self,
        name: impl Into<String>,
        input: Fields,
        tags: impl Into<TagSet>,
        f: F,
    ) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Forward {
            input,
            tags: Some(tags.into()),
            locals: None,
        };
        self.step(name, action, f)
    }

    /// Add a forward transformation step with caller-local bindings.
    pub fn forward_with<F>(
        self,
        name: impl Into<String>,
        input: Fields,
        locals: Environment,
        f: F,
    ) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Forward {
            input,
            tags: None,
            locals: Some(locals),
        };
        self.step(name, action, f)
    }

    /// Add a reverse transformation step.
    pub fn reverse<F>(self, name: impl Into<String>, input: Fields, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Reverse {
            input,
            tags: None,
            locals: None,
        };
        self.step(name, action, f)
    }

    pub fn reverse_tagged<F>(
        self,
        name: impl Into<String>,
        input: Fields,
        tags: impl Into<TagSet>,
        f: F,
    ) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Reverse {
            input,
            tags: Some(tags.into()),
            locals: None,
        };
        self.step(name, action, f)
    }

    pub fn reverse_with<F>(
        self,
        name: impl Into<String>,
        input: Fields,
        locals: Environment,
        f: F,
    ) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let action = StepAction::Reverse {
            input,
            tags: None,
            locals: Some(locals),
        };
        self.step(name, action, f)
    }

    fn step<F>(mut self, name: impl Into<String>, action: StepAction, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            name: name.into(),
            action,
            assertion,
        });
        self
    }

    /// Run the scenario and return the result.
    pub fn run(&self) -> ScenarioResult<()> {
        Runner::new(self).run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn processor_options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Rule sources compiled before the first step.
    pub fn rule_sources(&self) -> &[String] {
        &self.rules
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_core::fields;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .rules("$left <=> $right")
            .forward("to_right", fields! { "left" => 1i64 }, |a| a.field("right", 1i64))
            .reverse_tagged("to_left", fields! { "right" => 1i64 }, ["t"], |a| {
                a.field("left", 1i64)
            })
            .compile("more", "$a => $b", |a| a.compiled(1));

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.rule_sources().len(), 1);
        assert_eq!(scenario.steps().len(), 3);
        assert!(matches!(
            scenario.steps()[1].action,
            StepAction::Reverse { tags: Some(_), .. }
        ));
    }
}
