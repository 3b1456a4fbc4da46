//! Command sessions.
//!
//! A [`Session`] owns the options and the value registers that the panel
//! would otherwise keep as scene properties. Each call to [`Session::run`]
//! executes one command against a selection provider and a mutation sink.

use serde::Serialize;

use pdt_command::{commit, execute, Action, MathsTarget, MutationSink, Router};
use pdt_core::{PdtOptions, Result, SelectionProvider};

/// Values written by measurements, arc placements and maths commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Registers {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub distance: f64,
    pub angle: f64,
    pub percent: f64,
    pub output: f64,
}

impl Registers {
    fn set(&mut self, target: MathsTarget, value: f64) {
        let slot = match target {
            MathsTarget::X => &mut self.x,
            MathsTarget::Y => &mut self.y,
            MathsTarget::Z => &mut self.z,
            MathsTarget::Distance => &mut self.distance,
            MathsTarget::Angle => &mut self.angle,
            MathsTarget::Percent => &mut self.percent,
            MathsTarget::Output => &mut self.output,
        };
        *slot = value;
    }

    /// The x, y, z registers as a comma separated value list, ready to be
    /// appended to an operation and mode (`CA` + `1,2,3`).
    pub fn xyz_values(&self) -> String {
        format!("{},{},{}", self.x, self.y, self.z)
    }
}

/// Executes commands with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: PdtOptions,
    registers: Registers,
    last_error: Option<String>,
}

impl Session {
    pub fn new(options: PdtOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &PdtOptions {
        &self.options
    }

    /// Replaces the options used by subsequent commands.
    pub fn set_options(&mut self, options: PdtOptions) {
        self.options = options;
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Message of the most recent rejected command, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Runs one command. The sink is only called if the command succeeds.
    pub fn run(
        &mut self,
        command: &str,
        provider: &dyn SelectionProvider,
        sink: &mut dyn MutationSink,
    ) -> Result<Action> {
        let result = execute(command, &self.options, provider, sink);
        self.record(result)
    }

    /// Runs one command against a scene that is both provider and sink.
    pub fn run_on<S>(&mut self, command: &str, scene: &mut S) -> Result<Action>
    where
        S: SelectionProvider + MutationSink,
    {
        let planned = Router::new(&self.options, &*scene).plan(command);
        let result = commit(command, planned, scene);
        self.record(result)
    }

    fn record(&mut self, result: Result<Action>) -> Result<Action> {
        match &result {
            Ok(action) => {
                self.last_error = None;
                match action {
                    Action::Measure(m) => {
                        self.registers.distance = m.distance;
                        self.registers.angle = m.angle;
                    }
                    Action::Mutate {
                        radius: Some(radius),
                        ..
                    } => self.registers.distance = *radius,
                    Action::Maths { target, value } => self.registers.set(*target, *value),
                    _ => {}
                }
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }
}
