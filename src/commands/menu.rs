use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::commands::output::{
    write_adjustments, write_efficiency, write_monitoring, write_summary,
};
use crate::error::{PipelineError, PipelineResult, parse_number};
use crate::model::{EnvironmentConditions, InputRecord, PipelineState, SystemStatus};
use crate::pipeline::Pipeline;

const MENU: &str = "\
1. Input Data
2. Monitor Metrics
3. View Efficiency
4. Get Recommendations
5. Generate Summary
6. Reset
7. Exit";

pub fn run(pipeline: &Pipeline) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(pipeline, stdin.lock(), stdout.lock()).run()
}

/// Interactive front end. Every pipeline failure is reported to the operator
/// and control returns to the menu; only I/O on the terminal itself can end
/// the loop with an error.
pub struct Menu<'a, R, W> {
    pipeline: &'a Pipeline,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(pipeline: &'a Pipeline, input: R, output: W) -> Self {
        Self {
            pipeline,
            input,
            output,
        }
    }

    /// Read from the run-state manifest, never cached.
    pub fn state(&self) -> PipelineResult<PipelineState> {
        self.pipeline.state()
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the W.E.T. System!")?;

        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.input_data()?,
                "2" => self.monitor_metrics()?,
                "3" => self.view_efficiency()?,
                "4" => self.recommendations()?,
                "5" => self.summary()?,
                "6" => self.reset()?,
                "7" => break,
                other => writeln!(self.output, "Invalid option '{other}'. Choose 1-7.")?,
            }
            match self.state() {
                Ok(state) => debug!(state = state.as_str(), "menu state"),
                Err(err) => warn!(error = %err, "could not read run state"),
            }
        }

        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        Ok(())
    }

    fn input_data(&mut self) -> Result<()> {
        let Some(record) = self.read_input_record()? else {
            return Ok(());
        };

        match self.pipeline.record_input(&record) {
            Ok(()) => {
                writeln!(self.output, "Input recorded.")?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn monitor_metrics(&mut self) -> Result<()> {
        let result = self
            .pipeline
            .run_efficiency()
            .and_then(|_| self.pipeline.run_monitoring());

        match result {
            Ok(report) => {
                write_monitoring(&mut self.output, &report)?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn view_efficiency(&mut self) -> Result<()> {
        match self.pipeline.efficiency() {
            Ok(result) => write_efficiency(&mut self.output, &result)?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn recommendations(&mut self) -> Result<()> {
        match self.pipeline.run_adjustments() {
            Ok(list) => {
                write_adjustments(&mut self.output, &list)?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn summary(&mut self) -> Result<()> {
        match self.pipeline.run_summary() {
            Ok(summary) => {
                writeln!(self.output, "\n--- W.E.T. System Results ---")?;
                write_summary(&mut self.output, &summary)?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let answer = self.prompt("Type 'yes' to delete all pipeline documents: ")?;
        if !answer.is_some_and(|value| value.eq_ignore_ascii_case("yes")) {
            writeln!(self.output, "Reset cancelled.")?;
            return Ok(());
        }

        match self.pipeline.reset() {
            Ok(removed) => {
                writeln!(self.output, "Deleted {} document(s).", removed.len())?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    /// `None` when the operator aborted or typed something unusable; the
    /// reason has already been printed.
    fn read_input_record(&mut self) -> Result<Option<InputRecord>> {
        let config = self.pipeline.config().clone();

        let Some(raw_volume) = self.prompt("Enter waste volume (liters): ")? else {
            return Ok(None);
        };
        let waste_volume = match parse_number("waste_volume", &raw_volume) {
            Ok(value) => value,
            Err(err) => {
                self.report(&err)?;
                return Ok(None);
            }
        };

        let temperature = match self.prompt_number_or(
            "temperature",
            &format!("Enter temperature in °C [{}]: ", config.default_temperature),
            config.default_temperature,
        )? {
            Some(value) => value,
            None => return Ok(None),
        };
        let gravity = match self.prompt_number_or(
            "gravity",
            &format!("Enter gravity [{}]: ", config.default_gravity),
            config.default_gravity,
        )? {
            Some(value) => value,
            None => return Ok(None),
        };
        let energy_level = match self.prompt_number_or(
            "energy_level",
            &format!("Enter energy level % [{}]: ", config.default_energy_level),
            config.default_energy_level,
        )? {
            Some(value) => value,
            None => return Ok(None),
        };
        let filter_status = self
            .prompt(&format!(
                "Enter filter status [{}]: ",
                config.default_filter_status
            ))?
            .filter(|value| !value.is_empty())
            .unwrap_or(config.default_filter_status);

        Ok(Some(InputRecord {
            waste_volume,
            environment: EnvironmentConditions {
                temperature,
                gravity,
            },
            system_status: SystemStatus {
                filter_status,
                energy_level,
            },
        }))
    }

    fn prompt_number_or(
        &mut self,
        field: &'static str,
        label: &str,
        default: f64,
    ) -> Result<Option<f64>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(Some(default));
        }

        match parse_number(field, &raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.report(&err)?;
                Ok(None)
            }
        }
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &PipelineError) -> Result<()> {
        if err.is_missing_input() {
            info!(error = %err, "prerequisite step has not run");
        } else {
            warn!(error = %err, "menu action failed");
        }
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }
}
