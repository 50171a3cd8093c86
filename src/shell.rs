//! Line-oriented interactive menu over a [`CarPark`].
//!
//! The shell only translates input lines into calls on the operations engine
//! and renders the results. It is generic over its input and output so tests
//! can drive it with in-memory buffers.

use crate::audit::AuditSink;
use crate::error::{FleetError, InputError};
use crate::fleet::{Drivable, KIND_MENU, Maintainable, kind_for_menu_choice};
use crate::operations::{CarPark, OperationReport, Outcome};
use anyhow::Result;
use std::io::{BufRead, Write};

const MENU: &str = "\
Welcome to the Car Park!
Type q (or esc, exit) to exit.
Press 1 to list all vehicles.
Press 2 to drive a vehicle.
Press 3 to repair a vehicle.
Press 4 to add a vehicle.
Press 5 to charge all electric vehicles.
Press 6 to refuel all non-electric vehicles.
Press 7 to drive all vehicles.
Press 8 to repair all vehicles.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    List,
    DriveOne,
    RepairOne,
    Add,
    ChargeAll,
    RefuelAll,
    DriveAll,
    RepairAll,
    Exit,
    Invalid,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "1" => Command::List,
            "2" => Command::DriveOne,
            "3" => Command::RepairOne,
            "4" => Command::Add,
            "5" => Command::ChargeAll,
            "6" => Command::RefuelAll,
            "7" => Command::DriveAll,
            "8" => Command::RepairAll,
            "q" | "esc" | "exit" | "quit" => Command::Exit,
            _ => Command::Invalid,
        }
    }
}

pub struct Shell<'a, R, W, S: AuditSink> {
    park: &'a mut CarPark<S>,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write, S: AuditSink> Shell<'a, R, W, S> {
    pub fn new(park: &'a mut CarPark<S>, input: R, output: W) -> Self {
        Self {
            park,
            input,
            output,
        }
    }

    /// Run until an exit command or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{MENU}")?;
        while let Some(line) = self.read_line()? {
            match Command::parse(&line) {
                Command::List => self.list()?,
                Command::DriveOne => self.drive_one()?,
                Command::RepairOne => self.repair_one()?,
                Command::Add => self.add()?,
                Command::ChargeAll => {
                    let mut lines = Vec::new();
                    let report = self.park.charge_all(|v| lines.push(v.charge()));
                    self.render_report(&report, lines)?;
                }
                Command::RefuelAll => {
                    let mut lines = Vec::new();
                    let report = self.park.refuel_all(|v| lines.push(v.refuel()));
                    self.render_report(&report, lines)?;
                }
                Command::DriveAll => {
                    let mut lines = Vec::new();
                    let report = self.park.drive_all(|v| lines.push(v.drive()));
                    self.render_report(&report, lines)?;
                }
                Command::RepairAll => {
                    let mut lines = Vec::new();
                    let report = self.park.repair_all(|v| {
                        lines.push(v.repair());
                        Ok(())
                    });
                    self.render_report(&report, lines)?;
                }
                Command::Exit => {
                    writeln!(self.output, "Exiting the program...")?;
                    break;
                }
                Command::Invalid => {
                    writeln!(self.output, "Invalid option. Please choose a valid option.")?
                }
            }
            self.output.flush()?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, message: &str) -> Result<String> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn list(&mut self) -> Result<()> {
        for row in self.park.list_vehicles() {
            writeln!(self.output, "{row}")?;
        }
        Ok(())
    }

    fn prompt_index(&mut self, verb: &str) -> Result<Option<i64>> {
        self.list()?;
        let input = self.prompt(&format!("Enter the index of the vehicle to {verb}:"))?;
        match parse_index(&input) {
            Ok(index) => Ok(Some(index)),
            Err(err) => {
                log::debug!("{err}");
                writeln!(self.output, "Invalid index. Please enter a valid number.")?;
                Ok(None)
            }
        }
    }

    fn drive_one(&mut self) -> Result<()> {
        let Some(index) = self.prompt_index("drive")? else {
            return Ok(());
        };
        let mut description = None;
        let result = self
            .park
            .drive_at(index, |v: &dyn Drivable| description = Some(v.drive()));
        self.render_single(result, description, "driven")
    }

    fn repair_one(&mut self) -> Result<()> {
        let Some(index) = self.prompt_index("repair")? else {
            return Ok(());
        };
        let mut description = None;
        let result = self.park.repair_at(index, |v: &dyn Maintainable| {
            description = Some(v.repair());
            Ok(())
        });
        self.render_single(result, description, "repaired")
    }

    fn render_single(
        &mut self,
        result: Result<Outcome, FleetError>,
        description: Option<String>,
        participle: &str,
    ) -> Result<()> {
        match result {
            Ok(Outcome::Performed { .. }) => {
                if let Some(line) = description {
                    writeln!(self.output, "{line}")?;
                }
            }
            Ok(Outcome::Unsupported { .. }) => {
                writeln!(self.output, "The selected vehicle cannot be {participle}.")?
            }
            Ok(failed @ Outcome::Failed { .. }) => {
                if let Some(notice) = failed.notice() {
                    writeln!(self.output, "{notice}")?;
                }
            }
            Err(err) => writeln!(self.output, "Error: {err}. Please provide a valid index.")?,
        }
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        writeln!(self.output, "Choose the type of vehicle to add:")?;
        for (key, kind) in KIND_MENU {
            writeln!(self.output, "{key}. {kind}")?;
        }
        let choice = self.prompt("")?;
        let Some(kind) = kind_for_menu_choice(&choice) else {
            writeln!(
                self.output,
                "Invalid vehicle type. Please choose a valid option."
            )?;
            return Ok(());
        };

        let model = self.prompt("Enter the model of the vehicle:")?;
        let year_input = self.prompt("Enter the year of the vehicle:")?;
        let year = match parse_year(&year_input) {
            Ok(year) => year,
            Err(err) => {
                log::debug!("{err}");
                writeln!(self.output, "Invalid year. Please enter a valid number.")?;
                return Ok(());
            }
        };

        self.park.add_vehicle(kind.build(model.trim(), year));
        writeln!(self.output, "The {kind} has been added to the car park.")?;
        Ok(())
    }

    /// Print action descriptions and notices interleaved in registry order.
    fn render_report(&mut self, report: &OperationReport, descriptions: Vec<String>) -> Result<()> {
        let mut descriptions = descriptions.into_iter();
        for outcome in &report.outcomes {
            let line = match outcome {
                Outcome::Performed { .. } => descriptions.next(),
                other => other.notice(),
            };
            if let Some(line) = line {
                writeln!(self.output, "{line}")?;
            }
        }
        Ok(())
    }
}

fn parse_index(input: &str) -> Result<i64, InputError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|error| InputError::InvalidIndex {
            input: input.trim().to_string(),
            error,
        })
}

fn parse_year(input: &str) -> Result<i32, InputError> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|error| InputError::InvalidYear {
            input: input.trim().to_string(),
            error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditSink;
    use crate::fleet::VehicleKindId;
    use std::io::Cursor;

    fn run_script(park: &mut CarPark<MemoryAuditSink>, script: &str) -> String {
        let mut output = Vec::new();
        Shell::new(park, Cursor::new(script.to_string()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn command_parsing_accepts_exit_aliases() {
        assert_eq!(Command::parse(" 1 "), Command::List);
        assert_eq!(Command::parse("ESC"), Command::Exit);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("9"), Command::Invalid);
    }

    #[test]
    fn invalid_index_aborts_only_that_request() {
        let mut park = CarPark::new(MemoryAuditSink::new());
        park.add_vehicle(VehicleKindId::Car.build("Sedan", 2020));
        let output = run_script(&mut park, "2\nabc\n1\nq\n");
        assert!(output.contains("Invalid index. Please enter a valid number."));
        assert!(output.contains("0: Sedan (2020) - Car"));
        assert!(output.ends_with("Exiting the program...\n"));
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut park = CarPark::new(MemoryAuditSink::new());
        let output = run_script(&mut park, "3\n4\n");
        assert!(output.contains(
            "Error: index 4 is out of range for a fleet of 0 vehicle(s). Please provide a valid index."
        ));
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut park = CarPark::new(MemoryAuditSink::new());
        let output = run_script(&mut park, "x\n");
        assert!(output.contains("Invalid option. Please choose a valid option."));
    }

    #[test]
    fn add_rejects_bad_year_without_adding() {
        let mut park = CarPark::new(MemoryAuditSink::new());
        let output = run_script(&mut park, "4\n3\nLeaf\nnext year\n");
        assert!(output.contains("Invalid year. Please enter a valid number."));
        assert!(park.registry().is_empty());
    }

    #[test]
    fn report_interleaves_descriptions_and_notices() {
        let mut park = CarPark::new(MemoryAuditSink::new());
        park.add_vehicle(VehicleKindId::CargoElectricVan.build("Van", 2023));
        park.add_vehicle(VehicleKindId::Car.build("Sedan", 2020));
        let output = run_script(&mut park, "7\n");
        let van = output.find("The Van cannot be driven.").unwrap();
        let sedan = output.find("The Sedan car is driving.").unwrap();
        assert!(van < sedan);
    }
}
