//! Scenario parameters for the product-mix optimiser.
//!
//! A scenario is the fixed two-product, three-plant template: a unit profit for doors
//! and for windows, and for each plant the hours one door and one window take there
//! plus the hours the plant has available. Values come from three layers, each
//! overriding the previous one:
//!
//! 1. Built-in defaults (the textbook Wyndor Glass Co. example)
//! 2. A TOML scenario file passed with `--config`
//! 3. Individual command-line flags such as `--plant1-capacity`
//!
//! # Scenario File Format
//!
//! Every key is optional, missing keys keep the value of the layer below:
//!
//! ```toml
//! doors_profit = 300
//! windows_profit = 500
//!
//! [plant1]
//! label = "Plant 1 (Aluminum/Hardware)"
//! doors_time = 1
//! windows_time = 0
//! capacity = 4
//!
//! [plant3]
//! capacity = 18
//! ```
//!
//! Loading never checks the numbers. [`ProductMix::validate`] does, and the command
//! line runs it before solving unless told not to.

use std::{fmt, fs, path::Path, path::PathBuf};

use anyhow::Result;
use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Number of plants, and so of capacity constraints, in every scenario.
pub const PLANT_COUNT: usize = 3;

/// One plant: a capacity constraint `doors_time * x₁ + windows_time * x₂ <= capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    /// Name used in reports
    pub label: String,
    /// Hours of plant time one door takes
    pub doors_time: f64,
    /// Hours of plant time one window takes
    pub windows_time: f64,
    /// Hours of plant time available per week
    pub capacity: f64,
}

impl Plant {
    pub fn new(label: impl Into<String>, doors_time: f64, windows_time: f64, capacity: f64) -> Self {
        Self {
            label: label.into(),
            doors_time,
            windows_time,
            capacity,
        }
    }

    /// Hours this plant spends producing the given quantities
    pub fn time_used(&self, doors: f64, windows: f64) -> f64 {
        self.doors_time * doors + self.windows_time * windows
    }
}

/// The complete input of one optimisation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductMix {
    /// Profit per door (x₁)
    pub doors_profit: f64,
    /// Profit per window (x₂)
    pub windows_profit: f64,
    /// Plants in reporting order
    pub plants: [Plant; PLANT_COUNT],
}

impl Default for ProductMix {
    fn default() -> Self {
        Self {
            doors_profit: 300.0,
            windows_profit: 500.0,
            plants: [
                Plant::new("Plant 1", 1.0, 0.0, 4.0),
                Plant::new("Plant 2", 0.0, 2.0, 12.0),
                Plant::new("Plant 3", 3.0, 2.0, 18.0),
            ],
        }
    }
}

/// A parameter outside its domain.
///
/// Fields are named as on the command line without dashes, e.g. `plant2_capacity`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: String, value: f64 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: String, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },
}

/// Failure to load a scenario file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file {}: {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse scenario file {}: {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),
}

#[derive(Clone, Copy)]
enum Domain {
    Positive,
    NonNegative,
}

fn check(field: impl fmt::Display, value: f64, domain: Domain) -> Result<(), InvalidInput> {
    let field = field.to_string();
    if !value.is_finite() {
        return Err(InvalidInput::NotFinite { field, value });
    }
    match domain {
        Domain::Positive if value <= 0.0 => Err(InvalidInput::NotPositive { field, value }),
        Domain::NonNegative if value < 0.0 => Err(InvalidInput::Negative { field, value }),
        _ => Ok(()),
    }
}

impl ProductMix {
    /// Check every parameter against its domain: profits and capacities strictly
    /// positive, usage rates non-negative, all finite. Reports the first violation.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        self.validate_fields(None)
    }

    /// [`validate`](Self::validate) without the capacity of the plant at
    /// `plant_index`, for sweeps that replace it.
    pub fn validate_except_capacity(&self, plant_index: usize) -> Result<(), InvalidInput> {
        self.validate_fields(Some(plant_index))
    }

    fn validate_fields(&self, free_capacity: Option<usize>) -> Result<(), InvalidInput> {
        check("doors_profit", self.doors_profit, Domain::Positive)?;
        check("windows_profit", self.windows_profit, Domain::Positive)?;
        for (i, plant) in self.plants.iter().enumerate() {
            let n = i + 1;
            check(format_args!("plant{n}_doors_time"), plant.doors_time, Domain::NonNegative)?;
            check(format_args!("plant{n}_windows_time"), plant.windows_time, Domain::NonNegative)?;
            if free_capacity != Some(i) {
                check(format_args!("plant{n}_capacity"), plant.capacity, Domain::Positive)?;
            }
        }
        Ok(())
    }

    /// Overlay the values present in a parsed scenario file
    pub fn apply_file(&mut self, file: &ScenarioFile) {
        set(&mut self.doors_profit, file.doors_profit);
        set(&mut self.windows_profit, file.windows_profit);
        for (plant, section) in self.plants.iter_mut().zip(file.plant_sections()) {
            if let Some(section) = section {
                if let Some(label) = &section.label {
                    plant.label = label.clone();
                }
                set(&mut plant.doors_time, section.doors_time);
                set(&mut plant.windows_time, section.windows_time);
                set(&mut plant.capacity, section.capacity);
            }
        }
    }

    /// Read a TOML scenario file and overlay it on these values
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let file: ScenarioFile =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        self.apply_file(&file);
        info!(path = %path.display(), "Loaded scenario file");
        Ok(())
    }

    /// The effective configuration in scenario-file form
    pub fn to_file(&self) -> ScenarioFile {
        let [plant1, plant2, plant3] = self.plants.each_ref().map(|plant| {
            Some(PlantSection {
                label: Some(plant.label.clone()),
                doors_time: Some(plant.doors_time),
                windows_time: Some(plant.windows_time),
                capacity: Some(plant.capacity),
            })
        });
        ScenarioFile {
            doors_profit: Some(self.doors_profit),
            windows_profit: Some(self.windows_profit),
            plant1,
            plant2,
            plant3,
        }
    }

    /// Serialise the effective configuration as a complete TOML scenario file
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(&self.to_file())?)
    }
}

fn set(target: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// On-disk scenario layout, every key optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    pub doors_profit: Option<f64>,
    pub windows_profit: Option<f64>,
    pub plant1: Option<PlantSection>,
    pub plant2: Option<PlantSection>,
    pub plant3: Option<PlantSection>,
}

impl ScenarioFile {
    fn plant_sections(&self) -> [Option<&PlantSection>; PLANT_COUNT] {
        [
            self.plant1.as_ref(),
            self.plant2.as_ref(),
            self.plant3.as_ref(),
        ]
    }
}

/// `[plantN]` table of a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantSection {
    pub label: Option<String>,
    pub doors_time: Option<f64>,
    pub windows_time: Option<f64>,
    pub capacity: Option<f64>,
}

/// Command-line arguments shared by every command that needs a scenario.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// TOML scenario file, individual flags override its values
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Profit per door (x₁)
    #[clap(long, allow_negative_numbers = true)]
    pub doors_profit: Option<f64>,

    /// Profit per window (x₂)
    #[clap(long, allow_negative_numbers = true)]
    pub windows_profit: Option<f64>,

    /// Hours one door takes in plant 1
    #[clap(long, allow_negative_numbers = true)]
    pub plant1_doors_time: Option<f64>,

    /// Hours one window takes in plant 1
    #[clap(long, allow_negative_numbers = true)]
    pub plant1_windows_time: Option<f64>,

    /// Hours available in plant 1
    #[clap(long, allow_negative_numbers = true)]
    pub plant1_capacity: Option<f64>,

    /// Hours one door takes in plant 2
    #[clap(long, allow_negative_numbers = true)]
    pub plant2_doors_time: Option<f64>,

    /// Hours one window takes in plant 2
    #[clap(long, allow_negative_numbers = true)]
    pub plant2_windows_time: Option<f64>,

    /// Hours available in plant 2
    #[clap(long, allow_negative_numbers = true)]
    pub plant2_capacity: Option<f64>,

    /// Hours one door takes in plant 3
    #[clap(long, allow_negative_numbers = true)]
    pub plant3_doors_time: Option<f64>,

    /// Hours one window takes in plant 3
    #[clap(long, allow_negative_numbers = true)]
    pub plant3_windows_time: Option<f64>,

    /// Hours available in plant 3
    #[clap(long, allow_negative_numbers = true)]
    pub plant3_capacity: Option<f64>,
}

impl ScenarioArgs {
    /// Command-line values as a scenario-file layer
    fn overrides(&self) -> ScenarioFile {
        let section = |doors_time, windows_time, capacity| {
            Some(PlantSection {
                label: None,
                doors_time,
                windows_time,
                capacity,
            })
        };
        ScenarioFile {
            doors_profit: self.doors_profit,
            windows_profit: self.windows_profit,
            plant1: section(
                self.plant1_doors_time,
                self.plant1_windows_time,
                self.plant1_capacity,
            ),
            plant2: section(
                self.plant2_doors_time,
                self.plant2_windows_time,
                self.plant2_capacity,
            ),
            plant3: section(
                self.plant3_doors_time,
                self.plant3_windows_time,
                self.plant3_capacity,
            ),
        }
    }

    /// Combine defaults, the scenario file and command-line overrides
    pub fn resolve(&self) -> Result<ProductMix> {
        let mut mix = ProductMix::default();
        if let Some(path) = &self.config {
            mix.load_file(path)?;
        }
        mix.apply_file(&self.overrides());
        debug!(?mix, "Resolved scenario");
        Ok(mix)
    }
}

/// Command-line arguments for the show-config command.
#[derive(Parser, Debug)]
pub struct ShowConfigArgs {
    #[clap(flatten)]
    pub scenario: ScenarioArgs,
}

/// Print the effective scenario as a TOML file that `--config` accepts.
pub fn show_config_main(args: ShowConfigArgs) -> Result<()> {
    let mix = args.scenario.resolve()?;
    print!("{}", mix.to_toml()?);
    Ok(())
}
