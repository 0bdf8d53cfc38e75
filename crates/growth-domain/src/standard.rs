//! Keys of the reference dataset: sex and measurement type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex used to select a reference standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Boys' standard
    Male,
    /// Girls' standard
    Female,
}

impl Sex {
    /// Both sexes in dataset order
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Get the sex as its dataset code
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Parse a sex from user input or a dataset code
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "boy" => Some(Sex::Male),
            "female" | "f" | "girl" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Chart group name: "Boys" or "Girls"
    pub fn group_name(&self) -> &'static str {
        match self {
            Sex::Male => "Boys",
            Sex::Female => "Girls",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sex: {}", s))
    }
}

/// Anthropometric measurement with a published growth standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    /// Length (under 2 years) or standing height, in cm
    Height,
    /// Body weight, in kg
    Weight,
    /// Body mass index, in kg/m²
    Bmi,
    /// Occipitofrontal head circumference, in cm
    HeadCircumference,
}

impl MeasurementType {
    /// All measurement types in chart order
    pub const ALL: [MeasurementType; 4] = [
        MeasurementType::Height,
        MeasurementType::Weight,
        MeasurementType::Bmi,
        MeasurementType::HeadCircumference,
    ];

    /// Get the measurement type as its dataset code
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Height => "height",
            MeasurementType::Weight => "weight",
            MeasurementType::Bmi => "bmi",
            MeasurementType::HeadCircumference => "head_circumference",
        }
    }

    /// Parse a measurement type from user input or a dataset code
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "height" | "length" => Some(MeasurementType::Height),
            "weight" => Some(MeasurementType::Weight),
            "bmi" => Some(MeasurementType::Bmi),
            "head_circumference" | "head" | "hc" => Some(MeasurementType::HeadCircumference),
            _ => None,
        }
    }

    /// Chart title, e.g. "Weight-for-age"
    pub fn title(&self) -> &'static str {
        match self {
            MeasurementType::Height => "Height-for-age",
            MeasurementType::Weight => "Weight-for-age",
            MeasurementType::Bmi => "BMI-for-age",
            MeasurementType::HeadCircumference => "Head circumference-for-age",
        }
    }

    /// Short axis name, e.g. "Head circumference"
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementType::Height => "Height",
            MeasurementType::Weight => "Weight",
            MeasurementType::Bmi => "BMI",
            MeasurementType::HeadCircumference => "Head circumference",
        }
    }

    /// Measurement field the value is read from; BMI is derived
    pub fn field_name(&self) -> &'static str {
        match self {
            MeasurementType::Height => "height_cm",
            MeasurementType::Weight => "weight_kg",
            MeasurementType::Bmi => "bmi",
            MeasurementType::HeadCircumference => "head_circumference_cm",
        }
    }

    /// Unit of the measured value
    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementType::Height | MeasurementType::HeadCircumference => "cm",
            MeasurementType::Weight => "kg",
            MeasurementType::Bmi => "kg/m²",
        }
    }

    /// Whether the WHO restricted-tail adjustment applies beyond ±3 SD
    pub fn uses_restricted_tails(&self) -> bool {
        matches!(self, MeasurementType::Weight | MeasurementType::Bmi)
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MeasurementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid measurement type: {}", s))
    }
}
