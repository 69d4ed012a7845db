//! Gesture thresholds and band tables
//!
//! Every number a gesture engine uses lives here so that tables can be
//! tuned from a configuration file. `validate` must pass before a config is
//! handed to an engine.

use std::collections::BTreeMap;

use gestalt_ast::{HoleRole, LoopTemplate, Ty};
use gestalt_edit::Payload;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Sector};

/// One distance band: applies while the distance is below `until`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<f64>,
    pub pick: T,
}

impl<T> Band<T> {
    pub fn until(until: f64, pick: T) -> Self {
        Self { until: Some(until), pick }
    }

    pub fn rest(pick: T) -> Self {
        Self { until: None, pick }
    }
}

/// Bands per sector; sectors without an entry are inert
pub type SectorTable<T> = BTreeMap<Sector, Vec<Band<T>>>;

/// The band of `sector` that covers `distance`
pub fn lookup<T>(table: &SectorTable<T>, sector: Sector, distance: f64) -> Option<&T> {
    table
        .get(&sector)?
        .iter()
        .find(|band| band.until.map_or(true, |until| distance < until))
        .map(|band| &band.pick)
}

/// What an expression band asks for. Picks are resolved against the
/// choices offered for the hole; `Variable`, `Builtin` and `Function` take
/// the nth offered entry of their kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pick", rename_all = "kebab-case")]
pub enum ExpressionPick {
    Number,
    Bool { value: bool },
    Math,
    Compare { operand: Ty },
    Variable,
    Builtin,
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    /// Horizontal travel before unit-step mode engages
    pub dead_zone_x: f64,
    /// Vertical tolerance of unit-step mode and of the coefficient
    pub dead_zone_y: f64,
    /// Horizontal pixels per decade
    pub exponent_step: f64,
    /// Vertical pixels per coefficient unit
    pub coefficient_step: f64,
    pub max_exponent: i32,
    pub max_coefficient: f64,
    pub fraction_digits: u32,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            dead_zone_x: 10.0,
            dead_zone_y: 15.0,
            exponent_step: 20.0,
            coefficient_step: 5.0,
            max_exponent: 5,
            max_coefficient: 99.0,
            fraction_digits: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterConfig {
    /// Distance over which the declarable types are spread
    pub span: f64,
    /// Distances beyond this count as this
    pub max_distance: f64,
}

impl Default for ParameterConfig {
    fn default() -> Self {
        Self { span: 220.0, max_distance: 400.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub numeric: NumericConfig,
    /// Pixels per operator in the operator cycle
    pub operator_step: f64,
    pub statement: SectorTable<Payload>,
    pub expression: SectorTable<ExpressionPick>,
    /// Pixels per entry for nth-of-kind expression picks
    pub expression_step: f64,
    pub parameter: ParameterConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            numeric: NumericConfig::default(),
            operator_step: 20.0,
            statement: default_statement_table(),
            expression: default_expression_table(),
            expression_step: 40.0,
            parameter: ParameterConfig::default(),
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("numeric.exponent_step", self.numeric.exponent_step)?;
        positive("numeric.coefficient_step", self.numeric.coefficient_step)?;
        positive("operator_step", self.operator_step)?;
        positive("expression_step", self.expression_step)?;
        positive("parameter.span", self.parameter.span)?;
        positive("parameter.max_distance", self.parameter.max_distance)?;
        if self.numeric.dead_zone_x < 0.0 || self.numeric.dead_zone_y < 0.0 {
            return Err(ConfigError::NegativeDeadZone);
        }

        validate_table("statement", &self.statement)?;
        validate_table("expression", &self.expression)?;
        for (sector, bands) in &self.statement {
            if let Some(band) = bands.iter().find(|b| b.pick.role() != HoleRole::Statement) {
                return Err(ConfigError::NotAStatement { sector: *sector, pick: band.pick.describe() });
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn validate_table<T>(table: &'static str, bands: &SectorTable<T>) -> Result<(), ConfigError> {
    for (sector, bands) in bands {
        let sector = *sector;
        let Some((last, bounded)) = bands.split_last() else {
            return Err(ConfigError::EmptySector { table, sector });
        };
        if last.until.is_some() {
            return Err(ConfigError::BoundedTail { table, sector });
        }
        let mut previous = 0.0;
        for band in bounded {
            match band.until {
                Some(until) if until > previous => previous = until,
                _ => return Err(ConfigError::Unordered { table, sector }),
            }
        }
    }
    Ok(())
}

/// Evenly spaced bands, the last one unbounded
fn spaced<T>(step: f64, picks: Vec<T>) -> Vec<Band<T>> {
    let count = picks.len();
    picks
        .into_iter()
        .enumerate()
        .map(|(i, pick)| if i + 1 == count { Band::rest(pick) } else { Band::until(step * (i + 1) as f64, pick) })
        .collect()
}

pub fn default_statement_table() -> SectorTable<Payload> {
    let mut table = SectorTable::new();
    table.insert(Sector::E, spaced(40.0, Ty::DECLARABLE.iter().map(|ty| Payload::DeclareVariable { ty: *ty }).collect()));
    table.insert(
        Sector::Ne,
        spaced(
            60.0,
            [Ty::Int, Ty::Float, Ty::Bool, Ty::Vec3, Ty::Void]
                .into_iter()
                .map(|returns| Payload::DeclareFunction { returns })
                .collect(),
        ),
    );
    table.insert(
        Sector::N,
        spaced(60.0, LoopTemplate::ALL.iter().map(|template| Payload::ForLoop { template: *template }).collect()),
    );
    table.insert(Sector::Nw, vec![Band::rest(Payload::If)]);
    table.insert(Sector::W, vec![Band::rest(Payload::Return)]);
    table.insert(Sector::Sw, vec![Band::rest(Payload::Comment)]);
    table
}

pub fn default_expression_table() -> SectorTable<ExpressionPick> {
    let mut table = SectorTable::new();
    table.insert(
        Sector::E,
        spaced(
            40.0,
            vec![ExpressionPick::Number, ExpressionPick::Bool { value: true }, ExpressionPick::Bool { value: false }],
        ),
    );
    table.insert(
        Sector::Ne,
        spaced(
            60.0,
            vec![
                ExpressionPick::Math,
                ExpressionPick::Compare { operand: Ty::Int },
                ExpressionPick::Compare { operand: Ty::Float },
            ],
        ),
    );
    table.insert(Sector::N, vec![Band::rest(ExpressionPick::Variable)]);
    table.insert(Sector::Nw, vec![Band::rest(ExpressionPick::Builtin)]);
    table.insert(Sector::W, vec![Band::rest(ExpressionPick::Function)]);
    table
}
