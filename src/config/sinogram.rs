//! Configuration file parser for sinogram creation

use std::fs;
use std::str::FromStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, de};
use units::Length;

use crate::error::{Error, Result};
use crate::hit::LayerId;
use crate::parameters::{AngleRange, GeometryParameters};

fn deserialize_uom<'d, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    String::deserialize(deserializer)?
        .parse::<T>()
        .map_err(de::Error::custom)
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Layer whose hits take part in the reconstruction
    #[serde(default = "default_layer")]
    pub layer: LayerId,

    /// Radius of the reconstruction layer, with units: `"42.5 cm"`
    #[serde(deserialize_with = "deserialize_uom")]
    pub radius: Length,

    /// Number of scintillators in the reconstruction layer
    pub scintillators: u32,

    /// Projection angles, in degrees
    #[serde(default)]
    pub angle: AngleRange,

    /// Width of distance bins, with units: `"1 mm"`
    #[serde(deserialize_with = "deserialize_uom")]
    pub accuracy: Length,

    /// Where the sinogram image is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Config {
    /// Validated geometry described by this configuration
    pub fn geometry(&self) -> Result<GeometryParameters> {
        GeometryParameters::new(self.layer, self.radius, self.angle, self.accuracy, self.scintillators)
    }
}

fn default_layer() -> LayerId { 1 }
fn default_output() -> PathBuf { "sinogram.ppm".into() }

pub fn read_config_file(path: &Path) -> Result<Config> {
    let config: String = fs::read_to_string(path)
        .map_err(|source| Error::ConfigFile { path: path.to_owned(), source })?;
    Ok(toml::from_str(&config)?)
}
