use crate::core::forcefield::electrostatic::{DielectricModel, ParseDielectricModelError};
use crate::core::forcefield::term::TermKind;
use crate::core::tables::Variant;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Unknown option: '{0}'")]
    UnknownOption(String),
    #[error("Option '{key}' expects {expected}")]
    WrongType { key: String, expected: &'static str },
    #[error("Option '{key}' must be positive, got {value}")]
    NotPositive { key: &'static str, value: f64 },
    #[error("Option 'max-iterations' must be at least 1")]
    NoIterations,
    #[error(transparent)]
    DielectricModel(#[from] ParseDielectricModelError),
    #[error("Unknown force field variant: '{0}'")]
    UnknownVariant(String),
    #[error("Invalid configuration file: {0}")]
    Parse(String),
}

/// A loosely typed option value, for callers that configure the force field through
/// string keys.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Which terms the force field builds and how nonbonded terms behave.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ForceFieldOptions {
    /// Nonbonded pairs at or beyond this distance (Å) at build time get no terms.
    pub nonbonded_cutoff: f64,
    pub dielectric_constant: f64,
    pub dielectric_model: DielectricModel,
    pub bond_stretch: bool,
    pub angle_bend: bool,
    pub stretch_bend: bool,
    pub out_of_plane: bool,
    pub torsion_angle: bool,
    pub van_der_waals: bool,
    pub electrostatic: bool,
}

impl Default for ForceFieldOptions {
    fn default() -> Self {
        Self {
            nonbonded_cutoff: 100.0,
            dielectric_constant: 1.0,
            dielectric_model: DielectricModel::Constant,
            bond_stretch: true,
            angle_bend: true,
            stretch_bend: true,
            out_of_plane: true,
            torsion_angle: true,
            van_der_waals: true,
            electrostatic: true,
        }
    }
}

impl ForceFieldOptions {
    pub fn builder() -> ForceFieldOptionsBuilder {
        ForceFieldOptionsBuilder::new()
    }

    /// Parses options from a TOML document whose keys are the kebab-case field names.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let options: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nonbonded_cutoff.is_nan() || self.nonbonded_cutoff <= 0.0 {
            return Err(ConfigError::NotPositive {
                key: "nonbonded-cutoff",
                value: self.nonbonded_cutoff,
            });
        }
        if self.dielectric_constant.is_nan() || self.dielectric_constant <= 0.0 {
            return Err(ConfigError::NotPositive {
                key: "dielectric-constant",
                value: self.dielectric_constant,
            });
        }
        Ok(())
    }

    pub fn is_enabled(&self, kind: TermKind) -> bool {
        match kind {
            TermKind::BondStretch => self.bond_stretch,
            TermKind::AngleBend => self.angle_bend,
            TermKind::StretchBend => self.stretch_bend,
            TermKind::OutOfPlane => self.out_of_plane,
            TermKind::TorsionAngle => self.torsion_angle,
            TermKind::VanDerWaals => self.van_der_waals,
            TermKind::Electrostatic => self.electrostatic,
        }
    }

    pub fn set_enabled(&mut self, kind: TermKind, enabled: bool) {
        let flag = match kind {
            TermKind::BondStretch => &mut self.bond_stretch,
            TermKind::AngleBend => &mut self.angle_bend,
            TermKind::StretchBend => &mut self.stretch_bend,
            TermKind::OutOfPlane => &mut self.out_of_plane,
            TermKind::TorsionAngle => &mut self.torsion_angle,
            TermKind::VanDerWaals => &mut self.van_der_waals,
            TermKind::Electrostatic => &mut self.electrostatic,
        };
        *flag = enabled;
    }

    /// Sets one option by name.
    ///
    /// Keys are matched case-insensitively with spaces, underscores and hyphens treated
    /// alike, so both `"nonbonded cutoff"` and `"nonbonded-cutoff"` work. Term families
    /// are switched with their names (`"electrostatic"`, `"van der waals"`, ...).
    /// A rejected value leaves the options untouched.
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        updated.apply(key, value.into())?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: OptionValue) -> Result<(), ConfigError> {
        let normalized = key.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "nonbonded-cutoff" => {
                self.nonbonded_cutoff = expect_number(key, value)?;
            }
            "dielectric-constant" => {
                self.dielectric_constant = expect_number(key, value)?;
            }
            "dielectric-model" => match value {
                OptionValue::Text(text) => self.dielectric_model = text.parse()?,
                _ => {
                    return Err(ConfigError::WrongType {
                        key: key.to_string(),
                        expected: "\"constant\" or \"distance\"",
                    });
                }
            },
            other => {
                let kind = TermKind::from_key(other)
                    .ok_or_else(|| ConfigError::UnknownOption(key.to_string()))?;
                match value {
                    OptionValue::Flag(enabled) => self.set_enabled(kind, enabled),
                    _ => {
                        return Err(ConfigError::WrongType {
                            key: key.to_string(),
                            expected: "a boolean",
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn expect_number(key: &str, value: OptionValue) -> Result<f64, ConfigError> {
    match value {
        OptionValue::Number(number) => Ok(number),
        _ => Err(ConfigError::WrongType {
            key: key.to_string(),
            expected: "a number",
        }),
    }
}

#[derive(Default)]
pub struct ForceFieldOptionsBuilder {
    nonbonded_cutoff: Option<f64>,
    dielectric_constant: Option<f64>,
    dielectric_model: Option<DielectricModel>,
    disabled: Vec<TermKind>,
}

impl ForceFieldOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nonbonded_cutoff(mut self, cutoff: f64) -> Self {
        self.nonbonded_cutoff = Some(cutoff);
        self
    }
    pub fn dielectric_constant(mut self, dielectric: f64) -> Self {
        self.dielectric_constant = Some(dielectric);
        self
    }
    pub fn dielectric_model(mut self, model: DielectricModel) -> Self {
        self.dielectric_model = Some(model);
        self
    }
    pub fn disable(mut self, kind: TermKind) -> Self {
        self.disabled.push(kind);
        self
    }

    pub fn build(self) -> Result<ForceFieldOptions, ConfigError> {
        let defaults = ForceFieldOptions::default();
        let mut options = ForceFieldOptions {
            nonbonded_cutoff: self.nonbonded_cutoff.unwrap_or(defaults.nonbonded_cutoff),
            dielectric_constant: self
                .dielectric_constant
                .unwrap_or(defaults.dielectric_constant),
            dielectric_model: self.dielectric_model.unwrap_or(defaults.dielectric_model),
            ..defaults
        };
        for kind in self.disabled {
            options.set_enabled(kind, false);
        }
        options.validate()?;
        Ok(options)
    }
}

/// Convergence settings of the minimizer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MinimizeOptions {
    pub max_iterations: usize,
    /// Relative energy change below which the minimizer stops.
    pub energy_tolerance: f64,
    /// Scaled gradient magnitude below which the minimizer stops.
    pub gradient_tolerance: f64,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            energy_tolerance: 1e-4,
            gradient_tolerance: 1e-6,
        }
    }
}

impl MinimizeOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if self.energy_tolerance.is_nan() || self.energy_tolerance <= 0.0 {
            return Err(ConfigError::NotPositive {
                key: "energy-tolerance",
                value: self.energy_tolerance,
            });
        }
        if self.gradient_tolerance.is_nan() || self.gradient_tolerance <= 0.0 {
            return Err(ConfigError::NotPositive {
                key: "gradient-tolerance",
                value: self.gradient_tolerance,
            });
        }
        Ok(())
    }
}

/// Everything the minimization workflow needs besides the molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeConfig {
    pub variant: Variant,
    pub forcefield: ForceFieldOptions,
    pub minimize: MinimizeOptions,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Mmff94,
            forcefield: ForceFieldOptions::default(),
            minimize: MinimizeOptions::default(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MinimizeConfigFile {
    variant: Option<String>,
    forcefield: ForceFieldOptions,
    minimize: MinimizeOptions,
}

impl MinimizeConfig {
    pub fn builder() -> MinimizeConfigBuilder {
        MinimizeConfigBuilder::new()
    }

    /// Parses a document with an optional top-level `variant` and optional
    /// `[forcefield]` and `[minimize]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: MinimizeConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let variant = match file.variant {
            Some(name) => name
                .parse()
                .map_err(|_| ConfigError::UnknownVariant(name))?,
            None => Variant::Mmff94,
        };
        let config = Self {
            variant,
            forcefield: file.forcefield,
            minimize: file.minimize,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.forcefield.validate()?;
        self.minimize.validate()
    }
}

#[derive(Default)]
pub struct MinimizeConfigBuilder {
    variant: Option<Variant>,
    forcefield: Option<ForceFieldOptions>,
    max_iterations: Option<usize>,
    energy_tolerance: Option<f64>,
    gradient_tolerance: Option<f64>,
}

impl MinimizeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }
    pub fn forcefield(mut self, options: ForceFieldOptions) -> Self {
        self.forcefield = Some(options);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn energy_tolerance(mut self, tolerance: f64) -> Self {
        self.energy_tolerance = Some(tolerance);
        self
    }
    pub fn gradient_tolerance(mut self, tolerance: f64) -> Self {
        self.gradient_tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<MinimizeConfig, ConfigError> {
        let defaults = MinimizeOptions::default();
        let config = MinimizeConfig {
            variant: self.variant.unwrap_or(Variant::Mmff94),
            forcefield: self.forcefield.unwrap_or_default(),
            minimize: MinimizeOptions {
                max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
                energy_tolerance: self.energy_tolerance.unwrap_or(defaults.energy_tolerance),
                gradient_tolerance: self
                    .gradient_tolerance
                    .unwrap_or(defaults.gradient_tolerance),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = ForceFieldOptions::default();
        assert_eq!(options.nonbonded_cutoff, 100.0);
        assert_eq!(options.dielectric_constant, 1.0);
        assert_eq!(options.dielectric_model, DielectricModel::Constant);
        assert!(TermKind::ALL.iter().all(|&kind| options.is_enabled(kind)));

        let minimize = MinimizeOptions::default();
        assert_eq!(minimize.max_iterations, 200);
        assert_eq!(minimize.energy_tolerance, 1e-4);
        assert_eq!(minimize.gradient_tolerance, 1e-6);
    }

    #[test]
    fn set_accepts_human_readable_keys() {
        let mut options = ForceFieldOptions::default();
        options.set("nonbonded cutoff", 8.0).unwrap();
        options.set("Dielectric Model", "distance").unwrap();
        options.set("dielectric constant", 4.0).unwrap();
        options.set("electrostatic", false).unwrap();
        options.set("van der waals", false).unwrap();
        assert_eq!(options.nonbonded_cutoff, 8.0);
        assert_eq!(options.dielectric_model, DielectricModel::Distance);
        assert_eq!(options.dielectric_constant, 4.0);
        assert!(!options.electrostatic);
        assert!(!options.is_enabled(TermKind::VanDerWaals));
        assert!(options.bond_stretch);
    }

    #[test]
    fn set_rejects_unknown_keys_and_wrong_types() {
        let mut options = ForceFieldOptions::default();
        assert_eq!(
            options.set("hydrogen bonds", true),
            Err(ConfigError::UnknownOption("hydrogen bonds".to_string()))
        );
        assert!(matches!(
            options.set("electrostatic", 1.0),
            Err(ConfigError::WrongType { .. })
        ));
        assert!(matches!(
            options.set("dielectric model", "vacuum"),
            Err(ConfigError::DielectricModel(_))
        ));
        assert!(matches!(
            options.set("nonbonded cutoff", -1.0),
            Err(ConfigError::NotPositive { .. })
        ));
    }

    #[test]
    fn rejected_set_leaves_options_unchanged() {
        let mut options = ForceFieldOptions::builder()
            .nonbonded_cutoff(12.0)
            .build()
            .unwrap();
        let before = options.clone();

        assert!(options.set("nonbonded cutoff", -5.0).is_err());
        assert!(options.set("dielectric constant", 0.0).is_err());
        assert!(options.set("dielectric model", "vacuum").is_err());
        assert_eq!(options, before);
        assert_eq!(options.nonbonded_cutoff, 12.0);

        options.set("nonbonded cutoff", 8.0).unwrap();
        assert_eq!(options.nonbonded_cutoff, 8.0);
    }

    #[test]
    fn builder_fills_defaults_and_disables_terms() {
        let options = ForceFieldOptions::builder()
            .nonbonded_cutoff(12.0)
            .disable(TermKind::OutOfPlane)
            .build()
            .unwrap();
        assert_eq!(options.nonbonded_cutoff, 12.0);
        assert_eq!(options.dielectric_constant, 1.0);
        assert!(!options.out_of_plane);
        assert!(options.torsion_angle);
    }

    #[test]
    fn builder_rejects_zero_dielectric() {
        assert!(ForceFieldOptions::builder()
            .dielectric_constant(0.0)
            .build()
            .is_err());
    }

    #[test]
    fn options_parse_from_toml_with_defaults_for_missing_keys() {
        let options = ForceFieldOptions::from_toml_str(
            "nonbonded-cutoff = 9.0\ndielectric-model = \"distance\"\nelectrostatic = false\n",
        )
        .unwrap();
        assert_eq!(options.nonbonded_cutoff, 9.0);
        assert_eq!(options.dielectric_model, DielectricModel::Distance);
        assert!(!options.electrostatic);
        assert!(options.van_der_waals);
    }

    #[test]
    fn options_toml_rejects_unknown_keys() {
        assert!(matches!(
            ForceFieldOptions::from_toml_str("hbond = true\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn minimize_config_parses_all_sections() {
        let config = MinimizeConfig::from_toml_str(
            r#"
variant = "MMFF94s"

[forcefield]
torsion-angle = false

[minimize]
max-iterations = 50
"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::Mmff94s);
        assert!(!config.forcefield.torsion_angle);
        assert_eq!(config.minimize.max_iterations, 50);
        assert_eq!(config.minimize.energy_tolerance, 1e-4);
    }

    #[test]
    fn minimize_config_rejects_unknown_variant() {
        assert_eq!(
            MinimizeConfig::from_toml_str("variant = \"MMFF95\"\n"),
            Err(ConfigError::UnknownVariant("MMFF95".to_string()))
        );
    }

    #[test]
    fn minimize_config_builder_validates_iterations() {
        assert_eq!(
            MinimizeConfig::builder().max_iterations(0).build(),
            Err(ConfigError::NoIterations)
        );
        let config = MinimizeConfig::builder()
            .variant(Variant::Mmff94sPlus)
            .max_iterations(10)
            .build()
            .unwrap();
        assert_eq!(config.variant, Variant::Mmff94sPlus);
        assert_eq!(config.minimize.max_iterations, 10);
    }
}
