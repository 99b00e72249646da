//! Benchmark configuration: the raw user mapping and its resolved form.
//!
//! Users configure a run with a YAML mapping inside the triggering comment:
//!
//! ```yaml
//! spec: sirius@develop +cuda
//! args: ["-n", "4"]
//! reference:
//!   spec: sirius@7.5.0
//! current:
//!   args: []
//! ```
//!
//! Top-level `spec` / `args` apply to both sides; `reference` / `current`
//! override them per side. [`RawConfig::resolve`] applies that cascade and
//! produces [`ConfigOptions`]. Fields nobody set stay absent here; the job
//! assembler substitutes the system defaults.

use serde::{de::Error as _, Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Raw configuration (as written by the user)
// ---------------------------------------------------------------------------

/// Per-side overrides under the `reference` or `current` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SideConfig {
    #[serde(default, deserialize_with = "deserialize_spec")]
    pub spec: Option<String>,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub args: Option<Vec<String>>,
}

/// The configuration mapping exactly as the user wrote it.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawConfig {
    #[serde(default, deserialize_with = "deserialize_spec")]
    pub spec: Option<String>,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub reference: Option<SideConfig>,
    #[serde(default)]
    pub current: Option<SideConfig>,
}

/// Renders a YAML scalar as the string the user meant; hands back sequences,
/// mappings and null unchanged.
fn scalar_string(value: serde_yaml::Value) -> Result<String, serde_yaml::Value> {
    match value {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(other),
    }
}

/// Accepts any YAML scalar as a spec, so `spec: 7` reads as `"7"`.
fn deserialize_spec<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => scalar_string(value).map(Some).map_err(|other| {
            D::Error::custom(format!("spec must be a scalar, found {other:?}"))
        }),
    }
}

/// Accepts any YAML scalar as an argument so `[-n, 4]` works as well as
/// `["-n", "4"]`. Nested sequences or mappings are rejected.
fn deserialize_args<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(values) = Option::<Vec<serde_yaml::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    values
        .into_iter()
        .map(|value| {
            scalar_string(value).map_err(|other| {
                D::Error::custom(format!("args entries must be scalars, found {other:?}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// The effective user configuration for both sides of a comparison.
///
/// Every field is independently optional; `None` means "use the system
/// default". `Some(vec![])` for args is a deliberate empty argument list and is
/// kept distinct from `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    pub reference_spec: Option<String>,
    pub reference_args: Option<Vec<String>>,
    pub current_spec: Option<String>,
    pub current_args: Option<Vec<String>>,
}

impl RawConfig {
    /// Applies the cascade: side value, else top-level value, else absent.
    ///
    /// `args` is replaced wholesale; lists are never concatenated.
    pub fn resolve(self) -> ConfigOptions {
        let (reference_spec, reference_args) =
            resolve_side(self.reference, self.spec.as_ref(), self.args.as_ref());
        let (current_spec, current_args) =
            resolve_side(self.current, self.spec.as_ref(), self.args.as_ref());

        ConfigOptions {
            reference_spec,
            reference_args,
            current_spec,
            current_args,
        }
    }
}

fn resolve_side(
    side: Option<SideConfig>,
    top_spec: Option<&String>,
    top_args: Option<&Vec<String>>,
) -> (Option<String>, Option<Vec<String>>) {
    let side = side.unwrap_or_default();
    let spec = side.spec.or_else(|| top_spec.cloned());
    let args = side.args.or_else(|| top_args.cloned());
    (spec, args)
}
