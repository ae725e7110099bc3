use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Semantic hint selecting a domain-appropriate value family for a field.
///
/// The textual form is a contract shared with the data generator:
/// `name` for plain tags and `name(param:value,param:value)` for
/// parameterized ones, parameters in declared order and no spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryTag {
    Default,
    Email,
    FirstName,
    LastName,
    FullName,
    Address,
    AppVersion,
    CreditCardNumber,
    CompanyName,
    Username,
    Price,
    Url,
    Image { width: u32, height: u32 },
    VehicleMake,
    VehicleModel,
    VehicleYear,
    Vin,
    BinaryString,
}

impl CategoryTag {
    /// Every tag name, in documentation order.
    pub const NAMES: &'static [&'static str] = &[
        "default",
        "email",
        "firstName",
        "lastName",
        "fullName",
        "address",
        "appVersion",
        "creditCardNumber",
        "companyName",
        "username",
        "price",
        "url",
        "image(width,height)",
        "vehicleMake",
        "vehicleModel",
        "vehicleYear",
        "vin",
        "binaryString",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Email => "email",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::FullName => "fullName",
            Self::Address => "address",
            Self::AppVersion => "appVersion",
            Self::CreditCardNumber => "creditCardNumber",
            Self::CompanyName => "companyName",
            Self::Username => "username",
            Self::Price => "price",
            Self::Url => "url",
            Self::Image { .. } => "image",
            Self::VehicleMake => "vehicleMake",
            Self::VehicleModel => "vehicleModel",
            Self::VehicleYear => "vehicleYear",
            Self::Vin => "vin",
            Self::BinaryString => "binaryString",
        }
    }

    /// Parameters in declared order.
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Image { width, height } => {
                vec![("width", width.to_string()), ("height", height.to_string())]
            }
            _ => Vec::new(),
        }
    }

    fn plain(name: &str) -> Option<Self> {
        let tag = match name {
            "default" => Self::Default,
            "email" => Self::Email,
            "firstName" => Self::FirstName,
            "lastName" => Self::LastName,
            "fullName" => Self::FullName,
            "address" => Self::Address,
            "appVersion" => Self::AppVersion,
            "creditCardNumber" => Self::CreditCardNumber,
            "companyName" => Self::CompanyName,
            "username" => Self::Username,
            "price" => Self::Price,
            "url" => Self::Url,
            "vehicleMake" => Self::VehicleMake,
            "vehicleModel" => Self::VehicleModel,
            "vehicleYear" => Self::VehicleYear,
            "vin" => Self::Vin,
            "binaryString" => Self::BinaryString,
            _ => return None,
        };
        Some(tag)
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        let parameters = self.parameters();
        if parameters.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (position, (key, value)) in parameters.iter().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}:{value}")?;
        }
        f.write_str(")")
    }
}

impl FromStr for CategoryTag {
    type Err = Error;

    /// Accepts the canonical form as well as attribute spellings such as
    /// `.image(width: 243, height: 123)`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
        let compact = compact.strip_prefix('.').unwrap_or(compact.as_str());

        let Some(open) = compact.find('(') else {
            return Self::plain(compact)
                .ok_or_else(|| Error::Unsupported(format!("unknown category tag '{value}'")));
        };

        let name = &compact[..open];
        let arguments = compact[open + 1..].strip_suffix(')').ok_or_else(|| {
            Error::InvalidDeclaration(format!("unterminated category parameters in '{value}'"))
        })?;

        match name {
            "image" => {
                let mut width = None;
                let mut height = None;
                for argument in arguments.split(',').filter(|part| !part.is_empty()) {
                    let (key, raw) = argument.split_once(':').ok_or_else(|| {
                        Error::InvalidDeclaration(format!(
                            "category parameter '{argument}' must be written as key:value"
                        ))
                    })?;
                    let parsed = raw.parse::<u32>().map_err(|_| {
                        Error::InvalidDeclaration(format!(
                            "category parameter '{key}' must be a non-negative integer"
                        ))
                    })?;
                    match key {
                        "width" => width = Some(parsed),
                        "height" => height = Some(parsed),
                        other => {
                            return Err(Error::InvalidDeclaration(format!(
                                "unknown image parameter '{other}'"
                            )));
                        }
                    }
                }
                match (width, height) {
                    (Some(width), Some(height)) => Ok(Self::Image { width, height }),
                    _ => Err(Error::InvalidDeclaration(
                        "image category requires width and height".to_string(),
                    )),
                }
            }
            other => Err(Error::Unsupported(format!(
                "category tag '{other}' does not take parameters"
            ))),
        }
    }
}

impl TryFrom<String> for CategoryTag {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryTag> for String {
    fn from(tag: CategoryTag) -> Self {
        tag.to_string()
    }
}

impl JsonSchema for CategoryTag {
    fn schema_name() -> String {
        "CategoryTag".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}
