// Method argument sets (tagged by method name)

use super::error::DomainError;
use super::field::{Field, FieldKind, Gender};
use super::schema::{MethodArguments, Schema, ValidatedFields};
use serde::Serialize;
use serde_json::{Map, Value};

static ONLINE_SCORE_SCHEMA: Schema = Schema::new(
    "online_score",
    &[
        Field::new("first_name", FieldKind::Char).nullable(),
        Field::new("last_name", FieldKind::Char).nullable(),
        Field::new("email", FieldKind::Email).nullable(),
        Field::new("phone", FieldKind::Phone).nullable(),
        Field::new("birthday", FieldKind::Date).nullable(),
        Field::new("gender", FieldKind::Gender).nullable(),
    ],
);

static CLIENTS_INTERESTS_SCHEMA: Schema = Schema::new(
    "clients_interests",
    &[
        Field::new("client_ids", FieldKind::ClientIds).required(),
        Field::new("date", FieldKind::Date).nullable(),
    ],
);

/// Supported RPC methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    OnlineScore,
    ClientsInterests,
}

impl Method {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "online_score" => Some(Method::OnlineScore),
            "clients_interests" => Some(Method::ClientsInterests),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::OnlineScore => "online_score",
            Method::ClientsInterests => "clients_interests",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// online_score arguments
///
/// Every field is optional, but at least one pair must be complete:
/// first_name + last_name, email + phone, or birthday + gender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OnlineScoreArgs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Canonical 11-digit string
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub gender: Option<Gender>,
}

impl OnlineScoreArgs {
    pub fn has_complete_pair(&self) -> bool {
        (self.first_name.is_some() && self.last_name.is_some())
            || (self.email.is_some() && self.phone.is_some())
            || (self.birthday.is_some() && self.gender.is_some())
    }

    /// Names of the supplied fields, in declaration order
    pub fn present_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("first_name", self.first_name.is_some()),
            ("last_name", self.last_name.is_some()),
            ("email", self.email.is_some()),
            ("phone", self.phone.is_some()),
            ("birthday", self.birthday.is_some()),
            ("gender", self.gender.is_some()),
        ];
        flags
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| name)
            .collect()
    }
}

impl MethodArguments for OnlineScoreArgs {
    fn schema() -> &'static Schema {
        &ONLINE_SCORE_SCHEMA
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, Vec<DomainError>> {
        let args = Self {
            first_name: fields.take_text("first_name"),
            last_name: fields.take_text("last_name"),
            email: fields.take_text("email"),
            phone: fields.take_text("phone"),
            birthday: fields.take_text("birthday"),
            gender: fields.take_gender("gender"),
        };

        if !args.has_complete_pair() {
            return Err(vec![DomainError::Incomplete(
                "at least one pair must be present: first_name/last_name, email/phone, birthday/gender"
                    .to_string(),
            )]);
        }

        Ok(args)
    }
}

/// clients_interests arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientsInterestsArgs {
    /// Non-empty, order and duplicates preserved
    pub client_ids: Vec<u64>,
    pub date: Option<String>,
}

impl MethodArguments for ClientsInterestsArgs {
    fn schema() -> &'static Schema {
        &CLIENTS_INTERESTS_SCHEMA
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, Vec<DomainError>> {
        // The field is required and non-nullable, so an empty list never gets here
        let client_ids = fields
            .take_client_ids("client_ids")
            .ok_or_else(|| vec![DomainError::MissingField { field: "client_ids" }])?;

        Ok(Self {
            client_ids,
            date: fields.take_text("date"),
        })
    }
}

/// Typed arguments, selected by the method name before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodArgs {
    OnlineScore(OnlineScoreArgs),
    ClientsInterests(ClientsInterestsArgs),
}

impl MethodArgs {
    pub fn resolve(method: Method, arguments: &Map<String, Value>) -> Result<Self, Vec<DomainError>> {
        match method {
            Method::OnlineScore => OnlineScoreArgs::validate(arguments).map(MethodArgs::OnlineScore),
            Method::ClientsInterests => {
                ClientsInterestsArgs::validate(arguments).map(MethodArgs::ClientsInterests)
            }
        }
    }

    pub fn method(&self) -> Method {
        match self {
            MethodArgs::OnlineScore(_) => Method::OnlineScore,
            MethodArgs::ClientsInterests(_) => Method::ClientsInterests,
        }
    }
}
