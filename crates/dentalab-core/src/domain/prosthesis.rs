//! Prosthesis catalog entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Entity, TenantOwned};
use crate::error::{DomainError, FieldErrors};
use crate::validation::{is_blank, validate_required};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProsthesisType {
    Crown,
    Bridge,
    CompleteDenture,
    PartialDenture,
    Implant,
    Veneer,
    Inlay,
    Onlay,
}

impl ProsthesisType {
    pub const ALL: [ProsthesisType; 8] = [
        ProsthesisType::Crown,
        ProsthesisType::Bridge,
        ProsthesisType::CompleteDenture,
        ProsthesisType::PartialDenture,
        ProsthesisType::Implant,
        ProsthesisType::Veneer,
        ProsthesisType::Inlay,
        ProsthesisType::Onlay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProsthesisType::Crown => "crown",
            ProsthesisType::Bridge => "bridge",
            ProsthesisType::CompleteDenture => "complete_denture",
            ProsthesisType::PartialDenture => "partial_denture",
            ProsthesisType::Implant => "implant",
            ProsthesisType::Veneer => "veneer",
            ProsthesisType::Inlay => "inlay",
            ProsthesisType::Onlay => "onlay",
        }
    }

    /// Wire-boundary parse, reported as a `type` field violation.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if is_blank(s) {
            return Err(DomainError::InvalidInput(FieldErrors::single(
                "type",
                "type is required",
            )));
        }
        s.parse()
    }
}

impl FromStr for ProsthesisType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProsthesisType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                DomainError::InvalidInput(FieldErrors::single("type", "invalid prosthesis type"))
            })
    }
}

impl fmt::Display for ProsthesisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProsthesisSpec {
    #[serde(rename = "type")]
    pub kind: ProsthesisType,
    pub material: String,
    pub shade: Option<String>,
    pub specifications: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Prosthesis {
    pub id: Uuid,
    laboratory_id: Uuid,

    #[serde(rename = "type")]
    pub kind: ProsthesisType,

    #[validate(custom(function = "validate_required"))]
    pub material: String,

    pub shade: Option<String>,
    pub specifications: Option<String>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Prosthesis {
    pub fn new(laboratory_id: Uuid, spec: ProsthesisSpec) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut prosthesis = Self {
            id: dentalab_shared::new_id(),
            laboratory_id,
            kind: spec.kind,
            material: String::new(),
            shade: None,
            specifications: None,
            notes: None,
            created_at: now,
            updated_at: now,
            removed_at: None,
        };
        prosthesis.apply(spec);

        prosthesis.validate()?;
        Ok(prosthesis)
    }

    pub fn update(&mut self, spec: ProsthesisSpec) -> Result<(), DomainError> {
        let mut next = self.clone();
        next.apply(spec);
        next.updated_at = Utc::now();

        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, spec: ProsthesisSpec) {
        self.kind = spec.kind;
        self.material = spec.material.trim().to_string();
        self.shade = spec.shade;
        self.specifications = spec.specifications;
        self.notes = spec.notes;
    }
}

impl Entity for Prosthesis {
    fn id(&self) -> Uuid {
        self.id
    }

    fn removed_at(&self) -> Option<DateTime<Utc>> {
        self.removed_at
    }

    fn soft_delete(&mut self) {
        self.removed_at = Some(Utc::now());
    }
}

impl TenantOwned for Prosthesis {
    fn laboratory_id(&self) -> Uuid {
        self.laboratory_id
    }
}
