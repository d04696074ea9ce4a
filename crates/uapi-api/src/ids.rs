//! # Identifier Issuance
//!
//! Server-assigned record identifiers. [`FixedIds`] returns the same UUID
//! per record kind on every call, matching the reference deployment, and is
//! what the integration tests pin against. [`RandomIds`] issues UUID v4.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// The kinds of record the service creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Post,
    Comment,
}

/// Source of identifiers for newly created records.
pub trait IdIssuer: Send + Sync + fmt::Debug {
    fn issue(&self, kind: RecordKind) -> Uuid;
}

pub const FIXED_USER_ID: Uuid = Uuid::from_u128(0xa779e093_1fe2_43e7_9fa7_878ed00852ff);
pub const FIXED_POST_ID: Uuid = Uuid::from_u128(0x2a6546c5_5481_4dd0_8975_d3ab888506b7);
pub const FIXED_COMMENT_ID: Uuid = Uuid::from_u128(0xfd41790f_cfb9_40ad_9dba_51380f90706a);

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIds;

impl IdIssuer for FixedIds {
    fn issue(&self, kind: RecordKind) -> Uuid {
        match kind {
            RecordKind::User => FIXED_USER_ID,
            RecordKind::Post => FIXED_POST_ID,
            RecordKind::Comment => FIXED_COMMENT_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdIssuer for RandomIds {
    fn issue(&self, _kind: RecordKind) -> Uuid {
        Uuid::new_v4()
    }
}

/// Which [`IdIssuer`] the service runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdIssuance {
    #[default]
    Fixed,
    Random,
}

impl IdIssuance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Random => "random",
        }
    }
}

impl FromStr for IdIssuance {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "random" => Ok(Self::Random),
            _ => Err(()),
        }
    }
}
