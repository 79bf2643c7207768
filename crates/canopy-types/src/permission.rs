use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Read/write capability attached to a store key or node.
///
/// `ReadWrite` grants everything `Read` or `Write` grant individually;
/// `None` grants nothing. The wire form is the short string `"r"`, `"w"`,
/// `"rw"`, or `"none"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Read-only access.
    #[serde(rename = "r")]
    Read,
    /// Write-only access.
    #[serde(rename = "w")]
    Write,
    /// Full access. The default for newly created store nodes.
    #[default]
    #[serde(rename = "rw")]
    ReadWrite,
    /// No access.
    #[serde(rename = "none")]
    None,
}

impl Permission {
    /// Returns `true` if this capability allows reading.
    pub fn can_read(self) -> bool {
        matches!(self, Permission::Read | Permission::ReadWrite)
    }

    /// Returns `true` if this capability allows writing.
    pub fn can_write(self) -> bool {
        matches!(self, Permission::Write | Permission::ReadWrite)
    }

    /// The wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Read => "r",
            Permission::Write => "w",
            Permission::ReadWrite => "rw",
            Permission::None => "none",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Permission::Read),
            "w" => Ok(Permission::Write),
            "rw" => Ok(Permission::ReadWrite),
            "none" => Ok(Permission::None),
            other => Err(TypeError::UnknownPermission(other.to_string())),
        }
    }
}
