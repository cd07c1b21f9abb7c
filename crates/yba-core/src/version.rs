use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version string '{input}'")]
pub struct VersionParseError {
    input: String,
}

impl VersionParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YbVersion {
    // Field order drives the derived ordering.
    public: Option<[u64; 4]>,
    build: Option<u64>,
    suffix: String,
}

impl YbVersion {
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        if input.is_empty() {
            return Ok(Self::unset());
        }
        let invalid = || VersionParseError::new(input);

        let (public_part, release_part) = match input.split_once('-') {
            Some((public_part, rest)) => (public_part, Some(rest)),
            None => (input, None),
        };

        let mut public = [0_u64; 4];
        let mut components = public_part.split('.');
        for slot in &mut public {
            let component = components.next().ok_or_else(invalid)?;
            *slot = parse_digits(component).ok_or_else(invalid)?;
        }
        if components.next().is_some() {
            return Err(invalid());
        }

        let mut build = None;
        let mut suffix = String::new();
        if let Some(release_part) = release_part {
            let tail = release_part.strip_prefix('b').ok_or_else(invalid)?;
            let (digits, remainder) = match tail.split_once('-') {
                Some((digits, remainder)) => (digits, Some(remainder)),
                None => (tail, None),
            };
            build = Some(parse_digits(digits).ok_or_else(invalid)?);

            if let Some(remainder) = remainder {
                if !is_suffix_token(remainder) {
                    return Err(invalid());
                }
                suffix = remainder.to_string();
            }
        }

        Ok(Self {
            public: Some(public),
            build,
            suffix,
        })
    }

    pub fn is_unset(&self) -> bool {
        self.public.is_none()
    }

    pub fn public_digits(&self) -> Option<[u64; 4]> {
        self.public
    }

    pub fn major(&self) -> Option<u64> {
        self.public.map(|digits| digits[0])
    }

    pub fn minor(&self) -> Option<u64> {
        self.public.map(|digits| digits[1])
    }

    pub fn patch(&self) -> Option<u64> {
        self.public.map(|digits| digits[2])
    }

    pub fn subpatch(&self) -> Option<u64> {
        self.public.map(|digits| digits[3])
    }

    pub fn build_number(&self) -> Option<u64> {
        self.build
    }

    pub fn suffix(&self) -> Option<&str> {
        if self.suffix.is_empty() {
            None
        } else {
            Some(&self.suffix)
        }
    }
}

fn parse_digits(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn is_suffix_token(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')
}

impl fmt::Display for YbVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some([major, minor, patch, subpatch]) = self.public else {
            return Ok(());
        };
        write!(f, "{major}.{minor}.{patch}.{subpatch}")?;
        if let Some(build) = self.build {
            write!(f, "-b{build}")?;
            if !self.suffix.is_empty() {
                write!(f, "-{}", self.suffix)?;
            }
        }
        Ok(())
    }
}

impl FromStr for YbVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YbVersion {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YbVersion> for String {
    fn from(value: YbVersion) -> Self {
        value.to_string()
    }
}

pub fn is_valid_version(input: &str) -> bool {
    YbVersion::parse(input).is_ok()
}

pub fn less_versions(left: &str, right: &str) -> Result<bool, VersionParseError> {
    Ok(YbVersion::parse(left)? < YbVersion::parse(right)?)
}
