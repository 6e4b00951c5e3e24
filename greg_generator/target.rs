////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::error::GeneratorError;

/// Client API as named by the `api` attribute of registry features.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Api {
    Gl,
    Gles1,
    Gles2,
    Glsc2,
}

impl Api {
    pub fn as_str(self) -> &'static str {
        match self {
            Api::Gl => "gl",
            Api::Gles1 => "gles1",
            Api::Gles2 => "gles2",
            Api::Glsc2 => "glsc2",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl FromStr for Api {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Api, GeneratorError> {
        match s {
            "gl" => Ok(Api::Gl),
            "gles1" => Ok(Api::Gles1),
            "gles2" => Ok(Api::Gles2),
            "glsc2" => Ok(Api::Glsc2),
            _ => Err(GeneratorError::UnknownApi(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Profile {
    /// No profile: `<remove>` blocks are never applied.
    None,
    Core,
}

impl Profile {
    /// The value this profile carries in `profile` attributes.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Profile::None => None,
            Profile::Core => Some("core"),
        }
    }
}

/// An API version, ordered by `(major, minor)`.
///
/// `4.10` sorts after `4.9`, unlike its floating point reading.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Version {
        Version { major, minor }
    }
}

impl From<(u32, u32)> for Version {
    fn from((major, minor): (u32, u32)) -> Version {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Version, GeneratorError> {
        let invalid = || GeneratorError::InvalidVersion(s.to_string());
        let parse = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        match s.split_once('.') {
            Some((major, minor)) => Ok(Version::new(parse(major)?, parse(minor)?)),
            None => Ok(Version::new(parse(s)?, 0)),
        }
    }
}

/// What to generate a loader for. Built once from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub api: Api,
    pub version: Version,
    pub profile: Profile,
    pub extensions: BTreeSet<String>,
}

impl Target {
    pub fn new<V, I, S>(api: Api, version: V, profile: Profile, extensions: I) -> Target
    where
        V: Into<Version>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Target {
            api,
            version: version.into(),
            profile,
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// The token looked for in an extension's pipe-delimited `supported` attribute.
    ///
    /// Desktop GL under the core profile is listed as `glcore`; every other
    /// combination uses the bare api name.
    pub fn support_token(&self) -> &'static str {
        match (self.api, self.profile) {
            (Api::Gl, Profile::Core) => "glcore",
            (api, _) => api.as_str(),
        }
    }
}
