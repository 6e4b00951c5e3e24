////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{fmt, io, path::PathBuf};

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur while loading a registry or building a loader.
#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    /// A registry or template file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The registry document is not well-formed XML.
    #[error("Failed to parse registry: {0}")]
    Parse(#[from] xml::reader::Error),

    /// The document parsed but contained no root element.
    #[error("Registry document has no root element")]
    EmptyDocument,

    /// A version string is not of the form `X.Y`.
    #[error("Invalid version `{0}`, expected MAJOR.MINOR")]
    InvalidVersion(String),

    /// An api name that the registry does not define features for.
    #[error("Unknown api `{0}`, expected one of gl, gles1, gles2, glsc2")]
    UnknownApi(String),

    /// Writing into an output buffer failed.
    #[error("Failed to format output: {0}")]
    Format(#[from] fmt::Error),
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GeneratorError::Io { path: path.into(), source }
    }
}
