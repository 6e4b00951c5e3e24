use std::path::PathBuf;

use clap::Parser;
use greg_generator::{Api, Profile, Target, Version};

/// Generates a minimal OpenGL function loader from the Khronos XML registry.
#[derive(Debug, Parser)]
#[command(name = "greg", disable_version_flag = true)]
pub struct Options {
    /// Client API to generate a loader for (gl, gles1, gles2, glsc2)
    #[arg(long, default_value = "gl")]
    pub api: Api,

    /// Use the core profile (OpenGL only)
    #[arg(long)]
    pub core: bool,

    /// Highest API version to generate for, as MAJOR.MINOR
    #[arg(long, default_value = "4.4")]
    pub version: Version,

    /// Comma-separated list of extensions to generate for
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Registry document to read
    #[arg(long, default_value = "spec/gl.xml")]
    pub spec: PathBuf,

    /// Directory holding greg.h.in and greg.c.in
    #[arg(long, default_value = "templates")]
    pub templates: PathBuf,

    /// Directory greg.h and greg.c are written to
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Log resolution details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Options {
    pub fn target(&self) -> Target {
        let profile = if self.core { Profile::Core } else { Profile::None };
        let extensions = self.extensions.iter().map(|e| e.trim()).filter(|e| !e.is_empty());

        Target::new(self.api, self.version, profile, extensions)
    }
}
