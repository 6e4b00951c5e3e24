////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! An OpenGL loader generator. It reads the Khronos `gl.xml` registry, selects exactly the
//! types, enums and commands needed for an api, version, profile and extension list, and
//! fills the `@TOKEN@` placeholders of C loader templates with the generated declarations.
//!
//! # Example
//!
//! ```no_run
//! use greg_generator::{template, Api, GregGenerator, Manifest, Profile, Registry, Target};
//!
//! let registry = Registry::from_file("spec/gl.xml").unwrap();
//! let target = Target::new(Api::Gl, (3, 3), Profile::Core, vec!["GL_KHR_debug"]);
//!
//! let manifest = Manifest::resolve(&registry, &target);
//! let bundle = greg_generator::assemble(&GregGenerator::default(), &registry, &manifest, &target).unwrap();
//!
//! let header = template::substitute(template::GREG_H, &bundle.bindings());
//! ```
//!
//! Resolution is a pure function of the registry and the target: nothing is cached between
//! runs and no global state is kept.

#[macro_use]
extern crate log;
extern crate xml;

mod error;
pub mod generators;
mod manifest;
mod registry;
mod target;
pub mod template;
pub mod text;

pub use error::{GeneratorError, Result};
pub use generators::{assemble, greg_gen::GregGenerator, Fragment, Generator, OutputBundle};
pub use manifest::*;
pub use registry::*;
pub use target::*;
