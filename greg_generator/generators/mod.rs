////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{collections::BTreeMap, fmt};

use crate::{error::Result, manifest::Manifest, registry::Registry, target::Target};

pub mod greg_gen;

/// Trait for a loader generator.
///
/// A generator walks the registry in document order, filtered by the
/// manifest, and appends lines to the fragments of an [`OutputBundle`].
pub trait Generator {
    fn write(&self, registry: &Registry, manifest: &Manifest, target: &Target, dest: &mut OutputBundle) -> fmt::Result;
}

/// Runs `generator` into a fresh bundle.
pub fn assemble<G>(generator: &G, registry: &Registry, manifest: &Manifest, target: &Target) -> Result<OutputBundle>
where G: Generator {
    let mut bundle = OutputBundle::default();
    generator.write(registry, manifest, target, &mut bundle)?;
    Ok(bundle)
}

/// One generated text category, substituted for the template token `@<token>@`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Fragment {
    TypeTypedefs,
    EnumDefinitions,
    ExtMacros,
    VerMacros,
    ExtDeclarations,
    VerDeclarations,
    ExtDefinitions,
    VerDefinitions,
    VerLoaders,
    ExtLoaders,
    CmdTypedefs,
    CmdDeclarations,
    CmdMacros,
    CmdDefinitions,
    CmdLoaders,
}

impl Fragment {
    pub const ALL: [Fragment; 15] = [
        Fragment::TypeTypedefs,
        Fragment::EnumDefinitions,
        Fragment::ExtMacros,
        Fragment::VerMacros,
        Fragment::ExtDeclarations,
        Fragment::VerDeclarations,
        Fragment::ExtDefinitions,
        Fragment::VerDefinitions,
        Fragment::VerLoaders,
        Fragment::ExtLoaders,
        Fragment::CmdTypedefs,
        Fragment::CmdDeclarations,
        Fragment::CmdMacros,
        Fragment::CmdDefinitions,
        Fragment::CmdLoaders,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Fragment::TypeTypedefs => "TYPE_TYPEDEFS",
            Fragment::EnumDefinitions => "ENUM_DEFINITIONS",
            Fragment::ExtMacros => "EXT_MACROS",
            Fragment::VerMacros => "VER_MACROS",
            Fragment::ExtDeclarations => "EXT_DECLARATIONS",
            Fragment::VerDeclarations => "VER_DECLARATIONS",
            Fragment::ExtDefinitions => "EXT_DEFINITIONS",
            Fragment::VerDefinitions => "VER_DEFINITIONS",
            Fragment::VerLoaders => "VER_LOADERS",
            Fragment::ExtLoaders => "EXT_LOADERS",
            Fragment::CmdTypedefs => "CMD_TYPEDEFS",
            Fragment::CmdDeclarations => "CMD_DECLARATIONS",
            Fragment::CmdMacros => "CMD_MACROS",
            Fragment::CmdDefinitions => "CMD_DEFINITIONS",
            Fragment::CmdLoaders => "CMD_LOADERS",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Append-only text buffers, one per [`Fragment`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputBundle {
    buffers: [String; 15],
}

impl OutputBundle {
    pub fn get(&self, fragment: Fragment) -> &str {
        &self.buffers[fragment.index()]
    }

    pub fn buffer_mut(&mut self, fragment: Fragment) -> &mut String {
        &mut self.buffers[fragment.index()]
    }

    /// Token name to fragment text, for [`crate::template::substitute`].
    pub fn bindings(&self) -> BTreeMap<&'static str, &str> {
        Fragment::ALL.iter().map(|&fragment| (fragment.token(), self.get(fragment))).collect()
    }
}

/// Replaces a leading `from` prefix with `to`, e.g. `GL_ARB_sync` -> `GREG_ARB_sync`.
pub fn gen_boolean_name(name: &str, from: &str, to: &str) -> String {
    match name.strip_prefix(from) {
        Some(rest) => format!("{}{}", to, rest),
        None => name.to_string(),
    }
}

/// Generates the function pointer typedef name of a command.
///
/// Example results: `"PFNGLCLEARPROC"`, `"PFNGLBINDBUFFERPROC"`.
pub fn gen_typedef_name(cmd: &str) -> String {
    format!("PFN{}PROC", cmd.to_uppercase())
}
