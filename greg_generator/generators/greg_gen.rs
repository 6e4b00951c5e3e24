////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::fmt::{self, Write};

use super::{gen_boolean_name, gen_typedef_name, Fragment, OutputBundle};
use crate::{
    manifest::{command_name, type_api, type_name, Manifest},
    registry::Registry,
    text::{extract_proto_text, extract_type_text, format_params},
    target::Target,
};

/// Generates the fragments of the C `greg.h`/`greg.c` loader.
///
/// Version and extension flags become `GREG_*` ints, commands become
/// `greg_*` function pointers loaded through `gregGetProcAddress`.
#[derive(Clone, Debug)]
pub struct GregGenerator {
    /// Prefix of registry feature and extension names.
    pub api_prefix: &'static str,
    /// Replacement prefix for the generated flag variables.
    pub flag_prefix: &'static str,
    /// Prefix of the generated function pointer variables.
    pub pointer_prefix: &'static str,
}

impl Default for GregGenerator {
    fn default() -> GregGenerator {
        GregGenerator { api_prefix: "GL_", flag_prefix: "GREG_", pointer_prefix: "greg_" }
    }
}

impl super::Generator for GregGenerator {
    fn write(&self, registry: &Registry, manifest: &Manifest, target: &Target, dest: &mut OutputBundle) -> fmt::Result {
        write_extension_flags(self, manifest, dest)?;
        write_version_flags(self, manifest, dest)?;
        write_types(registry, manifest, target, dest)?;
        write_enums(registry, manifest, dest)?;
        write_commands(self, registry, manifest, dest)?;
        Ok(())
    }
}

/// Creates the `GREG_<extension>` flag for every accepted extension, set by
/// `gregExtensionSupported` at load time.
fn write_extension_flags(gen: &GregGenerator, manifest: &Manifest, dest: &mut OutputBundle) -> fmt::Result {
    for extension in &manifest.extensions {
        let flag = gen_boolean_name(extension, gen.api_prefix, gen.flag_prefix);

        writeln!(dest.buffer_mut(Fragment::ExtMacros), "#define {} 1", extension)?;
        writeln!(dest.buffer_mut(Fragment::ExtDeclarations), "extern int {};", flag)?;
        writeln!(dest.buffer_mut(Fragment::ExtDefinitions), "GREGDEF int {} = 0;", flag)?;
        writeln!(
            dest.buffer_mut(Fragment::ExtLoaders),
            "  {flag} = gregExtensionSupported(\"{name}\");",
            flag = flag,
            name = extension
        )?;
    }

    Ok(())
}

/// Creates the `GREG_VERSION_<x>_<y>` flag for every accepted feature.
fn write_version_flags(gen: &GregGenerator, manifest: &Manifest, dest: &mut OutputBundle) -> fmt::Result {
    for feature in &manifest.versions {
        let flag = gen_boolean_name(&feature.name, gen.api_prefix, gen.flag_prefix);

        writeln!(dest.buffer_mut(Fragment::VerMacros), "#define {} 1", feature.name)?;
        writeln!(dest.buffer_mut(Fragment::VerDeclarations), "extern int {};", flag)?;
        writeln!(dest.buffer_mut(Fragment::VerDefinitions), "GREGDEF int {} = 0;", flag)?;
        writeln!(
            dest.buffer_mut(Fragment::VerLoaders),
            "  {flag} = gregVersionSupported({major}, {minor});",
            flag = flag,
            major = feature.version.major,
            minor = feature.version.minor
        )?;
    }

    Ok(())
}

/// Copies the declaration text of every selected `<type>` of the target api.
fn write_types(registry: &Registry, manifest: &Manifest, target: &Target, dest: &mut OutputBundle) -> fmt::Result {
    let buffer = dest.buffer_mut(Fragment::TypeTypedefs);

    for ty in registry.select("/registry/types/type") {
        if !manifest.types.contains(type_name(ty)) || type_api(ty) != target.api.as_str() {
            continue;
        }

        writeln!(buffer, "{}", extract_type_text(ty))?;
    }

    Ok(())
}

/// Creates a `#define` for every selected `<enum>`.
fn write_enums(registry: &Registry, manifest: &Manifest, dest: &mut OutputBundle) -> fmt::Result {
    let buffer = dest.buffer_mut(Fragment::EnumDefinitions);

    for enm in registry.select("/registry/enums/enum") {
        let name = enm.attr("name").unwrap_or("");
        if !manifest.enums.contains(name) {
            continue;
        }

        writeln!(buffer, "#define {} {}", name, enm.attr("value").unwrap_or(""))?;
    }

    Ok(())
}

/// Creates the typedef, pointer variable, redirecting macro and loader line of every selected
/// `<command>`.
fn write_commands(gen: &GregGenerator, registry: &Registry, manifest: &Manifest, dest: &mut OutputBundle) -> fmt::Result {
    for cmd in registry.select("/registry/commands/command") {
        let name = command_name(cmd);
        if !manifest.commands.contains(name) {
            continue;
        }

        let typedef = gen_typedef_name(name);
        let pointer = format!("{}{}", gen.pointer_prefix, name);
        let ret = cmd.child("proto").map(extract_proto_text).unwrap_or_default();

        writeln!(
            dest.buffer_mut(Fragment::CmdTypedefs),
            "typedef {ret} ({apientry} *{typedef})({params});",
            ret = ret,
            apientry = crate::text::APIENTRY,
            typedef = typedef,
            params = format_params(cmd)
        )?;
        writeln!(dest.buffer_mut(Fragment::CmdDeclarations), "extern {} {};", typedef, pointer)?;
        writeln!(dest.buffer_mut(Fragment::CmdMacros), "#define {} {}", name, pointer)?;
        writeln!(dest.buffer_mut(Fragment::CmdDefinitions), "GREGDEF {} {} = NULL;", typedef, pointer)?;
        writeln!(
            dest.buffer_mut(Fragment::CmdLoaders),
            "  {pointer} = ({typedef}) gregGetProcAddress(\"{name}\");",
            pointer = pointer,
            typedef = typedef,
            name = name
        )?;
    }

    Ok(())
}
