////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Selection of the types, enums and commands a loader has to declare.
//!
//! Features are applied first, then extensions, each in document order. A
//! `<require>` inserts names and a `<remove>` erases them, so whichever
//! block is applied last wins.

use std::collections::BTreeSet;

use crate::{
    registry::{Element, Registry},
    target::{Target, Version},
};

/// An accepted `<feature>`, e.g. `GL_VERSION_3_3` at `3.3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureRecord {
    pub name: String,
    pub version: Version,
}

/// Non-fatal findings made while resolving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The extension exists but does not list the target's support token.
    UnsupportedExtension { name: String, token: &'static str },
    /// No `<extension>` element carries the requested name.
    UnknownExtension { name: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    pub versions: Vec<FeatureRecord>,
    pub extensions: Vec<String>,
    pub types: BTreeSet<String>,
    pub enums: BTreeSet<String>,
    pub commands: BTreeSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Which configurations a `<remove>` block applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveScope<'a> {
    /// No `profile` attribute: applies whenever a profile is selected.
    Unconditional,
    ScopedTo(&'a str),
}

impl<'a> RemoveScope<'a> {
    pub fn of(remove: &'a Element) -> RemoveScope<'a> {
        match remove.attr("profile") {
            Some(profile) => RemoveScope::ScopedTo(profile),
            None => RemoveScope::Unconditional,
        }
    }

    /// Whether the block is applied for the given target profile name.
    pub fn applies_to(self, profile: Option<&str>) -> bool {
        match (self, profile) {
            (_, None) => false,
            (RemoveScope::Unconditional, Some(_)) => true,
            (RemoveScope::ScopedTo(scope), Some(profile)) => scope == profile,
        }
    }
}

/// The `api` of a `<type>`; entries without one belong to desktop GL.
pub fn type_api(ty: &Element) -> &str {
    ty.attr("api").unwrap_or("gl")
}

/// The name of a `<type>`: its `name` attribute, or the text of its `<name>` child.
pub fn type_name(ty: &Element) -> &str {
    match ty.attr("name") {
        Some(name) => name,
        None => ty.child_text("name"),
    }
}

/// The function name in a `<command>`'s `<proto>`.
pub fn command_name(cmd: &Element) -> &str {
    cmd.child("proto").map(|proto| proto.child_text("name")).unwrap_or("")
}

impl Manifest {
    /// Computes the manifest for `target`.
    pub fn resolve(registry: &Registry, target: &Target) -> Manifest {
        let mut manifest = Manifest::default();
        let profile = target.profile.name();

        for feature in registry.select("/registry/feature") {
            if feature.attr("api") != Some(target.api.as_str()) {
                continue;
            }

            let number = feature.attr("number").unwrap_or("");
            let version = match number.parse::<Version>() {
                Ok(version) => version,
                Err(_) => {
                    warn!("Skipping feature {} with unparsable number `{}`", feature.attr("name").unwrap_or("?"), number);
                    continue;
                },
            };
            if version > target.version {
                continue;
            }

            manifest.apply(feature, profile);
            manifest.versions.push(FeatureRecord { name: feature.attr("name").unwrap_or("").to_string(), version });
        }

        let token = target.support_token();
        let mut seen = BTreeSet::new();

        for extension in registry.select("/registry/extensions/extension") {
            let name = extension.attr("name").unwrap_or("");
            if !target.extensions.contains(name) || !seen.insert(name) {
                continue;
            }

            let supported = extension.attr("supported").unwrap_or("").split('|').any(|api| api == token);
            if !supported {
                warn!("Excluding unsupported extension {}", name);
                manifest.diagnostics.push(Diagnostic::UnsupportedExtension { name: name.to_string(), token });
                continue;
            }

            manifest.apply(extension, profile);
            manifest.extensions.push(name.to_string());
        }

        for name in target.extensions.iter().filter(|name| !seen.contains(name.as_str())) {
            warn!("Requested extension {} is not in the registry", name);
            manifest.diagnostics.push(Diagnostic::UnknownExtension { name: name.clone() });
        }

        // parameter and return types are never listed in <require> blocks
        for cmd in registry.select("/registry/commands/command") {
            if !manifest.commands.contains(command_name(cmd)) {
                continue;
            }
            for part in cmd.elements().filter(|e| e.name == "param" || e.name == "proto") {
                if let Some(ptype) = part.child("ptype") {
                    manifest.types.insert(ptype.text().to_string());
                }
            }
        }

        for ty in registry.select("/registry/types/type[@requires]") {
            if manifest.types.contains(type_name(ty)) && type_api(ty) == target.api.as_str() {
                if let Some(requires) = ty.attr("requires") {
                    manifest.types.insert(requires.to_string());
                }
            }
        }

        debug!(
            "Resolved {} versions, {} extensions, {} types, {} enums, {} commands",
            manifest.versions.len(),
            manifest.extensions.len(),
            manifest.types.len(),
            manifest.enums.len(),
            manifest.commands.len()
        );

        manifest
    }

    /// Applies a `<feature>` or `<extension>`: every `<require>`, then the
    /// `<remove>` blocks whose scope matches the profile.
    fn apply(&mut self, element: &Element, profile: Option<&str>) {
        for require in element.children_named("require") {
            self.require(require);
        }

        for remove in element.children_named("remove") {
            if RemoveScope::of(remove).applies_to(profile) {
                self.remove(remove);
            }
        }
    }

    fn require(&mut self, block: &Element) {
        for (kind, name) in interface_names(block) {
            self.set_mut(kind).insert(name.to_string());
        }
    }

    fn remove(&mut self, block: &Element) {
        for (kind, name) in interface_names(block) {
            self.set_mut(kind).remove(name);
        }
    }

    fn set_mut(&mut self, kind: &str) -> &mut BTreeSet<String> {
        match kind {
            "type" => &mut self.types,
            "enum" => &mut self.enums,
            _ => &mut self.commands,
        }
    }
}

/// `(kind, name)` for every `<type>`, `<enum>` and `<command>` reference in a block.
fn interface_names(block: &Element) -> impl Iterator<Item = (&str, &str)> {
    block
        .elements()
        .filter(|child| matches!(child.name.as_str(), "type" | "enum" | "command"))
        .filter_map(|child| child.attr("name").map(|name| (child.name.as_str(), name)))
}
