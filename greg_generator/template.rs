////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! `@TOKEN@` placeholder substitution for loader templates.
//!
//! Every occurrence of a bound token is replaced in one left-to-right pass.
//! Inserted text is never scanned again, and tokens without a binding are
//! copied through untouched.

use std::{collections::BTreeMap, fs, path::Path};

use crate::error::{GeneratorError, Result};

/// The header template shipped with the generator.
pub const GREG_H: &str = include_str!("../templates/greg.h.in");
/// The implementation template shipped with the generator.
pub const GREG_C: &str = include_str!("../templates/greg.c.in");

const DELIMITER: char = '@';

/// Replaces each `@NAME@` whose `NAME` is a key of `bindings`.
pub fn substitute(template: &str, bindings: &BTreeMap<&str, &str>) -> String {
    let mut out = String::with_capacity(template.len() + bindings.values().map(|v| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find(DELIMITER) {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let bound = after
            .find(DELIMITER)
            .map(|end| &after[..end])
            .filter(|name| is_token_name(name))
            .and_then(|name| bindings.get(name).map(|text| (name, *text)));

        match bound {
            Some((name, text)) => {
                out.push_str(text);
                rest = &after[name.len() + 1..];
            },
            None => {
                // the closing delimiter may still open a real token
                out.push(DELIMITER);
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

/// Names of all well-formed tokens in `template`, in order of appearance.
///
/// Used to check templates against the fragments a generator can bind.
pub fn tokens(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(DELIMITER) {
        let after = &rest[start + 1..];
        match after.find(DELIMITER).map(|end| &after[..end]) {
            Some(name) if is_token_name(name) => {
                found.push(name);
                rest = &after[name.len() + 1..];
            },
            _ => rest = after,
        }
    }

    found
}

/// Reads a template file and substitutes `bindings` into it.
pub fn render_file(path: impl AsRef<Path>, bindings: &BTreeMap<&str, &str>) -> Result<String> {
    let path = path.as_ref();
    let template = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    Ok(substitute(&template, bindings))
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}
