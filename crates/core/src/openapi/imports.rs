//! Type-only import bookkeeping for generated modules.

use super::ir::types::{ImportName, TsImport, TsModule};

/// A name that is visible under a different local identifier.
pub type Rename = (String, String);

/// Make every name in `names` importable from `from` inside `module`.
///
/// Names already imported from `from` are reused. New names extend the
/// existing import for that source when there is one; otherwise a single
/// new import declaration is appended. A name whose identifier is already
/// bound in the module (imported from another source, or a class) is
/// imported under an alias prefixed with the source module's name.
///
/// Returns `(name, local)` for every requested name visible under an
/// alias; references to `name` must be rewritten to `local`.
pub fn ensure_type_imports(module: &mut TsModule, from: &str, names: &[String]) -> Vec<Rename> {
    let mut renames: Vec<Rename> = Vec::new();
    if names.is_empty() {
        return renames;
    }

    let index = match module.imports.iter().position(|import| import.from == from) {
        Some(index) => index,
        None => {
            module.imports.push(TsImport {
                names: Vec::with_capacity(names.len()),
                from: from.to_string(),
            });
            module.imports.len() - 1
        }
    };

    for name in names {
        let existing = module.imports[index]
            .names
            .iter()
            .find(|imported| imported.name == *name)
            .map(|imported| imported.local().to_string());

        let local = match existing {
            Some(local) => local,
            None => {
                let alias = is_bound(module, name).then(|| free_alias(module, from, name));
                let imported = ImportName {
                    name: name.clone(),
                    alias,
                };
                let local = imported.local().to_string();
                module.imports[index].names.push(imported);
                local
            }
        };

        if local != *name && !renames.iter().any(|(seen, _)| seen == name) {
            renames.push((name.clone(), local));
        }
    }

    renames
}

fn is_bound(module: &TsModule, ident: &str) -> bool {
    module
        .imports
        .iter()
        .flat_map(|import| &import.names)
        .any(|imported| imported.local() == ident)
        || module.classes.iter().any(|class| class.name == ident)
}

/// `../types` + `Configuration` -> `TypesConfiguration`, numbered when that
/// is taken too.
fn free_alias(module: &TsModule, from: &str, name: &str) -> String {
    let stem = from
        .rsplit('/')
        .find(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .unwrap_or_default();
    let mut prefix = String::with_capacity(stem.len());
    let mut upper = true;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            if upper {
                prefix.extend(c.to_uppercase());
            } else {
                prefix.push(c);
            }
            upper = false;
        } else {
            upper = true;
        }
    }

    let base = format!("{prefix}{name}");
    let mut alias = base.clone();
    let mut counter = 2;
    while is_bound(module, &alias) {
        alias = format!("{base}{counter}");
        counter += 1;
    }
    alias
}
