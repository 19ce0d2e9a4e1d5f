//! Generation-scoped cache of service modules and their classes.

use indexmap::IndexMap;
use tracing::debug;

use super::imports::ensure_type_imports;
use super::ir::types::{TsClass, TsModule, TsParam, TsType};

/// Name of the shared configuration type every service depends on.
pub const CONFIGURATION_TYPE: &str = "Configuration";
/// Constructor parameter holding the configuration.
pub const CONFIGURATION_PARAM: &str = "configuration";

/// Service modules keyed by file path, in first-reference order.
///
/// Lives for exactly one generation pass; the pipeline owns it and hands
/// out mutable references, so repeated lookups always reach the same
/// module and class.
#[derive(Debug)]
pub struct ServiceRegistry {
    configuration_import: String,
    modules: IndexMap<String, TsModule>,
}

impl ServiceRegistry {
    /// Empty registry whose modules import `Configuration` from
    /// `configuration_import`.
    pub fn new(configuration_import: impl Into<String>) -> Self {
        Self {
            configuration_import: configuration_import.into(),
            modules: IndexMap::new(),
        }
    }

    /// Module stored at `path`, created with the configuration import on
    /// first use.
    pub fn get_or_create_module(&mut self, path: &str) -> &mut TsModule {
        let configuration_import = &self.configuration_import;
        self.modules.entry(path.to_string()).or_insert_with(|| {
            debug!(path, "created service module");
            let mut module = TsModule::default();
            ensure_type_imports(
                &mut module,
                configuration_import,
                &[CONFIGURATION_TYPE.to_string()],
            );
            module
        })
    }

    /// Number of modules created so far.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no module has been created yet.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Consume the registry, yielding `(path, module)` in creation order.
    pub fn into_modules(self) -> impl Iterator<Item = (String, TsModule)> {
        self.modules.into_iter()
    }
}

/// Class named `service_name` in `module`, created with a private
/// `configuration: Configuration` constructor parameter on first use.
pub fn get_or_create_service_class<'m>(module: &'m mut TsModule, service_name: &str) -> &'m mut TsClass {
    let index = match module.classes.iter().position(|class| class.name == service_name) {
        Some(index) => index,
        None => {
            debug!(service = service_name, "created service class");
            module.classes.push(TsClass {
                name: service_name.to_string(),
                ctor_params: vec![TsParam {
                    name: CONFIGURATION_PARAM.to_string(),
                    ty: Some(TsType::Ref(CONFIGURATION_TYPE.to_string())),
                    optional: false,
                }],
                methods: Vec::new(),
            });
            module.classes.len() - 1
        }
    };
    &mut module.classes[index]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::openapi::ir::Emit;
    use crate::openapi::ir::types::TsMethod;

    fn method(name: &str) -> TsMethod {
        TsMethod {
            name: name.into(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    #[test]
    fn test_module_is_seeded_once() {
        let mut registry = ServiceRegistry::new("../configuration");
        registry.get_or_create_module("services/UserService.ts");
        let module = registry.get_or_create_module("services/UserService.ts");

        assert_eq!(module.imports.len(), 1);
        assert_eq!(
            module.imports[0].emit(),
            "import type { Configuration } from '../configuration';\n"
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_class_lookup_returns_same_artifact() {
        let mut registry = ServiceRegistry::new("../configuration");
        let module = registry.get_or_create_module("services/UserService.ts");
        get_or_create_service_class(module, "UserService")
            .methods
            .push(method("getUser"));
        get_or_create_service_class(module, "UserService")
            .methods
            .push(method("listUsers"));

        assert_eq!(module.classes.len(), 1);
        let names: Vec<_> = module.classes[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["getUser", "listUsers"]);
    }

    #[test]
    fn test_class_has_private_configuration_ctor() {
        let mut module = TsModule::default();
        let class = get_or_create_service_class(&mut module, "UserService");
        assert_eq!(
            class.emit(),
            "export class UserService {\n  constructor(private readonly configuration: Configuration) {}\n}\n"
        );
    }

    #[test]
    fn test_modules_keep_creation_order() {
        let mut registry = ServiceRegistry::new("./configuration");
        registry.get_or_create_module("b.ts");
        registry.get_or_create_module("a.ts");
        registry.get_or_create_module("b.ts");

        let paths: Vec<_> = registry.into_modules().map(|(path, _)| path).collect();
        assert_eq!(paths, ["b.ts", "a.ts"]);
    }
}
