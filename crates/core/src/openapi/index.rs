//! Operation walk: validates each path's verbs and feeds every operation
//! through naming, classification and method synthesis.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;

use super::imports::ensure_type_imports;
use super::ir::api::HttpMethod;
use super::method::synthesize;
use super::names::{NamingConvention, ResolvedName};
use super::params::classify;
use super::registry::{ServiceRegistry, get_or_create_service_class};
use super::spec::{ApiDescription, PathItem};

/// Outcome of one walk over a description.
#[derive(Debug)]
pub struct IndexedServices {
    /// Service modules in first-reference order.
    pub registry: ServiceRegistry,
    /// Number of operations turned into methods.
    pub operations: usize,
}

/// Walks the path table of a description.
#[derive(Debug)]
pub struct OperationIndex<'c, N> {
    config: &'c GeneratorConfig,
    naming: N,
}

impl<'c, N: NamingConvention> OperationIndex<'c, N> {
    /// Index using `naming` to resolve operation identifiers.
    pub fn new(config: &'c GeneratorConfig, naming: N) -> Self {
        Self { config, naming }
    }

    /// Process every operation of `description` in declaration order.
    ///
    /// A path declaring an unsupported verb aborts the whole walk before
    /// any of its operations is processed.
    pub fn run(&self, description: &ApiDescription) -> Result<IndexedServices, GenerateError> {
        let mut registry =
            ServiceRegistry::new(self.config.import_specifier(&self.config.configuration_module));
        let types_import = self.config.import_specifier(&self.config.types_module);
        let mut seen: HashSet<ResolvedName> = HashSet::new();
        let mut operations = 0;

        for (path, item) in &description.paths {
            let verbs = validate_verbs(path, item)?;

            for (verb, (verb_key, operation)) in verbs.into_iter().zip(&item.operations) {
                let name = self
                    .naming
                    .resolve(operation.operation_id.as_deref().unwrap_or_default());
                debug!(
                    path = path.as_str(),
                    verb = verb_key.as_str(),
                    service = name.service.as_str(),
                    method = name.method.as_str(),
                    "processing operation"
                );

                if !seen.insert(name.clone()) {
                    warn!(
                        path = path.as_str(),
                        service = name.service.as_str(),
                        method = name.method.as_str(),
                        "duplicate method name; both definitions are emitted"
                    );
                }

                let params = classify(operation, &item.parameters);
                let mut synthesized = synthesize(&name.method, path, verb, operation, &params);

                let module =
                    registry.get_or_create_module(&self.config.service_module_path(&name.service));
                get_or_create_service_class(module, &name.service);
                let renames =
                    ensure_type_imports(module, &types_import, &synthesized.referenced_types);
                if !renames.is_empty() {
                    debug!(?renames, service = name.service.as_str(), "aliased type imports");
                    synthesized.method.rename_type_refs(&renames);
                }
                get_or_create_service_class(module, &name.service)
                    .methods
                    .push(synthesized.method);

                operations += 1;
            }
        }

        Ok(IndexedServices {
            registry,
            operations,
        })
    }
}

/// Map every verb key of `item` to a supported method, or report all the
/// unsupported ones.
fn validate_verbs(path: &str, item: &PathItem) -> Result<Vec<HttpMethod>, GenerateError> {
    let mut methods = Vec::with_capacity(item.operations.len());
    let mut unknown = Vec::new();
    for verb in item.operations.keys() {
        match HttpMethod::from_verb(verb) {
            Some(method) => methods.push(method),
            None => unknown.push(verb.clone()),
        }
    }

    if unknown.is_empty() {
        Ok(methods)
    } else {
        Err(GenerateError::UnknownOperation {
            path: path.to_string(),
            verbs: unknown,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::openapi::ir::Emit;
    use crate::openapi::names::ControllerConvention;

    fn run(json: &str) -> Result<IndexedServices, GenerateError> {
        let description = ApiDescription::from_json(json).unwrap();
        OperationIndex::new(&GeneratorConfig::default(), ControllerConvention).run(&description)
    }

    #[test]
    fn test_unknown_verbs_are_all_reported() {
        let err = run(
            r#"{ "paths": { "/users": { "get": {}, "options": {}, "TRACE": {} } } }"#,
        )
        .unwrap_err();
        match err {
            GenerateError::UnknownOperation { path, verbs } => {
                assert_eq!(path, "/users");
                assert_eq!(verbs, ["options", "TRACE"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_same_service_shares_one_class() {
        let indexed = run(
            r#"{ "paths": {
                "/users": { "get": { "operationId": "UserController_list" } },
                "/teams": { "get": { "operationId": "TeamController_list" } },
                "/users/{id}": {
                    "delete": { "operationId": "UserController_remove" },
                    "put": { "operationId": "UserController_update" }
                }
            } }"#,
        )
        .unwrap();
        assert_eq!(indexed.operations, 4);

        let modules: Vec<_> = indexed.registry.into_modules().collect();
        let paths: Vec<_> = modules.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(paths, ["services/UserService.ts", "services/TeamService.ts"]);

        let users = &modules[0].1;
        assert_eq!(users.classes.len(), 1);
        let methods: Vec<_> = users.classes[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, ["list", "remove", "update"]);
    }

    #[test]
    fn test_duplicate_pairs_are_kept() {
        let indexed = run(
            r#"{ "paths": {
                "/a": { "get": { "operationId": "Weird" } },
                "/b": { "post": {} }
            } }"#,
        )
        .unwrap();
        let (path, module) = indexed.registry.into_modules().next().unwrap();
        assert_eq!(path, "services/Service.ts");
        let methods: Vec<_> = module.classes[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, ["unknownName", "unknownName"]);
    }

    #[test]
    fn test_type_imports_follow_configuration_import() {
        let indexed = run(
            r##"{ "paths": { "/users/{id}": { "get": {
                "operationId": "UserController_getUser",
                "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
                "responses": { "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/User" } } } } }
            } } } }"##,
        )
        .unwrap();
        let (_, module) = indexed.registry.into_modules().next().unwrap();
        let imports: Vec<_> = module
            .imports
            .iter()
            .map(|i| {
                let names: Vec<_> = i.names.iter().map(|n| n.local().to_string()).collect();
                (i.from.as_str(), names)
            })
            .collect();
        assert_eq!(
            imports,
            [
                ("../configuration", vec!["Configuration".to_string()]),
                ("../types", vec!["User".to_string()]),
            ]
        );
    }

    #[test]
    fn test_component_named_like_configuration_is_aliased() {
        let indexed = run(
            r##"{ "paths": { "/settings": { "put": {
                "operationId": "SettingsController_replace",
                "requestBody": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Configuration" } } } },
                "responses": { "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Configuration" } } } } }
            } } } }"##,
        )
        .unwrap();
        let (_, module) = indexed.registry.into_modules().next().unwrap();
        let text = module.emit();

        assert!(text.starts_with(concat!(
            "import type { Configuration } from '../configuration';\n",
            "import type { Configuration as TypesConfiguration } from '../types';\n",
        )));
        assert!(text.contains("constructor(private readonly configuration: Configuration) {}"));
        assert!(text.contains("'application/json'?: TypesConfiguration }"));
        assert!(text.contains("return adapter<TypesConfiguration>({"));
    }
}
