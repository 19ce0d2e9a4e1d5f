#![allow(clippy::unwrap_used, clippy::expect_used)]

use svcgen_core::{GenerateError, GeneratedFile, GeneratorConfig, generate_from_str};

fn generate(description: &str) -> Vec<GeneratedFile> {
    generate_from_str(description, &GeneratorConfig::default()).unwrap()
}

fn module<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.contents.as_str())
        .unwrap_or_else(|| panic!("{path} was not generated"))
}

#[test]
fn user_controller_get_user() {
    let files = generate(
        r##"{
          "paths": {
            "/users/{id}": {
              "get": {
                "operationId": "UserController_getUser",
                "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
                "responses": { "200": { "description": "OK", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/User" } } } } }
              }
            }
          },
          "components": { "schemas": { "User": { "type": "object", "properties": { "id": { "type": "string" } }, "required": ["id"] } } }
        }"##,
    );

    assert_eq!(
        module(&files, "services/UserService.ts"),
        concat!(
            "import type { Configuration } from '../configuration';\n",
            "import type { User } from '../types';\n",
            "\n",
            "export class UserService {\n",
            "  constructor(private readonly configuration: Configuration) {}\n",
            "\n",
            "  getUser(props: { id: string }) {\n",
            "    const { baseUrl, adapter } = this.configuration;\n",
            "    const { id } = props;\n",
            "\n",
            "    return adapter<User>({ url: `${baseUrl}/users/${id}`, method: 'GET', queryParams: undefined, bodyArgs: undefined });\n",
            "  }\n",
            "}\n",
        )
    );
}

#[test]
fn malformed_operation_ids_fall_back() {
    let files = generate(
        r#"{ "paths": {
            "/weird": { "get": { "operationId": "Weird" } },
            "/nested": { "post": { "operationId": "A_B_C" } },
            "/anonymous": { "put": {} }
        } }"#,
    );

    let service = module(&files, "services/Service.ts");
    assert!(service.contains("export class Service {\n"));
    assert_eq!(service.matches("  unknownName() {\n").count(), 3);
    assert!(service.contains("method: 'GET'"));
    assert!(service.contains("method: 'POST'"));
    assert!(service.contains("method: 'PUT'"));
}

#[test]
fn suffixless_controller_keeps_its_name() {
    let files = generate(r#"{ "paths": { "/ping": { "get": { "operationId": "Health_ping" } } } }"#);
    assert!(module(&files, "services/Health.ts").contains("export class Health {\n"));
}

#[test]
fn unknown_verbs_abort_the_pass() {
    let err = generate_from_str(
        r#"{ "paths": {
            "/users": { "get": { "operationId": "UserController_list" } },
            "/users/{id}": { "options": {}, "get": {}, "trace": {} }
        } }"#,
        &GeneratorConfig::default(),
    )
    .unwrap_err();

    match &err {
        GenerateError::UnknownOperation { path, verbs } => {
            assert_eq!(path, "/users/{id}");
            assert_eq!(verbs, &["options", "trace"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Unknown operation(s) [options, trace] declared on path '/users/{id}'"
    );
}

#[test]
fn services_group_across_paths_in_encounter_order() {
    let files = generate(
        r#"{ "paths": {
            "/users": { "get": { "operationId": "UserController_list" } },
            "/teams": { "get": { "operationId": "TeamController_list" } },
            "/users/{id}": {
              "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
              "delete": { "operationId": "UserController_remove" }
            }
        } }"#,
    );

    let services: Vec<_> = files
        .iter()
        .map(|f| f.path.as_str())
        .filter(|p| p.starts_with("services/"))
        .collect();
    assert_eq!(services, ["services/UserService.ts", "services/TeamService.ts"]);

    let users = module(&files, "services/UserService.ts");
    assert_eq!(users.matches("export class UserService").count(), 1);
    let list = users.find("  list() {").unwrap();
    let remove = users.find("  remove(props: { id: string }) {").unwrap();
    assert!(list < remove);
}

#[test]
fn query_params_object_only_with_query_parameters() {
    let files = generate(
        r#"{ "paths": {
            "/search": { "get": {
              "operationId": "SearchController_search",
              "parameters": [
                { "name": "q", "in": "query", "required": true, "schema": { "type": "string" } },
                { "name": "page-size", "in": "query", "schema": { "type": "integer" } },
                { "name": "X-Tenant", "in": "header", "schema": { "type": "string" } }
              ]
            } },
            "/search/saved": { "get": {
              "operationId": "SearchController_saved",
              "parameters": [{ "name": "X-Tenant", "in": "header", "schema": { "type": "string" } }]
            } }
        } }"#,
    );

    let search = module(&files, "services/SearchService.ts");
    assert!(search.contains(
        "  search(props: { q: string; 'page-size'?: number; 'X-Tenant'?: string }) {\n"
    ));
    assert!(search.contains("queryParams: { q: props['q'], 'page-size': props['page-size'] }"));
    assert!(search.contains("  saved(props: { 'X-Tenant'?: string }) {\n"));
    assert!(search.contains("url: `${baseUrl}/search/saved`, method: 'GET', queryParams: undefined"));
}

#[test]
fn type_imports_are_deduplicated_per_module() {
    let files = generate(
        r##"{ "paths": {
            "/users": {
              "get": {
                "operationId": "UserController_list",
                "responses": { "200": { "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/User" } } } } } }
              },
              "post": {
                "operationId": "UserController_create",
                "requestBody": { "required": true, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NewUser" } } } },
                "responses": { "201": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/User" } } } } }
              }
            }
        } }"##,
    );

    let users = module(&files, "services/UserService.ts");
    assert_eq!(users.matches("from '../types';").count(), 1);
    assert!(users.contains("import type { User, NewUser } from '../types';\n"));
    assert!(users.contains("return adapter<User[]>("));
}

#[test]
fn yaml_descriptions_are_accepted() {
    let files = generate(
        r##"
openapi: 3.0.3
info:
  title: Orders
  version: 1.0.0
paths:
  /orders/{orderId}:
    put:
      operationId: OrderController_update
      parameters:
        - name: orderId
          in: path
          required: true
          schema:
            type: string
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Order'
      responses:
        200:
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Order'
components:
  schemas:
    Order:
      type: object
      properties:
        total:
          type: number
"##,
    );

    let orders = module(&files, "services/OrderService.ts");
    assert!(orders.contains("  update(props: { 'application/json'?: Order; orderId: string }) {\n"));
    assert!(orders.contains("    const { orderId } = props;\n"));
    assert!(orders.contains(
        "return adapter<Order>({ url: `${baseUrl}/orders/${orderId}`, method: 'PUT', queryParams: undefined, bodyArgs: props['application/json'] });"
    ));
    assert!(module(&files, "types.ts").contains("export interface Order {\n  total?: number;\n}\n"));
}

#[test]
fn configuration_module_declares_adapter_contract() {
    let files = generate(r#"{ "paths": {} }"#);
    let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, ["configuration.ts", "types.ts"]);

    let configuration = module(&files, "configuration.ts");
    assert!(configuration.contains("export type Adapter = <T>(request: RequestDescriptor) => Promise<T>;\n"));
    assert!(configuration.contains("export interface Configuration {\n  baseUrl: string;\n  adapter: Adapter;\n}\n"));
}
