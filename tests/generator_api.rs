use toolgen::annotation::Annotation;
use toolgen::generator;
use toolgen::schema;
use toolgen::signature::FunctionDecl;

#[test]
fn required_matches_declaration_order_for_primitive_functions() {
    let schema =
        generator::generate_from_source("def f(a: int, b: str, c: bool):\n    pass\n")
            .expect("schema");
    assert_eq!(schema.input_schema.required, ["a", "b", "c"]);
    let keys: Vec<&String> = schema.input_schema.properties.keys().collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn every_generated_schema_validates() {
    let sources = [
        "def f(a, b=1):\n    pass\n",
        "def g():\n    \"\"\"No parameters at all.\"\"\"\n    pass\n",
        "def h(x: Optional[int] = None, y: Union[str, None] = None):\n    pass\n",
        "def k(tags: List[str], meta: dict, blob: SomethingCustom):\n    pass\n",
    ];
    for source in sources {
        let tool = generator::generate_from_source(source).expect("schema");
        let value = serde_json::to_value(&tool).expect("serializes");
        assert!(schema::validate(&value), "schema failed for: {source}");
    }
}

#[test]
fn decl_path_is_infallible_and_validates() {
    let decl = FunctionDecl::new("lookup")
        .doc("Look up a record by key.")
        .required("key", Annotation::named("str"))
        .optional("limit", Annotation::named("int"))
        .optional("strange", Annotation::named("???"));
    let tool = generator::generate_from_decl(&decl);

    assert_eq!(tool.input_schema.required, ["key"]);
    assert_eq!(tool.input_schema.properties["strange"]["type"], "string");

    let value = serde_json::to_value(&tool).expect("serializes");
    assert!(schema::validate(&value));
}
