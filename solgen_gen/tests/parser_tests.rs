/* Contract compilation tests
 *
 * Every test goes through load_contract so the JSON reader, the parser and
 * the binder are exercised together.
 */

use solgen_gen::{load_contract, BindError, Customs, Lang};

const TOKEN_ABI: &str = r#"[
  {"type":"constructor","inputs":[{"name":"","type":"uint256"},{"name":"symbol","type":"string"}],"stateMutability":"nonpayable"},
  {"type":"function","name":"balanceOf","stateMutability":"view",
   "inputs":[{"name":"owner","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
  {"type":"function","name":"transfer","stateMutability":"nonpayable",
   "inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}]},
  {"type":"function","name":"transfer","stateMutability":"nonpayable",
   "inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"},{"name":"data","type":"bytes"}],"outputs":[{"name":"","type":"bool"}]},
  {"type":"function","name":"approve","stateMutability":"nonpayable",
   "inputs":[{"name":"spender","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}]},
  {"type":"function","name":"totals","stateMutability":"pure",
   "inputs":[],"outputs":[{"name":"supply","type":"uint256"},{"name":"holders","type":"uint64"}]},
  {"type":"event","name":"Transfer","anonymous":false,"inputs":[
    {"name":"from","type":"address","indexed":true},
    {"name":"to","type":"address","indexed":true},
    {"name":"value","type":"uint256","indexed":false}]},
  {"type":"event","name":"Debug","anonymous":true,"inputs":[{"name":"note","type":"string","indexed":false}]}
]"#;

const ORDER_ABI: &str = r#"[
  {"type":"function","name":"place","stateMutability":"nonpayable",
   "inputs":[{"name":"order","type":"tuple","internalType":"struct Book.Order",
              "components":[{"name":"price","type":"uint256"},{"name":"maker","type":"address"}]}],
   "outputs":[]},
  {"type":"function","name":"batch","stateMutability":"nonpayable",
   "inputs":[{"name":"orders","type":"tuple[]","internalType":"struct Book.Order[]",
              "components":[{"name":"price","type":"uint256"},{"name":"maker","type":"address"}]}],
   "outputs":[]},
  {"type":"function","name":"best","stateMutability":"view","inputs":[],
   "outputs":[{"name":"","type":"tuple","internalType":"struct Book.Order",
               "components":[{"name":"price","type":"uint256"},{"name":"maker","type":"address"}]}]}
]"#;

const ORDER_SIGNATURE: &str = "BookOrder(uint256,address)";

fn token_customs() -> Customs {
    Customs::expose_all(["balanceOf", "transfer", "transfer0", "totals"])
}

fn order_customs() -> Customs {
    Customs::expose_all(["place", "batch", "best"])
}

#[test]
fn get_value_is_a_call() {
    let abi = r#"[{"constant":true,"inputs":[],"name":"getValue","outputs":[{"name":"","type":"uint256"}],"type":"function"}]"#;
    let customs = Customs::default().expose("getValue");

    let contract = load_contract(abi, &customs, Lang::Go).expect("compile");
    let get_value = contract.call("getValue").expect("getValue is a call");
    assert_eq!(get_value.normalized.name, "GetValue");
    assert_eq!(get_value.normalized.outputs.len(), 1);
    assert_eq!(get_value.normalized.outputs[0].bound_type, "*big.Int");
    assert!(get_value.normalized.constant);
    assert!(!get_value.structured);
    assert!(contract.transacts.is_empty());
}

#[test]
fn allow_list_filters_methods() {
    let contract = load_contract(TOKEN_ABI, &token_customs(), Lang::Go).expect("compile");

    let calls: Vec<&str> = contract.calls.keys().map(String::as_str).collect();
    let transacts: Vec<&str> = contract.transacts.keys().map(String::as_str).collect();
    assert_eq!(calls, vec!["balanceOf", "totals"]);
    assert_eq!(transacts, vec!["transfer", "transfer0"]);
    assert!(contract.transact("approve").is_none());
}

#[test]
fn empty_allow_list_keeps_events_only() {
    let contract = load_contract(TOKEN_ABI, &Customs::default(), Lang::Go).expect("compile");
    assert!(contract.calls.is_empty());
    assert!(contract.transacts.is_empty());
    assert_eq!(contract.events.len(), 1);
}

#[test]
fn calls_and_transacts_follow_mutability() {
    let contract = load_contract(TOKEN_ABI, &token_customs(), Lang::Go).expect("compile");
    assert!(contract.calls.values().all(|m| m.original.is_constant()));
    assert!(contract.transacts.values().all(|m| !m.original.is_constant()));
}

#[test]
fn compilation_is_deterministic() {
    let first = load_contract(ORDER_ABI, &order_customs(), Lang::Go).expect("compile");
    let second = load_contract(ORDER_ABI, &order_customs(), Lang::Go).expect("compile");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&second).expect("json")
    );
}

#[test]
fn transfer_event_binds_topics() {
    let contract = load_contract(TOKEN_ABI, &token_customs(), Lang::Go).expect("compile");
    let transfer = contract.event("Transfer").expect("Transfer event");

    assert_eq!(transfer.normalized.name, "Transfer");
    assert_eq!(transfer.normalized.signature, "Transfer(address,address,uint256)");

    let indexed: Vec<&str> = transfer.normalized.indexed().map(|a| a.name.as_str()).collect();
    assert_eq!(indexed, vec!["from", "to"]);
    assert!(transfer
        .normalized
        .indexed()
        .all(|a| a.topic_type.as_deref() == Some("common.Address")));

    let data: Vec<_> = transfer.normalized.data().collect();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].bound_type, "*big.Int");
    assert!(data[0].topic_type.is_none());
}

#[test]
fn anonymous_events_are_dropped() {
    let contract = load_contract(TOKEN_ABI, &token_customs(), Lang::Go).expect("compile");
    assert!(contract.event("Debug").is_none());
}

#[test]
fn indexed_reference_types_are_hashed() {
    let abi = r#"[{"type":"event","name":"Named","inputs":[
        {"name":"label","type":"string","indexed":true},
        {"name":"ids","type":"uint256[]","indexed":true},
        {"name":"who","type":"address","indexed":true}]}]"#;

    let go = load_contract(abi, &Customs::default(), Lang::Go).expect("compile");
    let topics: Vec<&str> = go.events["Named"]
        .normalized
        .indexed()
        .filter_map(|a| a.topic_type.as_deref())
        .collect();
    assert_eq!(topics, vec!["common.Hash", "common.Hash", "common.Address"]);

    let java = load_contract(abi, &Customs::default(), Lang::Java).expect("compile");
    let topics: Vec<&str> = java.events["Named"]
        .normalized
        .indexed()
        .filter_map(|a| a.topic_type.as_deref())
        .collect();
    assert_eq!(topics, vec!["Hash", "Hash", "Address"]);
}

#[test]
fn shared_tuple_is_one_struct() {
    let contract = load_contract(ORDER_ABI, &order_customs(), Lang::Go).expect("compile");

    assert_eq!(contract.structs.len(), 1);
    let order = &contract.structs[ORDER_SIGNATURE];
    assert_eq!(order.name, "BookOrder");
    let fields: Vec<(&str, &str)> = order
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.bound_type.as_str()))
        .collect();
    assert_eq!(fields, vec![("Price", "*big.Int"), ("Maker", "common.Address")]);

    assert_eq!(contract.transacts["place"].normalized.inputs[0].bound_type, "BookOrder");
    assert_eq!(contract.transacts["batch"].normalized.inputs[0].bound_type, "[]BookOrder");
    assert_eq!(contract.calls["best"].normalized.outputs[0].bound_type, "BookOrder");
}

#[test]
fn struct_rename_reaches_every_use() {
    let customs = order_customs().rename_struct(ORDER_SIGNATURE, "Order");
    let contract = load_contract(ORDER_ABI, &customs, Lang::Go).expect("compile");

    assert_eq!(contract.structs[ORDER_SIGNATURE].name, "Order");
    assert_eq!(contract.transacts["place"].normalized.inputs[0].bound_type, "Order");
    assert_eq!(contract.transacts["batch"].normalized.inputs[0].bound_type, "[]Order");
    assert!(contract.struct_named("BookOrder").is_none());
}

#[test]
fn java_rejects_struct_arguments() {
    let err = load_contract(ORDER_ABI, &order_customs(), Lang::Java).expect_err("java has no structs");
    match err {
        BindError::UnsupportedLanguageFeature { lang, count, .. } => {
            assert_eq!(lang, Lang::Java);
            assert_eq!(count, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn java_accepts_tuple_free_contracts() {
    let contract = load_contract(TOKEN_ABI, &token_customs(), Lang::Java).expect("compile");
    let balance = &contract.calls["balanceOf"].normalized;
    assert_eq!(balance.name, "balanceOf");
    assert_eq!(balance.inputs[0].bound_type, "Address");
    assert_eq!(balance.outputs[0].bound_type, "BigInt");
    assert_eq!(contract.calls["totals"].normalized.outputs[1].bound_type, "BigInt");
}

#[test]
fn unnamed_inputs_fall_back_to_position() {
    let abi = r#"[{"type":"function","name":"sam","stateMutability":"pure","inputs":[
        {"name":"","type":"bytes"},{"name":"flag","type":"bool"},{"name":"","type":"uint256[]"}],"outputs":[]}]"#;
    let contract = load_contract(abi, &Customs::default().expose("sam"), Lang::Go).expect("compile");

    let names: Vec<&str> = contract.calls["sam"]
        .normalized
        .inputs
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["arg0", "flag", "arg2"]);
    /* Originals keep what the ABI declared */
    assert_eq!(contract.calls["sam"].original.inputs[0].name, "");
}

#[test]
fn named_outputs_are_structured() {
    let contract = load_contract(TOKEN_ABI, &token_customs(), Lang::Go).expect("compile");
    let totals = &contract.calls["totals"];
    assert!(totals.structured);
    let outputs: Vec<(&str, &str)> = totals
        .normalized
        .outputs
        .iter()
        .map(|a| (a.name.as_str(), a.bound_type.as_str()))
        .collect();
    assert_eq!(outputs, vec![("Supply", "*big.Int"), ("Holders", "uint64")]);
}

#[test]
fn overloads_are_separate_members() {
    let contract = load_contract(TOKEN_ABI, &token_customs(), Lang::Go).expect("compile");
    let plain = &contract.transacts["transfer"].normalized;
    let with_data = &contract.transacts["transfer0"].normalized;

    assert_eq!(plain.name, "Transfer");
    assert_eq!(with_data.name, "Transfer0");
    assert_eq!(plain.signature, "transfer(address,uint256)");
    assert_eq!(with_data.signature, "transfer(address,uint256,bytes)");
}

#[test]
fn aliases_rename_members() {
    let customs = token_customs().alias("transfer0", "transferAndCall");
    let contract = load_contract(TOKEN_ABI, &customs, Lang::Go).expect("compile");
    assert_eq!(contract.transacts["transfer0"].normalized.name, "TransferAndCall");
}

#[test]
fn colliding_alias_is_rejected() {
    let customs = token_customs().alias("transfer0", "transfer");
    let err = load_contract(TOKEN_ABI, &customs, Lang::Go).expect_err("collision");
    match err {
        BindError::DuplicateIdentifier { kind, normalized, .. } => {
            assert_eq!(kind, "transact");
            assert_eq!(normalized, "Transfer");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn calls_and_transacts_have_separate_namespaces() {
    let abi = r#"[
      {"type":"function","name":"value","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint8"}]},
      {"type":"function","name":"set","stateMutability":"nonpayable","inputs":[{"name":"v","type":"uint8"}],"outputs":[]}]"#;
    let customs = Customs::expose_all(["value", "set"]).alias("set", "value");
    let contract = load_contract(abi, &customs, Lang::Go).expect("compile");
    assert_eq!(contract.calls["value"].normalized.name, "Value");
    assert_eq!(contract.transacts["set"].normalized.name, "Value");
}

#[test]
fn reserved_words_fall_back_to_position() {
    let abi = r#"[{"type":"function","name":"configure","stateMutability":"nonpayable","inputs":[
        {"name":"range","type":"uint8"},{"name":"new","type":"bool"}],"outputs":[]}]"#;
    let customs = Customs::default().expose("configure");

    let go = load_contract(abi, &customs, Lang::Go).expect("compile");
    let names: Vec<&str> = go.transacts["configure"].normalized.inputs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["arg0", "new"]);

    let java = load_contract(abi, &customs, Lang::Java).expect("compile");
    let names: Vec<&str> = java.transacts["configure"].normalized.inputs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["range", "arg1"]);
}

#[test]
fn nested_structs_are_ordered_by_dependency() {
    let abi = r#"[{"type":"function","name":"f","stateMutability":"nonpayable","outputs":[],"inputs":[
      {"name":"s","type":"tuple","internalType":"struct Test.S","components":[
        {"name":"a","type":"uint256"},
        {"name":"c","type":"tuple[]","internalType":"struct Test.T[]","components":[
          {"name":"x","type":"uint256"},{"name":"y","type":"uint256"}]}]},
      {"name":"t","type":"tuple","internalType":"struct Test.T","components":[
        {"name":"x","type":"uint256"},{"name":"y","type":"uint256"}]}]}]"#;
    let contract = load_contract(abi, &Customs::default().expose("f"), Lang::Go).expect("compile");

    let names: Vec<&str> = contract.structs.values().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["TestT", "TestS"]);
    let outer = contract.struct_named("TestS").expect("TestS");
    assert_eq!(outer.fields[1].name, "C");
    assert_eq!(outer.fields[1].bound_type, "[]TestT");
}

#[test]
fn anonymous_tuples_get_generated_names() {
    let abi = r#"[{"type":"function","name":"pair","stateMutability":"view","inputs":[],"outputs":[
      {"name":"","type":"tuple","components":[{"name":"left","type":"int32"},{"name":"right","type":"int32"}]}]}]"#;
    let contract = load_contract(abi, &Customs::default().expose("pair"), Lang::Go).expect("compile");

    let pair = &contract.structs["(int32,int32)"];
    assert_eq!(pair.name, "Struct0");
    assert_eq!(contract.calls["pair"].normalized.outputs[0].bound_type, "Struct0");
}

#[test]
fn event_data_tuples_stay_inline() {
    let abi = r#"[{"type":"event","name":"Filled","inputs":[
        {"name":"id","type":"uint64","indexed":true},
        {"name":"fill","type":"tuple","indexed":false,"components":[
          {"name":"price","type":"uint256"},{"name":"size","type":"uint32"}]}]}]"#;

    let go = load_contract(abi, &Customs::default(), Lang::Go).expect("compile");
    assert!(go.structs.is_empty());
    let data: Vec<_> = go.events["Filled"].normalized.data().collect();
    assert_eq!(data[0].bound_type, "struct { Price *big.Int; Size uint32 }");

    let err = load_contract(abi, &Customs::default(), Lang::Java).expect_err("java tuple");
    match err {
        BindError::UnsupportedType { member, .. } => {
            assert_eq!(member.as_deref(), Some("event 'Filled'"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unsupported_types_name_the_member() {
    let abi = r#"[{"type":"function","name":"rate","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"fixed128x18"}]}]"#;
    let err = load_contract(abi, &Customs::default().expose("rate"), Lang::Go).expect_err("fixed");
    match err {
        BindError::UnsupportedType { lang, ty, member } => {
            assert_eq!(lang, Lang::Go);
            assert_eq!(ty, "fixed128x18");
            assert_eq!(member.as_deref(), Some("call 'rate'"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn constructor_inputs_are_normalized() {
    let contract = load_contract(TOKEN_ABI, &Customs::default(), Lang::Go).expect("compile");
    let constructor = contract.constructor.as_ref().expect("constructor");
    let inputs: Vec<(&str, &str)> = constructor
        .normalized
        .inputs
        .iter()
        .map(|a| (a.name.as_str(), a.bound_type.as_str()))
        .collect();
    assert_eq!(inputs, vec![("arg0", "*big.Int"), ("symbol", "string")]);
    assert_eq!(constructor.normalized.signature, "(uint256,string)");
}

#[test]
fn constructor_tuples_are_registered() {
    let abi = r#"[{"type":"constructor","stateMutability":"nonpayable","inputs":[
      {"name":"cfg","type":"tuple","internalType":"struct Config","components":[{"name":"owner","type":"address"}]}]}]"#;

    let go = load_contract(abi, &Customs::default(), Lang::Go).expect("compile");
    assert_eq!(go.constructor.expect("constructor").normalized.inputs[0].bound_type, "Config");

    let err = load_contract(abi, &Customs::default(), Lang::Java).expect_err("java");
    assert!(matches!(err, BindError::UnsupportedLanguageFeature { .. }));
}

#[test]
fn malformed_abi_is_reported() {
    let err = load_contract(r#"{"not":"an array"}"#, &Customs::default(), Lang::Go).expect_err("object");
    assert!(matches!(err, BindError::MalformedAbi(_)));

    let bad_type = r#"[{"type":"function","name":"f","inputs":[{"name":"x","type":"uint7"}],"outputs":[]}]"#;
    let err = load_contract(bad_type, &Customs::default(), Lang::Go).expect_err("bad type");
    assert!(matches!(err, BindError::MalformedAbi(_)));
}

#[test]
fn struct_fields_must_stay_distinct_once_cased() {
    let colliding = r#"[{"type":"function","name":"put","stateMutability":"nonpayable","outputs":[],"inputs":[
      {"name":"s","type":"tuple","internalType":"struct S","components":[
        {"name":"value","type":"uint256"},{"name":"_value","type":"uint256"}]}]}]"#;
    let err = load_contract(colliding, &Customs::default().expose("put"), Lang::Go).expect_err("collision");
    assert!(matches!(err, BindError::MalformedAbi(_)));
    assert!(err.to_string().contains("_value"));

    let underscored = r#"[{"type":"function","name":"put","stateMutability":"nonpayable","outputs":[],"inputs":[
      {"name":"s","type":"tuple","internalType":"struct S","components":[
        {"name":"value","type":"uint256"},{"name":"_","type":"bool"}]}]}]"#;
    let err = load_contract(underscored, &Customs::default().expose("put"), Lang::Go).expect_err("empty field");
    assert!(matches!(err, BindError::MalformedAbi(_)));
}

#[test]
fn event_data_tuples_are_checked_too() {
    let abi = r#"[{"type":"event","name":"Logged","inputs":[
        {"name":"entry","type":"tuple","indexed":false,"components":[
          {"name":"amount","type":"uint256"},{"name":"_amount","type":"uint256"}]}]}]"#;
    let err = load_contract(abi, &Customs::default(), Lang::Go).expect_err("collision");
    assert!(matches!(err, BindError::MalformedAbi(_)));
}

#[test]
fn legacy_constant_flag_makes_a_call() {
    let abi = r#"[{"type":"function","name":"peek","constant":true,"stateMutability":"nonpayable",
        "inputs":[],"outputs":[{"name":"","type":"uint8"}]}]"#;
    let contract = load_contract(abi, &Customs::default().expose("peek"), Lang::Go).expect("compile");
    assert!(contract.call("peek").is_some());
    assert!(contract.transacts.is_empty());
}
