use crate::customs::Customs;
use crate::descriptor::ContractDescriptor;
use crate::error::BindResult;
use crate::lang::Lang;
use crate::parser::parse_contract;
use solgen_types::AbiDocument;

/// Parses raw ABI JSON and compiles it into a descriptor carrying the
/// canonical ABI text.
pub fn load_contract(
    raw_abi: &str,
    customs: &Customs,
    lang: Lang,
) -> BindResult<ContractDescriptor> {
    load_contract_with(raw_abi, lang, |_| customs.clone())
}

/// Like [`load_contract`], but the allow-list is built from the parsed
/// document, e.g. `|doc| customs.clone().expose_document(doc)`.
pub fn load_contract_with<F>(
    raw_abi: &str,
    lang: Lang,
    customs: F,
) -> BindResult<ContractDescriptor>
where
    F: FnOnce(&AbiDocument) -> Customs,
{
    let document = AbiDocument::from_json(raw_abi)?;
    let customs = customs(&document);
    let mut contract = parse_contract(&document, &customs, lang)?;
    contract.input_abi = canonicalize_abi(raw_abi);
    Ok(contract)
}

/// Strips every whitespace character and escapes `"` as `\"`, producing text
/// that can be pasted into a double-quoted string literal.
pub fn canonicalize_abi(raw_abi: &str) -> String {
    let mut out = String::with_capacity(raw_abi.len());
    for ch in raw_abi.chars().filter(|ch| !ch.is_whitespace()) {
        if ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BindError;

    #[test]
    fn canonical_text_has_no_whitespace() {
        let raw = "[ {\"type\" :\t\"fallback\"}\n]";
        assert_eq!(canonicalize_abi(raw), r#"[{\"type\":\"fallback\"}]"#);
    }

    #[test]
    fn whitespace_inside_strings_is_removed_too() {
        assert_eq!(canonicalize_abi("\"a b\u{00a0}c\""), r#"\"abc\""#);
    }

    #[test]
    fn malformed_json_is_malformed_abi() {
        let err = load_contract("[{", &Customs::default(), Lang::Go).expect_err("malformed");
        assert!(matches!(err, BindError::MalformedAbi(_)));
    }

    #[test]
    fn customs_hook_sees_parsed_document() {
        let raw = r#"[{"type":"function","name":"ping","stateMutability":"pure","inputs":[],"outputs":[]}]"#;
        let expose_all = |doc: &AbiDocument| Customs::default().expose_document(doc);
        let contract = load_contract_with(raw, Lang::Go, expose_all).expect("load");
        assert!(contract.calls.contains_key("ping"));
        assert_eq!(contract.input_abi, canonicalize_abi(raw));
    }

    #[test]
    fn descriptor_carries_canonical_text() {
        let raw = "[\n  {\"type\": \"receive\", \"stateMutability\": \"payable\"}\n]";
        let contract = load_contract(raw, &Customs::default(), Lang::Java).expect("load");
        assert_eq!(contract.input_abi, canonicalize_abi(raw));
        assert!(contract.receive.is_some());
        assert!(contract.calls.is_empty());
    }
}
