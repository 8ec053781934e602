/* Contract parser - ABI document + allow-list -> binding IR
 *
 * The parse runs in phases:
 *   1. methods: filter by allow-list, normalize names, register tuples
 *   2. constructor: same treatment for its inputs
 *   3. events: skip anonymous ones, register tuples of indexed inputs only
 *   4. reject structs for languages that cannot carry them
 *   5. apply struct renames
 *   6. bind host types (after renames so tokens use final struct names)
 */

use crate::customs::Customs;
use crate::descriptor::{
    BoundArgument, BoundEvent, BoundField, BoundMethod, BoundStruct, ContractDescriptor,
    NormalizedEvent, NormalizedMethod,
};
use crate::error::{BindError, BindResult};
use crate::lang::{capitalise, Lang};
use crate::structs::{StructDef, StructRegistry, StructResolver};
use indexmap::IndexMap;
use solgen_types::{AbiDocument, Argument, Event, Method};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

/* Compiles one ABI document. Pure: the same inputs always give the same
 * descriptor. `input_abi` is left empty; the loader fills it in. */
pub fn parse_contract(
    document: &AbiDocument,
    customs: &Customs,
    lang: Lang,
) -> BindResult<ContractDescriptor> {
    ContractParser::new(customs, lang).parse(document)
}

/* Normalized copy of a member before types are bound */
struct Pending<T> {
    original: T,
    normalized: T,
}

struct ContractParser<'a> {
    customs: &'a Customs,
    lang: Lang,
    structs: StructRegistry,
    call_identifiers: HashSet<String>,
    transact_identifiers: HashSet<String>,
    event_identifiers: HashSet<String>,
}

impl<'a> ContractParser<'a> {
    fn new(customs: &'a Customs, lang: Lang) -> Self {
        Self {
            customs,
            lang,
            structs: StructRegistry::new(),
            call_identifiers: HashSet::new(),
            transact_identifiers: HashSet::new(),
            event_identifiers: HashSet::new(),
        }
    }

    fn parse(mut self, document: &AbiDocument) -> BindResult<ContractDescriptor> {
        /* Method phase */
        let mut calls = BTreeMap::new();
        let mut transacts = BTreeMap::new();
        for original in &document.methods {
            if !self.customs.is_exposed(&original.name) {
                continue;
            }
            let normalized = self.normalize_method(original)?;
            let identifier = normalized.name.clone();
            let (target, kind) = if original.is_constant() {
                (&mut calls, "call")
            } else {
                (&mut transacts, "transact")
            };
            insert_unique(
                target,
                kind,
                &original.name,
                Pending {
                    original: original.clone(),
                    normalized,
                },
            )?;
            self.claim_identifier(kind, &original.name, &identifier)?;
        }

        /* Constructor */
        let constructor = match &document.constructor {
            Some(original) => Some(Pending {
                original: original.clone(),
                normalized: self.normalize_constructor(original)?,
            }),
            None => None,
        };

        /* Event phase */
        let mut events = BTreeMap::new();
        for original in &document.events {
            /* Anonymous events have no signature topic to filter on */
            if original.anonymous {
                continue;
            }
            let normalized = self.normalize_event(original)?;
            let identifier = normalized.name.clone();
            insert_unique(
                &mut events,
                "event",
                &original.name,
                Pending {
                    original: original.clone(),
                    normalized,
                },
            )?;
            self.claim_identifier("event", &original.name, &identifier)?;
        }

        if !self.structs.is_empty() && !self.lang.supports_structs() {
            return Err(BindError::UnsupportedLanguageFeature {
                lang: self.lang,
                feature: "tuple arguments",
                count: self.structs.len(),
            });
        }

        self.structs.apply_renames(&self.customs.structs)?;

        /* Bind pass */
        let binder = Binder {
            lang: self.lang,
            structs: &self.structs,
        };
        let constructor = constructor
            .map(|pending| binder.bind_method(pending, "constructor"))
            .transpose()?;
        let calls = binder.bind_methods(calls, "call")?;
        let transacts = binder.bind_methods(transacts, "transact")?;
        let events = events
            .into_iter()
            .map(|(name, pending)| Ok((name, binder.bind_event(pending)?)))
            .collect::<BindResult<BTreeMap<_, _>>>()?;
        let structs = self
            .structs
            .iter()
            .map(|def| Ok((def.signature.clone(), binder.bind_struct(def)?)))
            .collect::<BindResult<IndexMap<_, _>>>()?;

        Ok(ContractDescriptor {
            constructor,
            fallback: document.fallback.clone(),
            receive: document.receive.clone(),
            calls,
            transacts,
            events,
            structs,
            input_abi: String::new(),
        })
    }

    fn normalize_method(&mut self, original: &Method) -> BindResult<Method> {
        let mut normalized = original.clone();
        normalized.name = self
            .lang
            .normalize_method(self.customs.aliased(&original.name));

        for (idx, input) in normalized.inputs.iter_mut().enumerate() {
            self.name_input(idx, input);
            self.register(input)?;
        }
        for output in normalized.outputs.iter_mut() {
            if !output.name.is_empty() {
                output.name = capitalise(&output.name);
            }
            self.register(output)?;
        }
        Ok(normalized)
    }

    fn normalize_constructor(&mut self, original: &Method) -> BindResult<Method> {
        let mut normalized = original.clone();
        for (idx, input) in normalized.inputs.iter_mut().enumerate() {
            self.name_input(idx, input);
            self.register(input)?;
        }
        Ok(normalized)
    }

    fn normalize_event(&mut self, original: &Event) -> BindResult<Event> {
        let mut normalized = original.clone();
        normalized.name = self
            .lang
            .normalize_method(self.customs.aliased(&original.name));

        /* Indexed fields are the filter inputs; non-indexed ones belong to the
         * decoded log body and are left as declared. */
        for (idx, input) in normalized.inputs.iter_mut().enumerate() {
            if input.indexed {
                self.name_input(idx, input);
                self.register(input)?;
            }
        }
        Ok(normalized)
    }

    fn name_input(&self, idx: usize, input: &mut Argument) {
        if input.name.is_empty() || self.lang.is_reserved(&input.name) {
            input.name = format!("arg{idx}");
        }
    }

    fn register(&mut self, arg: &Argument) -> BindResult<()> {
        if arg.ty.contains_tuple() {
            StructResolver::new(self.lang, &mut self.structs).resolve(&arg.ty)?;
        }
        Ok(())
    }

    fn claim_identifier(
        &mut self,
        kind: &'static str,
        name: &str,
        normalized: &str,
    ) -> BindResult<()> {
        let identifiers = match kind {
            "call" => &mut self.call_identifiers,
            "transact" => &mut self.transact_identifiers,
            _ => &mut self.event_identifiers,
        };
        if !identifiers.insert(normalized.to_string()) {
            return Err(BindError::DuplicateIdentifier {
                kind,
                name: name.to_string(),
                normalized: normalized.to_string(),
            });
        }
        Ok(())
    }
}

/* Keys by original name. Two members with one original name would silently
 * shadow each other, so that is an error instead. */
fn insert_unique<T>(
    target: &mut BTreeMap<String, T>,
    kind: &'static str,
    name: &str,
    value: T,
) -> BindResult<()> {
    match target.entry(name.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(_) => Err(BindError::DuplicateMember {
            kind,
            name: name.to_string(),
        }),
    }
}

/* Final pass: attach host types once struct names are settled */
struct Binder<'r> {
    lang: Lang,
    structs: &'r StructRegistry,
}

impl Binder<'_> {
    fn bind_methods(
        &self,
        methods: BTreeMap<String, Pending<Method>>,
        kind: &str,
    ) -> BindResult<BTreeMap<String, BoundMethod>> {
        methods
            .into_iter()
            .map(|(name, pending)| Ok((name, self.bind_method(pending, kind)?)))
            .collect()
    }

    fn bind_method(&self, pending: Pending<Method>, kind: &str) -> BindResult<BoundMethod> {
        let Pending { original, normalized } = pending;
        let member = format!("{kind} '{}'", original.name);
        let inputs = self.bind_arguments(&normalized.inputs, false, &member)?;
        let outputs = self.bind_arguments(&normalized.outputs, false, &member)?;

        Ok(BoundMethod {
            structured: structured(&original.outputs),
            normalized: NormalizedMethod {
                name: normalized.name,
                signature: original.signature(),
                inputs,
                outputs,
                constant: original.is_constant(),
                payable: original.is_payable(),
            },
            original,
        })
    }

    fn bind_event(&self, pending: Pending<Event>) -> BindResult<BoundEvent> {
        let Pending { original, normalized } = pending;
        let member = format!("event '{}'", original.name);
        let inputs = self.bind_arguments(&normalized.inputs, true, &member)?;

        Ok(BoundEvent {
            normalized: NormalizedEvent {
                name: normalized.name,
                signature: original.signature(),
                inputs,
            },
            original,
        })
    }

    fn bind_arguments(
        &self,
        args: &[Argument],
        topics: bool,
        member: &str,
    ) -> BindResult<Vec<BoundArgument>> {
        args.iter()
            .map(|arg| {
                let bound_type = self
                    .lang
                    .bind_type(&arg.ty, self.structs)
                    .map_err(|err| err.in_member(member))?;
                let topic_type = if topics && arg.indexed {
                    Some(
                        self.lang
                            .bind_topic_type(&arg.ty, self.structs)
                            .map_err(|err| err.in_member(member))?,
                    )
                } else {
                    None
                };
                Ok(BoundArgument {
                    name: arg.name.clone(),
                    ty: arg.ty.clone(),
                    bound_type,
                    indexed: arg.indexed,
                    topic_type,
                })
            })
            .collect()
    }

    fn bind_struct(&self, def: &StructDef) -> BindResult<BoundStruct> {
        let member = format!("struct '{}'", def.name);
        let fields = def
            .fields
            .iter()
            .map(|field| {
                Ok(BoundField {
                    name: field.name.clone(),
                    original_name: field.original_name.clone(),
                    ty: field.ty.clone(),
                    bound_type: self
                        .lang
                        .bind_type(&field.ty, self.structs)
                        .map_err(|err| err.in_member(&member))?,
                })
            })
            .collect::<BindResult<Vec<_>>>()?;

        Ok(BoundStruct {
            signature: def.signature.clone(),
            name: def.name.clone(),
            fields,
        })
    }
}

/* Outputs can be grouped into one record only if every one has a distinct,
 * non-empty exported name. */
fn structured(outputs: &[Argument]) -> bool {
    if outputs.len() < 2 {
        return false;
    }
    let mut seen = HashSet::with_capacity(outputs.len());
    for output in outputs {
        if output.name.is_empty() {
            return false;
        }
        let field = capitalise(&output.name);
        if field.is_empty() || !seen.insert(field) {
            return false;
        }
    }
    true
}
