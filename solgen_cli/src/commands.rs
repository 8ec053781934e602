/* Run and inspect commands */

use crate::config::RunSettings;
use crate::deployment::{load_deployments, load_options};
use crate::emit::Emitter;
use anyhow::{Context, Result};
use solgen_gen::{load_contract, load_contract_with, BindResult, ContractDescriptor, Customs, Lang};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/* Outcome of a `run`; per-contract failures land in `skipped` */
#[derive(Debug, Default)]
pub struct RunSummary {
  pub written: Vec<PathBuf>,
  pub skipped: Vec<SkippedContract>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedContract {
  pub name: String,
  pub reason: String,
}

/* Compiles one ABI. With `all_methods` every function is exposed regardless
 * of the allow-list; renames and aliases still apply. */
pub fn compile(
  raw_abi: &str,
  customs: &Customs,
  lang: Lang,
  all_methods: bool,
) -> BindResult<ContractDescriptor> {
  if all_methods {
    load_contract_with(raw_abi, lang, |document| customs.clone().expose_document(document))
  } else {
    load_contract(raw_abi, customs, lang)
  }
}

/* Execute the run command
 *
 * Unreadable deployment or option files abort the run. A contract that fails
 * to compile or to write is logged and skipped. */
pub fn run(settings: &RunSettings, all_methods: bool, emitter: &dyn Emitter) -> Result<RunSummary> {
  let deployments = load_deployments(&settings.deployment_path)?;
  let options = match &settings.option_path {
    Some(path) => load_options(path)?,
    None => BTreeMap::new(),
  };

  info!(
    contracts = deployments.len(),
    lang = %settings.language,
    out = %settings.output_path.display(),
    "compiling contracts"
  );

  let mut summary = RunSummary::default();
  for deployment in &deployments {
    let customs = match options.get(&deployment.name) {
      Some(customs) => customs.clone(),
      None => {
        if !all_methods {
          warn!(contract = %deployment.name, "no allow-list entry, no methods will be bound");
        }
        Customs::default()
      }
    };

    let outcome = compile(&deployment.abi, &customs, settings.language, all_methods)
      .map_err(anyhow::Error::from)
      .and_then(|contract| {
        debug!(
          contract = %deployment.name,
          calls = contract.calls.len(),
          transacts = contract.transacts.len(),
          events = contract.events.len(),
          structs = contract.structs.len(),
          "compiled"
        );
        emitter.emit(&settings.output_path, settings.language, &deployment.name, &contract)
      });

    match outcome {
      Ok(path) => {
        info!(contract = %deployment.name, path = %path.display(), "written");
        summary.written.push(path);
      }
      Err(err) => {
        error!(contract = %deployment.name, error = %format!("{err:#}"), "skipping contract");
        summary.skipped.push(SkippedContract {
          name: deployment.name.clone(),
          reason: format!("{err:#}"),
        });
      }
    }
  }

  info!(
    written = summary.written.len(),
    skipped = summary.skipped.len(),
    "done"
  );
  Ok(summary)
}

/* Execute the inspect command
 *
 * Compiles a single raw ABI file and returns the rendered descriptor. The
 * option file here is a single allow-list object. */
pub fn inspect(
  abi_path: &Path,
  lang: Lang,
  option_path: Option<&Path>,
  all_methods: bool,
  emitter: &dyn Emitter,
) -> Result<String> {
  let raw_abi = std::fs::read_to_string(abi_path)
    .with_context(|| format!("failed to read ABI file {}", abi_path.display()))?;
  let customs = match option_path {
    Some(path) => {
      let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read option file {}", path.display()))?;
      Customs::from_json(&text).with_context(|| format!("invalid option file {}", path.display()))?
    }
    None => Customs::default(),
  };

  let contract = compile(&raw_abi, &customs, lang, all_methods)
    .with_context(|| format!("failed to compile {}", abi_path.display()))?;
  emitter.render(&contract)
}
