/* Emitters - turn compiled descriptors into files */

use anyhow::{Context, Result};
use solgen_gen::{ContractDescriptor, Lang};
use std::path::{Path, PathBuf};

/* Output stage of `solgen run`. Rendering to host source text plugs in
 * here; the built-in emitter writes the descriptor itself. */
pub trait Emitter {
  /* File extension of the emitted artifacts, without the dot */
  fn extension(&self) -> &'static str;

  fn render(&self, contract: &ContractDescriptor) -> Result<String>;

  /* Writes one contract below `out_dir` and returns the file written */
  fn emit(
    &self,
    out_dir: &Path,
    lang: Lang,
    name: &str,
    contract: &ContractDescriptor,
  ) -> Result<PathBuf> {
    let path = output_path(out_dir, lang, name, self.extension())?;
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let text = self.render(contract)?;
    std::fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
  }
}

/* Writes the descriptor as JSON */
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter {
  pub pretty: bool,
}

impl Emitter for JsonEmitter {
  fn extension(&self) -> &'static str {
    "json"
  }

  fn render(&self, contract: &ContractDescriptor) -> Result<String> {
    let text = if self.pretty {
      serde_json::to_string_pretty(contract)?
    } else {
      serde_json::to_string(contract)?
    };
    Ok(text)
  }
}

/* `<out>/<lang>/<snake_case(name)>.<ext>`, always inside `out_dir` */
pub fn output_path(out_dir: &Path, lang: Lang, name: &str, extension: &str) -> Result<PathBuf> {
  let stem = to_snake_case(name);
  if stem.is_empty() {
    anyhow::bail!("contract name '{name}' has no usable file name");
  }
  Ok(out_dir.join(lang.as_str()).join(format!("{stem}.{extension}")))
}

/* `ERC20Token` -> `erc20_token`, `getHTTPStatus` -> `get_http_status`.
 * Anything that is not a letter, digit or `_` separates words, so path
 * separators never reach the file name. */
pub fn to_snake_case(name: &str) -> String {
  let chars: Vec<char> = name.chars().collect();
  let mut out = String::with_capacity(name.len() + 4);
  for (idx, &ch) in chars.iter().enumerate() {
    if !ch.is_alphanumeric() && ch != '_' {
      if !out.ends_with('_') && !out.is_empty() {
        out.push('_');
      }
      continue;
    }
    if ch.is_uppercase() && idx > 0 {
      let prev = chars[idx - 1];
      let next_is_lower = chars.get(idx + 1).is_some_and(|c| c.is_lowercase());
      let starts_word = prev.is_lowercase()
        || prev.is_ascii_digit()
        || (prev.is_uppercase() && next_is_lower);
      if starts_word && !out.ends_with('_') {
        out.push('_');
      }
    }
    out.extend(ch.to_lowercase());
  }
  out
}
