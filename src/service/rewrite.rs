use serde_yaml::{Mapping, Value};
use tracing::info;

use super::types::{AddonContext, WRAPPER_PATH};
use crate::runtime::{self, ImageUnavailable, Instruction, Runner};

/// Rewrite one compose service so the addon's wrapper script runs first.
///
/// `entrypoint` becomes the wrapper followed by the image's own ENTRYPOINT,
/// `command` becomes the image's CMD, and the wrapper mount is appended to
/// `volumes`. Services without a string `image` are left untouched and
/// `Ok(false)` is returned.
///
/// Nothing is mutated before the image is known to be available, so an
/// [`ImageUnavailable`] leaves the service exactly as it was. Each call
/// appends another mount entry; run it once per service per assembly pass.
pub fn rewrite<F>(
    service: &mut Mapping,
    addon: &AddonContext,
    substitute: F,
    runner: &impl Runner,
) -> Result<bool, ImageUnavailable>
where
    F: Fn(&str) -> String,
{
    let Some(raw) = service.get("image").and_then(Value::as_str) else {
        return Ok(false);
    };
    let image = substitute(raw);

    runtime::ensure_image(runner, &image)?;

    let entrypoint = runtime::extract(runner, &image, Instruction::Entrypoint);
    let cmd = runtime::extract(runner, &image, Instruction::Cmd);

    let mut wrapped = Vec::with_capacity(entrypoint.len() + 1);
    wrapped.push(WRAPPER_PATH.to_string());
    wrapped.extend(entrypoint);

    // CMD must be redeclared whenever the entrypoint is overridden, or the
    // runtime drops the image default.
    service.insert("entrypoint".into(), string_seq(wrapped));
    service.insert("command".into(), string_seq(cmd));
    push_volume(service, addon.wrapper_volume());

    info!(%image, addon = %addon.dirpath, "service wrapped with entrypoint script");
    Ok(true)
}

fn string_seq(items: Vec<String>) -> Value {
    Value::Sequence(items.into_iter().map(Value::String).collect())
}

fn push_volume(service: &mut Mapping, volume: String) {
    let entry = service
        .entry("volumes".into())
        .or_insert_with(|| Value::Sequence(Vec::new()));
    match entry {
        Value::Sequence(seq) => seq.push(Value::String(volume)),
        Value::Null => *entry = string_seq(vec![volume]),
        other => {
            let prior = std::mem::replace(other, Value::Null);
            *other = Value::Sequence(vec![prior, Value::String(volume)]);
        }
    }
}
