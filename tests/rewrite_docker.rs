//! Integration tests against a real container runtime.
//!
//! These require a running Docker daemon and network access, and are marked
//! `#[ignore]`. Run with: `cargo test -- --ignored`

use draky_entrypoint::runtime::{self, CliRuntime, Instruction};
use draky_entrypoint::service::{self, AddonContext};

const IMAGE: &str = "nginx:1.27-alpine";

#[test]
#[ignore]
fn daemon_is_reachable() {
    let rt = CliRuntime::default();
    runtime::ensure_daemon(&rt).expect("docker daemon should be running");
}

#[test]
#[ignore]
fn nginx_history_yields_entrypoint_and_cmd() {
    let rt = CliRuntime::default();
    runtime::ensure_image(&rt, IMAGE).expect("image should be pullable");

    let entrypoint = runtime::extract(&rt, IMAGE, Instruction::Entrypoint);
    let cmd = runtime::extract(&rt, IMAGE, Instruction::Cmd);

    assert_eq!(entrypoint, vec!["/docker-entrypoint.sh"]);
    assert_eq!(cmd, vec!["nginx", "-g", "daemon off;"]);
}

#[test]
#[ignore]
fn unknown_image_is_unavailable() {
    let rt = CliRuntime::default();
    let err = runtime::ensure_image(&rt, "draky-entrypoint/does-not-exist:never").unwrap_err();
    assert_eq!(err.image(), "draky-entrypoint/does-not-exist:never");
}

#[test]
#[ignore]
fn rewrites_real_service() {
    let rt = CliRuntime::default();
    let mut svc: serde_yaml::Mapping =
        serde_yaml::from_str(&format!("image: {IMAGE}\n")).unwrap();

    let rewritten =
        service::rewrite(&mut svc, &AddonContext::new("addons/ep"), |raw| raw.to_string(), &rt)
            .unwrap();

    assert!(rewritten);
    let entrypoint = svc.get("entrypoint").and_then(|v| v.as_sequence()).unwrap();
    assert_eq!(entrypoint[0].as_str(), Some("/draky-entrypoint.sh"));
}
