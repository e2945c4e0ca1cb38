use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub hex: String,
    pub components: Vec<String>,
}

pub fn sha256_hex(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    hex::encode(h.finalize())
}

/// Computes a deterministic fingerprint for a judge configuration.
///
/// Two judges with the same fingerprint render the same prompts and talk to the same
/// client configuration, so their results are comparable.
pub fn compute(
    judge_name: &str,
    instructions: &str,
    provider: &str,
    client_fingerprint: Option<&str>,
    extra: &[(&str, String)],
) -> Fingerprint {
    let mut parts = vec![
        format!("judge={judge_name}"),
        format!("instructions_sha256={}", sha256_hex(instructions)),
        format!("provider={provider}"),
        format!("client={}", client_fingerprint.unwrap_or("")),
    ];

    let mut extra = extra.to_vec();
    extra.sort_by(|a, b| a.0.cmp(b.0));
    for (k, v) in extra {
        parts.push(format!("{k}={v}"));
    }

    // Prompt templates live in code, so a release may change them.
    parts.push(format!("arbiter_version={}", env!("CARGO_PKG_VERSION")));

    let raw = parts.join("\n");
    Fingerprint {
        hex: sha256_hex(&raw),
        components: parts,
    }
}
