use std::sync::LazyLock;

/// HMAC key for signing and verifying access tokens. No default; a missing
/// secret must fail loudly rather than fall back to a guessable value.
pub(super) static JWT_SECRET: LazyLock<String> =
    LazyLock::new(|| std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"));
