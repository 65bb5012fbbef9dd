use std::{env, sync::LazyLock};

use url::Url;
use webauthn_rs::{Webauthn, WebauthnBuilder};

pub(super) static ORIGIN: LazyLock<String> =
    LazyLock::new(|| std::env::var("ORIGIN").expect("ORIGIN must be set"));

pub(super) static PASSKEY_RP_ID: LazyLock<String> = LazyLock::new(|| {
    env::var("PASSKEY_RP_ID").ok().unwrap_or_else(|| {
        ORIGIN
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .split(':')
            .next()
            .map(|s| s.to_string())
            .expect("Could not extract RP ID from ORIGIN")
    })
});

pub(super) static PASSKEY_RP_NAME: LazyLock<String> =
    LazyLock::new(|| env::var("PASSKEY_RP_NAME").ok().unwrap_or(ORIGIN.clone()));

/// The configured relying party. All ceremony cryptography is delegated here;
/// this crate only persists state and credentials around it.
pub(super) static WEBAUTHN: LazyLock<Webauthn> = LazyLock::new(|| {
    let rp_origin = Url::parse(ORIGIN.as_str()).expect("ORIGIN must be a valid URL");

    WebauthnBuilder::new(PASSKEY_RP_ID.as_str(), &rp_origin)
        .expect("Invalid relying party configuration")
        .rp_name(PASSKEY_RP_NAME.as_str())
        .build()
        .expect("Failed to build WebAuthn instance")
});
