//! Shared builders for engine tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{fractal, page_of};
//!
//! api.expect_fetch_page().returning(|_, _| Ok(page_of(0, 3)));
//! ```

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use flakerank_domain::{
    AuthorizedPrincipals, ChannelId, Fractal, InteractionId, MessageId, PrincipalId,
};
use flakerank_shared::{Card, ComponentInteraction, RenderedEntry};

use crate::infrastructure::clock::ManualClock;

pub const OWNER: PrincipalId = PrincipalId::new(111);
pub const MOD_ROLE: PrincipalId = PrincipalId::new(222);
pub const STRANGER: PrincipalId = PrincipalId::new(333);
pub const CHANNEL: ChannelId = ChannelId::new(700);
pub const MESSAGE: MessageId = MessageId::new(800);
pub const INTERACTION: InteractionId = InteractionId::new(900);

/// Fixed start time so expiry tests are deterministic.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(epoch()))
}

pub fn owners() -> AuthorizedPrincipals {
    AuthorizedPrincipals::new([OWNER, MOD_ROLE])
}

/// A fractal ranked at zero-based position `rank`.
pub fn fractal(rank: u64) -> Fractal {
    Fractal {
        id: rank,
        name: format!("fractal {rank}"),
        uri: Some(format!("https://fractals.example/{rank}")),
        image: Some(format!("https://img.fractals.example/{rank}.png")),
        faction: "tri".to_string(),
        power: 10.0,
        purity: 20.0,
        velocity: 30.0,
        spin: 40.0,
        altitude: 50.0,
        perc_power: 0.1,
        perc_purity: 0.2,
        perc_velocity: 0.3,
        perc_spin: 0.4,
        perc_altitude: 0.5,
        for_sale: 0,
        price_sol: None,
        marketplace: None,
        owner: Some(format!("owner-{rank}")),
    }
}

/// `len` consecutive fractals starting at rank `first`.
pub fn page_of(first: u64, len: u64) -> Vec<Fractal> {
    (first..first + len).map(fractal).collect()
}

/// Minimal rendered entry, for tests that do not care about card layout.
pub fn entry(title: &str) -> RenderedEntry {
    RenderedEntry::new(Card::new(title))
}

pub fn press(custom_id: impl Into<String>, user_id: PrincipalId, role_ids: Vec<PrincipalId>) -> ComponentInteraction {
    ComponentInteraction {
        interaction_id: INTERACTION,
        message_id: MESSAGE,
        channel_id: CHANNEL,
        user_id,
        role_ids,
        custom_id: custom_id.into(),
    }
}

/// Serve `router` on an ephemeral local port for adapter tests. Returns the
/// base URL.
pub async fn serve_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}
