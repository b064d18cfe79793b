//! Fractal -> card rendering.

use chrono::{DateTime, Utc};

use flakerank_domain::Fractal;
use flakerank_shared::{Card, RenderedEntry};

/// Render one fractal as a browsable entry.
///
/// `label` is the weight list or search term the result belongs to.
pub fn render_fractal(fractal: &Fractal, label: &str, now: DateTime<Utc>) -> RenderedEntry {
    let mut card = Card::new(title_case(&fractal.name))
        .with_description(format!("Result #{} for {}:", fractal.id + 1, label))
        .with_url(fractal.uri.clone())
        .with_color(fractal.faction_kind().color())
        .with_image(fractal.image.clone())
        .with_timestamp(now)
        .add_field("Faction", fractal.faction.clone(), true)
        .add_field("Power", stat(fractal.power, fractal.perc_power), true)
        .add_field("Purity", stat(fractal.purity, fractal.perc_purity), true)
        .add_field("Velocity", stat(fractal.velocity, fractal.perc_velocity), true)
        .add_field("Spin", stat(fractal.spin, fractal.perc_spin), true)
        .add_field("Altitude", stat(fractal.altitude, fractal.perc_altitude), true);

    if fractal.is_for_sale() {
        card = card.add_field("Sale", sale_line(fractal), false);
    }

    let owner = fractal.owner.as_deref().unwrap_or("unknown");
    RenderedEntry::new(card.with_footer(format!("Owner: {owner}")))
}

fn stat(value: f64, percentile: f64) -> String {
    format!("{} ({:.1}th percentile)", decimal(value), percentile * 100.0)
}

/// Shortest round-trip form that always keeps a fractional part: `3.0`, `2.5`.
fn decimal(value: f64) -> String {
    format!("{value:?}")
}

fn sale_line(fractal: &Fractal) -> String {
    let marketplace = fractal
        .marketplace
        .as_deref()
        .map(title_case)
        .unwrap_or_else(|| "an unknown marketplace".to_string());
    match fractal.price_sol {
        Some(price) => format!(
            "This fractal is on sale for {} SOL on {marketplace}.",
            decimal(price)
        ),
        None => format!("This fractal is on sale on {marketplace}."),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
