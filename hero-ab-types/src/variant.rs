/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Closed vocabularies of the hero experiment.
//!
//! Capture stores whatever strings the browser sends. Aggregation only counts
//! what parses into these enums; anything else is skipped, never rejected.

use serde::{Deserialize, Serialize};

/// Experiment arm shown in the hero section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
    C,
}

impl Variant {
    /// Every arm, in the order the stats endpoint reports them.
    pub const ALL: [Variant; 3] = [Variant::A, Variant::B, Variant::C];

    /// Parse a stored variant label. Returns `None` for anything outside `{A,B,C}`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "A" => Some(Variant::A),
            "B" => Some(Variant::B),
            "C" => Some(Variant::C),
            _ => None,
        }
    }

    /// Position of this arm inside [`Variant::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Variant::A => 0,
            Variant::B => 1,
            Variant::C => 2,
        }
    }
}

/// Kind of interaction recorded by the capture endpoint.
///
/// Only aggregation reads this; capture stores the raw `event` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The visitor was shown a hero variant.
    VariantView,
    /// The visitor clicked a call-to-action in the hero.
    CtaClick,
}

impl EventKind {
    pub const VARIANT_VIEW: &'static str = "hero_variant_view";
    pub const CTA_CLICK: &'static str = "hero_cta_click";

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            Self::VARIANT_VIEW => Some(EventKind::VariantView),
            Self::CTA_CLICK => Some(EventKind::CtaClick),
            _ => None,
        }
    }
}
