use std::collections::BTreeMap;

use crate::component::{Component, UserActivity};
use crate::constants::{CHECKOUT_MEMORY_BOOST, SECONDARY_WEIGHT, SPILLOVER_THRESHOLD};
use crate::phase::Phase;

/// Weight per registry member. Weights need not sum to 1.
pub type ComponentMap = BTreeMap<Component, f64>;

/// Broadcast weights for an `all`-targeted field in the given phase, as
/// `[neural, memory, security, commerce, prompt, integration]`.
fn broadcast_weights(phase: Phase) -> [f64; 6] {
    match phase {
        Phase::TraumaCore => [1.2, 1.0, 1.3, 0.8, 1.0, 1.1],
        Phase::RollingVirus => [1.0, 1.2, 1.1, 0.7, 0.9, 1.3],
        _ => [1.0; 6],
    }
}

/// Weight of every component relative to the primary `target`.
pub fn component_map(
    target: Component,
    t: f64,
    phase: Phase,
    activity: UserActivity,
) -> ComponentMap {
    if target == Component::All {
        let weights = broadcast_weights(phase);
        let mut map = ComponentMap::new();
        map.insert(Component::All, 1.0);
        for (c, w) in Component::ALL[1..].iter().zip(weights) {
            map.insert(*c, w);
        }
        return map;
    }

    // Above the spillover threshold secondary components are drawn in
    // linearly, reaching 1.0 at full trauma.
    let secondary = if t > SPILLOVER_THRESHOLD {
        0.8 + 0.2 * (t - SPILLOVER_THRESHOLD) / (1.0 - SPILLOVER_THRESHOLD)
    } else {
        SECONDARY_WEIGHT
    };

    let mut map: ComponentMap = Component::ALL
        .into_iter()
        .map(|c| (c, if c == target { 1.0 } else { secondary }))
        .collect();

    if activity == UserActivity::Checkout
        && target == Component::CommerceIntegration
        && let Some(w) = map.get_mut(&Component::MemoryVessel)
    {
        *w = (*w + CHECKOUT_MEMORY_BOOST).min(1.0);
    }

    map
}
