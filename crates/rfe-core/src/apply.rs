//! Applies a computed field onto an arbitrary JSON state tree.
//!
//! The caller's tree is never touched: the result is an enriched deep copy.
//! Component-specific enrichment only fires when the relevant substructure
//! is present, and only rewrites numeric fields that already hold numbers.

use serde_json::{Map, Value, json};

use crate::component::Component;
use crate::field::ResonanceField;

/// Key under which the raw field summary is attached.
pub const RESONANCE_KEY: &str = "__resonance";

type Object = Map<String, Value>;

fn number(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

fn scale(obj: &mut Object, key: &str, factor: f64) {
    if let Some(v) = number(obj, key) {
        obj.insert(key.to_string(), json!(v * factor));
    }
}

fn nudge(obj: &mut Object, key: &str, delta: f64) {
    if let Some(v) = number(obj, key) {
        obj.insert(key.to_string(), json!(v + delta));
    }
}

fn child<'a>(root: &'a mut Object, key: &str) -> Option<&'a mut Object> {
    root.get_mut(key).and_then(Value::as_object_mut)
}

fn summary(field: &ResonanceField) -> Value {
    let weights: Object = field
        .component_map
        .iter()
        .map(|(c, w)| (c.name().to_string(), json!(w)))
        .collect();
    json!({
        "vector": { "x": field.x, "y": field.y, "z": field.z },
        "strength": field.strength,
        "coherence": field.coherence,
        "timestamp": field.meta.timestamp,
        "componentMap": weights,
    })
}

/// Return a copy of `data` enriched with `field`.
///
/// Non-object roots are returned as an unchanged copy.
pub fn apply_resonance_to_component(field: &ResonanceField, data: &Value) -> Value {
    let mut out = data.clone();
    let Some(root) = out.as_object_mut() else {
        tracing::debug!("resonance target is not a JSON object, returning copy unchanged");
        return out;
    };
    root.insert(RESONANCE_KEY.to_string(), summary(field));

    let ResonanceField {
        x,
        y,
        z,
        strength,
        coherence,
        ..
    } = *field;

    match field.component {
        Component::MemoryVessel => {
            if let Some(fragment) = child(root, "fragment") {
                scale(fragment, "crystallizationProbability", strength);
                scale(fragment, "stability", coherence);
                fragment.insert(
                    "emotionalSignature".to_string(),
                    json!({ "traumaLevel": z, "oscillation": { "x": x, "y": y } }),
                );
            }
        }
        Component::PromptEngine => {
            if let Some(context) = child(root, "context") {
                let oscillation = 2.0 * (x - 0.5).hypot(y - 0.5);
                context.insert("disruptionFactor".to_string(), json!(z * strength));
                context.insert(
                    "claritySuppression".to_string(),
                    json!(1.0 - coherence * 0.8),
                );
                context.insert(
                    "emotionalTone".to_string(),
                    json!({ "intensity": z, "oscillation": oscillation, "coherence": coherence }),
                );
            }
        }
        Component::SecurityTrauma => {
            if let Some(state) = child(root, "securityState") {
                let pressure = z * strength;
                nudge(state, "threatPerception", pressure * 0.5);
                let alert = number(state, "alertLevel").map_or(pressure, |a| a.max(pressure));
                state.insert("alertLevel".to_string(), json!(alert));
                scale(state, "falsePositiveRate", 2.0 - coherence);
            }
        }
        Component::NeuralArchitecture => {
            if let Some(state) = child(root, "neuralState") {
                state.insert(
                    "processingBias".to_string(),
                    json!({
                        "x": (x - 0.5) * strength * 2.0,
                        "y": (y - 0.5) * strength * 2.0,
                    }),
                );
                scale(state, "processingSpeedModifier", 1.0 - z * strength * 0.3);
                scale(state, "stabilityFactor", coherence);
            }
        }
        Component::CommerceIntegration => {
            if let Some(state) = child(root, "commerceState") {
                scale(state, "riskTolerance", 1.0 - z * 0.4);
                state.insert(
                    "focusDirection".to_string(),
                    json!({
                        "acquisition": 0.5 + (x - 0.5) * strength,
                        "retention": 0.5 + (y - 0.5) * strength,
                    }),
                );
                scale(state, "urgencyFactor", 1.0 + z * strength * 0.5);
            }
        }
        Component::All | Component::IntegrationLayer => {}
    }

    out
}
