//! OpenSCAD script emission.

use pinbuilder_ramp::{Ramp, RampSettings, SweepCall};
use tracing::{debug, warn};

/// Library includes every script starts with.
pub const HEADERS: &[&str] = &["include <BOSL2/beziers.scad>", "include <BOSL2/std.scad>"];

/// Render the playfield script: the union of ramp bodies minus the union of
/// ramp cutters.
///
/// Ramps that fail validation or cannot be swept are left out with a
/// warning; the rest are still emitted.
pub fn render(ramps: &[Ramp], settings: &RampSettings) -> String {
    let mut bodies = Vec::new();
    let mut cutters = Vec::new();

    for ramp in ramps {
        match sweeps(ramp, settings) {
            Ok((body, cutter)) => {
                debug!(ramp = ramp.id(), points = body.path.len(), "emitting ramp");
                bodies.push(body);
                cutters.push(cutter);
            }
            Err(e) => warn!(ramp = ramp.id(), error = %e, "skipping ramp"),
        }
    }

    let mut script = HEADERS.join("\n");
    script.push_str("\n\ndifference() {\n");
    push_union(&mut script, &bodies);
    push_union(&mut script, &cutters);
    script.push_str("}\n");
    script
}

fn sweeps(ramp: &Ramp, settings: &RampSettings) -> pinbuilder_ramp::Result<(SweepCall, SweepCall)> {
    Ok((ramp.body(settings)?, ramp.cutter(settings)?))
}

fn push_union(script: &mut String, calls: &[SweepCall]) {
    script.push_str("  union() {\n");
    for call in calls {
        script.push_str("    ");
        script.push_str(&call.to_string());
        script.push('\n');
    }
    script.push_str("  }\n");
}
