use crate::{
    animation::ease::Ease,
    animation::segment::{ActiveRange, Segment},
    foundation::core::ElementId,
    foundation::error::{ScrollError, ScrollResult},
};

/// Shape of a "one line at a time" text narrative.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NarrativeOptions {
    /// Fraction of a line's slot spent on each fade, in `(0, 0.5]`.
    pub fade: f64,
    /// Fraction of a slot by which a line's fade-out runs into the next line's fade-in, in
    /// `[0, fade]`. With `0` the two meet exactly at the slot boundary.
    pub overlap: f64,
    /// Vertical travel in pixels: lines rise in from `+rise` and leave towards `-rise`.
    pub rise: f64,
    pub ease: Ease,
}

impl Default for NarrativeOptions {
    fn default() -> Self {
        Self {
            fade: 0.25,
            overlap: 0.0,
            rise: 40.0,
            ease: Ease::InOutQuad,
        }
    }
}

impl NarrativeOptions {
    pub fn validate(&self) -> ScrollResult<()> {
        if !(self.fade > 0.0 && self.fade <= 0.5) {
            return Err(ScrollError::configuration(
                "narrative fade must be within (0, 0.5]",
            ));
        }
        if !(self.overlap >= 0.0 && self.overlap <= self.fade) {
            return Err(ScrollError::configuration(
                "narrative overlap must be within [0, fade]",
            ));
        }
        if !self.rise.is_finite() {
            return Err(ScrollError::configuration("narrative rise must be finite"));
        }
        Ok(())
    }
}

// Shared by the outgoing and incoming side so boundaries compare bit-for-bit equal.
fn slot_edge(i: usize, n: usize) -> f64 {
    i as f64 / n as f64
}

/// Build the segment list for `lines`, each taking an equal slot of the timeline.
///
/// Every line fades in at the start of its slot; every line except the last fades out at the
/// end of its slot.
pub fn narrative_segments(lines: &[ElementId], opts: &NarrativeOptions) -> ScrollResult<Vec<Segment>> {
    if lines.is_empty() {
        return Err(ScrollError::configuration("narrative needs at least one line"));
    }
    opts.validate()?;

    let n = lines.len();
    let w = 1.0 / n as f64;
    let mut out = Vec::with_capacity(n * 4);

    for (i, line) in lines.iter().enumerate() {
        let start = slot_edge(i, n);
        let fade_in = ActiveRange::new(start, start + opts.fade * w);
        out.push(Segment::opacity(line.clone(), 0.0, 1.0, fade_in).with_ease(opts.ease));
        out.push(Segment::translate_y(line.clone(), opts.rise, 0.0, fade_in).with_ease(opts.ease));

        if i + 1 == n {
            continue;
        }
        let end = slot_edge(i + 1, n) + opts.overlap * w;
        let fade_out = ActiveRange::new(end - opts.fade * w, end);
        out.push(Segment::opacity(line.clone(), 1.0, 0.0, fade_out).with_ease(opts.ease));
        out.push(
            Segment::translate_y(line.clone(), 0.0, -opts.rise, fade_out).with_ease(opts.ease),
        );
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/narrative.rs"]
mod tests;
