use tracing::debug;

use super::ModelParts;

const PITCH_MARKINGS: &[&str] = &[
    "Crease",
    "creaseline_1",
    "bowl_crease_1",
    "pop_crease_1",
    "prot_area_11",
    "prot_area_12",
    "prot_area_13",
    "prot_area_14",
    "stump_1",
    "Stump01",
    "Stump02",
    "Stump03",
    "stumpstrike1",
    "stumpstrike2",
    "wide_line_11",
    "wide_line_12",
    "creaseline_2",
    "bowl_crease_2",
    "pop_crease_2",
    "prot_area_21",
    "prot_area_22",
    "prot_area_23",
    "prot_area_24",
    "ret_crease_21",
    "ret_crease_22",
    "stump_2",
    "Stump04",
    "Stump05",
    "Stump06",
    "stumpstrike004",
    "stumpstrike005",
    "wide_line_21",
    "wide_line_22",
    "boundary_crease",
    "outer_ground",
    "Light",
    "ret_crease_11",
    "ret_crease_12",
];

const STADIUM_SURROUNDINGS: &[&str] = &[
    "stadium",
    "boundary board",
    "boundary board.002",
    "boundary board.003",
    "boundary board.004",
    "boundary board.005",
    "boundary board.006",
    "boundary board.007",
    "boundary board.008",
    "boundary board.009",
    "boundary board.010",
    "boundary_crease",
    "outer_ground",
    "pitch",
];

/// Visibility preset that isolates the pitch markings from the stadium.
///
/// With the overlay on, `show` parts are made visible and `hide` parts
/// hidden (hiding wins for names in both lists). With it off, every listed
/// part is visible.
#[derive(Debug, Clone)]
pub struct PitchOverlay {
    show: Vec<String>,
    hide: Vec<String>,
}

impl PitchOverlay {
    /// Creates an overlay from explicit part lists.
    #[must_use]
    pub fn new(show: Vec<String>, hide: Vec<String>) -> Self {
        Self { show, hide }
    }

    /// Parts shown when the overlay is on.
    #[must_use]
    pub fn show_list(&self) -> &[String] {
        &self.show
    }

    /// Parts hidden when the overlay is on.
    #[must_use]
    pub fn hide_list(&self) -> &[String] {
        &self.hide
    }

    /// Applies the preset, returning how many parts were touched.
    pub fn apply<M: ModelParts + ?Sized>(&self, model: &mut M, show_pitch: bool) -> usize {
        let shown: usize = self
            .show
            .iter()
            .map(|name| model.set_part_visibility(name, true))
            .sum();
        let toggled: usize = self
            .hide
            .iter()
            .map(|name| model.set_part_visibility(name, !show_pitch))
            .sum();
        debug!(show_pitch, parts = shown + toggled, "pitch overlay applied");
        shown + toggled
    }
}

impl Default for PitchOverlay {
    fn default() -> Self {
        Self {
            show: PITCH_MARKINGS.iter().map(|s| (*s).to_owned()).collect(),
            hide: STADIUM_SURROUNDINGS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PartTable;

    fn table() -> PartTable {
        PartTable::with_parts(["Crease", "stadium", "pitch", "outer_ground"])
    }

    #[test]
    fn overlay_on_hides_surroundings() {
        let mut model = table();
        PitchOverlay::default().apply(&mut model, true);
        assert_eq!(model.is_visible("Crease"), Some(true));
        assert_eq!(model.is_visible("stadium"), Some(false));
        assert_eq!(model.is_visible("pitch"), Some(false));
        // listed in both: hidden
        assert_eq!(model.is_visible("outer_ground"), Some(false));
    }

    #[test]
    fn overlay_off_shows_everything() {
        let mut model = table();
        let overlay = PitchOverlay::default();
        overlay.apply(&mut model, true);
        overlay.apply(&mut model, false);
        for name in ["Crease", "stadium", "pitch", "outer_ground"] {
            assert_eq!(model.is_visible(name), Some(true));
        }
    }

    #[test]
    fn counts_matched_parts() {
        let mut model = table();
        let touched = PitchOverlay::default().apply(&mut model, true);
        // Crease + outer_ground from the show list, stadium + outer_ground + pitch from hide
        assert_eq!(touched, 5);
    }
}
