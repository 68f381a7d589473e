use crate::scenario::{PLANT_COUNT, Plant, ProductMix};

/// Slack below which a plant counts as fully used.
///
/// A reporting threshold in hours, independent of the input magnitudes.
pub const BINDING_TOLERANCE: f64 = 0.001;

/// How much of one plant's capacity an optimal plan uses.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantUtilisation {
    pub label: String,
    pub capacity: f64,
    pub time_used: f64,
    /// Always exactly `capacity - time_used`
    pub slack: f64,
    pub binding: bool,
}

impl PlantUtilisation {
    fn of(plant: &Plant, doors: f64, windows: f64) -> Self {
        let time_used = plant.time_used(doors, windows);
        let slack = plant.capacity - time_used;

        Self {
            label: plant.label.clone(),
            capacity: plant.capacity,
            time_used,
            slack,
            binding: slack.abs() < BINDING_TOLERANCE,
        }
    }
}

/// Per-plant utilisation of producing `doors` and `windows`, in plant order.
pub fn analyse(mix: &ProductMix, doors: f64, windows: f64) -> [PlantUtilisation; PLANT_COUNT] {
    mix.plants
        .each_ref()
        .map(|plant| PlantUtilisation::of(plant, doors, windows))
}
