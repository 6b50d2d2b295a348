//! Layout constants — wall thickness, zone shares, room weights, names.
//!
//! Plain `f64`/`&str` constants with no dependencies, shared by the composer,
//! the allocator and the render plan.

pub mod layout {
    /// Outer wall thickness, in feet, subtracted from every side of the plot.
    pub const WALL_THICKNESS: f64 = 0.75;
    /// The corridor is never shallower than this.
    pub const MIN_CORRIDOR_HEIGHT: f64 = 4.0;
    /// Corridor height as a fraction of interior height.
    pub const CORRIDOR_FRACTION: f64 = 0.08;
    /// Share of the non-corridor height given to the entrance-side zone.
    pub const BOTTOM_ZONE_SHARE: f64 = 0.48;
    /// Share of the non-corridor height given to the back-of-house zone.
    pub const TOP_ZONE_SHARE: f64 = 0.52;
    /// A zone with more rooms than this is split into two sub-rows.
    pub const MAX_ROW_ROOMS: usize = 3;
    /// Plot depth / plot width.
    pub const PLOT_ASPECT: f64 = 1.3;
    /// Geometric comparisons use this slack (placement rounds to 0.01).
    pub const EPSILON: f64 = 0.01;
}

pub mod weights {
    pub const LIVING: f64 = 3.5;
    pub const DINING: f64 = 2.0;
    pub const KITCHEN: f64 = 2.0;
    pub const MASTER_BEDROOM: f64 = 2.5;
    pub const BEDROOM: f64 = 2.0;
    pub const BATHROOM: f64 = 1.0;
    pub const GARAGE: f64 = 2.0;
    pub const STAIRCASE: f64 = 1.5;
    pub const TERRACE: f64 = 2.0;
    /// Balcony on a single-storey house.
    pub const BALCONY_SINGLE: f64 = 1.2;
    /// Balcony on an upper floor.
    pub const BALCONY_UPPER: f64 = 1.5;
    pub const EXTRA_SINGLE: f64 = 1.2;
    pub const EXTRA_GROUND: f64 = 1.0;
    pub const EXTRA_UPPER: f64 = 1.3;
}

pub mod names {
    pub const LIVING: &str = "Living Room";
    pub const DINING: &str = "Dining Room";
    pub const KITCHEN: &str = "Kitchen";
    pub const MASTER_BEDROOM: &str = "Master Bedroom";
    pub const ATTACHED_BATH: &str = "Attached Bath";
    pub const BATHROOM: &str = "Bathroom";
    pub const BALCONY: &str = "Balcony";
    pub const GARAGE: &str = "Garage";
    pub const STAIRCASE: &str = "Staircase";
    pub const TERRACE: &str = "Terrace";
    pub const CORRIDOR: &str = "Passage";

    /// Bedroom at 0-based position `index` across the whole house.
    pub fn bedroom(index: usize) -> String {
        if index == 0 {
            MASTER_BEDROOM.to_string()
        } else {
            format!("Bedroom {}", index + 1)
        }
    }

    /// Bathroom at 1-based position `number` across the whole house.
    pub fn numbered_bathroom(number: usize) -> String {
        format!("{} {}", BATHROOM, number)
    }
}
