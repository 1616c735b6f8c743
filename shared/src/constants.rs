// Wheel timing
pub const SPIN_DURATION_MS: u32 = 4500; // Duration of spin animation in milliseconds
pub const MIN_EXTRA_ROTATIONS: u32 = 5; // Minimum number of full rotations
pub const MAX_EXTRA_ROTATIONS: u32 = 7; // Maximum number of full rotations (inclusive)

// Landing jitter as a fraction of one segment span, applied either side of the midpoint.
// 0.4 keeps every landing inside 80% of the half-span.
pub const JITTER_FRACTION: f64 = 0.4;

pub const FULL_TURN_DEGREES: f64 = 360.0;

// Segment 0 starts at 12 o'clock, where the pointer is drawn
pub const POINTER_OFFSET_DEGREES: f64 = -90.0;
// Past this, f64 spacing eats into the jitter margin and landings drift across segment edges
pub const MAX_ABS_ANGLE_DEGREES: f64 = 1.0e12;

pub const SEGMENT_PALETTE: [&str; 8] = [
    "#9B1B30", // Crimson
    "#D4A030", // Gold
    "#7A1526", // Wine
    "#B8860B", // Dark goldenrod
    "#8B0000", // Dark red
    "#DAA520", // Goldenrod
    "#5C0A1A", // Oxblood
    "#C5943A", // Bronze
];

pub const NEW_PRIZE_LABEL: &str = "New Prize";
pub const NEW_PRIZE_WEIGHT: f64 = 50.0;
pub const SLIDER_MAX_WEIGHT: f64 = 100.0;

pub const MAX_LABEL_LENGTH: usize = 64;
pub const LABEL_WRAP_THRESHOLD: usize = 10; // Labels longer than this wrap onto two lines
pub const LABEL_FALLBACK_SPLIT: usize = 8; // Split point for long labels without a space

pub const RECENT_WINNERS_LIMIT: usize = 20;
pub const MIN_DISTRIBUTION_BAR_PERCENT: f64 = 5.0;

pub const WHEEL_CONFIG_STORAGE_KEY: &str = "wheel_config";
pub const PRIZE_POOL_STORAGE_KEY: &str = "wheel_prizes";
