use crate::constants::SLIDE_TRANSITION_DURATION;

/// Width breakpoints, in logical pixels.
pub const BREAKPOINT_MD: f32 = 768.0;
pub const BREAKPOINT_LG: f32 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f32) -> Self {
        if width < BREAKPOINT_MD {
            Self::Mobile
        } else if width < BREAKPOINT_LG {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }

    /// Edge padding for the layout.
    pub fn edge_padding(self) -> f32 {
        match self {
            Self::Mobile => 20.0,
            Self::Tablet => 32.0,
            Self::Desktop => 48.0,
        }
    }
}

/// Slide crossfade length in seconds. Reduced motion cuts straight over.
pub fn slide_transition_duration(reduced_motion: bool) -> f32 {
    if reduced_motion {
        0.0
    } else {
        SLIDE_TRANSITION_DURATION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_size(width: f32, height: f32) -> Self {
        if height > width {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}
